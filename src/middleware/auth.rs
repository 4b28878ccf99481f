//! Session gate for a protected subtree.

use std::sync::Arc;

use tracing::info;

use super::Middleware;
use crate::handler::{BoxedHandler, Handler};
use crate::request::Request;
use crate::response::Response;
use crate::session;

/// Lets a request through only if it carries a session cookie.
///
/// Without one, the wrapped handler is never called and the client gets a
/// `302 Found` to the configured destination (`/` by default). Wrap only
/// the router that needs protecting, then mount it.
#[derive(Clone, Debug)]
pub struct RequireSession {
    redirect_to: Arc<str>,
}

impl RequireSession {
    pub fn new() -> Self {
        Self { redirect_to: Arc::from("/") }
    }

    /// Where unauthenticated requests are sent.
    pub fn redirect_to(mut self, location: &str) -> Self {
        self.redirect_to = Arc::from(location);
        self
    }
}

impl Default for RequireSession {
    fn default() -> Self { Self::new() }
}

impl Middleware for RequireSession {
    fn wrap(&self, next: BoxedHandler) -> BoxedHandler {
        let redirect_to = Arc::clone(&self.redirect_to);
        (move |req: Request| {
            let next = next.clone();
            let redirect_to = Arc::clone(&redirect_to);
            async move {
                if session::current(&req).is_none() {
                    info!(path = req.path(), "no auth");
                    return Response::redirect(&redirect_to);
                }
                next.call(req).await
            }
        })
        .into_boxed_handler()
    }
}

#[cfg(test)]
mod tests {
    use std::net::SocketAddr;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use bytes::Bytes;
    use http::StatusCode;

    use super::*;

    fn counted(calls: Arc<AtomicUsize>) -> BoxedHandler {
        (move |_req: Request| {
            calls.fetch_add(1, Ordering::SeqCst);
            async { "secret" }
        })
        .into_boxed_handler()
    }

    fn request(cookie: Option<&str>) -> Request {
        let mut builder = http::Request::builder().uri("/admin/");
        if let Some(cookie) = cookie {
            builder = builder.header("cookie", cookie);
        }
        let addr: SocketAddr = "127.0.0.1:40000".parse().unwrap();
        Request::from_http(builder.body(Bytes::new()).unwrap(), addr)
    }

    #[tokio::test]
    async fn redirects_without_calling_next() {
        let calls = Arc::new(AtomicUsize::new(0));
        let app = RequireSession::new().redirect_to("/login").wrap(counted(Arc::clone(&calls)));

        let res = app.call(request(None)).await;
        assert_eq!(res.status_code(), StatusCode::FOUND);
        assert_eq!(res.header("location"), Some("/login"));

        let res = app.call(request(Some("session_id="))).await;
        assert_eq!(res.status_code(), StatusCode::FOUND);

        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn forwards_once_with_session() {
        let calls = Arc::new(AtomicUsize::new(0));
        let app = RequireSession::new().wrap(counted(Arc::clone(&calls)));

        let res = app.call(request(Some("session_id=alice"))).await;
        assert_eq!(res.status_code(), StatusCode::OK);
        assert_eq!(res.body(), b"secret");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
