//! Middleware layer.
//!
//! Middleware is the place for cross-cutting behaviour: panic containment,
//! access logging, session checks. A middleware is a function from handler
//! to handler: it receives the `next` handler and returns a new one that
//! decides whether and when to call it, and what to do around the call.
//!
//! Layers are stacked with a [`Chain`] once, at startup:
//!
//! ```rust,no_run
//! use http::Method;
//! use strata::middleware::{AccessLog, Chain, Recover};
//! use strata::{Request, Router};
//!
//! # async fn index(_: Request) -> &'static str { "" }
//! let app = Chain::new()
//!     .layer(Recover)          // outermost
//!     .layer(AccessLog::new()) // sees everything below, including auth
//!     .then(Router::new().on(Method::GET, "/", index));
//! ```
//!
//! Order matters. Put [`Recover`] outside everything that can fail, and
//! [`AccessLog`] outside whatever latency it should account for. Gate
//! only the subtree that needs it with [`RequireSession`], by wrapping a
//! router and [mounting](crate::Router::mount) it.
//!
//! Middleware values are shared by every request in flight. Per-request
//! state lives in the returned handler's future, never in the middleware.

mod access_log;
mod auth;
mod recover;

use std::sync::Arc;

use crate::handler::{BoxedHandler, Handler};

pub use access_log::{AccessEntry, AccessLog, AccessSink, TracingSink};
pub use auth::RequireSession;
pub use recover::Recover;

/// A handler-to-handler transform.
///
/// Implemented for the built-in layers and for any
/// `Fn(BoxedHandler) -> BoxedHandler` closure.
pub trait Middleware: Send + Sync + 'static {
    fn wrap(&self, next: BoxedHandler) -> BoxedHandler;
}

impl<F> Middleware for F
where
    F: Fn(BoxedHandler) -> BoxedHandler + Send + Sync + 'static,
{
    fn wrap(&self, next: BoxedHandler) -> BoxedHandler {
        self(next)
    }
}

/// An ordered stack of middleware. The first layer added is the outermost.
#[derive(Clone, Default)]
pub struct Chain {
    layers: Vec<Arc<dyn Middleware>>,
}

impl Chain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a layer inside every layer added before it.
    pub fn layer(mut self, middleware: impl Middleware) -> Self {
        self.layers.push(Arc::new(middleware));
        self
    }

    /// Wraps `handler` in every layer, innermost first, and returns the
    /// finished pipeline.
    pub fn then(&self, handler: impl Handler) -> BoxedHandler {
        self.layers
            .iter()
            .rev()
            .fold(handler.into_boxed_handler(), |next, layer| layer.wrap(next))
    }
}

#[cfg(test)]
mod tests {
    use std::net::SocketAddr;
    use std::sync::Mutex;

    use bytes::Bytes;

    use super::*;
    use crate::request::Request;

    fn tagging(log: Arc<Mutex<Vec<String>>>, tag: &'static str) -> impl Middleware {
        move |next: BoxedHandler| {
            let log = Arc::clone(&log);
            (move |req: Request| {
                let next = next.clone();
                let log = Arc::clone(&log);
                async move {
                    log.lock().unwrap().push(format!("enter {tag}"));
                    let res = next.call(req).await;
                    log.lock().unwrap().push(format!("leave {tag}"));
                    res
                }
            })
            .into_boxed_handler()
        }
    }

    #[tokio::test]
    async fn first_layer_is_outermost() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let inner_log = Arc::clone(&log);
        let app = Chain::new()
            .layer(tagging(Arc::clone(&log), "outer"))
            .layer(tagging(Arc::clone(&log), "inner"))
            .then(move |_req: Request| {
                let log = Arc::clone(&inner_log);
                async move {
                    log.lock().unwrap().push("handler".to_owned());
                    "ok"
                }
            });

        let addr: SocketAddr = "127.0.0.1:40000".parse().unwrap();
        let req = Request::from_http(http::Request::new(Bytes::new()), addr);
        app.call(req).await;

        assert_eq!(
            *log.lock().unwrap(),
            ["enter outer", "enter inner", "handler", "leave inner", "leave outer"]
        );
    }
}
