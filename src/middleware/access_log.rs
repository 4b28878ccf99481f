//! Access logging.

use std::fmt;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use http::Method;
use tracing::info;

use super::Middleware;
use crate::handler::{BoxedHandler, Handler};
use crate::request::Request;

/// One access-log record.
///
/// Displays as `[METHOD] remote_addr, path duration`, e.g.
/// `[GET] 127.0.0.1:56051, /favicon.ico 35.713µs`.
#[derive(Clone, Debug)]
pub struct AccessEntry {
    pub method: Method,
    pub remote_addr: SocketAddr,
    pub path: String,
    pub elapsed: Duration,
}

impl fmt::Display for AccessEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}, {} {:?}", self.method, self.remote_addr, self.path, self.elapsed)
    }
}

/// Where access entries go. Called once per request, possibly from many
/// threads at once; each call must write its entry as one unit.
pub trait AccessSink: Send + Sync + 'static {
    fn record(&self, entry: &AccessEntry);
}

/// Default sink: one `info` event per entry on target `strata::access`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl AccessSink for TracingSink {
    fn record(&self, entry: &AccessEntry) {
        info!(target: "strata::access", "{entry}");
    }
}

/// Records method, peer, path and wall-clock latency of every request.
///
/// The clock starts before the inner handler is called and stops when it
/// returns, so the duration includes every layer below. The entry is
/// written by a drop guard: a request whose handler panics or whose
/// future is dropped early is still logged, exactly once.
#[derive(Clone)]
pub struct AccessLog {
    sink: Arc<dyn AccessSink>,
}

impl AccessLog {
    pub fn new() -> Self {
        Self::with_sink(TracingSink)
    }

    pub fn with_sink(sink: impl AccessSink) -> Self {
        Self { sink: Arc::new(sink) }
    }
}

impl Default for AccessLog {
    fn default() -> Self { Self::new() }
}

impl Middleware for AccessLog {
    fn wrap(&self, next: BoxedHandler) -> BoxedHandler {
        let sink = Arc::clone(&self.sink);
        (move |req: Request| {
            let next = next.clone();
            let sink = Arc::clone(&sink);
            async move {
                let _guard = EntryGuard {
                    sink,
                    method: req.method().clone(),
                    remote_addr: req.remote_addr(),
                    path: req.path().to_owned(),
                    start: Instant::now(),
                };
                next.call(req).await
            }
        })
        .into_boxed_handler()
    }
}

struct EntryGuard {
    sink: Arc<dyn AccessSink>,
    method: Method,
    remote_addr: SocketAddr,
    path: String,
    start: Instant,
}

impl Drop for EntryGuard {
    fn drop(&mut self) {
        let entry = AccessEntry {
            method: self.method.clone(),
            remote_addr: self.remote_addr,
            path: std::mem::take(&mut self.path),
            elapsed: self.start.elapsed(),
        };
        self.sink.record(&entry);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use bytes::Bytes;

    use super::*;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<AccessEntry>>>);

    impl AccessSink for Captured {
        fn record(&self, entry: &AccessEntry) {
            self.0.lock().unwrap().push(entry.clone());
        }
    }

    fn request(method: Method, uri: &str) -> Request {
        let req = http::Request::builder().method(method).uri(uri).body(Bytes::new()).unwrap();
        Request::from_http(req, "10.0.0.7:51000".parse().unwrap())
    }

    #[test]
    fn formats_like_a_log_line() {
        let entry = AccessEntry {
            method: Method::GET,
            remote_addr: "127.0.0.1:56051".parse().unwrap(),
            path: "/favicon.ico".to_owned(),
            elapsed: Duration::from_micros(35),
        };
        assert_eq!(entry.to_string(), "[GET] 127.0.0.1:56051, /favicon.ico 35µs");
    }

    #[tokio::test]
    async fn records_once_with_full_latency() {
        let captured = Captured::default();
        let app = AccessLog::with_sink(captured.clone()).wrap(
            (|_req: Request| async {
                tokio::time::sleep(Duration::from_millis(20)).await;
                "slow"
            })
            .into_boxed_handler(),
        );

        app.call(request(Method::POST, "/slow")).await;

        let entries = captured.0.lock().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].method, Method::POST);
        assert_eq!(entries[0].path, "/slow");
        assert_eq!(entries[0].remote_addr.to_string(), "10.0.0.7:51000");
        assert!(entries[0].elapsed >= Duration::from_millis(20));
    }

    #[tokio::test]
    async fn records_even_when_the_handler_panics() {
        async fn boom(_req: Request) -> &'static str {
            panic!("boom")
        }
        let captured = Captured::default();
        let app = crate::middleware::Recover
            .wrap(AccessLog::with_sink(captured.clone()).wrap(boom.into_boxed_handler()));

        app.call(request(Method::GET, "/boom")).await;

        let entries = captured.0.lock().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].path, "/boom");
    }
}
