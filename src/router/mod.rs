//! Ordered request router.
//!
//! Routes are tried in registration order; the first one whose path
//! pattern, method set, required headers and host all match wins. There is
//! no specificity ranking: when two patterns overlap, register the one you
//! want to take precedence first.
//!
//! ```rust,no_run
//! use http::Method;
//! use strata::{Request, Route, Router};
//!
//! # async fn get(_: Request) -> &'static str { "" }
//! # async fn create(_: Request) -> &'static str { "" }
//! let api = Router::new()
//!     .on(Method::GET, "/users/{id:[0-9]+}", get)
//!     .route(Route::new("/users/{login}", create)
//!         .method(Method::POST)
//!         .header("X-Auth", "test"));
//! ```
//!
//! A router is itself a [`Handler`], so it can be wrapped in middleware and
//! [mounted](Router::mount) under a prefix of another router.

mod pattern;

use std::collections::HashMap;
use std::future::ready;

use http::header::ALLOW;
use http::{Method, StatusCode};
use tracing::debug;

use crate::error::Error;
use crate::handler::{BoxFuture, BoxedHandler, ErasedHandler, Handler};
use crate::request::Request;
use crate::response::Response;

use pattern::Pattern;

// ── Route ─────────────────────────────────────────────────────────────────────

/// A path pattern plus constraints, bound to a handler.
///
/// Constraints left unset match anything: no [`method`](Route::method) call
/// means every method is accepted.
pub struct Route {
    path: String,
    methods: Vec<Method>,
    headers: Vec<(String, String)>,
    host: Option<String>,
    handler: BoxedHandler,
}

impl Route {
    pub fn new(path: &str, handler: impl Handler) -> Self {
        Self {
            path: path.to_owned(),
            methods: Vec::new(),
            headers: Vec::new(),
            host: None,
            handler: handler.into_boxed_handler(),
        }
    }

    /// Adds `method` to the accepted set.
    pub fn method(mut self, method: Method) -> Self {
        if !self.methods.contains(&method) {
            self.methods.push(method);
        }
        self
    }

    /// Requires header `name` to be present with exactly `value`.
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_owned(), value.to_owned()));
        self
    }

    /// Requires the request's target host to equal `host`. Without a port in
    /// `host`, the request's port is ignored.
    pub fn host(mut self, host: &str) -> Self {
        self.host = Some(host.to_owned());
        self
    }
}

enum Target {
    Exact(Pattern),
    /// Mount point without its trailing slash; empty for `/`.
    Prefix(String),
}

struct Entry {
    target: Target,
    methods: Vec<Method>,
    headers: Vec<(String, String)>,
    host: Option<String>,
    handler: BoxedHandler,
}

impl Entry {
    fn accepts_method(&self, method: &Method) -> bool {
        self.methods.is_empty() || self.methods.contains(method)
    }

    fn accepts_headers(&self, req: &Request) -> bool {
        self.headers.iter().all(|(name, value)| req.header(name) == Some(value.as_str()))
    }

    fn accepts_host(&self, req: &Request) -> bool {
        let Some(want) = self.host.as_deref() else { return true };
        let Some(got) = req.host() else { return false };
        if want.contains(':') { got == want } else { strip_port(got) == want }
    }
}

fn strip_port(host: &str) -> &str {
    if host.starts_with('[') {
        // [v6]:port
        return host.split_once("]:").map_or(host, |(h, _)| &host[..=h.len()]);
    }
    host.split_once(':').map_or(host, |(h, _)| h)
}

/// Outcome of running a request through the route table.
pub(crate) enum Resolution {
    Matched { handler: BoxedHandler, params: HashMap<String, String> },
    Mounted { handler: BoxedHandler, rest: String },
    MethodNotAllowed(Vec<Method>),
    NotFound,
}

// ── Router ────────────────────────────────────────────────────────────────────

/// The route table.
///
/// Build it once at startup; it is never mutated afterwards and is shared
/// read-only between concurrent requests. Each registration method returns
/// `self` so registrations chain naturally.
#[derive(Default)]
pub struct Router {
    entries: Vec<Entry>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` for one method and a path pattern.
    ///
    /// # Panics
    ///
    /// Panics if `path` is not a valid pattern. Routes are registered at
    /// startup; use [`try_route`](Self::try_route) for patterns that come
    /// from outside the program.
    pub fn on(self, method: Method, path: &str, handler: impl Handler) -> Self {
        self.route(Route::new(path, handler).method(method))
    }

    /// Registers `handler` for every method.
    ///
    /// # Panics
    ///
    /// Panics if `path` is not a valid pattern.
    pub fn any(self, path: &str, handler: impl Handler) -> Self {
        self.route(Route::new(path, handler))
    }

    /// Registers a fully configured [`Route`].
    ///
    /// # Panics
    ///
    /// Panics if the route's path is not a valid pattern.
    pub fn route(self, route: Route) -> Self {
        self.try_route(route).unwrap_or_else(|e| panic!("{e}"))
    }

    /// Registers a [`Route`], reporting an invalid pattern as an error.
    pub fn try_route(mut self, route: Route) -> Result<Self, Error> {
        let pattern = Pattern::parse(&route.path)?;
        debug!(pattern = pattern.as_str(), methods = ?route.methods, "route registered");
        self.entries.push(Entry {
            target: Target::Exact(pattern),
            methods: route.methods,
            headers: route.headers,
            host: route.host,
            handler: route.handler,
        });
        Ok(self)
    }

    /// Hands every request under `prefix` to `handler`, with the routing
    /// path shortened to what follows the prefix.
    ///
    /// The prefix matches on a segment boundary: `/admin` covers `/admin`,
    /// `/admin/` and `/admin/users`, not `/administrator`. The inner handler
    /// sees `/` for the mount point itself.
    ///
    /// # Panics
    ///
    /// Panics if `prefix` does not start with `/`.
    pub fn mount(mut self, prefix: &str, handler: impl Handler) -> Self {
        if !prefix.starts_with('/') {
            panic!("{}", Error::route(prefix, "mount point must start with `/`"));
        }
        self.entries.push(Entry {
            target: Target::Prefix(prefix.trim_end_matches('/').to_owned()),
            methods: Vec::new(),
            headers: Vec::new(),
            host: None,
            handler: handler.into_boxed_handler(),
        });
        self
    }

    pub(crate) fn resolve(&self, req: &Request) -> Resolution {
        let path = req.route_path();
        let mut allowed: Vec<Method> = Vec::new();
        let mut method_mismatch = false;

        for entry in &self.entries {
            let bound = match &entry.target {
                Target::Exact(pattern) => match pattern.captures(path) {
                    Some(bound) => bound,
                    None => continue,
                },
                Target::Prefix(prefix) => {
                    let Some(rest) = path.strip_prefix(prefix.as_str()) else { continue };
                    if !rest.is_empty() && !rest.starts_with('/') {
                        continue;
                    }
                    let rest = if rest.is_empty() { "/" } else { rest };
                    return Resolution::Mounted {
                        handler: entry.handler.clone(),
                        rest: rest.to_owned(),
                    };
                }
            };

            if !entry.accepts_headers(req) || !entry.accepts_host(req) {
                continue;
            }
            if !entry.accepts_method(req.method()) {
                method_mismatch = true;
                for m in &entry.methods {
                    if !allowed.contains(m) {
                        allowed.push(m.clone());
                    }
                }
                continue;
            }

            return Resolution::Matched {
                handler: entry.handler.clone(),
                params: bound.into_iter().collect(),
            };
        }

        if method_mismatch {
            Resolution::MethodNotAllowed(allowed)
        } else {
            Resolution::NotFound
        }
    }
}

impl ErasedHandler for Router {
    fn call(&self, mut req: Request) -> BoxFuture {
        match self.resolve(&req) {
            Resolution::Matched { handler, params } => {
                req.params = params;
                handler.call(req)
            }
            Resolution::Mounted { handler, rest } => {
                req.route_path = rest;
                handler.call(req)
            }
            Resolution::MethodNotAllowed(allowed) => {
                debug!(method = %req.method(), path = req.path(), "method not allowed");
                let allow = allowed.iter().map(Method::as_str).collect::<Vec<_>>().join(", ");
                Box::pin(ready(
                    Response::builder()
                        .status(StatusCode::METHOD_NOT_ALLOWED)
                        .header(ALLOW.as_str(), &allow)
                        .no_body(),
                ))
            }
            Resolution::NotFound => {
                debug!(method = %req.method(), path = req.path(), "no route");
                Box::pin(ready(Response::status(StatusCode::NOT_FOUND)))
            }
        }
    }
}
