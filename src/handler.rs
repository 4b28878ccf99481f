//! Handler trait and type erasure.
//!
//! # How handlers are stored
//!
//! A route table, a middleware layer and a mounted sub-router all need to
//! hold handlers of *different* concrete types behind one type. We use a
//! trait object (`dyn ErasedHandler`) to hide the concrete type and store
//! everything uniformly as a [`BoxedHandler`].
//!
//! ```text
//! async fn index(req: Request) -> Response { … }   ← user writes this
//!        ↓ router.on(Method::GET, "/", index)
//! index.into_boxed_handler()                       ← Handler blanket impl
//!        ↓
//! BoxedHandler(Arc::new(FnHandler(index)))         ← heap-allocated wrapper
//!        ↓
//! handler.call(req)  at request time               ← one vtable dispatch
//! ```
//!
//! Middleware consumes a `BoxedHandler` and produces another one, so a
//! fully wrapped pipeline is still just a `BoxedHandler`. The per-request
//! cost of every layer is one `Arc` clone plus one virtual call.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::request::Request;
use crate::response::{IntoResponse, Response};
use crate::router::Router;

/// A heap-allocated, type-erased future that resolves to a [`Response`].
///
/// `Send + 'static` lets tokio move the future across worker threads.
pub type BoxFuture = Pin<Box<dyn Future<Output = Response> + Send + 'static>>;

/// Internal dispatch interface. External code writes an `async fn` or a
/// [`Middleware`](crate::middleware::Middleware) instead.
pub(crate) trait ErasedHandler: Send + Sync + 'static {
    fn call(&self, req: Request) -> BoxFuture;
}

/// A type-erased handler shared across concurrent requests.
///
/// Cloning is one atomic increment. This is the currency of the middleware
/// layer: [`Middleware::wrap`](crate::middleware::Middleware::wrap) takes
/// one and returns one.
#[derive(Clone)]
pub struct BoxedHandler(Arc<dyn ErasedHandler>);

impl BoxedHandler {
    pub(crate) fn new(inner: impl ErasedHandler) -> Self {
        Self(Arc::new(inner))
    }

    /// Runs the handler for one request.
    ///
    /// Nothing is evaluated until the returned future is polled, except
    /// whatever synchronous work the concrete handler does while building
    /// it (a [`Router`] resolves its route here).
    pub fn call(&self, req: Request) -> BoxFuture {
        self.0.call(req)
    }
}

impl fmt::Debug for BoxedHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BoxedHandler { .. }")
    }
}

// ── Public Handler trait ──────────────────────────────────────────────────────

/// Implemented for everything that can answer a request.
///
/// You never implement this yourself. It is satisfied by:
///
/// - any `async fn` (or closure returning a future) with the shape
///   `Fn(Request) -> impl Future<Output = impl IntoResponse>`
/// - [`Router`], so routers can be mounted and wrapped
/// - [`BoxedHandler`], the output of middleware
///
/// The trait is **sealed** via the private `Sealed` supertrait.
pub trait Handler: private::Sealed + Send + Sync + 'static {
    #[doc(hidden)]
    fn into_boxed_handler(self) -> BoxedHandler;
}

mod private {
    pub trait Sealed {}
}

// ── Blanket implementation for functions ──────────────────────────────────────

impl<F, Fut, R> private::Sealed for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
}

impl<F, Fut, R> Handler for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn into_boxed_handler(self) -> BoxedHandler {
        BoxedHandler::new(FnHandler(self))
    }
}

/// Bridges a typed handler function to the trait-object world.
struct FnHandler<F>(F);

impl<F, Fut, R> ErasedHandler for FnHandler<F>
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn call(&self, req: Request) -> BoxFuture {
        let fut = (self.0)(req);
        Box::pin(async move { fut.await.into_response() })
    }
}

// ── Already-erased handlers ───────────────────────────────────────────────────

impl private::Sealed for BoxedHandler {}

impl Handler for BoxedHandler {
    fn into_boxed_handler(self) -> BoxedHandler {
        self
    }
}

impl private::Sealed for Router {}

impl Handler for Router {
    fn into_boxed_handler(self) -> BoxedHandler {
        BoxedHandler::new(self)
    }
}
