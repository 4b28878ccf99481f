//! Panic containment.

use std::any::Any;
use std::panic::AssertUnwindSafe;

use futures_util::FutureExt;
use tracing::error;

use super::Middleware;
use crate::handler::{BoxedHandler, Handler};
use crate::request::Request;
use crate::response::Response;

/// Turns a panic anywhere below into a logged `500 Internal server error`.
///
/// The guard is scoped to one request's future: the panicking request gets
/// the fixed error response, the connection task and every other request
/// carry on. A panic raised while the inner handler is still building its
/// future (a router resolving a route, a closure's synchronous prologue) is
/// caught too, because that call happens inside the guarded future.
///
/// This must be the outermost layer of a pipeline.
#[derive(Clone, Copy, Debug, Default)]
pub struct Recover;

impl Middleware for Recover {
    fn wrap(&self, next: BoxedHandler) -> BoxedHandler {
        (move |req: Request| {
            let next = next.clone();
            async move {
                let method = req.method().clone();
                let path = req.path().to_owned();

                match AssertUnwindSafe(async move { next.call(req).await }).catch_unwind().await {
                    Ok(res) => res,
                    Err(payload) => {
                        error!(%method, path = %path, cause = %panic_message(payload.as_ref()), "recovered from panic");
                        Response::internal_error()
                    }
                }
            }
        })
        .into_boxed_handler()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s
    } else {
        "non-string panic payload"
    }
}
