//! # strata
//!
//! Request middleware and pattern routing, layered over hyper.
//!
//! Everything that answers a request is a [`Handler`]. A
//! [`Middleware`](middleware::Middleware) turns one handler into another:
//! it can act before and after calling the inner one, or answer on its own
//! and never call it. A [`Router`] picks one handler per request from an
//! ordered table of patterns and constraints, and is a handler itself, so
//! routers nest and can be wrapped.
//!
//! ```text
//! req
//!   -> Recover             panic → 500, other requests unaffected
//!     -> AccessLog         [GET] 127.0.0.1:56051, /admin/ 35.713µs
//!       -> Router
//!            /admin  -> RequireSession -> Router
//!            /login, /logout, /
//! ```
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use http::Method;
//! use strata::middleware::{AccessLog, Chain, Recover, RequireSession};
//! use strata::{Request, Response, Router, Server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let admin = Chain::new()
//!         .layer(RequireSession::new())
//!         .then(Router::new().on(Method::GET, "/{*rest}", admin_index));
//!
//!     let app = Chain::new()
//!         .layer(Recover)
//!         .layer(AccessLog::new())
//!         .then(
//!             Router::new()
//!                 .mount("/admin", admin)
//!                 .on(Method::GET, "/users/{id:[0-9]+}", get_user),
//!         );
//!
//!     let addr = "127.0.0.1:8080".parse().unwrap();
//!     Server::bind(addr).serve(app).await.unwrap();
//! }
//!
//! async fn admin_index(_req: Request) -> Response {
//!     Response::text("Admin main page")
//! }
//!
//! async fn get_user(req: Request) -> String {
//!     format!("user {}", req.param("id").unwrap_or_default())
//! }
//! ```

mod error;
mod handler;
mod request;
mod response;
mod router;
mod server;

pub mod app;
pub mod config;
pub mod middleware;
pub mod session;

pub use config::Config;
pub use error::Error;
pub use handler::{BoxFuture, BoxedHandler, Handler};
pub use request::Request;
pub use response::{INTERNAL_ERROR_BODY, IntoResponse, Response, ResponseBuilder};
pub use router::{Route, Router};
pub use server::Server;
