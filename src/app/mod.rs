//! Composition root.
//!
//! Assembles the finished request pipelines. Each one is built completely
//! before the server starts and is immutable afterwards:
//!
//! ```text
//! site
//! req
//!   -> Recover
//!     -> AccessLog
//!       -> Router
//!            /admin  -> RequireSession -> admin Router
//!            /login, /logout, /
//! ```

pub mod pages;
pub mod users;

use http::Method;

use crate::config::{AppKind, Config};
use crate::handler::BoxedHandler;
use crate::middleware::{AccessLog, Chain, Recover, RequireSession};
use crate::router::{Route, Router};

/// The outer layers every application gets: panic containment outermost,
/// access logging inside it.
pub fn base_chain(access_log: AccessLog) -> Chain {
    Chain::new().layer(Recover).layer(access_log)
}

/// The login demo site.
///
/// Admin routes are relative to the `/admin` mount point; anything under it
/// that is not `/panic` lands on the admin index.
pub fn site(session_subject: &str, access_log: AccessLog) -> BoxedHandler {
    let admin = Chain::new().layer(RequireSession::new()).then(
        Router::new()
            .on(Method::GET, "/panic", pages::admin_panic)
            .on(Method::GET, "/{*rest}", pages::admin_index),
    );

    let site = Router::new()
        .mount("/admin", admin)
        .on(Method::GET, "/login", pages::login(session_subject))
        .on(Method::GET, "/logout", pages::logout)
        .on(Method::GET, "/", pages::index);

    base_chain(access_log).then(site)
}

/// The `/users` API with method, header, host and pattern constraints.
pub fn users(access_log: AccessLog) -> BoxedHandler {
    let api = Router::new()
        .on(Method::GET, "/", users::list)
        .route(Route::new("/users", users::list).method(Method::GET).host("localhost"))
        .on(Method::PUT, "/users", users::update)
        .on(Method::GET, "/users/{id:[0-9]+}", users::get)
        .route(
            Route::new("/users/{login}", users::create)
                .method(Method::POST)
                .header("X-Auth", "test"),
        );

    base_chain(access_log).then(api)
}

/// The application selected by `config`, logging to tracing.
pub fn build(config: &Config) -> BoxedHandler {
    match config.app {
        AppKind::Site => site(&config.session_subject, AccessLog::new()),
        AppKind::Users => users(AccessLog::new()),
    }
}
