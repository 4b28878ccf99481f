//! Site pages: index, login, logout, and the admin subtree.

use std::sync::Arc;

use chrono::Utc;
use http::header::SET_COOKIE;

use crate::handler::Handler;
use crate::request::Request;
use crate::response::Response;
use crate::session::{self, SessionCookie};

/// `GET /`: greets the session holder or links to the login page.
pub async fn index(req: Request) -> Response {
    match session::current(&req) {
        Some(subject) => Response::html(format!(
            "<a href=\"/logout\">logout</a>\nWelcome, {subject}\n"
        )),
        None => Response::html("<a href=\"/login\">login</a>\nYou need to login\n"),
    }
}

/// `GET /login`: issues a session for `subject` and sends the client home.
pub fn login(subject: &str) -> impl Handler + use<> {
    let subject: Arc<str> = Arc::from(subject);
    move |_req: Request| {
        let cookie = SessionCookie::issue(&subject, Utc::now());
        async move { with_cookie(&cookie) }
    }
}

/// `GET /logout`: expires the session, if there is one, and sends the
/// client home.
pub async fn logout(req: Request) -> Response {
    match req.cookie(session::SESSION_COOKIE) {
        Some(value) => with_cookie(&SessionCookie::expire(value, Utc::now())),
        None => Response::redirect("/"),
    }
}

fn with_cookie(cookie: &SessionCookie) -> Response {
    Response::builder()
        .status(http::StatusCode::FOUND)
        .header(SET_COOKIE.as_str(), &cookie.header_value())
        .header(http::header::LOCATION.as_str(), "/")
        .no_body()
}

/// `GET /admin/…`: admin landing page.
pub async fn admin_index(_req: Request) -> Response {
    Response::html("<a href=\"/\">site index</a>\nAdmin main page\n")
}

/// `GET /admin/panic`: fails on purpose, for exercising [`Recover`](crate::middleware::Recover).
pub async fn admin_panic(_req: Request) -> Response {
    panic!("this must be recovered")
}
