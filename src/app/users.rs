//! The `/users` API: plain-text answers describing what the request would do.

use crate::request::Request;

pub async fn list(_req: Request) -> &'static str {
    "You see user list\n"
}

/// `GET /users/{id:[0-9]+}`
pub async fn get(req: Request) -> String {
    format!("you try to see user {}\n", req.param("id").unwrap_or_default())
}

/// `POST /users/{login}` with `X-Auth: test`
pub async fn create(_req: Request) -> &'static str {
    "you try to create new user\n"
}

/// `PUT /users`. The route binds no `login` capture, so the name renders
/// empty.
pub async fn update(req: Request) -> String {
    format!("you try to update {}\n", req.param("login").unwrap_or_default())
}
