//! The `/users` API: method, header, host and pattern constraints.

use http::{Method, StatusCode};
use strata::app;
use strata::middleware::AccessLog;

mod common;
use common::{body, send};

const HOST: (&str, &str) = ("host", "127.0.0.1:8080");

#[tokio::test]
async fn lists_at_root() {
    let api = app::users(AccessLog::new());
    let res = send(&api, Method::GET, "/", &[HOST]).await;
    assert_eq!(body(&res), "You see user list\n");
}

#[tokio::test]
async fn digits_select_the_get_route() {
    let api = app::users(AccessLog::new());
    let res = send(&api, Method::GET, "/users/42", &[HOST]).await;
    assert_eq!(body(&res), "you try to see user 42\n");
}

#[tokio::test]
async fn non_digit_id_is_not_a_get() {
    let api = app::users(AccessLog::new());
    // Only the POST `{login}` route takes a non-numeric segment, and it also
    // wants the auth header before its method is considered.
    let res = send(&api, Method::GET, "/users/evg", &[HOST]).await;
    assert_eq!(res.status_code(), StatusCode::NOT_FOUND);

    let res = send(&api, Method::GET, "/users/evg", &[HOST, ("X-Auth", "test")]).await;
    assert_eq!(res.status_code(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(res.header("allow"), Some("POST"));
}

#[tokio::test]
async fn put_users_updates_with_empty_login() {
    let api = app::users(AccessLog::new());
    let res = send(&api, Method::PUT, "/users", &[HOST]).await;
    assert_eq!(res.status_code(), StatusCode::OK);
    assert_eq!(body(&res), "you try to update \n");
}

#[tokio::test]
async fn post_requires_auth_header() {
    let api = app::users(AccessLog::new());

    let res = send(&api, Method::POST, "/users/evg", &[HOST, ("X-Auth", "test")]).await;
    assert_eq!(body(&res), "you try to create new user\n");

    // A numeric login still reaches create: the GET route ahead of it
    // matches the path but not the method.
    let res = send(&api, Method::POST, "/users/42", &[HOST, ("X-Auth", "test")]).await;
    assert_eq!(body(&res), "you try to create new user\n");

    let res = send(&api, Method::POST, "/users/evg", &[HOST]).await;
    assert_eq!(res.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn localhost_may_list_users() {
    let api = app::users(AccessLog::new());

    let res = send(&api, Method::GET, "/users", &[("host", "localhost:8080")]).await;
    assert_eq!(body(&res), "You see user list\n");

    let res = send(&api, Method::GET, "/users", &[HOST]).await;
    assert_eq!(res.status_code(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(res.header("allow"), Some("PUT"));

    // The host route is GET-only, so PUT from localhost still updates.
    let res = send(&api, Method::PUT, "/users", &[("host", "localhost")]).await;
    assert_eq!(body(&res), "you try to update \n");
}
