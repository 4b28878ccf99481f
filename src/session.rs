//! The session marker: a `session_id` cookie.
//!
//! Possession of a non-empty `session_id` cookie is what "logged in" means
//! here. Nothing is stored server-side and the value is not signed; the
//! cookie exists to demonstrate gating, not to secure anything.

use chrono::{DateTime, TimeDelta, Utc};

use crate::request::Request;

/// Cookie name carrying the session.
pub const SESSION_COOKIE: &str = "session_id";

/// Lifetime of a freshly issued session, in hours.
pub const SESSION_TTL_HOURS: i64 = 10;

/// A `Set-Cookie` value for the session marker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionCookie {
    value: String,
    expires: DateTime<Utc>,
}

impl SessionCookie {
    /// A new session for `subject`, valid for [`SESSION_TTL_HOURS`] from `now`.
    pub fn issue(subject: &str, now: DateTime<Utc>) -> Self {
        Self { value: subject.to_owned(), expires: now + TimeDelta::hours(SESSION_TTL_HOURS) }
    }

    /// The same session dated one day in the past, which makes the client
    /// drop it.
    pub fn expire(value: &str, now: DateTime<Utc>) -> Self {
        Self { value: value.to_owned(), expires: now - TimeDelta::days(1) }
    }

    pub fn value(&self) -> &str { &self.value }
    pub fn expires(&self) -> DateTime<Utc> { self.expires }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires <= now
    }

    /// Renders the `Set-Cookie` header value.
    pub fn header_value(&self) -> String {
        format!(
            "{SESSION_COOKIE}={}; Path=/; Expires={}; HttpOnly",
            self.value,
            self.expires.format("%a, %d %b %Y %H:%M:%S GMT"),
        )
    }
}

/// The session value carried by `req`, if any. An empty value counts as no
/// session.
pub fn current(req: &Request) -> Option<&str> {
    req.cookie(SESSION_COOKIE).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use std::net::SocketAddr;

    use bytes::Bytes;
    use chrono::TimeZone;

    use super::*;

    fn at_noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2015, 10, 21, 12, 0, 0).unwrap()
    }

    #[test]
    fn issued_cookie_lasts_ten_hours() {
        let cookie = SessionCookie::issue("alice", at_noon());
        assert_eq!(cookie.expires() - at_noon(), TimeDelta::hours(10));
        assert!(!cookie.is_expired(at_noon()));
        assert_eq!(
            cookie.header_value(),
            "session_id=alice; Path=/; Expires=Wed, 21 Oct 2015 22:00:00 GMT; HttpOnly"
        );
    }

    #[test]
    fn expired_cookie_is_in_the_past() {
        let cookie = SessionCookie::expire("alice", at_noon());
        assert!(cookie.is_expired(at_noon()));
        assert!(cookie.header_value().contains("Expires=Tue, 20 Oct 2015 12:00:00 GMT"));
    }

    #[test]
    fn empty_cookie_is_no_session() {
        let addr: SocketAddr = "127.0.0.1:40000".parse().unwrap();
        let req = http::Request::builder()
            .header("cookie", "session_id=")
            .body(Bytes::new())
            .unwrap();
        assert_eq!(current(&Request::from_http(req, addr)), None);

        let req = http::Request::builder()
            .header("cookie", "session_id=bob")
            .body(Bytes::new())
            .unwrap();
        assert_eq!(current(&Request::from_http(req, addr)), Some("bob"));
    }
}
