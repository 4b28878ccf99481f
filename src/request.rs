//! Incoming HTTP request type.

use std::collections::HashMap;
use std::net::SocketAddr;

use bytes::Bytes;
use http::header::{COOKIE, HOST};
use http::{HeaderMap, Method, Uri};

/// An incoming HTTP request with its body already collected.
///
/// Besides the wire data it carries two pieces of routing state:
/// the path captures bound by the router that matched it, and the
/// *routing path*, which a mounting router shortens to the suffix below
/// its mount point before handing the request on.
pub struct Request {
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
    remote_addr: SocketAddr,
    pub(crate) params: HashMap<String, String>,
    pub(crate) route_path: String,
}

impl Request {
    /// Builds a request from an `http` request and the peer address.
    ///
    /// The server uses this after collecting the body; tests use it to drive
    /// a pipeline without a socket.
    pub fn from_http(req: http::Request<Bytes>, remote_addr: SocketAddr) -> Self {
        let (parts, body) = req.into_parts();
        Self::from_parts(parts, body, remote_addr)
    }

    pub(crate) fn from_parts(
        parts: http::request::Parts,
        body: Bytes,
        remote_addr: SocketAddr,
    ) -> Self {
        let route_path = parts.uri.path().to_owned();
        Self {
            method: parts.method,
            uri: parts.uri,
            headers: parts.headers,
            body,
            remote_addr,
            params: HashMap::new(),
            route_path,
        }
    }

    pub fn method(&self) -> &Method { &self.method }
    pub fn uri(&self) -> &Uri { &self.uri }
    pub fn headers(&self) -> &HeaderMap { &self.headers }
    pub fn body(&self) -> &[u8] { &self.body }
    pub fn remote_addr(&self) -> SocketAddr { self.remote_addr }

    /// The full request path, unaffected by mounting.
    pub fn path(&self) -> &str {
        self.uri.path()
    }

    /// The path the current router matches against. Equal to [`path`](Self::path)
    /// unless the request was handed down through [`Router::mount`](crate::Router::mount).
    pub fn route_path(&self) -> &str {
        &self.route_path
    }

    /// Header lookup. Names are case-insensitive; values that are not
    /// visible ASCII are treated as absent.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// The target host: the `Host` header, falling back to the URI
    /// authority (HTTP/2 requests carry it there).
    pub fn host(&self) -> Option<&str> {
        self.headers
            .get(HOST)
            .and_then(|v| v.to_str().ok())
            .or_else(|| self.uri.authority().map(|a| a.as_str()))
    }

    /// Returns the value of the first cookie called `name`, across all
    /// `Cookie` headers.
    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .flat_map(|line| line.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.trim_matches('"'))
    }

    /// Returns a named path capture.
    ///
    /// For a route `/users/{id:[0-9]+}`, `req.param("id")` on `/users/42`
    /// returns `Some("42")`. A name the matched route does not declare
    /// returns `None`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }
}
