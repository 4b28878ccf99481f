//! Shared helpers for driving pipelines without a socket.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use bytes::Bytes;
use http::Method;
use strata::middleware::{AccessEntry, AccessSink};
use strata::{BoxedHandler, Request, Response};

pub const PEER: &str = "127.0.0.1:56051";

/// Access sink that keeps every entry for later inspection.
#[derive(Clone, Default)]
pub struct Captured(Arc<Mutex<Vec<AccessEntry>>>);

impl Captured {
    pub fn entries(&self) -> Vec<AccessEntry> {
        self.0.lock().unwrap().clone()
    }
}

impl AccessSink for Captured {
    fn record(&self, entry: &AccessEntry) {
        self.0.lock().unwrap().push(entry.clone());
    }
}

pub fn request(method: Method, uri: &str, headers: &[(&str, &str)]) -> Request {
    let mut builder = http::Request::builder().method(method).uri(uri);
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    let peer: SocketAddr = PEER.parse().unwrap();
    Request::from_http(builder.body(Bytes::new()).unwrap(), peer)
}

pub async fn send(app: &BoxedHandler, method: Method, uri: &str, headers: &[(&str, &str)]) -> Response {
    app.call(request(method, uri, headers)).await
}

pub fn body(res: &Response) -> String {
    String::from_utf8(res.body().to_vec()).unwrap()
}
