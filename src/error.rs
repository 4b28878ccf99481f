//! Unified error type.

use std::net::AddrParseError;

/// The error type returned by strata's fallible operations.
///
/// Application-level outcomes (404, 405, a redirect, a recovered panic) are
/// expressed as [`Response`](crate::Response) values, not as `Error`s. This
/// type surfaces startup and infrastructure failures: bad configuration, an
/// unparsable route pattern, binding to a port.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid socket address `{addr}`: {source}")]
    InvalidAddr {
        addr: String,
        #[source]
        source: AddrParseError,
    },

    #[error("invalid route `{pattern}`: {reason}")]
    InvalidRoute { pattern: String, reason: String },

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl Error {
    pub(crate) fn route(pattern: &str, reason: impl Into<String>) -> Self {
        Self::InvalidRoute { pattern: pattern.to_owned(), reason: reason.into() }
    }
}
