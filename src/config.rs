//! Runtime configuration.
//!
//! Read once at startup, then passed by reference to whatever needs it.
//! There is no global state.

use std::net::SocketAddr;
use std::str::FromStr;

use crate::error::Error;

/// Which application the binary serves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AppKind {
    /// Login/logout pages plus the session-gated `/admin` subtree.
    #[default]
    Site,
    /// The `/users` API that shows off route constraints.
    Users,
}

impl FromStr for AppKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "site" => Ok(Self::Site),
            "users" => Ok(Self::Users),
            other => Err(Error::Config(format!("unknown app `{other}`, expected `site` or `users`"))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub addr: SocketAddr,
    pub app: AppKind,
    /// Value the login page stores in the session cookie.
    pub session_subject: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            app: AppKind::Site,
            session_subject: "alice".to_owned(),
        }
    }
}

impl Config {
    /// Reads `STRATA_ADDR`, `STRATA_APP` and `STRATA_SESSION_SUBJECT`,
    /// keeping the default for each one that is unset.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
        let mut config = Self::default();

        if let Some(addr) = lookup("STRATA_ADDR") {
            config.addr = addr
                .parse()
                .map_err(|source| Error::InvalidAddr { addr: addr.clone(), source })?;
        }
        if let Some(app) = lookup("STRATA_APP") {
            config.app = app.parse()?;
        }
        if let Some(subject) = lookup("STRATA_SESSION_SUBJECT") {
            if subject.is_empty() || !subject.bytes().all(is_cookie_octet) {
                return Err(Error::Config(format!(
                    "STRATA_SESSION_SUBJECT `{subject}` is not a valid cookie value"
                )));
            }
            config.session_subject = subject;
        }

        Ok(config)
    }
}

/// RFC 6265 `cookie-octet`.
fn is_cookie_octet(b: u8) -> bool {
    matches!(b, 0x21 | 0x23..=0x2B | 0x2D..=0x3A | 0x3C..=0x5B | 0x5D..=0x7E)
}
