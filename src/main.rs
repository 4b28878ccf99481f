//! strata demo server.
//!
//! Run with:
//!   cargo run                        # login/admin site on 127.0.0.1:8080
//!   STRATA_APP=users cargo run       # the /users API
//!
//! Try:
//!   curl -i http://127.0.0.1:8080/admin/           # 302 → /
//!   curl -i -b session_id=alice http://127.0.0.1:8080/admin/panic   # 500
//!   curl -X POST -H 'X-Auth: test' http://127.0.0.1:8080/users/evg  # with STRATA_APP=users

use strata::{Config, Server, app};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), strata::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;
    let pipeline = app::build(&config);

    Server::bind(config.addr).serve(pipeline).await
}
