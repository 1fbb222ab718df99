//! Bind a nested service configuration from the process environment.
//!
//! Variables are read under the `DEMO` namespace, so `DEMO_HTTP_PORT=9000`
//! sets `http.port`. Anything missing from the environment falls back to a
//! built-in table, and anything missing from both keeps its `Default`.
//!
//! ```text
//! RUST_LOG=configify=trace DEMO_HTTP_PORT=9000 \
//!     cargo run --example service_config
//! ```

use std::time::Duration;

use configify::{Binder, Configurable, EnvSource, MapSource, Options, Timestamp, Value};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Configurable, Debug, Default)]
struct Http {
    host: String,
    port: u16,
    #[conf(name = "TIMEOUT")]
    request_timeout: Duration,
}

#[derive(Configurable, Debug, Default)]
struct Database {
    url: String,
    pool_size: u32,
}

#[derive(Configurable, Debug, Default)]
struct Service {
    name: String,
    tags: Vec<String>,
    debug: bool,
    http: Http,
    #[conf(name = "DB")]
    database: Database,
    replica: Option<Database>,
    deployed_at: Option<Timestamp>,
}

fn init_logging() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .try_init()?;
    Ok(())
}

fn fallback() -> MapSource {
    MapSource::new([
        ("NAME", Value::from("demo")),
        ("HTTP_HOST", Value::from("127.0.0.1")),
        ("HTTP_PORT", Value::from(8080_u16)),
        ("HTTP_TIMEOUT", Value::from(Duration::from_secs(30))),
        ("DB_POOL_SIZE", Value::from(8_u32)),
    ])
}

fn main() -> anyhow::Result<()> {
    init_logging()?;

    let source = EnvSource::new(Options::namespaced("DEMO").with_defaults(fallback()));
    let mut service = Service::default();
    let binder = Binder::new(source);
    binder.bind(&mut service);

    tracing::info!(
        name = %service.name,
        http = ?service.http,
        database = ?service.database,
        tags = ?service.tags,
        debug = service.debug,
        replica = service.replica.is_some(),
        deployed_at = ?service.deployed_at,
        "service configuration bound"
    );
    Ok(())
}
