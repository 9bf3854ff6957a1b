//! Runs the in-memory employee API on its own.
//!
//! Configure with `STAFFBOOK_MOCK_ADDR`, `STAFFBOOK_MOCK_LATENCY_MS` and
//! `STAFFBOOK_MOCK_SEED_COUNT`, then point a client at `http://<addr>/api/`.

#[macro_use]
extern crate tracing;

use miette::{IntoDiagnostic, Result};
use staffbook::mock::{MockBackend, MockConfig};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let config = MockConfig::from_env()?;
    info!(
        addr = %config.addr,
        latency_ms = config.latency.as_millis(),
        seed_count = config.seed_count,
        "starting mock employee backend"
    );

    MockBackend::from_config(&config)
        .serve(config.addr)
        .await
        .into_diagnostic()
}
