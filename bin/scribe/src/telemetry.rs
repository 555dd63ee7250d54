//! Tracing and metrics initialization.

use anyhow::Result;
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::{Ipv4Addr, SocketAddr};
use tracing_subscriber::EnvFilter;

/// Initializes the tracing subscriber. `RUST_LOG` wins over the verbosity
/// flag when set.
pub(crate) fn init_tracing(verbosity: u8) {
    let default = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Serves Prometheus metrics on the given port.
pub(crate) fn init_prometheus(port: u16) -> Result<()> {
    let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, port));
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    Ok(())
}
