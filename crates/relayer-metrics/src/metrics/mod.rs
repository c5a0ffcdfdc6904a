// Metrics and monitoring
// Gauge catalog, typed update facade and the Prometheus scrape endpoint

use std::net::SocketAddr;
use thiserror::Error;

pub mod catalog;
pub mod names;
pub mod server;
pub mod service;

pub use catalog::MetricCatalog;
pub use names::{channel_metric_name, Chain, SequenceSource, DEFAULT_CHANNEL};
pub use server::MetricsServer;
pub use service::MetricService;

/// Errors that can occur while building or exposing metrics
#[derive(Error, Debug)]
pub enum MetricsError {
    #[error("Metric registered more than once: {name}")]
    DuplicateRegistration { name: String },

    #[error("Prometheus error: {0}")]
    Prometheus(#[from] prometheus::Error),

    #[error("Encoded metrics are not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),

    #[error("Failed to bind metrics server on {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("Metrics server error: {0}")]
    Server(#[source] std::io::Error),
}
