// Relayer metrics library
// Gauge registry, update facade and scrape endpoint for the Greenfield <-> BSC relayer

pub mod config;
pub mod metrics;

// Re-export commonly used types for convenience
pub use config::{AdminConfig, GlobalConfig, GreenfieldConfig, RelayerConfig};
pub use metrics::{
    Chain, MetricCatalog, MetricService, MetricsError, MetricsServer, SequenceSource,
    DEFAULT_CHANNEL,
};
