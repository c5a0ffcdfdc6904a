// Gauge catalog built once at startup from the relayer configuration

use prometheus::{Encoder, Gauge, Opts, Registry, TextEncoder};
use std::collections::HashMap;
use tracing::{debug, error, info};

use super::names::{Chain, SequenceSource, DEFAULT_CHANNEL};
use super::MetricsError;
use crate::config::RelayerConfig;

/// Every gauge the relayer exports, keyed by metric name.
///
/// The map is filled in [`MetricCatalog::new`] and never changes afterwards,
/// so lookups need no locking. Gauges are atomic and may be set from any thread.
pub struct MetricCatalog {
    registry: Registry,
    gauges: HashMap<String, Gauge>,
}

impl MetricCatalog {
    /// Create and register every gauge.
    ///
    /// Registers the ten per-chain gauges, then the sequence pair for
    /// [`DEFAULT_CHANNEL`], then one pair per configured channel. A channel that
    /// appears twice (including an explicit `0`) fails with
    /// [`MetricsError::DuplicateRegistration`].
    pub fn new(config: &RelayerConfig) -> Result<Self, MetricsError> {
        let mut catalog = Self {
            registry: Registry::new(),
            gauges: HashMap::new(),
        };

        for chain in Chain::ALL {
            for (name, help) in chain.static_metrics() {
                catalog.register(name.to_string(), help)?;
            }
        }

        catalog.register_channel(DEFAULT_CHANNEL)?;
        for &channel in config.monitor_channels() {
            catalog.register_channel(channel)?;
        }

        info!(
            "Registered {} relayer metrics ({} monitored channels)",
            catalog.gauges.len(),
            config.monitor_channels().len()
        );

        Ok(catalog)
    }

    fn register_channel(&mut self, channel: u8) -> Result<(), MetricsError> {
        for source in SequenceSource::ALL {
            self.register(source.metric_name(channel), source.help(channel))?;
        }
        Ok(())
    }

    fn register(&mut self, name: String, help: String) -> Result<(), MetricsError> {
        if self.gauges.contains_key(&name) {
            return Err(MetricsError::DuplicateRegistration { name });
        }

        let gauge = Gauge::with_opts(Opts::new(name.clone(), help))?;
        self.registry
            .register(Box::new(gauge.clone()))
            .map_err(|e| match e {
                prometheus::Error::AlreadyReg => MetricsError::DuplicateRegistration {
                    name: name.clone(),
                },
                other => MetricsError::Prometheus(other),
            })?;

        debug!("Registered gauge {}", name);
        self.gauges.insert(name, gauge);
        Ok(())
    }

    /// Gauge registered under `name`.
    ///
    /// Aborts the process if `name` was never registered. Setting an
    /// unregistered metric means a channel is missing from
    /// `monitor_channel_list`, and the collector would otherwise never see it.
    /// The whole process stops, not just the calling thread or task.
    pub fn gauge(&self, name: &str) -> &Gauge {
        match self.gauges.get(name) {
            Some(gauge) => gauge,
            None => {
                error!("Metric {} is not registered, aborting", name);
                eprintln!("metric `{}` is not registered in the catalog", name);
                std::process::abort();
            }
        }
    }

    /// Non-fatal lookup, for diagnostics and tests only. Updates go through [`Self::gauge`].
    pub fn try_gauge(&self, name: &str) -> Option<&Gauge> {
        self.gauges.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.gauges.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.gauges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gauges.is_empty()
    }

    /// Registered metric names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.gauges.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Render every registered gauge in the Prometheus text format.
    pub fn encode(&self) -> Result<String, MetricsError> {
        let mut buffer = vec![];
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        encoder.encode(&metric_families, &mut buffer)?;

        Ok(String::from_utf8(buffer)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::names::channel_metric_name;

    fn config_with_channels(channels: Vec<u8>) -> RelayerConfig {
        let mut config = RelayerConfig::default();
        config.greenfield.monitor_channel_list = channels;
        config
    }

    #[test]
    fn test_empty_channel_list_still_has_default_channel() {
        let catalog = MetricCatalog::new(&config_with_channels(vec![])).unwrap();

        assert_eq!(catalog.len(), 12);
        assert!(catalog.contains("next_seq_from_DB_for_channel_0"));
        assert!(catalog.contains("next_seq_from_chain_for_channel_0"));
    }

    #[test]
    fn test_configured_channels_registered_at_zero() {
        let catalog = MetricCatalog::new(&config_with_channels(vec![1, 2, 9])).unwrap();

        assert_eq!(catalog.len(), 12 + 6);
        for channel in [1u8, 2, 9] {
            for source in SequenceSource::ALL {
                let gauge = catalog.gauge(&source.metric_name(channel));
                assert_eq!(gauge.get(), 0.0);
            }
        }
    }

    #[test]
    fn test_static_metrics_registered() {
        let catalog = MetricCatalog::new(&RelayerConfig::default()).unwrap();
        for name in [
            "Greenfield_saved_block_height",
            "Greenfield_processed_block_height",
            "is_Greenfield_inturn_relayer",
            "Greenfield_relayer_start_time",
            "Greenfield_relayer_end_time",
            "BSC_saved_block_height",
            "BSC_processed_block_height",
            "is_BSC_inturn_relayer",
            "BSC_relayer_start_time",
            "BSC_relayer_end_time",
        ] {
            assert!(catalog.contains(name), "missing {}", name);
        }
    }

    #[test]
    fn test_duplicate_channel_fails() {
        let result = MetricCatalog::new(&config_with_channels(vec![5, 5]));
        match result {
            Err(MetricsError::DuplicateRegistration { name }) => {
                assert_eq!(name, channel_metric_name("next_seq_from_DB_for_channel", 5));
            }
            Err(e) => panic!("unexpected error: {}", e),
            Ok(_) => panic!("duplicate channel must not register"),
        }
    }

    #[test]
    fn test_explicit_default_channel_is_duplicate() {
        let result = MetricCatalog::new(&config_with_channels(vec![0]));
        assert!(matches!(
            result,
            Err(MetricsError::DuplicateRegistration { .. })
        ));
    }

    #[test]
    fn test_catalogs_are_independent() {
        let first = MetricCatalog::new(&config_with_channels(vec![5])).unwrap();
        let second = MetricCatalog::new(&config_with_channels(vec![5])).unwrap();

        first.gauge("BSC_saved_block_height").set(10.0);
        assert_eq!(second.gauge("BSC_saved_block_height").get(), 0.0);
    }

    #[test]
    fn test_try_gauge_hit_is_same_gauge() {
        let catalog = MetricCatalog::new(&config_with_channels(vec![6])).unwrap();
        catalog.gauge("next_seq_from_DB_for_channel_6").set(3.0);
        let gauge = catalog.try_gauge("next_seq_from_DB_for_channel_6").unwrap();
        assert_eq!(gauge.get(), 3.0);
    }

    #[test]
    fn test_seeded_and_configured_channels_share_help_text() {
        let catalog = MetricCatalog::new(&config_with_channels(vec![7])).unwrap();
        let text = catalog.encode().unwrap();
        for channel in [0u8, 7] {
            assert!(text.contains(&format!(
                "# HELP next_seq_from_DB_for_channel_{0} Next delivery sequence read from DB for channel {0}",
                channel
            )));
            assert!(text.contains(&format!(
                "# HELP next_seq_from_chain_for_channel_{0} Next delivery sequence read from chain for channel {0}",
                channel
            )));
        }
    }

    #[test]
    fn test_try_gauge_miss() {
        let catalog = MetricCatalog::new(&RelayerConfig::default()).unwrap();
        assert!(catalog.try_gauge("next_seq_from_chain_for_channel_3").is_none());
    }

    #[test]
    fn test_names_sorted() {
        let catalog = MetricCatalog::new(&config_with_channels(vec![3])).unwrap();
        let names = catalog.names();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
        assert_eq!(names.len(), catalog.len());
    }

    #[test]
    fn test_encode_contains_help_and_type() {
        let catalog = MetricCatalog::new(&config_with_channels(vec![4])).unwrap();
        catalog.gauge("Greenfield_saved_block_height").set(42.0);

        let text = catalog.encode().unwrap();
        assert!(text.contains(
            "# HELP Greenfield_saved_block_height Saved block height for Greenfield in Database"
        ));
        assert!(text.contains("# TYPE Greenfield_saved_block_height gauge"));
        assert!(text.contains("Greenfield_saved_block_height 42"));
        assert!(text.contains("next_seq_from_chain_for_channel_4 0"));
        assert_eq!(catalog.registry().gather().len(), catalog.len());
    }
}
