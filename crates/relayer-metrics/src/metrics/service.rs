// Typed setters the relaying logic calls as blocks and sequences advance

use std::sync::Arc;
use tracing::trace;

use super::catalog::MetricCatalog;
use super::names::{Chain, SequenceSource};

/// Update facade over a shared [`MetricCatalog`].
///
/// Cheap to clone; hand one to every worker. Each setter replaces the current
/// gauge value (last write wins).
#[derive(Clone)]
pub struct MetricService {
    catalog: Arc<MetricCatalog>,
}

impl MetricService {
    pub fn new(catalog: Arc<MetricCatalog>) -> Self {
        Self { catalog }
    }

    /// The catalog backing this service, for the scrape endpoint
    pub fn catalog(&self) -> Arc<MetricCatalog> {
        Arc::clone(&self.catalog)
    }

    pub fn set_saved_block_height(&self, chain: Chain, height: u64) {
        trace!("{} saved block height = {}", chain, height);
        self.set(chain.saved_block_height_name(), height as f64);
    }

    pub fn set_processed_block_height(&self, chain: Chain, height: u64) {
        trace!("{} processed block height = {}", chain, height);
        self.set(chain.processed_block_height_name(), height as f64);
    }

    /// Record in-turn status for `chain` together with its relay window.
    ///
    /// `start` and `end` are the current window when in turn, otherwise the
    /// most recent one. The three gauges are written back to back without a
    /// shared lock, so a scrape may briefly see the flag ahead of the timestamps.
    pub fn set_inturn_relayer_metrics(&self, chain: Chain, is_inturn: bool, start: u64, end: u64) {
        trace!(
            "{} inturn relayer = {} window [{}, {}]",
            chain,
            is_inturn,
            start,
            end
        );
        let flag = if is_inturn { 1.0 } else { 0.0 };
        self.set(chain.inturn_relayer_name(), flag);
        self.set(chain.relayer_start_time_name(), start as f64);
        self.set(chain.relayer_end_time_name(), end as f64);
    }

    /// Aborts the process if `channel` is neither configured nor the default channel.
    pub fn set_next_sequence_for_channel_from_db(&self, channel: u8, seq: u64) {
        self.set_next_sequence(SequenceSource::Db, channel, seq);
    }

    /// Aborts the process if `channel` is neither configured nor the default channel.
    pub fn set_next_sequence_for_channel_from_chain(&self, channel: u8, seq: u64) {
        self.set_next_sequence(SequenceSource::Chain, channel, seq);
    }

    fn set_next_sequence(&self, source: SequenceSource, channel: u8, seq: u64) {
        trace!("channel {} next sequence from {:?} = {}", channel, source, seq);
        self.set(&source.metric_name(channel), seq as f64);
    }

    fn set(&self, name: &str, value: f64) {
        self.catalog.gauge(name).set(value);
    }
}
