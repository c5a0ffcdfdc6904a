// Metric identifiers exported to the collector.
// These strings are part of the scrape contract and must not change.

use std::fmt;

pub const GNFD_SAVED_BLOCK: &str = "Greenfield_saved_block_height";
pub const GNFD_PROCESSED_BLOCK: &str = "Greenfield_processed_block_height";
pub const IS_GNFD_INTURN_RELAYER: &str = "is_Greenfield_inturn_relayer";
pub const GNFD_RELAYER_START_TIME: &str = "Greenfield_relayer_start_time";
pub const GNFD_RELAYER_END_TIME: &str = "Greenfield_relayer_end_time";

pub const BSC_SAVED_BLOCK: &str = "BSC_saved_block_height";
pub const BSC_PROCESSED_BLOCK: &str = "BSC_processed_block_height";
pub const IS_BSC_INTURN_RELAYER: &str = "is_BSC_inturn_relayer";
pub const BSC_RELAYER_START_TIME: &str = "BSC_relayer_start_time";
pub const BSC_RELAYER_END_TIME: &str = "BSC_relayer_end_time";

pub const NEXT_SEQUENCE_FOR_CHANNEL_FROM_DB: &str = "next_seq_from_DB_for_channel";
pub const NEXT_SEQUENCE_FOR_CHANNEL_FROM_CHAIN: &str = "next_seq_from_chain_for_channel";

/// Channel whose sequence metrics are always registered, whatever the config says.
pub const DEFAULT_CHANNEL: u8 = 0;

/// One side of the relay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Chain {
    Greenfield,
    Bsc,
}

impl Chain {
    pub const ALL: [Chain; 2] = [Chain::Greenfield, Chain::Bsc];

    pub fn saved_block_height_name(self) -> &'static str {
        match self {
            Chain::Greenfield => GNFD_SAVED_BLOCK,
            Chain::Bsc => BSC_SAVED_BLOCK,
        }
    }

    pub fn processed_block_height_name(self) -> &'static str {
        match self {
            Chain::Greenfield => GNFD_PROCESSED_BLOCK,
            Chain::Bsc => BSC_PROCESSED_BLOCK,
        }
    }

    pub fn inturn_relayer_name(self) -> &'static str {
        match self {
            Chain::Greenfield => IS_GNFD_INTURN_RELAYER,
            Chain::Bsc => IS_BSC_INTURN_RELAYER,
        }
    }

    pub fn relayer_start_time_name(self) -> &'static str {
        match self {
            Chain::Greenfield => GNFD_RELAYER_START_TIME,
            Chain::Bsc => BSC_RELAYER_START_TIME,
        }
    }

    pub fn relayer_end_time_name(self) -> &'static str {
        match self {
            Chain::Greenfield => GNFD_RELAYER_END_TIME,
            Chain::Bsc => BSC_RELAYER_END_TIME,
        }
    }

    /// The chain transactions are relayed from when this side is the destination.
    fn counterparty(self) -> Chain {
        match self {
            Chain::Greenfield => Chain::Bsc,
            Chain::Bsc => Chain::Greenfield,
        }
    }

    /// Every static metric for this chain as `(name, help)` pairs.
    pub(crate) fn static_metrics(self) -> [(&'static str, String); 5] {
        let short = match self {
            Chain::Greenfield => "gnfd",
            Chain::Bsc => "BSC",
        };
        [
            (
                self.saved_block_height_name(),
                format!("Saved block height for {} in Database", self),
            ),
            (
                self.processed_block_height_name(),
                format!("Processed block height for {} in Database", self),
            ),
            (
                self.inturn_relayer_name(),
                format!(
                    "Whether relayer is inturn to relay transaction from {} to {}",
                    self.counterparty(),
                    self
                ),
            ),
            (
                self.relayer_start_time_name(),
                format!(
                    "inturn {} relayer start time or out-turn relayer previous start time",
                    short
                ),
            ),
            (
                self.relayer_end_time_name(),
                format!(
                    "inturn {} relayer end time or out-turn relayer previous end time",
                    short
                ),
            ),
        ]
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Chain::Greenfield => write!(f, "Greenfield"),
            Chain::Bsc => write!(f, "BSC"),
        }
    }
}

/// Where a channel's next delivery sequence was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SequenceSource {
    /// Local storage
    Db,
    /// On-chain state
    Chain,
}

impl SequenceSource {
    pub const ALL: [SequenceSource; 2] = [SequenceSource::Db, SequenceSource::Chain];

    pub fn base_name(self) -> &'static str {
        match self {
            SequenceSource::Db => NEXT_SEQUENCE_FOR_CHANNEL_FROM_DB,
            SequenceSource::Chain => NEXT_SEQUENCE_FOR_CHANNEL_FROM_CHAIN,
        }
    }

    /// Identifier of this source's gauge for `channel`
    pub fn metric_name(self, channel: u8) -> String {
        channel_metric_name(self.base_name(), channel)
    }

    // Help text is not part of the scrape contract. Seeded and configured
    // channels share one wording.
    pub(crate) fn help(self, channel: u8) -> String {
        let from = match self {
            SequenceSource::Db => "DB",
            SequenceSource::Chain => "chain",
        };
        format!("Next delivery sequence read from {} for channel {}", from, channel)
    }
}

/// Derives a channel-scoped identifier: `<base>_<channel>` in plain decimal.
///
/// Registration and every setter go through this function, so the two paths
/// can never disagree on the format.
pub fn channel_metric_name(base: &str, channel: u8) -> String {
    format!("{}_{}", base, channel)
}
