// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Run configuration and run-wide state.
//!
//! The AnalysisContext is everything that outlives a single configuration:
//! - the global sequence table
//! - the length lookup aggregator
//! - run statistics and the highest sequence identifier seen
//!
//! Tag buffers are not part of it. They belong to whoever is
//! classifying a configuration (one per worker), and only finished
//! per-configuration summaries are absorbed here, in ascending
//! configuration order.

use crate::driver::ConfigurationSummary;
use crate::errors::Result;
use crate::lookup::LengthLookup;
use crate::register::constants::{
    DEFAULT_CONFIGURATION_LIMIT, DEFAULT_MAX_SEQUENCES, MAX_CONFIGURATION_LIMIT,
};
use crate::register::{SequenceId, Taps};
use crate::sequence::SequenceTable;
use crate::state::{Counters, Statistics};

/// Runtime settings for one analysis run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisConfig {
    /// Exclusive upper bound of the analyzed configurations. Configuration 0
    /// has no taps and is never analyzed.
    pub configuration_limit: u32,

    /// Capacity of the global sequence table.
    pub max_sequences: usize,

    /// Worker threads; 1 runs on the calling thread.
    pub jobs: usize,
}

impl AnalysisConfig {
    /// Analyzed configurations, ascending.
    pub fn configurations(&self) -> impl Iterator<Item = Taps> {
        (1..self.configuration_limit.min(MAX_CONFIGURATION_LIMIT)).map(|taps| taps as Taps)
    }

    pub fn configuration_count(&self) -> usize {
        self.configuration_limit.clamp(1, MAX_CONFIGURATION_LIMIT) as usize - 1
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            configuration_limit: DEFAULT_CONFIGURATION_LIMIT,
            max_sequences: DEFAULT_MAX_SEQUENCES,
            jobs: 1,
        }
    }
}

/// The configuration and sequence holding the highest sequence identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighestSequence {
    pub taps: Taps,
    pub sequence_id: SequenceId,
}

/// Run-wide results, built up one configuration at a time.
#[derive(Debug)]
pub struct AnalysisContext {
    pub config: AnalysisConfig,
    pub table: SequenceTable,
    pub lookup: LengthLookup,
    pub statistics: Statistics,
    highest: Option<HighestSequence>,
}

impl AnalysisContext {
    pub fn new(config: AnalysisConfig) -> Self {
        let table = SequenceTable::new(config.max_sequences);
        Self {
            config,
            table,
            lookup: LengthLookup::new(),
            statistics: Statistics::new(),
            highest: None,
        }
    }

    /// Fold one completed configuration into the run.
    ///
    /// Summaries must arrive in ascending configuration order.
    pub fn absorb(&mut self, summary: ConfigurationSummary) -> Result<()> {
        debug_assert!(
            self.table.records().last().map_or(true, |r| r.taps < summary.taps),
            "configurations absorbed out of order"
        );

        self.statistics.increment(Counters::Configurations);
        self.statistics.add(Counters::Walks, summary.walks as u64);
        self.statistics.add(Counters::Cycles, summary.records.len() as u64);
        self.statistics.add(Counters::TransientMerges, summary.merges as u64);
        self.statistics.add(Counters::StatesClassified, summary.states() as u64);

        for record in &summary.records {
            if self.highest.map_or(true, |h| record.sequence_id > h.sequence_id) {
                self.highest = Some(HighestSequence {
                    taps: record.taps,
                    sequence_id: record.sequence_id,
                });
            }
        }

        let start = self.table.len();
        self.table.append(summary.records)?;
        self.lookup.extend(&self.table.records()[start..]);
        Ok(())
    }

    pub fn highest(&self) -> Option<HighestSequence> {
        self.highest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AnalysisError;
    use crate::sequence::SequenceRecord;

    fn summary(taps: Taps, ids: &[SequenceId]) -> ConfigurationSummary {
        let records = ids
            .iter()
            .map(|&id| {
                let mut r = SequenceRecord::new(taps, id, vec![id], 1);
                r.diversity = ids.len() as u16;
                r
            })
            .collect();
        ConfigurationSummary {
            taps,
            mask: 3,
            records,
            walks: ids.len() + 1,
            merges: 1,
        }
    }

    #[test]
    fn test_default_config_skips_zero() {
        let config = AnalysisConfig {
            configuration_limit: 5,
            ..AnalysisConfig::default()
        };
        let taps: Vec<Taps> = config.configurations().collect();
        assert_eq!(taps, vec![1, 2, 3, 4]);
        assert_eq!(config.configuration_count(), 4);
    }

    #[test]
    fn test_configuration_range_fits_two_bytes() {
        let config = AnalysisConfig {
            configuration_limit: u32::MAX,
            ..AnalysisConfig::default()
        };
        assert_eq!(config.configuration_count(), u16::MAX as usize);
        assert_eq!(config.configurations().last(), Some(u16::MAX));
    }

    #[test]
    fn test_absorb_updates_everything() {
        let mut ctx = AnalysisContext::new(AnalysisConfig::default());
        ctx.absorb(summary(1, &[2])).unwrap();
        ctx.absorb(summary(2, &[2, 3])).unwrap();
        ctx.absorb(summary(3, &[2, 3])).unwrap();

        assert_eq!(ctx.table.len(), 5);
        assert_eq!(ctx.statistics.get(Counters::Configurations), 3);
        assert_eq!(ctx.statistics.get(Counters::Cycles), 5);
        assert_eq!(ctx.statistics.get(Counters::TransientMerges), 3);
        assert_eq!(ctx.statistics.get(Counters::StatesClassified), 10);
        // First configuration to reach the highest id keeps it.
        assert_eq!(
            ctx.highest(),
            Some(HighestSequence {
                taps: 2,
                sequence_id: 3
            })
        );
        assert_eq!(ctx.lookup.bucket(1).unwrap().len(), 3);
    }

    #[test]
    fn test_absorb_reports_table_exhaustion() {
        let mut ctx = AnalysisContext::new(AnalysisConfig {
            max_sequences: 2,
            ..AnalysisConfig::default()
        });
        ctx.absorb(summary(1, &[2, 3])).unwrap();
        let err = ctx.absorb(summary(2, &[2])).unwrap_err();
        assert!(matches!(err, AnalysisError::TableExhausted { capacity: 2 }));
    }
}
