// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Configuration driver.
//!
//! For every configuration in the analyzed range:
//!
//! 1. Reset the tag buffer for the configuration's effective mask.
//! 2. Walk from state 0, then from each next unvisited state, until every
//!    state is tagged. Closed walks create records; joined walks add their
//!    transients to the record they ran into.
//! 3. Assign diversity and chance over the configuration's records.
//!
//! The resulting summaries are absorbed into the [`AnalysisContext`] in
//! ascending configuration order, whether they were computed sequentially or
//! by the parallel driver.

mod parallel;

use crate::context::{AnalysisConfig, AnalysisContext};
use crate::errors::{AnalysisError, Result};
use crate::register::constants::FIRST_SEQUENCE_ID;
use crate::register::{effective_mask, SequenceId, State, Taps};
use crate::sequence::{assign_statistics, SequenceRecord};
use crate::state::{Counters, TagBuffer};
use crate::walk::{WalkEngine, WalkOutcome};
use indicatif::ProgressBar;
use log::{debug, info, trace, warn};
use strum::IntoEnumIterator;

/// Everything one configuration contributes to the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigurationSummary {
    pub taps: Taps,
    pub mask: u32,
    /// Completed records (diversity and chance assigned), in discovery order.
    pub records: Vec<SequenceRecord>,
    pub walks: usize,
    /// Walks that ended by joining an earlier sequence.
    pub merges: usize,
}

impl ConfigurationSummary {
    /// States covered by the records: cycle members plus transients.
    pub fn states(&self) -> usize {
        self.records.iter().map(SequenceRecord::covered_states).sum()
    }
}

/// Classify every state of one configuration.
///
/// `tags` is reset before use and may be reused for the next configuration.
pub fn classify_configuration(taps: Taps, tags: &mut TagBuffer) -> Result<ConfigurationSummary> {
    let mask = effective_mask(taps);
    debug!("[Driver] Analyzing taps {:#x} (mask {:#x})", taps, mask);

    let mut engine = WalkEngine::new(taps, mask, tags)?;
    let mut records: Vec<SequenceRecord> = Vec::new();
    let mut walks = 0;
    let mut merges = 0;

    let mut start: Option<State> = Some(0);
    while let Some(state) = start {
        walks += 1;
        match engine.walk_from(state)? {
            WalkOutcome::Closed {
                sequence_id,
                cycle,
                transients,
            } => {
                trace!(
                    "[Driver] taps {:#x}: sequence {} closed, length {}, transients {}",
                    taps,
                    sequence_id,
                    cycle.len(),
                    transients
                );
                records.push(SequenceRecord::new(taps, sequence_id, cycle, transients));
            }
            WalkOutcome::Joined {
                sequence_id,
                transients,
            } => {
                trace!(
                    "[Driver] taps {:#x}: {} transients joined sequence {}",
                    taps,
                    transients,
                    sequence_id
                );
                add_transients(&mut records, taps, sequence_id, transients)?;
                merges += 1;
            }
        }
        start = engine.next_unvisited(state);
    }

    assign_statistics(&mut records, mask);

    Ok(ConfigurationSummary {
        taps,
        mask,
        records,
        walks,
        merges,
    })
}

/// Credit `transients` to the record of `sequence_id`.
///
/// Ids are issued consecutively from `FIRST_SEQUENCE_ID`, so the id indexes
/// the configuration's records.
fn add_transients(
    records: &mut [SequenceRecord],
    taps: Taps,
    sequence_id: SequenceId,
    transients: u16,
) -> Result<()> {
    let record = sequence_id
        .checked_sub(FIRST_SEQUENCE_ID)
        .and_then(|index| records.get_mut(index as usize))
        .filter(|record| record.sequence_id == sequence_id)
        .ok_or(AnalysisError::UnknownSequence { taps, sequence_id })?;
    record.transients += transients;
    Ok(())
}

/// Drives the analysis over the configured range of configurations.
pub struct ConfigurationDriver {
    config: AnalysisConfig,
    progress: ProgressBar,
}

impl ConfigurationDriver {
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            config,
            progress: ProgressBar::hidden(),
        }
    }

    /// Report progress, one tick per configuration, on `progress`.
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Analyze every configuration and aggregate the results.
    pub fn run(&self) -> Result<AnalysisContext> {
        info!(
            "[Driver] Analyzing {} configurations with {} job(s)",
            self.config.configuration_count(),
            self.config.jobs.max(1)
        );
        self.progress
            .set_length(self.config.configuration_count() as u64);

        let ctx = if self.config.jobs > 1 {
            self.run_parallel()?
        } else {
            self.run_sequential()?
        };
        self.progress.finish_and_clear();

        info!(
            "[Driver] Found {} sequences in {} configurations",
            ctx.table.len(),
            ctx.statistics.get(Counters::Configurations)
        );
        for counter in Counters::iter() {
            let name: &'static str = counter.into();
            debug!("[Driver] {}: {}", name, ctx.statistics.get(counter));
        }
        let merges = ctx.statistics.get(Counters::TransientMerges);
        if merges > 0 {
            warn!("[Driver] {} walks joined an earlier sequence as transients", merges);
        }
        Ok(ctx)
    }

    fn run_sequential(&self) -> Result<AnalysisContext> {
        let mut ctx = AnalysisContext::new(self.config.clone());
        let mut tags = TagBuffer::new();
        for taps in self.config.configurations() {
            let summary = classify_configuration(taps, &mut tags)?;
            ctx.absorb(summary)?;
            self.progress.inc(1);
        }
        Ok(ctx)
    }
}
