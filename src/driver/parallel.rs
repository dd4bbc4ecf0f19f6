// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Parallel configuration driver.
//!
//! Configurations are independent, so they are classified on a rayon pool,
//! each worker reusing its own tag buffer. The summaries come back in
//! ascending configuration order and are absorbed sequentially, which keeps
//! the lookup table identical to a sequential run.

use super::{classify_configuration, ConfigurationDriver, ConfigurationSummary};
use crate::context::AnalysisContext;
use crate::errors::Result;
use crate::register::Taps;
use crate::state::TagBuffer;
use rayon::prelude::*;

impl ConfigurationDriver {
    pub(super) fn run_parallel(&self) -> Result<AnalysisContext> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.jobs)
            .build()?;

        let configurations: Vec<Taps> = self.config.configurations().collect();
        let summaries: Vec<ConfigurationSummary> = pool.install(|| {
            configurations
                .into_par_iter()
                .map_init(TagBuffer::new, |tags, taps| {
                    let summary = classify_configuration(taps, tags);
                    self.progress.inc(1);
                    summary
                })
                .collect::<Result<Vec<_>>>()
        })?;

        let mut ctx = AnalysisContext::new(self.config.clone());
        for summary in summaries {
            ctx.absorb(summary)?;
        }
        Ok(ctx)
    }
}
