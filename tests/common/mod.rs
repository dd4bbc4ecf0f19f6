// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Common test utilities shared across integration tests.

use lfsr_cycles::lookup::write_lookup;
use lfsr_cycles::{AnalysisConfig, AnalysisContext, ConfigurationDriver};

/// Analyze configurations `1..limit` with `jobs` workers.
pub fn run_analysis(limit: u32, jobs: usize) -> AnalysisContext {
    let config = AnalysisConfig {
        configuration_limit: limit,
        jobs,
        ..AnalysisConfig::default()
    };
    ConfigurationDriver::new(config)
        .run()
        .unwrap_or_else(|e| panic!("analysis of 1..{} failed: {}", limit, e))
}

/// The persisted lookup table of a run, in memory.
#[allow(dead_code)]
pub fn lookup_bytes(ctx: &AnalysisContext) -> Vec<u8> {
    let mut bytes = Vec::new();
    write_lookup(&ctx.lookup, &mut bytes).unwrap();
    bytes
}
