// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Cycle classification for feedback shift registers.
//!
//! For every tap configuration in a range, the state space of the register is
//! partitioned into cycles and the transient chains leading into them. Each
//! cycle becomes a sequence record with its length, transient count,
//! diversity and chance weight. Records from all configurations are then
//! grouped by cycle length into a lookup table that lets a consumer pick a
//! configuration producing a given period.
//!
//! # Architecture
//!
//! ## Per configuration
//!
//! - [`register`]: constants, the effective mask and the transition function
//! - [`state`]: the per-state tag buffer and run counters
//! - [`walk`]: walks that tag states provisionally and finalize them as a
//!   new cycle or as transients of an earlier one
//! - [`driver`]: walks every state of a configuration and assigns the
//!   diversity and chance statistics
//!
//! ## Per run
//!
//! - [`context`]: run settings and the aggregated results
//! - [`sequence`]: sequence records and the global table
//! - [`lookup`]: the length lookup, its persisted form and access vector
//! - [`report`]: text reports over a finished run
//!
//! # Parallelization
//!
//! Configurations are independent. With more than one job the driver
//! classifies them on a rayon pool, one tag buffer per worker, and absorbs
//! the summaries in ascending configuration order, so the persisted table is
//! the same as for a sequential run.
//!
//! # Example
//!
//! ```
//! use lfsr_cycles::{AnalysisConfig, ConfigurationDriver};
//!
//! let config = AnalysisConfig { configuration_limit: 64, ..AnalysisConfig::default() };
//! let ctx = ConfigurationDriver::new(config).run().unwrap();
//! assert!(ctx.table.len() >= 63);
//! assert!(ctx.table.iter().all(|r| r.taps != 0));
//! ```

pub mod context;
pub mod driver;
pub mod errors;
pub mod lookup;
pub mod register;
pub mod report;
pub mod sequence;
pub mod state;
pub mod walk;

// Re-export commonly used types
pub use context::{AnalysisConfig, AnalysisContext};
pub use driver::{classify_configuration, ConfigurationDriver, ConfigurationSummary};
pub use errors::{AnalysisError, Result};
pub use lookup::{AccessVector, LengthLookup};
pub use sequence::{SequenceRecord, SequenceTable};
