// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Sequence records.
//!
//! - `record`: one discovered cycle with its transients and statistics
//! - `table`: the run-wide, append-only table of records
//!
//! Records for one configuration are produced by its walks, then completed by
//! a second pass (`assign_statistics`) once every cycle of the configuration
//! is known.

pub mod record;
pub mod table;

pub use record::{assign_statistics, chance, SequenceRecord};
pub use table::SequenceTable;
