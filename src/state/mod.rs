// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Per-configuration mutable state.
//!
//! - `tag`: the state tag buffer, one tag per reachable state
//! - `statistics`: run-wide counters
//!
//! A tag buffer is owned by exactly one configuration's walk phase at a time
//! and is reset before it is reused.

pub mod statistics;
pub mod tag;

pub use statistics::{Counters, Statistics};
pub use tag::{StateTag, TagBuffer};
