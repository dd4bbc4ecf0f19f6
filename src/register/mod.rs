// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Shift register primitives.
//!
//! This module contains the pure, stateless pieces of the analysis:
//! - Constants: buffer bound, chance scale, feedback policy, sentinels
//! - Transition: the next-state function and mask computation
//!
//! A *configuration* is identified by its tap value. The taps also define the
//! register width: the effective mask is the tap value rounded up to the next
//! `2^k - 1`, clamped to the buffer bound.

pub mod constants;
pub mod transition;

pub use constants::*;
pub use transition::{effective_mask, natural_mask, state_count, step};

/// Tap configuration identifier (persisted as 2 bytes).
pub type Taps = u16;

/// Register contents, always within `0..=mask` of its configuration.
pub type State = u16;

/// Per-configuration sequence identifier. 0 and 1 are never issued.
pub type SequenceId = u16;
