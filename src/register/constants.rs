// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Compile-time constants for the register analysis.
//!
//! The buffer bound and the feedback policy can be configured at compile time
//! via cargo features.
//!
//! # Example
//!
//! ```bash
//! # Default: 4096 states per configuration, non-inverted feedback
//! cargo build
//!
//! # Smaller state space, inverted feedback
//! cargo build --features bound_2048,invert_feedback
//! ```

/// Maximum number of states tracked per configuration.
///
/// Configurations whose natural state space is larger are clipped to this
/// many states.
/// - `bound_2048` → 2048
/// - (default) → 4096
#[cfg(not(feature = "bound_2048"))]
pub const BUFFER_BOUND: usize = 4096;

#[cfg(feature = "bound_2048")]
pub const BUFFER_BOUND: usize = 2048;

/// Largest effective mask any configuration can have.
pub const BUFFER_MASK: u32 = (BUFFER_BOUND - 1) as u32;

/// Normalization constant for the chance weight.
pub const CHANCE_SCALE: u32 = BUFFER_BOUND as u32;

/// Feedback policy: when set, the parity bit is inverted before it is shifted in.
pub const INVERT_FEEDBACK: bool = cfg!(feature = "invert_feedback");

/// Default exclusive upper bound of the analyzed configuration range.
pub const DEFAULT_CONFIGURATION_LIMIT: u32 = BUFFER_BOUND as u32;

/// Largest exclusive configuration limit whose tap values still fit in 2 bytes.
pub const MAX_CONFIGURATION_LIMIT: u32 = 1 << 16;

/// Default capacity of the global sequence table.
pub const DEFAULT_MAX_SEQUENCES: usize = 1 << 20;

/// First sequence identifier issued under each configuration.
pub const FIRST_SEQUENCE_ID: u16 = 2;

/// Number of records rendered by the sequence preview.
pub const DEFAULT_PREVIEW_RECORDS: usize = 32;

/// Number of cycle-member states rendered per previewed record.
pub const PREVIEW_STATES: usize = 8;

const _: () = assert!(BUFFER_BOUND.is_power_of_two(), "buffer bound must be a power of two");

const _: () = assert!(
    BUFFER_BOUND <= u16::MAX as usize,
    "states and cycle lengths are stored in 2 bytes"
);
