// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Error types for the analysis run.
//!
//! Every error here is fatal: the run stops at the first one. Invariant
//! violations point at a defect in mask computation or tagging, and
//! exhaustion errors would otherwise silently corrupt the statistics.

use crate::register::{SequenceId, State, Taps};
use std::io;

/// Errors that abort an analysis run.
#[derive(thiserror::Error, Debug)]
pub enum AnalysisError {
    /// A walk stepped onto a provisional state that is not on its own path.
    #[error("taps {taps:#06x}: walk re-entered provisional state {state:#x} outside the current walk")]
    ForeignProvisional { taps: Taps, state: State },

    /// A walk joined a sequence identifier that has no record.
    #[error("taps {taps:#06x}: walk joined unknown sequence {sequence_id}")]
    UnknownSequence { taps: Taps, sequence_id: SequenceId },

    /// A walk was started from a state that has already been tagged.
    #[error("taps {taps:#06x}: walk started from already visited state {state:#x}")]
    StartAlreadyVisited { taps: Taps, state: State },

    /// The effective mask addresses more states than the tag buffer holds.
    #[error("taps {taps:#06x}: mask {mask:#x} exceeds tag buffer capacity {capacity}")]
    MaskExceedsBuffer { taps: Taps, mask: u32, capacity: usize },

    /// More cycles than 2-byte sequence identifiers can name.
    #[error("taps {taps:#06x}: sequence identifiers exhausted")]
    SequenceIdsExhausted { taps: Taps },

    /// A cycle longer than the cycle-member buffer.
    #[error("taps {taps:#06x}: cycle of length {length} exceeds member capacity {capacity}")]
    CycleBufferExhausted {
        taps: Taps,
        length: usize,
        capacity: usize,
    },

    /// The global sequence table is full.
    #[error("sequence table exhausted at {capacity} records")]
    TableExhausted { capacity: usize },

    /// A length bucket holds more entries than its 2-byte count field allows.
    #[error("length {length} has {entries} entries, more than a section can hold")]
    SectionTooLarge { length: usize, entries: usize },

    /// The persisted table ended inside a section.
    #[error("lookup table truncated at byte offset {offset}")]
    TruncatedTable { offset: u64 },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("could not start worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
