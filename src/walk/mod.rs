// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Walk engine.
//!
//! A walk starts from an unvisited state and applies the transition function
//! repeatedly, tagging every new state as provisional, until it steps onto a
//! state that is already tagged. Exactly one of three things has happened:
//!
//! 1. **Closed**: the state is provisional and on this walk's path. The walk
//!    has looped back on itself. The path splits at the re-entry point into
//!    transients (before it) and cycle members (from it onward), and all of
//!    them are finalized under a new sequence identifier.
//! 2. **Joined**: the state is finalized. The whole path is a transient chain
//!    into an earlier sequence and is finalized under that sequence's id.
//! 3. **Foreign provisional**: the state is provisional but not on this walk's
//!    path. Every walk finalizes its own path before returning, so this means
//!    the buffer holds stale tags. The run is aborted.
//!
//! The path is kept in walk order, so closing a cycle is a single linear
//! relabel of the path without stepping through the cycle again.
//!
//! # Example
//!
//! ```
//! use lfsr_cycles::state::TagBuffer;
//! use lfsr_cycles::walk::{WalkEngine, WalkOutcome};
//!
//! let mut tags = TagBuffer::new();
//! let mut engine = WalkEngine::new(1, 1, &mut tags).unwrap();
//! match engine.walk_from(1).unwrap() {
//!     WalkOutcome::Closed { cycle, transients, .. } => {
//!         assert_eq!(cycle[0], 1);
//!         assert_eq!(transients, 0);
//!     }
//!     WalkOutcome::Joined { .. } => unreachable!(),
//! }
//! ```

use crate::errors::{AnalysisError, Result};
use crate::register::constants::{BUFFER_BOUND, FIRST_SEQUENCE_ID};
use crate::register::{state_count, step, SequenceId, State, Taps};
use crate::state::{StateTag, TagBuffer};

/// How a walk ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalkOutcome {
    /// The walk closed a new cycle.
    Closed {
        sequence_id: SequenceId,
        /// Cycle members in transition order, starting at the re-entry state.
        cycle: Vec<State>,
        /// Path states that led into the cycle without being on it.
        transients: u16,
    },

    /// The walk ran into an earlier sequence; all of its states are transients of it.
    Joined {
        sequence_id: SequenceId,
        transients: u16,
    },
}

impl WalkOutcome {
    pub fn sequence_id(&self) -> SequenceId {
        match self {
            WalkOutcome::Closed { sequence_id, .. } | WalkOutcome::Joined { sequence_id, .. } => {
                *sequence_id
            }
        }
    }
}

/// Walks one configuration's state space over a borrowed tag buffer.
///
/// Creating the engine resets the buffer for the configuration's mask, so a
/// buffer is never shared between configurations without a reset.
#[derive(Debug)]
pub struct WalkEngine<'b> {
    taps: Taps,
    mask: u32,
    tags: &'b mut TagBuffer,
    /// States tagged provisional by the walk in progress, in walk order.
    path: Vec<State>,
    next_id: u32,
}

impl<'b> WalkEngine<'b> {
    /// Prepare a walk engine for `taps` over the states `0..=mask`.
    pub fn new(taps: Taps, mask: u32, tags: &'b mut TagBuffer) -> Result<Self> {
        tags.reset(taps, mask)?;
        Ok(Self {
            taps,
            mask,
            tags,
            path: Vec::with_capacity(state_count(mask)),
            next_id: FIRST_SEQUENCE_ID as u32,
        })
    }

    pub fn taps(&self) -> Taps {
        self.taps
    }

    pub fn mask(&self) -> u32 {
        self.mask
    }

    /// Read-only view of the tags written so far.
    pub fn tags(&self) -> &TagBuffer {
        &*self.tags
    }

    /// Number of sequence identifiers issued so far.
    pub fn sequences_issued(&self) -> usize {
        (self.next_id - FIRST_SEQUENCE_ID as u32) as usize
    }

    /// First unvisited state at or above `from`.
    pub fn next_unvisited(&self, from: State) -> Option<State> {
        self.tags.next_unvisited(from)
    }

    /// Walk forward from `start` until a tagged state is reached, and finalize the path.
    pub fn walk_from(&mut self, start: State) -> Result<WalkOutcome> {
        if !self.tags.get(start).is_unvisited() {
            return Err(AnalysisError::StartAlreadyVisited {
                taps: self.taps,
                state: start,
            });
        }

        self.path.clear();
        let mut state = start;
        loop {
            self.tags.mark_provisional(state);
            self.path.push(state);

            let next = step(self.taps, state, self.mask);
            match self.tags.get(next) {
                StateTag::Unvisited => state = next,
                StateTag::Provisional => return self.close_cycle(next),
                StateTag::Finalized { sequence_id, .. } => return Ok(self.join(sequence_id)),
            }
        }
    }

    /// The path re-entered itself at `entry`: finalize a new sequence.
    fn close_cycle(&mut self, entry: State) -> Result<WalkOutcome> {
        let Some(split) = self.path.iter().rposition(|&s| s == entry) else {
            return Err(AnalysisError::ForeignProvisional {
                taps: self.taps,
                state: entry,
            });
        };

        let cycle_length = self.path.len() - split;
        if cycle_length > BUFFER_BOUND {
            return Err(AnalysisError::CycleBufferExhausted {
                taps: self.taps,
                length: cycle_length,
                capacity: BUFFER_BOUND,
            });
        }

        let sequence_id = self.allocate_id()?;
        for (position, &state) in self.path.iter().enumerate() {
            self.tags.finalize(state, sequence_id, position >= split);
        }

        Ok(WalkOutcome::Closed {
            sequence_id,
            cycle: self.path[split..].to_vec(),
            transients: split as u16,
        })
    }

    /// The path ran into `sequence_id`: every state on it is a transient.
    fn join(&mut self, sequence_id: SequenceId) -> WalkOutcome {
        for &state in &self.path {
            self.tags.finalize(state, sequence_id, false);
        }
        WalkOutcome::Joined {
            sequence_id,
            transients: self.path.len() as u16,
        }
    }

    fn allocate_id(&mut self) -> Result<SequenceId> {
        let id = SequenceId::try_from(self.next_id)
            .map_err(|_| AnalysisError::SequenceIdsExhausted { taps: self.taps })?;
        self.next_id += 1;
        Ok(id)
    }
}
