// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! State tags and the tag buffer.
//!
//! Every reachable state of the configuration under analysis carries one tag:
//!
//! ```text
//! Unvisited ──walk──▶ Provisional ──close / join──▶ Finalized { id, in_cycle }
//! ```
//!
//! Tags are written once, except for the provisional to finalized transition.

use crate::errors::{AnalysisError, Result};
use crate::register::constants::BUFFER_BOUND;
use crate::register::{state_count, SequenceId, State, Taps};

/// Visitation status of one state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StateTag {
    /// Not yet reached by any walk.
    #[default]
    Unvisited,

    /// On the walk currently in progress.
    Provisional,

    /// Classified: either on the cycle of `sequence_id` or a transient leading into it.
    Finalized {
        sequence_id: SequenceId,
        in_cycle: bool,
    },
}

impl StateTag {
    pub fn is_unvisited(self) -> bool {
        self == StateTag::Unvisited
    }

    /// The finalized sequence this state belongs to, if any.
    pub fn sequence_id(self) -> Option<SequenceId> {
        match self {
            StateTag::Finalized { sequence_id, .. } => Some(sequence_id),
            _ => None,
        }
    }

    pub fn in_cycle(self) -> bool {
        matches!(self, StateTag::Finalized { in_cycle: true, .. })
    }
}

/// Owned buffer of state tags, allocated once at the maximum size and reset
/// per configuration.
///
/// Only the first `mask + 1` tags are live. Every accessor indexes that live
/// region, so a state outside the configuration's mask panics instead of
/// reading stale tags.
#[derive(Debug, Clone)]
pub struct TagBuffer {
    tags: Vec<StateTag>,
    mask: u32,
}

impl TagBuffer {
    /// Create a buffer able to hold every configuration up to the buffer bound.
    pub fn new() -> Self {
        Self::with_capacity(BUFFER_BOUND)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            tags: vec![StateTag::Unvisited; capacity.max(1)],
            mask: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.tags.len()
    }

    /// Clear every live tag and make `0..=mask` the live region.
    pub fn reset(&mut self, taps: Taps, mask: u32) -> Result<()> {
        let count = state_count(mask);
        if count > self.tags.len() {
            return Err(AnalysisError::MaskExceedsBuffer {
                taps,
                mask,
                capacity: self.tags.len(),
            });
        }
        self.tags[..count].fill(StateTag::Unvisited);
        self.mask = mask;
        Ok(())
    }

    pub fn mask(&self) -> u32 {
        self.mask
    }

    /// Number of live tags: the states of the current configuration.
    pub fn live_states(&self) -> usize {
        state_count(self.mask)
    }

    /// The live tags, indexed by state.
    pub fn tags(&self) -> &[StateTag] {
        &self.tags[..state_count(self.mask)]
    }

    #[inline]
    pub fn get(&self, state: State) -> StateTag {
        self.tags()[state as usize]
    }

    /// Tag a newly reached state as part of the walk in progress.
    #[inline]
    pub(crate) fn mark_provisional(&mut self, state: State) {
        let slot = self.slot(state);
        debug_assert!(slot.is_unvisited(), "state {:#x} tagged twice", state);
        *slot = StateTag::Provisional;
    }

    /// Move a provisional state to its final classification.
    #[inline]
    pub(crate) fn finalize(&mut self, state: State, sequence_id: SequenceId, in_cycle: bool) {
        let slot = self.slot(state);
        debug_assert_eq!(*slot, StateTag::Provisional, "state {:#x} not provisional", state);
        *slot = StateTag::Finalized {
            sequence_id,
            in_cycle,
        };
    }

    /// First unvisited state at or above `from`, if any.
    pub fn next_unvisited(&self, from: State) -> Option<State> {
        let tags = self.tags();
        let from = from as usize;
        if from >= tags.len() {
            return None;
        }
        tags[from..]
            .iter()
            .position(|tag| tag.is_unvisited())
            .map(|offset| (from + offset) as State)
    }

    /// Count live states with the given tag predicate.
    pub fn count(&self, predicate: impl Fn(StateTag) -> bool) -> usize {
        self.tags().iter().filter(|&&tag| predicate(tag)).count()
    }

    #[inline]
    fn slot(&mut self, state: State) -> &mut StateTag {
        let live = state_count(self.mask);
        &mut self.tags[..live][state as usize]
    }
}

impl Default for TagBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_buffer_has_full_capacity() {
        let tags = TagBuffer::new();
        assert_eq!(tags.capacity(), BUFFER_BOUND);
        assert_eq!(tags.live_states(), 1);
    }

    #[test]
    fn test_reset_clears_live_region() {
        let mut tags = TagBuffer::new();
        tags.reset(7, 7).unwrap();
        tags.mark_provisional(3);
        tags.finalize(3, 2, true);
        tags.mark_provisional(5);
        assert_eq!(tags.count(|t| !t.is_unvisited()), 2);

        tags.reset(7, 7).unwrap();
        assert_eq!(tags.live_states(), 8);
        assert_eq!(tags.tags().len(), tags.live_states());
        assert_eq!(tags.count(StateTag::is_unvisited), 8);
    }

    #[test]
    fn test_reset_rejects_oversized_mask() {
        let mut tags = TagBuffer::with_capacity(16);
        let err = tags.reset(0x1f, 0x1f).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::MaskExceedsBuffer { taps: 0x1f, mask: 0x1f, capacity: 16 }
        ));
    }

    #[test]
    #[should_panic]
    fn test_state_outside_mask_panics() {
        let mut tags = TagBuffer::new();
        tags.reset(3, 3).unwrap();
        tags.get(4);
    }

    #[test]
    fn test_next_unvisited() {
        let mut tags = TagBuffer::new();
        tags.reset(3, 3).unwrap();
        assert_eq!(tags.next_unvisited(0), Some(0));
        tags.mark_provisional(0);
        tags.mark_provisional(1);
        tags.mark_provisional(3);
        assert_eq!(tags.next_unvisited(0), Some(2));
        assert_eq!(tags.next_unvisited(3), None);
        tags.mark_provisional(2);
        assert_eq!(tags.next_unvisited(0), None);
        assert_eq!(tags.next_unvisited(9), None);
    }

    #[test]
    fn test_tag_accessors() {
        let tag = StateTag::Finalized {
            sequence_id: 4,
            in_cycle: true,
        };
        assert_eq!(tag.sequence_id(), Some(4));
        assert!(tag.in_cycle());
        assert!(!StateTag::Provisional.in_cycle());
        assert_eq!(StateTag::Provisional.sequence_id(), None);
        assert!(StateTag::default().is_unvisited());
    }
}
