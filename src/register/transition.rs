// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! The transition function of a binary feedback shift register.
//!
//! A state is shifted left by one bit, the feedback bit (the parity of the
//! tapped bits) is shifted in at the bottom, and the result is truncated to
//! the configuration's mask. Every state has exactly one successor, so each
//! configuration defines a functional graph over `0..=mask`.

use super::constants::{BUFFER_MASK, INVERT_FEEDBACK};
use super::{State, Taps};

/// Round `value` up to the nearest `2^k - 1`.
///
/// This is the register width implied by a tap value before any clamping.
/// `natural_mask(0)` is 0.
#[inline]
pub const fn natural_mask(value: u32) -> u32 {
    let mut mask = value;
    mask |= mask >> 1;
    mask |= mask >> 2;
    mask |= mask >> 4;
    mask |= mask >> 8;
    mask |= mask >> 16;
    mask
}

/// Effective mask of a configuration: its natural mask clamped to the buffer bound.
///
/// Configurations wider than the buffer are analyzed over the clamped subspace only.
#[inline]
pub const fn effective_mask(taps: Taps) -> u32 {
    let mask = natural_mask(taps as u32);
    if mask > BUFFER_MASK {
        BUFFER_MASK
    } else {
        mask
    }
}

/// Number of states reachable under `mask`.
#[inline]
pub const fn state_count(mask: u32) -> usize {
    mask as usize + 1
}

/// Compute the successor of `state` under `taps`, truncated to `mask`.
///
/// Without inverted feedback the all-zero state always feeds back a 1;
/// otherwise 0 would be a fixed point of every configuration.
#[inline]
pub fn step(taps: Taps, state: State, mask: u32) -> State {
    let parity = (state & taps).count_ones() & 1;
    let feedback = if INVERT_FEEDBACK {
        parity ^ 1
    } else if state == 0 {
        1
    } else {
        parity
    };
    ((((state as u32) << 1) | feedback) & mask) as State
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::register::constants::BUFFER_BOUND;

    #[test]
    fn test_natural_mask() {
        assert_eq!(natural_mask(0), 0);
        assert_eq!(natural_mask(1), 1);
        assert_eq!(natural_mask(2), 3);
        assert_eq!(natural_mask(3), 3);
        assert_eq!(natural_mask(5), 7);
        assert_eq!(natural_mask(0x100), 0x1ff);
        assert_eq!(natural_mask(0x800), 0xfff);
        assert_eq!(natural_mask(0xffff), 0xffff);
    }

    #[test]
    fn test_effective_mask_is_clamped() {
        assert_eq!(effective_mask(1), 1);
        assert_eq!(effective_mask(6), 7);
        assert_eq!(effective_mask(u16::MAX), BUFFER_MASK);
        assert_eq!(effective_mask((BUFFER_BOUND - 1) as u16), BUFFER_MASK);
        assert_eq!(state_count(effective_mask(u16::MAX)), BUFFER_BOUND);
    }

    #[test]
    fn test_step_stays_within_mask() {
        for taps in 1..64u16 {
            let mask = effective_mask(taps);
            for state in 0..=mask as State {
                assert!(step(taps, state, mask) as u32 <= mask);
            }
        }
    }

    #[test]
    #[cfg(not(feature = "invert_feedback"))]
    fn test_step_single_tap() {
        // taps = 1 over a 2-bit register: 2 -> 0 -> 1 -> 3 -> 3
        assert_eq!(step(1, 0, 3), 1);
        assert_eq!(step(1, 1, 3), 3);
        assert_eq!(step(1, 3, 3), 3);
        assert_eq!(step(1, 2, 3), 0);
    }

    #[test]
    #[cfg(not(feature = "invert_feedback"))]
    fn test_step_parity() {
        // 0b101 & 0b111 has two set bits: feedback 0
        assert_eq!(step(7, 0b101, 7), 0b010);
        // 0b100 & 0b111 has one set bit: feedback 1
        assert_eq!(step(7, 0b100, 7), 0b001);
    }

    #[test]
    #[cfg(not(feature = "invert_feedback"))]
    fn test_zero_state_escapes() {
        for taps in 1..32u16 {
            let mask = effective_mask(taps);
            assert_eq!(step(taps, 0, mask), 1);
        }
    }

    #[test]
    #[cfg(not(feature = "invert_feedback"))]
    fn test_self_loop() {
        assert_eq!(step(1, 1, 1), 1);
        assert_eq!(step(1, 3, 3), 3);
    }

    #[test]
    #[cfg(feature = "invert_feedback")]
    fn test_inverted_feedback() {
        assert_eq!(step(1, 0, 3), 1);
        assert_eq!(step(1, 1, 3), 2);
        assert_eq!(step(3, 3, 3), 3);
    }
}
