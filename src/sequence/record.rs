// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! A single discovered cycle and its statistics.

use crate::register::constants::CHANCE_SCALE;
use crate::register::{state_count, SequenceId, State, Taps};
use std::collections::HashMap;

/// The finalized description of one cycle under one configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceRecord {
    pub taps: Taps,
    pub sequence_id: SequenceId,
    /// Number of states on the cycle.
    pub length: u16,
    /// Number of states that reach the cycle without being on it.
    pub transients: u16,
    /// Cycle members in transition order.
    pub cycle: Vec<State>,
    /// Number of cycles of the same length under the same configuration.
    pub diversity: u16,
    /// Probability weight, see [`chance`].
    pub chance: u16,
}

impl SequenceRecord {
    /// A record for a freshly closed cycle. Statistics are filled in later.
    pub fn new(taps: Taps, sequence_id: SequenceId, cycle: Vec<State>, transients: u16) -> Self {
        Self {
            taps,
            sequence_id,
            length: cycle.len() as u16,
            transients,
            cycle,
            diversity: 0,
            chance: 0,
        }
    }

    /// Cycle members plus transients.
    pub fn covered_states(&self) -> usize {
        self.length as usize + self.transients as usize
    }
}

/// `diversity * length * CHANCE_SCALE / (mask + 1)`, rounded down.
///
/// Bounded by `CHANCE_SCALE` whenever the cycles it counts fit in the state space.
pub fn chance(diversity: u16, length: u16, mask: u32) -> u16 {
    let weight = diversity as u64 * length as u64 * CHANCE_SCALE as u64 / state_count(mask) as u64;
    weight.min(u16::MAX as u64) as u16
}

/// Second pass over one configuration's records: diversity and chance.
///
/// Must only be called once all cycles of the configuration have been found.
pub fn assign_statistics(records: &mut [SequenceRecord], mask: u32) {
    let mut by_length: HashMap<u16, u16> = HashMap::new();
    for record in records.iter() {
        *by_length.entry(record.length).or_default() += 1;
    }
    for record in records.iter_mut() {
        record.diversity = by_length[&record.length];
        record.chance = chance(record.diversity, record.length, mask);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: SequenceId, length: u16) -> SequenceRecord {
        SequenceRecord::new(9, id, (0..length).collect(), 0)
    }

    #[test]
    fn test_new_record_length() {
        let r = SequenceRecord::new(5, 2, vec![1, 3, 2], 1);
        assert_eq!(r.length, 3);
        assert_eq!(r.covered_states(), 4);
        assert_eq!(r.diversity, 0);
    }

    #[test]
    fn test_chance() {
        assert_eq!(chance(1, 1, 1), (CHANCE_SCALE / 2) as u16);
        assert_eq!(chance(1, 3, 3), (3 * CHANCE_SCALE / 4) as u16);
        assert_eq!(chance(2, 4, 15), CHANCE_SCALE as u16 / 2);
        // A full-period cycle weighs exactly the scale.
        assert_eq!(chance(1, 8, 7), CHANCE_SCALE as u16);
    }

    #[test]
    fn test_chance_rounds_down() {
        // 1 * 1 * scale / 3 states
        let mask = 2;
        assert_eq!(chance(1, 1, mask), (CHANCE_SCALE / 3) as u16);
    }

    #[test]
    fn test_diversity_counts_same_length_cycles() {
        let mut records = vec![record(2, 3), record(3, 1), record(4, 3), record(5, 3), record(6, 1)];
        assign_statistics(&mut records, 15);
        let diversities: Vec<u16> = records.iter().map(|r| r.diversity).collect();
        assert_eq!(diversities, vec![3, 2, 3, 3, 2]);
        assert_eq!(records[0].chance, chance(3, 3, 15));
        assert_eq!(records[1].chance, chance(2, 1, 15));
    }

    #[test]
    fn test_same_length_records_share_chance() {
        let mut records = vec![record(2, 2), record(3, 2)];
        assign_statistics(&mut records, 7);
        assert_eq!(records[0].chance, records[1].chance);
        assert_eq!(records[0].chance, (2 * 2 * CHANCE_SCALE / 8) as u16);
    }
}
