// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Length lookup aggregator.
//!
//! Collects sequence records from every configuration into buckets keyed by
//! cycle length. A configuration contributes at most one entry per bucket:
//! its diversity already says how many cycles of that length it has.
//!
//! - `table_file`: the persisted binary table and its reader
//! - `access`: the nearest-length access vector into the persisted table
//!
//! # Ordering
//!
//! Deduplication only compares against the most recent entry of a bucket, so
//! records must be inserted in ascending configuration order, one
//! configuration at a time. This also makes the persisted table reproducible.

pub mod access;
pub mod table_file;

pub use access::AccessVector;
pub use table_file::{read_lookup, read_lookup_file, write_lookup, write_lookup_file, LookupSection};

use crate::register::constants::BUFFER_BOUND;
use crate::register::Taps;
use crate::sequence::SequenceRecord;

/// One configuration's contribution to a length bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookupEntry {
    pub taps: Taps,
    pub diversity: u16,
    pub chance: u16,
}

impl From<&SequenceRecord> for LookupEntry {
    fn from(record: &SequenceRecord) -> Self {
        Self {
            taps: record.taps,
            diversity: record.diversity,
            chance: record.chance,
        }
    }
}

/// All entries for one cycle length.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LengthBucket {
    entries: Vec<LookupEntry>,
    max_diversity: u16,
}

impl LengthBucket {
    /// Append `entry` unless the previous entry came from the same configuration.
    ///
    /// Returns whether the entry was appended.
    pub fn push(&mut self, entry: LookupEntry) -> bool {
        if self.entries.last().is_some_and(|last| last.taps == entry.taps) {
            return false;
        }
        self.max_diversity = self.max_diversity.max(entry.diversity);
        self.entries.push(entry);
        true
    }

    pub fn entries(&self) -> &[LookupEntry] {
        &self.entries
    }

    pub fn max_diversity(&self) -> u16 {
        self.max_diversity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Buckets for every cycle length from 0 to the buffer bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LengthLookup {
    buckets: Vec<LengthBucket>,
}

impl LengthLookup {
    pub fn new() -> Self {
        Self {
            buckets: vec![LengthBucket::default(); BUFFER_BOUND + 1],
        }
    }

    /// Add one record to the bucket for its length.
    pub fn insert(&mut self, record: &SequenceRecord) -> bool {
        self.buckets[record.length as usize].push(LookupEntry::from(record))
    }

    /// Add records in order. Returns how many were appended.
    pub fn extend<'a>(&mut self, records: impl IntoIterator<Item = &'a SequenceRecord>) -> usize {
        let mut appended = 0;
        for record in records {
            if self.insert(record) {
                appended += 1;
            }
        }
        appended
    }

    pub fn bucket(&self, length: usize) -> Option<&LengthBucket> {
        self.buckets.get(length)
    }

    /// Non-empty buckets in ascending length order.
    pub fn sections(&self) -> impl Iterator<Item = (usize, &LengthBucket)> {
        self.buckets
            .iter()
            .enumerate()
            .filter(|(_, bucket)| !bucket.is_empty())
    }

    pub fn section_count(&self) -> usize {
        self.sections().count()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(LengthBucket::is_empty)
    }
}

impl Default for LengthLookup {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(taps: Taps, length: u16, diversity: u16) -> SequenceRecord {
        let mut r = SequenceRecord::new(taps, 2, (0..length).collect(), 0);
        r.diversity = diversity;
        r.chance = diversity * 10;
        r
    }

    #[test]
    fn test_one_entry_per_configuration_and_length() {
        let mut lookup = LengthLookup::new();
        let records = vec![record(5, 3, 2), record(5, 3, 2), record(5, 1, 1), record(6, 3, 1)];
        assert_eq!(lookup.extend(&records), 3);

        let bucket = lookup.bucket(3).unwrap();
        let taps: Vec<Taps> = bucket.entries().iter().map(|e| e.taps).collect();
        assert_eq!(taps, vec![5, 6]);
        assert_eq!(bucket.entries()[0].chance, 20);
        assert_eq!(lookup.bucket(1).unwrap().len(), 1);
    }

    #[test]
    fn test_max_diversity() {
        let mut lookup = LengthLookup::new();
        lookup.extend(&[record(1, 4, 1), record(2, 4, 3), record(3, 4, 2)]);
        assert_eq!(lookup.bucket(4).unwrap().max_diversity(), 3);
    }

    #[test]
    fn test_adjacent_entries_differ() {
        let mut lookup = LengthLookup::new();
        let records: Vec<SequenceRecord> = (1..20u16)
            .flat_map(|taps| (0..3).map(move |_| record(taps, 1 + taps % 3, 3)))
            .collect();
        lookup.extend(&records);
        for (_, bucket) in lookup.sections() {
            for pair in bucket.entries().windows(2) {
                assert_ne!(pair[0].taps, pair[1].taps);
            }
        }
    }

    #[test]
    fn test_sections_skip_empty_buckets() {
        let mut lookup = LengthLookup::new();
        assert!(lookup.is_empty());
        lookup.extend(&[record(1, 7, 1), record(2, 2, 1)]);
        let lengths: Vec<usize> = lookup.sections().map(|(length, _)| length).collect();
        assert_eq!(lengths, vec![2, 7]);
        assert_eq!(lookup.section_count(), 2);
        assert!(!lookup.is_empty());
    }

    #[test]
    fn test_full_length_cycle_has_a_bucket() {
        let mut lookup = LengthLookup::new();
        lookup.insert(&record(1, BUFFER_BOUND as u16, 1));
        assert_eq!(lookup.bucket(BUFFER_BOUND).unwrap().len(), 1);
    }
}
