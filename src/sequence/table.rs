// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! The global sequence table.

use super::SequenceRecord;
use crate::errors::{AnalysisError, Result};
use crate::register::Taps;

/// Append-only table of every record discovered during a run.
///
/// Records are appended one configuration at a time, in ascending
/// configuration order, so each configuration's records are contiguous.
#[derive(Debug, Clone)]
pub struct SequenceTable {
    records: Vec<SequenceRecord>,
    capacity: usize,
}

impl SequenceTable {
    pub fn new(capacity: usize) -> Self {
        Self {
            records: Vec::new(),
            capacity,
        }
    }

    /// Append one configuration's completed records.
    ///
    /// Fails without appending anything if the table would exceed its capacity.
    pub fn append(&mut self, batch: Vec<SequenceRecord>) -> Result<()> {
        if self.records.len() + batch.len() > self.capacity {
            return Err(AnalysisError::TableExhausted {
                capacity: self.capacity,
            });
        }
        self.records.extend(batch);
        Ok(())
    }

    pub fn records(&self) -> &[SequenceRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SequenceRecord> {
        self.records.iter()
    }

    /// Records of one configuration, in discovery order.
    pub fn for_configuration(&self, taps: Taps) -> impl Iterator<Item = &SequenceRecord> {
        self.records.iter().filter(move |r| r.taps == taps)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl<'a> IntoIterator for &'a SequenceTable {
    type Item = &'a SequenceRecord;
    type IntoIter = std::slice::Iter<'a, SequenceRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
