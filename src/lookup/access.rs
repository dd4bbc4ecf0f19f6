// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Access vector into the persisted lookup table.
//!
//! A direct index from every desired cycle length to the byte offset of the
//! section whose length is nearest to it, so a consumer can pick a register
//! for an arbitrary period without searching the table:
//!
//! ```text
//! 00000   offset of the best section for length 1      (4 bytes)
//! 00004   offset of the best section for length 2      (4 bytes)
//! ...
//! 4*(B-1) offset of the best section for length B      (4 bytes)
//! ```
//!
//! where B is the buffer bound. Ties between a shorter and a longer length go
//! to the shorter one.

use super::table_file::section_size;
use super::LengthLookup;
use crate::errors::Result;
use crate::register::constants::BUFFER_BOUND;
use byteorder::{NativeEndian, WriteBytesExt};
use log::info;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessVector {
    /// Entry `i` serves desired length `i + 1`.
    offsets: Vec<u32>,
}

impl AccessVector {
    /// Build the vector for the table `lookup` would persist.
    ///
    /// Returns `None` for an empty lookup, which has no section to point at.
    pub fn build(lookup: &LengthLookup) -> Option<Self> {
        let mut sections: Vec<(usize, u32)> = Vec::new();
        let mut offset = 0u32;
        for (length, bucket) in lookup.sections() {
            sections.push((length, offset));
            offset += section_size(bucket.len()) as u32;
        }
        if sections.is_empty() {
            return None;
        }

        let offsets = (1..=BUFFER_BOUND)
            .map(|desired| {
                let above = sections.partition_point(|&(length, _)| length < desired);
                let nearest = match (above.checked_sub(1), sections.get(above)) {
                    (Some(below), Some(&(longer, _))) => {
                        let shorter = sections[below].0;
                        if desired - shorter <= longer - desired {
                            below
                        } else {
                            above
                        }
                    }
                    (Some(below), None) => below,
                    (None, _) => above,
                };
                sections[nearest].1
            })
            .collect();

        Some(Self { offsets })
    }

    /// Offset of the best section for `length`, clamped to `1..=BUFFER_BOUND`.
    pub fn offset(&self, length: usize) -> u32 {
        let index = length.clamp(1, BUFFER_BOUND) - 1;
        self.offsets[index]
    }

    pub fn offsets(&self) -> &[u32] {
        &self.offsets
    }

    pub fn write<W: Write>(&self, out: &mut W) -> Result<()> {
        for &offset in &self.offsets {
            out.write_u32::<NativeEndian>(offset)?;
        }
        Ok(())
    }

    pub fn write_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let mut out = BufWriter::new(File::create(path)?);
        self.write(&mut out)?;
        out.flush()?;
        info!(
            "[Lookup] Wrote access vector ({} entries) to {}",
            self.offsets.len(),
            path.display()
        );
        Ok(())
    }
}
