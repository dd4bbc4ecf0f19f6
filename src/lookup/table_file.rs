// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Persisted lookup table.
//!
//! One section per non-empty length bucket, in ascending length order. All
//! fields are 2-byte integers in the producing platform's byte order:
//!
//! ```text
//! sequenceCount | maxDiversity | { taps | diversity | chance } * sequenceCount
//! ```
//!
//! Empty buckets are omitted entirely, so the cycle length of a section is
//! not stored; the reader returns sections in file order.

use super::{LengthLookup, LookupEntry};
use crate::errors::{AnalysisError, Result};
use byteorder::{NativeEndian, ReadBytesExt, WriteBytesExt};
use log::info;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Bytes in a section header (count and max diversity).
pub const SECTION_HEADER_BYTES: usize = 4;

/// Bytes per entry (taps, diversity, chance).
pub const ENTRY_BYTES: usize = 6;

/// Size in bytes of a section holding `entries` entries.
pub const fn section_size(entries: usize) -> usize {
    SECTION_HEADER_BYTES + ENTRY_BYTES * entries
}

/// One section read back from a persisted table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupSection {
    pub max_diversity: u16,
    pub entries: Vec<LookupEntry>,
}

/// Serialize every non-empty bucket. Returns the number of bytes written.
pub fn write_lookup<W: Write>(lookup: &LengthLookup, out: &mut W) -> Result<u64> {
    let mut written = 0u64;
    for (length, bucket) in lookup.sections() {
        let count = u16::try_from(bucket.len()).map_err(|_| AnalysisError::SectionTooLarge {
            length,
            entries: bucket.len(),
        })?;
        out.write_u16::<NativeEndian>(count)?;
        out.write_u16::<NativeEndian>(bucket.max_diversity())?;
        for entry in bucket.entries() {
            out.write_u16::<NativeEndian>(entry.taps)?;
            out.write_u16::<NativeEndian>(entry.diversity)?;
            out.write_u16::<NativeEndian>(entry.chance)?;
        }
        written += section_size(bucket.len()) as u64;
    }
    Ok(written)
}

/// Write the table to `path`, replacing any existing file.
pub fn write_lookup_file(lookup: &LengthLookup, path: impl AsRef<Path>) -> Result<u64> {
    let path = path.as_ref();
    let mut out = BufWriter::new(File::create(path)?);
    let written = write_lookup(lookup, &mut out)?;
    out.flush()?;
    info!(
        "[Lookup] Wrote {} sections ({} bytes) to {}",
        lookup.section_count(),
        written,
        path.display()
    );
    Ok(written)
}

/// Parse a persisted table back into its sections.
///
/// A clean end of input between sections ends the table; running out of
/// input inside a section is reported at the offset of the unread field.
pub fn read_lookup<R: BufRead>(mut input: R) -> Result<Vec<LookupSection>> {
    let mut sections = Vec::new();
    let mut offset = 0u64;
    while !input.fill_buf()?.is_empty() {
        let count = read_field(&mut input, &mut offset)?;
        let max_diversity = read_field(&mut input, &mut offset)?;
        let entries = (0..count)
            .map(|_| -> Result<LookupEntry> {
                Ok(LookupEntry {
                    taps: read_field(&mut input, &mut offset)?,
                    diversity: read_field(&mut input, &mut offset)?,
                    chance: read_field(&mut input, &mut offset)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        sections.push(LookupSection {
            max_diversity,
            entries,
        });
    }
    Ok(sections)
}

pub fn read_lookup_file(path: impl AsRef<Path>) -> Result<Vec<LookupSection>> {
    read_lookup(BufReader::new(File::open(path)?))
}

fn read_field<R: Read>(input: &mut R, offset: &mut u64) -> Result<u16> {
    match input.read_u16::<NativeEndian>() {
        Ok(value) => {
            *offset += 2;
            Ok(value)
        }
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
            Err(AnalysisError::TruncatedTable { offset: *offset })
        }
        Err(e) => Err(e.into()),
    }
}
