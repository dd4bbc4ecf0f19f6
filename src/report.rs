// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Human-readable reports over a finished run.
//!
//! All reports write to any [`Write`], so the binary sends them to stdout and
//! tests capture them in a `Vec<u8>`.

use crate::context::AnalysisContext;
use crate::lookup::LengthLookup;
use crate::register::constants::PREVIEW_STATES;
use crate::register::{effective_mask, State};
use crate::sequence::{SequenceRecord, SequenceTable};
use crate::state::Counters;
use std::io::{self, Write};

/// Render `state` as a bit pattern, most significant bit first.
///
/// `-` is a set bit and `_` a clear one. The width is the bit count of `mask`.
pub fn render_state(state: State, mask: u32) -> String {
    let width = mask.count_ones();
    (0..width)
        .rev()
        .map(|bit| if (state >> bit) & 1 == 1 { '-' } else { '_' })
        .collect()
}

/// One line: sequence count, configurations, walks, merges and the highest id.
pub fn write_summary<W: Write>(ctx: &AnalysisContext, out: &mut W) -> io::Result<()> {
    write!(
        out,
        "Found {} sequences in {} configurations ({} walks, {} transient merges).",
        ctx.table.len(),
        ctx.statistics.get(Counters::Configurations),
        ctx.statistics.get(Counters::Walks),
        ctx.statistics.get(Counters::TransientMerges),
    )?;
    match ctx.highest() {
        Some(highest) => writeln!(
            out,
            " Most high = {} as {:x}",
            highest.sequence_id, highest.taps
        ),
        None => writeln!(out),
    }
}

/// Per non-empty length: contributing configurations and max diversity.
pub fn write_length_histogram<W: Write>(lookup: &LengthLookup, out: &mut W) -> io::Result<()> {
    writeln!(out, "lgth cnfg mdiv")?;
    for (length, bucket) in lookup.sections() {
        writeln!(
            out,
            "{:04} {:04} {:04}",
            length,
            bucket.len(),
            bucket.max_diversity()
        )?;
    }
    Ok(())
}

/// Records with transients; the configuration is shown on its first row only.
pub fn write_transient_table<W: Write>(table: &SequenceTable, out: &mut W) -> io::Result<()> {
    writeln!(out, "taps trns lgth")?;
    let mut previous = None;
    for record in table.iter().filter(|r| r.transients != 0) {
        if previous == Some(record.taps) {
            write!(out, "     ")?;
        } else {
            write!(out, "{:04x} ", record.taps)?;
            previous = Some(record.taps);
        }
        writeln!(out, "{:04} {:04}", record.transients, record.length)?;
    }
    Ok(())
}

/// The first `limit` records with their leading cycle states as bit patterns.
pub fn write_sequence_preview<W: Write>(
    records: &[SequenceRecord],
    limit: usize,
    out: &mut W,
) -> io::Result<()> {
    for record in records.iter().take(limit) {
        let mask = effective_mask(record.taps);
        write!(
            out,
            "{:04x} #{} lgth {} trns {} div {} chance {}:",
            record.taps,
            record.sequence_id,
            record.length,
            record.transients,
            record.diversity,
            record.chance
        )?;
        for &state in record.cycle.iter().take(PREVIEW_STATES) {
            write!(out, " {}", render_state(state, mask))?;
        }
        if record.cycle.len() > PREVIEW_STATES {
            write!(out, " ...")?;
        }
        writeln!(out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::AnalysisConfig;
    use crate::driver::ConfigurationDriver;

    fn text(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_render_state_msb_first() {
        assert_eq!(render_state(0b101, 0b111), "-_-");
        assert_eq!(render_state(1, 0b1111), "___-");
        assert_eq!(render_state(0, 1), "_");
        assert_eq!(render_state(0, 0), "");
    }

    #[test]
    fn test_transient_table_prints_configuration_once() {
        let mut table = SequenceTable::new(8);
        table
            .append(vec![
                SequenceRecord::new(0x12, 2, vec![1, 2], 3),
                SequenceRecord::new(0x12, 3, vec![5], 1),
                SequenceRecord::new(0x12, 4, vec![6], 0),
                SequenceRecord::new(0x13, 2, vec![7, 8, 9], 10),
            ])
            .unwrap();
        let report = text(|out| write_transient_table(&table, out));
        assert_eq!(
            report,
            "taps trns lgth\n\
             0012 0003 0002\n\
             \x20    0001 0001\n\
             0013 0010 0003\n"
        );
    }

    #[test]
    fn test_preview_truncates_long_cycles() {
        let mut record = SequenceRecord::new(0xf, 2, (1..=10).collect(), 0);
        record.diversity = 1;
        let report = text(|out| write_sequence_preview(&[record.clone(), record], 1, out));
        assert_eq!(report.lines().count(), 1);
        assert!(report.starts_with("000f #2 lgth 10"), "{}", report);
        assert!(report.contains(" ___- __-_ "), "{}", report);
        assert!(report.trim_end().ends_with("..."), "{}", report);
    }

    #[test]
    fn test_summary_and_histogram_of_a_run() {
        let ctx = ConfigurationDriver::new(AnalysisConfig {
            configuration_limit: 8,
            ..AnalysisConfig::default()
        })
        .run()
        .unwrap();

        let summary = text(|out| write_summary(&ctx, out));
        assert!(summary.starts_with(&format!("Found {} sequences in 7 configurations", ctx.table.len())));
        assert!(summary.contains("Most high"));

        let histogram = text(|out| write_length_histogram(&ctx.lookup, out));
        assert_eq!(histogram.lines().count(), ctx.lookup.section_count() + 1);
    }
}
