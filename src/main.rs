// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use lfsr_cycles::lookup::write_lookup_file;
use lfsr_cycles::register::constants::{
    DEFAULT_CONFIGURATION_LIMIT, DEFAULT_MAX_SEQUENCES, DEFAULT_PREVIEW_RECORDS,
};
use lfsr_cycles::report;
use lfsr_cycles::{AccessVector, AnalysisConfig, ConfigurationDriver};
use log::{info, warn};
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Exclusive upper bound of the analyzed tap configurations
    #[arg(long, default_value_t = DEFAULT_CONFIGURATION_LIMIT)]
    limit: u32,

    /// Capacity of the global sequence table
    #[arg(long, default_value_t = DEFAULT_MAX_SEQUENCES)]
    max_sequences: usize,

    /// Worker threads (1 runs sequentially)
    #[arg(short, long, default_value_t = 1)]
    jobs: usize,

    /// Persisted lookup table
    #[arg(short, long, default_value = "lfsr_lookup.bin")]
    output: PathBuf,

    /// Also write the nearest-length access vector here
    #[arg(long)]
    access_output: Option<PathBuf>,

    /// Number of sequence records to preview
    #[arg(long, default_value_t = DEFAULT_PREVIEW_RECORDS)]
    preview: usize,

    /// Hide the progress bar
    #[arg(short, long)]
    quiet: bool,

    /// Default log filter when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn progress_bar(quiet: bool) -> Result<ProgressBar> {
    if quiet {
        return Ok(ProgressBar::hidden());
    }
    let style =
        ProgressStyle::with_template("[{elapsed_precise}] {bar:40.cyan/blue} {pos:>7}/{len:7} {msg}")
            .context("invalid progress template")?
            .progress_chars("##-");
    let pb = ProgressBar::new(0);
    pb.set_style(style);
    pb.set_message("configurations");
    Ok(pb)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or(&cli.log_level));

    let config = AnalysisConfig {
        configuration_limit: cli.limit,
        max_sequences: cli.max_sequences,
        jobs: cli.jobs.max(1),
    };
    info!("[Main] {:?}", config);

    let ctx = ConfigurationDriver::new(config)
        .with_progress(progress_bar(cli.quiet)?)
        .run()
        .context("analysis failed")?;

    write_lookup_file(&ctx.lookup, &cli.output)
        .with_context(|| format!("writing lookup table to {}", cli.output.display()))?;

    if let Some(path) = &cli.access_output {
        match AccessVector::build(&ctx.lookup) {
            Some(access) => access
                .write_file(path)
                .with_context(|| format!("writing access vector to {}", path.display()))?,
            None => warn!("[Main] Lookup is empty; no access vector written"),
        }
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    report::write_sequence_preview(ctx.table.records(), cli.preview, &mut out)?;
    report::write_length_histogram(&ctx.lookup, &mut out)?;
    report::write_transient_table(&ctx.table, &mut out)?;
    report::write_summary(&ctx, &mut out)?;
    out.flush()?;
    Ok(())
}
