use anyhow::Context;
use clap::Parser;
use dotenv::dotenv;
use regex::Regex;
use tracing::error;

use divvy::cli::{Cli, Commands, MergeArgs, PartitionArgs};
use divvy::config::AppConfig;
use divvy::errors::FileOpError;
use divvy::file_ops::{self, SplitMode};
use divvy::model::RunReport;
use divvy::{logging, utils};

fn main() {
    dotenv().ok();

    let args = Cli::parse();
    let verbose = match &args.command {
        Commands::Partition(args) => args.verbose,
        Commands::Merge(args) => args.verbose,
    };

    let _guard = logging::init_logger(verbose);

    utils::hide_cursor();
    let result = match args.command {
        Commands::Partition(args) => run_partition(args),
        Commands::Merge(args) => run_merge(args),
    };
    utils::show_cursor();

    if let Err(err) = result {
        error!("Error: {:#}", err);
        std::process::exit(1);
    }
}

fn run_partition(args: PartitionArgs) -> anyhow::Result<()> {
    let config = AppConfig::load().context("Error loading configuration")?;

    let mode = if let Some(n) = args.partitions {
        SplitMode::Partitions(n)
    } else if let Some(megabytes) = args.split_size {
        // megabytes on the command line, bytes everywhere else
        SplitMode::SizeBytes(megabytes * 1_000_000)
    } else if let Some(k) = args.split_count {
        SplitMode::FileCount(k)
    } else {
        anyhow::bail!("one of --partitions, --split-size, --split-count is required");
    };

    let pattern = compile_pattern(args.pattern.as_deref())?;
    let destination = args.destination.unwrap_or_else(|| args.source.clone());
    let dir_prefix = args.dir_prefix.unwrap_or(config.dir_prefix);
    let policy = args.on_collision.unwrap_or(config.on_collision);

    let report = file_ops::partition(
        &args.source,
        &destination,
        mode,
        &dir_prefix,
        pattern.as_ref(),
        policy,
    )?;
    finish(&report, args.verbose)
}

fn run_merge(args: MergeArgs) -> anyhow::Result<()> {
    let config = AppConfig::load().context("Error loading configuration")?;

    let pattern = compile_pattern(args.pattern.as_deref())?;
    let policy = args.overwrite.unwrap_or(config.on_collision);

    let report = file_ops::merge(&args.source, &args.destination, policy, pattern.as_ref())?;
    finish(&report, args.verbose)
}

fn compile_pattern(pattern: Option<&str>) -> Result<Option<Regex>, FileOpError> {
    pattern
        .map(|p| {
            Regex::new(p)
                .map_err(|err| FileOpError::InvalidArgument(format!("bad pattern {p:?}: {err}")))
        })
        .transpose()
}

fn finish(report: &RunReport, verbose: u8) -> anyhow::Result<()> {
    if verbose > 0 {
        println!("Total number of files moved: {}", report.moved);
    }
    // Per-file failures are warnings; only a fully failed run flips the
    // exit code
    if report.all_failed() {
        anyhow::bail!("all {} files failed to move", report.failures.len());
    }
    Ok(())
}
