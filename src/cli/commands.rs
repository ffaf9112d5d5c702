//! Command implementations for the annual calendar CLI
//!
//! This module contains the command execution logic and the coloured
//! reporting of parse results.

use crate::app::models::{Metadata, ObjectDataset};
use crate::app::services::ephemeris_parser::{EphemerisParser, ParseStats};
use crate::app::services::object_registry::known_objects;
use crate::cli::args::{Args, Commands, ParseArgs};
use crate::config::Flags;
use crate::{Error, Result};
use colored::*;
use std::time::Instant;
use tracing::{debug, info};

/// Main entry point for command execution
pub fn run(args: Args) -> Result<()> {
    match args.command {
        Some(Commands::Parse(parse_args)) => run_parse(parse_args),
        Some(Commands::Objects) => run_objects(),
        None => Err(Error::configuration("No command specified".to_string())),
    }
}

/// Set up structured logging for the selected verbosity
pub fn setup_logging(flags: Flags) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = flags.log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("annual_calendar={}", log_level)));

    if flags.contains(Flags::QUIET) {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .with_timer(fmt::time::uptime()),
            )
            .init();
    }

    debug!("Logging initialized with level: {}", log_level);
    Ok(())
}

/// Parse an export and report what it contains
fn run_parse(args: ParseArgs) -> Result<()> {
    let config = args.to_config();
    setup_logging(config.flags)?;
    args.validate()?;

    let start_time = Instant::now();
    let flags = config.flags;
    let parser = EphemerisParser::new(config);
    let result = parser.parse_file(&args.file)?;

    info!(
        "Parsed {} in {:.2?}",
        args.file.display(),
        start_time.elapsed()
    );

    if flags.contains(Flags::QUIET) {
        return Ok(());
    }

    println!("{}", "Almanac export".bright_green().bold());
    println!("{}", "==============".bright_green());
    print_metadata(&result.metadata, flags);
    println!();

    if result.datasets.is_empty() {
        println!("{}", "No object blocks found".bright_yellow());
    } else {
        println!("{}", "Objects:".bright_green().bold());
        for dataset in &result.datasets {
            print_dataset(dataset);
        }
    }

    println!();
    print_summary(&result.stats);
    Ok(())
}

fn print_metadata(metadata: &Metadata, flags: Flags) {
    if flags.contains(Flags::DISPLAY_PLACE) {
        println!("  {} {}", "Place:".bright_cyan(), metadata.place.bright_white());
    }
    if flags.contains(Flags::DISPLAY_COORDINATE) {
        println!(
            "  {} {}",
            "Coordinate:".bright_cyan(),
            metadata.coordinate.combined().bright_white()
        );
    }
    if flags.contains(Flags::DISPLAY_EQUINOX) {
        let equinox = match metadata.equinox {
            Some(equinox) => format!("{:.1}", equinox),
            None => "topocentric".to_string(),
        };
        println!("  {} {}", "Equinox:".bright_cyan(), equinox.bright_white());
    }
    if flags.contains(Flags::DISPLAY_DELTA_T) {
        let seconds = metadata.delta_t.num_milliseconds() as f64 / 1000.0;
        println!(
            "  {} {}",
            "DeltaT:".bright_cyan(),
            format!("{:.1} s", seconds).bright_white()
        );
    }
}

fn print_dataset(dataset: &ObjectDataset) {
    let span = match dataset.time_span() {
        Some((first, last)) => format!(
            "{} .. {}",
            first.format("%d.%m.%Y"),
            last.format("%d.%m.%Y")
        ),
        None => "no rows".to_string(),
    };

    println!(
        "  {:<12} {:>5} rows  {}",
        dataset.bound_object.localized_name().bright_cyan(),
        dataset.len().to_string().bright_white(),
        span.bright_black()
    );
}

fn print_summary(stats: &ParseStats) {
    println!(
        "{} {}/{} blocks, {} rows ({:.1}%)",
        "Summary:".bright_green().bold(),
        stats.blocks_parsed.to_string().bright_white(),
        stats.blocks_found.to_string().bright_white(),
        stats.rows_parsed.to_string().bright_white(),
        stats.success_rate()
    );

    for failure in &stats.failures {
        let location = match failure.row {
            Some(row) => format!("{} row {}", failure.object, row),
            None => failure.object.clone(),
        };
        println!(
            "  {} {}: {}",
            "Skipped".bright_red(),
            location.bright_yellow(),
            failure.message
        );
    }

    if let Some(dropped) = &stats.dropped_trailing_text {
        let first_line = dropped.lines().next().unwrap_or_default();
        println!(
            "  {} trailing text starting with '{}' (missing final blank line?)",
            "Dropped".bright_red(),
            first_line.bright_yellow()
        );
    }
}

/// List the objects an export may contain
fn run_objects() -> Result<()> {
    println!("{}", "Known objects:".bright_green().bold());
    println!();

    for object in known_objects() {
        println!(
            "  {:<10} {:<28} {:<12} {}",
            object.internal_id.bright_cyan(),
            object.aliases.join(", ").bright_white(),
            object.line_color.bright_yellow(),
            format!("{:.1}", object.line_strength()).bright_black()
        );
    }

    Ok(())
}
