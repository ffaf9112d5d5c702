//! Command-line argument definitions for the annual calendar parser
//!
//! This module defines the CLI interface using the clap derive API. The
//! parsed arguments are turned into an explicit [`Config`] that is handed to
//! the parser; nothing reads them from global state afterwards.

use crate::config::{BlockErrorPolicy, Config, Flags};
use crate::{Error, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for the annual calendar parser
///
/// Reads German-language almanac exports (fixed-width ephemeris tables per
/// object) and reports the structured data a calendar renderer would plot.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "annual-calendar",
    version,
    about = "Parse German almanac ephemeris exports for an annual calendar",
    long_about = "Reads an almanac export (metadata line followed by one fixed-width ephemeris \
                  table per object) and reports the parsed objects, their date spans and the \
                  observer metadata selected on the command line."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Parse an export file and summarise its object blocks
    Parse(ParseArgs),
    /// List the known objects and their aliases
    Objects,
}

/// Arguments for the parse command
#[derive(Debug, Clone, Parser)]
pub struct ParseArgs {
    /// Almanac export to parse
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Enable verbose logging output
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug)"
    )]
    pub verbose: u8,

    /// Only show errors. Overrides verbose settings.
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,

    /// Continue with the next object block when one fails
    #[arg(long = "skip-invalid-blocks", help = "Skip object blocks that fail to parse")]
    pub skip_invalid_blocks: bool,

    #[arg(long = "hide-place", help = "Do not show the observer place")]
    pub hide_place: bool,

    #[arg(long = "show-coordinate", help = "Show the observer coordinate")]
    pub show_coordinate: bool,

    #[arg(long = "show-equinox", help = "Show the equinox of geocentric exports")]
    pub show_equinox: bool,

    #[arg(long = "show-delta-t", help = "Show the DeltaT time correction")]
    pub show_delta_t: bool,
}

impl ParseArgs {
    /// Validate the parse command arguments
    pub fn validate(&self) -> Result<()> {
        if !self.file.exists() {
            return Err(Error::configuration(format!(
                "Input file does not exist: {}",
                self.file.display()
            )));
        }

        if !self.file.is_file() {
            return Err(Error::configuration(format!(
                "Input path is not a file: {}",
                self.file.display()
            )));
        }

        Ok(())
    }

    /// Flag set selected by the arguments
    pub fn to_flags(&self) -> Flags {
        let mut flags = Flags::DEFAULT;

        flags.set(Flags::QUIET, self.quiet);
        flags.set(Flags::SHOW_INFOS, self.verbose >= 1);
        flags.set(Flags::SHOW_DEBUG, self.verbose >= 2);

        flags.set(Flags::DISPLAY_PLACE, !self.hide_place);
        flags.set(Flags::DISPLAY_COORDINATE, self.show_coordinate);
        flags.set(Flags::DISPLAY_EQUINOX, self.show_equinox);
        flags.set(Flags::DISPLAY_DELTA_T, self.show_delta_t);

        flags
    }

    /// Parser configuration selected by the arguments
    pub fn to_config(&self) -> Config {
        let policy = if self.skip_invalid_blocks {
            BlockErrorPolicy::SkipAndContinue
        } else {
            BlockErrorPolicy::Abort
        };

        Config::default()
            .with_flags(self.to_flags())
            .with_block_error_policy(policy)
    }
}
