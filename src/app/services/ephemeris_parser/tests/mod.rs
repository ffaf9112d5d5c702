//! Test utilities and shared fixtures for ephemeris parser testing
//!
//! This module provides the sample exports and helper functions used across
//! the component test modules.

use std::io::Write;
use tempfile::NamedTempFile;

use crate::config::Config;
use crate::app::services::ephemeris_parser::EphemerisParser;

// Test modules
mod column_mapping_tests;
mod stats_tests;

/// Export with a sun, moon and mercury block, ten days apart
pub const COMPLETE_EXPORT: &str = include_str!("../../../../../tests/fixtures/complete-10d.txt");

/// Export without equinox clause and a summer-time sun block
pub const NO_EQUINOX_EXPORT: &str =
    include_str!("../../../../../tests/fixtures/no-equinox-mesz.txt");

/// Export whose last block is not terminated by a newline
pub const UNTERMINATED_EXPORT: &str =
    include_str!("../../../../../tests/fixtures/unterminated-last-block.txt");

/// Export with an unknown object and a moon row with an impossible phase
pub const INVALID_BLOCKS_EXPORT: &str =
    include_str!("../../../../../tests/fixtures/invalid-blocks.txt");

/// Metadata line of [`COMPLETE_EXPORT`]
pub const PAPENBURG_METADATA: &str = "Ort: Papenburg,     53°05' N    7°25' O   Äquin:   2000.0, geozentrisch,  DeltaT = 73.9 s";

pub const SUN_HEADER: &str = "      Datum        MEZ          Rektasz.    Deklin.     Aufg.  Kulm. Unterg Az Auf Unt. Entf.          Hell.  Ø [\"]  ADämm  EDämm";
pub const SUN_ROW: &str = "  Mo         01.01.2024 00:00   18h43m52.1s -23°01'12\"  8h31m 12h29m 16h27m   127° 233°       0.983331 -26.8 1951.6  7h44m 17h14m";

pub const MOON_HEADER: &str = "      Datum        MEZ          Rektasz.    Deklin.    Ekl. Lg.   Ekl. Br     Aufg.  Kulm. Unterg Entf.          Hell.  Ø [\"] Phase Alter Phas.W. Lib Lg.   Br. Colong.   Br.";
pub const MOON_ROW: &str = "  Mo         01.01.2024 00:00   10h58m21.3s + 8°57'40\" 161°52'09\" + 5°01'12\"  -----  5h11m 11h52m       369286.2 -12.1 1940.5 0.748  19.4    60.1  -3.12  +6.44 145.20  -1.21";

pub const MERCURY_HEADER: &str = "      Datum        MEZ          Rektasz.    Deklin.     Aufg.  Kulm. Unterg    Entf.          Hell.  Ø [\"]  Elong Pos.W. BrErde     ZM";
/// Row without the trailing "ZM" value
pub const MERCURY_SHORT_ROW: &str = "  Do         11.01.2024 00:00   17h41m20.5s -21°37'55\"  6h55m 11h08m 15h20m          0.959302  -0.1    7.0  -23.5  11.02  +4.77";

/// Helper to create an aborting parser
pub fn create_parser() -> EphemerisParser {
    EphemerisParser::new(Config::default())
}

/// Helper to create a parser that skips failing blocks
pub fn create_skipping_parser() -> EphemerisParser {
    EphemerisParser::new(Config::default().skipping_invalid_blocks())
}

/// Helper to create a temporary file with given content
pub fn create_temp_file(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    write!(temp_file, "{}", content).unwrap();
    temp_file
}
