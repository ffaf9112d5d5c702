//! Parser for German almanac ephemeris exports
//!
//! An export starts with a metadata line (place, coordinate, optional equinox
//! and the DeltaT time correction) followed by one fixed-width table per
//! object. Each table has a name line, a header line of column labels and the
//! data rows, and is terminated by an empty line.
//!
//! ## Architecture
//!
//! - [`patterns`] - Composable recognizers for times, angles and coordinates
//! - [`grammar`] - Metadata line and object block recognizers
//! - [`column_mapping`] - Column catalog and per-header layout resolution
//! - [`record_parser`] - Row slicing and record construction
//! - [`field_parsers`] - Value coercion helpers
//! - [`parser`] - Document orchestration and block error policy
//! - [`stats`] - Parsing statistics and result structures
//!
//! ## Usage
//!
//! ```rust,no_run
//! use annual_calendar::{CelestialBody, Config, EphemerisParser};
//!
//! # fn example() -> annual_calendar::Result<()> {
//! let parser = EphemerisParser::new(Config::default().skipping_invalid_blocks());
//! let result = parser.parse_file(std::path::Path::new("complete-10d.txt"))?;
//!
//! if let Some(sun) = result.get(CelestialBody::Sun.object()) {
//!     println!("{} rows for the sun at {}", sun.len(), result.metadata.place);
//! }
//! # Ok(())
//! # }
//! ```

pub mod column_mapping;
pub mod field_parsers;
pub mod grammar;
pub mod parser;
pub mod patterns;
pub mod record_parser;
pub mod stats;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use column_mapping::{ColumnDescriptor, ColumnName, HeaderLayout, known_column_descriptors};
pub use field_parsers::raw_delta_t_to_timedelta;
pub use parser::EphemerisParser;
pub use patterns::PatternFragment;
pub use stats::{BlockFailure, ParseResult, ParseStats};
