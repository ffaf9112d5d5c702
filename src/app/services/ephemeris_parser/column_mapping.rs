//! Header column map for fixed-width ephemeris tables
//!
//! Each known column is described by a locator pattern, a width and an offset.
//! The locator is searched (not anchored) in an object's header line; the
//! column starts `offset` characters after the end of the locator match and
//! spans `width` characters. When a locator contains a group named `label`,
//! the end of that group is used instead of the end of the whole match, which
//! lets a locator require surrounding context ("Unt." only after "Az Auf").
//!
//! All positions are character columns, not byte offsets: labels such as
//! `Ø ["]` and `ADämm` and values such as `-23°01'` contain multi-byte
//! characters.

use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use crate::app::models::TimeZoneLabel;
use crate::{Error, Result};

/// Name of the group marking the label inside a locator
const LABEL_GROUP: &str = "label";

/// Identifier of every column the parser knows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ColumnName {
    Weekday,
    Date,
    /// Time of day; the zone is the header label above it
    Timezone,
    RightAscension,
    Declination,
    EclipticLongitude,
    EclipticLatitude,
    Rise,
    Culmination,
    Set,
    AzimuthRise,
    AzimuthSet,
    Distance,
    Brightness,
    Diameter,
    Dawn,
    Dusk,
    Phase,
    Age,
    Elongation,
    PositionAngle,
    EarthLatitude,
    CentralMeridian,
    PhaseAngle,
    LibrationLongitude,
    LibrationLatitude,
    Colongitude,
    SubsolarLatitude,
}

impl ColumnName {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnName::Weekday => "weekday",
            ColumnName::Date => "date",
            ColumnName::Timezone => "timezone",
            ColumnName::RightAscension => "right_ascension",
            ColumnName::Declination => "declination",
            ColumnName::EclipticLongitude => "ecliptic_longitude",
            ColumnName::EclipticLatitude => "ecliptic_latitude",
            ColumnName::Rise => "rise",
            ColumnName::Culmination => "culmination",
            ColumnName::Set => "set",
            ColumnName::AzimuthRise => "azimuth_rise",
            ColumnName::AzimuthSet => "azimuth_set",
            ColumnName::Distance => "distance",
            ColumnName::Brightness => "brightness",
            ColumnName::Diameter => "diameter",
            ColumnName::Dawn => "dawn",
            ColumnName::Dusk => "dusk",
            ColumnName::Phase => "phase",
            ColumnName::Age => "age",
            ColumnName::Elongation => "elongation",
            ColumnName::PositionAngle => "position_angle",
            ColumnName::EarthLatitude => "earth_latitude",
            ColumnName::CentralMeridian => "central_meridian",
            ColumnName::PhaseAngle => "phase_angle",
            ColumnName::LibrationLongitude => "libration_longitude",
            ColumnName::LibrationLatitude => "libration_latitude",
            ColumnName::Colongitude => "colongitude",
            ColumnName::SubsolarLatitude => "subsolar_latitude",
        }
    }
}

impl std::fmt::Display for ColumnName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static description of one column
#[derive(Debug)]
pub struct ColumnDescriptor {
    pub name: ColumnName,
    pub locator: Regex,
    pub width: usize,
    /// Start of the column relative to the end of the locator match
    pub offset: isize,
}

impl ColumnDescriptor {
    fn new(name: ColumnName, locator: &str, width: usize, offset: isize) -> Self {
        Self {
            name,
            locator: Regex::new(locator).expect("valid column locator"),
            width,
            offset,
        }
    }

    /// Byte range of the locator's label in `header`, if it is present
    pub fn locate(&self, header: &str) -> Option<(usize, usize)> {
        let caps = self.locator.captures(header)?;
        let label = caps.name(LABEL_GROUP).or_else(|| caps.get(0))?;
        Some((label.start(), label.end()))
    }
}

// Widths follow the value formats of the export. The date, time and
// distance columns begin just after their labels; the remaining labels sit
// right-aligned over numeric and time columns and left-aligned over the
// angle columns.
lazy_static! {
    static ref COLUMN_DESCRIPTORS: Vec<ColumnDescriptor> = {
        use ColumnName::*;
        vec![
            ColumnDescriptor::new(Weekday, r"(?P<label>  )    ", 2, 0),
            ColumnDescriptor::new(Date, r"Datum", 10, 2),
            ColumnDescriptor::new(Timezone, r"(?P<label>MESZ| MEZ|  UT)", 8, 2),
            ColumnDescriptor::new(RightAscension, r"Rektasz\.", 11, -8),
            ColumnDescriptor::new(Declination, r"Deklin\.", 10, -7),
            ColumnDescriptor::new(EclipticLongitude, r"Ekl\. Lg\.", 10, -8),
            ColumnDescriptor::new(EclipticLatitude, r"Ekl\. Br", 10, -7),
            ColumnDescriptor::new(Rise, r"Aufg\.", 6, -6),
            ColumnDescriptor::new(Culmination, r"Kulm\.", 6, -6),
            ColumnDescriptor::new(Set, r"Unterg", 6, -6),
            ColumnDescriptor::new(AzimuthRise, r"Az Auf", 4, -4),
            ColumnDescriptor::new(AzimuthSet, r"Az Auf\s+(?P<label>Unt\.)", 4, -4),
            ColumnDescriptor::new(Distance, r"Entf\.", 8, 1),
            ColumnDescriptor::new(Brightness, r"Hell\.", 5, -5),
            ColumnDescriptor::new(Diameter, r#"Ø \["\]"#, 6, -6),
            // sun only
            ColumnDescriptor::new(Dawn, r"ADämm", 6, -6),
            ColumnDescriptor::new(Dusk, r"EDämm", 6, -6),
            // moon only
            ColumnDescriptor::new(Phase, r"Phase", 5, -5),
            ColumnDescriptor::new(Age, r"Alter", 5, -5),
            // planets only
            ColumnDescriptor::new(Elongation, r"Elong", 6, -6),
            // provisional: semantics unclear, kept verbatim
            ColumnDescriptor::new(PositionAngle, r"Pos\.W\.", 6, -6),
            ColumnDescriptor::new(EarthLatitude, r"BrErde", 6, -6),
            ColumnDescriptor::new(CentralMeridian, r"ZM", 6, -6),
            ColumnDescriptor::new(PhaseAngle, r"Phas\.W\.", 6, -6),
            ColumnDescriptor::new(LibrationLongitude, r"Lib Lg\.", 6, -7),
            ColumnDescriptor::new(LibrationLatitude, r"Lib Lg\.\s+(?P<label>Br\.)", 5, -5),
            ColumnDescriptor::new(Colongitude, r"Colong\.", 6, -7),
            ColumnDescriptor::new(SubsolarLatitude, r"Colong\.\s+(?P<label>Br\.)", 5, -5),
        ]
    };
}

/// The static catalog of known columns
pub fn known_column_descriptors() -> &'static [ColumnDescriptor] {
    &COLUMN_DESCRIPTORS
}

/// A descriptor applied to one specific header line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedColumn {
    pub name: ColumnName,
    /// First character column (inclusive)
    pub start: usize,
    /// Last character column (exclusive)
    pub end: usize,
}

/// Column layout of one object block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderLayout {
    /// Resolved columns ordered by start position
    pub columns: Vec<ResolvedColumn>,

    /// Zone named by the label above the time column
    pub timezone: Option<TimeZoneLabel>,
}

impl HeaderLayout {
    /// Resolve a header line against the known column catalog
    pub fn resolve(header: &str) -> Result<Self> {
        Self::resolve_with(header, known_column_descriptors())
    }

    /// Resolve a header line against the given descriptors
    ///
    /// Descriptors whose locator does not match are absent for this block.
    /// The remaining columns are sorted left-to-right and must not overlap.
    pub fn resolve_with(header: &str, descriptors: &[ColumnDescriptor]) -> Result<Self> {
        let mut columns = Vec::new();
        let mut timezone = None;

        for descriptor in descriptors {
            let Some((label_start, label_end)) = descriptor.locate(header) else {
                continue;
            };

            let label_end_column = header[..label_end].chars().count() as isize;
            let start = label_end_column + descriptor.offset;
            if start < 0 {
                return Err(Error::header_layout(
                    header,
                    format!("column '{}' would start before the line", descriptor.name),
                ));
            }

            let start = start as usize;
            columns.push(ResolvedColumn {
                name: descriptor.name,
                start,
                end: start + descriptor.width,
            });

            if descriptor.name == ColumnName::Timezone {
                timezone = Some(header[label_start..label_end].parse::<TimeZoneLabel>()?);
            }
        }

        columns.sort_by_key(|column| (column.start, column.end));

        for pair in columns.windows(2) {
            if pair[1].start < pair[0].end {
                return Err(Error::column_overlap(
                    header,
                    pair[0].name.as_str(),
                    pair[1].name.as_str(),
                ));
            }
        }

        debug!(
            "Resolved header layout: {}",
            columns
                .iter()
                .map(|c| format!("{}[{}..{})", c.name, c.start, c.end))
                .collect::<Vec<_>>()
                .join(" ")
        );

        Ok(Self { columns, timezone })
    }

    /// Whether the layout contains the given column
    pub fn has_column(&self, name: ColumnName) -> bool {
        self.columns.iter().any(|column| column.name == name)
    }

    /// Column names in physical order
    pub fn column_names(&self) -> Vec<ColumnName> {
        self.columns.iter().map(|column| column.name).collect()
    }

    /// Slice one data line into trimmed values, in column order
    ///
    /// Lines shorter than the layout yield empty strings for the missing
    /// trailing columns.
    pub fn slice<'l>(&self, line: &'l str) -> Vec<(ColumnName, &'l str)> {
        self.columns
            .iter()
            .map(|column| (column.name, char_slice(line, column.start, column.end).trim()))
            .collect()
    }
}

/// Substring between two character columns, clamped to the line
pub fn char_slice(line: &str, start: usize, end: usize) -> &str {
    let byte_at = |column: usize| {
        line.char_indices()
            .nth(column)
            .map(|(index, _)| index)
            .unwrap_or(line.len())
    };

    let start_byte = byte_at(start);
    let end_byte = byte_at(end.max(start));
    &line[start_byte..end_byte]
}
