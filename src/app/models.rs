//! Data models for ephemeris parsing
//!
//! This module contains the core data structures for representing observable
//! objects, the metadata line of an almanac export and the per-object ephemeris
//! rows that are plotted on the calendar.

use crate::constants::{
    DEFAULT_DIAMETER_UNIT, DEFAULT_DISTANCE_UNIT, DEFAULT_LINE_STRENGTH, MOON_DISTANCE_UNIT,
    MOON_ID, SUN_ID, SUN_LINE_STRENGTH_MULTIPLIER,
};
use crate::{Error, Result};
use chrono::{DateTime, Duration, FixedOffset, Offset, Utc};
use serde::Serialize;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::Arc;

// =============================================================================
// Observable Objects
// =============================================================================

/// An object that can be included in the calendar
///
/// Identity is the lowercase `internal_id`; the display attributes (colour,
/// line strength) and the German aliases hang off it.
#[derive(Debug, Clone, Serialize)]
pub struct ObservableObject {
    /// Lowercase identifier (e.g., "sun", "mercury")
    pub internal_id: &'static str,

    /// Display names used in the export (e.g., "Sonne"); the id is implied
    pub aliases: &'static [&'static str],

    /// CSS colour name of the plotted line
    pub line_color: &'static str,

    line_strength: f64,
    is_sun: Option<bool>,
    is_moon: Option<bool>,
    is_planet: Option<bool>,
}

impl ObservableObject {
    /// Definition used by the static object table
    pub(crate) const fn known(
        internal_id: &'static str,
        aliases: &'static [&'static str],
        line_color: &'static str,
    ) -> Self {
        Self {
            internal_id,
            aliases,
            line_color,
            line_strength: DEFAULT_LINE_STRENGTH,
            is_sun: None,
            is_moon: None,
            is_planet: None,
        }
    }

    /// Create a new object with validation
    pub fn new(
        internal_id: &'static str,
        aliases: &'static [&'static str],
        line_color: &'static str,
    ) -> Result<Self> {
        let object = Self::known(internal_id, aliases, line_color);
        object.validate()?;
        Ok(object)
    }

    /// Override the base line strength
    pub fn with_line_strength(mut self, line_strength: f64) -> Result<Self> {
        self.line_strength = line_strength;
        self.validate()?;
        Ok(self)
    }

    /// Override whether the object counts as the sun
    pub fn with_is_sun(mut self, is_sun: bool) -> Self {
        self.is_sun = Some(is_sun);
        self
    }

    /// Override whether the object counts as the moon
    pub fn with_is_moon(mut self, is_moon: bool) -> Self {
        self.is_moon = Some(is_moon);
        self
    }

    /// Override whether the object counts as a planet
    pub fn with_is_planet(mut self, is_planet: bool) -> Self {
        self.is_planet = Some(is_planet);
        self
    }

    /// Validate identifier and display attributes
    pub fn validate(&self) -> Result<()> {
        if self.internal_id.is_empty() {
            return Err(Error::data_validation("Object id cannot be empty"));
        }

        if self.internal_id.chars().any(char::is_uppercase) {
            return Err(Error::data_validation(format!(
                "Object id '{}' must be lowercase",
                self.internal_id
            )));
        }

        if self.line_strength.is_nan() || self.line_strength <= 0.0 {
            return Err(Error::data_validation(format!(
                "Line strength {} of '{}' must be positive",
                self.line_strength, self.internal_id
            )));
        }

        Ok(())
    }

    /// Name of the object (equivalent to the internal id)
    pub fn name(&self) -> &'static str {
        self.internal_id
    }

    /// Localized display name, the first alias if there is one
    pub fn localized_name(&self) -> &'static str {
        self.aliases.first().copied().unwrap_or(self.internal_id)
    }

    /// Every name the object answers to, internal id first
    pub fn aliases(&self) -> impl Iterator<Item = &'static str> + '_ {
        std::iter::once(self.internal_id).chain(self.aliases.iter().copied())
    }

    /// Exact, case-sensitive alias check
    pub fn has_alias(&self, alias: &str) -> bool {
        self.aliases().any(|a| a == alias)
    }

    /// Whether it's the sun; falls back to comparing the id with "sun"
    pub fn is_sun(&self) -> bool {
        self.is_sun.unwrap_or(self.internal_id == SUN_ID)
    }

    /// Whether it's the moon; falls back to comparing the id with "moon"
    pub fn is_moon(&self) -> bool {
        self.is_moon.unwrap_or(self.internal_id == MOON_ID)
    }

    /// Whether it's a planet; falls back to "neither sun nor moon"
    pub fn is_planet(&self) -> bool {
        self.is_planet
            .unwrap_or_else(|| !self.is_sun() && !self.is_moon())
    }

    /// Line strength to draw with; the sun's line is drawn stronger
    pub fn line_strength(&self) -> f64 {
        if self.is_sun() {
            self.line_strength * SUN_LINE_STRENGTH_MULTIPLIER
        } else {
            self.line_strength
        }
    }
}

impl PartialEq for ObservableObject {
    fn eq(&self, other: &Self) -> bool {
        self.internal_id == other.internal_id
    }
}

impl Eq for ObservableObject {}

impl Hash for ObservableObject {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.internal_id.hash(state);
    }
}

impl fmt::Display for ObservableObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.internal_id)
    }
}

// =============================================================================
// Metadata Line
// =============================================================================

/// Observer coordinate as written in the export (e.g., "53°05' N", "7°25' O")
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Coordinate {
    pub lat: String,
    pub lon: String,
}

impl Coordinate {
    pub fn new(lat: impl Into<String>, lon: impl Into<String>) -> Self {
        Self {
            lat: lat.into(),
            lon: lon.into(),
        }
    }

    /// Latitude and longitude combined
    pub fn combined(&self) -> String {
        format!("{} {}", self.lat, self.lon)
    }
}

/// Information from the first line of an export
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metadata {
    /// Observer location name (e.g., "Papenburg")
    pub place: String,

    /// Observer coordinate
    pub coordinate: Coordinate,

    /// Equinox of the coordinates, present for geocentric exports
    pub equinox: Option<f64>,

    /// Time correction DeltaT
    #[serde(serialize_with = "serialize_duration_seconds")]
    pub delta_t: Duration,
}

impl Metadata {
    /// Whether the export states geocentric coordinates for an equinox
    pub fn is_geocentric(&self) -> bool {
        self.equinox.is_some()
    }
}

fn serialize_duration_seconds<S: serde::Serializer>(
    duration: &Duration,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    let seconds = duration.num_milliseconds() as f64 / 1000.0;
    serializer.serialize_f64(seconds)
}

// =============================================================================
// Ephemeris Rows
// =============================================================================

/// Time zone named by the header label above the time column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TimeZoneLabel {
    /// Mitteleuropäische Zeit, UTC+1
    Mez,
    /// Mitteleuropäische Sommerzeit, UTC+2
    Mesz,
    /// Universal time
    Ut,
}

impl TimeZoneLabel {
    /// Fixed offset from UTC in seconds
    pub fn utc_offset_seconds(&self) -> i32 {
        match self {
            TimeZoneLabel::Mez => 3600,
            TimeZoneLabel::Mesz => 7200,
            TimeZoneLabel::Ut => 0,
        }
    }

    /// Fixed offset from UTC
    pub fn utc_offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_seconds()).unwrap_or(Utc.fix())
    }

    /// Label as written in the export
    pub fn label(&self) -> &'static str {
        match self {
            TimeZoneLabel::Mez => "MEZ",
            TimeZoneLabel::Mesz => "MESZ",
            TimeZoneLabel::Ut => "UT",
        }
    }
}

impl FromStr for TimeZoneLabel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "MEZ" => Ok(TimeZoneLabel::Mez),
            "MESZ" => Ok(TimeZoneLabel::Mesz),
            "UT" | "UTC" => Ok(TimeZoneLabel::Ut),
            other => Err(Error::invalid_field(
                "timezone",
                other,
                "unknown time zone label",
            )),
        }
    }
}

impl fmt::Display for TimeZoneLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Column values of one ephemeris row
///
/// Angles and times of day are kept as the formatted strings of the export
/// (shape-checked while parsing); numeric columns are converted to floats.
/// Every column is optional because headers differ between objects.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RowValues {
    /// Weekday abbreviation (e.g., "Mo")
    pub weekday: Option<String>,

    /// "Rektasz." as hours/minutes/seconds
    pub right_ascension: Option<String>,
    /// "Deklin." as signed degrees/minutes/seconds
    pub declination: Option<String>,
    /// "Ekl. Lg."
    pub ecliptic_longitude: Option<String>,
    /// "Ekl. Br"
    pub ecliptic_latitude: Option<String>,

    /// "Aufg."
    pub rise: Option<String>,
    /// "Kulm."
    pub culmination: Option<String>,
    /// "Unterg"
    pub set: Option<String>,
    /// "Az Auf"
    pub azimuth_rise: Option<String>,
    /// "[Az ]Unt."
    pub azimuth_set: Option<String>,

    /// "Entf."
    pub distance: Option<f64>,
    pub distance_unit_override: Option<String>,
    /// "Hell."
    pub brightness: Option<f64>,
    /// "Ø [\"]"
    pub diameter: Option<f64>,
    pub diameter_unit_override: Option<String>,

    /// "ADämm", sun only
    pub dawn: Option<String>,
    /// "EDämm", sun only
    pub dusk: Option<String>,

    /// "Phase", moon only
    pub phase: Option<f64>,
    /// "Alter", moon only
    pub age: Option<f64>,

    /// "Elong", planets only
    pub elongation: Option<f64>,

    // Provisional columns, kept verbatim until their meaning is settled.
    // Physical ephemeris values in degrees:
    /// "Pos.W." (NP / PA_N)
    pub position_angle: Option<String>,
    /// "BrErde" (SEP δ)
    pub earth_latitude: Option<String>,
    /// "ZM" (SEP ω)
    pub central_meridian: Option<String>,
    // Moon specific:
    /// "Phas.W."
    pub phase_angle: Option<String>,
    /// "Lib Lg."
    pub libration_longitude: Option<String>,
    /// "[Lib ]Br."
    pub libration_latitude: Option<String>,
    /// "Colong."
    pub colongitude: Option<String>,
    /// "[Colong. ]Br."
    pub subsolar_latitude: Option<String>,
}

impl RowValues {
    /// Validate numeric constraints
    pub fn validate(&self) -> Result<()> {
        if let Some(diameter) = self.diameter {
            if diameter.is_nan() || diameter <= 0.0 {
                return Err(Error::data_validation(format!(
                    "Invalid diameter {}: must be greater than 0",
                    diameter
                )));
            }
        }

        if let Some(phase) = self.phase {
            if !(-1.0..=1.0).contains(&phase) {
                return Err(Error::data_validation(format!(
                    "Invalid phase {}: must be between -1 and 1",
                    phase
                )));
            }
        }

        Ok(())
    }
}

/// One row of an object's ephemeris table
///
/// Rows are validated when they are created and cannot be changed afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EphemerisRow {
    bound_object: &'static ObservableObject,
    timestamp: DateTime<FixedOffset>,
    #[serde(flatten)]
    values: RowValues,
}

impl EphemerisRow {
    /// Create a validated row
    pub fn new(
        bound_object: &'static ObservableObject,
        timestamp: DateTime<FixedOffset>,
        values: RowValues,
    ) -> Result<Self> {
        values.validate()?;
        Ok(Self {
            bound_object,
            timestamp,
            values,
        })
    }

    /// Object the row belongs to
    pub fn bound_object(&self) -> &'static ObservableObject {
        self.bound_object
    }

    /// "Datum" combined with the time column in the header's time zone
    pub fn timestamp(&self) -> DateTime<FixedOffset> {
        self.timestamp
    }

    pub fn values(&self) -> &RowValues {
        &self.values
    }

    /// Unit of `distance` if a distance is set
    ///
    /// "km" for the moon and "AU" otherwise, unless overridden.
    pub fn distance_unit(&self) -> Option<&str> {
        self.values.distance?;
        Some(match &self.values.distance_unit_override {
            Some(unit) => unit.as_str(),
            None if self.bound_object.is_moon() => MOON_DISTANCE_UNIT,
            None => DEFAULT_DISTANCE_UNIT,
        })
    }

    /// Unit of `diameter` if a diameter is set
    pub fn diameter_unit(&self) -> Option<&str> {
        self.values.diameter?;
        Some(
            self.values
                .diameter_unit_override
                .as_deref()
                .unwrap_or(DEFAULT_DIAMETER_UNIT),
        )
    }
}

// =============================================================================
// Per-Object Datasets
// =============================================================================

/// All rows of one object block together with the shared metadata
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectDataset {
    pub bound_object: &'static ObservableObject,
    pub metadata: Arc<Metadata>,
    pub rows: Vec<EphemerisRow>,
}

impl ObjectDataset {
    pub fn new(bound_object: &'static ObservableObject, metadata: Arc<Metadata>) -> Self {
        Self {
            bound_object,
            metadata,
            rows: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// First and last timestamp of the series
    pub fn time_span(&self) -> Option<(DateTime<FixedOffset>, DateTime<FixedOffset>)> {
        let first = self.rows.iter().map(EphemerisRow::timestamp).min()?;
        let last = self.rows.iter().map(EphemerisRow::timestamp).max()?;
        Some((first, last))
    }
}
