//! Application constants for the annual calendar parser
//!
//! This module contains the fixed vocabulary of the almanac export format
//! and the default values used throughout the crate.

// =============================================================================
// Metadata Line
// =============================================================================

/// Hemisphere letters accepted after a latitude
pub const ALLOWED_LATITUDE_HEMISPHERES: &[char] = &[
    'N', // EN: north; DE: Norden
    'S', // EN: south; DE: Süden
];

/// Hemisphere letters accepted after a longitude
pub const ALLOWED_LONGITUDE_HEMISPHERES: &[char] = &[
    'W', // EN: west; DE: Westen
    'E', // EN: east
    'O', // DE: Osten
];

/// Group-name suffix for the latitude copy of the angle fragment
pub const LATITUDE_GROUP_SUFFIX: &str = "_lat";

/// Group-name suffix for the longitude copy of the angle fragment
pub const LONGITUDE_GROUP_SUFFIX: &str = "_lon";

/// The only time-correction unit the parser converts (seconds)
pub const DELTA_T_SECONDS_UNIT: &str = "s";

// =============================================================================
// Object Table
// =============================================================================

/// Date format of the "Datum" column
pub const DATE_FORMAT: &str = "%d.%m.%Y";

/// Accepted formats of the time column under the zone label
pub const TIME_FORMATS: &[&str] = &["%H:%M:%S", "%H:%M"];

/// Placeholder character for values that are not available
pub const PLACEHOLDER_CHAR: char = '-';

/// Decimal separator used by German-locale exports
pub const LOCALE_DECIMAL_SEPARATOR: char = ',';

// =============================================================================
// Units and Display Defaults
// =============================================================================

/// Distance unit for the moon (reverse engineered from observations)
pub const MOON_DISTANCE_UNIT: &str = "km";

/// Distance unit for every other object (reverse engineered from observations)
pub const DEFAULT_DISTANCE_UNIT: &str = "AU";

/// Diameter unit, provided as `["]` in the header
pub const DEFAULT_DIAMETER_UNIT: &str = "arc second";

/// Base line strength of a plotted object
pub const DEFAULT_LINE_STRENGTH: f64 = 2.0;

/// The sun's line is drawn this many times stronger than the base strength
pub const SUN_LINE_STRENGTH_MULTIPLIER: f64 = 2.0;

/// Internal id of the sun
pub const SUN_ID: &str = "sun";

/// Internal id of the moon
pub const MOON_ID: &str = "moon";
