//! Individual row parsing for object blocks
//!
//! This module slices one fixed-width data line with the block's header layout
//! and coerces every value into an [`EphemerisRow`].

use tracing::trace;

use super::column_mapping::{ColumnName, HeaderLayout};
use super::field_parsers::{
    parse_optional_float, parse_optional_time, parse_shaped, parse_timestamp, parse_verbatim,
};
use super::patterns::{DEGREE_180, DEGREE_360, DMS_ANGLE_90, DMS_ANGLE_360, HMS_ANGLE};
use crate::app::models::{EphemerisRow, ObservableObject, RowValues};
use crate::{Error, Result};

/// Slice a data line into named, trimmed values
pub fn slice_row<'l>(layout: &HeaderLayout, line: &'l str) -> Vec<(ColumnName, &'l str)> {
    layout.slice(line)
}

/// Parse a single data line of an object block
pub fn parse_row(
    bound_object: &'static ObservableObject,
    layout: &HeaderLayout,
    line: &str,
) -> Result<EphemerisRow> {
    let sliced = slice_row(layout, line);
    let value_of = |name: ColumnName| {
        sliced
            .iter()
            .find(|(column, _)| *column == name)
            .map(|(_, value)| *value)
    };

    let date = value_of(ColumnName::Date)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| Error::invalid_field(ColumnName::Date.as_str(), line, "no date in row"))?;
    let timestamp = parse_timestamp(date, value_of(ColumnName::Timezone), layout.timezone)?;

    let mut values = RowValues::default();

    for (column, value) in &sliced {
        let field = column.as_str();
        match column {
            ColumnName::Date | ColumnName::Timezone => {}
            ColumnName::Weekday => values.weekday = parse_verbatim(value),

            ColumnName::RightAscension => {
                values.right_ascension = parse_shaped(field, value, &HMS_ANGLE)?
            }
            ColumnName::Declination => values.declination = parse_shaped(field, value, &DMS_ANGLE_90)?,
            ColumnName::EclipticLongitude => {
                values.ecliptic_longitude = parse_shaped(field, value, &DMS_ANGLE_360)?
            }
            ColumnName::EclipticLatitude => {
                values.ecliptic_latitude = parse_shaped(field, value, &DMS_ANGLE_90)?
            }

            ColumnName::Rise => values.rise = parse_optional_time(field, value)?,
            ColumnName::Culmination => values.culmination = parse_optional_time(field, value)?,
            ColumnName::Set => values.set = parse_optional_time(field, value)?,
            ColumnName::AzimuthRise => values.azimuth_rise = parse_shaped(field, value, &DEGREE_180)?,
            ColumnName::AzimuthSet => values.azimuth_set = parse_shaped(field, value, &DEGREE_360)?,

            ColumnName::Distance => values.distance = parse_optional_float(field, value)?,
            ColumnName::Brightness => values.brightness = parse_optional_float(field, value)?,
            ColumnName::Diameter => values.diameter = parse_optional_float(field, value)?,

            ColumnName::Dawn => values.dawn = parse_optional_time(field, value)?,
            ColumnName::Dusk => values.dusk = parse_optional_time(field, value)?,
            ColumnName::Phase => values.phase = parse_optional_float(field, value)?,
            ColumnName::Age => values.age = parse_optional_float(field, value)?,
            ColumnName::Elongation => values.elongation = parse_optional_float(field, value)?,

            ColumnName::PositionAngle => values.position_angle = parse_verbatim(value),
            ColumnName::EarthLatitude => values.earth_latitude = parse_verbatim(value),
            ColumnName::CentralMeridian => values.central_meridian = parse_verbatim(value),
            ColumnName::PhaseAngle => values.phase_angle = parse_verbatim(value),
            ColumnName::LibrationLongitude => values.libration_longitude = parse_verbatim(value),
            ColumnName::LibrationLatitude => values.libration_latitude = parse_verbatim(value),
            ColumnName::Colongitude => values.colongitude = parse_verbatim(value),
            ColumnName::SubsolarLatitude => values.subsolar_latitude = parse_verbatim(value),
        }
    }

    let row = EphemerisRow::new(bound_object, timestamp, values)?;
    trace!("Parsed {} row at {}", bound_object, timestamp);
    Ok(row)
}
