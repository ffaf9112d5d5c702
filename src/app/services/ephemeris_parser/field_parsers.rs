//! Value coercion for sliced row values and metadata captures
//!
//! Helpers that turn trimmed substrings into typed values. Angles and times of
//! day stay formatted strings; they are only checked against the pattern
//! library. Empty values and runs of placeholder dashes are absent values.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveTime};

use super::patterns::{OPTIONAL_HM_TIME, PatternFragment};
use crate::app::models::TimeZoneLabel;
use crate::constants::{
    DATE_FORMAT, DELTA_T_SECONDS_UNIT, LOCALE_DECIMAL_SEPARATOR, PLACEHOLDER_CHAR, TIME_FORMATS,
};
use crate::{Error, Result};

/// Convert a DeltaT magnitude and unit into a duration
///
/// Only seconds are supported; "ms", "us", "m" and "h" are rejected rather
/// than converted.
pub fn raw_delta_t_to_timedelta(delta_t: f64, unit: &str) -> Result<Duration> {
    if unit != DELTA_T_SECONDS_UNIT {
        return Err(Error::unsupported_unit(unit));
    }

    if !delta_t.is_finite() {
        return Err(Error::invalid_field(
            "delta_t",
            delta_t.to_string(),
            "not a finite number",
        ));
    }

    Ok(Duration::nanoseconds((delta_t * 1e9).round() as i64))
}

/// Parse the captured DeltaT number and convert it with its unit
pub fn parse_delta_t(value: &str, unit: &str) -> Result<Duration> {
    let magnitude = parse_number("delta_t", value)?;
    raw_delta_t_to_timedelta(magnitude, unit)
}

/// Parse a required number, accepting a decimal comma
pub fn parse_number(field: &str, value: &str) -> Result<f64> {
    let trimmed = value.trim();
    trimmed
        .replace(LOCALE_DECIMAL_SEPARATOR, ".")
        .parse::<f64>()
        .map_err(|e| Error::invalid_field(field, trimmed, e.to_string()))
}

/// Whether a value is a run of placeholder dashes
pub fn is_placeholder(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c == PLACEHOLDER_CHAR)
}

/// Whether a sliced value carries no data
pub fn is_absent(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty() || is_placeholder(trimmed)
}

/// Parse an optional number column
pub fn parse_optional_float(field: &str, value: &str) -> Result<Option<f64>> {
    if is_absent(value) {
        return Ok(None);
    }
    parse_number(field, value).map(Some)
}

/// Keep a value verbatim if it has the shape of `fragment`
pub fn parse_shaped(
    field: &str,
    value: &str,
    fragment: &PatternFragment,
) -> Result<Option<String>> {
    if is_absent(value) {
        return Ok(None);
    }

    let trimmed = value.trim();
    if fragment.matches_whole(trimmed) {
        Ok(Some(trimmed.to_string()))
    } else {
        Err(Error::invalid_field(
            field,
            trimmed,
            format!("does not match '{}'", fragment.source()),
        ))
    }
}

/// Time of day such as "8h31m"; a dash run means not available
pub fn parse_optional_time(field: &str, value: &str) -> Result<Option<String>> {
    parse_shaped(field, value, &OPTIONAL_HM_TIME)
}

/// Keep a value verbatim without checking its shape
pub fn parse_verbatim(value: &str) -> Option<String> {
    if is_absent(value) {
        None
    } else {
        Some(value.trim().to_string())
    }
}

/// Combine the date and time columns in the header's zone
///
/// A missing time column means midnight, a missing zone means UT.
pub fn parse_timestamp(
    date: &str,
    time: Option<&str>,
    timezone: Option<TimeZoneLabel>,
) -> Result<DateTime<FixedOffset>> {
    let date = date.trim();
    let day = NaiveDate::parse_from_str(date, DATE_FORMAT)
        .map_err(|e| Error::datetime_parsing(format!("Invalid date '{}'", date), e))?;

    let time_of_day = match time.map(str::trim).filter(|t| !t.is_empty()) {
        Some(time) => parse_time_of_day(time)?,
        None => NaiveTime::MIN,
    };

    let offset = timezone.unwrap_or(TimeZoneLabel::Ut).utc_offset();
    day.and_time(time_of_day)
        .and_local_timezone(offset)
        .single()
        .ok_or_else(|| {
            Error::invalid_field(
                "timestamp",
                format!("{} {}", date, time_of_day),
                format!("not representable at {}", offset),
            )
        })
}

fn parse_time_of_day(time: &str) -> Result<NaiveTime> {
    let mut last_error = None;
    for format in TIME_FORMATS {
        match NaiveTime::parse_from_str(time, format) {
            Ok(parsed) => return Ok(parsed),
            Err(e) => last_error = Some(e),
        }
    }

    match last_error {
        Some(e) => Err(Error::datetime_parsing(format!("Invalid time '{}'", time), e)),
        None => Err(Error::invalid_field("timezone", time, "no time format configured")),
    }
}
