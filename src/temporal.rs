//! Temporal extent parsing and ISO 8601 rendering.

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::extent::extent_component;

/// Temporal extent of a collection: begin and end instants, either of which
/// may be open-ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemporalExtent {
    pub begin: Option<DateTime<FixedOffset>>,
    pub end: Option<DateTime<FixedOffset>>,
}

/// Parses the temporal extent from a collection description.
///
/// Returns `Ok(None)` if the collection declares no extent, or the extent has
/// no `temporal` array. The array must hold exactly two entries (begin, end);
/// an entry that is JSON null or `".."` marks an open-ended bound. Any other
/// entry count is [`Error::InvalidExtent`].
pub fn parse_temporal_extent(collection: &Value) -> Result<Option<TemporalExtent>> {
    let Some(temporal) = extent_component(collection, "temporal") else {
        return Ok(None);
    };
    if temporal.len() != 2 {
        return Err(Error::InvalidExtent(format!(
            "temporal extent with {} items is invalid",
            temporal.len()
        )));
    }
    Ok(Some(TemporalExtent {
        begin: parse_bound(&temporal[0])?,
        end: parse_bound(&temporal[1])?,
    }))
}

fn parse_bound(value: &Value) -> Result<Option<DateTime<FixedOffset>>> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) if s == ".." => Ok(None),
        Value::String(s) => Ok(Some(parse_as_date(s)?)),
        other => Err(Error::InvalidExtent(format!(
            "temporal extent entry {} is not a date-time",
            other
        ))),
    }
}

/// Parses an RFC 3339 / ISO 8601 date-time, e.g. `2018-02-12T23:20:50Z`.
pub fn parse_as_date(date_time: &str) -> Result<DateTime<FixedOffset>> {
    Ok(DateTime::parse_from_rfc3339(date_time)?)
}

/// Formats a date-time as an ISO 8601 instant in UTC, e.g.
/// `2018-02-12T23:20:50Z`.
pub fn format_date(date_time: &DateTime<FixedOffset>) -> String {
    date_time
        .with_timezone(&Utc)
        .to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Formats a calendar date as ISO 8601, e.g. `2018-02-12`.
pub fn format_calendar_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Formats an interval between two instants, e.g.
/// `2018-02-12T00:00:00Z/2018-03-18T12:31:12Z`.
pub fn format_date_range(begin: &DateTime<FixedOffset>, end: &DateTime<FixedOffset>) -> String {
    format!("{}/{}", format_date(begin), format_date(end))
}

/// Formats an interval as a start date plus an ISO 8601 period, e.g.
/// `2018-02-12/P1M6D`.
pub fn format_date_range_with_duration(begin: NaiveDate, end: NaiveDate) -> String {
    format!("{}/{}", format_calendar_date(begin), period_between(begin, end))
}

/// ISO 8601 period between two calendar dates in years, months and days.
/// A month is borrowed when the raw day difference disagrees in sign with
/// the month difference, so a reversed interval comes out with uniformly
/// negative components (e.g. `P-1M-6D`).
fn period_between(start: NaiveDate, end: NaiveDate) -> String {
    let mut total_months = (end.year() as i64 - start.year() as i64) * 12
        + (end.month() as i64 - start.month() as i64);
    let mut days = end.day() as i64 - start.day() as i64;
    if total_months > 0 && days < 0 {
        total_months -= 1;
        days = (end - add_months(start, total_months)).num_days();
    } else if total_months < 0 && days > 0 {
        total_months += 1;
        days = (end - add_months(start, total_months)).num_days();
    }
    let years = total_months / 12;
    let months = total_months % 12;

    if years == 0 && months == 0 && days == 0 {
        return "P0D".to_string();
    }
    let mut period = String::from("P");
    if years != 0 {
        period.push_str(&format!("{}Y", years));
    }
    if months != 0 {
        period.push_str(&format!("{}M", months));
    }
    if days != 0 {
        period.push_str(&format!("{}D", days));
    }
    period
}

fn add_months(date: NaiveDate, months: i64) -> NaiveDate {
    let zero_based = date.year() as i64 * 12 + date.month0() as i64 + months;
    let year = zero_based.div_euclid(12) as i32;
    let month = zero_based.rem_euclid(12) as u32 + 1;
    let day = date.day().min(days_in_month(year, month));
    // Clamp at the representable range; unreachable for real-world dates.
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MAX)
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        _ => {
            if NaiveDate::from_ymd_opt(year, 2, 29).is_some() {
                29
            } else {
                28
            }
        }
    }
}
