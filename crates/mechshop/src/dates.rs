//! Date parsing for the formats used at the shop counter.

use crate::error::{Result, ShopError};
use chrono::NaiveDate;

const ISO_FORMAT: &str = "%Y-%m-%d";
const US_FORMAT: &str = "%m/%d/%Y";

/// Parses `YYYY-MM-DD` or `MM/DD/YYYY`.
///
/// Values longer than ten characters (e.g. a stored timestamp) are cut to
/// their date part before parsing.
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    let trimmed = value.trim();
    let candidate = trimmed.get(..10).unwrap_or(trimmed);

    NaiveDate::parse_from_str(candidate, ISO_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(candidate, US_FORMAT))
        .map_err(|_| ShopError::InvalidDate(trimmed.to_string()))
}

/// Formats a date the way it is stored in the database.
pub fn format_date(date: NaiveDate) -> String {
    date.format(ISO_FORMAT).to_string()
}

/// Normalizes any accepted date string to `YYYY-MM-DD`.
pub fn normalize_date(value: &str) -> Result<String> {
    parse_date(value).map(format_date)
}
