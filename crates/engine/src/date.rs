use chrono::NaiveDate;

use crate::EngineError;

/// Wire format of entry dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn parse_date(raw: &str) -> Result<NaiveDate, EngineError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|_| EngineError::InvalidDate(format!("\"{}\" is not YYYY-MM-DD", raw.trim())))
}

/// Short date for the list, e.g. `03/15/2024`. Unparsable dates are shown
/// as stored.
pub fn display_date(raw: &str) -> String {
    parse_date(raw)
        .map(|date| date.format("%m/%d/%Y").to_string())
        .unwrap_or_else(|_| raw.to_string())
}
