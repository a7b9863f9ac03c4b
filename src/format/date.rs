//! Date display formatting.

use chrono::NaiveDateTime;

use crate::types::Value;

/// Default display pattern, e.g. `"05-Jan-2025"`.
pub const DISPLAY_DATE_PATTERN: &str = "%d-%b-%Y";

/// Sentinel rendered for null, non-date, or unparseable input.
pub const NOT_AVAILABLE: &str = "N/A";

/// The one string shape accepted for date cells coming back from the stores.
pub(crate) const INPUT_DATE_PATTERN: &str = "%Y-%m-%d %H:%M:%S";

/// Format a date cell with the default [`DISPLAY_DATE_PATTERN`].
///
/// # Examples
///
/// ```
/// use control_tower_metrics::format::format_date;
/// use control_tower_metrics::types::Value;
///
/// assert_eq!(format_date(&Value::Utf8("2025-01-05 00:00:00".into())), "05-Jan-2025");
/// assert_eq!(format_date(&Value::Null), "N/A");
/// assert_eq!(format_date(&Value::Utf8("not-a-date".into())), "N/A");
/// ```
pub fn format_date(value: &Value) -> String {
    format_date_with(value, DISPLAY_DATE_PATTERN)
}

/// Format a date cell with a caller-supplied `strftime`-style pattern.
///
/// Accepts [`Value::Timestamp`] directly, or [`Value::Utf8`] in the fixed
/// [`INPUT_DATE_PATTERN`] shape; everything else renders as
/// [`NOT_AVAILABLE`]. Never panics on malformed input.
pub fn format_date_with(value: &Value, pattern: &str) -> String {
    let ts = match value {
        Value::Timestamp(ts) => *ts,
        Value::Utf8(s) => match NaiveDateTime::parse_from_str(s.trim(), INPUT_DATE_PATTERN) {
            Ok(ts) => ts,
            Err(_) => return NOT_AVAILABLE.to_string(),
        },
        _ => return NOT_AVAILABLE.to_string(),
    };
    ts.format(pattern).to_string()
}
