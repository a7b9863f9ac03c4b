//! Display formatting for metric cards and tables.
//!
//! All formatters degrade malformed input to a fixed sentinel (`"₹0"` for
//! currency, `"N/A"` for dates) instead of returning an error: a single bad
//! cell must never abort a page render.

pub mod currency;
pub mod date;

pub use currency::{format_currency, format_currency_precise};
pub use date::{format_date, format_date_with, DISPLAY_DATE_PATTERN, NOT_AVAILABLE};
