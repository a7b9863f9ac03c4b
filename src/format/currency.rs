//! Compact currency formatting using Indian magnitude buckets.
//!
//! Dashboards render monetary totals in three tiers: plain rupees with
//! thousands separators below 1 lakh, lakhs (`L`, 10^5) below 1 crore, and
//! crores (`Cr`, 10^7) above. The tier is chosen on the absolute value, so
//! negative amounts keep their sign inside the formatted digits
//! (`-25_000_000.0` renders as `"₹-2.50Cr"`).

const RUPEE: &str = "₹";
const LAKH: f64 = 100_000.0;
const CRORE: f64 = 10_000_000.0;

/// Format a monetary amount with the default two-decimal precision.
///
/// `None` and NaN render as `"₹0"`.
///
/// # Examples
///
/// ```
/// use control_tower_metrics::format::format_currency;
///
/// assert_eq!(format_currency(Some(95_500.0)), "₹95,500.00");
/// assert_eq!(format_currency(Some(250_000.0)), "₹2.50L");
/// assert_eq!(format_currency(Some(30_000_000.0)), "₹3.00Cr");
/// assert_eq!(format_currency(None), "₹0");
/// ```
pub fn format_currency(amount: Option<f64>) -> String {
    format_currency_precise(amount, 2)
}

/// Format a monetary amount with an explicit decimal precision.
pub fn format_currency_precise(amount: Option<f64>, precision: usize) -> String {
    let amount = match amount {
        Some(a) if !a.is_nan() => a,
        _ => return format!("{RUPEE}0"),
    };

    let magnitude = amount.abs();
    if magnitude < LAKH {
        format!("{RUPEE}{}", group_thousands(amount, precision))
    } else if magnitude < CRORE {
        format!("{RUPEE}{:.precision$}L", amount / LAKH)
    } else {
        format!("{RUPEE}{:.precision$}Cr", amount / CRORE)
    }
}

/// Fixed-precision rendering of `amount` with `,` grouping every three
/// integer digits.
fn group_thousands(amount: f64, precision: usize) -> String {
    let formatted = format!("{:.precision$}", amount.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (formatted.as_str(), None),
    };

    let mut out = String::with_capacity(formatted.len() + int_part.len() / 3 + 1);
    if amount < 0.0 {
        out.push('-');
    }
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if let Some(frac_part) = frac_part {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}
