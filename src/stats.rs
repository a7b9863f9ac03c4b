//! Percentage and growth math for metric cards.
//!
//! Both helpers follow the dashboards' degradation rules rather than raw
//! arithmetic: a zero or missing denominator never divides, and the two
//! functions deliberately disagree about what a missing numerator means.
//! [`percentage`] treats it as "nothing achieved" (`0.0`); [`growth`] treats
//! a missing current value against a real previous value as "dropped to
//! nothing" (`-100.0`). That asymmetry is a business rule, not an accident.

/// Share of `numerator` in `denominator`, as a percentage rounded to two
/// decimals.
///
/// Returns `0.0` when the denominator is `None`, NaN, or zero, or when the
/// numerator is `None` or NaN. Never divides by zero.
///
/// # Examples
///
/// ```
/// use control_tower_metrics::stats::percentage;
///
/// assert_eq!(percentage(Some(50.0), Some(200.0)), 25.0);
/// assert_eq!(percentage(Some(50.0), Some(0.0)), 0.0);
/// assert_eq!(percentage(None, Some(100.0)), 0.0);
/// ```
pub fn percentage(numerator: Option<f64>, denominator: Option<f64>) -> f64 {
    percentage_precise(numerator, denominator, 2)
}

/// [`percentage`] with an explicit number of decimal places.
pub fn percentage_precise(numerator: Option<f64>, denominator: Option<f64>, precision: u32) -> f64 {
    let denominator = match denominator {
        Some(d) if !d.is_nan() && d != 0.0 => d,
        _ => return 0.0,
    };
    let numerator = match numerator {
        Some(n) if !n.is_nan() => n,
        _ => return 0.0,
    };
    round_to(numerator / denominator * 100.0, precision)
}

/// Percentage change from `previous` to `current`, rounded to two decimals.
///
/// Returns `None` when `previous` is `None`, NaN, or zero (growth is
/// undefined without a baseline) and `Some(-100.0)` when `previous` is valid
/// but `current` is `None` or NaN.
///
/// # Examples
///
/// ```
/// use control_tower_metrics::stats::growth;
///
/// assert_eq!(growth(Some(80.0), Some(100.0)), Some(-20.0));
/// assert_eq!(growth(Some(80.0), Some(0.0)), None);
/// assert_eq!(growth(None, Some(100.0)), Some(-100.0));
/// ```
pub fn growth(current: Option<f64>, previous: Option<f64>) -> Option<f64> {
    let previous = match previous {
        Some(p) if !p.is_nan() && p != 0.0 => p,
        _ => return None,
    };
    let current = match current {
        Some(c) if !c.is_nan() => c,
        _ => return Some(-100.0),
    };
    Some(round_to((current - previous) / previous * 100.0, 2))
}

fn round_to(value: f64, precision: u32) -> f64 {
    let factor = 10f64.powi(precision as i32);
    (value * factor).round() / factor
}
