//! Time-bucketed aggregation for [`crate::types::DataSet`].

use std::collections::BTreeMap;

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::{MetricsError, MetricsResult};
use crate::format::date::INPUT_DATE_PATTERN;
use crate::types::{DataSet, DataType, Field, Schema, Value};

/// Fixed-width time bucket for grouping rows by a timestamp column.
///
/// Buckets are labeled by their start: the day itself, the Monday of the ISO
/// week, or the first of the month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeBucket {
    /// One calendar day.
    Day,
    /// One ISO week (Monday through Sunday).
    Week,
    /// One calendar month.
    Month,
}

impl TimeBucket {
    fn start_of(&self, day: NaiveDate) -> NaiveDate {
        match self {
            TimeBucket::Day => day,
            TimeBucket::Week => {
                day - Days::new(u64::from(day.weekday().num_days_from_monday()))
            }
            TimeBucket::Month => day.with_day(1).unwrap_or(day),
        }
    }
}

/// Per-bucket reduction over the value column.
///
/// `Sum` and `Mean` skip null and non-numeric cells; `Count` counts non-null
/// cells. `Custom` receives every non-null cell in the bucket and should
/// return a numeric [`Value`] (the output column is typed `Float64`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Aggregation {
    /// Sum of numeric values.
    Sum,
    /// Arithmetic mean of numeric values; `Null` for a bucket with none.
    Mean,
    /// Count of non-null values.
    Count,
    /// Caller-supplied reducer over the bucket's non-null cells.
    Custom(fn(&[Value]) -> Value),
}

/// Group rows into time buckets by `date_column` and reduce `value_column`
/// within each bucket.
///
/// The output dataset has one row per observed bucket, sorted ascending, with
/// schema `[date_column: Timestamp, value_column: Int64|Float64]`. Buckets
/// with no source rows are not synthesized.
///
/// Date cells coerce to timestamps before bucketing: [`Value::Timestamp`]
/// directly, [`Value::Utf8`] via `"%Y-%m-%d %H:%M:%S"` or bare `"%Y-%m-%d"`.
/// A cell that fails coercion is a [`MetricsError::ParseError`] naming the
/// row and raw value; silently dropping it would skew the aggregate. Null
/// date cells fall in no bucket.
///
/// # Errors
///
/// - [`MetricsError::SchemaMismatch`] if `date_column` or `value_column` is
///   not in the schema (and the dataset is non-empty).
/// - [`MetricsError::ParseError`] for an uncoercible date cell.
pub fn aggregate_by_time(
    dataset: &DataSet,
    date_column: &str,
    value_column: &str,
    bucket: TimeBucket,
    agg: Aggregation,
) -> MetricsResult<DataSet> {
    let out_schema = Schema::new(vec![
        Field::new(date_column, DataType::Timestamp),
        Field::new(
            value_column,
            match agg {
                Aggregation::Count => DataType::Int64,
                _ => DataType::Float64,
            },
        ),
    ]);

    if dataset.is_empty() {
        return Ok(DataSet::new(out_schema, Vec::new()));
    }

    let date_idx = dataset.schema.index_of(date_column).ok_or_else(|| {
        MetricsError::SchemaMismatch {
            message: format!("unknown date column '{date_column}'"),
        }
    })?;
    let value_idx = dataset.schema.index_of(value_column).ok_or_else(|| {
        MetricsError::SchemaMismatch {
            message: format!("unknown value column '{value_column}'"),
        }
    })?;

    // BTreeMap keeps buckets sorted ascending.
    let mut buckets: BTreeMap<NaiveDate, Vec<Value>> = BTreeMap::new();
    for (row_idx0, row) in dataset.rows.iter().enumerate() {
        let cell = row.get(date_idx).unwrap_or(&Value::Null);
        let ts = match coerce_timestamp(cell) {
            Ok(Some(ts)) => ts,
            Ok(None) => continue,
            Err(message) => {
                return Err(MetricsError::ParseError {
                    row: row_idx0 + 1,
                    column: date_column.to_owned(),
                    raw: cell.render().unwrap_or_default(),
                    message,
                });
            }
        };

        buckets
            .entry(bucket.start_of(ts.date()))
            .or_default()
            .push(row.get(value_idx).cloned().unwrap_or(Value::Null));
    }

    let mut rows = Vec::with_capacity(buckets.len());
    for (start, cells) in buckets {
        let non_null: Vec<Value> = cells.into_iter().filter(|c| *c != Value::Null).collect();
        let reduced = match agg {
            Aggregation::Sum => Value::Float64(numeric(&non_null).sum()),
            Aggregation::Mean => {
                let (count, sum) = numeric(&non_null).fold((0usize, 0.0), |(n, s), v| (n + 1, s + v));
                if count == 0 {
                    Value::Null
                } else {
                    Value::Float64(sum / count as f64)
                }
            }
            Aggregation::Count => Value::Int64(non_null.len() as i64),
            Aggregation::Custom(reducer) => reducer(&non_null),
        };
        rows.push(vec![Value::Timestamp(start.and_time(NaiveTime::MIN)), reduced]);
    }

    Ok(DataSet::new(out_schema, rows))
}

/// Coerce a date cell to a timestamp.
///
/// `Ok(None)` means the cell is null (the row falls in no bucket); `Err`
/// carries a message for [`MetricsError::ParseError`].
fn coerce_timestamp(cell: &Value) -> Result<Option<NaiveDateTime>, String> {
    match cell {
        Value::Null => Ok(None),
        Value::Timestamp(ts) => Ok(Some(*ts)),
        Value::Utf8(s) => {
            let trimmed = s.trim();
            NaiveDateTime::parse_from_str(trimmed, INPUT_DATE_PATTERN)
                .ok()
                .or_else(|| {
                    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
                        .ok()
                        .map(|d| d.and_time(NaiveTime::MIN))
                })
                .map(Some)
                .ok_or_else(|| {
                    "expected timestamp ('%Y-%m-%d %H:%M:%S' or '%Y-%m-%d')".to_string()
                })
        }
        other => Err(format!("cannot coerce {other:?} to a timestamp")),
    }
}

fn numeric<'a>(cells: &'a [Value]) -> impl Iterator<Item = f64> + 'a {
    cells.iter().filter_map(Value::as_f64).filter(|v| !v.is_nan())
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime};

    use super::{aggregate_by_time, Aggregation, TimeBucket};
    use crate::error::MetricsError;
    use crate::types::{DataSet, DataType, Field, Schema, Value};

    fn allocation_dataset(rows: Vec<(&str, Value)>) -> DataSet {
        let schema = Schema::new(vec![
            Field::new("allocated_at", DataType::Utf8),
            Field::new("amount", DataType::Float64),
        ]);
        let rows = rows
            .into_iter()
            .map(|(day, amount)| vec![Value::Utf8(day.to_string()), amount])
            .collect();
        DataSet::new(schema, rows)
    }

    fn bucket_ts(y: i32, m: u32, d: u32) -> Value {
        let date = NaiveDate::from_ymd_opt(y, m, d).unwrap();
        Value::Timestamp(date.and_time(NaiveTime::MIN))
    }

    #[test]
    fn daily_sum_emits_only_observed_buckets() {
        let ds = allocation_dataset(vec![
            ("2025-01-01", Value::Float64(10.0)),
            ("2025-01-01", Value::Float64(5.0)),
            ("2025-01-02", Value::Float64(3.0)),
        ]);

        let out =
            aggregate_by_time(&ds, "allocated_at", "amount", TimeBucket::Day, Aggregation::Sum)
                .unwrap();

        // No synthesized zero-row for unobserved dates.
        assert_eq!(out.row_count(), 2);
        assert_eq!(
            out.rows[0],
            vec![bucket_ts(2025, 1, 1), Value::Float64(15.0)]
        );
        assert_eq!(out.rows[1], vec![bucket_ts(2025, 1, 2), Value::Float64(3.0)]);
    }

    #[test]
    fn weekly_buckets_start_on_monday() {
        // 2025-01-01 is a Wednesday; week starts Monday 2024-12-30.
        let ds = allocation_dataset(vec![
            ("2025-01-01", Value::Float64(10.0)),
            ("2025-01-05", Value::Float64(5.0)),  // Sunday, same ISO week
            ("2025-01-06", Value::Float64(2.0)),  // Monday, next week
        ]);

        let out =
            aggregate_by_time(&ds, "allocated_at", "amount", TimeBucket::Week, Aggregation::Sum)
                .unwrap();

        assert_eq!(out.row_count(), 2);
        assert_eq!(
            out.rows[0],
            vec![bucket_ts(2024, 12, 30), Value::Float64(15.0)]
        );
        assert_eq!(out.rows[1], vec![bucket_ts(2025, 1, 6), Value::Float64(2.0)]);
    }

    #[test]
    fn monthly_buckets_start_on_the_first() {
        let ds = allocation_dataset(vec![
            ("2025-01-15", Value::Float64(1.0)),
            ("2025-01-31", Value::Float64(2.0)),
            ("2025-02-01", Value::Float64(4.0)),
        ]);

        let out =
            aggregate_by_time(&ds, "allocated_at", "amount", TimeBucket::Month, Aggregation::Sum)
                .unwrap();

        assert_eq!(out.row_count(), 2);
        assert_eq!(out.rows[0], vec![bucket_ts(2025, 1, 1), Value::Float64(3.0)]);
        assert_eq!(out.rows[1], vec![bucket_ts(2025, 2, 1), Value::Float64(4.0)]);
    }

    #[test]
    fn mean_and_count_skip_nulls() {
        let ds = allocation_dataset(vec![
            ("2025-01-01", Value::Float64(10.0)),
            ("2025-01-01", Value::Null),
            ("2025-01-01", Value::Float64(20.0)),
        ]);

        let mean =
            aggregate_by_time(&ds, "allocated_at", "amount", TimeBucket::Day, Aggregation::Mean)
                .unwrap();
        assert_eq!(mean.rows[0][1], Value::Float64(15.0));

        let count =
            aggregate_by_time(&ds, "allocated_at", "amount", TimeBucket::Day, Aggregation::Count)
                .unwrap();
        assert_eq!(count.rows[0][1], Value::Int64(2));
    }

    #[test]
    fn custom_reducer_sees_non_null_cells() {
        let ds = allocation_dataset(vec![
            ("2025-01-01", Value::Float64(10.0)),
            ("2025-01-01", Value::Null),
            ("2025-01-01", Value::Float64(25.0)),
        ]);

        fn max_amount(cells: &[Value]) -> Value {
            cells
                .iter()
                .filter_map(Value::as_f64)
                .fold(None::<f64>, |acc, v| Some(acc.map_or(v, |a| a.max(v))))
                .map(Value::Float64)
                .unwrap_or(Value::Null)
        }

        let out = aggregate_by_time(
            &ds,
            "allocated_at",
            "amount",
            TimeBucket::Day,
            Aggregation::Custom(max_amount),
        )
        .unwrap();
        assert_eq!(out.rows[0][1], Value::Float64(25.0));
    }

    #[test]
    fn null_dates_fall_in_no_bucket() {
        let schema = Schema::new(vec![
            Field::new("allocated_at", DataType::Timestamp),
            Field::new("amount", DataType::Float64),
        ]);
        let ds = DataSet::new(
            schema,
            vec![
                vec![bucket_ts(2025, 1, 1), Value::Float64(10.0)],
                vec![Value::Null, Value::Float64(99.0)],
            ],
        );

        let out =
            aggregate_by_time(&ds, "allocated_at", "amount", TimeBucket::Day, Aggregation::Sum)
                .unwrap();
        assert_eq!(out.row_count(), 1);
        assert_eq!(out.rows[0][1], Value::Float64(10.0));
    }

    #[test]
    fn uncoercible_date_is_a_parse_error_not_a_dropped_row() {
        let ds = allocation_dataset(vec![
            ("2025-01-01", Value::Float64(10.0)),
            ("05/01/2025", Value::Float64(5.0)),
        ]);

        let err =
            aggregate_by_time(&ds, "allocated_at", "amount", TimeBucket::Day, Aggregation::Sum)
                .unwrap_err();
        match err {
            MetricsError::ParseError { row, column, raw, .. } => {
                assert_eq!(row, 2);
                assert_eq!(column, "allocated_at");
                assert_eq!(raw, "05/01/2025");
            }
            other => panic!("expected ParseError, got {other:?}"),
        }
    }

    #[test]
    fn empty_dataset_yields_empty_output() {
        let ds = allocation_dataset(vec![]);
        let out =
            aggregate_by_time(&ds, "allocated_at", "amount", TimeBucket::Day, Aggregation::Sum)
                .unwrap();
        assert!(out.is_empty());
        assert_eq!(out.schema.fields[0].name, "allocated_at");
        assert_eq!(out.schema.fields[0].data_type, DataType::Timestamp);
    }

    #[test]
    fn unknown_columns_are_schema_mismatch() {
        let ds = allocation_dataset(vec![("2025-01-01", Value::Float64(1.0))]);
        let err = aggregate_by_time(&ds, "no_such", "amount", TimeBucket::Day, Aggregation::Sum)
            .unwrap_err();
        assert!(matches!(err, MetricsError::SchemaMismatch { .. }));
    }
}
