//! CSV snapshot read/write.

use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::{MetricsError, MetricsResult};
use crate::types::{DataSet, DataType, Schema, Value};

/// Load a CSV snapshot into an in-memory [`DataSet`].
///
/// Rules:
///
/// - CSV must have headers.
/// - Headers must contain all schema fields (order can differ).
/// - Each value is parsed according to the schema field type; empty cells map
///   to [`Value::Null`].
pub fn load_csv_from_path(path: impl AsRef<Path>, schema: &Schema) -> MetricsResult<DataSet> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)?;
    load_csv_from_reader(&mut rdr, schema)
}

/// Load CSV data from an existing CSV reader.
pub fn load_csv_from_reader<R: std::io::Read>(
    rdr: &mut csv::Reader<R>,
    schema: &Schema,
) -> MetricsResult<DataSet> {
    let headers = rdr.headers()?.clone();

    // Map schema fields -> CSV column indexes (allows re-ordered CSV columns).
    let mut col_idxs = Vec::with_capacity(schema.fields.len());
    for field in &schema.fields {
        match headers.iter().position(|h| h == field.name) {
            Some(idx) => col_idxs.push(idx),
            None => {
                return Err(MetricsError::SchemaMismatch {
                    message: format!(
                        "missing required column '{field}'. headers={:?}",
                        headers.iter().collect::<Vec<_>>(),
                        field = field.name
                    ),
                });
            }
        }
    }

    let mut rows: Vec<Vec<Value>> = Vec::new();
    for (row_idx0, result) in rdr.records().enumerate() {
        // Report 1-based row number for users; +1 again because header is row 1.
        let user_row = row_idx0 + 2;
        let record = result?;

        let mut row: Vec<Value> = Vec::with_capacity(schema.fields.len());
        for (field, &csv_idx) in schema.fields.iter().zip(col_idxs.iter()) {
            let raw = record.get(csv_idx).unwrap_or("");
            row.push(parse_typed_value(user_row, &field.name, &field.data_type, raw)?);
        }
        rows.push(row);
    }

    Ok(DataSet::new(schema.clone(), rows))
}

/// Write a [`DataSet`] as a CSV snapshot at `path`.
///
/// This is the export behind the dashboards' download buttons: one header
/// row, timestamps as `"%Y-%m-%d %H:%M:%S"`, nulls as empty cells.
pub fn write_report_to_path(path: impl AsRef<Path>, dataset: &DataSet) -> MetricsResult<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    write_csv(&mut wtr, dataset)?;
    wtr.flush()?;
    Ok(())
}

/// Render a [`DataSet`] as an in-memory CSV string.
pub fn report_to_csv_string(dataset: &DataSet) -> MetricsResult<String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    write_csv(&mut wtr, dataset)?;
    let buf = wtr.into_inner().map_err(|e| MetricsError::Io(e.into_error()))?;
    String::from_utf8(buf).map_err(|e| MetricsError::Io(std::io::Error::other(e)))
}

fn write_csv<W: std::io::Write>(wtr: &mut csv::Writer<W>, dataset: &DataSet) -> MetricsResult<()> {
    wtr.write_record(dataset.schema.field_names())?;
    for row in &dataset.rows {
        wtr.write_record(row.iter().map(|cell| cell.render().unwrap_or_default()))?;
    }
    Ok(())
}

fn parse_typed_value(
    row: usize,
    column: &str,
    data_type: &DataType,
    raw: &str,
) -> MetricsResult<Value> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(Value::Null);
    }

    match data_type {
        DataType::Utf8 => Ok(Value::Utf8(trimmed.to_owned())),
        DataType::Int64 => trimmed.parse::<i64>().map(Value::Int64).map_err(|e| {
            MetricsError::ParseError {
                row,
                column: column.to_owned(),
                raw: raw.to_owned(),
                message: e.to_string(),
            }
        }),
        DataType::Float64 => trimmed.parse::<f64>().map(Value::Float64).map_err(|e| {
            MetricsError::ParseError {
                row,
                column: column.to_owned(),
                raw: raw.to_owned(),
                message: e.to_string(),
            }
        }),
        DataType::Bool => parse_bool(trimmed).map(Value::Bool).map_err(|message| {
            MetricsError::ParseError {
                row,
                column: column.to_owned(),
                raw: raw.to_owned(),
                message,
            }
        }),
        DataType::Timestamp => parse_timestamp(trimmed)
            .map(Value::Timestamp)
            .map_err(|message| MetricsError::ParseError {
                row,
                column: column.to_owned(),
                raw: raw.to_owned(),
                message,
            }),
    }
}

fn parse_bool(s: &str) -> Result<bool, String> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "t" | "1" | "yes" | "y" => Ok(true),
        "false" | "f" | "0" | "no" | "n" => Ok(false),
        _ => Err("expected bool (true/false/1/0/yes/no)".to_string()),
    }
}

fn parse_timestamp(s: &str) -> Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .map(|d| d.and_time(NaiveTime::MIN))
        })
        .ok_or_else(|| "expected timestamp ('%Y-%m-%d %H:%M:%S' or '%Y-%m-%d')".to_string())
}
