use chrono::NaiveDate;

use control_tower_metrics::report::csv::{
    load_csv_from_path, load_csv_from_reader, report_to_csv_string,
};
use control_tower_metrics::types::{DataSet, DataType, Field, Schema, Value};

fn allocation_schema() -> Schema {
    Schema::new(vec![
        Field::new("loan_id", DataType::Int64),
        Field::new("agency", DataType::Utf8),
        Field::new("status", DataType::Utf8),
        Field::new("allocated_at", DataType::Timestamp),
        Field::new("amount", DataType::Float64),
    ])
}

fn ts(y: i32, m: u32, d: u32, h: u32, min: u32) -> Value {
    let date = NaiveDate::from_ymd_opt(y, m, d).unwrap();
    Value::Timestamp(date.and_hms_opt(h, min, 0).unwrap())
}

#[test]
fn load_csv_from_path_happy_path() {
    let schema = allocation_schema();
    let ds = load_csv_from_path("tests/fixtures/allocations.csv", &schema).unwrap();

    assert_eq!(ds.row_count(), 5);
    assert_eq!(
        ds.rows[0],
        vec![
            Value::Int64(1001),
            Value::Utf8("Apex Recovery".to_string()),
            Value::Utf8("ACTIVE".to_string()),
            ts(2025, 1, 1, 9, 15),
            Value::Float64(250000.5),
        ]
    );
    // Empty allocated_at cell loads as null.
    assert_eq!(ds.rows[4][3], Value::Null);
}

#[test]
fn load_csv_allows_reordered_columns() {
    let schema = Schema::new(vec![
        Field::new("loan_id", DataType::Int64),
        Field::new("agency", DataType::Utf8),
    ]);
    let input = "agency,loan_id\nApex Recovery,1001\n";
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(input.as_bytes());

    let ds = load_csv_from_reader(&mut rdr, &schema).unwrap();
    assert_eq!(ds.row_count(), 1);
    assert_eq!(ds.rows[0][0], Value::Int64(1001));
    assert_eq!(ds.rows[0][1], Value::Utf8("Apex Recovery".to_string()));
}

#[test]
fn load_csv_parses_date_only_timestamps() {
    let schema = Schema::new(vec![Field::new("allocated_at", DataType::Timestamp)]);
    let input = "allocated_at\n2025-01-05\n";
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(input.as_bytes());

    let ds = load_csv_from_reader(&mut rdr, &schema).unwrap();
    assert_eq!(ds.rows[0][0], ts(2025, 1, 5, 0, 0));
}

#[test]
fn load_csv_errors_on_missing_required_column() {
    let schema = allocation_schema();
    let input = "loan_id,agency,status,amount\n1001,Apex,ACTIVE,100\n";
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(input.as_bytes());

    let err = load_csv_from_reader(&mut rdr, &schema).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("schema mismatch"));
    assert!(msg.contains("missing required column 'allocated_at'"));
}

#[test]
fn load_csv_errors_on_bad_timestamp_with_context() {
    let schema = Schema::new(vec![Field::new("allocated_at", DataType::Timestamp)]);
    let input = "allocated_at\n05/01/2025\n";
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(input.as_bytes());

    let err = load_csv_from_reader(&mut rdr, &schema).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("row 2"));
    assert!(msg.contains("allocated_at"));
    assert!(msg.contains("05/01/2025"));
}

#[test]
fn export_round_trips_through_load() {
    let schema = allocation_schema();
    let ds = load_csv_from_path("tests/fixtures/allocations.csv", &schema).unwrap();

    let exported = report_to_csv_string(&ds).unwrap();
    let first_line = exported.lines().next().unwrap();
    assert_eq!(first_line, "loan_id,agency,status,allocated_at,amount");

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(exported.as_bytes());
    let reloaded = load_csv_from_reader(&mut rdr, &schema).unwrap();
    assert_eq!(reloaded, ds);
}

#[test]
fn export_renders_nulls_as_empty_cells() {
    let schema = Schema::new(vec![
        Field::new("agency", DataType::Utf8),
        Field::new("amount", DataType::Float64),
    ]);
    let ds = DataSet::new(
        schema,
        vec![vec![Value::Utf8("Apex".to_string()), Value::Null]],
    );

    let exported = report_to_csv_string(&ds).unwrap();
    assert_eq!(exported, "agency,amount\nApex,\n");
}
