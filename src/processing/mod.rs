//! In-memory dataset transformations.
//!
//! The processing layer narrows and aggregates [`crate::types::DataSet`]
//! values handed over by the data-access layer. Everything is purely
//! in-memory and returns a new dataset; inputs are never mutated.
//!
//! Currently implemented:
//!
//! - [`filter()`]: AND-combined per-column constraints (equality/membership)
//! - [`search()`]: case-insensitive substring search across columns
//! - [`aggregate_by_time()`]: day/week/month bucketing with sum/mean/count
//!
//! ## Example: filter → search → aggregate
//!
//! ```rust
//! use control_tower_metrics::processing::{
//!     aggregate_by_time, filter, search, Aggregation, Constraint, TimeBucket,
//! };
//! use control_tower_metrics::types::{DataSet, DataType, Field, Schema, Value};
//!
//! let schema = Schema::new(vec![
//!     Field::new("agency", DataType::Utf8),
//!     Field::new("status", DataType::Utf8),
//!     Field::new("allocated_at", DataType::Utf8),
//!     Field::new("amount", DataType::Float64),
//! ]);
//! let row = |agency: &str, status: &str, day: &str, amount: f64| {
//!     vec![
//!         Value::Utf8(agency.to_string()),
//!         Value::Utf8(status.to_string()),
//!         Value::Utf8(format!("{day} 00:00:00")),
//!         Value::Float64(amount),
//!     ]
//! };
//! let ds = DataSet::new(
//!     schema,
//!     vec![
//!         row("Apex Recovery", "ACTIVE", "2025-01-01", 10.0),
//!         row("Apex Recovery", "ACTIVE", "2025-01-01", 5.0),
//!         row("Zenith Collections", "CLOSED", "2025-01-02", 3.0),
//!     ],
//! );
//!
//! let active = filter(&ds, &[("status", Constraint::Equals(Value::Utf8("ACTIVE".into())))]);
//! assert_eq!(active.row_count(), 2);
//!
//! let apex = search(&ds, "apex", None);
//! assert_eq!(apex.row_count(), 2);
//!
//! let daily = aggregate_by_time(&ds, "allocated_at", "amount", TimeBucket::Day, Aggregation::Sum)
//!     .unwrap();
//! assert_eq!(daily.row_count(), 2);
//! assert_eq!(daily.rows[0][1], Value::Float64(15.0));
//! ```

pub mod aggregate;
pub mod filter;
pub mod search;

pub use aggregate::{aggregate_by_time, Aggregation, TimeBucket};
pub use filter::{filter, Constraint};
pub use search::search;
