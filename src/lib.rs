//! `control-tower-metrics` is a small library behind collections-operations
//! dashboards (loan allocation to agencies, payment tracking, agent activity).
//! It owns the reusable metrics/formatting logic those pages share: compact
//! Indian-convention currency formatting, date formatting, percentage/growth
//! math, and filter/search/time-bucketed aggregation over an in-memory
//! [`types::DataSet`].
//!
//! The data-access layer (two relational stores plus a document store) and
//! the page/render layer live elsewhere. This crate only assumes query
//! results arrive as rectangular row sets with named columns, and that its
//! return values are rendered somewhere it cannot see. Display helpers never
//! fail: malformed input degrades to a documented sentinel (`"N/A"`, `"₹0"`,
//! `0.0`, `None`, dataset unchanged) so a single bad row cannot abort a page
//! render. Structural failures (snapshot I/O, an uncoercible date cell during
//! aggregation) surface as [`MetricsError`].
//!
//! ## Quick examples: metric cards
//!
//! ```rust
//! use control_tower_metrics::format::{format_currency, format_date};
//! use control_tower_metrics::stats::{growth, percentage};
//! use control_tower_metrics::types::Value;
//!
//! assert_eq!(format_currency(Some(25_000_000.0)), "₹2.50Cr");
//! assert_eq!(format_date(&Value::Utf8("2025-01-05 00:00:00".into())), "05-Jan-2025");
//! assert_eq!(percentage(Some(350.0), Some(1400.0)), 25.0);
//! assert_eq!(growth(Some(120.0), Some(100.0)), Some(20.0));
//! ```
//!
//! ## Tables: filter, search, aggregate
//!
//! ```rust
//! use control_tower_metrics::processing::{
//!     aggregate_by_time, filter, search, Aggregation, Constraint, TimeBucket,
//! };
//! use control_tower_metrics::types::{DataSet, DataType, Field, Schema, Value};
//!
//! let schema = Schema::new(vec![
//!     Field::new("agency", DataType::Utf8),
//!     Field::new("allocated_at", DataType::Utf8),
//!     Field::new("amount", DataType::Float64),
//! ]);
//! let ds = DataSet::new(
//!     schema,
//!     vec![
//!         vec![
//!             Value::Utf8("Apex Recovery".into()),
//!             Value::Utf8("2025-01-01 00:00:00".into()),
//!             Value::Float64(10.0),
//!         ],
//!         vec![
//!             Value::Utf8("Zenith Collections".into()),
//!             Value::Utf8("2025-01-02 00:00:00".into()),
//!             Value::Float64(3.0),
//!         ],
//!     ],
//! );
//!
//! let apex = filter(
//!     &ds,
//!     &[("agency", Constraint::Equals(Value::Utf8("Apex Recovery".into())))],
//! );
//! assert_eq!(apex.row_count(), 1);
//!
//! let hits = search(&ds, "zenith", None);
//! assert_eq!(hits.row_count(), 1);
//!
//! let daily = aggregate_by_time(&ds, "allocated_at", "amount", TimeBucket::Day, Aggregation::Sum)
//!     .unwrap();
//! assert_eq!(daily.row_count(), 2);
//! ```
//!
//! ## Modules
//!
//! - [`types`]: schema + in-memory dataset types
//! - [`format`]: currency/date display formatting with sentinel degradation
//! - [`stats`]: percentage and growth math for metric cards
//! - [`processing`]: filter/search/time-bucketed aggregation
//! - [`report`]: CSV report snapshot load/export, with opt-in observability
//! - [`cache`]: explicit TTL cache that query collaborators opt into
//! - [`error`]: error types used across the crate

pub mod cache;
pub mod error;
pub mod format;
pub mod processing;
pub mod report;
pub mod stats;
pub mod types;

pub use error::{MetricsError, MetricsResult};
