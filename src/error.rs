use thiserror::Error;

/// Convenience result type for fallible metrics/report operations.
pub type MetricsResult<T> = Result<T, MetricsError>;

/// Error type shared across the crate.
///
/// Display-oriented helpers (currency/date formatting, percentage, growth,
/// filter, search) never return this: they degrade malformed input to a
/// documented sentinel so one bad record cannot abort a page render. The
/// error surface covers the structural failures: report snapshot I/O, cache
/// key serialization, and uncoercible date cells during time aggregation.
#[derive(Debug, Error)]
pub enum MetricsError {
    /// Underlying I/O error (e.g. snapshot file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV read/write error for report snapshots.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// Cache key arguments failed to serialize.
    #[error("cache key error: {0}")]
    CacheKey(#[from] serde_json::Error),

    /// The input does not conform to the expected column set (missing required
    /// columns, aggregation over a column the dataset does not have, etc.).
    #[error("schema mismatch: {message}")]
    SchemaMismatch { message: String },

    /// A value could not be parsed/coerced into the required
    /// [`crate::types::DataType`].
    #[error("failed to parse value at row {row} column '{column}': {message} (raw='{raw}')")]
    ParseError {
        row: usize,
        column: String,
        raw: String,
        message: String,
    },
}
