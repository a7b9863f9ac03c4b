//! Report snapshot I/O.
//!
//! Dashboard pages export every filtered table as a CSV download, and ad-hoc
//! scripts re-read those exports. This module loads such a snapshot back into
//! an in-memory [`crate::types::DataSet`] using a caller-provided
//! [`crate::types::Schema`], and writes a dataset out in the same shape.
//!
//! Most callers should use [`load_report_from_path`]; if a
//! [`ReportObserver`] is provided via [`LoadOptions`], success/failure/alerts
//! are reported to it.

pub mod csv;
pub mod observability;

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::error::{MetricsError, MetricsResult};
use crate::types::{DataSet, Schema};

pub use self::csv::{
    load_csv_from_path, load_csv_from_reader, report_to_csv_string, write_report_to_path,
};
pub use self::observability::{
    FileObserver, ReportContext, ReportObserver, ReportSeverity, ReportStats, StdErrObserver,
};

/// Options controlling snapshot loading.
///
/// Use [`Default`] for common cases.
#[derive(Clone, Default)]
pub struct LoadOptions {
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn ReportObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: ReportSeverity,
}

impl fmt::Debug for LoadOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadOptions")
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

/// Load a CSV report snapshot into a [`DataSet`].
///
/// When an observer is configured, this function reports:
///
/// - `on_success` on success, with row count stats
/// - `on_failure` on failure, with a computed severity
/// - `on_alert` on failure when the severity is >= `options.alert_at_or_above`
pub fn load_report_from_path(
    path: impl AsRef<Path>,
    schema: &Schema,
    options: &LoadOptions,
) -> MetricsResult<DataSet> {
    let path = path.as_ref();
    let ctx = ReportContext {
        path: path.to_path_buf(),
    };

    let result = csv::load_csv_from_path(path, schema);

    if let Some(obs) = options.observer.as_ref() {
        match &result {
            Ok(ds) => obs.on_success(&ctx, ReportStats { rows: ds.row_count() }),
            Err(e) => {
                let sev = severity_for_error(e);
                obs.on_failure(&ctx, sev, e);
                if sev >= options.alert_at_or_above {
                    obs.on_alert(&ctx, sev, e);
                }
            }
        }
    }

    result
}

fn severity_for_error(e: &MetricsError) -> ReportSeverity {
    match e {
        MetricsError::Io(_) => ReportSeverity::Critical,
        MetricsError::Csv(err) => match err.kind() {
            ::csv::ErrorKind::Io(_) => ReportSeverity::Critical,
            _ => ReportSeverity::Error,
        },
        _ => ReportSeverity::Error,
    }
}
