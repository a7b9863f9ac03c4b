use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::MetricsError;

/// Severity classification used for observer callbacks and alerting thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum ReportSeverity {
    /// Informational event.
    Info,
    /// Warning-level event (non-fatal).
    Warning,
    /// Error-level event (operation failed).
    Error,
    /// Critical error (typically I/O or other infrastructure failures).
    #[default]
    Critical,
}

/// Context about a snapshot load attempt.
#[derive(Debug, Clone)]
pub struct ReportContext {
    /// The input path used for loading.
    pub path: PathBuf,
}

/// Minimal stats reported on a successful load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportStats {
    /// Number of loaded rows.
    pub rows: usize,
}

/// Observer interface for snapshot load outcomes.
///
/// Implementors can record metrics, logs, or trigger alerts.
pub trait ReportObserver: Send + Sync {
    /// Called when a load succeeds.
    fn on_success(&self, _ctx: &ReportContext, _stats: ReportStats) {}

    /// Called when a load fails.
    fn on_failure(&self, _ctx: &ReportContext, _severity: ReportSeverity, _error: &MetricsError) {}

    /// Called when a load failure meets an alert threshold.
    ///
    /// Default behavior forwards to [`Self::on_failure`].
    fn on_alert(&self, ctx: &ReportContext, severity: ReportSeverity, error: &MetricsError) {
        self.on_failure(ctx, severity, error)
    }
}

/// Logs snapshot load events to stderr.
#[derive(Debug, Default)]
pub struct StdErrObserver;

impl ReportObserver for StdErrObserver {
    fn on_success(&self, ctx: &ReportContext, stats: ReportStats) {
        eprintln!("[report][ok] path={} rows={}", ctx.path.display(), stats.rows);
    }

    fn on_failure(&self, ctx: &ReportContext, severity: ReportSeverity, error: &MetricsError) {
        eprintln!(
            "[report][{:?}] path={} err={}",
            severity,
            ctx.path.display(),
            error
        );
    }

    fn on_alert(&self, ctx: &ReportContext, severity: ReportSeverity, error: &MetricsError) {
        eprintln!(
            "[ALERT][report][{:?}] path={} err={}",
            severity,
            ctx.path.display(),
            error
        );
    }
}

/// Appends snapshot load events to a local log file.
#[derive(Debug)]
pub struct FileObserver {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileObserver {
    /// Create a file observer that appends events to `path`.
    ///
    /// Writes are best-effort; failures to open/write the log file are ignored.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    fn append_line(&self, line: &str) {
        let _guard = self.lock.lock().ok();
        if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(&self.path) {
            let _ = writeln!(f, "{line}");
        }
    }
}

impl ReportObserver for FileObserver {
    fn on_success(&self, ctx: &ReportContext, stats: ReportStats) {
        self.append_line(&format!(
            "{} ok path={} rows={}",
            unix_ts(),
            ctx.path.display(),
            stats.rows
        ));
    }

    fn on_failure(&self, ctx: &ReportContext, severity: ReportSeverity, error: &MetricsError) {
        self.append_line(&format!(
            "{} fail severity={:?} path={} err={}",
            unix_ts(),
            severity,
            ctx.path.display(),
            error
        ));
    }

    fn on_alert(&self, ctx: &ReportContext, severity: ReportSeverity, error: &MetricsError) {
        self.append_line(&format!(
            "{} ALERT severity={:?} path={} err={}",
            unix_ts(),
            severity,
            ctx.path.display(),
            error
        ));
    }
}

fn unix_ts() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
