//! Per-file diagnostics for a single generation run.

use std::fmt;
use std::path::Path;

use tracing::{debug, info, warn};

/// Records the non-fatal, per-file failures encountered while collecting a
/// notebook.
///
/// Passed explicitly to everything that can skip a file, instead of living in
/// process-wide state. Failures are reported through `tracing` as they happen
/// and tallied so the run can finish with a summary; they never abort
/// collection.
#[derive(Debug, Default)]
pub struct Diagnostics {
    skipped: usize,
    warnings: usize,
}

impl Diagnostics {
    pub fn new() -> Diagnostics {
        Diagnostics::default()
    }

    /// Records a file that could not be read and was left out of the notebook.
    pub fn skip(&mut self, path: &Path, reason: impl fmt::Display) {
        self.skipped += 1;
        debug!(path = %path.display(), %reason, "skipping unreadable file");
    }

    /// Records a recoverable oddity; the run continues with defaults.
    pub fn warn(&mut self, path: &Path, reason: impl fmt::Display) {
        self.warnings += 1;
        warn!(path = %path.display(), %reason, "problem while collecting");
    }

    /// The number of files skipped so far.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// The number of warnings recorded so far.
    pub fn warnings(&self) -> usize {
        self.warnings
    }

    /// Emits a single end-of-run summary event.
    pub fn summarize(&self) {
        if self.skipped == 0 && self.warnings == 0 {
            debug!("collection finished cleanly");
            return;
        }

        info!(
            skipped = self.skipped,
            warnings = self.warnings,
            "collection finished with diagnostics"
        );
    }
}
