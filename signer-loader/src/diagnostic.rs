//! Diagnostics for metadata files that failed to load.
//!
//! A parse failure is reported once, as the file path plus the message of the
//! innermost error in its `source()` chain. Wrapping layers are dropped; they
//! rarely say more than "loading failed".

use std::error::Error;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use serde::Serialize;
use tracing::error;

/// Walk `error`'s `source()` chain to its innermost cause.
///
/// Returns `error` itself if it has no source.
#[must_use]
pub fn root_cause<'a>(error: &'a (dyn Error + 'static)) -> &'a (dyn Error + 'static) {
    let mut current = error;
    while let Some(next) = current.source() {
        current = next;
    }
    current
}

/// One failed metadata file.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[non_exhaustive]
pub struct LoadDiagnostic {
    /// The metadata file that could not be loaded.
    pub path: PathBuf,
    /// Message of the innermost error.
    pub root_cause: String,
}

impl LoadDiagnostic {
    #[must_use]
    pub fn from_error(path: &Path, error: &(dyn Error + 'static)) -> Self {
        Self {
            path: path.to_owned(),
            root_cause: root_cause(error).to_string(),
        }
    }

    /// Format the diagnostic for human-readable output.
    #[must_use]
    pub fn format_human_readable(&self) -> String {
        format!(
            "Error parsing signing metadata file {}: {}",
            self.path.display(),
            self.root_cause
        )
    }
}

/// Receives one diagnostic per failed metadata file.
///
/// Called concurrently from worker threads; delivery order is unspecified.
pub trait DiagnosticSink: Send + Sync {
    fn report(&self, diagnostic: &LoadDiagnostic);
}

/// Emits diagnostics as `tracing` error events.
///
/// Parallel loads report from rayon worker threads, which only see the global
/// subscriber; a subscriber installed with `with_default` on the calling
/// thread receives events from sequential loads only.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, diagnostic: &LoadDiagnostic) {
        error!(
            path = %diagnostic.path.display(),
            cause = %diagnostic.root_cause,
            "{}",
            diagnostic.format_human_readable()
        );
    }
}

/// Keeps diagnostics in memory.
#[derive(Debug, Default)]
pub struct CollectingSink {
    diagnostics: Mutex<Vec<LoadDiagnostic>>,
}

impl CollectingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the diagnostics received so far.
    #[must_use]
    pub fn diagnostics(&self) -> Vec<LoadDiagnostic> {
        self.diagnostics
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn into_diagnostics(self) -> Vec<LoadDiagnostic> {
        self.diagnostics
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl DiagnosticSink for CollectingSink {
    fn report(&self, diagnostic: &LoadDiagnostic) {
        self.diagnostics
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(diagnostic.clone());
    }
}
