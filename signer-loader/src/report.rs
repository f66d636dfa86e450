//! Load report types.

use std::path::PathBuf;

use serde::Serialize;

use crate::parser::SigningCredential;

/// Result of one load run.
///
/// `candidates == loaded() + failed` always holds. Why a given file failed is
/// only available from the diagnostic sink.
#[derive(Debug)]
#[non_exhaustive]
pub struct LoadReport<S> {
    /// The scanned directory.
    pub directory: PathBuf,
    /// Files that matched the extension filter and were attempted.
    pub candidates: usize,
    /// Candidates whose parse failed.
    pub failed: usize,
    /// Loaded signers, in no particular order.
    pub signers: Vec<S>,
}

impl<S> LoadReport<S> {
    /// Number of signers loaded.
    #[must_use]
    pub fn loaded(&self) -> usize {
        self.signers.len()
    }

    /// Whether every candidate loaded.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failed == 0
    }

    #[must_use]
    pub fn into_signers(self) -> Vec<S> {
        self.signers
    }
}

impl<S: SigningCredential> LoadReport<S> {
    /// Serializable view of the report, with sorted signer identifiers.
    #[must_use]
    pub fn summary(&self) -> LoadSummary {
        let mut identifiers: Vec<String> = self
            .signers
            .iter()
            .map(SigningCredential::identifier)
            .collect();
        identifiers.sort();

        LoadSummary {
            directory: self.directory.clone(),
            candidates: self.candidates,
            loaded: self.loaded(),
            failed: self.failed,
            ok: self.is_complete(),
            identifiers,
        }
    }
}

/// Counters and identifiers of a load run.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[non_exhaustive]
pub struct LoadSummary {
    pub directory: PathBuf,
    pub candidates: usize,
    pub loaded: usize,
    pub failed: usize,
    /// Whether no candidate failed.
    pub ok: bool,
    /// Identifiers of the loaded signers, sorted, duplicates kept.
    pub identifiers: Vec<String>,
}
