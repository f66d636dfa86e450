//! Metadata directory discovery.
//!
//! Lists a single directory level and keeps the regular, visible files whose
//! name ends with the configured extension. Nothing is read at this stage.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::FileExtension;
use crate::probe;

/// A metadata file selected for parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    path: PathBuf,
    extension: String,
}

impl Candidate {
    fn new(path: PathBuf) -> Self {
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { path, extension }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The extension as written in the file name (original case).
    #[must_use]
    pub fn extension(&self) -> &str {
        &self.extension
    }

    #[must_use]
    pub fn into_path(self) -> PathBuf {
        self.path
    }
}

/// Find the candidate metadata files directly inside `directory`.
///
/// A missing `directory`, or a path that is not a directory, yields no
/// candidates. Entries that cannot be listed are skipped. The order of the
/// returned candidates is unspecified.
#[must_use]
pub fn scan(directory: &Path, extension: &FileExtension) -> Vec<Candidate> {
    if !directory.is_dir() {
        debug!(
            directory = %directory.display(),
            "Signer metadata directory does not exist or is not a directory"
        );
        return Vec::new();
    }

    let mut candidates = Vec::new();
    for entry_result in WalkDir::new(directory)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
    {
        let entry = match entry_result {
            Ok(e) => e,
            Err(walk_err) => {
                warn!(
                    directory = %directory.display(),
                    error = %walk_err,
                    "Skipping unreadable signer metadata directory entry"
                );
                continue;
            }
        };

        let path = entry.path();
        if !extension.matches(path) {
            continue;
        }
        if !probe::is_regular_visible_file(path) {
            debug!(path = %path.display(), "Skipping hidden or non-regular metadata entry");
            continue;
        }

        let candidate = Candidate::new(path.to_path_buf());
        debug!(
            path = %candidate.path().display(),
            extension = %candidate.extension(),
            "Found signer metadata file"
        );
        candidates.push(candidate);
    }

    candidates
}
