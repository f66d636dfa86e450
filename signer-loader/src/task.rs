//! A single parse attempt for one candidate file.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};

use crate::diagnostic::LoadDiagnostic;
use crate::error::SignerParseError;
use crate::parser::SignerParser;
use crate::scanner::Candidate;

/// A failed parse attempt, with the full error chain.
#[derive(Debug)]
pub struct ParseFailure {
    pub path: PathBuf,
    pub error: SignerParseError,
}

impl ParseFailure {
    #[must_use]
    pub fn diagnostic(&self) -> LoadDiagnostic {
        LoadDiagnostic::from_error(&self.path, &self.error)
    }
}

/// Result of running one [`ParseTask`].
#[derive(Debug)]
pub enum ParseOutcome<S> {
    Success { path: PathBuf, signer: S },
    Failure(ParseFailure),
}

impl<S> ParseOutcome<S> {
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Success { path, .. } => path,
            Self::Failure(failure) => &failure.path,
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// One candidate paired with the parser that will handle it.
pub struct ParseTask<'p, P> {
    candidate: Candidate,
    parser: &'p P,
}

impl<'p, P: SignerParser> ParseTask<'p, P> {
    #[must_use]
    pub fn new(candidate: Candidate, parser: &'p P) -> Self {
        Self { candidate, parser }
    }

    /// Run the parser on the candidate.
    ///
    /// Never fails and never panics: parser errors and panics both end up in
    /// [`ParseOutcome::Failure`].
    #[must_use]
    pub fn run(self) -> ParseOutcome<P::Signer> {
        let path = self.candidate.into_path();
        let parser = self.parser;
        let result = panic::catch_unwind(AssertUnwindSafe(|| parser.parse(&path)))
            .unwrap_or_else(|payload| {
                Err(SignerParseError::Panicked {
                    message: panic_message(payload.as_ref()),
                })
            });

        match result {
            Ok(signer) => ParseOutcome::Success { path, signer },
            Err(error) => ParseOutcome::Failure(ParseFailure { path, error }),
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_owned()
    }
}
