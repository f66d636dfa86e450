//! Accumulates successfully loaded signers.

use std::sync::{Mutex, PoisonError};

use crate::task::ParseOutcome;

/// Lock-guarded collection of loaded signers.
///
/// Shared by reference across worker threads. Failures handed to it are
/// dropped; they are diagnosed before they get here.
#[derive(Debug)]
pub struct ResultAggregator<S> {
    signers: Mutex<Vec<S>>,
}

impl<S> Default for ResultAggregator<S> {
    fn default() -> Self {
        Self {
            signers: Mutex::new(Vec::new()),
        }
    }
}

impl<S> ResultAggregator<S> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep the signer of a successful outcome; drop a failure.
    pub fn accept(&self, outcome: ParseOutcome<S>) {
        if let ParseOutcome::Success { signer, .. } = outcome {
            self.signers
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(signer);
        }
    }

    /// Number of signers collected so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.signers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn into_signers(self) -> Vec<S> {
        self.signers
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Collect the signers of every successful outcome.
    #[must_use]
    pub fn collect(outcomes: impl IntoIterator<Item = ParseOutcome<S>>) -> Vec<S> {
        let aggregator = Self::new();
        for outcome in outcomes {
            aggregator.accept(outcome);
        }
        aggregator.into_signers()
    }
}
