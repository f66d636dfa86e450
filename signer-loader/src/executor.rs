//! Runs parse tasks with per-file fault isolation.
//!
//! Each candidate is parsed independently. A failure is turned into exactly
//! one diagnostic and never reaches sibling tasks or the caller.

use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;
use tracing::debug;

use crate::aggregator::ResultAggregator;
use crate::config::Concurrency;
use crate::diagnostic::DiagnosticSink;
use crate::parser::{SignerParser, SigningCredential};
use crate::scanner::Candidate;
use crate::task::{ParseOutcome, ParseTask};

/// Parse every candidate, feeding successes into `aggregator` and failures
/// into `sink`.
///
/// Returns the number of failed candidates.
#[must_use]
pub fn execute<P: SignerParser>(
    candidates: Vec<Candidate>,
    parser: &P,
    concurrency: Concurrency,
    sink: &dyn DiagnosticSink,
    aggregator: &ResultAggregator<P::Signer>,
) -> usize {
    let failed = AtomicUsize::new(0);
    let handle = |candidate: Candidate| {
        let outcome = ParseTask::new(candidate, parser).run();
        match &outcome {
            ParseOutcome::Success { path, signer } => {
                debug!(
                    path = %path.display(),
                    identifier = %signer.identifier(),
                    "Loaded signer"
                );
            }
            ParseOutcome::Failure(failure) => {
                failed.fetch_add(1, Ordering::Relaxed);
                sink.report(&failure.diagnostic());
            }
        }
        aggregator.accept(outcome);
    };

    match concurrency {
        Concurrency::Sequential => {
            for candidate in candidates {
                handle(candidate);
            }
        }
        Concurrency::Parallel => candidates.into_par_iter().for_each(handle),
    }

    failed.into_inner()
}
