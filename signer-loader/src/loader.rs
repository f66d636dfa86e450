//! The batch loader: scan, parse, aggregate.

use std::path::Path;

use tracing::info;

use crate::aggregator::ResultAggregator;
use crate::config::{Concurrency, FileExtension, LoaderConfig};
use crate::diagnostic::{DiagnosticSink, TracingSink};
use crate::error::ConfigError;
use crate::executor;
use crate::parser::SignerParser;
use crate::report::LoadReport;
use crate::scanner;

/// Load every signer described in `directory`, logging failures through
/// `tracing`.
///
/// Files are matched on `extension` regardless of case; hidden files are
/// skipped. A missing directory yields an empty result. The order of the
/// returned signers is unspecified and signers sharing an identifier are all
/// kept.
#[must_use]
pub fn load<P: SignerParser>(
    directory: &Path,
    extension: &FileExtension,
    parser: &P,
) -> Vec<P::Signer> {
    SignerLoader::unchecked(directory, extension).load(parser)
}

/// Loads every signer described in a metadata directory.
///
/// Loading never fails as a whole: missing directories yield nothing and each
/// file that cannot be parsed is reported to the diagnostic sink and left
/// out. Each call rescans the directory from scratch.
#[derive(Debug, Clone)]
pub struct SignerLoader {
    config: LoaderConfig,
}

impl SignerLoader {
    /// # Errors
    ///
    /// Returns an error if `config` fails [`LoaderConfig::validate`].
    pub fn new(config: LoaderConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    fn unchecked(directory: &Path, extension: &FileExtension) -> Self {
        let mut config = LoaderConfig::for_directory(directory);
        config.extension = extension.clone();
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Load signers, logging failures through `tracing`.
    #[must_use]
    pub fn load<P: SignerParser>(&self, parser: &P) -> Vec<P::Signer> {
        self.load_report(parser, &TracingSink).into_signers()
    }

    /// Load signers, sending one diagnostic per failed file to `sink`.
    #[must_use]
    pub fn load_with_sink<P: SignerParser>(
        &self,
        parser: &P,
        sink: &dyn DiagnosticSink,
    ) -> Vec<P::Signer> {
        self.load_report(parser, sink).into_signers()
    }

    /// Load signers and report how many candidates were attempted and failed.
    #[must_use]
    pub fn load_report<P: SignerParser>(
        &self,
        parser: &P,
        sink: &dyn DiagnosticSink,
    ) -> LoadReport<P::Signer> {
        let directory = &self.config.directory;
        let candidates = scanner::scan(directory, &self.config.extension);
        let candidate_count = candidates.len();

        let aggregator = ResultAggregator::new();
        let failed = executor::execute(
            candidates,
            parser,
            self.config.concurrency,
            sink,
            &aggregator,
        );
        let signers = aggregator.into_signers();

        info!(
            directory = %directory.display(),
            extension = %self.config.extension,
            parallel = self.config.concurrency == Concurrency::Parallel,
            candidates = candidate_count,
            loaded = signers.len(),
            failed,
            "Signer loading complete"
        );

        LoadReport {
            directory: directory.clone(),
            candidates: candidate_count,
            failed,
            signers,
        }
    }
}
