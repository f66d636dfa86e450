//! # signer-loader
//!
//! Bulk loading of signing keys from a directory of metadata files.
//!
//! The loader lists one directory, keeps the visible files whose name ends in
//! the configured extension (case-insensitive), and hands each one to a
//! [`SignerParser`]. Files that fail to parse are reported once through a
//! [`DiagnosticSink`] and left out; they never stop the rest of the batch.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use signer_loader::{
//!     LoaderConfig, SignerFactory, SignerLoader, SigningCredential, SigningMetadata,
//!     YamlSignerParser,
//! };
//!
//! struct Signer(String);
//!
//! impl SigningCredential for Signer {
//!     fn identifier(&self) -> String {
//!         self.0.clone()
//!     }
//! }
//!
//! struct Factory;
//!
//! impl SignerFactory for Factory {
//!     type Signer = Signer;
//!
//!     fn create(&self, metadata: SigningMetadata) -> anyhow::Result<Signer> {
//!         Ok(Signer(metadata.type_name().to_owned()))
//!     }
//! }
//!
//! let loader = SignerLoader::new(LoaderConfig::for_directory("/etc/signer/keys")).unwrap();
//! let signers = loader.load(&YamlSignerParser::new(Factory));
//! println!("Loaded {} signers", signers.len());
//! ```

mod aggregator;
mod config;
mod diagnostic;
mod error;
mod executor;
mod loader;
pub mod output;
mod parser;
mod probe;
mod report;
mod scanner;
mod task;

pub use aggregator::ResultAggregator;
pub use config::{Concurrency, DEFAULT_EXTENSION, FileExtension, LoaderConfig};
pub use diagnostic::{CollectingSink, DiagnosticSink, LoadDiagnostic, TracingSink, root_cause};
pub use error::{ConfigError, SignerParseError};
pub use loader::{SignerLoader, load};
pub use parser::{SignerFactory, SignerParser, SigningCredential, YamlSignerParser};
pub use probe::{is_hidden, is_regular_visible_file};
pub use report::{LoadReport, LoadSummary};
pub use scanner::{Candidate, scan};
pub use signer_metadata::{SigningMetadata, SigningMetadataError};
pub use task::{ParseFailure, ParseOutcome, ParseTask};
