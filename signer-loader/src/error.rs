//! Error types for signer loading.

use signer_metadata::SigningMetadataError;
use thiserror::Error;

/// Failure raised by a [`SignerParser`](crate::SignerParser) for one metadata file.
///
/// Every variant keeps its full `source()` chain so diagnostics can report the
/// innermost cause.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SignerParseError {
    /// The file does not describe a usable signing key.
    #[error(transparent)]
    InvalidMetadata(#[from] SigningMetadataError),

    /// Any other failure while turning the file into a signer.
    #[error(transparent)]
    Other(#[from] anyhow::Error),

    /// The parser panicked while handling the file.
    #[error("Signer parser panicked: {message}")]
    Panicked {
        /// Panic payload, when it was a string.
        message: String,
    },
}

/// Invalid loader configuration, detected before any file is touched.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    /// The metadata file extension is empty.
    #[error("Signer metadata file extension must not be empty")]
    EmptyExtension,

    /// The metadata file extension contains a path separator.
    #[error("Signer metadata file extension '{0}' must not contain a path separator")]
    InvalidExtension(String),

    /// No metadata directory was configured.
    #[error("No signer metadata directory configured")]
    MissingDirectory,
}
