//! The parser capability consumed by the loader.
//!
//! The loader never interprets metadata itself. It hands each candidate path
//! to a [`SignerParser`] and only reads the resulting signer's identifier.

use std::path::Path;

use anyhow::Context;
use signer_metadata::{SigningMetadata, read_signing_metadata};

use crate::error::SignerParseError;

/// A loaded signing identity.
pub trait SigningCredential {
    /// Stable identifier of the signer, typically its hex public key.
    fn identifier(&self) -> String;
}

/// Turns one metadata file into a signer.
///
/// Implementations are shared across worker threads.
pub trait SignerParser: Sync {
    type Signer: SigningCredential + Send;

    /// Parse the metadata file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`SignerParseError::InvalidMetadata`] if the file does not
    /// describe a usable key, or [`SignerParseError::Other`] for any other
    /// failure.
    fn parse(&self, path: &Path) -> Result<Self::Signer, SignerParseError>;
}

/// Builds a signer from parsed metadata (key decoding, keystore decryption).
pub trait SignerFactory: Sync {
    type Signer: SigningCredential + Send;

    /// # Errors
    ///
    /// Returns an error if the metadata cannot be turned into a signer.
    fn create(&self, metadata: SigningMetadata) -> anyhow::Result<Self::Signer>;
}

/// [`SignerParser`] for YAML signing metadata documents.
#[derive(Debug, Clone)]
pub struct YamlSignerParser<F> {
    factory: F,
}

impl<F: SignerFactory> YamlSignerParser<F> {
    #[must_use]
    pub fn new(factory: F) -> Self {
        Self { factory }
    }
}

impl<F: SignerFactory> SignerParser for YamlSignerParser<F> {
    type Signer = F::Signer;

    fn parse(&self, path: &Path) -> Result<Self::Signer, SignerParseError> {
        let metadata = read_signing_metadata(path)?;
        let type_name = metadata.type_name();
        let signer = self.factory.create(metadata).with_context(|| {
            format!(
                "Failed to create {type_name} signer from {}",
                path.display()
            )
        })?;
        Ok(signer)
    }
}
