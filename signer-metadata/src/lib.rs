//! Signing key metadata documents.
//!
//! Each signing key known to a remote signer is described by one small YAML
//! document. The document says where the key material lives; turning it into
//! a usable signer is left to the consumer.
//!
//! ```yaml
//! type: file-raw
//! privateKey: "3ee2224386c82ffea477e2adf28a2929f5c349165a4196158c7f3a2ecca40f35"
//! ```
//!
//! ```yaml
//! type: file-keystore
//! keystoreFile: keystores/validator_1.json
//! keystorePasswordFile: passwords/validator_1.txt
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Errors raised while reading a signing metadata document.
///
/// This is the "metadata invalid" failure kind: the file was found but does
/// not describe a usable signing key.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SigningMetadataError {
    /// The metadata file could not be read.
    #[error("Failed to read signing metadata file {}", path.display())]
    Io {
        /// The metadata file.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The metadata file is not a valid signing metadata document.
    #[error("Invalid signing metadata in {}: {message}", path.display())]
    Yaml {
        /// The metadata file.
        path: PathBuf,
        /// Parser message (unknown `type`, missing field, malformed YAML, ...).
        message: String,
    },

    /// The metadata file contains no document.
    #[error("Signing metadata file {} is empty", path.display())]
    Empty {
        /// The metadata file.
        path: PathBuf,
    },
}

/// Raw private key material as written in a `file-raw` document.
///
/// The value is opaque here; `Debug` never prints it.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct RawPrivateKey(String);

impl RawPrivateKey {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The key material, exactly as written in the metadata file.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for RawPrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RawPrivateKey(<redacted>)")
    }
}

/// A parsed signing metadata document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
#[non_exhaustive]
pub enum SigningMetadata {
    /// Key material stored inline.
    #[serde(rename_all = "camelCase")]
    FileRaw {
        /// Private key, usually hex encoded.
        private_key: RawPrivateKey,
    },

    /// Key material stored in an encrypted keystore next to its password file.
    #[serde(rename_all = "camelCase")]
    FileKeystore {
        /// Path to the keystore file.
        keystore_file: PathBuf,
        /// Path to the file holding the keystore password.
        keystore_password_file: PathBuf,
    },
}

impl SigningMetadata {
    /// Parse a metadata document from YAML text.
    ///
    /// `origin` is only used to label errors.
    ///
    /// # Errors
    ///
    /// Returns [`SigningMetadataError::Empty`] if `content` holds no document and
    /// [`SigningMetadataError::Yaml`] if it is not a valid metadata document.
    pub fn from_yaml_str(content: &str, origin: &Path) -> Result<Self, SigningMetadataError> {
        if is_blank_document(content) {
            return Err(SigningMetadataError::Empty {
                path: origin.to_owned(),
            });
        }

        serde_saphyr::from_str::<Self>(content).map_err(|e| SigningMetadataError::Yaml {
            path: origin.to_owned(),
            message: e.to_string(),
        })
    }

    /// The metadata type tag as written in the document.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::FileRaw { .. } => "file-raw",
            Self::FileKeystore { .. } => "file-keystore",
        }
    }

    /// Resolve relative keystore paths against `base_dir`.
    ///
    /// Absolute paths and `file-raw` documents are returned unchanged.
    #[must_use]
    pub fn resolve_paths(self, base_dir: &Path) -> Self {
        match self {
            Self::FileKeystore {
                keystore_file,
                keystore_password_file,
            } => Self::FileKeystore {
                keystore_file: resolve(base_dir, keystore_file),
                keystore_password_file: resolve(base_dir, keystore_password_file),
            },
            raw @ Self::FileRaw { .. } => raw,
        }
    }
}

fn resolve(base_dir: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        base_dir.join(path)
    }
}

/// Blank or comment-only content.
fn is_blank_document(content: &str) -> bool {
    content.lines().all(|line| {
        let trimmed = line.trim();
        trimmed.is_empty() || trimmed.starts_with('#') || trimmed == "---"
    })
}

/// Read and parse the metadata document at `path`.
///
/// Relative keystore paths in the document are resolved against the directory
/// containing `path`.
///
/// # Errors
///
/// Returns [`SigningMetadataError::Io`] if the file cannot be read, otherwise
/// the errors of [`SigningMetadata::from_yaml_str`].
pub fn read_signing_metadata(path: &Path) -> Result<SigningMetadata, SigningMetadataError> {
    let content = std::fs::read_to_string(path).map_err(|source| SigningMetadataError::Io {
        path: path.to_owned(),
        source,
    })?;

    let metadata = SigningMetadata::from_yaml_str(&content, path)?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
    Ok(metadata.resolve_paths(base_dir))
}
