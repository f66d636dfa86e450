//! Configuration types for signer loading.
//!
//! Plain structs with defaults, mutated field by field by the caller. Every
//! type here also deserializes so a signing service can embed the loader
//! section in its own configuration file.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default metadata file extension.
pub const DEFAULT_EXTENSION: &str = "yaml";

/// A metadata file extension, matched case-insensitively.
///
/// Stored lowercased and without a leading dot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FileExtension(String);

impl FileExtension {
    /// Build an extension from user input such as `yaml`, `YAML` or `.yaml`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyExtension`] if nothing is left after trimming
    /// whitespace and a single leading dot, and [`ConfigError::InvalidExtension`]
    /// if the extension contains a path separator.
    pub fn new(extension: &str) -> Result<Self, ConfigError> {
        let trimmed = extension.trim();
        let trimmed = trimmed.strip_prefix('.').unwrap_or(trimmed);
        if trimmed.is_empty() {
            return Err(ConfigError::EmptyExtension);
        }
        if trimmed.contains(['/', '\\']) {
            return Err(ConfigError::InvalidExtension(extension.to_owned()));
        }
        Ok(Self(trimmed.to_lowercase()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the file name of `path` ends with `.` followed by this extension,
    /// ignoring case.
    #[must_use]
    pub fn matches(&self, path: &Path) -> bool {
        let Some(name) = path.file_name() else {
            return false;
        };
        let name = name.to_string_lossy().to_lowercase();
        name.strip_suffix(self.0.as_str())
            .is_some_and(|stem| stem.ends_with('.'))
    }
}

impl Default for FileExtension {
    fn default() -> Self {
        Self(DEFAULT_EXTENSION.to_owned())
    }
}

impl fmt::Display for FileExtension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for FileExtension {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for FileExtension {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<FileExtension> for String {
    fn from(value: FileExtension) -> Self {
        value.0
    }
}

/// How candidate files are parsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub enum Concurrency {
    /// One file after another on the calling thread.
    Sequential,
    /// Files are parsed in parallel on the rayon global pool (default).
    #[default]
    Parallel,
}

/// Signer loader options.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
#[non_exhaustive]
pub struct LoaderConfig {
    /// Directory holding one metadata file per signing key. Required.
    ///
    /// A directory that does not exist is not an error; it simply yields no
    /// signers.
    pub directory: PathBuf,
    /// Metadata file extension (default: `yaml`).
    pub extension: FileExtension,
    /// Parsing strategy (default: parallel).
    pub concurrency: Concurrency,
}

impl LoaderConfig {
    /// Config for `directory` with every other option at its default.
    #[must_use]
    pub fn for_directory(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            ..Self::default()
        }
    }

    /// Check the options that cannot be enforced by their types.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingDirectory`] if `directory` is empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.directory.as_os_str().is_empty() {
            return Err(ConfigError::MissingDirectory);
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_is_normalized() {
        assert_eq!(FileExtension::new("YAML").unwrap().as_str(), "yaml");
        assert_eq!(FileExtension::new(".yaml").unwrap().as_str(), "yaml");
        assert_eq!(FileExtension::new(" json ").unwrap().as_str(), "json");
    }

    #[test]
    fn test_extension_rejects_empty() {
        assert_eq!(FileExtension::new(""), Err(ConfigError::EmptyExtension));
        assert_eq!(FileExtension::new("."), Err(ConfigError::EmptyExtension));
        assert_eq!(FileExtension::new("  "), Err(ConfigError::EmptyExtension));
    }

    #[test]
    fn test_extension_rejects_separator() {
        assert!(matches!(
            FileExtension::new("keys/yaml"),
            Err(ConfigError::InvalidExtension(_))
        ));
    }

    #[test]
    fn test_extension_matches_case_insensitively() {
        let ext = FileExtension::new("yaml").unwrap();
        assert!(ext.matches(Path::new("keys/validator.yaml")));
        assert!(ext.matches(Path::new("keys/VALIDATOR.YAML")));
        assert!(ext.matches(Path::new("keys/validator.Yaml")));
    }

    #[test]
    fn test_extension_requires_dot_before_suffix() {
        let ext = FileExtension::new("yaml").unwrap();
        assert!(!ext.matches(Path::new("keys/validatoryaml")));
        assert!(!ext.matches(Path::new("keys/validator.yml")));
        assert!(!ext.matches(Path::new("keys/validator.yaml.bak")));
        assert!(!ext.matches(Path::new("keys/validator.nothing")));
    }

    #[test]
    fn test_multi_part_extension() {
        let ext = FileExtension::new("key.yaml").unwrap();
        assert!(ext.matches(Path::new("validator.KEY.yaml")));
        assert!(!ext.matches(Path::new("validator.yaml")));
    }

    #[test]
    fn test_default_config() {
        let config = LoaderConfig::default();
        assert_eq!(config.extension.as_str(), DEFAULT_EXTENSION);
        assert_eq!(config.concurrency, Concurrency::Parallel);
        assert_eq!(config.validate(), Err(ConfigError::MissingDirectory));
    }

    #[test]
    fn test_for_directory_validates() {
        let config = LoaderConfig::for_directory("/etc/signer/keys");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_deserialize_from_yaml() {
        let yaml = "directory: /etc/signer/keys\nextension: YML\nconcurrency: sequential\n";
        let config: LoaderConfig = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.directory, PathBuf::from("/etc/signer/keys"));
        assert_eq!(config.extension.as_str(), "yml");
        assert_eq!(config.concurrency, Concurrency::Sequential);
    }

    #[test]
    fn test_deserialize_rejects_empty_extension() {
        let yaml = "directory: /etc/signer/keys\nextension: \"\"\n";
        assert!(serde_saphyr::from_str::<LoaderConfig>(yaml).is_err());
    }

    #[test]
    fn test_deserialize_rejects_unknown_keys() {
        let yaml = "directory: /etc/signer/keys\nrecursive: true\n";
        assert!(serde_saphyr::from_str::<LoaderConfig>(yaml).is_err());
    }
}
