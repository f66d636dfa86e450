#![allow(clippy::unwrap_used)]
//! End-to-end tests: `SignerLoader` driving `YamlSignerParser` over real files.

use std::fs;
use std::path::Path;

use signer_loader::{
    CollectingSink, LoaderConfig, SignerFactory, SignerLoader, SigningCredential, SigningMetadata,
    YamlSignerParser,
};
use tempfile::TempDir;

const PRIVATE_KEY1: &str = "3ee2224386c82ffea477e2adf28a2929f5c349165a4196158c7f3a2ecca40f35";
const PRIVATE_KEY2: &str = "25295f0d1d592a90b333e26e85149708208e9f8e8bc18f6c77bd62f8ad7a6866";

struct KeySigner {
    identifier: String,
}

impl SigningCredential for KeySigner {
    fn identifier(&self) -> String {
        self.identifier.clone()
    }
}

/// Stands in for real key derivation: the identifier is the raw key reversed.
struct ReversingFactory;

impl SignerFactory for ReversingFactory {
    type Signer = KeySigner;

    fn create(&self, metadata: SigningMetadata) -> anyhow::Result<KeySigner> {
        match metadata {
            SigningMetadata::FileRaw { private_key } => Ok(KeySigner {
                identifier: format!("0x{}", private_key.expose().chars().rev().collect::<String>()),
            }),
            SigningMetadata::FileKeystore { keystore_file, .. } => {
                let content = fs::read_to_string(&keystore_file).map_err(|e| {
                    anyhow::Error::new(e)
                        .context(format!("Unable to read keystore {}", keystore_file.display()))
                })?;
                Ok(KeySigner {
                    identifier: format!("0x{}", content.trim()),
                })
            }
            other => anyhow::bail!("unsupported metadata type {}", other.type_name()),
        }
    }
}

fn raw_metadata(private_key: &str) -> String {
    format!("type: file-raw\nprivateKey: \"{private_key}\"\n")
}

fn reversed(key: &str) -> String {
    format!("0x{}", key.chars().rev().collect::<String>())
}

fn load(dir: &Path) -> (Vec<String>, CollectingSink) {
    let loader = SignerLoader::new(LoaderConfig::for_directory(dir)).unwrap();
    let sink = CollectingSink::new();
    let signers = loader.load_with_sink(&YamlSignerParser::new(ReversingFactory), &sink);
    let mut ids: Vec<String> = signers.iter().map(SigningCredential::identifier).collect();
    ids.sort();
    (ids, sink)
}

#[test]
fn test_loads_raw_metadata_files() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("one.yaml"), raw_metadata(PRIVATE_KEY1)).unwrap();
    fs::write(tmp.path().join("TWO.YAML"), raw_metadata(PRIVATE_KEY2)).unwrap();

    let (ids, sink) = load(tmp.path());

    let mut expected = vec![reversed(PRIVATE_KEY1), reversed(PRIVATE_KEY2)];
    expected.sort();
    assert_eq!(ids, expected);
    assert!(sink.diagnostics().is_empty());
}

#[test]
fn test_invalid_metadata_files_are_not_loaded() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("empty.yaml"), "").unwrap();
    fs::write(tmp.path().join("unknown.yaml"), "type: remote-vault\n").unwrap();

    let (ids, sink) = load(tmp.path());

    assert!(ids.is_empty());
    let mut diagnostics = sink.into_diagnostics();
    diagnostics.sort_by(|a, b| a.path.cmp(&b.path));
    assert_eq!(diagnostics.len(), 2);
    assert!(diagnostics[0].path.ends_with("empty.yaml"));
    assert!(diagnostics[0].root_cause.contains("is empty"));
    assert!(diagnostics[1].path.ends_with("unknown.yaml"));
    assert!(diagnostics[1].root_cause.contains("Invalid signing metadata"));
}

#[test]
fn test_keystore_paths_resolve_next_to_metadata() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("keystore.json"), "abc123\n").unwrap();
    fs::write(
        tmp.path().join("validator.yaml"),
        "type: file-keystore\nkeystoreFile: keystore.json\nkeystorePasswordFile: password.txt\n",
    )
    .unwrap();

    let (ids, sink) = load(tmp.path());

    assert_eq!(ids, vec!["0xabc123".to_owned()]);
    assert!(sink.diagnostics().is_empty());
}

#[test]
fn test_factory_failure_reports_innermost_cause() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("validator.yaml"),
        "type: file-keystore\nkeystoreFile: missing.json\nkeystorePasswordFile: password.txt\n",
    )
    .unwrap();
    fs::write(tmp.path().join("other.yaml"), raw_metadata(PRIVATE_KEY1)).unwrap();

    let (ids, sink) = load(tmp.path());

    assert_eq!(ids, vec![reversed(PRIVATE_KEY1)]);
    let diagnostics = sink.into_diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics[0].path.ends_with("validator.yaml"));
    // The I/O error, not the "Failed to create" or "Unable to read" wrappers.
    assert!(!diagnostics[0].root_cause.contains("Failed to create"));
    assert!(!diagnostics[0].root_cause.contains("Unable to read keystore"));
    let not_found = fs::read_to_string(tmp.path().join("missing.json")).unwrap_err();
    assert_eq!(diagnostics[0].root_cause, not_found.to_string());
}

#[test]
fn test_files_are_not_modified() {
    let tmp = TempDir::new().unwrap();
    let good = tmp.path().join("good.yaml");
    let bad = tmp.path().join("bad.yaml");
    fs::write(&good, raw_metadata(PRIVATE_KEY1)).unwrap();
    fs::write(&bad, "type: [unclosed\n").unwrap();

    let _ = load(tmp.path());

    assert_eq!(fs::read_to_string(&good).unwrap(), raw_metadata(PRIVATE_KEY1));
    assert_eq!(fs::read_to_string(&bad).unwrap(), "type: [unclosed\n");
}
