//! File attribute checks used while scanning the metadata directory.

use std::path::Path;

/// Whether `path` is hidden by platform convention.
///
/// Dot-prefixed names on Unix-like systems, the hidden attribute on Windows.
/// Returns `false` if the attribute cannot be read.
#[must_use]
pub fn is_hidden(path: &Path) -> bool {
    platform::is_hidden(path)
}

/// Whether `path` is a regular file (following symlinks) that is not hidden.
#[must_use]
pub fn is_regular_visible_file(path: &Path) -> bool {
    let is_file = std::fs::metadata(path).is_ok_and(|m| m.is_file());
    is_file && !is_hidden(path)
}

#[cfg(not(windows))]
mod platform {
    use std::path::Path;

    pub(super) fn is_hidden(path: &Path) -> bool {
        path.file_name()
            .is_some_and(|name| name.as_encoded_bytes().starts_with(b"."))
    }
}

#[cfg(windows)]
mod platform {
    use std::os::windows::fs::MetadataExt;
    use std::path::Path;

    const FILE_ATTRIBUTE_HIDDEN: u32 = 0x2;

    pub(super) fn is_hidden(path: &Path) -> bool {
        std::fs::symlink_metadata(path)
            .is_ok_and(|m| m.file_attributes() & FILE_ATTRIBUTE_HIDDEN != 0)
    }
}
