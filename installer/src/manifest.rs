//! File manifests for theme sources.
//!
//! A manifest is the flat list of files under a theme directory, relative to
//! that directory. It is computed fresh for every install and never stored.

use crate::error::{InstallerError, Result};
use camino::{Utf8Path, Utf8PathBuf};
use log::trace;
use walkdir::WalkDir;

/// The files an install run will copy, relative to the source root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileManifest {
    entries: Vec<Utf8PathBuf>,
}

impl FileManifest {
    /// Returns the relative paths in processing order.
    #[must_use]
    pub fn entries(&self) -> &[Utf8PathBuf] {
        &self.entries
    }

    /// Returns the number of files in the manifest.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when the source contained no files.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the relative paths.
    pub fn iter(&self) -> std::slice::Iter<'_, Utf8PathBuf> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a FileManifest {
    type Item = &'a Utf8PathBuf;
    type IntoIter = std::slice::Iter<'a, Utf8PathBuf>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Lists every non-directory entry under `source_root`, dotfiles included.
///
/// Entries are sorted by file name within each directory so output is
/// stable. Anything that resolves to a directory (including a symlink to
/// one) is left out; other symlinks are listed like regular files.
///
/// # Errors
///
/// Returns [`InstallerError::Manifest`] if part of the tree cannot be read,
/// or [`InstallerError::NonUtf8Path`] for a file name that is not UTF-8.
pub fn build_manifest(source_root: &Utf8Path) -> Result<FileManifest> {
    let mut entries = Vec::new();

    for entry in WalkDir::new(source_root).min_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|err| InstallerError::Manifest {
            root: source_root.to_owned(),
            reason: err.to_string(),
        })?;

        if entry.path().is_dir() {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(source_root)
            .map_err(|err| InstallerError::Manifest {
                root: source_root.to_owned(),
                reason: err.to_string(),
            })?;
        let relative = Utf8Path::from_path(relative).ok_or_else(|| InstallerError::NonUtf8Path {
            path: entry.path().to_path_buf(),
        })?;

        trace!("manifest entry {relative}");
        entries.push(relative.to_owned());
    }

    Ok(FileManifest { entries })
}
