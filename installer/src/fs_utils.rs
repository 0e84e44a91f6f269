//! Small filesystem helpers shared by the install steps.

use camino::Utf8Path;
use std::fs;
use std::io;

/// Removes `path` if it exists; a missing file is not an error.
///
/// # Errors
///
/// Returns any error other than "not found" from the removal.
pub fn remove_file_if_exists(path: &Utf8Path) -> io::Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(err) => Err(err),
    }
}

/// Copies `from` to `to`, creating any missing parent directories of `to`.
///
/// # Errors
///
/// Returns an error if a parent directory cannot be created or the copy
/// fails.
pub fn copy_creating_parents(from: &Utf8Path, to: &Utf8Path) -> io::Result<u64> {
    if let Some(parent) = to.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(from, to)
}

/// Returns `true` when `root` contains every directory in `required`.
#[must_use]
pub fn has_directories(root: &Utf8Path, required: &[&str]) -> bool {
    required.iter().all(|name| root.join(name).is_dir())
}
