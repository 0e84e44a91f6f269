//! Error types for the theme installer.
//!
//! Every fatal condition in the install pipeline is one of these variants.
//! Nothing below `main` terminates the process; errors propagate to the
//! binary, which prints them (usage errors after the usage text) and exits
//! with a failure status.

use camino::Utf8PathBuf;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while installing a theme.
#[derive(Debug, Error)]
pub enum InstallerError {
    /// The working directory is not the root of a Rails project.
    #[error("must be in the Rails root directory to use railsthemes (no app/ and public/ in {path})")]
    NotProjectRoot {
        /// Directory that was checked.
        path: Utf8PathBuf,
    },

    /// Arguments were missing or did not describe an install source.
    #[error("{message}")]
    Usage {
        /// Explanation of what was expected.
        message: String,
    },

    /// An archive given with `--file` does not exist.
    #[error("cannot find the file you specified: {path}")]
    SourceNotFound {
        /// Path that was given.
        path: Utf8PathBuf,
    },

    /// The archive tool could not unpack the theme archive.
    #[error("failed to extract {archive}: {reason}")]
    Extraction {
        /// Archive being extracted.
        archive: Utf8PathBuf,
        /// Description of the failure, usually the tool's stderr.
        reason: String,
    },

    /// An existing project file could not be moved aside.
    #[error("failed to back up {path} to {path}.old")]
    Backup {
        /// Project file that was being backed up.
        path: Utf8PathBuf,
        /// The underlying rename error.
        #[source]
        source: std::io::Error,
    },

    /// A theme file could not be copied into the project.
    #[error("failed to copy {from} to {to}")]
    Copy {
        /// Source file inside the theme.
        from: Utf8PathBuf,
        /// Destination inside the project.
        to: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The theme source directory could not be walked.
    #[error("failed to list files under {root}: {reason}")]
    Manifest {
        /// Root of the walk.
        root: Utf8PathBuf,
        /// Description of the walk failure.
        reason: String,
    },

    /// A path involved in the install is not valid UTF-8.
    #[error("path is not valid UTF-8: {}", path.display())]
    NonUtf8Path {
        /// The offending path.
        path: PathBuf,
    },

    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl InstallerError {
    /// Builds a usage error from a message.
    #[must_use]
    pub fn usage(message: impl Into<String>) -> Self {
        Self::Usage {
            message: message.into(),
        }
    }

    /// Returns `true` when the usage text should be shown before the error.
    #[must_use]
    pub const fn is_usage(&self) -> bool {
        matches!(self, Self::Usage { .. })
    }
}

/// Result type alias using [`InstallerError`].
pub type Result<T> = std::result::Result<T, InstallerError>;
