//! Install source resolution.
//!
//! The single CLI argument is turned into an [`InstallSource`] exactly once;
//! the orchestrator then matches on it and never re-inspects the raw path.

use crate::archive::ArchiveKind;
use crate::error::{InstallerError, Result};
use camino::{Utf8Path, Utf8PathBuf};

/// Explanation shown when `--file` is given without a path.
pub const MISSING_FILE_MESSAGE: &str = "The parameter --file means we need another parameter after it to specify what file to load from.";

/// Explanation shown when no download code is given.
pub const MISSING_CODE_MESSAGE: &str = "railsthemes expects the download code that you got from the website as a parameter in order to download the theme you bought.";

/// Explanation shown when `--file` names neither a directory nor an archive.
pub const UNRECOGNISED_SOURCE_MESSAGE: &str =
    "Need to specify either a directory or an archive file when --file is used.";

/// What the user asked the `install` subcommand to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallRequest {
    /// `install --help`.
    Help,
    /// `install --file [PATH]`.
    File(Option<Utf8PathBuf>),
    /// `install [CODE]`.
    Code(Option<String>),
}

/// Where the theme files come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallSource {
    /// An unpacked theme directory.
    Directory(Utf8PathBuf),
    /// A theme tarball on disk.
    Archive {
        /// Path to the archive.
        path: Utf8PathBuf,
        /// Compression detected from the suffix.
        kind: ArchiveKind,
    },
    /// A download code from the website.
    RemoteCode(String),
}

impl InstallSource {
    /// Classifies a `--file` path.
    ///
    /// Directories win over archive suffixes, so a directory named
    /// `theme.tar` is installed as a directory.
    ///
    /// # Errors
    ///
    /// Returns [`InstallerError::SourceNotFound`] for an archive path that
    /// does not exist, and a usage error for anything that is neither a
    /// directory nor an archive.
    pub fn from_path(path: &Utf8Path) -> Result<Self> {
        if path.is_dir() {
            return Ok(Self::Directory(path.to_owned()));
        }

        let Some(kind) = ArchiveKind::from_path(path) else {
            return Err(InstallerError::usage(UNRECOGNISED_SOURCE_MESSAGE));
        };

        if !path.exists() {
            return Err(InstallerError::SourceNotFound {
                path: path.to_owned(),
            });
        }

        Ok(Self::Archive {
            path: path.to_owned(),
            kind,
        })
    }

    /// Resolves a file or code request into a source.
    ///
    /// # Errors
    ///
    /// Returns a usage error when the path or code is missing, and the
    /// errors of [`InstallSource::from_path`] for file requests.
    pub fn from_request(request: &InstallRequest) -> Result<Option<Self>> {
        match request {
            InstallRequest::Help => Ok(None),
            InstallRequest::File(None) => Err(InstallerError::usage(MISSING_FILE_MESSAGE)),
            InstallRequest::File(Some(path)) => Self::from_path(path).map(Some),
            InstallRequest::Code(Some(code)) if !code.is_empty() => {
                Ok(Some(Self::RemoteCode(code.clone())))
            }
            InstallRequest::Code(_) => Err(InstallerError::usage(MISSING_CODE_MESSAGE)),
        }
    }
}
