//! Theme archive extraction.
//!
//! Archives are recognised by filename suffix only (`.tar` or `.tar.gz`) and
//! unpacked by the system `tar` tool into a [`TempWorkspace`]. The workspace
//! owns its directory: dropping it removes the extracted files on every exit
//! path, including extraction failures and failed installs.

use crate::error::{InstallerError, Result};
use crate::exec::{CommandExecutor, stderr_text};
use camino::{Utf8Path, Utf8PathBuf};
use chrono::Local;
use log::debug;
use tempfile::TempDir;

/// Fixed prefix of every workspace directory name.
pub const WORKSPACE_PREFIX: &str = "railsthemes";

/// Archive formats the installer accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveKind {
    /// Uncompressed tarball (`.tar`).
    Tar,
    /// Gzip-compressed tarball (`.tar.gz`).
    TarGz,
}

impl ArchiveKind {
    /// Detects the archive kind from a path suffix.
    ///
    /// # Examples
    ///
    /// ```
    /// use railsthemes_installer::archive::ArchiveKind;
    ///
    /// assert_eq!(ArchiveKind::from_path("theme.tar"), Some(ArchiveKind::Tar));
    /// assert_eq!(ArchiveKind::from_path("theme.tar.gz"), Some(ArchiveKind::TarGz));
    /// assert_eq!(ArchiveKind::from_path("theme.zip"), None);
    /// ```
    #[must_use]
    pub fn from_path(path: impl AsRef<str>) -> Option<Self> {
        let path = path.as_ref();
        if path.ends_with(".tar.gz") {
            Some(Self::TarGz)
        } else if path.ends_with(".tar") {
            Some(Self::Tar)
        } else {
            None
        }
    }

    /// Returns the `tar` mode flags that unpack this kind.
    #[must_use]
    pub const fn tar_flags(self) -> &'static str {
        match self {
            Self::Tar => "-xf",
            Self::TarGz => "-xzf",
        }
    }
}

/// A uniquely named temporary directory holding one extracted archive.
///
/// The directory name is `railsthemes-YYYYMMDD-HHMMSS-` followed by a random
/// suffix, under the system temp root.
#[derive(Debug)]
pub struct TempWorkspace {
    dir: TempDir,
    path: Utf8PathBuf,
}

impl TempWorkspace {
    /// Creates a workspace under the system temp root.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or its path is not
    /// valid UTF-8.
    pub fn create() -> Result<Self> {
        Self::from_builder_result(tempfile::Builder::new().prefix(&workspace_prefix()).tempdir())
    }

    /// Creates a workspace under `parent` instead of the system temp root.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or its path is not
    /// valid UTF-8.
    pub fn create_in(parent: &Utf8Path) -> Result<Self> {
        Self::from_builder_result(
            tempfile::Builder::new()
                .prefix(&workspace_prefix())
                .tempdir_in(parent),
        )
    }

    fn from_builder_result(result: std::io::Result<TempDir>) -> Result<Self> {
        let dir = result?;
        let path = Utf8PathBuf::try_from(dir.path().to_path_buf()).map_err(|err| {
            InstallerError::NonUtf8Path {
                path: err.into_path_buf(),
            }
        })?;
        debug!("created workspace {path}");
        Ok(Self { dir, path })
    }

    /// Returns the workspace directory.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Deletes the workspace, reporting any failure.
    ///
    /// Dropping the workspace also deletes it but swallows errors.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory tree cannot be removed.
    pub fn close(self) -> Result<()> {
        debug!("removing workspace {}", self.path);
        self.dir.close().map_err(InstallerError::from)
    }
}

/// Builds the workspace name prefix for the current local time.
#[must_use]
pub fn workspace_prefix() -> String {
    format!(
        "{WORKSPACE_PREFIX}-{}-",
        Local::now().format("%Y%m%d-%H%M%S")
    )
}

/// Extracts `archive` into a fresh [`TempWorkspace`].
///
/// The workspace is created under `parent` when given, otherwise under the
/// system temp root.
///
/// # Errors
///
/// Returns [`InstallerError::Extraction`] if `tar` cannot be started or exits
/// with a nonzero status. The half-filled workspace is removed before the
/// error is returned.
pub fn extract_archive(
    executor: &dyn CommandExecutor,
    archive: &Utf8Path,
    kind: ArchiveKind,
    parent: Option<&Utf8Path>,
) -> Result<TempWorkspace> {
    let workspace = match parent {
        Some(parent) => TempWorkspace::create_in(parent)?,
        None => TempWorkspace::create()?,
    };
    unpack_into(executor, archive, kind, &workspace)?;
    Ok(workspace)
}

/// Runs `tar` to unpack `archive` into an existing workspace.
///
/// # Errors
///
/// Returns [`InstallerError::Extraction`] if the archive path cannot be
/// resolved, `tar` cannot be started, or it exits with a nonzero status.
pub fn unpack_into(
    executor: &dyn CommandExecutor,
    archive: &Utf8Path,
    kind: ArchiveKind,
    workspace: &TempWorkspace,
) -> Result<()> {
    let extraction_error = |reason: String| InstallerError::Extraction {
        archive: archive.to_owned(),
        reason,
    };

    // `tar -C` changes directory, so the archive path must not be relative.
    let absolute = archive
        .canonicalize_utf8()
        .map_err(|err| extraction_error(err.to_string()))?;
    let args = vec![
        kind.tar_flags().to_owned(),
        absolute.to_string(),
        "-C".to_owned(),
        workspace.path().to_string(),
    ];

    let output = executor
        .run(workspace.path(), "tar", &args)
        .map_err(|err| extraction_error(format!("could not run tar: {err}")))?;

    if !output.status.success() {
        let stderr = stderr_text(&output);
        let reason = if stderr.is_empty() {
            format!("tar exited with {}", output.status)
        } else {
            stderr
        };
        return Err(extraction_error(reason));
    }

    debug!("extracted {archive} into {}", workspace.path());
    Ok(())
}
