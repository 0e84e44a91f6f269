//! Install orchestration.
//!
//! [`Installer`] is the single entry point used by the binary. It checks that
//! it is running inside a Rails project, resolves the install source once,
//! and then sequences extraction, manifest building, copying, and
//! environment repair. The first error stops the run.

use crate::archive::{ArchiveKind, extract_archive};
use crate::backup::copy_with_backup;
use crate::error::{InstallerError, Result};
use crate::exec::CommandExecutor;
use crate::fs_utils::has_directories;
use crate::manifest::build_manifest;
use crate::output::{Progress, copy_summary, post_install_instructions, usage_text};
use crate::repair::{RepairReport, post_copy_changes};
use crate::source::{InstallRequest, InstallSource};
use camino::{Utf8Path, Utf8PathBuf};
use log::{debug, info};
use std::io::Write;

/// Directories whose presence marks a Rails project root.
pub const PROJECT_ROOT_MARKERS: [&str; 2] = ["app", "public"];

/// Result of a completed theme install.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InstallSummary {
    /// Number of files copied into the project.
    pub files_copied: usize,
    /// Number of project files moved aside to `.old`.
    pub files_backed_up: usize,
    /// Changes made by environment repair.
    pub repair: RepairReport,
}

/// How an `install` invocation finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    /// Usage text was printed at the user's request.
    UsageShown,
    /// Theme files were installed.
    Installed(InstallSummary),
    /// A download code was accepted; remote installs are not implemented.
    RemoteRequested {
        /// The code from the command line.
        code: String,
    },
}

/// Drives one install run against a project directory.
pub struct Installer<'a> {
    project_root: Utf8PathBuf,
    executor: &'a dyn CommandExecutor,
    progress: Progress<'a>,
    workspace_parent: Option<Utf8PathBuf>,
}

impl<'a> Installer<'a> {
    /// Creates an installer for `project_root`.
    ///
    /// Progress text goes to `out` unless `quiet` is set; external tools run
    /// through `executor`.
    pub fn new(
        project_root: impl Into<Utf8PathBuf>,
        executor: &'a dyn CommandExecutor,
        out: &'a mut dyn Write,
        quiet: bool,
    ) -> Self {
        Self {
            project_root: project_root.into(),
            executor,
            progress: Progress::new(out, quiet),
            workspace_parent: None,
        }
    }

    /// Creates archive workspaces under `parent` instead of the system temp
    /// root.
    #[must_use]
    pub fn with_workspace_parent(mut self, parent: impl Into<Utf8PathBuf>) -> Self {
        self.workspace_parent = Some(parent.into());
        self
    }

    /// Returns the project directory files are installed into.
    #[must_use]
    pub fn project_root(&self) -> &Utf8Path {
        &self.project_root
    }

    /// Runs the `install` subcommand.
    ///
    /// # Errors
    ///
    /// Returns [`InstallerError::NotProjectRoot`] before doing anything else
    /// when the project root lacks `app/` or `public/`, a usage error for
    /// incomplete arguments, and any error raised while installing.
    pub fn install(&mut self, request: &InstallRequest) -> Result<InstallOutcome> {
        self.ensure_in_project_root()?;

        let Some(source) = InstallSource::from_request(request)? else {
            self.progress.always(usage_text());
            return Ok(InstallOutcome::UsageShown);
        };

        match source {
            InstallSource::Directory(dir) => {
                self.install_from_directory(&dir).map(InstallOutcome::Installed)
            }
            InstallSource::Archive { path, kind } => self
                .install_from_archive(&path, kind)
                .map(InstallOutcome::Installed),
            InstallSource::RemoteCode(code) => {
                self.download_from_code(&code);
                Ok(InstallOutcome::RemoteRequested { code })
            }
        }
    }

    /// Fails unless the project root contains `app/` and `public/`.
    ///
    /// # Errors
    ///
    /// Returns [`InstallerError::NotProjectRoot`] when a marker is missing.
    pub fn ensure_in_project_root(&self) -> Result<()> {
        if has_directories(&self.project_root, &PROJECT_ROOT_MARKERS) {
            Ok(())
        } else {
            Err(InstallerError::NotProjectRoot {
                path: self.project_root.clone(),
            })
        }
    }

    /// Copies every file under `source_root` into the project, then repairs
    /// the environment and prints the post-install instructions.
    ///
    /// # Errors
    ///
    /// Returns the first manifest, backup, copy, or repair error. Files
    /// handled before the failure stay installed, with their previous
    /// versions in `.old` backups.
    pub fn install_from_directory(&mut self, source_root: &Utf8Path) -> Result<InstallSummary> {
        let manifest = build_manifest(source_root)?;
        debug!("{} file(s) to install from {source_root}", manifest.len());

        self.progress.line("Copying assets...");
        let mut summary = InstallSummary::default();
        for relative in &manifest {
            let outcome = copy_with_backup(source_root, relative, &self.project_root)?;
            summary.files_copied += 1;
            if outcome.backup().is_some() {
                summary.files_backed_up += 1;
            }
        }
        self.progress
            .line(copy_summary(summary.files_copied, summary.files_backed_up));

        summary.repair = post_copy_changes(self.executor, &self.project_root, &mut self.progress)?;
        self.progress.line(post_install_instructions());

        Ok(summary)
    }

    /// Extracts `archive` into a temporary workspace and installs from it.
    ///
    /// The workspace is removed whether or not the install succeeds.
    ///
    /// # Errors
    ///
    /// Returns extraction errors, any error from
    /// [`Installer::install_from_directory`], or a failure to remove the
    /// workspace after a successful install.
    pub fn install_from_archive(
        &mut self,
        archive: &Utf8Path,
        kind: ArchiveKind,
    ) -> Result<InstallSummary> {
        self.progress.line(format!("Extracting {archive}..."));
        let workspace = extract_archive(
            self.executor,
            archive,
            kind,
            self.workspace_parent.as_deref(),
        )?;

        let summary = self.install_from_directory(workspace.path())?;
        workspace.close()?;
        Ok(summary)
    }

    /// Accepts a download code. Remote installs are not implemented yet, so
    /// this only reports the code.
    pub fn download_from_code(&mut self, code: &str) {
        info!("remote install requested for code {code}");
        self.progress.line(format!("Downloading from code {code}"));
    }
}

#[cfg(test)]
#[path = "install_tests.rs"]
mod tests;
