//! Copying theme files into a project with backup-before-overwrite.
//!
//! An existing project file is renamed to `<path>.old` before the theme's
//! version is written. Only one backup generation is kept: a later install
//! replaces an earlier `.old` file.

use crate::error::{InstallerError, Result};
use crate::fs_utils::copy_creating_parents;
use camino::{Utf8Path, Utf8PathBuf};
use log::debug;
use std::fs;

/// Suffix appended to a project file that is moved aside.
pub const BACKUP_SUFFIX: &str = ".old";

/// What [`copy_with_backup`] did to the project tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyOutcome {
    /// The target did not exist and was created.
    Created {
        /// Path written inside the project.
        target: Utf8PathBuf,
    },
    /// The target existed and was moved aside before being replaced.
    Replaced {
        /// Path written inside the project.
        target: Utf8PathBuf,
        /// Where the previous file now lives.
        backup: Utf8PathBuf,
    },
}

impl CopyOutcome {
    /// Returns the path written inside the project.
    #[must_use]
    pub fn target(&self) -> &Utf8Path {
        match self {
            Self::Created { target } | Self::Replaced { target, .. } => target,
        }
    }

    /// Returns the backup path when a previous file was kept.
    #[must_use]
    pub fn backup(&self) -> Option<&Utf8Path> {
        match self {
            Self::Created { .. } => None,
            Self::Replaced { backup, .. } => Some(backup),
        }
    }
}

/// Returns the backup location for `target`.
///
/// # Example
///
/// ```
/// use camino::Utf8Path;
/// use railsthemes_installer::backup::backup_path;
///
/// let backup = backup_path(Utf8Path::new("app/views/layouts/application.html.erb"));
/// assert_eq!(backup.as_str(), "app/views/layouts/application.html.erb.old");
/// ```
#[must_use]
pub fn backup_path(target: &Utf8Path) -> Utf8PathBuf {
    Utf8PathBuf::from(format!("{target}{BACKUP_SUFFIX}"))
}

/// Copies `source_root/relative` to `project_root/relative`.
///
/// Files are copied unconditionally, even when identical to what is already
/// in the project.
///
/// # Errors
///
/// Returns [`InstallerError::Backup`] if an existing target cannot be renamed
/// aside, and [`InstallerError::Copy`] if the new file cannot be written.
pub fn copy_with_backup(
    source_root: &Utf8Path,
    relative: &Utf8Path,
    project_root: &Utf8Path,
) -> Result<CopyOutcome> {
    let source = source_root.join(relative);
    let target = project_root.join(relative);

    // Inspect the entry itself so a dangling symlink is moved aside too.
    let backup = if target.symlink_metadata().is_ok() {
        let backup = backup_path(&target);
        fs::rename(&target, &backup).map_err(|source| InstallerError::Backup {
            path: target.clone(),
            source,
        })?;
        debug!("moved {target} to {backup}");
        Some(backup)
    } else {
        None
    };

    copy_creating_parents(&source, &target).map_err(|err| InstallerError::Copy {
        from: source.clone(),
        to: target.clone(),
        source: err,
    })?;
    debug!("copied {source} to {target}");

    Ok(match backup {
        Some(backup) => CopyOutcome::Replaced { target, backup },
        None => CopyOutcome::Created { target },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    struct Roots {
        _source: TempDir,
        _project: TempDir,
        source: Utf8PathBuf,
        project: Utf8PathBuf,
    }

    #[fixture]
    fn roots() -> Roots {
        let source = tempfile::tempdir().expect("source dir");
        let project = tempfile::tempdir().expect("project dir");
        Roots {
            source: Utf8PathBuf::try_from(source.path().to_path_buf()).expect("utf8"),
            project: Utf8PathBuf::try_from(project.path().to_path_buf()).expect("utf8"),
            _source: source,
            _project: project,
        }
    }

    fn write(root: &Utf8Path, relative: &str, contents: &str) {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent");
        }
        fs::write(path, contents).expect("write");
    }

    fn read(root: &Utf8Path, relative: &str) -> String {
        fs::read_to_string(root.join(relative)).expect("read")
    }

    #[rstest]
    fn existing_file_is_moved_aside(roots: Roots) {
        let relative = "app/views/layouts/app.html";
        write(&roots.source, relative, "X");
        write(&roots.project, relative, "Y");

        let outcome =
            copy_with_backup(&roots.source, Utf8Path::new(relative), &roots.project).expect("copy");

        assert_eq!(read(&roots.project, relative), "X");
        assert_eq!(read(&roots.project, "app/views/layouts/app.html.old"), "Y");
        assert_eq!(
            outcome.backup(),
            Some(roots.project.join("app/views/layouts/app.html.old").as_path())
        );
    }

    #[rstest]
    fn new_file_creates_parents_and_no_backup(roots: Roots) {
        let relative = "app/assets/stylesheets/theme/base.css";
        write(&roots.source, relative, "body {}");

        let outcome =
            copy_with_backup(&roots.source, Utf8Path::new(relative), &roots.project).expect("copy");

        assert_eq!(read(&roots.project, relative), "body {}");
        assert!(!roots.project.join(format!("{relative}.old")).exists());
        assert!(matches!(outcome, CopyOutcome::Created { .. }));
        assert_eq!(outcome.target(), roots.project.join(relative));
    }

    #[rstest]
    fn identical_file_is_still_replaced(roots: Roots) {
        write(&roots.source, "same.txt", "same");
        write(&roots.project, "same.txt", "same");

        let outcome =
            copy_with_backup(&roots.source, Utf8Path::new("same.txt"), &roots.project).expect("copy");

        assert!(outcome.backup().is_some());
        assert_eq!(read(&roots.project, "same.txt.old"), "same");
    }

    #[rstest]
    fn second_install_overwrites_previous_backup(roots: Roots) {
        write(&roots.project, "layout.html", "original");
        write(&roots.source, "layout.html", "first theme");
        copy_with_backup(&roots.source, Utf8Path::new("layout.html"), &roots.project)
            .expect("first copy");

        write(&roots.source, "layout.html", "second theme");
        copy_with_backup(&roots.source, Utf8Path::new("layout.html"), &roots.project)
            .expect("second copy");

        assert_eq!(read(&roots.project, "layout.html"), "second theme");
        assert_eq!(read(&roots.project, "layout.html.old"), "first theme");
        assert!(!roots.project.join("layout.html.old.old").exists());
    }

    #[rstest]
    fn missing_source_is_a_copy_error(roots: Roots) {
        let err = copy_with_backup(&roots.source, Utf8Path::new("ghost.css"), &roots.project)
            .expect_err("copy should fail");

        assert!(matches!(err, InstallerError::Copy { .. }));
        assert!(!roots.project.join("ghost.css").exists());
    }

    #[cfg(unix)]
    #[rstest]
    fn rename_onto_directory_is_a_backup_error(roots: Roots) {
        write(&roots.source, "layout.html", "theme");
        write(&roots.project, "layout.html", "mine");
        // A non-empty directory at the backup path makes the rename fail.
        write(&roots.project, "layout.html.old/keep", "blocker");

        let err = copy_with_backup(&roots.source, Utf8Path::new("layout.html"), &roots.project)
            .expect_err("rename should fail");

        assert!(matches!(err, InstallerError::Backup { .. }));
        assert_eq!(read(&roots.project, "layout.html"), "mine");
    }

    #[cfg(unix)]
    #[rstest]
    fn dangling_symlink_target_is_moved_aside(roots: Roots) {
        write(&roots.source, "layout.html", "theme");
        let outside = roots.source.join("outside.html");
        std::os::unix::fs::symlink(&outside, roots.project.join("layout.html"))
            .expect("create link");

        let outcome = copy_with_backup(&roots.source, Utf8Path::new("layout.html"), &roots.project)
            .expect("copy");

        assert!(outcome.backup().is_some());
        assert!(
            fs::symlink_metadata(roots.project.join("layout.html.old"))
                .expect("backup exists")
                .file_type()
                .is_symlink()
        );
        assert!(
            !fs::symlink_metadata(roots.project.join("layout.html"))
                .expect("target exists")
                .file_type()
                .is_symlink()
        );
        assert_eq!(read(&roots.project, "layout.html"), "theme");
        assert!(!outside.exists());
    }
}
