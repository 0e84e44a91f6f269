//! External command execution.
//!
//! The installer shells out to `tar`, `rake`, and `rails`. All of those calls
//! go through [`CommandExecutor`] so tests can substitute a stub or mock and
//! never depend on the real tools being installed.

use crate::error::{InstallerError, Result};
use camino::Utf8Path;
use log::trace;
use std::process::{Command, Output, Stdio};

/// Abstraction for running external commands.
#[cfg_attr(test, mockall::automock)]
pub trait CommandExecutor {
    /// Runs `program` with `args` inside `working_dir` and returns the captured
    /// output. The call blocks until the command exits; there is no timeout.
    ///
    /// # Errors
    ///
    /// Returns any I/O errors encountered while spawning or running the command.
    /// A nonzero exit status is not an error at this level.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use camino::Utf8Path;
    /// use railsthemes_installer::exec::{CommandExecutor, SystemCommandExecutor};
    ///
    /// let executor = SystemCommandExecutor;
    /// let output = executor.run(Utf8Path::new("."), "tar", &["--version".to_owned()])?;
    /// assert!(output.status.success());
    /// # Ok::<(), railsthemes_installer::error::InstallerError>(())
    /// ```
    fn run(&self, working_dir: &Utf8Path, program: &str, args: &[String]) -> Result<Output>;
}

/// Executes commands on the host system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCommandExecutor;

impl CommandExecutor for SystemCommandExecutor {
    fn run(&self, working_dir: &Utf8Path, program: &str, args: &[String]) -> Result<Output> {
        trace!("running `{program} {}` in {working_dir}", args.join(" "));
        Command::new(program)
            .args(args)
            .current_dir(working_dir)
            .stdin(Stdio::null())
            .output()
            .map_err(InstallerError::from)
    }
}

/// Returns the trimmed stdout of a command as a lossy UTF-8 string.
#[must_use]
pub fn stdout_text(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).trim().to_owned()
}

/// Returns the trimmed stderr of a command as a lossy UTF-8 string.
#[must_use]
pub fn stderr_text(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).trim().to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{failure_output, stdout_output};

    #[test]
    fn stdout_text_trims_trailing_newlines() {
        let output = stdout_output("root GET / welcome#index\n\n");
        assert_eq!(stdout_text(&output), "root GET / welcome#index");
    }

    #[test]
    fn stderr_text_is_lossy_and_trimmed() {
        let output = failure_output("  tar: not found \n");
        assert_eq!(stderr_text(&output), "tar: not found");
    }

    #[cfg(unix)]
    #[test]
    fn system_executor_runs_in_working_dir() {
        let temp = tempfile::tempdir().expect("temp dir");
        let dir = Utf8Path::from_path(temp.path()).expect("utf8 temp dir");
        std::fs::write(dir.join("marker.txt"), "x").expect("write marker");

        let output = SystemCommandExecutor
            .run(dir, "ls", &[])
            .expect("ls should run");

        assert!(output.status.success());
        assert!(stdout_text(&output).contains("marker.txt"));
    }

    #[test]
    fn system_executor_reports_spawn_failure() {
        let result = SystemCommandExecutor.run(
            Utf8Path::new("."),
            "railsthemes-definitely-not-a-command",
            &[],
        );
        assert!(matches!(result, Err(InstallerError::Io(_))));
    }
}
