//! CLI argument definitions for the theme installer.
//!
//! This module defines the command-line interface using clap. It is separated
//! from the main entrypoint to keep the binary small and focused on
//! orchestration.

use crate::source::InstallRequest;
use camino::Utf8PathBuf;
use clap::{ArgAction, Args, Parser, Subcommand};
use log::LevelFilter;

/// Install a railsthemes theme into a Rails project.
#[derive(Parser, Debug, Default)]
#[command(name = "railsthemes")]
#[command(version, about)]
#[command(long_about = concat!(
    "Install a railsthemes theme into a Rails project.\n\n",
    "Run this from the root of your Rails application (the directory that ",
    "contains app/ and public/). Files from the theme are copied over your ",
    "project; any file that already exists is first renamed to <file>.old.",
))]
#[command(after_help = concat!(
    "EXAMPLES:\n",
    "  Install from an unpacked theme directory:\n",
    "    $ railsthemes install --file ~/Downloads/theme\n\n",
    "  Install from a downloaded archive:\n",
    "    $ railsthemes install --file ~/Downloads/theme.tar.gz\n\n",
    "For more information, see: https://railsthemes.com",
))]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Increase log verbosity (repeatable: -v, -vv, -vvv).
    #[arg(
        short,
        long = "verbose",
        action = ArgAction::Count,
        global = true,
        conflicts_with = "quiet"
    )]
    pub verbosity: u8,

    /// Suppress progress output (errors still shown).
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Install a theme into the Rails project in the current directory.
    Install(InstallArgs),
}

/// Arguments for the install command.
///
/// Clap's automatic `--help` is disabled here so that `install --help` is
/// handled by the installer after the project-root check.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
#[command(disable_help_flag = true)]
pub struct InstallArgs {
    /// Install from a local theme directory or `.tar` / `.tar.gz` archive.
    #[arg(long, value_name = "PATH", num_args = 0..=1)]
    pub file: Option<Option<Utf8PathBuf>>,

    /// Show install usage.
    #[arg(long)]
    pub help: bool,

    /// Download code from the railsthemes website.
    #[arg(value_name = "CODE")]
    pub code: Option<String>,
}

impl InstallArgs {
    /// Converts parsed arguments into an install request.
    ///
    /// `--file` takes precedence over `--help`, which takes precedence over a
    /// download code.
    ///
    /// # Examples
    ///
    /// ```
    /// use camino::Utf8PathBuf;
    /// use railsthemes_installer::cli::InstallArgs;
    /// use railsthemes_installer::source::InstallRequest;
    ///
    /// let args = InstallArgs {
    ///     file: Some(Some(Utf8PathBuf::from("theme.tar.gz"))),
    ///     ..InstallArgs::default()
    /// };
    /// assert_eq!(
    ///     args.request(),
    ///     InstallRequest::File(Some(Utf8PathBuf::from("theme.tar.gz")))
    /// );
    /// ```
    #[must_use]
    pub fn request(&self) -> InstallRequest {
        if let Some(path) = &self.file {
            InstallRequest::File(path.clone())
        } else if self.help {
            InstallRequest::Help
        } else {
            InstallRequest::Code(self.code.clone())
        }
    }
}

impl Cli {
    /// Returns the log level selected by `-v` / `-q`.
    ///
    /// Warnings are shown by default; each `-v` raises the level by one step.
    #[must_use]
    pub const fn log_level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Error;
        }
        match self.verbosity {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
