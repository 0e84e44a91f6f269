//! Railsthemes installer CLI entrypoint.
//!
//! This binary installs a theme into the Rails project in the current
//! directory. Progress and errors are written to stderr; any failure exits
//! with status 1.

use camino::Utf8PathBuf;
use clap::Parser;
use railsthemes_installer::cli::{Cli, Command};
use railsthemes_installer::error::{InstallerError, Result};
use railsthemes_installer::exec::{CommandExecutor, SystemCommandExecutor};
use railsthemes_installer::install::Installer;
use railsthemes_installer::output::{usage_text, write_stderr_line};
use std::io::Write;

fn main() {
    let cli = Cli::parse();
    init_logging(&cli);

    let mut stderr = std::io::stderr();
    let run_result = run(&cli, &SystemCommandExecutor, &mut stderr);
    let exit_code = exit_code_for_run_result(run_result, &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

/// Installs `env_logger` at the level chosen by `-v` / `-q`.
///
/// `RUST_LOG` overrides the flags when set.
fn init_logging(cli: &Cli) {
    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .format_timestamp(None)
        .format_target(false)
        .init();
}

fn run(cli: &Cli, executor: &dyn CommandExecutor, stderr: &mut dyn Write) -> Result<()> {
    let Some(Command::Install(args)) = &cli.command else {
        return Err(InstallerError::usage(
            "railsthemes needs a command; try `railsthemes install --help`.",
        ));
    };

    let cwd = std::env::current_dir()?;
    let project_root = Utf8PathBuf::try_from(cwd).map_err(|err| InstallerError::NonUtf8Path {
        path: err.into_path_buf(),
    })?;

    Installer::new(project_root, executor, stderr, cli.quiet)
        .install(&args.request())
        .map(|_| ())
}

fn exit_code_for_run_result(result: Result<()>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            if err.is_usage() {
                write_stderr_line(stderr, usage_text());
                write_stderr_line(stderr, "");
            }
            write_stderr_line(stderr, error_with_sources(&err));
            1
        }
    }
}

/// Formats `err` followed by its chain of sources.
fn error_with_sources(err: &InstallerError) -> String {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
