//! User-facing text for the installer CLI.
//!
//! Progress lines, usage text, and post-install instructions are written to
//! an injected writer (stderr in the binary, a buffer in tests) rather than
//! to a process-wide logger. Diagnostic detail goes through the `log` facade
//! instead.

use std::io::Write;

/// Writes one line, ignoring write failures.
///
/// Progress output is best-effort: a closed stderr must not abort an
/// install that is otherwise succeeding.
pub fn write_stderr_line(stderr: &mut dyn Write, message: impl std::fmt::Display) {
    if writeln!(stderr, "{message}").is_err() {
        // Best-effort logging; ignore write failures.
    }
}

/// Progress writer that honours `--quiet`.
pub struct Progress<'a> {
    out: &'a mut dyn Write,
    quiet: bool,
}

impl<'a> Progress<'a> {
    /// Wraps `out`, dropping progress lines when `quiet` is set.
    pub fn new(out: &'a mut dyn Write, quiet: bool) -> Self {
        Self { out, quiet }
    }

    /// Writes a progress line unless quiet.
    pub fn line(&mut self, message: impl std::fmt::Display) {
        if !self.quiet {
            write_stderr_line(self.out, message);
        }
    }

    /// Writes a line regardless of quiet mode.
    ///
    /// Used for text the user explicitly asked for, such as `--help`.
    pub fn always(&mut self, message: impl std::fmt::Display) {
        write_stderr_line(self.out, message);
    }
}

/// Returns the install usage text.
///
/// # Example
///
/// ```
/// use railsthemes_installer::output::usage_text;
///
/// let usage = usage_text();
/// assert!(usage.contains("railsthemes install --file filepath"));
/// ```
#[must_use]
pub fn usage_text() -> &'static str {
    concat!(
        "Usage:\n",
        "------\n",
        "railsthemes install <download code>\n",
        "  install a theme from the railsthemes website\n",
        "\n",
        "railsthemes install --help\n",
        "  this message\n",
        "\n",
        "railsthemes install --file filepath\n",
        "  install from the local filesystem",
    )
}

/// Returns the instructions printed after a successful install.
#[must_use]
pub fn post_install_instructions() -> &'static str {
    concat!(
        "Yay! Your theme is installed!\n",
        "\n",
        "What now?\n",
        "1) Ensure your new application layout file contains everything that you wanted\n",
        "   from the old one.\n",
        "2) Restart your development server if it is currently running.\n",
        "3) Let us know how it went: @railsthemes or team@railsthemes.com.",
    )
}

/// Format the summary line printed after the copy loop.
#[must_use]
pub fn copy_summary(copied: usize, backed_up: usize) -> String {
    let plural = if copied == 1 { "file" } else { "files" };
    if backed_up == 0 {
        format!("Done copying assets ({copied} {plural}).")
    } else {
        format!("Done copying assets ({copied} {plural}, {backed_up} previous version(s) kept as .old).")
    }
}
