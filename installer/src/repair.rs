//! Post-install environment repair.
//!
//! After the theme files are copied the project may still show the stock
//! Rails landing page, or may have no root route at all. This step removes
//! the placeholder page and, when `rake routes` reports nothing, scaffolds a
//! `Welcome` controller and activates the commented-out root route in
//! `config/routes.rb`.
//!
//! Every step is idempotent: running it again on a repaired project leaves
//! the project unchanged.

use crate::error::Result;
use crate::exec::{CommandExecutor, stderr_text};
use crate::fs_utils::remove_file_if_exists;
use crate::output::Progress;
use camino::Utf8Path;
use log::{debug, warn};
use std::fs;

/// Stock landing page shipped with new Rails projects.
pub const PLACEHOLDER_INDEX: &str = "public/index.html";

/// Routing declaration file, relative to the project root.
pub const ROUTES_FILE: &str = "config/routes.rb";

/// Commented-out root route generated by Rails.
pub const COMMENTED_ROOT_ROUTE: &str = "  # root :to => 'welcome#index'";

/// Active root route that replaces [`COMMENTED_ROOT_ROUTE`].
pub const ACTIVE_ROOT_ROUTE: &str = "  root :to => 'welcome#index'";

/// What the repair step changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RepairReport {
    /// `public/index.html` was present and has been deleted.
    pub placeholder_removed: bool,
    /// `rake routes` reported at least one route.
    pub routes_defined: bool,
    /// The `Welcome` controller generator was invoked.
    pub welcome_generated: bool,
    /// Number of root-route lines activated in the routes file.
    pub routes_activated: usize,
}

/// Runs every repair step against `project_root`.
///
/// # Errors
///
/// Returns an error if the placeholder cannot be removed or the routes file
/// cannot be read or rewritten. Failures of `rake` and `rails` themselves
/// are not errors.
pub fn post_copy_changes(
    executor: &dyn CommandExecutor,
    project_root: &Utf8Path,
    progress: &mut Progress<'_>,
) -> Result<RepairReport> {
    let mut report = RepairReport {
        placeholder_removed: remove_file_if_exists(&project_root.join(PLACEHOLDER_INDEX))?,
        ..RepairReport::default()
    };
    if report.placeholder_removed {
        debug!("removed {PLACEHOLDER_INDEX}");
    }

    progress.line("Analyzing existing project structure...");
    report.routes_defined = routes_defined(executor, project_root);
    if !report.routes_defined {
        report.routes_activated = create_welcome_controller(executor, project_root)?;
        report.welcome_generated = true;
    }

    Ok(report)
}

/// Returns `true` when `rake routes` prints anything.
///
/// Any output counts, even a lone newline. A `rake` that cannot be started
/// counts as "no routes"; its exit status is not inspected.
#[must_use]
pub fn routes_defined(executor: &dyn CommandExecutor, project_root: &Utf8Path) -> bool {
    match executor.run(project_root, "rake", &["routes".to_owned()]) {
        Ok(output) => !output.stdout.is_empty(),
        Err(err) => {
            debug!("rake routes could not run: {err}");
            false
        }
    }
}

/// Scaffolds the `Welcome` controller and activates the root route.
///
/// Returns the number of route lines that were activated.
///
/// # Errors
///
/// Returns an error if the routes file exists but cannot be read or written.
pub fn create_welcome_controller(
    executor: &dyn CommandExecutor,
    project_root: &Utf8Path,
) -> Result<usize> {
    let args = ["g", "controller", "Welcome", "index"].map(str::to_owned);
    match executor.run(project_root, "rails", &args) {
        Ok(output) if !output.status.success() => {
            warn!(
                "`rails g controller Welcome index` exited with {}: {}",
                output.status,
                stderr_text(&output)
            );
        }
        Ok(_) => {}
        Err(err) => warn!("`rails g controller Welcome index` could not run: {err}"),
    }

    rewrite_routes_file(&project_root.join(ROUTES_FILE))
}

/// Rewrites `routes_file` in place with the root route activated.
///
/// A missing file is left alone and reported as zero activated lines.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or written.
pub fn rewrite_routes_file(routes_file: &Utf8Path) -> Result<usize> {
    if !routes_file.is_file() {
        debug!("{routes_file} not found; skipping root route activation");
        return Ok(0);
    }

    let contents = fs::read_to_string(routes_file)?;
    let (rewritten, activated) = activate_root_route(&contents);
    fs::write(routes_file, rewritten)?;
    debug!("activated {activated} root route line(s) in {routes_file}");
    Ok(activated)
}

/// Replaces every line containing [`COMMENTED_ROOT_ROUTE`] with
/// [`ACTIVE_ROOT_ROUTE`], keeping all other lines and their order.
///
/// Untouched lines keep their own terminator (`\n` or `\r\n`). Replaced
/// lines and an unterminated last line end with `\n`.
///
/// # Example
///
/// ```
/// use railsthemes_installer::repair::activate_root_route;
///
/// let routes = "Blog::Application.routes.draw do\n  # root :to => 'welcome#index'\nend\n";
/// let (rewritten, activated) = activate_root_route(routes);
/// assert_eq!(activated, 1);
/// assert_eq!(
///     rewritten,
///     "Blog::Application.routes.draw do\n  root :to => 'welcome#index'\nend\n"
/// );
/// ```
#[must_use]
pub fn activate_root_route(contents: &str) -> (String, usize) {
    let mut activated = 0;
    let mut rewritten = String::with_capacity(contents.len());

    for line in contents.split_inclusive('\n') {
        if line.contains(COMMENTED_ROOT_ROUTE) {
            rewritten.push_str(ACTIVE_ROOT_ROUTE);
            rewritten.push('\n');
            activated += 1;
        } else {
            rewritten.push_str(line);
            if !line.ends_with('\n') {
                rewritten.push('\n');
            }
        }
    }

    (rewritten, activated)
}

#[cfg(test)]
#[path = "repair_tests.rs"]
mod tests;
