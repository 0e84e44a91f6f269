//! Railsthemes installer library.
//!
//! This crate installs a purchased theme into an existing Rails project. It
//! resolves the install source (directory, tarball, or download code) into a
//! flat file manifest, overlays those files onto the project while keeping a
//! `.old` copy of anything it replaces, and then repairs the environment so
//! the theme has a page to render. It is used by the `railsthemes` binary and
//! can be driven programmatically for testing.
//!
//! # Modules
//!
//! - [`archive`] - Tarball detection and extraction into temporary workspaces
//! - [`backup`] - Copying files with backup-before-overwrite
//! - [`cli`] - Command-line argument definitions
//! - [`error`] - Semantic error types
//! - [`exec`] - External command execution abstraction
//! - [`fs_utils`] - Small filesystem helpers
//! - [`install`] - Install orchestration
//! - [`manifest`] - File manifests for theme sources
//! - [`output`] - Usage text, progress, and post-install instructions
//! - [`repair`] - Post-install environment repair
//! - [`source`] - Install source resolution

pub mod archive;
pub mod backup;
pub mod cli;
pub mod error;
pub mod exec;
pub mod fs_utils;
pub mod install;
pub mod manifest;
pub mod output;
pub mod repair;
pub mod source;

#[cfg(any(test, feature = "test-support"))]
pub mod test_utils;
