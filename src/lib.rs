#![warn(missing_docs)]
//! Library support for the github-to-catalog CLI.

/// Catalog item types and their naming aliases.
mod artifact;
/// Command-line interface wiring.
mod cli;
/// Run settings and validation.
mod config;
/// The catalog.yml document model.
mod descriptor;
/// Unified diff rendering helpers.
mod diff;
/// Error handling for the crate.
mod error;
/// GitHub repository metadata.
mod github;
/// Log subscriber setup.
mod logging;
/// Catalog field resolution.
mod manager;
/// Color palette and styling for CLI output.
mod palette;
/// Path expansion and normalization utilities.
mod paths;
/// Descriptor file access.
mod store;
/// Run summary rendering.
mod summary;
/// Repository name parsing.
mod title;

/// In-memory collaborators for tests.
#[cfg(test)]
mod testutil;

pub use crate::error::{Error, Result};

/// Run the CLI, returning a structured error on failure.
pub async fn run() -> Result<()> {
    cli::run().await
}
