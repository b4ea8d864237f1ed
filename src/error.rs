//! Error types for the github-to-catalog CLI.

use std::{
    env::VarError, io, path::PathBuf, process::ExitCode, result::Result as StdResult,
};

use thiserror::Error;

/// Result type for catalog operations.
pub type Result<T> = StdResult<T, Error>;

/// Errors that can occur while resolving a catalog file.
#[derive(Debug, Error)]
pub enum Error {
    /// The command line could not be parsed.
    #[error("{source}")]
    Usage {
        /// Error reported by the argument parser.
        source: clap::Error,
    },
    /// The repository name was empty or only whitespace.
    #[error("A GitHub repository name (owner/repo) is required.")]
    MissingRepositoryName,
    /// No catalog type could be derived from the repository name or topics.
    #[error(
        "Could not identify Type from GitHub. Please specify the type either through naming or topic guidelines."
    )]
    UnknownType,
    /// Checking whether a descriptor file exists failed.
    #[error("Failed to access {path}: {source}")]
    DescriptorLookup {
        /// Path whose existence was checked.
        path: PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },
    /// A descriptor file could not be read.
    #[error("Failed to read catalog file at {path}: {source}")]
    DescriptorRead {
        /// Path to the descriptor file.
        path: PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },
    /// A descriptor file contained invalid YAML.
    #[error("Failed to parse catalog file at {path}: {source}")]
    DescriptorParse {
        /// Path to the descriptor file.
        path: PathBuf,
        /// Underlying parse error.
        source: serde_yaml::Error,
    },
    /// The resolved descriptor could not be serialized.
    #[error("Failed to serialize catalog: {source}")]
    DescriptorSerialize {
        /// Underlying serialization error.
        source: serde_yaml::Error,
    },
    /// A descriptor file could not be written.
    #[error("Failed to write catalog file at {path}: {source}")]
    DescriptorWrite {
        /// Path that failed to write.
        path: PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },
    /// The HTTP client could not be constructed.
    #[error("Failed to set up the HTTP client: {source}")]
    HttpClient {
        /// Underlying client error.
        source: reqwest::Error,
    },
    /// A request to the GitHub API failed before a response was received.
    #[error("Request to {url} failed: {source}")]
    GitHubRequest {
        /// URL that was requested.
        url: String,
        /// Underlying transport error.
        source: reqwest::Error,
    },
    /// A GitHub API response body could not be decoded.
    #[error("Unexpected response from {url}: {message}")]
    GitHubDecode {
        /// URL that returned the body.
        url: String,
        /// Error message describing the decode failure.
        message: String,
    },
    /// Invalid URL.
    #[error("Invalid URL: {url}")]
    InvalidUrl {
        /// The invalid URL.
        url: String,
    },
    /// HTTP URL not allowed.
    #[error("HTTP URLs not allowed for security. Use HTTPS: {url}")]
    HttpNotAllowed {
        /// The HTTP URL.
        url: String,
    },
    /// The workspace path could not be expanded.
    #[error("Invalid workspace path: {path}: {source}")]
    PathExpansion {
        /// Input path that failed to expand.
        path: String,
        /// Underlying expansion error.
        source: shellexpand::LookupError<VarError>,
    },
    /// The workspace path was not valid Unicode for expansion.
    #[error("Invalid workspace path: {path}")]
    PathNotUnicode {
        /// Path that could not be represented as UTF-8.
        path: PathBuf,
    },
    /// The log subscriber could not be installed.
    #[error("Failed to initialize logging: {message}")]
    LoggingInit {
        /// Error message from the subscriber.
        message: String,
    },
}

impl Error {
    /// Map errors to exit codes for CLI termination.
    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(1)
    }
}
