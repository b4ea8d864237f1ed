//! Run settings assembled from command-line arguments and the environment.

use std::path::{Path, PathBuf};

use url::Url;

use crate::{
    error::{Error, Result},
    paths,
};

/// Unvalidated settings as provided on the command line.
#[derive(Debug, Clone, Default)]
pub struct RawSettings {
    /// Repository in `owner/repo` form.
    pub(crate) repository: String,
    /// API token.
    pub(crate) token: String,
    /// Workspace directory, if given.
    pub(crate) workspace: Option<PathBuf>,
    /// Identifier to use when the file has none.
    pub(crate) catalog_identifier: Option<String>,
    /// REST API base URL.
    pub(crate) api_url: String,
    /// Web root for source links.
    pub(crate) server_url: String,
    /// Verbose logging.
    pub(crate) debug: bool,
    /// Resolve without writing.
    pub(crate) dry_run: bool,
}

/// Validated settings for one run.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Repository in `owner/repo` form.
    pub(crate) repository: String,
    /// API token.
    pub(crate) token: String,
    /// Normalized workspace directory.
    pub(crate) workspace: PathBuf,
    /// Identifier to use when the file has none.
    pub(crate) catalog_identifier: Option<String>,
    /// REST API base URL, without a trailing slash.
    pub(crate) api_url: String,
    /// Web root for source links, without a trailing slash.
    pub(crate) server_url: String,
    /// Verbose logging.
    pub(crate) debug: bool,
    /// Resolve without writing.
    pub(crate) dry_run: bool,
}

impl Settings {
    /// Validate raw settings, resolving a relative workspace against `base_dir`.
    pub(crate) fn resolve(raw: RawSettings, base_dir: &Path) -> Result<Self> {
        let repository = raw.repository.trim().to_string();
        if repository.is_empty() {
            return Err(Error::MissingRepositoryName);
        }

        let workspace = raw.workspace.unwrap_or_else(|| PathBuf::from("."));
        let workspace = paths::expand_workspace_path(&workspace, base_dir)?;

        let catalog_identifier = raw
            .catalog_identifier
            .map(|identifier| identifier.trim().to_string())
            .filter(|identifier| !identifier.is_empty());

        Ok(Self {
            repository,
            token: raw.token,
            workspace,
            catalog_identifier,
            api_url: validate_url(&raw.api_url)?,
            server_url: validate_url(&raw.server_url)?,
            debug: raw.debug,
            dry_run: raw.dry_run,
        })
    }
}

/// Require an absolute https URL and strip any trailing slash.
fn validate_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    let url = Url::parse(trimmed).map_err(|_| Error::InvalidUrl {
        url: raw.to_string(),
    })?;

    match url.scheme() {
        "https" => Ok(trimmed.trim_end_matches('/').to_string()),
        "http" => Err(Error::HttpNotAllowed {
            url: raw.to_string(),
        }),
        _ => Err(Error::InvalidUrl {
            url: raw.to_string(),
        }),
    }
}
