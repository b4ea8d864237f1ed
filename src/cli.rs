//! CLI parsing and run wiring.

use std::{
    env,
    ffi::OsString,
    io::{self, IsTerminal},
    path::{Path, PathBuf},
};

use clap::{Parser, ValueEnum};

use crate::{
    config::{RawSettings, Settings},
    error::{Error, Result},
    github::GitHubService,
    logging,
    manager::CatalogManager,
    store::FsStore,
    summary,
};

/// Parsed command line arguments.
#[derive(Debug, Parser)]
#[command(
    name = "github-to-catalog",
    version,
    about = "Fill in a repository's catalog.yml from GitHub metadata"
)]
struct Cli {
    /// Repository in owner/repo form.
    #[arg(long, env = "GITHUB_REPOSITORY")]
    github_repository: String,
    /// Token used to call the GitHub API.
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    github_token: String,
    /// Directory holding catalog.yml or manifest.yml.
    #[arg(long, env = "GITHUB_WORKSPACE")]
    workspace: Option<PathBuf>,
    /// Identifier to use when the catalog file has none.
    #[arg(long)]
    catalog_identifier: Option<String>,
    /// GitHub REST API base URL.
    #[arg(long, env = "GITHUB_API_URL", default_value = "https://api.github.com")]
    github_api_url: String,
    /// GitHub web root used for source links.
    #[arg(long, env = "GITHUB_SERVER_URL", default_value = "https://github.com")]
    github_server_url: String,
    /// Enable debug logging.
    #[arg(long)]
    debug: bool,
    /// Show the resolved catalog as a diff without writing anything.
    #[arg(long, short = 'n')]
    dry_run: bool,
    /// Control colored output.
    #[arg(long, value_enum, default_value = "auto")]
    color: ColorMode,
}

/// Supported color output modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ColorMode {
    /// Only colorize when stdout is a TTY.
    Auto,
    /// Always colorize output.
    Always,
    /// Never colorize output.
    Never,
}

impl ColorMode {
    /// Determine whether color output should be enabled.
    fn enabled(self) -> bool {
        match self {
            Self::Auto => io::stdout().is_terminal(),
            Self::Always => true,
            Self::Never => false,
        }
    }
}

impl Cli {
    /// Convert parsed arguments into unvalidated settings.
    fn into_raw(self) -> RawSettings {
        RawSettings {
            repository: self.github_repository,
            token: self.github_token,
            workspace: self.workspace,
            catalog_identifier: self.catalog_identifier,
            api_url: self.github_api_url,
            server_url: self.github_server_url,
            debug: self.debug,
            dry_run: self.dry_run,
        }
    }
}

/// Parse arguments; help and version requests are printed and yield `None`.
fn parse_args<I, T>(args: I) -> Result<Option<Cli>>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match Cli::try_parse_from(args) {
        Ok(cli) => Ok(Some(cli)),
        Err(error) if error.use_stderr() => Err(Error::Usage { source: error }),
        Err(error) => {
            print!("{}", error.render());
            Ok(None)
        }
    }
}

/// Resolve the workspace catalog file and report what changed.
pub async fn run() -> Result<()> {
    let Some(cli) = parse_args(env::args_os())? else {
        return Ok(());
    };
    let color = cli.color.enabled();
    let settings = Settings::resolve(cli.into_raw(), Path::new("."))?;
    logging::init(settings.debug)?;

    let provider = GitHubService::new(&settings.api_url, &settings.token, &settings.repository)?;
    let manager = CatalogManager::new(&FsStore, &provider, settings.workspace.clone())
        .with_server_url(&settings.server_url)
        .with_dry_run(settings.dry_run);

    let identifier = settings.catalog_identifier.as_deref();
    let outcome = manager.process(&settings.repository, identifier).await?;

    print!("{}", summary::render(&outcome, color));
    if settings.dry_run {
        print!("{}", summary::render_diff(&outcome, color));
    }
    Ok(())
}
