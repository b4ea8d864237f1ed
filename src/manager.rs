//! Resolution of catalog fields from local files and GitHub metadata.
//!
//! A run loads `catalog.yml` (or `manifest.yml`), fills in every blank field in
//! a fixed order, and writes the document back to the file it came from.

use std::path::PathBuf;

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
    artifact,
    descriptor::{CatalogYaml, is_blank},
    error::{Error, Result},
    github::MetadataProvider,
    store::DescriptorStore,
    title::CleanTitle,
};

/// Primary descriptor file name.
pub const CATALOG_FILE: &str = "catalog.yml";

/// Alternate descriptor file name, used when no catalog file exists.
pub const MANIFEST_FILE: &str = "manifest.yml";

/// Description written when GitHub has none.
pub const DEFAULT_DESCRIPTION: &str = "No description available";

/// Default web root for derived source links.
pub const DEFAULT_SERVER_URL: &str = "https://github.com";

/// Catalog fields the manager resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// The `id` field.
    Id,
    /// The `short_description` field.
    Description,
    /// The `tags` field.
    Tags,
    /// The `title` field.
    Title,
    /// The `source_code_url` field.
    SourceCodeUrl,
    /// The `type` field.
    Type,
}

impl Field {
    /// Return the YAML key for the field.
    pub(crate) fn key(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Description => "short_description",
            Self::Tags => "tags",
            Self::Title => "title",
            Self::SourceCodeUrl => "source_code_url",
            Self::Type => "type",
        }
    }
}

/// Where a resolved field value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    /// Already present in the loaded file.
    Existing,
    /// Supplied on the command line.
    Explicit,
    /// Read from the repository variable.
    StoredVariable,
    /// Newly generated.
    Generated {
        /// Whether the repository variable was updated.
        stored: bool,
    },
    /// Read from the GitHub repository.
    GitHub,
    /// Fell back to the default text.
    Placeholder,
    /// Merged with repository topics.
    Topics {
        /// Number of tags the topics added.
        added: usize,
    },
    /// Derived from the repository name.
    RepositoryName,
    /// Inferred from a tag or topic.
    Tag(String),
    /// Left untouched.
    Unchanged,
}

/// One field resolution recorded during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Field that was resolved.
    pub(crate) field: Field,
    /// How the field got its value.
    pub(crate) origin: Origin,
}

/// Result of processing a catalog file.
#[derive(Debug, Clone)]
pub struct Outcome {
    /// File the catalog was (or would be) written to.
    pub(crate) path: PathBuf,
    /// Contents of the loaded file, if one existed.
    pub(crate) previous: Option<String>,
    /// Serialized catalog.
    pub(crate) contents: String,
    /// Per-field resolution record, in step order.
    pub(crate) resolutions: Vec<Resolution>,
    /// Whether the file was written.
    pub(crate) written: bool,
}

/// Catalog document loaded from the workspace.
#[derive(Debug)]
struct Loaded {
    /// Parsed catalog.
    catalog: CatalogYaml,
    /// Path of the file it came from, if any.
    path: Option<PathBuf>,
    /// Raw file contents, if any.
    raw: Option<String>,
}

/// Fills in a workspace's catalog file from repository metadata.
pub struct CatalogManager<'a, S, P> {
    /// File access.
    store: &'a S,
    /// Remote metadata source.
    provider: &'a P,
    /// Directory holding the catalog file.
    workspace: PathBuf,
    /// Web root used to derive source links.
    server_url: String,
    /// Skip all writes, local and remote.
    dry_run: bool,
}

impl<'a, S, P> CatalogManager<'a, S, P>
where
    S: DescriptorStore,
    P: MetadataProvider,
{
    /// Create a manager for a workspace directory.
    pub fn new(store: &'a S, provider: &'a P, workspace: impl Into<PathBuf>) -> Self {
        Self {
            store,
            provider,
            workspace: workspace.into(),
            server_url: DEFAULT_SERVER_URL.to_string(),
            dry_run: false,
        }
    }

    /// Use a different web root for derived source links.
    pub fn with_server_url(mut self, server_url: &str) -> Self {
        self.server_url = server_url.trim_end_matches('/').to_string();
        self
    }

    /// Resolve without writing the file or storing a new identifier.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Load, resolve, and save the catalog for `repository`.
    pub async fn process(
        &self,
        repository: &str,
        catalog_identifier: Option<&str>,
    ) -> Result<Outcome> {
        if repository.trim().is_empty() {
            return Err(Error::MissingRepositoryName);
        }

        info!("Extracting information from GitHub...");

        let Loaded {
            mut catalog,
            path,
            raw,
        } = self.load()?;

        let parsed = CleanTitle::parse(repository);
        let resolutions = vec![
            self.check_id(&mut catalog, catalog_identifier).await?,
            self.check_description(&mut catalog).await?,
            self.check_tags(&mut catalog).await?,
            check_title(&mut catalog, &parsed),
            self.check_source_code_url(&mut catalog, repository),
            // Must run after the tags are merged.
            check_type(&mut catalog, &parsed)?,
        ];

        let output_path = match path {
            Some(path) => path,
            None => self.store.resolve_path(&self.workspace, CATALOG_FILE),
        };
        let contents = catalog.to_yaml()?;

        let written = if self.dry_run {
            info!("Dry run, not writing {}", output_path.display());
            false
        } else {
            debug!(
                "Serializing and saving the updated catalog file with path: {}",
                output_path.display()
            );
            self.store.write(&output_path, &contents)?;
            info!(
                "Finished. Updated or created file with path: {}",
                output_path.display()
            );
            true
        };

        Ok(Outcome {
            path: output_path,
            previous: raw,
            contents,
            resolutions,
            written,
        })
    }

    /// Load the first descriptor file found in the workspace.
    fn load(&self) -> Result<Loaded> {
        debug!("Checking for a {CATALOG_FILE} or {MANIFEST_FILE} file in the workspace root.");

        for file_name in [CATALOG_FILE, MANIFEST_FILE] {
            let path = self.store.resolve_path(&self.workspace, file_name);
            if !self.store.exists(&path)? {
                continue;
            }

            debug!("Found file at: {}", path.display());
            let raw = self.store.read(&path)?;
            let catalog = CatalogYaml::parse(&raw, &path)?;
            debug!("Existing catalog file parsed.");
            return Ok(Loaded {
                catalog,
                path: Some(path),
                raw: Some(raw),
            });
        }

        debug!("No existing catalog file found.");
        Ok(Loaded {
            catalog: CatalogYaml::default(),
            path: None,
            raw: None,
        })
    }

    /// Fill in the identifier from the command line, the repository variable, or a new UUID.
    async fn check_id(
        &self,
        catalog: &mut CatalogYaml,
        catalog_identifier: Option<&str>,
    ) -> Result<Resolution> {
        debug!("Checking if ID exists, otherwise retrieve or create it...");
        let resolution = |origin| Resolution {
            field: Field::Id,
            origin,
        };

        if !is_blank(catalog.id.as_ref()) {
            return Ok(resolution(Origin::Existing));
        }

        if let Some(identifier) = catalog_identifier.map(str::trim)
            && !identifier.is_empty()
        {
            catalog.id = Some(identifier.to_string());
            return Ok(resolution(Origin::Explicit));
        }

        if let Some(identifier) = self.provider.stored_identifier().await?
            && !identifier.trim().is_empty()
        {
            catalog.id = Some(identifier);
            return Ok(resolution(Origin::StoredVariable));
        }

        debug!("Creating new ID...");
        let identifier = Uuid::new_v4().to_string();
        let stored = if self.dry_run {
            false
        } else {
            self.store_identifier(&identifier).await
        };
        catalog.id = Some(identifier);
        Ok(resolution(Origin::Generated { stored }))
    }

    /// Store a new identifier on the repository, logging rather than failing.
    async fn store_identifier(&self, identifier: &str) -> bool {
        match self.provider.create_stored_identifier(identifier).await {
            Ok(true) => {
                debug!("New catalog ID created and stored in GitHub variable.");
                true
            }
            Ok(false) => {
                warn!("New catalog ID could not be stored in GitHub; it is only kept in the file.");
                false
            }
            Err(error) => {
                warn!("Failed to store new catalog ID in GitHub: {error}");
                false
            }
        }
    }

    /// Fill in the short description from GitHub, or the placeholder text.
    async fn check_description(&self, catalog: &mut CatalogYaml) -> Result<Resolution> {
        debug!("Checking if short_description exists, otherwise use the repository description...");
        if !is_blank(catalog.short_description.as_ref()) {
            return Ok(Resolution {
                field: Field::Description,
                origin: Origin::Existing,
            });
        }

        let (description, origin) = match self.provider.description().await? {
            Some(description) if !description.trim().is_empty() => (description, Origin::GitHub),
            _ => (DEFAULT_DESCRIPTION.to_string(), Origin::Placeholder),
        };
        debug!("Description applied: {description}");
        catalog.short_description = Some(description);
        Ok(Resolution {
            field: Field::Description,
            origin,
        })
    }

    /// Merge repository topics into the tags.
    ///
    /// Topics are fetched even when the file already has tags.
    async fn check_tags(&self, catalog: &mut CatalogYaml) -> Result<Resolution> {
        debug!("Extending tags with GitHub repository topics...");
        let before = catalog.tags.len();
        if let Some(topics) = self.provider.topics().await? {
            catalog.tags.extend(topics);
        }

        let added = catalog.tags.len() - before;
        if added > 0 {
            debug!("{added} distinct GitHub topics applied.");
        }
        Ok(Resolution {
            field: Field::Tags,
            origin: Origin::Topics { added },
        })
    }

    /// Derive the source link from an `owner/repo` name.
    fn check_source_code_url(&self, catalog: &mut CatalogYaml, repository: &str) -> Resolution {
        let origin = if !is_blank(catalog.source_code_url.as_ref()) {
            Origin::Existing
        } else if repository.contains('/') {
            let url = format!("{}/{}", self.server_url, repository.trim());
            debug!("Source code URL applied: {url}");
            catalog.source_code_url = Some(url);
            Origin::RepositoryName
        } else {
            Origin::Unchanged
        };

        Resolution {
            field: Field::SourceCodeUrl,
            origin,
        }
    }
}

/// Fill in the title from the cleaned repository name.
fn check_title(catalog: &mut CatalogYaml, parsed: &CleanTitle) -> Resolution {
    debug!("Checking if title exists, otherwise use the cleaned-up repository name...");
    let origin = if is_blank(catalog.title.as_ref()) {
        catalog.title = Some(parsed.title.clone());
        debug!("Repository name cleaned and applied: {}", parsed.title);
        Origin::RepositoryName
    } else {
        Origin::Existing
    };

    Resolution {
        field: Field::Title,
        origin,
    }
}

/// Fill in the type from the repository name, then from the tags.
fn check_type(catalog: &mut CatalogYaml, parsed: &CleanTitle) -> Result<Resolution> {
    debug!("Checking if type exists, otherwise infer it from repository name or topics...");
    let resolution = |origin| Resolution {
        field: Field::Type,
        origin,
    };

    if !is_blank(catalog.item_type.as_ref()) {
        return Ok(resolution(Origin::Existing));
    }

    if let Some(item_type) = parsed.item_type {
        debug!("Item type inferred from repository name: {item_type}");
        catalog.item_type = Some(item_type.to_string());
        return Ok(resolution(Origin::RepositoryName));
    }

    let from_tags = catalog
        .tags
        .iter()
        .find_map(|tag| artifact::catalog_name_for(tag).map(|name| (tag.clone(), name)));
    if let Some((tag, item_type)) = from_tags {
        debug!("Item type inferred from repository topics: {item_type}");
        catalog.item_type = Some(item_type.to_string());
        return Ok(resolution(Origin::Tag(tag)));
    }

    Err(Error::UnknownType)
}
