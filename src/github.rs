//! Repository metadata retrieved from the GitHub REST API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode, header};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};

/// Name of the repository variable holding the catalog identifier.
pub const IDENTIFIER_VARIABLE: &str = "catalogIdentifier";

/// User agent sent with every API request.
const USER_AGENT: &str = "GitHubToCatalogYaml";

/// Media type requested from the API.
const MEDIA_TYPE: &str = "application/vnd.github+json";

/// REST API version pinned for all requests.
const API_VERSION: &str = "2022-11-28";

/// Per-request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Source of repository metadata used to fill in catalog fields.
///
/// `Ok(None)` means the repository has no data for that field; errors are
/// reserved for transport and decoding failures.
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Fetch the repository description.
    async fn description(&self) -> Result<Option<String>>;

    /// Fetch the repository topics.
    async fn topics(&self) -> Result<Option<Vec<String>>>;

    /// Fetch a previously stored catalog identifier.
    async fn stored_identifier(&self) -> Result<Option<String>>;

    /// Store a catalog identifier, returning false when the API rejects it.
    async fn create_stored_identifier(&self, identifier: &str) -> Result<bool>;
}

/// Repository fields read from `GET /repos/{owner}/{repo}`.
#[derive(Debug, Deserialize)]
struct RepositoryResponse {
    /// Repository description, null when unset.
    #[serde(default)]
    description: Option<String>,
}

/// Body of `GET /repos/{owner}/{repo}/topics`.
#[derive(Debug, Deserialize)]
struct TopicsResponse {
    /// Topic names.
    #[serde(default)]
    names: Vec<String>,
}

/// Body of `GET /repos/{owner}/{repo}/actions/variables/{name}`.
#[derive(Debug, Deserialize)]
struct VariableResponse {
    /// Variable value.
    #[serde(default)]
    value: Option<String>,
}

/// Body of `POST /repos/{owner}/{repo}/actions/variables`.
#[derive(Debug, Serialize)]
struct CreateVariableRequest<'a> {
    /// Variable name.
    name: &'a str,
    /// Variable value.
    value: &'a str,
}

/// GitHub REST client scoped to one repository.
#[derive(Debug, Clone)]
pub struct GitHubService {
    /// Shared HTTP client.
    client: Client,
    /// Token sent as a bearer credential.
    token: String,
    /// `{api}/repos/{owner}/{repo}` without a trailing slash.
    repository_url: String,
}

impl GitHubService {
    /// Create a client for `repository` (`owner/repo`) against an API base URL.
    pub fn new(api_url: &str, token: &str, repository: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|error| Error::HttpClient { source: error })?;

        Ok(Self::with_client(client, api_url, token, repository))
    }

    /// Create a service around an already configured HTTP client.
    fn with_client(client: Client, api_url: &str, token: &str, repository: &str) -> Self {
        Self {
            client,
            token: token.to_string(),
            repository_url: repository_url(api_url, repository),
        }
    }

    /// Build a request with the standard headers.
    fn request(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .bearer_auth(&self.token)
            .header(header::ACCEPT, MEDIA_TYPE)
            .header("X-GitHub-Api-Version", API_VERSION)
    }

    /// Send a GET request to a path under the repository URL.
    async fn get(&self, path: &str) -> Result<(String, Response)> {
        let url = format!("{}{path}", self.repository_url);
        let response = self
            .request(self.client.get(&url))
            .send()
            .await
            .map_err(|error| Error::GitHubRequest {
                url: url.clone(),
                source: error,
            })?;
        Ok((url, response))
    }
}

#[async_trait]
impl MetadataProvider for GitHubService {
    async fn description(&self) -> Result<Option<String>> {
        let (url, response) = self.get("").await?;
        if read_status(response.status(), "repository description") == ReadStatus::Absent {
            return Ok(None);
        }

        let repository: RepositoryResponse = decode(&url, response).await?;
        if repository.description.is_none() {
            debug!("Repository has no description.");
        }
        Ok(repository.description)
    }

    async fn topics(&self) -> Result<Option<Vec<String>>> {
        let (url, response) = self.get("/topics").await?;
        if read_status(response.status(), "repository topics") == ReadStatus::Absent {
            return Ok(None);
        }

        let topics: TopicsResponse = decode(&url, response).await?;
        Ok(Some(topics.names))
    }

    async fn stored_identifier(&self) -> Result<Option<String>> {
        let (url, response) = self
            .get(&format!("/actions/variables/{IDENTIFIER_VARIABLE}"))
            .await?;
        if variable_status(response.status()) == ReadStatus::Absent {
            return Ok(None);
        }

        let variable: VariableResponse = decode(&url, response).await?;
        Ok(variable.value)
    }

    async fn create_stored_identifier(&self, identifier: &str) -> Result<bool> {
        let url = format!("{}/actions/variables", self.repository_url);
        let body = CreateVariableRequest {
            name: IDENTIFIER_VARIABLE,
            value: identifier,
        };
        let response = self
            .request(self.client.post(&url))
            .json(&body)
            .send()
            .await
            .map_err(|error| Error::GitHubRequest {
                url: url.clone(),
                source: error,
            })?;

        Ok(create_status(response.status()))
    }
}

/// What to do with a read response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReadStatus {
    /// Decode the body.
    Decode,
    /// Treat the field as absent.
    Absent,
}

/// Map a repository read status; failures are logged and read as absent.
fn read_status(status: StatusCode, resource: &str) -> ReadStatus {
    if status.is_success() {
        return ReadStatus::Decode;
    }
    warn!("Failed to retrieve {resource}: {status}");
    ReadStatus::Absent
}

/// Map the identifier variable status; a missing variable is expected.
fn variable_status(status: StatusCode) -> ReadStatus {
    match status {
        status if status.is_success() => ReadStatus::Decode,
        StatusCode::NOT_FOUND => {
            debug!("No {IDENTIFIER_VARIABLE} variable stored on the repository.");
            ReadStatus::Absent
        }
        status => {
            warn!("Failed to retrieve {IDENTIFIER_VARIABLE} from GitHub: {status}");
            ReadStatus::Absent
        }
    }
}

/// Map the variable creation status to whether the identifier was stored.
fn create_status(status: StatusCode) -> bool {
    if status.is_success() {
        info!("Successfully created {IDENTIFIER_VARIABLE} in GitHub repository.");
        return true;
    }
    warn!("Failed to create {IDENTIFIER_VARIABLE} in GitHub repository: {status}");
    false
}

/// Build the repository API URL from an API base and `owner/repo`.
fn repository_url(api_url: &str, repository: &str) -> String {
    format!(
        "{}/repos/{}",
        api_url.trim_end_matches('/'),
        repository.trim().trim_matches('/')
    )
}

/// Read a response body and decode it as JSON.
async fn decode<T: DeserializeOwned>(url: &str, response: Response) -> Result<T> {
    let body = response.text().await.map_err(|error| Error::GitHubRequest {
        url: url.to_string(),
        source: error,
    })?;
    parse_body(url, &body)
}

/// Decode a JSON body, attributing failures to `url`.
fn parse_body<T: DeserializeOwned>(url: &str, body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|error| Error::GitHubDecode {
        url: url.to_string(),
        message: error.to_string(),
    })
}
