//! Test doubles for the descriptor store and the metadata provider.
//!
//! `MemoryStore` keeps files in a map and records every write; `MockProvider`
//! serves canned GitHub responses and counts calls. Both use builder methods
//! so tests read as a short description of the scenario.

use std::{
    collections::HashMap,
    io,
    path::{Path, PathBuf},
    sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use async_trait::async_trait;

use crate::{
    error::{Error, Result},
    github::MetadataProvider,
    store::DescriptorStore,
};

/// Workspace root used by in-memory tests.
pub const WORKSPACE: &str = "testWorkspace";

/// Path of the primary catalog file in the test workspace.
pub fn catalog_path() -> PathBuf {
    Path::new(WORKSPACE).join("catalog.yml")
}

/// Path of the manifest file in the test workspace.
pub fn manifest_path() -> PathBuf {
    Path::new(WORKSPACE).join("manifest.yml")
}

/// Which store operation should fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreFault {
    /// `exists` fails.
    Exists,
    /// `read` fails.
    Read,
    /// `write` fails.
    Write,
}

/// In-memory descriptor store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    /// File contents keyed by path.
    files: Mutex<HashMap<PathBuf, String>>,
    /// Paths written, in order.
    writes: Mutex<Vec<PathBuf>>,
    /// Paths read, in order.
    reads: Mutex<Vec<PathBuf>>,
    /// Operation that should fail, if any.
    fault: Option<StoreFault>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file.
    pub fn with_file(self, path: impl Into<PathBuf>, contents: &str) -> Self {
        self.files
            .lock()
            .expect("files lock")
            .insert(path.into(), contents.to_string());
        self
    }

    /// Add `catalog.yml` to the workspace.
    pub fn with_catalog(self, contents: &str) -> Self {
        self.with_file(catalog_path(), contents)
    }

    /// Add `manifest.yml` to the workspace.
    pub fn with_manifest(self, contents: &str) -> Self {
        self.with_file(manifest_path(), contents)
    }

    /// Make one operation fail.
    pub fn failing(mut self, fault: StoreFault) -> Self {
        self.fault = Some(fault);
        self
    }

    /// Return the current contents of a file.
    pub fn contents(&self, path: &Path) -> Option<String> {
        self.files.lock().expect("files lock").get(path).cloned()
    }

    /// Return every path written so far.
    pub fn writes(&self) -> Vec<PathBuf> {
        self.writes.lock().expect("writes lock").clone()
    }

    /// Return every path read so far.
    pub fn reads(&self) -> Vec<PathBuf> {
        self.reads.lock().expect("reads lock").clone()
    }

    /// Build the injected IO error.
    fn injected(&self, fault: StoreFault, message: &str) -> Option<io::Error> {
        if self.fault == Some(fault) {
            Some(io::Error::other(message.to_string()))
        } else {
            None
        }
    }
}

impl DescriptorStore for MemoryStore {
    fn exists(&self, path: &Path) -> Result<bool> {
        if let Some(error) = self.injected(StoreFault::Exists, "File system failure") {
            return Err(Error::DescriptorLookup {
                path: path.to_path_buf(),
                source: error,
            });
        }
        Ok(self.files.lock().expect("files lock").contains_key(path))
    }

    fn read(&self, path: &Path) -> Result<String> {
        self.reads
            .lock()
            .expect("reads lock")
            .push(path.to_path_buf());
        if let Some(error) = self.injected(StoreFault::Read, "File read failure") {
            return Err(Error::DescriptorRead {
                path: path.to_path_buf(),
                source: error,
            });
        }
        self.contents(path).ok_or_else(|| Error::DescriptorRead {
            path: path.to_path_buf(),
            source: io::Error::from(io::ErrorKind::NotFound),
        })
    }

    fn write(&self, path: &Path, contents: &str) -> Result<()> {
        if let Some(error) = self.injected(StoreFault::Write, "File write failure") {
            return Err(Error::DescriptorWrite {
                path: path.to_path_buf(),
                source: error,
            });
        }
        self.writes
            .lock()
            .expect("writes lock")
            .push(path.to_path_buf());
        self.files
            .lock()
            .expect("files lock")
            .insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }
}

/// How the mock answers a request to store an identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateResponse {
    /// The variable is created.
    Created,
    /// The API rejects the request.
    Rejected,
    /// The request fails in transport.
    Failed,
}

/// Canned GitHub metadata with call counters.
///
/// Injected failures use `Error::GitHubDecode` since a `reqwest::Error` cannot
/// be constructed outside reqwest.
#[derive(Debug)]
pub struct MockProvider {
    /// Repository description.
    description: Option<String>,
    /// Repository topics.
    topics: Option<Vec<String>>,
    /// Stored identifier variable.
    stored_identifier: Option<String>,
    /// Answer to identifier creation.
    create_response: CreateResponse,
    /// Make topic retrieval fail.
    fail_topics: bool,
    /// Calls to `description`.
    description_calls: AtomicUsize,
    /// Calls to `topics`.
    topics_calls: AtomicUsize,
    /// Calls to `stored_identifier`.
    identifier_calls: AtomicUsize,
    /// Identifiers passed to `create_stored_identifier`.
    created: Mutex<Vec<String>>,
}

impl Default for MockProvider {
    fn default() -> Self {
        Self {
            description: None,
            topics: None,
            stored_identifier: None,
            create_response: CreateResponse::Created,
            fail_topics: false,
            description_calls: AtomicUsize::new(0),
            topics_calls: AtomicUsize::new(0),
            identifier_calls: AtomicUsize::new(0),
            created: Mutex::new(Vec::new()),
        }
    }
}

impl MockProvider {
    /// Create a provider with no metadata.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve a repository description.
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// Serve repository topics.
    pub fn with_topics(mut self, topics: &[&str]) -> Self {
        self.topics = Some(topics.iter().map(ToString::to_string).collect());
        self
    }

    /// Serve a stored identifier.
    pub fn with_stored_identifier(mut self, identifier: &str) -> Self {
        self.stored_identifier = Some(identifier.to_string());
        self
    }

    /// Answer identifier creation with `response`.
    pub fn with_create_response(mut self, response: CreateResponse) -> Self {
        self.create_response = response;
        self
    }

    /// Fail topic retrieval with a transport error.
    pub fn failing_topics(mut self) -> Self {
        self.fail_topics = true;
        self
    }

    /// Number of description requests.
    pub fn description_calls(&self) -> usize {
        self.description_calls.load(Ordering::SeqCst)
    }

    /// Number of topic requests.
    pub fn topics_calls(&self) -> usize {
        self.topics_calls.load(Ordering::SeqCst)
    }

    /// Number of stored identifier requests.
    pub fn identifier_calls(&self) -> usize {
        self.identifier_calls.load(Ordering::SeqCst)
    }

    /// Identifiers the manager asked to store.
    pub fn created(&self) -> Vec<String> {
        self.created.lock().expect("created lock").clone()
    }
}

#[async_trait]
impl MetadataProvider for MockProvider {
    async fn description(&self) -> Result<Option<String>> {
        self.description_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.description.clone())
    }

    async fn topics(&self) -> Result<Option<Vec<String>>> {
        self.topics_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_topics {
            return Err(Error::GitHubDecode {
                url: "https://api.github.com/repos/o/r/topics".to_string(),
                message: "connection reset".to_string(),
            });
        }
        Ok(self.topics.clone())
    }

    async fn stored_identifier(&self) -> Result<Option<String>> {
        self.identifier_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.stored_identifier.clone())
    }

    async fn create_stored_identifier(&self, identifier: &str) -> Result<bool> {
        self.created
            .lock()
            .expect("created lock")
            .push(identifier.to_string());
        match self.create_response {
            CreateResponse::Created => Ok(true),
            CreateResponse::Rejected => Ok(false),
            CreateResponse::Failed => Err(Error::GitHubDecode {
                url: "https://api.github.com/repos/o/r/actions/variables".to_string(),
                message: "connection reset".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_records_writes_and_contents() {
        let store = MemoryStore::new().with_catalog("id: x\n");
        assert!(store.exists(&catalog_path()).expect("exists"));
        assert!(!store.exists(&manifest_path()).expect("exists"));

        store.write(&manifest_path(), "id: y\n").expect("write");
        assert_eq!(store.writes(), vec![manifest_path()]);
        assert_eq!(store.contents(&manifest_path()).as_deref(), Some("id: y\n"));
    }

    #[test]
    fn store_faults_surface_as_errors() {
        let store = MemoryStore::new().failing(StoreFault::Exists);
        let error = store
            .exists(&catalog_path())
            .expect_err("exists should fail");
        assert_eq!(
            error.to_string(),
            format!(
                "Failed to access {}: File system failure",
                catalog_path().display()
            )
        );
    }

    #[tokio::test]
    async fn provider_counts_calls() {
        let provider = MockProvider::new().with_topics(&["a"]);
        assert_eq!(
            provider.topics().await.expect("topics"),
            Some(vec!["a".to_string()])
        );
        assert!(provider.description().await.expect("description").is_none());
        assert_eq!(provider.topics_calls(), 1);
        assert_eq!(provider.description_calls(), 1);
    }
}
