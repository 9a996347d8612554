//! Snapshot client for fetching the extracted voter roll.
//!
//! This module provides a synchronous client that reads the snapshot JSON
//! from an HTTP(S) URL or a local file. It can be used from async contexts
//! via `tokio::task::spawn_blocking`; see [`AsyncSnapshotClient`].

mod async_wrapper;
pub use async_wrapper::{AsyncSnapshotClient, SnapshotLoader};

use crate::error::{LoadError, LoadResult};
use crate::models::Snapshot;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Where a snapshot comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotSource {
    Url(String),
    Path(PathBuf),
}

impl SnapshotSource {
    /// `http://` and `https://` strings are URLs; anything else is a path.
    pub fn parse(source: &str) -> Self {
        let trimmed = source.trim();
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Self::Url(trimmed.to_string())
        } else {
            Self::Path(PathBuf::from(trimmed))
        }
    }
}

impl fmt::Display for SnapshotSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url(url) => write!(f, "{}", url),
            Self::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Client for a voter snapshot.
///
/// This client uses `ureq` for synchronous HTTP requests and can be called
/// from async contexts using `tokio::task::spawn_blocking`.
#[derive(Clone)]
pub struct SnapshotClient {
    /// Snapshot location
    source: SnapshotSource,

    /// HTTP client agent
    agent: Arc<ureq::Agent>,
}

impl SnapshotClient {
    /// Create a new SnapshotClient with a request timeout.
    pub fn new(source: SnapshotSource, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();

        Self {
            source,
            agent: Arc::new(agent),
        }
    }

    pub fn source(&self) -> &SnapshotSource {
        &self.source
    }

    /// Fetch and parse the snapshot.
    pub fn fetch(&self) -> LoadResult<Snapshot> {
        let start = Instant::now();
        let result = match &self.source {
            SnapshotSource::Url(url) => self.fetch_url(url),
            SnapshotSource::Path(path) => Self::read_file(path),
        };

        match &result {
            Ok(snapshot) => tracing::debug!(
                source = %self.source,
                voters = snapshot.voters.len(),
                elapsed_ms = start.elapsed().as_millis() as u64,
                "Snapshot fetched"
            ),
            Err(e) => tracing::error!(source = %self.source, error = %e, "Snapshot fetch failed"),
        }

        result
    }

    fn fetch_url(&self, url: &str) -> LoadResult<Snapshot> {
        tracing::debug!("GET {}", url);

        let response = self
            .agent
            .get(url)
            .set("Accept", "application/json")
            .call()
            .map_err(map_error)?;

        let snapshot = serde_json::from_reader(response.into_reader())?;
        Ok(snapshot)
    }

    fn read_file(path: &Path) -> LoadResult<Snapshot> {
        let body = std::fs::read_to_string(path)?;
        Ok(Snapshot::from_json(&body)?)
    }
}

/// Map ureq errors to LoadError.
fn map_error(error: ureq::Error) -> LoadError {
    match error {
        ureq::Error::Status(code, response) => {
            let message = response
                .into_string()
                .unwrap_or_else(|_| "Unknown error".to_string());
            LoadError::Status {
                status: code,
                message,
            }
        }
        ureq::Error::Transport(transport) => {
            if transport.kind() == ureq::ErrorKind::ConnectionFailed {
                LoadError::Http("Connection failed".to_string())
            } else if transport.kind() == ureq::ErrorKind::Io {
                LoadError::Timeout
            } else {
                LoadError::Http(transport.to_string())
            }
        }
    }
}
