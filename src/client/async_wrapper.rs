//! Async wrapper around the synchronous SnapshotClient.
//!
//! The fetch runs under `tokio::task::spawn_blocking` so the runtime is never
//! blocked on network or disk I/O.

use crate::client::SnapshotClient;
use crate::error::{LoadError, LoadResult};
use crate::models::Snapshot;
use async_trait::async_trait;
use std::sync::Arc;

/// Source of a voter snapshot.
///
/// The session depends on this trait rather than on a concrete client, so
/// tests can load fixtures without I/O.
#[async_trait]
pub trait SnapshotLoader: Send + Sync {
    async fn load_snapshot(&self) -> LoadResult<Snapshot>;
}

/// Async wrapper around the synchronous SnapshotClient.
#[derive(Clone)]
pub struct AsyncSnapshotClient {
    client: Arc<SnapshotClient>,
}

impl AsyncSnapshotClient {
    pub fn new(client: SnapshotClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}

#[async_trait]
impl SnapshotLoader for AsyncSnapshotClient {
    async fn load_snapshot(&self) -> LoadResult<Snapshot> {
        let client = self.client.clone();

        tokio::task::spawn_blocking(move || client.fetch())
            .await
            .map_err(|e| LoadError::Join(e.to_string()))?
    }
}
