use async_trait::async_trait;
use nf_core::{Error, Result};
use std::collections::HashMap;
use std::io;
use tokio::sync::RwLock;

use crate::DocumentSource;

/// In-memory documents keyed by path. Records every request so callers can
/// assert on network traffic.
#[derive(Default)]
pub struct MemorySource {
    documents: RwLock<HashMap<String, String>>,
    requests: RwLock<Vec<String>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(mut self, path: impl Into<String>, body: impl Into<String>) -> Self {
        self.documents.get_mut().insert(path.into(), body.into());
        self
    }

    pub fn with_json<T: serde::Serialize>(self, path: impl Into<String>, value: &T) -> Result<Self> {
        let body = serde_json::to_string(value)?;
        Ok(self.with_document(path, body))
    }

    pub async fn insert(&self, path: impl Into<String>, body: impl Into<String>) {
        self.documents.write().await.insert(path.into(), body.into());
    }

    pub async fn remove(&self, path: &str) -> Option<String> {
        self.documents.write().await.remove(path)
    }

    pub async fn requests(&self) -> Vec<String> {
        self.requests.read().await.clone()
    }

    pub async fn fetch_count(&self, path: &str) -> usize {
        self.requests.read().await.iter().filter(|p| *p == path).count()
    }
}

#[async_trait]
impl DocumentSource for MemorySource {
    fn name(&self) -> &str {
        "memory"
    }

    async fn fetch(&self, path: &str) -> Result<String> {
        self.requests.write().await.push(path.to_string());
        self.documents
            .read()
            .await
            .get(path)
            .cloned()
            .ok_or_else(|| {
                Error::Io(io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("no document at {}", path),
                ))
            })
    }
}
