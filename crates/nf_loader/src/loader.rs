use futures::future::join_all;
use nf_core::{Article, Error, IndexDocument, Result, SourceDocument, SourceMetadata};
use serde::de::DeserializeOwned;
use std::sync::Arc;

use crate::logging::Logger;
use crate::store::ArticleStore;
use crate::DocumentSource;

/// Directory prefixes tried, in order, for every document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderPaths {
    pub primary: String,
    pub fallback: String,
}

impl Default for LoaderPaths {
    fn default() -> Self {
        Self {
            primary: "data".to_string(),
            fallback: "../data".to_string(),
        }
    }
}

impl LoaderPaths {
    fn join(prefix: &str, relative: &str) -> String {
        format!("{}/{}", prefix.trim_end_matches('/'), relative.trim_start_matches('/'))
    }
}

/// Document paths named by feed metadata must stay inside the data directory.
fn check_document_path(relative: &str) -> Result<()> {
    let escapes = relative.is_empty()
        || relative.starts_with(['/', '\\'])
        || relative.contains(':')
        || relative.split(['/', '\\']).any(|part| part == "..");
    if escapes {
        return Err(Error::InvalidArgument(format!(
            "document path leaves the data directory: {}",
            relative
        )));
    }
    Ok(())
}

/// Result of asking for a source's full document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded(usize),
    AlreadyLoaded,
    UnknownSource,
    Failed,
}

pub struct DataLoader {
    source: Arc<dyn DocumentSource>,
    paths: LoaderPaths,
    store: ArticleStore,
    sources: Vec<SourceMetadata>,
    updated_at: Option<String>,
    logger: Logger,
}

impl DataLoader {
    pub fn new(source: Arc<dyn DocumentSource>) -> Self {
        let logger = Logger::new().with_new_prefixes(format!("loader:{}", source.name()));
        Self {
            source,
            paths: LoaderPaths::default(),
            store: ArticleStore::default(),
            sources: Vec::new(),
            updated_at: None,
            logger,
        }
    }

    pub fn with_paths(mut self, paths: LoaderPaths) -> Self {
        self.paths = paths;
        self
    }

    pub fn articles(&self) -> &[Article] {
        self.store.articles()
    }

    pub fn store(&self) -> &ArticleStore {
        &self.store
    }

    pub fn sources(&self) -> &[SourceMetadata] {
        &self.sources
    }

    pub fn source(&self, name: &str) -> Option<&SourceMetadata> {
        self.sources.iter().find(|s| s.name == name)
    }

    pub fn updated_at(&self) -> Option<&str> {
        self.updated_at.as_deref()
    }

    pub fn is_loaded(&self, name: &str) -> bool {
        self.store.is_loaded(name)
    }

    pub fn all_sources_loaded(&self) -> bool {
        self.store.all_loaded()
    }

    async fn fetch_json<T: DeserializeOwned>(&self, relative: &str) -> Result<T> {
        let primary = LoaderPaths::join(&self.paths.primary, relative);
        let body = match self.source.fetch(&primary).await {
            Ok(body) => body,
            Err(e) => {
                let fallback = LoaderPaths::join(&self.paths.fallback, relative);
                self.logger
                    .debug(&format!("{} failed ({}), trying {}", primary, e, fallback));
                self.source.fetch(&fallback).await?
            }
        };
        Ok(serde_json::from_str(&body)?)
    }

    /// Fetches and parses the index document without touching loader state.
    pub async fn fetch_index(&self) -> Result<IndexDocument> {
        self.fetch_json("index.json")
            .await
            .map_err(|e| Error::IndexUnavailable(e.to_string()))
    }

    /// Replaces the working set with the index's preview articles and
    /// records the source metadata. Previously loaded sources are forgotten.
    pub async fn load_index(&mut self) -> Result<()> {
        let index = match self.fetch_index().await {
            Ok(index) => index,
            Err(e) => {
                self.logger.error(&format!("❌ {}", e));
                return Err(e);
            }
        };
        self.logger.info(&format!(
            "📰 Index loaded: {} preview articles from {} sources",
            index.preview_articles.len(),
            index.sources.len()
        ));
        self.updated_at = index.updated_at;
        self.sources = index.sources;
        self.store = ArticleStore::from_preview(index.preview_articles);
        Ok(())
    }

    /// Fetches and parses one source's full document without touching loader state.
    pub async fn fetch_source(&self, metadata: &SourceMetadata) -> Result<SourceDocument> {
        check_document_path(&metadata.file)
            .map_err(|e| Error::source_unavailable(&metadata.name, e))?;
        self.fetch_json(&metadata.file)
            .await
            .map_err(|e| Error::source_unavailable(&metadata.name, e))
    }

    fn apply(&mut self, name: &str, result: Result<SourceDocument>) -> LoadOutcome {
        let logger = self.logger.with_prefix(name);
        match result {
            Ok(document) => {
                let added = self.store.merge_source(name, document.articles);
                logger.info(&format!("✨ Loaded {} articles", added));
                LoadOutcome::Loaded(added)
            }
            Err(e) => {
                logger.warn(&format!("⚠️ Keeping preview data: {}", e));
                LoadOutcome::Failed
            }
        }
    }

    /// Loads the full article list for `name` once. Failures are logged and
    /// leave the preview entries in place.
    pub async fn load_source(&mut self, name: &str) -> LoadOutcome {
        if self.store.is_loaded(name) {
            self.logger.with_prefix(name).debug("already loaded");
            return LoadOutcome::AlreadyLoaded;
        }

        let Some(metadata) = self.source(name).cloned() else {
            self.logger
                .warn(&Error::UnknownSource(name.to_string()).to_string());
            return LoadOutcome::UnknownSource;
        };

        let result = self.fetch_source(&metadata).await;
        self.apply(name, result)
    }

    /// Fetches every source that is not loaded yet concurrently, then merges
    /// the results in metadata order. Runs at most once per index load.
    pub async fn load_all_sources(&mut self) -> Vec<(String, LoadOutcome)> {
        if self.store.all_loaded() {
            return Vec::new();
        }

        let pending: Vec<SourceMetadata> = self
            .sources
            .iter()
            .filter(|m| !self.store.is_loaded(&m.name))
            .cloned()
            .collect();

        self.logger
            .info(&format!("🔄 Loading {} sources", pending.len()));
        let results = join_all(pending.iter().map(|m| self.fetch_source(m))).await;

        let outcomes = pending
            .into_iter()
            .zip(results)
            .map(|(metadata, result)| {
                let outcome = self.apply(&metadata.name, result);
                (metadata.name, outcome)
            })
            .collect();

        self.store.mark_all_loaded();
        outcomes
    }
}
