use nf_core::{Article, ArticleKey};
use std::collections::HashSet;

/// The in-memory working set: preview articles from the index, replaced
/// source by source with full per-source documents as they arrive.
#[derive(Debug, Clone, Default)]
pub struct ArticleStore {
    articles: Vec<Article>,
    loaded: HashSet<String>,
    all_loaded: bool,
}

impl ArticleStore {
    pub fn from_preview(articles: Vec<Article>) -> Self {
        Self {
            articles,
            ..Default::default()
        }
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    pub fn count_for(&self, source: &str) -> usize {
        self.articles.iter().filter(|a| a.source == source).count()
    }

    pub fn is_loaded(&self, source: &str) -> bool {
        self.loaded.contains(source)
    }

    pub fn loaded_sources(&self) -> impl Iterator<Item = &str> {
        self.loaded.iter().map(String::as_str)
    }

    pub fn all_loaded(&self) -> bool {
        self.all_loaded
    }

    pub fn mark_all_loaded(&mut self) {
        self.all_loaded = true;
    }

    /// Replaces everything held for `source` with `articles` and marks the
    /// source loaded. Repeated entries (same source and URL) collapse to the
    /// first occurrence. Returns how many articles were added.
    pub fn merge_source(&mut self, source: &str, articles: Vec<Article>) -> usize {
        self.articles.retain(|a| a.source != source);

        let mut seen: HashSet<ArticleKey> = self.articles.iter().map(Article::key).collect();
        let before = self.articles.len();
        self.articles
            .extend(articles.into_iter().filter(|a| seen.insert(a.key())));

        self.loaded.insert(source.to_string());
        self.articles.len() - before
    }
}
