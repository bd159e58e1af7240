use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// A single feed entry as written by the collection pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub source: String,
    pub title: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collected_at: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,
}

impl Article {
    pub fn new(source: impl Into<String>, title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            title: title.into(),
            url: url.into(),
            summary: None,
            author: None,
            date: None,
            collected_at: None,
            categories: Vec::new(),
        }
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    pub fn with_collected_at(mut self, collected_at: impl Into<String>) -> Self {
        self.collected_at = Some(collected_at.into());
        self
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    pub fn key(&self) -> ArticleKey {
        ArticleKey::new(&self.source, &self.url)
    }

    /// String used for ordering: `date`, else the full `collected_at`, else empty.
    pub fn sort_date(&self) -> &str {
        non_empty(&self.date)
            .or_else(|| non_empty(&self.collected_at))
            .unwrap_or("")
    }

    /// Calendar part of the effective date: `date`, else `collected_at` up to
    /// the first space or `T`.
    pub fn date_str(&self) -> Option<&str> {
        non_empty(&self.date).or_else(|| {
            non_empty(&self.collected_at)
                .and_then(|c| c.split([' ', 'T']).next())
                .filter(|d| !d.is_empty())
        })
    }

    /// Text the free-text search runs against.
    pub fn searchable_text(&self) -> String {
        let mut parts = vec![
            self.title.as_str(),
            self.summary.as_deref().unwrap_or(""),
            self.source.as_str(),
        ];
        parts.extend(self.categories.iter().map(String::as_str));
        parts.join(" ").to_lowercase()
    }
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

/// Stable identity of an article, derived from its source and URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArticleKey([u8; 32]);

impl ArticleKey {
    pub fn new(source: &str, url: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(source.as_bytes());
        hasher.update([0u8]);
        hasher.update(url.as_bytes());
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&hasher.finalize());
        Self(bytes)
    }
}

impl fmt::Display for ArticleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0[..8] {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceMetadata {
    pub name: String,
    pub file: String,
    #[serde(default)]
    pub total_articles: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_count: Option<usize>,
}

impl SourceMetadata {
    pub fn new(name: impl Into<String>, file: impl Into<String>, total_articles: usize) -> Self {
        Self {
            name: name.into(),
            file: file.into(),
            total_articles,
            latest_date: None,
            preview_count: None,
        }
    }
}

/// `data/index.json`: preview articles plus one metadata entry per source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_sources: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_articles: Option<usize>,
    #[serde(default)]
    pub preview_articles: Vec<Article>,
    #[serde(default)]
    pub sources: Vec<SourceMetadata>,
}

/// Per-source document, `data/<file>`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_articles: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub articles: Vec<Article>,
}
