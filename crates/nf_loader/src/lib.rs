use async_trait::async_trait;
use nf_core::Result;
use std::sync::Arc;

pub mod backends;
pub mod loader;
pub mod logging;
pub mod store;

pub use backends::*;
pub use loader::{DataLoader, LoadOutcome, LoaderPaths};
pub use store::ArticleStore;

/// Where feed documents come from. Paths are relative to the site root,
/// e.g. `data/index.json`.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Short backend name used in log lines
    fn name(&self) -> &str;

    /// Fetch the raw body of the document at `path`
    async fn fetch(&self, path: &str) -> Result<String>;
}

/// Picks a backend from a location string: `http(s)://` URLs go over HTTP,
/// anything else is treated as a local site directory.
pub fn create_source(location: &str) -> Result<Arc<dyn DocumentSource>> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Ok(Arc::new(HttpSource::new(location)?))
    } else {
        Ok(Arc::new(FileSource::new(location)?))
    }
}

pub mod prelude {
    pub use super::backends::*;
    pub use super::{create_source, DataLoader, DocumentSource, LoadOutcome};
}
