use async_trait::async_trait;
use nf_core::{Error, Result};
use std::path::{Path, PathBuf};

use crate::DocumentSource;

/// Reads documents from a site directory on disk.
pub struct FileSource {
    root: PathBuf,
}

impl FileSource {
    pub fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(Error::InvalidLocation(format!(
                "{} is not a directory",
                root.display()
            )));
        }
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl DocumentSource for FileSource {
    fn name(&self) -> &str {
        "file"
    }

    async fn fetch(&self, path: &str) -> Result<String> {
        Ok(tokio::fs::read_to_string(self.root.join(path)).await?)
    }
}
