use async_trait::async_trait;
use nf_core::{Error, Result};
use reqwest::Client;
use url::Url;

use crate::DocumentSource;

/// Fetches documents from a static site over HTTP GET.
pub struct HttpSource {
    base: Url,
    client: Client,
}

impl HttpSource {
    pub fn new(base: &str) -> Result<Self> {
        Self::with_client(base, Client::new())
    }

    pub fn with_client(base: &str, client: Client) -> Result<Self> {
        let mut base = Url::parse(base)
            .map_err(|e| Error::InvalidLocation(format!("{}: {}", base, e)))?;
        // Url::join drops the last segment unless the base ends with a slash.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self { base, client })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    pub fn resolve(&self, path: &str) -> Result<Url> {
        self.base
            .join(path)
            .map_err(|e| Error::InvalidLocation(format!("{}: {}", path, e)))
    }
}

#[async_trait]
impl DocumentSource for HttpSource {
    fn name(&self) -> &str {
        "http"
    }

    async fn fetch(&self, path: &str) -> Result<String> {
        let url = self.resolve(path)?;
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.text().await?)
    }
}
