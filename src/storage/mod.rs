//! Object-storage collaborator.
//!
//! A thin client over an HTTP blob store: `put` uploads a named object into
//! the configured bucket and returns the URL it can be fetched from. The
//! client is constructed once at startup and injected through router state.

use std::fmt::Display;

use crate::db::config::get_env_variable;
use crate::prelude::*;

pub struct StorageConfig {
    pub endpoint: String,
    pub bucket: String,
}

impl StorageConfig {
    pub fn from_env() -> Self {
        Self {
            endpoint: get_env_variable("STORAGE_ENDPOINT"),
            bucket: get_env_variable("STORAGE_BUCKET"),
        }
    }
}

impl Display for StorageConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.endpoint, self.bucket)
    }
}

/// File names end up as one segment of the object path. Separators and `..`
/// would let a client escape its own prefix once the URL is normalized, so
/// any name that could alter the path structure is rejected outright.
pub fn is_safe_file_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains('/')
        && !name.contains('\\')
}

#[derive(Clone)]
pub struct StorageClient {
    endpoint: String,
    bucket: String,
    client: reqwest::Client,
}

impl StorageClient {
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            endpoint: config.endpoint.clone(),
            bucket: config.bucket.clone(),
            client: reqwest::Client::new(),
        }
    }

    fn object_url(&self, object: &str) -> String {
        format!("{}/{}/{object}", self.endpoint, self.bucket)
    }

    /// Uploads the blob and returns its retrievable URL.
    pub async fn put(&self, object: &str, bytes: Vec<u8>, content_type: &str) -> Result<String> {
        let url = self.object_url(object);
        let response = self
            .client
            .put(&url)
            .header("content-type", content_type)
            .body(bytes)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::StorageBackend(format!(
                "storage backend returned {}",
                response.status()
            )));
        }
        Ok(url)
    }
}
