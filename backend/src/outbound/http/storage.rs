//! Reqwest-backed object storage adapter.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use crate::domain::ports::{ObjectStorage, ObjectStorageError, ObjectUpload};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UploadResponse {
    download_url: String,
}

/// Object storage adapter over the remote bucket endpoints.
#[derive(Debug, Clone)]
pub struct HttpObjectStorage {
    client: Client,
    base: Url,
    bucket: String,
}

impl HttpObjectStorage {
    /// Build an adapter with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base: Url, bucket: String, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base,
            bucket,
        })
    }

    fn object_url(&self, file_name: &str) -> Result<Url, ObjectStorageError> {
        self.base
            .join(&format!("v1/buckets/{}/objects/{file_name}", self.bucket))
            .map_err(|err| ObjectStorageError::upload(err.to_string()))
    }
}

#[async_trait]
impl ObjectStorage for HttpObjectStorage {
    async fn put(&self, upload: &ObjectUpload) -> Result<Url, ObjectStorageError> {
        let url = self.object_url(&upload.file_name)?;
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, upload.content_type.as_str())
            // Forces a download instead of inline rendering when fetched.
            .header(CONTENT_DISPOSITION, "attachment")
            .body(upload.bytes.clone())
            .send()
            .await
            .map_err(|err| ObjectStorageError::connection(err.to_string()))?;
        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|err| ObjectStorageError::connection(err.to_string()))?;
        if !status.is_success() {
            return Err(ObjectStorageError::upload(format!(
                "store returned {status}",
            )));
        }
        let decoded: UploadResponse = serde_json::from_slice(&bytes)
            .map_err(|err| ObjectStorageError::upload(err.to_string()))?;
        Url::parse(&decoded.download_url)
            .map_err(|err| ObjectStorageError::upload(format!("bad download url: {err}")))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    #[test]
    fn object_url_nests_bucket_and_file_name() {
        let storage = HttpObjectStorage::new(
            Url::parse("https://files.treehouse.invalid/").expect("base url"),
            "attachments".to_owned(),
            Duration::from_secs(5),
        )
        .expect("adapter builds");
        let url = storage.object_url("notes.pdf").expect("url");
        assert!(url
            .path()
            .ends_with("/v1/buckets/attachments/objects/notes.pdf"));
    }
}
