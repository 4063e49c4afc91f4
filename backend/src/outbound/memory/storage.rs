//! Object storage adapter over the shared in-memory state.

use std::sync::Arc;

use async_trait::async_trait;
use url::Url;

use crate::domain::ports::{ObjectStorage, ObjectStorageError, ObjectUpload};

use super::{Shared, StoredObject};

const OBJECT_BASE_URL: &str = "https://objects.treehouse.invalid/";
const UNAVAILABLE: &str = "backend marked unavailable";

/// In-memory object store.
#[derive(Debug, Clone)]
pub struct MemoryObjectStorage {
    shared: Arc<Shared>,
}

impl MemoryObjectStorage {
    pub(crate) fn new(shared: Arc<Shared>) -> Self {
        Self { shared }
    }
}

#[async_trait]
impl ObjectStorage for MemoryObjectStorage {
    async fn put(&self, upload: &ObjectUpload) -> Result<Url, ObjectStorageError> {
        let mut state = self.shared.state();
        if state.unavailable {
            return Err(ObjectStorageError::connection(UNAVAILABLE));
        }
        let base = Url::parse(OBJECT_BASE_URL)
            .map_err(|err| ObjectStorageError::upload(err.to_string()))?;
        let url = base
            .join(&upload.file_name)
            .map_err(|err| ObjectStorageError::upload(err.to_string()))?;
        // Keyed by file name alone: a same-named upload overwrites.
        state.objects.insert(
            upload.file_name.clone(),
            StoredObject {
                content_type: upload.content_type.clone(),
                content_disposition: "attachment".to_owned(),
                bytes: upload.bytes.clone(),
            },
        );
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::outbound::memory::MemoryBackend;

    #[tokio::test]
    async fn same_named_uploads_overwrite() {
        let backend = MemoryBackend::new();
        let storage = backend.object_storage();
        let first = ObjectUpload {
            file_name: "notes.pdf".to_owned(),
            content_type: "application/pdf".to_owned(),
            bytes: b"one".to_vec(),
        };
        let second = ObjectUpload {
            bytes: b"two".to_vec(),
            ..first.clone()
        };
        let url_one = storage.put(&first).await.expect("upload");
        let url_two = storage.put(&second).await.expect("upload");
        assert_eq!(url_one, url_two);
        assert_eq!(
            backend.object_disposition("notes.pdf").as_deref(),
            Some("attachment")
        );
        assert_eq!(
            backend.object_bytes("notes.pdf").as_deref(),
            Some(b"two".as_slice())
        );
    }

    #[tokio::test]
    async fn upload_url_embeds_the_file_name() {
        let backend = MemoryBackend::new();
        let storage = backend.object_storage();
        let upload = ObjectUpload {
            file_name: "report.txt".to_owned(),
            content_type: "text/plain".to_owned(),
            bytes: Vec::new(),
        };
        let url = storage.put(&upload).await.expect("upload");
        assert!(url.as_str().ends_with("/report.txt"));
    }
}
