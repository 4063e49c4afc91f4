//! Port abstraction for external object storage.

use async_trait::async_trait;
use url::Url;

/// Errors raised by object storage adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ObjectStorageError {
    /// The store could not be reached.
    #[error("object store connection failed: {message}")]
    Connection {
        /// Adapter-supplied failure description.
        message: String,
    },
    /// The upload was rejected or the response was unusable.
    #[error("object upload failed: {message}")]
    Upload {
        /// Adapter-supplied failure description.
        message: String,
    },
}

impl ObjectStorageError {
    /// Construct an [`ObjectStorageError::Connection`].
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Construct an [`ObjectStorageError::Upload`].
    pub fn upload(message: impl Into<String>) -> Self {
        Self::Upload {
            message: message.into(),
        }
    }
}

/// A blob ready for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectUpload {
    /// Storage key; the original file name. Same-named uploads overwrite.
    pub file_name: String,
    /// MIME type recorded on the object.
    pub content_type: String,
    /// Raw file bytes.
    pub bytes: Vec<u8>,
}

/// Port for blob upload to the external object store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Upload a blob keyed by its file name and return the public download
    /// URL. The stored object carries a `content-disposition: attachment`
    /// hint so browsers download rather than render it. No retry is
    /// attempted; the underlying error propagates.
    async fn put(&self, upload: &ObjectUpload) -> Result<Url, ObjectStorageError>;
}
