//! Attachment upload service over the external object store.

use std::sync::Arc;

use crate::domain::ports::{ObjectStorage, ObjectStorageError, ObjectUpload};
use crate::domain::post::Attachment;
use crate::domain::user::Session;
use crate::domain::Error;

/// Attachment service wired over object storage.
#[derive(Clone)]
pub struct AttachmentService<S> {
    storage: Arc<S>,
}

impl<S> AttachmentService<S> {
    /// Create a new service.
    pub fn new(storage: Arc<S>) -> Self {
        Self { storage }
    }
}

impl<S> AttachmentService<S>
where
    S: ObjectStorage,
{
    /// Upload a file and return the attachment reference to embed in a post.
    ///
    /// The blob is keyed by its original file name, so uploading the same
    /// name again overwrites the earlier object; no collision handling
    /// exists. Storage failures propagate without retry.
    ///
    /// # Errors
    ///
    /// [`crate::domain::ErrorCode::Validation`] for an empty file name;
    /// storage failures as [`crate::domain::ErrorCode::Unavailable`] or
    /// [`crate::domain::ErrorCode::Internal`].
    pub async fn upload(
        &self,
        session: &Session,
        file_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<Attachment, Error> {
        // Only signed-in users can author posts, so uploads always run under
        // a session; the parameter keeps that explicit at the call site.
        let _ = session;
        if file_name.trim().is_empty() {
            return Err(Error::validation("file name must not be empty"));
        }
        let upload = ObjectUpload {
            file_name: file_name.to_owned(),
            content_type: content_type.to_owned(),
            bytes,
        };
        let url = self
            .storage
            .put(&upload)
            .await
            .map_err(map_storage_error)?;
        Ok(Attachment {
            url: url.to_string(),
            file_name: file_name.to_owned(),
        })
    }
}

fn map_storage_error(error: ObjectStorageError) -> Error {
    match error {
        ObjectStorageError::Connection { message } => {
            Error::unavailable(format!("object store unavailable: {message}"))
        }
        ObjectStorageError::Upload { message } => {
            Error::internal(format!("object upload failed: {message}"))
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    use url::Url;

    use crate::domain::ports::MockObjectStorage;
    use crate::domain::user::Role;
    use crate::domain::ErrorCode;

    fn session() -> Session {
        Session {
            uid: "uid-1".to_owned(),
            email: "ada@example.com".to_owned(),
            display_name: "ada".to_owned(),
            role: Role::Member,
        }
    }

    #[tokio::test]
    async fn empty_file_name_is_rejected() {
        let mut storage = MockObjectStorage::new();
        storage.expect_put().times(0);
        let svc = AttachmentService::new(Arc::new(storage));
        let err = svc
            .upload(&session(), "", "text/plain", b"hi".to_vec())
            .await
            .expect_err("empty name must fail");
        assert_eq!(err.code(), ErrorCode::Validation);
    }

    #[tokio::test]
    async fn upload_returns_url_and_original_name() {
        let mut storage = MockObjectStorage::new();
        storage
            .expect_put()
            .withf(|upload: &ObjectUpload| {
                upload.file_name == "notes.pdf" && upload.content_type == "application/pdf"
            })
            .returning(|upload| {
                Url::parse(&format!("https://files.example.com/{}", upload.file_name))
                    .map_err(|err| ObjectStorageError::upload(err.to_string()))
            })
            .times(1);
        let svc = AttachmentService::new(Arc::new(storage));
        let attachment = svc
            .upload(&session(), "notes.pdf", "application/pdf", b"pdf".to_vec())
            .await
            .expect("upload succeeds");
        assert_eq!(attachment.file_name, "notes.pdf");
        assert_eq!(attachment.url, "https://files.example.com/notes.pdf");
    }

    #[tokio::test]
    async fn storage_failure_propagates_without_retry() {
        let mut storage = MockObjectStorage::new();
        storage
            .expect_put()
            .returning(|_| Err(ObjectStorageError::connection("store down")))
            .times(1);
        let svc = AttachmentService::new(Arc::new(storage));
        let err = svc
            .upload(&session(), "notes.pdf", "application/pdf", Vec::new())
            .await
            .expect_err("failure must propagate");
        assert_eq!(err.code(), ErrorCode::Unavailable);
    }
}
