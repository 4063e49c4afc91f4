//! Port abstraction for profile document persistence.

use async_trait::async_trait;

use crate::domain::user::Profile;

/// Errors raised by profile repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProfileRepositoryError {
    /// The store could not be reached.
    #[error("profile store connection failed: {message}")]
    Connection {
        /// Adapter-supplied failure description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("profile store query failed: {message}")]
    Query {
        /// Adapter-supplied failure description.
        message: String,
    },
}

impl ProfileRepositoryError {
    /// Construct a [`ProfileRepositoryError::Connection`].
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Construct a [`ProfileRepositoryError::Query`].
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Port for the `users` collection of mirrored profile documents.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Write a profile document keyed by its uid.
    async fn insert(&self, profile: &Profile) -> Result<(), ProfileRepositoryError>;

    /// Fetch a profile by account id.
    async fn find_by_uid(&self, uid: &str) -> Result<Option<Profile>, ProfileRepositoryError>;

    /// True when any profile document carries this email.
    async fn email_taken(&self, email: &str) -> Result<bool, ProfileRepositoryError>;

    /// True when any profile document carries this nickname.
    async fn nickname_taken(&self, nickname: &str) -> Result<bool, ProfileRepositoryError>;

    /// Overwrite the nickname on an existing profile document.
    async fn update_nickname(
        &self,
        uid: &str,
        nickname: &str,
    ) -> Result<(), ProfileRepositoryError>;

    /// Delete the profile document; deleting a missing document succeeds.
    async fn delete(&self, uid: &str) -> Result<(), ProfileRepositoryError>;
}
