//! Port abstraction for category document persistence.

use async_trait::async_trait;

use crate::domain::category::Category;

/// Errors raised by category repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CategoryRepositoryError {
    /// The store could not be reached.
    #[error("category store connection failed: {message}")]
    Connection {
        /// Adapter-supplied failure description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("category store query failed: {message}")]
    Query {
        /// Adapter-supplied failure description.
        message: String,
    },
}

impl CategoryRepositoryError {
    /// Construct a [`CategoryRepositoryError::Connection`].
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Construct a [`CategoryRepositoryError::Query`].
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Port for the `categories` collection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Append a category document. No uniqueness is enforced here; racing
    /// callers can create duplicates.
    async fn insert(&self, name: &str) -> Result<Category, CategoryRepositoryError>;

    /// Return all category documents, unordered.
    async fn list(&self) -> Result<Vec<Category>, CategoryRepositoryError>;

    /// Delete every category document whose name matches, returning the
    /// number removed. Matching several documents is expected when the
    /// insert race produced duplicates.
    async fn delete_by_name(&self, name: &str) -> Result<u64, CategoryRepositoryError>;
}
