//! Port abstraction for post document persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::post::{NewPost, Post};

/// Errors raised by post repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PostRepositoryError {
    /// The store could not be reached.
    #[error("post store connection failed: {message}")]
    Connection {
        /// Adapter-supplied failure description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("post store query failed: {message}")]
    Query {
        /// Adapter-supplied failure description.
        message: String,
    },
    /// The referenced post does not exist.
    #[error("no such post: {id}")]
    Missing {
        /// Post id that failed to resolve.
        id: String,
    },
}

impl PostRepositoryError {
    /// Construct a [`PostRepositoryError::Connection`].
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Construct a [`PostRepositoryError::Query`].
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Construct a [`PostRepositoryError::Missing`].
    pub fn missing(id: impl Into<String>) -> Self {
        Self::Missing { id: id.into() }
    }
}

/// Port for the `posts` collection.
///
/// Listing calls perform lenient decoding: documents with missing fields
/// come back patched with fallback values rather than failing the whole
/// query (see the adapter documentation for the fallbacks).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Insert a post document and return it with its assigned id.
    async fn insert(&self, post: &NewPost) -> Result<Post, PostRepositoryError>;

    /// Fetch a post by id; `None` when no document matches.
    async fn find_by_id(&self, id: &str) -> Result<Option<Post>, PostRepositoryError>;

    /// Return every post, unordered.
    async fn list_all(&self) -> Result<Vec<Post>, PostRepositoryError>;

    /// Return posts whose category copy equals `category`, unordered.
    async fn list_by_category(&self, category: &str) -> Result<Vec<Post>, PostRepositoryError>;

    /// Return posts by descending creation time, newest first, capped to
    /// `limit` when one is given.
    async fn list_latest(&self, limit: Option<usize>) -> Result<Vec<Post>, PostRepositoryError>;

    /// Category-scoped variant of [`PostRepository::list_latest`].
    async fn list_latest_by_category(
        &self,
        category: &str,
        limit: Option<usize>,
    ) -> Result<Vec<Post>, PostRepositoryError>;

    /// Overwrite title and content and stamp the edit time.
    async fn update_content(
        &self,
        id: &str,
        title: &str,
        content: &str,
        edited_at: DateTime<Utc>,
    ) -> Result<(), PostRepositoryError>;

    /// Delete a post by id; deleting a missing post succeeds.
    async fn delete(&self, id: &str) -> Result<(), PostRepositoryError>;

    /// Delete every post whose category copy equals `category`, returning
    /// the number removed. One batch request, used by the cascade delete.
    async fn delete_by_category(&self, category: &str) -> Result<u64, PostRepositoryError>;
}
