//! Port abstraction for comment documents nested under posts.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::comment::{Comment, NewComment};

/// Errors raised by comment repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommentRepositoryError {
    /// The store could not be reached.
    #[error("comment store connection failed: {message}")]
    Connection {
        /// Adapter-supplied failure description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("comment store query failed: {message}")]
    Query {
        /// Adapter-supplied failure description.
        message: String,
    },
    /// The referenced comment does not exist under the post.
    #[error("no such comment: {comment_id} under post {post_id}")]
    Missing {
        /// Parent post id.
        post_id: String,
        /// Comment id that failed to resolve.
        comment_id: String,
    },
}

impl CommentRepositoryError {
    /// Construct a [`CommentRepositoryError::Connection`].
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Construct a [`CommentRepositoryError::Query`].
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Construct a [`CommentRepositoryError::Missing`].
    pub fn missing(post_id: impl Into<String>, comment_id: impl Into<String>) -> Self {
        Self::Missing {
            post_id: post_id.into(),
            comment_id: comment_id.into(),
        }
    }
}

/// Port for the `posts/{post_id}/comments` child collections.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Insert a comment under a post and return it with its assigned id.
    async fn insert(
        &self,
        post_id: &str,
        comment: &NewComment,
    ) -> Result<Comment, CommentRepositoryError>;

    /// Return a post's comments ordered oldest-first.
    async fn list_by_post(&self, post_id: &str) -> Result<Vec<Comment>, CommentRepositoryError>;

    /// Fetch one comment; `None` when no document matches.
    async fn find_by_id(
        &self,
        post_id: &str,
        comment_id: &str,
    ) -> Result<Option<Comment>, CommentRepositoryError>;

    /// Overwrite the content and stamp the edit time.
    async fn update_content(
        &self,
        post_id: &str,
        comment_id: &str,
        content: &str,
        edited_at: DateTime<Utc>,
    ) -> Result<(), CommentRepositoryError>;

    /// Delete one comment; deleting a missing comment succeeds.
    async fn delete(&self, post_id: &str, comment_id: &str)
    -> Result<(), CommentRepositoryError>;
}
