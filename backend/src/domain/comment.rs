//! Comment entity and creation input.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::user::AuthorSnapshot;

/// A comment document in a post's child collection.
///
/// Comments are keyed under their post (`posts/{post_id}/comments`) and
/// ordered oldest-first when listed. Mutation is owner-only; there is no
/// administrator override for comments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Store-assigned document id.
    pub id: String,
    /// Comment body.
    pub content: String,
    /// Author captured at creation time.
    pub author: AuthorSnapshot,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Set on the first successful edit, then overwritten on each edit.
    pub edited_at: Option<DateTime<Utc>>,
}

/// Fully-populated insert payload handed to the comment repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    /// Comment body.
    pub content: String,
    /// Author captured from the active session.
    pub author: AuthorSnapshot,
    /// Creation timestamp stamped by the service clock.
    pub created_at: DateTime<Utc>,
}
