//! Post entity and creation inputs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::user::AuthorSnapshot;

/// Title substituted when a stored post document is missing one.
pub const UNTITLED_PLACEHOLDER: &str = "(untitled)";

/// Uploaded file reference attached to a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// Publicly fetchable download URL.
    pub url: String,
    /// Original file name, kept for the download link label.
    pub file_name: String,
}

/// A blog post document.
///
/// `category` is a denormalised string copy of a category name, not a
/// foreign key; deleting or renaming a category never rewrites posts (the
/// cascade delete removes them instead). The author snapshot is captured at
/// creation time and never refreshed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Store-assigned document id.
    pub id: String,
    /// Post title.
    pub title: String,
    /// Post body.
    pub content: String,
    /// Category name copy.
    pub category: String,
    /// Author captured at creation time.
    pub author: AuthorSnapshot,
    /// Optional uploaded file reference.
    pub attachment: Option<Attachment>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Set on the first successful edit, then overwritten on each edit.
    pub edited_at: Option<DateTime<Utc>>,
}

/// Caller-supplied fields for a new post; the service adds the author
/// snapshot and timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDraft {
    /// Post title.
    pub title: String,
    /// Post body.
    pub content: String,
    /// Category name the post is filed under.
    pub category: String,
    /// Optional uploaded file reference.
    pub attachment: Option<Attachment>,
}

/// Fully-populated insert payload handed to the post repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    /// Post title.
    pub title: String,
    /// Post body.
    pub content: String,
    /// Category name copy.
    pub category: String,
    /// Author captured from the active session.
    pub author: AuthorSnapshot,
    /// Optional uploaded file reference.
    pub attachment: Option<Attachment>,
    /// Creation timestamp stamped by the service clock.
    pub created_at: DateTime<Utc>,
}
