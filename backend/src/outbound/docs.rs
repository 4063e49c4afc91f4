//! Document codecs for the remote store's wire shape.
//!
//! The store holds flat JSON maps with camelCase field names (`createdAt`,
//! `fileUrl`). Decoding is deliberately lenient: a stored document missing a
//! field is patched with a documented fallback at read time instead of
//! failing the query. The fallbacks are
//!
//! - title → [`UNTITLED_PLACEHOLDER`]
//! - content, category → empty string
//! - author → the anonymous snapshot
//! - `createdAt` → the decode-time clock reading
//! - `fileUrl`/`fileName` → no attachment (an empty `fileUrl` also means
//!   no attachment; "no file" is stored as empty strings, not absent keys)
//!
//! Both the in-memory backend and the HTTP adapters round documents through
//! these types so the two stores decode identically.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    Attachment, AuthorSnapshot, Category, Comment, NewComment, NewPost, Post, Profile,
    UNTITLED_PLACEHOLDER,
};

/// Author snapshot as stored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthorDoc {
    /// Author account id.
    #[serde(default)]
    pub uid: String,
    /// Nickname at creation time.
    #[serde(default)]
    pub nickname: String,
    /// Email at creation time.
    #[serde(default)]
    pub email: String,
}

impl From<AuthorSnapshot> for AuthorDoc {
    fn from(author: AuthorSnapshot) -> Self {
        Self {
            uid: author.uid,
            nickname: author.nickname,
            email: author.email,
        }
    }
}

impl AuthorDoc {
    fn into_snapshot(self) -> AuthorSnapshot {
        let mut snapshot = AuthorSnapshot::anonymous();
        if !self.uid.is_empty() {
            snapshot.uid = self.uid;
        }
        if !self.nickname.is_empty() {
            snapshot.nickname = self.nickname;
        }
        if !self.email.is_empty() {
            snapshot.email = self.email;
        }
        snapshot
    }
}

/// Post document wire shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDoc {
    /// Post title.
    #[serde(default)]
    pub title: Option<String>,
    /// Post body.
    #[serde(default)]
    pub content: Option<String>,
    /// Category name copy.
    #[serde(default)]
    pub category: Option<String>,
    /// Embedded author snapshot.
    #[serde(default)]
    pub author: Option<AuthorDoc>,
    /// Attachment download URL; empty string means no attachment.
    #[serde(default)]
    pub file_url: Option<String>,
    /// Attachment original file name.
    #[serde(default)]
    pub file_name: Option<String>,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Last-edit timestamp.
    #[serde(default)]
    pub edited_at: Option<DateTime<Utc>>,
}

impl From<&NewPost> for PostDoc {
    fn from(post: &NewPost) -> Self {
        let (file_url, file_name) = match &post.attachment {
            Some(attachment) => (
                Some(attachment.url.clone()),
                Some(attachment.file_name.clone()),
            ),
            None => (Some(String::new()), Some(String::new())),
        };
        Self {
            title: Some(post.title.clone()),
            content: Some(post.content.clone()),
            category: Some(post.category.clone()),
            author: Some(post.author.clone().into()),
            file_url,
            file_name,
            created_at: Some(post.created_at),
            edited_at: None,
        }
    }
}

impl PostDoc {
    /// Decode into the domain type, patching missing fields.
    #[must_use]
    pub fn into_post(self, id: String) -> Post {
        let attachment = match self.file_url {
            Some(url) if !url.is_empty() => Some(Attachment {
                url,
                file_name: self.file_name.unwrap_or_default(),
            }),
            _ => None,
        };
        Post {
            id,
            title: self
                .title
                .filter(|title| !title.is_empty())
                .unwrap_or_else(|| UNTITLED_PLACEHOLDER.to_owned()),
            content: self.content.unwrap_or_default(),
            category: self.category.unwrap_or_default(),
            author: self.author.unwrap_or_default().into_snapshot(),
            attachment,
            created_at: self.created_at.unwrap_or_else(Utc::now),
            edited_at: self.edited_at,
        }
    }
}

/// Comment document wire shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentDoc {
    /// Comment body.
    #[serde(default)]
    pub content: Option<String>,
    /// Embedded author snapshot.
    #[serde(default)]
    pub author: Option<AuthorDoc>,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Last-edit timestamp.
    #[serde(default)]
    pub edited_at: Option<DateTime<Utc>>,
}

impl From<&NewComment> for CommentDoc {
    fn from(comment: &NewComment) -> Self {
        Self {
            content: Some(comment.content.clone()),
            author: Some(comment.author.clone().into()),
            created_at: Some(comment.created_at),
            edited_at: None,
        }
    }
}

impl CommentDoc {
    /// Decode into the domain type, patching missing fields.
    #[must_use]
    pub fn into_comment(self, id: String) -> Comment {
        Comment {
            id,
            content: self.content.unwrap_or_default(),
            author: self.author.unwrap_or_default().into_snapshot(),
            created_at: self.created_at.unwrap_or_else(Utc::now),
            edited_at: self.edited_at,
        }
    }
}

/// Profile document wire shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDoc {
    /// Account id; also the document key.
    #[serde(default)]
    pub uid: String,
    /// Sign-in email.
    #[serde(default)]
    pub email: String,
    /// Display nickname.
    #[serde(default)]
    pub nickname: String,
    /// Referral code supplied at sign-up.
    #[serde(default)]
    pub referral_code: String,
}

impl From<&Profile> for ProfileDoc {
    fn from(profile: &Profile) -> Self {
        Self {
            uid: profile.uid.clone(),
            email: profile.email.clone(),
            nickname: profile.nickname.clone(),
            referral_code: profile.referral_code.clone(),
        }
    }
}

impl ProfileDoc {
    /// Decode into the domain type.
    #[must_use]
    pub fn into_profile(self) -> Profile {
        Profile {
            uid: self.uid,
            email: self.email,
            nickname: self.nickname,
            referral_code: self.referral_code,
        }
    }
}

/// Category document wire shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryDoc {
    /// Category name.
    #[serde(default)]
    pub name: String,
}

impl CategoryDoc {
    /// Decode into the domain type.
    #[must_use]
    pub fn into_category(self, id: String) -> Category {
        Category { id, name: self.name }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use serde_json::json;

    use crate::domain::ANONYMOUS_NICKNAME;

    #[test]
    fn empty_document_decodes_with_fallbacks() {
        let doc: PostDoc = serde_json::from_value(json!({})).expect("lenient decode");
        let post = doc.into_post("post-1".to_owned());
        assert_eq!(post.title, UNTITLED_PLACEHOLDER);
        assert_eq!(post.content, "");
        assert_eq!(post.author.nickname, ANONYMOUS_NICKNAME);
        assert!(post.attachment.is_none());
        assert!(post.edited_at.is_none());
    }

    #[test]
    fn empty_file_url_means_no_attachment() {
        let doc: PostDoc = serde_json::from_value(json!({
            "title": "hello",
            "fileUrl": "",
            "fileName": "",
        }))
        .expect("lenient decode");
        assert!(doc.into_post("post-1".to_owned()).attachment.is_none());
    }

    #[test]
    fn populated_document_round_trips() {
        let doc: PostDoc = serde_json::from_value(json!({
            "title": "hello",
            "content": "world",
            "category": "News",
            "author": { "uid": "uid-1", "nickname": "ada", "email": "ada@example.com" },
            "fileUrl": "https://files.example.com/notes.pdf",
            "fileName": "notes.pdf",
            "createdAt": "2026-01-01T00:00:00Z",
        }))
        .expect("decode");
        let post = doc.into_post("post-1".to_owned());
        assert_eq!(post.title, "hello");
        assert_eq!(post.category, "News");
        assert_eq!(post.author.uid, "uid-1");
        let attachment = post.attachment.expect("attachment present");
        assert_eq!(attachment.file_name, "notes.pdf");
    }

    #[test]
    fn comment_without_author_decodes_as_anonymous() {
        let doc: CommentDoc = serde_json::from_value(json!({ "content": "hi" }))
            .expect("lenient decode");
        let comment = doc.into_comment("comment-1".to_owned());
        assert_eq!(comment.author.nickname, ANONYMOUS_NICKNAME);
        assert_eq!(comment.content, "hi");
    }
}
