//! Document-collection adapters over the remote store client.
//!
//! Each adapter is a thin translator between one port and the store dialect:
//! it assembles the collection path, serialises the wire codec from
//! [`crate::outbound::docs`], and maps [`StoreError`] into the port's error
//! enum. Lenient decoding happens in the codecs, so a malformed stored
//! document degrades to fallback values exactly as it does against the
//! in-memory backend.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{json, Value};

use crate::domain::ports::{
    CategoryRepository, CategoryRepositoryError, CommentRepository, CommentRepositoryError,
    PostRepository, PostRepositoryError, ProfileRepository, ProfileRepositoryError,
    ReferralCodeRepository, ReferralCodeRepositoryError,
};
use crate::domain::{Category, Comment, NewComment, NewPost, Post, Profile};
use crate::outbound::docs::{CategoryDoc, CommentDoc, PostDoc, ProfileDoc};

use super::client::{DocumentEnvelope, DocumentStoreClient, FieldFilter, RecencyQuery, StoreError};

const USERS: &[&str] = &["users"];
const REFERRAL_CODES: &[&str] = &["referralCodes"];
const CATEGORIES: &[&str] = &["categories"];
const POSTS: &[&str] = &["posts"];
const CREATED_AT: &str = "createdAt";

fn decode_post(envelope: DocumentEnvelope) -> Post {
    let decoded: PostDoc = serde_json::from_value(envelope.fields).unwrap_or_default();
    decoded.into_post(envelope.id)
}

fn decode_comment(envelope: DocumentEnvelope) -> Comment {
    let decoded: CommentDoc = serde_json::from_value(envelope.fields).unwrap_or_default();
    decoded.into_comment(envelope.id)
}

/// Profile repository over the remote `users` collection.
#[derive(Debug, Clone)]
pub struct HttpProfileRepository {
    store: DocumentStoreClient,
}

impl HttpProfileRepository {
    /// Wrap a store client.
    #[must_use]
    pub fn new(store: DocumentStoreClient) -> Self {
        Self { store }
    }
}

fn map_profile(error: StoreError) -> ProfileRepositoryError {
    match error {
        StoreError::Connection { message } => ProfileRepositoryError::connection(message),
        other => ProfileRepositoryError::query(other.to_string()),
    }
}

#[async_trait]
impl ProfileRepository for HttpProfileRepository {
    async fn insert(&self, profile: &Profile) -> Result<(), ProfileRepositoryError> {
        let fields = serde_json::to_value(ProfileDoc::from(profile))
            .map_err(|err| ProfileRepositoryError::query(err.to_string()))?;
        self.store
            .put(USERS, &profile.uid, &fields)
            .await
            .map_err(map_profile)
    }

    async fn find_by_uid(&self, uid: &str) -> Result<Option<Profile>, ProfileRepositoryError> {
        let Some(envelope) = self.store.get(USERS, uid).await.map_err(map_profile)? else {
            return Ok(None);
        };
        let doc: ProfileDoc = serde_json::from_value(envelope.fields)
            .map_err(|err| ProfileRepositoryError::query(err.to_string()))?;
        Ok(Some(doc.into_profile()))
    }

    async fn email_taken(&self, email: &str) -> Result<bool, ProfileRepositoryError> {
        let matches = self
            .store
            .list(
                USERS,
                Some(FieldFilter {
                    field: "email",
                    equals: email,
                }),
                None,
            )
            .await
            .map_err(map_profile)?;
        Ok(!matches.is_empty())
    }

    async fn nickname_taken(&self, nickname: &str) -> Result<bool, ProfileRepositoryError> {
        let matches = self
            .store
            .list(
                USERS,
                Some(FieldFilter {
                    field: "nickname",
                    equals: nickname,
                }),
                None,
            )
            .await
            .map_err(map_profile)?;
        Ok(!matches.is_empty())
    }

    async fn update_nickname(
        &self,
        uid: &str,
        nickname: &str,
    ) -> Result<(), ProfileRepositoryError> {
        self.store
            .patch(USERS, uid, &json!({ "nickname": nickname }))
            .await
            .map_err(map_profile)
    }

    async fn delete(&self, uid: &str) -> Result<(), ProfileRepositoryError> {
        self.store.delete(USERS, uid).await.map_err(map_profile)
    }
}

/// Referral-code repository over the remote `referralCodes` collection.
#[derive(Debug, Clone)]
pub struct HttpReferralCodeRepository {
    store: DocumentStoreClient,
}

impl HttpReferralCodeRepository {
    /// Wrap a store client.
    #[must_use]
    pub fn new(store: DocumentStoreClient) -> Self {
        Self { store }
    }
}

fn map_referral(error: StoreError) -> ReferralCodeRepositoryError {
    match error {
        StoreError::Connection { message } => ReferralCodeRepositoryError::connection(message),
        other => ReferralCodeRepositoryError::query(other.to_string()),
    }
}

#[async_trait]
impl ReferralCodeRepository for HttpReferralCodeRepository {
    async fn exists(&self, code: &str) -> Result<bool, ReferralCodeRepositoryError> {
        // The document key is the code itself; a 200 means valid.
        let envelope = self
            .store
            .get(REFERRAL_CODES, code)
            .await
            .map_err(map_referral)?;
        Ok(envelope.is_some())
    }

    async fn insert(&self, code: &str) -> Result<(), ReferralCodeRepositoryError> {
        self.store
            .put(REFERRAL_CODES, code, &json!({}))
            .await
            .map_err(map_referral)
    }
}

/// Category repository over the remote `categories` collection.
#[derive(Debug, Clone)]
pub struct HttpCategoryRepository {
    store: DocumentStoreClient,
}

impl HttpCategoryRepository {
    /// Wrap a store client.
    #[must_use]
    pub fn new(store: DocumentStoreClient) -> Self {
        Self { store }
    }
}

fn map_category(error: StoreError) -> CategoryRepositoryError {
    match error {
        StoreError::Connection { message } => CategoryRepositoryError::connection(message),
        other => CategoryRepositoryError::query(other.to_string()),
    }
}

#[async_trait]
impl CategoryRepository for HttpCategoryRepository {
    async fn insert(&self, name: &str) -> Result<Category, CategoryRepositoryError> {
        let envelope = self
            .store
            .insert(CATEGORIES, &json!({ "name": name }))
            .await
            .map_err(map_category)?;
        Ok(Category {
            id: envelope.id,
            name: name.to_owned(),
        })
    }

    async fn list(&self) -> Result<Vec<Category>, CategoryRepositoryError> {
        let documents = self
            .store
            .list(CATEGORIES, None, None)
            .await
            .map_err(map_category)?;
        Ok(documents
            .into_iter()
            .map(|envelope| {
                let decoded: CategoryDoc =
                    serde_json::from_value(envelope.fields).unwrap_or(CategoryDoc {
                        name: String::new(),
                    });
                decoded.into_category(envelope.id)
            })
            .collect())
    }

    async fn delete_by_name(&self, name: &str) -> Result<u64, CategoryRepositoryError> {
        self.store
            .delete_matching(
                CATEGORIES,
                FieldFilter {
                    field: "name",
                    equals: name,
                },
            )
            .await
            .map_err(map_category)
    }
}

/// Post repository over the remote `posts` collection.
#[derive(Debug, Clone)]
pub struct HttpPostRepository {
    store: DocumentStoreClient,
}

impl HttpPostRepository {
    /// Wrap a store client.
    #[must_use]
    pub fn new(store: DocumentStoreClient) -> Self {
        Self { store }
    }
}

fn map_post(error: StoreError) -> PostRepositoryError {
    match error {
        StoreError::Connection { message } => PostRepositoryError::connection(message),
        other => PostRepositoryError::query(other.to_string()),
    }
}

#[async_trait]
impl PostRepository for HttpPostRepository {
    async fn insert(&self, post: &NewPost) -> Result<Post, PostRepositoryError> {
        let fields = serde_json::to_value(PostDoc::from(post))
            .map_err(|err| PostRepositoryError::query(err.to_string()))?;
        let envelope = self
            .store
            .insert(POSTS, &fields)
            .await
            .map_err(map_post)?;
        Ok(decode_post(envelope))
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Post>, PostRepositoryError> {
        Ok(self
            .store
            .get(POSTS, id)
            .await
            .map_err(map_post)?
            .map(decode_post))
    }

    async fn list_all(&self) -> Result<Vec<Post>, PostRepositoryError> {
        let documents = self
            .store
            .list(POSTS, None, None)
            .await
            .map_err(map_post)?;
        Ok(documents.into_iter().map(decode_post).collect())
    }

    async fn list_by_category(&self, category: &str) -> Result<Vec<Post>, PostRepositoryError> {
        let documents = self
            .store
            .list(
                POSTS,
                Some(FieldFilter {
                    field: "category",
                    equals: category,
                }),
                None,
            )
            .await
            .map_err(map_post)?;
        Ok(documents.into_iter().map(decode_post).collect())
    }

    async fn list_latest(&self, limit: Option<usize>) -> Result<Vec<Post>, PostRepositoryError> {
        let documents = self
            .store
            .list(
                POSTS,
                None,
                Some(RecencyQuery {
                    order_by: CREATED_AT,
                    limit,
                }),
            )
            .await
            .map_err(map_post)?;
        Ok(documents.into_iter().map(decode_post).collect())
    }

    async fn list_latest_by_category(
        &self,
        category: &str,
        limit: Option<usize>,
    ) -> Result<Vec<Post>, PostRepositoryError> {
        let documents = self
            .store
            .list(
                POSTS,
                Some(FieldFilter {
                    field: "category",
                    equals: category,
                }),
                Some(RecencyQuery {
                    order_by: CREATED_AT,
                    limit,
                }),
            )
            .await
            .map_err(map_post)?;
        Ok(documents.into_iter().map(decode_post).collect())
    }

    async fn update_content(
        &self,
        id: &str,
        title: &str,
        content: &str,
        edited_at: DateTime<Utc>,
    ) -> Result<(), PostRepositoryError> {
        let fields: Value = json!({
            "title": title,
            "content": content,
            "editedAt": edited_at.to_rfc3339(),
        });
        self.store
            .patch(POSTS, id, &fields)
            .await
            .map_err(|error| {
                if error.is_not_found() {
                    PostRepositoryError::missing(id)
                } else {
                    map_post(error)
                }
            })
    }

    async fn delete(&self, id: &str) -> Result<(), PostRepositoryError> {
        self.store.delete(POSTS, id).await.map_err(map_post)
    }

    async fn delete_by_category(&self, category: &str) -> Result<u64, PostRepositoryError> {
        self.store
            .delete_matching(
                POSTS,
                FieldFilter {
                    field: "category",
                    equals: category,
                },
            )
            .await
            .map_err(map_post)
    }
}

/// Comment repository over the remote per-post child collections.
#[derive(Debug, Clone)]
pub struct HttpCommentRepository {
    store: DocumentStoreClient,
}

impl HttpCommentRepository {
    /// Wrap a store client.
    #[must_use]
    pub fn new(store: DocumentStoreClient) -> Self {
        Self { store }
    }
}

fn map_comment(error: StoreError) -> CommentRepositoryError {
    match error {
        StoreError::Connection { message } => CommentRepositoryError::connection(message),
        other => CommentRepositoryError::query(other.to_string()),
    }
}

#[async_trait]
impl CommentRepository for HttpCommentRepository {
    async fn insert(
        &self,
        post_id: &str,
        comment: &NewComment,
    ) -> Result<Comment, CommentRepositoryError> {
        let fields = serde_json::to_value(CommentDoc::from(comment))
            .map_err(|err| CommentRepositoryError::query(err.to_string()))?;
        let envelope = self
            .store
            .insert(&["posts", post_id, "comments"], &fields)
            .await
            .map_err(map_comment)?;
        Ok(decode_comment(envelope))
    }

    async fn list_by_post(&self, post_id: &str) -> Result<Vec<Comment>, CommentRepositoryError> {
        // The store returns child collections in key order; creation order
        // (oldest first) is recovered by sorting on the decoded timestamp.
        let documents = self
            .store
            .list(&["posts", post_id, "comments"], None, None)
            .await
            .map_err(map_comment)?;
        let mut comments: Vec<Comment> = documents.into_iter().map(decode_comment).collect();
        comments.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(comments)
    }

    async fn find_by_id(
        &self,
        post_id: &str,
        comment_id: &str,
    ) -> Result<Option<Comment>, CommentRepositoryError> {
        Ok(self
            .store
            .get(&["posts", post_id, "comments"], comment_id)
            .await
            .map_err(map_comment)?
            .map(decode_comment))
    }

    async fn update_content(
        &self,
        post_id: &str,
        comment_id: &str,
        content: &str,
        edited_at: DateTime<Utc>,
    ) -> Result<(), CommentRepositoryError> {
        let fields: Value = json!({
            "content": content,
            "editedAt": edited_at.to_rfc3339(),
        });
        self.store
            .patch(&["posts", post_id, "comments"], comment_id, &fields)
            .await
            .map_err(|error| {
                if error.is_not_found() {
                    CommentRepositoryError::missing(post_id, comment_id)
                } else {
                    map_comment(error)
                }
            })
    }

    async fn delete(
        &self,
        post_id: &str,
        comment_id: &str,
    ) -> Result<(), CommentRepositoryError> {
        self.store
            .delete(&["posts", post_id, "comments"], comment_id)
            .await
            .map_err(map_comment)
    }
}
