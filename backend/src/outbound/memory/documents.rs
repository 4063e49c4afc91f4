//! Document-collection adapters over the shared in-memory state.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use uuid::Uuid;

use crate::domain::ports::{
    CategoryRepository, CategoryRepositoryError, CommentRepository, CommentRepositoryError,
    PostRepository, PostRepositoryError, ProfileRepository, ProfileRepositoryError,
    ReferralCodeRepository, ReferralCodeRepositoryError,
};
use crate::domain::{Category, Comment, NewComment, NewPost, Post, Profile};
use crate::outbound::docs::{CategoryDoc, CommentDoc, PostDoc, ProfileDoc};

use super::{field_equals, Shared, StoredDoc};

const UNAVAILABLE: &str = "backend marked unavailable";

fn decode_post(doc: &StoredDoc) -> Post {
    let decoded: PostDoc = serde_json::from_value(doc.value.clone()).unwrap_or_default();
    decoded.into_post(doc.id.clone())
}

fn decode_comment(doc: &StoredDoc) -> Comment {
    let decoded: CommentDoc = serde_json::from_value(doc.value.clone()).unwrap_or_default();
    decoded.into_comment(doc.id.clone())
}

fn sort_newest_first(docs: &mut [(Post, u64)]) {
    docs.sort_by(|a, b| {
        b.0.created_at
            .cmp(&a.0.created_at)
            .then_with(|| b.1.cmp(&a.1))
    });
}

/// Profile repository over the in-memory `users` collection.
#[derive(Debug, Clone)]
pub struct MemoryProfileRepository {
    shared: Arc<Shared>,
}

impl MemoryProfileRepository {
    pub(crate) fn new(shared: Arc<Shared>) -> Self {
        Self { shared }
    }
}

#[async_trait]
impl ProfileRepository for MemoryProfileRepository {
    async fn insert(&self, profile: &Profile) -> Result<(), ProfileRepositoryError> {
        let mut state = self.shared.state();
        if state.unavailable {
            return Err(ProfileRepositoryError::connection(UNAVAILABLE));
        }
        let value = serde_json::to_value(ProfileDoc::from(profile))
            .map_err(|err| ProfileRepositoryError::query(err.to_string()))?;
        state.profiles.insert(profile.uid.clone(), value);
        Ok(())
    }

    async fn find_by_uid(&self, uid: &str) -> Result<Option<Profile>, ProfileRepositoryError> {
        let state = self.shared.state();
        if state.unavailable {
            return Err(ProfileRepositoryError::connection(UNAVAILABLE));
        }
        let Some(value) = state.profiles.get(uid).cloned() else {
            return Ok(None);
        };
        drop(state);
        let doc: ProfileDoc = serde_json::from_value(value)
            .map_err(|err| ProfileRepositoryError::query(err.to_string()))?;
        Ok(Some(doc.into_profile()))
    }

    async fn email_taken(&self, email: &str) -> Result<bool, ProfileRepositoryError> {
        let state = self.shared.state();
        if state.unavailable {
            return Err(ProfileRepositoryError::connection(UNAVAILABLE));
        }
        Ok(state
            .profiles
            .values()
            .any(|value| field_equals(value, "email", email)))
    }

    async fn nickname_taken(&self, nickname: &str) -> Result<bool, ProfileRepositoryError> {
        let state = self.shared.state();
        if state.unavailable {
            return Err(ProfileRepositoryError::connection(UNAVAILABLE));
        }
        Ok(state
            .profiles
            .values()
            .any(|value| field_equals(value, "nickname", nickname)))
    }

    async fn update_nickname(
        &self,
        uid: &str,
        nickname: &str,
    ) -> Result<(), ProfileRepositoryError> {
        let mut state = self.shared.state();
        if state.unavailable {
            return Err(ProfileRepositoryError::connection(UNAVAILABLE));
        }
        let value = state
            .profiles
            .get_mut(uid)
            .ok_or_else(|| ProfileRepositoryError::query(format!("no profile for uid {uid}")))?;
        if let Value::Object(map) = value {
            map.insert("nickname".to_owned(), Value::String(nickname.to_owned()));
        }
        Ok(())
    }

    async fn delete(&self, uid: &str) -> Result<(), ProfileRepositoryError> {
        let mut state = self.shared.state();
        if state.unavailable {
            return Err(ProfileRepositoryError::connection(UNAVAILABLE));
        }
        state.profiles.remove(uid);
        Ok(())
    }
}

/// Referral-code repository over the in-memory `referralCodes` collection.
#[derive(Debug, Clone)]
pub struct MemoryReferralCodeRepository {
    shared: Arc<Shared>,
}

impl MemoryReferralCodeRepository {
    pub(crate) fn new(shared: Arc<Shared>) -> Self {
        Self { shared }
    }
}

#[async_trait]
impl ReferralCodeRepository for MemoryReferralCodeRepository {
    async fn exists(&self, code: &str) -> Result<bool, ReferralCodeRepositoryError> {
        let state = self.shared.state();
        if state.unavailable {
            return Err(ReferralCodeRepositoryError::connection(UNAVAILABLE));
        }
        Ok(state.referral_codes.contains(code))
    }

    async fn insert(&self, code: &str) -> Result<(), ReferralCodeRepositoryError> {
        let mut state = self.shared.state();
        if state.unavailable {
            return Err(ReferralCodeRepositoryError::connection(UNAVAILABLE));
        }
        state.referral_codes.insert(code.to_owned());
        Ok(())
    }
}

/// Category repository over the in-memory `categories` collection.
#[derive(Debug, Clone)]
pub struct MemoryCategoryRepository {
    shared: Arc<Shared>,
}

impl MemoryCategoryRepository {
    pub(crate) fn new(shared: Arc<Shared>) -> Self {
        Self { shared }
    }
}

#[async_trait]
impl CategoryRepository for MemoryCategoryRepository {
    async fn insert(&self, name: &str) -> Result<Category, CategoryRepositoryError> {
        let mut state = self.shared.state();
        if state.unavailable {
            return Err(CategoryRepositoryError::connection(UNAVAILABLE));
        }
        let id = Uuid::new_v4().to_string();
        let seq = state.next_seq();
        let value = serde_json::to_value(CategoryDoc {
            name: name.to_owned(),
        })
        .map_err(|err| CategoryRepositoryError::query(err.to_string()))?;
        state.categories.push(StoredDoc {
            id: id.clone(),
            seq,
            value,
        });
        Ok(Category {
            id,
            name: name.to_owned(),
        })
    }

    async fn list(&self) -> Result<Vec<Category>, CategoryRepositoryError> {
        let state = self.shared.state();
        if state.unavailable {
            return Err(CategoryRepositoryError::connection(UNAVAILABLE));
        }
        Ok(state
            .categories
            .iter()
            .map(|doc| {
                let decoded: CategoryDoc =
                    serde_json::from_value(doc.value.clone()).unwrap_or(CategoryDoc {
                        name: String::new(),
                    });
                decoded.into_category(doc.id.clone())
            })
            .collect())
    }

    async fn delete_by_name(&self, name: &str) -> Result<u64, CategoryRepositoryError> {
        let mut state = self.shared.state();
        if state.unavailable {
            return Err(CategoryRepositoryError::connection(UNAVAILABLE));
        }
        let before = state.categories.len();
        state
            .categories
            .retain(|doc| !field_equals(&doc.value, "name", name));
        Ok((before - state.categories.len()) as u64)
    }
}

/// Post repository over the in-memory `posts` collection.
#[derive(Debug, Clone)]
pub struct MemoryPostRepository {
    shared: Arc<Shared>,
}

impl MemoryPostRepository {
    pub(crate) fn new(shared: Arc<Shared>) -> Self {
        Self { shared }
    }
}

#[async_trait]
impl PostRepository for MemoryPostRepository {
    async fn insert(&self, post: &NewPost) -> Result<Post, PostRepositoryError> {
        let mut state = self.shared.state();
        if state.unavailable {
            return Err(PostRepositoryError::connection(UNAVAILABLE));
        }
        let id = Uuid::new_v4().to_string();
        let seq = state.next_seq();
        let value = serde_json::to_value(PostDoc::from(post))
            .map_err(|err| PostRepositoryError::query(err.to_string()))?;
        let doc = StoredDoc {
            id: id.clone(),
            seq,
            value,
        };
        let decoded = decode_post(&doc);
        state.posts.push(doc);
        Ok(decoded)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Post>, PostRepositoryError> {
        let state = self.shared.state();
        if state.unavailable {
            return Err(PostRepositoryError::connection(UNAVAILABLE));
        }
        Ok(state.posts.iter().find(|doc| doc.id == id).map(decode_post))
    }

    async fn list_all(&self) -> Result<Vec<Post>, PostRepositoryError> {
        let state = self.shared.state();
        if state.unavailable {
            return Err(PostRepositoryError::connection(UNAVAILABLE));
        }
        Ok(state.posts.iter().map(decode_post).collect())
    }

    async fn list_by_category(&self, category: &str) -> Result<Vec<Post>, PostRepositoryError> {
        let state = self.shared.state();
        if state.unavailable {
            return Err(PostRepositoryError::connection(UNAVAILABLE));
        }
        Ok(state
            .posts
            .iter()
            .filter(|doc| field_equals(&doc.value, "category", category))
            .map(decode_post)
            .collect())
    }

    async fn list_latest(&self, limit: Option<usize>) -> Result<Vec<Post>, PostRepositoryError> {
        let state = self.shared.state();
        if state.unavailable {
            return Err(PostRepositoryError::connection(UNAVAILABLE));
        }
        let mut decoded: Vec<(Post, u64)> = state
            .posts
            .iter()
            .map(|doc| (decode_post(doc), doc.seq))
            .collect();
        drop(state);
        sort_newest_first(&mut decoded);
        if let Some(limit) = limit {
            decoded.truncate(limit);
        }
        Ok(decoded.into_iter().map(|(post, _)| post).collect())
    }

    async fn list_latest_by_category(
        &self,
        category: &str,
        limit: Option<usize>,
    ) -> Result<Vec<Post>, PostRepositoryError> {
        let state = self.shared.state();
        if state.unavailable {
            return Err(PostRepositoryError::connection(UNAVAILABLE));
        }
        let mut decoded: Vec<(Post, u64)> = state
            .posts
            .iter()
            .filter(|doc| field_equals(&doc.value, "category", category))
            .map(|doc| (decode_post(doc), doc.seq))
            .collect();
        drop(state);
        sort_newest_first(&mut decoded);
        if let Some(limit) = limit {
            decoded.truncate(limit);
        }
        Ok(decoded.into_iter().map(|(post, _)| post).collect())
    }

    async fn update_content(
        &self,
        id: &str,
        title: &str,
        content: &str,
        edited_at: DateTime<Utc>,
    ) -> Result<(), PostRepositoryError> {
        let mut state = self.shared.state();
        if state.unavailable {
            return Err(PostRepositoryError::connection(UNAVAILABLE));
        }
        let doc = state
            .posts
            .iter_mut()
            .find(|doc| doc.id == id)
            .ok_or_else(|| PostRepositoryError::missing(id))?;
        if let Value::Object(map) = &mut doc.value {
            map.insert("title".to_owned(), Value::String(title.to_owned()));
            map.insert("content".to_owned(), Value::String(content.to_owned()));
            map.insert("editedAt".to_owned(), Value::String(edited_at.to_rfc3339()));
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), PostRepositoryError> {
        let mut state = self.shared.state();
        if state.unavailable {
            return Err(PostRepositoryError::connection(UNAVAILABLE));
        }
        state.posts.retain(|doc| doc.id != id);
        Ok(())
    }

    async fn delete_by_category(&self, category: &str) -> Result<u64, PostRepositoryError> {
        let mut state = self.shared.state();
        if state.unavailable {
            return Err(PostRepositoryError::connection(UNAVAILABLE));
        }
        let before = state.posts.len();
        state
            .posts
            .retain(|doc| !field_equals(&doc.value, "category", category));
        Ok((before - state.posts.len()) as u64)
    }
}

/// Comment repository over the in-memory per-post child collections.
#[derive(Debug, Clone)]
pub struct MemoryCommentRepository {
    shared: Arc<Shared>,
}

impl MemoryCommentRepository {
    pub(crate) fn new(shared: Arc<Shared>) -> Self {
        Self { shared }
    }
}

#[async_trait]
impl CommentRepository for MemoryCommentRepository {
    async fn insert(
        &self,
        post_id: &str,
        comment: &NewComment,
    ) -> Result<Comment, CommentRepositoryError> {
        let mut state = self.shared.state();
        if state.unavailable {
            return Err(CommentRepositoryError::connection(UNAVAILABLE));
        }
        let id = Uuid::new_v4().to_string();
        let seq = state.next_seq();
        let value = serde_json::to_value(CommentDoc::from(comment))
            .map_err(|err| CommentRepositoryError::query(err.to_string()))?;
        let doc = StoredDoc {
            id: id.clone(),
            seq,
            value,
        };
        let decoded = decode_comment(&doc);
        state
            .comments
            .entry(post_id.to_owned())
            .or_default()
            .push(doc);
        Ok(decoded)
    }

    async fn list_by_post(&self, post_id: &str) -> Result<Vec<Comment>, CommentRepositoryError> {
        let state = self.shared.state();
        if state.unavailable {
            return Err(CommentRepositoryError::connection(UNAVAILABLE));
        }
        let mut decoded: Vec<(Comment, u64)> = state
            .comments
            .get(post_id)
            .map(|docs| {
                docs.iter()
                    .map(|doc| (decode_comment(doc), doc.seq))
                    .collect()
            })
            .unwrap_or_default();
        drop(state);
        // Oldest first.
        decoded.sort_by(|a, b| {
            a.0.created_at
                .cmp(&b.0.created_at)
                .then_with(|| a.1.cmp(&b.1))
        });
        Ok(decoded.into_iter().map(|(comment, _)| comment).collect())
    }

    async fn find_by_id(
        &self,
        post_id: &str,
        comment_id: &str,
    ) -> Result<Option<Comment>, CommentRepositoryError> {
        let state = self.shared.state();
        if state.unavailable {
            return Err(CommentRepositoryError::connection(UNAVAILABLE));
        }
        Ok(state
            .comments
            .get(post_id)
            .and_then(|docs| docs.iter().find(|doc| doc.id == comment_id))
            .map(decode_comment))
    }

    async fn update_content(
        &self,
        post_id: &str,
        comment_id: &str,
        content: &str,
        edited_at: DateTime<Utc>,
    ) -> Result<(), CommentRepositoryError> {
        let mut state = self.shared.state();
        if state.unavailable {
            return Err(CommentRepositoryError::connection(UNAVAILABLE));
        }
        let doc = state
            .comments
            .get_mut(post_id)
            .and_then(|docs| docs.iter_mut().find(|doc| doc.id == comment_id))
            .ok_or_else(|| CommentRepositoryError::missing(post_id, comment_id))?;
        if let Value::Object(map) = &mut doc.value {
            map.insert("content".to_owned(), Value::String(content.to_owned()));
            map.insert("editedAt".to_owned(), Value::String(edited_at.to_rfc3339()));
        }
        Ok(())
    }

    async fn delete(
        &self,
        post_id: &str,
        comment_id: &str,
    ) -> Result<(), CommentRepositoryError> {
        let mut state = self.shared.state();
        if state.unavailable {
            return Err(CommentRepositoryError::connection(UNAVAILABLE));
        }
        if let Some(docs) = state.comments.get_mut(post_id) {
            docs.retain(|doc| doc.id != comment_id);
        }
        Ok(())
    }
}
