//! Comment domain service.
//!
//! Mutation is owner-only and there is deliberately no administrator
//! override here, unlike post deletion; DESIGN.md records the asymmetry.

use std::sync::Arc;

use mockable::Clock;
use tracing::error;

use crate::domain::comment::{Comment, NewComment};
use crate::domain::ports::{CommentRepository, CommentRepositoryError};
use crate::domain::user::Session;
use crate::domain::Error;

/// Comment service wired over the per-post comment collections.
#[derive(Clone)]
pub struct CommentService<C> {
    comments: Arc<C>,
    clock: Arc<dyn Clock>,
}

impl<C> CommentService<C> {
    /// Create a new service.
    pub fn new(comments: Arc<C>, clock: Arc<dyn Clock>) -> Self {
        Self { comments, clock }
    }
}

impl<C> CommentService<C>
where
    C: CommentRepository,
{
    /// Insert a comment under a post, authored by the session user.
    ///
    /// # Errors
    ///
    /// [`crate::domain::ErrorCode::Validation`] for blank content.
    pub async fn add_comment(
        &self,
        session: &Session,
        post_id: &str,
        content: &str,
    ) -> Result<Comment, Error> {
        if content.trim().is_empty() {
            return Err(Error::validation("comment content must not be empty"));
        }
        let new_comment = NewComment {
            content: content.to_owned(),
            author: session.author_snapshot(),
            created_at: self.clock.utc(),
        };
        self.comments
            .insert(post_id, &new_comment)
            .await
            .map_err(map_comment_error)
    }

    /// Return a post's comments ordered oldest-first.
    ///
    /// A transport failure is logged and produces an empty list; callers
    /// cannot distinguish "no data" from "request failed".
    pub async fn get_comments_by_post_id(&self, post_id: &str) -> Vec<Comment> {
        match self.comments.list_by_post(post_id).await {
            Ok(comments) => comments,
            Err(source) => {
                error!(post_id, error = %source, "comment listing failed");
                Vec::new()
            }
        }
    }

    /// Overwrite a comment's content and stamp the edit time.
    ///
    /// # Errors
    ///
    /// [`crate::domain::ErrorCode::NotFound`] when the comment is missing,
    /// [`crate::domain::ErrorCode::Forbidden`] unless the stored author uid
    /// equals the session uid, [`crate::domain::ErrorCode::Validation`] for
    /// blank content.
    pub async fn update_comment(
        &self,
        session: &Session,
        post_id: &str,
        comment_id: &str,
        content: &str,
    ) -> Result<(), Error> {
        let comment = self.require_comment(post_id, comment_id).await?;
        if comment.author.uid != session.uid {
            return Err(Error::forbidden("only the author may edit this comment"));
        }
        if content.trim().is_empty() {
            return Err(Error::validation("comment content must not be empty"));
        }
        self.comments
            .update_content(post_id, comment_id, content, self.clock.utc())
            .await
            .map_err(map_comment_error)
    }

    /// Delete a comment. Owner-only; administrators get no override.
    ///
    /// # Errors
    ///
    /// [`crate::domain::ErrorCode::NotFound`] when the comment is missing,
    /// [`crate::domain::ErrorCode::Forbidden`] for any other caller.
    pub async fn delete_comment(
        &self,
        session: &Session,
        post_id: &str,
        comment_id: &str,
    ) -> Result<(), Error> {
        let comment = self.require_comment(post_id, comment_id).await?;
        if comment.author.uid != session.uid {
            return Err(Error::forbidden("only the author may delete this comment"));
        }
        self.comments
            .delete(post_id, comment_id)
            .await
            .map_err(map_comment_error)
    }

    async fn require_comment(&self, post_id: &str, comment_id: &str) -> Result<Comment, Error> {
        self.comments
            .find_by_id(post_id, comment_id)
            .await
            .map_err(map_comment_error)?
            .ok_or_else(|| Error::not_found(format!("no such comment: {comment_id}")))
    }
}

fn map_comment_error(error: CommentRepositoryError) -> Error {
    match error {
        CommentRepositoryError::Connection { message } => {
            Error::unavailable(format!("comment store unavailable: {message}"))
        }
        CommentRepositoryError::Query { message } => {
            Error::internal(format!("comment store error: {message}"))
        }
        CommentRepositoryError::Missing {
            post_id: _,
            comment_id,
        } => Error::not_found(format!("no such comment: {comment_id}")),
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    use chrono::{TimeZone, Utc};
    use mockable::DefaultClock;
    use rstest::rstest;

    use crate::domain::ports::MockCommentRepository;
    use crate::domain::user::{AuthorSnapshot, Role};
    use crate::domain::ErrorCode;

    fn session(uid: &str) -> Session {
        Session {
            uid: uid.to_owned(),
            email: format!("{uid}@example.com"),
            display_name: uid.to_owned(),
            role: Role::Member,
        }
    }

    fn stored_comment(author_uid: &str) -> Comment {
        Comment {
            id: "comment-1".to_owned(),
            content: "original".to_owned(),
            author: AuthorSnapshot {
                uid: author_uid.to_owned(),
                nickname: author_uid.to_owned(),
                email: format!("{author_uid}@example.com"),
            },
            created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).single().expect("timestamp"),
            edited_at: None,
        }
    }

    fn service(comments: MockCommentRepository) -> CommentService<MockCommentRepository> {
        CommentService::new(Arc::new(comments), Arc::new(DefaultClock))
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[tokio::test]
    async fn blank_comment_content_is_rejected(#[case] content: &str) {
        let mut comments = MockCommentRepository::new();
        comments.expect_insert().times(0);
        let svc = service(comments);
        let err = svc
            .add_comment(&session("uid-1"), "post-1", content)
            .await
            .expect_err("blank content must fail");
        assert_eq!(err.code(), ErrorCode::Validation);
    }

    #[tokio::test]
    async fn add_comment_captures_author_snapshot() {
        let mut comments = MockCommentRepository::new();
        comments
            .expect_insert()
            .withf(|post_id, new_comment: &NewComment| {
                post_id == "post-1" && new_comment.author.uid == "uid-1"
            })
            .returning(|_, new_comment| {
                Ok(Comment {
                    id: "comment-1".to_owned(),
                    content: new_comment.content.clone(),
                    author: new_comment.author.clone(),
                    created_at: new_comment.created_at,
                    edited_at: None,
                })
            })
            .times(1);
        let svc = service(comments);
        let comment = svc
            .add_comment(&session("uid-1"), "post-1", "hello")
            .await
            .expect("insert succeeds");
        assert_eq!(comment.author.uid, "uid-1");
    }

    #[rstest]
    #[case::update(true)]
    #[case::delete(false)]
    #[tokio::test]
    async fn non_author_mutation_is_forbidden_and_leaves_comment_untouched(
        #[case] update: bool,
    ) {
        let mut comments = MockCommentRepository::new();
        comments
            .expect_find_by_id()
            .returning(|_, _| Ok(Some(stored_comment("owner"))));
        comments.expect_update_content().times(0);
        comments.expect_delete().times(0);
        let svc = service(comments);
        let intruder = session("intruder");
        let err = if update {
            svc.update_comment(&intruder, "post-1", "comment-1", "new")
                .await
                .expect_err("update must be refused")
        } else {
            svc.delete_comment(&intruder, "post-1", "comment-1")
                .await
                .expect_err("delete must be refused")
        };
        assert_eq!(err.code(), ErrorCode::Forbidden);
    }

    #[tokio::test]
    async fn missing_comment_is_not_found() {
        let mut comments = MockCommentRepository::new();
        comments.expect_find_by_id().returning(|_, _| Ok(None));
        let svc = service(comments);
        let err = svc
            .delete_comment(&session("owner"), "post-1", "gone")
            .await
            .expect_err("missing comment must fail");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn owner_update_stamps_edit_time() {
        let mut comments = MockCommentRepository::new();
        comments
            .expect_find_by_id()
            .returning(|_, _| Ok(Some(stored_comment("owner"))));
        comments
            .expect_update_content()
            .withf(|post_id, comment_id, content, _| {
                post_id == "post-1" && comment_id == "comment-1" && content == "edited"
            })
            .returning(|_, _, _, _| Ok(()))
            .times(1);
        let svc = service(comments);
        svc.update_comment(&session("owner"), "post-1", "comment-1", "edited")
            .await
            .expect("owner update succeeds");
    }

    #[tokio::test]
    async fn listing_failure_swallows_to_empty() {
        let mut comments = MockCommentRepository::new();
        comments
            .expect_list_by_post()
            .returning(|_| Err(CommentRepositoryError::connection("store down")));
        let svc = service(comments);
        assert!(svc.get_comments_by_post_id("post-1").await.is_empty());
    }
}
