//! Post domain service.
//!
//! Authorization for post mutation is enforced here, in the service layer,
//! not left to callers: update requires the matching author uid, delete
//! accepts the author or an administrator. Comments follow a stricter
//! owner-only rule with no administrator override; DESIGN.md records why
//! the two differ.

use std::sync::Arc;

use mockable::Clock;
use tracing::error;

use crate::domain::ports::{PostRepository, PostRepositoryError};
use crate::domain::post::{NewPost, Post, PostDraft};
use crate::domain::user::Session;
use crate::domain::Error;

/// Fixed page size for the category-scoped latest-posts query.
pub const DEFAULT_LATEST_LIMIT: usize = 5;

/// Post service wired over the post collection.
#[derive(Clone)]
pub struct PostService<P> {
    posts: Arc<P>,
    clock: Arc<dyn Clock>,
}

impl<P> PostService<P> {
    /// Create a new service.
    pub fn new(posts: Arc<P>, clock: Arc<dyn Clock>) -> Self {
        Self { posts, clock }
    }
}

impl<P> PostService<P>
where
    P: PostRepository,
{
    /// Insert a post authored by the session user.
    ///
    /// The author snapshot is captured from the session and `created_at` is
    /// stamped from the service clock.
    ///
    /// # Errors
    ///
    /// [`crate::domain::ErrorCode::Validation`] when title, content, or
    /// category is blank.
    pub async fn add_post(&self, session: &Session, draft: PostDraft) -> Result<Post, Error> {
        if draft.title.trim().is_empty()
            || draft.content.trim().is_empty()
            || draft.category.trim().is_empty()
        {
            return Err(Error::validation(
                "title, content, and category are all required",
            ));
        }
        let new_post = NewPost {
            title: draft.title,
            content: draft.content,
            category: draft.category,
            author: session.author_snapshot(),
            attachment: draft.attachment,
            created_at: self.clock.utc(),
        };
        self.posts.insert(&new_post).await.map_err(map_post_error)
    }

    /// Return all posts, or only those filed under `category` when given.
    ///
    /// A transport failure is logged and produces an empty list; callers
    /// cannot distinguish "no data" from "request failed". Stored documents
    /// with missing fields come back patched with fallback values by the
    /// adapter rather than failing the query.
    pub async fn get_posts_by_category(&self, category: Option<&str>) -> Vec<Post> {
        let result = match category {
            Some(name) if !name.is_empty() => self.posts.list_by_category(name).await,
            _ => self.posts.list_all().await,
        };
        match result {
            Ok(posts) => posts,
            Err(source) => {
                error!(error = %source, "post listing failed");
                Vec::new()
            }
        }
    }

    /// Fetch one post. `None` is the not-found sentinel and is terminal for
    /// callers (screens redirect away on it); a transport failure is logged
    /// and also maps to `None`.
    pub async fn get_post_by_id(&self, id: &str) -> Option<Post> {
        match self.posts.find_by_id(id).await {
            Ok(post) => post,
            Err(source) => {
                error!(post_id = id, error = %source, "post fetch failed");
                None
            }
        }
    }

    /// Overwrite a post's title and content and stamp the edit time.
    ///
    /// # Errors
    ///
    /// [`crate::domain::ErrorCode::NotFound`] when the post is missing,
    /// [`crate::domain::ErrorCode::Forbidden`] unless the session uid
    /// matches the stored author uid (no administrator override for edits),
    /// [`crate::domain::ErrorCode::Validation`] for blank title or content.
    pub async fn update_post(
        &self,
        session: &Session,
        id: &str,
        title: &str,
        content: &str,
    ) -> Result<(), Error> {
        let post = self.require_post(id).await?;
        if post.author.uid != session.uid {
            return Err(Error::forbidden("only the author may edit this post"));
        }
        if title.trim().is_empty() || content.trim().is_empty() {
            return Err(Error::validation("title and content are both required"));
        }
        self.posts
            .update_content(id, title, content, self.clock.utc())
            .await
            .map_err(map_post_error)
    }

    /// Delete a post. The author may always delete their own post; an
    /// administrator may delete anyone's.
    ///
    /// # Errors
    ///
    /// [`crate::domain::ErrorCode::NotFound`] when the post is missing,
    /// [`crate::domain::ErrorCode::Forbidden`] for any other caller.
    pub async fn delete_post(&self, session: &Session, id: &str) -> Result<(), Error> {
        let post = self.require_post(id).await?;
        if post.author.uid != session.uid && !session.is_admin() {
            return Err(Error::forbidden(
                "only the author or an administrator may delete this post",
            ));
        }
        self.posts.delete(id).await.map_err(map_post_error)
    }

    /// Return every post ordered newest-first.
    ///
    /// Same swallow-and-log policy as
    /// [`PostService::get_posts_by_category`].
    pub async fn get_latest_posts(&self) -> Vec<Post> {
        match self.posts.list_latest(None).await {
            Ok(posts) => posts,
            Err(source) => {
                error!(error = %source, "latest post listing failed");
                Vec::new()
            }
        }
    }

    /// Return the newest posts in one category, capped to `limit`
    /// ([`DEFAULT_LATEST_LIMIT`] is the conventional page size).
    pub async fn get_latest_posts_by_category(&self, category: &str, limit: usize) -> Vec<Post> {
        match self
            .posts
            .list_latest_by_category(category, Some(limit))
            .await
        {
            Ok(posts) => posts,
            Err(source) => {
                error!(category, error = %source, "latest post listing failed");
                Vec::new()
            }
        }
    }

    async fn require_post(&self, id: &str) -> Result<Post, Error> {
        self.posts
            .find_by_id(id)
            .await
            .map_err(map_post_error)?
            .ok_or_else(|| Error::not_found(format!("no such post: {id}")))
    }
}

fn map_post_error(error: PostRepositoryError) -> Error {
    match error {
        PostRepositoryError::Connection { message } => {
            Error::unavailable(format!("post store unavailable: {message}"))
        }
        PostRepositoryError::Query { message } => {
            Error::internal(format!("post store error: {message}"))
        }
        PostRepositoryError::Missing { id } => Error::not_found(format!("no such post: {id}")),
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    use chrono::{TimeZone, Utc};
    use mockable::DefaultClock;
    use rstest::rstest;

    use crate::domain::ports::MockPostRepository;
    use crate::domain::user::{AuthorSnapshot, Role};
    use crate::domain::ErrorCode;

    fn session(uid: &str, role: Role) -> Session {
        Session {
            uid: uid.to_owned(),
            email: format!("{uid}@example.com"),
            display_name: uid.to_owned(),
            role,
        }
    }

    fn stored_post(id: &str, author_uid: &str) -> Post {
        Post {
            id: id.to_owned(),
            title: "title".to_owned(),
            content: "content".to_owned(),
            category: "News".to_owned(),
            author: AuthorSnapshot {
                uid: author_uid.to_owned(),
                nickname: author_uid.to_owned(),
                email: format!("{author_uid}@example.com"),
            },
            attachment: None,
            created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).single().expect("timestamp"),
            edited_at: None,
        }
    }

    fn service(posts: MockPostRepository) -> PostService<MockPostRepository> {
        PostService::new(Arc::new(posts), Arc::new(DefaultClock))
    }

    #[rstest]
    #[case("", "content", "News")]
    #[case("title", "   ", "News")]
    #[case("title", "content", "")]
    #[tokio::test]
    async fn add_post_rejects_blank_fields(
        #[case] title: &str,
        #[case] content: &str,
        #[case] category: &str,
    ) {
        let mut posts = MockPostRepository::new();
        posts.expect_insert().times(0);
        let svc = service(posts);
        let draft = PostDraft {
            title: title.to_owned(),
            content: content.to_owned(),
            category: category.to_owned(),
            attachment: None,
        };
        let err = svc
            .add_post(&session("uid-1", Role::Member), draft)
            .await
            .expect_err("blank fields must fail");
        assert_eq!(err.code(), ErrorCode::Validation);
    }

    #[tokio::test]
    async fn add_post_captures_author_snapshot_and_timestamp() {
        let mut posts = MockPostRepository::new();
        posts
            .expect_insert()
            .withf(|new_post: &NewPost| {
                new_post.author.uid == "uid-1" && new_post.title == "hello"
            })
            .returning(|new_post| {
                Ok(Post {
                    id: "post-1".to_owned(),
                    title: new_post.title.clone(),
                    content: new_post.content.clone(),
                    category: new_post.category.clone(),
                    author: new_post.author.clone(),
                    attachment: new_post.attachment.clone(),
                    created_at: new_post.created_at,
                    edited_at: None,
                })
            })
            .times(1);
        let svc = service(posts);
        let draft = PostDraft {
            title: "hello".to_owned(),
            content: "world".to_owned(),
            category: "News".to_owned(),
            attachment: None,
        };
        let post = svc
            .add_post(&session("uid-1", Role::Member), draft)
            .await
            .expect("insert succeeds");
        assert_eq!(post.id, "post-1");
        assert_eq!(post.author.uid, "uid-1");
    }

    #[tokio::test]
    async fn update_post_by_non_author_is_forbidden() {
        let mut posts = MockPostRepository::new();
        posts
            .expect_find_by_id()
            .returning(|_| Ok(Some(stored_post("post-1", "owner"))));
        posts.expect_update_content().times(0);
        let svc = service(posts);
        let err = svc
            .update_post(&session("intruder", Role::Member), "post-1", "t", "c")
            .await
            .expect_err("non-author must be refused");
        assert_eq!(err.code(), ErrorCode::Forbidden);
    }

    #[tokio::test]
    async fn update_post_by_admin_is_still_forbidden() {
        // Administrators may delete posts but not edit them; edits stay
        // owner-only.
        let mut posts = MockPostRepository::new();
        posts
            .expect_find_by_id()
            .returning(|_| Ok(Some(stored_post("post-1", "owner"))));
        posts.expect_update_content().times(0);
        let svc = service(posts);
        let err = svc
            .update_post(&session("root", Role::Admin), "post-1", "t", "c")
            .await
            .expect_err("admin edit must be refused");
        assert_eq!(err.code(), ErrorCode::Forbidden);
    }

    #[tokio::test]
    async fn update_post_stamps_edit_time() {
        let mut posts = MockPostRepository::new();
        posts
            .expect_find_by_id()
            .returning(|_| Ok(Some(stored_post("post-1", "owner"))));
        posts
            .expect_update_content()
            .withf(|id, title, content, _| id == "post-1" && title == "t2" && content == "c2")
            .returning(|_, _, _, _| Ok(()))
            .times(1);
        let svc = service(posts);
        svc.update_post(&session("owner", Role::Member), "post-1", "t2", "c2")
            .await
            .expect("owner update succeeds");
    }

    #[rstest]
    #[case("owner", Role::Member, true)]
    #[case("root", Role::Admin, true)]
    #[case("intruder", Role::Member, false)]
    #[tokio::test]
    async fn delete_post_allows_owner_or_admin(
        #[case] uid: &str,
        #[case] role: Role,
        #[case] allowed: bool,
    ) {
        let mut posts = MockPostRepository::new();
        posts
            .expect_find_by_id()
            .returning(|_| Ok(Some(stored_post("post-1", "owner"))));
        posts
            .expect_delete()
            .returning(|_| Ok(()))
            .times(usize::from(allowed));
        let svc = service(posts);
        let result = svc.delete_post(&session(uid, role), "post-1").await;
        if allowed {
            result.expect("deletion succeeds");
        } else {
            let err = result.expect_err("deletion must be refused");
            assert_eq!(err.code(), ErrorCode::Forbidden);
        }
    }

    #[tokio::test]
    async fn missing_post_is_not_found() {
        let mut posts = MockPostRepository::new();
        posts.expect_find_by_id().returning(|_| Ok(None));
        let svc = service(posts);
        let err = svc
            .delete_post(&session("owner", Role::Member), "gone")
            .await
            .expect_err("missing post must fail");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn listing_failure_swallows_to_empty() {
        let mut posts = MockPostRepository::new();
        posts
            .expect_list_all()
            .returning(|| Err(PostRepositoryError::connection("store down")));
        let svc = service(posts);
        assert!(svc.get_posts_by_category(None).await.is_empty());
    }

    #[tokio::test]
    async fn fetch_failure_maps_to_none() {
        let mut posts = MockPostRepository::new();
        posts
            .expect_find_by_id()
            .returning(|_| Err(PostRepositoryError::connection("store down")));
        let svc = service(posts);
        assert!(svc.get_post_by_id("post-1").await.is_none());
    }

    #[tokio::test]
    async fn latest_by_category_forwards_the_limit() {
        let mut posts = MockPostRepository::new();
        posts
            .expect_list_latest_by_category()
            .withf(|category, limit| category == "News" && *limit == Some(DEFAULT_LATEST_LIMIT))
            .returning(|_, _| Ok(Vec::new()))
            .times(1);
        let svc = service(posts);
        let _ = svc
            .get_latest_posts_by_category("News", DEFAULT_LATEST_LIMIT)
            .await;
    }
}
