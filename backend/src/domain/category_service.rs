//! Category domain service, including the cascade delete.

use std::sync::Arc;

use tracing::{error, info};

use crate::domain::ports::{
    CategoryRepository, CategoryRepositoryError, PostRepository, PostRepositoryError,
};
use crate::domain::user::Session;
use crate::domain::Error;

/// Category service wired over the category and post collections.
///
/// The post repository is needed because deleting a category cascades to
/// every post filed under its name; no other cross-component dependency
/// exists on this side of the graph.
#[derive(Clone)]
pub struct CategoryService<C, P> {
    categories: Arc<C>,
    posts: Arc<P>,
}

impl<C, P> CategoryService<C, P> {
    /// Create a new service.
    pub fn new(categories: Arc<C>, posts: Arc<P>) -> Self {
        Self { categories, posts }
    }
}

impl<C, P> CategoryService<C, P>
where
    C: CategoryRepository,
    P: PostRepository,
{
    /// Append a category document.
    ///
    /// The service performs no uniqueness check: callers are expected to
    /// pre-check against [`CategoryService::get_categories`], and two racing
    /// callers can still create duplicate documents. Nothing here claims
    /// exactly-once semantics; [`CategoryService::delete_category`] removes
    /// all duplicates of a name for this reason.
    ///
    /// # Errors
    ///
    /// [`crate::domain::ErrorCode::Forbidden`] unless the session is an
    /// administrator; [`crate::domain::ErrorCode::Validation`] for a blank
    /// name.
    pub async fn add_category(&self, session: &Session, name: &str) -> Result<(), Error> {
        if !session.is_admin() {
            return Err(Error::forbidden("only an administrator may add categories"));
        }
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::validation("category name must not be empty"));
        }
        self.categories
            .insert(name)
            .await
            .map(|_| ())
            .map_err(map_category_error)
    }

    /// Return the set of category names, unordered.
    ///
    /// A transport failure is logged and produces an empty list; callers
    /// cannot distinguish "no data" from "request failed".
    pub async fn get_categories(&self) -> Vec<String> {
        match self.categories.list().await {
            Ok(categories) => categories.into_iter().map(|category| category.name).collect(),
            Err(source) => {
                error!(error = %source, "category listing failed");
                Vec::new()
            }
        }
    }

    /// Delete every post filed under `name`, then every category document
    /// whose name matches.
    ///
    /// The two phases are separate store requests and are not atomic: a
    /// crash in between leaves a category with no posts, and a partial
    /// phase-one failure leaves a category with a partial post set. Each
    /// phase is a single batch request so there is no per-document window
    /// inside a phase.
    ///
    /// # Errors
    ///
    /// [`crate::domain::ErrorCode::Forbidden`] unless the session is an
    /// administrator; transport failures surface as
    /// [`crate::domain::ErrorCode::Unavailable`] or
    /// [`crate::domain::ErrorCode::Internal`].
    pub async fn delete_category(&self, session: &Session, name: &str) -> Result<(), Error> {
        if !session.is_admin() {
            return Err(Error::forbidden(
                "only an administrator may delete categories",
            ));
        }
        let removed_posts = self
            .posts
            .delete_by_category(name)
            .await
            .map_err(map_post_error)?;
        let removed_categories = self
            .categories
            .delete_by_name(name)
            .await
            .map_err(map_category_error)?;
        info!(
            category = name,
            removed_posts, removed_categories, "category cascade delete finished"
        );
        Ok(())
    }
}

fn map_category_error(error: CategoryRepositoryError) -> Error {
    match error {
        CategoryRepositoryError::Connection { message } => {
            Error::unavailable(format!("category store unavailable: {message}"))
        }
        CategoryRepositoryError::Query { message } => {
            Error::internal(format!("category store error: {message}"))
        }
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

    use crate::domain::category::Category;
    use crate::domain::ports::{MockCategoryRepository, MockPostRepository};
    use crate::domain::user::Role;
    use crate::domain::ErrorCode;

    fn session(role: Role) -> Session {
        Session {
            uid: "uid-1".to_owned(),
            email: "root@example.com".to_owned(),
            display_name: "root".to_owned(),
            role,
        }
    }

    #[tokio::test]
    async fn add_category_requires_admin() {
        let mut categories = MockCategoryRepository::new();
        categories.expect_insert().times(0);
        let svc = CategoryService::new(Arc::new(categories), Arc::new(MockPostRepository::new()));
        let err = svc
            .add_category(&session(Role::Member), "News")
            .await
            .expect_err("member must be refused");
        assert_eq!(err.code(), ErrorCode::Forbidden);
    }

    #[tokio::test]
    async fn add_category_performs_no_uniqueness_check() {
        let mut categories = MockCategoryRepository::new();
        categories.expect_list().times(0);
        categories
            .expect_insert()
            .withf(|name| name == "News")
            .returning(|name| {
                Ok(Category {
                    id: "cat-1".to_owned(),
                    name: name.to_owned(),
                })
            })
            .times(1);
        let svc = CategoryService::new(Arc::new(categories), Arc::new(MockPostRepository::new()));
        svc.add_category(&session(Role::Admin), "News")
            .await
            .expect("insert runs");
    }

    #[tokio::test]
    async fn listing_failure_swallows_to_empty() {
        let mut categories = MockCategoryRepository::new();
        categories
            .expect_list()
            .returning(|| Err(CategoryRepositoryError::connection("store down")));
        let svc = CategoryService::new(Arc::new(categories), Arc::new(MockPostRepository::new()));
        assert!(svc.get_categories().await.is_empty());
    }

    #[tokio::test]
    async fn cascade_deletes_posts_before_category_documents() {
        let mut posts = MockPostRepository::new();
        posts
            .expect_delete_by_category()
            .withf(|name| name == "News")
            .returning(|_| Ok(2))
            .times(1);
        let mut categories = MockCategoryRepository::new();
        categories
            .expect_delete_by_name()
            .withf(|name| name == "News")
            .returning(|_| Ok(1))
            .times(1);
        let svc = CategoryService::new(Arc::new(categories), Arc::new(posts));
        svc.delete_category(&session(Role::Admin), "News")
            .await
            .expect("cascade runs");
    }

    #[tokio::test]
    async fn cascade_stops_when_post_phase_fails() {
        let mut posts = MockPostRepository::new();
        posts
            .expect_delete_by_category()
            .returning(|_| Err(PostRepositoryError::connection("store down")));
        let mut categories = MockCategoryRepository::new();
        categories.expect_delete_by_name().times(0);
        let svc = CategoryService::new(Arc::new(categories), Arc::new(posts));
        let err = svc
            .delete_category(&session(Role::Admin), "News")
            .await
            .expect_err("failed phase one must stop the cascade");
        assert_eq!(err.code(), ErrorCode::Unavailable);
    }
}
