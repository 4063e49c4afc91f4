//! Domain ports for the hexagonal boundary.
//!
//! Each port is an async trait describing one collection or collaborator of
//! the external backend-as-a-service, with a `thiserror` enum for the
//! failures its adapters can raise. Services depend on these traits only;
//! the reqwest-backed and in-memory implementations live in
//! [`crate::outbound`].

mod category_repository;
mod comment_repository;
mod identity_provider;
mod object_storage;
mod post_repository;
mod profile_repository;
mod referral_code_repository;

#[cfg(test)]
pub use category_repository::MockCategoryRepository;
pub use category_repository::{CategoryRepository, CategoryRepositoryError};
#[cfg(test)]
pub use comment_repository::MockCommentRepository;
pub use comment_repository::{CommentRepository, CommentRepositoryError};
#[cfg(test)]
pub use identity_provider::MockIdentityProvider;
pub use identity_provider::{IdentityProvider, IdentityProviderError};
#[cfg(test)]
pub use object_storage::MockObjectStorage;
pub use object_storage::{ObjectStorage, ObjectStorageError, ObjectUpload};
#[cfg(test)]
pub use post_repository::MockPostRepository;
pub use post_repository::{PostRepository, PostRepositoryError};
#[cfg(test)]
pub use profile_repository::MockProfileRepository;
pub use profile_repository::{ProfileRepository, ProfileRepositoryError};
#[cfg(test)]
pub use referral_code_repository::MockReferralCodeRepository;
pub use referral_code_repository::{ReferralCodeRepository, ReferralCodeRepositoryError};
