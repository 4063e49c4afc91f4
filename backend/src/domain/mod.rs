//! Domain primitives, services, and ports.
//!
//! Purpose: Define strongly typed domain entities used by the service layer
//! and its adapters. Keep types immutable and document invariants and
//! serialisation contracts (serde) in each type's Rustdoc.
//!
//! Public surface:
//! - [`Error`]/[`ErrorCode`] — the error payload every operation returns.
//! - Entities: [`Profile`], [`Session`], [`Category`], [`Post`],
//!   [`Comment`], [`Attachment`], and the [`AuthorSnapshot`] embedded in
//!   content.
//! - Services: [`SessionService`], [`ReferralGate`], [`CategoryService`],
//!   [`PostService`], [`CommentService`], [`AttachmentService`].
//! - [`ports`] — the async traits adapters implement.

pub mod ports;

mod attachment_service;
mod category;
mod category_service;
mod comment;
mod comment_service;
mod credentials;
mod error;
mod post;
mod post_service;
mod referral;
mod session_service;
mod user;

pub use self::attachment_service::AttachmentService;
pub use self::category::Category;
pub use self::category_service::CategoryService;
pub use self::comment::{Comment, NewComment};
pub use self::comment_service::CommentService;
pub use self::credentials::{CredentialsError, LoginCredentials, SignUpForm};
pub use self::error::{Error, ErrorCode};
pub use self::post::{Attachment, NewPost, Post, PostDraft, UNTITLED_PLACEHOLDER};
pub use self::post_service::{PostService, DEFAULT_LATEST_LIMIT};
pub use self::referral::ReferralGate;
pub use self::session_service::{SessionService, MIN_PASSWORD_CHARS};
pub use self::user::{Account, AuthorSnapshot, Profile, Role, Session, ANONYMOUS_NICKNAME};

/// Convenient service result alias.
///
/// # Examples
/// ```
/// use treehouse_backend::domain::{Error, ServiceResult};
///
/// fn refuse() -> ServiceResult<()> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ServiceResult<T> = Result<T, Error>;
