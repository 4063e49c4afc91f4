//! Test utilities for the backend crate.
//!
//! This module provides shared helpers for both unit tests (in `src/`) and
//! integration tests (in `tests/`): a fully wired service stack over the
//! in-memory backend, plus fixture shortcuts for the common sign-up and
//! sign-in sequences. It is only compiled for tests or under the
//! `test-support` feature.

use std::sync::Arc;

use mockable::DefaultClock;

use crate::domain::ports::ReferralCodeRepository;
use crate::domain::{
    AttachmentService, CategoryService, CommentService, LoginCredentials, PostService, Profile,
    ReferralGate, Session, SessionService, SignUpForm,
};
use crate::outbound::memory::{
    MemoryBackend, MemoryCategoryRepository, MemoryCommentRepository, MemoryIdentityProvider,
    MemoryObjectStorage, MemoryPostRepository, MemoryProfileRepository,
    MemoryReferralCodeRepository,
};

/// Session service wired over the in-memory backend.
pub type MemorySessionService =
    SessionService<MemoryIdentityProvider, MemoryProfileRepository, MemoryReferralCodeRepository>;
/// Referral gate wired over the in-memory backend.
pub type MemoryReferralGate = ReferralGate<MemoryReferralCodeRepository>;
/// Category service wired over the in-memory backend.
pub type MemoryCategoryService = CategoryService<MemoryCategoryRepository, MemoryPostRepository>;
/// Post service wired over the in-memory backend.
pub type MemoryPostService = PostService<MemoryPostRepository>;
/// Comment service wired over the in-memory backend.
pub type MemoryCommentService = CommentService<MemoryCommentRepository>;
/// Attachment service wired over the in-memory backend.
pub type MemoryAttachmentService = AttachmentService<MemoryObjectStorage>;

/// Password used by fixture accounts.
pub const TEST_PASSWORD: &str = "longenough";
/// Referral code seeded by [`TestStack::with_referral_code`].
pub const TEST_REFERRAL_CODE: &str = "WELCOME";

/// A fully wired service stack over one shared in-memory backend.
pub struct TestStack {
    /// The backing store, exposed for direct assertions and raw inserts.
    pub backend: MemoryBackend,
    /// Session service.
    pub sessions: MemorySessionService,
    /// Referral gate.
    pub referral_gate: MemoryReferralGate,
    /// Category service.
    pub categories: MemoryCategoryService,
    /// Post service.
    pub posts: MemoryPostService,
    /// Comment service.
    pub comments: MemoryCommentService,
    /// Attachment service.
    pub attachments: MemoryAttachmentService,
}

impl TestStack {
    /// Wire a stack with the given administrator emails.
    #[must_use]
    pub fn new(admin_emails: Vec<String>) -> Self {
        let backend = MemoryBackend::new();
        let sessions = SessionService::new(
            Arc::new(backend.identity_provider()),
            Arc::new(backend.profiles()),
            Arc::new(backend.referral_codes()),
            admin_emails,
        );
        let referral_gate = ReferralGate::new(Arc::new(backend.referral_codes()));
        let categories = CategoryService::new(
            Arc::new(backend.categories()),
            Arc::new(backend.posts()),
        );
        let posts = PostService::new(Arc::new(backend.posts()), Arc::new(DefaultClock));
        let comments = CommentService::new(Arc::new(backend.comments()), Arc::new(DefaultClock));
        let attachments = AttachmentService::new(Arc::new(backend.object_storage()));
        Self {
            backend,
            sessions,
            referral_gate,
            categories,
            posts,
            comments,
            attachments,
        }
    }

    /// Wire a stack with [`TEST_REFERRAL_CODE`] already seeded.
    pub async fn with_referral_code(admin_emails: Vec<String>) -> Self {
        let stack = Self::new(admin_emails);
        stack
            .backend
            .referral_codes()
            .insert(TEST_REFERRAL_CODE)
            .await
            .expect("seeding a referral code succeeds in memory");
        stack
    }

    /// Sign up a fixture account with [`TEST_PASSWORD`] and the seeded
    /// referral code.
    pub async fn sign_up(&self, email: &str, nickname: &str) -> Profile {
        let form = SignUpForm::try_from_parts(email, TEST_PASSWORD, nickname, TEST_REFERRAL_CODE)
            .expect("fixture form shape is valid");
        self.sessions
            .sign_up(&form)
            .await
            .expect("fixture sign-up succeeds")
    }

    /// Sign in a fixture account created by [`TestStack::sign_up`].
    pub async fn login(&self, email: &str) -> Session {
        let creds = LoginCredentials::try_from_parts(email, TEST_PASSWORD)
            .expect("fixture credentials shape is valid");
        self.sessions
            .login(&creds)
            .await
            .expect("fixture login succeeds")
    }

    /// Sign up and immediately sign in.
    pub async fn member(&self, email: &str, nickname: &str) -> Session {
        self.sign_up(email, nickname).await;
        self.login(email).await
    }
}
