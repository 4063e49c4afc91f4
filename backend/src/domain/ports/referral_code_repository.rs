//! Port abstraction for the referral-code reference collection.

use async_trait::async_trait;

/// Errors raised by referral-code repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReferralCodeRepositoryError {
    /// The store could not be reached.
    #[error("referral code store connection failed: {message}")]
    Connection {
        /// Adapter-supplied failure description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("referral code store query failed: {message}")]
    Query {
        /// Adapter-supplied failure description.
        message: String,
    },
}

impl ReferralCodeRepositoryError {
    /// Construct a [`ReferralCodeRepositoryError::Connection`].
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Construct a [`ReferralCodeRepositoryError::Query`].
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Port for the `referralCodes` collection.
///
/// A document's key *is* the code string; existence is the sole validity
/// signal. No usage count, expiry, or per-user binding exists.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReferralCodeRepository: Send + Sync {
    /// True when a document keyed by `code` exists.
    async fn exists(&self, code: &str) -> Result<bool, ReferralCodeRepositoryError>;

    /// Create a code document. Used by seeding and administration, never by
    /// the sign-up path.
    async fn insert(&self, code: &str) -> Result<(), ReferralCodeRepositoryError>;
}
