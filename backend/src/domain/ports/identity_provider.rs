//! Port abstraction for the external identity provider.

use async_trait::async_trait;

use crate::domain::user::Account;

/// Errors raised by identity provider adapters.
///
/// The session service needs to tell policy failures apart from transport
/// failures so it can translate known provider codes into user-facing
/// errors; everything else collapses into `Transport`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentityProviderError {
    /// Email and password did not match an account.
    #[error("invalid credentials")]
    InvalidCredentials,
    /// The provider already holds an account for this email.
    #[error("email already in use")]
    EmailTaken,
    /// The provider rejected the password as too weak.
    #[error("password rejected as too weak")]
    WeakPassword,
    /// The referenced account does not exist.
    #[error("no such account: {uid}")]
    UnknownAccount {
        /// Account id that failed to resolve.
        uid: String,
    },
    /// The provider could not be reached or returned an unexpected payload.
    #[error("identity provider request failed: {message}")]
    Transport {
        /// Adapter-supplied failure description.
        message: String,
    },
}

impl IdentityProviderError {
    /// Construct an [`IdentityProviderError::UnknownAccount`].
    pub fn unknown_account(uid: impl Into<String>) -> Self {
        Self::UnknownAccount { uid: uid.into() }
    }

    /// Construct an [`IdentityProviderError::Transport`].
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }
}

/// Port for the account lifecycle the external identity provider owns.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Create an account and return its record.
    ///
    /// The display name is set in the same call where the provider supports
    /// it; adapters that need a second request issue it before returning.
    async fn create_account(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<Account, IdentityProviderError>;

    /// Validate credentials and return the matching account.
    async fn sign_in(&self, email: &str, password: &str)
    -> Result<Account, IdentityProviderError>;

    /// End the provider-side session for an account.
    async fn sign_out(&self, uid: &str) -> Result<(), IdentityProviderError>;

    /// Delete the account record.
    async fn delete_account(&self, uid: &str) -> Result<(), IdentityProviderError>;

    /// Update the account's display name.
    async fn update_display_name(
        &self,
        uid: &str,
        display_name: &str,
    ) -> Result<(), IdentityProviderError>;
}
