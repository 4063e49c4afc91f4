//! Reqwest-backed adapters for the remote backend-as-a-service.
//!
//! These are the thin request-shaping wrappers the crate exists to provide:
//! one adapter per port, each translating between domain types and the
//! remote service's REST dialect. They contain no business logic.

mod client;
mod documents;
mod identity;
mod storage;

pub use client::{DocumentStoreClient, StoreError};
pub use documents::{
    HttpCategoryRepository, HttpCommentRepository, HttpPostRepository, HttpProfileRepository,
    HttpReferralCodeRepository,
};
pub use identity::HttpIdentityProvider;
pub use storage::HttpObjectStorage;

use crate::config::TreehouseSettings;

/// The full adapter family, wired from configuration.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    /// Identity provider adapter.
    pub identity: HttpIdentityProvider,
    /// Profile repository adapter.
    pub profiles: HttpProfileRepository,
    /// Referral-code repository adapter.
    pub referral_codes: HttpReferralCodeRepository,
    /// Category repository adapter.
    pub categories: HttpCategoryRepository,
    /// Post repository adapter.
    pub posts: HttpPostRepository,
    /// Comment repository adapter.
    pub comments: HttpCommentRepository,
    /// Object storage adapter.
    pub storage: HttpObjectStorage,
}

impl HttpBackend {
    /// Wire every adapter from the runtime settings.
    ///
    /// # Errors
    ///
    /// Returns an error when a configured URL does not parse or a reqwest
    /// client cannot be constructed.
    pub fn from_settings(settings: &TreehouseSettings) -> Result<Self, HttpBackendError> {
        let timeout = settings.request_timeout();
        let store = DocumentStoreClient::new(settings.document_store_url()?, timeout)
            .map_err(|err| HttpBackendError::Client {
                message: err.to_string(),
            })?;
        let identity = HttpIdentityProvider::new(
            settings.identity_url()?,
            settings.identity_api_key().to_owned(),
            timeout,
        )
        .map_err(|err| HttpBackendError::Client {
            message: err.to_string(),
        })?;
        let storage = HttpObjectStorage::new(
            settings.object_store_url()?,
            settings.storage_bucket().to_owned(),
            timeout,
        )
        .map_err(|err| HttpBackendError::Client {
            message: err.to_string(),
        })?;
        Ok(Self {
            identity,
            profiles: HttpProfileRepository::new(store.clone()),
            referral_codes: HttpReferralCodeRepository::new(store.clone()),
            categories: HttpCategoryRepository::new(store.clone()),
            posts: HttpPostRepository::new(store.clone()),
            comments: HttpCommentRepository::new(store),
            storage,
        })
    }
}

/// Errors raised while wiring the adapter family.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HttpBackendError {
    /// A configured URL did not parse.
    #[error("invalid backend URL: {message}")]
    Url {
        /// Parser failure description.
        message: String,
    },
    /// A reqwest client could not be constructed.
    #[error("http client construction failed: {message}")]
    Client {
        /// Builder failure description.
        message: String,
    },
}

impl From<crate::config::SettingsError> for HttpBackendError {
    fn from(error: crate::config::SettingsError) -> Self {
        Self::Url {
            message: error.to_string(),
        }
    }
}
