//! Identity provider adapter over the shared in-memory state.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::ports::{IdentityProvider, IdentityProviderError};
use crate::domain::Account;

use super::{AccountRecord, Shared};

const UNAVAILABLE: &str = "backend marked unavailable";

/// The provider enforces its own minimum password length, independently of
/// the session service's pre-check.
const MIN_PROVIDER_PASSWORD_CHARS: usize = 6;

/// In-memory identity provider.
#[derive(Debug, Clone)]
pub struct MemoryIdentityProvider {
    shared: Arc<Shared>,
}

impl MemoryIdentityProvider {
    pub(crate) fn new(shared: Arc<Shared>) -> Self {
        Self { shared }
    }
}

#[async_trait]
impl IdentityProvider for MemoryIdentityProvider {
    async fn create_account(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<Account, IdentityProviderError> {
        let mut state = self.shared.state();
        if state.unavailable {
            return Err(IdentityProviderError::transport(UNAVAILABLE));
        }
        if state.accounts.iter().any(|account| account.email == email) {
            return Err(IdentityProviderError::EmailTaken);
        }
        if password.chars().count() < MIN_PROVIDER_PASSWORD_CHARS {
            return Err(IdentityProviderError::WeakPassword);
        }
        let record = AccountRecord {
            uid: Uuid::new_v4().to_string(),
            email: email.to_owned(),
            password: password.to_owned(),
            display_name: display_name.to_owned(),
        };
        let account = Account {
            uid: record.uid.clone(),
            email: record.email.clone(),
            display_name: record.display_name.clone(),
        };
        state.accounts.push(record);
        Ok(account)
    }

    async fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Account, IdentityProviderError> {
        let state = self.shared.state();
        if state.unavailable {
            return Err(IdentityProviderError::transport(UNAVAILABLE));
        }
        state
            .accounts
            .iter()
            .find(|account| account.email == email && account.password == password)
            .map(|record| Account {
                uid: record.uid.clone(),
                email: record.email.clone(),
                display_name: record.display_name.clone(),
            })
            .ok_or(IdentityProviderError::InvalidCredentials)
    }

    async fn sign_out(&self, _uid: &str) -> Result<(), IdentityProviderError> {
        let state = self.shared.state();
        if state.unavailable {
            return Err(IdentityProviderError::transport(UNAVAILABLE));
        }
        Ok(())
    }

    async fn delete_account(&self, uid: &str) -> Result<(), IdentityProviderError> {
        let mut state = self.shared.state();
        if state.unavailable {
            return Err(IdentityProviderError::transport(UNAVAILABLE));
        }
        let before = state.accounts.len();
        state.accounts.retain(|account| account.uid != uid);
        if state.accounts.len() == before {
            return Err(IdentityProviderError::unknown_account(uid));
        }
        Ok(())
    }

    async fn update_display_name(
        &self,
        uid: &str,
        display_name: &str,
    ) -> Result<(), IdentityProviderError> {
        let mut state = self.shared.state();
        if state.unavailable {
            return Err(IdentityProviderError::transport(UNAVAILABLE));
        }
        let record = state
            .accounts
            .iter_mut()
            .find(|account| account.uid == uid)
            .ok_or_else(|| IdentityProviderError::unknown_account(uid))?;
        record.display_name = display_name.to_owned();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::outbound::memory::MemoryBackend;

    #[tokio::test]
    async fn provider_rejects_duplicate_emails_and_weak_passwords() {
        let backend = MemoryBackend::new();
        let provider = backend.identity_provider();
        provider
            .create_account("ada@example.com", "longenough", "ada")
            .await
            .expect("first account");
        let dup = provider
            .create_account("ada@example.com", "longenough", "ada2")
            .await
            .expect_err("duplicate email");
        assert!(matches!(dup, IdentityProviderError::EmailTaken));
        let weak = provider
            .create_account("bob@example.com", "123", "bob")
            .await
            .expect_err("weak password");
        assert!(matches!(weak, IdentityProviderError::WeakPassword));
    }

    #[tokio::test]
    async fn sign_in_round_trips_created_accounts() {
        let backend = MemoryBackend::new();
        let provider = backend.identity_provider();
        let created = provider
            .create_account("ada@example.com", "longenough", "ada")
            .await
            .expect("account");
        let signed_in = provider
            .sign_in("ada@example.com", "longenough")
            .await
            .expect("sign in");
        assert_eq!(signed_in.uid, created.uid);
        let bad = provider
            .sign_in("ada@example.com", "wrong")
            .await
            .expect_err("bad password");
        assert!(matches!(bad, IdentityProviderError::InvalidCredentials));
    }

    #[tokio::test]
    async fn deleting_an_unknown_account_reports_it() {
        let backend = MemoryBackend::new();
        let provider = backend.identity_provider();
        let err = provider
            .delete_account("ghost")
            .await
            .expect_err("unknown account");
        assert!(matches!(err, IdentityProviderError::UnknownAccount { .. }));
    }
}
