//! Reqwest-backed identity provider adapter.
//!
//! The provider speaks verb-suffixed account endpoints
//! (`accounts:signUp`, `accounts:signInWithPassword`, `accounts:update`,
//! `accounts:delete`, `accounts:signOut`) authenticated by an API key query
//! parameter. Failures carry a machine code in the error body; the known
//! codes are translated into the port's error variants and everything else
//! collapses into `Transport`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::ports::{IdentityProvider, IdentityProviderError};
use crate::domain::Account;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SignUpRequest<'a> {
    email: &'a str,
    password: &'a str,
    display_name: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SignInRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AccountRef<'a> {
    local_id: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateRequest<'a> {
    local_id: &'a str,
    display_name: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountResponse {
    // Mutation responses (delete, signOut) omit the account echo; decode
    // leniently so they share one response shape.
    #[serde(default)]
    local_id: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    display_name: String,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    error: ProviderErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorDetail {
    message: String,
}

/// Identity provider adapter over the remote account endpoints.
#[derive(Debug, Clone)]
pub struct HttpIdentityProvider {
    client: Client,
    base: Url,
    api_key: String,
}

impl HttpIdentityProvider {
    /// Build an adapter with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base: Url, api_key: String, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base,
            api_key,
        })
    }

    fn endpoint(&self, verb: &str) -> Result<Url, IdentityProviderError> {
        let mut url = self
            .base
            .join(&format!("v1/accounts:{verb}"))
            .map_err(|err| IdentityProviderError::transport(err.to_string()))?;
        url.query_pairs_mut().append_pair("key", &self.api_key);
        Ok(url)
    }

    async fn call<B: Serialize + Sync>(
        &self,
        verb: &str,
        body: &B,
    ) -> Result<Option<AccountResponse>, IdentityProviderError> {
        let url = self.endpoint(verb)?;
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|err| IdentityProviderError::transport(err.to_string()))?;
        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|err| IdentityProviderError::transport(err.to_string()))?;
        if !status.is_success() {
            return Err(map_provider_error(status.as_u16(), &bytes));
        }
        if bytes.is_empty() {
            return Ok(None);
        }
        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|err| IdentityProviderError::transport(err.to_string()))
    }
}

fn map_provider_error(status: u16, body: &[u8]) -> IdentityProviderError {
    let code = serde_json::from_slice::<ProviderErrorBody>(body)
        .map(|body| body.error.message)
        .unwrap_or_default();
    // Weak-password responses append the policy text after a colon.
    if code == "EMAIL_EXISTS" {
        IdentityProviderError::EmailTaken
    } else if code.starts_with("WEAK_PASSWORD") {
        IdentityProviderError::WeakPassword
    } else if matches!(
        code.as_str(),
        "INVALID_LOGIN_CREDENTIALS" | "EMAIL_NOT_FOUND" | "INVALID_PASSWORD"
    ) {
        IdentityProviderError::InvalidCredentials
    } else if code == "USER_NOT_FOUND" {
        IdentityProviderError::unknown_account("unknown")
    } else {
        IdentityProviderError::transport(format!("provider returned {status}: {code}"))
    }
}

fn into_account(response: AccountResponse) -> Account {
    Account {
        uid: response.local_id,
        email: response.email,
        display_name: response.display_name,
    }
}

#[async_trait]
impl IdentityProvider for HttpIdentityProvider {
    async fn create_account(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<Account, IdentityProviderError> {
        let body = SignUpRequest {
            email,
            password,
            display_name,
        };
        let response = self.call("signUp", &body).await?.ok_or_else(|| {
            IdentityProviderError::transport("empty sign-up response".to_owned())
        })?;
        Ok(into_account(response))
    }

    async fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Account, IdentityProviderError> {
        let body = SignInRequest { email, password };
        let response = self
            .call("signInWithPassword", &body)
            .await?
            .ok_or_else(|| IdentityProviderError::transport("empty sign-in response".to_owned()))?;
        Ok(into_account(response))
    }

    async fn sign_out(&self, uid: &str) -> Result<(), IdentityProviderError> {
        self.call("signOut", &AccountRef { local_id: uid }).await?;
        Ok(())
    }

    async fn delete_account(&self, uid: &str) -> Result<(), IdentityProviderError> {
        self.call("delete", &AccountRef { local_id: uid }).await?;
        Ok(())
    }

    async fn update_display_name(
        &self,
        uid: &str,
        display_name: &str,
    ) -> Result<(), IdentityProviderError> {
        let body = UpdateRequest {
            local_id: uid,
            display_name,
        };
        self.call("update", &body).await?;
        Ok(())
    }
}
