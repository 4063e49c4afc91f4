//! Runtime configuration loaded via OrthoConfig.
//!
//! Every knob layers defaults, an optional config file, environment
//! variables (prefix `TREEHOUSE_`), and CLI arguments, in OrthoConfig's
//! usual order. Administrator emails live here rather than in code: the
//! session service resolves a role from this list once at sign-in.

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

const DEFAULT_DOCUMENT_STORE_URL: &str = "http://localhost:8085/";
const DEFAULT_IDENTITY_URL: &str = "http://localhost:9099/";
const DEFAULT_OBJECT_STORE_URL: &str = "http://localhost:9199/";
const DEFAULT_IDENTITY_API_KEY: &str = "local-dev-key";
const DEFAULT_STORAGE_BUCKET: &str = "attachments";
const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 30;

/// Errors raised while interpreting configured values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// A configured URL did not parse.
    #[error("invalid {field} URL: {message}")]
    InvalidUrl {
        /// Which setting carried the value.
        field: &'static str,
        /// Parser failure description.
        message: String,
    },
}

/// Configuration values for the backend service layer.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "TREEHOUSE")]
pub struct TreehouseSettings {
    /// Base URL of the remote document store.
    pub document_store_url: Option<String>,
    /// Base URL of the identity provider.
    pub identity_url: Option<String>,
    /// API key sent to the identity provider.
    pub identity_api_key: Option<String>,
    /// Base URL of the object store.
    pub object_store_url: Option<String>,
    /// Bucket attachments are uploaded into.
    pub storage_bucket: Option<String>,
    /// Comma-separated administrator emails.
    pub admin_emails: Option<String>,
    /// Outbound request timeout in seconds.
    pub request_timeout_seconds: Option<u64>,
}

fn parse_base_url(raw: &str, field: &'static str) -> Result<Url, SettingsError> {
    // A trailing slash keeps Url::join appending instead of replacing the
    // last path segment.
    let normalized = if raw.ends_with('/') {
        raw.to_owned()
    } else {
        format!("{raw}/")
    };
    Url::parse(&normalized).map_err(|err| SettingsError::InvalidUrl {
        field,
        message: err.to_string(),
    })
}

impl TreehouseSettings {
    /// Document store base URL, falling back to the local emulator.
    ///
    /// # Errors
    ///
    /// [`SettingsError::InvalidUrl`] when the configured value does not
    /// parse.
    pub fn document_store_url(&self) -> Result<Url, SettingsError> {
        parse_base_url(
            self.document_store_url
                .as_deref()
                .unwrap_or(DEFAULT_DOCUMENT_STORE_URL),
            "document store",
        )
    }

    /// Identity provider base URL, falling back to the local emulator.
    ///
    /// # Errors
    ///
    /// [`SettingsError::InvalidUrl`] when the configured value does not
    /// parse.
    pub fn identity_url(&self) -> Result<Url, SettingsError> {
        parse_base_url(
            self.identity_url.as_deref().unwrap_or(DEFAULT_IDENTITY_URL),
            "identity provider",
        )
    }

    /// Object store base URL, falling back to the local emulator.
    ///
    /// # Errors
    ///
    /// [`SettingsError::InvalidUrl`] when the configured value does not
    /// parse.
    pub fn object_store_url(&self) -> Result<Url, SettingsError> {
        parse_base_url(
            self.object_store_url
                .as_deref()
                .unwrap_or(DEFAULT_OBJECT_STORE_URL),
            "object store",
        )
    }

    /// Identity provider API key.
    #[must_use]
    pub fn identity_api_key(&self) -> &str {
        self.identity_api_key
            .as_deref()
            .unwrap_or(DEFAULT_IDENTITY_API_KEY)
    }

    /// Attachment bucket name.
    #[must_use]
    pub fn storage_bucket(&self) -> &str {
        self.storage_bucket
            .as_deref()
            .unwrap_or(DEFAULT_STORAGE_BUCKET)
    }

    /// Administrator emails, trimmed, with empty entries dropped.
    #[must_use]
    pub fn admin_emails(&self) -> Vec<String> {
        self.admin_emails
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|email| !email.is_empty())
            .map(str::to_owned)
            .collect()
    }

    /// Outbound request timeout.
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.request_timeout_seconds
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECONDS),
        )
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for configuration parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    fn load_from_empty_args() -> TreehouseSettings {
        TreehouseSettings::load_from_iter([OsString::from("backend")])
            .expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env([
            ("TREEHOUSE_DOCUMENT_STORE_URL", None::<String>),
            ("TREEHOUSE_IDENTITY_URL", None::<String>),
            ("TREEHOUSE_ADMIN_EMAILS", None::<String>),
            ("TREEHOUSE_REQUEST_TIMEOUT_SECONDS", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.document_store_url().expect("url").as_str(),
            DEFAULT_DOCUMENT_STORE_URL
        );
        assert!(settings.admin_emails().is_empty());
        assert_eq!(
            settings.request_timeout(),
            Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECONDS)
        );
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            (
                "TREEHOUSE_DOCUMENT_STORE_URL",
                Some("https://store.example.com/api".to_owned()),
            ),
            (
                "TREEHOUSE_ADMIN_EMAILS",
                Some("root@example.com, ops@example.com".to_owned()),
            ),
            ("TREEHOUSE_REQUEST_TIMEOUT_SECONDS", Some("5".to_owned())),
        ]);

        let settings = load_from_empty_args();
        // The accessor appends the trailing slash join() needs.
        assert_eq!(
            settings.document_store_url().expect("url").as_str(),
            "https://store.example.com/api/"
        );
        assert_eq!(
            settings.admin_emails(),
            vec!["root@example.com".to_owned(), "ops@example.com".to_owned()]
        );
        assert_eq!(settings.request_timeout(), Duration::from_secs(5));
    }

    #[rstest]
    fn unparsable_urls_are_reported() {
        let settings = TreehouseSettings {
            document_store_url: Some("not a url".to_owned()),
            identity_url: None,
            identity_api_key: None,
            object_store_url: None,
            storage_bucket: None,
            admin_emails: None,
            request_timeout_seconds: None,
        };
        let err = settings
            .document_store_url()
            .expect_err("bad url must fail");
        assert!(matches!(err, SettingsError::InvalidUrl { field, .. } if field == "document store"));
    }
}
