//! Example data configuration loaded via OrthoConfig.

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_REFERRAL_CODES: &str = "WELCOME";
const DEFAULT_CATEGORIES: &str = "General";

/// Configuration values controlling example data seeding at startup.
///
/// A fresh deployment has no referral codes, which makes sign-up impossible;
/// seeding exists mainly to open that gate in development environments.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "EXAMPLE_DATA")]
pub struct ExampleDataSettings {
    /// Enable example data seeding on startup.
    #[ortho_config(default = false)]
    pub enabled: bool,
    /// Comma-separated referral codes to seed.
    pub referral_codes: Option<String>,
    /// Comma-separated starter categories to seed.
    pub categories: Option<String>,
}

fn split_csv(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_owned)
        .collect()
}

impl ExampleDataSettings {
    /// Referral codes to seed, falling back to the default.
    #[must_use]
    pub fn referral_codes(&self) -> Vec<String> {
        split_csv(self.referral_codes.as_deref().unwrap_or(DEFAULT_REFERRAL_CODES))
    }

    /// Starter categories to seed, falling back to the default.
    #[must_use]
    pub fn categories(&self) -> Vec<String> {
        split_csv(self.categories.as_deref().unwrap_or(DEFAULT_CATEGORIES))
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for example data configuration parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    fn load_from_empty_args() -> ExampleDataSettings {
        ExampleDataSettings::load_from_iter([OsString::from("backend")])
            .expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env([
            ("EXAMPLE_DATA_ENABLED", None::<String>),
            ("EXAMPLE_DATA_REFERRAL_CODES", None::<String>),
            ("EXAMPLE_DATA_CATEGORIES", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert!(!settings.enabled);
        assert_eq!(settings.referral_codes(), vec!["WELCOME".to_owned()]);
        assert_eq!(settings.categories(), vec!["General".to_owned()]);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("EXAMPLE_DATA_ENABLED", Some("true".to_owned())),
            (
                "EXAMPLE_DATA_REFERRAL_CODES",
                Some("ALPHA, BETA,".to_owned()),
            ),
            ("EXAMPLE_DATA_CATEGORIES", Some("News,Talk".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert!(settings.enabled);
        assert_eq!(
            settings.referral_codes(),
            vec!["ALPHA".to_owned(), "BETA".to_owned()]
        );
        assert_eq!(
            settings.categories(),
            vec!["News".to_owned(), "Talk".to_owned()]
        );
    }
}
