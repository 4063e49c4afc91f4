//! Startup seeding of referral codes and starter categories.

use std::sync::Arc;

use futures_util::future::join_all;
use tracing::info;

use crate::domain::ports::{CategoryRepository, ReferralCodeRepository};
use crate::domain::Error;

use super::ExampleDataSettings;

/// Outcome of one seeding run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SeedReport {
    /// Referral codes written (writes are idempotent by key).
    pub referral_codes: usize,
    /// Categories inserted; already-present names are skipped.
    pub categories: usize,
}

/// Seeds reference data through the ports at startup.
#[derive(Clone)]
pub struct ExampleDataSeeder<R, C> {
    referral_codes: Arc<R>,
    categories: Arc<C>,
}

impl<R, C> ExampleDataSeeder<R, C> {
    /// Create a new seeder.
    pub fn new(referral_codes: Arc<R>, categories: Arc<C>) -> Self {
        Self {
            referral_codes,
            categories,
        }
    }
}

impl<R, C> ExampleDataSeeder<R, C>
where
    R: ReferralCodeRepository,
    C: CategoryRepository,
{
    /// Run seeding according to the settings. A disabled configuration is a
    /// no-op reported as an empty [`SeedReport`].
    ///
    /// Category seeding pre-checks the existing list to stay re-runnable;
    /// like every other caller of the category collection it is subject to
    /// the documented duplicate race under concurrent seeders.
    ///
    /// # Errors
    ///
    /// Store failures surface as [`crate::domain::ErrorCode::Unavailable`]
    /// or [`crate::domain::ErrorCode::Internal`].
    pub async fn seed(&self, settings: &ExampleDataSettings) -> Result<SeedReport, Error> {
        if !settings.enabled {
            return Ok(SeedReport::default());
        }

        let mut report = SeedReport::default();
        let codes = settings.referral_codes();
        let writes = join_all(codes.iter().map(|code| self.referral_codes.insert(code))).await;
        for outcome in writes {
            outcome.map_err(|err| Error::unavailable(err.to_string()))?;
            report.referral_codes += 1;
        }

        let existing: Vec<String> = self
            .categories
            .list()
            .await
            .map_err(|err| Error::unavailable(err.to_string()))?
            .into_iter()
            .map(|category| category.name)
            .collect();
        for name in settings.categories() {
            if existing.iter().any(|present| *present == name) {
                continue;
            }
            self.categories
                .insert(&name)
                .await
                .map_err(|err| Error::unavailable(err.to_string()))?;
            report.categories += 1;
        }

        info!(
            referral_codes = report.referral_codes,
            categories = report.categories,
            "example data seeding finished"
        );
        Ok(report)
    }
}
