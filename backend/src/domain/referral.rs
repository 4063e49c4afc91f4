//! Referral gate: the existential check that gates sign-up.

use std::sync::Arc;

use tracing::error;

use crate::domain::ports::ReferralCodeRepository;

/// Referral gate over the `referralCodes` collection.
///
/// Validity is purely existential: a code is valid iff a document keyed by
/// it exists. No expiry, no consumption count, no per-user binding — any
/// valid code can be reused indefinitely by anyone who learns it.
#[derive(Clone)]
pub struct ReferralGate<R> {
    codes: Arc<R>,
}

impl<R> ReferralGate<R> {
    /// Create a new gate.
    pub fn new(codes: Arc<R>) -> Self {
        Self { codes }
    }
}

impl<R> ReferralGate<R>
where
    R: ReferralCodeRepository,
{
    /// True iff a document keyed by `code` exists.
    ///
    /// An empty code is invalid without a store lookup. A transport failure
    /// is logged and reported as `false`; the sign-up sequence queries the
    /// repository directly so that the same failure there surfaces as an
    /// error instead of a silent rejection.
    pub async fn is_valid(&self, code: &str) -> bool {
        if code.is_empty() {
            return false;
        }
        match self.codes.exists(code).await {
            Ok(known) => known,
            Err(source) => {
                error!(error = %source, "referral code lookup failed");
                false
            }
        }
    }
}
