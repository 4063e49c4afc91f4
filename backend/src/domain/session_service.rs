//! Session domain service: sign-up, sign-in, sign-out, account deletion.
//!
//! Sign-up runs its checks in a fixed order — referral gate, email
//! uniqueness, password policy, nickname uniqueness — and only then touches
//! the identity provider. The order is normative: account creation cannot be
//! rolled back by this layer, so every check that can fail must run before
//! it. If the profile write after account creation fails, an orphaned
//! identity account remains; that window is documented, not compensated.

use std::sync::Arc;

use tracing::{error, warn};

use crate::domain::credentials::{LoginCredentials, SignUpForm};
use crate::domain::ports::{
    IdentityProvider, IdentityProviderError, ProfileRepository, ProfileRepositoryError,
    ReferralCodeRepository, ReferralCodeRepositoryError,
};
use crate::domain::user::{Profile, Role, Session};
use crate::domain::{Error, ErrorCode};

/// Minimum accepted password length, in characters.
pub const MIN_PASSWORD_CHARS: usize = 6;

/// Session service wired over the identity provider, profile collection,
/// and referral-code collection.
#[derive(Clone)]
pub struct SessionService<I, P, R> {
    identity: Arc<I>,
    profiles: Arc<P>,
    referral_codes: Arc<R>,
    admin_emails: Vec<String>,
}

impl<I, P, R> SessionService<I, P, R> {
    /// Create a new service.
    ///
    /// `admin_emails` comes from configuration; a session whose email
    /// matches one of them (case-insensitively) is resolved to
    /// [`Role::Admin`] at sign-in.
    pub fn new(
        identity: Arc<I>,
        profiles: Arc<P>,
        referral_codes: Arc<R>,
        admin_emails: Vec<String>,
    ) -> Self {
        let admin_emails = admin_emails
            .into_iter()
            .map(|email| email.trim().to_ascii_lowercase())
            .collect();
        Self {
            identity,
            profiles,
            referral_codes,
            admin_emails,
        }
    }

    fn resolve_role(&self, email: &str) -> Role {
        let needle = email.trim().to_ascii_lowercase();
        if self.admin_emails.iter().any(|admin| *admin == needle) {
            Role::Admin
        } else {
            Role::Member
        }
    }
}

impl<I, P, R> SessionService<I, P, R>
where
    I: IdentityProvider,
    P: ProfileRepository,
    R: ReferralCodeRepository,
{
    /// Register a new user.
    ///
    /// Check order: referral code, email uniqueness, password length,
    /// nickname uniqueness, then account creation and the profile write.
    ///
    /// # Errors
    ///
    /// [`ErrorCode::Validation`] for a missing or unknown referral code and
    /// for a short password; [`ErrorCode::Conflict`] for a taken email or
    /// nickname; transport failures surface as
    /// [`ErrorCode::Unavailable`] or [`ErrorCode::Internal`].
    pub async fn sign_up(&self, form: &SignUpForm) -> Result<Profile, Error> {
        let code = form.referral_code();
        if code.is_empty() {
            return Err(Error::validation(
                "a valid referral code is required to sign up",
            ));
        }
        let known = self
            .referral_codes
            .exists(code)
            .await
            .map_err(map_referral_error)?;
        if !known {
            return Err(Error::validation(
                "a valid referral code is required to sign up",
            ));
        }

        if self
            .profiles
            .email_taken(form.email())
            .await
            .map_err(map_profile_error)?
        {
            return Err(Error::conflict("email already in use"));
        }

        if form.password().chars().count() < MIN_PASSWORD_CHARS {
            return Err(Error::validation(
                "password must be at least 6 characters long",
            ));
        }

        if self
            .profiles
            .nickname_taken(form.nickname())
            .await
            .map_err(map_profile_error)?
        {
            return Err(Error::conflict("nickname already in use"));
        }

        let account = self
            .identity
            .create_account(form.email(), form.password(), form.nickname())
            .await
            .map_err(map_identity_error)?;

        let profile = Profile {
            uid: account.uid.clone(),
            email: account.email.clone(),
            nickname: form.nickname().to_owned(),
            referral_code: code.to_owned(),
        };
        if let Err(source) = self.profiles.insert(&profile).await {
            // The identity account already exists and cannot be rolled back
            // from this layer; the uid is logged so operators can reconcile.
            error!(uid = %account.uid, error = %source, "profile write failed after account creation");
            return Err(map_profile_error(source));
        }
        Ok(profile)
    }

    /// Validate credentials and open a session.
    ///
    /// # Errors
    ///
    /// [`ErrorCode::Unauthorized`] when the provider rejects the
    /// credentials; transport failures surface as [`ErrorCode::Unavailable`].
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<Session, Error> {
        let account = self
            .identity
            .sign_in(credentials.email(), credentials.password())
            .await
            .map_err(map_identity_error)?;
        let role = self.resolve_role(&account.email);
        Ok(Session {
            uid: account.uid,
            email: account.email,
            display_name: account.display_name,
            role,
        })
    }

    /// End the provider-side session. Interactive confirmation is the
    /// caller's concern; this layer only delegates.
    ///
    /// # Errors
    ///
    /// Transport failures surface as [`ErrorCode::Unavailable`].
    pub async fn logout(&self, session: &Session) -> Result<(), Error> {
        self.identity
            .sign_out(&session.uid)
            .await
            .map_err(map_identity_error)
    }

    /// Delete the signed-in user's profile document, then the identity
    /// account.
    ///
    /// If the account deletion fails after the profile document is gone, the
    /// profile is unrecoverable while the credential still exists; there is
    /// no compensating transaction.
    ///
    /// # Errors
    ///
    /// Transport failures surface as [`ErrorCode::Unavailable`] or
    /// [`ErrorCode::Internal`].
    pub async fn delete_account(&self, session: &Session) -> Result<(), Error> {
        self.profiles
            .delete(&session.uid)
            .await
            .map_err(map_profile_error)?;
        if let Err(source) = self.identity.delete_account(&session.uid).await {
            warn!(uid = %session.uid, error = %source, "account deletion failed after profile removal");
            return Err(map_identity_error(source));
        }
        Ok(())
    }

    /// Change the signed-in user's nickname on the provider record and the
    /// profile document. Existing author snapshots keep the old nickname.
    ///
    /// # Errors
    ///
    /// [`ErrorCode::Validation`] for a blank nickname,
    /// [`ErrorCode::Conflict`] when another profile already holds it.
    pub async fn update_nickname(&self, session: &Session, nickname: &str) -> Result<(), Error> {
        let nickname = nickname.trim();
        if nickname.is_empty() {
            return Err(Error::validation("nickname must not be empty"));
        }
        if nickname != session.display_name
            && self
                .profiles
                .nickname_taken(nickname)
                .await
                .map_err(map_profile_error)?
        {
            return Err(Error::conflict("nickname already in use"));
        }
        self.identity
            .update_display_name(&session.uid, nickname)
            .await
            .map_err(map_identity_error)?;
        self.profiles
            .update_nickname(&session.uid, nickname)
            .await
            .map_err(map_profile_error)
    }
}

fn map_identity_error(error: IdentityProviderError) -> Error {
    match error {
        IdentityProviderError::InvalidCredentials => {
            Error::unauthorized("invalid email or password")
        }
        IdentityProviderError::EmailTaken => Error::conflict("email already in use"),
        IdentityProviderError::WeakPassword => {
            Error::validation("password must be at least 6 characters long")
        }
        IdentityProviderError::UnknownAccount { uid } => {
            Error::new(ErrorCode::NotFound, format!("no such account: {uid}"))
        }
        IdentityProviderError::Transport { message } => {
            Error::unavailable(format!("identity provider unavailable: {message}"))
        }
    }
}

fn map_profile_error(error: ProfileRepositoryError) -> Error {
    match error {
        ProfileRepositoryError::Connection { message } => {
            Error::unavailable(format!("profile store unavailable: {message}"))
        }
        ProfileRepositoryError::Query { message } => {
            Error::internal(format!("profile store error: {message}"))
        }
    }
}

fn map_referral_error(error: ReferralCodeRepositoryError) -> Error {
    match error {
        ReferralCodeRepositoryError::Connection { message } => {
            Error::unavailable(format!("referral code store unavailable: {message}"))
        }
        ReferralCodeRepositoryError::Query { message } => {
            Error::internal(format!("referral code store error: {message}"))
        }
    }
}
