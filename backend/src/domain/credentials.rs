//! Sign-in and sign-up input types.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string shape before a handler talks to a service. Password
//! *policy* (minimum length) is not checked here: the sign-up sequence is
//! required to run its referral and uniqueness checks first, so the policy
//! check lives in the session service where its position in the sequence is
//! visible.

use std::fmt;

use zeroize::Zeroizing;

/// Domain error returned when credential payload values are malformed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialsError {
    /// Email was missing or blank once trimmed.
    EmptyEmail,
    /// Password was blank.
    EmptyPassword,
    /// Nickname was missing or blank once trimmed.
    EmptyNickname,
}

impl fmt::Display for CredentialsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
            Self::EmptyNickname => write!(f, "nickname must not be empty"),
        }
    }
}

impl std::error::Error for CredentialsError {}

/// Validated login credentials.
///
/// ## Invariants
/// - `email` is trimmed and must not be empty after trimming.
/// - `password` is required to be non-empty but retains caller-provided
///   whitespace to avoid surprising credential comparisons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, CredentialsError> {
        let normalized = email.trim();
        if normalized.is_empty() {
            return Err(CredentialsError::EmptyEmail);
        }
        if password.is_empty() {
            return Err(CredentialsError::EmptyPassword);
        }
        Ok(Self {
            email: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Email string suitable for provider sign-in.
    #[must_use]
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password string provided by the caller.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Sign-up form carrying the four raw inputs the session service needs.
///
/// The referral code is deliberately *not* validated here beyond presence of
/// the field itself; whether it resolves to an existing code document is the
/// first step of the sign-up sequence and must stay observable there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUpForm {
    email: String,
    password: Zeroizing<String>,
    nickname: String,
    referral_code: String,
}

impl SignUpForm {
    /// Construct a form from raw inputs, rejecting blank email, password, or
    /// nickname. An empty referral code is accepted here and rejected by the
    /// referral gate so the failure carries the gate's message.
    pub fn try_from_parts(
        email: &str,
        password: &str,
        nickname: &str,
        referral_code: &str,
    ) -> Result<Self, CredentialsError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(CredentialsError::EmptyEmail);
        }
        if password.is_empty() {
            return Err(CredentialsError::EmptyPassword);
        }
        let nickname = nickname.trim();
        if nickname.is_empty() {
            return Err(CredentialsError::EmptyNickname);
        }
        Ok(Self {
            email: email.to_owned(),
            password: Zeroizing::new(password.to_owned()),
            nickname: nickname.to_owned(),
            referral_code: referral_code.trim().to_owned(),
        })
    }

    /// Sign-up email.
    #[must_use]
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Raw password; length policy is enforced by the session service.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// Requested nickname.
    #[must_use]
    pub fn nickname(&self) -> &str {
        self.nickname.as_str()
    }

    /// Referral code as supplied (possibly empty).
    #[must_use]
    pub fn referral_code(&self) -> &str {
        self.referral_code.as_str()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", CredentialsError::EmptyEmail)]
    #[case("   ", "pw", CredentialsError::EmptyEmail)]
    #[case("a@b.c", "", CredentialsError::EmptyPassword)]
    fn invalid_login_credentials(
        #[case] email: &str,
        #[case] password: &str,
        #[case] expected: CredentialsError,
    ) {
        let err = LoginCredentials::try_from_parts(email, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    #[case("  ada@example.com  ", "secret")]
    #[case("bob@example.com", "correct horse battery staple")]
    fn valid_login_credentials_trim_email(#[case] email: &str, #[case] password: &str) {
        let creds =
            LoginCredentials::try_from_parts(email, password).expect("valid inputs succeed");
        assert_eq!(creds.email(), email.trim());
        assert_eq!(creds.password(), password);
    }

    #[rstest]
    #[case("", "pw", "nick", CredentialsError::EmptyEmail)]
    #[case("a@b.c", "", "nick", CredentialsError::EmptyPassword)]
    #[case("a@b.c", "pw", "  ", CredentialsError::EmptyNickname)]
    fn invalid_sign_up_forms(
        #[case] email: &str,
        #[case] password: &str,
        #[case] nickname: &str,
        #[case] expected: CredentialsError,
    ) {
        let err = SignUpForm::try_from_parts(email, password, nickname, "CODE")
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[test]
    fn empty_referral_code_is_carried_through() {
        let form = SignUpForm::try_from_parts("a@b.c", "longenough", "nick", "")
            .expect("form builds without a referral code");
        assert_eq!(form.referral_code(), "");
    }

    #[test]
    fn short_password_is_not_rejected_here() {
        // Length policy belongs to the sign-up sequence, after the referral
        // and uniqueness checks.
        let form = SignUpForm::try_from_parts("a@b.c", "12345", "nick", "CODE");
        assert!(form.is_ok());
    }
}
