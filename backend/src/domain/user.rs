//! User identity, profile, and session types.
//!
//! Two records describe a user: the identity-provider [`Account`] and the
//! mirrored [`Profile`] document in the `users` collection. Posts and
//! comments embed an [`AuthorSnapshot`] captured at creation time; the
//! snapshot is never live-joined, so a later nickname change does not touch
//! existing content.

use serde::{Deserialize, Serialize};

/// Nickname substituted when a stored author snapshot is missing one.
pub const ANONYMOUS_NICKNAME: &str = "anonymous";

/// Identity-provider account record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    /// Stable account identifier assigned by the provider.
    pub uid: String,
    /// Sign-in email address.
    pub email: String,
    /// Display name shown to other users.
    pub display_name: String,
}

/// Mirrored user record in the document store.
///
/// ## Invariants
/// - `nickname` is unique across profile documents.
/// - `email` is unique across profile documents.
///
/// Both are enforced by pre-checks during sign-up, not by the store itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Identity-provider account id; also the document key.
    pub uid: String,
    /// Sign-in email address.
    pub email: String,
    /// Unique display nickname.
    pub nickname: String,
    /// Referral code supplied at sign-up.
    pub referral_code: String,
}

/// Privilege level resolved once at session start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Ordinary signed-up user.
    Member,
    /// Administrator; may manage categories and delete any post.
    Admin,
}

/// Authenticated session handed to service operations.
///
/// The role is resolved from configuration when the session is created and
/// passed explicitly from then on; no component compares email literals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Identity-provider account id.
    pub uid: String,
    /// Sign-in email address.
    pub email: String,
    /// Display name at sign-in time.
    pub display_name: String,
    /// Resolved privilege level.
    pub role: Role,
}

impl Session {
    /// True when the session carries administrator privileges.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Author snapshot to embed in content created under this session.
    #[must_use]
    pub fn author_snapshot(&self) -> AuthorSnapshot {
        AuthorSnapshot {
            uid: self.uid.clone(),
            nickname: self.display_name.clone(),
            email: self.email.clone(),
        }
    }
}

/// Denormalised author copy embedded in posts and comments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorSnapshot {
    /// Author account id; the only field authorization checks compare.
    pub uid: String,
    /// Nickname at creation time.
    pub nickname: String,
    /// Email at creation time.
    pub email: String,
}

impl AuthorSnapshot {
    /// Placeholder snapshot for stored content missing its author field.
    #[must_use]
    pub fn anonymous() -> Self {
        Self {
            uid: String::new(),
            nickname: ANONYMOUS_NICKNAME.to_owned(),
            email: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    fn session(role: Role) -> Session {
        Session {
            uid: "uid-1".to_owned(),
            email: "ada@example.com".to_owned(),
            display_name: "ada".to_owned(),
            role,
        }
    }

    #[test]
    fn admin_flag_follows_role() {
        assert!(session(Role::Admin).is_admin());
        assert!(!session(Role::Member).is_admin());
    }

    #[test]
    fn snapshot_copies_session_fields() {
        let snap = session(Role::Member).author_snapshot();
        assert_eq!(snap.uid, "uid-1");
        assert_eq!(snap.nickname, "ada");
        assert_eq!(snap.email, "ada@example.com");
    }

    #[test]
    fn anonymous_snapshot_has_placeholder_nickname() {
        let snap = AuthorSnapshot::anonymous();
        assert_eq!(snap.nickname, ANONYMOUS_NICKNAME);
        assert!(snap.uid.is_empty());
    }
}
