//! Domain error payload shared by every service operation.

use serde::{Deserialize, Serialize};

/// Stable machine-readable error code.
///
/// The taxonomy mirrors what callers can act on: bad input, duplicate state,
/// missing authentication, missing resources, insufficient rights, and the
/// two infrastructure buckets (`Internal`, `Unavailable`) that adapters map
/// transport failures into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The request is malformed or fails validation.
    Validation,
    /// The request conflicts with existing state (duplicate email, nickname).
    Conflict,
    /// Authentication failed or no session is active.
    Unauthorized,
    /// The requested resource does not exist.
    NotFound,
    /// Authenticated but not permitted to perform this action.
    Forbidden,
    /// An unexpected error occurred inside this layer or the remote store.
    Internal,
    /// The remote store could not be reached.
    Unavailable,
}

/// Error payload returned by domain services.
///
/// # Examples
/// ```
/// use treehouse_backend::domain::{Error, ErrorCode};
///
/// let err = Error::not_found("no such post");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Error {
    code: ErrorCode,
    message: String,
}

impl Error {
    /// Create a new error with an explicit code.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Stable machine-readable code.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Convenience constructor for [`ErrorCode::Validation`].
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Validation, message)
    }

    /// Convenience constructor for [`ErrorCode::Conflict`].
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Conflict, message)
    }

    /// Convenience constructor for [`ErrorCode::Unauthorized`].
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::Forbidden`].
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Forbidden, message)
    }

    /// Convenience constructor for [`ErrorCode::Internal`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Internal, message)
    }

    /// Convenience constructor for [`ErrorCode::Unavailable`].
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unavailable, message)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    #[test]
    fn constructors_set_codes() {
        let cases = [
            (Error::validation("bad"), ErrorCode::Validation),
            (Error::conflict("dup"), ErrorCode::Conflict),
            (Error::unauthorized("who"), ErrorCode::Unauthorized),
            (Error::not_found("missing"), ErrorCode::NotFound),
            (Error::forbidden("nope"), ErrorCode::Forbidden),
            (Error::internal("boom"), ErrorCode::Internal),
            (Error::unavailable("down"), ErrorCode::Unavailable),
        ];
        for (err, code) in cases {
            assert_eq!(err.code(), code);
        }
    }

    #[test]
    fn display_uses_message() {
        let err = Error::forbidden("only the author may edit this post");
        assert_eq!(err.to_string(), "only the author may edit this post");
    }

    #[test]
    fn serialises_code_as_snake_case() {
        let json = serde_json::to_value(Error::not_found("missing")).expect("serialise");
        assert_eq!(json["code"], "not_found");
    }
}
