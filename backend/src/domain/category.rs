//! Category entity.

use serde::{Deserialize, Serialize};

/// A flat category name document.
///
/// `name` is *not* unique by construction: the add operation performs no
/// uniqueness check of its own, so two racing callers can create duplicate
/// documents. Deletion removes every document matching a name for exactly
/// this reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Store-assigned document id.
    pub id: String,
    /// Category name; posts reference it by string copy.
    pub name: String,
}
