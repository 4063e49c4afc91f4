//! In-memory backend implementing every port.
//!
//! One [`MemoryBackend`] stands in for the whole external
//! backend-as-a-service; it hands out one adapter per port
//! ([`MemoryBackend::posts`], [`MemoryBackend::identity_provider`], and so
//! on), all sharing the same state. Tests, local development, and
//! example-data seeding run against it. Documents are held as raw JSON
//! values and round through the same codecs as the HTTP adapters
//! ([`crate::outbound::docs`]), so lenient decoding behaves identically
//! against both stores.
//!
//! The backend supports failure injection
//! ([`MemoryBackend::set_unavailable`]) so tests can exercise the
//! swallow-and-log read policy without a network.

mod documents;
mod identity;
mod storage;

pub use documents::{
    MemoryCategoryRepository, MemoryCommentRepository, MemoryPostRepository,
    MemoryProfileRepository, MemoryReferralCodeRepository,
};
pub use identity::MemoryIdentityProvider;
pub use storage::MemoryObjectStorage;

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

use serde_json::Value;
use uuid::Uuid;

use crate::domain::Profile;
use crate::outbound::docs::ProfileDoc;

#[derive(Debug, Clone)]
pub(crate) struct AccountRecord {
    pub(crate) uid: String,
    pub(crate) email: String,
    pub(crate) password: String,
    pub(crate) display_name: String,
}

#[derive(Debug, Clone)]
pub(crate) struct StoredDoc {
    pub(crate) id: String,
    pub(crate) seq: u64,
    pub(crate) value: Value,
}

#[derive(Debug, Clone)]
pub(crate) struct StoredObject {
    pub(crate) content_type: String,
    pub(crate) content_disposition: String,
    pub(crate) bytes: Vec<u8>,
}

#[derive(Debug, Default)]
pub(crate) struct State {
    pub(crate) unavailable: bool,
    pub(crate) accounts: Vec<AccountRecord>,
    pub(crate) profiles: HashMap<String, Value>,
    pub(crate) referral_codes: HashSet<String>,
    pub(crate) categories: Vec<StoredDoc>,
    pub(crate) posts: Vec<StoredDoc>,
    pub(crate) comments: HashMap<String, Vec<StoredDoc>>,
    pub(crate) objects: HashMap<String, StoredObject>,
    seq: u64,
}

impl State {
    pub(crate) fn next_seq(&mut self) -> u64 {
        self.seq += 1;
        self.seq
    }
}

#[derive(Debug, Default)]
pub(crate) struct Shared {
    state: Mutex<State>,
}

impl Shared {
    pub(crate) fn state(&self) -> MutexGuard<'_, State> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

/// Shared in-memory stand-in for the external backend-as-a-service.
///
/// Cloning is cheap; clones and the adapters handed out all observe the same
/// state.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    shared: Arc<Shared>,
}

impl MemoryBackend {
    /// Create an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Identity provider adapter over this backend.
    #[must_use]
    pub fn identity_provider(&self) -> MemoryIdentityProvider {
        MemoryIdentityProvider::new(Arc::clone(&self.shared))
    }

    /// Profile repository adapter over this backend.
    #[must_use]
    pub fn profiles(&self) -> MemoryProfileRepository {
        MemoryProfileRepository::new(Arc::clone(&self.shared))
    }

    /// Referral-code repository adapter over this backend.
    #[must_use]
    pub fn referral_codes(&self) -> MemoryReferralCodeRepository {
        MemoryReferralCodeRepository::new(Arc::clone(&self.shared))
    }

    /// Category repository adapter over this backend.
    #[must_use]
    pub fn categories(&self) -> MemoryCategoryRepository {
        MemoryCategoryRepository::new(Arc::clone(&self.shared))
    }

    /// Post repository adapter over this backend.
    #[must_use]
    pub fn posts(&self) -> MemoryPostRepository {
        MemoryPostRepository::new(Arc::clone(&self.shared))
    }

    /// Comment repository adapter over this backend.
    #[must_use]
    pub fn comments(&self) -> MemoryCommentRepository {
        MemoryCommentRepository::new(Arc::clone(&self.shared))
    }

    /// Object storage adapter over this backend.
    #[must_use]
    pub fn object_storage(&self) -> MemoryObjectStorage {
        MemoryObjectStorage::new(Arc::clone(&self.shared))
    }

    /// Make every subsequent operation fail with a connection error until
    /// called again with `false`.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.shared.state().unavailable = unavailable;
    }

    /// Plant a raw post document, bypassing the insert codec. Used by tests
    /// to exercise lenient decoding of malformed stored documents.
    pub fn insert_raw_post(&self, value: Value) -> String {
        let mut state = self.shared.state();
        let id = Uuid::new_v4().to_string();
        let seq = state.next_seq();
        state.posts.push(StoredDoc {
            id: id.clone(),
            seq,
            value,
        });
        id
    }

    /// Fetch a stored profile for assertions.
    #[must_use]
    pub fn profile(&self, uid: &str) -> Option<Profile> {
        let value = self.shared.state().profiles.get(uid).cloned()?;
        serde_json::from_value::<ProfileDoc>(value)
            .ok()
            .map(ProfileDoc::into_profile)
    }

    /// True when the identity provider holds an account for this email.
    #[must_use]
    pub fn has_account(&self, email: &str) -> bool {
        self.shared
            .state()
            .accounts
            .iter()
            .any(|account| account.email == email)
    }

    /// Content-disposition recorded on an uploaded object, if present.
    #[must_use]
    pub fn object_disposition(&self, file_name: &str) -> Option<String> {
        self.shared
            .state()
            .objects
            .get(file_name)
            .map(|object| object.content_disposition.clone())
    }

    /// Raw bytes of an uploaded object, if present.
    #[must_use]
    pub fn object_bytes(&self, file_name: &str) -> Option<Vec<u8>> {
        self.shared
            .state()
            .objects
            .get(file_name)
            .map(|object| object.bytes.clone())
    }

    /// Number of stored post documents.
    #[must_use]
    pub fn post_count(&self) -> usize {
        self.shared.state().posts.len()
    }
}

pub(crate) fn field_equals(value: &Value, field: &str, expected: &str) -> bool {
    value.get(field).and_then(Value::as_str) == Some(expected)
}
