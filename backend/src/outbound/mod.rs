//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! This module follows the hexagonal architecture pattern, providing
//! concrete implementations of the domain port traits:
//!
//! - **http**: reqwest-backed adapters for the remote backend-as-a-service
//!   (document store, identity provider, object storage)
//! - **memory**: a shared in-memory backend for tests, local development,
//!   and example-data seeding
//! - **docs**: the wire codecs both adapter families decode documents
//!   through, including the lenient-decode fallbacks
//!
//! Adapters are thin translators that convert between domain types and
//! infrastructure-specific representations. They contain no business logic.

pub mod docs;
pub mod http;
pub mod memory;
