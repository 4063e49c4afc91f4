//! Treehouse backend library modules.
//!
//! The crate is the service layer of a referral-gated community blog. All
//! persistence, authentication, and file storage live in an external
//! backend-as-a-service; the modules here are strongly typed domain services
//! and thin request-shaping adapters around that service's interfaces.
//!
//! - [`domain`] — entities, validation, domain services, and the ports that
//!   describe the external collaborators.
//! - [`outbound`] — adapters implementing the ports: reqwest-backed HTTP
//!   clients for the remote store and an in-memory backend for tests and
//!   local development.
//! - [`config`] — layered runtime configuration.
//! - [`telemetry`] — tracing subscriber initialisation.

pub mod config;
pub mod domain;
#[cfg(feature = "example-data")]
pub mod example_data;
pub mod outbound;
pub mod telemetry;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
