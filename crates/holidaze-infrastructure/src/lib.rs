//! Durable client state and fixture data for the Holidaze toolkit.
//!
//! This crate owns everything that outlives a single run: the persisted
//! session record, the secret (API key) storage, and the in-memory fixture
//! repositories used when no live service is wanted.

pub mod fixture;
pub mod paths;
pub mod secret_storage;
pub mod toml_session_store;

pub use crate::fixture::{FixtureAuthApi, FixtureBookingRepository, FixtureVenueRepository};
pub use crate::secret_storage::{ApiSecret, SecretStorage};
pub use crate::toml_session_store::TomlSessionStore;
