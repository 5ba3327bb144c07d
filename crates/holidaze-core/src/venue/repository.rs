//! Venue repository trait.
//!
//! Defines the interface for venue data access, decoupling the application
//! layer from the concrete source (live gateway or in-memory fixture). The
//! implementation is selected once at startup and never intermixed.

use super::model::{Venue, VenueDraft};
use anyhow::Result;
use async_trait::async_trait;

/// An abstract repository for venue records.
#[async_trait]
pub trait VenueRepository: Send + Sync {
    /// Lists every venue, with booking expansion where the source supports it.
    async fn list_all(&self) -> Result<Vec<Venue>>;

    /// Finds a single venue by its ID.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Venue))`: venue found
    /// - `Ok(None)`: no venue with that ID
    /// - `Err(_)`: the source failed
    async fn find_by_id(&self, venue_id: &str) -> Result<Option<Venue>>;

    /// Lists venues owned by the given profile.
    async fn list_by_owner(&self, profile_name: &str) -> Result<Vec<Venue>>;

    /// Creates a venue and returns the stored record.
    async fn create(&self, draft: &VenueDraft) -> Result<Venue>;

    /// Updates a venue and returns the stored record.
    async fn update(&self, venue_id: &str, draft: &VenueDraft) -> Result<Venue>;

    /// Deletes a venue.
    async fn delete(&self, venue_id: &str) -> Result<()>;
}
