//! Booking repository trait.

use super::draft::BookingDraft;
use super::model::Booking;
use anyhow::Result;
use async_trait::async_trait;

/// An abstract repository for reservations.
///
/// Like `VenueRepository`, this decouples the application layer from the
/// concrete source: the live gateway in a real deployment, an in-memory
/// fixture store for demos and tests.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Submits a reservation for a venue and returns the stored booking.
    ///
    /// Callers are expected to validate the draft against the venue before
    /// submitting; the repository does not re-validate.
    async fn create(&self, venue_id: &str, draft: &BookingDraft) -> Result<Booking>;

    /// Lists the reservations made by the given profile, with venue
    /// expansion where the source supports it.
    async fn list_for_profile(&self, profile_name: &str) -> Result<Vec<Booking>>;
}
