//! Venue browsing and management.

use crate::from_repo_error;
use crate::session_manager::SessionManager;
use holidaze_core::venue::{Venue, VenueDraft, VenueRepository};
use holidaze_core::{HolidazeError, Result, Session};
use std::sync::Arc;

/// Read access for every visitor, write access for venue managers.
pub struct VenueCatalog {
    venues: Arc<dyn VenueRepository>,
    session: Arc<SessionManager>,
}

impl VenueCatalog {
    pub fn new(venues: Arc<dyn VenueRepository>, session: Arc<SessionManager>) -> Self {
        Self { venues, session }
    }

    /// Every venue, freshly fetched.
    pub async fn browse(&self) -> Result<Vec<Venue>> {
        self.venues.list_all().await.map_err(from_repo_error)
    }

    /// Case-insensitive name filter; a blank query returns everything.
    pub async fn search(&self, query: &str) -> Result<Vec<Venue>> {
        let venues = self.browse().await?;
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(venues);
        }

        Ok(venues
            .into_iter()
            .filter(|venue| venue.name.to_lowercase().contains(&needle))
            .collect())
    }

    /// A single venue, or `NotFound`.
    pub async fn venue(&self, venue_id: &str) -> Result<Venue> {
        self.venues
            .find_by_id(venue_id)
            .await
            .map_err(from_repo_error)?
            .ok_or_else(|| HolidazeError::not_found("venue", venue_id))
    }

    /// Venues owned by the signed-in manager.
    pub async fn my_venues(&self) -> Result<Vec<Venue>> {
        let session = self.require_manager()?;
        self.venues
            .list_by_owner(&session.name)
            .await
            .map_err(from_repo_error)
    }

    /// Creates a venue after validating the draft. Manager only.
    pub async fn create(&self, draft: &VenueDraft) -> Result<Venue> {
        self.require_manager()?;
        draft.validate()?;
        self.venues.create(draft).await.map_err(from_repo_error)
    }

    /// Updates a venue after validating the draft. Manager only.
    pub async fn update(&self, venue_id: &str, draft: &VenueDraft) -> Result<Venue> {
        self.require_manager()?;
        draft.validate()?;
        self.venues
            .update(venue_id, draft)
            .await
            .map_err(from_repo_error)
    }

    /// Deletes a venue. Manager only.
    pub async fn delete(&self, venue_id: &str) -> Result<()> {
        self.require_manager()?;
        self.venues.delete(venue_id).await.map_err(from_repo_error)
    }

    fn require_manager(&self) -> Result<Session> {
        let session = self
            .session
            .current()
            .ok_or_else(|| HolidazeError::Authentication("You must be logged in".into()))?;
        if !session.venue_manager {
            return Err(HolidazeError::validation(
                "only venue managers can manage venues",
            ));
        }
        Ok(session)
    }
}
