//! Live venue repository backed by the gateway.

use crate::gateway::ApiGateway;
use anyhow::Result;
use async_trait::async_trait;
use holidaze_core::venue::{Venue, VenueDraft, VenueRepository};
use holidaze_core::HolidazeError;
use reqwest::Method;
use std::sync::Arc;

/// `VenueRepository` implementation that re-fetches from the remote service
/// on every read. There is no caching layer.
pub struct LiveVenueRepository {
    gateway: Arc<ApiGateway>,
}

impl LiveVenueRepository {
    pub fn new(gateway: Arc<ApiGateway>) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl VenueRepository for LiveVenueRepository {
    async fn list_all(&self) -> Result<Vec<Venue>> {
        let venues = self.gateway.get("/holidaze/venues?_bookings=true").await?;
        Ok(venues)
    }

    async fn find_by_id(&self, venue_id: &str) -> Result<Option<Venue>> {
        let path = format!("/holidaze/venues/{venue_id}?_owner=true&_bookings=true");
        match self.gateway.get(&path).await {
            Ok(venue) => Ok(Some(venue)),
            Err(HolidazeError::Rejected { status: 404, .. }) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn list_by_owner(&self, profile_name: &str) -> Result<Vec<Venue>> {
        let path = format!("/holidaze/profiles/{profile_name}/venues?_bookings=true");
        let venues = self.gateway.get(&path).await?;
        Ok(venues)
    }

    async fn create(&self, draft: &VenueDraft) -> Result<Venue> {
        let body = serde_json::to_value(draft)?;
        let venue = self
            .gateway
            .request(Method::POST, "/holidaze/venues", Some(body))
            .await?;
        Ok(venue)
    }

    async fn update(&self, venue_id: &str, draft: &VenueDraft) -> Result<Venue> {
        let path = format!("/holidaze/venues/{venue_id}");
        let body = serde_json::to_value(draft)?;
        let venue = self.gateway.request(Method::PUT, &path, Some(body)).await?;
        Ok(venue)
    }

    async fn delete(&self, venue_id: &str) -> Result<()> {
        let path = format!("/holidaze/venues/{venue_id}");
        self.gateway.request_unit(Method::DELETE, &path, None).await?;
        Ok(())
    }
}
