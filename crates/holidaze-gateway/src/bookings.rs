//! Live booking repository backed by the gateway.

use crate::gateway::ApiGateway;
use anyhow::{bail, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use holidaze_core::booking::{Booking, BookingDraft, BookingRepository};
use reqwest::Method;
use serde::Serialize;
use std::sync::Arc;

/// Request body for `POST /holidaze/bookings`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BookingRequest<'a> {
    date_from: NaiveDate,
    date_to: NaiveDate,
    guests: u32,
    venue_id: &'a str,
}

/// `BookingRepository` implementation that submits reservations to the
/// remote service. Requires a bearer token in the shared cell.
pub struct LiveBookingRepository {
    gateway: Arc<ApiGateway>,
}

impl LiveBookingRepository {
    pub fn new(gateway: Arc<ApiGateway>) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl BookingRepository for LiveBookingRepository {
    async fn create(&self, venue_id: &str, draft: &BookingDraft) -> Result<Booking> {
        let (Some(date_from), Some(date_to)) = (draft.date_from, draft.date_to) else {
            bail!("booking draft submitted without dates");
        };

        let body = serde_json::to_value(BookingRequest {
            date_from,
            date_to,
            guests: draft.guests,
            venue_id,
        })?;

        let booking = self
            .gateway
            .request(Method::POST, "/holidaze/bookings", Some(body))
            .await?;
        Ok(booking)
    }

    async fn list_for_profile(&self, profile_name: &str) -> Result<Vec<Booking>> {
        let path = format!("/holidaze/profiles/{profile_name}/bookings?_venue=true");
        let bookings = self.gateway.get(&path).await?;
        Ok(bookings)
    }
}
