//! Venue domain model.
//!
//! A venue is a read-only projection of remote data: it is never mutated
//! locally. Edits go through the repository and a fresh fetch.

use crate::booking::Booking;
use crate::error::{HolidazeError, Result};
use serde::{Deserialize, Serialize};

/// A media reference (image URL with optional alt text).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Media {
    pub url: String,
    #[serde(default)]
    pub alt: Option<String>,
}

impl Media {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            alt: None,
        }
    }
}

/// Amenity flags for a venue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct VenueMeta {
    #[serde(default)]
    pub wifi: bool,
    #[serde(default)]
    pub parking: bool,
    #[serde(default)]
    pub breakfast: bool,
    #[serde(default)]
    pub pets: bool,
}

/// Physical location of a venue. Every field is optional on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VenueLocation {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

/// The profile that owns a venue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VenueOwner {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub avatar: Option<Media>,
}

/// A bookable property record sourced from the remote service.
///
/// Treated as immutable within a single use: there is no local mutation and
/// no caching layer, every read re-fetches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Venue {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub media: Vec<Media>,
    /// Nightly price
    pub price: f64,
    pub max_guests: u32,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub meta: VenueMeta,
    #[serde(default)]
    pub location: VenueLocation,
    /// Present only when the query asked for owner expansion
    #[serde(default)]
    pub owner: Option<VenueOwner>,
    /// Present only when the query asked for booking expansion
    #[serde(default)]
    pub bookings: Option<Vec<Booking>>,
}

/// Input for creating or updating a venue through the management screens.
///
/// Serializes to the request body the service expects for venue writes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VenueDraft {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub media: Vec<Media>,
    pub price: f64,
    pub max_guests: u32,
    #[serde(default)]
    pub meta: VenueMeta,
    #[serde(default)]
    pub location: VenueLocation,
}

impl VenueDraft {
    /// Checks the draft before it is submitted. First failing rule wins.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(HolidazeError::validation("venue name is required"));
        }
        if !self.price.is_finite() || self.price <= 0.0 {
            return Err(HolidazeError::validation("nightly price must be positive"));
        }
        if self.max_guests < 1 {
            return Err(HolidazeError::validation(
                "venue must accommodate at least one guest",
            ));
        }
        Ok(())
    }
}
