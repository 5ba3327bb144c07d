//! Booking domain model.

use crate::venue::Venue;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A confirmed reservation sourced from the remote service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub date_from: DateTime<Utc>,
    pub date_to: DateTime<Utc>,
    pub guests: u32,
    /// Present only when the query asked for venue expansion
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue: Option<Box<Venue>>,
}

impl Booking {
    /// Check-in calendar day, time of day discarded.
    pub fn check_in(&self) -> NaiveDate {
        self.date_from.date_naive()
    }

    /// Check-out calendar day, time of day discarded.
    pub fn check_out(&self) -> NaiveDate {
        self.date_to.date_naive()
    }
}
