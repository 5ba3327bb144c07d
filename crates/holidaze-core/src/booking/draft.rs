//! The reservation draft and its validation rules.
//!
//! A draft is ephemeral form state owned by a reservation screen. It is
//! validated identically whether the submission target is the live service
//! or the fixture store, and it is never persisted.

use super::model::Booking;
use crate::error::{HolidazeError, Result};
use crate::venue::Venue;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Transient, unsaved input for a prospective reservation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookingDraft {
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub guests: u32,
}

/// Derived pricing for a draft. Pure and recomputed on every call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StayQuote {
    pub nights: i64,
    pub total_price: f64,
}

impl BookingDraft {
    pub fn new(date_from: NaiveDate, date_to: NaiveDate, guests: u32) -> Self {
        Self {
            date_from: Some(date_from),
            date_to: Some(date_to),
            guests,
        }
    }

    /// Applies the reservation rules in order; the first failing rule wins
    /// and no multi-error aggregation happens.
    ///
    /// `today` is passed in so callers and tests share one clock. Dates are
    /// calendar days, so the "normalize to midnight" comparison is
    /// structural.
    pub fn validate(&self, venue: &Venue, today: NaiveDate) -> Result<()> {
        let (from, to) = match (self.date_from, self.date_to) {
            (Some(from), Some(to)) => (from, to),
            _ => return Err(HolidazeError::validation("missing dates")),
        };

        if from < today {
            return Err(HolidazeError::validation("check-in in past"));
        }
        if to <= from {
            return Err(HolidazeError::validation("check-out before check-in"));
        }
        if self.guests < 1 || self.guests > venue.max_guests {
            return Err(HolidazeError::validation("guest count out of range"));
        }

        Ok(())
    }

    /// Number of nights between the draft's dates, clamped to zero when the
    /// range is empty or the dates are unset.
    pub fn nights(&self) -> i64 {
        match (self.date_from, self.date_to) {
            (Some(from), Some(to)) => nights(from, to),
            _ => 0,
        }
    }

    /// Nights and total price against the venue's nightly rate.
    pub fn quote(&self, venue: &Venue) -> StayQuote {
        let nights = self.nights();
        StayQuote {
            nights,
            total_price: nights as f64 * venue.price,
        }
    }
}

/// Whole nights between two calendar days, clamped to zero.
pub fn nights(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days().max(0)
}

/// True when `[from, to)` overlaps any existing booking's stay.
///
/// Ranges are half-open on the check-out day: a stay ending on the day
/// another begins does not collide. Used for the availability calendar.
pub fn overlaps_existing(existing: &[Booking], from: NaiveDate, to: NaiveDate) -> bool {
    existing
        .iter()
        .any(|booking| from < booking.check_out() && booking.check_in() < to)
}
