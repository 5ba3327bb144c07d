//! The reservation flow.

use crate::from_repo_error;
use crate::session_manager::SessionManager;
use chrono::{Local, NaiveDate};
use holidaze_core::booking::{overlaps_existing, Booking, BookingDraft, BookingRepository, StayQuote};
use holidaze_core::venue::{Venue, VenueRepository};
use holidaze_core::{HolidazeError, Result};
use std::sync::Arc;

/// Coordinates draft validation and submission against one venue.
///
/// The same rules apply whether the repository underneath is the live
/// gateway or the in-memory fixture store.
pub struct BookingService {
    venues: Arc<dyn VenueRepository>,
    bookings: Arc<dyn BookingRepository>,
    session: Arc<SessionManager>,
}

impl BookingService {
    pub fn new(
        venues: Arc<dyn VenueRepository>,
        bookings: Arc<dyn BookingRepository>,
        session: Arc<SessionManager>,
    ) -> Self {
        Self {
            venues,
            bookings,
            session,
        }
    }

    /// Validates the draft and submits the reservation.
    ///
    /// Requires an authenticated, non-manager session: a venue-manager
    /// account administers venues and cannot book stays.
    pub async fn reserve(&self, venue_id: &str, draft: &BookingDraft) -> Result<Booking> {
        self.reserve_as_of(venue_id, draft, Local::now().date_naive())
            .await
    }

    /// Like [`reserve`](Self::reserve) with an explicit "today", so tests
    /// and callers share one clock.
    pub async fn reserve_as_of(
        &self,
        venue_id: &str,
        draft: &BookingDraft,
        today: NaiveDate,
    ) -> Result<Booking> {
        let session = self
            .session
            .current()
            .ok_or_else(|| HolidazeError::Authentication("You must be logged in".into()))?;
        if session.venue_manager {
            return Err(HolidazeError::validation(
                "venue managers cannot place bookings",
            ));
        }

        let venue = self.fetch_venue(venue_id).await?;
        draft.validate(&venue, today)?;

        self.bookings
            .create(venue_id, draft)
            .await
            .map_err(from_repo_error)
    }

    /// Nights and total price for a draft against a venue's nightly rate.
    /// Pure arithmetic, recomputed on every call.
    pub async fn quote(&self, venue_id: &str, draft: &BookingDraft) -> Result<StayQuote> {
        let venue = self.fetch_venue(venue_id).await?;
        Ok(draft.quote(&venue))
    }

    /// True when no existing booking of the venue collides with the stay.
    /// Venues fetched without booking expansion count as fully available.
    pub async fn is_available(
        &self,
        venue_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<bool> {
        let venue = self.fetch_venue(venue_id).await?;
        let existing = venue.bookings.as_deref().unwrap_or(&[]);
        Ok(!overlaps_existing(existing, from, to))
    }

    /// The reservations of the signed-in user.
    pub async fn my_bookings(&self) -> Result<Vec<Booking>> {
        let session = self
            .session
            .current()
            .ok_or_else(|| HolidazeError::Authentication("You must be logged in".into()))?;

        self.bookings
            .list_for_profile(&session.name)
            .await
            .map_err(from_repo_error)
    }

    async fn fetch_venue(&self, venue_id: &str) -> Result<Venue> {
        self.venues
            .find_by_id(venue_id)
            .await
            .map_err(from_repo_error)?
            .ok_or_else(|| HolidazeError::not_found("venue", venue_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use holidaze_core::auth::{AuthApi, Registration};
    use holidaze_core::{Media, Session, SessionStore, SharedToken};
    use holidaze_infrastructure::{FixtureBookingRepository, FixtureVenueRepository};

    struct StubAuth {
        venue_manager: bool,
    }

    #[async_trait]
    impl AuthApi for StubAuth {
        async fn login(&self, email: &str, _password: &str) -> Result<Session> {
            Ok(Session {
                name: "alice".into(),
                email: email.into(),
                venue_manager: self.venue_manager,
                access_token: "token-T".into(),
                avatar: None,
            })
        }

        async fn register(&self, _registration: &Registration) -> Result<()> {
            Ok(())
        }

        async fn update_avatar(&self, _profile_name: &str, url: &str) -> Result<Media> {
            Ok(Media::new(url))
        }
    }

    /// Store double that persists nothing.
    struct NullStore;

    #[async_trait]
    impl SessionStore for NullStore {
        async fn load(&self) -> anyhow::Result<Option<Session>> {
            Ok(None)
        }
        async fn save(&self, _session: &Session) -> anyhow::Result<()> {
            Ok(())
        }
        async fn clear(&self) -> anyhow::Result<()> {
            Ok(())
        }
    }

    async fn service(venue_manager: bool, logged_in: bool) -> BookingService {
        let manager = Arc::new(SessionManager::new(
            Arc::new(StubAuth { venue_manager }),
            Arc::new(NullStore),
            Arc::new(SharedToken::new()),
        ));
        if logged_in {
            manager
                .login("alice@stud.noroff.no", "password123")
                .await
                .unwrap();
        }

        let venues = Arc::new(FixtureVenueRepository::new());
        BookingService::new(
            venues.clone(),
            Arc::new(FixtureBookingRepository::new(venues)),
            manager,
        )
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 9, d).unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 25).unwrap()
    }

    #[tokio::test]
    async fn anonymous_users_cannot_reserve() {
        let service = service(false, false).await;
        let err = service
            .reserve_as_of(
                "fixture-city-loft",
                &BookingDraft::new(day(1), day(4), 2),
                today(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, HolidazeError::Authentication(_)));
    }

    #[tokio::test]
    async fn venue_managers_cannot_reserve() {
        let service = service(true, true).await;
        let err = service
            .reserve_as_of(
                "fixture-city-loft",
                &BookingDraft::new(day(1), day(4), 2),
                today(),
            )
            .await
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn valid_draft_is_submitted_and_listed() {
        let service = service(false, true).await;
        let booking = service
            .reserve_as_of(
                "fixture-city-loft",
                &BookingDraft::new(day(1), day(4), 2),
                today(),
            )
            .await
            .unwrap();
        assert_eq!(booking.guests, 2);

        let mine = service.my_bookings().await.unwrap();
        assert_eq!(mine.len(), 1);
    }

    #[tokio::test]
    async fn invalid_draft_never_reaches_the_repository() {
        let service = service(false, true).await;
        // City Loft sleeps two; three guests must fail locally.
        let err = service
            .reserve_as_of(
                "fixture-city-loft",
                &BookingDraft::new(day(1), day(4), 3),
                today(),
            )
            .await
            .unwrap_err();
        assert_eq!(err, HolidazeError::validation("guest count out of range"));
        assert!(service.my_bookings().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_venue_is_not_found() {
        let service = service(false, true).await;
        let err = service
            .reserve_as_of("no-such-venue", &BookingDraft::new(day(1), day(4), 1), today())
            .await
            .unwrap_err();
        assert!(matches!(err, HolidazeError::NotFound { .. }));
    }

    #[tokio::test]
    async fn quote_multiplies_nights_by_rate() {
        let service = service(false, true).await;
        let quote = service
            .quote("fixture-city-loft", &BookingDraft::new(day(1), day(4), 2))
            .await
            .unwrap();
        assert_eq!(quote.nights, 3);
        assert_eq!(quote.total_price, 285.0);
    }

    #[tokio::test]
    async fn venue_without_booking_expansion_is_available() {
        let service = service(false, true).await;
        assert!(service
            .is_available("fixture-city-loft", day(1), day(4))
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn placed_booking_makes_its_dates_unavailable() {
        let service = service(false, true).await;
        service
            .reserve_as_of(
                "fixture-city-loft",
                &BookingDraft::new(day(1), day(4), 2),
                today(),
            )
            .await
            .unwrap();

        assert!(!service
            .is_available("fixture-city-loft", day(1), day(4))
            .await
            .unwrap());
        assert!(!service
            .is_available("fixture-city-loft", day(3), day(6))
            .await
            .unwrap());

        // Half-open ranges: a stay starting on the check-out day fits.
        assert!(service
            .is_available("fixture-city-loft", day(4), day(6))
            .await
            .unwrap());
    }
}
