//! In-memory fixture repositories.
//!
//! One of the two repository implementations selectable at startup: seeded
//! sample data, no network, mutations visible only for the process
//! lifetime. Never intermixed with the live repositories in one build
//! configuration.

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use holidaze_core::auth::{AuthApi, Registration};
use holidaze_core::booking::{Booking, BookingDraft, BookingRepository};
use holidaze_core::venue::{
    Media, Venue, VenueDraft, VenueLocation, VenueMeta, VenueOwner, VenueRepository,
};
use holidaze_core::{HolidazeError, Session};
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// Venue source backed by a seeded in-memory list.
pub struct FixtureVenueRepository {
    venues: RwLock<Vec<Venue>>,
}

impl FixtureVenueRepository {
    /// Creates a repository seeded with the sample venues.
    pub fn new() -> Self {
        Self {
            venues: RwLock::new(sample_venues()),
        }
    }

    /// Creates an empty repository (tests).
    pub fn empty() -> Self {
        Self {
            venues: RwLock::new(Vec::new()),
        }
    }
}

impl Default for FixtureVenueRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VenueRepository for FixtureVenueRepository {
    async fn list_all(&self) -> Result<Vec<Venue>> {
        Ok(self.venues.read().expect("venue lock poisoned").clone())
    }

    async fn find_by_id(&self, venue_id: &str) -> Result<Option<Venue>> {
        let venues = self.venues.read().expect("venue lock poisoned");
        Ok(venues.iter().find(|venue| venue.id == venue_id).cloned())
    }

    async fn list_by_owner(&self, profile_name: &str) -> Result<Vec<Venue>> {
        let venues = self.venues.read().expect("venue lock poisoned");
        Ok(venues
            .iter()
            .filter(|venue| {
                venue
                    .owner
                    .as_ref()
                    .is_some_and(|owner| owner.name == profile_name)
            })
            .cloned()
            .collect())
    }

    // The fixture has no bearer identity to infer the creator from, so
    // created venues belong to the seeded demo manager, the same way the
    // live service assigns the creating profile.
    async fn create(&self, draft: &VenueDraft) -> Result<Venue> {
        let venue = Venue {
            id: Uuid::new_v4().to_string(),
            name: draft.name.clone(),
            description: draft.description.clone(),
            media: draft.media.clone(),
            price: draft.price,
            max_guests: draft.max_guests,
            rating: 0.0,
            meta: draft.meta,
            location: draft.location.clone(),
            owner: Some(demo_manager()),
            bookings: Some(Vec::new()),
        };

        self.venues
            .write()
            .expect("venue lock poisoned")
            .push(venue.clone());
        Ok(venue)
    }

    async fn update(&self, venue_id: &str, draft: &VenueDraft) -> Result<Venue> {
        let mut venues = self.venues.write().expect("venue lock poisoned");
        let venue = venues
            .iter_mut()
            .find(|venue| venue.id == venue_id)
            .ok_or_else(|| anyhow::anyhow!("no venue with id '{venue_id}'"))?;

        venue.name = draft.name.clone();
        venue.description = draft.description.clone();
        venue.media = draft.media.clone();
        venue.price = draft.price;
        venue.max_guests = draft.max_guests;
        venue.meta = draft.meta;
        venue.location = draft.location.clone();

        Ok(venue.clone())
    }

    async fn delete(&self, venue_id: &str) -> Result<()> {
        let mut venues = self.venues.write().expect("venue lock poisoned");
        venues.retain(|venue| venue.id != venue_id);
        Ok(())
    }
}

impl FixtureVenueRepository {
    /// Records a booking on the venue, so availability reads see it the
    /// same way the live `_bookings=true` expansion would.
    fn attach_booking(&self, venue_id: &str, booking: Booking) {
        let mut venues = self.venues.write().expect("venue lock poisoned");
        if let Some(venue) = venues.iter_mut().find(|venue| venue.id == venue_id) {
            venue.bookings.get_or_insert_with(Vec::new).push(booking);
        }
    }
}

/// Booking source backed by an in-memory list.
///
/// The fixture has no notion of which profile a booking belongs to (the
/// live service infers it from the bearer token), so every stored booking
/// belongs to the demo user. It shares the venue repository so a placed
/// booking shows up on its venue, as the live booking expansion would.
pub struct FixtureBookingRepository {
    venues: Arc<FixtureVenueRepository>,
    bookings: RwLock<Vec<Booking>>,
}

impl FixtureBookingRepository {
    pub fn new(venues: Arc<FixtureVenueRepository>) -> Self {
        Self {
            venues,
            bookings: RwLock::new(Vec::new()),
        }
    }
}

#[async_trait]
impl BookingRepository for FixtureBookingRepository {
    async fn create(&self, venue_id: &str, draft: &BookingDraft) -> Result<Booking> {
        let (Some(date_from), Some(date_to)) = (draft.date_from, draft.date_to) else {
            anyhow::bail!("booking draft submitted without dates");
        };

        let booking = Booking {
            id: Uuid::new_v4().to_string(),
            date_from: midnight_utc(date_from),
            date_to: midnight_utc(date_to),
            guests: draft.guests,
            venue: None,
        };

        tracing::debug!(venue_id, booking_id = %booking.id, "stored fixture booking");
        self.venues.attach_booking(venue_id, booking.clone());
        self.bookings
            .write()
            .expect("booking lock poisoned")
            .push(booking.clone());
        Ok(booking)
    }

    async fn list_for_profile(&self, _profile_name: &str) -> Result<Vec<Booking>> {
        Ok(self.bookings.read().expect("booking lock poisoned").clone())
    }
}

/// Authentication backed by an in-memory account list.
///
/// Mirrors the remote service's observable behavior so the session manager
/// needs no special casing: bad credentials come back as a 401 rejection
/// with the service's wording, duplicate registrations as a 400.
pub struct FixtureAuthApi {
    accounts: RwLock<Vec<Registration>>,
}

impl FixtureAuthApi {
    /// Creates the fixture with the seeded demo accounts: `kari`, the
    /// venue manager owning the sample venues, and `ola`, a plain guest.
    /// Both use the password `password123`.
    pub fn new() -> Self {
        Self {
            accounts: RwLock::new(vec![
                Registration {
                    name: "kari".into(),
                    email: "kari@stud.noroff.no".into(),
                    password: "password123".into(),
                    venue_manager: true,
                },
                Registration {
                    name: "ola".into(),
                    email: "ola@stud.noroff.no".into(),
                    password: "password123".into(),
                    venue_manager: false,
                },
            ]),
        }
    }
}

impl Default for FixtureAuthApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuthApi for FixtureAuthApi {
    async fn login(&self, email: &str, password: &str) -> holidaze_core::Result<Session> {
        let accounts = self.accounts.read().expect("account lock poisoned");
        let account = accounts
            .iter()
            .find(|account| account.email == email && account.password == password)
            .ok_or(HolidazeError::Rejected {
                status: 401,
                message: "Invalid credentials".into(),
            })?;

        Ok(Session {
            name: account.name.clone(),
            email: account.email.clone(),
            venue_manager: account.venue_manager,
            access_token: format!("fixture-token-{}", Uuid::new_v4()),
            avatar: None,
        })
    }

    async fn register(&self, registration: &Registration) -> holidaze_core::Result<()> {
        let mut accounts = self.accounts.write().expect("account lock poisoned");
        if accounts
            .iter()
            .any(|account| account.email == registration.email)
        {
            return Err(HolidazeError::Rejected {
                status: 400,
                message: "Profile already exists".into(),
            });
        }

        accounts.push(registration.clone());
        Ok(())
    }

    async fn update_avatar(&self, _profile_name: &str, url: &str) -> holidaze_core::Result<Media> {
        Ok(Media::new(url))
    }
}

fn midnight_utc(date: NaiveDate) -> chrono::DateTime<chrono::Utc> {
    date.and_hms_opt(0, 0, 0)
        .expect("midnight is always valid")
        .and_utc()
}

/// The seeded demo manager; owns the sample venues and any venue created
/// through the fixture.
fn demo_manager() -> VenueOwner {
    VenueOwner {
        name: "kari".into(),
        email: "kari@stud.noroff.no".into(),
        avatar: None,
    }
}

/// Seeded sample venues for fixture mode.
fn sample_venues() -> Vec<Venue> {
    let owner = demo_manager();

    vec![
        Venue {
            id: "fixture-seaside-cabin".into(),
            name: "Seaside Cabin".into(),
            description: "Two rooms right on the fjord, with a private jetty.".into(),
            media: vec![Media::new("https://example.com/media/seaside-cabin.jpg")],
            price: 120.0,
            max_guests: 4,
            rating: 4.6,
            meta: VenueMeta {
                wifi: true,
                parking: true,
                breakfast: false,
                pets: true,
            },
            location: VenueLocation {
                address: Some("Fjordveien 1".into()),
                city: Some("Bergen".into()),
                country: Some("Norway".into()),
            },
            owner: Some(owner.clone()),
            bookings: Some(Vec::new()),
        },
        Venue {
            id: "fixture-mountain-lodge".into(),
            name: "Mountain Lodge".into(),
            description: "Timber lodge at the foot of the ski lift.".into(),
            media: vec![Media::new("https://example.com/media/mountain-lodge.jpg")],
            price: 210.0,
            max_guests: 8,
            rating: 4.9,
            meta: VenueMeta {
                wifi: true,
                parking: true,
                breakfast: true,
                pets: false,
            },
            location: VenueLocation {
                address: Some("Toppvegen 12".into()),
                city: Some("Geilo".into()),
                country: Some("Norway".into()),
            },
            owner: Some(owner),
            bookings: Some(Vec::new()),
        },
        Venue {
            id: "fixture-city-loft".into(),
            name: "City Loft".into(),
            description: "Compact loft two blocks from the central station.".into(),
            media: vec![Media::new("https://example.com/media/city-loft.jpg")],
            price: 95.0,
            max_guests: 2,
            rating: 4.1,
            meta: VenueMeta {
                wifi: true,
                parking: false,
                breakfast: false,
                pets: false,
            },
            location: VenueLocation {
                address: Some("Storgata 44".into()),
                city: Some("Oslo".into()),
                country: Some("Norway".into()),
            },
            owner: None,
            bookings: Some(Vec::new()),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> VenueDraft {
        VenueDraft {
            name: "New Venue".into(),
            description: String::new(),
            media: Vec::new(),
            price: 50.0,
            max_guests: 3,
            meta: VenueMeta::default(),
            location: VenueLocation::default(),
        }
    }

    #[tokio::test]
    async fn seeded_venues_are_listed() {
        let repo = FixtureVenueRepository::new();
        let venues = repo.list_all().await.unwrap();
        assert_eq!(venues.len(), 3);
        assert!(repo
            .find_by_id("fixture-seaside-cabin")
            .await
            .unwrap()
            .is_some());
        assert!(repo.find_by_id("no-such-venue").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn owner_filter_matches_seeded_owner() {
        let repo = FixtureVenueRepository::new();
        let owned = repo.list_by_owner("kari").await.unwrap();
        assert_eq!(owned.len(), 2);
        assert!(repo.list_by_owner("nobody").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_update_delete_cycle() {
        let repo = FixtureVenueRepository::empty();

        let created = repo.create(&draft()).await.unwrap();
        assert_eq!(repo.list_all().await.unwrap().len(), 1);
        // Created venues belong to the demo manager and round-trip
        // through the owner filter.
        assert_eq!(repo.list_by_owner("kari").await.unwrap().len(), 1);

        let mut changed = draft();
        changed.price = 75.0;
        let updated = repo.update(&created.id, &changed).await.unwrap();
        assert_eq!(updated.price, 75.0);

        repo.delete(&created.id).await.unwrap();
        assert!(repo.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_of_unknown_venue_fails() {
        let repo = FixtureVenueRepository::empty();
        assert!(repo.update("missing", &draft()).await.is_err());
    }

    #[tokio::test]
    async fn bookings_accumulate_for_the_demo_user() {
        let venues = Arc::new(FixtureVenueRepository::new());
        let repo = FixtureBookingRepository::new(venues);
        let day = |d| NaiveDate::from_ymd_opt(2026, 9, d).unwrap();

        let booking = repo
            .create("fixture-city-loft", &BookingDraft::new(day(1), day(4), 2))
            .await
            .unwrap();
        assert_eq!(booking.guests, 2);
        assert_eq!(booking.check_in(), day(1));

        let listed = repo.list_for_profile("anyone").await.unwrap();
        assert_eq!(listed.len(), 1);
    }

    #[tokio::test]
    async fn placed_booking_appears_on_its_venue() {
        let venues = Arc::new(FixtureVenueRepository::new());
        let repo = FixtureBookingRepository::new(venues.clone());
        let day = |d| NaiveDate::from_ymd_opt(2026, 9, d).unwrap();

        repo.create("fixture-city-loft", &BookingDraft::new(day(1), day(4), 2))
            .await
            .unwrap();

        let venue = venues
            .find_by_id("fixture-city-loft")
            .await
            .unwrap()
            .unwrap();
        let attached = venue.bookings.as_deref().unwrap();
        assert_eq!(attached.len(), 1);
        assert_eq!(attached[0].check_in(), day(1));

        // Other venues stay untouched.
        let other = venues
            .find_by_id("fixture-seaside-cabin")
            .await
            .unwrap()
            .unwrap();
        assert!(other.bookings.as_deref().unwrap().is_empty());
    }

    #[tokio::test]
    async fn seeded_account_logs_in_and_wrong_password_is_rejected() {
        let auth = FixtureAuthApi::new();

        let session = auth
            .login("kari@stud.noroff.no", "password123")
            .await
            .unwrap();
        assert!(session.venue_manager);
        assert!(session.access_token.starts_with("fixture-token-"));

        let err = auth
            .login("kari@stud.noroff.no", "wrong-password")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            HolidazeError::Rejected { status: 401, ref message } if message == "Invalid credentials"
        ));
    }

    #[tokio::test]
    async fn registration_adds_an_account_once() {
        let auth = FixtureAuthApi::new();
        let registration = Registration {
            name: "alice".into(),
            email: "alice@stud.noroff.no".into(),
            password: "password123".into(),
            venue_manager: false,
        };

        auth.register(&registration).await.unwrap();
        auth.login("alice@stud.noroff.no", "password123")
            .await
            .unwrap();

        let err = auth.register(&registration).await.unwrap_err();
        assert!(matches!(
            err,
            HolidazeError::Rejected { status: 400, ref message } if message == "Profile already exists"
        ));
    }

    #[tokio::test]
    async fn draft_without_dates_is_rejected() {
        let repo = FixtureBookingRepository::new(Arc::new(FixtureVenueRepository::new()));
        let draft = BookingDraft {
            date_from: None,
            date_to: None,
            guests: 1,
        };
        assert!(repo.create("fixture-city-loft", &draft).await.is_err());
    }
}
