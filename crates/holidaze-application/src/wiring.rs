//! Startup wiring.
//!
//! The data source is chosen once here; every service downstream sees only
//! the repository traits, so fixture and live builds never mix.

use crate::booking_service::BookingService;
use crate::session_manager::SessionManager;
use crate::venue_catalog::VenueCatalog;
use holidaze_core::{SessionStore, SharedToken};
use holidaze_gateway::{ApiGateway, GatewayConfig, LiveBookingRepository, LiveVenueRepository};
use holidaze_infrastructure::{FixtureAuthApi, FixtureBookingRepository, FixtureVenueRepository};
use std::sync::Arc;
use tracing::info;

/// Which backing data source the application runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    /// Seeded in-memory data, no network.
    Fixture,
    /// The remote booking service.
    Live,
}

/// The fully wired application services.
pub struct App {
    pub session: Arc<SessionManager>,
    pub catalog: VenueCatalog,
    pub bookings: BookingService,
}

/// Wires the services against the chosen data source.
///
/// Live mode builds one gateway sharing a single token cell with the
/// session manager; fixture mode needs no gateway and ignores the config's
/// API key.
pub fn build(source: DataSource, config: GatewayConfig, store: Arc<dyn SessionStore>) -> App {
    match source {
        DataSource::Fixture => {
            info!("wiring application against fixture data");
            let session = Arc::new(SessionManager::new(
                Arc::new(FixtureAuthApi::new()),
                store,
                Arc::new(SharedToken::new()),
            ));
            let venues = Arc::new(FixtureVenueRepository::new());
            let bookings = Arc::new(FixtureBookingRepository::new(venues.clone()));

            App {
                catalog: VenueCatalog::new(venues.clone(), session.clone()),
                bookings: BookingService::new(venues, bookings, session.clone()),
                session,
            }
        }
        DataSource::Live => {
            info!(base_url = %config.base_url, "wiring application against the live service");
            let token = Arc::new(SharedToken::new());
            let gateway = Arc::new(ApiGateway::new(config, token.clone()));
            let session = Arc::new(SessionManager::new(gateway.clone(), store, token));
            let venues = Arc::new(LiveVenueRepository::new(gateway.clone()));
            let bookings = Arc::new(LiveBookingRepository::new(gateway));

            App {
                catalog: VenueCatalog::new(venues.clone(), session.clone()),
                bookings: BookingService::new(venues, bookings, session.clone()),
                session,
            }
        }
    }
}
