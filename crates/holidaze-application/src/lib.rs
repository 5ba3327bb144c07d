//! Application layer for the Holidaze client toolkit.
//!
//! Use-case services that coordinate the domain, gateway, and
//! infrastructure layers: the session state machine, reservation flow,
//! venue catalog, and startup wiring.

pub mod booking_service;
pub mod session_manager;
pub mod venue_catalog;
pub mod wiring;

pub use booking_service::BookingService;
pub use session_manager::SessionManager;
pub use venue_catalog::VenueCatalog;
pub use wiring::{build, App, DataSource};

use holidaze_core::HolidazeError;

/// Recovers the typed error a repository call carried, falling back to
/// `Internal` for anything foreign.
pub(crate) fn from_repo_error(err: anyhow::Error) -> HolidazeError {
    match err.downcast::<HolidazeError>() {
        Ok(err) => err,
        Err(err) => HolidazeError::Internal(err.to_string()),
    }
}
