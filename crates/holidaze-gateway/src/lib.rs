//! API Access Gateway for the Holidaze booking service.
//!
//! Single choke-point for outbound HTTP: header construction, JSON envelope
//! parsing, and failure normalization live here, along with the live
//! implementations of the core repository traits.

pub mod auth;
pub mod bookings;
pub mod config;
pub mod gateway;
pub mod venues;

pub use crate::bookings::LiveBookingRepository;
pub use crate::config::GatewayConfig;
pub use crate::gateway::{abortable, ApiGateway, DEFAULT_BASE_URL};
pub use crate::venues::LiveVenueRepository;
