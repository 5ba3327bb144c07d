//! Domain layer for the Holidaze client toolkit.
//!
//! This crate contains the models, validation rules, and capability traits
//! that the gateway, infrastructure, and application layers build on. It
//! performs no I/O of its own.

pub mod auth;
pub mod booking;
pub mod error;
pub mod session;
pub mod venue;

pub use crate::error::{HolidazeError, Result};
pub use crate::session::{Session, SessionStore, SharedToken};
pub use crate::venue::{Media, Venue};
