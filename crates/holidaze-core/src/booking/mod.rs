//! Booking domain: models, the reservation draft with its validation rules,
//! and the repository trait.

pub mod draft;
pub mod model;
pub mod repository;

pub use draft::{overlaps_existing, BookingDraft, StayQuote};
pub use model::Booking;
pub use repository::BookingRepository;
