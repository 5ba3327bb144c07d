//! Venue domain: models, drafts, and the repository trait.

pub mod model;
pub mod repository;

pub use model::{Media, Venue, VenueDraft, VenueLocation, VenueMeta, VenueOwner};
pub use repository::VenueRepository;
