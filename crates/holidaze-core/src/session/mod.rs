//! Session domain: the authenticated-identity record, the shared bearer
//! token cell, and the persistence trait.

pub mod model;
pub mod store;
pub mod token;

pub use model::Session;
pub use store::SessionStore;
pub use token::SharedToken;
