//! Catalogue
//!
//! Session store and in-memory product catalogue for a product listing
//! application: sign-in/sign-up backed by a durable key-value side channel,
//! product CRUD, and the listing filters.

pub mod context;
pub mod fixtures;
pub mod ids;
pub mod prelude;
pub mod products;
pub mod session;
pub mod users;
