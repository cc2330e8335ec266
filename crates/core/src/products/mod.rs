//! Products

pub mod debounce;
mod draft;
pub mod filter;
pub mod models;
mod repository;
mod service;

pub use draft::{ProductDraft, ProductInputError};
pub use filter::{ProductFilter, SellerScope, categories};
pub use repository::ProductsRepository;
pub use service::*;
