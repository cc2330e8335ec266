//! Users

mod records;
mod repository;

pub use records::*;
pub use repository::UsersRepository;
