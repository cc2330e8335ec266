//! Session

mod errors;
mod service;
mod state;
pub mod storage;

pub use errors::SessionError;
pub use service::*;
pub use state::*;
pub use storage::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore, StorageError};
