//! The persisted shopping cart and the storage it lives in.

pub mod error;
pub mod storage;
pub mod store;

pub use error::{CartError, StorageError};
pub use storage::{FileStorage, MemoryStorage, Storage};
pub use store::CartStore;
