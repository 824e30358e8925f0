//! Cart state and its persistence against the key-value storage boundary.

pub mod cart;
pub mod storage;

pub use cart::{CART_STORAGE_KEY, CartStore};
pub use storage::{FileStorage, MemoryStorage, Storage, StorageError, StorageResult};
