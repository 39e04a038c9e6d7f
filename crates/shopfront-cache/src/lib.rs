//! Durable key-value storage for the Shopfront storefront.
//!
//! Provides a small, local-storage-like API (`get`, `set`, `delete`) with
//! in-memory and file-backed implementations, plus a typed [`Cache`]
//! wrapper with automatic JSON serialization.
//!
//! # Example
//!
//! ```rust,ignore
//! use shopfront_cache::{Cache, FileStore, cache_key};
//!
//! let cache = Cache::new(FileStore::open(".shopfront")?);
//! let key = cache_key!("shopfront", "cart");
//!
//! // Store a value
//! cache.set(&key, &lines)?;
//!
//! // Retrieve a value
//! let lines: Option<Vec<CartLine>> = cache.get(&key)?;
//!
//! // Delete a value
//! cache.delete(&key)?;
//! ```

mod error;
mod file;
mod kv;
mod memory;

pub use error::CacheError;
pub use file::FileStore;
pub use kv::{Cache, KeyValueStore};
pub use memory::MemoryStore;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, FileStore, KeyValueStore, MemoryStore};
}
