//! Persistmap - A namespaced key-value map with transparent persistence
//!
//! Provides ordinary in-memory mapping semantics (get/set/delete/iterate)
//! while silently keeping the data durable in an external, flat,
//! string-keyed property store. Each map instance owns a collision-proof
//! key namespace derived from its id, so many independent maps can share
//! one store.

pub mod error;
pub mod map;
pub mod store;

pub use error::{PersistError, Result};
pub use map::DatabaseMap;
pub use store::{MemoryStore, PropertyStore};
