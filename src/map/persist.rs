//! Persistence Adapter Module
//!
//! Translates between the map's logical `(key, value)` pairs and the backing
//! store's flat, string-valued key space: prefixes keys with the instance
//! namespace, serializes values to JSON text, and enumerates existing
//! entries at startup.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{PersistError, Result};
use crate::map::key_prefix;
use crate::store::PropertyStore;

// == Persist Adapter ==
/// Namespacing and serialization boundary in front of a [`PropertyStore`].
///
/// Every store access goes through [`full_key`](Self::full_key); keys outside
/// the instance's prefix are never read, written, or enumerated.
#[derive(Debug)]
pub(crate) struct PersistAdapter<S> {
    /// Injected backing store
    store: S,
    /// Namespace prefix derived from the instance id
    prefix: String,
}

impl<S: PropertyStore> PersistAdapter<S> {
    // == Constructor ==
    /// Creates an adapter scoped to the namespace of `id`.
    pub fn new(id: &str, store: S) -> Self {
        Self {
            store,
            prefix: key_prefix(id),
        }
    }

    // == Full Key ==
    /// Maps an unprefixed map key to its backing-store key.
    ///
    /// Pure concatenation, no side effects.
    pub fn full_key(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key)
    }

    // == Load All ==
    /// Collects every stored entry belonging to this namespace.
    ///
    /// Enumerates the store's full key set, keeps keys under this instance's
    /// prefix, strips the prefix, and decodes each value. A decode failure
    /// for an individual key is logged and that key skipped; partial
    /// corruption never aborts the load.
    pub fn load_all<T: DeserializeOwned>(&self) -> Vec<(String, T)> {
        let mut entries = Vec::new();

        for full_key in self.store.keys() {
            let Some(key) = full_key.strip_prefix(&self.prefix) else {
                continue;
            };

            let Some(raw) = self.store.read(&full_key) else {
                // Enumerated but unreadable: treat as absent
                continue;
            };

            match serde_json::from_str::<T>(&raw) {
                Ok(value) => entries.push((key.to_string(), value)),
                Err(source) => {
                    warn!(
                        "Skipping corrupted entry during load: {}",
                        PersistError::Decode {
                            key: key.to_string(),
                            source,
                        }
                    );
                }
            }
        }

        debug!("Loaded {} persisted entries", entries.len());
        entries
    }

    // == Write ==
    /// Serializes `value` and stores it under the namespaced key.
    pub fn write<T: Serialize>(&mut self, key: &str, value: &T) -> Result<()> {
        let text = serde_json::to_string(value).map_err(|source| PersistError::Encode {
            key: key.to_string(),
            source,
        })?;
        self.store.write(&self.full_key(key), Some(&text))
    }

    // == Clear ==
    /// Removes the backing-store record for a key.
    ///
    /// Clearing an already-absent key is a no-op per the store contract.
    pub fn clear(&mut self, key: &str) -> Result<()> {
        self.store.write(&self.full_key(key), None)
    }

    // == Read Back ==
    /// Decodes the currently persisted value for a key.
    ///
    /// Used by reconciliation to skip writes whose persisted form is already
    /// current. An unset record or a decode failure both read as absent.
    pub fn read_back<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.store.read(&self.full_key(key))?;
        serde_json::from_str(&raw).ok()
    }
}
