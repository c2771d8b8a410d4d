//! Database Map Module
//!
//! The cache-map engine: an insertion-ordered in-memory mapping that loads
//! its full state from the backing store at construction and writes every
//! mutation through immediately.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use crate::map::order::OrderTracker;
use crate::map::persist::PersistAdapter;
use crate::map::KEY_SEPARATOR;
use crate::store::PropertyStore;

// == Database Map ==
/// A persistent key-value map namespaced by a unique instance id.
///
/// Reads are served from memory only; `set`/`delete`/`clear` update memory
/// first and push a single corresponding write through the persistence
/// adapter. Persistence failures are logged and suppressed, so no public
/// operation ever fails observably; the in-memory state stays authoritative
/// for the rest of the process lifetime.
///
/// Single-threaded, non-reentrant access is assumed; no locking is provided.
#[derive(Debug)]
pub struct DatabaseMap<T, S: PropertyStore> {
    /// Unique identifier of this map instance
    id: String,
    /// In-memory cache, authoritative for reads
    cache: HashMap<String, T>,
    /// Insertion order of cached keys
    order: OrderTracker,
    /// Namespacing and serialization boundary
    adapter: PersistAdapter<S>,
}

impl<T, S> DatabaseMap<T, S>
where
    T: Serialize + DeserializeOwned,
    S: PropertyStore,
{
    // == Constructor ==
    /// Creates a map over `store`, eagerly loading every persisted entry
    /// belonging to `id`'s namespace.
    ///
    /// Entries whose stored text fails to decode are logged and skipped;
    /// they do not appear in the map and do not abort construction.
    ///
    /// The id should not contain the NUL namespace separator; an id that
    /// does could collide with another instance's key space. Such an id is
    /// logged and accepted, keeping construction infallible like every
    /// other public operation.
    pub fn new(id: impl Into<String>, store: S) -> Self {
        let id = id.into();
        if id.contains(KEY_SEPARATOR) {
            warn!("Map id {id:?} contains the namespace separator; its key space may collide with another instance");
        }

        let adapter = PersistAdapter::new(&id, store);
        let mut cache = HashMap::new();
        let mut order = OrderTracker::new();

        for (key, value) in adapter.load_all::<T>() {
            order.record(&key);
            cache.insert(key, value);
        }

        Self {
            id,
            cache,
            order,
            adapter,
        }
    }

    // == Id ==
    /// Returns the unique identifier of this map instance.
    pub fn id(&self) -> &str {
        &self.id
    }

    // == Length ==
    /// Returns the current number of entries.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    // == Is Empty ==
    /// Returns true if the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    // == Get ==
    /// Retrieves a value by key. Purely in-memory, no side effects.
    pub fn get(&self, key: &str) -> Option<&T> {
        self.cache.get(key)
    }

    // == Contains Key ==
    /// Checks if a given key exists. No side effects.
    pub fn contains_key(&self, key: &str) -> bool {
        self.cache.contains_key(key)
    }

    // == Set ==
    /// Inserts or overwrites a value and writes it through to the store.
    ///
    /// Overwriting keeps the key's original insertion position. The memory
    /// update always succeeds; a persistence failure is logged and
    /// suppressed, leaving the entry memory-only until a later successful
    /// write or [`update`](Self::update).
    pub fn set(&mut self, key: impl Into<String>, value: T) {
        let key = key.into();

        if let Err(err) = self.adapter.write(&key, &value) {
            warn!("Write-through failed for key '{key}', keeping in-memory value: {err}");
        }

        self.order.record(&key);
        self.cache.insert(key, value);
    }

    // == Delete ==
    /// Removes an entry and clears its backing-store record.
    ///
    /// Returns the removed value, or `None` if the key was absent (a no-op,
    /// not an error). The store clear is issued either way; clearing an
    /// absent record is idempotent.
    pub fn delete(&mut self, key: &str) -> Option<T> {
        let removed = self.cache.remove(key);
        self.order.remove(key);

        if let Err(err) = self.adapter.clear(key) {
            warn!("Clear failed for key '{key}': {err}");
        }

        removed
    }

    // == Clear ==
    /// Removes every entry, issuing one backing-store clear per key.
    pub fn clear(&mut self) {
        for key in self.order.iter() {
            if let Err(err) = self.adapter.clear(key) {
                warn!("Clear failed for key '{key}': {err}");
            }
        }

        self.cache.clear();
        self.order.clear();
    }

    // == Iter ==
    /// Iterates over `(key, value)` pairs in insertion order.
    ///
    /// The sequence is lazy and restartable; call `iter` again for a fresh
    /// traversal.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            order: self.order.iter(),
            cache: &self.cache,
        }
    }

    // == Keys ==
    /// Iterates over keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.iter().map(|(key, _)| key)
    }

    // == Values ==
    /// Iterates over values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.iter().map(|(_, value)| value)
    }

    // == For Each ==
    /// Invokes `f(value, key)` for every entry in insertion order.
    pub fn for_each(&self, mut f: impl FnMut(&T, &str)) {
        for (key, value) in self.iter() {
            f(value, key);
        }
    }
}

impl<T, S> DatabaseMap<T, S>
where
    T: Serialize + DeserializeOwned + PartialEq,
    S: PropertyStore,
{
    // == Update ==
    /// Re-synchronizes the backing store with the in-memory map.
    ///
    /// For every entry, reads back the persisted value and skips the write
    /// when its decoded form already equals the in-memory value; otherwise
    /// writes the entry through. Recovers entries whose earlier write-through
    /// failed or was skipped. Intended for host checkpoints (e.g. before
    /// shutdown), not after every mutation.
    ///
    /// Returns the number of entries written; a second call with no
    /// intervening mutation returns 0.
    pub fn update(&mut self) -> usize {
        let mut written = 0;

        for key in self.order.iter() {
            let Some(value) = self.cache.get(key.as_str()) else {
                continue;
            };

            // Skip entries whose persisted form is already current
            if self.adapter.read_back::<T>(key).as_ref() == Some(value) {
                continue;
            }

            match self.adapter.write(key, value) {
                Ok(()) => written += 1,
                Err(err) => {
                    warn!("Reconciliation write failed for key '{key}': {err}");
                }
            }
        }

        written
    }
}

// == Iterator ==
/// Insertion-ordered iterator over a map's entries.
#[derive(Debug)]
pub struct Iter<'a, T> {
    order: std::collections::vec_deque::Iter<'a, String>,
    cache: &'a HashMap<String, T>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (&'a str, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let key = self.order.next()?;
            if let Some(value) = self.cache.get(key.as_str()) {
                return Some((key.as_str(), value));
            }
        }
    }
}

impl<'a, T, S> IntoIterator for &'a DatabaseMap<T, S>
where
    T: Serialize + DeserializeOwned,
    S: PropertyStore,
{
    type Item = (&'a str, &'a T);
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
