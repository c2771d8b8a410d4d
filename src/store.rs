//! Backing Store Module
//!
//! Defines the capability contract for the external flat property store and
//! provides an in-memory reference implementation.
//!
//! The store exposes a single flat, string-keyed namespace shared by every
//! consumer in the process. It has exactly three primitives: enumerate all
//! keys, read one textual value, and write or clear one textual value. The
//! map layer multiplexes independent logical maps over this namespace purely
//! through key prefixing (see [`crate::map`]).

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::Result;

// == Property Store Trait ==
/// Capability contract for the external backing store.
///
/// Implementations must preserve three guarantees:
/// - a flat string namespace with full-enumeration capability,
/// - reads of unset keys return `None` rather than failing,
/// - clearing an absent key is a no-op, not an error, and a cleared key no
///   longer appears in enumeration.
///
/// Enumeration order is unspecified. Writes may fail (quota, availability);
/// the map layer treats such failures as non-fatal.
pub trait PropertyStore {
    /// Returns every key currently stored, across all namespaces.
    fn keys(&self) -> Vec<String>;

    /// Returns the textual value for a key, or `None` if unset.
    fn read(&self, key: &str) -> Option<String>;

    /// Sets the textual value for a key, or clears it when `value` is `None`.
    fn write(&mut self, key: &str, value: Option<&str>) -> Result<()>;
}

// == Memory Store ==
/// In-memory reference implementation of [`PropertyStore`].
///
/// A cloneable handle over shared state: clones observe the same underlying
/// namespace, which mirrors the process-wide property bag the design targets
/// and lets several map instances (or a test and its map) share one store.
///
/// Single-threaded by construction (`Rc<RefCell<..>>`), matching the crate's
/// cooperative, non-reentrant execution model.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    /// Shared flat namespace
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    // == Constructor ==
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // == Length ==
    /// Returns the number of stored records across all namespaces.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    // == Is Empty ==
    /// Returns true if no records are stored.
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl PropertyStore for MemoryStore {
    fn keys(&self) -> Vec<String> {
        self.entries.borrow().keys().cloned().collect()
    }

    fn read(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn write(&mut self, key: &str, value: Option<&str>) -> Result<()> {
        match value {
            Some(text) => {
                self.entries
                    .borrow_mut()
                    .insert(key.to_string(), text.to_string());
            }
            None => {
                self.entries.borrow_mut().remove(key);
            }
        }
        Ok(())
    }
}
