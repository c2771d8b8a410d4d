//! Order Tracker Module
//!
//! Tracks insertion order of map keys so iteration is deterministic.

use std::collections::VecDeque;

// == Order Tracker ==
/// Tracks key insertion order for ordered iteration.
///
/// Keys are stored in a VecDeque where:
/// - Front = Oldest insertion
/// - Back = Newest insertion
///
/// Overwriting an existing key keeps its original position; only a fresh
/// insert appends to the back.
#[derive(Debug, Default)]
pub(crate) struct OrderTracker {
    /// Keys in insertion order
    order: VecDeque<String>,
}

impl OrderTracker {
    // == Constructor ==
    /// Creates a new empty order tracker.
    pub fn new() -> Self {
        Self {
            order: VecDeque::new(),
        }
    }

    // == Record ==
    /// Records a key insertion.
    ///
    /// If the key is already tracked this is a no-op, preserving its
    /// original position.
    pub fn record(&mut self, key: &str) {
        if !self.contains(key) {
            self.order.push_back(key.to_string());
        }
    }

    // == Remove ==
    /// Removes a key from the tracker.
    pub fn remove(&mut self, key: &str) {
        self.order.retain(|k| k != key);
    }

    // == Clear ==
    /// Removes every tracked key.
    pub fn clear(&mut self) {
        self.order.clear();
    }

    // == Iter ==
    /// Iterates over tracked keys in insertion order.
    pub fn iter(&self) -> std::collections::vec_deque::Iter<'_, String> {
        self.order.iter()
    }

    // == Length ==
    /// Returns the number of tracked keys.
    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    // == Contains ==
    /// Checks if a key is being tracked.
    pub fn contains(&self, key: &str) -> bool {
        self.order.iter().any(|k| k == key)
    }
}
