//! Map Module
//!
//! Provides the persistent cache map: an insertion-ordered in-memory mapping
//! that writes every mutation through to a backing property store.

mod database;
mod order;
mod persist;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use database::{DatabaseMap, Iter};

// == Public Constants ==
/// Separator between namespace segments in backing-store keys.
///
/// NUL cannot appear in legitimate instance identifiers or key text, which is
/// what makes the prefix scheme collision-proof.
pub const KEY_SEPARATOR: char = '\u{0}';

/// First namespace segment of every backing-store key owned by this crate.
pub const PREFIX_ROOT: &str = "database";

/// Second namespace segment of every backing-store key owned by this crate.
pub const PREFIX_KIND: &str = "map";

// == Key Prefix ==
/// Derives the backing-store key prefix for a map instance id.
///
/// The prefix ends with a trailing separator so that ids where one is a
/// prefix of the other (e.g. `"a"` and `"ab"`) still produce disjoint
/// key spaces.
pub(crate) fn key_prefix(id: &str) -> String {
    format!("{PREFIX_ROOT}{KEY_SEPARATOR}{PREFIX_KIND}{KEY_SEPARATOR}{id}{KEY_SEPARATOR}")
}
