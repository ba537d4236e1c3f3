//! Key Order Module
//!
//! Tracks the order in which keys become eviction candidates.

use std::collections::VecDeque;

// == Key Order ==
/// Ordered list of keys used to pick an eviction victim.
///
/// Keys are stored in a VecDeque where:
/// - Front = Newest (most recently inserted or used)
/// - Back = Oldest (next eviction candidate)
///
/// Whether reads move a key to the front is decided by the caller: the
/// insertion-order policy only ever calls [`KeyOrder::insert`], the
/// recency policy also calls [`KeyOrder::touch`].
#[derive(Debug, Default)]
pub struct KeyOrder {
    order: VecDeque<String>,
}

impl KeyOrder {
    // == Constructor ==
    pub fn new() -> Self {
        Self {
            order: VecDeque::new(),
        }
    }

    // == Insert ==
    /// Adds a key at the front if it is not tracked yet.
    ///
    /// An already tracked key keeps its position.
    pub fn insert(&mut self, key: &str) {
        if !self.contains(key) {
            self.order.push_front(key.to_string());
        }
    }

    // == Touch ==
    /// Moves a key to the front, adding it if missing.
    pub fn touch(&mut self, key: &str) {
        self.remove(key);
        self.order.push_front(key.to_string());
    }

    // == Remove ==
    pub fn remove(&mut self, key: &str) {
        self.order.retain(|k| k != key);
    }

    // == Evict Oldest ==
    /// Returns and removes the oldest key, or None if empty.
    pub fn evict_oldest(&mut self) -> Option<String> {
        self.order.pop_back()
    }

    // == Peek Oldest ==
    pub fn peek_oldest(&self) -> Option<&str> {
        self.order.back().map(String::as_str)
    }

    // == Clear ==
    pub fn clear(&mut self) {
        self.order.clear();
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.order.iter().any(|k| k == key)
    }
}
