//! In-memory visit tracker.

use std::collections::HashMap;

use crate::model::LocationKey;
use crate::traits::VisitTracker;

/// `HashMap`-backed [`VisitTracker`]. Unknown keys read as not visited.
#[derive(Debug, Clone, Default)]
pub struct InMemoryVisitTracker {
    flags: HashMap<LocationKey, bool>,
}

impl InMemoryVisitTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }
}

impl VisitTracker for InMemoryVisitTracker {
    fn is_visited(&self, key: &LocationKey) -> bool {
        self.flags.get(key).copied().unwrap_or(false)
    }

    fn set_visited(&mut self, key: &LocationKey, visited: bool) {
        self.flags.insert(key.clone(), visited);
    }
}
