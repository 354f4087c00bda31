//! Pool of released clone IDs.
//!
//! Released IDs are reused first-in, first-out before any fresh integer is
//! minted, so scripts see IDs stay small across long runs with heavy clone
//! churn.

use std::collections::VecDeque;

use crate::CloneId;

#[derive(Debug)]
pub struct FreeIdPool {
    next_fresh: CloneId,
    released: VecDeque<CloneId>,
}

impl FreeIdPool {
    pub fn new() -> Self {
        Self {
            next_fresh: CloneId::FIRST,
            released: VecDeque::new(),
        }
    }

    /// Hands out the oldest released ID, or mints the next fresh one.
    ///
    /// # Panics
    /// Panics if the fresh counter would pass `u32::MAX`.
    pub fn allocate(&mut self) -> CloneId {
        if let Some(id) = self.released.pop_front() {
            return id;
        }
        let id = self.next_fresh;
        self.next_fresh = id
            .successor()
            .unwrap_or_else(|| panic!("failed to allocate clone id; clone id overflow"));
        id
    }

    /// Queues `id` for reuse. The caller guarantees it was live.
    pub fn release(&mut self, id: CloneId) {
        debug_assert!(
            !self.released.contains(&id),
            "clone id {id} released twice"
        );
        self.released.push_back(id);
    }

    pub fn reset(&mut self) {
        self.released.clear();
        self.next_fresh = CloneId::FIRST;
    }

    pub fn len_free(&self) -> usize {
        self.released.len()
    }

    pub fn is_free(&self, id: CloneId) -> bool {
        self.released.contains(&id)
    }

    /// The ID the next allocation mints once the released queue is drained.
    pub fn next_fresh(&self) -> CloneId {
        self.next_fresh
    }
}

impl Default for FreeIdPool {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "tests/free_pool_tests.rs"]
mod tests;
