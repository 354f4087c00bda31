//! Authoritative mapping from live clone IDs to their targets and data.
//!
//! Each live ID owns exactly one [`Entry`] holding both the weak target
//! reference and the data bag, so the two can never drift apart. The registry
//! also owns the [`FreeIdPool`]: IDs only move between "live" and "free"
//! through [`Registry::assign`] and [`Registry::release`], which keeps the two
//! sets disjoint.

use std::collections::BTreeMap;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::collections::DataBag;
use crate::free_pool::FreeIdPool;
use crate::host::CloneTarget;
use crate::CloneId;

/// Why an assignment request was refused.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AssignError {
    /// The target is the template sprite, not a clone.
    Original,
    /// The target already holds a live ID.
    AlreadyAssigned(CloneId),
}

impl fmt::Display for AssignError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssignError::Original => write!(f, "original sprites do not receive clone ids"),
            AssignError::AlreadyAssigned(id) => write!(f, "target already holds clone id {id}"),
        }
    }
}

impl std::error::Error for AssignError {}

/// The path through which an ID was reclaimed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ReleaseCause {
    /// Explicit delete-by-id from a script.
    Delete,
    /// The target's teardown ran its dispose hooks.
    Dispose,
    /// The sweeper found the target gone.
    Sweep,
}

impl fmt::Display for ReleaseCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ReleaseCause::Delete => "delete",
            ReleaseCause::Dispose => "dispose",
            ReleaseCause::Sweep => "sweep",
        };
        f.write_str(label)
    }
}

/// State kept for one live ID.
pub struct Entry {
    target: Weak<dyn CloneTarget>,
    data: DataBag,
}

impl Entry {
    fn new(target: &Rc<dyn CloneTarget>) -> Self {
        Self {
            target: Rc::downgrade(target),
            data: DataBag::default(),
        }
    }

    /// The target, if the host still holds it.
    pub fn target(&self) -> Option<Rc<dyn CloneTarget>> {
        self.target.upgrade()
    }

    pub fn data(&self) -> &DataBag {
        &self.data
    }

    fn is_owned_by(&self, owner: &Weak<dyn CloneTarget>) -> bool {
        Weak::ptr_eq(&self.target, owner)
    }

    /// Still held by the host and attached to the stage.
    fn is_alive(&self) -> bool {
        self.target
            .upgrade()
            .is_some_and(|target| target.is_on_stage())
    }
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("target_alive", &(self.target.strong_count() > 0))
            .field("data", &self.data)
            .finish()
    }
}

#[derive(Debug, Default)]
pub struct Registry {
    entries: BTreeMap<CloneId, Entry>,
    pool: FreeIdPool,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Gives `target` an ID and an empty data bag.
    ///
    /// The target is told its own ID so later requests are cheap to refuse.
    pub fn assign(&mut self, target: &Rc<dyn CloneTarget>) -> Result<CloneId, AssignError> {
        if target.is_original() {
            return Err(AssignError::Original);
        }
        if let Some(existing) = target.clone_id() {
            return Err(AssignError::AlreadyAssigned(existing));
        }
        let id = self.pool.allocate();
        debug_assert!(
            !self.entries.contains_key(&id),
            "pool handed out live clone id {id}"
        );
        self.entries.insert(id, Entry::new(target));
        target.set_clone_id(Some(id));
        log::debug!("assigned clone id {id}");
        Ok(id)
    }

    /// Removes `id` and queues it for reuse.
    ///
    /// Returns `None` without touching the pool when `id` is not live, so
    /// several reclaim paths may race on the same entry.
    ///
    /// A target deleted by ID keeps remembering the ID until the host tears
    /// it down, so its remaining scripts cannot claim a fresh one.
    pub fn release(&mut self, id: CloneId, cause: ReleaseCause) -> Option<Entry> {
        let Some(entry) = self.entries.remove(&id) else {
            log::trace!("clone id {id} already free ({cause})");
            return None;
        };
        self.pool.release(id);
        if cause != ReleaseCause::Delete {
            if let Some(target) = entry.target.upgrade() {
                if target.clone_id() == Some(id) {
                    target.set_clone_id(None);
                }
            }
        }
        log::debug!("released clone id {id} ({cause})");
        Some(entry)
    }

    /// Like [`release`](Self::release), but only when `id` still belongs to
    /// `owner`. Stale reclaim requests for an ID that has since been handed to
    /// another target are ignored.
    pub fn release_owned(
        &mut self,
        id: CloneId,
        owner: &Weak<dyn CloneTarget>,
        cause: ReleaseCause,
    ) -> Option<Entry> {
        let owned = self
            .entries
            .get(&id)
            .is_some_and(|entry| entry.is_owned_by(owner));
        if !owned {
            log::trace!("clone id {id} no longer owned by the releasing target ({cause})");
            return None;
        }
        self.release(id, cause)
    }

    /// Upserts `key` in the data bag of `id`. Returns `false` if `id` is not live.
    pub fn set_data(&mut self, id: CloneId, key: impl Into<String>, value: impl Into<String>) -> bool {
        match self.entries.get_mut(&id) {
            Some(entry) => {
                entry.data.insert(key.into(), value.into());
                true
            }
            None => false,
        }
    }

    pub fn data(&self, id: CloneId, key: &str) -> Option<&str> {
        self.entries
            .get(&id)
            .and_then(|entry| entry.data.get(key))
            .map(String::as_str)
    }

    pub fn entry(&self, id: CloneId) -> Option<&Entry> {
        self.entries.get(&id)
    }

    /// Whether `id` is live and mapped to `target` itself.
    pub fn is_held_by(&self, id: CloneId, target: &dyn CloneTarget) -> bool {
        let address = target as *const dyn CloneTarget as *const ();
        self.entries
            .get(&id)
            .is_some_and(|entry| entry.target.as_ptr() as *const () == address)
    }

    pub fn target(&self, id: CloneId) -> Option<Rc<dyn CloneTarget>> {
        self.entries.get(&id).and_then(Entry::target)
    }

    pub fn contains(&self, id: CloneId) -> bool {
        self.entries.contains_key(&id)
    }

    /// Live IDs in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = CloneId> + '_ {
        self.entries.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// IDs whose target was dropped or left the stage.
    pub fn dead_ids(&self) -> Vec<CloneId> {
        self.entries
            .iter()
            .filter(|(_, entry)| !entry.is_alive())
            .map(|(id, _)| *id)
            .collect()
    }

    pub fn pool(&self) -> &FreeIdPool {
        &self.pool
    }

    /// Forgets every entry and resets the pool, as at the start of a run.
    ///
    /// Reachable targets forget their IDs too, so they can be assigned again.
    pub fn clear(&mut self) {
        for (id, entry) in std::mem::take(&mut self.entries) {
            if let Some(target) = entry.target.upgrade() {
                if target.clone_id() == Some(id) {
                    target.set_clone_id(None);
                }
            }
        }
        self.pool.reset();
    }
}

#[cfg(test)]
#[path = "tests/registry_tests.rs"]
mod tests;
