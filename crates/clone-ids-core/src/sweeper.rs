//! Periodic reconciliation of the registry against the stage.
//!
//! Some engine paths destroy clones without running their dispose hooks.
//! Every few frames the sweeper checks each live entry's weak target and
//! reclaims the IDs of targets that were dropped or left the stage. The
//! targets' own teardown is never invoked from here.

use crate::registry::{Registry, ReleaseCause};
use crate::CloneId;

/// Frame counter deciding which ticks run a sweep.
#[derive(Debug, Clone)]
pub struct Sweeper {
    interval: u32,
    ticks: u64,
}

impl Sweeper {
    /// An `interval` of zero is treated as one (sweep every tick).
    pub fn new(interval: u32) -> Self {
        Self {
            interval: interval.max(1),
            ticks: 0,
        }
    }

    /// Counts one frame. Returns `true` when this frame should sweep.
    pub fn tick(&mut self) -> bool {
        self.ticks = self.ticks.wrapping_add(1);
        self.ticks % u64::from(self.interval) == 0
    }

    pub fn reset(&mut self) {
        self.ticks = 0;
    }

    pub fn interval(&self) -> u32 {
        self.interval
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

/// Outcome of one sweep.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Live entries inspected.
    pub scanned: usize,
    /// IDs returned to the pool, ascending.
    pub reclaimed: Vec<CloneId>,
}

impl SweepReport {
    pub fn is_clean(&self) -> bool {
        self.reclaimed.is_empty()
    }
}

/// Releases every entry whose target is gone.
pub fn sweep(registry: &mut Registry) -> SweepReport {
    let scanned = registry.len();
    let reclaimed = registry.dead_ids();
    for id in &reclaimed {
        registry.release(*id, ReleaseCause::Sweep);
    }
    if !reclaimed.is_empty() {
        log::debug!(
            "sweep reclaimed {} of {} clone ids: {:?}",
            reclaimed.len(),
            scanned,
            reclaimed
        );
    }
    SweepReport { scanned, reclaimed }
}

#[cfg(test)]
#[path = "tests/sweeper_tests.rs"]
mod tests;
