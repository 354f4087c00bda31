//! Per-run state shared by the command surface and the dispose hooks.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::config::CloneIdsConfig;
use crate::host::HostEvent;
use crate::registry::Registry;
use crate::sweeper::{sweep, SweepReport, Sweeper};

pub(crate) struct SessionState {
    pub(crate) registry: Registry,
    pub(crate) sweeper: Sweeper,
}

impl SessionState {
    fn new(config: &CloneIdsConfig) -> Self {
        Self {
            registry: Registry::new(),
            sweeper: Sweeper::new(config.sweep_interval),
        }
    }

    /// Drops every ID and data bag and restarts numbering at 1.
    pub(crate) fn reset(&mut self) {
        let dropped = self.registry.len();
        self.registry.clear();
        self.sweeper.reset();
        log::debug!("clone id session reset; dropped {dropped} live ids");
    }

    /// Reacts to one host event. Returns the sweep report on cadence ticks.
    pub(crate) fn on_event(&mut self, event: HostEvent) -> Option<SweepReport> {
        match event {
            HostEvent::ProjectStopAll | HostEvent::ProjectStopOther => {
                self.reset();
                None
            }
            HostEvent::ProjectUpdate => {
                if self.sweeper.tick() {
                    Some(sweep(&mut self.registry))
                } else {
                    None
                }
            }
        }
    }
}

/// Single-threaded owner of the session state.
///
/// Dispose hooks hold the [`Weak`] side so a dropped session never keeps
/// itself alive through the targets it tracked.
#[derive(Clone)]
pub(crate) struct SessionHandle {
    inner: Rc<RefCell<SessionState>>,
}

impl SessionHandle {
    pub(crate) fn new(config: &CloneIdsConfig) -> Self {
        Self {
            inner: Rc::new(RefCell::new(SessionState::new(config))),
        }
    }

    /// Run `f` with an immutable reference to the state.
    pub(crate) fn with<R>(&self, f: impl FnOnce(&SessionState) -> R) -> R {
        let borrow = self.inner.borrow();
        f(&borrow)
    }

    /// Run `f` with a mutable reference to the state.
    pub(crate) fn update<R>(&self, f: impl FnOnce(&mut SessionState) -> R) -> R {
        let mut borrow = self.inner.borrow_mut();
        f(&mut borrow)
    }

    pub(crate) fn downgrade(&self) -> Weak<RefCell<SessionState>> {
        Rc::downgrade(&self.inner)
    }
}
