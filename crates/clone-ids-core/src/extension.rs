//! Script-facing command and reporter surface.
//!
//! Every method here is total: unknown IDs, malformed arguments and refused
//! assignments turn into no-ops or zero values (`0`, `""`, `false`), so
//! scripts can call them unconditionally every frame.

use std::fmt;
use std::rc::Rc;

use crate::config::CloneIdsConfig;
use crate::dispose;
use crate::host::{CloneTarget, HostEvent, TargetHost, UnknownEvent};
use crate::info::{ExtensionInfo, EXTENSION_INFO};
use crate::registry::{AssignError, ReleaseCause};
use crate::session::SessionHandle;
use crate::sweeper::{sweep, SweepReport};
use crate::{CloneId, IdArgument};

/// Readable target fields offered by the `properties` menu.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TargetProperty {
    X,
    Y,
    Direction,
    /// One-based costume number.
    CostumeNumber,
    Size,
}

impl TargetProperty {
    pub const ALL: [TargetProperty; 5] = [
        TargetProperty::X,
        TargetProperty::Y,
        TargetProperty::Direction,
        TargetProperty::CostumeNumber,
        TargetProperty::Size,
    ];

    pub const MENU: [&'static str; 5] = ["x", "y", "direction", "costume number", "size"];

    pub fn menu_label(self) -> &'static str {
        match self {
            TargetProperty::X => "x",
            TargetProperty::Y => "y",
            TargetProperty::Direction => "direction",
            TargetProperty::CostumeNumber => "costume number",
            TargetProperty::Size => "size",
        }
    }

    pub fn from_menu(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|property| property.menu_label() == label)
    }

    pub fn read(self, target: &dyn CloneTarget) -> f64 {
        match self {
            TargetProperty::X => target.x(),
            TargetProperty::Y => target.y(),
            TargetProperty::Direction => target.direction(),
            TargetProperty::CostumeNumber => target.current_costume() as f64 + 1.0,
            TargetProperty::Size => target.size(),
        }
    }
}

impl fmt::Display for TargetProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.menu_label())
    }
}

/// One clone ID session bound to a host.
///
/// Construct it when the project loads and route the host's runtime events
/// into [`handle_event`](Self::handle_event).
pub struct CloneIds {
    session: SessionHandle,
    host: Rc<dyn TargetHost>,
    config: CloneIdsConfig,
}

impl CloneIds {
    pub fn new(host: Rc<dyn TargetHost>) -> Self {
        Self::with_config(host, CloneIdsConfig::default())
    }

    pub fn with_config(host: Rc<dyn TargetHost>, config: CloneIdsConfig) -> Self {
        Self {
            session: SessionHandle::new(&config),
            host,
            config,
        }
    }

    pub fn info() -> &'static ExtensionInfo {
        &EXTENSION_INFO
    }

    pub fn config(&self) -> &CloneIdsConfig {
        &self.config
    }

    // ===== commands =====

    /// Gives `caller` an ID unless it is the original sprite or already has one.
    ///
    /// Returns the ID `caller` holds afterwards.
    pub fn assign_clone_id(&self, caller: &Rc<dyn CloneTarget>) -> Option<CloneId> {
        match self.session.update(|state| state.registry.assign(caller)) {
            Ok(id) => {
                dispose::intercept(&self.session, caller, id);
                Some(id)
            }
            Err(AssignError::AlreadyAssigned(id)) => Some(id),
            Err(err @ AssignError::Original) => {
                log::trace!("assign ignored: {err}");
                None
            }
        }
    }

    /// Stores `value` under `key` in the caller's own data bag.
    ///
    /// A caller whose ID was already handed on writes nowhere.
    pub fn set_data(&self, caller: &dyn CloneTarget, key: &str, value: &str) {
        let Some(id) = caller.clone_id() else {
            log::trace!("set data `{key}` ignored: caller has no clone id");
            return;
        };
        self.session.update(|state| {
            if state.registry.is_held_by(id, caller) {
                state.registry.set_data(id, key, value);
            } else {
                log::trace!("set data `{key}` ignored: clone id {id} no longer held by caller");
            }
        });
    }

    /// Destroys the clone holding `id` and frees the ID immediately.
    pub fn delete_clone_by_id(&self, id: impl IdArgument) {
        let Some(id) = id.to_clone_id() else {
            return;
        };
        let (live, target) = self
            .session
            .with(|state| (state.registry.contains(id), state.registry.target(id)));
        if !live {
            return;
        }
        let Some(target) = target else {
            // Dropped by the host without teardown hooks; nothing left to destroy.
            self.session
                .update(|state| state.registry.release(id, ReleaseCause::Delete));
            return;
        };
        if target.is_original() {
            return;
        }
        // No borrow is held here: a synchronous host fires the dispose hook,
        // which takes its own.
        self.host.dispose_target(&target);
        let owner = Rc::downgrade(&target);
        self.session
            .update(|state| state.registry.release_owned(id, &owner, ReleaseCause::Delete));
    }

    // ===== reporters =====

    /// The caller's ID, or `0`.
    pub fn my_id(&self, caller: &dyn CloneTarget) -> u32 {
        caller.clone_id().map_or(0, CloneId::get)
    }

    /// Current value of `property` on the clone holding `id`, or `0`.
    pub fn property_of_id(&self, id: impl IdArgument, property: &str) -> f64 {
        let (Some(id), Some(property)) = (id.to_clone_id(), TargetProperty::from_menu(property))
        else {
            return 0.0;
        };
        self.session
            .with(|state| state.registry.target(id))
            .map_or(0.0, |target| property.read(&*target))
    }

    pub fn id_exists(&self, id: impl IdArgument) -> bool {
        id.to_clone_id()
            .is_some_and(|id| self.session.with(|state| state.registry.contains(id)))
    }

    /// Value stored under `key` for `id`, or `""`.
    pub fn data_of_id(&self, key: &str, id: impl IdArgument) -> String {
        let Some(id) = id.to_clone_id() else {
            return String::new();
        };
        self.session.with(|state| {
            state
                .registry
                .data(id, key)
                .map(str::to_owned)
                .unwrap_or_default()
        })
    }

    /// Live IDs encoded as `[1,2,3]`.
    pub fn all_ids(&self) -> String {
        let ids = self.live_ids();
        let joined = ids
            .iter()
            .map(CloneId::to_string)
            .collect::<Vec<_>>()
            .join(",");
        format!("[{joined}]")
    }

    /// Live IDs, ascending.
    pub fn live_ids(&self) -> Vec<CloneId> {
        self.session.with(|state| state.registry.ids().collect())
    }

    // ===== host events =====

    /// Routes one host event. Returns a report when the event ran a sweep.
    pub fn handle_event(&self, event: HostEvent) -> Option<SweepReport> {
        self.session.update(|state| state.on_event(event))
    }

    /// Like [`handle_event`](Self::handle_event) for hosts that dispatch by name.
    pub fn handle_event_named(&self, name: &str) -> Result<Option<SweepReport>, UnknownEvent> {
        let event = name.parse::<HostEvent>()?;
        Ok(self.handle_event(event))
    }

    /// Runs a reconciliation sweep outside the frame cadence.
    pub fn sweep_now(&self) -> SweepReport {
        self.session.update(|state| sweep(&mut state.registry))
    }

    /// Forgets every ID, as a stop event would.
    pub fn reset(&self) {
        self.session.update(|state| state.reset());
    }

    /// Number of released IDs waiting for reuse.
    pub fn free_id_count(&self) -> usize {
        self.session.with(|state| state.registry.pool().len_free())
    }
}

impl fmt::Debug for CloneIds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.session.with(|state| {
            f.debug_struct("CloneIds")
                .field("live", &state.registry.len())
                .field("free", &state.registry.pool().len_free())
                .field("config", &self.config)
                .finish()
        })
    }
}

#[cfg(test)]
#[path = "tests/extension_tests.rs"]
mod tests;
