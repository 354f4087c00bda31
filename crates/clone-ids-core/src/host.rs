//! Host abstraction traits for the clone ID runtime.
//!
//! The scripting engine owns sprites, their clones and the frame loop. These
//! traits are the only things the runtime needs from it, which keeps the
//! registry independent of any particular engine's object model.
//!
//! Note: nothing here requires `Send + Sync`. Scripts run on a single
//! execution thread and the runtime is built on `Rc`/`RefCell`.

use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use crate::dispose::DisposeHooks;
use crate::CloneId;

/// A sprite or clone owned by the host.
///
/// The runtime only ever keeps a `Weak` reference to a target. Liveness is
/// decided by whether that reference still upgrades and whether the target
/// reports itself as attached to the stage.
pub trait CloneTarget: 'static {
    /// `true` for the template sprite clones are spawned from.
    fn is_original(&self) -> bool;

    /// The ID this target remembers for itself, if any.
    fn clone_id(&self) -> Option<CloneId>;

    /// Stores (or clears) the ID this target remembers for itself.
    fn set_clone_id(&self, id: Option<CloneId>);

    /// Whether the target is still attached to the running stage.
    fn is_on_stage(&self) -> bool;

    fn x(&self) -> f64;

    fn y(&self) -> f64;

    fn direction(&self) -> f64;

    /// Zero-based index of the current costume.
    fn current_costume(&self) -> usize;

    /// Size in percent.
    fn size(&self) -> f64;

    /// Callbacks the host runs at the start of the target's teardown, before
    /// its own teardown logic.
    fn dispose_hooks(&self) -> &DisposeHooks;
}

/// Services the runtime requests from the host.
pub trait TargetHost: 'static {
    /// Request that the host destroy `target`.
    ///
    /// Hosts are free to do this synchronously or defer it. Either way the
    /// target's [`DisposeHooks`] must run before its teardown completes.
    fn dispose_target(&self, target: &Rc<dyn CloneTarget>);
}

/// Runtime events the clone ID session listens to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum HostEvent {
    /// The green-flag run was stopped.
    ProjectStopAll,
    /// "stop other scripts" ended the run of every other script.
    ProjectStopOther,
    /// One frame tick.
    ProjectUpdate,
}

impl HostEvent {
    pub fn name(self) -> &'static str {
        match self {
            HostEvent::ProjectStopAll => "PROJECT_STOP_ALL",
            HostEvent::ProjectStopOther => "PROJECT_STOP_OTHER",
            HostEvent::ProjectUpdate => "PROJECT_UPDATE",
        }
    }

    /// Whether this event ends the current session.
    pub fn ends_session(self) -> bool {
        matches!(self, HostEvent::ProjectStopAll | HostEvent::ProjectStopOther)
    }
}

impl fmt::Display for HostEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An event name the runtime does not listen to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownEvent(pub String);

impl fmt::Display for UnknownEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown host event `{}`", self.0)
    }
}

impl std::error::Error for UnknownEvent {}

impl FromStr for HostEvent {
    type Err = UnknownEvent;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "PROJECT_STOP_ALL" => Ok(HostEvent::ProjectStopAll),
            "PROJECT_STOP_OTHER" => Ok(HostEvent::ProjectStopOther),
            "PROJECT_UPDATE" => Ok(HostEvent::ProjectUpdate),
            other => Err(UnknownEvent(other.to_owned())),
        }
    }
}
