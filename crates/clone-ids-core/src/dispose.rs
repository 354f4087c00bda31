//! Teardown interception.
//!
//! Hosts give every target a [`DisposeHooks`] list and run it at the start of
//! the target's teardown. Assigning a clone ID registers one hook that hands
//! the ID back before the teardown continues, whichever path destroyed the
//! target.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use smallvec::SmallVec;

use crate::host::CloneTarget;
use crate::registry::ReleaseCause;
use crate::session::SessionHandle;
use crate::CloneId;

pub type DisposeHook = Box<dyn FnOnce() + 'static>;

/// Host-owned list of callbacks run once when a target is torn down.
#[derive(Default)]
pub struct DisposeHooks {
    hooks: RefCell<SmallVec<[DisposeHook; 2]>>,
}

impl DisposeHooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `hook`. Hooks already registered are kept and run first.
    pub fn register(&self, hook: impl FnOnce() + 'static) {
        self.hooks.borrow_mut().push(Box::new(hook));
    }

    pub fn len(&self) -> usize {
        self.hooks.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.borrow().is_empty()
    }

    /// Runs and drops every registered hook in registration order.
    ///
    /// Hooks registered while running are kept for the next call.
    pub fn run(&self) {
        let hooks = std::mem::take(&mut *self.hooks.borrow_mut());
        for hook in hooks {
            hook();
        }
    }
}

impl fmt::Debug for DisposeHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DisposeHooks")
            .field("hook_count", &self.len())
            .finish()
    }
}

/// Registers the hook that releases `id` when `target` is torn down.
pub(crate) fn intercept(session: &SessionHandle, target: &Rc<dyn CloneTarget>, id: CloneId) {
    let session = session.downgrade();
    let owner = Rc::downgrade(target);
    target.dispose_hooks().register(move || {
        let Some(session) = session.upgrade() else {
            return;
        };
        let Ok(mut state) = session.try_borrow_mut() else {
            // Disposed re-entrantly from inside a session operation; the
            // sweeper picks the entry up once the target leaves the stage.
            log::debug!("clone id {id} disposed during a session borrow; deferring to sweep");
            return;
        };
        state
            .registry
            .release_owned(id, &owner, ReleaseCause::Dispose);
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn hooks_run_in_registration_order_once() {
        let hooks = DisposeHooks::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        for label in ["first", "second"] {
            let log = Rc::clone(&log);
            hooks.register(move || log.borrow_mut().push(label));
        }
        assert_eq!(hooks.len(), 2);

        hooks.run();
        hooks.run();
        assert_eq!(*log.borrow(), vec!["first", "second"]);
        assert!(hooks.is_empty());
    }

    #[test]
    fn hooks_registered_while_running_wait_for_next_run() {
        let hooks = Rc::new(DisposeHooks::new());
        let count = Rc::new(Cell::new(0));
        {
            let inner_hooks = Rc::clone(&hooks);
            let count = Rc::clone(&count);
            hooks.register(move || {
                count.set(count.get() + 1);
                let count = Rc::clone(&count);
                inner_hooks.register(move || count.set(count.get() + 10));
            });
        }
        hooks.run();
        assert_eq!(count.get(), 1);
        assert_eq!(hooks.len(), 1);
        hooks.run();
        assert_eq!(count.get(), 11);
    }
}
