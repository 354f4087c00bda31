//! Minimal in-crate host used by unit tests.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::{CloneId, CloneTarget, DisposeHooks, TargetHost};

#[derive(Default)]
pub(crate) struct MockTarget {
    pub(crate) original: bool,
    pub(crate) id: Cell<Option<CloneId>>,
    pub(crate) detached: Cell<bool>,
    pub(crate) x: Cell<f64>,
    pub(crate) y: Cell<f64>,
    pub(crate) costume: Cell<usize>,
    pub(crate) hooks: DisposeHooks,
    /// Runs once, the next time the stage asks whether this target is on it.
    pub(crate) on_stage_check: RefCell<Option<Box<dyn FnOnce()>>>,
}

impl MockTarget {
    pub(crate) fn clone_target() -> Rc<dyn CloneTarget> {
        Rc::new(Self::default())
    }

    pub(crate) fn original() -> Rc<dyn CloneTarget> {
        Rc::new(Self {
            original: true,
            ..Self::default()
        })
    }

    pub(crate) fn at(x: f64, y: f64) -> Rc<MockTarget> {
        let target = Self::default();
        target.x.set(x);
        target.y.set(y);
        Rc::new(target)
    }

    /// Native teardown: dispose hooks first, then leave the stage.
    pub(crate) fn dispose(&self) {
        self.hooks.run();
        self.detached.set(true);
    }
}

impl CloneTarget for MockTarget {
    fn is_original(&self) -> bool {
        self.original
    }

    fn clone_id(&self) -> Option<CloneId> {
        self.id.get()
    }

    fn set_clone_id(&self, id: Option<CloneId>) {
        self.id.set(id);
    }

    fn is_on_stage(&self) -> bool {
        if let Some(callback) = self.on_stage_check.take() {
            callback();
        }
        !self.detached.get()
    }

    fn x(&self) -> f64 {
        self.x.get()
    }

    fn y(&self) -> f64 {
        self.y.get()
    }

    fn direction(&self) -> f64 {
        90.0
    }

    fn current_costume(&self) -> usize {
        self.costume.get()
    }

    fn size(&self) -> f64 {
        100.0
    }

    fn dispose_hooks(&self) -> &DisposeHooks {
        &self.hooks
    }
}

/// Host that either tears targets down on request or only records requests.
#[derive(Default)]
pub(crate) struct MockHost {
    pub(crate) deferred: bool,
    pub(crate) requests: RefCell<Vec<Rc<dyn CloneTarget>>>,
}

impl MockHost {
    pub(crate) fn deferred() -> Rc<Self> {
        Rc::new(Self {
            deferred: true,
            ..Self::default()
        })
    }

    /// Tears down every deferred request.
    pub(crate) fn flush(&self) {
        let pending = std::mem::take(&mut *self.requests.borrow_mut());
        for target in pending {
            target.dispose_hooks().run();
        }
    }
}

impl TargetHost for MockHost {
    fn dispose_target(&self, target: &Rc<dyn CloneTarget>) {
        if self.deferred {
            self.requests.borrow_mut().push(Rc::clone(target));
        } else {
            target.dispose_hooks().run();
        }
    }
}
