use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use clone_ids_core::{CloneId, CloneTarget, DisposeHooks};

/// Sprite or clone living on a [`TestStage`](crate::TestStage).
pub struct TestSprite {
    name: String,
    original: bool,
    clone_id: Cell<Option<CloneId>>,
    on_stage: Cell<bool>,
    x: Cell<f64>,
    y: Cell<f64>,
    direction: Cell<f64>,
    costume: Cell<usize>,
    size: Cell<f64>,
    hooks: DisposeHooks,
    teardowns: Cell<usize>,
}

impl TestSprite {
    pub(crate) fn original(name: &str) -> Rc<Self> {
        Rc::new(Self::blank(name, true))
    }

    /// A clone starts with the parent's position, heading, costume and size.
    pub(crate) fn clone_of(parent: &TestSprite) -> Rc<Self> {
        let sprite = Self::blank(&parent.name, false);
        sprite.x.set(parent.x.get());
        sprite.y.set(parent.y.get());
        sprite.direction.set(parent.direction.get());
        sprite.costume.set(parent.costume.get());
        sprite.size.set(parent.size.get());
        Rc::new(sprite)
    }

    fn blank(name: &str, original: bool) -> Self {
        Self {
            name: name.to_owned(),
            original,
            clone_id: Cell::new(None),
            on_stage: Cell::new(true),
            x: Cell::new(0.0),
            y: Cell::new(0.0),
            direction: Cell::new(90.0),
            costume: Cell::new(0),
            size: Cell::new(100.0),
            hooks: DisposeHooks::new(),
            teardowns: Cell::new(0),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn go_to(&self, x: f64, y: f64) {
        self.x.set(x);
        self.y.set(y);
    }

    pub fn point_in_direction(&self, degrees: f64) {
        self.direction.set(degrees);
    }

    /// Switches to the zero-based costume `index`.
    pub fn switch_costume(&self, index: usize) {
        self.costume.set(index);
    }

    pub fn set_size(&self, percent: f64) {
        self.size.set(percent);
    }

    /// How many times native teardown ran on this sprite.
    pub fn teardown_count(&self) -> usize {
        self.teardowns.get()
    }

    /// Native teardown: run dispose hooks, then detach from the stage.
    pub(crate) fn teardown(&self) {
        self.hooks.run();
        self.on_stage.set(false);
        self.teardowns.set(self.teardowns.get() + 1);
    }

    /// Detach without running hooks, as engine paths that bypass teardown do.
    pub(crate) fn detach(&self) {
        self.on_stage.set(false);
    }
}

impl CloneTarget for TestSprite {
    fn is_original(&self) -> bool {
        self.original
    }

    fn clone_id(&self) -> Option<CloneId> {
        self.clone_id.get()
    }

    fn set_clone_id(&self, id: Option<CloneId>) {
        self.clone_id.set(id);
    }

    fn is_on_stage(&self) -> bool {
        self.on_stage.get()
    }

    fn x(&self) -> f64 {
        self.x.get()
    }

    fn y(&self) -> f64 {
        self.y.get()
    }

    fn direction(&self) -> f64 {
        self.direction.get()
    }

    fn current_costume(&self) -> usize {
        self.costume.get()
    }

    fn size(&self) -> f64 {
        self.size.get()
    }

    fn dispose_hooks(&self) -> &DisposeHooks {
        &self.hooks
    }
}

impl fmt::Debug for TestSprite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestSprite")
            .field("name", &self.name)
            .field("original", &self.original)
            .field("clone_id", &self.clone_id.get())
            .field("on_stage", &self.on_stage.get())
            .finish()
    }
}
