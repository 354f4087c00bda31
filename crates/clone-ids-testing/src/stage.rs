use std::cell::{Cell, RefCell};
use std::rc::Rc;

use clone_ids_core::{CloneTarget, TargetHost};

use crate::TestSprite;

/// How the stage answers `dispose_target` requests.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum DisposeMode {
    /// Tear the target down before returning.
    #[default]
    Immediate,
    /// Queue the request until [`TestStage::flush_disposals`].
    Deferred,
}

/// In-memory host owning every sprite and clone.
///
/// The stage holds the only strong references to its sprites; removing one
/// from the stage drops it unless a test keeps its own handle.
#[derive(Default)]
pub struct TestStage {
    sprites: RefCell<Vec<Rc<TestSprite>>>,
    mode: Cell<DisposeMode>,
    pending: RefCell<Vec<Rc<TestSprite>>>,
    dispose_requests: Cell<usize>,
}

impl TestStage {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn with_mode(mode: DisposeMode) -> Rc<Self> {
        let stage = Self::default();
        stage.mode.set(mode);
        Rc::new(stage)
    }

    pub fn set_mode(&self, mode: DisposeMode) {
        self.mode.set(mode);
    }

    pub fn add_sprite(&self, name: &str) -> Rc<TestSprite> {
        let sprite = TestSprite::original(name);
        self.sprites.borrow_mut().push(Rc::clone(&sprite));
        sprite
    }

    /// Spawns a clone of `parent` onto the stage.
    pub fn create_clone(&self, parent: &TestSprite) -> Rc<TestSprite> {
        let clone = TestSprite::clone_of(parent);
        self.sprites.borrow_mut().push(Rc::clone(&clone));
        clone
    }

    /// "delete this clone": native teardown with dispose hooks.
    pub fn delete_clone(&self, clone: &TestSprite) {
        if clone.is_original() {
            return;
        }
        if let Some(sprite) = self.take(clone) {
            sprite.teardown();
        }
    }

    /// Removes `clone` without running its hooks, like engine paths that
    /// bypass teardown.
    pub fn remove_without_teardown(&self, clone: &TestSprite) {
        if let Some(sprite) = self.take(clone) {
            sprite.detach();
        }
    }

    /// Removes every clone without running hooks.
    pub fn clear_clones_without_teardown(&self) {
        let removed: Vec<_> = {
            let mut sprites = self.sprites.borrow_mut();
            let (clones, originals): (Vec<_>, Vec<_>) =
                sprites.drain(..).partition(|sprite| !sprite.is_original());
            *sprites = originals;
            clones
        };
        for clone in removed {
            clone.detach();
        }
    }

    /// Tears down every deferred dispose request.
    pub fn flush_disposals(&self) -> usize {
        let pending = std::mem::take(&mut *self.pending.borrow_mut());
        let count = pending.len();
        for sprite in pending {
            sprite.teardown();
        }
        count
    }

    pub fn clone_count(&self) -> usize {
        self.sprites
            .borrow()
            .iter()
            .filter(|sprite| !sprite.is_original())
            .count()
    }

    pub fn clones(&self) -> Vec<Rc<TestSprite>> {
        self.sprites
            .borrow()
            .iter()
            .filter(|sprite| !sprite.is_original())
            .cloned()
            .collect()
    }

    /// Total `dispose_target` calls received.
    pub fn dispose_requests(&self) -> usize {
        self.dispose_requests.get()
    }

    fn take(&self, sprite: &TestSprite) -> Option<Rc<TestSprite>> {
        let mut sprites = self.sprites.borrow_mut();
        let index = sprites
            .iter()
            .position(|candidate| std::ptr::eq(Rc::as_ptr(candidate), sprite))?;
        Some(sprites.remove(index))
    }

    fn take_target(&self, target: &Rc<dyn CloneTarget>) -> Option<Rc<TestSprite>> {
        let address = Rc::as_ptr(target) as *const ();
        let mut sprites = self.sprites.borrow_mut();
        let index = sprites
            .iter()
            .position(|candidate| Rc::as_ptr(candidate) as *const () == address)?;
        Some(sprites.remove(index))
    }
}

impl TargetHost for TestStage {
    fn dispose_target(&self, target: &Rc<dyn CloneTarget>) {
        self.dispose_requests.set(self.dispose_requests.get() + 1);
        let Some(sprite) = self.take_target(target) else {
            log::debug!("dispose requested for a target not on the stage");
            return;
        };
        match self.mode.get() {
            DisposeMode::Immediate => sprite.teardown(),
            DisposeMode::Deferred => self.pending.borrow_mut().push(sprite),
        }
    }
}
