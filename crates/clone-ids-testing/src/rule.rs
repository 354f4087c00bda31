use std::rc::Rc;

use clone_ids_core::{CloneIds, CloneIdsConfig, CloneTarget, HostEvent, SweepReport};

use crate::{TestSprite, TestStage};

/// Headless harness pairing a [`TestStage`] with a clone ID session.
///
/// Mirrors how an engine drives the extension: scripts call the surface on
/// behalf of a sprite, and the frame loop feeds `PROJECT_UPDATE` ticks.
pub struct CloneIdsTestRule {
    stage: Rc<TestStage>,
    ids: CloneIds,
    frames: u64,
}

impl CloneIdsTestRule {
    pub fn new() -> Self {
        Self::with_stage(TestStage::new(), CloneIdsConfig::default())
    }

    pub fn with_stage(stage: Rc<TestStage>, config: CloneIdsConfig) -> Self {
        let ids = CloneIds::with_config(stage.clone(), config);
        Self {
            stage,
            ids,
            frames: 0,
        }
    }

    pub fn stage(&self) -> &TestStage {
        &self.stage
    }

    pub fn ids(&self) -> &CloneIds {
        &self.ids
    }

    /// Spawns a clone of `parent` and runs "assign ID to this clone" on it.
    pub fn spawn_with_id(&self, parent: &TestSprite) -> Rc<TestSprite> {
        let clone = self.stage.create_clone(parent);
        self.ids.assign_clone_id(&as_target(&clone));
        clone
    }

    /// Delivers `count` frame ticks and collects the sweeps they ran.
    pub fn advance_frames(&mut self, count: usize) -> Vec<SweepReport> {
        let mut reports = Vec::new();
        for _ in 0..count {
            self.frames += 1;
            if let Some(report) = self.ids.handle_event(HostEvent::ProjectUpdate) {
                reports.push(report);
            }
        }
        reports
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Presses the stop sign.
    pub fn stop_all(&self) {
        self.ids.handle_event(HostEvent::ProjectStopAll);
    }
}

impl Default for CloneIdsTestRule {
    fn default() -> Self {
        Self::new()
    }
}

/// The sprite as the trait object the surface expects.
pub fn as_target(sprite: &Rc<TestSprite>) -> Rc<dyn CloneTarget> {
    sprite.clone()
}
