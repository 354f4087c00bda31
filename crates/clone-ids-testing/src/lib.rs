//! Testing utilities and harness for clone IDs

pub mod rule;
pub mod sprite;
pub mod stage;

pub use rule::{as_target, CloneIdsTestRule};
pub use sprite::TestSprite;
pub use stage::{DisposeMode, TestStage};
