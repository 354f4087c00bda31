#![doc = r"Stable, recycled integer IDs for sprite clones, with per-clone data."]

pub mod clone_id;
pub mod collections;
pub mod config;
pub mod dispose;
pub mod extension;
pub mod free_pool;
pub mod host;
pub mod info;
pub mod registry;
mod session;
pub mod sweeper;

pub use clone_id::{CloneId, IdArgument};
pub use collections::DataBag;
pub use config::CloneIdsConfig;
pub use dispose::{DisposeHook, DisposeHooks};
pub use extension::{CloneIds, TargetProperty};
pub use free_pool::FreeIdPool;
pub use host::{CloneTarget, HostEvent, TargetHost, UnknownEvent};
pub use info::{ArgumentInfo, ArgumentType, BlockInfo, BlockType, ExtensionInfo, MenuInfo};
pub use registry::{AssignError, Entry, Registry, ReleaseCause};
pub use sweeper::{sweep, SweepReport, Sweeper};

#[cfg(test)]
#[path = "tests/support.rs"]
pub(crate) mod test_support;
