/// Tunables for a [`CloneIds`](crate::CloneIds) session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloneIdsConfig {
    /// Frames between reconciliation sweeps.
    pub sweep_interval: u32,
}

impl CloneIdsConfig {
    pub const DEFAULT_SWEEP_INTERVAL: u32 = 5;

    pub fn new() -> Self {
        Self::default()
    }

    /// Zero is raised to one, the interval the sweeper actually runs at.
    pub fn with_sweep_interval(mut self, frames: u32) -> Self {
        self.sweep_interval = frames.max(1);
        self
    }
}

impl Default for CloneIdsConfig {
    fn default() -> Self {
        Self {
            sweep_interval: Self::DEFAULT_SWEEP_INTERVAL,
        }
    }
}
