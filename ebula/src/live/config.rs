//! Controller tuning.

use std::time::Duration;

/// Default real-time interval between ticks.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Default simulated seconds added per tick.
pub const DEFAULT_TICK_STEP_SECS: i64 = 1;

/// Configuration for [`LiveTrackingController`](super::LiveTrackingController).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerConfig {
    /// Real time between two ticks.
    pub tick_interval: Duration,
    /// Simulated seconds each tick advances the clock by.
    pub tick_step_secs: i64,
    /// Initial value of the auto-scroll hint.
    pub auto_scroll: bool,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            tick_interval: DEFAULT_TICK_INTERVAL,
            tick_step_secs: DEFAULT_TICK_STEP_SECS,
            auto_scroll: true,
        }
    }
}
