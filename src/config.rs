//! # config.rs – Centralized Parameter Store
//!
//! This module holds all static program parameters used throughout the simulator,
//! together with [SimConfig], the record a controller is constructed from.
//! Keeping configuration in one place makes tuning, experimentation, and testing easier.

use std::sync::Mutex;
use std::time::Duration;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

//
// ──────────────────────────────────────────────────────────────
//   1. ELEVATOR PARAMETERS
// ──────────────────────────────────────────────────────────────
//

/// Default number of floors in the shaft
pub const DEFAULT_FLOOR_COUNT: u8 = 6;

/// Lowest floor count the controller accepts. Smaller values are clamped up.
pub const MIN_FLOOR_COUNT: u8 = 2;

/// Default car speed, in floors per second
pub const DEFAULT_SPEED_FPS: f64 = 1.0;

/// Distance (in floors) at which the car counts as arrived at its target
pub const ARRIVAL_EPSILON: f64 = 1e-3;

//
// ──────────────────────────────────────────────────────────────
//   2. DOOR TIMING
// ──────────────────────────────────────────────────────────────
//

/// Seconds the door spends in `Opening`
pub const DEFAULT_DOOR_OPEN_TIME: f64 = 0.6;

/// Seconds the door spends in `Closing`
pub const DEFAULT_DOOR_CLOSE_TIME: f64 = 0.6;

/// Seconds the door stays fully `Open` before it starts closing
pub const DEFAULT_DWELL_TIME: f64 = 1.5;

//
// ──────────────────────────────────────────────────────────────
//   3. RUNNER
// ──────────────────────────────────────────────────────────────
//

/// Tick cadence of the terminal driver (~30 fps)
pub const TICK_PERIOD: Duration = Duration::from_millis(33);

/// Capacity of the command channel between stdin reader and tick loop
pub const COMMAND_CHANNEL_SIZE: usize = 100;

//
// ──────────────────────────────────────────────────────────────
//   4. LOGGING CONFIGURATION
// ──────────────────────────────────────────────────────────────
//

/// Enable/disable printing of errors
pub static PRINT_ERR_ON: Lazy<Mutex<bool>> = Lazy::new(|| Mutex::new(true));

/// Enable/disable printing of warnings
pub static PRINT_WARN_ON: Lazy<Mutex<bool>> = Lazy::new(|| Mutex::new(true));

/// Enable/disable printing of success messages
pub static PRINT_OK_ON: Lazy<Mutex<bool>> = Lazy::new(|| Mutex::new(true));

/// Enable/disable printing of general info
pub static PRINT_INFO_ON: Lazy<Mutex<bool>> = Lazy::new(|| Mutex::new(true));

/// Enable/disable printing of drained controller events
pub static PRINT_EVENT_ON: Lazy<Mutex<bool>> = Lazy::new(|| Mutex::new(true));

/// Enable/disable printing of the status table
pub static PRINT_STATUS_ON: Lazy<Mutex<bool>> = Lazy::new(|| Mutex::new(true));


/// Construction parameters for an [ElevatorController](crate::elevator_logic::controller::ElevatorController).
///
/// Every field has a default, so a JSON config file only needs to name the values it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Number of floors. Clamped to at least [MIN_FLOOR_COUNT].
    /// Default: [DEFAULT_FLOOR_COUNT]
    pub floor_count: u8,

    /// Floors traversed per second.
    /// Default: [DEFAULT_SPEED_FPS]
    pub speed_fps: f64,

    /// Duration of the `Opening` phase.
    /// Default: [DEFAULT_DOOR_OPEN_TIME]
    pub door_open_time: f64,

    /// Duration of the `Closing` phase.
    /// Default: [DEFAULT_DOOR_CLOSE_TIME]
    pub door_close_time: f64,

    /// How long the door stays `Open`.
    /// Default: [DEFAULT_DWELL_TIME]
    pub dwell_time: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            floor_count: DEFAULT_FLOOR_COUNT,
            speed_fps: DEFAULT_SPEED_FPS,
            door_open_time: DEFAULT_DOOR_OPEN_TIME,
            door_close_time: DEFAULT_DOOR_CLOSE_TIME,
            dwell_time: DEFAULT_DWELL_TIME,
        }
    }
}

/// Reads a print toggle. A poisoned lock counts as enabled.
pub fn print_enabled(flag: &Mutex<bool>) -> bool {
    flag.lock().map(|on| *on).unwrap_or(true)
}

/// Sets a print toggle.
pub fn set_print(flag: &Mutex<bool>, on: bool) {
    if let Ok(mut guard) = flag.lock() {
        *guard = on;
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg: SimConfig = serde_json::from_str(r#"{ "floor_count": 10, "dwell_time": 3.0 }"#).unwrap();
        assert_eq!(cfg.floor_count, 10);
        assert_eq!(cfg.dwell_time, 3.0);
        assert_eq!(cfg.speed_fps, DEFAULT_SPEED_FPS);
        assert_eq!(cfg.door_open_time, DEFAULT_DOOR_OPEN_TIME);
    }
}
