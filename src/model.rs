//! Value types describing the car: [Direction], [DoorState] and [ElevatorState].
//!
//! No behaviour lives here. All mutation goes through the
//! [ElevatorController](crate::elevator_logic::controller::ElevatorController).

use std::fmt;
use serde::{Serialize, Deserialize};
use crate::config;


#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Direction the car is travelling, or `Idle` when it is not heading anywhere.
pub enum Direction {
    Up,
    Down,
    Idle,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Direction::Up => "Up",
            Direction::Down => "Down",
            Direction::Idle => "Idle",
        };
        f.write_str(text)
    }
}

#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Door phase. Cycles Closed -> Opening -> Open -> Closing -> Closed.
pub enum DoorState {
    Closed,
    Opening,
    Open,
    Closing,
}

impl fmt::Display for DoorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            DoorState::Closed => "Closed",
            DoorState::Opening => "Opening",
            DoorState::Open => "Open",
            DoorState::Closing => "Closing",
        };
        f.write_str(text)
    }
}


/// Physical state of the car.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElevatorState {
    /// Continuous vertical position, in floor units. Always within `[1, floor_count]`.
    /// Default: 1.0
    pub current_floor: f64,

    /// [Direction]
    /// Default: [Direction::Idle]
    pub direction: Direction,

    /// [DoorState]
    /// Default: [DoorState::Closed]
    pub door_state: DoorState,

    /// Floors traversed per second.
    /// Default: [config::DEFAULT_SPEED_FPS]
    pub speed_fps: f64,

    /// The floor currently being approached. Cleared on arrival or when nothing is pending.
    /// Default: None
    pub target_floor: Option<u8>,
}

impl Default for ElevatorState {
    fn default() -> Self {
        Self {
            current_floor: 1.0,
            direction: Direction::Idle,
            door_state: DoorState::Closed,
            speed_fps: config::DEFAULT_SPEED_FPS,
            target_floor: None,
        }
    }
}

impl ElevatorState {
    /// Fresh state at floor 1 with the given speed.
    pub fn with_speed(speed_fps: f64) -> Self {
        Self { speed_fps, ..Self::default() }
    }

    /// Nearest whole floor to the current position.
    pub fn nearest_floor(&self) -> u8 {
        self.current_floor.round() as u8
    }
}


/// Read-only view of a controller, published by the runner after every tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Number of floors currently configured.
    pub floor_count: u8,

    /// Copy of the car state.
    pub state: ElevatorState,

    /// Pending floors in the active scheduler's order.
    pub pending: Vec<u8>,

    /// Whether the emergency stop is engaged.
    pub emergency_stop: bool,

    /// Display name of the active scheduler.
    pub scheduler: String,

    /// Whether the runner is currently feeding ticks to the controller.
    pub running: bool,
}
