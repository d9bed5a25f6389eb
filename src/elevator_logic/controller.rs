//! # Elevator controller
//!
//! [ElevatorController] owns the car state, the active [Scheduler] and the event buffer.
//! It is the only thing that mutates them.
//!
//! ## Overview
//! - **Commands** (`add_request`, `request_open_door`, `request_close_door`, ...) validate
//!   their input and return `false` when rejected. A rejected command changes nothing and
//!   emits nothing.
//! - **Ticks** (`update(dt)`) advance the door countdown first and only move the car while
//!   the door is fully closed. Motion is clamped so the car never overshoots its target.
//! - **Events** pile up in an [EventLog] until [ElevatorController::consume_events] drains them.
//!
//! While the emergency stop is engaged, `update` does nothing at all, which freezes both
//! position and door countdown.
//!
//! ## Example
//! ```rust
//! use elevatorsim::config::SimConfig;
//! use elevatorsim::elevator_logic::controller::ElevatorController;
//! use elevatorsim::elevator_logic::scheduler::Scheduler;
//!
//! let mut ctrl = ElevatorController::new(SimConfig::default(), Scheduler::default());
//! assert!(ctrl.add_request(3));
//! for _ in 0..100 {
//!     ctrl.update(0.033);
//! }
//! assert_eq!(ctrl.state().current_floor, 3.0);
//! ```

use crate::config::{self, SimConfig};
use crate::events::{Event, EventLog};
use crate::model::{Direction, DoorState, ElevatorState, Snapshot};
use crate::print;

use super::scheduler::Scheduler;
use super::timer::{self, Timer};


/// Single-car dispatch and motion engine.
#[derive(Debug)]
pub struct ElevatorController {
    pub(super) config: SimConfig,
    pub(super) state: ElevatorState,
    pub(super) scheduler: Scheduler,
    pub(super) door_timer: Timer,
    emergency_stop: bool,
    events: EventLog,
}

impl Default for ElevatorController {
    fn default() -> Self {
        Self::new(SimConfig::default(), Scheduler::default())
    }
}

impl ElevatorController {
    /// Creates a controller with the car idle at floor 1, door closed.
    ///
    /// `config.floor_count` below [config::MIN_FLOOR_COUNT] is clamped up.
    pub fn new(mut config: SimConfig, scheduler: Scheduler) -> Self {
        config.floor_count = config.floor_count.max(config::MIN_FLOOR_COUNT);
        let state = ElevatorState::with_speed(config.speed_fps);
        Self {
            config,
            state,
            scheduler,
            door_timer: timer::new(),
            emergency_stop: false,
            events: EventLog::new(),
        }
    }

    /// Number of floors.
    pub fn floor_count(&self) -> u8 {
        self.config.floor_count
    }

    /// Current car state.
    pub fn state(&self) -> &ElevatorState {
        &self.state
    }

    /// Whether the emergency stop is engaged.
    pub fn emergency_stop(&self) -> bool {
        self.emergency_stop
    }

    /// Display name of the active scheduler.
    pub fn scheduler_name(&self) -> &'static str {
        self.scheduler.name()
    }

    /// The parameters this controller runs with.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Pending floors, in the active scheduler's order.
    pub fn pending_requests(&self) -> Vec<u8> {
        self.scheduler.pending_requests()
    }

    /// Read-only copy of everything a display needs.
    pub fn snapshot(&self, running: bool) -> Snapshot {
        Snapshot {
            floor_count: self.config.floor_count,
            state: self.state.clone(),
            pending: self.pending_requests(),
            emergency_stop: self.emergency_stop,
            scheduler: self.scheduler_name().to_string(),
            running,
        }
    }

    /// Changes the number of floors (at least [config::MIN_FLOOR_COUNT]).
    ///
    /// Calls above the new top floor are discarded, the rest are re-added in the order the
    /// scheduler reported them.
    ///
    /// A car standing above the new top floor is moved down onto it whatever the door phase.
    /// This is the only position change outside `update`. The door is shut on the spot
    /// (emitting `DoorClosed` if it was not already closed) so the car never stands open at
    /// a floor it did not arrive at.
    pub fn set_floor_count(&mut self, floor_count: u8) {
        let floor_count = floor_count.max(config::MIN_FLOOR_COUNT);
        self.config.floor_count = floor_count;

        let valid: Vec<u8> = self
            .scheduler
            .pending_requests()
            .into_iter()
            .filter(|&f| f >= 1 && f <= floor_count)
            .collect();
        self.scheduler.clear();
        for floor in valid {
            self.scheduler.add_request(floor);
        }

        let top = floor_count as f64;
        if self.state.current_floor > top {
            self.state.current_floor = top;
            self.door_timer.timer_stop();
            if self.state.door_state != DoorState::Closed {
                self.state.door_state = DoorState::Closed;
                self.emit(Event::DoorClosed(floor_count));
            }
        }
        if self.state.target_floor.is_some_and(|f| f > floor_count) {
            self.state.target_floor = None;
        }
        print::info(format!("Floor count set to {}", floor_count));
    }

    /// Installs a new dispatch policy and hands it every pending call, in the old
    /// policy's order.
    pub fn set_scheduler(&mut self, scheduler: Scheduler) {
        let pending = self.scheduler.pending_requests();
        self.scheduler = scheduler;
        for floor in pending {
            self.scheduler.add_request(floor);
        }
        print::info(format!("Scheduler set to {}", self.scheduler.name()));
    }

    /// Back to floor 1, door closed, no calls, emergency cleared. Speed is kept.
    pub fn reset(&mut self) {
        self.scheduler.clear();
        self.state = ElevatorState::with_speed(self.state.speed_fps);
        self.door_timer.timer_stop();
        self.emergency_stop = false;
        print::info("Simulation reset".to_string());
    }

    /// Registers a call for `floor`. Rejected if it is outside `[1, floor_count]`.
    pub fn add_request(&mut self, floor: u8) -> bool {
        if floor < 1 || floor > self.config.floor_count {
            return false;
        }
        self.scheduler.add_request(floor);
        self.emit(Event::RequestAdded(floor));
        true
    }

    /// Asks the door to open.
    ///
    /// - `Open`: restarts the dwell countdown (accepted, no event).
    /// - `Closed`/`Closing` with the car idle: starts opening.
    /// - `Closed`/`Closing` while travelling, `Opening`, or emergency: rejected.
    pub fn request_open_door(&mut self) -> bool {
        if self.emergency_stop {
            return false;
        }
        match self.state.door_state {
            DoorState::Open => {
                self.door_timer.timer_start(self.config.dwell_time);
                true
            }
            DoorState::Closed | DoorState::Closing => {
                if self.state.direction != Direction::Idle {
                    return false;
                }
                self.state.door_state = DoorState::Opening;
                self.door_timer.timer_start(self.config.door_open_time);
                true
            }
            // Opening has no branch of its own
            DoorState::Opening => false,
        }
    }

    /// Asks the door to close. Only accepted from `Open` or `Opening`, and not during emergency.
    pub fn request_close_door(&mut self) -> bool {
        if self.emergency_stop {
            return false;
        }
        match self.state.door_state {
            DoorState::Open | DoorState::Opening => {
                self.state.door_state = DoorState::Closing;
                self.door_timer.timer_start(self.config.door_close_time);
                true
            }
            DoorState::Closed | DoorState::Closing => false,
        }
    }

    /// Engages or clears the emergency stop. Does nothing if already in that state.
    pub fn set_emergency_stop(&mut self, active: bool) {
        if self.emergency_stop == active {
            return;
        }
        self.emergency_stop = active;
        if active {
            self.set_direction(Direction::Idle);
        }
        self.emit(Event::EmergencyStop(active));
    }

    /// Advances the simulation by `dt` seconds.
    ///
    /// Does nothing for `dt <= 0` or while the emergency stop is engaged.
    pub fn update(&mut self, dt: f64) {
        if dt <= 0.0 || self.emergency_stop {
            return;
        }

        self.on_door_tick(dt);
        if self.state.door_state != DoorState::Closed {
            return;
        }

        let Some(stop) = self.scheduler.next_stop(self.state.current_floor, self.state.direction) else {
            self.set_direction(Direction::Idle);
            self.state.target_floor = None;
            return;
        };

        self.state.target_floor = Some(stop.floor);
        if stop.direction != Direction::Idle {
            self.set_direction(stop.direction);
        }

        let target = stop.floor as f64;
        if (self.state.current_floor - target).abs() < config::ARRIVAL_EPSILON {
            self.on_floor_arrival(stop.floor);
            return;
        }

        let step = self.state.speed_fps * dt;
        if self.state.current_floor < target {
            self.state.current_floor = (self.state.current_floor + step).min(target);
            self.set_direction(Direction::Up);
        } else if self.state.current_floor > target {
            self.state.current_floor = (self.state.current_floor - step).max(target);
            self.set_direction(Direction::Down);
        }

        if (self.state.current_floor - target).abs() < config::ARRIVAL_EPSILON {
            self.on_floor_arrival(stop.floor);
        }
    }

    /// Returns every event emitted since the last call, oldest first.
    pub fn consume_events(&mut self) -> Vec<Event> {
        self.events.drain()
    }

    pub(super) fn set_direction(&mut self, direction: Direction) {
        if self.state.direction != direction {
            self.state.direction = direction;
            self.emit(Event::DirectionChanged(direction));
        }
    }

    pub(super) fn emit(&mut self, event: Event) {
        self.events.push(event);
    }
}
