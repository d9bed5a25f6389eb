//! Door sub-machine and floor arrival, the two places where the controller changes
//! door phase on its own.

use crate::events::Event;
use crate::model::{Direction, DoorState};

use super::controller::ElevatorController;


impl ElevatorController {
    /// Advances the door countdown by `dt` and moves to the next phase if it ran out.
    ///
    /// | phase   | on timeout           | emits        |
    /// |---------|----------------------|--------------|
    /// | Opening | Open, timer = dwell  | `DoorOpened` |
    /// | Open    | Closing, timer = close | –          |
    /// | Closing | Closed               | `DoorClosed` |
    ///
    /// At most one transition per call.
    pub(super) fn on_door_tick(&mut self, dt: f64) {
        match self.state.door_state {
            DoorState::Opening => {
                if self.door_timer.timer_advance(dt) {
                    self.state.door_state = DoorState::Open;
                    self.door_timer.timer_start(self.config.dwell_time);
                    let floor = self.state.nearest_floor();
                    self.emit(Event::DoorOpened(floor));
                }
            }
            DoorState::Open => {
                if self.door_timer.timer_advance(dt) {
                    self.state.door_state = DoorState::Closing;
                    self.door_timer.timer_start(self.config.door_close_time);
                }
            }
            DoorState::Closing => {
                if self.door_timer.timer_advance(dt) {
                    self.state.door_state = DoorState::Closed;
                    let floor = self.state.nearest_floor();
                    self.emit(Event::DoorClosed(floor));
                }
            }
            DoorState::Closed => {}
        }
    }

    /// Snaps the car onto `floor`, clears the call and starts opening the door.
    pub(super) fn on_floor_arrival(&mut self, floor: u8) {
        self.state.current_floor = floor as f64;
        self.state.target_floor = None;
        self.scheduler.remove_request(floor);
        self.emit(Event::ArrivedAtFloor(floor));
        self.state.door_state = DoorState::Opening;
        self.door_timer.timer_start(self.config.door_open_time);
        self.set_direction(Direction::Idle);
    }
}
