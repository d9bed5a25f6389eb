//! Domain events emitted by the controller, and the buffer holding them until drained.

use std::fmt;
use serde::{Serialize, Deserialize};
use crate::model::Direction;


/// Something observable that happened inside the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// A floor call was accepted.
    RequestAdded(u8),
    /// The car reached a requested floor.
    ArrivedAtFloor(u8),
    /// The door finished opening.
    DoorOpened(u8),
    /// The door finished closing.
    DoorClosed(u8),
    /// The car's direction changed.
    DirectionChanged(Direction),
    /// The emergency stop was engaged (`true`) or cleared (`false`).
    EmergencyStop(bool),
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::RequestAdded(floor) => write!(f, "Request added: floor {}", floor),
            Event::ArrivedAtFloor(floor) => write!(f, "Arrived at floor {}", floor),
            Event::DoorOpened(floor) => write!(f, "Door opened at floor {}", floor),
            Event::DoorClosed(floor) => write!(f, "Door closed at floor {}", floor),
            Event::DirectionChanged(dirn) => write!(f, "Direction changed: {}", dirn),
            Event::EmergencyStop(active) => {
                let state = if *active { "engaged" } else { "cleared" };
                write!(f, "Emergency stop {}", state)
            }
        }
    }
}


/// Append-only queue of [Event]s. The only way to read it is [EventLog::drain].
#[derive(Debug, Default)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an event.
    pub fn push(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Returns every buffered event in emission order and leaves the log empty.
    pub fn drain(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }
}
