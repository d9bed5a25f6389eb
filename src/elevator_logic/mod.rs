//! Dispatch and motion engine.
//!
//! - [scheduler]: the three dispatch policies.
//! - [controller]: the [ElevatorController](controller::ElevatorController) tying scheduler,
//!   car state, door timing and events together.
//! - `fsm`: door phase transitions and floor arrival.
//! - [timer]: simulated-time countdown used for the door.

pub mod controller;
mod fsm;
pub mod scheduler;
pub mod timer;
