#![warn(missing_docs)]
//! # This projects library
//!
//! This library simulates a single elevator car servicing floor calls under a pluggable
//! dispatch policy. The car is advanced on discrete ticks with an externally supplied time
//! delta, so the engine never reads the clock itself.
//!
//! ## Overview
//! - **config**: Default parameters, print toggles and the [SimConfig](config::SimConfig) record.
//! - **model**: Value types for the car: direction, door state, physical state, snapshot.
//! - **events**: Events emitted by the controller and the buffer they are drained from.
//! - **elevator_logic**: The dispatch policies and the controller integrating door timing and motion.
//! - **init**: Start-up argument parsing and JSON config loading.
//! - **print**: Colored terminal logging and the status table.
//! - **runner**: The tokio tick loop and stdin command reader used by the binary.

pub mod config;

pub mod model;

pub mod events;

pub mod elevator_logic;

pub mod init;

pub mod print;

pub mod runner;
