//! # Terminal driver
//!
//! Drives an [ElevatorController] from text commands and a fixed tick cadence.
//!
//! ## Tasks
//! - [run_simulation] owns the controller. It `select!`s between a tick interval
//!   ([config::TICK_PERIOD]) and the command channel, drains events into the log after every
//!   tick and publishes a [Snapshot] on a watch channel.
//! - [read_commands] reads stdin line by line and forwards parsed [Command]s. `status`,
//!   `help` and `wait` are handled locally from the latest snapshot and never reach the
//!   controller.
//!
//! Only the simulation task ever touches the controller, so nothing is locked.

use std::fmt;
use std::str::FromStr;

use anyhow::{bail, Context};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{mpsc, watch};
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::config;
use crate::elevator_logic::controller::ElevatorController;
use crate::elevator_logic::scheduler::{Scheduler, SchedulerKind};
use crate::events::Event;
use crate::model::Snapshot;
use crate::print;


/// One line of user input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// `req <floor>` or just `<floor>`
    Request(u8),
    /// `open`
    OpenDoor,
    /// `close`
    CloseDoor,
    /// `estop on|off`
    Emergency(bool),
    /// `mode simple|fifo|scan`
    Mode(SchedulerKind),
    /// `floors <n>`
    Floors(u8),
    /// `reset`
    Reset,
    /// `start`
    Start,
    /// `pause`
    Pause,
    /// `status`
    Status,
    /// `wait <seconds>`: the reader sleeps before taking the next line
    Wait(f64),
    /// `help`
    Help,
    /// `quit`
    Quit,
}

fn parse_floor(word: Option<&str>, cmd: &str) -> anyhow::Result<u8> {
    let Some(word) = word else {
        bail!("'{}' needs a floor number", cmd);
    };
    word.parse().with_context(|| format!("'{}' is not a floor number", word))
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> anyhow::Result<Self> {
        let lower = line.trim().to_lowercase();
        let mut words = lower.split_whitespace();
        let Some(cmd) = words.next() else {
            bail!("empty command");
        };
        let arg = words.next();
        if words.next().is_some() {
            bail!("too many arguments to '{}'", cmd);
        }

        let command = match (cmd, arg) {
            ("req" | "request", _) => Command::Request(parse_floor(arg, cmd)?),
            ("open", None) => Command::OpenDoor,
            ("close", None) => Command::CloseDoor,
            ("estop", Some("on")) => Command::Emergency(true),
            ("estop", Some("off")) => Command::Emergency(false),
            ("estop", _) => bail!("usage: estop on|off"),
            ("mode", Some(kind)) => Command::Mode(kind.parse()?),
            ("mode", None) => bail!("usage: mode simple|fifo|scan"),
            ("floors", _) => Command::Floors(parse_floor(arg, cmd)?),
            ("reset", None) => Command::Reset,
            ("start", None) => Command::Start,
            ("pause", None) => Command::Pause,
            ("status", None) => Command::Status,
            ("wait", Some(secs)) => {
                let secs: f64 = secs.parse().with_context(|| format!("'{}' is not a number of seconds", secs))?;
                if !secs.is_finite() || secs < 0.0 {
                    bail!("wait needs a non-negative number of seconds");
                }
                Command::Wait(secs)
            }
            ("wait", None) => bail!("usage: wait <seconds>"),
            ("help", None) => Command::Help,
            ("quit" | "exit", None) => Command::Quit,
            (floor, None) if floor.chars().all(|c| c.is_ascii_digit()) => Command::Request(parse_floor(Some(floor), "req")?),
            (other, Some(_)) if matches!(other, "open" | "close" | "reset" | "start" | "pause" | "status" | "help" | "quit" | "exit") => {
                bail!("'{}' takes no argument", other)
            }
            (other, _) => bail!("unknown command '{}' (try 'help')", other),
        };
        Ok(command)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Request(floor) => write!(f, "req {}", floor),
            Command::OpenDoor => f.write_str("open"),
            Command::CloseDoor => f.write_str("close"),
            Command::Emergency(on) => write!(f, "estop {}", if *on { "on" } else { "off" }),
            Command::Mode(kind) => write!(f, "mode {}", kind),
            Command::Floors(n) => write!(f, "floors {}", n),
            Command::Reset => f.write_str("reset"),
            Command::Start => f.write_str("start"),
            Command::Pause => f.write_str("pause"),
            Command::Status => f.write_str("status"),
            Command::Wait(secs) => write!(f, "wait {}", secs),
            Command::Help => f.write_str("help"),
            Command::Quit => f.write_str("quit"),
        }
    }
}

/// Prints the interactive commands.
pub fn print_commands() {
    println!("Commands:");
    println!("  req <floor> | <floor>   call the car to a floor");
    println!("  open | close            door buttons");
    println!("  estop on|off            emergency stop");
    println!("  mode simple|fifo|scan   change dispatch policy");
    println!("  floors <n>              change number of floors");
    println!("  start | pause           resume or pause the simulation");
    println!("  reset                   back to floor 1, no calls");
    println!("  status                  print the status table");
    println!("  wait <seconds>          delay before the next line (for scripts)");
    println!("  help | quit");
}


/// Whether the tick loop should keep going after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    #[allow(missing_docs)]
    Continue,
    #[allow(missing_docs)]
    Quit,
}

/// A controller plus the run/pause switch of the driver.
#[derive(Debug)]
pub struct Simulation {
    controller: ElevatorController,
    running: bool,
}

impl Simulation {
    /// Wraps a controller. The simulation starts running.
    pub fn new(controller: ElevatorController) -> Self {
        Self { controller, running: true }
    }

    /// The wrapped controller.
    pub fn controller(&self) -> &ElevatorController {
        &self.controller
    }

    /// Whether ticks are currently fed to the controller.
    pub fn running(&self) -> bool {
        self.running
    }

    /// Current [Snapshot].
    pub fn snapshot(&self) -> Snapshot {
        self.controller.snapshot(self.running)
    }

    /// Advances the controller by `dt` if running, then drains its events.
    ///
    /// Events are drained even while paused, so command events still reach the log.
    pub fn tick(&mut self, dt: f64) -> Vec<Event> {
        if self.running {
            self.controller.update(dt);
        }
        self.controller.consume_events()
    }

    /// Applies one command to the controller and reports the outcome in the log.
    pub fn apply(&mut self, command: Command) -> Flow {
        match command {
            Command::Request(floor) => {
                if self.controller.add_request(floor) {
                    print::ok(format!("Floor {} requested", floor));
                } else {
                    print::warn(format!("Floor {} is outside 1..={}", floor, self.controller.floor_count()));
                }
            }
            Command::OpenDoor => {
                if self.controller.request_open_door() {
                    print::ok("Door command: open".to_string());
                } else {
                    print::warn(format!("Door cannot open now ({})", self.controller.state().door_state));
                }
            }
            Command::CloseDoor => {
                if self.controller.request_close_door() {
                    print::ok("Door command: close".to_string());
                } else {
                    print::warn(format!("Door cannot close now ({})", self.controller.state().door_state));
                }
            }
            Command::Emergency(active) => {
                self.controller.set_emergency_stop(active);
                if active {
                    self.running = false;
                }
            }
            Command::Mode(kind) => self.controller.set_scheduler(Scheduler::from(kind)),
            Command::Floors(n) => self.controller.set_floor_count(n),
            Command::Reset => {
                self.running = false;
                self.controller.reset();
            }
            Command::Start => {
                self.running = true;
                print::ok("Simulation running".to_string());
            }
            Command::Pause => {
                self.running = false;
                print::ok("Simulation paused".to_string());
            }
            Command::Status | Command::Wait(_) | Command::Help => {}
            Command::Quit => return Flow::Quit,
        }
        Flow::Continue
    }
}


/// Runs the tick loop until `quit` arrives or every command sender is gone.
///
/// Elapsed time between ticks is measured, not assumed, so a late tick moves the car
/// further. Returns the last snapshot.
pub async fn run_simulation(
    mut sim: Simulation,
    mut command_rx: mpsc::Receiver<Command>,
    snapshot_tx: watch::Sender<Snapshot>,
) -> Snapshot {
    let mut interval = time::interval(config::TICK_PERIOD);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut last_tick = Instant::now();

    loop {
        tokio::select! {
            _ = interval.tick() => {
                let now = Instant::now();
                let dt = now.duration_since(last_tick).as_secs_f64();
                last_tick = now;
                for event in sim.tick(dt) {
                    print::event(&event);
                }
            }
            command = command_rx.recv() => {
                match command {
                    Some(command) => {
                        if sim.apply(command) == Flow::Quit {
                            break;
                        }
                    }
                    None => break,
                }
            }
        }
        let _ = snapshot_tx.send(sim.snapshot());
    }

    // Flush whatever the last commands emitted
    for event in sim.tick(0.0) {
        print::event(&event);
    }
    let snapshot = sim.snapshot();
    let _ = snapshot_tx.send(snapshot.clone());
    snapshot
}

/// Reads commands from stdin and forwards them to the simulation task.
///
/// Returns after forwarding `quit`, at end of input (which also sends `quit`), or when the
/// simulation task is gone.
pub async fn read_commands(
    command_tx: mpsc::Sender<Command>,
    snapshot_rx: watch::Receiver<Snapshot>,
) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await.context("reading stdin")? {
        if line.trim().is_empty() {
            continue;
        }
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                print::err(format!("{:#}", e));
                continue;
            }
        };
        match command {
            Command::Status => print::status(&snapshot_rx.borrow().clone()),
            Command::Help => print_commands(),
            Command::Wait(secs) => time::sleep(std::time::Duration::from_secs_f64(secs)).await,
            _ => {
                if command_tx.send(command).await.is_err() {
                    return Ok(());
                }
                if command == Command::Quit {
                    return Ok(());
                }
            }
        }
    }

    let _ = command_tx.send(Command::Quit).await;
    Ok(())
}
