//! ## Printing Module
//!
//! This module is only here to make logging in the terminal easier to read.
//! It prints in appropriate colors depending on the situation, each level can be
//! switched off through the toggles in [config].
//! It also provides a status table for a [Snapshot].
use crate::{config, events::Event, model::{Direction, DoorState, Snapshot}};
use ansi_term::Colour::{self, Cyan, Green, Red, Yellow};
use prettytable::{format, Cell, Row, Table};
use unicode_width::UnicodeWidthStr;

/// Prints an error message in red to the terminal.
///
/// If `PRINT_ERR_ON` is `false`, the message will not be printed.
///
/// ## Terminal output
/// - "\[ERROR\]:   {}", msg
///
/// ## Example
/// ```
/// use elevatorsim::print;
///
/// print::err("Something went wrong!".to_string());
/// ```
pub fn err(msg: String) {
    if config::print_enabled(&config::PRINT_ERR_ON) {
        println!("{}{}", Red.paint("[ERROR]:   "), Red.paint(msg));
    }
}

/// Prints a warning message in yellow to the terminal.
///
/// If `PRINT_WARN_ON` is `false`, the message will not be printed.
///
/// ## Terminal output
/// - "\[WARNING\]: {}", msg
pub fn warn(msg: String) {
    if config::print_enabled(&config::PRINT_WARN_ON) {
        println!("{}{}", Yellow.paint("[WARNING]: "), Yellow.paint(msg));
    }
}

/// Prints a success message in green to the terminal.
///
/// If `PRINT_OK_ON` is `false`, the message will not be printed.
///
/// ## Terminal output
/// - "\[OK\]:      {}", msg
pub fn ok(msg: String) {
    if config::print_enabled(&config::PRINT_OK_ON) {
        println!("{}{}", Green.paint("[OK]:      "), Green.paint(msg));
    }
}

/// Prints an informational message in light blue to the terminal.
///
/// If `PRINT_INFO_ON` is `false`, the message will not be printed.
///
/// ## Terminal output
/// - "\[INFO\]:    {}", msg
pub fn info(msg: String) {
    let light_blue = Colour::RGB(102, 178, 255);
    if config::print_enabled(&config::PRINT_INFO_ON) {
        println!("{}{}", light_blue.paint("[INFO]:    "), light_blue.paint(msg));
    }
}

/// Prints a drained controller event in pink, prefixed with the local wall-clock time.
///
/// If `PRINT_EVENT_ON` is `false`, the event will not be printed.
///
/// ## Terminal output
/// - "\[EVENT\]:   \[HH:MM:SS\] {}", event
pub fn event(event: &Event) {
    if config::print_enabled(&config::PRINT_EVENT_ON) {
        let pink = Colour::RGB(255, 51, 255);
        println!("{}{}", pink.paint("[EVENT]:   "), pink.paint(event_line(event)));
    }
}

/// Formats an event as one timestamped log line.
pub fn event_line(event: &Event) -> String {
    let timestamp = chrono::Local::now().format("%H:%M:%S");
    format!("[{}] {}", timestamp, event)
}

/// Pads the input text to a fixed display width using spaces.
///
/// Accounts for characters that may take more than one column width (e.g. Unicode symbols),
/// ensuring aligned text in terminal output.
fn pad_text(text: &str, width: usize) -> String {
    let visible_width = UnicodeWidthStr::width(text);
    let padding = width.saturating_sub(visible_width);
    format!("{}{}", text, " ".repeat(padding))
}

fn direction_label(dirn: Direction) -> &'static str {
    match dirn {
        Direction::Up => "⬆ Up",
        Direction::Down => "⬇ Down",
        Direction::Idle => "Idle",
    }
}

/// prettytable style spec for a door phase
fn door_style(door: DoorState) -> &'static str {
    match door {
        DoorState::Closed => "Fg",
        DoorState::Opening | DoorState::Closing => "Fy",
        DoorState::Open => "Fm",
    }
}

/// Builds the status table for a snapshot. Floors are listed top to bottom.
pub fn status_table(snapshot: &Snapshot) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BOX_CHARS);
    table.set_titles(Row::new(vec![
        Cell::new("Floor").style_spec("b"),
        Cell::new("Car").style_spec("b"),
        Cell::new("Call").style_spec("b"),
    ]));

    let car_floor = snapshot.state.nearest_floor();
    for floor in (1..=snapshot.floor_count).rev() {
        let car = if floor == car_floor { "▮" } else { "" };
        let call = if snapshot.pending.contains(&floor) { "●" } else { "" };
        table.add_row(Row::new(vec![
            Cell::new(&floor.to_string()),
            Cell::new(car).style_spec(door_style(snapshot.state.door_state)),
            Cell::new(call).style_spec("Fg"),
        ]));
    }
    table
}

/// Logs a [Snapshot] to the terminal: a summary box followed by the floor table.
///
/// If `PRINT_STATUS_ON` is `false`, the function exits early.
pub fn status(snapshot: &Snapshot) {
    if !config::print_enabled(&config::PRINT_STATUS_ON) {
        return;
    }
    let next = if snapshot.pending.is_empty() {
        "-".to_string()
    } else {
        snapshot.pending.iter().map(|f| f.to_string()).collect::<Vec<_>>().join(", ")
    };
    let target = snapshot.state.target_floor.map_or("-".to_string(), |f| f.to_string());
    let run_state = match (snapshot.emergency_stop, snapshot.running) {
        (true, _) => Red.paint(pad_text("EMERGENCY", 18)).to_string(),
        (false, true) => Green.paint(pad_text("Running", 18)).to_string(),
        (false, false) => Yellow.paint(pad_text("Paused", 18)).to_string(),
    };

    println!("{}", Cyan.bold().paint("┌─────────────────────────────────┐"));
    println!("{}", Cyan.bold().paint("│         ELEVATOR STATUS         │"));
    println!("{}", Cyan.bold().paint("└─────────────────────────────────┘"));
    println!("┌─────────────────────────────────┐");
    println!("│ Mode:          {} │", pad_text(&snapshot.scheduler, 16));
    println!("│ State:          {}│", run_state);
    println!("│ Floor:         {} │", pad_text(&format!("{:.2}", snapshot.state.current_floor), 16));
    println!("│ Direction:     {} │", pad_text(direction_label(snapshot.state.direction), 16));
    println!("│ Door:          {} │", pad_text(&snapshot.state.door_state.to_string(), 16));
    println!("│ Target:        {} │", pad_text(&target, 16));
    println!("│ Next stops:    {} │", pad_text(&next, 16));
    println!("└─────────────────────────────────┘");
    status_table(snapshot).printstd();
}
