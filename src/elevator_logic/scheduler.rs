//! Dispatch policies deciding which floor the car should head for next.
//!
//! The set of policies is closed: [Scheduler] is an enum over exactly three variants,
//! each with its own ordering rules for [Scheduler::next_stop] and
//! [Scheduler::pending_requests].
//!
//! # Overview
//! - [SimpleScheduler]: one sticky target, overwritten by every new request.
//! - [FifoScheduler]: serves requests in the order they were made, ignoring distance.
//! - [ScanScheduler]: keeps sweeping in the current direction until nothing is left ahead,
//!   then reverses.
//!
//! `next_stop` is a pure query. It never changes the pending set; the controller removes a
//! floor only when the car actually arrives there.
//!
//! # Example
//! ```rust
//! use elevatorsim::elevator_logic::scheduler::{Scheduler, SchedulerKind};
//! use elevatorsim::model::Direction;
//!
//! let mut scheduler = Scheduler::from(SchedulerKind::Scan);
//! scheduler.add_request(5);
//! scheduler.add_request(1);
//! let stop = scheduler.next_stop(2.0, Direction::Up).unwrap();
//! assert_eq!(stop.floor, 5);
//! assert_eq!(stop.direction, Direction::Up);
//! ```

use std::collections::{BTreeSet, VecDeque};
use std::fmt;
use std::str::FromStr;

use anyhow::bail;
use serde::{Serialize, Deserialize};

use crate::model::Direction;


/// The floor to head for and the direction the car will be travelling to get there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextStop {
    /// target floor
    pub floor: u8,

    /// direction toward `floor`, `Idle` if the car is already there
    pub direction: Direction,
}

/// Direction from `current_floor` toward `target`, `Idle` when they are equal.
fn direction_toward(current_floor: f64, target: u8) -> Direction {
    let target = target as f64;
    if target > current_floor {
        Direction::Up
    } else if target < current_floor {
        Direction::Down
    } else {
        Direction::Idle
    }
}


/// Holds at most one target. Last writer wins.
#[derive(Debug, Clone, Default)]
pub struct SimpleScheduler {
    target: Option<u8>,
}

impl SimpleScheduler {
    fn add_request(&mut self, floor: u8) {
        self.target = Some(floor);
    }

    fn remove_request(&mut self, floor: u8) {
        if self.target == Some(floor) {
            self.target = None;
        }
    }

    fn clear(&mut self) {
        self.target = None;
    }

    fn pending_requests(&self) -> Vec<u8> {
        self.target.into_iter().collect()
    }

    fn next_stop(&self, current_floor: f64) -> Option<NextStop> {
        self.target.map(|floor| NextStop { floor, direction: direction_toward(current_floor, floor) })
    }
}


/// Serves floors in the order they were first requested.
#[derive(Debug, Clone, Default)]
pub struct FifoScheduler {
    queue: VecDeque<u8>,
}

impl FifoScheduler {
    fn add_request(&mut self, floor: u8) {
        if !self.queue.contains(&floor) {
            self.queue.push_back(floor);
        }
    }

    fn remove_request(&mut self, floor: u8) {
        self.queue.retain(|f| *f != floor);
    }

    fn clear(&mut self) {
        self.queue.clear();
    }

    fn pending_requests(&self) -> Vec<u8> {
        self.queue.iter().copied().collect()
    }

    fn next_stop(&self, current_floor: f64) -> Option<NextStop> {
        self.queue.front().map(|&floor| NextStop { floor, direction: direction_toward(current_floor, floor) })
    }
}


/// Elevator-algorithm sweep. Pending floors are kept sorted.
#[derive(Debug, Clone, Default)]
pub struct ScanScheduler {
    requests: BTreeSet<u8>,
}

impl ScanScheduler {
    fn add_request(&mut self, floor: u8) {
        self.requests.insert(floor);
    }

    fn remove_request(&mut self, floor: u8) {
        self.requests.remove(&floor);
    }

    fn clear(&mut self) {
        self.requests.clear();
    }

    fn pending_requests(&self) -> Vec<u8> {
        self.requests.iter().copied().collect()
    }

    /// Closest pending floor strictly above `current_floor`.
    fn above(&self, current_floor: f64) -> Option<NextStop> {
        self.requests
            .iter()
            .copied()
            .find(|&f| f as f64 > current_floor)
            .map(|floor| NextStop { floor, direction: Direction::Up })
    }

    /// Closest pending floor strictly below `current_floor`.
    fn below(&self, current_floor: f64) -> Option<NextStop> {
        self.requests
            .iter()
            .rev()
            .copied()
            .find(|&f| (f as f64) < current_floor)
            .map(|floor| NextStop { floor, direction: Direction::Down })
    }

    /// Nearest pending floor by absolute distance. Ties go to the lower floor.
    fn nearest(&self, current_floor: f64) -> Option<NextStop> {
        let mut best: Option<(f64, u8)> = None;
        // Ascending iteration + strict `<` keeps the lower floor on ties
        for &floor in &self.requests {
            let dist = (floor as f64 - current_floor).abs();
            match best {
                Some((best_dist, _)) if dist >= best_dist => {}
                _ => best = Some((dist, floor)),
            }
        }
        best.map(|(_, floor)| NextStop { floor, direction: direction_toward(current_floor, floor) })
    }

    fn next_stop(&self, current_floor: f64, direction: Direction) -> Option<NextStop> {
        match direction {
            Direction::Up => self
                .above(current_floor)
                .or_else(|| self.below(current_floor))
                .or_else(|| self.nearest(current_floor)),
            Direction::Down => self
                .below(current_floor)
                .or_else(|| self.above(current_floor))
                .or_else(|| self.nearest(current_floor)),
            Direction::Idle => self.nearest(current_floor),
        }
    }
}


/// The active dispatch policy.
#[derive(Debug, Clone)]
pub enum Scheduler {
    /// see [SimpleScheduler]
    Simple(SimpleScheduler),
    /// see [FifoScheduler]
    Fifo(FifoScheduler),
    /// see [ScanScheduler]
    Scan(ScanScheduler),
}

impl Default for Scheduler {
    fn default() -> Self {
        Scheduler::Fifo(FifoScheduler::default())
    }
}

impl Scheduler {
    /// Display name of the policy.
    pub fn name(&self) -> &'static str {
        self.kind().name()
    }

    /// Which policy this is.
    pub fn kind(&self) -> SchedulerKind {
        match self {
            Scheduler::Simple(_) => SchedulerKind::Simple,
            Scheduler::Fifo(_) => SchedulerKind::Fifo,
            Scheduler::Scan(_) => SchedulerKind::Scan,
        }
    }

    /// Registers a call for `floor`. Adding an already pending floor changes nothing
    /// (except for `Simple`, where the newest call replaces the target).
    pub fn add_request(&mut self, floor: u8) {
        match self {
            Scheduler::Simple(s) => s.add_request(floor),
            Scheduler::Fifo(s) => s.add_request(floor),
            Scheduler::Scan(s) => s.add_request(floor),
        }
    }

    /// Drops the call for `floor`, if any.
    pub fn remove_request(&mut self, floor: u8) {
        match self {
            Scheduler::Simple(s) => s.remove_request(floor),
            Scheduler::Fifo(s) => s.remove_request(floor),
            Scheduler::Scan(s) => s.remove_request(floor),
        }
    }

    /// Drops every pending call.
    pub fn clear(&mut self) {
        match self {
            Scheduler::Simple(s) => s.clear(),
            Scheduler::Fifo(s) => s.clear(),
            Scheduler::Scan(s) => s.clear(),
        }
    }

    /// Pending floors in policy order: insertion order for FIFO, ascending for SCAN.
    pub fn pending_requests(&self) -> Vec<u8> {
        match self {
            Scheduler::Simple(s) => s.pending_requests(),
            Scheduler::Fifo(s) => s.pending_requests(),
            Scheduler::Scan(s) => s.pending_requests(),
        }
    }

    /// Decides the next stop for a car at `current_floor` travelling in `direction`.
    ///
    /// Returns `None` iff nothing is pending.
    pub fn next_stop(&self, current_floor: f64, direction: Direction) -> Option<NextStop> {
        match self {
            Scheduler::Simple(s) => s.next_stop(current_floor),
            Scheduler::Fifo(s) => s.next_stop(current_floor),
            Scheduler::Scan(s) => s.next_stop(current_floor, direction),
        }
    }
}


/// Names the three policies without carrying any requests.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SchedulerKind {
    Simple,
    Fifo,
    Scan,
}

impl SchedulerKind {
    /// Display name, as shown in the status table.
    pub fn name(self) -> &'static str {
        match self {
            SchedulerKind::Simple => "Simple",
            SchedulerKind::Fifo => "FIFO",
            SchedulerKind::Scan => "SCAN",
        }
    }
}

impl fmt::Display for SchedulerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SchedulerKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "simple" => Ok(SchedulerKind::Simple),
            "fifo" => Ok(SchedulerKind::Fifo),
            "scan" => Ok(SchedulerKind::Scan),
            other => bail!("unknown scheduler '{}' (expected simple, fifo or scan)", other),
        }
    }
}

impl From<SchedulerKind> for Scheduler {
    fn from(kind: SchedulerKind) -> Self {
        match kind {
            SchedulerKind::Simple => Scheduler::Simple(SimpleScheduler::default()),
            SchedulerKind::Fifo => Scheduler::Fifo(FifoScheduler::default()),
            SchedulerKind::Scan => Scheduler::Scan(ScanScheduler::default()),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn with_requests(kind: SchedulerKind, floors: &[u8]) -> Scheduler {
        let mut s = Scheduler::from(kind);
        for &f in floors {
            s.add_request(f);
        }
        s
    }

    #[test]
    fn simple_last_writer_wins() {
        let s = with_requests(SchedulerKind::Simple, &[4, 2]);
        assert_eq!(s.pending_requests(), vec![2]);
        assert_eq!(s.next_stop(3.0, Direction::Idle), Some(NextStop { floor: 2, direction: Direction::Down }));
        assert_eq!(s.next_stop(2.0, Direction::Up), Some(NextStop { floor: 2, direction: Direction::Idle }));
    }

    #[test]
    fn simple_remove_only_matching_target() {
        let mut s = with_requests(SchedulerKind::Simple, &[4]);
        s.remove_request(3);
        assert_eq!(s.pending_requests(), vec![4]);
        s.remove_request(4);
        assert!(s.pending_requests().is_empty());
        assert_eq!(s.next_stop(1.0, Direction::Idle), None);
    }

    #[test]
    fn fifo_targets_head_regardless_of_distance() {
        let s = with_requests(SchedulerKind::Fifo, &[6, 2, 3]);
        assert_eq!(s.next_stop(2.5, Direction::Down), Some(NextStop { floor: 6, direction: Direction::Up }));
    }

    #[test]
    fn fifo_add_is_idempotent() {
        let s = with_requests(SchedulerKind::Fifo, &[3, 5, 3]);
        assert_eq!(s.pending_requests(), vec![3, 5]);
    }

    #[test]
    fn fifo_remove_absent_is_noop() {
        let mut s = with_requests(SchedulerKind::Fifo, &[3, 5]);
        s.remove_request(4);
        assert_eq!(s.pending_requests(), vec![3, 5]);
        s.remove_request(3);
        assert_eq!(s.pending_requests(), vec![5]);
    }

    #[test]
    fn scan_pending_is_ascending() {
        let s = with_requests(SchedulerKind::Scan, &[5, 1, 3, 5]);
        assert_eq!(s.pending_requests(), vec![1, 3, 5]);
    }

    #[test]
    fn scan_up_reverses_when_nothing_ahead() {
        let s = with_requests(SchedulerKind::Scan, &[1, 2]);
        assert_eq!(s.next_stop(4.0, Direction::Up), Some(NextStop { floor: 2, direction: Direction::Down }));
    }

    #[test]
    fn scan_down_prefers_below() {
        let s = with_requests(SchedulerKind::Scan, &[1, 3, 6]);
        assert_eq!(s.next_stop(4.0, Direction::Down), Some(NextStop { floor: 3, direction: Direction::Down }));
        let s = with_requests(SchedulerKind::Scan, &[5, 6]);
        assert_eq!(s.next_stop(4.0, Direction::Down), Some(NextStop { floor: 5, direction: Direction::Up }));
    }

    #[test]
    fn scan_only_current_floor_pending_while_moving() {
        let s = with_requests(SchedulerKind::Scan, &[3]);
        assert_eq!(s.next_stop(3.0, Direction::Up), Some(NextStop { floor: 3, direction: Direction::Idle }));
    }

    #[test]
    fn scan_idle_picks_nearest_lower_on_tie() {
        let s = with_requests(SchedulerKind::Scan, &[2, 4]);
        assert_eq!(s.next_stop(3.0, Direction::Idle), Some(NextStop { floor: 2, direction: Direction::Down }));
        let s = with_requests(SchedulerKind::Scan, &[3, 6]);
        assert_eq!(s.next_stop(3.0, Direction::Idle), Some(NextStop { floor: 3, direction: Direction::Idle }));
    }

    #[test]
    fn kind_parsing_and_names() {
        assert_eq!("SCAN".parse::<SchedulerKind>().unwrap(), SchedulerKind::Scan);
        assert_eq!(" fifo ".parse::<SchedulerKind>().unwrap(), SchedulerKind::Fifo);
        assert!("lifo".parse::<SchedulerKind>().is_err());
        assert_eq!(Scheduler::from(SchedulerKind::Simple).name(), "Simple");
        assert_eq!(Scheduler::default().name(), "FIFO");
    }
}
