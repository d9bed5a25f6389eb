//! Dispatch order of the three policies, driven the way the controller drives them:
//! ask for the next stop, pretend the car got there, remove the call, repeat.

use elevatorsim::elevator_logic::scheduler::{Scheduler, SchedulerKind};
use elevatorsim::model::Direction;

fn dispatch_order(kind: SchedulerKind, requests: &[u8], start: f64, direction: Direction) -> Vec<u8> {
    let mut scheduler = Scheduler::from(kind);
    for &floor in requests {
        scheduler.add_request(floor);
    }

    let mut current = start;
    let mut direction = direction;
    let mut order = Vec::new();
    while !scheduler.pending_requests().is_empty() {
        let stop = scheduler.next_stop(current, direction).expect("pending calls must yield a stop");
        order.push(stop.floor);
        scheduler.remove_request(stop.floor);
        current = stop.floor as f64;
        direction = stop.direction;
    }
    order
}

#[test]
fn scan_ordering_example() {
    assert_eq!(dispatch_order(SchedulerKind::Scan, &[5, 1, 3], 2.0, Direction::Up), vec![3, 5, 1]);
}

#[test]
fn scan_heading_down_serves_below_first() {
    assert_eq!(dispatch_order(SchedulerKind::Scan, &[5, 1, 3], 4.0, Direction::Down), vec![3, 1, 5]);
}

#[test]
fn fifo_ignores_distance() {
    assert_eq!(dispatch_order(SchedulerKind::Fifo, &[5, 1, 3], 2.0, Direction::Up), vec![5, 1, 3]);
}

#[test]
fn simple_only_remembers_last_call() {
    assert_eq!(dispatch_order(SchedulerKind::Simple, &[5, 1, 3], 2.0, Direction::Up), vec![3]);
}

#[test]
fn next_stop_is_none_only_when_empty() {
    for kind in [SchedulerKind::Simple, SchedulerKind::Fifo, SchedulerKind::Scan] {
        let mut scheduler = Scheduler::from(kind);
        for direction in [Direction::Up, Direction::Down, Direction::Idle] {
            assert_eq!(scheduler.next_stop(3.0, direction), None);
        }
        scheduler.add_request(3);
        for direction in [Direction::Up, Direction::Down, Direction::Idle] {
            assert!(scheduler.next_stop(3.0, direction).is_some(), "{} {:?}", kind, direction);
        }
    }
}

#[test]
fn next_stop_does_not_mutate() {
    let mut scheduler = Scheduler::from(SchedulerKind::Scan);
    scheduler.add_request(4);
    scheduler.add_request(2);
    let before = scheduler.pending_requests();
    let _ = scheduler.next_stop(3.0, Direction::Up);
    let _ = scheduler.next_stop(3.0, Direction::Idle);
    assert_eq!(scheduler.pending_requests(), before);
}

#[test]
fn clear_empties_every_policy() {
    for kind in [SchedulerKind::Simple, SchedulerKind::Fifo, SchedulerKind::Scan] {
        let mut scheduler = Scheduler::from(kind);
        scheduler.add_request(2);
        scheduler.add_request(5);
        scheduler.clear();
        assert!(scheduler.pending_requests().is_empty());
    }
}
