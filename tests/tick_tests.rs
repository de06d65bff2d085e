// Host-side tests for the self-scheduling callback cell.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod tick {
    include!("../src/tick.rs");
}

use std::cell::Cell;
use std::rc::Rc;
use tick::TickCell;

type Callback = Box<dyn Fn() -> u32>;

/// A callback that re-arms through its own cell, like the frame loop does.
fn self_referencing(frames: &Rc<Cell<u32>>) -> TickCell<Callback> {
    let cell: TickCell<Callback> = TickCell::new();
    let inner = cell.clone();
    let frames_in = frames.clone();
    cell.set(Box::new(move || {
        let _keep_alive = &inner;
        frames_in.set(frames_in.get() + 1);
        frames_in.get()
    }));
    cell
}

#[test]
fn stored_callback_runs_until_cleared() {
    let frames = Rc::new(Cell::new(0));
    let cell = self_referencing(&frames);
    assert_eq!(cell.with(|cb| cb()), Some(1));
    assert_eq!(cell.with(|cb| cb()), Some(2));
    assert!(cell.clear());
    assert_eq!(cell.with(|cb| cb()), None);
    assert!(!cell.clear());
}

#[test]
fn clearing_from_outside_frees_the_cycle() {
    let frames = Rc::new(Cell::new(0));
    let cell = self_referencing(&frames);
    // the callback's captured counter is the only other strong ref
    assert_eq!(Rc::strong_count(&frames), 2);
    let teardown_handle = cell.clone();
    drop(cell);
    assert!(teardown_handle.clear());
    assert_eq!(Rc::strong_count(&frames), 1);
}

#[test]
fn dropping_every_handle_without_clear_leaks() {
    let frames = Rc::new(Cell::new(0));
    let cell = self_referencing(&frames);
    drop(cell);
    // the callback still owns a clone of its own cell
    assert_eq!(Rc::strong_count(&frames), 2);
}

#[test]
fn clear_during_a_borrow_is_refused() {
    let frames = Rc::new(Cell::new(0));
    let cell = self_referencing(&frames);
    let other = cell.clone();
    let cleared = cell.with(|_| other.clear());
    assert_eq!(cleared, Some(false));
    assert!(cell.clear());
}
