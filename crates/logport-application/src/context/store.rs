//! Thread-local backing storage
//!
//! Each thread's stack and map are created on first write and dropped by
//! the thread-local destructor when the thread exits, so threads that never
//! clean up do not accumulate. `LIVE_STORES` counts stores currently alive.

use super::map::DiagnosticMap;
use super::stack::DiagnosticStack;
use std::cell::RefCell;
use std::sync::atomic::{AtomicUsize, Ordering};

static LIVE_STORES: AtomicUsize = AtomicUsize::new(0);

/// Number of per-thread context stores currently alive, across all threads
pub fn live_context_stores() -> usize {
    LIVE_STORES.load(Ordering::Acquire)
}

/// A store value whose lifetime is reflected in [`live_context_stores`]
struct Tracked<T> {
    value: T,
}

impl<T: Default> Tracked<T> {
    fn new() -> Self {
        LIVE_STORES.fetch_add(1, Ordering::AcqRel);
        Self {
            value: T::default(),
        }
    }
}

impl<T> Drop for Tracked<T> {
    fn drop(&mut self) {
        LIVE_STORES.fetch_sub(1, Ordering::AcqRel);
    }
}

thread_local! {
    static STACK: RefCell<Option<Tracked<DiagnosticStack>>> = const { RefCell::new(None) };
    static MAP: RefCell<Option<Tracked<DiagnosticMap>>> = const { RefCell::new(None) };
}

/// Run `f` on the calling thread's stack, creating it if needed
///
/// Returns `None` only while the thread is being torn down.
pub(super) fn with_stack<R>(f: impl FnOnce(&mut DiagnosticStack) -> R) -> Option<R> {
    STACK
        .try_with(|cell| {
            let mut slot = cell.borrow_mut();
            f(&mut slot.get_or_insert_with(Tracked::new).value)
        })
        .ok()
}

/// Run `f` on the calling thread's stack if one exists
pub(super) fn read_stack<R>(f: impl FnOnce(&DiagnosticStack) -> R) -> Option<R> {
    STACK
        .try_with(|cell| cell.borrow().as_ref().map(|tracked| f(&tracked.value)))
        .ok()
        .flatten()
}

/// Mutate the calling thread's stack only if one exists
pub(super) fn update_stack<R>(f: impl FnOnce(&mut DiagnosticStack) -> R) -> Option<R> {
    STACK
        .try_with(|cell| cell.borrow_mut().as_mut().map(|tracked| f(&mut tracked.value)))
        .ok()
        .flatten()
}

/// Drop the calling thread's stack storage
pub(super) fn drop_stack() {
    let _ = STACK.try_with(|cell| cell.borrow_mut().take());
}

/// Run `f` on the calling thread's map, creating it if needed
pub(super) fn with_map<R>(f: impl FnOnce(&mut DiagnosticMap) -> R) -> Option<R> {
    MAP.try_with(|cell| {
        let mut slot = cell.borrow_mut();
        f(&mut slot.get_or_insert_with(Tracked::new).value)
    })
    .ok()
}

/// Run `f` on the calling thread's map if one exists
pub(super) fn read_map<R>(f: impl FnOnce(&DiagnosticMap) -> R) -> Option<R> {
    MAP.try_with(|cell| cell.borrow().as_ref().map(|tracked| f(&tracked.value)))
        .ok()
        .flatten()
}

/// Mutate the calling thread's map only if one exists
pub(super) fn update_map<R>(f: impl FnOnce(&mut DiagnosticMap) -> R) -> Option<R> {
    MAP.try_with(|cell| cell.borrow_mut().as_mut().map(|tracked| f(&mut tracked.value)))
        .ok()
        .flatten()
}

/// Drop the calling thread's map storage
pub(super) fn drop_map() {
    let _ = MAP.try_with(|cell| cell.borrow_mut().take());
}
