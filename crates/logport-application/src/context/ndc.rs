//! Nested diagnostic context for the calling thread
//!
//! None of these operations fail. An empty or never-touched stack reads as
//! `""` and depth 0.

use super::stack::DiagnosticStack;
use super::store;

/// Push `message` onto the calling thread's stack
pub fn push(message: impl Into<String>) {
    let message = message.into();
    store::with_stack(|stack| stack.push(message));
}

/// Remove and return the newest message, or `""` when the stack is empty
pub fn pop() -> String {
    store::update_stack(DiagnosticStack::pop).unwrap_or_default()
}

/// The newest message without removing it, or `""` when the stack is empty
pub fn peek() -> String {
    store::read_stack(DiagnosticStack::peek).unwrap_or_default()
}

/// Number of messages on the calling thread's stack
pub fn depth() -> usize {
    store::read_stack(DiagnosticStack::depth).unwrap_or(0)
}

/// Keep only the `max` most recently pushed messages
pub fn set_max_depth(max: usize) {
    store::update_stack(|stack| stack.set_max_depth(max));
}

/// Empty the calling thread's stack, keeping its storage
pub fn clear() {
    store::update_stack(DiagnosticStack::clear);
}

/// Independent snapshot to hand to another thread, oldest first
pub fn clone_stack() -> Vec<String> {
    store::read_stack(DiagnosticStack::snapshot).unwrap_or_default()
}

/// Replace the calling thread's stack with a copy of `snapshot`
///
/// Meant to be called once, early, by a thread adopting the context of the
/// thread that produced the snapshot with [`clone_stack`].
pub fn inherit(snapshot: &[String]) {
    store::with_stack(|stack| *stack = DiagnosticStack::from_snapshot(snapshot));
}

/// Every message joined by a single space, oldest first
pub fn full_context() -> String {
    store::read_stack(DiagnosticStack::full_context).unwrap_or_default()
}

/// Release the calling thread's stack storage immediately
pub fn remove() {
    store::drop_stack();
}
