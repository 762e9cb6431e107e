//! Single-writer history runtime, event stream, and debounce timers.

/// Cancellable settle-delay tasks.
pub mod debounce;
/// Event stream types emitted by the runtime.
pub mod events;
/// Handle and command loop implementation.
pub mod handle;
