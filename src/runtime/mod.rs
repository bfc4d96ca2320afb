//! Single-writer async backend and its event stream.

/// Event stream types emitted by the backend.
pub mod events;
/// Handle and command loop implementation.
pub mod handle;
/// Simulated round-trip delays.
pub mod latency;
