//! Nested wall clock timers.

mod timers;
pub use timers::*;
