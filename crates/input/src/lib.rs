//! Input handling: platform events are queued as structured values and turned
//! into scene actions once per frame.
//!
//! # Invariants
//! - Event capture never mutates the scene; only [`Action`]s do, applied by the frame loop.
//! - Events are consumed in arrival order, exactly once.

pub mod action;
mod event;
mod state;

pub use action::Action;
pub use event::{InputEvent, Key, MouseButton};
pub use state::{InputSettings, InputState};
