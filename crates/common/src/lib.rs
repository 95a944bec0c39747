//! Shared memory layouts for data handed to the GPU.
//!
//! # Invariants
//! - Layouts are `#[repr(C)]`, tightly packed, and `Pod`.
//! - Sizes are checked at compile time; shaders depend on them.

mod types;

pub use types::{TimeUniform, Vertex};
