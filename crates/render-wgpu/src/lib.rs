//! wgpu backend for the scene layer.
//!
//! Supplies GPU-side implementations of the scene's seams: a [`TimeMirror`]
//! for the simulation clock and a [`TransformTarget`] for uploaded meshes.
//! Pipelines and draw submission belong to the renderer, not here.
//!
//! # Invariants
//! - The time buffer is allocated once and never reallocated.
//! - Per-frame writes go through the queue with no fence from this crate.
//! - GPU buffers are released only after the device has gone idle.
//!
//! [`TimeMirror`]: meadow_scene::TimeMirror
//! [`TransformTarget`]: meadow_scene::TransformTarget

mod context;
mod error;
mod layout;
mod model;
mod time_buffer;

pub use context::GpuContext;
pub use error::GpuError;
pub use layout::{
    time_bind_group, time_bind_group_layout, vertex_buffer_layout, VERTEX_ATTRIBUTES,
};
pub use model::{GpuModel, ModelUniform};
pub use time_buffer::WgpuTimeBuffer;
