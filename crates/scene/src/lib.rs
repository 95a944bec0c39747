//! Scene state shared between the frame loop and the renderer.
//!
//! The registry owns the simulation clock and the interactive object. Every
//! renderable it lists is owned elsewhere and held here only by weak handle.
//!
//! # Invariants
//! - Total time never decreases.
//! - The interactive object's matrix is derived from its canonical state, never stored as truth.
//! - Model and blade-system iteration order is insertion order.

mod clock;
mod config;
mod error;
mod host;
mod object;
mod registry;

pub use clock::{ClockState, ManualTimeSource, SystemTimeSource, TimeMirror, TimeSource};
pub use config::{ConfigError, SceneConfig, SphereConfig};
pub use error::SceneError;
pub use host::{HostBlades, HostMirror, HostModel};
pub use object::{InteractiveObject, SphereState, TransformTarget};
pub use registry::SceneRegistry;
