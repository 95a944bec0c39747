//! Procedural geometry for the scene.
//!
//! Meshes are produced once and handed to an upload step; nothing here keeps
//! them around after generation.
//!
//! # Invariants
//! - Every index references a vertex in the same mesh.
//! - Sphere vertices lie on the sphere surface by construction.

mod mesh;
mod plane;
mod sphere;

pub use mesh::{Mesh, MeshError};
pub use plane::ground_plane;
pub use sphere::{uv_sphere, SphereParams};
