use std::f32::consts::{PI, TAU};

use meadow_common::Vertex;

use crate::mesh::{Mesh, MeshError};

/// Parameters for a latitude/longitude sphere centered on the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereParams {
    pub radius: f32,
    pub latitude_segments: u32,
    pub longitude_segments: u32,
    /// Written into every vertex's color slot.
    pub color: [f32; 3],
}

impl Default for SphereParams {
    fn default() -> Self {
        Self {
            radius: 1.0,
            latitude_segments: 20,
            longitude_segments: 20,
            color: [1.0, 0.4, 0.7],
        }
    }
}

impl SphereParams {
    pub fn new(radius: f32, latitude_segments: u32, longitude_segments: u32) -> Self {
        Self {
            radius,
            latitude_segments,
            longitude_segments,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), MeshError> {
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(MeshError::InvalidRadius(self.radius));
        }
        if self.latitude_segments < 1 {
            return Err(MeshError::InvalidLatitudeSegments(self.latitude_segments));
        }
        if self.longitude_segments < 1 {
            return Err(MeshError::InvalidLongitudeSegments(self.longitude_segments));
        }
        let vertex_count =
            (self.latitude_segments as u64 + 1) * (self.longitude_segments as u64 + 1);
        if vertex_count > u32::MAX as u64 {
            return Err(MeshError::TooManyVertices {
                latitude: self.latitude_segments,
                longitude: self.longitude_segments,
            });
        }
        Ok(())
    }
}

/// Generate a UV sphere.
///
/// Vertices form a `(lat + 1) x (lon + 1)` grid walked pole to pole, then
/// fully around. Pole rows and the seam column are emitted as duplicates that
/// differ only in UV so that every cell indexes the same way. Each cell emits
/// `(cur, next, cur + 1)` and `(cur + 1, next, next + 1)` where
/// `next = cur + lon + 1`.
pub fn uv_sphere(params: &SphereParams) -> Result<Mesh, MeshError> {
    params.validate()?;

    let lat = params.latitude_segments;
    let lon = params.longitude_segments;
    let r = params.radius;

    let mut vertices = Vec::with_capacity((lat as usize + 1) * (lon as usize + 1));
    for i in 0..=lat {
        let theta = i as f32 * PI / lat as f32;
        let (sin_theta, cos_theta) = theta.sin_cos();

        for j in 0..=lon {
            let phi = j as f32 * TAU / lon as f32;
            let (sin_phi, cos_phi) = phi.sin_cos();

            vertices.push(Vertex {
                position: [r * cos_phi * sin_theta, r * cos_theta, r * sin_phi * sin_theta],
                color: params.color,
                uv: [j as f32 / lon as f32, i as f32 / lat as f32],
            });
        }
    }

    let mut indices = Vec::with_capacity(lat as usize * lon as usize * 6);
    for i in 0..lat {
        for j in 0..lon {
            let current = i * (lon + 1) + j;
            let next = current + lon + 1;

            indices.extend_from_slice(&[current, next, current + 1]);
            indices.extend_from_slice(&[current + 1, next, next + 1]);
        }
    }

    tracing::debug!(
        vertices = vertices.len(),
        indices = indices.len(),
        radius = r,
        "generated uv sphere"
    );

    Ok(Mesh { vertices, indices })
}
