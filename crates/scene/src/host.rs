//! Host-side stand-ins for GPU resources, used by headless runs and tests.

use std::cell::Cell;

use glam::Mat4;
use meadow_common::TimeUniform;

use crate::clock::TimeMirror;
use crate::object::TransformTarget;

/// Time mirror backed by a plain 8-byte host region.
#[derive(Debug, Clone, Default)]
pub struct HostMirror {
    bytes: [u8; TimeUniform::SIZE],
    writes: u64,
}

impl HostMirror {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode the region as the consumer would.
    pub fn read(&self) -> TimeUniform {
        bytemuck::pod_read_unaligned(&self.bytes)
    }

    /// Number of writes since construction.
    pub fn writes(&self) -> u64 {
        self.writes
    }
}

impl TimeMirror for HostMirror {
    type Handle = [u8; TimeUniform::SIZE];

    fn write(&mut self, time: &TimeUniform) {
        self.bytes.copy_from_slice(time.as_bytes());
        self.writes += 1;
    }

    fn handle(&self) -> &Self::Handle {
        &self.bytes
    }
}

/// Model that keeps its latest model matrix in host memory.
#[derive(Debug)]
pub struct HostModel {
    name: String,
    model_matrix: Cell<Mat4>,
    updates: Cell<u32>,
}

impl HostModel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model_matrix: Cell::new(Mat4::IDENTITY),
            updates: Cell::new(0),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn model_matrix(&self) -> Mat4 {
        self.model_matrix.get()
    }

    /// How many times a matrix has been pushed into this model.
    pub fn updates(&self) -> u32 {
        self.updates.get()
    }
}

impl TransformTarget for HostModel {
    fn set_model_matrix(&self, matrix: Mat4) {
        self.model_matrix.set(matrix);
        self.updates.set(self.updates.get() + 1);
    }
}

/// Descriptor for a grass blade field; the simulation itself lives elsewhere.
#[derive(Debug, Clone, PartialEq)]
pub struct HostBlades {
    pub name: String,
    pub plane_size: f32,
}

impl HostBlades {
    pub fn new(name: impl Into<String>, plane_size: f32) -> Self {
        Self {
            name: name.into(),
            plane_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_mirror_round_trips_layout() {
        let mut mirror = HostMirror::new();
        let t = TimeUniform {
            delta_time: 0.016,
            total_time: 42.0,
        };
        mirror.write(&t);
        assert_eq!(mirror.read(), t);
        assert_eq!(&mirror.handle()[4..], &42.0_f32.to_ne_bytes());
        assert_eq!(mirror.writes(), 1);
    }

    #[test]
    fn host_model_records_pushes() {
        let model = HostModel::new("sphere");
        assert_eq!(model.model_matrix(), Mat4::IDENTITY);
        model.set_model_matrix(Mat4::from_scale(glam::Vec3::splat(2.0)));
        assert_eq!(model.updates(), 1);
        assert_eq!(model.model_matrix().x_axis.x, 2.0);
        assert_eq!(model.name(), "sphere");
    }
}
