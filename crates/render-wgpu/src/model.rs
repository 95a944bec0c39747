use std::sync::Arc;

use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use meadow_mesh::Mesh;
use meadow_scene::TransformTarget;
use wgpu::util::DeviceExt;

use crate::context::scoped;
use crate::error::GpuError;

/// Per-model uniform: column-major world matrix.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct ModelUniform {
    pub model: [[f32; 4]; 4],
}

impl ModelUniform {
    pub fn new(matrix: Mat4) -> Self {
        Self {
            model: matrix.to_cols_array_2d(),
        }
    }
}

/// Mesh uploaded to GPU buffers plus its model-matrix uniform.
pub struct GpuModel {
    label: String,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    model_buffer: wgpu::Buffer,
    queue: Arc<wgpu::Queue>,
}

impl GpuModel {
    /// Upload `mesh`, consuming it. The model matrix starts as identity.
    pub fn upload(
        device: &wgpu::Device,
        queue: Arc<wgpu::Queue>,
        label: &str,
        mesh: Mesh,
    ) -> Result<Self, GpuError> {
        if mesh.vertices.is_empty() || mesh.indices.is_empty() {
            return Err(GpuError::EmptyMesh {
                label: label.to_string(),
            });
        }
        let index_count =
            u32::try_from(mesh.indices.len()).map_err(|_| GpuError::MeshTooLarge {
                label: label.to_string(),
                count: mesh.indices.len(),
            })?;

        let (vertex_buffer, index_buffer, model_buffer) = scoped(device, label, || {
            let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{label}_vertex_buffer")),
                contents: bytemuck::cast_slice(&mesh.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
            let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{label}_index_buffer")),
                contents: bytemuck::cast_slice(&mesh.indices),
                usage: wgpu::BufferUsages::INDEX,
            });
            let model_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{label}_model_buffer")),
                contents: bytemuck::bytes_of(&ModelUniform::new(Mat4::IDENTITY)),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            });
            (vertex_buffer, index_buffer, model_buffer)
        })?;

        tracing::debug!(
            label,
            vertices = mesh.vertices.len(),
            indices = index_count,
            "mesh uploaded"
        );

        Ok(Self {
            label: label.to_string(),
            vertex_buffer,
            index_buffer,
            index_count,
            model_buffer,
            queue,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn vertex_buffer(&self) -> &wgpu::Buffer {
        &self.vertex_buffer
    }

    /// Index buffer of `u32` triangle-list indices.
    pub fn index_buffer(&self) -> &wgpu::Buffer {
        &self.index_buffer
    }

    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    pub fn model_buffer(&self) -> &wgpu::Buffer {
        &self.model_buffer
    }
}

impl TransformTarget for GpuModel {
    fn set_model_matrix(&self, matrix: Mat4) {
        self.queue.write_buffer(
            &self.model_buffer,
            0,
            bytemuck::bytes_of(&ModelUniform::new(matrix)),
        );
    }
}
