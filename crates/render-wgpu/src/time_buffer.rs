use std::sync::Arc;

use meadow_common::TimeUniform;
use meadow_scene::TimeMirror;

use crate::context::scoped;
use crate::error::GpuError;

/// GPU uniform buffer mirroring the scene clock.
///
/// wgpu has no persistently mapped uniform memory, so each write is a
/// `Queue::write_buffer`. wgpu stages it and it lands before the next
/// submission. This type takes no fence or barrier of its own.
///
/// The buffer is destroyed on drop; wait for the device to go idle first
/// (see [`GpuContext::wait_idle`](crate::GpuContext::wait_idle)).
pub struct WgpuTimeBuffer {
    buffer: wgpu::Buffer,
    queue: Arc<wgpu::Queue>,
}

impl WgpuTimeBuffer {
    /// Allocate the 8-byte uniform buffer.
    pub fn new(device: &wgpu::Device, queue: Arc<wgpu::Queue>) -> Result<Self, GpuError> {
        let buffer = scoped(device, "time_buffer", || {
            device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("time_buffer"),
                size: TimeUniform::SIZE as wgpu::BufferAddress,
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            })
        })?;
        tracing::debug!(size = TimeUniform::SIZE, "time buffer allocated");
        Ok(Self { buffer, queue })
    }
}

impl TimeMirror for WgpuTimeBuffer {
    type Handle = wgpu::Buffer;

    fn write(&mut self, time: &TimeUniform) {
        self.queue.write_buffer(&self.buffer, 0, time.as_bytes());
    }

    fn handle(&self) -> &wgpu::Buffer {
        &self.buffer
    }
}

impl Drop for WgpuTimeBuffer {
    fn drop(&mut self) {
        self.buffer.destroy();
        tracing::debug!("time buffer released");
    }
}
