use std::sync::Arc;

use crate::error::GpuError;

/// Device and queue for headless or windowed use.
///
/// The queue is shared with every resource that writes through it.
pub struct GpuContext {
    pub device: wgpu::Device,
    pub queue: Arc<wgpu::Queue>,
    info: wgpu::AdapterInfo,
}

impl GpuContext {
    /// Request an adapter and device without a presentation surface.
    pub fn headless() -> Result<Self, GpuError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: None,
            force_fallback_adapter: false,
        }))
        .ok_or(GpuError::NoAdapter)?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("meadow_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))?;

        let info = adapter.get_info();
        tracing::info!(
            adapter = %info.name,
            backend = info.backend.to_str(),
            "GPU initialized"
        );

        Ok(Self {
            device,
            queue: Arc::new(queue),
            info,
        })
    }

    pub fn adapter_info(&self) -> &wgpu::AdapterInfo {
        &self.info
    }

    /// Block until all submitted GPU work has finished.
    ///
    /// Call before dropping anything the GPU may still be reading.
    pub fn wait_idle(&self) {
        let result = self.device.poll(wgpu::Maintain::Wait);
        tracing::debug!(
            queue_empty = result.is_queue_empty(),
            "device idle; safe to release GPU resources"
        );
    }
}

/// Run `create` inside error scopes and turn any captured error into [`GpuError`].
pub(crate) fn scoped<T>(
    device: &wgpu::Device,
    label: &str,
    create: impl FnOnce() -> T,
) -> Result<T, GpuError> {
    device.push_error_scope(wgpu::ErrorFilter::OutOfMemory);
    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let value = create();
    let validation = pollster::block_on(device.pop_error_scope());
    let oom = pollster::block_on(device.pop_error_scope());

    match validation.or(oom) {
        None => Ok(value),
        Some(err) => Err(GpuError::Allocation {
            label: label.to_string(),
            reason: err.to_string(),
        }),
    }
}
