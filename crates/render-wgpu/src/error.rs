/// Errors from GPU resource creation.
#[derive(Debug, thiserror::Error)]
pub enum GpuError {
    #[error("no suitable GPU adapter found")]
    NoAdapter,
    #[error("device request failed: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),
    #[error("allocating {label} failed: {reason}")]
    Allocation { label: String, reason: String },
    #[error("mesh {label} has no geometry")]
    EmptyMesh { label: String },
    #[error("mesh {label} has {count} indices, more than 32-bit draws allow")]
    MeshTooLarge { label: String, count: usize },
}
