use bytemuck::{Pod, Zeroable};

/// Per-frame simulation time as seen by shaders.
///
/// Layout: `delta_time` at offset 0, `total_time` at offset 4, 8 bytes total.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct TimeUniform {
    /// Seconds since the previous update.
    pub delta_time: f32,
    /// Accumulated seconds since the clock started.
    pub total_time: f32,
}

impl TimeUniform {
    pub const SIZE: usize = std::mem::size_of::<Self>();

    /// Raw bytes in the exact layout consumed by the GPU.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

/// Mesh vertex: position, color (or normal), texture coordinate. 32 bytes.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
    pub uv: [f32; 2],
}

impl Vertex {
    pub const SIZE: usize = std::mem::size_of::<Self>();

    pub fn new(position: [f32; 3], color: [f32; 3], uv: [f32; 2]) -> Self {
        Self {
            position,
            color,
            uv,
        }
    }
}

const _: () = assert!(TimeUniform::SIZE == 8);
const _: () = assert!(Vertex::SIZE == 32);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_uniform_field_offsets() {
        let t = TimeUniform {
            delta_time: 0.25,
            total_time: 3.5,
        };
        let bytes = t.as_bytes();
        assert_eq!(bytes.len(), 8);
        assert_eq!(&bytes[0..4], &0.25_f32.to_ne_bytes());
        assert_eq!(&bytes[4..8], &3.5_f32.to_ne_bytes());
    }

    #[test]
    fn time_uniform_default_is_zeroed() {
        let t = TimeUniform::default();
        assert_eq!(t.as_bytes(), &[0u8; 8]);
    }

    #[test]
    fn vertex_layout_is_packed() {
        let v = Vertex::new([1.0, 2.0, 3.0], [0.1, 0.2, 0.3], [0.5, 0.75]);
        let floats: &[f32] = bytemuck::cast_slice(bytemuck::bytes_of(&v));
        assert_eq!(floats, &[1.0, 2.0, 3.0, 0.1, 0.2, 0.3, 0.5, 0.75]);
    }
}
