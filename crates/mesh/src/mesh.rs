use meadow_common::Vertex;

/// Errors from procedural mesh generation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MeshError {
    #[error("radius must be positive and finite, got {0}")]
    InvalidRadius(f32),
    #[error("latitude segments must be at least 1, got {0}")]
    InvalidLatitudeSegments(u32),
    #[error("longitude segments must be at least 1, got {0}")]
    InvalidLongitudeSegments(u32),
    #[error("plane size must be positive and finite, got {0}")]
    InvalidPlaneSize(f32),
    #[error("mesh with {latitude}x{longitude} segments exceeds 32-bit indexing")]
    TooManyVertices { latitude: u32, longitude: u32 },
}

/// Indexed triangle-list geometry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// True when every index references an existing vertex.
    pub fn indices_in_range(&self) -> bool {
        let n = self.vertices.len();
        self.indices.iter().all(|&i| (i as usize) < n)
    }

    /// Iterate triangles as vertex position triples.
    ///
    /// Panics if an index is out of range; check [`indices_in_range`](Self::indices_in_range) first
    /// for meshes not built by this crate.
    pub fn triangles(&self) -> impl Iterator<Item = [[f32; 3]; 3]> + '_ {
        self.indices.chunks_exact(3).map(|tri| {
            [
                self.vertices[tri[0] as usize].position,
                self.vertices[tri[1] as usize].position,
                self.vertices[tri[2] as usize].position,
            ]
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_mesh_counts() {
        let m = Mesh::default();
        assert_eq!(m.vertex_count(), 0);
        assert_eq!(m.triangle_count(), 0);
        assert!(m.indices_in_range());
    }

    #[test]
    fn out_of_range_index_detected() {
        let m = Mesh {
            vertices: vec![Vertex::default(); 3],
            indices: vec![0, 1, 3],
        };
        assert!(!m.indices_in_range());
    }
}
