use meadow_common::Vertex;

use crate::mesh::{Mesh, MeshError};

/// Square ground quad of edge length `size`, centered on the origin in the XZ plane.
///
/// Corners carry distinct debug colors; UVs span the full texture.
pub fn ground_plane(size: f32) -> Result<Mesh, MeshError> {
    if !(size.is_finite() && size > 0.0) {
        return Err(MeshError::InvalidPlaneSize(size));
    }
    let h = size * 0.5;

    #[rustfmt::skip]
    let vertices = vec![
        Vertex::new([-h, 0.0,  h], [1.0, 0.0, 0.0], [1.0, 0.0]),
        Vertex::new([ h, 0.0,  h], [0.0, 1.0, 0.0], [0.0, 0.0]),
        Vertex::new([ h, 0.0, -h], [0.0, 0.0, 1.0], [0.0, 1.0]),
        Vertex::new([-h, 0.0, -h], [1.0, 1.0, 1.0], [1.0, 1.0]),
    ];
    let indices = vec![0, 1, 2, 2, 3, 0];

    Ok(Mesh { vertices, indices })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plane_spans_size() {
        let mesh = ground_plane(15.0).unwrap();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.triangle_count(), 2);
        assert!(mesh.indices_in_range());
        for v in &mesh.vertices {
            assert_eq!(v.position[1], 0.0);
            assert_eq!(v.position[0].abs(), 7.5);
            assert_eq!(v.position[2].abs(), 7.5);
        }
    }

    #[test]
    fn corner_colors_and_uvs() {
        let mesh = ground_plane(15.0).unwrap();
        #[rustfmt::skip]
        let expected = [
            Vertex::new([-7.5, 0.0,  7.5], [1.0, 0.0, 0.0], [1.0, 0.0]),
            Vertex::new([ 7.5, 0.0,  7.5], [0.0, 1.0, 0.0], [0.0, 0.0]),
            Vertex::new([ 7.5, 0.0, -7.5], [0.0, 0.0, 1.0], [0.0, 1.0]),
            Vertex::new([-7.5, 0.0, -7.5], [1.0, 1.0, 1.0], [1.0, 1.0]),
        ];
        assert_eq!(mesh.vertices, expected);
        assert_eq!(mesh.indices, [0, 1, 2, 2, 3, 0]);
    }

    #[test]
    fn plane_faces_up() {
        let mesh = ground_plane(2.0).unwrap();
        for [a, b, c] in mesh.triangles() {
            let a = glam::Vec3::from(a);
            let n = (glam::Vec3::from(b) - a).cross(glam::Vec3::from(c) - a);
            assert!(n.y > 0.0);
        }
    }

    #[test]
    fn rejects_bad_size() {
        assert_eq!(ground_plane(0.0), Err(MeshError::InvalidPlaneSize(0.0)));
        assert!(ground_plane(f32::INFINITY).is_err());
    }
}
