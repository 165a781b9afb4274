//! # Plane Primitive
//!
//! Generates a segmented rectangle in the XY plane together with its UV
//! grid, so it can be textured with images and patterns.

use super::Shape;
use crate::error::{MeshError, MeshResult};
use crate::geometry::{Face3, Geometry, Point3D};
use crate::texture::{SurfaceArea, TextureGrid};

/// Creates a `width` × `height` rectangle split into `segments_x` ×
/// `segments_y` cells, two triangles per cell.
///
/// Vertices are laid out row-major from the `(0, 0)` corner, in the same
/// order as the image UV grid, so vertex `i` and texcoord `i` coincide and
/// the texture-face list equals the face list. Each vertex carries its
/// horizontal position in `[0, 1]` as parametric value.
///
/// # Example
///
/// ```rust
/// use textured_mesh::primitives::create_plane;
///
/// let shape = create_plane(4.0, 2.0, 4, 2).unwrap();
/// assert_eq!(shape.geometry.vertex_count(), 15);
/// assert_eq!(shape.geometry.face_count(), 16);
/// ```
pub fn create_plane(width: f64, height: f64, segments_x: u32, segments_y: u32) -> MeshResult<Shape> {
    if width <= 0.0 || height <= 0.0 {
        return Err(MeshError::invalid_shape(format!(
            "Plane size must be positive: {width}x{height}"
        )));
    }
    let grid = TextureGrid::new(segments_x, segments_y)?;
    let columns = segments_x + 1;

    let mut vertices = Vec::with_capacity(grid.point_count());
    for j in 0..=segments_y {
        let v = j as f64 / segments_y as f64;
        for i in 0..=segments_x {
            let u = i as f64 / segments_x as f64;
            vertices.push(Point3D::with_value(
                (u * width) as f32,
                (v * height) as f32,
                0.0,
                u as f32,
            ));
        }
    }

    let mut faces = Vec::with_capacity((segments_x * segments_y * 2) as usize);
    for j in 0..segments_y {
        for i in 0..segments_x {
            let a = j * columns + i;
            let b = a + 1;
            let c = a + columns;
            let d = c + 1;
            faces.push(Face3::new(a, b, d));
            faces.push(Face3::new(a, d, c));
        }
    }

    let texture_faces = faces.clone();
    let geometry = Geometry::new(vertices, faces)?.with_texture_faces(texture_faces)?;
    Ok(Shape {
        geometry,
        grid: Some(grid),
        area: SurfaceArea { width, height },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_plane_counts() {
        let shape = create_plane(1.0, 1.0, 3, 2).unwrap();
        assert_eq!(shape.geometry.vertex_count(), 12);
        assert_eq!(shape.geometry.face_count(), 12);
        assert_eq!(shape.grid, Some(TextureGrid::new(3, 2).unwrap()));
    }

    #[test]
    fn test_plane_area_matches_size() {
        let shape = create_plane(4.0, 2.5, 5, 3).unwrap();
        assert_relative_eq!(shape.geometry.area(), 10.0, epsilon = 1e-6);
        assert_eq!(shape.area.aspect(), Some(2.5 / 4.0));
    }

    #[test]
    fn test_plane_faces_point_up() {
        let shape = create_plane(1.0, 1.0, 2, 2).unwrap();
        for i in 0..shape.geometry.face_count() {
            let [v0, v1, v2] = shape.geometry.triangle(i);
            assert!((v1 - v0).cross(v2 - v0).z > 0.0);
        }
    }

    #[test]
    fn test_plane_rejects_zero_segments() {
        assert!(matches!(
            create_plane(1.0, 1.0, 0, 2),
            Err(MeshError::InvalidTextureGrid { .. })
        ));
        assert!(create_plane(-1.0, 1.0, 1, 1).is_err());
    }
}
