//! # Cube Primitive
//!
//! Generates the vertex and face lists of a box.

use glam::DVec3;

use super::Shape;
use crate::error::{MeshError, MeshResult};
use crate::geometry::{Face3, Geometry, Point3D};
use crate::texture::SurfaceArea;

/// Creates a cube or rectangular prism.
///
/// # Arguments
///
/// * `size` - Dimensions [x, y, z]
/// * `center` - If true, center at origin; if false, corner at origin
///
/// # Returns
///
/// A shape with 8 vertices and 12 triangles (2 per side), wound
/// counter-clockwise seen from outside. Each vertex carries its height
/// above the bottom face, normalized to `[0, 1]`, as parametric value.
///
/// # Example
///
/// ```rust
/// use textured_mesh::primitives::create_cube;
/// use glam::DVec3;
///
/// let shape = create_cube(DVec3::splat(10.0), false).unwrap();
/// assert_eq!(shape.geometry.vertex_count(), 8);
/// assert_eq!(shape.geometry.face_count(), 12);
/// ```
pub fn create_cube(size: DVec3, center: bool) -> MeshResult<Shape> {
    if size.x <= 0.0 || size.y <= 0.0 || size.z <= 0.0 {
        return Err(MeshError::invalid_shape(format!(
            "Cube size must be positive: {size:?}"
        )));
    }

    let (min, max) = if center {
        let half = size / 2.0;
        (-half, half)
    } else {
        (DVec3::ZERO, size)
    };

    let corner = |x: f64, y: f64, z: f64, f: f32| {
        Point3D::with_value(x as f32, y as f32, z as f32, f)
    };
    let vertices = vec![
        corner(min.x, min.y, min.z, 0.0), // 0: left-front-bottom
        corner(max.x, min.y, min.z, 0.0), // 1: right-front-bottom
        corner(max.x, max.y, min.z, 0.0), // 2: right-back-bottom
        corner(min.x, max.y, min.z, 0.0), // 3: left-back-bottom
        corner(min.x, min.y, max.z, 1.0), // 4: left-front-top
        corner(max.x, min.y, max.z, 1.0), // 5: right-front-top
        corner(max.x, max.y, max.z, 1.0), // 6: right-back-top
        corner(min.x, max.y, max.z, 1.0), // 7: left-back-top
    ];

    let faces = [
        [0u32, 2, 1], // bottom
        [0, 3, 2],
        [4, 5, 6], // top
        [4, 6, 7],
        [0, 1, 5], // front
        [0, 5, 4],
        [2, 3, 7], // back
        [2, 7, 6],
        [3, 0, 4], // left
        [3, 4, 7],
        [1, 2, 6], // right
        [1, 6, 5],
    ]
    .into_iter()
    .map(Face3::from)
    .collect();

    Ok(Shape {
        geometry: Geometry::new(vertices, faces)?,
        grid: None,
        area: SurfaceArea::default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_cube_counts() {
        let shape = create_cube(DVec3::splat(10.0), false).unwrap();
        assert_eq!(shape.geometry.vertex_count(), 8);
        assert_eq!(shape.geometry.face_count(), 12);
        assert!(!shape.geometry.has_texture_faces());
    }

    #[test]
    fn test_cube_centered() {
        let shape = create_cube(DVec3::splat(10.0), true).unwrap();
        let (min, max) = shape.geometry.bounding_box();
        assert_eq!(min, DVec3::splat(-5.0));
        assert_eq!(max, DVec3::splat(5.0));
    }

    #[test]
    fn test_cube_area() {
        let shape = create_cube(DVec3::new(1.0, 2.0, 3.0), false).unwrap();
        assert_relative_eq!(shape.geometry.area(), 2.0 * (2.0 + 3.0 + 6.0));
    }

    #[test]
    fn test_cube_outward_winding() {
        let shape = create_cube(DVec3::ONE, true).unwrap();
        let geometry = &shape.geometry;
        for i in 0..geometry.face_count() {
            let [v0, v1, v2] = geometry.triangle(i);
            let normal = (v1 - v0).cross(v2 - v0);
            let centroid = (v0 + v1 + v2) / 3.0;
            assert!(normal.dot(centroid) > 0.0, "face {i} points inward");
        }
    }

    #[test]
    fn test_cube_invalid_size() {
        let result = create_cube(DVec3::new(0.0, 10.0, 10.0), false);
        assert!(matches!(result, Err(MeshError::InvalidShape(_))));
    }
}
