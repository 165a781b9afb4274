//! # Ray Intersection Query
//!
//! Finds the faces a ray passes through.
//!
//! Results come back in face-list order (the order a scan over all faces
//! discovers them), not sorted by distance. [`sort_by_distance`] orders
//! them along the ray when a caller needs that.
//!
//! Each crossing of the surface is reported once. A ray through the edge
//! shared by two coplanar triangles hits both, and only the first in face
//! order is kept.

use config::constants::{AREA_EPSILON, EPSILON};
use glam::DVec3;
use rayon::prelude::*;

use crate::error::{MeshError, MeshResult};
use crate::faces::faces_with_face_slots;
use crate::geometry::{Face3, Geometry, Point3D};

/// One face hit by a ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    /// Position of the face in the geometry face list.
    pub face_index: usize,
    pub face: Face3,
    /// Ray parameter of the hit; the distance when the direction is a unit
    /// vector.
    pub t: f64,
}

impl Intersection {
    /// Returns the hit point for a ray starting at `origin` along `direction`.
    pub fn point(&self, origin: Point3D, direction: Point3D) -> Point3D {
        Point3D::from(origin.to_dvec3() + direction.to_dvec3() * self.t)
    }
}

/// Möller–Trumbore ray-triangle intersection algorithm.
///
/// Returns the ray parameter of the hit, or `None` when the ray misses, runs
/// parallel to the triangle or hits behind its origin. Hits on an edge count
/// for both triangles sharing it; [`intersections`] merges them.
pub fn ray_triangle_intersection(
    ray_origin: DVec3,
    ray_dir: DVec3,
    v0: DVec3,
    v1: DVec3,
    v2: DVec3,
) -> Option<f64> {
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;
    let h = ray_dir.cross(edge2);
    let a = edge1.dot(h);

    // Ray is parallel to triangle
    if a.abs() < EPSILON {
        return None;
    }

    let f = 1.0 / a;
    let s = ray_origin - v0;
    let u = f * s.dot(h);

    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = f * ray_dir.dot(q);

    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = f * edge2.dot(q);
    (t > EPSILON).then_some(t)
}

/// Returns every face of `geometry` hit by the ray, in face-list order.
///
/// # Errors
///
/// A zero direction cannot define a ray and is rejected.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use textured_mesh::geometry::Point3D;
/// use textured_mesh::intersect::intersections;
/// use textured_mesh::primitives::create_cube;
///
/// let cube = create_cube(DVec3::ONE, false).unwrap().geometry;
/// let hits = intersections(
///     &cube,
///     Point3D::new(-1.0, 0.3, 0.6),
///     Point3D::new(1.0, 0.0, 0.0),
/// )
/// .unwrap();
/// assert_eq!(hits.len(), 2);
/// ```
pub fn intersections(
    geometry: &Geometry,
    origin: Point3D,
    direction: Point3D,
) -> MeshResult<Vec<Intersection>> {
    let ray_origin = origin.to_dvec3();
    let ray_dir = direction.to_dvec3();
    if ray_dir.length_squared() < EPSILON {
        return Err(MeshError::invalid_shape("ray direction must not be zero"));
    }

    let candidates: Vec<(Intersection, DVec3)> = geometry
        .faces()
        .par_iter()
        .enumerate()
        .filter_map(|(face_index, &face)| {
            let [v0, v1, v2] = geometry.triangle(face_index);
            let normal = (v1 - v0).cross(v2 - v0);
            // Degenerate triangle
            if normal.length() < AREA_EPSILON {
                return None;
            }
            let t = ray_triangle_intersection(ray_origin, ray_dir, v0, v1, v2)?;
            let hit = Intersection {
                face_index,
                face,
                t,
            };
            Some((hit, normal.normalize()))
        })
        .collect();

    let mut kept: Vec<(Intersection, DVec3)> = Vec::with_capacity(candidates.len());
    for (hit, normal) in candidates {
        if !kept.iter().any(|(other, n)| same_crossing(other, *n, &hit, normal)) {
            kept.push((hit, normal));
        }
    }
    Ok(kept.into_iter().map(|(hit, _)| hit).collect())
}

/// Two hits are one crossing when they lie at the same ray parameter on the
/// same plane.
fn same_crossing(a: &Intersection, a_normal: DVec3, b: &Intersection, b_normal: DVec3) -> bool {
    let tolerance = EPSILON * a.t.abs().max(b.t.abs()).max(1.0);
    (a.t - b.t).abs() < tolerance && a_normal.cross(b_normal).length() < EPSILON.sqrt()
}

/// Orders intersections from nearest to farthest along the ray.
///
/// Hits at the same distance keep their discovery order.
pub fn sort_by_distance(hits: &mut [Intersection]) {
    hits.sort_by(|a, b| a.t.total_cmp(&b.t));
}

/// Builds a per-face colored face array marking the hit faces.
///
/// Hit faces take the last of `colors` palette slots, all others slot 0.
pub fn highlight_faces(
    geometry: &Geometry,
    hits: &[Intersection],
    colors: usize,
) -> MeshResult<Vec<u32>> {
    let marked = colors.saturating_sub(1) as u32;
    let mut slots = vec![0; geometry.face_count()];
    for hit in hits {
        let len = slots.len();
        let slot = slots
            .get_mut(hit.face_index)
            .ok_or(MeshError::IndexOutOfBounds {
                face: hit.face_index,
                index: hit.face_index as u32,
                len,
            })?;
        *slot = marked;
    }
    faces_with_face_slots(geometry.faces(), &slots)
}
