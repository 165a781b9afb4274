//! # Mesh Snapshot
//!
//! The four arrays a triangle-mesh renderer consumes for one revision of a
//! shape.
//!
//! A snapshot is assembled fresh on every rebuild and never mutated
//! afterwards. [`TexturedMesh`](crate::TexturedMesh) hands it out behind an
//! `Arc`, so a reader holding an older snapshot keeps a consistent view while
//! a newer one is installed.

use config::constants::DEFAULT_SMOOTHING_GROUP;
use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::error::{MeshError, MeshResult};

/// Points, texture coordinates, faces and smoothing groups of one mesh
/// revision.
///
/// # Layout
///
/// ```text
/// points           [x, y, z, ...]            3 per vertex
/// tex_coords       [u, v, ...]               2 per texture coordinate
/// faces            [p0, t0, p1, t1, p2, t2]  6 per triangle
/// smoothing_groups [g, ...]                  1 per triangle
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeshSnapshot {
    points: Vec<f32>,
    tex_coords: Vec<f32>,
    faces: Vec<u32>,
    smoothing_groups: Vec<u32>,
}

impl MeshSnapshot {
    /// Assembles and validates a snapshot.
    ///
    /// Without custom smoothing groups every face gets the default group,
    /// so the whole surface is shaded smooth.
    ///
    /// # Errors
    ///
    /// - [`MeshError::FaceArrayLength`] when `faces` is not 6 entries per
    ///   triangle
    /// - [`MeshError::IndexOutOfBounds`] for a vertex index past the points
    /// - [`MeshError::TexCoordOutOfRange`] for a texcoord index past the
    ///   texture coordinates
    /// - [`MeshError::SmoothingGroupMismatch`] when custom groups are not one
    ///   per triangle
    ///
    /// # Example
    ///
    /// ```rust
    /// use textured_mesh::MeshSnapshot;
    ///
    /// let snapshot = MeshSnapshot::assemble(
    ///     vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
    ///     vec![0.0, 0.0],
    ///     vec![0, 0, 1, 0, 2, 0],
    ///     1,
    ///     None,
    /// )
    /// .unwrap();
    /// assert_eq!(snapshot.smoothing_groups(), &[1]);
    /// ```
    pub fn assemble(
        points: Vec<f32>,
        tex_coords: Vec<f32>,
        faces: Vec<u32>,
        triangle_count: usize,
        smoothing_groups: Option<&[u32]>,
    ) -> MeshResult<Self> {
        let expected = triangle_count * 6;
        if faces.len() != expected {
            return Err(MeshError::FaceArrayLength {
                len: faces.len(),
                expected,
            });
        }

        let vertex_count = points.len() / 3;
        let tex_coord_count = tex_coords.len() / 2;
        for (i, record) in faces.chunks_exact(6).enumerate() {
            for pair in record.chunks_exact(2) {
                let (vertex, tex) = (pair[0], pair[1]);
                if vertex as usize >= vertex_count {
                    return Err(MeshError::IndexOutOfBounds {
                        face: i,
                        index: vertex,
                        len: vertex_count,
                    });
                }
                if tex as usize >= tex_coord_count {
                    return Err(MeshError::TexCoordOutOfRange {
                        index: tex,
                        len: tex_coord_count,
                    });
                }
            }
        }

        let smoothing_groups = match smoothing_groups {
            None => vec![DEFAULT_SMOOTHING_GROUP; triangle_count],
            Some(groups) if groups.len() == triangle_count => groups.to_vec(),
            Some(groups) => {
                log::warn!(
                    "rejected {} smoothing groups for {triangle_count} faces",
                    groups.len()
                );
                return Err(MeshError::SmoothingGroupMismatch {
                    faces: triangle_count,
                    groups: groups.len(),
                });
            }
        };

        Ok(Self {
            points,
            tex_coords,
            faces,
            smoothing_groups,
        })
    }

    /// Returns a copy with the point array replaced.
    ///
    /// Texture coordinates, faces and smoothing groups are shared unchanged,
    /// so the vertex count must stay the same.
    pub fn with_points(&self, points: Vec<f32>) -> MeshResult<Self> {
        if points.len() != self.points.len() {
            return Err(MeshError::length_mismatch(
                "point coordinates",
                points.len(),
                self.points.len(),
            ));
        }
        Ok(Self {
            points,
            ..self.clone()
        })
    }

    /// Returns the flattened vertex coordinates.
    #[inline]
    pub fn points(&self) -> &[f32] {
        &self.points
    }

    /// Returns the flattened texture coordinates.
    #[inline]
    pub fn tex_coords(&self) -> &[f32] {
        &self.tex_coords
    }

    /// Returns the flattened face array.
    #[inline]
    pub fn faces(&self) -> &[u32] {
        &self.faces
    }

    #[inline]
    pub fn smoothing_groups(&self) -> &[u32] {
        &self.smoothing_groups
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.points.len() / 3
    }

    /// Returns the number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.faces.len() / 6
    }

    /// Returns the number of texture coordinates.
    #[inline]
    pub fn tex_coord_count(&self) -> usize {
        self.tex_coords.len() / 2
    }

    /// Returns true if the snapshot has no triangles.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Computes the axis-aligned bounding box of the points.
    ///
    /// Returns (min, max) corners of the bounding box.
    pub fn bounding_box(&self) -> (DVec3, DVec3) {
        let mut points = self
            .points
            .chunks_exact(3)
            .map(|p| DVec3::new(p[0] as f64, p[1] as f64, p[2] as f64));
        let Some(first) = points.next() else {
            return (DVec3::ZERO, DVec3::ZERO);
        };
        points.fold((first, first), |(min, max), v| (min.min(v), max.max(v)))
    }
}
