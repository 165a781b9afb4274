//! # Geometry Model
//!
//! Points, triangular faces and the per-rebuild geometry produced by a shape
//! generator.
//!
//! A [`Geometry`] is validated once when it is created and then treated as a
//! read-only input until the generator replaces it. List order defines vertex
//! identity: a [`Face3`] refers to vertices by position.


use config::constants::MIN_POLYGON_SIDES;
use glam::DVec3;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::error::{MeshError, MeshResult};

/// A vertex position with the generator's parametric value.
///
/// Coordinates are single precision, as handed to the renderer. The `f`
/// value is an auxiliary scalar assigned by the shape generator (for example
/// the curve parameter along a spring) and is what the 1-D coloring function
/// receives.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point3D {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Parametric value carried along with the position.
    #[serde(default)]
    pub f: f32,
}

impl Point3D {
    /// The origin, with a zero parametric value.
    pub const ORIGIN: Self = Self::new(0.0, 0.0, 0.0);

    /// Creates a point with a zero parametric value.
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z, f: 0.0 }
    }

    /// Creates a point carrying a parametric value.
    pub const fn with_value(x: f32, y: f32, z: f32, f: f32) -> Self {
        Self { x, y, z, f }
    }

    /// Returns the position in double precision.
    #[inline]
    pub fn to_dvec3(self) -> DVec3 {
        DVec3::new(self.x as f64, self.y as f64, self.z as f64)
    }

    /// Returns the point with its position multiplied by `factor`.
    ///
    /// The parametric value is kept.
    pub fn scaled(self, factor: f32) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
            z: self.z * factor,
            f: self.f,
        }
    }
}

impl From<DVec3> for Point3D {
    fn from(v: DVec3) -> Self {
        Self::new(v.x as f32, v.y as f32, v.z as f32)
    }
}

/// Three indices into a vertex list or a texture-coordinate list.
///
/// Index order defines the winding of the triangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Face3 {
    pub p0: u32,
    pub p1: u32,
    pub p2: u32,
}

impl Face3 {
    /// Creates a face from three indices.
    pub const fn new(p0: u32, p1: u32, p2: u32) -> Self {
        Self { p0, p1, p2 }
    }

    /// Returns the indices in winding order.
    #[inline]
    pub fn indices(self) -> [u32; 3] {
        [self.p0, self.p1, self.p2]
    }

    /// Checks that all three indices are distinct and below `len`.
    ///
    /// `face` is the position of this face in its list, used for error
    /// reporting only.
    pub fn validate(self, face: usize, len: usize) -> MeshResult<()> {
        for index in self.indices() {
            if index as usize >= len {
                return Err(MeshError::IndexOutOfBounds { face, index, len });
            }
        }
        self.validate_distinct(face)
    }

    /// Checks that the three indices are pairwise distinct.
    pub fn validate_distinct(self, face: usize) -> MeshResult<()> {
        if self.p0 == self.p1 || self.p1 == self.p2 || self.p0 == self.p2 {
            return Err(MeshError::degenerate(
                face,
                format!("repeated index in {:?}", self.indices()),
            ));
        }
        Ok(())
    }
}

impl From<[u32; 3]> for Face3 {
    fn from([p0, p1, p2]: [u32; 3]) -> Self {
        Self::new(p0, p1, p2)
    }
}

/// Cross-section of a swept shape.
///
/// Only the cross-section math depends on it; texture synthesis ignores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SectionType {
    #[default]
    Circle,
    /// Regular polygon with the given number of sides.
    Polygon(u32),
}

impl SectionType {
    /// Creates a polygonal section, rejecting fewer than three sides.
    ///
    /// # Example
    ///
    /// ```rust
    /// use textured_mesh::geometry::SectionType;
    ///
    /// assert!(SectionType::polygon(6).is_ok());
    /// assert!(SectionType::polygon(2).is_err());
    /// ```
    pub fn polygon(sides: u32) -> MeshResult<Self> {
        if sides < MIN_POLYGON_SIDES {
            return Err(MeshError::InvalidSection {
                sides,
                min: MIN_POLYGON_SIDES,
            });
        }
        Ok(Self::Polygon(sides))
    }

    /// Returns the number of sides, or `None` for a circle.
    pub fn sides(self) -> Option<u32> {
        match self {
            Self::Circle => None,
            Self::Polygon(n) => Some(n),
        }
    }

    /// Radial scale of the section at `angle` (radians) relative to its
    /// circumscribed circle.
    ///
    /// Always 1 for a circle.
    pub fn polygonal_section(self, angle: f64) -> f64 {
        let Self::Polygon(n) = self else {
            return 1.0;
        };
        let n = n as f64;
        (PI / n).cos() / ((2.0 * (1.0 / (n * angle / 2.0).tan()).atan()) / n).cos()
    }

    /// Length of the section outline for the given radius.
    ///
    /// `2πr` for a circle.
    pub fn polygonal_size(self, radius: f64) -> f64 {
        let Self::Polygon(n) = self else {
            return 2.0 * PI * radius;
        };
        let n = n as f64;
        n * (PI / n).cos() * (-1.0 - 2.0 / (-1.0 + (PI / n).sin())).ln() * radius
    }
}

/// Vertex and face lists of one shape revision.
///
/// The optional texture-face list runs parallel to the face list: entry `i`
/// holds the texture-coordinate indices for the corners of face `i`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    vertices: Vec<Point3D>,
    faces: Vec<Face3>,
    texture_faces: Vec<Face3>,
}

impl Geometry {
    /// Creates a geometry, validating every face against the vertex list.
    ///
    /// # Example
    ///
    /// ```rust
    /// use textured_mesh::geometry::{Face3, Geometry, Point3D};
    ///
    /// let geometry = Geometry::new(
    ///     vec![
    ///         Point3D::new(0.0, 0.0, 0.0),
    ///         Point3D::new(1.0, 0.0, 0.0),
    ///         Point3D::new(0.0, 1.0, 0.0),
    ///     ],
    ///     vec![Face3::new(0, 1, 2)],
    /// )
    /// .unwrap();
    /// assert_eq!(geometry.face_count(), 1);
    /// ```
    pub fn new(vertices: Vec<Point3D>, faces: Vec<Face3>) -> MeshResult<Self> {
        for (i, face) in faces.iter().enumerate() {
            face.validate(i, vertices.len())?;
        }
        Ok(Self {
            vertices,
            faces,
            texture_faces: Vec::new(),
        })
    }

    /// Attaches a texture-face list parallel to the face list.
    ///
    /// Texture indices are checked against the texture-coordinate array when
    /// the mesh is assembled, since that array does not exist yet.
    pub fn with_texture_faces(mut self, texture_faces: Vec<Face3>) -> MeshResult<Self> {
        if !texture_faces.is_empty() && texture_faces.len() != self.faces.len() {
            return Err(MeshError::TextureFaceMismatch {
                faces: self.faces.len(),
                texture_faces: texture_faces.len(),
            });
        }
        for (i, face) in texture_faces.iter().enumerate() {
            face.validate_distinct(i)?;
        }
        self.texture_faces = texture_faces;
        Ok(self)
    }

    #[inline]
    pub fn vertices(&self) -> &[Point3D] {
        &self.vertices
    }

    #[inline]
    pub fn faces(&self) -> &[Face3] {
        &self.faces
    }

    #[inline]
    pub fn texture_faces(&self) -> &[Face3] {
        &self.texture_faces
    }

    #[inline]
    pub fn has_texture_faces(&self) -> bool {
        !self.texture_faces.is_empty()
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Returns the first vertex, or the origin for an empty geometry.
    pub fn origin(&self) -> Point3D {
        self.vertices.first().copied().unwrap_or(Point3D::ORIGIN)
    }

    /// Returns the three corners of face `index` in double precision.
    pub fn triangle(&self, index: usize) -> [DVec3; 3] {
        let face = self.faces[index];
        face.indices()
            .map(|i| self.vertices[i as usize].to_dvec3())
    }

    /// Returns the centroid of face `index`.
    ///
    /// The parametric value is the mean of the corner values.
    pub fn face_centroid(&self, index: usize) -> Point3D {
        let face = self.faces[index];
        let [a, b, c] = face.indices().map(|i| self.vertices[i as usize]);
        Point3D::with_value(
            (a.x + b.x + c.x) / 3.0,
            (a.y + b.y + c.y) / 3.0,
            (a.z + b.z + c.z) / 3.0,
            (a.f + b.f + c.f) / 3.0,
        )
    }

    /// Computes the axis-aligned bounding box.
    ///
    /// Returns (min, max) corners of the bounding box.
    pub fn bounding_box(&self) -> (DVec3, DVec3) {
        let mut points = self.vertices.iter().map(|p| p.to_dvec3());
        let Some(first) = points.next() else {
            return (DVec3::ZERO, DVec3::ZERO);
        };
        points.fold((first, first), |(min, max), v| (min.min(v), max.max(v)))
    }

    /// Total surface area of all faces.
    pub fn area(&self) -> f64 {
        (0..self.faces.len())
            .map(|i| {
                let [v0, v1, v2] = self.triangle(i);
                (v1 - v0).cross(v2 - v0).length() / 2.0
            })
            .sum()
    }

    /// Exports vertices as a flattened `[x, y, z, ...]` array, multiplied by
    /// `factor`.
    pub fn vertices_f32(&self, factor: f32) -> Vec<f32> {
        let mut result = Vec::with_capacity(self.vertices.len() * 3);
        for p in &self.vertices {
            result.extend_from_slice(&[p.x * factor, p.y * factor, p.z * factor]);
        }
        result
    }
}
