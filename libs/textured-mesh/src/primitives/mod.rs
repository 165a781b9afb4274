//! # Primitives
//!
//! Reference shape generators producing the vertex, face and texture-face
//! lists a [`TexturedMesh`](crate::TexturedMesh) consumes.

pub mod cube;
pub mod plane;

pub use cube::create_cube;
pub use plane::create_plane;

use crate::geometry::Geometry;
use crate::texture::{SurfaceArea, TextureGrid};

/// Output of a shape generator.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub geometry: Geometry,
    /// UV grid the texture faces are laid on, if the shape has one.
    pub grid: Option<TextureGrid>,
    /// Surface size used for pattern aspect correction.
    pub area: SurfaceArea,
}
