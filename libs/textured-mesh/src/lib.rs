//! # Textured Mesh
//!
//! Texture-coordinate and face-index synthesis for triangle meshes.
//! Turns a shape generator's vertex and face lists plus a texture mode into
//! the arrays a generic triangle-mesh renderer consumes.
//!
//! ## Architecture
//!
//! ```text
//! primitives (Shape) → TexturedMesh
//!                        ├─ palette   build_palette
//!                        ├─ texture   synthesize
//!                        ├─ faces     rebuild_faces
//!                        └─ mesh      MeshSnapshot::assemble → Arc swap
//! ```
//!
//! ## Texture modes
//!
//! - **None**: plain diffuse color
//! - **Image**: UV grid in forward or reverse row order
//! - **Pattern**: tiled grid, aspect-corrected
//! - **Colored vertices (1-D / 3-D)**: function or density mapped onto
//!   palette slots
//! - **Colored faces**: one palette slot per face
//!
//! ## Usage
//!
//! ```rust
//! use glam::DVec3;
//! use textured_mesh::primitives::create_cube;
//! use textured_mesh::{build_mesh, TextureMode};
//!
//! let mesh = build_mesh(
//!     create_cube(DVec3::ONE, true).unwrap(),
//!     TextureMode::Faces { colors: 12, palette: None },
//! )
//! .unwrap();
//! let snapshot = mesh.snapshot().unwrap();
//! assert_eq!(snapshot.triangle_count(), 12);
//! ```

pub mod error;
pub mod faces;
pub mod geometry;
pub mod intersect;
pub mod mapping;
pub mod material;
pub mod mesh;
pub mod palette;
pub mod primitives;
pub mod texture;
pub mod textured;

pub use error::{MeshError, MeshResult};
pub use geometry::{Face3, Geometry, Point3D, SectionType};
pub use intersect::Intersection;
pub use material::{CarbonPattern, Material};
pub use mesh::MeshSnapshot;
pub use palette::{ColorPalette, Palette, Rgba};
pub use texture::TextureType;
pub use textured::{TextureMode, TextureSettings, TexturedMesh};

/// Loads a generated shape, selects a texture mode and builds the mesh.
///
/// This is the main entry point for one-shot mesh generation.
///
/// # Arguments
///
/// * `shape` - Output of a shape generator
/// * `mode` - Texture mode and its parameters
///
/// # Returns
///
/// A built [`TexturedMesh`] whose snapshot is ready to render.
pub fn build_mesh(shape: primitives::Shape, mode: TextureMode) -> MeshResult<TexturedMesh> {
    let mut mesh = TexturedMesh::new();
    mesh.load_shape(shape)?;
    mesh.set_texture_mode(mode)?;
    mesh.create_mesh()?;
    Ok(mesh)
}
