//! # Face-Index Rebuilder
//!
//! Regenerates the flattened face array consumed by the renderer. Each
//! triangle is written as three (vertex index, texcoord index) pairs:
//!
//! ```text
//! [p0, t0, p1, t1, p2, t2,  p0, t0, ...]
//! ```
//!
//! The vertex column always copies the geometry face in winding order. Only
//! the texcoord column depends on the texture mode.


use rayon::prelude::*;

use crate::error::{MeshError, MeshResult};
use crate::geometry::{Face3, Geometry};
use crate::mapping::{
    face_slots, map_values, vertex_values_1d, vertex_values_3d, DensityFn, FaceColoring,
    ScalarFn, ValueRange,
};
use crate::texture::TextureType;

/// Writes each face with the texcoord triple returned by `tex`.
fn interleave<F>(faces: &[Face3], tex: F) -> Vec<u32>
where
    F: Fn(usize, Face3) -> [u32; 3] + Sync,
{
    faces
        .par_iter()
        .enumerate()
        .flat_map_iter(|(i, &face)| {
            let [p0, p1, p2] = face.indices();
            let [t0, t1, t2] = tex(i, face);
            [p0, t0, p1, t1, p2, t2]
        })
        .collect()
}

/// Every corner uses texcoord 0.
pub fn faces_without_texture(faces: &[Face3]) -> Vec<u32> {
    interleave(faces, |_, _| [0, 0, 0])
}

/// Every corner uses the texcoord with its own vertex index.
///
/// The texture-coordinate array must then hold one entry per vertex.
pub fn faces_with_vertices(faces: &[Face3]) -> Vec<u32> {
    interleave(faces, |_, face| face.indices())
}

/// Corners take their texcoord from the parallel texture-face list.
pub fn faces_with_textures(faces: &[Face3], texture_faces: &[Face3]) -> MeshResult<Vec<u32>> {
    if faces.len() != texture_faces.len() {
        return Err(MeshError::TextureFaceMismatch {
            faces: faces.len(),
            texture_faces: texture_faces.len(),
        });
    }
    Ok(interleave(faces, |i, _| texture_faces[i].indices()))
}

/// Corners take the palette slot of their vertex.
///
/// `slots` holds one slot per vertex, so shared vertices always get the same
/// color.
pub fn faces_with_vertex_slots(faces: &[Face3], slots: &[u32]) -> MeshResult<Vec<u32>> {
    for (i, face) in faces.iter().enumerate() {
        face.validate(i, slots.len())?;
    }
    Ok(interleave(faces, |_, face| {
        face.indices().map(|p| slots[p as usize])
    }))
}

/// All three corners of a face take that face's palette slot.
pub fn faces_with_face_slots(faces: &[Face3], slots: &[u32]) -> MeshResult<Vec<u32>> {
    if faces.len() != slots.len() {
        return Err(MeshError::length_mismatch("face slots", slots.len(), faces.len()));
    }
    Ok(interleave(faces, |i, _| [slots[i]; 3]))
}

/// Parameters of the colored texture modes.
#[derive(Clone, Copy)]
pub struct ColorMapping<'a> {
    pub colors: usize,
    pub density: &'a DensityFn,
    pub function: &'a ScalarFn,
    pub range: ValueRange,
    pub face_coloring: FaceColoring,
}

/// Rebuilds the face array for `texture_type`.
///
/// # Errors
///
/// Pattern mode fails with [`MeshError::MissingTextureFaces`] when the
/// geometry has no texture-face list.
pub fn rebuild_faces(
    texture_type: TextureType,
    geometry: &Geometry,
    mapping: &ColorMapping<'_>,
) -> MeshResult<Vec<u32>> {
    let faces = geometry.faces();
    match texture_type {
        TextureType::None => Ok(faces_without_texture(faces)),
        TextureType::Image if geometry.has_texture_faces() => {
            faces_with_textures(faces, geometry.texture_faces())
        }
        TextureType::Image => Ok(faces_with_vertices(faces)),
        TextureType::Pattern => {
            if !geometry.has_texture_faces() {
                return Err(MeshError::MissingTextureFaces {
                    mode: TextureType::Pattern,
                });
            }
            faces_with_textures(faces, geometry.texture_faces())
        }
        TextureType::ColoredVertices1D => {
            let values = vertex_values_1d(geometry.vertices(), mapping.function);
            let slots = map_values(&values, mapping.range, mapping.colors);
            faces_with_vertex_slots(faces, &slots)
        }
        TextureType::ColoredVertices3D => {
            let values = vertex_values_3d(geometry.vertices(), mapping.density);
            let slots = map_values(&values, mapping.range, mapping.colors);
            faces_with_vertex_slots(faces, &slots)
        }
        TextureType::ColoredFaces => {
            let slots = face_slots(
                geometry,
                mapping.face_coloring,
                mapping.density,
                mapping.range,
                mapping.colors,
            );
            faces_with_face_slots(faces, &slots)
        }
    }
}

/// Returns the vertex column of a flattened face array.
pub fn vertex_column(face_array: &[u32]) -> Vec<u32> {
    face_array.iter().step_by(2).copied().collect()
}

/// Returns the texcoord column of a flattened face array.
pub fn texcoord_column(face_array: &[u32]) -> Vec<u32> {
    face_array.iter().skip(1).step_by(2).copied().collect()
}
