//! # Texture-Coordinate Synthesizer
//!
//! Produces the texture-coordinate array for the active [`TextureType`].
//!
//! Every function here is a pure function of its inputs: synthesizing twice
//! with the same inputs gives bit-identical arrays.
//!
//! ## Layouts
//!
//! ```text
//! None     → [0, 0]                      one shared coordinate
//! Image    → (w+1)·(h+1) grid            forward or reverse rows
//! Pattern  → (w+1)·(h+1) grid · scale    v corrected by area aspect ratio
//! Colored* → palette strip               one coordinate per palette slot
//! ```

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};

use crate::error::{MeshError, MeshResult};
use crate::palette::Palette;

/// Surface appearance mode of a textured mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TextureType {
    /// Plain diffuse color.
    #[default]
    None,
    /// Image mapped through a UV grid.
    Image,
    /// Tiled procedural pattern.
    Pattern,
    /// Vertices colored by a function of their parametric value.
    ColoredVertices1D,
    /// Vertices colored by a density function of their position.
    ColoredVertices3D,
    /// Each face colored with one palette slot.
    ColoredFaces,
}

impl TextureType {
    /// Returns whether this mode samples the palette strip.
    pub fn uses_palette(self) -> bool {
        matches!(
            self,
            Self::ColoredVertices1D | Self::ColoredVertices3D | Self::ColoredFaces
        )
    }
}

/// Row order of an image UV grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RowOrder {
    /// First row at `v = 0`.
    #[default]
    Forward,
    /// First row at `v = 1`.
    Reverse,
}

/// Size of the UV grid a shape generator lays its texture faces on.
///
/// `width` and `height` count cells, so the grid has `(width + 1) ·
/// (height + 1)` coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextureGrid {
    pub width: u32,
    pub height: u32,
}

impl TextureGrid {
    /// Creates a grid, rejecting a zero dimension.
    pub fn new(width: u32, height: u32) -> MeshResult<Self> {
        if width == 0 || height == 0 {
            return Err(MeshError::InvalidTextureGrid { width, height });
        }
        Ok(Self { width, height })
    }

    /// Returns the number of coordinates in the grid.
    pub fn point_count(self) -> usize {
        (self.width as usize + 1) * (self.height as usize + 1)
    }
}

/// Builds an image UV grid.
///
/// # Example
///
/// ```rust
/// use textured_mesh::texture::{image_tex_coords, RowOrder, TextureGrid};
///
/// let grid = TextureGrid::new(1, 1).unwrap();
/// assert_eq!(
///     image_tex_coords(grid, RowOrder::Forward),
///     vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 1.0]
/// );
/// ```
pub fn image_tex_coords(grid: TextureGrid, order: RowOrder) -> Vec<f32> {
    grid_coords(grid, order, 1.0, 1.0)
}

/// Builds a pattern UV grid.
///
/// The pattern repeats `scale` times across the grid. When `aspect` is the
/// height/width ratio of the surface, vertical tiling is multiplied by it so
/// the pattern keeps square tiles; without it the tiling is unscaled.
pub fn pattern_tex_coords(grid: TextureGrid, scale: f64, aspect: Option<f64>) -> Vec<f32> {
    grid_coords(grid, RowOrder::Forward, scale, scale * aspect.unwrap_or(1.0))
}

fn grid_coords(grid: TextureGrid, order: RowOrder, u_scale: f64, v_scale: f64) -> Vec<f32> {
    let (w, h) = (grid.width as f64, grid.height as f64);
    let mut coords = Vec::with_capacity(grid.point_count() * 2);
    for row in 0..=grid.height {
        let v = match order {
            RowOrder::Forward => row,
            RowOrder::Reverse => grid.height - row,
        };
        let dv = v as f64 / h * v_scale;
        for u in 0..=grid.width {
            coords.push((u as f64 / w * u_scale) as f32);
            coords.push(dv as f32);
        }
    }
    coords
}

/// Width and height of the surface a pattern is drawn on.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SurfaceArea {
    pub width: f64,
    pub height: f64,
}

impl SurfaceArea {
    /// Returns height/width when both are positive.
    pub fn aspect(self) -> Option<f64> {
        (self.width > 0.0 && self.height > 0.0).then(|| self.height / self.width)
    }
}

/// Texture inputs supplied by the shape generator when it builds a mesh.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextureSource {
    /// Grid the image and pattern coordinates are laid on.
    pub grid: Option<TextureGrid>,
    /// Precomputed image coordinates.
    pub image_coords: Vec<f32>,
    /// Surface size used for pattern aspect correction.
    pub area: SurfaceArea,
}

impl TextureSource {
    /// Records the grid and precomputes image coordinates in `order`.
    pub fn create_tex_coords(&mut self, width: u32, height: u32, order: RowOrder) -> MeshResult<()> {
        let grid = TextureGrid::new(width, height)?;
        self.image_coords = image_tex_coords(grid, order);
        self.grid = Some(grid);
        Ok(())
    }
}

/// Synthesizes the texture-coordinate array for `texture_type`.
///
/// # Errors
///
/// - [`MeshError::MissingImageCoords`] in image mode before image coordinates
///   were created
/// - [`MeshError::MissingTextureGrid`] in pattern mode without a grid
pub fn synthesize(
    texture_type: TextureType,
    source: &TextureSource,
    pattern_scale: f64,
    palette: &Palette,
) -> MeshResult<Vec<f32>> {
    match texture_type {
        TextureType::None => Ok(vec![0.0, 0.0]),
        TextureType::Image => {
            if source.image_coords.is_empty() {
                return Err(MeshError::MissingImageCoords);
            }
            Ok(source.image_coords.clone())
        }
        TextureType::Pattern => {
            let grid = source.grid.ok_or(MeshError::MissingTextureGrid {
                mode: TextureType::Pattern,
            })?;
            Ok(pattern_tex_coords(grid, pattern_scale, source.area.aspect()))
        }
        TextureType::ColoredVertices1D
        | TextureType::ColoredVertices3D
        | TextureType::ColoredFaces => Ok(palette.texture_coords()),
    }
}
