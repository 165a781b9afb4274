//! # Material
//!
//! Diffuse appearance handed to the renderer alongside a mesh snapshot.
//!
//! Only diffuse color assignment is modeled: a base color and, depending on
//! the texture mode, a map the texture coordinates sample.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::palette::{Palette, Rgba};
use crate::texture::TextureType;

/// Procedural carbon-fiber patterns for pattern mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CarbonPattern {
    #[default]
    DarkCarbon,
    LightCarbon,
    CarbonKevlar,
    GreenCarbon,
}

/// Image sampled through the texture coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum DiffuseMap {
    /// Image loaded by the renderer from this path.
    Image(String),
    /// Tiled carbon pattern.
    Pattern(CarbonPattern),
    /// Palette raster of the colored modes.
    Palette(Arc<Palette>),
}

/// Diffuse material of a textured mesh.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Material {
    pub diffuse_color: Rgba,
    pub diffuse_map: Option<DiffuseMap>,
}

impl Material {
    /// Creates a plain colored material.
    pub fn color(diffuse_color: Rgba) -> Self {
        Self {
            diffuse_color,
            diffuse_map: None,
        }
    }

    /// Derives the material for a texture mode.
    ///
    /// Mapped modes use a white base so the map shows unaltered. In
    /// [`TextureType::None`] an image, if given, is drawn over the color.
    pub fn for_mode(
        texture_type: TextureType,
        diffuse_color: Rgba,
        image: Option<&str>,
        pattern: CarbonPattern,
        palette: &Arc<Palette>,
    ) -> Self {
        match texture_type {
            TextureType::None => Self {
                diffuse_color,
                diffuse_map: image.map(|path| DiffuseMap::Image(path.to_owned())),
            },
            TextureType::Image => Self {
                diffuse_color: Rgba::WHITE,
                diffuse_map: image.map(|path| DiffuseMap::Image(path.to_owned())),
            },
            TextureType::Pattern => Self {
                diffuse_color: Rgba::WHITE,
                diffuse_map: Some(DiffuseMap::Pattern(pattern)),
            },
            TextureType::ColoredVertices1D
            | TextureType::ColoredVertices3D
            | TextureType::ColoredFaces => Self {
                diffuse_color: Rgba::WHITE,
                diffuse_map: Some(DiffuseMap::Palette(Arc::clone(palette))),
            },
        }
    }

    /// Returns the palette raster this material samples, if any.
    pub fn palette(&self) -> Option<&Palette> {
        match &self.diffuse_map {
            Some(DiffuseMap::Palette(palette)) => Some(palette),
            _ => None,
        }
    }
}
