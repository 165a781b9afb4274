//! # Palette Builder
//!
//! Builds the ordered color sequence used by the colored texture modes and
//! the texture-coordinate strip that addresses it.
//!
//! The palette is rasterized as a near-square image so the renderer can use
//! it as a diffuse map: `width = floor(sqrt(n))`, `height = ceil(n / width)`,
//! slots laid out row-major. Slot `i` samples the centre of its pixel, so
//! the strip never lands on a boundary between two colors.


use config::constants::validate_colors;
use serde::{Deserialize, Serialize};

use crate::error::MeshResult;

/// An RGBA color with components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Default for Rgba {
    fn default() -> Self {
        Self::WHITE
    }
}

impl Rgba {
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn from_array([r, g, b, a]: [f32; 4]) -> Self {
        Self { r, g, b, a }
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Creates an opaque color from 8-bit channels.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0)
    }

    /// Converts to 8-bit channels, rounding to nearest.
    pub fn to_rgba8(self) -> [u8; 4] {
        self.to_array()
            .map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8)
    }

    /// Creates an opaque color from hue (degrees), saturation and brightness.
    pub fn hsb(hue: f64, saturation: f64, brightness: f64) -> Self {
        let h = hue.rem_euclid(360.0) / 60.0;
        let c = brightness * saturation;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let m = brightness - c;
        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        Self::new((r + m) as f32, (g + m) as f32, (b + m) as f32, 1.0)
    }
}

/// Strategy used to pick the palette colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ColorPalette {
    /// Full-saturation hue sweep, red to red (exclusive).
    #[default]
    Hsb,
    /// Black to white.
    Greyscale,
    Sinebow,
    Turbo,
    Viridis,
    Plasma,
    Cividis,
    Spectral,
    Cool,
    Warm,
}

impl ColorPalette {
    /// Returns whether the palette ends where it starts.
    fn is_cyclic(self) -> bool {
        matches!(self, Self::Hsb | Self::Sinebow)
    }

    /// Returns color `index` of a palette with `total` colors.
    pub fn color(self, index: usize, total: usize) -> Rgba {
        let total = total.max(1);
        let index = index.min(total - 1);
        // Exclude the endpoint on cyclic palettes, include it otherwise
        let t = if self.is_cyclic() {
            index as f64 / total as f64
        } else if total > 1 {
            index as f64 / (total - 1) as f64
        } else {
            0.0
        };

        fn eval(g: colorous::Gradient, t: f64) -> Rgba {
            let c = g.eval_continuous(t);
            Rgba::from_rgb8(c.r, c.g, c.b)
        }

        match self {
            Self::Hsb => Rgba::hsb(360.0 * t, 1.0, 1.0),
            Self::Greyscale => {
                let v = t as f32;
                Rgba::new(v, v, v, 1.0)
            }
            Self::Sinebow => eval(colorous::SINEBOW, t),
            Self::Turbo => eval(colorous::TURBO, t),
            Self::Viridis => eval(colorous::VIRIDIS, t),
            Self::Plasma => eval(colorous::PLASMA, t),
            Self::Cividis => eval(colorous::CIVIDIS, t),
            Self::Spectral => eval(colorous::SPECTRAL, t),
            Self::Cool => eval(colorous::COOL, t),
            Self::Warm => eval(colorous::WARM, t),
        }
    }
}

/// An ordered color sequence and its raster layout.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    strategy: ColorPalette,
    colors: Vec<Rgba>,
    width: usize,
    height: usize,
}

/// Builds a palette of `color_count` colors.
///
/// The same `(color_count, strategy)` pair always produces the same palette.
///
/// # Example
///
/// ```rust
/// use textured_mesh::palette::{build_palette, ColorPalette};
///
/// let palette = build_palette(5, ColorPalette::Hsb).unwrap();
/// assert_eq!(palette.len(), 5);
/// assert_eq!(palette.texture_coords().len(), 10);
/// assert!(build_palette(0, ColorPalette::Hsb).is_err());
/// ```
pub fn build_palette(color_count: usize, strategy: ColorPalette) -> MeshResult<Palette> {
    let n = validate_colors(color_count)?;
    Ok(Palette::generate(n, strategy))
}

impl Palette {
    /// Lays out `n` colors; `n` must already be validated.
    pub(crate) fn generate(n: usize, strategy: ColorPalette) -> Self {
        let n = n.max(1);
        let width = ((n as f64).sqrt().floor() as usize).max(1);
        let height = n.div_ceil(width);
        let colors = (0..n).map(|i| strategy.color(i, n)).collect();
        log::trace!("built {strategy:?} palette: {n} colors in a {width}x{height} raster");
        Self {
            strategy,
            colors,
            width,
            height,
        }
    }
}

impl Palette {
    /// Returns the number of palette slots.
    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false: a palette has at least one color.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    #[inline]
    pub fn strategy(&self) -> ColorPalette {
        self.strategy
    }

    #[inline]
    pub fn colors(&self) -> &[Rgba] {
        &self.colors
    }

    /// Returns the raster size as (width, height).
    #[inline]
    pub fn image_size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Returns the texture coordinate that samples slot `slot`.
    pub fn texture_location(&self, slot: usize) -> [f32; 2] {
        let y = slot / self.width;
        let x = slot - self.width * y;
        [
            ((x as f64 + 0.5) / self.width as f64) as f32,
            ((y as f64 + 0.5) / self.height as f64) as f32,
        ]
    }

    /// Returns the flattened `[u, v, ...]` strip, one pair per slot.
    pub fn texture_coords(&self) -> Vec<f32> {
        (0..self.len())
            .flat_map(|slot| self.texture_location(slot))
            .collect()
    }

    /// Returns the raster as row-major RGBA8 pixels.
    ///
    /// Cells past the last slot repeat the last color.
    pub fn pixels(&self) -> Vec<[u8; 4]> {
        let last = self.colors.last().copied().unwrap_or_default();
        (0..self.width * self.height)
            .map(|i| self.colors.get(i).copied().unwrap_or(last).to_rgba8())
            .collect()
    }
}
