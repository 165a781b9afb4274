//! # Configuration Constants
//!
//! Centralized constants for the textured mesh pipeline. Palette sizes,
//! pattern tiling, material defaults and precision values are defined here.
//!
//! ## Categories
//!
//! - **Precision**: Floating-point comparison tolerances
//! - **Palette**: Color count defaults and limits
//! - **Texture**: Pattern tiling and smoothing defaults
//! - **Material**: Default diffuse color

use std::fmt;

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Epsilon for floating-point comparisons.
///
/// Used by the ray-triangle test to reject rays parallel to a triangle and
/// hits that start on the ray origin.
///
/// # Example
///
/// ```rust
/// use config::constants::EPSILON;
///
/// fn approximately_equal(a: f64, b: f64) -> bool {
///     (a - b).abs() < EPSILON
/// }
///
/// assert!(approximately_equal(1.0, 1.0 + 1e-11));
/// ```
pub const EPSILON: f64 = 1e-10;

/// Tolerance used when a normalized value lands on a palette slot boundary.
///
/// A value whose scaled position is within this distance of an integer is
/// snapped to that integer before taking the floor, so `min + k * step`
/// maps to slot `k` even when the division rounds just below `k`.
///
/// # Example
///
/// ```rust
/// use config::constants::SLOT_SNAP_EPSILON;
///
/// let scaled: f64 = 2.9999999999999996;
/// let snapped = if (scaled - scaled.round()).abs() < SLOT_SNAP_EPSILON {
///     scaled.round()
/// } else {
///     scaled.floor()
/// };
/// assert_eq!(snapped, 3.0);
/// ```
pub const SLOT_SNAP_EPSILON: f64 = 1e-9;

/// Minimum triangle area (twice the area, as a cross product length) for a
/// face to be considered non-degenerate.
pub const AREA_EPSILON: f64 = 1e-12;

// =============================================================================
// PALETTE CONSTANTS
// =============================================================================

/// Default number of palette colors.
///
/// Six hue ramps of 255 steps each, enough to make a rainbow palette look
/// continuous on smooth density maps.
///
/// # Example
///
/// ```rust
/// use config::constants::DEFAULT_COLORS;
///
/// let requested: Option<usize> = None;
/// assert_eq!(requested.unwrap_or(DEFAULT_COLORS), 1530);
/// ```
pub const DEFAULT_COLORS: usize = 1530;

/// Maximum number of palette colors.
///
/// Safety limit on the size of the palette raster handed to the material.
///
/// # Example
///
/// ```rust
/// use config::constants::MAX_COLORS;
///
/// let requested = 5_000_000usize;
/// assert_eq!(requested.min(MAX_COLORS), MAX_COLORS);
/// ```
pub const MAX_COLORS: usize = 1 << 20;

/// Palette size used when intersected faces are highlighted.
pub const INTERSECTION_HIGHLIGHT_COLORS: usize = 10;

// =============================================================================
// TEXTURE CONSTANTS
// =============================================================================

/// Default pattern scale factor.
///
/// A scale of 1 tiles the pattern exactly once across the texture grid.
pub const DEFAULT_PATTERN_SCALE: f64 = 1.0;

/// Smoothing group assigned to every face when the shape generator does not
/// supply its own array.
///
/// All faces share group 1, so the whole mesh is one smooth surface.
/// Group 0 would give every face hard edges.
pub const DEFAULT_SMOOTHING_GROUP: u32 = 1;

/// Minimum number of sides of a polygonal cross-section.
///
/// # Example
///
/// ```rust
/// use config::constants::MIN_POLYGON_SIDES;
///
/// assert!(2 < MIN_POLYGON_SIDES);
/// ```
pub const MIN_POLYGON_SIDES: u32 = 3;

// =============================================================================
// MATERIAL CONSTANTS
// =============================================================================

/// Default diffuse color (opaque white).
///
/// RGBA values in range [0.0, 1.0].
pub const DEFAULT_DIFFUSE_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

// =============================================================================
// VALIDATED SETTINGS
// =============================================================================

/// Validated starting values for a textured mesh.
///
/// # Examples
/// ```
/// use config::constants::TextureConfig;
/// let config = TextureConfig::default();
/// assert!(config.colors > 0);
/// assert!(config.pattern_scale > 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextureConfig {
    /// Number of palette colors used by the colored texture modes.
    pub colors: usize,
    /// Tiling factor used by the pattern texture mode.
    pub pattern_scale: f64,
}

impl TextureConfig {
    /// Builds a configuration enforcing strict validation of the supplied
    /// color count and pattern scale.
    ///
    /// # Examples
    /// ```
    /// use config::constants::TextureConfig;
    /// let cfg = TextureConfig::new(12, 2.0).expect("valid config");
    /// assert_eq!(cfg.colors, 12);
    /// assert!(TextureConfig::new(0, 1.0).is_err());
    /// ```
    pub fn new(colors: usize, pattern_scale: f64) -> Result<Self, ConfigError> {
        validate_colors(colors)?;
        validate_pattern_scale(pattern_scale)?;
        Ok(Self {
            colors,
            pattern_scale,
        })
    }
}

impl Default for TextureConfig {
    fn default() -> Self {
        Self {
            colors: DEFAULT_COLORS,
            pattern_scale: DEFAULT_PATTERN_SCALE,
        }
    }
}

/// Checks that a palette color count is in `1..=MAX_COLORS`.
///
/// # Example
///
/// ```rust
/// use config::constants::{validate_colors, MAX_COLORS};
///
/// assert!(validate_colors(1).is_ok());
/// assert!(validate_colors(0).is_err());
/// assert!(validate_colors(MAX_COLORS + 1).is_err());
/// ```
pub fn validate_colors(colors: usize) -> Result<usize, ConfigError> {
    if colors == 0 || colors > MAX_COLORS {
        return Err(ConfigError::InvalidColorCount(colors));
    }
    Ok(colors)
}

/// Checks that a pattern scale is finite and strictly positive.
///
/// # Example
///
/// ```rust
/// use config::constants::validate_pattern_scale;
///
/// assert!(validate_pattern_scale(0.5).is_ok());
/// assert!(validate_pattern_scale(0.0).is_err());
/// assert!(validate_pattern_scale(f64::NAN).is_err());
/// ```
pub fn validate_pattern_scale(scale: f64) -> Result<f64, ConfigError> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(ConfigError::InvalidPatternScale(scale));
    }
    Ok(scale)
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// Raised when the color count is zero or above [`MAX_COLORS`].
    InvalidColorCount(usize),
    /// Raised when the pattern scale is zero, negative or not finite.
    InvalidPatternScale(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidColorCount(value) => {
                write!(f, "colors must be in 1..={MAX_COLORS}: {value}")
            }
            ConfigError::InvalidPatternScale(value) => {
                write!(f, "pattern_scale must be positive and finite: {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
