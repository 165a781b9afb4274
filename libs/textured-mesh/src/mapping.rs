//! # Value-to-Palette Mapping
//!
//! Maps per-vertex (or per-face) scalar values onto palette slots.
//!
//! Values are normalized against a range, clamped to `[0, 1]` and scaled
//! by the color count. The slot is the floor of the scaled value, so a value
//! on a boundary belongs to the upper slot of that boundary, except the range
//! maximum which maps to the last slot instead of one past it.

use config::constants::SLOT_SNAP_EPSILON;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::geometry::{Geometry, Point3D};

/// Density function evaluated on a full 3-D point.
pub type DensityFn = Arc<dyn Fn(&Point3D) -> f64 + Send + Sync>;

/// Function evaluated on a point's parametric value.
pub type ScalarFn = Arc<dyn Fn(f64) -> f64 + Send + Sync>;

/// Wraps a closure as a [`DensityFn`].
pub fn density_fn(f: impl Fn(&Point3D) -> f64 + Send + Sync + 'static) -> DensityFn {
    Arc::new(f)
}

/// Wraps a closure as a [`ScalarFn`].
pub fn scalar_fn(f: impl Fn(f64) -> f64 + Send + Sync + 'static) -> ScalarFn {
    Arc::new(f)
}

/// Density used until the caller sets one: zero everywhere.
pub fn default_density() -> DensityFn {
    density_fn(|_| 0.0)
}

/// Function used until the caller sets one: zero everywhere.
pub fn default_function() -> ScalarFn {
    scalar_fn(|_| 0.0)
}

/// Range a set of values is normalized against.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum ValueRange {
    /// The min and max of the values in the current pass.
    #[default]
    Observed,
    /// A fixed range, `min < max`.
    Fixed { min: f64, max: f64 },
}

impl ValueRange {
    /// Builds the range selected by a global min/max pair.
    ///
    /// The pair is only used when `min < max`; otherwise values are
    /// normalized against their observed range.
    ///
    /// # Example
    ///
    /// ```rust
    /// use textured_mesh::mapping::ValueRange;
    ///
    /// assert_eq!(ValueRange::from_globals(0.0, 2.0), ValueRange::Fixed { min: 0.0, max: 2.0 });
    /// assert_eq!(ValueRange::from_globals(1.0, 1.0), ValueRange::Observed);
    /// ```
    pub fn from_globals(min: f64, max: f64) -> Self {
        if min < max {
            Self::Fixed { min, max }
        } else {
            Self::Observed
        }
    }

    /// Returns the (min, max) pair to normalize `values` against.
    pub fn resolve(self, values: &[f64]) -> (f64, f64) {
        match self {
            Self::Fixed { min, max } => (min, max),
            Self::Observed => observed_range(values),
        }
    }
}

/// Returns the min and max of `values`, ignoring NaN.
///
/// An empty (or all-NaN) slice gives `(0, 0)`.
pub fn observed_range(values: &[f64]) -> (f64, f64) {
    let (min, max) = values
        .iter()
        .filter(|v| !v.is_nan())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), &v| {
            (min.min(v), max.max(v))
        });
    if min > max {
        (0.0, 0.0)
    } else {
        (min, max)
    }
}

/// Maps one value onto a palette of `colors` slots.
///
/// A degenerate range (`max <= min`) or a NaN value maps to slot 0.
///
/// # Example
///
/// ```rust
/// use textured_mesh::mapping::palette_slot;
///
/// assert_eq!(palette_slot(-5.0, 0.0, 10.0, 5), 0);
/// assert_eq!(palette_slot(4.0, 0.0, 10.0, 5), 2);
/// assert_eq!(palette_slot(10.0, 0.0, 10.0, 5), 4);
/// ```
pub fn palette_slot(value: f64, min: f64, max: f64, colors: usize) -> u32 {
    if colors == 0 || value.is_nan() || !(max > min) {
        return 0;
    }
    let t = ((value - min) / (max - min)).clamp(0.0, 1.0);
    let scaled = t * colors as f64;
    let nearest = scaled.round();
    let slot = if (scaled - nearest).abs() < SLOT_SNAP_EPSILON {
        nearest
    } else {
        scaled.floor()
    };
    (slot as usize).min(colors - 1) as u32
}

/// Maps every value onto a palette slot, resolving the range once.
pub fn map_values(values: &[f64], range: ValueRange, colors: usize) -> Vec<u32> {
    let (min, max) = range.resolve(values);
    values
        .par_iter()
        .map(|&v| palette_slot(v, min, max, colors))
        .collect()
}

/// Evaluates `function` on each vertex's parametric value.
pub fn vertex_values_1d(vertices: &[Point3D], function: &ScalarFn) -> Vec<f64> {
    vertices.par_iter().map(|p| function(p.f as f64)).collect()
}

/// Evaluates `density` on each vertex.
pub fn vertex_values_3d(vertices: &[Point3D], density: &DensityFn) -> Vec<f64> {
    vertices.par_iter().map(|p| density(p)).collect()
}

/// How the per-face coloring mode picks each face's slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FaceColoring {
    /// Face index modulo the color count.
    #[default]
    Index,
    /// Density at the face centroid, normalized like vertex densities.
    Density,
}

/// Returns one palette slot per face.
pub fn face_slots(
    geometry: &Geometry,
    coloring: FaceColoring,
    density: &DensityFn,
    range: ValueRange,
    colors: usize,
) -> Vec<u32> {
    let colors = colors.max(1);
    match coloring {
        FaceColoring::Index => (0..geometry.face_count())
            .map(|i| (i % colors) as u32)
            .collect(),
        FaceColoring::Density => {
            let values: Vec<f64> = (0..geometry.face_count())
                .into_par_iter()
                .map(|i| density(&geometry.face_centroid(i)))
                .collect();
            map_values(&values, range, colors)
        }
    }
}
