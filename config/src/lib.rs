//! # Config Crate
//!
//! Centralized configuration constants for the textured mesh pipeline.
//! All magic numbers and tunable parameters are defined here so the palette,
//! texture and face stages agree on defaults and tolerances.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{DEFAULT_COLORS, DEFAULT_PATTERN_SCALE, EPSILON};
//!
//! // Use EPSILON for floating-point comparisons
//! let value: f64 = 0.00000000001; // 1e-11, smaller than EPSILON (1e-10)
//! assert!(value.abs() < EPSILON);
//!
//! // Defaults for a freshly created textured mesh
//! assert!(DEFAULT_COLORS > 0);
//! assert_eq!(DEFAULT_PATTERN_SCALE, 1.0);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **No Dependencies**: Pure constants and one validated settings value
//! - **Well-Documented**: Every constant has clear documentation

pub mod constants;
