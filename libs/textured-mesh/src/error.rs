//! # Mesh Errors
//!
//! Error types for palette, texture and face synthesis.
//!
//! ## Error Policy
//!
//! - Invalid configuration is rejected before any state changes
//! - Missing auxiliary data (texture faces, image coordinates) is an error,
//!   never an undefined output
//! - A failed rebuild leaves the previously installed snapshot in place

use config::constants::ConfigError;
use thiserror::Error;

use crate::texture::TextureType;

/// Errors that can occur while building textured mesh data.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MeshError {
    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// Texture grid with a zero dimension
    #[error("Invalid texture grid: {width}x{height}")]
    InvalidTextureGrid { width: u32, height: u32 },

    /// Image mode selected without an image
    #[error("Image path must not be empty")]
    EmptyImagePath,

    /// Shape generator given unusable dimensions
    #[error("Invalid shape: {0}")]
    InvalidShape(String),

    /// Polygonal section with too few sides
    #[error("Polygonal section needs at least {min} sides, got {sides}")]
    InvalidSection { sides: u32, min: u32 },

    /// A mode that reads the texture-face list found it empty
    #[error("{mode:?} texture requires a texture-face list")]
    MissingTextureFaces { mode: TextureType },

    /// Pattern mode selected before the generator described its UV grid
    #[error("{mode:?} texture requires a texture grid")]
    MissingTextureGrid { mode: TextureType },

    /// Image mode selected before image texture coordinates were created
    #[error("Image texture coordinates have not been created")]
    MissingImageCoords,

    /// Texture-face list not parallel to the geometry face list
    #[error("Texture faces ({texture_faces}) do not match faces ({faces})")]
    TextureFaceMismatch { faces: usize, texture_faces: usize },

    /// Face references an index outside the referenced list
    #[error("Face {face} references index {index} but only {len} entries exist")]
    IndexOutOfBounds { face: usize, index: u32, len: usize },

    /// Face repeats one of its indices
    #[error("Degenerate face {face}: {message}")]
    DegenerateFace { face: usize, message: String },

    /// Flattened face array with the wrong length
    #[error("Face array has {len} entries, expected {expected}")]
    FaceArrayLength { len: usize, expected: usize },

    /// Face array references a texture coordinate past the end of the array
    #[error("Texcoord index {index} out of range for {len} texture coordinates")]
    TexCoordOutOfRange { index: u32, len: usize },

    /// Per-vertex or per-face value list with the wrong length
    #[error("Expected {expected} {what}, got {len}")]
    LengthMismatch {
        what: &'static str,
        len: usize,
        expected: usize,
    },

    /// Custom smoothing groups not sized to the face list
    #[error("Smoothing groups ({groups}) do not match faces ({faces})")]
    SmoothingGroupMismatch { faces: usize, groups: usize },

    /// Operation needs a mesh that has not been created yet
    #[error("Mesh has not been created")]
    MeshNotBuilt,
}

impl MeshError {
    /// Creates a degenerate face error.
    pub fn degenerate(face: usize, message: impl Into<String>) -> Self {
        Self::DegenerateFace {
            face,
            message: message.into(),
        }
    }

    /// Creates an invalid shape error.
    pub fn invalid_shape(message: impl Into<String>) -> Self {
        Self::InvalidShape(message.into())
    }

    /// Creates an error for a value list of the wrong length.
    pub fn length_mismatch(what: &'static str, len: usize, expected: usize) -> Self {
        Self::LengthMismatch {
            what,
            len,
            expected,
        }
    }
}

/// Result type alias for textured mesh operations.
pub type MeshResult<T> = Result<T, MeshError>;
