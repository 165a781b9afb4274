//! # Textured Mesh
//!
//! Owns the geometry of one shape together with its texture parameters and
//! keeps the mesh snapshot in sync with them.
//!
//! ## Rebuild pipeline
//!
//! ```text
//! setter ─→ settings' ─→ palette' (colors/palette changed)
//!                     ─→ synthesize ─→ rebuild_faces ─→ assemble ─→ swap Arc
//! ```
//!
//! Every setter builds the new state on the side and commits it only once the
//! new snapshot has been assembled. A failed rebuild leaves settings, palette
//! and snapshot exactly as they were.
//!
//! Before [`TexturedMesh::create_mesh`] has run, setters validate and store
//! their values but build nothing.

#[cfg(test)]
mod tests;

use std::fmt;
use std::sync::Arc;

use config::constants::{
    validate_colors, validate_pattern_scale, TextureConfig, DEFAULT_DIFFUSE_COLOR,
    INTERSECTION_HIGHLIGHT_COLORS,
};

use crate::error::{MeshError, MeshResult};
use crate::faces::{rebuild_faces, ColorMapping};
use crate::geometry::{Geometry, Point3D, SectionType};
use crate::intersect::{self, Intersection};
use crate::mapping::{default_density, default_function, DensityFn, FaceColoring, ScalarFn, ValueRange};
use crate::material::{CarbonPattern, Material};
use crate::mesh::MeshSnapshot;
use crate::palette::{build_palette, ColorPalette, Palette, Rgba};
use crate::primitives::Shape;
use crate::texture::{image_tex_coords, synthesize, RowOrder, SurfaceArea, TextureSource, TextureType};

/// Every mutable texture parameter of a [`TexturedMesh`].
#[derive(Clone)]
pub struct TextureSettings {
    pub section_type: SectionType,
    pub texture_type: TextureType,
    /// Palette size of the colored modes.
    pub colors: usize,
    pub color_palette: ColorPalette,
    pub pattern_scale: f64,
    pub carbon_pattern: CarbonPattern,
    pub diffuse_color: Rgba,
    /// Image drawn in image mode.
    pub image: Option<String>,
    /// Image drawn over the diffuse color in `None` mode.
    pub overlay: Option<String>,
    /// Point → value mapping of 3-D vertex coloring.
    pub density: DensityFn,
    /// Parametric value → value mapping of 1-D vertex coloring.
    pub function: ScalarFn,
    pub min_global: f64,
    pub max_global: f64,
    pub face_coloring: FaceColoring,
}

impl TextureSettings {
    /// Creates settings from a validated configuration.
    pub fn from_config(config: &TextureConfig) -> Self {
        Self {
            section_type: SectionType::default(),
            texture_type: TextureType::default(),
            colors: config.colors,
            color_palette: ColorPalette::default(),
            pattern_scale: config.pattern_scale,
            carbon_pattern: CarbonPattern::default(),
            diffuse_color: Rgba::from_array(DEFAULT_DIFFUSE_COLOR),
            image: None,
            overlay: None,
            density: default_density(),
            function: default_function(),
            min_global: 0.0,
            max_global: 0.0,
            face_coloring: FaceColoring::default(),
        }
    }

    /// Returns the range values are normalized against.
    pub fn value_range(&self) -> ValueRange {
        ValueRange::from_globals(self.min_global, self.max_global)
    }
}

impl Default for TextureSettings {
    fn default() -> Self {
        Self::from_config(&TextureConfig::default())
    }
}

impl fmt::Debug for TextureSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextureSettings")
            .field("section_type", &self.section_type)
            .field("texture_type", &self.texture_type)
            .field("colors", &self.colors)
            .field("color_palette", &self.color_palette)
            .field("pattern_scale", &self.pattern_scale)
            .field("carbon_pattern", &self.carbon_pattern)
            .field("diffuse_color", &self.diffuse_color)
            .field("image", &self.image)
            .field("overlay", &self.overlay)
            .field("min_global", &self.min_global)
            .field("max_global", &self.max_global)
            .field("face_coloring", &self.face_coloring)
            .finish_non_exhaustive()
    }
}

/// A texture mode together with the parameters it needs.
///
/// Applied with [`TexturedMesh::set_texture_mode`] as a single change.
/// `None` in an optional palette or range keeps the current value. The
/// `None` mode's `image` is its overlay: `None` there removes the overlay
/// and leaves the image-mode path alone.
#[derive(Clone)]
pub enum TextureMode {
    None {
        color: Rgba,
        image: Option<String>,
    },
    Image {
        path: String,
    },
    Pattern {
        pattern: CarbonPattern,
        scale: f64,
    },
    Vertices1D {
        colors: usize,
        palette: Option<ColorPalette>,
        function: ScalarFn,
        range: Option<(f64, f64)>,
    },
    Vertices3D {
        colors: usize,
        palette: Option<ColorPalette>,
        density: DensityFn,
        range: Option<(f64, f64)>,
    },
    Faces {
        colors: usize,
        palette: Option<ColorPalette>,
    },
}

impl TextureMode {
    /// Returns the texture type this mode selects.
    pub fn texture_type(&self) -> TextureType {
        match self {
            Self::None { .. } => TextureType::None,
            Self::Image { .. } => TextureType::Image,
            Self::Pattern { .. } => TextureType::Pattern,
            Self::Vertices1D { .. } => TextureType::ColoredVertices1D,
            Self::Vertices3D { .. } => TextureType::ColoredVertices3D,
            Self::Faces { .. } => TextureType::ColoredFaces,
        }
    }

    /// Writes this mode into `settings`.
    fn apply(self, settings: &mut TextureSettings) -> MeshResult<()> {
        settings.texture_type = self.texture_type();
        match self {
            Self::None { color, image } => {
                settings.diffuse_color = color;
                settings.overlay = image;
            }
            Self::Image { path } => {
                if path.is_empty() {
                    return Err(MeshError::EmptyImagePath);
                }
                settings.image = Some(path);
            }
            Self::Pattern { pattern, scale } => {
                settings.pattern_scale = validate_pattern_scale(scale)?;
                settings.carbon_pattern = pattern;
            }
            Self::Vertices1D {
                colors,
                palette,
                function,
                range,
            } => {
                apply_colors(settings, colors, palette, range)?;
                settings.function = function;
            }
            Self::Vertices3D {
                colors,
                palette,
                density,
                range,
            } => {
                apply_colors(settings, colors, palette, range)?;
                settings.density = density;
            }
            Self::Faces { colors, palette } => {
                apply_colors(settings, colors, palette, None)?;
            }
        }
        Ok(())
    }
}

fn apply_colors(
    settings: &mut TextureSettings,
    colors: usize,
    palette: Option<ColorPalette>,
    range: Option<(f64, f64)>,
) -> MeshResult<()> {
    settings.colors = validate_colors(colors)?;
    if let Some(palette) = palette {
        settings.color_palette = palette;
    }
    if let Some((min, max)) = range {
        settings.min_global = min;
        settings.max_global = max;
    }
    Ok(())
}

impl fmt::Debug for TextureMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None { color, image } => f
                .debug_struct("None")
                .field("color", color)
                .field("image", image)
                .finish(),
            Self::Image { path } => f.debug_struct("Image").field("path", path).finish(),
            Self::Pattern { pattern, scale } => f
                .debug_struct("Pattern")
                .field("pattern", pattern)
                .field("scale", scale)
                .finish(),
            Self::Vertices1D {
                colors,
                palette,
                range,
                ..
            } => f
                .debug_struct("Vertices1D")
                .field("colors", colors)
                .field("palette", palette)
                .field("range", range)
                .finish_non_exhaustive(),
            Self::Vertices3D {
                colors,
                palette,
                range,
                ..
            } => f
                .debug_struct("Vertices3D")
                .field("colors", colors)
                .field("palette", palette)
                .field("range", range)
                .finish_non_exhaustive(),
            Self::Faces { colors, palette } => f
                .debug_struct("Faces")
                .field("colors", colors)
                .field("palette", palette)
                .finish(),
        }
    }
}

/// Inputs supplied by the shape generator.
#[derive(Debug, Clone)]
struct MeshInputs {
    geometry: Geometry,
    source: TextureSource,
    smoothing_groups: Option<Vec<u32>>,
    vertex_factor: f32,
}

impl Default for MeshInputs {
    fn default() -> Self {
        Self {
            geometry: Geometry::default(),
            source: TextureSource::default(),
            smoothing_groups: None,
            vertex_factor: 1.0,
        }
    }
}

fn build_snapshot(
    inputs: &MeshInputs,
    settings: &TextureSettings,
    palette: &Palette,
) -> MeshResult<MeshSnapshot> {
    let tex_coords = synthesize(
        settings.texture_type,
        &inputs.source,
        settings.pattern_scale,
        palette,
    )?;
    let mapping = ColorMapping {
        colors: palette.len(),
        density: &settings.density,
        function: &settings.function,
        range: settings.value_range(),
        face_coloring: settings.face_coloring,
    };
    let faces = rebuild_faces(settings.texture_type, &inputs.geometry, &mapping)?;
    MeshSnapshot::assemble(
        inputs.geometry.vertices_f32(inputs.vertex_factor),
        tex_coords,
        faces,
        inputs.geometry.face_count(),
        inputs.smoothing_groups.as_deref(),
    )
}

/// A shape's geometry, texture parameters and current mesh snapshot.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use textured_mesh::primitives::create_cube;
/// use textured_mesh::{TextureMode, TextureType, TexturedMesh};
///
/// let mut mesh = TexturedMesh::new();
/// mesh.load_shape(create_cube(DVec3::ONE, true).unwrap()).unwrap();
/// mesh.create_mesh().unwrap();
///
/// mesh.set_texture_mode(TextureMode::Faces { colors: 5, palette: None }).unwrap();
/// let snapshot = mesh.snapshot().unwrap();
/// assert_eq!(mesh.settings().texture_type, TextureType::ColoredFaces);
/// assert_eq!(snapshot.tex_coord_count(), 5);
/// ```
#[derive(Debug, Clone)]
pub struct TexturedMesh {
    inputs: MeshInputs,
    settings: TextureSettings,
    palette: Arc<Palette>,
    snapshot: Option<Arc<MeshSnapshot>>,
}

impl TexturedMesh {
    /// Creates an empty mesh with default settings.
    pub fn new() -> Self {
        let settings = TextureSettings::default();
        let palette = Palette::generate(settings.colors, settings.color_palette);
        Self {
            inputs: MeshInputs::default(),
            settings,
            palette: Arc::new(palette),
            snapshot: None,
        }
    }

    /// Creates an empty mesh with the given color count and pattern scale.
    pub fn with_config(config: TextureConfig) -> MeshResult<Self> {
        let settings = TextureSettings::from_config(&config);
        validate_pattern_scale(settings.pattern_scale)?;
        let palette = build_palette(settings.colors, settings.color_palette)?;
        Ok(Self {
            inputs: MeshInputs::default(),
            settings,
            palette: Arc::new(palette),
            snapshot: None,
        })
    }

    // ─── Generator inputs ───────────────────────────────────────────────

    /// Replaces the geometry.
    ///
    /// Custom smoothing groups and the vertex scale factor belong to the old
    /// geometry and are reset.
    pub fn set_geometry(&mut self, geometry: Geometry) -> MeshResult<()> {
        let inputs = MeshInputs {
            geometry,
            source: self.inputs.source.clone(),
            smoothing_groups: None,
            vertex_factor: 1.0,
        };
        self.commit_inputs(inputs)
    }

    /// Replaces geometry and texture inputs with a generator's output.
    ///
    /// Image coordinates are precomputed in forward row order when the shape
    /// has a UV grid.
    pub fn load_shape(&mut self, shape: Shape) -> MeshResult<()> {
        let source = TextureSource {
            grid: shape.grid,
            image_coords: shape
                .grid
                .map(|grid| image_tex_coords(grid, RowOrder::Forward))
                .unwrap_or_default(),
            area: shape.area,
        };
        let inputs = MeshInputs {
            geometry: shape.geometry,
            source,
            smoothing_groups: None,
            vertex_factor: 1.0,
        };
        self.commit_inputs(inputs)
    }

    /// Precomputes a `width` × `height` image grid with forward rows.
    pub fn create_tex_coords(&mut self, width: u32, height: u32) -> MeshResult<()> {
        self.create_grid(width, height, RowOrder::Forward)
    }

    /// Precomputes a `width` × `height` image grid with reversed rows.
    pub fn create_reverse_tex_coords(&mut self, width: u32, height: u32) -> MeshResult<()> {
        self.create_grid(width, height, RowOrder::Reverse)
    }

    fn create_grid(&mut self, width: u32, height: u32, order: RowOrder) -> MeshResult<()> {
        let mut inputs = self.inputs.clone();
        inputs.source.create_tex_coords(width, height, order)?;
        self.commit_inputs(inputs)
    }

    /// Sets the surface size patterns are aspect-corrected against.
    pub fn set_area(&mut self, width: f64, height: f64) -> MeshResult<()> {
        let mut inputs = self.inputs.clone();
        inputs.source.area = SurfaceArea { width, height };
        self.commit_inputs(inputs)
    }

    /// Sets custom per-face smoothing groups, or restores the default group
    /// with `None`.
    pub fn set_smoothing_groups(&mut self, groups: Option<Vec<u32>>) -> MeshResult<()> {
        if let Some(groups) = &groups {
            let faces = self.inputs.geometry.face_count();
            if groups.len() != faces {
                log::warn!("rejected {} smoothing groups for {faces} faces", groups.len());
                return Err(MeshError::SmoothingGroupMismatch {
                    faces,
                    groups: groups.len(),
                });
            }
        }
        let mut inputs = self.inputs.clone();
        inputs.smoothing_groups = groups;
        self.commit_inputs(inputs)
    }

    /// Builds the mesh snapshot from the current inputs and settings.
    ///
    /// Until this has succeeded once, setters only store their values.
    pub fn create_mesh(&mut self) -> MeshResult<()> {
        let snapshot = build_snapshot(&self.inputs, &self.settings, &self.palette)?;
        self.install(snapshot);
        Ok(())
    }

    /// Scales the snapshot's points by `factor`.
    ///
    /// Only the point array changes; later rebuilds keep the factor.
    pub fn update_vertices(&mut self, factor: f32) -> MeshResult<()> {
        if let Some(current) = &self.snapshot {
            let snapshot = current.with_points(self.inputs.geometry.vertices_f32(factor))?;
            self.install(snapshot);
        }
        self.inputs.vertex_factor = factor;
        Ok(())
    }

    // ─── Texture parameters ─────────────────────────────────────────────

    /// Switches texture mode and its parameters in one rebuild.
    pub fn set_texture_mode(&mut self, mode: TextureMode) -> MeshResult<()> {
        let mut settings = self.settings.clone();
        mode.apply(&mut settings)?;
        self.commit_settings(settings, true)
    }

    pub fn set_texture_type(&mut self, texture_type: TextureType) -> MeshResult<()> {
        self.update(true, |s| {
            s.texture_type = texture_type;
            Ok(())
        })
    }

    /// Sets the palette size.
    pub fn set_colors(&mut self, colors: usize) -> MeshResult<()> {
        self.update(true, |s| {
            s.colors = validate_colors(colors)?;
            Ok(())
        })
    }

    pub fn set_color_palette(&mut self, palette: ColorPalette) -> MeshResult<()> {
        self.update(true, |s| {
            s.color_palette = palette;
            Ok(())
        })
    }

    pub fn set_pattern_scale(&mut self, scale: f64) -> MeshResult<()> {
        self.update(true, |s| {
            s.pattern_scale = validate_pattern_scale(scale)?;
            Ok(())
        })
    }

    pub fn set_density(&mut self, density: DensityFn) -> MeshResult<()> {
        self.update(true, |s| {
            s.density = density;
            Ok(())
        })
    }

    pub fn set_function(&mut self, function: ScalarFn) -> MeshResult<()> {
        self.update(true, |s| {
            s.function = function;
            Ok(())
        })
    }

    /// Sets the lower end of the fixed normalization range.
    ///
    /// The range is only used while `min_global < max_global`.
    pub fn set_min_global(&mut self, min: f64) -> MeshResult<()> {
        self.update(true, |s| {
            s.min_global = min;
            Ok(())
        })
    }

    /// Sets the upper end of the fixed normalization range.
    pub fn set_max_global(&mut self, max: f64) -> MeshResult<()> {
        self.update(true, |s| {
            s.max_global = max;
            Ok(())
        })
    }

    /// Sets both ends of the fixed normalization range in one rebuild.
    pub fn set_global_range(&mut self, min: f64, max: f64) -> MeshResult<()> {
        self.update(true, |s| {
            s.min_global = min;
            s.max_global = max;
            Ok(())
        })
    }

    pub fn set_face_coloring(&mut self, coloring: FaceColoring) -> MeshResult<()> {
        self.update(true, |s| {
            s.face_coloring = coloring;
            Ok(())
        })
    }

    pub fn set_section_type(&mut self, section_type: SectionType) -> MeshResult<()> {
        self.update(true, |s| {
            s.section_type = section_type;
            Ok(())
        })
    }

    /// Sets the diffuse color. The mesh arrays are not affected.
    pub fn set_diffuse_color(&mut self, color: Rgba) -> MeshResult<()> {
        self.update(false, |s| {
            s.diffuse_color = color;
            Ok(())
        })
    }

    /// Sets the carbon pattern. The mesh arrays are not affected.
    pub fn set_carbon_pattern(&mut self, pattern: CarbonPattern) -> MeshResult<()> {
        self.update(false, |s| {
            s.carbon_pattern = pattern;
            Ok(())
        })
    }

    fn update(
        &mut self,
        rebuild: bool,
        change: impl FnOnce(&mut TextureSettings) -> MeshResult<()>,
    ) -> MeshResult<()> {
        let mut settings = self.settings.clone();
        change(&mut settings)?;
        self.commit_settings(settings, rebuild)
    }

    fn commit_settings(&mut self, settings: TextureSettings, rebuild: bool) -> MeshResult<()> {
        let palette = if settings.colors != self.palette.len()
            || settings.color_palette != self.palette.strategy()
        {
            Arc::new(build_palette(settings.colors, settings.color_palette)?)
        } else {
            Arc::clone(&self.palette)
        };
        if rebuild && self.snapshot.is_some() {
            let snapshot = build_snapshot(&self.inputs, &settings, &palette)?;
            self.install(snapshot);
        }
        self.settings = settings;
        self.palette = palette;
        Ok(())
    }

    fn commit_inputs(&mut self, inputs: MeshInputs) -> MeshResult<()> {
        if self.snapshot.is_some() {
            let snapshot = build_snapshot(&inputs, &self.settings, &self.palette)?;
            self.install(snapshot);
        }
        self.inputs = inputs;
        Ok(())
    }

    fn install(&mut self, snapshot: MeshSnapshot) {
        log::debug!(
            "installed mesh snapshot: {} vertices, {} faces, {} texcoords",
            snapshot.vertex_count(),
            snapshot.triangle_count(),
            snapshot.tex_coord_count()
        );
        self.snapshot = Some(Arc::new(snapshot));
    }

    // ─── Queries ────────────────────────────────────────────────────────

    /// Returns the current snapshot, if the mesh has been created.
    ///
    /// The returned `Arc` stays valid and unchanged after later rebuilds.
    pub fn snapshot(&self) -> Option<Arc<MeshSnapshot>> {
        self.snapshot.clone()
    }

    #[inline]
    pub fn is_built(&self) -> bool {
        self.snapshot.is_some()
    }

    #[inline]
    pub fn settings(&self) -> &TextureSettings {
        &self.settings
    }

    #[inline]
    pub fn geometry(&self) -> &Geometry {
        &self.inputs.geometry
    }

    /// Returns the palette of the colored modes.
    #[inline]
    pub fn palette(&self) -> &Arc<Palette> {
        &self.palette
    }

    /// Returns the material for the active texture mode.
    pub fn material(&self) -> Material {
        let image = match self.settings.texture_type {
            TextureType::None => self.settings.overlay.as_deref(),
            _ => self.settings.image.as_deref(),
        };
        Material::for_mode(
            self.settings.texture_type,
            self.settings.diffuse_color,
            image,
            self.settings.carbon_pattern,
            &self.palette,
        )
    }

    /// Returns the first vertex, or the origin for an empty geometry.
    pub fn origin(&self) -> Point3D {
        self.inputs.geometry.origin()
    }

    /// Returns the cross-section radius factor at `angle`.
    pub fn polygonal_section(&self, angle: f64) -> f64 {
        self.settings.section_type.polygonal_section(angle)
    }

    /// Returns the cross-section perimeter for `radius`.
    pub fn polygonal_size(&self, radius: f64) -> f64 {
        self.settings.section_type.polygonal_size(radius)
    }

    /// Returns the total triangle area of the geometry.
    pub fn mesh_area(&self) -> f64 {
        self.inputs.geometry.area()
    }

    /// Returns the faces hit by a ray, in face-list order.
    ///
    /// The texture mode is left unchanged.
    pub fn intersections(
        &self,
        origin: Point3D,
        direction: Point3D,
    ) -> MeshResult<Vec<Intersection>> {
        if self.snapshot.is_none() {
            return Err(MeshError::MeshNotBuilt);
        }
        intersect::intersections(&self.inputs.geometry, origin, direction)
    }

    /// Returns the number of faces hit by a ray.
    pub fn intersection_count(&self, origin: Point3D, direction: Point3D) -> MeshResult<usize> {
        self.intersections(origin, direction).map(|hits| hits.len())
    }

    /// Switches to per-face coloring and marks the faces hit by a ray.
    ///
    /// Hit faces show the last of 10 palette colors, all others the first.
    /// The marking lasts until the next rebuild.
    pub fn highlight_intersections(
        &mut self,
        origin: Point3D,
        direction: Point3D,
    ) -> MeshResult<Vec<Intersection>> {
        let hits = self.intersections(origin, direction)?;

        let mut settings = self.settings.clone();
        settings.texture_type = TextureType::ColoredFaces;
        settings.colors = INTERSECTION_HIGHLIGHT_COLORS;
        let palette = if self.palette.len() == INTERSECTION_HIGHLIGHT_COLORS
            && self.palette.strategy() == settings.color_palette
        {
            Arc::clone(&self.palette)
        } else {
            Arc::new(build_palette(settings.colors, settings.color_palette)?)
        };

        let geometry = &self.inputs.geometry;
        let snapshot = MeshSnapshot::assemble(
            geometry.vertices_f32(self.inputs.vertex_factor),
            palette.texture_coords(),
            intersect::highlight_faces(geometry, &hits, palette.len())?,
            geometry.face_count(),
            self.inputs.smoothing_groups.as_deref(),
        )?;
        self.install(snapshot);
        self.settings = settings;
        self.palette = palette;
        Ok(hits)
    }
}

impl Default for TexturedMesh {
    fn default() -> Self {
        Self::new()
    }
}
