//! # Texture Synthesis Tests

use super::*;
use crate::palette::{build_palette, ColorPalette};

fn source(width: u32, height: u32, order: RowOrder) -> TextureSource {
    let mut source = TextureSource::default();
    source.create_tex_coords(width, height, order).unwrap();
    source
}

#[test]
fn test_grid_rejects_zero_dimension() {
    assert_eq!(
        TextureGrid::new(0, 4).unwrap_err(),
        MeshError::InvalidTextureGrid { width: 0, height: 4 }
    );
}

#[test]
fn test_none_is_single_coordinate() {
    let palette = build_palette(3, ColorPalette::Hsb).unwrap();
    let coords = synthesize(TextureType::None, &TextureSource::default(), 1.0, &palette).unwrap();
    assert_eq!(coords, vec![0.0, 0.0]);
}

#[test]
fn test_image_grid_size() {
    let source = source(4, 2, RowOrder::Forward);
    assert_eq!(source.image_coords.len(), 5 * 3 * 2);
    // last coordinate is the far corner
    assert_eq!(&source.image_coords[28..], &[1.0, 1.0]);
}

#[test]
fn test_reverse_rows_start_at_top() {
    let forward = source(2, 2, RowOrder::Forward).image_coords;
    let reverse = source(2, 2, RowOrder::Reverse).image_coords;
    assert_eq!(&reverse[..6], &[0.0, 1.0, 0.5, 1.0, 1.0, 1.0]);
    // same rows, opposite order
    assert_eq!(&reverse[..6], &forward[12..]);
    assert_eq!(&reverse[12..], &forward[..6]);
}

#[test]
fn test_image_requires_coordinates() {
    let palette = build_palette(3, ColorPalette::Hsb).unwrap();
    let result = synthesize(TextureType::Image, &TextureSource::default(), 1.0, &palette);
    assert_eq!(result.unwrap_err(), MeshError::MissingImageCoords);
}

#[test]
fn test_pattern_requires_grid() {
    let palette = build_palette(3, ColorPalette::Hsb).unwrap();
    let result = synthesize(TextureType::Pattern, &TextureSource::default(), 1.0, &palette);
    assert!(matches!(result, Err(MeshError::MissingTextureGrid { .. })));
}

#[test]
fn test_pattern_scale_without_aspect() {
    let grid = TextureGrid::new(2, 2).unwrap();
    let coords = pattern_tex_coords(grid, 3.0, None);
    assert_eq!(&coords[16..], &[3.0, 3.0]);
}

#[test]
fn test_pattern_aspect_corrects_vertical_tiling() {
    let mut source = source(2, 2, RowOrder::Forward);
    source.area = SurfaceArea {
        width: 4.0,
        height: 2.0,
    };
    let palette = build_palette(3, ColorPalette::Hsb).unwrap();
    let coords = synthesize(TextureType::Pattern, &source, 2.0, &palette).unwrap();
    // u spans the full scale, v half of it
    assert_eq!(&coords[16..], &[2.0, 1.0]);
}

#[test]
fn test_area_without_height_has_no_aspect() {
    let area = SurfaceArea {
        width: 4.0,
        height: 0.0,
    };
    assert_eq!(area.aspect(), None);
}

#[test]
fn test_colored_modes_use_palette_strip() {
    let palette = build_palette(7, ColorPalette::Viridis).unwrap();
    for mode in [
        TextureType::ColoredVertices1D,
        TextureType::ColoredVertices3D,
        TextureType::ColoredFaces,
    ] {
        assert!(mode.uses_palette());
        let coords = synthesize(mode, &TextureSource::default(), 1.0, &palette).unwrap();
        assert_eq!(coords, palette.texture_coords());
    }
    assert!(!TextureType::Image.uses_palette());
}

#[test]
fn test_synthesis_is_idempotent() {
    let mut source = source(8, 5, RowOrder::Reverse);
    source.area = SurfaceArea {
        width: 3.0,
        height: 7.0,
    };
    let palette = build_palette(11, ColorPalette::Turbo).unwrap();
    for mode in [
        TextureType::None,
        TextureType::Image,
        TextureType::Pattern,
        TextureType::ColoredFaces,
    ] {
        let a = synthesize(mode, &source, 1.7, &palette).unwrap();
        let b = synthesize(mode, &source, 1.7, &palette).unwrap();
        let bits = |v: &[f32]| v.iter().map(|c| c.to_bits()).collect::<Vec<_>>();
        assert_eq!(bits(&a), bits(&b), "{mode:?}");
    }
}
