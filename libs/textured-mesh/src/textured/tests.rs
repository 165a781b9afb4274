//! # Textured Mesh Tests

use super::*;
use crate::faces::{texcoord_column, vertex_column};
use crate::mapping::{density_fn, scalar_fn};
use crate::material::DiffuseMap;
use crate::primitives::{create_cube, create_plane};
use approx::assert_relative_eq;
use config::constants::{ConfigError, DEFAULT_COLORS, DEFAULT_SMOOTHING_GROUP};
use glam::DVec3;

fn cube_mesh() -> TexturedMesh {
    let mut mesh = TexturedMesh::new();
    mesh.load_shape(create_cube(DVec3::ONE, false).unwrap())
        .unwrap();
    mesh.create_mesh().unwrap();
    mesh
}

fn plane_mesh() -> TexturedMesh {
    let mut mesh = TexturedMesh::new();
    mesh.load_shape(create_plane(4.0, 2.0, 4, 2).unwrap())
        .unwrap();
    mesh.create_mesh().unwrap();
    mesh
}

#[test]
fn test_defaults() {
    let mesh = TexturedMesh::new();
    assert!(!mesh.is_built());
    assert!(mesh.snapshot().is_none());
    assert_eq!(mesh.settings().texture_type, TextureType::None);
    assert_eq!(mesh.settings().colors, DEFAULT_COLORS);
    assert_eq!(mesh.palette().len(), DEFAULT_COLORS);
    assert_eq!(mesh.settings().value_range(), ValueRange::Observed);
}

#[test]
fn test_with_config_validates() {
    let mesh = TexturedMesh::with_config(TextureConfig::new(16, 2.0).unwrap()).unwrap();
    assert_eq!(mesh.palette().len(), 16);
    assert_eq!(mesh.settings().pattern_scale, 2.0);

    let config = TextureConfig {
        colors: 0,
        pattern_scale: 1.0,
    };
    assert!(matches!(
        TexturedMesh::with_config(config),
        Err(MeshError::Config(ConfigError::InvalidColorCount(0)))
    ));
}

#[test]
fn test_none_mode_snapshot() {
    let mesh = cube_mesh();
    let snapshot = mesh.snapshot().unwrap();
    assert_eq!(snapshot.vertex_count(), 8);
    assert_eq!(snapshot.triangle_count(), 12);
    assert_eq!(snapshot.tex_coords(), &[0.0, 0.0]);
    assert!(texcoord_column(snapshot.faces()).iter().all(|&t| t == 0));
    assert_eq!(snapshot.smoothing_groups(), &[DEFAULT_SMOOTHING_GROUP; 12]);
}

#[test]
fn test_setters_before_mesh_only_store() {
    let mut mesh = TexturedMesh::new();
    mesh.load_shape(create_cube(DVec3::ONE, false).unwrap())
        .unwrap();
    // pattern needs a texture-face list the cube does not have, but nothing
    // is built yet
    mesh.set_texture_type(TextureType::Pattern).unwrap();
    mesh.set_colors(12).unwrap();
    assert!(mesh.snapshot().is_none());
    assert_eq!(mesh.palette().len(), 12);
    assert_eq!(
        mesh.intersections(Point3D::ORIGIN, Point3D::new(1.0, 0.0, 0.0))
            .unwrap_err(),
        MeshError::MeshNotBuilt
    );
    // configuration is still validated
    assert!(mesh.set_colors(0).is_err());
    assert!(mesh.update_vertices(2.0).is_ok());
    assert!(mesh.create_mesh().is_err());
}

#[test]
fn test_image_none_image_round_trip() {
    let mut mesh = plane_mesh();
    mesh.set_texture_mode(TextureMode::Image {
        path: "wood.png".into(),
    })
    .unwrap();
    let image = mesh.snapshot().unwrap();

    mesh.set_texture_type(TextureType::None).unwrap();
    assert_eq!(mesh.snapshot().unwrap().tex_coords(), &[0.0, 0.0]);

    mesh.set_texture_type(TextureType::Image).unwrap();
    let again = mesh.snapshot().unwrap();
    assert_eq!(again.tex_coords(), image.tex_coords());
    assert_eq!(again.faces(), image.faces());
}

#[test]
fn test_rebuild_is_idempotent() {
    let mut mesh = plane_mesh();
    mesh.set_texture_mode(TextureMode::Vertices3D {
        colors: 32,
        palette: Some(ColorPalette::Viridis),
        density: density_fn(|p: &Point3D| (p.x * p.y) as f64),
        range: None,
    })
    .unwrap();
    let first = mesh.snapshot().unwrap();
    mesh.create_mesh().unwrap();
    let second = mesh.snapshot().unwrap();
    assert!(!Arc::ptr_eq(&first, &second));
    assert_eq!(*first, *second);
}

#[test]
fn test_old_snapshot_survives_swap() {
    let mut mesh = cube_mesh();
    let before = mesh.snapshot().unwrap();
    mesh.set_texture_mode(TextureMode::Faces {
        colors: 5,
        palette: None,
    })
    .unwrap();
    assert_eq!(before.tex_coords(), &[0.0, 0.0]);
    assert_eq!(mesh.snapshot().unwrap().tex_coord_count(), 5);
}

#[test]
fn test_failed_rebuild_rolls_back() {
    let mut mesh = cube_mesh();
    mesh.set_colors(7).unwrap();
    let before = mesh.snapshot().unwrap();

    let result = mesh.set_texture_type(TextureType::Pattern);
    assert!(matches!(result, Err(MeshError::MissingTextureGrid { .. })));
    assert_eq!(mesh.settings().texture_type, TextureType::None);
    assert!(Arc::ptr_eq(&before, &mesh.snapshot().unwrap()));

    assert!(mesh.set_colors(0).is_err());
    assert_eq!(mesh.settings().colors, 7);
    assert_eq!(mesh.palette().len(), 7);
    assert!(Arc::ptr_eq(&before, &mesh.snapshot().unwrap()));
}

#[test]
fn test_pattern_needs_texture_faces() {
    let mut mesh = cube_mesh();
    mesh.create_tex_coords(2, 2).unwrap();
    assert_eq!(
        mesh.set_texture_type(TextureType::Pattern).unwrap_err(),
        MeshError::MissingTextureFaces {
            mode: TextureType::Pattern
        }
    );
}

#[test]
fn test_pattern_on_plane() {
    let mut mesh = plane_mesh();
    mesh.set_texture_mode(TextureMode::Pattern {
        pattern: CarbonPattern::CarbonKevlar,
        scale: 3.0,
    })
    .unwrap();
    let snapshot = mesh.snapshot().unwrap();
    assert_eq!(snapshot.tex_coord_count(), 15);
    // last coordinate is the (1, 1) corner, tiled 3 times with the 2/4 aspect
    let coords = snapshot.tex_coords();
    assert_relative_eq!(coords[coords.len() - 2], 3.0);
    assert_relative_eq!(coords[coords.len() - 1], 1.5);
    assert_eq!(
        mesh.material().diffuse_map,
        Some(DiffuseMap::Pattern(CarbonPattern::CarbonKevlar))
    );

    mesh.set_pattern_scale(1.0).unwrap();
    let coords = mesh.snapshot().unwrap().tex_coords().to_vec();
    assert_relative_eq!(coords[coords.len() - 1], 0.5);
    assert!(mesh.set_pattern_scale(0.0).is_err());
}

#[test]
fn test_reverse_tex_coords() {
    let mut mesh = plane_mesh();
    mesh.set_texture_type(TextureType::Image).unwrap();
    let forward = mesh.snapshot().unwrap();
    mesh.create_reverse_tex_coords(4, 2).unwrap();
    let reverse = mesh.snapshot().unwrap();
    assert_eq!(forward.tex_coords()[1], 0.0);
    assert_eq!(reverse.tex_coords()[1], 1.0);
    assert_eq!(forward.tex_coord_count(), reverse.tex_coord_count());
}

#[test]
fn test_colored_faces_cube() {
    let mut mesh = cube_mesh();
    mesh.set_texture_mode(TextureMode::Faces {
        colors: 5,
        palette: None,
    })
    .unwrap();
    let snapshot = mesh.snapshot().unwrap();
    assert_eq!(snapshot.triangle_count(), 12);
    for record in snapshot.faces().chunks(6) {
        assert_eq!(record[1], record[3]);
        assert_eq!(record[3], record[5]);
        assert!(record[1] < 5);
    }
    assert_eq!(mesh.material().palette(), Some(mesh.palette().as_ref()));
}

#[test]
fn test_vertices_1d_global_range() {
    let mut mesh = cube_mesh();
    mesh.set_texture_mode(TextureMode::Vertices1D {
        colors: 10,
        palette: Some(ColorPalette::Greyscale),
        function: scalar_fn(|t| t),
        range: Some((0.0, 2.0)),
    })
    .unwrap();
    let faces = mesh.snapshot().unwrap().faces().to_vec();
    for pair in faces.chunks(2) {
        // bottom f = 0, top f = 1 which is halfway through the range
        let expected = if pair[0] < 4 { 0 } else { 5 };
        assert_eq!(pair[1], expected);
    }

    // an empty range falls back to the observed one
    mesh.set_global_range(1.0, 1.0).unwrap();
    let faces = mesh.snapshot().unwrap().faces().to_vec();
    for pair in faces.chunks(2) {
        let expected = if pair[0] < 4 { 0 } else { 9 };
        assert_eq!(pair[1], expected);
    }
}

#[test]
fn test_function_change_rebuilds() {
    let mut mesh = cube_mesh();
    mesh.set_texture_mode(TextureMode::Vertices1D {
        colors: 4,
        palette: None,
        function: scalar_fn(|t| t),
        range: None,
    })
    .unwrap();
    let rising = texcoord_column(mesh.snapshot().unwrap().faces());
    mesh.set_function(scalar_fn(|t| -t)).unwrap();
    let falling = texcoord_column(mesh.snapshot().unwrap().faces());
    assert_ne!(rising, falling);
    let cube = create_cube(DVec3::ONE, false).unwrap().geometry;
    let expected: Vec<u32> = cube.faces().iter().flat_map(|f| f.indices()).collect();
    assert_eq!(vertex_column(mesh.snapshot().unwrap().faces()), expected);
}

#[test]
fn test_palette_change_rebuilds_strip() {
    let mut mesh = cube_mesh();
    mesh.set_texture_mode(TextureMode::Faces {
        colors: 6,
        palette: None,
    })
    .unwrap();
    mesh.set_colors(9).unwrap();
    assert_eq!(mesh.snapshot().unwrap().tex_coord_count(), 9);
    mesh.set_color_palette(ColorPalette::Turbo).unwrap();
    assert_eq!(mesh.palette().strategy(), ColorPalette::Turbo);
    assert_eq!(mesh.palette().len(), 9);
}

#[test]
fn test_empty_image_path_rejected() {
    let mut mesh = plane_mesh();
    assert_eq!(
        mesh.set_texture_mode(TextureMode::Image {
            path: String::new()
        })
        .unwrap_err(),
        MeshError::EmptyImagePath
    );
    assert_eq!(mesh.settings().texture_type, TextureType::None);
}

#[test]
fn test_none_mode_material() {
    let mut mesh = cube_mesh();
    let red = Rgba::new(1.0, 0.0, 0.0, 1.0);
    mesh.set_texture_mode(TextureMode::None {
        color: red,
        image: Some("decal.png".into()),
    })
    .unwrap();
    let material = mesh.material();
    assert_eq!(material.diffuse_color, red);
    assert_eq!(material.diffuse_map, Some(DiffuseMap::Image("decal.png".into())));

    let before = mesh.snapshot().unwrap();
    mesh.set_diffuse_color(Rgba::BLACK).unwrap();
    assert!(Arc::ptr_eq(&before, &mesh.snapshot().unwrap()));
    assert_eq!(mesh.material().diffuse_color, Rgba::BLACK);
}

#[test]
fn test_update_vertices_scales_points() {
    let mut mesh = cube_mesh();
    let before = mesh.snapshot().unwrap();
    mesh.update_vertices(2.0).unwrap();
    let scaled = mesh.snapshot().unwrap();
    assert_eq!(scaled.faces(), before.faces());
    assert_eq!(scaled.bounding_box().1, DVec3::splat(2.0));

    mesh.set_texture_type(TextureType::ColoredFaces).unwrap();
    assert_eq!(mesh.snapshot().unwrap().bounding_box().1, DVec3::splat(2.0));
}

#[test]
fn test_smoothing_groups() {
    let mut mesh = cube_mesh();
    let groups: Vec<u32> = (0..12).map(|i| i / 2).collect();
    mesh.set_smoothing_groups(Some(groups.clone())).unwrap();
    assert_eq!(mesh.snapshot().unwrap().smoothing_groups(), groups.as_slice());

    assert_eq!(
        mesh.set_smoothing_groups(Some(vec![1; 3])).unwrap_err(),
        MeshError::SmoothingGroupMismatch {
            faces: 12,
            groups: 3
        }
    );

    mesh.set_smoothing_groups(None).unwrap();
    assert_eq!(
        mesh.snapshot().unwrap().smoothing_groups(),
        &[DEFAULT_SMOOTHING_GROUP; 12]
    );
}

#[test]
fn test_intersections_leave_mode_alone() {
    let mesh = cube_mesh();
    let origin = Point3D::new(-1.0, 0.3, 0.6);
    let direction = Point3D::new(1.0, 0.0, 0.0);
    assert_eq!(mesh.intersection_count(origin, direction).unwrap(), 2);
    assert_eq!(mesh.settings().texture_type, TextureType::None);
}

#[test]
fn test_highlight_intersections() {
    let mut mesh = cube_mesh();
    let hits = mesh
        .highlight_intersections(Point3D::new(-1.0, 0.3, 0.6), Point3D::new(1.0, 0.0, 0.0))
        .unwrap();
    assert_eq!(hits.len(), 2);
    assert_eq!(mesh.settings().texture_type, TextureType::ColoredFaces);
    assert_eq!(mesh.palette().len(), INTERSECTION_HIGHLIGHT_COLORS);

    let snapshot = mesh.snapshot().unwrap();
    let marked: Vec<usize> = snapshot
        .faces()
        .chunks(6)
        .enumerate()
        .filter(|(_, record)| record[1] == 9)
        .map(|(i, _)| i)
        .collect();
    let mut hit_faces: Vec<usize> = hits.iter().map(|h| h.face_index).collect();
    hit_faces.sort_unstable();
    assert_eq!(marked, hit_faces);
}

#[test]
fn test_geometry_queries() {
    let mut mesh = cube_mesh();
    assert_eq!(mesh.origin(), mesh.geometry().vertices()[0]);
    assert_relative_eq!(mesh.mesh_area(), 6.0);
    assert_eq!(TexturedMesh::new().origin(), Point3D::ORIGIN);

    assert_relative_eq!(mesh.polygonal_section(0.3), 1.0);
    assert_relative_eq!(mesh.polygonal_size(1.0), 2.0 * std::f64::consts::PI);
    mesh.set_section_type(SectionType::polygon(4).unwrap()).unwrap();
    assert_eq!(mesh.settings().section_type.sides(), Some(4));
    assert!(mesh.polygonal_size(1.0) > 0.0);
}

#[test]
fn test_set_geometry_resets_smoothing_groups() {
    let mut mesh = cube_mesh();
    mesh.set_smoothing_groups(Some(vec![2; 12])).unwrap();
    let plane = create_plane(1.0, 1.0, 1, 1).unwrap().geometry;
    mesh.set_geometry(plane).unwrap();
    let snapshot = mesh.snapshot().unwrap();
    assert_eq!(snapshot.triangle_count(), 2);
    assert_eq!(snapshot.smoothing_groups(), &[DEFAULT_SMOOTHING_GROUP; 2]);
}

#[test]
fn test_none_mode_keeps_image_path() {
    let mut mesh = plane_mesh();
    mesh.set_texture_mode(TextureMode::Image {
        path: "wood.png".into(),
    })
    .unwrap();
    mesh.set_texture_mode(TextureMode::None {
        color: Rgba::BLACK,
        image: None,
    })
    .unwrap();
    assert_eq!(mesh.material(), Material::color(Rgba::BLACK));

    mesh.set_texture_type(TextureType::Image).unwrap();
    assert_eq!(
        mesh.material().diffuse_map,
        Some(DiffuseMap::Image("wood.png".into()))
    );
}
