use std::fs;
use std::path::{Path, PathBuf};

use glam::Vec2;
use tempfile::TempDir;

use gridmap::raster::encode_pgm;
use gridmap::{
    GridError, GridInfo, LoadOptions, MapRegistry, MapSource, OccupancyMap, RasterMatrix,
    load_grid, load_grid_dir,
};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn assert_close(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() < 1e-5,
        "expected {expected}, got {actual}"
    );
}

/// Centre of the 0-based `(row, col)` cell in a 0.1 m grid.
fn centre(row: usize, col: usize) -> (f32, f32) {
    ((col as f32 + 0.5) * 0.1, (row as f32 + 0.5) * 0.1)
}

fn white_4x4_bytes() -> Vec<u8> {
    let mut bytes = b"P5\n4 4\n255\n".to_vec();
    bytes.extend_from_slice(&[255; 16]);
    bytes
}

#[test]
fn all_free_raster_is_free_everywhere() {
    let info = GridInfo::default();
    let raster = white_4x4_bytes();
    let grid = load_grid(
        MapSource::Parts {
            info: &info,
            raster: &raster,
        },
        &LoadOptions::default(),
    )
    .expect("grid should load");

    for row in 0..4 {
        for col in 0..4 {
            let (x, y) = centre(row, col);
            assert!(!grid.is_occupied(x, y).unwrap(), "({row}, {col})");
        }
    }
    assert_eq!(grid.physical_size(), Vec2::new(4.0 * 0.1, 4.0 * 0.1));
}

#[test]
fn loads_fixture_directory() {
    let grid = load_grid_dir(fixture("simple"), &LoadOptions::default()).expect("grid should load");

    assert_eq!(grid.rows(), 4);
    assert_eq!(grid.cols(), 4);
    assert_eq!(grid.resolution(), 0.1);
    assert_eq!(grid.origin(), [-0.2, -0.2, 0.0]);

    let (x, y) = centre(1, 2);
    assert!(grid.is_occupied(x, y).unwrap());
    // Two cells to the left of the obstacle.
    let (x, y) = centre(1, 0);
    assert!(!grid.is_occupied(x, y).unwrap());
    assert!(!grid.is_occupied_at(centre(3, 3)).unwrap());
}

#[test]
fn bounds_are_checked_at_the_far_edges() {
    let grid = load_grid_dir(fixture("simple"), &LoadOptions::default()).unwrap();
    let size = grid.physical_size();

    assert!(grid.is_occupied(0.0, 0.0).is_ok());
    for (x, y) in [(size.x, 0.0), (0.0, size.y), (size.x, size.y), (-0.05, 0.0)] {
        assert!(
            matches!(grid.is_occupied(x, y), Err(GridError::OutOfBounds { .. })),
            "({x}, {y}) should be out of bounds"
        );
    }
}

#[test]
fn preset_resolves_through_registry() {
    let registry = MapRegistry::new().with_map("simple", fixture("simple"));
    let grid = load_grid(
        MapSource::Preset {
            registry: &registry,
            name: "simple",
        },
        &LoadOptions::default(),
    )
    .unwrap();

    let (x, y) = centre(1, 2);
    assert!(grid.is_occupied(x, y).unwrap());
}

#[test]
fn inflation_grows_the_fixture_obstacle() {
    let options = LoadOptions::default().with_inflation(0.3);
    let grid = load_grid(MapSource::Directory(&fixture("simple")), &options).unwrap();

    for row in 0..4 {
        for col in 0..4 {
            let expected = (0..=2).contains(&row) && (1..=3).contains(&col);
            let (x, y) = centre(row, col);
            assert_eq!(grid.is_occupied(x, y).unwrap(), expected, "({row}, {col})");
        }
    }
}

#[test]
fn sdf_is_grid_geodesic_in_meters() {
    let options = LoadOptions::default().with_sdf();
    let grid = load_grid_dir(fixture("simple"), &options).unwrap();

    for row in 0..4usize {
        for col in 0..4usize {
            let (x, y) = centre(row, col);
            let steps = row.abs_diff(1) + col.abs_diff(2);
            assert_close(grid.sdf(x, y).unwrap(), steps as f32 * 0.1);
        }
    }
}

#[test]
fn sdf_requires_opt_in() {
    let grid = load_grid_dir(fixture("simple"), &LoadOptions::default()).unwrap();
    assert!(matches!(grid.sdf(0.05, 0.05), Err(GridError::Unavailable(_))));
}

#[test]
fn negate_option_uses_raster_as_stored() {
    let options = LoadOptions::default().with_negate(true);
    let grid = load_grid_dir(fixture("simple"), &options).unwrap();

    let (x, y) = centre(1, 2);
    assert!(!grid.is_occupied(x, y).unwrap());
    let (x, y) = centre(0, 0);
    assert!(grid.is_occupied(x, y).unwrap());
}

#[test]
fn unsupported_file_type_is_config_error() {
    let err = load_grid_dir(fixture("bad_file_type"), &LoadOptions::default()).unwrap_err();
    assert!(matches!(err, GridError::Config(_)), "got {err:?}");
}

#[test]
fn truncated_raster_is_format_error() {
    let err = load_grid_dir(fixture("truncated"), &LoadOptions::default()).unwrap_err();
    assert!(matches!(err, GridError::Format(_)), "got {err:?}");
}

#[test]
fn bad_magic_is_format_error() {
    let info = GridInfo::default();
    let mut raster = white_4x4_bytes();
    raster[1] = b'2';
    let err = load_grid(
        MapSource::Parts {
            info: &info,
            raster: &raster,
        },
        &LoadOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(err, GridError::Format(_)), "got {err:?}");
}

#[test]
fn loads_generated_16bit_map_from_disk() {
    let dir = TempDir::new().unwrap();

    // 3 rows x 5 cols, one dark cell at row 2, col 4.
    let mut raster = RasterMatrix::filled(3, 5, 1.0).unwrap();
    raster.set(2, 4, 0.0).unwrap();
    let mut bytes = Vec::new();
    encode_pgm(&raster, 1000, &mut bytes).unwrap();
    fs::write(dir.path().join("floor.pgm"), bytes).unwrap();
    fs::write(
        dir.path().join("config.yaml"),
        "file_type: pgm\ngrid_file: floor.pgm\nresolution: 0.5\n",
    )
    .unwrap();

    let grid = load_grid_dir(dir.path(), &LoadOptions::default().with_sdf()).unwrap();

    assert_eq!(grid.physical_size(), Vec2::new(2.5, 1.5));
    assert!(grid.is_occupied(2.25, 1.25).unwrap());
    assert!(!grid.is_occupied(1.75, 1.25).unwrap());
    assert_eq!(grid.sdf(0.25, 0.25).unwrap(), 3.0);
}
