//! Tests for contour extraction.

use contour_engine::trace::EPSILON;
use contour_engine::{extract_contours, ContourExtractor, Grid, LevelContours, Path};
use test_utils::{
    assert_approx_eq, assert_coords_approx_eq, create_bump_grid, create_checkerboard_grid,
    create_constant_grid, create_gradient_grid, create_noise_grid, create_ring_grid,
    create_saddle_grid,
};

fn assert_well_formed(contours: &[LevelContours]) {
    for level in contours {
        for path in &level.paths {
            assert_well_formed_path(path);
        }
    }
}

fn assert_well_formed_path(path: &Path) {
    assert!(path.len() >= 4, "polygon needs three corners: {:?}", path);
    assert!(path.is_closed(EPSILON), "path not closed: {:?}", path);
    for w in path.points.windows(2) {
        let close = (w[0].x - w[1].x).abs() <= EPSILON && (w[0].y - w[1].y).abs() <= EPSILON;
        assert!(!close, "consecutive duplicate points {:?} {:?}", w[0], w[1]);
    }
}

// ============================================================================
// Trivial fields
// ============================================================================

#[test]
fn test_all_below_yields_no_polygons() {
    let rows = create_constant_grid(6, 7, 1.0);
    let out = extract_contours(&rows, &[2.0, 5.0, 10.0], 100.0, 100.0).unwrap();

    assert_eq!(out.len(), 3);
    assert!(out.iter().all(|level| level.paths.is_empty()));
}

#[test]
fn test_all_equal_to_level_yields_no_polygons() {
    // equal counts as below, so the whole grid is below the level
    let rows = create_constant_grid(5, 5, 5.0);
    let out = extract_contours(&rows, &[5.0], 10.0, 10.0).unwrap();

    assert_eq!(out.len(), 1);
    assert!(out[0].paths.is_empty());
}

#[test]
fn test_all_above_yields_one_boundary() {
    // the padding border closes a single ring around the data
    let rows = create_constant_grid(4, 4, 9.0);
    let out = extract_contours(&rows, &[5.0], 4.0, 4.0).unwrap();

    assert_eq!(out[0].paths.len(), 1);
    assert_well_formed(&out);
    assert!(out[0].paths[0].signed_area() > 0.0);
}

// ============================================================================
// Shapes
// ============================================================================

#[test]
fn test_bump_gives_one_circular_polygon() {
    let size = 41;
    let radius = 6.0;
    let rows = create_bump_grid(size, size, 100.0, radius);
    let out = extract_contours(&rows, &[50.0], size as f64, size as f64).unwrap();

    assert_eq!(out[0].paths.len(), 1);
    assert_well_formed(&out);

    // unit scale: sample (r, c) sits at (c + 0.5, r + 0.5)
    let centre = (size as f64 - 1.0) / 2.0 + 0.5;
    let path = &out[0].paths[0];
    for p in &path.points {
        let d = ((p.x - centre).powi(2) + (p.y - centre).powi(2)).sqrt();
        assert_approx_eq!(d, radius, 0.15);
    }

    let area = path.signed_area();
    let circle = std::f64::consts::PI * radius * radius;
    assert!(area > 0.0);
    assert!((area - circle).abs() / circle < 0.05, "area {} vs {}", area, circle);
}

#[test]
fn test_nested_levels_are_nested() {
    let rows = create_bump_grid(31, 31, 100.0, 5.0);
    let out = extract_contours(&rows, &[20.0, 50.0, 80.0], 31.0, 31.0).unwrap();

    let areas: Vec<f64> = out
        .iter()
        .map(|level| {
            assert_eq!(level.paths.len(), 1, "level {}", level.level);
            level.paths[0].signed_area()
        })
        .collect();
    assert!(areas[0] > areas[1] && areas[1] > areas[2]);
}

#[test]
fn test_ring_has_outer_boundary_and_hole() {
    let rows = create_ring_grid(21, 4.0, 8.0, 0.0, 10.0);
    let out = extract_contours(&rows, &[5.0], 21.0, 21.0).unwrap();

    assert_eq!(out[0].paths.len(), 2);
    assert_well_formed(&out);

    let mut areas: Vec<f64> = out[0].paths.iter().map(Path::signed_area).collect();
    areas.sort_by(f64::total_cmp);
    assert!(areas[0] < 0.0, "hole should wind clockwise");
    assert!(areas[1] > 0.0, "outer ring should wind counter-clockwise");
    assert!(areas[1] > -areas[0]);
}

#[test]
fn test_vertical_contour_on_gradient() {
    // samples equal their column index; level 2.5 crosses halfway between columns 2 and 3
    let rows = create_gradient_grid(5, 6);
    let out = extract_contours(&rows, &[2.5], 6.0, 5.0).unwrap();

    assert_eq!(out[0].paths.len(), 1);
    assert_well_formed(&out);

    // every crossing inside the data lies on x = 3.0 (column 2.5 + half-sample offset)
    let inner: Vec<_> = out[0].paths[0]
        .points
        .iter()
        .filter(|p| p.y > 0.5 && p.y < 4.5)
        .collect();
    assert!(!inner.is_empty());
    for p in inner {
        if p.x < 5.0 {
            assert_approx_eq!(p.x, 3.0, 1e-12);
        }
    }
}

// ============================================================================
// Saddles
// ============================================================================

#[test]
fn test_saddle_center_above_joins_regions() {
    // window average 5 > level 4: the two high samples connect
    let out = extract_contours(&create_saddle_grid(), &[4.0], 2.0, 2.0).unwrap();
    assert_eq!(out[0].paths.len(), 1);
    assert_well_formed(&out);
}

#[test]
fn test_saddle_center_below_splits_regions() {
    // window average 5 < level 6: the two high samples stay apart
    let out = extract_contours(&create_saddle_grid(), &[6.0], 2.0, 2.0).unwrap();
    assert_eq!(out[0].paths.len(), 2);
    assert_well_formed(&out);
    assert!(out[0].paths.iter().all(|p| p.signed_area() > 0.0));
}

#[test]
fn test_saddle_tie_counts_as_above() {
    // average exactly equal to the level is not "below", so no flip
    let out = extract_contours(&create_saddle_grid(), &[5.0], 2.0, 2.0).unwrap();
    assert_eq!(out[0].paths.len(), 1);
}

#[test]
fn test_checkerboard_joined() {
    let rows = create_checkerboard_grid(3, 3, 0.0, 1.0);
    let out = extract_contours(&rows, &[0.5], 3.0, 3.0).unwrap();
    assert_eq!(out[0].paths.len(), 1);
    assert_well_formed(&out);
}

#[test]
fn test_checkerboard_split_traces_saddle_only_ring() {
    // every window average is 0.5 < 0.75; the centre sample's ring crosses
    // only saddle cells and must still be found
    let rows = create_checkerboard_grid(3, 3, 0.0, 1.0);
    let out = extract_contours(&rows, &[0.75], 3.0, 3.0).unwrap();
    assert_eq!(out[0].paths.len(), 5);
    assert_well_formed(&out);
}

// ============================================================================
// Non-finite samples
// ============================================================================

#[test]
fn test_nan_is_treated_as_below() {
    let mut rows = create_constant_grid(5, 5, 10.0);
    rows[2][2] = f64::NAN;
    let out = extract_contours(&rows, &[5.0], 5.0, 5.0).unwrap();

    // outer boundary plus a hole around the NaN sample
    assert_eq!(out[0].paths.len(), 2);
    assert_well_formed(&out);
    assert!(out[0].paths.iter().any(|p| p.signed_area() < 0.0));
}

#[test]
fn test_infinity_is_treated_as_below() {
    let mut rows = create_constant_grid(4, 4, 0.0);
    rows[1][1] = f64::INFINITY;
    rows[2][2] = f64::NEG_INFINITY;
    let out = extract_contours(&rows, &[1.0], 4.0, 4.0).unwrap();
    assert!(out[0].paths.is_empty());
}

// ============================================================================
// Determinism and coordinates
// ============================================================================

#[test]
fn test_noise_paths_are_well_formed() {
    let rows = create_noise_grid(40, 30, 7);
    let levels: Vec<f64> = (1..10).map(|i| i as f64 * 10.0).collect();
    let out = extract_contours(&rows, &levels, 300.0, 400.0).unwrap();

    assert_eq!(out.len(), levels.len());
    for (level, contours) in levels.iter().zip(&out) {
        assert_eq!(*level, contours.level);
        assert!(!contours.paths.is_empty());
    }
    assert_well_formed(&out);
}

#[test]
fn test_extraction_is_deterministic() {
    let grid = Grid::from_rows(&create_noise_grid(32, 32, 99)).unwrap();
    let levels = [25.0, 50.0, 75.0];

    let first = ContourExtractor::new().extract(&grid, &levels, 640.0, 480.0).unwrap();
    let second = ContourExtractor::new().extract(&grid, &levels, 640.0, 480.0).unwrap();
    let sequential = ContourExtractor::new()
        .with_parallel(false)
        .extract(&grid, &levels, 640.0, 480.0)
        .unwrap();

    let bits = |out: &[LevelContours]| -> Vec<u64> {
        out.iter()
            .flat_map(|level| level.paths.iter())
            .flat_map(|path| path.points.iter())
            .flat_map(|p| [p.x.to_bits(), p.y.to_bits()])
            .collect()
    };
    assert_eq!(bits(&first), bits(&second));
    assert_eq!(bits(&first), bits(&sequential));
}

#[test]
fn test_output_scaling_round_trip() {
    let rows = create_bump_grid(20, 30, 100.0, 4.0);
    let (cols, nrows) = (30.0, 20.0);
    let (width, height) = (800.0, 250.0);

    let unit = extract_contours(&rows, &[50.0], cols, nrows).unwrap();
    let scaled = extract_contours(&rows, &[50.0], width, height).unwrap();

    let back = scaled[0].paths[0].scaled(cols / width, nrows / height);
    let grid_space = &unit[0].paths[0];
    assert_eq!(back.len(), grid_space.len());
    for (a, b) in back.points.iter().zip(&grid_space.points) {
        assert_coords_approx_eq!((a.x, a.y), (b.x, b.y), 1e-9);
    }
}

// ============================================================================
// Degenerate rings
// ============================================================================

#[test]
fn test_near_level_peak_emits_no_degenerate_path() {
    let rows = [[0.0, 0.0, 0.0], [0.0, 5.0 + 1e-12, 0.0], [0.0, 0.0, 0.0]];
    let out = extract_contours(&rows, &[5.0], 3.0, 3.0).unwrap();

    assert_well_formed(&out);
    assert!(out[0].paths.is_empty());
}

#[test]
fn test_tiny_output_box_keeps_points_distinct() {
    let rows = create_bump_grid(200, 200, 100.0, 40.0);
    let out = extract_contours(&rows, &[50.0], 1e-8, 1e-8).unwrap();

    assert_well_formed(&out);
    assert_eq!(out[0].paths.len(), 1);

    // same ring at unit scale has more points; some merged after scaling
    let unit = extract_contours(&rows, &[50.0], 200.0, 200.0).unwrap();
    assert!(out[0].paths[0].len() < unit[0].paths[0].len());
}
