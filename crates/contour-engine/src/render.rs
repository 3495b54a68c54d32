//! Hand-off of extracted polygons to the tiny-skia path model.
//!
//! Filling and stroking stay with the caller; this only builds the path.

use tiny_skia::PathBuilder;

use crate::extract::LevelContours;

/// Build one tiny-skia path holding every polygon of a level as a closed
/// subpath. Fill with `FillRule::EvenOdd` to keep holes open.
///
/// Returns `None` when the level has no polygons.
pub fn to_skia_path(contours: &LevelContours) -> Option<tiny_skia::Path> {
    let mut pb = PathBuilder::new();

    for path in &contours.paths {
        let mut points = path.points.iter();
        let Some(first) = points.next() else {
            continue;
        };
        pb.move_to(first.x as f32, first.y as f32);
        for point in points {
            pb.line_to(point.x as f32, point.y as f32);
        }
        pb.close();
    }

    pb.finish()
}
