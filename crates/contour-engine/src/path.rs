//! Points and closed polygon paths.

use serde::{Deserialize, Serialize};

/// A point in 2D space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// True when both coordinates are within `epsilon` of `other`.
    pub fn approx_eq(&self, other: &Point, epsilon: f64) -> bool {
        (self.x - other.x).abs() <= epsilon && (self.y - other.y).abs() <= epsilon
    }
}

/// A closed polygon: the last point repeats the first.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Path {
    pub points: Vec<Point>,
}

impl Path {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Build a closed ring from a point sequence.
    ///
    /// Consecutive points within `epsilon` of each other are merged, trailing
    /// points that land on the start are dropped, and the first point is
    /// repeated exactly at the end. Returns `None` when fewer than three
    /// distinct corners remain.
    pub fn closed_ring<I>(points: I, epsilon: f64) -> Option<Path>
    where
        I: IntoIterator<Item = Point>,
    {
        let mut ring: Vec<Point> = Vec::new();
        for p in points {
            match ring.last() {
                Some(last) if last.approx_eq(&p, epsilon) => {}
                _ => ring.push(p),
            }
        }

        let first = *ring.first()?;
        while ring.len() > 1 && ring.last().is_some_and(|last| last.approx_eq(&first, epsilon)) {
            ring.pop();
        }
        if ring.len() < 3 {
            return None;
        }

        ring.push(first);
        Some(Path { points: ring })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// First and last points coincide within `epsilon`.
    pub fn is_closed(&self, epsilon: f64) -> bool {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => self.points.len() > 1 && first.approx_eq(last, epsilon),
            _ => false,
        }
    }

    /// Shoelace area; positive for counter-clockwise rings in a y-up frame.
    pub fn signed_area(&self) -> f64 {
        let twice: f64 = self
            .points
            .windows(2)
            .map(|w| w[0].x * w[1].y - w[1].x * w[0].y)
            .sum();
        twice / 2.0
    }

    /// Axis-aligned bounding box as (min, max).
    pub fn bounds(&self) -> Option<(Point, Point)> {
        let first = *self.points.first()?;
        Some(self.points.iter().fold((first, first), |(lo, hi), p| {
            (
                Point::new(lo.x.min(p.x), lo.y.min(p.y)),
                Point::new(hi.x.max(p.x), hi.y.max(p.y)),
            )
        }))
    }

    /// Copy of this path with every coordinate multiplied by (sx, sy).
    pub fn scaled(&self, sx: f64, sy: f64) -> Path {
        Path {
            points: self
                .points
                .iter()
                .map(|p| Point::new(p.x * sx, p.y * sy))
                .collect(),
        }
    }

    /// Copy of this path moved by (dx, dy).
    pub fn translated(&self, dx: f64, dy: f64) -> Path {
        Path {
            points: self
                .points
                .iter()
                .map(|p| Point::new(p.x + dx, p.y + dy))
                .collect(),
        }
    }
}
