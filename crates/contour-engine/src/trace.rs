//! Path stitching: walks crossings from cell to cell into closed polygons.
//!
//! Every path is followed with the above-level region on its left, so rings
//! around above-level areas come out counter-clockwise (y up) and holes
//! clockwise. Coordinates are in padded-cell space: the crossing on side
//! `s` of cell (r, c) sits at `(c + x, r + y)` where `(x, y)` is the
//! cell-local crossing.

use crate::cell::{first_side, next_side, saddle_entries, CellGrid, Side};
use crate::error::{ContourError, Result};
use crate::path::{Path, Point};

/// Consecutive points closer than this in both axes are merged.
pub const EPSILON: f64 = 1e-10;

/// Trace every closed contour in a classified cell grid.
///
/// Paths start from unvisited non-saddle cells in row-major order. Saddles
/// are crossed by those walks; any saddle pass left over afterwards (a ring
/// made only of saddle cells) starts a path of its own.
pub fn trace_paths(cells: &mut CellGrid) -> Result<Vec<Path>> {
    let mut paths = Vec::new();

    for r in 0..cells.rows() {
        for c in 0..cells.cols() {
            let cell = cells.get(r, c);
            if cell.is_empty() || cell.is_saddle() || cell.visited() {
                continue;
            }
            paths.extend(trace_from(cells, r, c, Side::None)?);
        }
    }

    for r in 0..cells.rows() {
        for c in 0..cells.cols() {
            let Some(entries) = saddle_entries(cells.get(r, c).case_index) else {
                continue;
            };
            for entry in entries {
                if !cells.get(r, c).was_entered(entry) {
                    tracing::trace!(row = r, col = c, ?entry, "starting path at saddle");
                    paths.extend(trace_from(cells, r, c, entry.opposite())?);
                }
            }
        }
    }

    Ok(paths)
}

/// Follow one contour from cell (row, col) until it returns to where it began.
///
/// `previous` is the side the path is treated as arriving from: `None` for
/// a non-saddle start, the neighbour's exit side for a saddle start.
/// Returns `None` for a ring that collapses to fewer than three distinct
/// points (a region narrower than [`EPSILON`]); its cells are still consumed.
fn trace_from(
    cells: &mut CellGrid,
    row: usize,
    col: usize,
    previous: Side,
) -> Result<Option<Path>> {
    let start = *cells.get(row, col);
    let entry = first_side(start.case_index, previous)
        .ok_or_else(|| ContourError::malformed(row, col, start.case_index, previous))?;
    let first = crossing_point(cells, row, col, entry)?;

    let mut points = vec![first];
    let (mut r, mut c) = (row, col);
    let mut previous = previous;
    let mut entered = entry;

    // each cell holds at most two passes
    let budget = 2 * cells.rows() * cells.cols() + 1;
    for _ in 0..budget {
        let cell = *cells.get(r, c);
        let exit = next_side(cell.case_index, previous, cell.flip)
            .ok_or_else(|| ContourError::malformed(r, c, cell.case_index, previous))?;

        points.push(crossing_point(cells, r, c, exit)?);
        cells.get_mut(r, c).mark_entered(entered);

        let (nr, nc) = neighbor(cells, r, c, exit)?;
        r = nr;
        c = nc;
        previous = exit;
        entered = exit.opposite();

        if (r, c) == (row, col) && entered == entry {
            let path = Path::closed_ring(points, EPSILON);
            match &path {
                Some(path) => tracing::trace!(row, col, points = path.len(), "closed path"),
                None => tracing::trace!(row, col, "dropped degenerate path"),
            }
            return Ok(path);
        }

        let next = cells.get(r, c);
        if next.is_empty() || next.was_entered(entered) {
            return Err(ContourError::malformed(r, c, next.case_index, previous));
        }
    }

    Err(ContourError::malformed(row, col, start.case_index, previous))
}

fn crossing_point(cells: &CellGrid, row: usize, col: usize, side: Side) -> Result<Point> {
    let cell = cells.get(row, col);
    let (x, y) = cell
        .crossing(side)
        .ok_or_else(|| ContourError::malformed(row, col, cell.case_index, side))?;
    Ok(Point::new(col as f64 + x, row as f64 + y))
}

fn neighbor(cells: &CellGrid, row: usize, col: usize, exit: Side) -> Result<(usize, usize)> {
    let (dr, dc) = exit.step();
    let next = row
        .checked_add_signed(dr)
        .zip(col.checked_add_signed(dc))
        .filter(|&(r, c)| r < cells.rows() && c < cells.cols());
    next.ok_or_else(|| ContourError::malformed(row, col, cells.get(row, col).case_index, exit))
}
