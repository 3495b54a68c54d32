//! Marching-squares cell classification and edge interpolation.
//!
//! Each 2x2 window of the padded grid becomes a [`Cell`]. Corner bits are
//! set for corners at or below the level:
//!
//! ```text
//!   UL(8) ---- top ---- UR(4)
//!     |                   |
//!   left                right
//!     |                   |
//!   LL(1) --- bottom --- LR(2)
//! ```
//!
//! Row `r + 1` is "up" (TOP), column `c + 1` is RIGHT. Paths are walked with
//! the above-level region on their left, which makes every entry/exit pair a
//! pure function of the case index except for the two saddles.

use crate::grid::PaddedGrid;

/// Edge of a cell, or `None` before a path has taken its first step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
    Top,
    Bottom,
    None,
}

impl Side {
    /// The same edge seen from the neighbouring cell.
    pub fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
            Side::Top => Side::Bottom,
            Side::Bottom => Side::Top,
            Side::None => Side::None,
        }
    }

    /// (row, col) offset of the neighbour across this edge.
    pub fn step(self) -> (isize, isize) {
        match self {
            Side::Left => (0, -1),
            Side::Right => (0, 1),
            Side::Top => (1, 0),
            Side::Bottom => (-1, 0),
            Side::None => (0, 0),
        }
    }

    fn bit(self) -> u8 {
        match self {
            Side::Left => 1,
            Side::Right => 2,
            Side::Top => 4,
            Side::Bottom => 8,
            Side::None => 0,
        }
    }
}

const LEFT_ACTIVE: [bool; 16] = edge_set(&[1, 3, 5, 7, 8, 10, 12, 14]);
const BOTTOM_ACTIVE: [bool; 16] = edge_set(&[1, 2, 5, 6, 9, 10, 13, 14]);
const TOP_ACTIVE: [bool; 16] = edge_set(&[4, 5, 6, 7, 8, 9, 10, 11]);
const RIGHT_ACTIVE: [bool; 16] = edge_set(&[2, 3, 4, 5, 10, 11, 12, 13]);

const fn edge_set(cases: &[usize]) -> [bool; 16] {
    let mut set = [false; 16];
    let mut i = 0;
    while i < cases.len() {
        set[cases[i]] = true;
        i += 1;
    }
    set
}

/// Entry side of each non-saddle case.
const ENTRY: [Option<Side>; 16] = [
    None,
    Some(Side::Left),
    Some(Side::Bottom),
    Some(Side::Left),
    Some(Side::Right),
    None,
    Some(Side::Bottom),
    Some(Side::Left),
    Some(Side::Top),
    Some(Side::Top),
    None,
    Some(Side::Top),
    Some(Side::Right),
    Some(Side::Right),
    Some(Side::Bottom),
    None,
];

/// Exit side of each non-saddle case.
const EXIT: [Option<Side>; 16] = [
    None,
    Some(Side::Bottom),
    Some(Side::Right),
    Some(Side::Right),
    Some(Side::Top),
    None,
    Some(Side::Top),
    Some(Side::Top),
    Some(Side::Left),
    Some(Side::Bottom),
    None,
    Some(Side::Right),
    Some(Side::Left),
    Some(Side::Bottom),
    Some(Side::Left),
    None,
];

/// Saddle transitions: (case, entry, exit, exit when flipped).
///
/// A flipped saddle has its centre below the level, so the two below-level
/// corners connect through the middle of the cell.
const SADDLE: [(u8, Side, Side, Side); 4] = [
    (5, Side::Left, Side::Bottom, Side::Top),
    (5, Side::Right, Side::Top, Side::Bottom),
    (10, Side::Bottom, Side::Right, Side::Left),
    (10, Side::Top, Side::Left, Side::Right),
];

pub fn is_saddle(case_index: u8) -> bool {
    case_index == 5 || case_index == 10
}

/// The two sides a saddle can be entered through.
pub fn saddle_entries(case_index: u8) -> Option<[Side; 2]> {
    match case_index {
        5 => Some([Side::Left, Side::Right]),
        10 => Some([Side::Bottom, Side::Top]),
        _ => None,
    }
}

/// Whether `case_index` has a crossing on `side`.
pub fn is_active(case_index: u8, side: Side) -> bool {
    let i = usize::from(case_index & 0x0f);
    match side {
        Side::Left => LEFT_ACTIVE[i],
        Side::Right => RIGHT_ACTIVE[i],
        Side::Top => TOP_ACTIVE[i],
        Side::Bottom => BOTTOM_ACTIVE[i],
        Side::None => false,
    }
}

/// Side through which a path enters a cell.
///
/// `previous` is the exit side of the cell the path came from, or
/// [`Side::None`] at the start of a path. Non-saddle cases ignore it; a
/// saddle can only be entered from a neighbour, so `None` there (or an
/// entry the saddle cannot accept) yields `None`.
pub fn first_side(case_index: u8, previous: Side) -> Option<Side> {
    if !is_saddle(case_index) {
        return ENTRY.get(usize::from(case_index)).copied().flatten();
    }
    let entry = previous.opposite();
    SADDLE
        .iter()
        .find(|(case, from, _, _)| *case == case_index && *from == entry)
        .map(|_| entry)
}

/// Side through which a path leaves a cell.
///
/// For non-saddles a known `previous` must agree with the case's entry
/// side. For saddles `flip` picks between the two exits open to the entry.
pub fn next_side(case_index: u8, previous: Side, flip: bool) -> Option<Side> {
    if is_saddle(case_index) {
        let entry = previous.opposite();
        return SADDLE
            .iter()
            .find(|(case, from, _, _)| *case == case_index && *from == entry)
            .map(|&(_, _, exit, flipped)| if flip { flipped } else { exit });
    }

    let entry = ENTRY.get(usize::from(case_index)).copied().flatten()?;
    if previous != Side::None && previous.opposite() != entry {
        return None;
    }
    EXIT[usize::from(case_index)]
}

/// Per-level state of one 2x2 window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub case_index: u8,
    /// Saddle tie-break; only meaningful for cases 5 and 10.
    pub flip: bool,
    pub left: Option<f64>,
    pub right: Option<f64>,
    pub top: Option<f64>,
    pub bottom: Option<f64>,
    entered: u8,
}

impl Cell {
    /// Classify one window from its corner values.
    pub fn classify(ll: f64, lr: f64, ur: f64, ul: f64, level: f64) -> Self {
        let ll_bit = if ll > level { 0 } else { 1 };
        let lr_bit = if lr > level { 0 } else { 2 };
        let ur_bit = if ur > level { 0 } else { 4 };
        let ul_bit = if ul > level { 0 } else { 8 };
        let case_index: u8 = ll_bit | lr_bit | ur_bit | ul_bit;

        let flip = is_saddle(case_index) && (ll + lr + ur + ul) / 4.0 < level;

        let mut cell = Self {
            case_index,
            flip,
            left: None,
            right: None,
            top: None,
            bottom: None,
            entered: 0,
        };
        cell.interpolate(ll, lr, ur, ul, level);
        cell
    }

    /// Fill the crossing fraction of every edge the case makes active.
    pub fn interpolate(&mut self, ll: f64, lr: f64, ur: f64, ul: f64, level: f64) {
        let k = self.case_index;
        self.left = is_active(k, Side::Left).then(|| fraction(ll, ul, level));
        self.bottom = is_active(k, Side::Bottom).then(|| fraction(ll, lr, level));
        self.top = is_active(k, Side::Top).then(|| fraction(ul, ur, level));
        self.right = is_active(k, Side::Right).then(|| fraction(lr, ur, level));
    }

    pub fn is_saddle(&self) -> bool {
        is_saddle(self.case_index)
    }

    /// No crossing at all (case 0 or 15).
    pub fn is_empty(&self) -> bool {
        self.case_index == 0 || self.case_index == 15
    }

    /// Crossing fraction along `side`, if that edge is active.
    pub fn fraction(&self, side: Side) -> Option<f64> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
            Side::Top => self.top,
            Side::Bottom => self.bottom,
            Side::None => None,
        }
    }

    /// Crossing on `side` in cell-local coordinates, (0,0) at LL.
    pub fn crossing(&self, side: Side) -> Option<(f64, f64)> {
        let f = self.fraction(side)?;
        match side {
            Side::Left => Some((0.0, f)),
            Side::Right => Some((1.0, f)),
            Side::Bottom => Some((f, 0.0)),
            Side::Top => Some((f, 1.0)),
            Side::None => None,
        }
    }

    /// Record that a path entered through `side`.
    pub fn mark_entered(&mut self, side: Side) {
        if !self.is_empty() {
            self.entered |= side.bit();
        }
    }

    pub fn was_entered(&self, side: Side) -> bool {
        self.entered & side.bit() != 0
    }

    /// True once every pass through the cell has been traced.
    ///
    /// Non-saddles have one pass; saddles have two, one per entry side.
    pub fn visited(&self) -> bool {
        match self.case_index {
            0 | 15 => true,
            5 => self.was_entered(Side::Left) && self.was_entered(Side::Right),
            10 => self.was_entered(Side::Bottom) && self.was_entered(Side::Top),
            _ => self.entered != 0,
        }
    }
}

/// `(level - a) / (b - a)`, the position of `level` between `a` and `b`.
#[inline]
fn fraction(a: f64, b: f64, level: f64) -> f64 {
    (level - a) / (b - a)
}

/// Classified cells of a padded grid for one level.
#[derive(Debug, Clone)]
pub struct CellGrid {
    cells: Vec<Cell>,
    rows: usize,
    cols: usize,
}

impl CellGrid {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> &Cell {
        &self.cells[row * self.cols + col]
    }

    pub fn get_mut(&mut self, row: usize, col: usize) -> &mut Cell {
        &mut self.cells[row * self.cols + col]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }
}

/// Classify and interpolate every window of `grid` against `level`.
pub fn classify(grid: &PaddedGrid, level: f64) -> CellGrid {
    let rows = grid.rows() - 1;
    let cols = grid.cols() - 1;
    let mut cells = Vec::with_capacity(rows * cols);

    for r in 0..rows {
        for c in 0..cols {
            cells.push(Cell::classify(
                grid.get(r, c),
                grid.get(r, c + 1),
                grid.get(r + 1, c + 1),
                grid.get(r + 1, c),
                level,
            ));
        }
    }

    CellGrid { cells, rows, cols }
}
