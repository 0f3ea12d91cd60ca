//! The routing matrix: a per-side occupancy grid with a parallel cost field.
//!
//! Cell `(row, col)` sits at board coordinate `origin + (col, row) * cell_size`.
//! Each modelled side owns one occupancy byte and one cost accumulator per
//! cell. Accessors index directly and do not clamp; callers keep `row` and
//! `col` inside `[0, rows)` and `[0, cols)`.

use crate::error::AutoplaceError;
use pcbplace_board::{LayerSet, Point, Rect, Side};
use std::ops::RangeInclusive;

/// Occupancy flag bits.
pub mod cell {
    /// Nothing recorded.
    pub const EMPTY: u8 = 0x00;
    /// Hole or drawn obstacle.
    pub const HOLE: u8 = 0x01;
    /// Covered by a footprint body or pad.
    pub const COMPONENT: u8 = 0x02;
    /// Board edge or keep-out band.
    pub const EDGE: u8 = 0x20;
    /// Inside the board outline.
    pub const ZONE: u8 = 0x80;
}

/// How a stamped value combines with the cell's current byte.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CellOp {
    /// Overwrite.
    Set,
    /// Bitwise or.
    Or,
    /// Bitwise exclusive or.
    Xor,
    /// Bitwise and.
    And,
    /// Wrapping addition.
    Add,
}

impl CellOp {
    /// Combines `old` with `value`.
    pub fn apply(self, old: u8, value: u8) -> u8 {
        match self {
            CellOp::Set => value,
            CellOp::Or => old | value,
            CellOp::Xor => old ^ value,
            CellOp::And => old & value,
            CellOp::Add => old.wrapping_add(value),
        }
    }
}

/// Grid placement and dimensions derived from a board bounding box.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct GridSize {
    /// Snapped box the matrix covers; its origin is cell `(0, 0)`.
    pub board_box: Rect,
    /// Cell edge length in nanometres.
    pub cell_size: i64,
    /// Row count.
    pub rows: usize,
    /// Column count.
    pub cols: usize,
}

impl GridSize {
    /// Snaps `bbox` outward onto the grid and derives the cell counts.
    ///
    /// The origin is floored to a multiple of `cell_size`; the far corner is
    /// floored and then pushed one cell further out, and one spare row and
    /// column are added. A non-positive `cell_size` yields a zero-size grid.
    pub fn compute(bbox: &Rect, cell_size: i64) -> GridSize {
        if cell_size <= 0 {
            return GridSize {
                board_box: *bbox,
                cell_size: 0,
                rows: 0,
                cols: 0,
            };
        }
        let snap = |v: i64| v - v.rem_euclid(cell_size);
        let origin = Point::new(snap(bbox.x()), snap(bbox.y()));
        let end = Point::new(
            snap(bbox.right()) + cell_size,
            snap(bbox.bottom()) + cell_size,
        );
        let board_box = Rect::from_corners(origin, end);
        GridSize {
            board_box,
            cell_size,
            rows: (board_box.height() / cell_size) as usize + 1,
            cols: (board_box.width() / cell_size) as usize + 1,
        }
    }
}

/// Bit set of matrix planes touched by a stamp.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct PlaneMask(u8);

impl PlaneMask {
    /// Returns `true` if no plane is selected.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    fn contains(self, plane: usize) -> bool {
        self.0 & (1 << plane) != 0
    }
}

/// Occupancy grid and keep-out cost field for one autoplace run.
#[derive(Debug)]
pub struct RoutingMatrix {
    board_box: Rect,
    cell_size: i64,
    rows: usize,
    cols: usize,
    sides: usize,
    cells: Vec<u8>,
    dist: Vec<u32>,
}

impl RoutingMatrix {
    /// Allocates zero-filled occupancy and cost planes for one or two sides.
    pub fn new(size: GridSize, sides: u8) -> Result<Self, AutoplaceError> {
        if size.rows == 0 || size.cols == 0 || size.cell_size <= 0 {
            return Err(AutoplaceError::MatrixAllocation {
                rows: size.rows,
                cols: size.cols,
            });
        }
        let sides = usize::from(sides.clamp(1, 2));
        let len = size.rows * size.cols * sides;
        tracing::debug!(
            rows = size.rows,
            cols = size.cols,
            sides,
            cell_nm = size.cell_size,
            "routing matrix allocated"
        );
        Ok(Self {
            board_box: size.board_box,
            cell_size: size.cell_size,
            rows: size.rows,
            cols: size.cols,
            sides,
            cells: vec![cell::EMPTY; len],
            dist: vec![0; len],
        })
    }

    /// Frees both planes and zeroes the dimensions. Safe to call repeatedly.
    pub fn release(&mut self) {
        self.cells = Vec::new();
        self.dist = Vec::new();
        self.rows = 0;
        self.cols = 0;
    }

    /// Returns `true` until [`release`](Self::release) is called.
    pub fn is_allocated(&self) -> bool {
        !self.cells.is_empty()
    }

    /// Row count.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Column count.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of modelled sides.
    pub fn sides(&self) -> usize {
        self.sides
    }

    /// Cell edge length in nanometres.
    pub fn cell_size(&self) -> i64 {
        self.cell_size
    }

    /// Snapped box covered by the matrix.
    pub fn board_box(&self) -> Rect {
        self.board_box
    }

    /// Board coordinate of cell `(0, 0)`.
    pub fn origin(&self) -> Point {
        self.board_box.origin
    }

    /// Board coordinate of a cell.
    pub fn cell_point(&self, row: usize, col: usize) -> Point {
        self.origin() + Point::new(col as i64 * self.cell_size, row as i64 * self.cell_size)
    }

    /// Plane holding `side`. A single-sided matrix maps both sides onto plane 0.
    pub fn plane(&self, side: Side) -> usize {
        match (self.sides, side) {
            (1, _) | (_, Side::Bottom) => 0,
            (_, Side::Top) => 1,
        }
    }

    /// Planes touched by copper on `layers`.
    pub fn planes(&self, layers: LayerSet) -> PlaneMask {
        let mut mask = 0u8;
        for side in Side::ALL {
            if layers.has_side(side) {
                mask |= 1 << self.plane(side);
            }
        }
        PlaneMask(mask)
    }

    /// Plane indices present in `mask`.
    pub(crate) fn planes_in(&self, mask: PlaneMask) -> impl Iterator<Item = usize> {
        (0..self.sides).filter(move |p| mask.contains(*p))
    }

    fn index(&self, row: usize, col: usize, plane: usize) -> usize {
        debug_assert!(row < self.rows && col < self.cols && plane < self.sides);
        (plane * self.rows + row) * self.cols + col
    }

    /// Occupancy byte of a cell.
    pub fn get_cell(&self, row: usize, col: usize, side: Side) -> u8 {
        self.cells[self.index(row, col, self.plane(side))]
    }

    /// Combines `value` into a cell's occupancy byte.
    pub fn write_cell(&mut self, row: usize, col: usize, side: Side, value: u8, op: CellOp) {
        let plane = self.plane(side);
        self.write_plane(row, col, plane, value, op);
    }

    pub(crate) fn write_plane(&mut self, row: usize, col: usize, plane: usize, value: u8, op: CellOp) {
        let i = self.index(row, col, plane);
        self.cells[i] = op.apply(self.cells[i], value);
    }

    /// Accumulated keep-out cost of a cell.
    pub fn get_dist(&self, row: usize, col: usize, side: Side) -> u32 {
        self.dist[self.index(row, col, self.plane(side))]
    }

    /// Overwrites the keep-out cost of a cell.
    pub fn set_dist(&mut self, row: usize, col: usize, side: Side, value: u32) {
        let i = self.index(row, col, self.plane(side));
        self.dist[i] = value;
    }

    pub(crate) fn add_dist_plane(&mut self, row: usize, col: usize, plane: usize, value: u32) {
        let i = self.index(row, col, plane);
        self.dist[i] = self.dist[i].saturating_add(value);
    }

    /// Copies plane 0 occupancy onto every other plane.
    pub fn copy_bottom_to_top(&mut self) {
        let n = self.rows * self.cols;
        if self.sides > 1 {
            let (bottom, rest) = self.cells.split_at_mut(n);
            rest[..n].copy_from_slice(bottom);
        }
    }

    /// Number of cells on `side` with every bit of `flags` set.
    pub fn count_cells(&self, side: Side, flags: u8) -> usize {
        let n = self.rows * self.cols;
        let start = self.plane(side) * n;
        self.cells[start..start + n]
            .iter()
            .filter(|c| *c & flags == flags)
            .count()
    }

    /// Rows whose coordinate lies in `[lo, hi]` (board nm), clamped to the grid.
    ///
    /// With `ceil_start`, the first row is the first one at or after `lo`;
    /// otherwise `lo` is floored, which may include the row just before it.
    pub(crate) fn row_span(&self, lo: i64, hi: i64, ceil_start: bool) -> Option<RangeInclusive<usize>> {
        let o = self.origin().y;
        span(lo - o, hi - o, self.cell_size, self.rows, ceil_start)
    }

    /// Column counterpart of [`row_span`](Self::row_span).
    pub(crate) fn col_span(&self, lo: i64, hi: i64, ceil_start: bool) -> Option<RangeInclusive<usize>> {
        let o = self.origin().x;
        span(lo - o, hi - o, self.cell_size, self.cols, ceil_start)
    }
}

/// Inclusive index range for matrix-relative coordinates `[lo, hi]`.
fn span(lo: i64, hi: i64, step: i64, count: usize, ceil_start: bool) -> Option<RangeInclusive<usize>> {
    let first = if ceil_start {
        ceil_div(lo, step)
    } else {
        lo.div_euclid(step)
    };
    let last = hi.div_euclid(step);
    let first = first.max(0);
    let last = last.min(count as i64 - 1);
    if first > last {
        None
    } else {
        Some(first as usize..=last as usize)
    }
}

pub(crate) fn ceil_div(v: i64, step: i64) -> i64 {
    -(-v).div_euclid(step)
}
