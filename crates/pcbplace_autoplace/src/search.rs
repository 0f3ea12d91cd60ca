//! Exhaustive grid search for the best position of one footprint.
//!
//! Candidate anchors are grid multiples such that the footprint's bounding
//! box stays within the routing matrix. Rows are the outer loop and columns
//! the inner one; a candidate replaces the best only with a strictly lower
//! score, so ties resolve to the lowest row, then the lowest column.

use crate::free_area::{FootprintArea, FreeArea};
use crate::matrix::{self, cell, RoutingMatrix};
use pcbplace_board::{Board, Connectivity, Footprint, FootprintId, Point, Rect, Side};

/// Why a candidate position was refused.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Rejection {
    /// A covered cell lies outside the board outline.
    OutOfBoard,
    /// A covered cell already belongs to a footprint.
    Occupied,
    /// The exact footprint area overlaps used or off-board area.
    NotFree,
}

/// Read-only state shared by every search of a run.
#[derive(Clone, Copy)]
pub struct SearchContext<'a> {
    /// Occupancy and keep-out cost.
    pub matrix: &'a RoutingMatrix,
    /// Exact free area, consulted only when `polygon_check` is set.
    pub free_area: &'a FreeArea,
    /// Keep-out margin divisor.
    pub keepout_gain: i64,
    /// Run the free-area polygon test after the grid test.
    pub polygon_check: bool,
}

/// Outcome of a successful search.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SearchResult {
    /// Best anchor position.
    pub position: Point,
    /// `ratsnest cost + keep-out cost` at that position.
    pub score: f64,
    /// Candidates that passed every test.
    pub accepted: usize,
    /// Candidates refused.
    pub rejected: usize,
}

impl SearchContext<'_> {
    /// Keep-out margin for a footprint with `pads` pads.
    pub fn keepout_margin(&self, pads: usize) -> i64 {
        self.matrix.cell_size() * pads as i64 / self.keepout_gain.max(1)
    }

    /// Scans every candidate position for footprint `id` at its current
    /// orientation. Returns `None` if no position is accepted.
    pub fn search(
        &self,
        board: &Board,
        id: FootprintId,
        connectivity: &dyn Connectivity,
    ) -> Option<SearchResult> {
        let fp = board.footprint(id);
        let step = self.matrix.cell_size();
        let brd = self.matrix.board_box();
        let local = fp.local_bounding_box();

        let first = Point::new(
            matrix::ceil_div(brd.x() - local.x(), step) * step,
            matrix::ceil_div(brd.y() - local.y(), step) * step,
        );
        let limit = Point::new(brd.right() - local.right(), brd.bottom() - local.bottom());
        let test_other_side = self.matrix.sides() > 1 && fp.reaches_other_side();

        let mut best: Option<(Point, f64)> = None;
        let mut accepted = 0;
        let mut rejected = 0;
        let mut y = first.y;
        while y <= limit.y {
            let mut x = first.x;
            while x <= limit.x {
                let pos = Point::new(x, y);
                match self.evaluate(fp, id, pos, &local, test_other_side, connectivity) {
                    Ok(score) => {
                        accepted += 1;
                        if best.map_or(true, |(_, s)| score < s) {
                            best = Some((pos, score));
                        }
                    }
                    Err(_) => rejected += 1,
                }
                x += step;
            }
            y += step;
        }

        tracing::trace!(
            reference = %fp.reference,
            orientation = fp.orientation.as_degrees(),
            accepted,
            rejected,
            "position search done"
        );
        best.map(|(position, score)| SearchResult {
            position,
            score,
            accepted,
            rejected,
        })
    }

    /// Scores one candidate anchor position.
    pub fn evaluate(
        &self,
        fp: &Footprint,
        id: FootprintId,
        pos: Point,
        local: &Rect,
        test_other_side: bool,
        connectivity: &dyn Connectivity,
    ) -> Result<f64, Rejection> {
        let bbox = local.moved(pos);
        self.test_rectangle(&bbox, fp.side)?;
        if test_other_side {
            self.test_rectangle(&bbox, fp.side.opposite())?;
        }
        if self.polygon_check {
            self.test_polygon(fp, pos, test_other_side)?;
        }
        let keepout = self.keepout_cost(&bbox.inflate(self.keepout_margin(fp.pad_count())), fp.side);
        let ratsnest = self.ratsnest_cost(fp, id, pos, connectivity);
        Ok(ratsnest + keepout as f64)
    }

    /// Checks every cell under `rect` (grown by half a cell) on `side`.
    pub fn test_rectangle(&self, rect: &Rect, side: Side) -> Result<(), Rejection> {
        let m = self.matrix;
        let r = rect.inflate(m.cell_size() / 2);
        let (Some(rows), Some(cols)) = (
            m.row_span(r.y(), r.bottom(), true),
            m.col_span(r.x(), r.right(), true),
        ) else {
            return Err(Rejection::OutOfBoard);
        };
        for row in rows {
            for col in cols.clone() {
                let data = m.get_cell(row, col, side);
                if data & cell::ZONE == 0 {
                    return Err(Rejection::OutOfBoard);
                }
                if data & cell::COMPONENT != 0 {
                    return Err(Rejection::Occupied);
                }
            }
        }
        Ok(())
    }

    fn test_polygon(&self, fp: &Footprint, pos: Point, test_other_side: bool) -> Result<(), Rejection> {
        let mut probe = fp.clone();
        probe.position = pos;
        let area = FootprintArea::build(&probe, self.matrix.cell_size(), 0);
        let sides: &[Side] = if test_other_side {
            &[fp.side, fp.side.opposite()]
        } else {
            &[fp.side]
        };
        for side in sides {
            if !self.free_area.test_fully_free(area.side(*side), *side) {
                return Err(Rejection::NotFree);
            }
        }
        Ok(())
    }

    /// Sum of keep-out cost over the cells under `rect` on `side`.
    pub fn keepout_cost(&self, rect: &Rect, side: Side) -> u64 {
        let m = self.matrix;
        let (Some(rows), Some(cols)) = (
            m.row_span(rect.y(), rect.bottom(), false),
            m.col_span(rect.x(), rect.right(), false),
        ) else {
            return 0;
        };
        let mut cost = 0u64;
        for row in rows {
            for col in cols.clone() {
                cost += u64::from(m.get_dist(row, col, side));
            }
        }
        cost
    }

    /// Sum over pads of the weighted distance to the nearest anchored pad on
    /// the same net, with the footprint anchored at `pos`.
    pub fn ratsnest_cost(
        &self,
        fp: &Footprint,
        id: FootprintId,
        pos: Point,
        connectivity: &dyn Connectivity,
    ) -> f64 {
        let bounds = self.matrix.board_box();
        let mut cost = 0.0;
        for pad in &fp.pads {
            let Some(net) = pad.net else { continue };
            let at = pos + fp.orientation.rotate(pad.offset);
            let Some(nearest) = connectivity.nearest_pad(net, at, id, &bounds) else {
                continue;
            };
            cost += connection_cost(at, nearest.position);
        }
        cost
    }
}

/// Length of a ratsnest line with its minor axis counted twice.
pub fn connection_cost(a: Point, b: Point) -> f64 {
    let dx = (a.x - b.x).abs();
    let dy = (a.y - b.y).abs();
    let (major, minor) = if dx < dy { (dy, dx) } else { (dx, dy) };
    (major as f64).hypot(minor as f64 * 2.0)
}
