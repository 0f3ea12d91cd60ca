//! Rasterizers that stamp shapes onto the routing matrix.
//!
//! Every stamp takes the planes to touch, the value to write and the
//! [`CellOp`] that combines it with the existing byte. A cell is hit when its
//! grid point lies inside the shape; only rows and columns whose coordinates
//! can meet the shape's bounding box are visited.

use crate::matrix::{CellOp, PlaneMask, RoutingMatrix};
use pcbplace_board::{Angle, Footprint, Pad, PadShape, Point, Rect};

/// Fewest chords used to approximate an arc or circle.
const MIN_CHORDS: i64 = 5;
/// Most chords used to approximate an arc or circle.
const MAX_CHORDS: i64 = 100;

impl RoutingMatrix {
    /// Stamps a thick segment with round caps.
    pub fn draw_segment(
        &mut self,
        p0: Point,
        p1: Point,
        half_width: i64,
        planes: PlaneMask,
        value: u8,
        op: CellOp,
    ) {
        if planes.is_empty() {
            return;
        }
        let (a, b) = if p1.x < p0.x { (p1, p0) } else { (p0, p1) };
        let lg = half_width.max(0);
        let half_cell = self.cell_size() / 2;
        let Some(cols) = self.col_span(a.x - lg, b.x + lg + half_cell, false) else {
            return;
        };
        let Some(rows) = self.row_span(a.y.min(b.y) - lg, a.y.max(b.y) + lg + half_cell, false)
        else {
            return;
        };

        let dx = (b.x - a.x) as f64;
        let dy = (b.y - a.y) as f64;
        let len = dx.hypot(dy);
        let (sin, cos) = if len > 0.0 {
            (dy / len, dx / len)
        } else {
            (0.0, 1.0)
        };
        let lg = lg as f64;

        for col in cols {
            for row in rows.clone() {
                let p = self.cell_point(row, col) - a;
                let (px, py) = (p.x as f64, p.y as f64);
                // Segment frame: x runs along the segment from `a`
                let along = px * cos + py * sin;
                let perp = -px * sin + py * cos;
                if perp.abs() > lg {
                    continue;
                }
                let hit = if (0.0..=len).contains(&along) {
                    true
                } else if along < 0.0 {
                    along >= -lg && along * along + perp * perp <= lg * lg
                } else {
                    let over = along - len;
                    over <= lg && over * over + perp * perp <= lg * lg
                };
                if hit {
                    self.stamp_planes(row, col, planes, value, op);
                }
            }
        }
    }

    /// Stamps a filled disc.
    ///
    /// If no grid point falls inside a small disc, the cells around its centre
    /// are stamped using a half-cell diagonal radius instead.
    pub fn draw_filled_circle(
        &mut self,
        centre: Point,
        radius: i64,
        planes: PlaneMask,
        value: u8,
        op: CellOp,
    ) {
        if planes.is_empty() {
            return;
        }
        let Some(rows) = self.row_span(centre.y - radius, centre.y + radius, false) else {
            return;
        };
        let Some(cols) = self.col_span(centre.x - radius, centre.x + radius, false) else {
            return;
        };

        let r = radius as f64;
        if self.stamp_disc(centre, r * r, &rows, &cols, planes, value, op) {
            return;
        }
        // Half a cell diagonal reaches the grid points around any centre
        let half = self.cell_size() / 2 + 1;
        let reach = 2 * half;
        let (Some(rows), Some(cols)) = (
            self.row_span(centre.y - reach, centre.y + reach, false),
            self.col_span(centre.x - reach, centre.x + reach, false),
        ) else {
            return;
        };
        let fallback = half as f64;
        self.stamp_disc(centre, 2.0 * fallback * fallback, &rows, &cols, planes, value, op);
    }

    #[allow(clippy::too_many_arguments)]
    fn stamp_disc(
        &mut self,
        centre: Point,
        r2: f64,
        rows: &std::ops::RangeInclusive<usize>,
        cols: &std::ops::RangeInclusive<usize>,
        planes: PlaneMask,
        value: u8,
        op: CellOp,
    ) -> bool {
        let mut written = false;
        for row in rows.clone() {
            for col in cols.clone() {
                let p = self.cell_point(row, col);
                let dx = (p.x - centre.x) as f64;
                let dy = (p.y - centre.y) as f64;
                if dx * dx + dy * dy < r2 {
                    self.stamp_planes(row, col, planes, value, op);
                    written = true;
                }
            }
        }
        written
    }

    /// Stamps an axis-aligned filled rectangle, borders included.
    pub fn draw_filled_rect(&mut self, rect: &Rect, planes: PlaneMask, value: u8, op: CellOp) {
        if planes.is_empty() {
            return;
        }
        let Some(rows) = self.row_span(rect.y(), rect.bottom(), true) else {
            return;
        };
        let Some(cols) = self.col_span(rect.x(), rect.right(), true) else {
            return;
        };
        for row in rows {
            for col in cols.clone() {
                self.stamp_planes(row, col, planes, value, op);
            }
        }
    }

    /// Stamps `rect` rotated by `angle` about its centre.
    ///
    /// Each candidate grid point is rotated back into the rectangle's frame
    /// and kept if it lies strictly inside.
    pub fn draw_rotated_rect(
        &mut self,
        rect: &Rect,
        angle: Angle,
        planes: PlaneMask,
        value: u8,
        op: CellOp,
    ) {
        if planes.is_empty() {
            return;
        }
        let centre = rect.centre();
        let Some(outer) = Rect::bounding(rect.corners().map(|c| angle.rotate_about(c, centre)))
        else {
            return;
        };
        let Some(rows) = self.row_span(outer.y(), outer.bottom(), true) else {
            return;
        };
        let Some(cols) = self.col_span(outer.x(), outer.right(), true) else {
            return;
        };
        let back = Angle::ZERO - angle;
        for row in rows {
            for col in cols.clone() {
                let p = back.rotate_about(self.cell_point(row, col), centre);
                if p.x > rect.x() && p.x < rect.right() && p.y > rect.y() && p.y < rect.bottom() {
                    self.stamp_planes(row, col, planes, value, op);
                }
            }
        }
    }

    /// Stamps a thick arc as a chain of chords.
    ///
    /// `sweep` is in degrees, positive in the direction of increasing
    /// `atan2(dy, dx)` in board coordinates.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_arc(
        &mut self,
        centre: Point,
        start: Point,
        sweep: f64,
        half_width: i64,
        planes: PlaneMask,
        value: u8,
        op: CellOp,
    ) {
        let radius = centre.distance(start);
        let lg = half_width.max(1);
        let chords = ((2.0 * radius) as i64 / lg) as f64 * sweep.abs() / 360.0;
        let chords = (chords as i64).clamp(MIN_CHORDS, MAX_CHORDS);
        let d = start - centre;
        let start_angle = (d.y as f64).atan2(d.x as f64);

        let mut prev = start;
        for i in 1..=chords {
            let a = start_angle + (sweep * i as f64 / chords as f64).to_radians();
            let next = Point::new(
                centre.x + (radius * a.cos()).round() as i64,
                centre.y + (radius * a.sin()).round() as i64,
            );
            self.draw_segment(prev, next, half_width, planes, value, op);
            prev = next;
        }
    }

    /// Stamps a thick circle outline as a closed chain of chords.
    pub fn draw_circle_outline(
        &mut self,
        centre: Point,
        radius: i64,
        half_width: i64,
        planes: PlaneMask,
        value: u8,
        op: CellOp,
    ) {
        let lg = half_width.max(1);
        let chords = (2 * radius / lg).clamp(MIN_CHORDS, MAX_CHORDS);
        let r = radius as f64;
        let first = centre + Point::new(radius, 0);
        let mut prev = first;
        for i in 1..chords {
            let a = std::f64::consts::TAU * i as f64 / chords as f64;
            let next = centre + Point::new((r * a.cos()).round() as i64, (r * a.sin()).round() as i64);
            self.draw_segment(prev, next, half_width, planes, value, op);
            prev = next;
        }
        self.draw_segment(prev, first, half_width, planes, value, op);
    }

    /// Stamps a pad's copper grown by `margin` on every side.
    ///
    /// Round pads become discs. Other shapes use their (trapezoid-widened)
    /// extent as a rectangle, swapped for quarter turns and rotated otherwise.
    pub fn stamp_pad(
        &mut self,
        footprint: &Footprint,
        pad: &Pad,
        margin: i64,
        value: u8,
        op: CellOp,
    ) {
        let planes = self.planes(pad.layers);
        let centre = footprint.pad_position(pad);
        let half = pad.half_extent();
        if pad.shape == PadShape::Circle {
            self.draw_filled_circle(centre, half.x + margin, planes, value, op);
            return;
        }
        let (mut dx, mut dy) = (half.x + margin, half.y + margin);
        let orientation = footprint.pad_orientation(pad);
        match orientation.quarter_turns() {
            Some(q) => {
                if q % 2 == 1 {
                    std::mem::swap(&mut dx, &mut dy);
                }
                let rect = Rect::from_corners(
                    Point::new(centre.x - dx, centre.y - dy),
                    Point::new(centre.x + dx, centre.y + dy),
                );
                self.draw_filled_rect(&rect, planes, value, op);
            }
            None => {
                let rect = Rect::from_corners(
                    Point::new(centre.x - dx, centre.y - dy),
                    Point::new(centre.x + dx, centre.y + dy),
                );
                self.draw_rotated_rect(&rect, orientation, planes, value, op);
            }
        }
    }

    /// Adds a keep-out cost gradient around `rect` into the cost field.
    ///
    /// Over `rect` grown by `margin`, the cost ramps from zero at the outer
    /// border to `peak` one margin further in, separately along rows and
    /// columns. The two ramps are multiplied in 0..=256 fixed point and the
    /// result is added to whatever cost the cell already holds.
    pub fn stamp_keepout(&mut self, rect: &Rect, margin: i64, peak: u32, planes: PlaneMask) {
        if planes.is_empty() {
            return;
        }
        let outer = rect.inflate(margin);
        let step = self.cell_size();
        let o = self.origin();
        let ramp = (margin / step).max(1);

        // Ramps run over the unclamped extent
        let row_lo = crate::matrix::ceil_div(outer.y() - o.y, step);
        let row_hi = (outer.bottom() - o.y).div_euclid(step);
        let col_lo = crate::matrix::ceil_div(outer.x() - o.x, step);
        let col_hi = (outer.right() - o.x).div_euclid(step);

        let Some(rows) = self.row_span(outer.y(), outer.bottom(), true) else {
            return;
        };
        let Some(cols) = self.col_span(outer.x(), outer.right(), true) else {
            return;
        };
        let gain = |i: i64, lo: i64, hi: i64| -> i64 {
            if i - lo < ramp {
                256 * (i - lo) / ramp
            } else if i > hi - ramp {
                256 * (hi - i) / ramp
            } else {
                256
            }
        };
        for row in rows {
            let lgain = gain(row as i64, row_lo, row_hi);
            for col in cols.clone() {
                let cgain = gain(col as i64, col_lo, col_hi) * lgain / 256;
                let cost = if cgain == 256 {
                    peak
                } else {
                    (i64::from(peak) * cgain / 256) as u32
                };
                for plane in self.planes_in(planes) {
                    self.add_dist_plane(row, col, plane, cost);
                }
            }
        }
    }

    fn stamp_planes(&mut self, row: usize, col: usize, planes: PlaneMask, value: u8, op: CellOp) {
        for plane in self.planes_in(planes) {
            self.write_plane(row, col, plane, value, op);
        }
    }
}
