//! Writes the board into a fresh routing matrix: outline interior, obstacle
//! drawings, the optional edge band and placed footprints.

use crate::matrix::{cell, CellOp, RoutingMatrix};
use pcbplace_board::{Drawing, Footprint, LayerSet, Outline, Point, Rect, Side};

/// Marks every cell inside the outline as [`cell::ZONE`] on both sides.
///
/// Each matrix row is filled between pairs of outline crossings (even-odd
/// rule, so cut-outs stay empty) on the bottom plane, which is then copied to
/// the top. Returns the number of cells filled per side.
pub fn fill_outline(matrix: &mut RoutingMatrix, outline: &Outline) -> usize {
    let step = matrix.cell_size();
    let origin = matrix.origin();
    let mut filled = 0;
    let mut crossings: Vec<i64> = Vec::new();
    for row in 0..matrix.rows() {
        let y = origin.y + row as i64 * step;
        crossings.clear();
        for ring in outline.rings() {
            ring_crossings(ring, y, &mut crossings);
        }
        crossings.sort_unstable();
        for pair in crossings.chunks_exact(2) {
            let Some(cols) = matrix.col_span(pair[0], pair[1], true) else {
                continue;
            };
            for col in cols {
                matrix.write_cell(row, col, Side::Bottom, cell::ZONE, CellOp::Set);
                filled += 1;
            }
        }
    }
    matrix.copy_bottom_to_top();
    filled
}

/// Appends the x coordinates where the horizontal line at `y` crosses `ring`.
///
/// An edge counts when exactly one endpoint lies at or above `y`, so a line
/// through a vertex crosses once.
fn ring_crossings(ring: &[Point], y: i64, out: &mut Vec<i64>) {
    if ring.len() < 3 {
        return;
    }
    for (i, a) in ring.iter().enumerate() {
        let b = ring[(i + 1) % ring.len()];
        if (a.y <= y) == (b.y <= y) {
            continue;
        }
        let t = i128::from(y - a.y) * i128::from(b.x - a.x) / i128::from(b.y - a.y);
        out.push(a.x + t as i64);
    }
}

/// Stamps obstacle drawings as [`cell::HOLE`]` | `[`cell::EDGE`], overwriting
/// whatever the cells held. Strokes grow by one cell.
pub fn stamp_obstacles(matrix: &mut RoutingMatrix, obstacles: &[Drawing]) {
    let value = cell::HOLE | cell::EDGE;
    for drawing in obstacles {
        let planes = matrix.planes(drawing.layers());
        let half = drawing.width().nm() / 2 + matrix.cell_size();
        match *drawing {
            Drawing::Segment { start, end, .. } => {
                matrix.draw_segment(start, end, half, planes, value, CellOp::Set);
            }
            Drawing::Arc {
                centre,
                start,
                sweep,
                ..
            } => {
                matrix.draw_arc(centre, start, sweep, half, planes, value, CellOp::Set);
            }
            Drawing::Circle { centre, radius, .. } => {
                matrix.draw_circle_outline(centre, radius.nm(), half, planes, value, CellOp::Set);
            }
        }
    }
}

/// Stamps a hard keep-out band of half-width `clearance` along every outline edge.
pub fn stamp_edge_clearance(matrix: &mut RoutingMatrix, outline: &Outline, clearance: i64) {
    if clearance <= 0 {
        return;
    }
    let planes = matrix.planes(LayerSet::ALL_CU);
    for ring in outline.rings() {
        if ring.len() < 2 {
            continue;
        }
        for (i, a) in ring.iter().enumerate() {
            let b = ring[(i + 1) % ring.len()];
            matrix.draw_segment(*a, b, clearance, planes, cell::HOLE | cell::EDGE, CellOp::Set);
        }
    }
}

/// Marks a footprint as occupied and spreads its keep-out cost.
///
/// The body box (grown by half a cell) and every pad (grown by half a cell
/// plus the pad clearance) get [`cell::COMPONENT`]. The keep-out gradient
/// covers the body box clamped to the matrix, grown by
/// `cell_size * pad_count / keepout_gain`.
pub fn stamp_footprint(matrix: &mut RoutingMatrix, fp: &Footprint, keepout_cost: u32, keepout_gain: i64) {
    let half = matrix.cell_size() / 2;
    let planes = matrix.planes(fp.side.copper());
    let Some(body) = clamp_rect(&fp.bounding_box().inflate(half), &matrix.board_box()) else {
        return;
    };
    matrix.draw_filled_rect(&body, planes, cell::COMPONENT, CellOp::Or);
    for pad in &fp.pads {
        matrix.stamp_pad(fp, pad, half + pad.clearance.nm(), cell::COMPONENT, CellOp::Or);
    }
    let margin = matrix.cell_size() * fp.pad_count() as i64 / keepout_gain.max(1);
    matrix.stamp_keepout(&body, margin, keepout_cost, planes);
}

fn clamp_rect(rect: &Rect, bounds: &Rect) -> Option<Rect> {
    let lo = Point::new(rect.x().max(bounds.x()), rect.y().max(bounds.y()));
    let hi = Point::new(rect.right().min(bounds.right()), rect.bottom().min(bounds.bottom()));
    if lo.x > hi.x || lo.y > hi.y {
        None
    } else {
        Some(Rect::from_corners(lo, hi))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::GridSize;
    use pcbplace_board::{Pad, PadShape};
    use pcbplace_common::Length;

    const MM: i64 = 1_000_000;

    fn matrix_for(outline: &Outline) -> RoutingMatrix {
        let bbox = Rect::bounding(outline.outer.iter().copied()).unwrap();
        RoutingMatrix::new(GridSize::compute(&bbox, MM), 2).unwrap()
    }

    fn rect_outline(w: i64, h: i64) -> Outline {
        Outline::rectangle(Rect::new(Point::ZERO, Point::new(w * MM, h * MM)))
    }

    #[test]
    fn rectangle_fill_covers_interior() {
        let outline = rect_outline(10, 8);
        let mut m = matrix_for(&outline);
        let filled = fill_outline(&mut m, &outline);
        // Rows 0..=7 cross both vertical edges; the closing row at y = 8 does not
        assert_eq!(filled, 8 * 11);
        assert_eq!(m.count_cells(Side::Top, cell::ZONE), filled);
        assert_eq!(m.count_cells(Side::Bottom, cell::ZONE), filled);
        assert_eq!(m.get_cell(0, 10, Side::Top), cell::ZONE);
        assert_eq!(m.get_cell(8, 5, Side::Top), cell::EMPTY);
    }

    #[test]
    fn cutout_stays_empty() {
        let mut outline = rect_outline(20, 20);
        outline.holes.push(vec![
            Point::new(5 * MM, 5 * MM),
            Point::new(15 * MM, 5 * MM),
            Point::new(15 * MM, 15 * MM),
            Point::new(5 * MM, 15 * MM),
        ]);
        let mut m = matrix_for(&outline);
        fill_outline(&mut m, &outline);
        assert_eq!(m.get_cell(10, 10, Side::Top) & cell::ZONE, 0);
        assert_eq!(m.get_cell(10, 2, Side::Top), cell::ZONE);
        assert_eq!(m.get_cell(2, 10, Side::Bottom), cell::ZONE);
    }

    #[test]
    fn concave_outline() {
        // L shape: the upper right quadrant is missing
        let outline = Outline {
            outer: vec![
                Point::ZERO,
                Point::new(5 * MM, 0),
                Point::new(5 * MM, 5 * MM),
                Point::new(10 * MM, 5 * MM),
                Point::new(10 * MM, 10 * MM),
                Point::new(0, 10 * MM),
            ],
            holes: Vec::new(),
        };
        let mut m = matrix_for(&outline);
        fill_outline(&mut m, &outline);
        assert_eq!(m.get_cell(2, 8, Side::Top), cell::EMPTY);
        assert_eq!(m.get_cell(2, 3, Side::Top), cell::ZONE);
        assert_eq!(m.get_cell(7, 8, Side::Top), cell::ZONE);
    }

    #[test]
    fn sliver_board_fills_nothing() {
        let outline = Outline::rectangle(Rect::from_corners(
            Point::new(0, 200_000),
            Point::new(10 * MM, 700_000),
        ));
        let mut m = matrix_for(&outline);
        assert_eq!(fill_outline(&mut m, &outline), 0);
    }

    #[test]
    fn obstacles_overwrite_zone() {
        let outline = rect_outline(20, 20);
        let mut m = matrix_for(&outline);
        fill_outline(&mut m, &outline);
        let obstacles = [
            Drawing::Segment {
                start: Point::new(2 * MM, 10 * MM),
                end: Point::new(8 * MM, 10 * MM),
                width: Length::from_mm(0.2),
                layers: LayerSet::FRONT_CU,
            },
            Drawing::Circle {
                centre: Point::new(15 * MM, 15 * MM),
                radius: Length::from_mm(3.0),
                width: Length::from_mm(0.2),
                layers: LayerSet::ALL_CU,
            },
        ];
        stamp_obstacles(&mut m, &obstacles);
        assert_eq!(m.get_cell(10, 5, Side::Top), cell::HOLE | cell::EDGE);
        // Grown by a cell on each side
        assert_eq!(m.get_cell(11, 5, Side::Top), cell::HOLE | cell::EDGE);
        assert_eq!(m.get_cell(10, 5, Side::Bottom), cell::ZONE);
        assert_eq!(m.get_cell(15, 18, Side::Bottom), cell::HOLE | cell::EDGE);
        assert_eq!(m.get_cell(15, 15, Side::Bottom), cell::ZONE);
    }

    #[test]
    fn edge_band_follows_outline() {
        let outline = rect_outline(20, 20);
        let mut m = matrix_for(&outline);
        fill_outline(&mut m, &outline);
        stamp_edge_clearance(&mut m, &outline, 2 * MM);
        assert_eq!(m.get_cell(10, 1, Side::Top), cell::HOLE | cell::EDGE);
        assert_eq!(m.get_cell(1, 10, Side::Bottom), cell::HOLE | cell::EDGE);
        assert_eq!(m.get_cell(10, 10, Side::Top), cell::ZONE);

        let mut untouched = matrix_for(&outline);
        fill_outline(&mut untouched, &outline);
        stamp_edge_clearance(&mut untouched, &outline, 0);
        assert_eq!(untouched.count_cells(Side::Top, cell::EDGE), 0);
    }

    #[test]
    fn footprint_marks_component_and_keepout() {
        let outline = rect_outline(30, 30);
        let mut m = matrix_for(&outline);
        fill_outline(&mut m, &outline);
        let fp = Footprint::new("U1", Point::new(15 * MM, 15 * MM))
            .with_body(Rect::new(Point::new(-2 * MM, -2 * MM), Point::new(4 * MM, 4 * MM)))
            .with_pad(Pad::new("1", Point::new(-MM, 0), Point::new(MM, MM)).with_shape(PadShape::Circle))
            .with_pad(Pad::new("2", Point::new(MM, 0), Point::new(MM, MM)).with_layers(LayerSet::ALL_CU));
        stamp_footprint(&mut m, &fp, 500, 1);

        assert_eq!(m.get_cell(15, 15, Side::Top), cell::ZONE | cell::COMPONENT);
        assert_eq!(m.get_cell(15, 12, Side::Top), cell::ZONE);
        // Through pad reaches the bottom
        assert_ne!(m.get_cell(15, 16, Side::Bottom) & cell::COMPONENT, 0);
        assert_eq!(m.get_cell(15, 14, Side::Bottom) & cell::COMPONENT, 0);
        // Keep-out: full cost in the middle, none on the bottom
        assert_eq!(m.get_dist(15, 15, Side::Top), 500);
        assert_eq!(m.get_dist(15, 15, Side::Bottom), 0);
        assert!(m.get_dist(15, 12, Side::Top) > 0);
        assert_eq!(m.get_dist(15, 11, Side::Top), 0);
    }

    #[test]
    fn footprint_off_matrix_is_ignored() {
        let outline = rect_outline(10, 10);
        let mut m = matrix_for(&outline);
        let fp = Footprint::new("J9", Point::new(100 * MM, 100 * MM))
            .with_pad(Pad::new("1", Point::ZERO, Point::new(MM, MM)));
        stamp_footprint(&mut m, &fp, 500, 16);
        assert_eq!(m.count_cells(Side::Top, cell::COMPONENT), 0);
    }

    #[test]
    fn clamp_to_bounds() {
        let bounds = Rect::new(Point::ZERO, Point::new(10, 10));
        let r = Rect::new(Point::new(-5, 5), Point::new(10, 10));
        assert_eq!(
            clamp_rect(&r, &bounds),
            Some(Rect::from_corners(Point::new(0, 5), Point::new(5, 10)))
        );
        assert_eq!(clamp_rect(&r.moved(Point::new(100, 0)), &bounds), None);
    }
}
