//! Orientation trials: base orientation first, then the rotations a
//! footprint allows, each scored with a multiplicative penalty.

use crate::error::AutoplaceError;
use crate::search::SearchContext;
use pcbplace_board::{Angle, Board, Connectivity, FootprintId, Point, MAX_ROTATION_COST};

/// Score multiplier indexed by rotation cost; 2.0 at cost 0 down to 1.0 at cost 10.
pub const ORIENTATION_PENALTY: [f64; 11] = [2.0, 1.9, 1.8, 1.7, 1.6, 1.5, 1.4, 1.3, 1.2, 1.1, 1.0];

/// Penalty for a rotation cost, clamped to the table.
pub fn penalty(cost: u8) -> f64 {
    ORIENTATION_PENALTY[usize::from(cost.min(MAX_ROTATION_COST))]
}

/// Winning position and orientation of a footprint.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Trial {
    /// Anchor position.
    pub position: Point,
    /// Absolute orientation.
    pub orientation: Angle,
    /// Penalized score.
    pub score: f64,
}

/// Runs the position search for every orientation footprint `id` allows.
///
/// Rotated trials run only when the matching cost is nonzero and replace the
/// running best only with a strictly lower penalized score. On return the
/// footprint carries the winning orientation; its position is untouched.
///
/// A search that accepts no position at any orientation aborts with
/// [`AutoplaceError::Unplaceable`] and restores the base orientation.
pub fn run_trials(
    ctx: &SearchContext<'_>,
    board: &mut Board,
    id: FootprintId,
    connectivity: &dyn Connectivity,
) -> Result<Trial, AutoplaceError> {
    let base = board.footprint(id).orientation;
    let (cost90, cost180) = {
        let fp = board.footprint(id);
        (fp.cost90, fp.cost180)
    };

    let first = ctx
        .search(board, id, connectivity)
        .ok_or_else(|| unplaceable(board, id))?;
    let mut best = Trial {
        position: first.position,
        orientation: base,
        score: first.score,
    };
    tracing::debug!(
        reference = %board.footprint(id).reference,
        orientation = base.as_degrees(),
        score = best.score,
        "base orientation scored"
    );

    let mut rotations = Vec::with_capacity(3);
    if cost180 != 0 {
        rotations.push((180.0, cost180));
    }
    if cost90 != 0 {
        rotations.push((90.0, cost90));
        rotations.push((270.0, cost90));
    }

    for (delta, cost) in rotations {
        let orientation = base + Angle::degrees(delta);
        board.footprint_mut(id).orientation = orientation;
        let Some(found) = ctx.search(board, id, connectivity) else {
            board.footprint_mut(id).orientation = base;
            return Err(unplaceable(board, id));
        };
        let score = found.score * penalty(cost);
        tracing::debug!(
            reference = %board.footprint(id).reference,
            orientation = orientation.as_degrees(),
            score,
            "rotated trial scored"
        );
        if score < best.score {
            best = Trial {
                position: found.position,
                orientation,
                score,
            };
        } else {
            board.footprint_mut(id).orientation = best.orientation;
        }
    }
    Ok(best)
}

fn unplaceable(board: &Board, id: FootprintId) -> AutoplaceError {
    AutoplaceError::Unplaceable {
        reference: board.footprint(id).reference.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::free_area::FreeArea;
    use crate::matrix::{cell, CellOp, GridSize, RoutingMatrix};
    use pcbplace_board::{
        polygon, Footprint, LayerSet, Outline, Pad, PlacementStatus, RatsnestConnectivity, Rect,
    };

    const MM: i64 = 1_000_000;

    struct Fixture {
        matrix: RoutingMatrix,
        free: FreeArea,
        board: Board,
    }

    impl Fixture {
        fn new(w: i64, h: i64) -> Self {
            let rect = Rect::new(Point::ZERO, Point::new(w * MM, h * MM));
            let mut matrix = RoutingMatrix::new(GridSize::compute(&rect, MM), 2).unwrap();
            let all = matrix.planes(LayerSet::ALL_CU);
            matrix.draw_filled_rect(&rect, all, cell::ZONE, CellOp::Set);
            Self {
                matrix,
                free: FreeArea::new(&polygon::rect_polygon(&rect)),
                board: Board::new(Outline::rectangle(rect)),
            }
        }

        fn trials(&mut self, id: FootprintId) -> Result<Trial, AutoplaceError> {
            let conn = RatsnestConnectivity::new(&self.board);
            let ctx = SearchContext {
                matrix: &self.matrix,
                free_area: &self.free,
                keepout_gain: 16,
                polygon_check: false,
            };
            run_trials(&ctx, &mut self.board, id, &conn)
        }
    }

    /// Board with an anchored pad near the right edge and a five millimetre
    /// part whose netted pad sits on its left end.
    fn lopsided(cost90: u8, cost180: u8) -> (Fixture, FootprintId) {
        let mut fx = Fixture::new(20, 20);
        let net = fx.board.add_net("SIG");
        fx.board.add_footprint(
            Footprint::new("J1", Point::new(19 * MM, 10 * MM))
                .with_pad(Pad::new("1", Point::ZERO, Point::new(MM, MM)).with_net(net)),
        );
        let id = fx.board.add_footprint(
            Footprint::new("R1", Point::new(5 * MM, 5 * MM))
                .with_pad(Pad::new("1", Point::new(-2 * MM, 0), Point::new(MM, MM)).with_net(net))
                .with_pad(Pad::new("2", Point::new(2 * MM, 0), Point::new(MM, MM)))
                .with_status(PlacementStatus::Pending)
                .with_rotation_costs(cost90, cost180),
        );
        (fx, id)
    }

    #[test]
    fn penalty_table_is_monotonic() {
        assert_eq!(penalty(0), 2.0);
        assert_eq!(penalty(10), 1.0);
        assert_eq!(penalty(200), 1.0);
        for w in ORIENTATION_PENALTY.windows(2) {
            assert!(w[1] <= w[0]);
        }
    }

    #[test]
    fn forbidden_rotations_keep_base_orientation() {
        let (mut fx, id) = lopsided(0, 0);
        let trial = fx.trials(id).unwrap();
        assert_eq!(trial.orientation, Angle::degrees(0.0));
        assert_eq!(fx.board.footprint(id).orientation, Angle::degrees(0.0));
        // Pad 1 gets as close as the board allows: four millimetres short
        assert_eq!(trial.position, Point::new(17 * MM, 10 * MM));
        assert_eq!(trial.score, 4.0 * MM as f64);
    }

    #[test]
    fn half_turn_wins_when_cheaper() {
        let (mut fx, id) = lopsided(0, 10);
        let trial = fx.trials(id).unwrap();
        assert_eq!(trial.orientation, Angle::degrees(180.0));
        assert_eq!(fx.board.footprint(id).orientation, Angle::degrees(180.0));
        assert_eq!(trial.position, Point::new(17 * MM, 10 * MM));
        assert_eq!(trial.score, 0.0);
    }

    #[test]
    fn quarter_turn_keeps_first_of_equal_scores() {
        let (mut fx, id) = lopsided(10, 0);
        let trial = fx.trials(id).unwrap();
        // 90 and 270 both reach the pad; 270 is not strictly better
        assert_eq!(trial.orientation, Angle::degrees(90.0));
        assert_eq!(trial.score, 0.0);
        assert_eq!(trial.position, Point::new(19 * MM, 8 * MM));
    }

    #[test]
    fn failed_rotated_trial_aborts_and_restores() {
        let mut fx = Fixture::new(20, 4);
        let id = fx.board.add_footprint(
            Footprint::new("R9", Point::new(5 * MM, 2 * MM))
                .with_pad(Pad::new("1", Point::new(-2 * MM, 0), Point::new(MM, MM)))
                .with_pad(Pad::new("2", Point::new(2 * MM, 0), Point::new(MM, MM)))
                .with_status(PlacementStatus::Pending)
                .with_rotation_costs(5, 0),
        );
        let err = fx.trials(id).unwrap_err();
        assert!(matches!(err, AutoplaceError::Unplaceable { ref reference } if reference == "R9"));
        assert_eq!(fx.board.footprint(id).orientation, Angle::degrees(0.0));
    }

    #[test]
    fn nowhere_to_go_is_unplaceable() {
        let mut fx = Fixture::new(4, 4);
        let id = fx.board.add_footprint(
            Footprint::new("U1", Point::ZERO)
                .with_body(Rect::new(Point::new(-5 * MM, -5 * MM), Point::new(10 * MM, 10 * MM)))
                .with_status(PlacementStatus::Pending),
        );
        assert!(matches!(fx.trials(id), Err(AutoplaceError::Unplaceable { .. })));
    }
}
