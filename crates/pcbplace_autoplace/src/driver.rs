//! The autoplace driver.
//!
//! A run builds its workspace (routing matrix and free area) from the board
//! outline, obstacles and every footprint that is not waiting for placement,
//! then repeatedly picks the next pending footprint, trials its orientations
//! and commits the winner. The workspace lives only for the duration of
//! [`Autoplacer::run`] and is released on every exit path.

use crate::error::{
    AutoplaceError, N_CANCELLED, N_NOTHING_TO_PLACE, W_GRID_CLAMPED, W_LOCKED, W_OUTLINE_FILL,
};
use crate::free_area::{FootprintArea, FreeArea};
use crate::matrix::{GridSize, RoutingMatrix};
use crate::orientation;
use crate::ranker;
use crate::search::SearchContext;
use crate::stamp;
use pcbplace_board::{
    Angle, Board, Connectivity, Footprint, FootprintId, PlacementStatus, Point, Rect, Side,
};
use pcbplace_common::{InternalError, Length, PlaceResult};
use pcbplace_config::{AutoplaceConfig, PlacementConfig};
use pcbplace_diagnostics::{Diagnostic, DiagnosticSink, Location};
use std::fmt;

/// Smallest grid cell the placer accepts; finer requests are raised to it.
pub const MIN_CELL_SIZE: Length = Length::from_nm(250_000);

/// Callbacks into the host during a run.
///
/// All methods run synchronously on the caller's thread, once per committed
/// footprint. Every method has a no-op default.
pub trait AutoplaceHooks {
    /// Reports `current` of `total` footprints placed.
    fn on_progress(&mut self, _current: usize, _total: usize) {}

    /// Names the footprint about to be placed.
    fn on_status(&mut self, _reference: &str) {}

    /// Asks the host to redraw after `placed` was committed. `None` marks the
    /// end of a completed run.
    fn on_refresh(&mut self, _board: &Board, _placed: Option<FootprintId>) {}

    /// Polled after each commit; returning `true` stops the run.
    fn is_cancelled(&mut self) -> bool {
        false
    }
}

/// Hooks that do nothing and never cancel.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoHooks;

impl AutoplaceHooks for NoHooks {}

/// How a run ended.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// Every pending footprint was placed, or nothing needed placing.
    #[default]
    Completed,
    /// The host cancelled; footprints committed so far keep their placement.
    Cancelled,
    /// A fatal condition stopped the run; see [`AutoplaceReport::error`].
    Failed,
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RunStatus::Completed => "completed",
            RunStatus::Cancelled => "cancelled",
            RunStatus::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// One committed footprint.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    /// The footprint.
    pub footprint: FootprintId,
    /// Its reference designator.
    pub reference: String,
    /// Committed anchor position.
    pub position: Point,
    /// Committed orientation.
    pub orientation: Angle,
    /// Winning penalized score.
    pub score: f64,
}

/// Outcome of [`Autoplacer::run`].
#[derive(Debug, Clone, Default)]
pub struct AutoplaceReport {
    /// How the run ended.
    pub status: RunStatus,
    /// Footprints committed, in placement order.
    pub placed: Vec<Placement>,
    /// Footprints the run set out to place.
    pub total: usize,
    /// The fatal condition, when `status` is [`RunStatus::Failed`].
    pub error: Option<AutoplaceError>,
}

/// The run-scoped placement state.
#[derive(Debug)]
struct Workspace {
    matrix: RoutingMatrix,
    free: FreeArea,
}

impl Workspace {
    fn release(&mut self) {
        self.matrix.release();
        self.free.release();
    }
}

/// Places footprints on a board one at a time.
pub struct Autoplacer<'a> {
    config: AutoplaceConfig,
    sink: &'a DiagnosticSink,
    workspace: Option<Workspace>,
}

impl<'a> Autoplacer<'a> {
    /// Creates a placer that reports into `sink`.
    pub fn new(config: AutoplaceConfig, sink: &'a DiagnosticSink) -> Self {
        Self {
            config,
            sink,
            workspace: None,
        }
    }

    /// The configuration in use.
    pub fn config(&self) -> &AutoplaceConfig {
        &self.config
    }

    /// Returns `true` when no run workspace is allocated.
    pub fn is_released(&self) -> bool {
        self.workspace.is_none()
    }

    /// Places the footprints in `selection`.
    ///
    /// Locked footprints in the selection are skipped with a warning. With
    /// `placement.place_off_board`, unlocked footprints whose anchor lies
    /// outside the board are added. Every other footprint is an obstacle for
    /// the whole run; statuses of footprints that were not placed are restored
    /// afterwards.
    ///
    /// Committed placements are never rolled back: a cancelled or failed run
    /// leaves them on the board.
    pub fn run(
        &mut self,
        board: &mut Board,
        selection: &[FootprintId],
        connectivity: &mut dyn Connectivity,
        hooks: &mut dyn AutoplaceHooks,
    ) -> AutoplaceReport {
        let span = tracing::info_span!("autoplace", selected = selection.len());
        let _guard = span.enter();

        let saved: Vec<PlacementStatus> = board.footprints.iter().map(|fp| fp.status).collect();
        let mut report = AutoplaceReport::default();
        let outcome = self.execute(board, selection, connectivity, hooks, &mut report);
        self.teardown();

        let ids: Vec<FootprintId> = board.footprint_ids().collect();
        for (id, status) in ids.into_iter().zip(saved) {
            if !report.placed.iter().any(|p| p.footprint == id) {
                board.footprint_mut(id).status = status;
            }
        }
        connectivity.recalculate_ratsnest(board);

        match outcome {
            Ok(status) => {
                report.status = status;
                tracing::info!(
                    %status,
                    placed = report.placed.len(),
                    total = report.total,
                    "autoplace finished"
                );
            }
            Err(err) => {
                tracing::error!(%err, placed = report.placed.len(), "autoplace failed");
                self.sink.emit(err.to_diagnostic());
                report.status = RunStatus::Failed;
                report.error = Some(err);
            }
        }
        report
    }

    fn execute(
        &mut self,
        board: &mut Board,
        selection: &[FootprintId],
        connectivity: &mut dyn Connectivity,
        hooks: &mut dyn AutoplaceHooks,
        report: &mut AutoplaceReport,
    ) -> Result<RunStatus, AutoplaceError> {
        let cell = self.cell_size();
        let bbox = board
            .edge_bounding_box()
            .filter(|r| !r.is_degenerate())
            .ok_or(AutoplaceError::BoardEdgesUndefined)?;
        if board.outline_area() <= 0.0 {
            return Err(AutoplaceError::BoardEdgesUndefined);
        }
        let size = GridSize::compute(&bbox, cell);

        let worklist = self.collect_worklist(board, selection, &size.board_box)?;
        if worklist.is_empty() {
            tracing::info!("nothing to place");
            self.sink.emit(Diagnostic::new(
                N_NOTHING_TO_PLACE,
                "no footprint needs placement",
                Location::NONE,
            ));
            return Ok(RunStatus::Completed);
        }
        let ids: Vec<FootprintId> = board.footprint_ids().collect();
        for id in ids {
            let fp = board.footprint_mut(id);
            if worklist.contains(&id) {
                fp.status = PlacementStatus::Pending;
            } else if fp.status == PlacementStatus::Pending {
                fp.status = PlacementStatus::Fixed;
            }
        }
        report.total = worklist.len();

        self.prepare(board, size)?;
        connectivity.recalculate_ratsnest(board);
        hooks.on_progress(0, report.total);

        let keepout_gain = i64::from(self.config.placement.keepout_gain);
        let polygon_check = self.config.placement.polygon_check;
        while let Some(id) = ranker::pick_next(board, connectivity) {
            let reference = board.footprint(id).reference.clone();
            hooks.on_status(&reference);

            let trial = {
                let ws = self.workspace()?;
                let ctx = SearchContext {
                    matrix: &ws.matrix,
                    free_area: &ws.free,
                    keepout_gain,
                    polygon_check,
                };
                orientation::run_trials(&ctx, board, id, &*connectivity)?
            };

            let fp = board.footprint_mut(id);
            fp.position = trial.position;
            fp.orientation = trial.orientation;
            fp.status = PlacementStatus::Placed;
            let ws = self.workspace.as_mut().ok_or_else(missing_workspace)?;
            occupy(ws, board.footprint(id), &self.config.placement);
            connectivity.update(board, id);

            tracing::info!(
                reference = %reference,
                x_mm = Length::from_nm(trial.position.x).mm(),
                y_mm = Length::from_nm(trial.position.y).mm(),
                orientation = trial.orientation.as_degrees(),
                score = trial.score,
                "footprint placed"
            );
            report.placed.push(Placement {
                footprint: id,
                reference,
                position: trial.position,
                orientation: trial.orientation,
                score: trial.score,
            });
            hooks.on_progress(report.placed.len(), report.total);
            hooks.on_refresh(board, Some(id));

            if hooks.is_cancelled() {
                tracing::info!(placed = report.placed.len(), "autoplace cancelled");
                self.sink.emit(Diagnostic::new(
                    N_CANCELLED,
                    format!(
                        "placement cancelled after {} of {} footprints",
                        report.placed.len(),
                        report.total
                    ),
                    Location::NONE,
                ));
                return Ok(RunStatus::Cancelled);
            }
        }
        hooks.on_refresh(board, None);
        Ok(RunStatus::Completed)
    }

    /// Effective cell size, raised to [`MIN_CELL_SIZE`] with a warning.
    fn cell_size(&self) -> i64 {
        let requested = self.config.grid.cell_size;
        if requested >= MIN_CELL_SIZE {
            return requested.nm();
        }
        tracing::warn!(%requested, minimum = %MIN_CELL_SIZE, "grid cell size clamped");
        self.sink.emit(
            Diagnostic::new(
                W_GRID_CLAMPED,
                format!("grid cell size {requested} is below {MIN_CELL_SIZE}"),
                Location::NONE,
            )
            .with_note(format!("using {MIN_CELL_SIZE}")),
        );
        MIN_CELL_SIZE.nm()
    }

    fn collect_worklist(
        &self,
        board: &Board,
        selection: &[FootprintId],
        matrix_box: &Rect,
    ) -> PlaceResult<Vec<FootprintId>> {
        let mut worklist = Vec::new();
        for &id in selection {
            let Some(fp) = board.footprints.get(id.index()) else {
                return Err(InternalError::new(format!("footprint {id} is not on the board")));
            };
            if fp.locked {
                tracing::warn!(reference = %fp.reference, "locked footprint skipped");
                self.sink.emit(
                    Diagnostic::new(
                        W_LOCKED,
                        format!("footprint {} is locked and will not be moved", fp.reference),
                        Location::footprint(fp.reference.clone()).at(
                            Length::from_nm(fp.position.x),
                            Length::from_nm(fp.position.y),
                        ),
                    )
                    .with_help("unlock the footprint to let the placer move it"),
                );
                continue;
            }
            if !worklist.contains(&id) {
                worklist.push(id);
            }
        }
        if self.config.placement.place_off_board {
            for id in board.footprint_ids() {
                let fp = board.footprint(id);
                if !fp.locked && !matrix_box.contains(fp.position) && !worklist.contains(&id) {
                    tracing::debug!(reference = %fp.reference, "off-board footprint added");
                    worklist.push(id);
                }
            }
        }
        Ok(worklist)
    }

    /// Builds the workspace: outline, obstacles, edge band and every
    /// footprint that is not pending.
    fn prepare(&mut self, board: &Board, size: GridSize) -> Result<(), AutoplaceError> {
        let mut matrix = RoutingMatrix::new(size, self.config.grid.layers)?;
        let filled = stamp::fill_outline(&mut matrix, &board.outline);
        if filled == 0 {
            tracing::warn!("board outline covers no grid cell");
            self.sink.emit(
                Diagnostic::new(
                    W_OUTLINE_FILL,
                    "board outline covers no grid cell",
                    Location::NONE,
                )
                .with_help("use a smaller grid cell size"),
            );
        }
        stamp::stamp_obstacles(&mut matrix, &board.obstacles);
        stamp::stamp_edge_clearance(
            &mut matrix,
            &board.outline,
            self.config.placement.edge_clearance.nm(),
        );
        tracing::info!(
            rows = matrix.rows(),
            cols = matrix.cols(),
            sides = matrix.sides(),
            cell_mm = Length::from_nm(matrix.cell_size()).mm(),
            "routing matrix built"
        );

        let mut ws = Workspace {
            matrix,
            free: FreeArea::new(&board.outline_polygon()),
        };
        let mut obstacles = 0;
        for fp in board.footprints.iter().filter(|fp| !fp.needs_placement()) {
            occupy(&mut ws, fp, &self.config.placement);
            obstacles += 1;
        }
        tracing::debug!(obstacles, "fixed footprints stamped");
        self.workspace = Some(ws);
        Ok(())
    }

    fn workspace(&self) -> PlaceResult<&Workspace> {
        self.workspace.as_ref().ok_or_else(missing_workspace)
    }

    fn teardown(&mut self) {
        if let Some(mut ws) = self.workspace.take() {
            ws.release();
            tracing::debug!("workspace released");
        }
    }
}

fn missing_workspace() -> InternalError {
    InternalError::new("placement workspace is not allocated")
}

/// Stamps `fp` into the matrix and removes its area from the free area.
fn occupy(ws: &mut Workspace, fp: &Footprint, placement: &PlacementConfig) {
    stamp::stamp_footprint(
        &mut ws.matrix,
        fp,
        placement.keepout_cost,
        i64::from(placement.keepout_gain),
    );
    let area = FootprintArea::build(fp, ws.matrix.cell_size(), 0);
    for side in Side::ALL {
        ws.free.subtract(area.side(side), side);
    }
}

/// Footprints a plain run places: pending and not locked.
pub fn default_selection(board: &Board) -> Vec<FootprintId> {
    board
        .footprint_ids()
        .filter(|id| {
            let fp = board.footprint(*id);
            fp.needs_placement() && !fp.locked
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{E_BOARD_EDGES, E_UNPLACEABLE};
    use crate::search::connection_cost;
    use pcbplace_board::{NetId, Outline, Pad, RatsnestConnectivity};

    const MM: i64 = 1_000_000;

    #[derive(Default)]
    struct Recorder {
        progress: Vec<(usize, usize)>,
        status: Vec<String>,
        refreshed: Vec<Option<FootprintId>>,
        cancel_after: Option<usize>,
    }

    impl AutoplaceHooks for Recorder {
        fn on_progress(&mut self, current: usize, total: usize) {
            self.progress.push((current, total));
        }

        fn on_status(&mut self, reference: &str) {
            self.status.push(reference.to_string());
        }

        fn on_refresh(&mut self, _board: &Board, placed: Option<FootprintId>) {
            self.refreshed.push(placed);
        }

        fn is_cancelled(&mut self) -> bool {
            let committed = self.refreshed.iter().filter(|r| r.is_some()).count();
            self.cancel_after.is_some_and(|n| committed >= n)
        }
    }

    fn rect_board(w: i64, h: i64) -> Board {
        Board::new(Outline::rectangle(Rect::new(
            Point::ZERO,
            Point::new(w * MM, h * MM),
        )))
    }

    fn square(reference: &str, pos: Point, size_mm: i64) -> Footprint {
        let half = size_mm * MM / 2;
        Footprint::new(reference, pos)
            .with_body(Rect::new(Point::new(-half, -half), Point::new(2 * half, 2 * half)))
            .with_status(PlacementStatus::Pending)
    }

    fn two_pin(reference: &str, pos: Point, span: i64, net: Option<NetId>) -> Footprint {
        let mut first = Pad::new("1", Point::new(-span, 0), Point::new(MM, MM));
        first.net = net;
        Footprint::new(reference, pos)
            .with_pad(first)
            .with_pad(Pad::new("2", Point::new(span, 0), Point::new(MM, MM)))
            .with_status(PlacementStatus::Pending)
    }

    fn anchor(reference: &str, pos: Point, net: NetId) -> Footprint {
        Footprint::new(reference, pos)
            .with_pad(Pad::new("1", Point::ZERO, Point::new(MM, MM)).with_net(net))
    }

    fn place(
        board: &mut Board,
        selection: &[FootprintId],
        config: AutoplaceConfig,
        hooks: &mut dyn AutoplaceHooks,
    ) -> (AutoplaceReport, Vec<Diagnostic>) {
        let sink = DiagnosticSink::new();
        let mut conn = RatsnestConnectivity::new(board);
        let mut placer = Autoplacer::new(config, &sink);
        let report = placer.run(board, selection, &mut conn, hooks);
        assert!(placer.is_released());
        (report, sink.take_all())
    }

    fn has_code(diags: &[Diagnostic], code: pcbplace_diagnostics::DiagnosticCode) -> bool {
        diags.iter().any(|d| d.code == code)
    }

    #[test]
    fn single_component_on_empty_board() {
        let mut board = rect_board(100, 80);
        let id = board.add_footprint(
            square("U1", Point::new(50 * MM, 40 * MM), 10)
                .with_pad(Pad::new("1", Point::new(-3 * MM, 0), Point::new(MM, MM)))
                .with_pad(Pad::new("2", Point::new(3 * MM, 0), Point::new(MM, MM))),
        );
        let mut hooks = Recorder::default();
        let (report, _) = place(&mut board, &[id], AutoplaceConfig::default(), &mut hooks);

        assert_eq!(report.status, RunStatus::Completed);
        assert_eq!(report.total, 1);
        assert_eq!(report.placed.len(), 1);
        let fp = board.footprint(id);
        assert_eq!(fp.status, PlacementStatus::Placed);
        // Every score is zero, so the first accepted cell wins
        assert_eq!(fp.position, Point::new(5 * MM, 5 * MM));
        let outline = Rect::new(Point::ZERO, Point::new(100 * MM, 80 * MM));
        assert!(outline.contains_rect(&fp.bounding_box()));

        assert_eq!(hooks.progress, vec![(0, 1), (1, 1)]);
        assert_eq!(hooks.status, vec!["U1".to_string()]);
        assert_eq!(hooks.refreshed, vec![Some(id), None]);
    }

    #[test]
    fn ratsnest_cost_is_minimal_over_all_feasible_cells() {
        let mut board = rect_board(50, 40);
        let net = board.add_net("SIG");
        board.add_footprint(anchor("J1", Point::new(10 * MM, 10 * MM), net));
        let r1 = board.add_footprint(two_pin("R1", Point::new(40 * MM, 30 * MM), MM, Some(net)));
        let (report, _) = place(&mut board, &[r1], AutoplaceConfig::default(), &mut NoHooks);
        assert_eq!(report.status, RunStatus::Completed);
        let placed = board.footprint(r1).clone();

        // Rebuild the same workspace with R1 pending and score every cell
        board.footprint_mut(r1).status = PlacementStatus::Pending;
        let sink = DiagnosticSink::new();
        let mut placer = Autoplacer::new(AutoplaceConfig::default(), &sink);
        let bbox = board.edge_bounding_box().unwrap();
        placer.prepare(&board, GridSize::compute(&bbox, MM)).unwrap();
        let conn = RatsnestConnectivity::new(&board);
        let ws = placer.workspace().unwrap();
        let ctx = SearchContext {
            matrix: &ws.matrix,
            free_area: &ws.free,
            keepout_gain: 16,
            polygon_check: false,
        };
        let fp = board.footprint(r1);
        let local = fp.local_bounding_box();
        let mut best: Option<(Point, f64)> = None;
        for row in 0..ws.matrix.rows() {
            for col in 0..ws.matrix.cols() {
                let pos = ws.matrix.cell_point(row, col);
                if let Ok(score) = ctx.evaluate(fp, r1, pos, &local, false, &conn) {
                    if best.map_or(true, |(_, s)| score < s) {
                        best = Some((pos, score));
                    }
                }
            }
        }
        let (pos, score) = best.unwrap();
        assert_eq!(placed.position, pos);
        assert_eq!(report.placed[0].score, score);
        // Above J1, pad 1 straight over its pad at three millimetres
        assert_eq!(pos, Point::new(11 * MM, 7 * MM));
        let pad = pos + Point::new(-MM, 0);
        assert_eq!(score, connection_cost(pad, Point::new(10 * MM, 10 * MM)));
    }

    #[test]
    fn forbidden_rotation_keeps_orientation() {
        let build = |cost180: u8| {
            let mut board = rect_board(30, 20);
            let net = board.add_net("SIG");
            board.add_footprint(anchor("J1", Point::new(28 * MM, 10 * MM), net));
            let r1 = board.add_footprint(
                two_pin("R1", Point::new(5 * MM, 5 * MM), 2 * MM, Some(net))
                    .with_rotation_costs(0, cost180),
            );
            (board, r1)
        };

        let (mut board, r1) = build(0);
        place(&mut board, &[r1], AutoplaceConfig::default(), &mut NoHooks);
        assert_eq!(board.footprint(r1).orientation, Angle::degrees(0.0));

        // The same part turns around once a half turn is allowed
        let (mut board, r1) = build(10);
        let (report, _) = place(&mut board, &[r1], AutoplaceConfig::default(), &mut NoHooks);
        assert_eq!(board.footprint(r1).orientation, Angle::degrees(180.0));
        assert!(report.placed[0].score < 7.0 * MM as f64);
    }

    #[test]
    fn cancel_after_first_commit() {
        let mut board = rect_board(60, 60);
        let start = Point::new(30_300_000, 30_300_000);
        let ids: Vec<_> = ["U1", "U2", "U3"]
            .iter()
            .map(|r| board.add_footprint(square(r, start, 5)))
            .collect();
        let mut hooks = Recorder {
            cancel_after: Some(1),
            ..Recorder::default()
        };
        let (report, diags) = place(&mut board, &ids, AutoplaceConfig::default(), &mut hooks);

        assert_eq!(report.status, RunStatus::Cancelled);
        assert_eq!(report.placed.len(), 1);
        assert!(has_code(&diags, N_CANCELLED));
        let moved: Vec<_> = ids
            .iter()
            .filter(|id| board.footprint(**id).position != start)
            .collect();
        assert_eq!(moved.len(), 1);
        assert_eq!(*moved[0], report.placed[0].footprint);
        for id in &ids {
            let expected = if *id == report.placed[0].footprint {
                PlacementStatus::Placed
            } else {
                PlacementStatus::Pending
            };
            assert_eq!(board.footprint(*id).status, expected);
        }
    }

    #[test]
    fn saturated_board_fails() {
        let mut board = rect_board(10, 10);
        board.add_footprint(
            square("BLK", Point::new(5 * MM, 5 * MM), 10).with_status(PlacementStatus::Fixed),
        );
        let start = Point::new(3 * MM, 3 * MM);
        let r1 = board.add_footprint(two_pin("R1", start, MM, None));
        let (report, diags) = place(&mut board, &[r1], AutoplaceConfig::default(), &mut NoHooks);

        assert_eq!(report.status, RunStatus::Failed);
        assert!(matches!(
            report.error,
            Some(AutoplaceError::Unplaceable { ref reference }) if reference == "R1"
        ));
        assert!(has_code(&diags, E_UNPLACEABLE));
        assert_eq!(board.footprint(r1).status, PlacementStatus::Pending);
        assert_eq!(board.footprint(r1).position, start);
    }

    #[test]
    fn missing_edges_fail() {
        let mut board = Board::default();
        let r1 = board.add_footprint(two_pin("R1", Point::ZERO, MM, None));
        let (report, diags) = place(&mut board, &[r1], AutoplaceConfig::default(), &mut NoHooks);
        assert_eq!(report.status, RunStatus::Failed);
        assert!(matches!(report.error, Some(AutoplaceError::BoardEdgesUndefined)));
        assert!(has_code(&diags, E_BOARD_EDGES));
    }

    #[test]
    fn locked_footprint_is_skipped() {
        let mut board = rect_board(20, 20);
        let start = Point::new(7 * MM, 7 * MM);
        let mut fp = two_pin("R1", start, MM, None);
        fp.locked = true;
        let r1 = board.add_footprint(fp);
        let (report, diags) = place(&mut board, &[r1], AutoplaceConfig::default(), &mut NoHooks);

        assert_eq!(report.status, RunStatus::Completed);
        assert!(report.placed.is_empty());
        assert!(has_code(&diags, W_LOCKED));
        assert!(has_code(&diags, N_NOTHING_TO_PLACE));
        assert_eq!(board.footprint(r1).position, start);
        assert_eq!(board.footprint(r1).status, PlacementStatus::Pending);
    }

    #[test]
    fn off_board_footprints_are_brought_in() {
        let mut board = rect_board(20, 20);
        let far = Point::new(200 * MM, 200 * MM);
        let stray = board.add_footprint(two_pin("R1", far, MM, None).with_status(PlacementStatus::Fixed));
        let mut locked = two_pin("R2", far, MM, None).with_status(PlacementStatus::Fixed);
        locked.locked = true;
        let pinned = board.add_footprint(locked);

        let mut config = AutoplaceConfig::default();
        config.placement.place_off_board = true;
        let (report, _) = place(&mut board, &[], config, &mut NoHooks);

        assert_eq!(report.status, RunStatus::Completed);
        assert_eq!(report.placed.len(), 1);
        let fp = board.footprint(stray);
        assert_eq!(fp.status, PlacementStatus::Placed);
        assert!(Rect::new(Point::ZERO, Point::new(20 * MM, 20 * MM)).contains(fp.position));
        assert_eq!(board.footprint(pinned).position, far);
    }

    #[test]
    fn fine_grid_is_clamped() {
        let mut board = rect_board(5, 5);
        let r1 = board.add_footprint(
            Footprint::new("R1", Point::new(1_111_111, 1_111_111))
                .with_pad(Pad::new("1", Point::ZERO, Point::new(500_000, 500_000)))
                .with_status(PlacementStatus::Pending),
        );
        let mut config = AutoplaceConfig::default();
        config.grid.cell_size = Length::from_mm(0.1);
        let (report, diags) = place(&mut board, &[r1], config, &mut NoHooks);

        assert_eq!(report.status, RunStatus::Completed);
        assert!(has_code(&diags, W_GRID_CLAMPED));
        let pos = board.footprint(r1).position;
        assert_eq!(pos.x % 250_000, 0);
        assert_eq!(pos.y % 250_000, 0);
    }

    #[test]
    fn unselected_pending_footprint_is_an_obstacle() {
        let mut board = rect_board(20, 20);
        let a = board.add_footprint(square("A", Point::new(15 * MM, 15 * MM), 4));
        let b = board.add_footprint(square("B", Point::new(2 * MM, 2 * MM), 4));
        let (report, _) = place(&mut board, &[a], AutoplaceConfig::default(), &mut NoHooks);

        assert_eq!(report.status, RunStatus::Completed);
        assert_eq!(board.footprint(a).position, Point::new(7 * MM, 2 * MM));
        assert_eq!(board.footprint(b).position, Point::new(2 * MM, 2 * MM));
        assert_eq!(board.footprint(b).status, PlacementStatus::Pending);
    }

    #[test]
    fn default_selection_skips_fixed_and_locked() {
        let mut board = rect_board(20, 20);
        let a = board.add_footprint(square("A", Point::ZERO, 2));
        board.add_footprint(square("B", Point::ZERO, 2).with_status(PlacementStatus::Fixed));
        let mut locked = square("C", Point::ZERO, 2);
        locked.locked = true;
        board.add_footprint(locked);
        assert_eq!(default_selection(&board), vec![a]);
    }

    #[test]
    fn placed_footprints_become_obstacles_for_later_ones() {
        let mut board = rect_board(30, 30);
        let ids: Vec<_> = ["U1", "U2"]
            .iter()
            .map(|r| board.add_footprint(square(r, Point::new(15 * MM, 15 * MM), 6)))
            .collect();
        let (report, _) = place(&mut board, &ids, AutoplaceConfig::default(), &mut NoHooks);
        assert_eq!(report.status, RunStatus::Completed);
        let first = board.footprint(ids[0]).bounding_box();
        let second = board.footprint(ids[1]).bounding_box();
        let overlap_x = first.x() < second.right() && second.x() < first.right();
        let overlap_y = first.y() < second.bottom() && second.y() < first.bottom();
        assert!(!(overlap_x && overlap_y));
    }
}
