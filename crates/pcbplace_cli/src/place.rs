//! `pcbplace place` — runs the autoplacer on a board file.
//!
//! 1. Load config (`--config`, `autoplace.toml` next to the board, or defaults)
//! 2. Apply command-line overrides
//! 3. Load and validate the board
//! 4. Resolve the selection
//! 5. Run the placer
//! 6. Write the board unless the run failed
//! 7. Render diagnostics and a summary

use std::path::Path;

use pcbplace_autoplace::{
    default_selection, AutoplaceHooks, AutoplaceReport, Autoplacer, RunStatus,
};
use pcbplace_board::{load_board, save_board, Board, FootprintId, RatsnestConnectivity};
use pcbplace_common::Length;
use pcbplace_config::AutoplaceConfig;
use pcbplace_diagnostics::{
    Diagnostic, DiagnosticRenderer, DiagnosticSink, Severity, TerminalRenderer,
};

use crate::{resolve_config, GlobalArgs, PlaceArgs, ReportFormat};

/// Prints one line per footprint as the placer picks it.
struct Progress {
    quiet: bool,
}

impl AutoplaceHooks for Progress {
    fn on_progress(&mut self, current: usize, total: usize) {
        tracing::debug!(current, total, "placement progress");
    }

    fn on_status(&mut self, reference: &str) {
        if !self.quiet {
            eprintln!("     Placing {reference}");
        }
    }
}

/// Runs the `pcbplace place` command.
///
/// Returns exit code 0 when the run completed, 1 when it failed and 2 when it
/// was cancelled.
pub fn run(args: &PlaceArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let board_path = Path::new(&args.board);
    let mut config = resolve_config(global, board_path)?;
    apply_overrides(&mut config, args)?;

    let mut board = load_board(board_path)?;
    let selection = resolve_selection(&board, &args.select)?;

    if !global.quiet && args.format == ReportFormat::Text {
        eprintln!(
            "   Placing {} footprint(s) on {} (grid {})",
            selection.len(),
            args.board,
            config.grid.cell_size
        );
    }

    let sink = DiagnosticSink::new();
    let mut connectivity = RatsnestConnectivity::new(&board);
    let mut hooks = Progress {
        quiet: global.quiet || args.format == ReportFormat::Json,
    };
    let mut placer = Autoplacer::new(config, &sink);
    let report = placer.run(&mut board, &selection, &mut connectivity, &mut hooks);

    let output = args.output.as_deref().unwrap_or(&args.board);
    if report.status != RunStatus::Failed {
        save_board(&board, Path::new(output))?;
    }

    let warnings = sink.count(Severity::Warning);
    let diagnostics = sink.take_all();
    match args.format {
        ReportFormat::Text => {
            let renderer = TerminalRenderer::new(global.color);
            for diag in &diagnostics {
                eprintln!("{}", renderer.render(diag));
            }
            if !global.quiet {
                for p in &report.placed {
                    eprintln!(
                        "     {:<8} x={:.3}mm y={:.3}mm rot={}",
                        p.reference,
                        Length::from_nm(p.position.x).mm(),
                        Length::from_nm(p.position.y).mm(),
                        p.orientation.as_degrees()
                    );
                }
                eprintln!(
                    "   Result: {}, {} of {} placed, {} warning(s)",
                    report.status,
                    report.placed.len(),
                    report.total,
                    warnings
                );
                if report.status != RunStatus::Failed {
                    eprintln!("     Wrote {output}");
                }
            }
        }
        ReportFormat::Json => {
            let json = serde_json::to_string_pretty(&report_json(&report, &diagnostics))
                .unwrap_or_else(|_| "{}".to_string());
            println!("{json}");
        }
    }

    Ok(exit_code(report.status))
}

/// Applies `--grid`, `--off-board` and `--polygon-check` on top of the file config.
fn apply_overrides(
    config: &mut AutoplaceConfig,
    args: &PlaceArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(grid) = &args.grid {
        let cell: Length = grid.parse()?;
        if cell.is_non_positive() {
            return Err(format!("grid cell size must be positive, got {grid}").into());
        }
        config.grid.cell_size = cell;
    }
    if args.off_board {
        config.placement.place_off_board = true;
    }
    if args.polygon_check {
        config.placement.polygon_check = true;
    }
    Ok(())
}

/// Maps reference designators to footprint IDs; an empty list selects every
/// pending footprint.
fn resolve_selection(board: &Board, refs: &[String]) -> Result<Vec<FootprintId>, String> {
    if refs.is_empty() {
        return Ok(default_selection(board));
    }
    refs.iter()
        .map(|r| {
            board
                .find_footprint(r)
                .ok_or_else(|| format!("unknown footprint reference '{r}'"))
        })
        .collect()
}

fn exit_code(status: RunStatus) -> i32 {
    match status {
        RunStatus::Completed => 0,
        RunStatus::Failed => 1,
        RunStatus::Cancelled => 2,
    }
}

fn report_json(report: &AutoplaceReport, diagnostics: &[Diagnostic]) -> serde_json::Value {
    let placed: Vec<serde_json::Value> = report
        .placed
        .iter()
        .map(|p| {
            serde_json::json!({
                "reference": p.reference,
                "x_mm": Length::from_nm(p.position.x).mm(),
                "y_mm": Length::from_nm(p.position.y).mm(),
                "orientation": p.orientation.as_degrees(),
                "score": p.score,
            })
        })
        .collect();
    serde_json::json!({
        "status": report.status.to_string(),
        "total": report.total,
        "placed": placed,
        "error": report.error.as_ref().map(|e| e.to_string()),
        "diagnostics": diagnostics,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pcbplace_board::{Footprint, Outline, Pad, PlacementStatus, Point, Rect};
    use tempfile::TempDir;

    const MM: i64 = 1_000_000;

    fn args(board: &Path) -> PlaceArgs {
        PlaceArgs {
            board: board.to_string_lossy().into_owned(),
            output: None,
            grid: None,
            off_board: false,
            select: Vec::new(),
            polygon_check: false,
            format: ReportFormat::Text,
        }
    }

    fn quiet() -> GlobalArgs {
        GlobalArgs {
            quiet: true,
            verbose: false,
            color: false,
            config: None,
        }
    }

    fn sample_board() -> Board {
        let mut board = Board::new(Outline::rectangle(Rect::new(
            Point::ZERO,
            Point::new(40 * MM, 30 * MM),
        )));
        let net = board.add_net("VCC");
        board.add_footprint(
            Footprint::new("J1", Point::new(5 * MM, 15 * MM))
                .with_pad(Pad::new("1", Point::ZERO, Point::new(2 * MM, 2 * MM)).with_net(net)),
        );
        board.add_footprint(
            Footprint::new("R1", Point::new(80 * MM, 80 * MM))
                .with_pad(Pad::new("1", Point::new(-MM, 0), Point::new(MM, MM)).with_net(net))
                .with_pad(Pad::new("2", Point::new(MM, 0), Point::new(MM, MM)))
                .with_status(PlacementStatus::Pending),
        );
        board
    }

    #[test]
    fn place_writes_output_board() {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("board.json");
        let output = tmp.path().join("placed.json");
        save_board(&sample_board(), &input).unwrap();

        let mut a = args(&input);
        a.output = Some(output.to_string_lossy().into_owned());
        let code = run(&a, &quiet()).unwrap();
        assert_eq!(code, 0);

        let placed = load_board(&output).unwrap();
        let r1 = placed.footprint(placed.find_footprint("R1").unwrap());
        assert_eq!(r1.status, PlacementStatus::Placed);
        assert!(Rect::new(Point::ZERO, Point::new(40 * MM, 30 * MM)).contains(r1.position));
        // Input left alone
        let original = load_board(&input).unwrap();
        assert_eq!(original.footprints[1].position, Point::new(80 * MM, 80 * MM));
    }

    #[test]
    fn failed_run_keeps_board_and_exits_one() {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("board.json");
        let mut board = sample_board();
        board.outline = Outline::default();
        save_board(&board, &input).unwrap();

        let code = run(&args(&input), &quiet()).unwrap();
        assert_eq!(code, 1);
        let unchanged = load_board(&input).unwrap();
        assert_eq!(unchanged, board);
    }

    #[test]
    fn unknown_reference_is_an_error() {
        let board = sample_board();
        let err = resolve_selection(&board, &["U99".to_string()]).unwrap_err();
        assert!(err.contains("U99"));
        let ids = resolve_selection(&board, &["R1".to_string()]).unwrap();
        assert_eq!(ids.len(), 1);
        assert_eq!(resolve_selection(&board, &[]).unwrap(), ids);
    }

    #[test]
    fn overrides_apply() {
        let mut config = AutoplaceConfig::default();
        let mut a = args(Path::new("b.json"));
        a.grid = Some("0.5mm".to_string());
        a.off_board = true;
        a.polygon_check = true;
        apply_overrides(&mut config, &a).unwrap();
        assert_eq!(config.grid.cell_size, Length::from_mm(0.5));
        assert!(config.placement.place_off_board);
        assert!(config.placement.polygon_check);

        a.grid = Some("-1mm".to_string());
        assert!(apply_overrides(&mut config, &a).is_err());
        a.grid = Some("wide".to_string());
        assert!(apply_overrides(&mut config, &a).is_err());
    }

    #[test]
    fn json_report_shape() {
        let report = AutoplaceReport {
            status: RunStatus::Cancelled,
            total: 3,
            ..AutoplaceReport::default()
        };
        let value = report_json(&report, &[]);
        assert_eq!(value["status"], "cancelled");
        assert_eq!(value["total"], 3);
        assert!(value["placed"].as_array().unwrap().is_empty());
        assert!(value["error"].is_null());
        assert_eq!(exit_code(report.status), 2);
    }
}
