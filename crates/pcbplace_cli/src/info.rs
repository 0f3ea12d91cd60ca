//! `pcbplace info` — board and grid statistics.

use std::path::Path;

use pcbplace_autoplace::{GridSize, MIN_CELL_SIZE};
use pcbplace_board::{load_board, Board, PlacementStatus, Rect};
use pcbplace_common::Length;

use crate::{resolve_config, GlobalArgs, InfoArgs};

/// What `pcbplace info` reports about a board.
#[derive(Debug, PartialEq)]
struct BoardInfo {
    edge_box: Option<Rect>,
    area_mm2: f64,
    grid: Option<GridSize>,
    nets: usize,
    obstacles: usize,
    fixed: usize,
    pending: usize,
    placed: usize,
    locked: usize,
}

/// Runs the `pcbplace info` command.
pub fn run(args: &InfoArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let board_path = Path::new(&args.board);
    let config = resolve_config(global, board_path)?;
    let cell = match &args.grid {
        Some(g) => g.parse::<Length>()?,
        None => config.grid.cell_size,
    };
    let board = load_board(board_path)?;
    let info = collect(&board, cell);

    println!("board      {}", args.board);
    match info.edge_box {
        Some(r) => println!(
            "edge box   {:.3}mm x {:.3}mm at ({:.3}mm, {:.3}mm)",
            Length::from_nm(r.width()).mm(),
            Length::from_nm(r.height()).mm(),
            Length::from_nm(r.x()).mm(),
            Length::from_nm(r.y()).mm()
        ),
        None => println!("edge box   (no outline)"),
    }
    println!("area       {:.3}mm²", info.area_mm2);
    if let Some(grid) = &info.grid {
        println!(
            "grid       {} rows x {} cols, cell {}",
            grid.rows,
            grid.cols,
            Length::from_nm(grid.cell_size)
        );
    }
    println!("nets       {}", info.nets);
    println!("obstacles  {}", info.obstacles);
    println!(
        "footprints {} fixed, {} pending, {} placed, {} locked",
        info.fixed, info.pending, info.placed, info.locked
    );
    Ok(0)
}

fn collect(board: &Board, cell: Length) -> BoardInfo {
    let edge_box = board.edge_bounding_box();
    let cell = cell.at_least(MIN_CELL_SIZE);
    let count = |s: PlacementStatus| board.footprints.iter().filter(|f| f.status == s).count();
    BoardInfo {
        edge_box,
        area_mm2: board.outline_area() / 1e12,
        grid: edge_box.map(|r| GridSize::compute(&r, cell.nm())),
        nets: board.nets.len(),
        obstacles: board.obstacles.len(),
        fixed: count(PlacementStatus::Fixed),
        pending: count(PlacementStatus::Pending),
        placed: count(PlacementStatus::Placed),
        locked: board.footprints.iter().filter(|f| f.locked).count(),
    }
}
