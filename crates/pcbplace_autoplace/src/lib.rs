//! Grid-based component autoplacement.
//!
//! The placer rasterizes the board into a two-sided [`RoutingMatrix`] of
//! occupancy flags and keep-out costs, tracks the exact [`FreeArea`] of each
//! side, and places pending footprints one at a time. Each footprint is chosen
//! by the ranker (connectivity to already anchored parts first, complexity
//! second), scored at every grid position and allowed orientation, and
//! committed at the cheapest position found.
//!
//! ```ignore
//! let sink = DiagnosticSink::new();
//! let mut conn = RatsnestConnectivity::new(&board);
//! let mut placer = Autoplacer::new(config, &sink);
//! let selection = default_selection(&board);
//! let report = placer.run(&mut board, &selection, &mut conn, &mut NoHooks);
//! ```

#![warn(missing_docs)]

pub mod driver;
pub mod error;
pub mod free_area;
pub mod matrix;
pub mod orientation;
pub mod ranker;
mod raster;
pub mod search;
pub mod stamp;

pub use driver::{
    default_selection, AutoplaceHooks, AutoplaceReport, Autoplacer, NoHooks, Placement, RunStatus,
    MIN_CELL_SIZE,
};
pub use error::AutoplaceError;
pub use free_area::{FootprintArea, FreeArea};
pub use matrix::{cell, CellOp, GridSize, RoutingMatrix};
pub use orientation::{penalty, Trial, ORIENTATION_PENALTY};
pub use search::{SearchContext, SearchResult};
