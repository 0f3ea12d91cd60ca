//! Board model consumed by the autoplacer.
//!
//! This crate holds everything the placement engine treats as an external
//! collaborator: integer board geometry, copper layers, pads and footprints,
//! the board edge and obstacle drawings, JSON board files, and the
//! [`Connectivity`] ratsnest queries.

#![warn(missing_docs)]

pub mod board;
pub mod connectivity;
pub mod drawing;
pub mod error;
pub mod footprint;
pub mod geom;
pub mod ids;
pub mod io;
pub mod layer;
pub mod pad;
pub mod polygon;

pub use board::{Board, Net, Outline};
pub use connectivity::{Connectivity, PadAnchor, RatsnestConnectivity};
pub use drawing::Drawing;
pub use error::BoardError;
pub use footprint::{Footprint, PlacementStatus, MAX_ROTATION_COST};
pub use geom::{Angle, Point, Rect};
pub use ids::{FootprintId, NetId};
pub use io::{load_board, save_board, validate_board};
pub use layer::{LayerSet, Side};
pub use pad::{Pad, PadShape};
pub use polygon::PolySet;
