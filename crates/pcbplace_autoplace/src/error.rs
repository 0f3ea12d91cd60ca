//! Fatal conditions of an autoplace run and their diagnostic codes.

use pcbplace_common::InternalError;
use pcbplace_diagnostics::{Category, Diagnostic, DiagnosticCode, Label, Location};

/// Board edges missing or enclosing no area.
pub const E_BOARD_EDGES: DiagnosticCode = DiagnosticCode::new(Category::Error, 301);
/// A footprint fits nowhere on the board.
pub const E_UNPLACEABLE: DiagnosticCode = DiagnosticCode::new(Category::Error, 302);
/// The routing matrix came out empty.
pub const E_MATRIX: DiagnosticCode = DiagnosticCode::new(Category::Error, 303);
/// A bug in the placer.
pub const E_INTERNAL: DiagnosticCode = DiagnosticCode::new(Category::Error, 399);
/// A locked footprint was requested and skipped.
pub const W_LOCKED: DiagnosticCode = DiagnosticCode::new(Category::Warning, 301);
/// The board outline fill covered no grid cell.
pub const W_OUTLINE_FILL: DiagnosticCode = DiagnosticCode::new(Category::Warning, 302);
/// The grid cell size was raised to the minimum.
pub const W_GRID_CLAMPED: DiagnosticCode = DiagnosticCode::new(Category::Warning, 303);
/// The caller cancelled the run.
pub const N_CANCELLED: DiagnosticCode = DiagnosticCode::new(Category::Note, 301);
/// Nothing was selected for placement.
pub const N_NOTHING_TO_PLACE: DiagnosticCode = DiagnosticCode::new(Category::Note, 302);

/// Conditions that terminate an autoplace run as failed.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AutoplaceError {
    /// The board has no usable Edge.Cuts outline.
    #[error("board edges must be defined on layer Edge.Cuts")]
    BoardEdgesUndefined,

    /// The routing matrix would have no cells.
    #[error("routing matrix could not be allocated ({rows} rows x {cols} columns)")]
    MatrixAllocation {
        /// Computed row count.
        rows: usize,
        /// Computed column count.
        cols: usize,
    },

    /// No grid position accepts the footprint in any tried orientation.
    #[error("footprint {reference} cannot be placed anywhere on the board")]
    Unplaceable {
        /// Reference of the footprint that did not fit.
        reference: String,
    },

    /// An invariant of the placer was violated.
    #[error("{0}")]
    Internal(String),
}

impl From<InternalError> for AutoplaceError {
    fn from(err: InternalError) -> Self {
        AutoplaceError::Internal(err.to_string())
    }
}

impl AutoplaceError {
    /// Diagnostic code reported for this error.
    pub fn code(&self) -> DiagnosticCode {
        match self {
            AutoplaceError::BoardEdgesUndefined => E_BOARD_EDGES,
            AutoplaceError::MatrixAllocation { .. } => E_MATRIX,
            AutoplaceError::Unplaceable { .. } => E_UNPLACEABLE,
            AutoplaceError::Internal(_) => E_INTERNAL,
        }
    }

    /// Converts the error to an error diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let location = match self {
            AutoplaceError::Unplaceable { reference } => Location::footprint(reference.clone()),
            _ => Location::NONE,
        };
        let diag = Diagnostic::new(self.code(), self.to_string(), location);
        match self {
            AutoplaceError::BoardEdgesUndefined => {
                diag.with_help("draw a closed board outline before running the placer")
            }
            AutoplaceError::Unplaceable { reference } => diag
                .with_label(Label::primary(
                    Location::footprint(reference.clone()),
                    "every grid position was off board or occupied",
                ))
                .with_note("the run was aborted; footprints placed so far keep their new positions")
                .with_help("enlarge the board or allow more rotations"),
            _ => diag,
        }
    }
}
