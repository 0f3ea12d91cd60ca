//! JSON board files.

use crate::board::Board;
use crate::error::BoardError;
use crate::footprint::MAX_ROTATION_COST;
use std::collections::HashSet;
use std::path::Path;

/// Loads and validates a board from a JSON file.
pub fn load_board(path: &Path) -> Result<Board, BoardError> {
    let content = std::fs::read_to_string(path)?;
    let board = Board::from_json(&content)?;
    tracing::debug!(
        path = %path.display(),
        footprints = board.footprints.len(),
        nets = board.nets.len(),
        "loaded board"
    );
    Ok(board)
}

/// Writes a board to a JSON file, pretty-printed.
pub fn save_board(board: &Board, path: &Path) -> Result<(), BoardError> {
    let json = board.to_json()?;
    std::fs::write(path, json)?;
    Ok(())
}

impl Board {
    /// Parses and validates a board from a JSON string.
    pub fn from_json(content: &str) -> Result<Board, BoardError> {
        let board: Board =
            serde_json::from_str(content).map_err(|e| BoardError::ParseError(e.to_string()))?;
        validate_board(&board)?;
        Ok(board)
    }

    /// Serializes the board to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, BoardError> {
        serde_json::to_string_pretty(self).map_err(|e| BoardError::ParseError(e.to_string()))
    }
}

/// Checks reference uniqueness, net references and rotation cost ranges.
pub fn validate_board(board: &Board) -> Result<(), BoardError> {
    let mut seen = HashSet::new();
    for fp in &board.footprints {
        if fp.reference.is_empty() {
            return Err(BoardError::ValidationError(
                "footprint with empty reference".to_string(),
            ));
        }
        if !seen.insert(fp.reference.as_str()) {
            return Err(BoardError::ValidationError(format!(
                "duplicate reference '{}'",
                fp.reference
            )));
        }
        if fp.cost90 > MAX_ROTATION_COST || fp.cost180 > MAX_ROTATION_COST {
            return Err(BoardError::ValidationError(format!(
                "{}: rotation costs must be within 0..={MAX_ROTATION_COST}",
                fp.reference
            )));
        }
        for pad in &fp.pads {
            if let Some(net) = pad.net {
                if net.index() >= board.nets.len() {
                    return Err(BoardError::ValidationError(format!(
                        "{} pad {}: unknown net {net}",
                        fp.reference, pad.name
                    )));
                }
            }
        }
    }
    Ok(())
}
