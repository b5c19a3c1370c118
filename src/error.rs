//! Error types for a solve call.

use thiserror::Error;

use crate::types::PieceId;

pub type Result<T> = std::result::Result<T, SolveError>;

/// Malformed input, rejected before anything is computed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("board dimensions must be positive, got {width}x{height}")]
    NonPositiveBoard { width: f64, height: f64 },

    #[error("piece {id} has non-positive dimensions {width}x{length}")]
    NonPositivePiece { id: PieceId, width: f64, length: f64 },

    #[error("board thickness must be positive, got {0}")]
    NonPositiveThickness(f64),

    #[error("price per board must be a non-negative number, got {0}")]
    InvalidPrice(f64),

    #[error("margin must be a non-negative number, got {0}")]
    InvalidMargin(f64),

    #[error("waste factor must be a positive number, got {0}")]
    InvalidWasteFactor(f64),

    #[error("piece id {0} appears more than once")]
    DuplicateId(PieceId),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolveError {
    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),

    /// Pieces that cannot fit an empty board even after rotation.
    #[error(
        "{} piece(s) too large for a {board_width}x{board_height} board: {}",
        .ids.len(),
        join_ids(.ids)
    )]
    Fit {
        board_width: f64,
        board_height: f64,
        ids: Vec<PieceId>,
    },
}

impl SolveError {
    /// Offending piece identifiers for a fit failure, empty otherwise.
    pub fn offending_ids(&self) -> &[PieceId] {
        match self {
            SolveError::Fit { ids, .. } => ids,
            SolveError::Validation(_) => &[],
        }
    }
}

fn join_ids(ids: &[PieceId]) -> String {
    ids.iter()
        .map(PieceId::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
