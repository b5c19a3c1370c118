use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::estimate::{DEFAULT_WASTE_FACTOR, estimate_boards};
use crate::layout::{LayoutResult, aggregate};
use crate::packer::{PackItem, Packer};
use crate::types::{Piece, StockBoardSpec};
use crate::validate;

/// Tunables for one solve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolveOptions {
    /// Kerf allowance added to both dimensions of every piece.
    pub margin: f64,
    /// Multiplier on the area lower bound used for the initial board count.
    pub waste_factor: f64,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self {
            margin: 0.0,
            waste_factor: DEFAULT_WASTE_FACTOR,
        }
    }
}

impl SolveOptions {
    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }

    pub fn with_waste_factor(mut self, waste_factor: f64) -> Self {
        self.waste_factor = waste_factor;
        self
    }
}

pub struct Solver {
    board: StockBoardSpec,
    options: SolveOptions,
    pieces: Vec<Piece>,
}

impl Solver {
    pub fn new(board: StockBoardSpec, pieces: Vec<Piece>) -> Self {
        Self {
            board,
            options: SolveOptions::default(),
            pieces,
        }
    }

    pub fn with_options(mut self, options: SolveOptions) -> Self {
        self.options = options;
        self
    }

    pub fn solve(&self) -> Result<LayoutResult> {
        validate::check_input(&self.board, &self.pieces, &self.options)?;
        validate::verify(&self.board, &self.pieces, self.options.margin)?;

        if self.pieces.is_empty() {
            return Ok(LayoutResult::default());
        }

        let items: Vec<PackItem> = self
            .pieces
            .iter()
            .map(|p| PackItem {
                id: p.id.clone(),
                footprint: p.buffered(self.options.margin).normalized().rect(),
            })
            .collect();

        let footprints: Vec<_> = items.iter().map(|i| i.footprint).collect();
        let estimate = estimate_boards(self.board.rect(), &footprints, self.options.waste_factor);
        tracing::debug!(estimate, pieces = items.len(), "estimated boards");

        let outcome = Packer::new(self.board.rect(), estimate).pack(&items)?;
        let layout = aggregate(&self.board, &self.pieces, &outcome);

        tracing::info!(
            board = %self.board,
            pieces = layout.piece_count(),
            boards = layout.board_count(),
            efficiency = layout.efficiency(),
            "solved"
        );
        Ok(layout)
    }
}

/// Packs `pieces` onto as many copies of `board` as needed.
///
/// Fails with [`SolveError::Validation`](crate::SolveError::Validation) on
/// malformed input and [`SolveError::Fit`](crate::SolveError::Fit) when a
/// piece cannot fit an empty board; never drops a piece.
pub fn solve(board: &StockBoardSpec, pieces: &[Piece], margin: f64) -> Result<LayoutResult> {
    Solver::new(board.clone(), pieces.to_vec())
        .with_options(SolveOptions::default().with_margin(margin))
        .solve()
}
