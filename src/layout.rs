//! Per-board grouping of packed pieces and the efficiency figures derived from it.

use serde::{Deserialize, Serialize};

use crate::packer::PackOutcome;
use crate::types::{Piece, PieceId, Placement, StockBoardSpec};

/// One board instance with the pieces cut from it, in placement order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackedBoard {
    pub spec: StockBoardSpec,
    pub pieces: Vec<Piece>,
}

impl PackedBoard {
    pub fn new(spec: StockBoardSpec) -> Self {
        Self {
            spec,
            pieces: Vec::new(),
        }
    }

    pub fn used_area(&self) -> f64 {
        self.pieces.iter().map(Piece::area).sum()
    }

    pub fn waste_area(&self) -> f64 {
        (self.spec.area() - self.used_area()).max(0.0)
    }

    /// `used_area / board_area`, in `[0, 1]`.
    pub fn efficiency(&self) -> f64 {
        self.used_area() / self.spec.area()
    }
}

/// Outcome of one solve. Immutable: editing the input means solving again.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutResult {
    pub boards: Vec<PackedBoard>,
}

impl LayoutResult {
    pub fn board_count(&self) -> usize {
        self.boards.len()
    }

    pub fn piece_count(&self) -> usize {
        self.boards.iter().map(|b| b.pieces.len()).sum()
    }

    pub fn iter_pieces(&self) -> impl Iterator<Item = &Piece> {
        self.boards.iter().flat_map(|b| &b.pieces)
    }

    pub fn piece(&self, id: &PieceId) -> Option<&Piece> {
        self.iter_pieces().find(|p| &p.id == id)
    }

    pub fn used_area(&self) -> f64 {
        self.boards.iter().map(PackedBoard::used_area).sum()
    }

    pub fn total_board_area(&self) -> f64 {
        self.boards.iter().map(|b| b.spec.area()).sum()
    }

    /// Aggregate efficiency over all boards; zero for an empty layout.
    pub fn efficiency(&self) -> f64 {
        let total = self.total_board_area();
        if total == 0.0 {
            return 0.0;
        }
        self.used_area() / total
    }

    pub fn total_waste_percent(&self) -> f64 {
        if self.boards.is_empty() {
            return 0.0;
        }
        (1.0 - self.efficiency()) * 100.0
    }

    pub fn total_cost(&self) -> f64 {
        self.boards.iter().map(|b| b.spec.price_per_board).sum()
    }
}

/// Turns packer output back into placed pieces grouped per board.
///
/// `pieces` must be the validated input the packer items were built from,
/// index for index.
pub fn aggregate(spec: &StockBoardSpec, pieces: &[Piece], outcome: &PackOutcome) -> LayoutResult {
    let mut boards: Vec<PackedBoard> = (0..outcome.board_count)
        .map(|_| PackedBoard::new(spec.clone()))
        .collect();

    for p in &outcome.placements {
        let source = &pieces[p.index];
        let canonical = source.rect().normalized();
        let placed = if p.rotated {
            canonical.rotated()
        } else {
            canonical
        };

        let mut piece = source.clone();
        piece.placement = Some(Placement {
            board_index: p.board,
            x: p.x,
            y: p.y,
            placed_width: placed.w,
            placed_height: placed.h,
            rotated: source.is_rotated_as(placed),
        });
        boards[p.board].pieces.push(piece);
    }

    LayoutResult { boards }
}
