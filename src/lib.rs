//! Plans how to cut rectangular pieces out of identical stock boards.
//!
//! Pieces are normalized, grown by an optional kerf margin, checked against
//! the board, then packed largest-first with a best-area-fit guillotine
//! heuristic that may turn pieces a quarter turn and opens boards as needed.
//!
//! ```
//! use board_planner::{Piece, StockBoardSpec, solve};
//!
//! let board = StockBoardSpec::new(120.0, 240.0).with_price(45.0);
//! let pieces = vec![
//!     Piece::new("side-l", 40.0, 180.0),
//!     Piece::new("side-r", 40.0, 180.0),
//!     Piece::new("shelf", 60.0, 38.0).with_label("shelf"),
//! ];
//! let layout = solve(&board, &pieces, 0.3).unwrap();
//! assert_eq!(layout.piece_count(), 3);
//! assert!(layout.efficiency() <= 1.0);
//! ```

pub mod error;
pub mod estimate;
pub mod geometry;
pub mod guillotine;
pub mod layout;
pub mod packer;
pub mod render;
pub mod solver;
pub mod types;
pub mod validate;

pub use error::{Result, SolveError, ValidationError};
pub use layout::{LayoutResult, PackedBoard};
pub use solver::{SolveOptions, Solver, solve};
pub use types::{Piece, PieceId, Placement, StockBoardSpec};
