use std::collections::HashSet;

use crate::error::{Result, SolveError, ValidationError};
use crate::solver::SolveOptions;
use crate::types::{Piece, StockBoardSpec};

fn is_positive(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

/// Rejects malformed requests: non-positive dimensions or thickness, a
/// negative price or margin, a non-positive waste factor, duplicate piece ids.
pub fn check_input(
    board: &StockBoardSpec,
    pieces: &[Piece],
    options: &SolveOptions,
) -> std::result::Result<(), ValidationError> {
    if !is_positive(board.width) || !is_positive(board.height) {
        return Err(ValidationError::NonPositiveBoard {
            width: board.width,
            height: board.height,
        });
    }
    if !is_positive(board.thickness) {
        return Err(ValidationError::NonPositiveThickness(board.thickness));
    }
    if !board.price_per_board.is_finite() || board.price_per_board < 0.0 {
        return Err(ValidationError::InvalidPrice(board.price_per_board));
    }
    if !options.margin.is_finite() || options.margin < 0.0 {
        return Err(ValidationError::InvalidMargin(options.margin));
    }
    if !is_positive(options.waste_factor) {
        return Err(ValidationError::InvalidWasteFactor(options.waste_factor));
    }

    let mut seen = HashSet::with_capacity(pieces.len());
    for piece in pieces {
        if !is_positive(piece.width) || !is_positive(piece.length) {
            return Err(ValidationError::NonPositivePiece {
                id: piece.id.clone(),
                width: piece.width,
                length: piece.length,
            });
        }
        if !seen.insert(&piece.id) {
            return Err(ValidationError::DuplicateId(piece.id.clone()));
        }
    }
    Ok(())
}

/// Confirms every piece, grown by `margin`, fits an empty board.
/// All offending ids are reported, in input order.
pub fn verify(board: &StockBoardSpec, pieces: &[Piece], margin: f64) -> Result<()> {
    let ids: Vec<_> = pieces
        .iter()
        .filter(|p| !board.contains(p, margin))
        .map(|p| p.id.clone())
        .collect();

    if ids.is_empty() {
        Ok(())
    } else {
        tracing::debug!(count = ids.len(), "pieces exceed board");
        Err(SolveError::Fit {
            board_width: board.width,
            board_height: board.height,
            ids,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PieceId;

    fn board() -> StockBoardSpec {
        StockBoardSpec::new(120.0, 240.0)
    }

    #[test]
    fn test_verify_passes_when_all_fit() {
        let pieces = vec![
            Piece::new("a", 80.0, 200.0),
            Piece::new("b", 240.0, 120.0),
        ];
        assert!(verify(&board(), &pieces, 0.0).is_ok());
    }

    #[test]
    fn test_verify_reports_all_offenders() {
        let pieces = vec![
            Piece::new("big", 130.0, 250.0),
            Piece::new("ok", 10.0, 10.0),
            Piece::new("long", 10.0, 241.0),
        ];
        let err = verify(&board(), &pieces, 0.0).unwrap_err();
        assert_eq!(
            err.offending_ids(),
            &[PieceId::new("big"), PieceId::new("long")]
        );
    }

    #[test]
    fn test_verify_accepts_quarter_turn_on_landscape_board() {
        let landscape = StockBoardSpec::new(240.0, 120.0);
        let pieces = vec![Piece::new("a", 80.0, 200.0)];
        assert!(verify(&landscape, &pieces, 0.0).is_ok());
        assert!(verify(&landscape, &[Piece::new("b", 130.0, 200.0)], 0.0).is_err());
    }

    #[test]
    fn test_verify_accounts_for_margin() {
        let pieces = vec![Piece::new("full", 120.0, 240.0)];
        assert!(verify(&board(), &pieces, 0.0).is_ok());
        assert!(verify(&board(), &pieces, 1.0).is_err());
    }

    #[test]
    fn test_check_input_rejects_bad_board() {
        let bad = StockBoardSpec::new(0.0, 240.0);
        let err = check_input(&bad, &[], &SolveOptions::default()).unwrap_err();
        assert!(matches!(err, ValidationError::NonPositiveBoard { .. }));

        let nan = StockBoardSpec::new(f64::NAN, 240.0);
        assert!(check_input(&nan, &[], &SolveOptions::default()).is_err());
    }

    #[test]
    fn test_check_input_rejects_bad_thickness() {
        let opts = SolveOptions::default();
        for t in [-5.0, 0.0, f64::NAN, f64::INFINITY] {
            let err = check_input(&board().with_thickness(t), &[], &opts).unwrap_err();
            assert!(matches!(err, ValidationError::NonPositiveThickness(_)), "{t}");
        }
    }

    #[test]
    fn test_check_input_rejects_bad_price() {
        let opts = SolveOptions::default();
        assert_eq!(
            check_input(&board().with_price(-10.0), &[], &opts),
            Err(ValidationError::InvalidPrice(-10.0))
        );
        assert!(check_input(&board().with_price(f64::NAN), &[], &opts).is_err());
        assert!(check_input(&board().with_price(0.0), &[], &opts).is_ok());
        assert!(check_input(&board().with_price(35.5), &[], &opts).is_ok());
    }

    #[test]
    fn test_check_input_rejects_bad_piece() {
        let pieces = vec![Piece::new("neg", -1.0, 10.0)];
        let err = check_input(&board(), &pieces, &SolveOptions::default()).unwrap_err();
        assert_eq!(
            err,
            ValidationError::NonPositivePiece {
                id: PieceId::new("neg"),
                width: -1.0,
                length: 10.0
            }
        );
    }

    #[test]
    fn test_check_input_rejects_bad_options() {
        let opts = SolveOptions::default().with_margin(-0.5);
        assert_eq!(
            check_input(&board(), &[], &opts),
            Err(ValidationError::InvalidMargin(-0.5))
        );
        let opts = SolveOptions::default().with_waste_factor(0.0);
        assert_eq!(
            check_input(&board(), &[], &opts),
            Err(ValidationError::InvalidWasteFactor(0.0))
        );
    }

    #[test]
    fn test_check_input_rejects_duplicate_ids() {
        let pieces = vec![Piece::new("a", 1.0, 1.0), Piece::new("a", 2.0, 2.0)];
        assert_eq!(
            check_input(&board(), &pieces, &SolveOptions::default()),
            Err(ValidationError::DuplicateId(PieceId::new("a")))
        );
    }
}
