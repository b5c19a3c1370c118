use crate::error::{Result, SolveError};
use crate::geometry::Rect;
use crate::guillotine::{GuillotineBin, ScoredPlacement};
use crate::types::PieceId;

/// One piece as the packer sees it: its reserved footprint in canonical
/// orientation (short side first), margin included.
#[derive(Debug, Clone)]
pub struct PackItem {
    pub id: PieceId,
    pub footprint: Rect,
}

/// Placement of `items[index]`. `rotated` is relative to the canonical footprint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemPlacement {
    pub index: usize,
    pub board: usize,
    pub x: f64,
    pub y: f64,
    pub rotated: bool,
}

#[derive(Debug, Clone)]
pub struct PackOutcome {
    /// In placement order; board indices are dense over non-empty boards.
    pub placements: Vec<ItemPlacement>,
    pub board_count: usize,
    pub boards_opened: usize,
}

/// Offline best-area-fit guillotine packer over identical boards.
///
/// Boards are opened on demand. An empty board only wins a piece when no used
/// board can take it, so opening the estimated boards up front would not
/// change any placement.
pub struct Packer {
    stock: Rect,
    bins: Vec<GuillotineBin>,
    estimate: usize,
}

impl Packer {
    pub fn new(stock: Rect, estimate: usize) -> Self {
        Self {
            stock,
            bins: Vec::new(),
            estimate: estimate.max(1),
        }
    }

    /// Largest area first, then longer side, then input position.
    pub fn placement_order(items: &[PackItem]) -> Vec<usize> {
        let mut order: Vec<usize> = (0..items.len()).collect();
        order.sort_by(|&a, &b| {
            let (ra, rb) = (items[a].footprint, items[b].footprint);
            rb.area()
                .total_cmp(&ra.area())
                .then(rb.long_side().total_cmp(&ra.long_side()))
        });
        order
    }

    pub fn pack(mut self, items: &[PackItem]) -> Result<PackOutcome> {
        let mut placements = Vec::with_capacity(items.len());

        for index in Self::placement_order(items) {
            let item = &items[index];
            let (board, scored) = match self.best_open_bin(item.footprint) {
                Some(found) => found,
                None => self.open_bin(item)?,
            };
            let area = self.bins[board].place(scored, item.footprint);
            placements.push(ItemPlacement {
                index,
                board,
                x: area.x,
                y: area.y,
                rotated: scored.rotated,
            });
        }

        Ok(self.finish(placements))
    }

    /// Boards in instantiation order; a later board only wins when strictly better.
    fn best_open_bin(&self, footprint: Rect) -> Option<(usize, ScoredPlacement)> {
        let mut best: Option<(usize, ScoredPlacement)> = None;
        for (bi, bin) in self.bins.iter().enumerate() {
            if let Some(scored) = bin.find_best(footprint, true)
                && best.is_none_or(|(_, b)| scored.score.is_better_than(&b.score))
            {
                best = Some((bi, scored));
            }
        }
        best
    }

    fn open_bin(&mut self, item: &PackItem) -> Result<(usize, ScoredPlacement)> {
        let bin = GuillotineBin::new(self.stock);
        let Some(scored) = bin.find_best(item.footprint, true) else {
            return Err(SolveError::Fit {
                board_width: self.stock.w,
                board_height: self.stock.h,
                ids: vec![item.id.clone()],
            });
        };
        if self.bins.len() == self.estimate {
            tracing::warn!(estimate = self.estimate, "board estimate undershot, opening more");
        }
        self.bins.push(bin);
        tracing::debug!(board = self.bins.len() - 1, piece = %item.id, "opened board");
        Ok((self.bins.len() - 1, scored))
    }

    /// Drops boards that received nothing and renumbers the rest densely.
    fn finish(self, mut placements: Vec<ItemPlacement>) -> PackOutcome {
        let boards_opened = self.bins.len();
        let mut remap = vec![usize::MAX; boards_opened];
        let mut next = 0;
        for (bi, bin) in self.bins.iter().enumerate() {
            if !bin.is_empty() {
                remap[bi] = next;
                next += 1;
            }
        }
        for p in &mut placements {
            p.board = remap[p.board];
        }
        tracing::debug!(
            boards_opened,
            board_count = next,
            "packing finished"
        );
        PackOutcome {
            placements,
            board_count: next,
            boards_opened,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Area;

    fn items(dims: &[(f64, f64)]) -> Vec<PackItem> {
        dims.iter()
            .enumerate()
            .map(|(i, &(w, h))| PackItem {
                id: PieceId::new(format!("p{i}")),
                footprint: Rect::new(w, h).normalized(),
            })
            .collect()
    }

    fn occupied(items: &[PackItem], p: &ItemPlacement) -> Area {
        let fp = items[p.index].footprint;
        Area::new(p.x, p.y, if p.rotated { fp.rotated() } else { fp })
    }

    fn assert_outcome_valid(stock: Rect, items: &[PackItem], out: &PackOutcome) {
        assert_eq!(out.placements.len(), items.len());
        let mut seen: Vec<usize> = out.placements.iter().map(|p| p.index).collect();
        seen.sort_unstable();
        assert_eq!(seen, (0..items.len()).collect::<Vec<_>>());

        let board = Area::new(0.0, 0.0, stock);
        for (i, a) in out.placements.iter().enumerate() {
            assert!(a.board < out.board_count);
            let ra = occupied(items, a);
            assert!(board.contains(&ra), "{ra:?} outside board");
            for b in &out.placements[i + 1..] {
                if a.board == b.board {
                    let rb = occupied(items, b);
                    assert!(!ra.overlaps(&rb), "{ra:?} overlaps {rb:?}");
                }
            }
        }
    }

    #[test]
    fn test_order_by_area_then_long_side() {
        let its = items(&[(10.0, 10.0), (5.0, 20.0), (4.0, 25.0), (30.0, 30.0)]);
        // areas: 100, 100, 100, 900
        assert_eq!(Packer::placement_order(&its), vec![3, 2, 1, 0]);
    }

    #[test]
    fn test_order_is_stable_for_identical_pieces() {
        let its = items(&[(10.0, 20.0), (20.0, 10.0), (10.0, 20.0)]);
        assert_eq!(Packer::placement_order(&its), vec![0, 1, 2]);
    }

    #[test]
    fn test_single_board() {
        let stock = Rect::new(100.0, 100.0);
        let its = items(&[(50.0, 50.0); 4]);
        let out = Packer::new(stock, 1).pack(&its).unwrap();
        assert_outcome_valid(stock, &its, &out);
        assert_eq!(out.board_count, 1);
    }

    #[test]
    fn test_opens_boards_beyond_estimate() {
        let stock = Rect::new(100.0, 100.0);
        let its = items(&[(60.0, 60.0); 4]);
        let out = Packer::new(stock, 1).pack(&its).unwrap();
        assert_outcome_valid(stock, &its, &out);
        assert_eq!(out.board_count, 4);
        assert_eq!(out.boards_opened, 4);
    }

    #[test]
    fn test_overshot_estimate_opens_only_needed_boards() {
        let stock = Rect::new(100.0, 100.0);
        let its = items(&[(10.0, 10.0), (20.0, 20.0)]);
        let out = Packer::new(stock, 5).pack(&its).unwrap();
        assert_outcome_valid(stock, &its, &out);
        assert_eq!(out.boards_opened, 1);
        assert_eq!(out.board_count, 1);
        assert!(out.placements.iter().all(|p| p.board == 0));
    }

    #[test]
    fn test_huge_estimate_allocates_nothing_up_front() {
        let stock = Rect::new(100.0, 100.0);
        let its = items(&[(10.0, 10.0), (60.0, 60.0), (60.0, 60.0)]);
        let out = Packer::new(stock, usize::MAX).pack(&its).unwrap();
        assert_outcome_valid(stock, &its, &out);
        assert_eq!(out.boards_opened, 2);
        assert_eq!(out.board_count, 2);
    }

    #[test]
    fn test_rotates_to_share_a_board() {
        // Two 80x200 side by side need 160 > 120; the 40x40 goes in the gap
        let stock = Rect::new(120.0, 240.0);
        let its = items(&[(80.0, 200.0), (80.0, 200.0), (40.0, 40.0)]);
        let out = Packer::new(stock, 3).pack(&its).unwrap();
        assert_outcome_valid(stock, &its, &out);
        assert_eq!(out.board_count, 2);
    }

    #[test]
    fn test_unplaceable_piece_is_a_fit_error() {
        let stock = Rect::new(100.0, 100.0);
        let its = items(&[(10.0, 10.0), (150.0, 10.0)]);
        let err = Packer::new(stock, 1).pack(&its).unwrap_err();
        assert_eq!(err.offending_ids(), &[PieceId::new("p1")]);
    }

    #[test]
    fn test_deterministic() {
        let stock = Rect::new(244.0, 122.0);
        let its = items(&[
            (60.0, 40.0),
            (30.0, 90.0),
            (45.0, 45.0),
            (100.0, 20.0),
            (60.0, 40.0),
            (12.0, 70.0),
        ]);
        let a = Packer::new(stock, 1).pack(&its).unwrap();
        let b = Packer::new(stock, 1).pack(&its).unwrap();
        assert_eq!(a.placements, b.placements);
        assert_outcome_valid(stock, &its, &a);
    }
}
