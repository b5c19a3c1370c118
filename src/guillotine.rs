use std::cmp::Ordering;

use crate::geometry::{Area, EPSILON, Rect, approx_cmp, approx_eq};

/// Free-space bookkeeping for one board instance.
#[derive(Debug, Clone)]
pub struct GuillotineBin {
    stock: Rect,
    pub free_rects: Vec<Area>,
    pub placed: Vec<Area>,
}

/// Best-area-fit score. Lower waste wins, then more edges flush against the
/// board border, then the smaller short-side leftover.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Score {
    pub waste: f64,
    pub flush_edges: u8,
    pub short_leftover: f64,
}

impl Score {
    pub fn is_better_than(&self, other: &Score) -> bool {
        match approx_cmp(self.waste, other.waste) {
            Ordering::Less => true,
            Ordering::Greater => false,
            Ordering::Equal => match self.flush_edges.cmp(&other.flush_edges) {
                Ordering::Greater => true,
                Ordering::Less => false,
                Ordering::Equal => {
                    approx_cmp(self.short_leftover, other.short_leftover) == Ordering::Less
                }
            },
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ScoredPlacement {
    pub free_idx: usize,
    pub rotated: bool,
    pub score: Score,
}

impl GuillotineBin {
    pub fn new(stock: Rect) -> Self {
        Self {
            stock,
            free_rects: vec![Area::new(0.0, 0.0, stock)],
            placed: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.placed.is_empty()
    }

    pub fn used_area(&self) -> f64 {
        self.placed.iter().map(|a| a.rect.area()).sum()
    }

    /// Scans every free rectangle, as-given orientation before the rotated
    /// one. Earlier candidates win ties.
    pub fn find_best(&self, piece: Rect, allow_rotate: bool) -> Option<ScoredPlacement> {
        let mut best: Option<ScoredPlacement> = None;
        let try_rotated = allow_rotate && !piece.is_square();

        for (idx, free) in self.free_rects.iter().enumerate() {
            let orientations = [(piece, false), (piece.rotated(), true)];
            for (candidate, rotated) in orientations {
                if rotated && !try_rotated {
                    continue;
                }
                if !candidate.fits_in(&free.rect) {
                    continue;
                }
                let score = self.score(candidate, free);
                if best.is_none_or(|b| score.is_better_than(&b.score)) {
                    best = Some(ScoredPlacement {
                        free_idx: idx,
                        rotated,
                        score,
                    });
                }
            }
        }

        best
    }

    fn score(&self, piece: Rect, free: &Area) -> Score {
        let waste = (free.rect.area() - piece.area()).max(0.0);
        let short_leftover = (free.rect.w - piece.w).min(free.rect.h - piece.h).max(0.0);
        let flush = [
            approx_eq(free.x, 0.0),
            approx_eq(free.y, 0.0),
            approx_eq(free.x + piece.w, self.stock.w),
            approx_eq(free.y + piece.h, self.stock.h),
        ];
        Score {
            waste,
            flush_edges: flush.iter().filter(|&&f| f).count() as u8,
            short_leftover,
        }
    }

    /// Places `piece` at the bottom-left corner of the chosen free rectangle
    /// and returns the occupied area.
    pub fn place(&mut self, scored: ScoredPlacement, piece: Rect) -> Area {
        let free = self.free_rects[scored.free_idx];
        let placed = if scored.rotated {
            piece.rotated()
        } else {
            piece
        };
        let area = Area::new(free.x, free.y, placed);

        self.free_rects.swap_remove(scored.free_idx);
        self.split(free, placed);
        self.placed.push(area);
        self.prune_contained();
        self.merge_free_rects();

        area
    }

    fn split(&mut self, free: Area, placed: Rect) {
        let right_w = free.rect.w - placed.w;
        let top_h = free.rect.h - placed.h;
        let has_right = right_w > EPSILON;
        let has_top = top_h > EPSILON;

        let right_x = free.x + placed.w;
        let top_y = free.y + placed.h;

        match (has_right, has_top) {
            (true, true) => {
                // Cut across the shorter leftover axis
                if right_w < top_h {
                    self.free_rects
                        .push(Area::new(right_x, free.y, Rect::new(right_w, placed.h)));
                    self.free_rects
                        .push(Area::new(free.x, top_y, Rect::new(free.rect.w, top_h)));
                } else {
                    self.free_rects
                        .push(Area::new(right_x, free.y, Rect::new(right_w, free.rect.h)));
                    self.free_rects
                        .push(Area::new(free.x, top_y, Rect::new(placed.w, top_h)));
                }
            }
            (true, false) => {
                self.free_rects
                    .push(Area::new(right_x, free.y, Rect::new(right_w, free.rect.h)));
            }
            (false, true) => {
                self.free_rects
                    .push(Area::new(free.x, top_y, Rect::new(free.rect.w, top_h)));
            }
            (false, false) => {}
        }
    }

    fn prune_contained(&mut self) {
        let mut i = 0;
        while i < self.free_rects.len() {
            let inner = self.free_rects[i];
            let swallowed = self
                .free_rects
                .iter()
                .enumerate()
                .any(|(j, outer)| {
                    // Of two identical rects, keep the earlier one
                    j != i && outer.contains(&inner) && !(inner.contains(outer) && j > i)
                });
            if swallowed {
                self.free_rects.remove(i);
            } else {
                i += 1;
            }
        }
    }

    fn merge_free_rects(&mut self) {
        let mut merged = true;
        while merged {
            merged = false;
            'outer: for i in 0..self.free_rects.len() {
                for j in (i + 1)..self.free_rects.len() {
                    if let Some(m) = Self::try_merge(self.free_rects[i], self.free_rects[j]) {
                        self.free_rects[i] = m;
                        self.free_rects.swap_remove(j);
                        merged = true;
                        break 'outer;
                    }
                }
            }
        }
    }

    fn try_merge(a: Area, b: Area) -> Option<Area> {
        // Side by side: same row band
        if approx_eq(a.y, b.y) && approx_eq(a.rect.h, b.rect.h) {
            if approx_eq(a.right(), b.x) {
                return Some(Area::new(a.x, a.y, Rect::new(a.rect.w + b.rect.w, a.rect.h)));
            }
            if approx_eq(b.right(), a.x) {
                return Some(Area::new(b.x, b.y, Rect::new(a.rect.w + b.rect.w, a.rect.h)));
            }
        }
        // Stacked: same column band
        if approx_eq(a.x, b.x) && approx_eq(a.rect.w, b.rect.w) {
            if approx_eq(a.top(), b.y) {
                return Some(Area::new(a.x, a.y, Rect::new(a.rect.w, a.rect.h + b.rect.h)));
            }
            if approx_eq(b.top(), a.y) {
                return Some(Area::new(b.x, b.y, Rect::new(a.rect.w, a.rect.h + b.rect.h)));
            }
        }
        None
    }
}
