//! Real-valued rectangle primitives shared by the packer and the renderer.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Absolute tolerance used for every comparison between real dimensions.
pub const EPSILON: f64 = 1e-9;

/// Compares two lengths or areas, treating values within [`EPSILON`] as equal.
pub fn approx_cmp(a: f64, b: f64) -> Ordering {
    if (a - b).abs() <= EPSILON {
        Ordering::Equal
    } else if a < b {
        Ordering::Less
    } else {
        Ordering::Greater
    }
}

/// True when `a` and `b` differ by at most [`EPSILON`].
pub fn approx_eq(a: f64, b: f64) -> bool {
    approx_cmp(a, b) == Ordering::Equal
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub fn new(w: f64, h: f64) -> Self {
        Self { w, h }
    }

    pub fn area(&self) -> f64 {
        self.w * self.h
    }

    pub fn rotated(&self) -> Self {
        Self {
            w: self.h,
            h: self.w,
        }
    }

    pub fn short_side(&self) -> f64 {
        self.w.min(self.h)
    }

    pub fn long_side(&self) -> f64 {
        self.w.max(self.h)
    }

    pub fn is_square(&self) -> bool {
        approx_eq(self.w, self.h)
    }

    /// Canonical orientation: short side as width, long side as height.
    pub fn normalized(&self) -> Self {
        Self {
            w: self.short_side(),
            h: self.long_side(),
        }
    }

    /// Grows both dimensions by `margin` (saw kerf allowance).
    pub fn buffered(&self, margin: f64) -> Self {
        Self {
            w: self.w + margin,
            h: self.h + margin,
        }
    }

    pub fn fits_in(&self, other: &Rect) -> bool {
        approx_cmp(self.w, other.w) != Ordering::Greater
            && approx_cmp(self.h, other.h) != Ordering::Greater
    }

    /// Fit test allowing a quarter turn.
    pub fn fits_in_any_orientation(&self, other: &Rect) -> bool {
        self.normalized().fits_in(&other.normalized())
    }
}

impl std::fmt::Display for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.w, self.h)
    }
}

/// Axis-aligned rectangle anchored at its bottom-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Area {
    pub x: f64,
    pub y: f64,
    pub rect: Rect,
}

impl Area {
    pub fn new(x: f64, y: f64, rect: Rect) -> Self {
        Self { x, y, rect }
    }

    /// x coordinate of the right edge.
    pub fn right(&self) -> f64 {
        self.x + self.rect.w
    }

    /// y coordinate of the top edge.
    pub fn top(&self) -> f64 {
        self.y + self.rect.h
    }

    pub fn contains(&self, other: &Area) -> bool {
        approx_cmp(other.x, self.x) != Ordering::Less
            && approx_cmp(other.y, self.y) != Ordering::Less
            && approx_cmp(other.right(), self.right()) != Ordering::Greater
            && approx_cmp(other.top(), self.top()) != Ordering::Greater
    }

    /// True when the interiors intersect; touching edges do not count.
    pub fn overlaps(&self, other: &Area) -> bool {
        approx_cmp(self.x, other.right()) == Ordering::Less
            && approx_cmp(other.x, self.right()) == Ordering::Less
            && approx_cmp(self.y, other.top()) == Ordering::Less
            && approx_cmp(other.y, self.top()) == Ordering::Less
    }
}
