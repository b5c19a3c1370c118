use serde::{Deserialize, Serialize};

use crate::geometry::{Area, Rect, approx_eq};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PieceId(pub String);

impl PieceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PieceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PieceId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for PieceId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Where a piece ended up. `placed_width`/`placed_height` are the cut
/// dimensions after the rotation decision; any kerf margin is reserved on the
/// right and top of this rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub board_index: usize,
    pub x: f64,
    pub y: f64,
    pub placed_width: f64,
    pub placed_height: f64,
    /// Placed orientation differs from the supplied `width x length`.
    pub rotated: bool,
}

impl Placement {
    pub fn area(&self) -> Area {
        Area::new(self.x, self.y, Rect::new(self.placed_width, self.placed_height))
    }
}

/// A required piece. `width`/`length` are the logical dimensions as supplied;
/// `placement` is only set on pieces returned by a solve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Piece {
    pub id: PieceId,
    pub width: f64,
    pub length: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placement: Option<Placement>,
}

impl Piece {
    pub fn new(id: impl Into<PieceId>, width: f64, length: f64) -> Self {
        Self {
            id: id.into(),
            width,
            length,
            label: None,
            placement: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.width, self.length)
    }

    pub fn area(&self) -> f64 {
        self.width * self.length
    }

    /// Same piece with `width <= length`.
    pub fn normalized(&self) -> Self {
        let r = self.rect().normalized();
        Self {
            width: r.w,
            length: r.h,
            ..self.clone()
        }
    }

    /// Same piece grown by `margin` on both dimensions.
    pub fn buffered(&self, margin: f64) -> Self {
        let r = self.rect().buffered(margin);
        Self {
            width: r.w,
            length: r.h,
            ..self.clone()
        }
    }

    /// Whether the supplied orientation differs from the placed one.
    pub(crate) fn is_rotated_as(&self, placed: Rect) -> bool {
        !self.rect().is_square() && !approx_eq(self.width, placed.w)
    }
}

fn default_material() -> String {
    "pine".to_string()
}

/// Template for every board instance produced by one solve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockBoardSpec {
    pub width: f64,
    pub height: f64,
    pub thickness: f64,
    #[serde(default = "default_material")]
    pub material: String,
    #[serde(default)]
    pub price_per_board: f64,
}

impl StockBoardSpec {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            thickness: 18.0,
            material: default_material(),
            price_per_board: 0.0,
        }
    }

    pub fn with_thickness(mut self, thickness: f64) -> Self {
        self.thickness = thickness;
        self
    }

    pub fn with_material(mut self, material: impl Into<String>) -> Self {
        self.material = material.into();
        self
    }

    pub fn with_price(mut self, price_per_board: f64) -> Self {
        self.price_per_board = price_per_board;
        self
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.width, self.height)
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Whether `piece`, grown by `margin`, fits an empty board in either orientation.
    pub fn contains(&self, piece: &Piece, margin: f64) -> bool {
        piece
            .rect()
            .buffered(margin)
            .fits_in_any_orientation(&self.rect())
    }
}

impl std::fmt::Display for StockBoardSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}x{}x{} {}",
            self.width, self.height, self.thickness, self.material
        )
    }
}
