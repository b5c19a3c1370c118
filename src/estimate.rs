use crate::geometry::Rect;

pub const DEFAULT_WASTE_FACTOR: f64 = 2.0;

/// Initial board count: `max(1, ceil(total_area / board_area * waste_factor))`.
///
/// Only a starting allocation; the packer opens more boards when this
/// undershoots and drops unused ones when it overshoots.
pub fn estimate_boards(board: Rect, footprints: &[Rect], waste_factor: f64) -> usize {
    let total: f64 = footprints.iter().map(Rect::area).sum();
    let raw = (total / board.area() * waste_factor).ceil();
    if raw.is_finite() && raw >= 1.0 {
        raw as usize
    } else {
        1
    }
}
