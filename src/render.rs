//! Read-only view of a packed board for diagram consumers, plus a plain
//! ASCII drawing of it.

use serde::Serialize;

use crate::layout::PackedBoard;

const MAX_WIDTH: f64 = 80.0;
const MAX_HEIGHT: f64 = 40.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieceView<'a> {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub label: Option<&'a str>,
}

impl PieceView<'_> {
    /// `"label 80x200"`, or just the dimensions when unlabeled.
    pub fn caption(&self) -> String {
        let dims = format!("{}x{}", self.width.round(), self.height.round());
        match self.label {
            Some(label) if !label.is_empty() => format!("{label} {dims}"),
            _ => dims,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardView<'a> {
    pub width: f64,
    pub height: f64,
    pub pieces: Vec<PieceView<'a>>,
}

impl PackedBoard {
    pub fn render_view(&self) -> BoardView<'_> {
        BoardView {
            width: self.spec.width,
            height: self.spec.height,
            pieces: self
                .pieces
                .iter()
                .filter_map(|p| {
                    let pl = p.placement?;
                    Some(PieceView {
                        x: pl.x,
                        y: pl.y,
                        width: pl.placed_width,
                        height: pl.placed_height,
                        label: p.label.as_deref(),
                    })
                })
                .collect(),
        }
    }
}

/// Draws the board scaled into an 80x40 character box, origin bottom-left.
pub fn render_board(view: &BoardView<'_>) -> String {
    let scale = f64::min(MAX_WIDTH / view.width, MAX_HEIGHT / view.height);
    let grid_w = (view.width * scale).round() as usize;
    let grid_h = (view.height * scale).round() as usize;

    if grid_w == 0 || grid_h == 0 {
        return String::new();
    }

    let mut grid = vec![vec![' '; grid_w + 1]; grid_h + 1];

    draw_rect(&mut grid, 0, 0, grid_w, grid_h);

    for p in &view.pieces {
        let sx = (p.x * scale).round() as usize;
        let sw = (p.width * scale).round() as usize;
        let sh = (p.height * scale).round() as usize;
        // Rows grow downwards
        let top = ((p.y + p.height) * scale).round() as usize;
        let sy = grid_h.saturating_sub(top);

        if sw == 0 || sh == 0 {
            continue;
        }

        draw_rect(&mut grid, sx, sy, sw, sh);

        let label: Vec<char> = p.caption().chars().collect();
        if sw > 2 {
            let cx = sx + sw / 2;
            let cy = sy + sh / 2;
            let start_x = cx.saturating_sub(label.len() / 2);

            for (i, &ch) in label.iter().enumerate() {
                let x = start_x + i;
                if x > sx && x < sx + sw && cy > sy && cy < sy + sh {
                    grid[cy][x] = ch;
                }
            }
        }
    }

    let mut result = String::new();
    for row in &grid {
        let line: String = row.iter().collect();
        result.push_str(line.trim_end());
        result.push('\n');
    }
    result
}

fn mark(cell: &mut char, line: char) {
    let crossing = if line == '-' { '|' } else { '-' };
    *cell = if *cell == crossing || *cell == '+' {
        '+'
    } else {
        line
    };
}

fn draw_rect(grid: &mut [Vec<char>], x: usize, y: usize, w: usize, h: usize) {
    let rows = grid.len();
    let Some(cols) = grid.first().map(Vec::len) else {
        return;
    };

    for i in x..=x + w {
        if i >= cols {
            break;
        }
        for row in [y, y + h] {
            if row < rows {
                mark(&mut grid[row][i], '-');
            }
        }
    }

    for j in y..=y + h {
        if j >= rows {
            break;
        }
        for col in [x, x + w] {
            if col < cols {
                mark(&mut grid[j][col], '|');
            }
        }
    }

    for cx in [x, x + w] {
        for cy in [y, y + h] {
            if cy < rows && cx < cols {
                grid[cy][cx] = '+';
            }
        }
    }
}
