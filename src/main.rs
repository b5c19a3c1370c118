use board_planner::render;
use board_planner::{LayoutResult, Piece, SolveOptions, Solver, StockBoardSpec};
use clap::Parser;
use tracing::Level;

#[derive(Parser)]
#[command(
    name = "board_planner",
    about = "Plan rectangular cuts across stock boards"
)]
struct Cli {
    /// Stock board dimensions (WxH, e.g. 120x240)
    #[arg(long)]
    board: String,

    /// Board thickness
    #[arg(long, default_value_t = 18.0)]
    thickness: f64,

    /// Board material
    #[arg(long, default_value = "pine")]
    material: String,

    /// Price of one board
    #[arg(long, default_value_t = 0.0)]
    price: f64,

    /// Pieces as WxL[:qty[:label]] (e.g. 80x200:2:side 40x40)
    #[arg(long = "pieces", num_args = 1..)]
    pieces: Vec<String>,

    /// Kerf margin added to both sides of every piece
    #[arg(long, default_value_t = 0.0)]
    margin: f64,

    /// Multiplier used for the initial board estimate
    #[arg(long, default_value_t = 2.0)]
    waste_factor: f64,

    /// Show ASCII layout of each board
    #[arg(long)]
    layout: bool,

    /// Print the layout as JSON instead of text
    #[arg(long)]
    json: bool,
}

fn parse_dimensions(s: &str) -> Result<(f64, f64), String> {
    let (w, h) = s
        .split_once('x')
        .ok_or_else(|| format!("invalid dimensions '{}', expected WxH", s))?;
    let w = w
        .parse::<f64>()
        .map_err(|_| format!("invalid width in '{}'", s))?;
    let h = h
        .parse::<f64>()
        .map_err(|_| format!("invalid height in '{}'", s))?;
    Ok((w, h))
}

/// Expands one `WxL[:qty[:label]]` argument into `qty` pieces.
fn parse_pieces(s: &str, next_id: &mut usize) -> Result<Vec<Piece>, String> {
    let mut parts = s.splitn(3, ':');
    let (w, l) = parse_dimensions(parts.next().unwrap_or_default())?;
    let qty = match parts.next() {
        Some(q) => q
            .parse::<u32>()
            .map_err(|_| format!("invalid quantity in '{}'", s))?,
        None => 1,
    };
    if qty == 0 {
        return Err(format!("quantity must be non-zero in '{}'", s));
    }
    let label = parts.next().filter(|l| !l.is_empty());

    Ok((0..qty)
        .map(|_| {
            *next_id += 1;
            let piece = Piece::new(format!("p{}", next_id), w, l);
            match label {
                Some(label) => piece.with_label(label),
                None => piece,
            }
        })
        .collect())
}

fn print_text(layout: &LayoutResult, show_layout: bool) {
    for (i, board) in layout.boards.iter().enumerate() {
        println!(
            "Board {} ({:.1}% used):",
            i + 1,
            board.efficiency() * 100.0
        );
        for p in &board.pieces {
            let Some(pl) = p.placement else { continue };
            let rot = if pl.rotated { " [rotated]" } else { "" };
            let label = p.label.as_deref().map(|l| format!(" {l}")).unwrap_or_default();
            println!(
                "  {}{} {}x{} @ ({}, {}){}",
                p.id, label, pl.placed_width, pl.placed_height, pl.x, pl.y, rot
            );
        }
        if show_layout {
            print!("{}", render::render_board(&board.render_view()));
        }
        println!();
    }

    println!(
        "Summary: {} board{} used, {:.1}% waste, cost {:.2}",
        layout.board_count(),
        if layout.board_count() == 1 { "" } else { "s" },
        layout.total_waste_percent(),
        layout.total_cost(),
    );
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_max_level(Level::WARN)
        .init();

    let cli = Cli::parse();

    let (width, height) = parse_dimensions(&cli.board).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });
    let board = StockBoardSpec::new(width, height)
        .with_thickness(cli.thickness)
        .with_material(cli.material)
        .with_price(cli.price);

    let mut next_id = 0;
    let pieces: Vec<Piece> = cli
        .pieces
        .iter()
        .map(|s| parse_pieces(s, &mut next_id))
        .collect::<Result<Vec<_>, _>>()
        .unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        })
        .into_iter()
        .flatten()
        .collect();

    let options = SolveOptions::default()
        .with_margin(cli.margin)
        .with_waste_factor(cli.waste_factor);
    let layout = Solver::new(board, pieces)
        .with_options(options)
        .solve()
        .unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        });

    if cli.json {
        match serde_json::to_string_pretty(&layout) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        print_text(&layout, cli.layout);
    }
}
