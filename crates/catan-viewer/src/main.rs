//! Catan board viewer.
//!
//! Loads a board description, numbers and lays it out, validates it, prints a
//! summary and writes the board as a PNG, optionally opening it in the
//! system image viewer.

use anyhow::Context;
use catan_core::{Board, BoardError, Strictness};
use catan_viewer::{BoardRenderer, RenderConfig};
use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "catan-viewer")]
#[command(about = "Load, validate and render a Catan board description")]
struct Cli {
    /// Board description file (JSON)
    #[arg(default_value = "boards/standard.json")]
    input: PathBuf,
    /// Where to write the rendered board
    #[arg(long, default_value = "catan_board.png")]
    output: PathBuf,
    /// Fix the number token shuffle
    #[arg(long)]
    seed: Option<u64>,
    /// Treat advisory findings as validation errors
    #[arg(long)]
    strict: bool,
    /// Open the rendered image once it is written
    #[arg(long)]
    show: bool,
}

fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", describe(&err));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let strictness = if cli.strict {
        Strictness::Strict
    } else {
        Strictness::Lenient
    };

    let board = match cli.seed {
        Some(seed) => {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            Board::load_with_rng(&cli.input, &mut rng, strictness)?
        }
        None => Board::load_with_rng(&cli.input, &mut rand::thread_rng(), strictness)?,
    };

    print_summary(&board);

    let renderer = BoardRenderer::new(RenderConfig::default()).context("failed to load the label font")?;
    let image = renderer.render(&board);
    image
        .save(&cli.output)
        .with_context(|| format!("failed to write {}", cli.output.display()))?;
    info!(path = %cli.output.display(), "board image saved");

    if cli.show {
        if let Err(err) = open::that(&cli.output) {
            warn!(path = %cli.output.display(), error = %err, "could not open the image viewer");
        }
    }
    Ok(())
}

fn print_summary(board: &Board) {
    println!("Board loaded and validated.");
    println!("{board}");

    println!("\nTiles ({} of {} placed):", board.layout().placed(), board.tiles().len());
    for (tile, coord) in board.tile_coords() {
        println!("- {tile} at {coord}");
    }

    println!("\nPorts:");
    for port in board.ports() {
        match board.port_positions().get(&port.id) {
            Some(placement) => println!("- {port} on {} {}", placement.tile_id, placement.direction),
            None => println!("- {port} (not docked)"),
        }
    }

    let robber = board.robber_tile().map_or("N/A", |t| t.id.as_str());
    println!("\nRobber: {robber}");

    let advisories = &board.report().advisories;
    if !advisories.is_empty() {
        println!("\nWarnings:");
        for advisory in advisories {
            println!("- {advisory}");
        }
    }
}

/// User-facing message for each failure kind
fn describe(err: &anyhow::Error) -> String {
    let Some(board_err) = err.downcast_ref::<BoardError>() else {
        return format!("Unexpected error: {err:#}");
    };
    match board_err {
        BoardError::FileNotFound { path } => format!("Error: board file not found: {}", path.display()),
        BoardError::MalformedInput(source) => format!("Error: invalid board file format: {source}"),
        BoardError::InvalidBoardCount(reason) => {
            format!("Error: the map is not a valid board: {reason}")
        }
        BoardError::MissingDesert => "Error: the map has no desert tile to centre on".to_string(),
        BoardError::InvalidBoardStructure(details) => format!("Error in board:\n{details}"),
        BoardError::UnexpectedFailure(source) => format!("Unexpected error: {source}"),
    }
}
