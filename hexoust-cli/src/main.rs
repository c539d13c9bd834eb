//! HexOust CLI - command-line driver
//!
//! Commands:
//! - selfplay: play random-move games and report statistics
//! - cells: dump the canonical board cell enumeration

mod cells;
mod selfplay;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "hexoust")]
#[command(about = "HexOust rules engine driver")]
struct Cli {
    /// RNG seed for reproducible runs
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play random-move games between RED and BLUE
    Selfplay(selfplay::SelfplayArgs),
    /// Print the canonical cell enumeration for the radius-7 board
    Cells(cells::CellsArgs),
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Selfplay(args) => selfplay::run(args, cli.seed),
        Commands::Cells(args) => cells::run(args),
    }
}
