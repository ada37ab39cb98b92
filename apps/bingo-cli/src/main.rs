//! # bingo-cli
//!
//! Command-line front end for Goal Bingo.
//!
//! Every command loads the saved board, applies one action, saves the
//! result, and prints the board:
//! - `bingo setup` - choose name, grid size and target lines
//! - `bingo goal set/show` - fill in and inspect cells
//! - `bingo start` - lock in the goals and start playing
//! - `bingo toggle/count/habit` - make progress on a cell
//! - `bingo status/ack/reset` - view the board, dismiss a celebration, start over

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use bingo_goal::BingoConfig;

/// Goal Bingo: turn your goals into a bingo board.
#[derive(Parser)]
#[command(name = "bingo", version, about)]
struct Cli {
    /// Project root directory holding `.bingo/` (defaults to current directory).
    #[arg(long, default_value = ".")]
    project_root: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new board (setup stage only).
    Setup {
        /// Your name, shown on the board.
        #[arg(long)]
        name: String,
        /// Grid size: 3 or 4.
        #[arg(long, default_value = "3")]
        size: usize,
        /// Number of completed lines needed to win.
        #[arg(long, default_value = "1")]
        target: u32,
    },
    /// Fill in and inspect individual goals.
    Goal {
        #[command(subcommand)]
        command: commands::goal::GoalCommands,
    },
    /// Finish filling and start working on the board.
    Start,
    /// Mark a goal complete, or not complete again.
    Toggle {
        /// Cell number (0-based, row-major).
        cell: usize,
    },
    /// Move a count goal's counter.
    Count {
        /// Cell number (0-based, row-major).
        cell: usize,
        /// Amount to add; negative to subtract.
        #[arg(allow_negative_numbers = true)]
        delta: i64,
    },
    /// Record or un-record a habit day.
    Habit {
        /// Cell number (0-based, row-major).
        cell: usize,
        /// Day as YYYY-MM-DD (defaults to today).
        date: Option<String>,
    },
    /// Show the board.
    Status,
    /// Dismiss the celebration and keep going.
    Ack,
    /// Throw the board away and return to setup.
    Reset {
        /// Confirm that all progress will be lost.
        #[arg(long)]
        yes: bool,
    },
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they don't mix with the board on stdout.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("bingo_goal=info".parse()?)
                .add_directive("bingo_cli=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let cli = Cli::parse();
    let project_root = cli.project_root.canonicalize().unwrap_or(cli.project_root);
    let config = BingoConfig::for_project(&project_root);
    tracing::debug!("data dir: {}", config.data_dir.display());
    let ctx = commands::Context::open(config)?;

    match &cli.command {
        Commands::Setup { name, size, target } => {
            commands::setup::execute(&ctx, name, *size, *target)
        }
        Commands::Goal { command } => commands::goal::execute(command, &ctx),
        Commands::Start => commands::board::start(&ctx),
        Commands::Toggle { cell } => commands::goal::toggle(&ctx, *cell),
        Commands::Count { cell, delta } => commands::goal::count(&ctx, *cell, *delta),
        Commands::Habit { cell, date } => commands::goal::habit(&ctx, *cell, date.as_deref()),
        Commands::Status => commands::board::status(&ctx),
        Commands::Ack => commands::board::acknowledge(&ctx),
        Commands::Reset { yes } => commands::board::reset(&ctx, *yes),
    }
}
