use std::{
    env,
    fs::{self, File},
    io,
    path::PathBuf,
    str::FromStr,
};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use mimalloc::MiMalloc;
use qirkat::{
    perft, perft_full, search, AiPlayer, Board, Player, SearchParams, Side, MOVE_GEN, NAME,
    POSITION_EVALUATOR,
};
use tracing::{level_filters::LevelFilter, Level};
use tracing_subscriber::{layer::SubscriberExt, prelude::*, util::SubscriberInitExt, Registry};

use qirkat_cli::{board_from_arg, Game, ManualPlayer, StdinReader};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Debug, Parser)]
#[command(version, about, long_about = None, args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    play: PlayArgs,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search a position for the best move.
    Search {
        /// 25 marks from a1 to e5, or `start`.
        layout: String,
        to_move: Side,
        depth: Option<u8>,
    },
    Perft {
        /// 25 marks from a1 to e5, or `start`.
        layout: String,
        to_move: Side,
        depth: usize,
        /// Print per-depth capture statistics instead of a per-move split.
        #[arg(long)]
        full: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PlayerKind {
    Ai,
    Manual,
}

/// Play a game on the terminal (the default when no subcommand is given).
#[derive(Debug, Args)]
struct PlayArgs {
    #[arg(long, value_enum, default_value_t = PlayerKind::Manual)]
    white: PlayerKind,

    #[arg(long, value_enum, default_value_t = PlayerKind::Ai)]
    black: PlayerKind,

    /// Search depth for AI players.
    #[arg(long)]
    depth: Option<u8>,

    /// Starting layout, 25 marks from a1 to e5, or `start`.
    #[arg(long)]
    layout: Option<String>,

    #[arg(long, default_value = "white")]
    to_move: Side,

    /// Stop after this many moves.
    #[arg(long)]
    move_limit: Option<usize>,

    /// Don't print the board after each move.
    #[arg(long, short)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    enable_logging()?;

    match cli.command {
        Some(Commands::Search {
            layout,
            to_move,
            depth,
        }) => cli_search(&layout, to_move, depth),
        Some(Commands::Perft {
            layout,
            to_move,
            depth,
            full,
        }) => cli_perft(&layout, to_move, depth, full),
        None => cli_play(cli.play),
    }
}

fn parse_board(layout: &str, to_move: Side) -> Result<Board> {
    board_from_arg(layout, to_move)
        .with_context(|| format!("Couldn't parse given layout: `{}`", layout))
}

fn cli_search(layout: &str, to_move: Side, depth: Option<u8>) -> Result<()> {
    let board = parse_board(layout, to_move)?;
    let search_params = SearchParams { max_depth: depth };
    let (best_move, info) = search(&board, &search_params, MOVE_GEN, POSITION_EVALUATOR);
    match best_move {
        Some(mve) => println!("{} ({})", mve, info.eval),
        None => println!("no move ({})", info.eval),
    }
    Ok(())
}

fn cli_perft(layout: &str, to_move: Side, depth: usize, full: bool) -> Result<()> {
    let board = parse_board(layout, to_move)?;
    if full {
        println!("{}", perft_full(&board, depth, MOVE_GEN));
        return Ok(());
    }

    let (move_counts, tot_moves) = perft(&board, depth, MOVE_GEN);
    let mut move_counts = move_counts.into_iter().collect::<Vec<_>>();
    move_counts.sort_by_key(|(mve, _)| mve.to_string());
    for (mve, move_nodes) in move_counts {
        println!("{}:  {}", mve, move_nodes);
    }
    println!("Total: {:?}", tot_moves);
    Ok(())
}

fn make_player(kind: PlayerKind, side: Side, depth: Option<u8>) -> Box<dyn Player> {
    match kind {
        PlayerKind::Ai => Box::new(AiPlayer::new(side, SearchParams { max_depth: depth })),
        PlayerKind::Manual => Box::new(ManualPlayer::new(side, StdinReader, io::stdout())),
    }
}

fn cli_play(args: PlayArgs) -> Result<()> {
    let board = parse_board(args.layout.as_deref().unwrap_or("start"), args.to_move)?;

    let mut game = Game::new(
        board,
        make_player(args.white, Side::White, args.depth),
        make_player(args.black, Side::Black, args.depth),
    );
    if let Some(move_limit) = args.move_limit {
        game = game.with_move_limit(move_limit);
    }
    if !args.quiet {
        game = game.with_printer();
    }

    let outcome = game.play();
    println!("{}", outcome);
    Ok(())
}

fn enable_logging() -> Result<()> {
    let log_path = if let Ok(log_path_str) = env::var("QIRKAT_LOG_PATH") {
        PathBuf::from_str(&log_path_str)?
    } else {
        let log_path = get_default_log_path()?;
        if let Some(log_path_dir) = log_path.parent() {
            fs::create_dir_all(log_path_dir)
                .with_context(|| format!("Couldn't create directory {:?}", log_path_dir))?;
        }
        log_path
    };

    let log_file =
        File::create(log_path.clone()).context(format!("Couldn't create file {:?}", log_path))?;

    let board_layer = tracing_subscriber::fmt::layer()
        .without_time()
        .with_level(false)
        .with_target(false)
        .with_filter(tracing_subscriber::filter::filter_fn(|meta| {
            meta.target() == "board"
        }));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .without_time()
        .with_level(false)
        .with_target(false)
        .with_writer(io::stderr)
        .with_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("info,board=off")
            }),
        );

    let log_layer = tracing_subscriber::fmt::layer()
        .with_writer(log_file)
        .with_filter(LevelFilter::from_level(Level::DEBUG));

    Registry::default()
        .with(board_layer)
        .with(stderr_layer)
        .with(log_layer)
        .init();

    Ok(())
}

fn get_default_log_path() -> Result<PathBuf> {
    let mut log_path = dirs::home_dir().context("Home directory not set")?;
    log_path.push(PathBuf::from(".local/state"));
    log_path.push(NAME);
    log_path.push(format!("{}.log", NAME));
    Ok(log_path)
}
