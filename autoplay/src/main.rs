use std::path::PathBuf;

use autoplay::{play_session, Recorder, SessionEnd, Strategy};
use clap::{Parser, ValueEnum};
use dominoes::{
    visualize_grid, Board, BoardLayout, GridConfig, NullSink, RoomKey, Session, SyncSink,
    TileSupply,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum BoardSize {
    /// 8 x 8 cells
    Eight,
    /// 7 x 7 cells
    Seven,
}

#[derive(Parser)]
struct Args {
    /// How many sessions to play
    #[arg(short, long, default_value_t = 100)]
    num_sessions: usize,

    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Which board to play on
    #[arg(short, long, value_enum, default_value_t = BoardSize::Eight)]
    board: BoardSize,

    /// Path to a JSON file with the grid dimensions, overrides --board
    #[arg(long)]
    grid_config: Option<PathBuf>,

    /// How the tiles are placed
    #[arg(short, long, value_enum, default_value_t = Strategy::Random)]
    strategy: Strategy,

    /// Room name used as the first level of the recording directory
    #[arg(long, default_value = "autoplay")]
    room: String,

    /// Record every board snapshot as JSON files into this directory
    #[arg(short, long)]
    record_to_directory: Option<PathBuf>,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

#[derive(Default)]
struct Summary {
    sessions: usize,
    total_score: u64,
    best_score: u32,
    total_placements: usize,
    stuck: usize,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    initialize_logging(args.log_level);

    // Get a random seed
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed);
    let mut rng = StdRng::seed_from_u64(seed);

    let config = match &args.grid_config {
        Some(path) => GridConfig::load(path)?,
        None => match args.board {
            BoardSize::Eight => GridConfig::EIGHT_BY_EIGHT,
            BoardSize::Seven => GridConfig::SEVEN_BY_SEVEN,
        },
    };
    info!(
        row_length = config.row_length(),
        total_cells = config.total_cells(),
        strategy = ?args.strategy,
        "Starting"
    );

    let mut recorder = match args.record_to_directory {
        Some(dir_path) => Some(Recorder::new(dir_path)?),
        None => None,
    };
    let mut null_sink = NullSink;
    let sink: &mut dyn SyncSink = match recorder.as_mut() {
        Some(recorder) => recorder,
        None => &mut null_sink,
    };

    let layout = BoardLayout::reference();
    let mut player = args.strategy.player(StdRng::seed_from_u64(rng.gen()));
    let mut summary = Summary::default();

    for session_idx in 0..args.num_sessions {
        let board = Board::new(config, &layout, TileSupply::new(rng.gen()));
        let key = RoomKey::new(&args.room, &format!("session_{:0>4}", session_idx));
        let mut session = Session::new(board, key, &mut *sink);

        let result = play_session(player.as_mut(), &mut session)?;
        debug!(
            session_idx,
            score = result.score,
            placements = result.placements,
            "\n{}",
            visualize_grid(session.board().grid())
        );

        summary.sessions += 1;
        summary.total_score += u64::from(result.score);
        summary.best_score = summary.best_score.max(result.score);
        summary.total_placements += result.placements;
        if result.end == SessionEnd::Stuck {
            summary.stuck += 1;
        }
    }

    if let Some(recorder) = recorder {
        let written = recorder.finish();
        info!(written, "Recording finished");
    }

    print_summary(&summary, player.name());
    Ok(())
}

fn print_summary(summary: &Summary, player_name: &str) {
    if summary.sessions == 0 {
        eprintln!("No sessions played");
        return;
    }
    let sessions = summary.sessions as f32;
    eprintln!(
        "End result for {} sessions by {}:\n- mean score {:.2}, best {}\n- mean placements {:.1}\n- {} sessions ended with no legal placement",
        summary.sessions,
        player_name,
        summary.total_score as f32 / sessions,
        summary.best_score,
        summary.total_placements as f32 / sessions,
        summary.stuck,
    );
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().event_format(format))
        .with(filter)
        .init();
}
