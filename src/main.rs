use clap::Parser;
use othello_strategist::player::ai::{AIConfig, PolicyKind};
use othello_strategist::selfplay::{print_report, run_tournament, TournamentConfig};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about = "Self-play tournaments between Othello policies")]
struct Args {
    /// Number of games (colours alternate every game)
    #[arg(long, short = 'g', default_value_t = 10)]
    games: usize,

    #[arg(long, default_value_t = 8)]
    rows: usize,

    #[arg(long, default_value_t = 8)]
    cols: usize,

    /// Policy under evaluation
    #[arg(long, value_enum, default_value_t = PolicyKind::Strategist)]
    first: PolicyKind,

    /// Opponent policy
    #[arg(long, value_enum, default_value_t = PolicyKind::Random)]
    second: PolicyKind,

    /// Search depth limit (overrides the config file)
    #[arg(long, short = 'd')]
    depth: Option<usize>,

    /// AI config JSON (defaults to ./ai_config.json when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory to write one JSON record per game
    #[arg(long)]
    save_records: Option<PathBuf>,

    /// Play games one after another instead of in parallel
    #[arg(long)]
    sequential: bool,

    /// Print the statistics as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut ai_config = match &args.config {
        Some(path) => AIConfig::load_from(path)?,
        None => AIConfig::load_or_default(),
    };
    if let Some(depth) = args.depth {
        ai_config.search.depth_limit = depth;
    }

    let config = TournamentConfig {
        num_games: args.games,
        rows: args.rows,
        cols: args.cols,
        contender: args.first,
        opponent: args.second,
        ai_config,
        save_records: args.save_records,
        parallel: !args.sequential,
    };

    let stats = run_tournament(&config)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        print_report(&stats);
    }
    Ok(())
}
