//! Prints every position of a saved game record.

use anyhow::Context;
use clap::Parser;
use othello_strategist::game::{GameRecord, GameState};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(about = "Replay a JSON game record")]
struct Args {
    /// Record written by `othello-strategist --save-records`
    record: PathBuf,

    /// Only print the final position
    #[arg(long)]
    final_only: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let record = GameRecord::load(&args.record)
        .with_context(|| format!("failed to load {}", args.record.display()))?;
    println!(
        "{} (B) vs {} (W) on {}x{}",
        record.first, record.second, record.rows, record.cols
    );

    let positions = record.positions()?;
    let shown = if args.final_only {
        positions.len().saturating_sub(1)
    } else {
        0
    };
    for (ply, game) in positions.iter().enumerate().skip(shown) {
        if ply == 0 {
            println!("\nstart, {} to move", game.turn());
        } else {
            match record.moves[ply - 1] {
                Some(mv) => println!("\n#{} {}, {} to move", ply, mv, game.turn()),
                None => println!("\n#{} pass, {} to move", ply, game.turn()),
            }
        }
        print!("{}", game.board());
    }

    println!(
        "\nfinal score {}-{}, winner: {}",
        record.first_score, record.second_score, record.winner
    );
    Ok(())
}
