//! Command-line front end: search one position and print the chosen move.
//!
//! Usage: `sable <fen|startpos> <depth> [budget-ms]`
//!
//! The budget is advisory; the search always runs to the requested depth.

use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use sable_board::{CastlingMode, Position};
use sable_engine::{SearchControl, Searcher};
use tracing::info;

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);
    let fen = args
        .next()
        .context("usage: sable <fen|startpos> <depth> [budget-ms]")?;
    let depth: u8 = args
        .next()
        .context("missing search depth")?
        .parse()
        .context("depth must be a small integer")?;
    let budget = args
        .next()
        .map(|ms| ms.parse::<u64>().map(Duration::from_millis))
        .transpose()
        .context("budget must be milliseconds")?;

    let mut pos = if fen == "startpos" {
        Position::startpos()
    } else {
        fen.parse::<Position>().context("invalid FEN")?
    };

    info!(depth, ?budget, "sable searching");
    let control = SearchControl::new(Arc::new(AtomicBool::new(false)), budget);
    let mut searcher = Searcher::new();
    let report = searcher.search(&mut pos, depth, &control);

    match report.best_move {
        Some(m) => {
            info!(score = report.score, nodes = report.nodes, "search done");
            println!("{}", m.to_uci(CastlingMode::Standard));
        }
        None => bail!("no legal moves in the given position"),
    }
    Ok(())
}
