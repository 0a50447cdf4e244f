#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Command-line driver for the bitknight move generator and searcher.

use anyhow::Context;
use bitknight::{
    chess::board::Board,
    perft,
    search::{Config, Searcher},
    transpositiontable::TranspositionTable,
};

mod cli;

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, level),
    )
    .target(env_logger::Target::Stderr)
    .init();
}

fn load(fen: &str) -> anyhow::Result<Board> {
    Board::from_fen(fen).with_context(|| format!("could not set up position \"{fen}\""))
}

fn run_perft(fen: &str, depth: usize, divide: bool, hash: usize) -> anyhow::Result<()> {
    let mut board = load(fen)?;
    let start = std::time::Instant::now();
    let nodes = if divide {
        let split = perft::divide(&mut board, depth);
        for (m, count) in &split {
            println!("{m}: {count}");
        }
        split.iter().map(|&(_, count)| count).sum()
    } else if hash == 0 {
        perft::perft(&mut board, depth)
    } else {
        let mut table = TranspositionTable::new(hash);
        perft::perft_cached(&mut board, depth, &mut table)
    };
    log::info!("perft {depth} took {:.3?}", start.elapsed());
    println!("{nodes}");
    Ok(())
}

fn run_search(fen: &str, depth: usize, hash: usize, moves: &[String]) -> anyhow::Result<()> {
    let mut board = load(fen)?;
    board
        .make_uci_moves(moves.iter().map(String::as_str))
        .with_context(|| format!("could not play moves from \"{fen}\""))?;
    let mut searcher = Searcher::new(Config {
        hash_mb: hash,
        depth,
    });
    let result = searcher.best_move(&mut board);
    match result.best_move {
        Some(m) => println!("bestmove {m} score {}", result.score),
        None => println!("bestmove (none) score {}", result.score),
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = <cli::Cli as clap::Parser>::parse();
    init_logging(cli.verbose);

    bitknight::init();

    match cli.subcommand {
        cli::Subcommands::Perft {
            fen,
            depth,
            divide,
            hash,
        } => run_perft(&fen, depth, divide, hash),
        cli::Subcommands::Search {
            fen,
            depth,
            hash,
            moves,
        } => run_search(&fen, depth, hash, &moves),
        cli::Subcommands::Suite { max_nodes } => perft::gamut(max_nodes),
    }
}
