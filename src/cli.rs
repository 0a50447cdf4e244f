use clap::{Parser, Subcommand};

use bitknight::chess::board::Board;

#[derive(Parser)]
#[clap(author, version, about)]
pub struct Cli {
    /// Log at debug level instead of info. `RUST_LOG` takes precedence.
    #[clap(short, long, global = true)]
    pub verbose: bool,
    #[clap(subcommand)]
    pub subcommand: Subcommands,
}

#[derive(Subcommand)]
pub enum Subcommands {
    /// Count the leaf nodes of the legal move tree
    Perft {
        /// Position to start from.
        #[clap(long, value_name = "FEN", default_value = Board::STARTING_FEN)]
        fen: String,
        /// Depth to count at.
        #[clap(short, long, value_name = "N", default_value = "5")]
        depth: usize,
        /// Print the count below each root move.
        #[clap(long)]
        divide: bool,
        /// Hash size in MB for memoised counting. 0 disables the table.
        #[clap(long, value_name = "MB", default_value = "0")]
        hash: usize,
    },
    /// Search a position and print the best move
    Search {
        /// Position to start from.
        #[clap(long, value_name = "FEN", default_value = Board::STARTING_FEN)]
        fen: String,
        /// Search depth in plies.
        #[clap(short, long, value_name = "N", default_value = "5")]
        depth: usize,
        /// Hash size in MB.
        #[clap(long, value_name = "MB", default_value = "32")]
        hash: usize,
        /// Moves in long algebraic notation to play before searching.
        #[clap(long, value_name = "MOVE", num_args = 1..)]
        moves: Vec<String>,
    },
    /// Run the built-in perft reference suite
    Suite {
        /// Skip any depth whose expected count exceeds this.
        #[clap(long, value_name = "N", default_value = "10000000")]
        max_nodes: u64,
    },
}
