//! Bitknight, a bitboard chess move generator and alpha-beta searcher.

#[macro_use]
mod macros;

pub mod chess;
pub mod errors;
pub mod evaluation;
pub mod lookups;
pub mod perft;
pub mod rng;
pub mod search;
pub mod transpositiontable;
pub mod util;

/// Builds the sliding-piece attack tables. Idempotent, and cheap after the first call.
pub fn init() {
    chess::magic::init();
}
