use std::time::Instant;

use crate::{
    chess::{board::Board, chessmove::Move},
    evaluation::{DRAW_SCORE, MATE_SCORE, is_mate_score, mated_in},
    transpositiontable::{
        Bound, SearchEntry, TranspositionTable, normalise_mate_score, reconstruct_mate_score,
    },
    util::{INFINITY, MAX_DEPTH},
};

/// Searcher configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Transposition table size in megabytes.
    pub hash_mb: usize,
    /// Depth searched by [`Searcher::best_move`].
    pub depth: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hash_mb: 32,
            depth: 5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    /// `None` only when the root position has no legal moves.
    pub best_move: Option<Move>,
    /// Score of `best_move` for the side to move at the root.
    pub score: i32,
    /// Nodes visited over the whole search.
    pub nodes: u64,
}

/// A fixed-depth negamax searcher with alpha-beta pruning.
///
/// The transposition table is kept between calls, so a second search of a
/// related position can reuse work from the first.
pub struct Searcher {
    tt: TranspositionTable<SearchEntry>,
    nodes: u64,
    config: Config,
}

impl Searcher {
    pub fn new(config: Config) -> Self {
        Self {
            tt: TranspositionTable::new(config.hash_mb),
            nodes: 0,
            config,
        }
    }

    /// Searches `board` to the configured depth.
    pub fn best_move(&mut self, board: &mut Board) -> SearchResult {
        self.search_to_depth(board, self.config.depth)
    }

    /// Iteratively deepens from depth 1 to `depth`, reporting each completed
    /// iteration, and returns the result of the deepest one.
    pub fn search_to_depth(&mut self, board: &mut Board, depth: usize) -> SearchResult {
        let depth = depth.clamp(1, MAX_DEPTH);
        let start = Instant::now();
        self.nodes = 0;

        let mut result = SearchResult {
            best_move: None,
            score: 0,
            nodes: 0,
        };
        for iteration in 1..=depth {
            let (best_move, score) = self.root(board, iteration);
            result = SearchResult {
                best_move,
                score,
                nodes: self.nodes,
            };
            readout_info(iteration, &result, start, self.tt.hashfull());
            if best_move.is_none() {
                // no legal moves, deeper iterations can't change anything.
                break;
            }
        }

        result
    }

    fn root(&mut self, board: &mut Board, depth: usize) -> (Option<Move>, i32) {
        self.nodes += 1;
        let key = board.key();

        let mut moves = board.legal_moves();
        if moves.is_empty() {
            let score = if board.in_check() {
                mated_in(0)
            } else {
                DRAW_SCORE
            };
            return (None, score);
        }
        self.order_tt_move_first(key, &mut moves);

        let mut alpha = -INFINITY;
        let beta = INFINITY;
        let mut best_move = None;
        let mut best_score = -INFINITY;
        for &m in moves.iter() {
            board.make_move(m);
            let score = -self.negamax(board, depth - 1, 1, -beta, -alpha);
            board.unmake_move(m);

            if score > best_score {
                best_score = score;
                best_move = Some(m);
                alpha = max!(alpha, score);
            }
        }

        self.tt.store(
            key,
            depth,
            SearchEntry {
                score: normalise_mate_score(best_score, 0),
                best_move,
                bound: Bound::Exact,
            },
        );

        (best_move, best_score)
    }

    /// Negamax with alpha-beta pruning. Scores are relative to the side to move.
    fn negamax(
        &mut self,
        board: &mut Board,
        depth: usize,
        ply: usize,
        mut alpha: i32,
        beta: i32,
    ) -> i32 {
        self.nodes += 1;

        if depth == 0 {
            return board.evaluate();
        }

        // mate on the hundredth half-move still counts as mate.
        if board.fifty_move_counter() >= 100 {
            return if board.in_check() && board.legal_moves().is_empty() {
                mated_in(ply)
            } else {
                DRAW_SCORE
            };
        }

        let key = board.key();
        if let Some(hit) = self.tt.probe(key, depth) {
            let score = reconstruct_mate_score(hit.score, ply);
            let usable = match hit.bound {
                Bound::Exact => true,
                bound => {
                    (bound.is_lower() && score >= beta) || (bound.is_upper() && score <= alpha)
                }
            };
            if usable {
                return score;
            }
        }

        let mut moves = board.legal_moves();
        if moves.is_empty() {
            return if board.in_check() {
                mated_in(ply)
            } else {
                DRAW_SCORE
            };
        }
        self.order_tt_move_first(key, &mut moves);

        let original_alpha = alpha;
        let mut best_move = None;
        let mut best_score = -INFINITY;
        for &m in moves.iter() {
            board.make_move(m);
            let score = -self.negamax(board, depth - 1, ply + 1, -beta, -alpha);
            board.unmake_move(m);

            if score > best_score {
                best_score = score;
                best_move = Some(m);
                alpha = max!(alpha, score);
            }
            if alpha >= beta {
                break;
            }
        }

        let bound = if best_score >= beta {
            Bound::Lower
        } else if best_score > original_alpha {
            Bound::Exact
        } else {
            Bound::Upper
        };
        self.tt.store(
            key,
            depth,
            SearchEntry {
                score: normalise_mate_score(best_score, ply),
                best_move,
                bound,
            },
        );

        best_score
    }

    /// Moves the best move recorded for this position, at any depth, to the front.
    fn order_tt_move_first(&self, key: u64, moves: &mut [Move]) {
        let tt_move = self
            .tt
            .probe_any(key)
            .and_then(|entry| entry.value.best_move);
        if let Some(index) = tt_move.and_then(|tt_move| moves.iter().position(|&m| m == tt_move)) {
            moves.swap(0, index);
        }
    }
}

fn format_score(score: i32) -> String {
    if is_mate_score(score) {
        let plies = MATE_SCORE - score.abs();
        let moves = (plies + 1) / 2;
        if score > 0 {
            format!("mate {moves}")
        } else {
            format!("mate -{moves}")
        }
    } else {
        format!("cp {score}")
    }
}

fn readout_info(depth: usize, result: &SearchResult, start: Instant, hashfull: usize) {
    #![allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    let elapsed = start.elapsed();
    let nps = (result.nodes as f64 / elapsed.as_secs_f64().max(1e-6)) as u64;
    let best = result
        .best_move
        .map_or_else(|| "(none)".to_string(), |m| m.to_string());
    log::info!(
        "depth {depth} score {} nodes {} nps {nps} hashfull {hashfull} time {} pv {best}",
        format_score(result.score),
        result.nodes,
        elapsed.as_millis(),
    );
}
