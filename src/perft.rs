#![allow(clippy::module_name_repetitions)]

use anyhow::{Context, bail};

use crate::{
    chess::{board::Board, chessmove::Move, fen::Fen},
    transpositiontable::TranspositionTable,
};

/// Reference positions with their known leaf counts, one position per line.
const PERFT_SUITE: &str = "\
rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1 ;D1 20 ;D2 400 ;D3 8902 ;D4 197281 ;D5 4865609 ;D6 119060324
r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1 ;D1 48 ;D2 2039 ;D3 97862 ;D4 4085603 ;D5 193690690
8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1 ;D1 14 ;D2 191 ;D3 2812 ;D4 43238 ;D5 674624 ;D6 11030083
r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1 ;D1 6 ;D2 264 ;D3 9467 ;D4 422333 ;D5 15833292
rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8 ;D1 44 ;D2 1486 ;D3 62379 ;D4 2103487 ;D5 89941194
r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 10 ;D1 46 ;D2 2079 ;D3 89890 ;D4 3894594 ;D5 164075551
8/8/8/8/8/8/1k6/R2K4 b - - 1 1 ;D1 3";

/// Counts the leaf nodes of the legal move tree below `pos` at `depth`.
pub fn perft(pos: &mut Board, depth: usize) -> u64 {
    if depth == 0 {
        return 1;
    }

    let ml = pos.legal_moves();
    if depth == 1 {
        return ml.len() as u64;
    }

    let mut count = 0;
    for &m in ml.iter() {
        pos.make_move(m);
        count += perft(pos, depth - 1);
        pos.unmake_move(m);
    }

    count
}

/// [`perft`], memoising subtree counts by hash and exact remaining depth.
pub fn perft_cached(pos: &mut Board, depth: usize, table: &mut TranspositionTable<u64>) -> u64 {
    if depth == 0 {
        return 1;
    }

    let key = pos.key();
    if let Some(count) = table.probe(key, depth) {
        return count;
    }

    let ml = pos.legal_moves();
    let count = if depth == 1 {
        ml.len() as u64
    } else {
        let mut count = 0;
        for &m in ml.iter() {
            pos.make_move(m);
            count += perft_cached(pos, depth - 1, table);
            pos.unmake_move(m);
        }
        count
    };

    table.store(key, depth, count);
    count
}

/// Leaf counts split by root move, in generation order.
pub fn divide(pos: &mut Board, depth: usize) -> Vec<(Move, u64)> {
    let depth = depth.max(1);
    let ml = pos.legal_moves();
    let mut out = Vec::with_capacity(ml.len());
    for &m in ml.iter() {
        pos.make_move(m);
        out.push((m, perft(pos, depth - 1)));
        pos.unmake_move(m);
    }
    out
}

/// Runs every reference position of the built-in suite up to the first depth
/// whose expected count exceeds `max_nodes`.
pub fn gamut(max_nodes: u64) -> anyhow::Result<()> {
    log::info!("running perft on the reference suite (node limit {max_nodes})");
    let mut pos = Board::default();
    for line in PERFT_SUITE.lines() {
        let mut parts = line.split(';');
        let fen = parts.next().unwrap_or_default().trim();
        let parsed =
            Fen::parse(fen).with_context(|| format!("bad suite position \"{fen}\""))?;
        pos.set_from_fen(&parsed);
        for depth_part in parts {
            let depth_part = depth_part.trim();
            let (d, nodes) = depth_part
                .split_once(' ')
                .with_context(|| format!("malformed suite entry \"{depth_part}\""))?;
            let d = d
                .strip_prefix('D')
                .and_then(|d| d.parse::<usize>().ok())
                .with_context(|| format!("malformed suite depth \"{d}\""))?;
            let nodes = nodes
                .parse::<u64>()
                .with_context(|| format!("malformed suite count \"{nodes}\""))?;
            if nodes > max_nodes {
                log::debug!("skipping fen {fen}, depth {d}");
                break;
            }
            let perft_nodes = perft(&mut pos, d);
            if perft_nodes != nodes {
                bail!("perft failed: fen {fen}, depth {d}: expected {nodes}, got {perft_nodes}");
            }
            log::info!("PASS: fen {fen}, depth {d}");
        }
    }
    Ok(())
}
