pub mod movegen;
pub mod validation;

use std::fmt::{self, Debug, Display, Formatter};

use crate::{
    chess::{
        board::movegen::pawn_attacks_from,
        chessmove::Move,
        fen::Fen,
        piece::{Black, Col, Colour, Piece, PieceType, White},
        piecelayout::PieceLayout,
        squareset::SquareSet,
        types::{CastlingRights, File, Rank, Square, State},
    },
    errors::{FenParseError, MoveParseError},
    lookups::{EP_KEYS, PIECE_KEYS, SIDE_KEY, castle_key},
};

/// Everything `unmake_move` needs that cannot be read back off the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveState {
    /// The move that was made, checked against the move being unmade.
    pub m: Move,
    /// The piece that left the from-square.
    pub moved: Piece,
    pub captured: Option<Piece>,
    /// The piece that arrived on the to-square in place of a pawn.
    pub promoted: Option<Piece>,
    pub ep_square: Option<Square>,
    pub castle_perm: CastlingRights,
    pub fifty_move_counter: u8,
    pub key: u64,
}

#[derive(PartialEq, Eq, Clone)]
pub struct Board {
    /// Position state that is modified in place by make/unmake.
    pub(crate) state: State,
    /// The side to move.
    side: Colour,
    /// The number of half moves made since the start of the game.
    ply: usize,
    /// Undo records, one per move made, most recent last.
    history: Vec<MoveState>,
}

impl Debug for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board")
            .field("fen", &self.to_string())
            .field("key", &format_args!("{:016X}", self.state.key))
            .field("ply", &self.ply)
            .field("history", &self.history.len())
            .finish_non_exhaustive()
    }
}

/// The square of the pawn removed by an en passant capture: on the mover's
/// starting rank, in the destination's file.
fn ep_victim_square(from: Square, to: Square) -> Square {
    Square::from_rank_file(from.rank(), to.file())
}

impl Board {
    pub const STARTING_FEN: &'static str =
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    pub fn empty() -> Self {
        let mut out = Self {
            state: State::default(),
            side: Colour::White,
            ply: 0,
            history: Vec::new(),
        };
        out.reset();
        out
    }

    pub fn reset(&mut self) {
        self.state = State::default();
        self.side = Colour::White;
        self.ply = 0;
        self.history.clear();
    }

    pub const fn turn(&self) -> Colour {
        self.side
    }

    pub const fn ply(&self) -> usize {
        self.ply
    }

    pub const fn key(&self) -> u64 {
        self.state.key
    }

    pub const fn ep_sq(&self) -> Option<Square> {
        self.state.ep_square
    }

    pub const fn castling_rights(&self) -> CastlingRights {
        self.state.castle_perm
    }

    pub const fn fifty_move_counter(&self) -> u8 {
        self.state.fifty_move_counter
    }

    pub const fn full_move_number(&self) -> usize {
        self.ply / 2 + 1
    }

    pub const fn pieces(&self) -> &PieceLayout {
        &self.state.bbs
    }

    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.state.mailbox[sq]
    }

    /// Number of moves that can currently be unmade.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn set_from_fen(&mut self, fen: &Fen) {
        self.reset();

        self.state.bbs = fen.board;

        for sq in Square::all() {
            self.state.mailbox[sq] = fen.board.piece_at(sq);
        }

        self.side = fen.turn;
        self.state.castle_perm = fen.castling;
        self.state.ep_square = fen.ep;
        self.state.fifty_move_counter = fen.halfmove;
        self.ply = (fen.fullmove.get() - 1) * 2;
        if self.side == Colour::Black {
            self.ply += 1;
        }

        self.state.key = self.generate_key();
    }

    pub fn set_startpos(&mut self) {
        let fen = Fen::parse(Self::STARTING_FEN).expect("STARTING_FEN is broken");
        self.set_from_fen(&fen);
    }

    pub fn from_fen(fen: &str) -> Result<Self, FenParseError> {
        let parsed = Fen::parse(fen)?;
        let mut out = Self::empty();
        out.set_from_fen(&parsed);
        Ok(out)
    }

    /// The en passant key, if the side to move has a pawn that could capture
    /// onto the en passant square. Otherwise zero, so that positions which
    /// differ only in an unusable target square hash the same.
    fn ep_hash(&self) -> u64 {
        let Some(ep_sq) = self.state.ep_square else {
            return 0;
        };
        let our_pawns = self.state.bbs.pieces[PieceType::Pawn] & self.state.bbs.colours[self.side];
        if (pawn_attacks_from(ep_sq, !self.side) & our_pawns).non_empty() {
            EP_KEYS[ep_sq]
        } else {
            0
        }
    }

    /// Computes the Zobrist key of the position from scratch.
    pub fn generate_key(&self) -> u64 {
        let mut key = 0;
        self.state
            .bbs
            .visit_pieces(|sq, piece| key ^= PIECE_KEYS[piece][sq]);
        if self.side == Colour::Black {
            key ^= SIDE_KEY;
        }
        key ^= castle_key(self.state.castle_perm.bits());
        key ^ self.ep_hash()
    }

    fn add_piece(&mut self, sq: Square, piece: Piece) {
        self.state.bbs.set_piece_at(sq, piece);
        self.state.mailbox[sq] = Some(piece);
        self.state.key ^= PIECE_KEYS[piece][sq];
    }

    fn remove_piece(&mut self, sq: Square, piece: Piece) {
        self.state.bbs.clear_piece_at(sq, piece);
        self.state.mailbox[sq] = None;
        self.state.key ^= PIECE_KEYS[piece][sq];
    }

    fn move_piece(&mut self, from: Square, to: Square, piece: Piece) {
        self.state.bbs.move_piece(from, to, piece);
        self.state.mailbox[from] = None;
        self.state.mailbox[to] = Some(piece);
        self.state.key ^= PIECE_KEYS[piece][from] ^ PIECE_KEYS[piece][to];
    }

    /// Makes a pseudo-legal move. The move may leave the mover's king in
    /// check; `legal_moves` relies on this to filter candidates.
    pub fn make_move(&mut self, m: Move) {
        match self.side {
            Colour::White => self.make_move_for::<White>(m),
            Colour::Black => self.make_move_for::<Black>(m),
        }
    }

    fn make_move_for<C: Col>(&mut self, m: Move) {
        let from = m.from();
        let to = m.to();
        let Some(moved) = self.state.mailbox[from] else {
            panic!("make_move({m}) with no piece on {from} in {self}");
        };
        debug_assert_eq!(moved.colour(), C::COLOUR, "make_move({m}) moves an enemy piece");

        let captured_sq = if m.is_ep() {
            ep_victim_square(from, to)
        } else {
            to
        };
        let captured = self.state.mailbox[captured_sq];
        let promoted = m.promotion_type().map(|pt| Piece::new(C::COLOUR, pt));

        self.history.push(MoveState {
            m,
            moved,
            captured,
            promoted,
            ep_square: self.state.ep_square,
            castle_perm: self.state.castle_perm,
            fifty_move_counter: self.state.fifty_move_counter,
            key: self.state.key,
        });

        // hash out the old en passant square while the old side is still to move.
        self.state.key ^= self.ep_hash();

        if let Some(captured) = captured {
            self.remove_piece(captured_sq, captured);
        }

        if let Some(promoted) = promoted {
            self.remove_piece(from, moved);
            self.add_piece(to, promoted);
        } else {
            self.move_piece(from, to, moved);
        }

        if m.is_castle() {
            let rook = Piece::new(C::COLOUR, PieceType::Rook);
            let (rook_from, rook_to) = if m.is_kingside_castling() {
                (Square::H1, Square::F1)
            } else {
                (Square::A1, Square::D1)
            };
            self.move_piece(
                rook_from.relative_to(C::COLOUR),
                rook_to.relative_to(C::COLOUR),
                rook,
            );
        }

        // rights only ever clear, so the changed bits are exactly the revoked ones.
        let old_rights = self.state.castle_perm;
        let new_rights = old_rights.after_move(from, to);
        self.state.key ^= castle_key(old_rights.bits() ^ new_rights.bits());
        self.state.castle_perm = new_rights;

        if moved.piece_type() == PieceType::Pawn || captured.is_some() {
            self.state.fifty_move_counter = 0;
        } else {
            self.state.fifty_move_counter = self.state.fifty_move_counter.saturating_add(1);
        }

        self.state.ep_square = if m.is_double_push() {
            from.add(C::PAWN_FWD_OFFSET)
        } else {
            None
        };

        self.side = C::Opposite::COLOUR;
        self.state.key ^= SIDE_KEY;
        // hash in the new en passant square only if the new side to move can use it.
        self.state.key ^= self.ep_hash();

        self.ply += 1;

        #[cfg(debug_assertions)]
        if let Err(e) = self.check_validity() {
            panic!("board corrupt after make_move({m}): {e}\n{self:X}");
        }
    }

    /// Unmakes `m`, which must be the last move made.
    ///
    /// # Panics
    ///
    /// Panics if no move has been made.
    pub fn unmake_move(&mut self, m: Move) {
        let undo = self.history.pop().expect("No move to unmake!");
        debug_assert_eq!(undo.m, m, "unmake_move called out of order");

        self.side = !self.side;
        self.ply -= 1;

        let from = m.from();
        let to = m.to();

        if let Some(promoted) = undo.promoted {
            self.remove_piece(to, promoted);
            self.add_piece(from, undo.moved);
        } else {
            self.move_piece(to, from, undo.moved);
        }

        if let Some(captured) = undo.captured {
            let captured_sq = if m.is_ep() {
                ep_victim_square(from, to)
            } else {
                to
            };
            self.add_piece(captured_sq, captured);
        }

        if m.is_castle() {
            let rook = Piece::new(self.side, PieceType::Rook);
            let (rook_from, rook_to) = if m.is_kingside_castling() {
                (Square::H1, Square::F1)
            } else {
                (Square::A1, Square::D1)
            };
            self.move_piece(
                rook_to.relative_to(self.side),
                rook_from.relative_to(self.side),
                rook,
            );
        }

        // the piece helpers toggled the key as they went; the snapshot wins.
        self.state.ep_square = undo.ep_square;
        self.state.castle_perm = undo.castle_perm;
        self.state.fifty_move_counter = undo.fifty_move_counter;
        self.state.key = undo.key;

        #[cfg(debug_assertions)]
        if let Err(e) = self.check_validity() {
            panic!("board corrupt after unmake_move({m}): {e}\n{self:X}");
        }
    }

    /// Whether `side`'s king stands on a square in `enemy_attacks`.
    pub fn is_check(&self, side: Colour, enemy_attacks: SquareSet) -> bool {
        (enemy_attacks & self.state.bbs.piece_bb(Piece::new(side, PieceType::King))).non_empty()
    }

    pub fn in_check(&self) -> bool {
        self.is_check(self.side, self.generate_attacks(!self.side))
    }

    /// Parses a move in the UCI format and returns a move or a reason why it couldn't be parsed.
    /// The move is resolved against the legal moves, so its flags reflect the position.
    pub fn parse_uci(&mut self, uci: &str) -> Result<Move, MoveParseError> {
        use MoveParseError::{
            IllegalMove, InvalidFromSquareFile, InvalidFromSquareRank, InvalidLength,
            InvalidPromotionPiece, InvalidToSquareFile, InvalidToSquareRank,
        };
        let chars = uci.chars().collect::<Vec<_>>();
        if !(4..=5).contains(&chars.len()) {
            return Err(InvalidLength(chars.len()));
        }
        let from_file = File::from_char(chars[0]).ok_or(InvalidFromSquareFile(chars[0]))?;
        let from_rank = Rank::from_char(chars[1]).ok_or(InvalidFromSquareRank(chars[1]))?;
        let to_file = File::from_char(chars[2]).ok_or(InvalidToSquareFile(chars[2]))?;
        let to_rank = Rank::from_char(chars[3]).ok_or(InvalidToSquareRank(chars[3]))?;
        let promo = match chars.get(4) {
            Some(&c) => Some(PieceType::from_promo_char(c).ok_or(InvalidPromotionPiece(c))?),
            None => None,
        };

        let from = Square::from_rank_file(from_rank, from_file);
        let to = Square::from_rank_file(to_rank, to_file);

        self.legal_moves()
            .iter()
            .copied()
            .find(|&m| {
                m.from() == from
                    && m.to() == to
                    && m.promotion_type() == promo
            })
            .ok_or_else(|| IllegalMove(uci.to_string()))
    }

    /// Parses and makes each move in turn, stopping at the first failure.
    pub fn make_uci_moves<'a>(
        &mut self,
        moves: impl IntoIterator<Item = &'a str>,
    ) -> Result<(), MoveParseError> {
        for text in moves {
            let m = self.parse_uci(text)?;
            self.make_move(m);
        }
        Ok(())
    }
}

impl Default for Board {
    fn default() -> Self {
        let mut out = Self::empty();
        out.set_startpos();
        out
    }
}

impl Board {
    /// The placement field of the FEN: ranks 8 to 1, runs of empty squares as digits.
    fn write_placement(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for rank in Rank::all().rev() {
            let mut gap = 0;
            for file in File::all() {
                match self.state.mailbox[Square::from_rank_file(rank, file)] {
                    None => gap += 1,
                    Some(piece) => {
                        if gap > 0 {
                            write!(f, "{gap}")?;
                            gap = 0;
                        }
                        write!(f, "{piece}")?;
                    }
                }
            }
            if gap > 0 {
                write!(f, "{gap}")?;
            }
            if rank != Rank::One {
                f.write_str("/")?;
            }
        }
        Ok(())
    }
}

/// Formats the position as FEN.
impl Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.write_placement(f)?;
        let side = match self.side {
            Colour::White => 'w',
            Colour::Black => 'b',
        };
        let ep = self
            .state
            .ep_square
            .map_or_else(|| "-".to_string(), |sq| sq.to_string());
        write!(
            f,
            " {side} {} {ep} {} {}",
            self.state.castle_perm,
            self.state.fifty_move_counter,
            self.full_move_number()
        )
    }
}

/// Draws the board as a grid, white at the bottom, followed by the FEN.
impl std::fmt::UpperHex for Board {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        for rank in Rank::all().rev() {
            write!(f, "{}", rank.char())?;
            for file in File::all() {
                let c = self.state.mailbox[Square::from_rank_file(rank, file)].map_or('.', Piece::char);
                write!(f, " {c}")?;
            }
            writeln!(f)?;
        }
        writeln!(f, "  a b c d e f g h")?;
        write!(f, "FEN: {self}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess::chessmove::MoveFlags;

    const POSITIONS: [&str; 8] = [
        Board::STARTING_FEN,
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
        "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
        "r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 10",
        "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3",
        "8/8/8/8/8/8/1k6/R2K4 b - - 1 1",
    ];

    #[test]
    fn fen_round_trip() {
        for fen in POSITIONS {
            let board = Board::from_fen(fen).expect("from_fen failed.");
            assert_eq!(board.to_string(), fen);
        }
        // an en passant square with no capturer is still printed back.
        let fen = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1";
        assert_eq!(Board::from_fen(fen).unwrap().to_string(), fen);
    }

    #[test]
    fn huge_move_numbers_round_trip() {
        let fen = format!("4k3/8/8/8/8/8/8/4K3 b - - 0 {}", usize::MAX / 2);
        let board = Board::from_fen(&fen).unwrap();
        assert_eq!(board.to_string(), fen);
        assert!(Board::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 18446744073709551615").is_err());
    }

    #[test]
    fn make_unmake_restores_everything() {
        for fen in POSITIONS {
            let mut board = Board::from_fen(fen).unwrap();
            let before = board.clone();
            for m in board.legal_moves().iter().copied() {
                board.make_move(m);
                assert_eq!(board.key(), board.generate_key(), "{fen}: key drift after {m}");
                assert_eq!(board.history_len(), 1);
                board.unmake_move(m);
                assert_eq!(board, before, "{fen}: {m} was not undone exactly");
            }
        }
    }

    #[test]
    fn transpositions_hash_equal() {
        let mut a = Board::default();
        let mut b = Board::default();
        a.make_uci_moves(["g1f3", "b8c6", "b1c3", "g8f6"]).unwrap();
        b.make_uci_moves(["b1c3", "g8f6", "g1f3", "b8c6"]).unwrap();
        assert_eq!(a.key(), b.key());
        assert_eq!(a.to_string(), b.to_string());

        // same pieces, different side to move.
        let mut c = Board::default();
        c.make_uci_moves(["g1f3", "b8c6", "b1c3"]).unwrap();
        assert_ne!(a.key(), c.key());
    }

    #[test]
    fn ep_square_edge_case() {
        let mut not_ep_capturable =
            Board::from_fen("rnbqkbnr/ppppp1pp/8/5p2/4P3/5N2/PPPP1PPP/RNBQKB1R b KQkq - 1 2")
                .unwrap();
        let mut ep_capturable =
            Board::from_fen("rnbqkbnr/ppppp1pp/8/4Pp2/8/8/PPPP1PPP/RNBQKBNR b KQkq - 0 2").unwrap();
        let d5 = Move::new(Square::D7, Square::D5, MoveFlags::DoublePush);
        let mut not_ep_capturable_key = not_ep_capturable.key();
        let mut ep_capturable_key = ep_capturable.key();
        not_ep_capturable_key ^= SIDE_KEY;
        ep_capturable_key ^= SIDE_KEY;
        not_ep_capturable_key ^= PIECE_KEYS[Piece::BP][Square::D7];
        ep_capturable_key ^= PIECE_KEYS[Piece::BP][Square::D7];
        not_ep_capturable_key ^= PIECE_KEYS[Piece::BP][Square::D5];
        ep_capturable_key ^= PIECE_KEYS[Piece::BP][Square::D5];

        ep_capturable_key ^= EP_KEYS[Square::D6];

        assert!(not_ep_capturable.legal_moves().contains(d5));
        not_ep_capturable.make_move(d5);
        assert!(ep_capturable.legal_moves().contains(d5));
        ep_capturable.make_move(d5);

        // the field is set either way, only the hash distinguishes them.
        assert_eq!(not_ep_capturable.ep_sq(), Some(Square::D6));
        assert_eq!(ep_capturable.ep_sq(), Some(Square::D6));

        assert_eq!(not_ep_capturable.key(), not_ep_capturable_key);
        assert_eq!(ep_capturable.key(), ep_capturable_key);
    }

    #[test]
    fn ep_square_clears_after_one_move() {
        let mut board = Board::default();
        board.make_uci_moves(["e2e4"]).unwrap();
        assert_eq!(board.ep_sq(), Some(Square::E3));
        board.make_uci_moves(["g8f6"]).unwrap();
        assert_eq!(board.ep_sq(), None);
    }

    #[test]
    fn en_passant_capture_and_undo() {
        let fen = "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3";
        let mut board = Board::from_fen(fen).unwrap();
        let m = board.parse_uci("e5f6").unwrap();
        assert!(m.is_ep());
        board.make_move(m);
        assert_eq!(board.piece_at(Square::F6), Some(Piece::WP));
        assert_eq!(board.piece_at(Square::F5), None);
        assert_eq!(board.piece_at(Square::E5), None);
        assert_eq!(board.fifty_move_counter(), 0);
        board.unmake_move(m);
        assert_eq!(board.to_string(), fen);
        assert_eq!(board.piece_at(Square::F5), Some(Piece::BP));
    }

    #[test]
    fn castling_moves_the_rook_and_revokes_rights() {
        let fen = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1";
        let mut board = Board::from_fen(fen).unwrap();
        let castle = board.parse_uci("e1g1").unwrap();
        assert_eq!(castle.flags(), MoveFlags::KingCastle);
        board.make_move(castle);
        assert_eq!(board.piece_at(Square::G1), Some(Piece::WK));
        assert_eq!(board.piece_at(Square::F1), Some(Piece::WR));
        assert_eq!(board.piece_at(Square::H1), None);
        assert_eq!(board.castling_rights().to_string(), "kq");

        let long = board.parse_uci("e8c8").unwrap();
        assert_eq!(long.flags(), MoveFlags::QueenCastle);
        board.make_move(long);
        assert_eq!(board.piece_at(Square::C8), Some(Piece::BK));
        assert_eq!(board.piece_at(Square::D8), Some(Piece::BR));
        assert_eq!(board.castling_rights(), CastlingRights::NONE);
        assert_eq!(board.key(), board.generate_key());

        board.unmake_move(long);
        board.unmake_move(castle);
        assert_eq!(board.to_string(), fen);
    }

    #[test]
    fn capturing_a_rook_revokes_its_right() {
        let mut board = Board::from_fen("r3k2r/8/8/8/8/8/6B1/R3K2R w KQkq - 0 1").unwrap();
        board.make_uci_moves(["g2a8"]).unwrap();
        assert_eq!(board.castling_rights().to_string(), "KQk");
        assert_eq!(board.key(), board.generate_key());
    }

    #[test]
    fn promotion_with_capture_and_undo() {
        let fen = "3r3k/4P3/8/8/8/8/8/K7 w - - 5 40";
        let mut board = Board::from_fen(fen).unwrap();
        let m = board.parse_uci("e7d8n").unwrap();
        assert_eq!(m.flags(), MoveFlags::PromoCaptureKnight);
        board.make_move(m);
        assert_eq!(board.piece_at(Square::D8), Some(Piece::WN));
        assert_eq!(board.piece_at(Square::E7), None);
        assert_eq!(board.fifty_move_counter(), 0);
        board.unmake_move(m);
        assert_eq!(board.to_string(), fen);
    }

    #[test]
    fn clocks_advance() {
        let mut board = Board::default();
        board.make_uci_moves(["g1f3", "g8f6", "f3g1"]).unwrap();
        assert_eq!(board.fifty_move_counter(), 3);
        assert_eq!(board.full_move_number(), 2);
        assert_eq!(board.turn(), Colour::Black);
        board.make_uci_moves(["e7e5"]).unwrap();
        assert_eq!(board.fifty_move_counter(), 0);
        assert_eq!(board.full_move_number(), 3);
    }

    #[test]
    #[should_panic(expected = "No move to unmake!")]
    fn unmake_on_empty_history_panics() {
        let mut board = Board::default();
        board.unmake_move(Move::new(Square::E2, Square::E4, MoveFlags::DoublePush));
    }

    #[test]
    fn parse_uci_errors() {
        let mut board = Board::default();
        assert_eq!(board.parse_uci("e2"), Err(MoveParseError::InvalidLength(2)));
        assert_eq!(
            board.parse_uci("i2e4"),
            Err(MoveParseError::InvalidFromSquareFile('i'))
        );
        assert_eq!(
            board.parse_uci("e9e4"),
            Err(MoveParseError::InvalidFromSquareRank('9'))
        );
        assert_eq!(
            board.parse_uci("e2z4"),
            Err(MoveParseError::InvalidToSquareFile('z'))
        );
        assert_eq!(
            board.parse_uci("e2e0"),
            Err(MoveParseError::InvalidToSquareRank('0'))
        );
        assert_eq!(
            board.parse_uci("e2e4k"),
            Err(MoveParseError::InvalidPromotionPiece('k'))
        );
        assert_eq!(
            board.parse_uci("e2e5"),
            Err(MoveParseError::IllegalMove("e2e5".to_string()))
        );
        let m = board.parse_uci("e2e4").unwrap();
        assert!(m.is_double_push());
    }

    #[test]
    fn promotion_needs_its_suffix() {
        let mut board = Board::from_fen("3r3k/4P3/8/8/8/8/8/K7 w - - 0 1").unwrap();
        assert!(matches!(
            board.parse_uci("e7e8"),
            Err(MoveParseError::IllegalMove(_))
        ));
        assert!(board.parse_uci("e7e8q").unwrap().is_promo());
    }

    #[test]
    fn check_detection() {
        let board =
            Board::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3")
                .unwrap();
        assert!(board.in_check());
        let attacks = board.generate_attacks(Colour::Black);
        assert!(board.is_check(Colour::White, attacks));
        assert!(!board.is_check(Colour::Black, board.generate_attacks(Colour::White)));
        assert!(!Board::default().in_check());
    }
}
