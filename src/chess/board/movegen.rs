use arrayvec::ArrayVec;

use std::{
    fmt::{Display, Formatter},
    ops::{Deref, DerefMut},
};

use crate::chess::{
    board::Board,
    chessmove::{Move, MoveFlags},
    magic::{bishop_attacks, rook_attacks},
    piece::{Black, Col, Colour, PieceType, White},
    squareset::SquareSet,
    types::Square,
};

/// The largest number of legal moves in any reachable position is 218;
/// pseudo-legal lists can run a little longer.
pub const MAX_POSITION_MOVES: usize = 256;

/// Promotion pieces, in the order they are generated.
const PROMOTIONS: [PieceType; 4] = [
    PieceType::Queen,
    PieceType::Knight,
    PieceType::Rook,
    PieceType::Bishop,
];

#[derive(Clone, Debug, Default)]
pub struct MoveList {
    inner: ArrayVec<Move, MAX_POSITION_MOVES>,
}

impl MoveList {
    pub fn new() -> Self {
        Self {
            inner: ArrayVec::new(),
        }
    }

    pub fn push(&mut self, m: Move) {
        self.inner.push(m);
    }

    /// Removes the move at `index` by overwriting it with the last move.
    /// Does not preserve order.
    pub fn swap_remove(&mut self, index: usize) -> Move {
        self.inner.swap_remove(index)
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }

    pub fn contains(&self, m: Move) -> bool {
        self.inner.contains(&m)
    }
}

impl Deref for MoveList {
    type Target = [Move];

    fn deref(&self) -> &[Move] {
        &self.inner
    }
}

impl DerefMut for MoveList {
    fn deref_mut(&mut self) -> &mut [Move] {
        &mut self.inner
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}

impl Display for MoveList {
    fn fmt(&self, f: &mut Formatter) -> Result<(), std::fmt::Error> {
        write!(f, "MoveList: ({}) [", self.inner.len())?;
        for (i, m) in self.inner.iter().enumerate() {
            if i != 0 {
                write!(f, ", ")?;
            }
            write!(f, "{m}")?;
        }
        write!(f, "]")
    }
}

const fn init_jumping_attacks<const IS_KNIGHT: bool>() -> [SquareSet; 64] {
    let mut attacks = [SquareSet::EMPTY; 64];

    cfor!(let mut sq = 0; sq < 64; sq += 1; {
        let bb = SquareSet::from_inner(1 << sq);
        attacks[sq] = if IS_KNIGHT {
            bb.north_one().north_east_one()
                .union(bb.north_one().north_west_one())
                .union(bb.south_one().south_east_one())
                .union(bb.south_one().south_west_one())
                .union(bb.east_one().north_east_one())
                .union(bb.east_one().south_east_one())
                .union(bb.west_one().north_west_one())
                .union(bb.west_one().south_west_one())
        } else {
            bb.north_one()
                .union(bb.south_one())
                .union(bb.east_one())
                .union(bb.west_one())
                .union(bb.north_east_one())
                .union(bb.north_west_one())
                .union(bb.south_east_one())
                .union(bb.south_west_one())
        };
    });

    attacks
}

const fn init_pawn_attacks() -> [[SquareSet; 64]; 2] {
    let mut attacks = [[SquareSet::EMPTY; 64]; 2];

    cfor!(let mut sq = 0; sq < 64; sq += 1; {
        let bb = SquareSet::from_inner(1 << sq);
        attacks[Colour::White as usize][sq] = bb.north_east_one().union(bb.north_west_one());
        attacks[Colour::Black as usize][sq] = bb.south_east_one().union(bb.south_west_one());
    });

    attacks
}

static KNIGHT_ATTACKS: [SquareSet; 64] = init_jumping_attacks::<true>();
static KING_ATTACKS: [SquareSet; 64] = init_jumping_attacks::<false>();
static PAWN_ATTACKS: [[SquareSet; 64]; 2] = init_pawn_attacks();

pub fn knight_attacks(sq: Square) -> SquareSet {
    KNIGHT_ATTACKS[sq]
}
pub fn king_attacks(sq: Square) -> SquareSet {
    KING_ATTACKS[sq]
}
/// Squares attacked by a `colour` pawn standing on `sq`.
pub fn pawn_attacks_from(sq: Square, colour: Colour) -> SquareSet {
    PAWN_ATTACKS[colour][sq]
}
/// Set-wise pawn attacks of all pawns in `bb`.
pub fn pawn_attacks<C: Col>(bb: SquareSet) -> SquareSet {
    if C::WHITE {
        bb.north_east_one() | bb.north_west_one()
    } else {
        bb.south_east_one() | bb.south_west_one()
    }
}
pub fn pawn_attacks_by(bb: SquareSet, colour: Colour) -> SquareSet {
    match colour {
        Colour::White => pawn_attacks::<White>(bb),
        Colour::Black => pawn_attacks::<Black>(bb),
    }
}

impl Board {
    fn push_promotions(move_list: &mut MoveList, from: Square, to: Square, capture: bool) {
        for promo in PROMOTIONS {
            if let Some(flag) = MoveFlags::promotion(promo, capture) {
                move_list.push(Move::new(from, to, flag));
            }
        }
    }

    fn generate_pawn_forward<C: Col>(&self, move_list: &mut MoveList) {
        let bbs = &self.state.bbs;
        let our_pawns = bbs.pieces[PieceType::Pawn] & bbs.colours[C::COLOUR];
        let empty = bbs.empty();

        // shift the empty squares backwards to find pawns that can step into them.
        let (one_back, two_back) = if C::WHITE {
            (empty.south_one(), empty.south_one().south_one())
        } else {
            (empty.north_one(), empty.north_one().north_one())
        };
        let pushable_pawns = our_pawns & one_back;
        let double_pushable_pawns = pushable_pawns & two_back & C::START_RANK;
        let promoting_pawns = pushable_pawns & C::PROMO_RANK;

        for from in pushable_pawns & !promoting_pawns {
            // SAFETY: the destination was found by shifting, so it is on the board.
            let to = unsafe { from.add_unchecked(C::PAWN_FWD_OFFSET) };
            move_list.push(Move::new(from, to, MoveFlags::Quiet));
        }
        for from in double_pushable_pawns {
            // SAFETY: as above, both squares in front are on the board.
            let to = unsafe { from.add_unchecked(C::PAWN_DOUBLE_OFFSET) };
            move_list.push(Move::new(from, to, MoveFlags::DoublePush));
        }
        for from in promoting_pawns {
            // SAFETY: as above.
            let to = unsafe { from.add_unchecked(C::PAWN_FWD_OFFSET) };
            Self::push_promotions(move_list, from, to, false);
        }
    }

    fn generate_pawn_caps<C: Col>(&self, move_list: &mut MoveList) {
        #![allow(clippy::useless_let_if_seq)]

        let bbs = &self.state.bbs;
        let our_pawns = bbs.pieces[PieceType::Pawn] & bbs.colours[C::COLOUR];
        let targets = bbs.colours[!C::COLOUR];

        let attacking_west;
        let attacking_east;

        // to determine which pawns can capture,
        // we shift the opponent's pieces backwards and find the intersection.
        if C::WHITE {
            attacking_west = targets.south_east_one() & our_pawns;
            attacking_east = targets.south_west_one() & our_pawns;
        } else {
            attacking_west = targets.north_east_one() & our_pawns;
            attacking_east = targets.north_west_one() & our_pawns;
        }

        for (pawns, offset) in [
            (attacking_west, C::PAWN_LEFT_OFFSET),
            (attacking_east, C::PAWN_RIGHT_OFFSET),
        ] {
            for from in pawns {
                // SAFETY: masking guarantees a valid square
                let to = unsafe { from.add_unchecked(offset) };
                if C::PROMO_RANK.contains_square(from) {
                    Self::push_promotions(move_list, from, to, true);
                } else {
                    move_list.push(Move::new(from, to, MoveFlags::Capture));
                }
            }
        }
    }

    fn generate_ep<C: Col>(&self, move_list: &mut MoveList) {
        let Some(ep_sq) = self.state.ep_square else {
            return;
        };

        let our_pawns = self.state.bbs.pieces[PieceType::Pawn] & self.state.bbs.colours[C::COLOUR];
        // a pawn of ours attacks the ep square iff an enemy pawn there would attack it.
        let attackers = pawn_attacks_from(ep_sq, !C::COLOUR) & our_pawns;

        for from in attackers {
            move_list.push(Move::new(from, ep_sq, MoveFlags::EnPassant));
        }
    }

    fn push_piece_moves(&self, move_list: &mut MoveList, from: Square, attacks: SquareSet) {
        let bbs = &self.state.bbs;
        let their_pieces = bbs.colours[!self.side];
        for to in attacks & !bbs.colours[self.side] {
            let flag = if their_pieces.contains_square(to) {
                MoveFlags::Capture
            } else {
                MoveFlags::Quiet
            };
            move_list.push(Move::new(from, to, flag));
        }
    }

    /// Castling requires the right, an empty path between king and rook, and
    /// no attack on the king's start, transit, or destination square.
    fn generate_castling_moves_for<C: Col>(&self, move_list: &mut MoveList) {
        let rights = self.state.castle_perm;
        let kingside = rights.kingside(C::COLOUR);
        let queenside = rights.queenside(C::COLOUR);
        if !kingside && !queenside {
            return;
        }

        let occupied = self.state.bbs.occupied();
        let king_from = Square::E1.relative_to(C::COLOUR);
        let enemy_attacks = self.generate_attacks(C::Opposite::COLOUR);

        if enemy_attacks.contains_square(king_from) {
            return;
        }

        if kingside {
            let path = (Square::F1.as_set() | Square::G1.as_set()).relative_to(C::COLOUR);
            let king_to = Square::G1.relative_to(C::COLOUR);
            if (occupied & path).is_empty() && (enemy_attacks & path).is_empty() {
                move_list.push(Move::new(king_from, king_to, MoveFlags::KingCastle));
            }
        }

        if queenside {
            let between = (Square::B1.as_set() | Square::C1.as_set() | Square::D1.as_set())
                .relative_to(C::COLOUR);
            let king_path = (Square::C1.as_set() | Square::D1.as_set()).relative_to(C::COLOUR);
            let king_to = Square::C1.relative_to(C::COLOUR);
            if (occupied & between).is_empty() && (enemy_attacks & king_path).is_empty() {
                move_list.push(Move::new(king_from, king_to, MoveFlags::QueenCastle));
            }
        }
    }

    /// Generates every pseudo-legal move for the side to move.
    /// Moves that leave the king in check are included.
    pub fn generate_moves(&self, move_list: &mut MoveList) {
        move_list.clear();
        match self.side {
            Colour::White => self.generate_moves_for::<White>(move_list),
            Colour::Black => self.generate_moves_for::<Black>(move_list),
        }
    }

    fn generate_moves_for<C: Col>(&self, move_list: &mut MoveList) {
        use PieceType::{Bishop, King, Knight, Queen, Rook};

        let bbs = &self.state.bbs;
        let our_pieces = bbs.colours[C::COLOUR];
        let blockers = bbs.occupied();

        self.generate_pawn_forward::<C>(move_list);
        self.generate_pawn_caps::<C>(move_list);
        self.generate_ep::<C>(move_list);

        // knights
        for sq in bbs.pieces[Knight] & our_pieces {
            self.push_piece_moves(move_list, sq, knight_attacks(sq));
        }

        // bishops and queens
        for sq in (bbs.pieces[Queen] | bbs.pieces[Bishop]) & our_pieces {
            self.push_piece_moves(move_list, sq, bishop_attacks(sq, blockers));
        }

        // rooks and queens
        for sq in (bbs.pieces[Queen] | bbs.pieces[Rook]) & our_pieces {
            self.push_piece_moves(move_list, sq, rook_attacks(sq, blockers));
        }

        // kings
        for sq in bbs.pieces[King] & our_pieces {
            self.push_piece_moves(move_list, sq, king_attacks(sq));
        }

        self.generate_castling_moves_for::<C>(move_list);
    }

    /// Union of every square attacked by `side`. Used only for attack tests,
    /// never to generate moves.
    pub fn generate_attacks(&self, side: Colour) -> SquareSet {
        self.state.bbs.attacks_by(side)
    }

    /// Generates the legal moves for the side to move.
    ///
    /// Each pseudo-legal candidate is made, tested for leaving the mover's
    /// king attacked, and unmade. Failing candidates are swap-removed, so the
    /// order of the list is not meaningful.
    pub fn legal_moves(&mut self) -> MoveList {
        let mut move_list = MoveList::new();
        self.generate_moves(&mut move_list);

        let us = self.side;
        let mut index = 0;
        while index < move_list.len() {
            let m = move_list[index];
            self.make_move(m);
            let enemy_attacks = self.generate_attacks(!us);
            let illegal = self.is_check(us, enemy_attacks);
            self.unmake_move(m);
            if illegal {
                move_list.swap_remove(index);
            } else {
                index += 1;
            }
        }

        move_list
    }
}
