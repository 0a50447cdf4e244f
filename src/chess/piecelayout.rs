use std::fmt::Display;

use crate::chess::{
    board::movegen::{king_attacks, knight_attacks, pawn_attacks_by, pawn_attacks_from},
    magic::{bishop_attacks, rook_attacks},
    piece::{Colour, Piece, PieceType},
    squareset::SquareSet,
    types::{File, Rank, Square},
};

/// The bitboard half of a position: one set per piece type and one per colour.
/// A piece on a square sets that square in exactly one type set and one colour set.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct PieceLayout {
    pub pieces: [SquareSet; 6],
    pub colours: [SquareSet; 2],
}

impl PieceLayout {
    pub fn occupied(&self) -> SquareSet {
        self.colours[Colour::White] | self.colours[Colour::Black]
    }

    pub fn empty(&self) -> SquareSet {
        !self.occupied()
    }

    fn toggle(&mut self, squares: SquareSet, piece: Piece) {
        self.pieces[piece.piece_type()] ^= squares;
        self.colours[piece.colour()] ^= squares;
    }

    pub fn move_piece(&mut self, from: Square, to: Square, piece: Piece) {
        self.toggle(from.as_set() | to.as_set(), piece);
    }

    pub fn set_piece_at(&mut self, sq: Square, piece: Piece) {
        debug_assert!(!self.occupied().contains_square(sq), "{sq} is already occupied");
        self.toggle(sq.as_set(), piece);
    }

    pub fn clear_piece_at(&mut self, sq: Square, piece: Piece) {
        debug_assert!(self.piece_bb(piece).contains_square(sq), "no {piece} on {sq}");
        self.toggle(sq.as_set(), piece);
    }

    pub fn piece_bb(&self, piece: Piece) -> SquareSet {
        self.pieces[piece.piece_type()] & self.colours[piece.colour()]
    }

    fn diagonal_sliders(&self) -> SquareSet {
        self.pieces[PieceType::Bishop] | self.pieces[PieceType::Queen]
    }

    fn orthogonal_sliders(&self) -> SquareSet {
        self.pieces[PieceType::Rook] | self.pieces[PieceType::Queen]
    }

    /// Every square attacked by `side`, ignoring pins and whose turn it is.
    pub fn attacks_by(&self, side: Colour) -> SquareSet {
        let ours = self.colours[side];
        let occupied = self.occupied();

        let mut attacks = pawn_attacks_by(self.pieces[PieceType::Pawn] & ours, side);
        for sq in self.pieces[PieceType::Knight] & ours {
            attacks |= knight_attacks(sq);
        }
        for sq in self.diagonal_sliders() & ours {
            attacks |= bishop_attacks(sq, occupied);
        }
        for sq in self.orthogonal_sliders() & ours {
            attacks |= rook_attacks(sq, occupied);
        }
        for sq in self.pieces[PieceType::King] & ours {
            attacks |= king_attacks(sq);
        }

        attacks
    }

    /// Whether any piece of `side` attacks `sq`. Works backwards from the
    /// target: a piece attacks `sq` exactly when the same kind of piece on
    /// `sq` would attack it.
    pub fn sq_attacked(&self, sq: Square, side: Colour) -> bool {
        let theirs = self.colours[side];
        let occupied = self.occupied();

        (pawn_attacks_from(sq, !side) & self.pieces[PieceType::Pawn] & theirs).non_empty()
            || (knight_attacks(sq) & self.pieces[PieceType::Knight] & theirs).non_empty()
            || (king_attacks(sq) & self.pieces[PieceType::King] & theirs).non_empty()
            || (bishop_attacks(sq, occupied) & self.diagonal_sliders() & theirs).non_empty()
            || (rook_attacks(sq, occupied) & self.orthogonal_sliders() & theirs).non_empty()
    }

    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        let colour = Colour::all().find(|&c| self.colours[c].contains_square(sq))?;
        let piece_type = PieceType::all().find(|&pt| self.pieces[pt].contains_square(sq))?;
        Some(Piece::new(colour, piece_type))
    }

    /// True if some square is claimed by two colours or two piece types.
    pub fn any_bbs_overlapping(&self) -> bool {
        let colour_total: u32 = self.colours.iter().map(|bb| bb.count()).sum();
        let piece_total: u32 = self.pieces.iter().map(|bb| bb.count()).sum();
        let occupied = self.occupied().count();
        colour_total != occupied || piece_total != occupied
    }

    pub fn visit_pieces(&self, mut callback: impl FnMut(Square, Piece)) {
        for sq in self.occupied() {
            if let Some(piece) = self.piece_at(sq) {
                callback(sq, piece);
            }
        }
    }

    pub fn king_sq(&self, colour: Colour) -> Option<Square> {
        self.piece_bb(Piece::new(colour, PieceType::King)).first()
    }
}

impl Display for PieceLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for rank in Rank::all().rev() {
            for file in File::all() {
                let c = self
                    .piece_at(Square::from_rank_file(rank, file))
                    .map_or('.', Piece::char);
                write!(f, " {c}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
