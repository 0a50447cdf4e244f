use std::{
    fmt::{self, Display},
    mem::size_of,
};

use crate::chess::{
    piece::{Colour, Piece},
    piecelayout::PieceLayout,
    squareset::SquareSet,
};

#[derive(PartialEq, Eq, Clone, Copy, PartialOrd, Ord, Hash, Debug)]
#[repr(u8)]
pub enum File {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
}

impl File {
    const ALL: [Self; 8] = [
        Self::A,
        Self::B,
        Self::C,
        Self::D,
        Self::E,
        Self::F,
        Self::G,
        Self::H,
    ];

    pub const fn from_index(index: u8) -> Option<Self> {
        if index < 8 { Some(Self::ALL[index as usize]) } else { None }
    }

    pub const fn from_char(c: char) -> Option<Self> {
        if c.is_ascii_lowercase() {
            Self::from_index(c as u8 - b'a')
        } else {
            None
        }
    }

    pub const fn char(self) -> char {
        (b'a' + self as u8) as char
    }

    pub fn all() -> impl DoubleEndedIterator<Item = Self> {
        Self::ALL.into_iter()
    }
}

#[derive(PartialEq, Eq, Clone, Copy, PartialOrd, Ord, Hash, Debug)]
#[repr(u8)]
pub enum Rank {
    One,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
}

impl Rank {
    const ALL: [Self; 8] = [
        Self::One,
        Self::Two,
        Self::Three,
        Self::Four,
        Self::Five,
        Self::Six,
        Self::Seven,
        Self::Eight,
    ];

    pub const fn from_index(index: u8) -> Option<Self> {
        if index < 8 { Some(Self::ALL[index as usize]) } else { None }
    }

    pub const fn from_char(c: char) -> Option<Self> {
        if c.is_ascii_digit() && c != '0' {
            Self::from_index(c as u8 - b'1')
        } else {
            None
        }
    }

    pub const fn char(self) -> char {
        (b'1' + self as u8) as char
    }

    pub fn all() -> impl DoubleEndedIterator<Item = Self> {
        Self::ALL.into_iter()
    }
}

/// Squares numbered rank-major from a1 = 0 to h8 = 63.
#[rustfmt::skip]
#[derive(PartialEq, Eq, Clone, Copy, PartialOrd, Ord, Hash, Debug, Default)]
#[repr(u8)]
pub enum Square {
    #[default]
    A1, B1, C1, D1, E1, F1, G1, H1,
    A2, B2, C2, D2, E2, F2, G2, H2,
    A3, B3, C3, D3, E3, F3, G3, H3,
    A4, B4, C4, D4, E4, F4, G4, H4,
    A5, B5, C5, D5, E5, F5, G5, H5,
    A6, B6, C6, D6, E6, F6, G6, H6,
    A7, B7, C7, D7, E7, F7, G7, H7,
    A8, B8, C8, D8, E8, F8, G8, H8,
}

// lets the mailbox use `Option<Piece>` and moves use `Option<Square>` for free.
const _: () = assert!(size_of::<Option<Square>>() == 1);

impl_enum_index!(Square, 64);

impl Square {
    pub const fn from_rank_file(rank: Rank, file: File) -> Self {
        // SAFETY: rank and file are both below 8, so the index is below 64.
        unsafe { Self::new_unchecked(rank as u8 * 8 + file as u8) }
    }

    pub const fn new(index: u8) -> Option<Self> {
        if index < 64 {
            // SAFETY: checked just above.
            Some(unsafe { Self::new_unchecked(index) })
        } else {
            None
        }
    }

    /// # Safety
    ///
    /// `index` must be below 64.
    pub const unsafe fn new_unchecked(index: u8) -> Self {
        debug_assert!(index < 64);
        // SAFETY: `Square` is `repr(u8)` with variants for every value in `0..64`.
        unsafe { std::mem::transmute::<u8, Self>(index) }
    }

    /// The square seen from the other side of the board: a1 <-> a8.
    pub const fn flip_rank(self) -> Self {
        // SAFETY: flipping bits 3..6 stays within `0..64`.
        unsafe { Self::new_unchecked(self as u8 ^ 0b111_000) }
    }

    pub const fn relative_to(self, side: Colour) -> Self {
        match side {
            Colour::White => self,
            Colour::Black => self.flip_rank(),
        }
    }

    pub const fn file(self) -> File {
        File::ALL[self as usize % 8]
    }

    pub const fn rank(self) -> Rank {
        Rank::ALL[self as usize / 8]
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn inner(self) -> u8 {
        self as u8
    }

    /// The square `offset` indices away, if that is still on the board.
    /// Says nothing about wrapping between files.
    pub const fn add(self, offset: i8) -> Option<Self> {
        #![allow(clippy::cast_sign_loss, clippy::cast_possible_wrap)]
        let res = self as i8 + offset;
        if res < 0 { None } else { Self::new(res as u8) }
    }

    /// # Safety
    ///
    /// `self as i8 + offset` must lie within `0..64`.
    pub const unsafe fn add_unchecked(self, offset: i8) -> Self {
        #![allow(clippy::cast_sign_loss, clippy::cast_possible_wrap)]
        // SAFETY: caller's precondition.
        unsafe { Self::new_unchecked((self as i8 + offset) as u8) }
    }

    pub const fn as_set(self) -> SquareSet {
        SquareSet::from_inner(1 << self as u8)
    }

    pub fn all() -> impl DoubleEndedIterator<Item = Self> {
        // SAFETY: every value in `0..64` is a square.
        (0..64u8).map(|i| unsafe { Self::new_unchecked(i) })
    }

    /// Parses a two-character name like `e4`.
    pub fn from_chars(file: char, rank: char) -> Option<Self> {
        Some(Self::from_rank_file(Rank::from_char(rank)?, File::from_char(file)?))
    }
}

impl Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file().char(), self.rank().char())
    }
}

/// Full state for a chess position, minus the side to move.
/// Everything here is snapshotted or recomputed by make/unmake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State {
    /// The square-sets of all the pieces on the board.
    pub bbs: PieceLayout,
    /// An array to accelerate `Board::piece_at()`.
    pub mailbox: [Option<Piece>; 64],
    /// The en passant square. Set after every double push, whether or not
    /// a capture is available.
    pub ep_square: Option<Square>,
    /// Which castling moves are still permitted.
    pub castle_perm: CastlingRights,
    /// The number of half moves made since the last capture or pawn advance.
    pub fifty_move_counter: u8,
    /// Zobrist hash of the position.
    pub key: u64,
}

impl Default for State {
    fn default() -> Self {
        Self {
            bbs: PieceLayout::default(),
            // curse thee array autoimpls
            mailbox: [None; 64],
            ep_square: None,
            castle_perm: CastlingRights::NONE,
            fifty_move_counter: 0,
            key: 0,
        }
    }
}

/// The four castling rights as a bitmask with named accessors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct CastlingRights {
    data: u8,
}

impl CastlingRights {
    pub const WK: u8 = 0b0001;
    pub const WQ: u8 = 0b0010;
    pub const BK: u8 = 0b0100;
    pub const BQ: u8 = 0b1000;

    pub const NONE: Self = Self { data: 0 };
    pub const ALL: Self = Self { data: 0b1111 };

    /// Rights that survive a move touching each square. Moving from or to
    /// a king or rook home square revokes the rights that depend on it.
    #[rustfmt::skip]
    const KEEP_MASK: [u8; 64] = {
        let mut mask = [0b1111; 64];
        mask[Square::A1.index()] = !Self::WQ & 0b1111;
        mask[Square::H1.index()] = !Self::WK & 0b1111;
        mask[Square::E1.index()] = !(Self::WK | Self::WQ) & 0b1111;
        mask[Square::A8.index()] = !Self::BQ & 0b1111;
        mask[Square::H8.index()] = !Self::BK & 0b1111;
        mask[Square::E8.index()] = !(Self::BK | Self::BQ) & 0b1111;
        mask
    };

    pub const fn bits(self) -> u8 {
        self.data
    }

    pub const fn is_empty(self) -> bool {
        self.data == 0
    }

    pub const fn has(self, flag: u8) -> bool {
        self.data & flag != 0
    }

    pub const fn kingside(self, side: Colour) -> bool {
        match side {
            Colour::White => self.has(Self::WK),
            Colour::Black => self.has(Self::BK),
        }
    }

    pub const fn queenside(self, side: Colour) -> bool {
        match side {
            Colour::White => self.has(Self::WQ),
            Colour::Black => self.has(Self::BQ),
        }
    }

    pub fn set(&mut self, flag: u8) {
        self.data |= flag & 0b1111;
    }

    /// Revokes every right that depends on a piece standing on `from` or `to`.
    pub const fn after_move(self, from: Square, to: Square) -> Self {
        Self {
            data: self.data & Self::KEEP_MASK[from.index()] & Self::KEEP_MASK[to.index()],
        }
    }
}

impl Display for CastlingRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "-");
        }
        for (flag, c) in [(Self::WK, 'K'), (Self::WQ, 'Q'), (Self::BK, 'k'), (Self::BQ, 'q')] {
            if self.has(flag) {
                write!(f, "{c}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_geometry() {
        assert_eq!(Square::A1.flip_rank(), Square::A8);
        assert_eq!(Square::H8.flip_rank(), Square::H1);
        assert_eq!(Square::C2.relative_to(Colour::White), Square::C2);
        assert_eq!(Square::C2.relative_to(Colour::Black), Square::C7);
        assert_eq!(Square::G7.file(), File::G);
        assert_eq!(Square::G7.rank(), Rank::Seven);
        assert_eq!(Square::from_rank_file(Rank::Four, File::E), Square::E4);
    }

    #[test]
    fn square_names() {
        for sq in Square::all() {
            let name = sq.to_string();
            let mut chars = name.chars();
            let (file, rank) = (chars.next().unwrap(), chars.next().unwrap());
            assert_eq!(Square::from_chars(file, rank), Some(sq));
        }
        assert_eq!(Square::E4.to_string(), "e4");
        assert_eq!(Square::from_chars('i', '1'), None);
        assert_eq!(Square::from_chars('a', '9'), None);
        assert_eq!(Square::from_chars('a', '0'), None);
    }

    #[test]
    fn square_offsets_stay_on_board() {
        assert_eq!(Square::E2.add(8), Some(Square::E3));
        assert_eq!(Square::E7.add(-8), Some(Square::E6));
        assert_eq!(Square::A1.add(-8), None);
        assert_eq!(Square::H8.add(8), None);
        assert_eq!(Square::new(64), None);
    }

    #[test]
    fn rook_and_king_moves_revoke_rights() {
        let rights = CastlingRights::ALL;

        let after_h1 = rights.after_move(Square::H1, Square::H4);
        assert!(!after_h1.kingside(Colour::White));
        assert!(after_h1.queenside(Colour::White));
        assert!(after_h1.kingside(Colour::Black));

        let after_king = rights.after_move(Square::E8, Square::E7);
        assert!(!after_king.kingside(Colour::Black));
        assert!(!after_king.queenside(Colour::Black));
        assert!(after_king.kingside(Colour::White) && after_king.queenside(Colour::White));

        // capturing onto a rook's home square revokes that rook's right too.
        let after_capture = rights.after_move(Square::B7, Square::A8);
        assert!(!after_capture.queenside(Colour::Black));
        assert!(after_capture.kingside(Colour::Black));

        assert_eq!(rights.after_move(Square::D2, Square::D4), rights);
    }

    #[test]
    fn rights_display() {
        let mut rights = CastlingRights::NONE;
        rights.set(CastlingRights::WK | CastlingRights::BQ);
        assert_eq!(rights.to_string(), "Kq");
        assert!(rights.kingside(Colour::White) && !rights.queenside(Colour::White));
        assert_eq!(rights.bits(), 0b1001);
        assert_eq!(CastlingRights::NONE.to_string(), "-");
        assert_eq!(CastlingRights::ALL.to_string(), "KQkq");
    }
}
