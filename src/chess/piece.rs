use std::{
    fmt::{Debug, Display},
    mem::size_of,
    ops::Not,
};

use crate::chess::squareset::SquareSet;

/// A side known at compile time. Pawn code is written once against this
/// trait and instantiated for [`White`] and [`Black`].
pub trait Col {
    type Opposite: Col;
    const WHITE: bool;
    const COLOUR: Colour;

    /// Index offset of a single push. Double pushes are twice this.
    const PAWN_FWD_OFFSET: i8;
    const PAWN_DOUBLE_OFFSET: i8 = 2 * Self::PAWN_FWD_OFFSET;
    /// Index offsets of captures towards the a-file and the h-file.
    const PAWN_LEFT_OFFSET: i8 = Self::PAWN_FWD_OFFSET - 1;
    const PAWN_RIGHT_OFFSET: i8 = Self::PAWN_FWD_OFFSET + 1;

    /// Where unmoved pawns stand.
    const START_RANK: SquareSet;
    /// Pawns here promote on their next step.
    const PROMO_RANK: SquareSet;
}

pub struct White;
pub struct Black;

impl Col for White {
    type Opposite = Black;
    const WHITE: bool = true;
    const COLOUR: Colour = Colour::White;
    const PAWN_FWD_OFFSET: i8 = 8;
    const START_RANK: SquareSet = SquareSet::RANK_2;
    const PROMO_RANK: SquareSet = SquareSet::RANK_7;
}

impl Col for Black {
    type Opposite = White;
    const WHITE: bool = false;
    const COLOUR: Colour = Colour::Black;
    const PAWN_FWD_OFFSET: i8 = -8;
    const START_RANK: SquareSet = SquareSet::RANK_7;
    const PROMO_RANK: SquareSet = SquareSet::RANK_2;
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
#[repr(u8)]
pub enum Colour {
    White,
    Black,
}

impl Colour {
    pub const fn flip(self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    pub fn all() -> impl DoubleEndedIterator<Item = Self> {
        [Self::White, Self::Black].into_iter()
    }
}

impl Not for Colour {
    type Output = Self;

    fn not(self) -> Self {
        self.flip()
    }
}

impl Display for Colour {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::White => "white",
            Self::Black => "black",
        })
    }
}

#[allow(clippy::module_name_repetitions)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
#[repr(u8)]
pub enum PieceType {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

// the niche keeps `Option<PieceType>` (and so the mailbox) a byte per square.
const _: () = assert!(size_of::<Option<PieceType>>() == 1);

impl PieceType {
    const ALL: [Self; 6] = [
        Self::Pawn,
        Self::Knight,
        Self::Bishop,
        Self::Rook,
        Self::Queen,
        Self::King,
    ];

    pub const fn new(index: u8) -> Option<Self> {
        if (index as usize) < Self::ALL.len() {
            Some(Self::ALL[index as usize])
        } else {
            None
        }
    }

    pub fn all() -> impl DoubleEndedIterator<Item = Self> {
        Self::ALL.into_iter()
    }

    /// The lowercase letter used for this piece in FEN and move text.
    pub const fn symbol(self) -> char {
        b"pnbrqk"[self as usize] as char
    }

    /// The suffix of a promotion move, if this piece can be promoted to.
    pub const fn promo_char(self) -> Option<char> {
        match self {
            Self::Pawn | Self::King => None,
            _ => Some(self.symbol()),
        }
    }

    pub const fn from_promo_char(c: char) -> Option<Self> {
        match c {
            'n' => Some(Self::Knight),
            'b' => Some(Self::Bishop),
            'r' => Some(Self::Rook),
            'q' => Some(Self::Queen),
            _ => None,
        }
    }
}

impl Display for PieceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Debug::fmt(self, f)
    }
}

/// A coloured piece. The discriminant is `type << 1 | colour`.
#[rustfmt::skip]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Default, Hash)]
#[repr(u8)]
pub enum Piece {
    #[default]
    WP, BP,
    WN, BN,
    WB, BB,
    WR, BR,
    WQ, BQ,
    WK, BK,
}

const _: () = assert!(size_of::<Option<Piece>>() == 1);

impl Piece {
    #[rustfmt::skip]
    const ALL: [Self; 12] = [
        Self::WP, Self::BP,
        Self::WN, Self::BN,
        Self::WB, Self::BB,
        Self::WR, Self::BR,
        Self::WQ, Self::BQ,
        Self::WK, Self::BK,
    ];

    pub const fn new(colour: Colour, piece_type: PieceType) -> Self {
        Self::ALL[(piece_type as usize) << 1 | colour as usize]
    }

    pub const fn colour(self) -> Colour {
        if self as u8 & 1 == 0 {
            Colour::White
        } else {
            Colour::Black
        }
    }

    pub const fn piece_type(self) -> PieceType {
        PieceType::ALL[self as usize >> 1]
    }

    /// FEN letter: uppercase for white, lowercase for black.
    pub const fn char(self) -> char {
        let c = self.piece_type().symbol();
        match self.colour() {
            Colour::White => c.to_ascii_uppercase(),
            Colour::Black => c,
        }
    }

    pub const fn from_char(c: char) -> Option<Self> {
        let colour = if c.is_ascii_uppercase() {
            Colour::White
        } else {
            Colour::Black
        };
        let piece_type = match c.to_ascii_lowercase() {
            'p' => PieceType::Pawn,
            'n' => PieceType::Knight,
            'b' => PieceType::Bishop,
            'r' => PieceType::Rook,
            'q' => PieceType::Queen,
            'k' => PieceType::King,
            _ => return None,
        };
        Some(Self::new(colour, piece_type))
    }

    pub fn all() -> impl DoubleEndedIterator<Item = Self> {
        Self::ALL.into_iter()
    }
}

impl Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.char())
    }
}

impl_enum_index!(Colour, 2);
impl_enum_index!(PieceType, 6);
impl_enum_index!(Piece, 12);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn piece_construction_and_decomposition() {
        for colour in Colour::all() {
            for piece_type in PieceType::all() {
                let piece = Piece::new(colour, piece_type);
                assert_eq!(piece.colour(), colour, "colour mismatch for {piece:?}");
                assert_eq!(piece.piece_type(), piece_type, "type mismatch for {piece:?}");
            }
        }
        assert_eq!(Piece::new(Colour::Black, PieceType::Queen), Piece::BQ);
        assert_eq!(Piece::all().count(), 12);
    }

    #[test]
    fn fen_letters() {
        for piece in Piece::all() {
            let c = piece.char();
            assert_eq!(Piece::from_char(c), Some(piece));
            assert_eq!(c.is_ascii_uppercase(), piece.colour() == Colour::White);
        }
        assert_eq!(Piece::WN.char(), 'N');
        assert_eq!(Piece::BK.char(), 'k');
        assert_eq!(Piece::from_char('x'), None);
        assert_eq!(Piece::from_char('1'), None);
    }

    #[test]
    fn promotion_letters() {
        for pt in PieceType::all() {
            match pt.promo_char() {
                Some(c) => assert_eq!(PieceType::from_promo_char(c), Some(pt)),
                None => assert!(matches!(pt, PieceType::Pawn | PieceType::King)),
            }
        }
        assert_eq!(PieceType::from_promo_char('k'), None);
        assert_eq!(PieceType::new(4), Some(PieceType::Queen));
        assert_eq!(PieceType::new(6), None);
    }

    #[test]
    fn pawn_offsets_mirror() {
        assert_eq!(White::PAWN_FWD_OFFSET, -Black::PAWN_FWD_OFFSET);
        assert_eq!(White::PAWN_DOUBLE_OFFSET, -Black::PAWN_DOUBLE_OFFSET);
        assert_eq!((White::PAWN_LEFT_OFFSET, White::PAWN_RIGHT_OFFSET), (7, 9));
        assert_eq!((Black::PAWN_LEFT_OFFSET, Black::PAWN_RIGHT_OFFSET), (-9, -7));
        assert_eq!(White::START_RANK.relative_to(Colour::Black), Black::START_RANK);
        assert_eq!(White::PROMO_RANK.relative_to(Colour::Black), Black::PROMO_RANK);
    }
}
