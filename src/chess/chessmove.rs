use std::fmt::{Debug, Display, Formatter};

use crate::{
    chess::{piece::PieceType, types::Square},
    errors::MoveError,
};

/// The four-bit move kind. Bit 2 marks captures and bit 3 marks promotions,
/// with the low two bits of a promotion selecting the piece.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
#[repr(u8)]
pub enum MoveFlags {
    Quiet = 0b0000,
    DoublePush = 0b0001,
    KingCastle = 0b0010,
    QueenCastle = 0b0011,
    Capture = 0b0100,
    EnPassant = 0b0101,
    PromoKnight = 0b1000,
    PromoBishop = 0b1001,
    PromoRook = 0b1010,
    PromoQueen = 0b1011,
    PromoCaptureKnight = 0b1100,
    PromoCaptureBishop = 0b1101,
    PromoCaptureRook = 0b1110,
    PromoCaptureQueen = 0b1111,
}

impl MoveFlags {
    const CAPTURE_BIT: u8 = 0b0100;
    const PROMO_BIT: u8 = 0b1000;

    pub const fn from_bits(bits: u8) -> Result<Self, MoveError> {
        Ok(match bits {
            0b0000 => Self::Quiet,
            0b0001 => Self::DoublePush,
            0b0010 => Self::KingCastle,
            0b0011 => Self::QueenCastle,
            0b0100 => Self::Capture,
            0b0101 => Self::EnPassant,
            0b1000 => Self::PromoKnight,
            0b1001 => Self::PromoBishop,
            0b1010 => Self::PromoRook,
            0b1011 => Self::PromoQueen,
            0b1100 => Self::PromoCaptureKnight,
            0b1101 => Self::PromoCaptureBishop,
            0b1110 => Self::PromoCaptureRook,
            0b1111 => Self::PromoCaptureQueen,
            _ => return Err(MoveError::InvalidFlag(bits)),
        })
    }

    /// The promotion flag for `piece_type`, with or without a capture.
    pub const fn promotion(piece_type: PieceType, capture: bool) -> Option<Self> {
        let low = match piece_type {
            PieceType::Knight => 0b00,
            PieceType::Bishop => 0b01,
            PieceType::Rook => 0b10,
            PieceType::Queen => 0b11,
            _ => return None,
        };
        let bits = Self::PROMO_BIT | if capture { Self::CAPTURE_BIT } else { 0 } | low;
        match Self::from_bits(bits) {
            Ok(flag) => Some(flag),
            Err(_) => None,
        }
    }

    pub const fn bits(self) -> u8 {
        self as u8
    }
}

/// A packed move: `flag:4 | from:6 | to:6`, high bits first.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Move {
    data: u16,
}

impl Move {
    const TO_MASK: u16 = 0b0000_0000_0011_1111;
    const FROM_MASK: u16 = 0b0000_1111_1100_0000;
    const FROM_SHIFT: u16 = 6;
    const FLAG_SHIFT: u16 = 12;

    pub const fn new(from: Square, to: Square, flag: MoveFlags) -> Self {
        Self {
            data: (flag as u16) << Self::FLAG_SHIFT
                | (from as u16) << Self::FROM_SHIFT
                | to as u16,
        }
    }

    /// Builds a move from raw square indices, rejecting anything off the board.
    pub const fn from_indices(from: u8, to: u8, flag: MoveFlags) -> Result<Self, MoveError> {
        let Some(from) = Square::new(from) else {
            return Err(MoveError::SquareOutOfRange(from));
        };
        let Some(to) = Square::new(to) else {
            return Err(MoveError::SquareOutOfRange(to));
        };
        Ok(Self::new(from, to, flag))
    }

    /// Decodes a packed move, rejecting unassigned flag codes.
    pub const fn from_raw(data: u16) -> Result<Self, MoveError> {
        #![allow(clippy::cast_possible_truncation)]
        match MoveFlags::from_bits((data >> Self::FLAG_SHIFT) as u8) {
            Ok(_) => Ok(Self { data }),
            Err(e) => Err(e),
        }
    }

    pub const fn inner(self) -> u16 {
        self.data
    }

    pub const fn from(self) -> Square {
        #![allow(clippy::cast_possible_truncation)]
        // SAFETY: the from field is six bits wide.
        unsafe { Square::new_unchecked(((self.data & Self::FROM_MASK) >> Self::FROM_SHIFT) as u8) }
    }

    pub const fn to(self) -> Square {
        #![allow(clippy::cast_possible_truncation)]
        // SAFETY: the to field is six bits wide.
        unsafe { Square::new_unchecked((self.data & Self::TO_MASK) as u8) }
    }

    pub const fn flag_bits(self) -> u8 {
        #![allow(clippy::cast_possible_truncation)]
        (self.data >> Self::FLAG_SHIFT) as u8
    }

    pub const fn flags(self) -> MoveFlags {
        match MoveFlags::from_bits(self.flag_bits()) {
            Ok(flag) => flag,
            Err(_) => panic!("move constructed with an unassigned flag"),
        }
    }

    pub const fn is_capture(self) -> bool {
        self.flag_bits() & MoveFlags::CAPTURE_BIT != 0
    }

    pub const fn is_promo(self) -> bool {
        self.flag_bits() & MoveFlags::PROMO_BIT != 0
    }

    pub const fn is_ep(self) -> bool {
        matches!(self.flags(), MoveFlags::EnPassant)
    }

    pub const fn is_double_push(self) -> bool {
        matches!(self.flags(), MoveFlags::DoublePush)
    }

    pub const fn is_castle(self) -> bool {
        matches!(self.flags(), MoveFlags::KingCastle | MoveFlags::QueenCastle)
    }

    pub const fn is_kingside_castling(self) -> bool {
        matches!(self.flags(), MoveFlags::KingCastle)
    }

    pub const fn is_queenside_castling(self) -> bool {
        matches!(self.flags(), MoveFlags::QueenCastle)
    }

    pub const fn promotion_type(self) -> Option<PieceType> {
        if self.is_promo() {
            // knight, bishop, rook, queen follow pawn in `PieceType`.
            PieceType::new((self.flag_bits() & 0b11) + 1)
        } else {
            None
        }
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}{}", self.from(), self.to())?;
        if let Some(pchar) = self.promotion_type().and_then(PieceType::promo_char) {
            write!(f, "{pchar}")?;
        }
        Ok(())
    }
}

impl Debug for Move {
    fn fmt(&self, f: &mut Formatter) -> Result<(), std::fmt::Error> {
        write!(f, "{} ({:?})", self, self.flags())
    }
}
