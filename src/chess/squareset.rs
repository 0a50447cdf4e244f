use std::{
    fmt::Display,
    ops::{
        BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not, Sub, SubAssign,
    },
};

use crate::chess::{piece::Colour, types::Square};

/// A bitboard: one bit per square, with bit `n` standing for `Square::new(n)`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct SquareSet {
    inner: u64,
}

impl SquareSet {
    pub const EMPTY: Self = Self::from_inner(0);

    pub const RANK_1: Self = Self::from_inner(0xFF);
    pub const RANK_2: Self = Self::from_inner(0xFF << 8);
    pub const RANK_7: Self = Self::from_inner(0xFF << 48);
    pub const RANK_8: Self = Self::from_inner(0xFF << 56);
    pub const FILE_A: Self = Self::from_inner(0x0101_0101_0101_0101);
    pub const FILE_H: Self = Self::from_inner(0x8080_8080_8080_8080);

    pub const fn from_inner(inner: u64) -> Self {
        Self { inner }
    }

    pub const fn inner(self) -> u64 {
        self.inner
    }

    pub const fn count(self) -> u32 {
        self.inner.count_ones()
    }

    pub const fn union(self, other: Self) -> Self {
        Self::from_inner(self.inner | other.inner)
    }

    pub const fn contains_square(self, square: Square) -> bool {
        self.inner >> square.index() & 1 != 0
    }

    pub const fn add_square(self, square: Square) -> Self {
        Self::from_inner(self.inner | 1 << square.index())
    }

    pub const fn remove_square(self, square: Square) -> Self {
        Self::from_inner(self.inner & !(1 << square.index()))
    }

    /// Squares in ascending index order, A1 first.
    pub const fn iter(self) -> SquareIter {
        SquareIter { bits: self.inner }
    }

    /// The lowest-indexed square in the set.
    #[allow(clippy::cast_possible_truncation)]
    pub const fn first(self) -> Option<Square> {
        Square::new(self.inner.trailing_zeros() as u8)
    }

    pub const fn is_empty(self) -> bool {
        self.inner == 0
    }

    pub const fn non_empty(self) -> bool {
        self.inner != 0
    }

    pub const fn one(self) -> bool {
        self.inner.is_power_of_two()
    }

    pub const fn many(self) -> bool {
        self.inner & self.inner.wrapping_sub(1) != 0
    }

    // one-square steps. anything that would wrap onto the far file is dropped.
    pub const fn north_one(self) -> Self {
        Self::from_inner(self.inner << 8)
    }
    pub const fn south_one(self) -> Self {
        Self::from_inner(self.inner >> 8)
    }
    pub const fn east_one(self) -> Self {
        Self::from_inner(self.inner << 1 & !Self::FILE_A.inner)
    }
    pub const fn west_one(self) -> Self {
        Self::from_inner(self.inner >> 1 & !Self::FILE_H.inner)
    }
    pub const fn north_east_one(self) -> Self {
        self.north_one().east_one()
    }
    pub const fn north_west_one(self) -> Self {
        self.north_one().west_one()
    }
    pub const fn south_east_one(self) -> Self {
        self.south_one().east_one()
    }
    pub const fn south_west_one(self) -> Self {
        self.south_one().west_one()
    }

    /// Flips the set vertically for black, so that code written from white's
    /// side of the board works for both colours.
    pub const fn relative_to(self, colour: Colour) -> Self {
        match colour {
            Colour::White => self,
            Colour::Black => Self::from_inner(self.inner.swap_bytes()),
        }
    }
}

pub struct SquareIter {
    bits: u64,
}

impl Iterator for SquareIter {
    type Item = Square;

    fn next(&mut self) -> Option<Self::Item> {
        if self.bits == 0 {
            return None;
        }
        #[allow(clippy::cast_possible_truncation)]
        let index = self.bits.trailing_zeros() as u8;
        self.bits &= self.bits - 1;
        // SAFETY: trailing_zeros of a non-zero u64 is in 0..64.
        Some(unsafe { Square::new_unchecked(index) })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.bits.count_ones() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for SquareIter {}

impl IntoIterator for SquareSet {
    type Item = Square;
    type IntoIter = SquareIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

macro_rules! impl_set_op {
    ($op:ident, $method:ident, $assign_op:ident, $assign_method:ident, |$a:ident, $b:ident| $body:expr) => {
        impl $op for SquareSet {
            type Output = Self;

            fn $method(self, rhs: Self) -> Self {
                let ($a, $b) = (self.inner, rhs.inner);
                Self::from_inner($body)
            }
        }

        impl $assign_op for SquareSet {
            fn $assign_method(&mut self, rhs: Self) {
                *self = $op::$method(*self, rhs);
            }
        }
    };
}

impl_set_op!(BitOr, bitor, BitOrAssign, bitor_assign, |a, b| a | b);
impl_set_op!(BitAnd, bitand, BitAndAssign, bitand_assign, |a, b| a & b);
impl_set_op!(BitXor, bitxor, BitXorAssign, bitxor_assign, |a, b| a ^ b);
impl_set_op!(Sub, sub, SubAssign, sub_assign, |a, b| a & !b);

impl Not for SquareSet {
    type Output = Self;

    fn not(self) -> Self {
        Self::from_inner(!self.inner)
    }
}

/// Draws the set as eight rows of `.` and `x`, rank 8 at the top.
impl Display for SquareSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for rank in (0..8).rev() {
            let row = self.inner >> (rank * 8) & 0xFF;
            for file in 0..8 {
                f.write_str(if row >> file & 1 == 1 { "x" } else { "." })?;
            }
            if rank != 0 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
