#![cfg(debug_assertions)]

use crate::{
    chess::{
        board::Board,
        piece::{Colour, Piece},
        types::{Rank, Square},
    },
    errors::PositionValidityError,
};

impl Board {
    /// Cross-checks the redundant parts of the position against each other.
    pub fn check_validity(&self) -> Result<(), PositionValidityError> {
        // check square-set / piece array coherency
        if self.state.bbs.any_bbs_overlapping() {
            return Err("square-sets overlap".to_string());
        }
        for sq in Square::all() {
            let piece = self.state.mailbox[sq];
            if self.state.bbs.piece_at(sq) != piece {
                return Err(format!(
                    "square-set / piece array coherency corrupt: expected square {} to be '{:?}' but was '{:?}'",
                    sq,
                    piece,
                    self.state.bbs.piece_at(sq)
                ));
            }
        }

        let key = self.generate_key();
        if key != self.state.key {
            return Err(format!(
                "key is corrupt: expected {key:#018x}, got {:#018x}",
                self.state.key
            ));
        }

        if let Some(ep_sq) = self.state.ep_square {
            let expected = match self.side {
                Colour::White => Rank::Six,
                Colour::Black => Rank::Three,
            };
            if ep_sq.rank() != expected {
                return Err(format!(
                    "en passant square is corrupt: expected None or a square on rank {expected:?}, got {ep_sq}"
                ));
            }
        }

        // check there are the correct number of kings for each side
        for king in [Piece::WK, Piece::BK] {
            let count = self.state.bbs.piece_bb(king).count();
            if count != 1 {
                return Err(format!(
                    "{} king count is corrupt: expected 1, got {count}",
                    king.colour()
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::chess::{board::Board, types::Square};

    #[test]
    fn fresh_boards_are_valid() {
        assert_eq!(Board::default().check_validity(), Ok(()));
        let board =
            Board::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1")
                .unwrap();
        assert_eq!(board.check_validity(), Ok(()));
    }

    #[test]
    fn corruption_is_detected() {
        let mut stale_key = Board::default();
        stale_key.state.key ^= 1;
        assert!(stale_key.check_validity().unwrap_err().contains("key"));

        let mut stray_mailbox = Board::default();
        stray_mailbox.state.mailbox[Square::E4] = stray_mailbox.state.mailbox[Square::E2];
        assert!(
            stray_mailbox
                .check_validity()
                .unwrap_err()
                .contains("coherency")
        );
    }
}
