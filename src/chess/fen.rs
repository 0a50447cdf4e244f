use std::{num::NonZeroUsize, str::SplitWhitespace};

use crate::{
    chess::{
        piece::{Colour, Piece, PieceType},
        piecelayout::PieceLayout,
        squareset::SquareSet,
        types::{CastlingRights, File, Rank, Square},
    },
    errors::FenParseError,
};

/// A parsed FEN representation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fen {
    pub board: PieceLayout,
    pub turn: Colour,
    pub castling: CastlingRights,
    pub ep: Option<Square>,
    pub halfmove: u8,
    pub fullmove: NonZeroUsize,
}

impl Fen {
    /// Parse a FEN string. All 6 fields must be present, and no extra tokens are allowed.
    pub fn parse(fen: &str) -> Result<Self, FenParseError> {
        let mut tokens = fen.split_whitespace();
        let result = Self::parse_fields(&mut tokens)?;
        if tokens.next().is_some() {
            return Err(FenParseError::ExtraTokens);
        }
        Ok(result)
    }

    fn parse_fields(tokens: &mut SplitWhitespace<'_>) -> Result<Self, FenParseError> {
        let mut field = |missing: FenParseError| tokens.next().ok_or(missing);

        let board = Self::parse_board(field(FenParseError::MissingBoard)?)?;
        let turn = Self::parse_turn(field(FenParseError::MissingSide)?)?;

        // the side that just moved may not have left its king en prise.
        if board
            .king_sq(!turn)
            .is_some_and(|king| board.sq_attacked(king, turn))
        {
            return Err(FenParseError::WaitingInCheck);
        }

        let castling = Self::parse_castling(field(FenParseError::MissingCastling)?, &board)?;
        let ep = Self::parse_ep(field(FenParseError::MissingEnPassant)?, turn, &board)?;
        let halfmove = Self::parse_halfmove(field(FenParseError::MissingHalfmoveClock)?)?;
        let fullmove = Self::parse_fullmove(field(FenParseError::MissingFullmoveNumber)?)?;

        Ok(Self {
            board,
            turn,
            castling,
            ep,
            halfmove,
            fullmove,
        })
    }

    /// Reads one `/`-separated row of the placement field into `layout`.
    fn parse_row(row: &str, rank: Rank, layout: &mut PieceLayout) -> Result<(), FenParseError> {
        let mut file_index = 0u8;
        let mut last_was_gap = false;
        for c in row.chars() {
            if let Some(gap) = c.to_digit(10).filter(|n| (1..=8).contains(n)) {
                if last_was_gap {
                    return Err(FenParseError::AdjacentDigits);
                }
                last_was_gap = true;
                #[allow(clippy::cast_possible_truncation)]
                {
                    file_index += gap as u8;
                }
            } else {
                let piece = Piece::from_char(c).ok_or(FenParseError::UnexpectedCharacter(c))?;
                let file = File::from_index(file_index).ok_or(FenParseError::BadSquaresInSegment)?;
                layout.set_piece_at(Square::from_rank_file(rank, file), piece);
                last_was_gap = false;
                file_index += 1;
            }
            if file_index > 8 {
                return Err(FenParseError::BadSquaresInSegment);
            }
        }

        if file_index == 8 {
            Ok(())
        } else {
            Err(FenParseError::BadSquaresInSegment)
        }
    }

    fn parse_board(board_str: &str) -> Result<PieceLayout, FenParseError> {
        let rows = board_str.split('/').collect::<Vec<_>>();
        if rows.len() != 8 {
            return Err(FenParseError::BoardSegments(rows.len()));
        }

        // rows run from the eighth rank down to the first.
        let mut layout = PieceLayout::default();
        for (rank, row) in Rank::all().rev().zip(rows) {
            Self::parse_row(row, rank, &mut layout)?;
        }

        if (layout.pieces[PieceType::Pawn] & (SquareSet::RANK_1 | SquareSet::RANK_8)).non_empty() {
            return Err(FenParseError::PawnsOnBackranks);
        }

        for colour in Colour::all() {
            match layout.piece_bb(Piece::new(colour, PieceType::King)).count() {
                0 => return Err(FenParseError::MissingKing { colour }),
                1 => (),
                _ => return Err(FenParseError::DuplicateKings { colour }),
            }
        }

        Ok(layout)
    }

    fn parse_turn(s: &str) -> Result<Colour, FenParseError> {
        match s {
            "w" => Ok(Colour::White),
            "b" => Ok(Colour::Black),
            _ => Err(FenParseError::InvalidSide(s.to_string())),
        }
    }

    /// Standard notation only. Each right needs its king and rook on their
    /// home squares, and no right may be repeated.
    fn parse_castling(s: &str, board: &PieceLayout) -> Result<CastlingRights, FenParseError> {
        if s == "-" {
            return Ok(CastlingRights::NONE);
        }

        let mut rights = CastlingRights::NONE;
        for c in s.chars() {
            let (flag, colour, rook_home) = match c {
                'K' => (CastlingRights::WK, Colour::White, Square::H1),
                'Q' => (CastlingRights::WQ, Colour::White, Square::A1),
                'k' => (CastlingRights::BK, Colour::Black, Square::H8),
                'q' => (CastlingRights::BQ, Colour::Black, Square::A8),
                _ => return Err(FenParseError::InvalidCastling(s.to_string())),
            };
            let king_home = Square::E1.relative_to(colour);
            let king_in_place = board.piece_at(king_home) == Some(Piece::new(colour, PieceType::King));
            let rook_in_place = board.piece_at(rook_home) == Some(Piece::new(colour, PieceType::Rook));
            if rights.has(flag) || !king_in_place || !rook_in_place {
                return Err(FenParseError::InvalidCastling(s.to_string()));
            }
            rights.set(flag);
        }

        Ok(rights)
    }

    /// The target must be one a double push could just have left: empty, with
    /// the pushed pawn in front of it and its start square vacated.
    fn parse_ep(
        s: &str,
        turn: Colour,
        board: &PieceLayout,
    ) -> Result<Option<Square>, FenParseError> {
        if s == "-" {
            return Ok(None);
        }

        let mut chars = s.chars();
        let (Some(file_char), Some(rank_char), None) = (chars.next(), chars.next(), chars.next())
        else {
            return Err(FenParseError::InvalidEnPassant(s.to_string()));
        };

        let square = Square::from_chars(file_char, rank_char)
            .ok_or_else(|| FenParseError::InvalidEnPassant(s.to_string()))?;

        // White to move means black just double-pushed, leaving the target on the sixth rank.
        let expected = match turn {
            Colour::White => Rank::Six,
            Colour::Black => Rank::Three,
        };
        if square.rank() != expected {
            return Err(FenParseError::InvalidEnPassantRank {
                square: s.to_string(),
                expected,
                got: square.rank(),
            });
        }

        let invalid = || FenParseError::InvalidEnPassant(s.to_string());
        let towards_mover = match turn {
            Colour::White => -8,
            Colour::Black => 8,
        };
        let pushed_to = square.add(towards_mover).ok_or_else(invalid)?;
        let pushed_from = square.add(-towards_mover).ok_or_else(invalid)?;
        let pushed_pawn = Piece::new(!turn, PieceType::Pawn);
        if board.piece_at(square).is_some()
            || board.piece_at(pushed_from).is_some()
            || board.piece_at(pushed_to) != Some(pushed_pawn)
        {
            return Err(invalid());
        }

        Ok(Some(square))
    }

    fn parse_halfmove(s: &str) -> Result<u8, FenParseError> {
        let value: u8 = s
            .parse()
            .map_err(|_| FenParseError::InvalidHalfmoveClock(s.to_string()))?;

        if value > 100 {
            return Err(FenParseError::HalfmoveClockTooLarge(value));
        }

        Ok(value)
    }

    fn parse_fullmove(s: &str) -> Result<NonZeroUsize, FenParseError> {
        let value: usize = s
            .parse()
            .map_err(|_| FenParseError::InvalidFullmoveNumber(s.to_string()))?;

        // the board counts plies, so twice the move number has to fit.
        if value > usize::MAX / 2 {
            return Err(FenParseError::InvalidFullmoveNumber(s.to_string()));
        }

        NonZeroUsize::new(value).ok_or(FenParseError::FullmoveNumberZero)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STARTPOS: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    #[test]
    fn parse_startpos() {
        let fen = Fen::parse(STARTPOS).unwrap();
        assert_eq!(fen.turn, Colour::White);
        assert_eq!(fen.castling, CastlingRights::ALL);
        assert_eq!(fen.halfmove, 0);
        assert_eq!(fen.fullmove.get(), 1);
        assert!(fen.ep.is_none());
        assert_eq!(fen.board.piece_at(Square::E1), Some(Piece::WK));
        assert_eq!(fen.board.piece_at(Square::D8), Some(Piece::BQ));
        assert_eq!(fen.board.occupied().count(), 32);
    }

    #[test]
    fn missing_fields_are_reported_in_order() {
        let board = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";
        assert_eq!(Fen::parse(""), Err(FenParseError::MissingBoard));
        assert_eq!(Fen::parse(board), Err(FenParseError::MissingSide));
        assert_eq!(
            Fen::parse(&format!("{board} w")),
            Err(FenParseError::MissingCastling)
        );
        assert_eq!(
            Fen::parse(&format!("{board} w KQkq")),
            Err(FenParseError::MissingEnPassant)
        );
        assert_eq!(
            Fen::parse(&format!("{board} w KQkq -")),
            Err(FenParseError::MissingHalfmoveClock)
        );
        assert_eq!(
            Fen::parse(&format!("{board} w KQkq - 0")),
            Err(FenParseError::MissingFullmoveNumber)
        );
    }

    #[test]
    fn parse_bad_segments() {
        let err = Fen::parse("rnbqkbnr/pppppppp/8/8/8/8 w - - 0 1").unwrap_err();
        assert_eq!(err, FenParseError::BoardSegments(6));
        let err =
            Fen::parse("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR/PPPPPPPP/RNBQKBNR w - - 0 1")
                .unwrap_err();
        assert_eq!(err, FenParseError::BoardSegments(10));
    }

    #[test]
    fn reject_bad_rank_lengths() {
        let short = Fen::parse("rnbqkbnr/ppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
        assert_eq!(short, Err(FenParseError::BadSquaresInSegment));
        let long = Fen::parse("rnbqkbnr/ppppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
        assert_eq!(long, Err(FenParseError::BadSquaresInSegment));
        let overflow = Fen::parse("rnbqkbnr/pppppppp/9/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
        assert!(overflow.is_err());
    }

    #[test]
    fn reject_adjacent_digits() {
        let result = Fen::parse("rnbqkbnr/pppppppp/44/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
        assert!(matches!(result, Err(FenParseError::AdjacentDigits)));
    }

    #[test]
    fn reject_unknown_piece() {
        let result = Fen::parse("rnbqkbnr/ppppxppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
        assert_eq!(result, Err(FenParseError::UnexpectedCharacter('x')));
    }

    #[test]
    fn reject_uppercase_side() {
        let result = Fen::parse("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR W KQkq - 0 1");
        assert!(matches!(result, Err(FenParseError::InvalidSide(_))));
    }

    #[test]
    fn reject_structural_nonsense() {
        assert_eq!(
            Fen::parse("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQ1BNR w kq - 0 1"),
            Err(FenParseError::MissingKing {
                colour: Colour::White
            })
        );
        assert_eq!(
            Fen::parse("k6k/8/8/8/8/8/8/K7 w - - 0 1"),
            Err(FenParseError::DuplicateKings {
                colour: Colour::Black
            })
        );
        assert_eq!(
            Fen::parse("k6P/8/8/8/8/8/8/K7 w - - 0 1"),
            Err(FenParseError::PawnsOnBackranks)
        );
        // white in check is fine on white's turn, but not on black's.
        assert!(Fen::parse("k7/8/8/8/8/8/8/K6r w - - 0 1").is_ok());
        assert_eq!(
            Fen::parse("k7/8/8/8/8/8/8/K6r b - - 0 1"),
            Err(FenParseError::WaitingInCheck)
        );
    }

    #[test]
    fn castling_requires_home_squares() {
        assert!(Fen::parse("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").is_ok());
        // no rook on h1
        assert!(matches!(
            Fen::parse("r3k2r/8/8/8/8/8/8/R3K3 w KQkq - 0 1"),
            Err(FenParseError::InvalidCastling(_))
        ));
        // king off its home square
        assert!(matches!(
            Fen::parse("r3k2r/8/8/8/8/8/8/R4K1R w KQ - 0 1"),
            Err(FenParseError::InvalidCastling(_))
        ));
        // repeated and unknown characters
        assert!(matches!(
            Fen::parse("r3k2r/8/8/8/8/8/8/R3K2R w KK - 0 1"),
            Err(FenParseError::InvalidCastling(_))
        ));
        assert!(matches!(
            Fen::parse("r3k2r/8/8/8/8/8/8/R3K2R w AHah - 0 1"),
            Err(FenParseError::InvalidCastling(_))
        ));
    }

    #[test]
    fn reject_invalid_ep_rank() {
        // e4 is not a valid ep square (should be e3 or e6)
        let result = Fen::parse("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e4 0 1");
        assert!(matches!(
            result,
            Err(FenParseError::InvalidEnPassantRank { .. })
        ));
    }

    #[test]
    fn reject_malformed_ep() {
        for ep in ["e", "e33", "z3", "E3"] {
            let result = Fen::parse(&format!(
                "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq {ep} 0 1"
            ));
            assert!(
                matches!(result, Err(FenParseError::InvalidEnPassant(_))),
                "{ep} gave {result:?}"
            );
        }
    }

    #[test]
    fn accept_valid_ep_square() {
        let fen =
            Fen::parse("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1").unwrap();
        assert_eq!(fen.ep, Some(Square::from_rank_file(Rank::Three, File::E)));
    }

    #[test]
    fn ep_square_must_follow_a_double_push() {
        // target occupied by a knight.
        assert!(matches!(
            Fen::parse("4k3/8/4n3/3P4/8/8/8/4K3 w - e6 0 1"),
            Err(FenParseError::InvalidEnPassant(_))
        ));
        // nothing on e5 to capture.
        assert!(matches!(
            Fen::parse("4k3/8/8/3P4/8/8/8/4K3 w - e6 0 1"),
            Err(FenParseError::InvalidEnPassant(_))
        ));
        // the pawn in front is white's own.
        assert!(matches!(
            Fen::parse("4k3/8/8/3PP3/8/8/8/4K3 w - e6 0 1"),
            Err(FenParseError::InvalidEnPassant(_))
        ));
        // start square still occupied.
        assert!(matches!(
            Fen::parse("4k3/4p3/8/3Pp3/8/8/8/4K3 w - e6 0 1"),
            Err(FenParseError::InvalidEnPassant(_))
        ));
        assert_eq!(
            Fen::parse("4k3/8/8/3Pp3/8/8/8/4K3 w - e6 0 1").unwrap().ep,
            Some(Square::E6)
        );
        assert!(matches!(
            Fen::parse("4k3/8/8/8/4Pp2/8/8/4K3 b - e2 0 1"),
            Err(FenParseError::InvalidEnPassantRank { .. })
        ));
        assert_eq!(
            Fen::parse("4k3/8/8/8/4Pp2/8/8/4K3 b - e3 0 1").unwrap().ep,
            Some(Square::E3)
        );
    }

    #[test]
    fn reject_halfmove_over_100() {
        let result = Fen::parse("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 101 1");
        assert!(matches!(
            result,
            Err(FenParseError::HalfmoveClockTooLarge(101))
        ));
    }

    #[test]
    fn reject_fullmove_zero() {
        let result = Fen::parse("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 0");
        assert!(matches!(result, Err(FenParseError::FullmoveNumberZero)));
    }

    #[test]
    fn fullmove_number_must_fit_in_plies() {
        let result = Fen::parse("4k3/8/8/8/8/8/8/4K3 w - - 0 18446744073709551615");
        assert!(matches!(
            result,
            Err(FenParseError::InvalidFullmoveNumber(_))
        ));
        let largest = usize::MAX / 2;
        let fen = Fen::parse(&format!("4k3/8/8/8/8/8/8/4K3 b - - 0 {largest}")).unwrap();
        assert_eq!(fen.fullmove.get(), largest);
    }

    #[test]
    fn reject_extra_tokens() {
        let result = Fen::parse("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1 extra");
        assert!(matches!(result, Err(FenParseError::ExtraTokens)));
    }
}
