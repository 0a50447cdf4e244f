use crate::chess::{piece::Colour, types::Rank};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveParseError {
    #[error("invalid move length {0}")]
    InvalidLength(usize),
    #[error("invalid from-square file {0}")]
    InvalidFromSquareFile(char),
    #[error("invalid from-square rank {0}")]
    InvalidFromSquareRank(char),
    #[error("invalid to-square file {0}")]
    InvalidToSquareFile(char),
    #[error("invalid to-square rank {0}")]
    InvalidToSquareRank(char),
    #[error("invalid promotion piece {0}")]
    InvalidPromotionPiece(char),
    #[error("illegal move {0}")]
    IllegalMove(String),
}

/// Rejected raw move construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("square index {0} is out of range (expected 0..64)")]
    SquareOutOfRange(u8),
    #[error("move flag {0:#06b} is not assigned")]
    InvalidFlag(u8),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FenParseError {
    #[error("FEN string is empty")]
    MissingBoard,
    #[error("board part has {0} segments, expected 8")]
    BoardSegments(usize),
    #[error("a board segment does not describe exactly 8 squares")]
    BadSquaresInSegment,
    #[error("board segment contains two adjacent digits")]
    AdjacentDigits,
    #[error("unexpected character {0:?} in board part")]
    UnexpectedCharacter(char),
    #[error("pawns on the first or eighth rank")]
    PawnsOnBackranks,
    #[error("no {colour} king on the board")]
    MissingKing { colour: Colour },
    #[error("more than one {colour} king on the board")]
    DuplicateKings { colour: Colour },
    #[error("missing side to move")]
    MissingSide,
    #[error("invalid side to move {0:?}, expected \"w\" or \"b\"")]
    InvalidSide(String),
    #[error("the side not to move is in check")]
    WaitingInCheck,
    #[error("missing castling rights")]
    MissingCastling,
    #[error("invalid castling rights {0:?}")]
    InvalidCastling(String),
    #[error("missing en passant square")]
    MissingEnPassant,
    #[error("invalid en passant square {0:?}")]
    InvalidEnPassant(String),
    #[error("en passant square {square} is on rank {got:?}, expected rank {expected:?}")]
    InvalidEnPassantRank {
        square: String,
        expected: Rank,
        got: Rank,
    },
    #[error("missing halfmove clock")]
    MissingHalfmoveClock,
    #[error("invalid halfmove clock {0:?}")]
    InvalidHalfmoveClock(String),
    #[error("halfmove clock {0} is larger than 100")]
    HalfmoveClockTooLarge(u8),
    #[error("missing fullmove number")]
    MissingFullmoveNumber,
    #[error("invalid fullmove number {0:?}")]
    InvalidFullmoveNumber(String),
    #[error("fullmove number must be at least 1")]
    FullmoveNumberZero,
    #[error("unexpected tokens after the fullmove number")]
    ExtraTokens,
}

#[cfg(debug_assertions)]
pub type PositionValidityError = String;
