pub mod board;
pub mod chessmove;
pub mod fen;
pub mod magic;
pub mod piece;
pub mod piecelayout;
pub mod squareset;
pub mod types;
