use crate::evaluation::MATE_SCORE;

pub const MAX_DEPTH: usize = 64;
pub const MAX_PLY: usize = MAX_DEPTH;
pub const INFINITY: i32 = MATE_SCORE + 1;
pub const MEGABYTE: usize = 1024 * 1024;
