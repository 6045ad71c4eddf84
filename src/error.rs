use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PuzzleError {
    #[error("expected {expected} tile values, got {got}")]
    WrongValueCount { expected: usize, got: usize },

    #[error("board is not a permutation of 0..={max_tile}")]
    InvalidBoard { max_tile: u32 },

    #[error("start board is {start:?} but goal board is {goal:?}")]
    DimensionMismatch {
        start: (usize, usize),
        goal: (usize, usize),
    },
}
