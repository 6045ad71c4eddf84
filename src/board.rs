use rand::{seq::SliceRandom, thread_rng};
use std::fmt;

use crate::error::PuzzleError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    /// Fixed expansion order for child generation.
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

    /// (row, col) offset of the cell the blank swaps with.
    pub fn as_offset(&self) -> (isize, isize) {
        match self {
            Move::Up => (-1, 0),
            Move::Down => (1, 0),
            Move::Left => (0, -1),
            Move::Right => (0, 1),
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Move::Up => Move::Down,
            Move::Down => Move::Up,
            Move::Left => Move::Right,
            Move::Right => Move::Left,
        }
    }

    /// Single-letter code used in solution reports.
    pub fn symbol(&self) -> char {
        match self {
            Move::Up => 'U',
            Move::Down => 'D',
            Move::Left => 'L',
            Move::Right => 'R',
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            Move::Up => "Up",
            Move::Down => "Down",
            Move::Left => "Left",
            Move::Right => "Right",
        };
        write!(f, "{}", s)
    }
}

/// A width x height sliding-tile board. Tile 0 is the blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<Vec<u32>>,
}

impl Board {
    /// Create an all-zero board. Not valid until filled.
    pub fn new(width: usize, height: usize) -> Self {
        assert!(width > 0 && height > 0, "board dimensions must be positive");
        Self {
            width,
            height,
            cells: vec![vec![0; width]; height],
        }
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Highest tile value, i.e. width*height - 1.
    pub fn size(&self) -> u32 {
        (self.width * self.height - 1) as u32
    }

    /// Write `values` into the grid row-major. Does not check validity;
    /// callers wanting a usable board must check `is_valid` afterward.
    pub fn fill(&mut self, values: &[u32]) -> Result<(), PuzzleError> {
        let expected = self.width * self.height;
        if values.len() != expected {
            return Err(PuzzleError::WrongValueCount {
                expected,
                got: values.len(),
            });
        }
        for (i, &v) in values.iter().enumerate() {
            self.cells[i / self.width][i % self.width] = v;
        }
        Ok(())
    }

    /// Fill with a uniformly random permutation of 0..=size.
    pub fn random_fill(&mut self) {
        let mut values: Vec<u32> = (0..=self.size()).collect();
        values.shuffle(&mut thread_rng());
        for (i, &v) in values.iter().enumerate() {
            self.cells[i / self.width][i % self.width] = v;
        }
    }

    /// True iff the cells are a permutation of 0..=size.
    pub fn is_valid(&self) -> bool {
        let mut seen = vec![false; self.width * self.height];
        for row in &self.cells {
            for &v in row {
                let v = v as usize;
                if v >= seen.len() || seen[v] {
                    return false;
                }
                seen[v] = true;
            }
        }
        true
    }

    /// (row, col) of the cell holding `value`, if present.
    pub fn locate(&self, value: u32) -> Option<(usize, usize)> {
        for (r, row) in self.cells.iter().enumerate() {
            for (c, &v) in row.iter().enumerate() {
                if v == value {
                    return Some((r, c));
                }
            }
        }
        None
    }

    /// Slide the blank one cell in `direction` by swapping it with the
    /// neighboring tile. A move off the edge leaves the board unchanged;
    /// expansion uses that no-op to discard unproductive moves.
    pub fn apply_move(&mut self, direction: Move) {
        let Some((row, col)) = self.locate(0) else {
            return; // no blank on an invalid board, nothing to slide
        };
        let (dr, dc) = direction.as_offset();
        let new_row = row as isize + dr;
        let new_col = col as isize + dc;
        if new_row >= 0
            && new_row < self.height as isize
            && new_col >= 0
            && new_col < self.width as isize
        {
            let tile = self.cells[new_row as usize][new_col as usize];
            self.cells[new_row as usize][new_col as usize] = 0;
            self.cells[row][col] = tile;
        }
    }

    /// Row-major cell sequence; the canonical duplicate-detection key.
    pub fn flatten(&self) -> Vec<u32> {
        self.cells.iter().flatten().copied().collect()
    }

    /// Sum of Manhattan distances of tiles 1..=size from their positions
    /// on `goal`. Zero iff the two boards match cell for cell.
    pub fn manhattan_distance(&self, goal: &Board) -> u32 {
        let mut total = 0;
        for value in 1..=self.size() {
            if let (Some((r, c)), Some((gr, gc))) = (self.locate(value), goal.locate(value)) {
                total += r.abs_diff(gr) as u32 + c.abs_diff(gc) as u32;
            }
        }
        total
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            for &v in row {
                write!(f, "{} ", v)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(width: usize, height: usize, values: &[u32]) -> Board {
        let mut b = Board::new(width, height);
        b.fill(values).unwrap();
        b
    }

    #[test]
    fn fresh_board_is_invalid() {
        // all zeros duplicates the blank
        assert!(!Board::new(4, 3).is_valid());
    }

    #[test]
    fn permutation_is_valid() {
        let b = board(4, 3, &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11]);
        assert!(b.is_valid());
    }

    #[test]
    fn duplicate_tile_is_invalid() {
        let b = board(4, 3, &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 10]);
        assert!(!b.is_valid());
    }

    #[test]
    fn out_of_range_tile_is_invalid() {
        let b = board(4, 3, &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 12]);
        assert!(!b.is_valid());
    }

    #[test]
    fn fill_rejects_wrong_length() {
        let mut b = Board::new(4, 3);
        let err = b.fill(&[0, 1, 2]).unwrap_err();
        assert_eq!(
            err,
            PuzzleError::WrongValueCount {
                expected: 12,
                got: 3
            }
        );
    }

    #[test]
    fn random_fill_is_valid() {
        let mut b = Board::new(4, 3);
        for _ in 0..20 {
            b.random_fill();
            assert!(b.is_valid());
        }
    }

    #[test]
    fn locate_finds_every_tile() {
        let b = board(4, 3, &[5, 1, 2, 3, 4, 0, 6, 7, 8, 9, 10, 11]);
        assert_eq!(b.locate(0), Some((1, 1)));
        assert_eq!(b.locate(5), Some((0, 0)));
        assert_eq!(b.locate(11), Some((2, 3)));
        assert_eq!(b.locate(12), None);
    }

    #[test]
    fn move_swaps_blank_with_neighbor() {
        let mut b = board(4, 3, &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11]);
        b.apply_move(Move::Right);
        assert_eq!(b, board(4, 3, &[1, 0, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11]));
        b.apply_move(Move::Down);
        assert_eq!(b, board(4, 3, &[1, 5, 2, 3, 4, 0, 6, 7, 8, 9, 10, 11]));
    }

    #[test]
    fn edge_move_is_noop() {
        let start = board(4, 3, &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11]);
        let mut b = start.clone();
        b.apply_move(Move::Up);
        assert_eq!(b, start);
        b.apply_move(Move::Left);
        assert_eq!(b, start);
    }

    #[test]
    fn legal_move_then_opposite_restores_board() {
        // blank at (1, 1), every direction is legal
        let start = board(4, 3, &[1, 2, 3, 4, 5, 0, 6, 7, 8, 9, 10, 11]);
        for m in Move::ALL {
            let mut b = start.clone();
            b.apply_move(m);
            assert_ne!(b, start, "blank at (1, 1) can move {}", m);
            b.apply_move(m.opposite());
            assert_eq!(b, start);
        }
    }

    #[test]
    fn clone_is_independent() {
        let original = board(4, 3, &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11]);
        let mut copy = original.clone();
        copy.apply_move(Move::Right);
        assert_ne!(copy, original);
        assert_eq!(original.locate(0), Some((0, 0)));
    }

    #[test]
    fn manhattan_distance_zero_on_identical_boards() {
        let mut b = Board::new(4, 3);
        for _ in 0..10 {
            b.random_fill();
            assert_eq!(b.manhattan_distance(&b.clone()), 0);
        }
    }

    #[test]
    fn manhattan_distance_counts_tile_displacement() {
        let goal = board(4, 3, &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11]);
        // tile 1 one step left of home
        let b = board(4, 3, &[1, 0, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11]);
        assert_eq!(b.manhattan_distance(&goal), 1);
        // tiles 1 and 5 swapped: each one step from home
        let b = board(4, 3, &[0, 5, 2, 3, 4, 1, 6, 7, 8, 9, 10, 11]);
        assert_eq!(b.manhattan_distance(&goal), 2);
    }

    #[test]
    fn manhattan_distance_positive_when_boards_differ() {
        let goal = board(4, 3, &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11]);
        let mut b = goal.clone();
        b.apply_move(Move::Right);
        assert!(b.manhattan_distance(&goal) > 0);
    }
}
