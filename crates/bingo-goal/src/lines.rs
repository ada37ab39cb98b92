// lines.rs - Bingo line evaluation.
//
// Cells are laid out row-major: index `i` is row `i / size`, column
// `i % size`. A line is complete when every cell on it is complete.
// Lines are checked independently, so one cell can contribute to a row,
// a column, and a diagonal at the same time.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::BingoError;

/// One of the `2 * size + 2` lines on a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "line", content = "index", rename_all = "snake_case")]
pub enum Line {
    Row(usize),
    Column(usize),
    /// Top-left to bottom-right.
    Diagonal,
    /// Top-right to bottom-left.
    AntiDiagonal,
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Line::Row(r) => write!(f, "row {}", r + 1),
            Line::Column(c) => write!(f, "column {}", c + 1),
            Line::Diagonal => write!(f, "diagonal"),
            Line::AntiDiagonal => write!(f, "anti-diagonal"),
        }
    }
}

impl Line {
    /// Cell indices on this line for a `size`×`size` grid.
    pub fn cells(&self, size: usize) -> Vec<usize> {
        match *self {
            Line::Row(r) => (0..size).map(|c| r * size + c).collect(),
            Line::Column(c) => (0..size).map(|r| r * size + c).collect(),
            Line::Diagonal => (0..size).map(|i| i * size + i).collect(),
            Line::AntiDiagonal => (0..size).map(|i| i * size + (size - 1 - i)).collect(),
        }
    }

    /// Every line of a `size`×`size` grid: rows, then columns, then the
    /// two diagonals.
    pub fn all(size: usize) -> impl Iterator<Item = Line> {
        (0..size)
            .map(Line::Row)
            .chain((0..size).map(Line::Column))
            .chain([Line::Diagonal, Line::AntiDiagonal])
    }
}

/// Number of lines on a `size`×`size` board.
pub fn max_lines(size: usize) -> usize {
    2 * size + 2
}

/// Lines whose cells are all complete, in row, column, diagonal order.
pub fn completed_lines(size: usize, flags: &[bool]) -> Result<Vec<Line>, BingoError> {
    check_shape(size, flags)?;
    Ok(Line::all(size)
        .filter(|line| line.cells(size).into_iter().all(|i| flags[i]))
        .collect())
}

/// Count the fully completed rows, columns and diagonals.
///
/// Returns a value in `0..=2 * size + 2`. Fails when `flags` is not
/// exactly `size * size` long.
pub fn count_completed_lines(size: usize, flags: &[bool]) -> Result<usize, BingoError> {
    Ok(completed_lines(size, flags)?.len())
}

fn check_shape(size: usize, flags: &[bool]) -> Result<(), BingoError> {
    if size == 0 {
        return Err(BingoError::InvalidGridSize(size));
    }
    let expected = size * size;
    if flags.len() != expected {
        return Err(BingoError::FlagCountMismatch {
            size,
            expected,
            actual: flags.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn flags_with(size: usize, on: &[usize]) -> Vec<bool> {
        let mut flags = vec![false; size * size];
        for &i in on {
            flags[i] = true;
        }
        flags
    }

    #[test]
    fn all_complete_counts_every_line() {
        for size in [3, 4] {
            let flags = vec![true; size * size];
            assert_eq!(count_completed_lines(size, &flags).unwrap(), 2 * size + 2);
        }
    }

    #[test]
    fn nothing_complete_counts_zero() {
        for size in [3, 4] {
            let flags = vec![false; size * size];
            assert_eq!(count_completed_lines(size, &flags).unwrap(), 0);
        }
    }

    #[test]
    fn single_row_counts_one() {
        let flags = flags_with(3, &[3, 4, 5]);
        assert_eq!(completed_lines(3, &flags).unwrap(), vec![Line::Row(1)]);
    }

    #[test]
    fn main_diagonal_counts_one() {
        let flags = flags_with(3, &[0, 4, 8]);
        assert_eq!(completed_lines(3, &flags).unwrap(), vec![Line::Diagonal]);
    }

    #[test]
    fn anti_diagonal_on_four_by_four() {
        let flags = flags_with(4, &[3, 6, 9, 12]);
        assert_eq!(completed_lines(4, &flags).unwrap(), vec![Line::AntiDiagonal]);
    }

    #[test]
    fn shared_corner_counts_for_row_and_column() {
        let flags = flags_with(3, &[0, 1, 2, 3, 6]);
        assert_eq!(
            completed_lines(3, &flags).unwrap(),
            vec![Line::Row(0), Line::Column(0)]
        );
    }

    #[test]
    fn one_missing_cell_breaks_the_line() {
        let flags = flags_with(4, &[0, 1, 2]);
        assert_eq!(count_completed_lines(4, &flags).unwrap(), 0);
    }

    #[test]
    fn wrong_flag_count_is_rejected() {
        let result = count_completed_lines(3, &[true; 8]);
        assert!(matches!(
            result,
            Err(BingoError::FlagCountMismatch {
                expected: 9,
                actual: 8,
                ..
            })
        ));
    }

    #[test]
    fn zero_size_is_rejected() {
        assert!(matches!(
            count_completed_lines(0, &[]),
            Err(BingoError::InvalidGridSize(0))
        ));
    }

    #[test]
    fn line_cells_and_display() {
        assert_eq!(Line::Column(2).cells(3), vec![2, 5, 8]);
        assert_eq!(Line::AntiDiagonal.cells(3), vec![2, 4, 6]);
        assert_eq!(Line::Row(0).to_string(), "row 1");
        assert_eq!(Line::all(4).count(), max_lines(4));
    }

    proptest! {
        #[test]
        fn count_stays_within_bounds(size in 3usize..=4, seed in any::<u16>()) {
            let flags: Vec<bool> = (0..size * size).map(|i| seed & (1 << i) != 0).collect();
            let n = count_completed_lines(size, &flags).unwrap();
            prop_assert!(n <= max_lines(size));
            prop_assert_eq!(n, count_completed_lines(size, &flags).unwrap());
        }

        #[test]
        fn completing_a_cell_never_loses_a_line(size in 3usize..=4, seed in any::<u16>(), cell in 0usize..16) {
            let cell = cell % (size * size);
            let before: Vec<bool> = (0..size * size).map(|i| seed & (1 << i) != 0).collect();
            let mut after = before.clone();
            after[cell] = true;
            prop_assert!(
                count_completed_lines(size, &after).unwrap()
                    >= count_completed_lines(size, &before).unwrap()
            );
        }
    }
}
