// board.rs - Board: the grid of goals and its bingo line count.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::BingoError;
use crate::goal::Goal;
use crate::lines::{self, Line};

/// Supported board dimensions. Serialized as the plain number `3` or `4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub enum GridSize {
    Three,
    Four,
}

impl GridSize {
    pub fn get(self) -> usize {
        match self {
            GridSize::Three => 3,
            GridSize::Four => 4,
        }
    }

    pub fn cells(self) -> usize {
        self.get() * self.get()
    }

    /// Rows + columns + both diagonals.
    pub fn max_lines(self) -> u32 {
        lines::max_lines(self.get()) as u32
    }
}

impl TryFrom<usize> for GridSize {
    type Error = BingoError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        match value {
            3 => Ok(GridSize::Three),
            4 => Ok(GridSize::Four),
            other => Err(BingoError::InvalidGridSize(other)),
        }
    }
}

impl From<GridSize> for usize {
    fn from(size: GridSize) -> usize {
        size.get()
    }
}

impl fmt::Display for GridSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{0}x{0}", self.get())
    }
}

/// A bingo board: `size * size` goals in row-major order.
///
/// `completed_lines` is derived data; every path that replaces a goal goes
/// through [`Board::recompute_lines`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// Unique identifier for this board.
    pub board_id: Uuid,

    /// Whose board this is.
    pub user_name: String,

    pub size: GridSize,

    /// Lines needed to win, in `1..=size.max_lines()`.
    pub target_bingo_lines: u32,

    pub goals: Vec<Goal>,

    /// Completed rows, columns and diagonals as of the last recompute.
    #[serde(default)]
    pub completed_lines: u32,
}

impl Board {
    /// A board of untitled placeholder goals. Validates the target.
    pub fn new(
        user_name: impl Into<String>,
        size: GridSize,
        target_bingo_lines: u32,
        today: NaiveDate,
        duration_days: i64,
    ) -> Result<Self, BingoError> {
        check_target(size, target_bingo_lines)?;
        let goals = (0..size.cells())
            .map(|i| Goal::placeholder(i, today, duration_days))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            board_id: Uuid::new_v4(),
            user_name: user_name.into(),
            size,
            target_bingo_lines,
            goals,
            completed_lines: 0,
        })
    }

    /// Completion flags in cell order.
    pub fn completion_flags(&self) -> Vec<bool> {
        self.goals.iter().map(|g| g.is_completed).collect()
    }

    /// Which lines are currently complete.
    pub fn completed(&self) -> Result<Vec<Line>, BingoError> {
        lines::completed_lines(self.size.get(), &self.completion_flags())
    }

    /// Re-derive `completed_lines` from the goals.
    pub fn recompute_lines(&self) -> Result<Board, BingoError> {
        let count = lines::count_completed_lines(self.size.get(), &self.completion_flags())?;
        Ok(Board {
            completed_lines: count as u32,
            ..self.clone()
        })
    }

    pub fn has_reached_target(&self) -> bool {
        self.completed_lines >= self.target_bingo_lines
    }

    /// Succeeds when every cell has a title.
    pub fn finish_filling(&self) -> Result<(), BingoError> {
        let untitled = self.untitled_cells();
        if untitled.is_empty() {
            Ok(())
        } else {
            Err(BingoError::IncompleteBoard { untitled })
        }
    }

    pub fn untitled_cells(&self) -> Vec<usize> {
        self.goals
            .iter()
            .enumerate()
            .filter(|(_, g)| !g.is_titled())
            .map(|(i, _)| i)
            .collect()
    }

    pub fn goal(&self, index: usize) -> Result<&Goal, BingoError> {
        self.goals.get(index).ok_or(BingoError::CellOutOfRange {
            index,
            cells: self.goals.len(),
        })
    }

    /// Replace the goal at `index` and recompute lines.
    pub fn with_goal(&self, index: usize, goal: Goal) -> Result<Board, BingoError> {
        self.goal(index)?;
        let mut goals = self.goals.clone();
        goals[index] = goal;
        Board {
            goals,
            ..self.clone()
        }
        .recompute_lines()
    }

    /// Check the structural invariants a loaded board must hold.
    pub fn validate(&self) -> Result<(), BingoError> {
        if self.goals.len() != self.size.cells() {
            return Err(BingoError::CorruptSnapshot(format!(
                "{} board has {} goals",
                self.size,
                self.goals.len()
            )));
        }
        check_target(self.size, self.target_bingo_lines)
            .map_err(|e| BingoError::CorruptSnapshot(e.to_string()))
    }

    /// `(row, column)` of a cell index.
    pub fn position(&self, index: usize) -> (usize, usize) {
        let n = self.size.get();
        (index / n, index % n)
    }
}

/// Targets run from one line up to every line on the board.
pub fn check_target(size: GridSize, target: u32) -> Result<(), BingoError> {
    let max = size.max_lines();
    if target == 0 || target > max {
        return Err(BingoError::InvalidTarget { target, max });
    }
    Ok(())
}
