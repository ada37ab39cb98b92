// error.rs - Error types for the bingo board core.
//
// Every failure is recoverable. Validation errors go back to whoever
// triggered the action (the front end shows them as a blocking message);
// persistence errors are absorbed by the store's tolerant load.

use thiserror::Error;

/// Broad category of a [`BingoError`], used by front ends to decide how
/// to surface it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The user asked for something the rules don't allow.
    Validation,
    /// Reading or writing the saved snapshot failed.
    Persistence,
}

/// Errors that can occur while driving a bingo board.
#[derive(Debug, Error)]
pub enum BingoError {
    /// The user name was empty or whitespace.
    #[error("user name must not be blank")]
    BlankUserName,

    /// Only 3×3 and 4×4 boards are supported.
    #[error("unsupported grid size {0} (expected 3 or 4)")]
    InvalidGridSize(usize),

    /// The target line count is outside `1..=max`.
    #[error("target of {target} bingo lines is out of range (1..={max})")]
    InvalidTarget { target: u32, max: u32 },

    /// A goal's title was cleared after the board was started.
    #[error("cell {index} needs a title once the board is active")]
    BlankTitle { index: usize },

    /// Some cells still have no title.
    #[error("board is incomplete: cells {untitled:?} have no title")]
    IncompleteBoard { untitled: Vec<usize> },

    /// The completion flag list doesn't match the grid.
    #[error("expected {expected} completion flags for a {size}x{size} grid, got {actual}")]
    FlagCountMismatch {
        size: usize,
        expected: usize,
        actual: usize,
    },

    /// A cell index past the end of the board.
    #[error("cell {index} is out of range (board has {cells} cells)")]
    CellOutOfRange { index: usize, cells: usize },

    /// A mutator was applied to a goal of the wrong kind.
    #[error("goal {goal_id} is a {actual} goal, not a {expected} goal")]
    KindMismatch {
        goal_id: String,
        expected: &'static str,
        actual: &'static str,
    },

    /// Count goals need a target of at least one.
    #[error("count target must be at least 1")]
    InvalidCountTarget,

    /// A date string that isn't `YYYY-MM-DD`.
    #[error("invalid date '{value}' (expected YYYY-MM-DD)")]
    InvalidDate { value: String },

    /// A goal period length that is negative or runs past the calendar.
    #[error("goal duration of {days} days is out of range (0..={max})")]
    InvalidDuration { days: i64, max: i64 },

    /// A goal period that ends before it starts.
    #[error("invalid date range: start {start} is after end {end}")]
    InvalidRange { start: String, end: String },

    /// Invalid stage transition.
    #[error("invalid transition from {from} to {to}")]
    InvalidTransition { from: String, to: String },

    /// The action needs a board but the session is still in setup.
    #[error("no board has been set up yet")]
    NoBoard,

    /// A file I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    IoError {
        path: String,
        source: std::io::Error,
    },

    /// Failed to serialize/deserialize a snapshot or event.
    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// A saved snapshot parsed but breaks the board invariants.
    #[error("corrupt snapshot: {0}")]
    CorruptSnapshot(String),
}

impl BingoError {
    /// Which category this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            BingoError::IoError { .. }
            | BingoError::SerializationError(_)
            | BingoError::CorruptSnapshot(_) => ErrorKind::Persistence,
            _ => ErrorKind::Validation,
        }
    }
}
