//! # bingo-goal
//!
//! Goal state and bingo line detection for a personal goal-bingo board.
//!
//! A [`Board`] is an N×N grid of [`Goal`]s. Each goal completes in its own
//! way (a manual toggle, a counter reaching its target, or a manual toggle
//! alongside a habit calendar), and the board counts how many rows, columns
//! and diagonals are fully complete. A [`Session`] wraps the board in the
//! `Setup → Filling → Active` flow and is what gets persisted.
//!
//! ## Key components
//!
//! - [`count_completed_lines`] - the line evaluator
//! - [`Goal`] / [`GoalKind`] - goals and their pure mutators
//! - [`Board`] - the grid, line recomputation, and fill checks
//! - [`Session`] - the stage state machine (Setup → Filling → Active)
//! - [`Celebration`] - when to show and re-arm the "target reached" popup
//! - [`SnapshotStore`] - tolerant JSON persistence for the session
//! - [`BingoEvent`] / [`EventDispatcher`] - events derived from snapshot
//!   changes, dispatched to notification sinks
//! - [`BingoConfig`] - `.bingo/` layout and `config.toml` defaults

pub mod board;
pub mod celebration;
pub mod config;
pub mod error;
pub mod events;
pub mod goal;
pub mod lines;
pub mod session;
pub mod store;

pub use board::{Board, GridSize};
pub use celebration::Celebration;
pub use config::{BingoConfig, BoardDefaults};
pub use error::{BingoError, ErrorKind};
pub use events::{BingoEvent, EventDispatcher, EventLog, NotificationSink};
pub use goal::{DateRangeCheck, Goal, GoalKind, GoalType};
pub use lines::{completed_lines, count_completed_lines, max_lines, Line};
pub use session::{AppStage, Session, SetupRequest};
pub use store::SnapshotStore;
