// session.rs - Session: the Setup → Filling → Active flow around a board.
//
// A Session is an immutable snapshot. Every transition borrows the current
// snapshot and returns the next one, so the front end holds exactly one
// "current" value and replaces it wholesale after each action.
//
//   Setup → Filling → Active
//   (reset goes back to Setup from any stage)

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::board::{check_target, Board, GridSize};
use crate::celebration::Celebration;
use crate::config::BoardDefaults;
use crate::error::BingoError;
use crate::goal::Goal;

/// Which step of the flow the user is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppStage {
    /// Choosing name, grid size and target.
    #[default]
    Setup,
    /// Writing a title for every cell.
    Filling,
    /// Working on the goals.
    Active,
}

impl fmt::Display for AppStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppStage::Setup => write!(f, "setup"),
            AppStage::Filling => write!(f, "filling"),
            AppStage::Active => write!(f, "active"),
        }
    }
}

/// What the user picked on the setup screen.
#[derive(Debug, Clone)]
pub struct SetupRequest {
    pub user_name: String,
    pub size: usize,
    pub target_bingo_lines: u32,
}

/// The persisted application snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub stage: AppStage,

    /// Present in Filling and Active, absent in Setup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub board: Option<Board>,

    #[serde(default)]
    pub celebration: Celebration,
}

impl Session {
    /// A fresh session on the setup screen.
    pub fn new() -> Self {
        Self::default()
    }

    /// Setup → Filling: validate the setup choices and lay out an empty board.
    pub fn begin_filling(
        &self,
        request: &SetupRequest,
        defaults: &BoardDefaults,
        today: NaiveDate,
    ) -> Result<Session, BingoError> {
        self.expect_stage(AppStage::Setup, AppStage::Filling)?;

        let user_name = request.user_name.trim();
        if user_name.is_empty() {
            return Err(BingoError::BlankUserName);
        }
        let size = GridSize::try_from(request.size)?;
        check_target(size, request.target_bingo_lines)?;

        let board = Board::new(
            user_name,
            size,
            request.target_bingo_lines,
            today,
            defaults.goal_duration_days,
        )?;
        tracing::debug!(board = %board.board_id, %size, "board created");
        Ok(Session {
            stage: AppStage::Filling,
            board: Some(board),
            celebration: Celebration::default(),
        })
    }

    /// Apply `f` to the goal in cell `index` and recompute the lines.
    ///
    /// Allowed while filling (editing titles, kinds, targets) and while
    /// active (counting, habit days, completion). An active board keeps a
    /// title in every cell.
    pub fn update_goal<F>(&self, index: usize, f: F) -> Result<Session, BingoError>
    where
        F: FnOnce(&Goal) -> Result<Goal, BingoError>,
    {
        let board = self.board()?;
        let updated = f(board.goal(index)?)?;
        if self.stage == AppStage::Active && !updated.is_titled() {
            return Err(BingoError::BlankTitle { index });
        }
        let board = board.with_goal(index, updated)?;

        let celebration = if self.stage == AppStage::Active {
            let next = self
                .celebration
                .observe(board.completed_lines, board.target_bingo_lines);
            if next.showing && !self.celebration.showing {
                tracing::info!(
                    lines = board.completed_lines,
                    target = board.target_bingo_lines,
                    "bingo target reached"
                );
            }
            next
        } else {
            self.celebration
        };

        Ok(Session {
            stage: self.stage,
            board: Some(board),
            celebration,
        })
    }

    /// Filling → Active: every cell needs a title.
    pub fn start(&self) -> Result<Session, BingoError> {
        self.expect_stage(AppStage::Filling, AppStage::Active)?;
        let board = self.board()?.recompute_lines()?;
        board.finish_filling()?;
        let celebration =
            Celebration::default().observe(board.completed_lines, board.target_bingo_lines);
        Ok(Session {
            stage: AppStage::Active,
            board: Some(board),
            celebration,
        })
    }

    /// Re-derive the line count, and the celebration on an active board,
    /// from the goals themselves. A loaded snapshot may carry a stale or
    /// missing count.
    pub fn recompute(&self) -> Result<Session, BingoError> {
        let Some(stored) = &self.board else {
            return Ok(self.clone());
        };
        let board = stored.recompute_lines()?;
        if board.completed_lines != stored.completed_lines {
            tracing::debug!(
                stored = stored.completed_lines,
                actual = board.completed_lines,
                "corrected saved line count"
            );
        }
        let celebration = match self.stage {
            AppStage::Active => self
                .celebration
                .observe(board.completed_lines, board.target_bingo_lines),
            _ => self.celebration,
        };
        Ok(Session {
            stage: self.stage,
            board: Some(board),
            celebration,
        })
    }

    /// Dismiss the celebration and keep going.
    pub fn acknowledge_celebration(&self) -> Session {
        Session {
            celebration: self.celebration.acknowledge(),
            ..self.clone()
        }
    }

    /// Back to the setup screen, dropping the board.
    pub fn reset(&self) -> Session {
        tracing::debug!(from = %self.stage, "session reset");
        Session::new()
    }

    pub fn board(&self) -> Result<&Board, BingoError> {
        self.board.as_ref().ok_or(BingoError::NoBoard)
    }

    pub fn has_reached_target(&self) -> bool {
        self.board.as_ref().is_some_and(Board::has_reached_target)
    }

    /// Check the stage/board pairing and the board's own invariants.
    pub fn validate(&self) -> Result<(), BingoError> {
        match (self.stage, &self.board) {
            (AppStage::Setup, None) => Ok(()),
            (AppStage::Setup, Some(_)) => Err(BingoError::CorruptSnapshot(
                "setup stage must not carry a board".into(),
            )),
            (_, None) => Err(BingoError::CorruptSnapshot(format!(
                "{} stage has no board",
                self.stage
            ))),
            (_, Some(board)) => board.validate(),
        }
    }

    fn expect_stage(&self, from: AppStage, to: AppStage) -> Result<(), BingoError> {
        if self.stage != from {
            return Err(BingoError::InvalidTransition {
                from: self.stage.to_string(),
                to: to.to_string(),
            });
        }
        Ok(())
    }
}
