// goal.rs - Goal: one cell of the bingo board and its completion modes.
//
// Three completion modes:
//   General - completion is a manual toggle
//   Count   - completion follows current_count >= target_count
//   Habit   - a calendar of done days; completion is still a manual toggle
//
// Every mutator borrows the goal and returns a new value, so the caller can
// swap the whole board snapshot and compare old against new.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::BingoError;

/// Format used for goal periods and habit date keys.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Longest goal period a new goal may get, in days (a century).
pub const MAX_GOAL_DURATION_DAYS: i64 = 36_525;

/// Completion mode of a goal, carrying only the state that mode needs.
///
/// Serializes with a `type` tag, e.g. `{"type": "count", "target_count": 3,
/// "current_count": 1}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GoalKind {
    /// Done when the user says so.
    General,

    /// Done once the counter reaches the target.
    Count { target_count: u32, current_count: u32 },

    /// Days the habit was kept, as `YYYY-MM-DD` keys.
    Habit {
        #[serde(default)]
        habit_dates: BTreeSet<String>,
    },
}

impl GoalKind {
    /// Fresh state for a goal type: counters start at `0/1`, habits empty.
    pub fn fresh(goal_type: GoalType) -> Self {
        match goal_type {
            GoalType::General => GoalKind::General,
            GoalType::Count => GoalKind::Count {
                target_count: 1,
                current_count: 0,
            },
            GoalType::Habit => GoalKind::Habit {
                habit_dates: BTreeSet::new(),
            },
        }
    }

    pub fn goal_type(&self) -> GoalType {
        match self {
            GoalKind::General => GoalType::General,
            GoalKind::Count { .. } => GoalType::Count,
            GoalKind::Habit { .. } => GoalType::Habit,
        }
    }
}

/// The kind of a goal without its state. Used when choosing a mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GoalType {
    General,
    Count,
    Habit,
}

impl GoalType {
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalType::General => "general",
            GoalType::Count => "count",
            GoalType::Habit => "habit",
        }
    }
}

impl fmt::Display for GoalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GoalType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            // "regular" is what the planner variant called general goals.
            "general" | "regular" => Ok(GoalType::General),
            "count" => Ok(GoalType::Count),
            "habit" => Ok(GoalType::Habit),
            other => Err(format!("unknown goal type '{other}'")),
        }
    }
}

/// How strictly [`Goal::set_date_range`] checks its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateRangeCheck {
    /// Store whatever strings were given.
    Unchecked,
    /// Both dates must be `YYYY-MM-DD` and start must not be after end.
    #[default]
    Strict,
}

/// A single goal on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    /// Stable identifier, `goal-<cell index>` for generated boards.
    pub id: String,

    /// What the user wants to achieve. Blank until filled in.
    pub title: String,

    /// Completion mode and its state.
    pub kind: GoalKind,

    /// Start of the goal period (`YYYY-MM-DD`).
    pub start_date: String,

    /// End of the goal period (`YYYY-MM-DD`).
    pub end_date: String,

    /// Free-form notes.
    #[serde(default)]
    pub notes: String,

    /// Whether this cell counts towards bingo lines.
    pub is_completed: bool,
}

impl Goal {
    /// An untitled general goal for cell `index`, running `duration_days`
    /// from `today`.
    pub fn placeholder(
        index: usize,
        today: NaiveDate,
        duration_days: i64,
    ) -> Result<Self, BingoError> {
        let end = period_end(today, duration_days)?;
        Ok(Self {
            id: format!("goal-{index}"),
            title: String::new(),
            kind: GoalKind::General,
            start_date: today.format(DATE_FORMAT).to_string(),
            end_date: end.format(DATE_FORMAT).to_string(),
            notes: String::new(),
            is_completed: false,
        })
    }

    pub fn is_titled(&self) -> bool {
        !self.title.trim().is_empty()
    }

    pub fn goal_type(&self) -> GoalType {
        self.kind.goal_type()
    }

    /// Flip the completion flag. Valid for every kind.
    pub fn toggle_completed(&self) -> Goal {
        Goal {
            is_completed: !self.is_completed,
            ..self.clone()
        }
    }

    /// Move a counter by `delta`, clamping at zero, and re-derive completion
    /// from `current_count >= target_count`.
    ///
    /// Dropping below the target clears completion even when it had been
    /// set by hand.
    pub fn apply_count_delta(&self, delta: i64) -> Result<Goal, BingoError> {
        let GoalKind::Count {
            target_count,
            current_count,
        } = self.kind
        else {
            return Err(self.kind_mismatch(GoalType::Count));
        };

        let next = (i64::from(current_count).saturating_add(delta)).clamp(0, i64::from(u32::MAX));
        let current_count = next as u32;
        tracing::debug!(goal = %self.id, current_count, target_count, "count updated");
        Ok(Goal {
            kind: GoalKind::Count {
                target_count,
                current_count,
            },
            is_completed: current_count >= target_count,
            ..self.clone()
        })
    }

    /// Change a counter's target (at least one) and re-derive completion.
    pub fn set_count_target(&self, target: u32) -> Result<Goal, BingoError> {
        let GoalKind::Count { current_count, .. } = self.kind else {
            return Err(self.kind_mismatch(GoalType::Count));
        };
        if target == 0 {
            return Err(BingoError::InvalidCountTarget);
        }
        Ok(Goal {
            kind: GoalKind::Count {
                target_count: target,
                current_count,
            },
            is_completed: current_count >= target,
            ..self.clone()
        })
    }

    /// Record or un-record a habit day. Leaves `is_completed` alone.
    ///
    /// The key is normalised to `YYYY-MM-DD`, so toggling the same day twice
    /// restores the original set.
    pub fn toggle_habit_date(&self, date_key: &str) -> Result<Goal, BingoError> {
        let GoalKind::Habit { habit_dates } = &self.kind else {
            return Err(self.kind_mismatch(GoalType::Habit));
        };
        let key = parse_date(date_key)?.format(DATE_FORMAT).to_string();

        let mut habit_dates = habit_dates.clone();
        if !habit_dates.remove(&key) {
            habit_dates.insert(key);
        }
        Ok(Goal {
            kind: GoalKind::Habit { habit_dates },
            ..self.clone()
        })
    }

    /// Number of recorded habit days in the given month. Zero for goals
    /// that aren't habits.
    pub fn habit_days_in_month(&self, year: i32, month: u32) -> usize {
        match &self.kind {
            GoalKind::Habit { habit_dates } => {
                let prefix = format!("{year:04}-{month:02}-");
                habit_dates.iter().filter(|d| d.starts_with(&prefix)).count()
            }
            _ => 0,
        }
    }

    /// Set the goal period.
    pub fn set_date_range(
        &self,
        start: &str,
        end: &str,
        check: DateRangeCheck,
    ) -> Result<Goal, BingoError> {
        if check == DateRangeCheck::Strict {
            let (from, to) = (parse_date(start)?, parse_date(end)?);
            if from > to {
                return Err(BingoError::InvalidRange {
                    start: start.to_string(),
                    end: end.to_string(),
                });
            }
        }
        Ok(Goal {
            start_date: start.to_string(),
            end_date: end.to_string(),
            ..self.clone()
        })
    }

    pub fn with_title(&self, title: impl Into<String>) -> Goal {
        Goal {
            title: title.into(),
            ..self.clone()
        }
    }

    pub fn with_notes(&self, notes: impl Into<String>) -> Goal {
        Goal {
            notes: notes.into(),
            ..self.clone()
        }
    }

    /// Switch completion mode. Choosing the current mode keeps its state;
    /// a different mode starts fresh and clears completion.
    pub fn with_kind(&self, goal_type: GoalType) -> Goal {
        if self.goal_type() == goal_type {
            return self.clone();
        }
        Goal {
            kind: GoalKind::fresh(goal_type),
            is_completed: false,
            ..self.clone()
        }
    }

    fn kind_mismatch(&self, expected: GoalType) -> BingoError {
        BingoError::KindMismatch {
            goal_id: self.id.clone(),
            expected: expected.as_str(),
            actual: self.goal_type().as_str(),
        }
    }
}

/// `start` plus `days`, for `days` in `0..=MAX_GOAL_DURATION_DAYS`.
pub fn period_end(start: NaiveDate, days: i64) -> Result<NaiveDate, BingoError> {
    let out_of_range = BingoError::InvalidDuration {
        days,
        max: MAX_GOAL_DURATION_DAYS,
    };
    if !(0..=MAX_GOAL_DURATION_DAYS).contains(&days) {
        return Err(out_of_range);
    }
    Duration::try_days(days)
        .and_then(|d| start.checked_add_signed(d))
        .ok_or(out_of_range)
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(value: &str) -> Result<NaiveDate, BingoError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| BingoError::InvalidDate {
        value: value.to_string(),
    })
}
