// events.rs - Event model and notification dispatch.
//
// Events are derived by comparing two consecutive session snapshots, so the
// core never has to remember to emit them. Notification sinks (the JSONL
// log, anything a front end adds) receive them through the dispatcher.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::BingoError;
use crate::lines::Line;
use crate::session::{AppStage, Session};

/// Events emitted when the session changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum BingoEvent {
    /// A new board was laid out.
    SessionStarted {
        board_id: Uuid,
        user_name: String,
        size: usize,
        target_bingo_lines: u32,
        timestamp: DateTime<Utc>,
    },

    /// The session moved to another stage.
    StageChanged {
        from_stage: AppStage,
        to_stage: AppStage,
        timestamp: DateTime<Utc>,
    },

    /// A cell became complete.
    GoalCompleted {
        board_id: Uuid,
        cell: usize,
        title: String,
        timestamp: DateTime<Utc>,
    },

    /// A cell stopped being complete.
    GoalReopened {
        board_id: Uuid,
        cell: usize,
        title: String,
        timestamp: DateTime<Utc>,
    },

    /// A row, column or diagonal was completed.
    LineCompleted {
        board_id: Uuid,
        line: Line,
        completed_lines: u32,
        timestamp: DateTime<Utc>,
    },

    /// The board reached its target line count.
    TargetReached {
        board_id: Uuid,
        completed_lines: u32,
        target_bingo_lines: u32,
        timestamp: DateTime<Utc>,
    },

    /// The board was thrown away and the session went back to setup.
    SessionReset {
        board_id: Option<Uuid>,
        timestamp: DateTime<Utc>,
    },
}

impl BingoEvent {
    /// Get the event type name as a string.
    pub fn event_type(&self) -> &str {
        match self {
            BingoEvent::SessionStarted { .. } => "session_started",
            BingoEvent::StageChanged { .. } => "stage_changed",
            BingoEvent::GoalCompleted { .. } => "goal_completed",
            BingoEvent::GoalReopened { .. } => "goal_reopened",
            BingoEvent::LineCompleted { .. } => "line_completed",
            BingoEvent::TargetReached { .. } => "target_reached",
            BingoEvent::SessionReset { .. } => "session_reset",
        }
    }

    /// Events describing the step from `before` to `after`.
    pub fn between(before: &Session, after: &Session) -> Vec<BingoEvent> {
        let timestamp = Utc::now();
        let mut events = Vec::new();

        if after.stage == AppStage::Setup && before.stage != AppStage::Setup {
            events.push(BingoEvent::SessionReset {
                board_id: before.board.as_ref().map(|b| b.board_id),
                timestamp,
            });
            return events;
        }

        if before.stage == AppStage::Setup {
            if let Some(board) = &after.board {
                events.push(BingoEvent::SessionStarted {
                    board_id: board.board_id,
                    user_name: board.user_name.clone(),
                    size: board.size.get(),
                    target_bingo_lines: board.target_bingo_lines,
                    timestamp,
                });
            }
        }

        if before.stage != after.stage {
            events.push(BingoEvent::StageChanged {
                from_stage: before.stage,
                to_stage: after.stage,
                timestamp,
            });
        }

        let (Some(old), Some(new)) = (&before.board, &after.board) else {
            return events;
        };
        if old.board_id != new.board_id {
            return events;
        }

        for (cell, (was, now)) in old.goals.iter().zip(&new.goals).enumerate() {
            if was.is_completed == now.is_completed {
                continue;
            }
            let title = now.title.clone();
            events.push(if now.is_completed {
                BingoEvent::GoalCompleted {
                    board_id: new.board_id,
                    cell,
                    title,
                    timestamp,
                }
            } else {
                BingoEvent::GoalReopened {
                    board_id: new.board_id,
                    cell,
                    title,
                    timestamp,
                }
            });
        }

        let old_lines = old.completed().unwrap_or_default();
        if let Ok(new_lines) = new.completed() {
            for line in new_lines.into_iter().filter(|l| !old_lines.contains(l)) {
                events.push(BingoEvent::LineCompleted {
                    board_id: new.board_id,
                    line,
                    completed_lines: new.completed_lines,
                    timestamp,
                });
            }
        }

        if after.stage == AppStage::Active
            && new.has_reached_target()
            && (before.stage != AppStage::Active || !old.has_reached_target())
        {
            events.push(BingoEvent::TargetReached {
                board_id: new.board_id,
                completed_lines: new.completed_lines,
                target_bingo_lines: new.target_bingo_lines,
                timestamp,
            });
        }

        events
    }
}

/// Receives the events of one session transition, as a batch.
pub trait NotificationSink: Send {
    /// Errors are reported to the dispatcher, which logs them and moves on.
    fn notify(&self, events: &[BingoEvent]) -> Result<(), BingoError>;
}

/// JSONL history of everything that happened to the board.
pub struct EventLog {
    path: PathBuf,
}

impl EventLog {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl NotificationSink for EventLog {
    fn notify(&self, events: &[BingoEvent]) -> Result<(), BingoError> {
        if events.is_empty() {
            return Ok(());
        }
        let io_error = |source: std::io::Error| BingoError::IoError {
            path: self.path.display().to_string(),
            source,
        };

        let mut batch = String::new();
        for event in events {
            batch.push_str(&serde_json::to_string(event)?);
            batch.push('\n');
        }
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(io_error)?;
        }
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .and_then(|mut file| file.write_all(batch.as_bytes()))
            .map_err(io_error)
    }
}

/// Turns each session transition into events and hands them to the sinks.
#[derive(Default)]
pub struct EventDispatcher {
    sinks: Vec<Box<dyn NotificationSink>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sink(mut self, sink: impl NotificationSink + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    /// Notify every sink of what changed from `before` to `after`, and
    /// return the events. A failing sink doesn't keep the others from
    /// hearing about it.
    pub fn transition(&self, before: &Session, after: &Session) -> Vec<BingoEvent> {
        let events = BingoEvent::between(before, after);
        if events.is_empty() {
            return events;
        }
        tracing::debug!(
            count = events.len(),
            from = %before.stage,
            to = %after.stage,
            "session events"
        );
        for sink in &self.sinks {
            if let Err(e) = sink.notify(&events) {
                tracing::warn!("notification sink error: {}", e);
            }
        }
        events
    }
}
