// mod.rs - Shared plumbing for the bingo subcommands.
//
// Each command is one transition: load the saved session, apply the
// action, save best-effort, dispatch the events the change produced.

pub mod board;
pub mod goal;
pub mod setup;

use bingo_goal::{
    BingoConfig, BingoError, BingoEvent, EventDispatcher, EventLog, Session, SnapshotStore,
};

/// Everything a command needs: config, the snapshot store, and event sinks.
pub struct Context {
    pub config: BingoConfig,
    pub store: SnapshotStore,
    dispatcher: EventDispatcher,
}

impl Context {
    pub fn open(config: BingoConfig) -> anyhow::Result<Self> {
        let store = SnapshotStore::new(&config.data_dir, &config.board.storage_key)?;
        let dispatcher = EventDispatcher::new().with_sink(EventLog::new(&config.events_log));
        Ok(Self {
            config,
            store,
            dispatcher,
        })
    }

    /// The saved session, or a fresh one.
    pub fn load(&self) -> Session {
        self.store.load()
    }

    /// Run one transition against the saved session and persist the result.
    ///
    /// On error nothing is saved and the previous snapshot stays current.
    pub fn apply<F>(&self, transition: F) -> anyhow::Result<Session>
    where
        F: FnOnce(&Session) -> Result<Session, BingoError>,
    {
        let before = self.load();
        let after = transition(&before)?;
        self.store.save_best_effort(&after);

        for event in &self.dispatcher.transition(&before, &after) {
            if let Some(line) = announcement(event) {
                println!("{line}");
            }
        }
        Ok(after)
    }
}

/// One-line message for the events worth telling the user about.
fn announcement(event: &BingoEvent) -> Option<String> {
    match event {
        BingoEvent::GoalCompleted { title, .. } => Some(format!("Completed: {title}")),
        BingoEvent::GoalReopened { title, .. } => Some(format!("Reopened: {title}")),
        BingoEvent::LineCompleted {
            line,
            completed_lines,
            ..
        } => Some(format!(
            "BINGO! {line} complete ({completed_lines} line(s) total)"
        )),
        _ => None,
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use bingo_goal::AppStage;

    #[test]
    fn failed_transition_keeps_saved_snapshot() {
        let (_project, ctx) = testing::context();
        let result = ctx.apply(|s| s.start());
        assert!(result.is_err());
        assert!(!ctx.store.path().exists());
        assert_eq!(ctx.load().stage, AppStage::Setup);
    }

    #[test]
    fn line_completion_is_announced() {
        let event = BingoEvent::LineCompleted {
            board_id: uuid::Uuid::new_v4(),
            line: bingo_goal::Line::Diagonal,
            completed_lines: 2,
            timestamp: chrono::Utc::now(),
        };
        assert_eq!(
            announcement(&event).unwrap(),
            "BINGO! diagonal complete (2 line(s) total)"
        );
    }
}
