// end_to_end.rs - A whole board from setup to bingo, through the store.
//
//   1. Fresh project: loading yields a Setup session
//   2. Setup → Filling with a 3x3 board and a target of 2 lines
//   3. Fill every cell, including a count goal and a habit goal
//   4. Filling → Active
//   5. Complete row 0 (one via counter) → 1 line
//   6. Complete column 0 (cell 0 shared) → 2 lines, target reached
//   7. Each step saved and reloaded; events logged to JSONL
//   8. Reset → Setup, snapshot cleared

use std::fs;

use chrono::NaiveDate;
use tempfile::tempdir;

use bingo_goal::{
    AppStage, BingoConfig, EventDispatcher, EventLog, GoalType, Session, SetupRequest,
    SnapshotStore,
};

fn step(
    store: &SnapshotStore,
    dispatcher: &EventDispatcher,
    before: &Session,
    after: Session,
) -> Session {
    dispatcher.transition(before, &after);
    store.save(&after).unwrap();
    let reloaded = store.load();
    assert_eq!(reloaded, after);
    reloaded
}

#[test]
fn board_from_setup_to_two_bingo_lines() {
    let project = tempdir().unwrap();
    let config = BingoConfig::for_project(project.path());
    let store = SnapshotStore::new(&config.data_dir, &config.board.storage_key).unwrap();
    let dispatcher = EventDispatcher::new().with_sink(EventLog::new(&config.events_log));
    let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

    // 1. Nothing saved yet.
    let session = store.load();
    assert_eq!(session.stage, AppStage::Setup);

    // 2. Setup.
    let request = SetupRequest {
        user_name: "Mira".into(),
        size: 3,
        target_bingo_lines: 2,
    };
    let next = session.begin_filling(&request, &config.board, today).unwrap();
    let mut session = step(&store, &dispatcher, &session, next);
    assert_eq!(session.stage, AppStage::Filling);

    // 3. Fill in titles; cell 1 counts to 2, cell 3 is a habit.
    for i in 0..9 {
        let next = session
            .update_goal(i, |g| Ok(g.with_title(format!("Goal {i}"))))
            .unwrap();
        session = step(&store, &dispatcher, &session, next);
    }
    let next = session
        .update_goal(1, |g| g.with_kind(GoalType::Count).set_count_target(2))
        .unwrap();
    session = step(&store, &dispatcher, &session, next);
    let next = session
        .update_goal(3, |g| Ok(g.with_kind(GoalType::Habit)))
        .unwrap();
    session = step(&store, &dispatcher, &session, next);

    // 4. Start.
    let next = session.start().unwrap();
    session = step(&store, &dispatcher, &session, next);
    assert_eq!(session.stage, AppStage::Active);

    // 5. Row 0: cells 0 and 2 by hand, cell 1 by counting.
    for i in [0, 2] {
        let next = session.update_goal(i, |g| Ok(g.toggle_completed())).unwrap();
        session = step(&store, &dispatcher, &session, next);
    }
    let next = session.update_goal(1, |g| g.apply_count_delta(1)).unwrap();
    session = step(&store, &dispatcher, &session, next);
    assert_eq!(session.board().unwrap().completed_lines, 0);
    let next = session.update_goal(1, |g| g.apply_count_delta(1)).unwrap();
    session = step(&store, &dispatcher, &session, next);
    assert_eq!(session.board().unwrap().completed_lines, 1);
    assert!(!session.has_reached_target());

    // 6. Column 0: a habit day doesn't complete cell 3, the toggle does.
    let next = session
        .update_goal(3, |g| g.toggle_habit_date("2024-01-02"))
        .unwrap();
    session = step(&store, &dispatcher, &session, next);
    assert_eq!(session.board().unwrap().completed_lines, 1);
    for i in [3, 6] {
        let next = session.update_goal(i, |g| Ok(g.toggle_completed())).unwrap();
        session = step(&store, &dispatcher, &session, next);
    }
    let board = session.board().unwrap();
    assert_eq!(board.completed_lines, 2);
    assert!(session.has_reached_target());
    assert!(session.celebration.showing);
    assert_eq!(board.goals[3].habit_days_in_month(2024, 1), 1);

    // 7. Event log.
    let log = fs::read_to_string(&config.events_log).unwrap();
    assert!(log.contains("\"session_started\""));
    assert_eq!(log.matches("\"line_completed\"").count(), 2);
    assert_eq!(log.matches("\"target_reached\"").count(), 1);

    // 8. Reset.
    let next = session.reset();
    session = step(&store, &dispatcher, &session, next);
    assert_eq!(session, Session::new());
    assert!(store.clear().unwrap());
    assert!(fs::read_to_string(&config.events_log)
        .unwrap()
        .contains("\"session_reset\""));
}
