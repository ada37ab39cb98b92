// board.rs - Board-wide subcommands: start, status, ack, reset.

use chrono::Datelike;

use bingo_goal::{AppStage, Goal, GoalKind, Session};

use super::Context;

const CELL_WIDTH: usize = 18;

pub fn start(ctx: &Context) -> anyhow::Result<()> {
    let session = ctx.apply(Session::start)?;
    println!("{}", render(&session));
    Ok(())
}

pub fn status(ctx: &Context) -> anyhow::Result<()> {
    println!("{}", render(&ctx.load()));
    Ok(())
}

pub fn acknowledge(ctx: &Context) -> anyhow::Result<()> {
    let session = ctx.apply(|s| Ok(s.acknowledge_celebration()))?;
    println!("{}", render(&session));
    Ok(())
}

pub fn reset(ctx: &Context, confirmed: bool) -> anyhow::Result<()> {
    if !confirmed {
        anyhow::bail!("reset discards the whole board; re-run with --yes to confirm");
    }
    ctx.apply(|s| Ok(s.reset()))?;
    ctx.store.clear()?;
    println!("Board reset. Run `bingo setup --name <name>` to start over.");
    Ok(())
}

/// Text rendering of the session for the terminal.
pub fn render(session: &Session) -> String {
    let Some(board) = &session.board else {
        return "No board yet. Run `bingo setup --name <name>` to create one.".to_string();
    };

    let n = board.size.get();
    let mut out = String::new();
    let heading = match session.stage {
        AppStage::Active => format!("{}'s BINGO", board.user_name),
        _ => "Define Your Goals".to_string(),
    };
    out.push_str(&format!("{heading} ({}, stage: {})\n", board.size, session.stage));

    let rule = format!("+{}\n", format!("{}+", "-".repeat(CELL_WIDTH + 2)).repeat(n));
    out.push_str(&rule);
    for row in board.goals.chunks(n) {
        out.push('|');
        for goal in row {
            out.push_str(&format!(" {:<width$} |", cell_label(goal), width = CELL_WIDTH));
        }
        out.push('\n');
        out.push_str(&rule);
    }

    match session.stage {
        AppStage::Filling => {
            let titled = board.goals.len() - board.untitled_cells().len();
            out.push_str(&format!(
                "Filled {titled}/{} cells. Fill all slots to start.\n",
                board.goals.len()
            ));
        }
        _ => {
            out.push_str(&format!(
                "Completed lines: {} / target {}\n",
                board.completed_lines, board.target_bingo_lines
            ));
            if board.has_reached_target() {
                out.push_str("Bingo goal reached!\n");
            }
        }
    }
    if session.celebration.showing {
        out.push_str(&format!(
            "CONGRATS, {}! You reached your target of {} bingo line(s). \
             Run `bingo ack` to keep going or `bingo reset --yes` to start over.\n",
            board.user_name, board.target_bingo_lines
        ));
    }
    out
}

fn cell_label(goal: &Goal) -> String {
    let index = goal.id.trim_start_matches("goal-");
    if !goal.is_titled() {
        return format!("{index}: (empty)");
    }
    let mark = if goal.is_completed { "x" } else { " " };
    let progress = match &goal.kind {
        GoalKind::Count {
            target_count,
            current_count,
        } if !goal.is_completed => format!(" {current_count}/{target_count}"),
        GoalKind::Habit { .. } if !goal.is_completed => {
            let today = chrono::Local::now().date_naive();
            format!(" {}d", goal.habit_days_in_month(today.year(), today.month()))
        }
        _ => String::new(),
    };
    let prefix = format!("{index}[{mark}] ");
    let room = CELL_WIDTH.saturating_sub(prefix.chars().count() + progress.chars().count());
    format!("{prefix}{}{progress}", truncate(&goal.title, room))
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{kept}...")
    } else {
        s.to_string()
    }
}
