// goal.rs - Per-cell subcommands: set, show, toggle, count, habit.

use chrono::Datelike;
use clap::{Args, Subcommand};

use bingo_goal::{BingoError, DateRangeCheck, Goal, GoalKind, GoalType};

use super::{board, Context};

#[derive(Subcommand)]
pub enum GoalCommands {
    /// Edit a cell. Only the given fields change.
    Set {
        /// Cell number (0-based, row-major).
        cell: usize,
        #[command(flatten)]
        edit: GoalEdit,
    },
    /// Show details for a cell.
    Show {
        /// Cell number (0-based, row-major).
        cell: usize,
    },
}

/// Fields `bingo goal set` can change.
#[derive(Args, Debug, Default)]
pub struct GoalEdit {
    /// Goal title (e.g., "Run a 10k").
    #[arg(long)]
    pub title: Option<String>,
    /// Completion mode: general, count, or habit.
    #[arg(long)]
    pub kind: Option<GoalType>,
    /// Target for count goals.
    #[arg(long)]
    pub target: Option<u32>,
    /// Free-form notes.
    #[arg(long)]
    pub notes: Option<String>,
    /// Goal period start (YYYY-MM-DD). Requires --end.
    #[arg(long, requires = "end")]
    pub start: Option<String>,
    /// Goal period end (YYYY-MM-DD). Requires --start.
    #[arg(long, requires = "start")]
    pub end: Option<String>,
}

impl GoalEdit {
    /// Apply the requested changes to a goal, in field order.
    fn apply(&self, goal: &Goal, check: DateRangeCheck) -> Result<Goal, BingoError> {
        let mut g = goal.clone();
        if let Some(title) = &self.title {
            g = g.with_title(title.trim());
        }
        if let Some(kind) = self.kind {
            g = g.with_kind(kind);
        }
        if let Some(target) = self.target {
            g = g.set_count_target(target)?;
        }
        if let Some(notes) = &self.notes {
            g = g.with_notes(notes.as_str());
        }
        if let (Some(start), Some(end)) = (&self.start, &self.end) {
            g = g.set_date_range(start, end, check)?;
        }
        Ok(g)
    }
}

pub fn execute(cmd: &GoalCommands, ctx: &Context) -> anyhow::Result<()> {
    match cmd {
        GoalCommands::Set { cell, edit } => {
            let check = ctx.config.board.date_range_check();
            let session = ctx.apply(|s| s.update_goal(*cell, |g| edit.apply(g, check)))?;
            println!("{}", board::render(&session));
            Ok(())
        }
        GoalCommands::Show { cell } => {
            let session = ctx.load();
            let goal = session.board()?.goal(*cell)?;
            print!("{}", describe(goal));
            Ok(())
        }
    }
}

pub fn toggle(ctx: &Context, cell: usize) -> anyhow::Result<()> {
    let session = ctx.apply(|s| s.update_goal(cell, |g| Ok(g.toggle_completed())))?;
    println!("{}", board::render(&session));
    Ok(())
}

pub fn count(ctx: &Context, cell: usize, delta: i64) -> anyhow::Result<()> {
    let session = ctx.apply(|s| s.update_goal(cell, |g| g.apply_count_delta(delta)))?;
    println!("{}", board::render(&session));
    Ok(())
}

pub fn habit(ctx: &Context, cell: usize, date: Option<&str>) -> anyhow::Result<()> {
    let today = chrono::Local::now().date_naive();
    let date = date
        .map(str::to_string)
        .unwrap_or_else(|| today.format(bingo_goal::goal::DATE_FORMAT).to_string());
    let session = ctx.apply(|s| s.update_goal(cell, |g| g.toggle_habit_date(&date)))?;
    println!("{}", board::render(&session));
    Ok(())
}

fn describe(goal: &Goal) -> String {
    let mut out = String::new();
    out.push_str(&format!("Goal:      {}\n", goal.id));
    out.push_str(&format!("Title:     {}\n", goal.title));
    out.push_str(&format!("Kind:      {}\n", goal.goal_type()));
    out.push_str(&format!("Period:    {} .. {}\n", goal.start_date, goal.end_date));
    out.push_str(&format!(
        "Completed: {}\n",
        if goal.is_completed { "yes" } else { "no" }
    ));
    match &goal.kind {
        GoalKind::General => {}
        GoalKind::Count {
            target_count,
            current_count,
        } => out.push_str(&format!("Progress:  {current_count} / {target_count}\n")),
        GoalKind::Habit { habit_dates } => {
            let today = chrono::Local::now().date_naive();
            out.push_str(&format!(
                "Habit:     {} day(s) this month, {} total\n",
                goal.habit_days_in_month(today.year(), today.month()),
                habit_dates.len()
            ));
        }
    }
    if !goal.notes.is_empty() {
        out.push_str(&format!("Notes:     {}\n", goal.notes));
    }
    out
}
