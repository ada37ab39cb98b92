// setup.rs - `bingo setup`: Setup → Filling.

use bingo_goal::SetupRequest;

use super::{board, Context};

pub fn execute(ctx: &Context, name: &str, size: usize, target: u32) -> anyhow::Result<()> {
    let request = SetupRequest {
        user_name: name.to_string(),
        size,
        target_bingo_lines: target,
    };
    let today = chrono::Local::now().date_naive();
    let session = ctx.apply(|s| s.begin_filling(&request, &ctx.config.board, today))?;

    println!("{}", board::render(&session));
    println!("Give every cell a title with `bingo goal set <cell> --title ...`,");
    println!("then run `bingo start`.");
    Ok(())
}
