use anyhow::Result;
use dialoguer::Confirm;
use owo_colors::OwoColorize;

use super::{Context, find_event};
use crate::render::Render;

pub fn run(ctx: &Context, id: &str, yes: bool) -> Result<()> {
    let tz = ctx.config.timezone();
    let mut board = ctx.load_board()?;
    let event = find_event(&board, id)?.clone();

    if !yes {
        println!("{}", event.render(tz));
        let confirmed = Confirm::new()
            .with_prompt("Are you sure?")
            .default(false)
            .interact()?;

        if !confirmed {
            return Ok(());
        }
    }

    board.delete(&event.id)?;
    ctx.save_board(&board)?;

    println!("{}", format!("  Deleted: {}", event.title).red());
    Ok(())
}
