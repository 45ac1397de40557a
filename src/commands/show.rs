use anyhow::Result;

use super::{Context, find_event};
use crate::render;

pub fn run(ctx: &Context, id: &str) -> Result<()> {
    let board = ctx.load_board()?;
    let event = find_event(&board, id)?;
    println!("{}", render::details(event, ctx.config.timezone()));
    Ok(())
}
