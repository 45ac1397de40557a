use anyhow::Result;
use eventboard_core::EventId;
use owo_colors::OwoColorize;

use super::Context;
use super::form::{self, FormOptions};
use crate::EventFields;

pub fn run(ctx: &Context, id: Option<String>, fields: EventFields) -> Result<()> {
    let session = ctx.require_login()?;
    let interactive = fields.title.is_none() || fields.start.is_none();
    let tz = ctx.config.timezone();

    let opts = FormOptions {
        tz,
        interactive,
        default_organizer: session.username,
    };

    let mut board = ctx.load_board()?;
    let mut draft = form::build_draft(fields, None, &opts)?;
    draft.id = id.map(EventId::from);

    let id = loop {
        match board.create(draft.clone()) {
            Ok(id) => break id,
            Err(e) => form::retry_window(e, &mut draft, interactive, tz)?,
        }
    };

    ctx.save_board(&board)?;

    if interactive {
        println!();
    }
    println!("{}", format!("  Created: {}", draft.title).green());
    println!("  {}", format!("id: {}", id).dimmed());

    Ok(())
}
