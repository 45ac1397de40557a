use anyhow::Result;
use eventboard_core::EventId;
use owo_colors::OwoColorize;

use super::form::{self, FormOptions};
use super::{Context, find_event};
use crate::EventFields;

pub fn run(ctx: &Context, id: &str, fields: EventFields) -> Result<()> {
    let session = ctx.require_login()?;
    let tz = ctx.config.timezone();

    let mut board = ctx.load_board()?;
    let current = find_event(&board, id)?.to_draft();

    let interactive = no_fields_given(&fields);
    let opts = FormOptions {
        tz,
        interactive,
        default_organizer: session.username,
    };

    let mut draft = form::build_draft(fields, Some(&current), &opts)?;
    let id = EventId::from(id);

    loop {
        match board.edit(&id, draft.clone()) {
            Ok(()) => break,
            Err(e) => form::retry_window(e, &mut draft, interactive, tz)?,
        }
    }

    ctx.save_board(&board)?;
    println!("{}", format!("  Updated: {}", draft.title).yellow());

    Ok(())
}

fn no_fields_given(fields: &EventFields) -> bool {
    [
        &fields.title,
        &fields.description,
        &fields.category,
        &fields.event_type,
        &fields.location,
        &fields.link,
        &fields.start,
        &fields.end,
        &fields.duration,
        &fields.organizer,
    ]
    .iter()
    .all(|f| f.is_none())
}
