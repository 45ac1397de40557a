//! The event form: turns flags and prompts into an `EventDraft`.

use anyhow::{Context as _, Result};
use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;
use dialoguer::{Input, Select};
use eventboard_core::date_range::{self, localize};
use eventboard_core::{Category, EventBoardError, EventDraft, EventType, Venue};
use owo_colors::OwoColorize;

use crate::EventFields;
use crate::render;

const INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M";

pub struct FormOptions {
    pub tz: Tz,
    pub interactive: bool,
    /// Organizer used when creating without `--organizer`.
    pub default_organizer: String,
}

/// Build a draft from `fields`. When editing, `base` holds the current
/// values: anything not given keeps its value, and a moved start keeps
/// the event's length unless a new end or duration is given.
pub fn build_draft(
    fields: EventFields,
    base: Option<&EventDraft>,
    opts: &FormOptions,
) -> Result<EventDraft> {
    let interactive = opts.interactive;

    let title = ask_text(
        fields.title,
        "  Title",
        base.map(|b| b.title.as_str()),
        interactive,
        Some("--title"),
    )?;

    let description = ask_text(
        fields.description,
        "  Description (skip)",
        base.map(|b| b.description.as_str()),
        interactive,
        None,
    )?;

    let category = match fields.category {
        Some(c) => c.parse::<Category>()?,
        None if interactive => select_category(base.map(|b| b.category))?,
        None => base.map(|b| b.category).unwrap_or(Category::General),
    };

    let event_type = match fields.event_type.as_deref() {
        Some(t) => t.parse::<EventType>()?,
        None if fields.link.is_some() => EventType::Online,
        None if fields.location.is_some() => EventType::InPerson,
        None if interactive => select_event_type(base.map(|b| b.event_type()))?,
        None => base
            .map(|b| b.event_type())
            .context("Missing --type (Online or In-Person)")?,
    };

    let current_detail = base
        .filter(|b| b.event_type() == event_type)
        .map(|b| b.venue.detail());

    let venue = match event_type {
        EventType::Online => Venue::Online {
            event_link: ask_text(fields.link, "  Event link", current_detail, interactive, Some("--link"))?,
        },
        EventType::InPerson => Venue::InPerson {
            location: ask_text(fields.location, "  Location", current_detail, interactive, Some("--location"))?,
        },
    };

    let start = match fields.start {
        Some(s) => parse_datetime(&s, opts.tz)?,
        None if interactive => prompt_datetime("  Starts", base.map(|b| b.start), opts.tz)?,
        None => base.map(|b| b.start).context("Missing --start")?,
    };

    // Length to keep when only the start moves.
    let kept_length = base.map(|b| b.end - b.start);

    let end = if let Some(e) = fields.end {
        parse_datetime(&e, opts.tz)?
    } else if let Some(d) = fields.duration {
        apply_duration(start, &d)?
    } else if interactive {
        prompt_end(start, kept_length, opts.tz)?
    } else {
        offset(start, kept_length.unwrap_or_else(default_length))?
    };

    let organizer_default = base
        .map(|b| b.organizer.as_str())
        .unwrap_or(opts.default_organizer.as_str());
    let organizer = match fields.organizer {
        Some(o) => o,
        None if interactive => ask_text(None, "  Organizer", Some(organizer_default), true, Some("--organizer"))?,
        None => organizer_default.to_string(),
    };

    Ok(EventDraft {
        id: base.and_then(|b| b.id.clone()),
        title,
        description,
        category,
        venue,
        start,
        end,
        organizer,
    })
}

/// Ask again for the start and end after a rejected submit.
pub fn prompt_window(draft: &mut EventDraft, tz: Tz) -> Result<()> {
    let length = draft.end - draft.start;
    draft.start = prompt_datetime("  Starts", Some(draft.start), tz)?;
    draft.end = prompt_end(draft.start, Some(length), tz)?;
    Ok(())
}

/// Handle a rejected submit. The interactive form shows why and asks for
/// a new window; otherwise the error is returned unprinted.
pub fn retry_window(err: EventBoardError, draft: &mut EventDraft, interactive: bool, tz: Tz) -> Result<()> {
    match err {
        EventBoardError::OverlapConflict(_) | EventBoardError::InvalidWindow { .. } if interactive => {
            eprintln!("{}", render::rejection(&err, tz));
            prompt_window(draft, tz)
        }
        err => Err(err.into()),
    }
}

/// Text field: the flag value, else a prompt, else the current value.
/// A missing required field in non-interactive mode names its flag.
/// Optional fields prefill the current value as editable text, so the
/// answer can clear it.
fn ask_text(
    value: Option<String>,
    prompt: &str,
    current: Option<&str>,
    interactive: bool,
    required_flag: Option<&str>,
) -> Result<String> {
    if let Some(v) = value {
        return Ok(v);
    }

    if interactive {
        let mut input = Input::<String>::new().with_prompt(prompt);
        match (current, required_flag) {
            (Some(current), Some(_)) => input = input.default(current.to_string()),
            (Some(current), None) => input = input.with_initial_text(current).allow_empty(true),
            (None, None) => input = input.allow_empty(true),
            (None, Some(_)) => {}
        }
        return Ok(input.interact_text()?);
    }

    match (current, required_flag) {
        (Some(c), _) => Ok(c.to_string()),
        (None, Some(flag)) => anyhow::bail!("Missing {}", flag),
        (None, None) => Ok(String::new()),
    }
}

fn select_category(current: Option<Category>) -> Result<Category> {
    let items: Vec<&str> = Category::ALL.iter().map(|c| c.as_str()).collect();
    let default = current
        .and_then(|c| Category::ALL.iter().position(|x| *x == c))
        .unwrap_or(0);

    let selection = Select::new()
        .with_prompt("  Category")
        .items(&items)
        .default(default)
        .interact()?;
    Ok(Category::ALL[selection])
}

fn select_event_type(current: Option<EventType>) -> Result<EventType> {
    let items: Vec<&str> = EventType::ALL.iter().map(|t| t.as_str()).collect();
    let default = current
        .and_then(|t| EventType::ALL.iter().position(|x| *x == t))
        .unwrap_or(0);

    let selection = Select::new()
        .with_prompt("  Event type")
        .items(&items)
        .default(default)
        .interact()?;
    Ok(EventType::ALL[selection])
}

/// Prompt for a date/time with retry on parse errors.
fn prompt_datetime(prompt: &str, current: Option<DateTime<Utc>>, tz: Tz) -> Result<DateTime<Utc>> {
    loop {
        let mut input = Input::<String>::new().with_prompt(prompt);
        if let Some(current) = current {
            input = input.default(current.with_timezone(&tz).format(INPUT_FORMAT).to_string());
        }
        let input = input.interact_text()?;

        match parse_datetime(&input, tz) {
            Ok(result) => return Ok(result),
            Err(e) => eprintln!("  {}", e.to_string().red()),
        }
    }
}

/// Prompt for the end as a time or a length, with retry on parse errors.
/// Empty input keeps `kept_length`, or one hour.
fn prompt_end(start: DateTime<Utc>, kept_length: Option<Duration>, tz: Tz) -> Result<DateTime<Utc>> {
    let fallback = offset(start, kept_length.unwrap_or_else(default_length))?;
    let hint = fallback.with_timezone(&tz).format("%H:%M").to_string();

    loop {
        let input: String = Input::new()
            .with_prompt(format!("  Ends or how long? ({})", hint))
            .default(String::new())
            .show_default(false)
            .interact_text()?;
        if input.is_empty() {
            return Ok(fallback);
        }
        match parse_end(&input, start, tz) {
            Ok(result) => return Ok(result),
            Err(e) => eprintln!("  {}", e.to_string().red()),
        }
    }
}

/// Parse a date/time: exact formats first, then natural language
/// ("tomorrow 3pm", "fri 9:30").
pub fn parse_datetime(input: &str, tz: Tz) -> Result<DateTime<Utc>> {
    if let Ok(dt) = date_range::parse_datetime(input, tz) {
        return Ok(dt);
    }

    let expanded = expand_abbreviations(input);
    let naive = fuzzydate::parse(&expanded)
        .map_err(|_| anyhow::anyhow!("Could not parse date/time: \"{}\"", input))?;
    Ok(localize(naive, tz)?)
}

/// Parse an end input: a duration first (humantime), then a date/time.
fn parse_end(input: &str, start: DateTime<Utc>, tz: Tz) -> Result<DateTime<Utc>> {
    if let Ok(end) = try_apply_duration(start, input) {
        return Ok(end);
    }

    let cleaned = input
        .strip_prefix("until ")
        .or_else(|| input.strip_prefix("to "))
        .unwrap_or(input);

    parse_datetime(cleaned, tz)
}

fn apply_duration(start: DateTime<Utc>, dur_input: &str) -> Result<DateTime<Utc>> {
    try_apply_duration(start, dur_input)
        .with_context(|| format!("Could not parse duration: \"{}\"", dur_input))
}

fn try_apply_duration(start: DateTime<Utc>, dur_input: &str) -> Result<DateTime<Utc>> {
    let std_dur = humantime::parse_duration(dur_input.trim()).map_err(|e| anyhow::anyhow!("{}", e))?;
    let chrono_dur = Duration::from_std(std_dur).context("Duration too large")?;
    offset(start, chrono_dur)
}

/// Length of a new event when no end is given.
fn default_length() -> Duration {
    Duration::hours(1)
}

/// `start + length`, failing instead of overflowing past chrono's range.
fn offset(start: DateTime<Utc>, length: Duration) -> Result<DateTime<Utc>> {
    start.checked_add_signed(length).context("Duration too large")
}

/// Expand common abbreviations that fuzzydate doesn't handle.
fn expand_abbreviations(input: &str) -> String {
    const ABBREVIATIONS: [(&str, &str); 22] = [
        ("mon", "monday"),
        ("tue", "tuesday"),
        ("tues", "tuesday"),
        ("wed", "wednesday"),
        ("thu", "thursday"),
        ("thur", "thursday"),
        ("thurs", "thursday"),
        ("fri", "friday"),
        ("sat", "saturday"),
        ("sun", "sunday"),
        ("jan", "january"),
        ("feb", "february"),
        ("mar", "march"),
        ("apr", "april"),
        ("jun", "june"),
        ("jul", "july"),
        ("aug", "august"),
        ("sep", "september"),
        ("sept", "september"),
        ("oct", "october"),
        ("nov", "november"),
        ("dec", "december"),
    ];

    input
        .to_lowercase()
        .split_whitespace()
        .map(|word| {
            ABBREVIATIONS
                .iter()
                .find(|(abbr, _)| *abbr == word)
                .map(|(_, full)| *full)
                .unwrap_or(word)
                .to_string()
        })
        .collect::<Vec<_>>()
        .join(" ")
}
