//! Terminal rendering for eventboard types.
//!
//! Colors come from owo_colors; times are shown in the configured zone.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use eventboard_core::query::Page;
use eventboard_core::{Event, EventBoardError, EventType};
use owo_colors::OwoColorize;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";
const DESCRIPTION_WIDTH: usize = 30;

/// Extension trait for one-line TUI rendering.
pub trait Render {
    fn render(&self, tz: Tz) -> String;
}

impl Render for Event {
    fn render(&self, tz: Tz) -> String {
        format!(
            "{} {} {}",
            self.title.bold(),
            format_window(self.start, self.end, tz).dimmed(),
            format!("[{}]", self.category).cyan()
        )
    }
}

fn format_time(dt: DateTime<Utc>, tz: Tz) -> String {
    dt.with_timezone(&tz).format(TIME_FORMAT).to_string()
}

/// "2024-01-01 10:00 - 11:00", or both full timestamps across days.
fn format_window(start: DateTime<Utc>, end: DateTime<Utc>, tz: Tz) -> String {
    let local_start = start.with_timezone(&tz);
    let local_end = end.with_timezone(&tz);

    if local_start.date_naive() == local_end.date_naive() {
        format!("{} - {}", local_start.format(TIME_FORMAT), local_end.format("%H:%M"))
    } else {
        format!("{} - {}", local_start.format(TIME_FORMAT), local_end.format(TIME_FORMAT))
    }
}

fn truncate(s: &str, width: usize) -> String {
    let s = s.lines().next().unwrap_or("");
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let cut: String = s.chars().take(width.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}

/// The event table: one row per event, columns padded to fit.
pub fn table(events: &[&Event], tz: Tz) -> String {
    let header = ["Title", "Description", "Start", "End", "Category", "Type", "Id"];

    let rows: Vec<[String; 7]> = events
        .iter()
        .map(|e| {
            [
                e.title.clone(),
                truncate(&e.description, DESCRIPTION_WIDTH),
                format_time(e.start, tz),
                format_time(e.end, tz),
                e.category.to_string(),
                e.event_type().to_string(),
                e.id.to_string(),
            ]
        })
        .collect();

    let mut widths = header.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let pad = |cells: &[String]| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut lines = Vec::with_capacity(rows.len() + 1);
    let header_cells: Vec<String> = header.iter().map(|h| h.to_string()).collect();
    lines.push(pad(&header_cells).bold().to_string());
    for row in &rows {
        lines.push(pad(&row[..]));
    }
    lines.join("\n")
}

/// Full view of a single event.
pub fn details(event: &Event, tz: Tz) -> String {
    let venue_label = match event.event_type() {
        EventType::Online => "Link",
        EventType::InPerson => "Location",
    };

    let mut lines = vec![
        event.title.bold().to_string(),
        format!("{}: {}", "When".dimmed(), format_window(event.start, event.end, tz)),
        format!("{}: {}", "Category".dimmed(), event.category),
        format!("{}: {}", "Type".dimmed(), event.event_type()),
        format!("{}: {}", venue_label.dimmed(), event.venue.detail()),
        format!("{}: {}", "Organizer".dimmed(), event.organizer),
        format!("{}: {}", "Id".dimmed(), event.id),
    ];

    if !event.description.is_empty() {
        lines.push(String::new());
        lines.push(event.description.clone());
    }

    lines.join("\n")
}

/// Message for a rejected submit. Overlaps show the event in the way.
pub fn rejection(err: &EventBoardError, tz: Tz) -> String {
    match err {
        EventBoardError::OverlapConflict(conflict) => format!(
            "  {}\n  {}\n     {}",
            "! Error".red().bold(),
            "Event time overlaps with an existing event. Please choose a different time.".red(),
            conflict.render(tz)
        ),
        other => format!("  {}", other.to_string().red()),
    }
}

pub fn page_footer(page: &Page<'_>) -> String {
    let shown = page.items.len();
    let pages = page.total_pages().max(1);
    let mut footer = format!(
        "Page {}/{} ({} of {} {})",
        page.number,
        pages,
        shown,
        page.total_items,
        if page.total_items == 1 { "event" } else { "events" }
    );
    if page.has_next() {
        footer.push_str(&format!(" - next: --page {}", page.number + 1));
    }
    footer
}
