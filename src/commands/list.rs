use anyhow::Result;
use chrono_tz::Tz;
use eventboard_core::date_range::DateRange;
use eventboard_core::query::paginate;
use eventboard_core::{Category, EventType, FilterCriteria, Sort, SortKey, SortOrder};
use owo_colors::OwoColorize;

use super::Context;
use crate::render;

pub struct ListArgs {
    pub search: Option<String>,
    pub category: Option<String>,
    pub event_type: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub sort: Option<String>,
    pub desc: bool,
    pub page: usize,
    pub page_size: Option<usize>,
    pub all: bool,
    pub json: bool,
}

impl ListArgs {
    fn criteria(&self, tz: Tz) -> Result<FilterCriteria> {
        let mut criteria = FilterCriteria {
            search: self.search.clone().filter(|s| !s.is_empty()),
            category: self.category.as_deref().map(str::parse::<Category>).transpose()?,
            event_type: self.event_type.as_deref().map(str::parse::<EventType>).transpose()?,
            ..Default::default()
        };

        let range = DateRange::from_args(self.from.as_deref(), self.to.as_deref(), tz)?;
        range.apply(&mut criteria);

        Ok(criteria)
    }

    fn sort(&self) -> Result<Option<Sort>> {
        let Some(key) = self.sort.as_deref() else {
            return Ok(None);
        };
        let order = if self.desc {
            SortOrder::Descending
        } else {
            SortOrder::Ascending
        };
        Ok(Some(Sort {
            key: key.parse::<SortKey>()?,
            order,
        }))
    }
}

pub fn run(ctx: &Context, args: ListArgs) -> Result<()> {
    let criteria = args.criteria(ctx.config.timezone())?;
    let sort = args.sort()?;
    let board = ctx.load_board()?;

    let events = board.query(&criteria, sort);
    let page_size = if args.all {
        events.len()
    } else {
        args.page_size.unwrap_or(ctx.config.page_size)
    };
    let page = paginate(&events, args.page, page_size);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&page.items)?);
        return Ok(());
    }

    if events.is_empty() {
        let message = if criteria.is_empty() {
            "No events yet. Create one with: eventboard new"
        } else {
            "No events match these filters"
        };
        println!("{}", message.dimmed());
        return Ok(());
    }

    println!("{}", render::table(&page.items, ctx.config.timezone()));
    println!();
    println!("{}", render::page_footer(&page).dimmed());

    Ok(())
}
