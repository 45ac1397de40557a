//! Filtering, sorting and paging of events for display.
//!
//! Everything here is a pure function of its inputs: callers re-run
//! [`query`] whenever the events or the criteria change.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::error::EventBoardError;
use crate::event::{Category, Event, EventType};

/// Filter criteria coming from the search and filter controls.
/// `None` means the criterion is not applied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    /// Case-insensitive substring of the title or description.
    pub search: Option<String>,
    pub category: Option<Category>,
    pub event_type: Option<EventType>,
    /// Keep events starting strictly after this instant.
    pub start_date: Option<DateTime<Utc>>,
    /// Keep events ending strictly before this instant.
    pub end_date: Option<DateTime<Utc>>,
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        *self == FilterCriteria::default()
    }

    pub fn matches(&self, event: &Event) -> bool {
        self.matches_search(event)
            && self.category.is_none_or(|c| event.category == c)
            && self.event_type.is_none_or(|t| event.event_type() == t)
            && self.start_date.is_none_or(|from| event.start > from)
            && self.end_date.is_none_or(|to| event.end < to)
    }

    fn matches_search(&self, event: &Event) -> bool {
        let needle = match self.search.as_deref() {
            Some(s) if !s.is_empty() => s.to_lowercase(),
            _ => return true,
        };

        event.title.to_lowercase().contains(&needle)
            || event.description.to_lowercase().contains(&needle)
    }
}

/// Events matching `criteria`, in input order.
pub fn query<'a, I>(events: I, criteria: &FilterCriteria) -> Vec<&'a Event>
where
    I: IntoIterator<Item = &'a Event>,
{
    events
        .into_iter()
        .filter(|event| criteria.matches(event))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// Case-insensitive; titles differing only in case fall back to
    /// byte order.
    Title,
    Start,
}

impl FromStr for SortKey {
    type Err = EventBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "title" => Ok(SortKey::Title),
            "start" | "date" => Ok(SortKey::Start),
            _ => Err(EventBoardError::invalid_field(
                "sort key",
                format!("'{}' is not 'title' or 'start'", s),
            )),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SortKey::Title => write!(f, "title"),
            SortKey::Start => write!(f, "start"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    pub key: SortKey,
    pub order: SortOrder,
}

impl Sort {
    pub fn ascending(key: SortKey) -> Self {
        Sort {
            key,
            order: SortOrder::Ascending,
        }
    }

    pub fn descending(key: SortKey) -> Self {
        Sort {
            key,
            order: SortOrder::Descending,
        }
    }

    fn compare(&self, a: &Event, b: &Event) -> Ordering {
        let ordering = match self.key {
            SortKey::Title => a
                .title
                .to_lowercase()
                .cmp(&b.title.to_lowercase())
                .then_with(|| a.title.cmp(&b.title)),
            SortKey::Start => a.start.cmp(&b.start),
        };
        match self.order {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    }
}

/// Stable sort: events with equal keys keep their relative order in
/// both directions.
pub fn sort(events: &mut [&Event], sort: Sort) {
    events.sort_by(|a, b| sort.compare(a, b));
}

/// One page of a result list.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a> {
    pub items: Vec<&'a Event>,
    /// 1-based page number that was requested.
    pub number: usize,
    pub page_size: usize,
    pub total_items: usize,
}

impl Page<'_> {
    pub fn total_pages(&self) -> usize {
        self.total_items.div_ceil(self.page_size.max(1))
    }

    pub fn has_next(&self) -> bool {
        self.number < self.total_pages()
    }
}

/// Slice `events` into the 1-based `page` of `page_size` items. A page
/// past the end is empty; `page_size` 0 is treated as 1.
pub fn paginate<'a>(events: &[&'a Event], page: usize, page_size: usize) -> Page<'a> {
    let page_size = page_size.max(1);
    let number = page.max(1);
    let start = (number - 1).saturating_mul(page_size);

    let items = events
        .iter()
        .skip(start)
        .take(page_size)
        .copied()
        .collect();

    Page {
        items,
        number,
        page_size,
        total_items: events.len(),
    }
}
