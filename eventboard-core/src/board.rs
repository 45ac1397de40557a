//! The event board owned by one signed-in session.

use tracing::info;

use crate::error::{EventBoardError, EventBoardResult};
use crate::event::{Event, EventDraft, EventId};
use crate::interval::BoundaryPolicy;
use crate::query::{self, FilterCriteria, Sort};
use crate::store::EventStore;
use crate::validate::validate;

/// An event store whose writes are gated by the overlap check.
///
/// Every mutating method either applies its change fully or returns an
/// error and leaves the store untouched.
#[derive(Debug, Clone, Default)]
pub struct Board {
    store: EventStore,
    policy: BoundaryPolicy,
}

impl Board {
    pub fn new(store: EventStore, policy: BoundaryPolicy) -> Self {
        Board { store, policy }
    }

    pub fn policy(&self) -> BoundaryPolicy {
        self.policy
    }

    pub fn store(&self) -> &EventStore {
        &self.store
    }

    pub fn into_store(self) -> EventStore {
        self.store
    }

    pub fn events(&self) -> &[Event] {
        self.store.list()
    }

    pub fn get(&self, id: &EventId) -> Option<&Event> {
        self.store.get(id)
    }

    /// Check a candidate without writing it, as a form would before submit.
    pub fn check(&self, draft: &EventDraft, editing: Option<&EventId>) -> EventBoardResult<()> {
        draft.check()?;
        validate(draft, &self.store, editing, self.policy)
    }

    pub fn create(&mut self, draft: EventDraft) -> EventBoardResult<EventId> {
        self.check(&draft, None)?;
        let id = self.store.add(draft)?;
        info!(id = %id, "event created");
        Ok(id)
    }

    /// Replace the event `id` with `draft`. The event is excluded from
    /// the overlap scan so it can keep or shift its own window.
    pub fn edit(&mut self, id: &EventId, draft: EventDraft) -> EventBoardResult<()> {
        if !self.store.contains(id) {
            return Err(EventBoardError::NotFound(id.clone()));
        }
        self.check(&draft, Some(id))?;
        self.store.update(id, draft)?;
        info!(id = %id, "event updated");
        Ok(())
    }

    pub fn delete(&mut self, id: &EventId) -> EventBoardResult<Event> {
        let removed = self.store.delete(id)?;
        info!(id = %id, "event deleted");
        Ok(removed)
    }

    /// Filtered and optionally sorted view of the board.
    pub fn query(&self, criteria: &FilterCriteria, sort: Option<Sort>) -> Vec<&Event> {
        let mut events = query::query(&self.store, criteria);
        if let Some(sort) = sort {
            query::sort(&mut events, sort);
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{Category, Venue};
    use crate::query::SortKey;
    use chrono::{DateTime, TimeZone, Utc};

    fn at(hour: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, hour, min, 0).unwrap()
    }

    fn make_draft(title: &str, category: Category, start: DateTime<Utc>, end: DateTime<Utc>) -> EventDraft {
        EventDraft {
            id: None,
            title: title.to_string(),
            description: String::new(),
            category,
            venue: Venue::Online {
                event_link: "https://meet.example.com".to_string(),
            },
            start,
            end,
            organizer: "Org".to_string(),
        }
    }

    #[test]
    fn test_edit_into_overlap_is_rejected_and_store_unchanged() {
        let mut board = Board::default();
        let a = board
            .create(make_draft("A", Category::Workshop, at(9, 0), at(10, 0)))
            .unwrap();
        let b = board
            .create(make_draft("B", Category::General, at(10, 0), at(11, 0)))
            .unwrap();

        let mut moved = board.get(&a).unwrap().to_draft();
        moved.end = at(10, 30);

        let err = board.edit(&a, moved).unwrap_err();
        assert_eq!(err.conflict().unwrap().id, b);
        assert_eq!(board.get(&a).unwrap().end, at(10, 0));
    }

    #[test]
    fn test_edit_may_shift_within_own_window() {
        let mut board = Board::default();
        let a = board
            .create(make_draft("A", Category::General, at(9, 0), at(10, 0)))
            .unwrap();

        let mut shifted = board.get(&a).unwrap().to_draft();
        shifted.start = at(9, 30);
        shifted.end = at(10, 30);
        board.edit(&a, shifted).unwrap();

        assert_eq!(board.get(&a).unwrap().start, at(9, 30));
    }

    #[test]
    fn test_edit_unknown_id() {
        let mut board = Board::default();
        let err = board
            .edit(
                &EventId::from("nope"),
                make_draft("A", Category::General, at(9, 0), at(10, 0)),
            )
            .unwrap_err();
        assert!(matches!(err, EventBoardError::NotFound(_)));
    }

    #[test]
    fn test_create_rejects_invalid_fields_before_overlap() {
        let mut board = Board::default();
        let mut draft = make_draft("", Category::General, at(9, 0), at(10, 0));
        assert!(matches!(
            board.create(draft.clone()),
            Err(EventBoardError::InvalidField { .. })
        ));

        draft.title = "ok".to_string();
        draft.end = draft.start;
        assert!(matches!(
            board.create(draft),
            Err(EventBoardError::InvalidWindow { .. })
        ));
        assert!(board.events().is_empty());
    }

    #[test]
    fn test_query_with_sort() {
        let mut board = Board::default();
        board
            .create(make_draft("Zeta", Category::General, at(8, 0), at(9, 0)))
            .unwrap();
        board
            .create(make_draft("Alpha", Category::General, at(12, 0), at(13, 0)))
            .unwrap();

        let titles: Vec<_> = board
            .query(&FilterCriteria::default(), Some(Sort::ascending(SortKey::Title)))
            .into_iter()
            .map(|e| e.title.as_str())
            .collect();
        assert_eq!(titles, ["Alpha", "Zeta"]);
    }
}
