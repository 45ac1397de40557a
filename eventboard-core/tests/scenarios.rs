//! End-to-end walk through the submit → validate → store → query flow.

use chrono::{DateTime, TimeZone, Utc};
use eventboard_core::query::{self, paginate};
use eventboard_core::storage::LocalStorage;
use eventboard_core::validate::validate;
use eventboard_core::{
    Board, BoundaryPolicy, Category, EventBoardError, EventDraft, EventId, EventStore,
    FilterCriteria, Venue,
};

fn at(hour: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, hour, min, 0).unwrap()
}

fn draft(id: Option<&str>, category: Category, start: DateTime<Utc>, end: DateTime<Utc>) -> EventDraft {
    EventDraft {
        id: id.map(EventId::from),
        title: format!("{} event", category),
        description: "Scenario".to_string(),
        category,
        venue: Venue::Online {
            event_link: "https://meet.example.com/room".to_string(),
        },
        start,
        end,
        organizer: "Sample Organizer".to_string(),
    }
}

fn store_with_event_one() -> EventStore {
    let mut store = EventStore::new();
    store
        .add(draft(Some("1"), Category::General, at(10, 0), at(11, 0)))
        .unwrap();
    store
}

#[test]
fn adjacent_event_is_accepted() {
    let store = store_with_event_one();
    let candidate = draft(None, Category::General, at(11, 0), at(12, 0));
    assert!(validate(&candidate, &store, None, BoundaryPolicy::HalfOpen).is_ok());
}

#[test]
fn nested_event_is_rejected_with_event_one() {
    let store = store_with_event_one();
    let candidate = draft(None, Category::General, at(10, 30), at(10, 45));

    match validate(&candidate, &store, None, BoundaryPolicy::HalfOpen) {
        Err(EventBoardError::OverlapConflict(conflict)) => assert_eq!(conflict.id.as_str(), "1"),
        other => panic!("expected overlap conflict, got {:?}", other),
    }
}

#[test]
fn zero_length_event_is_invalid() {
    let candidate = draft(None, Category::General, at(10, 0), at(10, 0));
    for store in [EventStore::new(), store_with_event_one()] {
        assert!(matches!(
            validate(&candidate, &store, None, BoundaryPolicy::HalfOpen),
            Err(EventBoardError::InvalidWindow { .. })
        ));
    }
}

#[test]
fn category_filter_returns_only_workshop() {
    let mut board = Board::default();
    let a = board
        .create(draft(Some("A"), Category::Workshop, at(8, 0), at(9, 0)))
        .unwrap();
    board
        .create(draft(Some("B"), Category::General, at(9, 0), at(10, 0)))
        .unwrap();

    let criteria = FilterCriteria {
        category: Some(Category::Workshop),
        ..Default::default()
    };
    let result = query::query(board.events(), &criteria);
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].id, a);
}

#[test]
fn editing_into_a_neighbour_leaves_store_untouched() {
    let mut board = Board::default();
    let a = board
        .create(draft(Some("A"), Category::Workshop, at(8, 0), at(9, 0)))
        .unwrap();
    let b = board
        .create(draft(Some("B"), Category::General, at(9, 0), at(10, 0)))
        .unwrap();
    let before = board.events().to_vec();

    let mut moved = board.get(&a).unwrap().to_draft();
    moved.start = at(9, 30);
    moved.end = at(10, 30);

    let err = board.edit(&a, moved).unwrap_err();
    assert_eq!(err.conflict().map(|e| e.id.clone()), Some(b));
    assert_eq!(board.events(), before.as_slice());
}

#[test]
fn board_survives_a_save_and_reload() {
    let dir = tempfile::tempdir().unwrap();
    let storage = LocalStorage::new(dir.path());

    let mut board = Board::new(storage.load_events().unwrap(), BoundaryPolicy::HalfOpen);
    for hour in 8..15 {
        board
            .create(draft(None, Category::Meetup, at(hour, 0), at(hour + 1, 0)))
            .unwrap();
    }
    storage.save_events(board.store()).unwrap();

    let reloaded = Board::new(storage.load_events().unwrap(), BoundaryPolicy::HalfOpen);
    assert_eq!(reloaded.events(), board.events());

    let all = reloaded.query(&FilterCriteria::default(), None);
    let second = paginate(&all, 2, 5);
    assert_eq!(second.items.len(), 2);
    assert_eq!(second.total_pages(), 2);

    // The reloaded board still enforces the invariant.
    let mut reloaded = reloaded;
    assert!(reloaded
        .create(draft(None, Category::Meetup, at(12, 30), at(13, 30)))
        .is_err());
}
