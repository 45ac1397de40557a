//! The in-memory event collection.
//!
//! The store keeps events in insertion order and knows nothing about
//! overlaps: callers run [`crate::validate::validate`] before writing.

use std::collections::HashSet;

use tracing::debug;

use crate::error::{EventBoardError, EventBoardResult};
use crate::event::{Event, EventDraft, EventId};

#[derive(Debug, Clone, Default)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    pub fn new() -> Self {
        EventStore::default()
    }

    /// Build a store from previously saved events, keeping their order.
    pub fn from_events(events: Vec<Event>) -> EventBoardResult<Self> {
        let mut seen = HashSet::new();
        for event in &events {
            if !seen.insert(&event.id) {
                return Err(EventBoardError::DuplicateId(event.id.clone()));
            }
        }
        Ok(EventStore { events })
    }

    /// Append an event. A supplied id is kept when it is free; otherwise a
    /// new one is generated.
    pub fn add(&mut self, draft: EventDraft) -> EventBoardResult<EventId> {
        let id = match draft.id.clone() {
            Some(id) if self.contains(&id) => return Err(EventBoardError::DuplicateId(id)),
            Some(id) => id,
            None => self.fresh_id(),
        };

        debug!(id = %id, title = %draft.title, "adding event");
        self.events.push(draft.into_event(id.clone()));
        Ok(id)
    }

    /// Replace every field of the event with `id`, keeping its id and its
    /// position. An id carried by the draft is ignored.
    pub fn update(&mut self, id: &EventId, draft: EventDraft) -> EventBoardResult<()> {
        let slot = self
            .events
            .iter_mut()
            .find(|e| &e.id == id)
            .ok_or_else(|| EventBoardError::NotFound(id.clone()))?;

        debug!(id = %id, title = %draft.title, "replacing event");
        *slot = draft.into_event(id.clone());
        Ok(())
    }

    /// Remove the event with `id`, returning it.
    pub fn delete(&mut self, id: &EventId) -> EventBoardResult<Event> {
        let index = self
            .events
            .iter()
            .position(|e| &e.id == id)
            .ok_or_else(|| EventBoardError::NotFound(id.clone()))?;

        debug!(id = %id, "deleting event");
        Ok(self.events.remove(index))
    }

    pub fn get(&self, id: &EventId) -> Option<&Event> {
        self.events.iter().find(|e| &e.id == id)
    }

    pub fn contains(&self, id: &EventId) -> bool {
        self.get(id).is_some()
    }

    /// All events in insertion order.
    pub fn list(&self) -> &[Event] {
        &self.events
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Event> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    fn fresh_id(&self) -> EventId {
        loop {
            let id = EventId::generate();
            if !self.contains(&id) {
                return id;
            }
        }
    }
}

impl<'a> IntoIterator for &'a EventStore {
    type Item = &'a Event;
    type IntoIter = std::slice::Iter<'a, Event>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}
