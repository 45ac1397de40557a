//! Event records and the drafts submitted to create or replace them.
//!
//! The serialized form keeps the field names the dashboard has always
//! stored (`startDateTime`, `eventType: "In-Person"`, ...) so existing
//! `events.json` files stay readable.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{EventBoardError, EventBoardResult};
use crate::interval::Interval;

/// Stable identifier of a stored event.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(String);

impl EventId {
    /// A fresh random id (UUID v4).
    pub fn generate() -> Self {
        EventId(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EventId {
    fn from(s: &str) -> Self {
        EventId(s.to_string())
    }
}

impl From<String> for EventId {
    fn from(s: String) -> Self {
        EventId(s)
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    General,
    Workshop,
    Meetup,
    Seminar,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::General,
        Category::Workshop,
        Category::Meetup,
        Category::Seminar,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::General => "General",
            Category::Workshop => "Workshop",
            Category::Meetup => "Meetup",
            Category::Seminar => "Seminar",
        }
    }
}

impl FromStr for Category {
    type Err = EventBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                EventBoardError::invalid_field(
                    "category",
                    format!("'{}' is not one of General, Workshop, Meetup, Seminar", s),
                )
            })
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether an event happens online or at a physical location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventType {
    Online,
    #[serde(rename = "In-Person")]
    InPerson,
}

impl EventType {
    pub const ALL: [EventType; 2] = [EventType::Online, EventType::InPerson];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Online => "Online",
            EventType::InPerson => "In-Person",
        }
    }
}

impl FromStr for EventType {
    type Err = EventBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect::<String>()
            .to_lowercase();

        match normalized.as_str() {
            "online" => Ok(EventType::Online),
            "inperson" => Ok(EventType::InPerson),
            _ => Err(EventBoardError::invalid_field(
                "event type",
                format!("'{}' is not Online or In-Person", s),
            )),
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where an event takes place. An online event always carries a link and
/// an in-person event always carries a location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "eventType")]
pub enum Venue {
    Online {
        #[serde(rename = "eventLink")]
        event_link: String,
    },
    #[serde(rename = "In-Person")]
    InPerson { location: String },
}

impl Venue {
    pub fn event_type(&self) -> EventType {
        match self {
            Venue::Online { .. } => EventType::Online,
            Venue::InPerson { .. } => EventType::InPerson,
        }
    }

    /// The link or location, whichever this venue carries.
    pub fn detail(&self) -> &str {
        match self {
            Venue::Online { event_link } => event_link,
            Venue::InPerson { location } => location,
        }
    }
}

/// A stored calendar event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub description: String,
    pub category: Category,
    #[serde(flatten)]
    pub venue: Venue,
    #[serde(rename = "startDateTime")]
    pub start: DateTime<Utc>,
    #[serde(rename = "endDateTime")]
    pub end: DateTime<Utc>,
    pub organizer: String,
}

impl Event {
    pub fn window(&self) -> Interval {
        Interval {
            start: self.start,
            end: self.end,
        }
    }

    pub fn event_type(&self) -> EventType {
        self.venue.event_type()
    }

    pub fn location(&self) -> Option<&str> {
        match &self.venue {
            Venue::InPerson { location } => Some(location),
            Venue::Online { .. } => None,
        }
    }

    pub fn event_link(&self) -> Option<&str> {
        match &self.venue {
            Venue::Online { event_link } => Some(event_link),
            Venue::InPerson { .. } => None,
        }
    }

    /// A draft carrying this event's current values, used as the starting
    /// point of an edit.
    pub fn to_draft(&self) -> EventDraft {
        EventDraft {
            id: Some(self.id.clone()),
            title: self.title.clone(),
            description: self.description.clone(),
            category: self.category,
            venue: self.venue.clone(),
            start: self.start,
            end: self.end,
            organizer: self.organizer.clone(),
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

/// A candidate event as submitted by a form, before the store has
/// accepted it. `id` is optional: the store assigns one when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EventId>,
    pub title: String,
    pub description: String,
    pub category: Category,
    #[serde(flatten)]
    pub venue: Venue,
    #[serde(rename = "startDateTime")]
    pub start: DateTime<Utc>,
    #[serde(rename = "endDateTime")]
    pub end: DateTime<Utc>,
    pub organizer: String,
}

impl EventDraft {
    /// The candidate's time window. Not checked; see [`Interval::new`].
    pub fn window(&self) -> Interval {
        Interval {
            start: self.start,
            end: self.end,
        }
    }

    pub fn event_type(&self) -> EventType {
        self.venue.event_type()
    }

    /// Check the required form fields. The time window is checked by the
    /// validator, not here.
    pub fn check(&self) -> EventBoardResult<()> {
        if self.title.trim().is_empty() {
            return Err(EventBoardError::invalid_field("title", "must not be empty"));
        }
        if self.organizer.trim().is_empty() {
            return Err(EventBoardError::invalid_field(
                "organizer",
                "must not be empty",
            ));
        }
        match &self.venue {
            Venue::Online { event_link } if event_link.trim().is_empty() => Err(
                EventBoardError::invalid_field("event link", "required for online events"),
            ),
            Venue::InPerson { location } if location.trim().is_empty() => Err(
                EventBoardError::invalid_field("location", "required for in-person events"),
            ),
            _ => Ok(()),
        }
    }

    pub fn into_event(self, id: EventId) -> Event {
        Event {
            id,
            title: self.title,
            description: self.description,
            category: self.category,
            venue: self.venue,
            start: self.start,
            end: self.end,
            organizer: self.organizer,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn make_test_draft() -> EventDraft {
        EventDraft {
            id: None,
            title: "Rust Workshop".to_string(),
            description: "Ownership and borrowing".to_string(),
            category: Category::Workshop,
            venue: Venue::InPerson {
                location: "Room 4".to_string(),
            },
            start: Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap(),
            end: Utc.with_ymd_and_hms(2024, 1, 1, 11, 0, 0).unwrap(),
            organizer: "Ferris".to_string(),
        }
    }

    #[test]
    fn test_category_parse_is_case_insensitive() {
        assert_eq!("workshop".parse::<Category>().unwrap(), Category::Workshop);
        assert_eq!(" Meetup ".parse::<Category>().unwrap(), Category::Meetup);
        assert!("party".parse::<Category>().is_err());
    }

    #[test]
    fn test_event_type_parse_accepts_common_spellings() {
        assert_eq!("Online".parse::<EventType>().unwrap(), EventType::Online);
        assert_eq!("In-Person".parse::<EventType>().unwrap(), EventType::InPerson);
        assert_eq!("in person".parse::<EventType>().unwrap(), EventType::InPerson);
        assert!("hybrid".parse::<EventType>().is_err());
    }

    #[test]
    fn test_check_accepts_complete_draft() {
        assert!(make_test_draft().check().is_ok());
    }

    #[test]
    fn test_check_rejects_blank_title() {
        let mut draft = make_test_draft();
        draft.title = "   ".to_string();
        let err = draft.check().unwrap_err();
        assert!(matches!(err, EventBoardError::InvalidField { field: "title", .. }));
    }

    #[test]
    fn test_check_requires_link_for_online_events() {
        let mut draft = make_test_draft();
        draft.venue = Venue::Online {
            event_link: String::new(),
        };
        let err = draft.check().unwrap_err();
        assert!(matches!(
            err,
            EventBoardError::InvalidField {
                field: "event link",
                ..
            }
        ));
    }

    #[test]
    fn test_serialized_field_names() {
        let event = make_test_draft().into_event(EventId::from("1"));
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["id"], "1");
        assert_eq!(json["eventType"], "In-Person");
        assert_eq!(json["location"], "Room 4");
        assert_eq!(json["category"], "Workshop");
        assert!(json.get("startDateTime").is_some());
        assert!(json.get("eventLink").is_none());

        let back: Event = serde_json::from_value(json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn test_to_draft_keeps_id() {
        let event = make_test_draft().into_event(EventId::from("abc"));
        let draft = event.to_draft();
        assert_eq!(draft.id, Some(EventId::from("abc")));
        assert_eq!(draft.window(), event.window());
    }
}
