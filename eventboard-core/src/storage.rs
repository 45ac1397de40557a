//! Local persistence of events, accounts and the login session.
//!
//! Each collection is a JSON file in the data directory:
//!
//! ```text
//! <data_dir>/
//!   events.json
//!   users.json
//!   session.json
//! ```

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::auth::{Session, UserStore};
use crate::error::{EventBoardError, EventBoardResult};
use crate::event::Event;
use crate::store::EventStore;

const EVENTS_FILE: &str = "events.json";
const USERS_FILE: &str = "users.json";
const SESSION_FILE: &str = "session.json";

#[derive(Debug, Clone)]
pub struct LocalStorage {
    root: PathBuf,
}

impl LocalStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        LocalStorage { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn load_events(&self) -> EventBoardResult<EventStore> {
        let events: Vec<Event> = self.read(EVENTS_FILE)?.unwrap_or_default();
        EventStore::from_events(events)
    }

    pub fn save_events(&self, store: &EventStore) -> EventBoardResult<()> {
        self.write(EVENTS_FILE, store.list())?;
        info!(count = store.len(), "saved events");
        Ok(())
    }

    pub fn load_users(&self) -> EventBoardResult<UserStore> {
        Ok(self.read(USERS_FILE)?.unwrap_or_default())
    }

    pub fn save_users(&self, users: &UserStore) -> EventBoardResult<()> {
        self.write(USERS_FILE, users)
    }

    pub fn load_session(&self) -> EventBoardResult<Option<Session>> {
        self.read(SESSION_FILE)
    }

    /// The current session, or `NotLoggedIn`.
    pub fn require_session(&self) -> EventBoardResult<Session> {
        self.load_session()?.ok_or(EventBoardError::NotLoggedIn)
    }

    pub fn save_session(&self, session: &Session) -> EventBoardResult<()> {
        self.write(SESSION_FILE, session)
    }

    pub fn clear_session(&self) -> EventBoardResult<()> {
        let path = self.root.join(SESSION_FILE);
        if path.exists() {
            std::fs::remove_file(&path)?;
        }
        Ok(())
    }

    fn read<T: DeserializeOwned>(&self, name: &str) -> EventBoardResult<Option<T>> {
        let path = self.root.join(name);
        if !path.exists() {
            debug!(path = %path.display(), "no stored data");
            return Ok(None);
        }

        let content = std::fs::read_to_string(&path)?;
        let value = serde_json::from_str(&content).map_err(|e| {
            EventBoardError::Serialization(format!("{}: {}", path.display(), e))
        })?;
        Ok(Some(value))
    }

    /// Write via a temp file and rename so a crash never leaves a
    /// half-written file behind.
    fn write<T: Serialize + ?Sized>(&self, name: &str, value: &T) -> EventBoardResult<()> {
        std::fs::create_dir_all(&self.root)?;

        let path = self.root.join(name);
        let temp = self.root.join(format!("{}.tmp", name));

        let content = serde_json::to_string_pretty(value)?;
        std::fs::write(&temp, content)?;
        std::fs::rename(&temp, &path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{Category, EventDraft, Venue};
    use chrono::{TimeZone, Utc};

    fn make_draft(title: &str, hour: u32) -> EventDraft {
        EventDraft {
            id: None,
            title: title.to_string(),
            description: "desc".to_string(),
            category: Category::Meetup,
            venue: Venue::InPerson {
                location: "Cafe".to_string(),
            },
            start: Utc.with_ymd_and_hms(2024, 5, 1, hour, 0, 0).unwrap(),
            end: Utc.with_ymd_and_hms(2024, 5, 1, hour + 1, 0, 0).unwrap(),
            organizer: "Org".to_string(),
        }
    }

    #[test]
    fn test_missing_files_load_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path().join("nested"));

        assert!(storage.load_events().unwrap().is_empty());
        assert!(storage.load_users().unwrap().users().is_empty());
        assert!(storage.load_session().unwrap().is_none());
        assert!(matches!(
            storage.require_session(),
            Err(EventBoardError::NotLoggedIn)
        ));
    }

    #[test]
    fn test_events_survive_reload_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path());

        let mut store = EventStore::new();
        store.add(make_draft("later", 15)).unwrap();
        let first = store.add(make_draft("earlier", 9)).unwrap();
        storage.save_events(&store).unwrap();

        let reloaded = storage.load_events().unwrap();
        let titles: Vec<_> = reloaded.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, ["later", "earlier"]);
        assert_eq!(reloaded.get(&first), store.get(&first));
        assert!(!dir.path().join("events.json.tmp").exists());
    }

    #[test]
    fn test_session_save_and_clear() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path());

        let mut users = UserStore::default();
        users.signup("ada@example.com", "ada", "pw").unwrap();
        storage.save_users(&users).unwrap();

        let session = storage
            .load_users()
            .unwrap()
            .login("ada@example.com", "pw")
            .unwrap();
        storage.save_session(&session).unwrap();
        assert_eq!(storage.require_session().unwrap(), session);

        storage.clear_session().unwrap();
        assert!(storage.load_session().unwrap().is_none());
        storage.clear_session().unwrap();
    }

    #[test]
    fn test_corrupt_file_is_a_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("events.json"), "{ not json").unwrap();

        let storage = LocalStorage::new(dir.path());
        assert!(matches!(
            storage.load_events(),
            Err(EventBoardError::Serialization(_))
        ));
    }
}
