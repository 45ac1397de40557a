pub mod auth;
pub mod config;
pub mod delete;
pub mod edit;
mod form;
pub mod list;
pub mod new;
pub mod show;

use anyhow::{Context as _, Result};
use eventboard_core::auth::Session;
use eventboard_core::config::BoardConfig;
use eventboard_core::storage::LocalStorage;
use eventboard_core::{Board, EventId};
use tracing::debug;

/// Settings and storage shared by every command.
pub struct Context {
    pub config: BoardConfig,
    pub storage: LocalStorage,
}

impl Context {
    pub fn new(config: BoardConfig) -> Self {
        let storage = config.storage();
        Context { config, storage }
    }

    /// Event commands are only available to a signed-in user.
    pub fn require_login(&self) -> Result<Session> {
        match self.storage.load_session().context("Failed to read session")? {
            Some(session) => Ok(session),
            None => anyhow::bail!(
                "Not logged in.\n\n\
                Sign in with:\n  \
                eventboard login\n\n\
                or create an account with:\n  \
                eventboard signup"
            ),
        }
    }

    pub fn load_board(&self) -> Result<Board> {
        let store = self
            .storage
            .load_events()
            .with_context(|| format!("Failed to load events from {}", self.storage.root().display()))?;
        debug!(
            events = store.len(),
            policy = %self.config.overlap_policy,
            "loaded board"
        );
        Ok(Board::new(store, self.config.overlap_policy))
    }

    pub fn save_board(&self, board: &Board) -> Result<()> {
        self.storage
            .save_events(board.store())
            .with_context(|| format!("Failed to save events to {}", self.storage.root().display()))
    }
}

/// Look up an event, listing a few known ids when it is missing.
pub fn find_event<'a>(board: &'a Board, id: &str) -> Result<&'a eventboard_core::Event> {
    let id = EventId::from(id);
    board.get(&id).ok_or_else(|| {
        let known: Vec<_> = board.events().iter().take(5).map(|e| e.id.to_string()).collect();
        if known.is_empty() {
            anyhow::anyhow!("Event '{}' not found. There are no events yet.", id)
        } else {
            anyhow::anyhow!("Event '{}' not found. Known ids include: {}", id, known.join(", "))
        }
    })
}
