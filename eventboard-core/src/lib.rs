//! Core types for eventboard.
//!
//! - `event`: event records and the drafts submitted by forms
//! - `interval` + `validate`: the overlap check gating every write
//! - `store` + `board`: the in-memory collection and its gated front
//! - `query`: filtering, sorting and paging for display
//! - `auth`, `storage`, `config`: accounts, local persistence, settings

pub mod auth;
pub mod board;
pub mod config;
pub mod date_range;
pub mod error;
pub mod event;
pub mod interval;
pub mod query;
pub mod storage;
pub mod store;
pub mod validate;

pub use board::Board;
pub use error::{EventBoardError, EventBoardResult};
pub use event::{Category, Event, EventDraft, EventId, EventType, Venue};
pub use interval::{BoundaryPolicy, Interval};
pub use query::{FilterCriteria, Sort, SortKey, SortOrder};
pub use store::EventStore;
