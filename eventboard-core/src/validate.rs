//! The overlap check that gates every write to the store.

use tracing::debug;

use crate::error::{EventBoardError, EventBoardResult};
use crate::event::{EventDraft, EventId};
use crate::interval::{BoundaryPolicy, Interval};
use crate::store::EventStore;

/// Decide whether `candidate` may be written to `store`.
///
/// The window is checked first (`start < end`, else `InvalidWindow`).
/// Then every stored event except `exclude_id` is compared in store order,
/// and the first one that overlaps is returned in `OverlapConflict`.
/// Pass the edited event's id as `exclude_id` so it is not compared
/// against its own previous window.
pub fn validate(
    candidate: &EventDraft,
    store: &EventStore,
    exclude_id: Option<&EventId>,
    policy: BoundaryPolicy,
) -> EventBoardResult<()> {
    let window = Interval::new(candidate.start, candidate.end)?;

    let conflict = store
        .iter()
        .filter(|event| Some(&event.id) != exclude_id)
        .find(|event| window.overlaps_with(&event.window(), policy));

    match conflict {
        Some(event) => {
            debug!(
                candidate = %candidate.title,
                conflict = %event.id,
                %policy,
                "rejecting overlapping event"
            );
            Err(EventBoardError::OverlapConflict(Box::new(event.clone())))
        }
        None => Ok(()),
    }
}
