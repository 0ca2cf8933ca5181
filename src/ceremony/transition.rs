use crate::backlog::ProductBacklog;
use crate::error::CadenceError;

use super::event::{Event, EventKind};

/// Checks that `proposed` is exactly the declared successor of `current`.
///
/// Any kind is accepted when there is no current event yet. Nothing is
/// accepted after a ceremony without a successor.
pub fn check_order(current: Option<&Event>, proposed: EventKind) -> Result<(), CadenceError> {
    let Some(current) = current else {
        return Ok(());
    };
    let expected = current.kind().successor();
    if expected != Some(proposed) {
        return Err(CadenceError::OutOfOrder {
            expected,
            got: proposed,
        });
    }
    Ok(())
}

/// Checks a sprint against the length of the first accepted sprint.
///
/// Returns the length that becomes the reference once the sprint is
/// accepted, or `None` for non-sprint events.
pub fn check_sprint_length(
    reference_days: Option<u32>,
    proposed: &Event,
) -> Result<Option<u32>, CadenceError> {
    let Some(days) = proposed.sprint_days() else {
        return Ok(None);
    };
    match reference_days {
        Some(expected) if expected != days => Err(CadenceError::InconsistentSprintLength {
            expected,
            got: days,
        }),
        _ => Ok(Some(days)),
    }
}

/// Validates `proposed` against the current event and initializes it.
///
/// Ordering is checked first, then the sprint length, then the event's own
/// `init`. Nothing is mutated on failure: the caller keeps its current event
/// and only replaces it with the returned one.
pub fn validate_and_advance(
    current: Option<&Event>,
    mut proposed: Event,
    reference_days: Option<u32>,
    backlog: &ProductBacklog,
) -> Result<Event, CadenceError> {
    check_order(current, proposed.kind())?;
    check_sprint_length(reference_days, &proposed)?;
    proposed.init(current, backlog)?;
    Ok(proposed)
}
