mod event;
mod record;
mod scrum;
mod transition;

pub use event::{Ceremony, Event, EventKind};
pub use record::{RunReport, TransitionRecord};
pub use scrum::Scrum;
pub use transition::{check_order, check_sprint_length, validate_and_advance};
