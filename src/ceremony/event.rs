use std::fmt;

use serde::{Deserialize, Serialize};

use crate::backlog::{BacklogItem, ProductBacklog};
use crate::error::InitializationError;

/// The ceremonies of a Scrum iteration.
///
/// A run cycles through: PLANNING → SPRINT → REVIEW → RETROSPECTIVE → PLANNING
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Planning,
    Sprint,
    DailyScrum,
    Review,
    Retrospective,
}

impl EventKind {
    pub const ALL: [EventKind; 5] = [
        EventKind::Planning,
        EventKind::Sprint,
        EventKind::DailyScrum,
        EventKind::Review,
        EventKind::Retrospective,
    ];

    /// The single ceremony allowed to follow this one.
    ///
    /// Daily scrums have no place in the cycle yet, so nothing may follow
    /// one. The controller never makes a daily scrum current.
    pub fn successor(self) -> Option<EventKind> {
        match self {
            EventKind::Planning => Some(EventKind::Sprint),
            EventKind::Sprint => Some(EventKind::Review),
            EventKind::DailyScrum => None,
            EventKind::Review => Some(EventKind::Retrospective),
            EventKind::Retrospective => Some(EventKind::Planning),
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::Planning => write!(f, "PLANNING"),
            EventKind::Sprint => write!(f, "SPRINT"),
            EventKind::DailyScrum => write!(f, "DAILY_SCRUM"),
            EventKind::Review => write!(f, "REVIEW"),
            EventKind::Retrospective => write!(f, "RETROSPECTIVE"),
        }
    }
}

/// Per-ceremony payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Ceremony {
    Planning {
        item_count: u32,
        /// Filled in by `init` with the items pulled from the backlog.
        #[serde(default)]
        sprint_backlog: Vec<BacklogItem>,
    },
    Sprint {
        days: u32,
    },
    DailyScrum,
    Review {
        /// Length of the sprint under review, when the previous event was one.
        #[serde(default)]
        reviewed_days: Option<u32>,
    },
    Retrospective,
}

/// A proposed or accepted ceremony.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    ceremony: Ceremony,
    initialized: bool,
}

impl Event {
    fn from_ceremony(ceremony: Ceremony) -> Self {
        Self {
            ceremony,
            initialized: false,
        }
    }

    pub fn planning(item_count: u32) -> Self {
        Self::from_ceremony(Ceremony::Planning {
            item_count,
            sprint_backlog: Vec::new(),
        })
    }

    pub fn sprint(days: u32) -> Self {
        Self::from_ceremony(Ceremony::Sprint { days })
    }

    pub fn daily_scrum() -> Self {
        Self::from_ceremony(Ceremony::DailyScrum)
    }

    pub fn review() -> Self {
        Self::from_ceremony(Ceremony::Review {
            reviewed_days: None,
        })
    }

    pub fn retrospective() -> Self {
        Self::from_ceremony(Ceremony::Retrospective)
    }

    pub fn kind(&self) -> EventKind {
        match self.ceremony {
            Ceremony::Planning { .. } => EventKind::Planning,
            Ceremony::Sprint { .. } => EventKind::Sprint,
            Ceremony::DailyScrum => EventKind::DailyScrum,
            Ceremony::Review { .. } => EventKind::Review,
            Ceremony::Retrospective => EventKind::Retrospective,
        }
    }

    pub fn ceremony(&self) -> &Ceremony {
        &self.ceremony
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Sprint length in days, for sprint events only.
    pub fn sprint_days(&self) -> Option<u32> {
        match self.ceremony {
            Ceremony::Sprint { days } => Some(days),
            _ => None,
        }
    }

    /// Items selected during planning. Empty for every other ceremony.
    pub fn sprint_backlog(&self) -> &[BacklogItem] {
        match &self.ceremony {
            Ceremony::Planning { sprint_backlog, .. } => sprint_backlog,
            _ => &[],
        }
    }

    /// Wires the event into the backlog context.
    ///
    /// Must be called once per event. On error the event is left untouched.
    pub fn init(
        &mut self,
        previous: Option<&Event>,
        backlog: &ProductBacklog,
    ) -> Result<(), InitializationError> {
        if self.initialized {
            return Err(InitializationError::AlreadyInitialized(self.kind()));
        }

        match &mut self.ceremony {
            Ceremony::Planning {
                item_count,
                sprint_backlog,
            } => {
                if *item_count == 0 {
                    return Err(InitializationError::EmptySelection);
                }
                if backlog.len() < *item_count as usize {
                    return Err(InitializationError::InsufficientBacklog {
                        requested: *item_count,
                        available: backlog.len(),
                    });
                }
                *sprint_backlog = backlog.top(*item_count as usize).to_vec();
            }
            Ceremony::Sprint { days } => {
                if *days == 0 {
                    return Err(InitializationError::ZeroLengthSprint);
                }
            }
            Ceremony::Review { reviewed_days } => {
                *reviewed_days = previous.and_then(Event::sprint_days);
            }
            Ceremony::DailyScrum | Ceremony::Retrospective => {}
        }

        self.initialized = true;
        Ok(())
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.ceremony {
            Ceremony::Planning { item_count, .. } => write!(f, "PLANNING({item_count} items)"),
            Ceremony::Sprint { days } => write!(f, "SPRINT({days} days)"),
            _ => write!(f, "{}", self.kind()),
        }
    }
}
