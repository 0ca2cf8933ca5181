//! Ceremony scripts: an ordered list of ceremonies replayed against a
//! [`Scrum`] controller.
//!
//! Scripts are TOML files with one `[[steps]]` table per ceremony:
//!
//! ```toml
//! [[steps]]
//! ceremony = "planning"
//! items = 3
//!
//! [[steps]]
//! ceremony = "sprint"
//! days = 10
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::ceremony::{EventKind, Scrum};
use crate::error::CadenceError;

/// A single scripted ceremony with the parameters its entry point needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "ceremony", rename_all = "snake_case")]
pub enum Step {
    Planning { items: u32 },
    Sprint { days: u32 },
    DailyScrum,
    Review,
    Retrospective,
}

impl Step {
    pub fn kind(&self) -> EventKind {
        match self {
            Step::Planning { .. } => EventKind::Planning,
            Step::Sprint { .. } => EventKind::Sprint,
            Step::DailyScrum => EventKind::DailyScrum,
            Step::Review => EventKind::Review,
            Step::Retrospective => EventKind::Retrospective,
        }
    }

    /// Runs the step through the matching controller entry point.
    pub fn apply(&self, scrum: &mut Scrum<'_>) -> Result<(), CadenceError> {
        match self {
            Step::Planning { items } => scrum.plan_sprint(*items).map(|_| ()),
            Step::Sprint { days } => scrum.start_sprint(*days).map(|_| ()),
            Step::DailyScrum => {
                scrum.do_daily_scrum();
                Ok(())
            }
            Step::Review => scrum.review_sprint().map(|_| ()),
            Step::Retrospective => scrum.do_sprint_retrospective().map(|_| ()),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Planning { items } => write!(f, "{} ({items} items)", self.kind()),
            Step::Sprint { days } => write!(f, "{} ({days} days)", self.kind()),
            _ => write!(f, "{}", self.kind()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CeremonyScript {
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl CeremonyScript {
    pub fn parse(contents: &str) -> Result<Self, CadenceError> {
        Ok(toml::from_str(contents)?)
    }

    pub fn load(path: &Path) -> Result<Self, CadenceError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// `iterations` full cycles of planning, sprint, daily scrum, review and
    /// retrospective.
    pub fn cycles(items: u32, days: u32, iterations: u32) -> Self {
        let steps = (0..iterations)
            .flat_map(|_| {
                [
                    Step::Planning { items },
                    Step::Sprint { days },
                    Step::DailyScrum,
                    Step::Review,
                    Step::Retrospective,
                ]
            })
            .collect();
        Self { steps }
    }
}

/// Outcome of replaying a script.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReplaySummary {
    /// Steps that were run without error, daily scrums included.
    pub applied: usize,
    /// Zero-based step index and rejection message.
    pub rejected: Vec<(usize, String)>,
    /// True when replay stopped before the last step.
    pub halted: bool,
}

impl ReplaySummary {
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Replays `script` against `scrum`, calling `on_step` after every step.
///
/// With `fail_fast` the replay stops at the first rejected step. Any other
/// error aborts the replay.
pub fn replay<F>(
    scrum: &mut Scrum<'_>,
    script: &CeremonyScript,
    fail_fast: bool,
    mut on_step: F,
) -> Result<ReplaySummary, CadenceError>
where
    F: FnMut(usize, &Step, Result<(), &CadenceError>),
{
    let mut summary = ReplaySummary::default();

    for (index, step) in script.steps.iter().enumerate() {
        match step.apply(scrum) {
            Ok(()) => {
                summary.applied += 1;
                on_step(index, step, Ok(()));
            }
            Err(e) if e.is_rejection() => {
                on_step(index, step, Err(&e));
                summary.rejected.push((index, e.to_string()));
                if fail_fast {
                    summary.halted = index + 1 < script.steps.len();
                    break;
                }
            }
            Err(e) => return Err(e),
        }
    }

    Ok(summary)
}
