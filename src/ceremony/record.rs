use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::event::EventKind;
use super::scrum::Scrum;

/// One entry of the transition journal: a single proposal and its outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionRecord {
    pub kind: EventKind,
    pub accepted: bool,
    /// Rejection reason; `None` when accepted.
    pub reason: Option<String>,
    pub at: DateTime<Utc>,
}

impl TransitionRecord {
    pub fn accepted(kind: EventKind) -> Self {
        Self {
            kind,
            accepted: true,
            reason: None,
            at: Utc::now(),
        }
    }

    pub fn rejected(kind: EventKind, reason: impl Into<String>) -> Self {
        Self {
            kind,
            accepted: false,
            reason: Some(reason.into()),
            at: Utc::now(),
        }
    }
}

/// Structured summary of a controller run, produced on demand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub run_id: Uuid,
    pub current: Option<EventKind>,
    pub sprint_days: Option<u32>,
    pub completed_iterations: u32,
    pub accepted: usize,
    pub rejected: usize,
    pub journal: Vec<TransitionRecord>,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    pub duration_ms: i64,
}

impl RunReport {
    pub fn from_scrum(scrum: &Scrum<'_>) -> Self {
        let now = Utc::now();
        let journal = scrum.history().to_vec();
        let accepted = journal.iter().filter(|r| r.accepted).count();

        Self {
            run_id: scrum.run_id(),
            current: scrum.current().map(|e| e.kind()),
            sprint_days: scrum.reference_sprint_days(),
            completed_iterations: scrum.completed_iterations(),
            accepted,
            rejected: journal.len() - accepted,
            journal,
            started_at: scrum.started_at(),
            completed_at: now,
            duration_ms: (now - scrum.started_at()).num_milliseconds(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backlog::{BacklogItem, ProductBacklog};

    #[test]
    fn record_constructors() {
        let ok = TransitionRecord::accepted(EventKind::Review);
        assert!(ok.accepted);
        assert!(ok.reason.is_none());

        let err = TransitionRecord::rejected(EventKind::Sprint, "wrong order");
        assert!(!err.accepted);
        assert_eq!(err.reason.as_deref(), Some("wrong order"));
    }

    #[test]
    fn report_counts_outcomes() {
        let backlog = ProductBacklog::with_items(vec![BacklogItem::new("PB-1", "Search", 3)]);
        let mut scrum = Scrum::new(&backlog);
        scrum.plan_sprint(1).unwrap();
        scrum.start_sprint(10).unwrap();
        scrum.do_sprint_retrospective().unwrap_err();
        scrum.review_sprint().unwrap();
        scrum.do_sprint_retrospective().unwrap();

        let report = RunReport::from_scrum(&scrum);
        assert_eq!(report.run_id, scrum.run_id());
        assert_eq!(report.current, Some(EventKind::Retrospective));
        assert_eq!(report.sprint_days, Some(10));
        assert_eq!(report.completed_iterations, 1);
        assert_eq!(report.accepted, 4);
        assert_eq!(report.rejected, 1);
        assert_eq!(report.journal.len(), 5);
        assert!(report.duration_ms >= 0);
    }

    #[test]
    fn report_serializes_kinds_in_snake_case() {
        let backlog = ProductBacklog::new();
        let mut scrum = Scrum::new(&backlog);
        scrum.start_sprint(10).unwrap();

        let json = serde_json::to_value(RunReport::from_scrum(&scrum)).unwrap();
        assert_eq!(json["current"], "sprint");
        assert_eq!(json["journal"][0]["kind"], "sprint");
        assert_eq!(json["journal"][0]["accepted"], true);
    }
}
