use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::backlog::ProductBacklog;
use crate::error::CadenceError;

use super::event::{Event, EventKind};
use super::record::TransitionRecord;
use super::transition::validate_and_advance;

/// Guards the order of ceremonies for one run against a shared backlog.
///
/// The first accepted ceremony may be any kind; after that every proposal
/// must be the declared successor of the current ceremony, and every sprint
/// must last as long as the first accepted one. A rejected proposal leaves
/// the current ceremony and the reference sprint length untouched.
pub struct Scrum<'a> {
    backlog: &'a ProductBacklog,
    current: Option<Event>,
    reference_sprint_days: Option<u32>,
    completed_iterations: u32,
    history: Vec<TransitionRecord>,
    run_id: Uuid,
    started_at: DateTime<Utc>,
}

impl<'a> Scrum<'a> {
    pub fn new(backlog: &'a ProductBacklog) -> Self {
        Self {
            backlog,
            current: None,
            reference_sprint_days: None,
            completed_iterations: 0,
            history: Vec::new(),
            run_id: Uuid::new_v4(),
            started_at: Utc::now(),
        }
    }

    pub fn plan_sprint(&mut self, item_count: u32) -> Result<&Event, CadenceError> {
        self.advance(Event::planning(item_count))
    }

    pub fn start_sprint(&mut self, days: u32) -> Result<&Event, CadenceError> {
        self.advance(Event::sprint(days))
    }

    /// Placeholder: daily scrums have no ordering rule yet, so this neither
    /// checks nor advances anything.
    pub fn do_daily_scrum(&self) {
        debug!(
            current = ?self.current.as_ref().map(Event::kind),
            "Daily scrum held, workflow unchanged"
        );
    }

    pub fn review_sprint(&mut self) -> Result<&Event, CadenceError> {
        self.advance(Event::review())
    }

    pub fn do_sprint_retrospective(&mut self) -> Result<&Event, CadenceError> {
        self.advance(Event::retrospective())
    }

    /// Single funnel for every proposal.
    fn advance(&mut self, proposed: Event) -> Result<&Event, CadenceError> {
        let kind = proposed.kind();
        info!(event = %kind, "Moving to next event");

        match validate_and_advance(
            self.current.as_ref(),
            proposed,
            self.reference_sprint_days,
            self.backlog,
        ) {
            Ok(event) => {
                if let Some(days) = event.sprint_days() {
                    self.reference_sprint_days.get_or_insert(days);
                }
                if kind == EventKind::Retrospective {
                    self.completed_iterations += 1;
                }
                info!(event = %event, accepted = true, "Moved to next event");
                self.history.push(TransitionRecord::accepted(kind));
                Ok(&*self.current.insert(event))
            }
            Err(e) => {
                warn!(event = %kind, accepted = false, reason = %e, "Rejected event");
                self.history.push(TransitionRecord::rejected(kind, e.to_string()));
                Err(e)
            }
        }
    }

    pub fn current(&self) -> Option<&Event> {
        self.current.as_ref()
    }

    pub fn reference_sprint_days(&self) -> Option<u32> {
        self.reference_sprint_days
    }

    /// Number of accepted retrospectives.
    pub fn completed_iterations(&self) -> u32 {
        self.completed_iterations
    }

    pub fn history(&self) -> &[TransitionRecord] {
        &self.history
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backlog::BacklogItem;
    use crate::error::InitializationError;

    fn make_backlog(n: usize) -> ProductBacklog {
        ProductBacklog::with_items(
            (1..=n)
                .map(|i| BacklogItem::new(format!("PB-{i}"), format!("Story {i}"), 2))
                .collect(),
        )
    }

    fn current_kind(scrum: &Scrum<'_>) -> Option<EventKind> {
        scrum.current().map(Event::kind)
    }

    #[test]
    fn every_entry_point_bootstraps() {
        let backlog = make_backlog(3);

        let mut scrum = Scrum::new(&backlog);
        assert_eq!(scrum.plan_sprint(2).unwrap().kind(), EventKind::Planning);

        let mut scrum = Scrum::new(&backlog);
        assert_eq!(scrum.start_sprint(10).unwrap().kind(), EventKind::Sprint);

        let mut scrum = Scrum::new(&backlog);
        assert_eq!(scrum.review_sprint().unwrap().kind(), EventKind::Review);

        let mut scrum = Scrum::new(&backlog);
        assert_eq!(
            scrum.do_sprint_retrospective().unwrap().kind(),
            EventKind::Retrospective
        );
    }

    #[test]
    fn happy_path_walks_all_ceremonies() {
        let backlog = make_backlog(5);
        let mut scrum = Scrum::new(&backlog);
        assert!(scrum.current().is_none());

        let planning = scrum.plan_sprint(3).unwrap();
        assert_eq!(planning.sprint_backlog().len(), 3);
        scrum.start_sprint(10).unwrap();
        assert_eq!(scrum.reference_sprint_days(), Some(10));
        scrum.review_sprint().unwrap();
        scrum.do_sprint_retrospective().unwrap();

        assert_eq!(current_kind(&scrum), Some(EventKind::Retrospective));
        assert_eq!(scrum.completed_iterations(), 1);
        assert!(scrum.history().iter().all(|r| r.accepted));
    }

    #[test]
    fn out_of_order_proposals_are_rejected() {
        let backlog = make_backlog(5);
        let mut scrum = Scrum::new(&backlog);
        scrum.plan_sprint(1).unwrap();

        let err = scrum.review_sprint().unwrap_err();
        assert!(matches!(
            err,
            CadenceError::OutOfOrder {
                expected: Some(EventKind::Sprint),
                got: EventKind::Review
            }
        ));
        assert!(matches!(
            scrum.plan_sprint(1).unwrap_err(),
            CadenceError::OutOfOrder { .. }
        ));
        assert!(matches!(
            scrum.do_sprint_retrospective().unwrap_err(),
            CadenceError::OutOfOrder { .. }
        ));
        assert_eq!(current_kind(&scrum), Some(EventKind::Planning));
    }

    #[test]
    fn cycle_repeats() {
        let backlog = make_backlog(2);
        let mut scrum = Scrum::new(&backlog);

        for _ in 0..5 {
            scrum.plan_sprint(2).unwrap();
            scrum.start_sprint(14).unwrap();
            scrum.do_daily_scrum();
            scrum.review_sprint().unwrap();
            scrum.do_sprint_retrospective().unwrap();
        }

        assert_eq!(scrum.completed_iterations(), 5);
        assert_eq!(scrum.history().len(), 20);
    }

    #[test]
    fn sprint_length_must_stay_constant() {
        let backlog = make_backlog(2);
        let mut scrum = Scrum::new(&backlog);
        scrum.start_sprint(10).unwrap();
        scrum.review_sprint().unwrap();
        scrum.do_sprint_retrospective().unwrap();
        scrum.plan_sprint(1).unwrap();

        let before = scrum.current().cloned();
        let err = scrum.start_sprint(14).unwrap_err();
        assert!(matches!(
            err,
            CadenceError::InconsistentSprintLength {
                expected: 10,
                got: 14
            }
        ));
        assert_eq!(scrum.current().cloned(), before);
        assert_eq!(scrum.reference_sprint_days(), Some(10));

        assert_eq!(scrum.start_sprint(10).unwrap().sprint_days(), Some(10));
    }

    #[test]
    fn init_failure_leaves_state_unchanged() {
        let backlog = make_backlog(1);
        let mut scrum = Scrum::new(&backlog);
        scrum.do_sprint_retrospective().unwrap();

        let before = scrum.current().cloned();
        let err = scrum.plan_sprint(4).unwrap_err();
        assert!(matches!(
            err,
            CadenceError::Initialization(InitializationError::InsufficientBacklog { .. })
        ));
        assert_eq!(scrum.current().cloned(), before);
        assert_eq!(scrum.completed_iterations(), 1);
    }

    #[test]
    fn rejected_first_sprint_does_not_fix_reference() {
        let backlog = make_backlog(1);
        let mut scrum = Scrum::new(&backlog);
        scrum.start_sprint(0).unwrap_err();
        assert!(scrum.current().is_none());
        assert_eq!(scrum.reference_sprint_days(), None);

        scrum.start_sprint(7).unwrap();
        assert_eq!(scrum.reference_sprint_days(), Some(7));
    }

    #[test]
    fn daily_scrum_is_a_no_op() {
        let backlog = make_backlog(1);
        let mut scrum = Scrum::new(&backlog);
        scrum.do_daily_scrum();
        assert!(scrum.current().is_none());

        scrum.start_sprint(10).unwrap();
        scrum.do_daily_scrum();
        assert_eq!(current_kind(&scrum), Some(EventKind::Sprint));
        assert_eq!(scrum.history().len(), 1);
    }

    #[test]
    fn rejections_are_journaled() {
        let backlog = make_backlog(1);
        let mut scrum = Scrum::new(&backlog);
        scrum.start_sprint(10).unwrap();
        scrum.plan_sprint(1).unwrap_err();

        let last = scrum.history().last().unwrap();
        assert_eq!(last.kind, EventKind::Planning);
        assert!(!last.accepted);
        assert!(last.reason.as_deref().unwrap().contains("expected REVIEW"));
    }

    #[test]
    fn scenario_from_mid_cycle_start() {
        let backlog = make_backlog(3);
        let mut scrum = Scrum::new(&backlog);

        let sprint = scrum.start_sprint(10).unwrap();
        assert_eq!(sprint.sprint_days(), Some(10));

        scrum.review_sprint().unwrap();
        assert_eq!(current_kind(&scrum), Some(EventKind::Review));

        assert!(matches!(
            scrum.start_sprint(10).unwrap_err(),
            CadenceError::OutOfOrder {
                expected: Some(EventKind::Retrospective),
                got: EventKind::Sprint
            }
        ));

        scrum.do_sprint_retrospective().unwrap();

        assert!(matches!(
            scrum.start_sprint(14).unwrap_err(),
            CadenceError::OutOfOrder {
                expected: Some(EventKind::Planning),
                got: EventKind::Sprint
            }
        ));
        assert_eq!(current_kind(&scrum), Some(EventKind::Retrospective));
    }
}
