//! Goal progress, completion detection and completion-date projection.

use chrono::{Days, NaiveDate};
use spendwise_domain::{Goal, Notification, NotificationChannel};
use uuid::Uuid;

use crate::{
    notifier::GoalNotifier, store::RecordStore, time::Clock, CoreError, CoreResult,
    ProjectionIssue,
};

/// Result of a successful top-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopUpOutcome {
    pub goal_id: Uuid,
    pub current_amount: i64,
    pub reached: bool,
    /// Completion notification recorded by this top-up, if any.
    pub notification: Option<Uuid>,
}

/// How a goal is doing compared to its target date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalOutlook {
    Reached,
    OnTrack {
        projected: NaiveDate,
        target_date: NaiveDate,
    },
    AtRisk {
        projected: NaiveDate,
        target_date: NaiveDate,
    },
    NoTargetDate {
        projected: NaiveDate,
    },
    Undetermined(ProjectionIssue),
}

/// Applies top-ups to goals held by a record store and reports on their progress.
pub struct GoalTracker<'a, S: RecordStore + ?Sized> {
    store: &'a mut S,
    notifier: &'a dyn GoalNotifier,
    clock: &'a dyn Clock,
    channel: NotificationChannel,
}

impl<'a, S: RecordStore + ?Sized> GoalTracker<'a, S> {
    pub fn new(store: &'a mut S, notifier: &'a dyn GoalNotifier, clock: &'a dyn Clock) -> Self {
        Self {
            store,
            notifier,
            clock,
            channel: NotificationChannel::default(),
        }
    }

    /// Sets the channel recorded on completion notifications.
    pub fn with_channel(mut self, channel: NotificationChannel) -> Self {
        self.channel = channel;
        self
    }

    /// Adds `amount` to the goal and persists it. `goal` is only updated once the
    /// store accepted the change. Reaching the target records and dispatches a
    /// completion notification; dispatch failures are logged, never returned.
    pub fn top_up(&mut self, goal: &mut Goal, amount: i64) -> CoreResult<TopUpOutcome> {
        if amount <= 0 {
            return Err(CoreError::Validation(format!(
                "top-up amount must be positive, got {amount}"
            )));
        }
        let current_amount = goal.current_amount.checked_add(amount).ok_or_else(|| {
            CoreError::Validation(format!("top-up of {amount} overflows goal `{}`", goal.title))
        })?;

        let mut pending = goal.clone();
        pending.current_amount = current_amount;
        *goal = self.store.save_goal(&pending)?;
        tracing::debug!(
            goal_id = %goal.id,
            amount,
            current_amount = goal.current_amount,
            "goal topped up"
        );

        let reached = Self::is_reached(goal);
        let notification = if reached {
            self.notify_reached(goal)
        } else {
            None
        };

        Ok(TopUpOutcome {
            goal_id: goal.id,
            current_amount: goal.current_amount,
            reached,
            notification,
        })
    }

    /// Loads the goal from the store and tops it up.
    pub fn top_up_goal(&mut self, goal_id: Uuid, amount: i64) -> CoreResult<TopUpOutcome> {
        let mut goal = self.store.goal(goal_id)?;
        self.top_up(&mut goal, amount)
    }

    pub fn is_reached(goal: &Goal) -> bool {
        goal.remaining() <= 0
    }

    /// Projects when the goal will be reached if saving continues at the average
    /// daily rate observed since its creation.
    pub fn projected_completion_date(goal: &Goal, as_of: NaiveDate) -> CoreResult<NaiveDate> {
        let days_elapsed = (as_of - goal.creation_date).num_days();
        if days_elapsed <= 0 {
            return Err(CoreError::ProjectionUndefined(ProjectionIssue::NoElapsedDays));
        }
        if goal.current_amount <= 0 {
            return Err(CoreError::ProjectionUndefined(
                ProjectionIssue::NoAccumulation,
            ));
        }

        let remaining = goal.remaining();
        // remaining / (current / elapsed) == remaining * elapsed / current
        let days_needed = if remaining <= 0 {
            0
        } else {
            round_half_even(
                i128::from(remaining) * i128::from(days_elapsed),
                i128::from(goal.current_amount),
            )
        };

        u64::try_from(days_needed)
            .ok()
            .and_then(|days| as_of.checked_add_days(Days::new(days)))
            .ok_or(CoreError::ProjectionUndefined(ProjectionIssue::OutOfRange))
    }

    /// Compares the projected completion date against the goal's target date,
    /// using the tracker's clock as the reference day.
    pub fn assess(&self, goal: &Goal) -> GoalOutlook {
        Self::assess_as_of(goal, self.clock.today())
    }

    pub fn assess_as_of(goal: &Goal, as_of: NaiveDate) -> GoalOutlook {
        if Self::is_reached(goal) {
            return GoalOutlook::Reached;
        }
        let projected = match Self::projected_completion_date(goal, as_of) {
            Ok(date) => date,
            Err(CoreError::ProjectionUndefined(issue)) => return GoalOutlook::Undetermined(issue),
            Err(_) => return GoalOutlook::Undetermined(ProjectionIssue::OutOfRange),
        };
        match goal.target_date {
            Some(target_date) if projected > target_date => GoalOutlook::AtRisk {
                projected,
                target_date,
            },
            Some(target_date) => GoalOutlook::OnTrack {
                projected,
                target_date,
            },
            None => GoalOutlook::NoTargetDate { projected },
        }
    }

    fn notify_reached(&mut self, goal: &Goal) -> Option<Uuid> {
        let notification = Notification::goal_reached(goal, self.channel, self.clock.today());
        let person = match self.store.person(goal.person_id) {
            Ok(person) => person,
            Err(err) => {
                tracing::warn!(goal_id = %goal.id, "cannot resolve goal owner: {err}");
                return None;
            }
        };
        let id = match self.store.insert_notification(notification.clone()) {
            Ok(id) => id,
            Err(err) => {
                tracing::warn!(goal_id = %goal.id, "cannot record goal notification: {err}");
                return None;
            }
        };
        tracing::info!(goal_id = %goal.id, person_id = %person.id, "goal reached");
        if let Err(err) = self.notifier.goal_reached(&person, &notification) {
            tracing::warn!(goal_id = %goal.id, "{err}");
        }
        Some(id)
    }
}

/// Rounds `numerator / denominator` to the nearest integer, ties to even.
/// Both operands must be positive.
fn round_half_even(numerator: i128, denominator: i128) -> i128 {
    let quotient = numerator / denominator;
    let twice_remainder = (numerator % denominator) * 2;
    if twice_remainder > denominator || (twice_remainder == denominator && quotient % 2 == 1) {
        quotient + 1
    } else {
        quotient
    }
}

#[cfg(test)]
mod tests {
    use spendwise_domain::Person;

    use super::*;
    use crate::{FixedClock, MemoryStore, TracingNotifier};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn goal(current: i64, target: i64) -> Goal {
        Goal::new(Uuid::new_v4(), "auto", date(2020, 2, 1), target)
            .unwrap()
            .with_current_amount(current)
            .unwrap()
    }

    type Tracker<'a> = GoalTracker<'a, MemoryStore>;

    #[test]
    fn projection_uses_average_daily_rate() {
        // 20000 saved over 10 days: 2000/day, 480000 left -> 240 days.
        let goal = goal(20_000, 500_000);
        let projected = Tracker::projected_completion_date(&goal, date(2020, 2, 11)).unwrap();
        assert_eq!(projected, date(2020, 2, 11) + Days::new(240));
    }

    #[test]
    fn projection_rounds_half_to_even() {
        // 3 days * 1 left / 2 saved = 1.5 -> 2; 5 days * 1 / 2 = 2.5 -> 2.
        let goal = goal(2, 3);
        assert_eq!(
            Tracker::projected_completion_date(&goal, date(2020, 2, 4)).unwrap(),
            date(2020, 2, 6)
        );
        assert_eq!(
            Tracker::projected_completion_date(&goal, date(2020, 2, 6)).unwrap(),
            date(2020, 2, 8)
        );
    }

    #[test]
    fn projection_is_undefined_on_creation_day() {
        let goal = goal(20_000, 500_000);
        let err = Tracker::projected_completion_date(&goal, date(2020, 2, 1)).unwrap_err();
        assert!(matches!(
            err,
            CoreError::ProjectionUndefined(ProjectionIssue::NoElapsedDays)
        ));
    }

    #[test]
    fn projection_is_undefined_without_savings() {
        let goal = goal(0, 500_000);
        let err = Tracker::projected_completion_date(&goal, date(2020, 3, 1)).unwrap_err();
        assert!(matches!(
            err,
            CoreError::ProjectionUndefined(ProjectionIssue::NoAccumulation)
        ));
    }

    #[test]
    fn projection_clamps_overshoot_to_reference_day() {
        let goal = goal(600, 500);
        assert_eq!(
            Tracker::projected_completion_date(&goal, date(2020, 2, 5)).unwrap(),
            date(2020, 2, 5)
        );
    }

    #[test]
    fn projection_beyond_calendar_is_undefined() {
        let goal = goal(1, i64::MAX);
        let err = Tracker::projected_completion_date(&goal, date(2020, 3, 1)).unwrap_err();
        assert!(matches!(
            err,
            CoreError::ProjectionUndefined(ProjectionIssue::OutOfRange)
        ));
    }

    #[test]
    fn outlook_flags_goals_behind_schedule() {
        let behind = goal(20_000, 500_000).with_target_date(date(2020, 7, 1));
        assert_eq!(
            Tracker::assess_as_of(&behind, date(2020, 2, 11)),
            GoalOutlook::AtRisk {
                projected: date(2020, 2, 11) + Days::new(240),
                target_date: date(2020, 7, 1),
            }
        );

        let ahead = goal(250_000, 500_000).with_target_date(date(2020, 7, 1));
        assert!(matches!(
            Tracker::assess_as_of(&ahead, date(2020, 2, 11)),
            GoalOutlook::OnTrack { .. }
        ));

        assert_eq!(
            Tracker::assess_as_of(&goal(0, 10), date(2020, 2, 11)),
            GoalOutlook::Undetermined(ProjectionIssue::NoAccumulation)
        );
        assert_eq!(
            Tracker::assess_as_of(&goal(10, 10), date(2020, 2, 11)),
            GoalOutlook::Reached
        );
    }

    #[test]
    fn tracker_assess_uses_clock() {
        let mut store = MemoryStore::new();
        let clock = FixedClock::new(date(2020, 2, 11));
        let tracker = GoalTracker::new(&mut store, &TracingNotifier, &clock);
        let goal = goal(20_000, 500_000);
        assert!(matches!(
            tracker.assess(&goal),
            GoalOutlook::NoTargetDate { .. }
        ));
    }

    #[test]
    fn rejected_top_up_leaves_goal_untouched() {
        let mut store = MemoryStore::new();
        let person = store.insert_person(Person::new("Popova Svetlana")).unwrap();
        let mut goal = Goal::new(person, "auto", date(2020, 2, 1), 500_000).unwrap();
        store.insert_goal(goal.clone()).unwrap();
        let clock = FixedClock::new(date(2020, 2, 13));
        let mut tracker = GoalTracker::new(&mut store, &TracingNotifier, &clock);

        assert!(matches!(
            tracker.top_up(&mut goal, 0),
            Err(CoreError::Validation(_))
        ));
        assert!(matches!(
            tracker.top_up(&mut goal, -5),
            Err(CoreError::Validation(_))
        ));
        assert_eq!(goal.current_amount, 0);
        assert_eq!(goal.revision, 0);
    }
}
