//! Side-effect seam for goal notifications. Delivery itself is out of scope; the
//! default implementation only records the dispatch in the log.

use spendwise_domain::{Notification, Person};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("notification delivery failed: {0}")]
pub struct NotifyError(pub String);

/// Delivers goal notifications to their owner.
pub trait GoalNotifier {
    fn goal_reached(&self, person: &Person, notification: &Notification) -> Result<(), NotifyError>;
}

/// Notifier that emits a `tracing` event instead of contacting a real channel.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl GoalNotifier for TracingNotifier {
    fn goal_reached(&self, person: &Person, notification: &Notification) -> Result<(), NotifyError> {
        tracing::info!(
            person = %person.name,
            person_id = %person.id,
            channel = %notification.channel,
            "{}",
            notification.text
        );
        Ok(())
    }
}
