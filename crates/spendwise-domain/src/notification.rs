use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{common::Identifiable, goal::Goal};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
/// Delivery channel for a notification.
pub enum NotificationChannel {
    #[default]
    Push,
    Email,
}

impl fmt::Display for NotificationChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            NotificationChannel::Push => "push",
            NotificationChannel::Email => "email",
        };
        f.write_str(label)
    }
}

/// Message produced for a person, optionally about one of their goals.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Notification {
    pub id: Uuid,
    pub channel: NotificationChannel,
    pub text: String,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal_id: Option<Uuid>,
}

impl Notification {
    pub fn new(channel: NotificationChannel, text: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            channel,
            text: text.into(),
            date,
            goal_id: None,
        }
    }

    pub fn for_goal(mut self, goal_id: Uuid) -> Self {
        self.goal_id = Some(goal_id);
        self
    }

    /// Builds the completion message sent once a goal reaches its target.
    pub fn goal_reached(goal: &Goal, channel: NotificationChannel, date: NaiveDate) -> Self {
        Self::new(
            channel,
            format!(
                "Goal `{}` reached: {} of {} saved",
                goal.title, goal.current_amount, goal.target_amount
            ),
            date,
        )
        .for_goal(goal.id)
    }
}

impl Identifiable for Notification {
    fn id(&self) -> Uuid {
        self.id
    }
}
