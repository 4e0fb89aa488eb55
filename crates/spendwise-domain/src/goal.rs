//! Savings goals.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::{Identifiable, OwnedByPerson};

/// A savings target accumulated through top-ups.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Goal {
    pub id: Uuid,
    pub title: String,
    pub creation_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_date: Option<NaiveDate>,
    pub current_amount: i64,
    pub target_amount: i64,
    pub person_id: Uuid,
    /// Bumped by the store on every successful save.
    #[serde(default)]
    pub revision: u64,
}

impl Goal {
    pub fn new(
        person_id: Uuid,
        title: impl Into<String>,
        creation_date: NaiveDate,
        target_amount: i64,
    ) -> Result<Self, GoalError> {
        if target_amount <= 0 {
            return Err(GoalError::NonPositiveTarget(target_amount));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            title: title.into(),
            creation_date,
            target_date: None,
            current_amount: 0,
            target_amount,
            person_id,
            revision: 0,
        })
    }

    pub fn with_target_date(mut self, target_date: NaiveDate) -> Self {
        self.target_date = Some(target_date);
        self
    }

    /// Seeds the accumulated amount, e.g. when importing an existing goal.
    pub fn with_current_amount(mut self, current_amount: i64) -> Result<Self, GoalError> {
        if current_amount < 0 {
            return Err(GoalError::NegativeAmount(current_amount));
        }
        self.current_amount = current_amount;
        Ok(self)
    }

    /// Amount still missing; zero or negative once the target is met.
    pub fn remaining(&self) -> i64 {
        self.target_amount - self.current_amount
    }

    pub fn is_reached(&self) -> bool {
        self.remaining() <= 0
    }

    /// Accumulated share of the target, in percent. Not capped at 100.
    pub fn progress_percent(&self) -> f64 {
        (self.current_amount as f64 / self.target_amount as f64) * 100.0
    }

    /// Checks the invariants a stored goal must satisfy.
    pub fn validate(&self) -> Result<(), GoalError> {
        if self.target_amount <= 0 {
            return Err(GoalError::NonPositiveTarget(self.target_amount));
        }
        if self.current_amount < 0 {
            return Err(GoalError::NegativeAmount(self.current_amount));
        }
        Ok(())
    }
}

impl Identifiable for Goal {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl OwnedByPerson for Goal {
    fn person_id(&self) -> Uuid {
        self.person_id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalError {
    NonPositiveTarget(i64),
    NegativeAmount(i64),
}

impl fmt::Display for GoalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GoalError::NonPositiveTarget(value) => {
                write!(f, "goal target must be positive, got {value}")
            }
            GoalError::NegativeAmount(value) => {
                write!(f, "goal amount must not be negative, got {value}")
            }
        }
    }
}

impl std::error::Error for GoalError {}
