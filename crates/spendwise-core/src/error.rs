use std::fmt;

use chrono::NaiveDate;
use spendwise_domain::{CategoryError, DateRangeError, GoalError, PriceError};
use thiserror::Error;
use uuid::Uuid;

pub type CoreResult<T> = Result<T, CoreError>;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Projection undefined: {0}")]
    ProjectionUndefined(ProjectionIssue),
    #[error("Invalid range: start {start} is after end {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },
    #[error("Person not found: {0}")]
    PersonNotFound(Uuid),
    #[error("Category not found: {0}")]
    CategoryNotFound(Uuid),
    #[error("Goal not found: {0}")]
    GoalNotFound(Uuid),
    #[error("Goal {goal} was modified concurrently (expected revision {expected}, found {found})")]
    Conflict { goal: Uuid, expected: u64, found: u64 },
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Serialization error: {0}")]
    Serde(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CoreError {
    /// Failures raised by the record store rather than by the core itself.
    pub fn is_storage_failure(&self) -> bool {
        matches!(
            self,
            CoreError::Storage(_) | CoreError::Serde(_) | CoreError::Io(_)
        )
    }
}

/// Why a completion date cannot be projected from the saving velocity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectionIssue {
    /// The goal was created on (or after) the reference date.
    NoElapsedDays,
    /// Nothing has been accumulated yet.
    NoAccumulation,
    /// The projected date does not fit in the calendar.
    OutOfRange,
}

impl fmt::Display for ProjectionIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ProjectionIssue::NoElapsedDays => "no days have elapsed since the goal was created",
            ProjectionIssue::NoAccumulation => "nothing has been saved towards the goal yet",
            ProjectionIssue::OutOfRange => "projected date is outside the supported calendar",
        };
        f.write_str(label)
    }
}

impl From<DateRangeError> for CoreError {
    fn from(err: DateRangeError) -> Self {
        match err {
            DateRangeError::StartAfterEnd { start, end } => CoreError::InvalidRange { start, end },
        }
    }
}

impl From<GoalError> for CoreError {
    fn from(err: GoalError) -> Self {
        CoreError::Validation(err.to_string())
    }
}

impl From<PriceError> for CoreError {
    fn from(err: PriceError) -> Self {
        CoreError::Validation(err.to_string())
    }
}

impl From<CategoryError> for CoreError {
    fn from(err: CategoryError) -> Self {
        CoreError::Validation(err.to_string())
    }
}
