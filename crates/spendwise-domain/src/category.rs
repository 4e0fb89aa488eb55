//! Spending categories.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::Identifiable;

/// Groups purchases for reporting, optionally with a spending limit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub id: Uuid,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
}

impl Category {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            limit: None,
        }
    }

    /// Sets a spending limit. Negative limits are rejected.
    pub fn with_limit(mut self, limit: i64) -> Result<Self, CategoryError> {
        self.limit = Some(limit);
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), CategoryError> {
        match self.limit {
            Some(limit) if limit < 0 => Err(CategoryError::NegativeLimit(limit)),
            _ => Ok(()),
        }
    }

    /// Returns `true` when `spent` is above the configured limit.
    pub fn is_over_limit(&self, spent: i64) -> bool {
        self.limit.map_or(false, |limit| spent > limit)
    }
}

impl Identifiable for Category {
    fn id(&self) -> Uuid {
        self.id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryError {
    NegativeLimit(i64),
}

impl fmt::Display for CategoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryError::NegativeLimit(value) => {
                write!(f, "spending limit must not be negative, got {value}")
            }
        }
    }
}

impl std::error::Error for CategoryError {}
