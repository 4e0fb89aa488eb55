use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::Identifiable;

/// A money holder such as a salary card or a savings account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Account {
    pub id: Uuid,
    pub title: String,
    pub current_amount: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub person_id: Option<Uuid>,
}

impl Account {
    /// Creates an unowned account with the given balance.
    pub fn new(title: impl Into<String>, current_amount: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            current_amount,
            person_id: None,
        }
    }

    pub fn owned_by(mut self, person_id: Uuid) -> Self {
        self.person_id = Some(person_id);
        self
    }
}

impl Identifiable for Account {
    fn id(&self) -> Uuid {
        self.id
    }
}
