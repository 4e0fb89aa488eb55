//! Record store contract and the in-memory implementation shared by every backend.

use spendwise_domain::{
    Account, Buying, Category, DateRange, Goal, Identifiable, Notification, Person, Records,
};
use uuid::Uuid;

use crate::{CoreError, CoreResult};

/// Filter applied by [`RecordStore::select_buyings`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuyingQuery {
    pub person_id: Uuid,
    pub range: DateRange,
    pub category_id: Option<Uuid>,
}

impl BuyingQuery {
    pub fn new(person_id: Uuid, range: DateRange) -> Self {
        Self {
            person_id,
            range,
            category_id: None,
        }
    }

    pub fn in_category(mut self, category_id: Uuid) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn matches(&self, buying: &Buying) -> bool {
        buying.person_id == self.person_id
            && self.range.contains(buying.purchase_date)
            && self
                .category_id
                .map_or(true, |category| buying.category_id == category)
    }
}

/// Persistence seam for the core. Selections return records in insertion order.
pub trait RecordStore {
    fn person(&self, id: Uuid) -> CoreResult<Person>;
    fn category(&self, id: Uuid) -> CoreResult<Category>;
    fn goal(&self, id: Uuid) -> CoreResult<Goal>;
    fn select_buyings(&self, query: &BuyingQuery) -> CoreResult<Vec<Buying>>;
    fn accounts_for(&self, person_id: Uuid) -> CoreResult<Vec<Account>>;
    fn notifications_for(&self, goal_id: Uuid) -> CoreResult<Vec<Notification>>;

    /// Persists a goal whose `revision` matches the stored one and returns the
    /// stored copy with the revision bumped. A stale revision yields
    /// [`CoreError::Conflict`].
    fn save_goal(&mut self, goal: &Goal) -> CoreResult<Goal>;

    fn insert_person(&mut self, person: Person) -> CoreResult<Uuid>;
    fn insert_category(&mut self, category: Category) -> CoreResult<Uuid>;
    fn insert_buying(&mut self, buying: Buying) -> CoreResult<Uuid>;
    fn insert_goal(&mut self, goal: Goal) -> CoreResult<Uuid>;
    fn insert_notification(&mut self, notification: Notification) -> CoreResult<Uuid>;
    fn insert_account(&mut self, account: Account) -> CoreResult<Uuid>;
}

/// Keeps all records in memory, preserving insertion order.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Records,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Records) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &Records {
        &self.records
    }

    pub fn into_records(self) -> Records {
        self.records
    }

    fn require_person(&self, id: Uuid) -> CoreResult<()> {
        self.records
            .person(id)
            .map(|_| ())
            .ok_or(CoreError::PersonNotFound(id))
    }
}

fn ensure_unique<T: Identifiable>(items: &[T], id: Uuid, kind: &str) -> CoreResult<()> {
    if items.iter().any(|item| item.id() == id) {
        return Err(CoreError::Validation(format!("{kind} {id} already exists")));
    }
    Ok(())
}

impl RecordStore for MemoryStore {
    fn person(&self, id: Uuid) -> CoreResult<Person> {
        self.records
            .person(id)
            .cloned()
            .ok_or(CoreError::PersonNotFound(id))
    }

    fn category(&self, id: Uuid) -> CoreResult<Category> {
        self.records
            .category(id)
            .cloned()
            .ok_or(CoreError::CategoryNotFound(id))
    }

    fn goal(&self, id: Uuid) -> CoreResult<Goal> {
        self.records
            .goal(id)
            .cloned()
            .ok_or(CoreError::GoalNotFound(id))
    }

    fn select_buyings(&self, query: &BuyingQuery) -> CoreResult<Vec<Buying>> {
        Ok(self
            .records
            .buyings
            .iter()
            .filter(|buying| query.matches(buying))
            .cloned()
            .collect())
    }

    fn accounts_for(&self, person_id: Uuid) -> CoreResult<Vec<Account>> {
        Ok(self
            .records
            .accounts
            .iter()
            .filter(|account| account.person_id == Some(person_id))
            .cloned()
            .collect())
    }

    fn notifications_for(&self, goal_id: Uuid) -> CoreResult<Vec<Notification>> {
        Ok(self
            .records
            .notifications
            .iter()
            .filter(|notification| notification.goal_id == Some(goal_id))
            .cloned()
            .collect())
    }

    fn save_goal(&mut self, goal: &Goal) -> CoreResult<Goal> {
        goal.validate()?;
        let stored = self
            .records
            .goal_mut(goal.id)
            .ok_or(CoreError::GoalNotFound(goal.id))?;
        if stored.revision != goal.revision {
            return Err(CoreError::Conflict {
                goal: goal.id,
                expected: goal.revision,
                found: stored.revision,
            });
        }
        let mut updated = goal.clone();
        updated.revision += 1;
        *stored = updated.clone();
        self.records.touch();
        Ok(updated)
    }

    fn insert_person(&mut self, person: Person) -> CoreResult<Uuid> {
        ensure_unique(&self.records.people, person.id, "person")?;
        let id = person.id;
        self.records.people.push(person);
        self.records.touch();
        Ok(id)
    }

    fn insert_category(&mut self, category: Category) -> CoreResult<Uuid> {
        ensure_unique(&self.records.categories, category.id, "category")?;
        category.validate()?;
        let id = category.id;
        self.records.categories.push(category);
        self.records.touch();
        Ok(id)
    }

    fn insert_buying(&mut self, buying: Buying) -> CoreResult<Uuid> {
        ensure_unique(&self.records.buyings, buying.id, "buying")?;
        self.require_person(buying.person_id)?;
        if self.records.category(buying.category_id).is_none() {
            return Err(CoreError::CategoryNotFound(buying.category_id));
        }
        let id = buying.id;
        self.records.buyings.push(buying);
        self.records.touch();
        Ok(id)
    }

    fn insert_goal(&mut self, goal: Goal) -> CoreResult<Uuid> {
        ensure_unique(&self.records.goals, goal.id, "goal")?;
        goal.validate()?;
        self.require_person(goal.person_id)?;
        let id = goal.id;
        self.records.goals.push(goal);
        self.records.touch();
        Ok(id)
    }

    fn insert_notification(&mut self, notification: Notification) -> CoreResult<Uuid> {
        ensure_unique(&self.records.notifications, notification.id, "notification")?;
        if let Some(goal_id) = notification.goal_id {
            if self.records.goal(goal_id).is_none() {
                return Err(CoreError::GoalNotFound(goal_id));
            }
        }
        let id = notification.id;
        self.records.notifications.push(notification);
        self.records.touch();
        Ok(id)
    }

    fn insert_account(&mut self, account: Account) -> CoreResult<Uuid> {
        ensure_unique(&self.records.accounts, account.id, "account")?;
        if let Some(person_id) = account.person_id {
            self.require_person(person_id)?;
        }
        let id = account.id;
        self.records.accounts.push(account);
        self.records.touch();
        Ok(id)
    }
}
