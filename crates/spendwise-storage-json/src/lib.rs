//! spendwise-storage-json
//!
//! File-backed [`RecordStore`] that keeps a JSON snapshot of every record.
//! Writes are buffered in memory until [`JsonRecordStore::commit`].

use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use spendwise_core::{BuyingQuery, CoreError, CoreResult, MemoryStore, RecordStore};
use spendwise_domain::{
    Account, Buying, Category, Goal, Notification, Person, Records, CURRENT_SCHEMA_VERSION,
};
use uuid::Uuid;

const TMP_SUFFIX: &str = "tmp";

/// JSON snapshot store. Reads are served from memory; mutations mark the store
/// dirty until they are committed or rolled back.
#[derive(Debug)]
pub struct JsonRecordStore {
    path: PathBuf,
    inner: MemoryStore,
    dirty: bool,
}

impl JsonRecordStore {
    /// Creates an empty snapshot at `path` unless one already exists, then opens it.
    /// Safe to run repeatedly.
    pub fn initialize(path: impl Into<PathBuf>) -> CoreResult<Self> {
        let path = path.into();
        if !path.exists() {
            save_records_to_path(&Records::new(), &path)?;
            tracing::info!(path = %path.display(), "initialized record store");
        }
        Self::open(path)
    }

    /// Opens an existing snapshot. Fails when the store was never initialized.
    pub fn open(path: impl Into<PathBuf>) -> CoreResult<Self> {
        let path = path.into();
        if !path.exists() {
            return Err(CoreError::Storage(format!(
                "record store `{}` is not initialized",
                path.display()
            )));
        }
        let records = load_records_from_path(&path)?;
        tracing::debug!(
            path = %path.display(),
            buyings = records.buyings.len(),
            goals = records.goals.len(),
            "opened record store"
        );
        Ok(Self {
            path,
            inner: MemoryStore::from_records(records),
            dirty: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn records(&self) -> &Records {
        self.inner.records()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Writes pending changes to disk atomically.
    pub fn commit(&mut self) -> CoreResult<()> {
        if !self.dirty {
            return Ok(());
        }
        save_records_to_path(self.inner.records(), &self.path)?;
        self.dirty = false;
        tracing::debug!(path = %self.path.display(), "committed record store");
        Ok(())
    }

    /// Discards pending changes by reloading the snapshot from disk.
    pub fn rollback(&mut self) -> CoreResult<()> {
        if !self.dirty {
            return Ok(());
        }
        self.inner = MemoryStore::from_records(load_records_from_path(&self.path)?);
        self.dirty = false;
        tracing::debug!(path = %self.path.display(), "rolled back record store");
        Ok(())
    }

    fn mark<T>(&mut self, result: CoreResult<T>) -> CoreResult<T> {
        if result.is_ok() {
            self.dirty = true;
        }
        result
    }
}

impl RecordStore for JsonRecordStore {
    fn person(&self, id: Uuid) -> CoreResult<Person> {
        self.inner.person(id)
    }

    fn category(&self, id: Uuid) -> CoreResult<Category> {
        self.inner.category(id)
    }

    fn goal(&self, id: Uuid) -> CoreResult<Goal> {
        self.inner.goal(id)
    }

    fn select_buyings(&self, query: &BuyingQuery) -> CoreResult<Vec<Buying>> {
        self.inner.select_buyings(query)
    }

    fn accounts_for(&self, person_id: Uuid) -> CoreResult<Vec<Account>> {
        self.inner.accounts_for(person_id)
    }

    fn notifications_for(&self, goal_id: Uuid) -> CoreResult<Vec<Notification>> {
        self.inner.notifications_for(goal_id)
    }

    fn save_goal(&mut self, goal: &Goal) -> CoreResult<Goal> {
        let result = self.inner.save_goal(goal);
        self.mark(result)
    }

    fn insert_person(&mut self, person: Person) -> CoreResult<Uuid> {
        let result = self.inner.insert_person(person);
        self.mark(result)
    }

    fn insert_category(&mut self, category: Category) -> CoreResult<Uuid> {
        let result = self.inner.insert_category(category);
        self.mark(result)
    }

    fn insert_buying(&mut self, buying: Buying) -> CoreResult<Uuid> {
        let result = self.inner.insert_buying(buying);
        self.mark(result)
    }

    fn insert_goal(&mut self, goal: Goal) -> CoreResult<Uuid> {
        let result = self.inner.insert_goal(goal);
        self.mark(result)
    }

    fn insert_notification(&mut self, notification: Notification) -> CoreResult<Uuid> {
        let result = self.inner.insert_notification(notification);
        self.mark(result)
    }

    fn insert_account(&mut self, account: Account) -> CoreResult<Uuid> {
        let result = self.inner.insert_account(account);
        self.mark(result)
    }
}

/// Saves a records snapshot to an arbitrary path on disk.
pub fn save_records_to_path(records: &Records, path: &Path) -> CoreResult<()> {
    let tmp = tmp_path(path);
    write_atomic(&tmp, &serialize_records(records)?)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

/// Loads a records snapshot from the provided filesystem path.
pub fn load_records_from_path(path: &Path) -> CoreResult<Records> {
    let data = fs::read_to_string(path)?;
    let records: Records =
        serde_json::from_str(&data).map_err(|err| CoreError::Serde(err.to_string()))?;
    if records.schema_version > CURRENT_SCHEMA_VERSION {
        return Err(CoreError::Storage(format!(
            "`{}` uses schema version {}, newest supported is {}",
            path.display(),
            records.schema_version,
            CURRENT_SCHEMA_VERSION
        )));
    }
    validate_records(&records, path)?;
    Ok(records)
}

/// Rejects snapshots holding goals or categories that could not have been stored
/// through the record store itself.
fn validate_records(records: &Records, path: &Path) -> CoreResult<()> {
    for goal in &records.goals {
        goal.validate().map_err(|err| {
            CoreError::Storage(format!("`{}` holds invalid goal {}: {err}", path.display(), goal.id))
        })?;
    }
    for category in &records.categories {
        category.validate().map_err(|err| {
            CoreError::Storage(format!(
                "`{}` holds invalid category {}: {err}",
                path.display(),
                category.id
            ))
        })?;
    }
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> CoreResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

fn serialize_records(records: &Records) -> CoreResult<String> {
    serde_json::to_string_pretty(records).map_err(|err| CoreError::Serde(err.to_string()))
}
