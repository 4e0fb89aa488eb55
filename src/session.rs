//! Record store acquisition and unit-of-work scoping.
//!
//! A [`Session`] owns the JSON record store named by the configuration. Goal and
//! statistics operations run inside [`Session::unit_of_work`], which commits the
//! store when the work succeeds and rolls it back when it fails.

use std::path::PathBuf;

use spendwise_config::Config;
use spendwise_core::{
    Clock, GoalNotifier, GoalTracker, StatisticsAggregator, SystemClock, TracingNotifier,
};
use spendwise_domain::NotificationChannel;
use spendwise_storage_json::JsonRecordStore;

use crate::errors::Result;

pub struct Session {
    config: Config,
    store: JsonRecordStore,
    clock: Box<dyn Clock>,
    notifier: Box<dyn GoalNotifier>,
}

impl Session {
    /// Creates the data directory and an empty record store if they are missing.
    /// Meant for setup tooling; repeated calls leave existing data untouched.
    pub fn initialize(config: &Config) -> Result<PathBuf> {
        let path = config.records_path();
        JsonRecordStore::initialize(&path)?;
        Ok(path)
    }

    /// Opens the record store described by `config`. The store must already exist.
    pub fn open(config: Config) -> Result<Self> {
        let store = JsonRecordStore::open(config.records_path())?;
        tracing::info!(path = %store.path().display(), "session opened");
        Ok(Self {
            config,
            store,
            clock: Box::new(SystemClock),
            notifier: Box::new(TracingNotifier),
        })
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_notifier(mut self, notifier: impl GoalNotifier + 'static) -> Self {
        self.notifier = Box::new(notifier);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &JsonRecordStore {
        &self.store
    }

    /// Read-only statistics over the committed state.
    pub fn statistics(&self) -> StatisticsAggregator<'_, JsonRecordStore> {
        StatisticsAggregator::new(&self.store)
    }

    /// Runs `work` against the store. Changes are committed when it returns `Ok`
    /// and discarded when it returns `Err` or the commit fails.
    pub fn unit_of_work<T>(
        &mut self,
        work: impl FnOnce(&mut UnitOfWork<'_>) -> Result<T>,
    ) -> Result<T> {
        // Changes left behind by a unit whose commit and rollback both failed.
        if self.store.is_dirty() {
            tracing::warn!("discarding changes of a previously failed unit of work");
            self.store.rollback()?;
        }

        let mut unit = UnitOfWork {
            store: &mut self.store,
            notifier: self.notifier.as_ref(),
            clock: self.clock.as_ref(),
            channel: self.config.notification_channel,
        };
        match work(&mut unit) {
            Ok(value) => match self.store.commit() {
                Ok(()) => Ok(value),
                Err(err) => {
                    self.discard("commit");
                    Err(err.into())
                }
            },
            Err(err) => {
                self.discard("unit of work");
                Err(err)
            }
        }
    }

    fn discard(&mut self, failed: &str) {
        if let Err(rollback) = self.store.rollback() {
            tracing::warn!("rollback after failed {failed} also failed: {rollback}");
        }
    }
}

/// Borrowed view of a session handed to [`Session::unit_of_work`].
pub struct UnitOfWork<'s> {
    store: &'s mut JsonRecordStore,
    notifier: &'s dyn GoalNotifier,
    clock: &'s dyn Clock,
    channel: NotificationChannel,
}

impl<'s> UnitOfWork<'s> {
    pub fn goals(&mut self) -> GoalTracker<'_, JsonRecordStore> {
        GoalTracker::new(&mut *self.store, self.notifier, self.clock).with_channel(self.channel)
    }

    pub fn statistics(&self) -> StatisticsAggregator<'_, JsonRecordStore> {
        StatisticsAggregator::new(&*self.store)
    }

    /// Direct access for inserting records within the unit of work.
    pub fn store(&mut self) -> &mut JsonRecordStore {
        &mut *self.store
    }

    pub fn today(&self) -> chrono::NaiveDate {
        self.clock.today()
    }
}
