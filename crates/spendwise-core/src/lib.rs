//! spendwise-core
//!
//! Goal tracking and spending statistics for spendwise.
//! Depends on spendwise-domain. No terminal I/O; persistence goes through [`RecordStore`].

pub mod error;
pub mod goal_tracker;
pub mod notifier;
pub mod statistics;
pub mod store;
pub mod time;


pub use error::{CoreError, CoreResult, ProjectionIssue};
pub use goal_tracker::*;
pub use notifier::*;
pub use statistics::*;
pub use store::{BuyingQuery, MemoryStore, RecordStore};
pub use time::{Clock, FixedClock, SystemClock};
