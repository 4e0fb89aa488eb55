//! spendwise-domain
//!
//! Pure domain models (Person, Category, Buying, Goal, Notification, Account).
//! No I/O, no storage. Only data types, invariants and the records snapshot.

pub mod account;
pub mod buying;
pub mod category;
pub mod common;
pub mod goal;
pub mod notification;
pub mod person;
pub mod records;

pub use account::*;
pub use buying::*;
pub use category::*;
pub use common::*;
pub use goal::*;
pub use notification::*;
pub use person::*;
pub use records::*;
