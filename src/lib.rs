#![doc(test(attr(deny(warnings))))]

//! Spendwise tracks savings goals and spending, projecting goal completion dates
//! and aggregating purchase statistics over date ranges.

pub mod errors;
pub mod session;
pub mod utils;

pub use spendwise_config;
pub use spendwise_core;
pub use spendwise_domain;
pub use spendwise_storage_json;

pub use errors::{Result, SpendError};
pub use session::{Session, UnitOfWork};

/// Initializes global tracing with the default filter and logs the build.
pub fn init() {
    init_with_filter(&spendwise_config::Config::default_log_filter());
}

/// Initializes global tracing using the filter from the user's configuration.
pub fn init_with_config(config: &spendwise_config::Config) {
    init_with_filter(&config.log_filter);
}

fn init_with_filter(filter: &str) {
    utils::init_tracing(filter);
    tracing::info!("{}", utils::build_info::current());
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}
