#![doc(test(attr(deny(warnings))))]

//! Spendview turns a user's raw expense records into the filtered, sorted and
//! summarized views shown on the dashboard and filters screens, and ships an
//! interactive shell to drive them.

pub mod cli;
pub mod errors;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Spendview tracing initialized.");
    });
}
