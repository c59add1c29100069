#![doc(test(attr(deny(warnings))))]

//! splitledger ties the group ledger engine to snapshot files, user
//! preferences and a reporting CLI.

pub mod cli;
pub mod errors;
pub mod snapshot;
pub mod utils;

pub use split_config as config;
pub use split_core as engine;
pub use split_domain as domain;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("splitledger tracing initialized.");
    });
}
