//! split-core
//!
//! Ledger and settlement logic for shared group expenses.
//! Depends on split-domain. No CLI, no terminal I/O, no storage: every
//! entry point is a synchronous function of the records it is handed.

pub mod balance_service;
pub mod error;
pub mod expense_service;
pub mod format;
pub mod integrity;
pub mod money;
pub mod settlement_service;
pub mod simplify_service;
pub mod summary_service;

pub use balance_service::*;
pub use error::CoreError;
pub use expense_service::*;
pub use format::*;
pub use integrity::ledger_warnings;
pub use money::*;
pub use settlement_service::*;
pub use simplify_service::*;
pub use summary_service::*;
