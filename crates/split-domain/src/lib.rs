//! split-domain
//!
//! Pure domain models for group expense ledgers (participants, expenses,
//! settlements, suggested transfers) plus currency/locale primitives.
//! No I/O, no CLI, no storage. Only data types and core enums.

pub mod common;
pub mod currency;
pub mod expense;
pub mod group;
pub mod participant;
pub mod settlement;

pub use common::*;
pub use expense::*;
pub use group::*;
pub use participant::*;
pub use settlement::*;
