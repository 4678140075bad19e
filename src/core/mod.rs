//! Core value types for the state machine.
//!
//! This module holds the plain data the engine works with:
//! - Declarative configuration (`MachineConfig`, `StateTable`, `StateDefinition`)
//! - The navigable history log with its cursor
//! - The timestamped journal of state changes
//!
//! None of these types know about each other's invariants beyond their own;
//! the engine in [`crate::machine`] ties them together.

mod config;
mod error;
mod history;
mod journal;

pub use config::{EventId, MachineConfig, StateDefinition, StateId, StateTable};
pub use error::ConfigError;
pub use history::History;
pub use journal::{TransitionCause, TransitionLog, TransitionRecord, DEFAULT_JOURNAL_CAPACITY};
