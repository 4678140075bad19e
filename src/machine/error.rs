//! Errors raised by state machine operations.

use crate::core::{ConfigError, EventId, StateId};
use thiserror::Error;

/// Errors that can occur when constructing or driving a state machine.
///
/// Every error is raised before the machine is touched: a failed call
/// leaves the current state and history exactly as they were.
#[derive(Debug, Error)]
pub enum MachineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("State '{state}' not found")]
    UnknownState { state: StateId },

    #[error("Transition event '{event}' not found from state '{state}'")]
    UnknownTransition { state: StateId, event: EventId },
}
