//! The stateful engine.
//!
//! [`StateMachine`] owns the mutable side of the system: the current
//! state, the history cursor and the journal. Its configuration is shared
//! and never modified.
//!
//! # Operations
//!
//! - `state` / `states`: queries
//! - `change_state`: jump to any declared state
//! - `trigger`: follow an event edge from the current state
//! - `undo` / `redo`: move through history
//! - `reset` / `clear_history`: start over

mod error;
mod state_machine;

pub use error::MachineError;
pub use state_machine::StateMachine;
