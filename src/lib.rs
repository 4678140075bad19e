//! Rewind: a declarative finite state machine with undo/redo history
//!
//! A machine is described once by an immutable configuration (the initial
//! state and a table of states with their event transitions) and then
//! driven through a small set of operations. Every state change is
//! explicit and inspectable.
//!
//! # Core Concepts
//!
//! - **Configuration**: `MachineConfig`, loaded from JSON or built in code
//! - **Transitions**: `trigger` follows an event edge, `change_state` jumps
//! - **History**: a navigable log with a cursor, supporting `undo`/`redo`
//! - **Journal**: timestamped record of every effective state change
//!
//! # Example
//!
//! ```rust
//! use rewind::{machine_config, StateMachine};
//!
//! let config = machine_config! {
//!     initial: "idle",
//!     states: {
//!         "idle" => { "start" => "running" },
//!         "running" => { "stop" => "idle", "pause" => "paused" },
//!         "paused" => { "resume" => "running" },
//!     }
//! }
//! .unwrap();
//!
//! let mut machine = StateMachine::new(config);
//! machine.trigger("start").unwrap();
//! machine.trigger("pause").unwrap();
//! assert_eq!(machine.state(), "paused");
//!
//! assert!(machine.undo());
//! assert_eq!(machine.state(), "running");
//!
//! assert_eq!(machine.states(Some("stop")), ["running"]);
//! ```

pub mod builder;
pub mod core;
pub mod machine;

// Re-export commonly used types
pub use crate::builder::{MachineConfigBuilder, StateBuilder};
pub use crate::core::{ConfigError, History, MachineConfig, StateDefinition, TransitionLog};
pub use crate::machine::{MachineError, StateMachine};
