//! Builder API for ergonomic configuration construction.
//!
//! This module provides fluent builders and a macro for declaring state
//! tables in code instead of loading them from JSON. Everything built here
//! is validated before it is handed out.

pub mod machine;
pub mod macros;
pub mod state;

pub use machine::MachineConfigBuilder;
pub use state::StateBuilder;

use crate::core::{ConfigError, MachineConfig, StateId};

/// Build a configuration where every state accepts the same event and the
/// states form a cycle in declaration order.
///
/// The first state is the initial one. Handy for toggles and traffic lights.
///
/// # Example
///
/// ```
/// use rewind::builder::cycle;
///
/// let config = cycle("next", ["green", "yellow", "red"]).unwrap();
///
/// assert_eq!(config.initial, "green");
/// assert_eq!(
///     config.states.get("red").unwrap().transition("next").map(String::as_str),
///     Some("green")
/// );
/// ```
pub fn cycle<I, S>(event: &str, states: I) -> Result<MachineConfig, ConfigError>
where
    I: IntoIterator<Item = S>,
    S: Into<StateId>,
{
    let states: Vec<StateId> = states.into_iter().map(Into::into).collect();
    let initial = states.first().cloned().ok_or(ConfigError::NoStates)?;

    let mut builder = MachineConfigBuilder::new().initial(initial);
    for (position, state) in states.iter().enumerate() {
        let next = &states[(position + 1) % states.len()];
        builder = builder.state(state.clone(), StateBuilder::new().on(event, next.clone()));
    }
    builder.build()
}

/// Build a configuration that walks through `states` in order, one `event`
/// at a time, ending in a terminal state.
///
/// # Example
///
/// ```
/// use rewind::builder::sequence;
///
/// let config = sequence("advance", ["draft", "review", "published"]).unwrap();
///
/// assert!(config.states.get("published").unwrap().transitions.is_empty());
/// ```
pub fn sequence<I, S>(event: &str, states: I) -> Result<MachineConfig, ConfigError>
where
    I: IntoIterator<Item = S>,
    S: Into<StateId>,
{
    let states: Vec<StateId> = states.into_iter().map(Into::into).collect();
    let initial = states.first().cloned().ok_or(ConfigError::NoStates)?;

    let mut builder = MachineConfigBuilder::new().initial(initial);
    for (position, state) in states.iter().enumerate() {
        let state_builder = match states.get(position + 1) {
            Some(next) => StateBuilder::new().on(event, next.clone()),
            None => StateBuilder::terminal(),
        };
        builder = builder.state(state.clone(), state_builder);
    }
    builder.build()
}
