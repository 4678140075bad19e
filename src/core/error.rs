//! Configuration errors.

use thiserror::Error;

/// Errors that can occur while loading, building or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration document was absent (`null`)
    #[error("Config is empty")]
    Missing,

    /// The configuration document could not be parsed into the expected shape
    #[error("Invalid config: {0}")]
    Invalid(#[from] serde_json::Error),

    #[error("Initial state not specified. Call .initial(state) before .build()")]
    MissingInitialState,

    #[error("No states defined. Add at least one state")]
    NoStates,

    #[error("State '{0}' is declared more than once")]
    DuplicateState(String),

    #[error("Initial state '{0}' is not a declared state")]
    UnknownInitialState(String),

    #[error("Transition '{event}' from '{state}' targets undeclared state '{target}'")]
    UnknownTarget {
        state: String,
        event: String,
        target: String,
    },
}
