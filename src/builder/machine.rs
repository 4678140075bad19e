//! Builder for constructing machine configurations.

use crate::builder::state::StateBuilder;
use crate::core::{ConfigError, MachineConfig, StateDefinition, StateId, StateTable};

/// Builder for constructing configurations with a fluent API.
///
/// Unlike loading from JSON, `build` validates the result: the initial state
/// and every transition target must be declared.
#[derive(Clone, Debug, Default)]
pub struct MachineConfigBuilder {
    initial: Option<StateId>,
    states: Vec<(StateId, StateDefinition)>,
}

impl MachineConfigBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the initial state (required).
    pub fn initial(mut self, state: impl Into<StateId>) -> Self {
        self.initial = Some(state.into());
        self
    }

    /// Declare a state using a builder.
    pub fn state(self, id: impl Into<StateId>, builder: StateBuilder) -> Self {
        self.add_state(id, builder.build())
    }

    /// Declare a state from a ready-made definition.
    pub fn add_state(mut self, id: impl Into<StateId>, definition: StateDefinition) -> Self {
        self.states.push((id.into(), definition));
        self
    }

    /// Build and validate the configuration.
    /// Returns an error if required fields are missing or references dangle.
    pub fn build(self) -> Result<MachineConfig, ConfigError> {
        let initial = self.initial.ok_or(ConfigError::MissingInitialState)?;

        if self.states.is_empty() {
            return Err(ConfigError::NoStates);
        }

        let mut table = StateTable::new();
        for (id, definition) in self.states {
            table.insert(id, definition)?;
        }

        let config = MachineConfig::new(initial, table);
        config.validate()?;
        Ok(config)
    }
}
