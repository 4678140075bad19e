//! Builder for a single state's transition table.

use crate::core::{EventId, StateDefinition, StateId};

/// Fluent builder for a [`StateDefinition`].
#[derive(Clone, Debug, Default)]
pub struct StateBuilder {
    definition: StateDefinition,
}

impl StateBuilder {
    /// Create a builder for a state with no transitions yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// A state with no outgoing transitions.
    pub fn terminal() -> Self {
        Self::new()
    }

    /// Register `target` as the destination of `event`.
    /// Registering the same event again replaces the earlier target.
    pub fn on(mut self, event: impl Into<EventId>, target: impl Into<StateId>) -> Self {
        self.definition = self.definition.with_transition(event, target);
        self
    }

    pub fn build(self) -> StateDefinition {
        self.definition
    }
}

impl From<StateBuilder> for StateDefinition {
    fn from(builder: StateBuilder) -> Self {
        builder.build()
    }
}
