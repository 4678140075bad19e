//! Declarative machine configuration.
//!
//! A configuration names the initial state and the table of states, each
//! with the events it accepts and where they lead. Configurations are plain
//! values: the engine only ever reads them.

use super::error::ConfigError;
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Identifier of a state.
pub type StateId = String;

/// Identifier of an event.
pub type EventId = String;

/// The transitions a single state accepts.
///
/// # Example
///
/// ```rust
/// use rewind::core::StateDefinition;
///
/// let idle = StateDefinition::new().with_transition("start", "running");
///
/// assert_eq!(idle.transition("start").map(String::as_str), Some("running"));
/// assert!(idle.transition("stop").is_none());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateDefinition {
    /// Event id to destination state id
    #[serde(default)]
    pub transitions: BTreeMap<EventId, StateId>,
}

impl StateDefinition {
    /// Create a state with no outgoing transitions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a transition, returning the updated definition.
    pub fn with_transition(
        mut self,
        event: impl Into<EventId>,
        target: impl Into<StateId>,
    ) -> Self {
        self.transitions.insert(event.into(), target.into());
        self
    }

    /// Destination registered for `event`, if any.
    pub fn transition(&self, event: &str) -> Option<&StateId> {
        self.transitions.get(event)
    }

    /// Whether `event` has a destination from this state.
    pub fn has_transition(&self, event: &str) -> bool {
        self.transitions.contains_key(event)
    }

    /// Event ids accepted by this state, in lexical order.
    pub fn events(&self) -> impl Iterator<Item = &str> {
        self.transitions.keys().map(String::as_str)
    }
}

/// Insertion-ordered table of state definitions.
///
/// Declaration order is significant: it is the order in which states are
/// enumerated. Lookups by id go through a side index.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StateTable {
    entries: Vec<(StateId, StateDefinition)>,
    index: HashMap<StateId, usize>,
}

impl StateTable {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    /// Append a state. Declaring the same id twice is an error.
    pub fn insert(
        &mut self,
        id: impl Into<StateId>,
        definition: StateDefinition,
    ) -> Result<(), ConfigError> {
        let id = id.into();
        if self.index.contains_key(&id) {
            return Err(ConfigError::DuplicateState(id));
        }
        self.index.insert(id.clone(), self.entries.len());
        self.entries.push((id, definition));
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&StateDefinition> {
        self.index.get(id).map(|&position| &self.entries[position].1)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// State ids in declaration order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(id, _)| id.as_str())
    }

    /// `(id, definition)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &StateDefinition)> {
        self.entries
            .iter()
            .map(|(id, definition)| (id.as_str(), definition))
    }
}

impl Serialize for StateTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (id, definition) in &self.entries {
            map.serialize_entry(id, definition)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for StateTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TableVisitor;

        impl<'de> Visitor<'de> for TableVisitor {
            type Value = StateTable;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of state ids to state definitions")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<StateTable, A::Error> {
                let mut table = StateTable::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((id, definition)) =
                    access.next_entry::<StateId, StateDefinition>()?
                {
                    table.insert(id, definition).map_err(de::Error::custom)?;
                }
                Ok(table)
            }
        }

        deserializer.deserialize_map(TableVisitor)
    }
}

/// Complete machine configuration: the initial state and the state table.
///
/// The JSON shape is
/// `{"initial": "...", "states": {"<state>": {"transitions": {"<event>": "<state>"}}}}`.
///
/// # Example
///
/// ```rust
/// use rewind::core::MachineConfig;
///
/// let config = MachineConfig::from_json(
///     r#"{
///         "initial": "idle",
///         "states": {
///             "idle": { "transitions": { "start": "running" } },
///             "running": { "transitions": { "stop": "idle" } }
///         }
///     }"#,
/// )
/// .unwrap();
///
/// assert_eq!(config.initial, "idle");
/// assert_eq!(config.states.ids().collect::<Vec<_>>(), ["idle", "running"]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineConfig {
    /// State the machine starts in and returns to on reset
    pub initial: StateId,
    /// All declared states
    pub states: StateTable,
}

impl MachineConfig {
    /// Create a configuration without validating it.
    pub fn new(initial: impl Into<StateId>, states: StateTable) -> Self {
        Self {
            initial: initial.into(),
            states,
        }
    }

    /// Parse a configuration from JSON.
    ///
    /// A `null` document is reported as [`ConfigError::Missing`]. The result
    /// is not validated; call [`MachineConfig::validate`] for that.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str::<Option<Self>>(json)?.ok_or(ConfigError::Missing)
    }

    /// Convert an already parsed JSON value into a configuration.
    pub fn from_value(value: serde_json::Value) -> Result<Self, ConfigError> {
        serde_json::from_value::<Option<Self>>(value)?.ok_or(ConfigError::Missing)
    }

    /// Serialize the configuration back to its JSON shape.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Check that the initial state and every transition target are declared.
    ///
    /// Reports the first problem found, scanning states in declaration order.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.states.contains(&self.initial) {
            log::warn!("initial state '{}' is not declared", self.initial);
            return Err(ConfigError::UnknownInitialState(self.initial.clone()));
        }

        for (state, definition) in self.states.iter() {
            for (event, target) in &definition.transitions {
                if !self.states.contains(target) {
                    log::warn!(
                        "transition '{}' from '{}' targets undeclared state '{}'",
                        event,
                        state,
                        target
                    );
                    return Err(ConfigError::UnknownTarget {
                        state: state.to_string(),
                        event: event.clone(),
                        target: target.clone(),
                    });
                }
            }
        }

        Ok(())
    }
}
