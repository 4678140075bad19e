//! The state machine engine.

use crate::core::{
    History, MachineConfig, StateId, TransitionCause, TransitionLog, TransitionRecord,
};
use crate::machine::error::MachineError;
use chrono::Utc;
use std::sync::Arc;

/// What happens to the history cursor when a transition appends an entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Cursor {
    /// Move the cursor onto the newly appended entry
    FollowTail,
    /// Leave the cursor alone; the caller positions it afterwards
    Keep,
}

/// Finite state machine driven by a shared, read-only configuration.
///
/// The machine tracks the current state, a navigable history supporting
/// undo and redo, and a timestamped journal of every effective change.
///
/// Instances are not synchronized. Wrap one in a mutex or keep one per
/// owner if it must be reached from several threads.
///
/// # Example
///
/// ```rust
/// use rewind::machine::StateMachine;
///
/// let mut machine = StateMachine::from_json(
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
/// machine.trigger("start").unwrap();
/// assert_eq!(machine.state(), "running");
///
/// assert!(machine.undo());
/// assert_eq!(machine.state(), "idle");
///
/// assert!(machine.redo());
/// assert_eq!(machine.state(), "running");
/// ```
#[derive(Clone, Debug)]
pub struct StateMachine {
    config: Arc<MachineConfig>,
    current: StateId,
    history: History,
    journal: TransitionLog,
}

impl StateMachine {
    /// Create a machine positioned on the configured initial state.
    ///
    /// The configuration is taken as-is. In particular the initial state is
    /// not required to be declared; use [`MachineConfig::validate`] first if
    /// that matters to the caller.
    pub fn new(config: impl Into<Arc<MachineConfig>>) -> Self {
        let config = config.into();
        let initial = config.initial.clone();
        log::debug!(
            "state machine created in '{}' with {} states",
            initial,
            config.states.len()
        );

        Self {
            current: initial.clone(),
            history: History::new(initial),
            journal: TransitionLog::new(),
            config,
        }
    }

    /// Keep at most `capacity` records in the journal, dropping the oldest.
    ///
    /// Defaults to [`DEFAULT_JOURNAL_CAPACITY`](crate::core::DEFAULT_JOURNAL_CAPACITY). Zero turns the journal off.
    /// History navigation is unaffected.
    pub fn with_journal_capacity(mut self, capacity: usize) -> Self {
        self.journal.set_capacity(capacity);
        self
    }

    /// Parse a JSON configuration and create a machine from it.
    ///
    /// A `null` document fails with [`ConfigError::Missing`](crate::core::ConfigError::Missing).
    pub fn from_json(json: &str) -> Result<Self, MachineError> {
        Ok(Self::new(MachineConfig::from_json(json)?))
    }

    /// The active state.
    pub fn state(&self) -> &str {
        &self.current
    }

    /// State ids in declaration order.
    ///
    /// With `Some(event)`, only states that register a transition for
    /// `event` are returned. Any string, including the empty one, is a
    /// legitimate event name; only `None` means "every state".
    pub fn states(&self, event: Option<&str>) -> Vec<&str> {
        match event {
            None => self.config.states.ids().collect(),
            Some(event) => self
                .config
                .states
                .iter()
                .filter(|(_, definition)| definition.has_transition(event))
                .map(|(id, _)| id)
                .collect(),
        }
    }

    /// Jump directly to `state`.
    ///
    /// Any declared state is reachable regardless of the transition table.
    /// Jumping to the current state is a no-op.
    pub fn change_state(&mut self, state: &str) -> Result<(), MachineError> {
        if !self.config.states.contains(state) {
            return Err(MachineError::UnknownState {
                state: state.to_string(),
            });
        }

        self.advance(state.to_string(), TransitionCause::Jump, Cursor::FollowTail);
        Ok(())
    }

    /// Follow the transition registered for `event` from the current state.
    ///
    /// Fails with [`MachineError::UnknownTransition`] when the current state
    /// has no such event, or [`MachineError::UnknownState`] when the current
    /// state itself is missing from the table.
    pub fn trigger(&mut self, event: &str) -> Result<(), MachineError> {
        let definition =
            self.config
                .states
                .get(&self.current)
                .ok_or_else(|| MachineError::UnknownState {
                    state: self.current.clone(),
                })?;

        let target = definition.transition(event).cloned().ok_or_else(|| {
            MachineError::UnknownTransition {
                state: self.current.clone(),
                event: event.to_string(),
            }
        })?;

        self.advance(
            target,
            TransitionCause::Trigger {
                event: event.to_string(),
            },
            Cursor::FollowTail,
        );
        Ok(())
    }

    /// Step back to the previous history entry.
    ///
    /// Returns `false` when the cursor is already at the start. Note that a
    /// successful undo appends the restored state to the tail of the history
    /// while the cursor moves back onto the original entry, so the history
    /// grows by one on each undo that changes state.
    pub fn undo(&mut self) -> bool {
        let Some(target) = self.history.previous().map(str::to_owned) else {
            log::trace!("undo unavailable at '{}'", self.current);
            return false;
        };

        self.advance(target, TransitionCause::Undo, Cursor::Keep);
        self.history.step_back();
        log::debug!("undo to '{}' (cursor {})", self.current, self.history.cursor());
        true
    }

    /// Step forward to the next history entry.
    ///
    /// Returns `false` when the cursor is already on the newest entry.
    /// Redo never appends to the history.
    pub fn redo(&mut self) -> bool {
        let Some(target) = self.history.next().map(str::to_owned) else {
            log::trace!("redo unavailable at '{}'", self.current);
            return false;
        };

        if target != self.current {
            let from = std::mem::replace(&mut self.current, target);
            self.journal.record(TransitionRecord {
                from,
                to: self.current.clone(),
                cause: TransitionCause::Redo,
                timestamp: Utc::now(),
            });
        }
        self.history.step_forward();
        log::debug!("redo to '{}' (cursor {})", self.current, self.history.cursor());
        true
    }

    /// Return to the initial state with a fresh history and an empty journal.
    pub fn reset(&mut self) {
        self.current = self.config.initial.clone();
        self.history.reseed(self.current.clone());
        self.journal.clear();
        log::debug!("reset to '{}'", self.current);
    }

    /// Re-seed the history with the initial state without moving the machine.
    ///
    /// The current state is left untouched, so when it differs from the
    /// initial state the history cursor no longer points at it until the
    /// next transition or reset.
    pub fn clear_history(&mut self) {
        self.history.reseed(self.config.initial.clone());
        log::debug!("history cleared while in '{}'", self.current);
    }

    /// The state the machine starts in and returns to on reset.
    pub fn initial_state(&self) -> &str {
        &self.config.initial
    }

    /// The shared configuration this machine runs on.
    pub fn config(&self) -> &Arc<MachineConfig> {
        &self.config
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Cursor into [`StateMachine::history`].
    pub fn history_index(&self) -> usize {
        self.history.cursor()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Timestamped record of the most recent effective state changes since
    /// creation or the last reset, bounded by the journal capacity.
    pub fn journal(&self) -> &TransitionLog {
        &self.journal
    }

    fn advance(&mut self, target: StateId, cause: TransitionCause, cursor: Cursor) {
        if self.current == target {
            log::trace!("already in '{}', ignoring {:?}", target, cause);
            return;
        }

        log::debug!("{:?}: '{}' -> '{}'", cause, self.current, target);
        let from = std::mem::replace(&mut self.current, target);
        self.history.push(self.current.clone());
        if cursor == Cursor::FollowTail {
            self.history.move_cursor_to_end();
        }

        self.journal.record(TransitionRecord {
            from,
            to: self.current.clone(),
            cause,
            timestamp: Utc::now(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ConfigError, StateDefinition, StateTable};

    fn player_config() -> MachineConfig {
        MachineConfig::from_json(
            r#"{
                "initial": "idle",
                "states": {
                    "idle": { "transitions": { "start": "running" } },
                    "running": { "transitions": { "stop": "idle", "pause": "paused" } },
                    "paused": { "transitions": { "resume": "running" } }
                }
            }"#,
        )
        .unwrap()
    }

    fn assert_cursor_on_current(machine: &StateMachine) {
        assert_eq!(
            machine.history().entries()[machine.history_index()],
            machine.state()
        );
    }

    #[test]
    fn new_machine_starts_in_initial_state() {
        let machine = StateMachine::new(player_config());

        assert_eq!(machine.state(), "idle");
        assert_eq!(machine.initial_state(), "idle");
        assert_eq!(machine.history().entries(), ["idle"]);
        assert_eq!(machine.history_index(), 0);
        assert!(machine.journal().is_empty());
    }

    #[test]
    fn from_json_null_is_config_error() {
        let result = StateMachine::from_json("null");
        assert!(matches!(
            result,
            Err(MachineError::Config(ConfigError::Missing))
        ));
    }

    #[test]
    fn construction_does_not_validate_initial() {
        let mut table = StateTable::new();
        table.insert("a", StateDefinition::new()).unwrap();
        let machine = StateMachine::new(MachineConfig::new("ghost", table));

        assert_eq!(machine.state(), "ghost");
    }

    #[test]
    fn machines_can_share_one_config() {
        let config = Arc::new(player_config());
        let mut first = StateMachine::new(Arc::clone(&config));
        let second = StateMachine::new(Arc::clone(&config));

        first.trigger("start").unwrap();

        assert_eq!(first.state(), "running");
        assert_eq!(second.state(), "idle");
        assert!(Arc::ptr_eq(first.config(), second.config()));
    }

    #[test]
    fn states_lists_all_in_declaration_order() {
        let machine = StateMachine::new(player_config());
        assert_eq!(machine.states(None), ["idle", "running", "paused"]);
    }

    #[test]
    fn states_filters_by_event() {
        let machine = StateMachine::new(player_config());
        assert_eq!(machine.states(Some("start")), ["idle"]);
        assert_eq!(machine.states(Some("resume")), ["paused"]);
        assert!(machine.states(Some("explode")).is_empty());
        assert!(machine.states(Some("")).is_empty());
    }

    #[test]
    fn change_state_jumps_without_an_edge() {
        let mut machine = StateMachine::new(player_config());
        machine.change_state("paused").unwrap();

        assert_eq!(machine.state(), "paused");
        assert_eq!(machine.history().entries(), ["idle", "paused"]);
        assert_eq!(machine.history_index(), 1);
        assert_eq!(machine.journal().records()[0].cause, TransitionCause::Jump);
    }

    #[test]
    fn change_state_to_unknown_state_fails_cleanly() {
        let mut machine = StateMachine::new(player_config());
        machine.trigger("start").unwrap();
        let before = machine.clone();

        let result = machine.change_state("nonexistent");

        match result {
            Err(MachineError::UnknownState { state }) => assert_eq!(state, "nonexistent"),
            other => panic!("Expected UnknownState, got {:?}", other),
        }
        assert_eq!(machine.state(), before.state());
        assert_eq!(machine.history(), before.history());
    }

    #[test]
    fn self_transition_is_a_no_op() {
        let mut machine = StateMachine::new(player_config());
        machine.change_state("idle").unwrap();

        assert_eq!(machine.history().len(), 1);
        assert_eq!(machine.history_index(), 0);
        assert!(machine.journal().is_empty());
    }

    #[test]
    fn trigger_follows_edges() {
        let mut machine = StateMachine::new(player_config());
        machine.trigger("start").unwrap();
        machine.trigger("pause").unwrap();

        assert_eq!(machine.state(), "paused");
        assert_eq!(machine.history().entries(), ["idle", "running", "paused"]);
        assert_eq!(machine.history_index(), 2);
        assert_eq!(
            machine.journal().records()[1].cause,
            TransitionCause::Trigger {
                event: "pause".to_string()
            }
        );
    }

    #[test]
    fn trigger_unknown_event_fails_cleanly() {
        let mut machine = StateMachine::new(player_config());

        let result = machine.trigger("stop");

        match result {
            Err(MachineError::UnknownTransition { state, event }) => {
                assert_eq!(state, "idle");
                assert_eq!(event, "stop");
            }
            other => panic!("Expected UnknownTransition, got {:?}", other),
        }
        assert_eq!(machine.state(), "idle");
        assert_eq!(machine.history().len(), 1);
    }

    #[test]
    fn trigger_from_undeclared_state_fails() {
        let mut table = StateTable::new();
        table
            .insert("a", StateDefinition::new().with_transition("go", "a"))
            .unwrap();
        let mut machine = StateMachine::new(MachineConfig::new("ghost", table));

        let result = machine.trigger("go");

        assert!(matches!(result, Err(MachineError::UnknownState { state }) if state == "ghost"));
        assert_eq!(machine.state(), "ghost");
    }

    #[test]
    fn undo_appends_restored_state() {
        let mut machine = StateMachine::new(player_config());
        machine.trigger("start").unwrap();
        machine.trigger("pause").unwrap();

        assert!(machine.undo());

        assert_eq!(machine.state(), "running");
        assert_eq!(
            machine.history().entries(),
            ["idle", "running", "paused", "running"]
        );
        assert_eq!(machine.history_index(), 1);
        assert_cursor_on_current(&machine);
    }

    #[test]
    fn undo_at_start_returns_false() {
        let mut machine = StateMachine::new(player_config());
        assert!(!machine.undo());
        assert_eq!(machine.state(), "idle");
        assert_eq!(machine.history().len(), 1);
    }

    #[test]
    fn redo_does_not_grow_history() {
        let mut machine = StateMachine::new(player_config());
        machine.trigger("start").unwrap();
        machine.undo();
        let length = machine.history().len();

        assert!(machine.redo());

        assert_eq!(machine.state(), "running");
        assert_eq!(machine.history().len(), length);
        assert_cursor_on_current(&machine);
        assert_eq!(machine.journal().records()[2].cause, TransitionCause::Redo);
    }

    #[test]
    fn redo_at_end_returns_false() {
        let mut machine = StateMachine::new(player_config());
        machine.trigger("start").unwrap();

        assert!(!machine.redo());
        assert_eq!(machine.state(), "running");
        assert_eq!(machine.history_index(), 1);
    }

    #[test]
    fn redo_advances_cursor_onto_repeated_state() {
        let mut machine = StateMachine::new(player_config());
        machine.trigger("start").unwrap();
        machine.clear_history();
        machine.change_state("idle").unwrap();
        // history: idle, idle; cursor 1
        assert!(machine.undo());
        assert_eq!(machine.history_index(), 0);
        assert_eq!(machine.history().len(), 2);

        let journal_len = machine.journal().len();
        assert!(machine.redo());
        assert_eq!(machine.history_index(), 1);
        assert_eq!(machine.state(), "idle");
        assert_eq!(machine.journal().len(), journal_len);
    }

    #[test]
    fn reset_restores_initial_state() {
        let mut machine = StateMachine::new(player_config());
        machine.trigger("start").unwrap();
        machine.trigger("pause").unwrap();
        machine.undo();

        machine.reset();

        assert_eq!(machine.state(), "idle");
        assert_eq!(machine.history().entries(), ["idle"]);
        assert_eq!(machine.history_index(), 0);
        assert!(machine.journal().is_empty());
        assert!(!machine.undo());
    }

    #[test]
    fn clear_history_keeps_current_state() {
        let mut machine = StateMachine::new(player_config());
        machine.trigger("start").unwrap();

        machine.clear_history();

        assert_eq!(machine.state(), "running");
        assert_eq!(machine.history().entries(), ["idle"]);
        assert_eq!(machine.history_index(), 0);
        assert!(!machine.can_undo());
        assert!(!machine.can_redo());
        assert_eq!(machine.journal().len(), 1);
    }

    #[test]
    fn undo_and_redo_are_unavailable_after_clear() {
        let mut machine = StateMachine::new(player_config());
        machine.trigger("start").unwrap();
        machine.trigger("pause").unwrap();
        machine.undo();

        machine.clear_history();

        assert!(!machine.undo());
        assert!(!machine.redo());
        assert_eq!(machine.state(), "running");
        assert_eq!(machine.history().entries(), ["idle"]);
    }

    #[test]
    fn journal_stays_bounded_across_cleared_history() {
        let mut table = StateTable::new();
        table
            .insert("a", StateDefinition::new().with_transition("go", "b"))
            .unwrap();
        table
            .insert("b", StateDefinition::new().with_transition("go", "a"))
            .unwrap();
        let mut machine =
            StateMachine::new(MachineConfig::new("a", table)).with_journal_capacity(16);

        for _ in 0..10_000 {
            machine.trigger("go").unwrap();
            machine.clear_history();
        }

        assert_eq!(machine.history().len(), 1);
        assert_eq!(machine.journal().len(), 16);
        assert_eq!(machine.journal().capacity(), 16);
        assert_eq!(machine.journal().records().back().unwrap().to, machine.state());
    }

    #[test]
    fn default_journal_capacity_applies() {
        let machine = StateMachine::new(player_config());
        assert_eq!(
            machine.journal().capacity(),
            crate::core::DEFAULT_JOURNAL_CAPACITY
        );
    }

    #[test]
    fn journal_tracks_effective_changes() {
        let mut machine = StateMachine::new(player_config());
        machine.trigger("start").unwrap();
        machine.change_state("running").unwrap();
        machine.undo();
        machine.redo();

        assert_eq!(
            machine.journal().get_path(),
            ["idle", "running", "idle", "running"]
        );
    }
}
