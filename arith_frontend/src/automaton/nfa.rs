//! Nondeterministic finite automaton over characters
//!
//! The automaton is simulated directly on sets of states; there is no
//! determinization step. `reset` must precede each matching attempt.

use std::collections::{HashMap, HashSet};

/// Opaque state identifier, meaningful only within one automaton
pub type StateId = u32;

#[derive(Debug, Clone, Default)]
pub struct Automaton {
    start_states: HashSet<StateId>,
    accept_states: HashSet<StateId>,
    transitions: HashMap<(StateId, char), HashSet<StateId>>,
    active_states: HashSet<StateId>,
}

impl Automaton {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `id` as a start and/or accept state. Unmarked states need no
    /// registration; they exist once a transition mentions them.
    pub fn add_state(&mut self, id: StateId, is_start: bool, is_accept: bool) {
        if is_start {
            self.start_states.insert(id);
        }
        if is_accept {
            self.accept_states.insert(id);
        }
    }

    /// Add `to` to the destination set of `(from, symbol)`
    pub fn add_transition(&mut self, from: StateId, symbol: char, to: StateId) {
        self.transitions
            .entry((from, symbol))
            .or_default()
            .insert(to);
    }

    /// Builder form of [`Automaton::add_state`]
    pub fn with_state(mut self, id: StateId, is_start: bool, is_accept: bool) -> Self {
        self.add_state(id, is_start, is_accept);
        self
    }

    /// Add one transition per symbol in `symbols`, all sharing `from` and `to`
    pub fn with_transitions(
        mut self,
        from: StateId,
        symbols: impl IntoIterator<Item = char>,
        to: StateId,
    ) -> Self {
        for symbol in symbols {
            self.add_transition(from, symbol, to);
        }
        self
    }

    /// Restart simulation from the start states
    pub fn reset(&mut self) {
        self.active_states.clone_from(&self.start_states);
    }

    /// Advance every active state on `symbol`
    pub fn apply(&mut self, symbol: char) {
        let next: HashSet<StateId> = self
            .active_states
            .iter()
            .filter_map(|&state| self.transitions.get(&(state, symbol)))
            .flatten()
            .copied()
            .collect();

        self.active_states = next;
    }

    /// Whether an accept state is currently active
    pub fn accepts(&self) -> bool {
        !self.active_states.is_disjoint(&self.accept_states)
    }

    /// Whether any active state can move on `symbol`
    pub fn has_transitions(&self, symbol: char) -> bool {
        self.active_states.iter().any(|&state| {
            self.transitions
                .get(&(state, symbol))
                .is_some_and(|targets| !targets.is_empty())
        })
    }

    /// True once the simulation has no live states left
    pub fn is_dead(&self) -> bool {
        self.active_states.is_empty()
    }

    pub fn active_states(&self) -> &HashSet<StateId> {
        &self.active_states
    }

    /// Number of distinct states mentioned by the definition
    pub fn state_count(&self) -> usize {
        let mut states: HashSet<StateId> = self
            .start_states
            .union(&self.accept_states)
            .copied()
            .collect();

        for (&(from, _), targets) in &self.transitions {
            states.insert(from);
            states.extend(targets);
        }

        states.len()
    }

    pub fn transition_count(&self) -> usize {
        self.transitions.values().map(HashSet::len).sum()
    }
}
