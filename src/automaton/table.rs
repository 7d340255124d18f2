//! Transition table
//!
//! A sparse, symbol-labelled graph over integer states. The same type holds
//! both the NFA assembled from gesture definitions and the DFA produced by
//! [`TransitionTable::convert_to_dfa`].

use super::symbol::TouchSymbol;
use crate::error::{Error, Result};
use std::collections::BTreeMap;

/// Automaton state identifier
pub type StateId = u32;

/// State that is the start state unless configured otherwise
pub const DEFAULT_START_STATE: StateId = 1;

/// Outgoing edges of a single state, keyed by destination state
pub type StateTransitions = BTreeMap<StateId, Vec<TouchSymbol>>;

/// A directed graph of automaton states connected by touch-symbol labelled edges.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionTable {
    /// Source state -> destination state -> labels on that edge.
    ///
    /// Every state that was ever an endpoint of an edge is a key here, even
    /// when it has no outgoing edges; accept-state detection relies on it.
    transitions: BTreeMap<StateId, StateTransitions>,

    start_state: StateId,
}

impl Default for TransitionTable {
    fn default() -> Self {
        Self::new()
    }
}

impl TransitionTable {
    pub fn new() -> Self {
        Self {
            transitions: BTreeMap::new(),
            start_state: DEFAULT_START_STATE,
        }
    }

    /// Adds a labelled edge, creating both endpoint states if needed.
    ///
    /// A label whose canonical string is already present on the same edge is
    /// not added again.
    pub fn add_transition(&mut self, symbol: TouchSymbol, from: StateId, to: StateId) {
        self.transitions.entry(to).or_default();
        let symbols = self
            .transitions
            .entry(from)
            .or_default()
            .entry(to)
            .or_default();

        if !symbols.contains(&symbol) {
            symbols.push(symbol);
        }
    }

    /// A state is accepting when it is present and has no outgoing edges
    pub fn is_accept_state(&self, state: StateId) -> bool {
        self.transitions
            .get(&state)
            .is_some_and(|outgoing| outgoing.is_empty())
    }

    /// Intentionally a no-op: `add_transition` never leaves an edge without labels.
    pub fn remove_empty_transitions(&mut self) {}

    pub fn start_state(&self) -> StateId {
        self.start_state
    }

    pub fn set_start_state(&mut self, state: StateId) {
        self.start_state = state;
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    pub fn contains_state(&self, state: StateId) -> bool {
        self.transitions.contains_key(&state)
    }

    /// Number of states present in the table
    pub fn state_count(&self) -> usize {
        self.transitions.len()
    }

    /// Number of stored labels across all edges
    pub fn transition_count(&self) -> usize {
        self.transitions
            .values()
            .flat_map(|outgoing| outgoing.values())
            .map(Vec::len)
            .sum()
    }

    /// All state ids in ascending order
    pub fn states(&self) -> impl Iterator<Item = StateId> + '_ {
        self.transitions.keys().copied()
    }

    pub fn accept_states(&self) -> Vec<StateId> {
        self.transitions
            .iter()
            .filter(|(_, outgoing)| outgoing.is_empty())
            .map(|(&state, _)| state)
            .collect()
    }

    /// Outgoing edges of a state
    pub fn outgoing(&self, state: StateId) -> Result<&StateTransitions> {
        self.transitions
            .get(&state)
            .ok_or(Error::StateNotFound(state))
    }

    /// Labels on the edge between two states
    pub fn transitions(&self, from: StateId, to: StateId) -> Result<&[TouchSymbol]> {
        self.outgoing(from)?
            .get(&to)
            .map(Vec::as_slice)
            .ok_or(Error::TransitionNotFound { from, to })
    }

    /// Every `(from, to, label)` triple in the table
    pub fn edges(&self) -> impl Iterator<Item = (StateId, StateId, &TouchSymbol)> + '_ {
        self.transitions.iter().flat_map(|(&from, outgoing)| {
            outgoing
                .iter()
                .flat_map(move |(&to, symbols)| symbols.iter().map(move |symbol| (from, to, symbol)))
        })
    }

    /// States reached from `state` over an edge carrying `label`
    pub fn next_states(&self, state: StateId, label: &str) -> Result<Vec<StateId>> {
        Ok(self
            .outgoing(state)?
            .iter()
            .filter(|(_, symbols)| symbols.iter().any(|s| s.is_equal_to_str(label)))
            .map(|(&to, _)| to)
            .collect())
    }
}
