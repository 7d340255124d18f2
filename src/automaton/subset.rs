//! Subset construction: compiles an NFA transition table into a DFA.

use super::symbol::TouchSymbol;
use super::table::{DEFAULT_START_STATE, StateId, TransitionTable};
use crate::error::{Error, Result};
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet, VecDeque};

/// A set of NFA states, identified structurally by its sorted members
pub type StateSet = BTreeSet<StateId>;

/// Default ceiling on the number of DFA states
pub const DEFAULT_MAX_DFA_STATES: usize = 65_536;

/// Limits applied while building the DFA
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversionOptions {
    /// Maximum number of DFA states; `None` disables the check
    pub max_states: Option<usize>,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            max_states: Some(DEFAULT_MAX_DFA_STATES),
        }
    }
}

impl ConversionOptions {
    pub fn unbounded() -> Self {
        Self { max_states: None }
    }

    pub fn with_max_states(mut self, max_states: usize) -> Self {
        self.max_states = Some(max_states);
        self
    }
}

/// Outcome of a successful conversion
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionReport {
    pub dfa_states: usize,
    pub dfa_transitions: usize,
    /// DFA state -> the NFA states it stands for
    pub state_sets: BTreeMap<StateId, StateSet>,
}

/// Canonical text form of a state set: members joined by `_`, ascending
pub fn format_state_set(set: &StateSet) -> String {
    set.iter()
        .map(|state| state.to_string())
        .collect::<Vec<_>>()
        .join("_")
}

impl TransitionTable {
    /// Builds into `dfa` a deterministic table equivalent to this one.
    ///
    /// `dfa` must be empty. DFA state 1 stands for `{start_state}`. Labels
    /// leaving a state set are grouped by canonical string; when several NFA
    /// edges share a label, the first symbol seen is kept and the triggers of
    /// the others are merged into it.
    pub fn convert_to_dfa(
        &self,
        dfa: &mut TransitionTable,
        options: ConversionOptions,
    ) -> Result<ConversionReport> {
        if !dfa.is_empty() {
            return Err(Error::NonEmptyDestination(dfa.state_count()));
        }

        let mut report = ConversionReport::default();
        if self.is_empty() {
            tracing::debug!("Source table is empty, nothing to convert");
            return Ok(report);
        }

        let start_set = StateSet::from([self.start_state()]);
        let mut dfa_ids: BTreeMap<StateSet, StateId> = BTreeMap::new();
        let mut queue: VecDeque<(StateSet, StateId)> = VecDeque::new();
        let mut next_id = DEFAULT_START_STATE;

        dfa_ids.insert(start_set.clone(), next_id);
        report.state_sets.insert(next_id, start_set.clone());
        queue.push_back((start_set, next_id));
        next_id += 1;

        while let Some((state_set, dfa_state)) = queue.pop_front() {
            let groups = self.group_by_label(&state_set)?;

            tracing::debug!(
                "DFA state {} = {{{}}}: {} outgoing label(s)",
                dfa_state,
                format_state_set(&state_set),
                groups.len()
            );

            for (symbol, targets) in groups.into_values() {
                let target = match dfa_ids.get(&targets) {
                    Some(&id) => id,
                    None => {
                        if let Some(limit) = options.max_states
                            && dfa_ids.len() >= limit
                        {
                            return Err(Error::StateLimitExceeded { limit });
                        }

                        let id = next_id;
                        next_id += 1;
                        dfa_ids.insert(targets.clone(), id);
                        report.state_sets.insert(id, targets.clone());
                        queue.push_back((targets, id));
                        id
                    }
                };

                dfa.add_transition(symbol, dfa_state, target);
            }
        }

        if !dfa.is_empty() {
            dfa.set_start_state(DEFAULT_START_STATE);
        }

        // a start state without outgoing edges never lands in the DFA
        report.state_sets.retain(|&state, _| dfa.contains_state(state));
        report.dfa_states = dfa.state_count();
        report.dfa_transitions = dfa.transition_count();
        tracing::info!(
            "Converted NFA ({} states) into DFA ({} states, {} transitions)",
            self.state_count(),
            report.dfa_states,
            report.dfa_transitions
        );

        Ok(report)
    }

    /// Allocates a fresh table and converts into it
    pub fn to_dfa(&self, options: ConversionOptions) -> Result<(TransitionTable, ConversionReport)> {
        let mut dfa = TransitionTable::new();
        let report = self.convert_to_dfa(&mut dfa, options)?;
        Ok((dfa, report))
    }

    /// Collects, per distinct label leaving `state_set`, a representative
    /// symbol carrying the union of all triggers and the set of next states.
    fn group_by_label(
        &self,
        state_set: &StateSet,
    ) -> Result<BTreeMap<String, (TouchSymbol, StateSet)>> {
        let mut groups: BTreeMap<String, (TouchSymbol, StateSet)> = BTreeMap::new();

        for &state in state_set {
            for (&next_state, symbols) in self.outgoing(state)? {
                for symbol in symbols {
                    match groups.entry(symbol.canonical_string()) {
                        Entry::Vacant(entry) => {
                            entry.insert((symbol.clone(), StateSet::from([next_state])));
                        }
                        Entry::Occupied(mut entry) => {
                            let (representative, targets) = entry.get_mut();
                            targets.insert(next_state);
                            representative.add_triggers(symbol.triggers().iter().copied());
                        }
                    }
                }
            }
        }

        Ok(groups)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sym(encoding: &str) -> TouchSymbol {
        TouchSymbol::parse(encoding)
    }

    #[test]
    fn test_single_edge() {
        let mut nfa = TransitionTable::new();
        nfa.add_transition(sym("D1"), 1, 2);

        let mut dfa = TransitionTable::new();
        let report = nfa.convert_to_dfa(&mut dfa, ConversionOptions::default()).unwrap();

        assert_eq!(report.dfa_states, 2);
        assert_eq!(report.dfa_transitions, 1);
        assert_eq!(dfa.start_state(), 1);

        let outgoing = dfa.outgoing(dfa.start_state()).unwrap();
        assert_eq!(outgoing.len(), 1);
        let (&target, labels) = outgoing.iter().next().unwrap();
        assert_eq!(labels.len(), 1);
        assert!(labels[0].is_equal_to_str("D1"));
        assert!(dfa.is_accept_state(target));
    }

    #[test]
    fn test_equal_labels_merge_triggers() {
        let mut nfa = TransitionTable::new();
        nfa.add_transition(TouchSymbol::with_triggers("D1:left", [3, 1]), 1, 2);
        nfa.add_transition(TouchSymbol::with_triggers("D1:left", [2, 3]), 1, 3);

        let (dfa, report) = nfa.to_dfa(ConversionOptions::default()).unwrap();

        let edges: Vec<_> = dfa.edges().collect();
        assert_eq!(edges.len(), 1);
        let (from, to, symbol) = edges[0];
        assert_eq!(from, 1);
        let triggers: Vec<i32> = symbol.triggers().iter().copied().collect();
        assert_eq!(triggers, vec![1, 2, 3]);
        assert!(dfa.is_accept_state(to));
        assert_eq!(report.state_sets[&to], StateSet::from([2, 3]));

        // the source automaton keeps its own triggers
        let source_labels = nfa.transitions(1, 2).unwrap();
        assert_eq!(source_labels[0].triggers().len(), 2);
    }

    #[test]
    fn test_nondeterminism_is_removed() {
        // 1 -D1-> 2 -U1-> 4
        // 1 -D1-> 3 -U2-> 5
        let mut nfa = TransitionTable::new();
        nfa.add_transition(sym("D1"), 1, 2);
        nfa.add_transition(sym("D1"), 1, 3);
        nfa.add_transition(sym("U1"), 2, 4);
        nfa.add_transition(sym("U2"), 3, 5);

        let (dfa, report) = nfa.to_dfa(ConversionOptions::default()).unwrap();

        assert_eq!(report.dfa_states, 4);
        let after_down = dfa.next_states(1, "D1").unwrap();
        assert_eq!(after_down.len(), 1);
        let merged = after_down[0];
        assert_eq!(report.state_sets[&merged], StateSet::from([2, 3]));

        let up1 = dfa.next_states(merged, "U1").unwrap();
        let up2 = dfa.next_states(merged, "U2").unwrap();
        assert_eq!(up1.len(), 1);
        assert_eq!(up2.len(), 1);
        assert!(dfa.is_accept_state(up1[0]));
        assert!(dfa.is_accept_state(up2[0]));
        assert_ne!(up1[0], up2[0]);
    }

    #[test]
    fn test_cycles_terminate() {
        let mut nfa = TransitionTable::new();
        nfa.add_transition(sym("D1"), 1, 2);
        nfa.add_transition(sym("M1"), 2, 2);
        nfa.add_transition(sym("M1"), 2, 3);
        nfa.add_transition(sym("U1"), 3, 4);

        let (dfa, report) = nfa.to_dfa(ConversionOptions::default()).unwrap();

        // {1}, {2}, {2,3}, {4}
        assert_eq!(report.dfa_states, 4);
        let moved = dfa.next_states(2, "M1").unwrap();
        assert_eq!(moved.len(), 1);
        assert_eq!(dfa.next_states(moved[0], "M1").unwrap(), moved);
        assert_eq!(dfa.accept_states().len(), 1);
    }

    #[test]
    fn test_shared_target_sets_reuse_state() {
        let mut nfa = TransitionTable::new();
        nfa.add_transition(sym("D1"), 1, 2);
        nfa.add_transition(sym("D2"), 1, 2);

        let (dfa, report) = nfa.to_dfa(ConversionOptions::default()).unwrap();
        assert_eq!(report.dfa_states, 2);
        assert_eq!(dfa.transitions(1, 2).unwrap().len(), 2);
    }

    #[test]
    fn test_custom_start_state() {
        let mut nfa = TransitionTable::new();
        nfa.add_transition(sym("D1"), 10, 20);
        nfa.add_transition(sym("D9"), 30, 40);
        nfa.set_start_state(10);

        let (dfa, report) = nfa.to_dfa(ConversionOptions::default()).unwrap();
        assert_eq!(dfa.start_state(), 1);
        assert_eq!(report.state_sets[&1], StateSet::from([10]));
        assert_eq!(dfa.transition_count(), 1);
        assert!(dfa.next_states(1, "D9").unwrap().is_empty());
    }

    #[test]
    fn test_empty_source_gives_empty_dfa() {
        let nfa = TransitionTable::new();
        let (dfa, report) = nfa.to_dfa(ConversionOptions::default()).unwrap();
        assert!(dfa.is_empty());
        assert_eq!(report.dfa_states, 0);
    }

    #[test]
    fn test_missing_start_state_is_not_found() {
        let mut nfa = TransitionTable::new();
        nfa.add_transition(sym("D1"), 2, 3);
        let err = nfa.to_dfa(ConversionOptions::default()).unwrap_err();
        assert!(matches!(err, Error::StateNotFound(1)));
    }

    #[test]
    fn test_destination_must_be_empty() {
        let mut nfa = TransitionTable::new();
        nfa.add_transition(sym("D1"), 1, 2);
        let mut dfa = TransitionTable::new();
        dfa.add_transition(sym("U1"), 5, 6);

        let err = nfa
            .convert_to_dfa(&mut dfa, ConversionOptions::default())
            .unwrap_err();
        assert!(matches!(err, Error::NonEmptyDestination(2)));
    }

    #[test]
    fn test_state_limit() {
        let mut nfa = TransitionTable::new();
        nfa.add_transition(sym("D1"), 1, 2);
        nfa.add_transition(sym("M1"), 2, 3);
        nfa.add_transition(sym("U1"), 3, 4);

        let err = nfa
            .to_dfa(ConversionOptions::default().with_max_states(2))
            .unwrap_err();
        assert!(matches!(err, Error::StateLimitExceeded { limit: 2 }));

        assert!(nfa.to_dfa(ConversionOptions::unbounded()).is_ok());
    }

    #[test]
    fn test_state_limit_boundary() {
        let mut nfa = TransitionTable::new();
        nfa.add_transition(sym("D1"), 1, 2);
        nfa.add_transition(sym("M1"), 2, 3);
        nfa.add_transition(sym("U1"), 3, 4);

        let (_, report) = nfa
            .to_dfa(ConversionOptions::default().with_max_states(4))
            .unwrap();
        assert_eq!(report.dfa_states, 4);

        let err = nfa
            .to_dfa(ConversionOptions::default().with_max_states(3))
            .unwrap_err();
        assert!(matches!(err, Error::StateLimitExceeded { limit: 3 }));
    }

    #[test]
    fn test_accepting_start_state_gives_empty_report() {
        let mut nfa = TransitionTable::new();
        nfa.add_transition(sym("D1"), 2, 1);
        assert!(nfa.is_accept_state(nfa.start_state()));

        let (dfa, report) = nfa.to_dfa(ConversionOptions::default()).unwrap();
        assert!(dfa.is_empty());
        assert!(!dfa.is_accept_state(1));
        assert_eq!(report.dfa_states, 0);
        assert_eq!(report.dfa_transitions, 0);
        assert!(report.state_sets.is_empty());
    }

    #[test]
    fn test_report_matches_dfa() {
        let mut nfa = TransitionTable::new();
        nfa.add_transition(sym("D1"), 1, 2);
        nfa.add_transition(sym("D1"), 1, 3);
        nfa.add_transition(sym("U1"), 2, 4);

        let (dfa, report) = nfa.to_dfa(ConversionOptions::default()).unwrap();
        assert_eq!(report.dfa_states, dfa.state_count());
        assert!(report.state_sets.keys().all(|&state| dfa.contains_state(state)));
    }

    #[test]
    fn test_format_state_set() {
        assert_eq!(format_state_set(&StateSet::new()), "");
        assert_eq!(format_state_set(&StateSet::from([3, 1, 2])), "1_2_3");
    }
}
