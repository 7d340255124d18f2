//! Automaton analyzer
//!
//! Projects a transition table onto a petgraph graph and reports structural
//! properties: reachability, cycles, and whether the table is deterministic.

use super::table::{StateId, TransitionTable};
use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::Bfs;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Structural summary of a transition table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutomatonReport {
    pub start_state: StateId,
    pub total_states: usize,
    pub total_transitions: usize,
    pub accept_states: Vec<StateId>,
    /// States that cannot be reached from the start state
    pub unreachable_states: Vec<StateId>,
    pub max_out_degree: usize,
    pub has_cycles: bool,
    /// No state has the same label leading to two different states
    pub is_deterministic: bool,
}

/// Build a petgraph view of the table; one edge per stored label
pub fn to_graph(table: &TransitionTable) -> (DiGraph<StateId, String>, HashMap<StateId, NodeIndex>) {
    let mut graph = DiGraph::new();
    let mut index = HashMap::new();

    for state in table.states() {
        index.insert(state, graph.add_node(state));
    }

    for (from, to, symbol) in table.edges() {
        if let (Some(&a), Some(&b)) = (index.get(&from), index.get(&to)) {
            graph.add_edge(a, b, symbol.canonical_string());
        }
    }

    (graph, index)
}

/// Analyze a transition table
pub fn analyze(table: &TransitionTable) -> AutomatonReport {
    let (graph, index) = to_graph(table);

    let mut reachable = BTreeSet::new();
    if let Some(&start) = index.get(&table.start_state()) {
        let mut bfs = Bfs::new(&graph, start);
        while let Some(node) = bfs.next(&graph) {
            reachable.insert(graph[node]);
        }
    }

    let unreachable_states = table
        .states()
        .filter(|state| !reachable.contains(state))
        .collect();

    let max_out_degree = graph
        .node_indices()
        .map(|idx| graph.edges_directed(idx, Direction::Outgoing).count())
        .max()
        .unwrap_or(0);

    AutomatonReport {
        start_state: table.start_state(),
        total_states: table.state_count(),
        total_transitions: table.transition_count(),
        accept_states: table.accept_states(),
        unreachable_states,
        max_out_degree,
        has_cycles: petgraph::algo::is_cyclic_directed(&graph),
        is_deterministic: is_deterministic(table),
    }
}

fn is_deterministic(table: &TransitionTable) -> bool {
    let mut targets: BTreeMap<(StateId, String), StateId> = BTreeMap::new();
    for (from, to, symbol) in table.edges() {
        match targets.insert((from, symbol.canonical_string()), to) {
            Some(previous) if previous != to => return false,
            _ => {}
        }
    }
    true
}
