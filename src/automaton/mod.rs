//! Automaton module - touch symbols, transition tables and DFA compilation

pub mod analyzer;
pub mod definition;
pub mod dot;
pub mod subset;
pub mod symbol;
pub mod table;

// Re-export key types
pub use analyzer::{AutomatonReport, analyze};
pub use definition::{AutomatonDefinition, TransitionEntry};
pub use subset::{ConversionOptions, ConversionReport, StateSet, format_state_set};
pub use symbol::{SymbolPolicy, TouchAction, TouchSymbol};
pub use table::{DEFAULT_START_STATE, StateId, StateTransitions, TransitionTable};
