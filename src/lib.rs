//! Touch Gesture Automaton Compiler
//!
//! Models touch events as symbolic tokens and compiles them into gesture
//! automata.
//!
//! This library provides functionality for:
//! - Parsing and serializing touch symbols (`D5:red:big`)
//! - Assembling symbol-labelled NFA transition tables
//! - Converting an NFA into an equivalent DFA by subset construction
//! - Exporting automata as Graphviz DOT and analyzing their structure
//!
//! ```
//! use gesture_dfa::automaton::{ConversionOptions, TouchSymbol, TransitionTable};
//!
//! let mut nfa = TransitionTable::new();
//! nfa.add_transition(TouchSymbol::parse("D1"), 1, 2);
//! let (dfa, _) = nfa.to_dfa(ConversionOptions::default()).unwrap();
//! assert!(dfa.is_accept_state(2));
//! ```

pub mod automaton;
pub mod cli;
pub mod config;
pub mod error;

pub use config::Config;
pub use error::{Error, Result};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Initialize logging with the given log level
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
        assert_eq!(NAME, "gesture-dfa");
    }
}
