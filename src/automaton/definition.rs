//! Automaton definition files
//!
//! A definition lists `(symbol, from, to)` triples, optionally with triggers,
//! and is turned into an NFA transition table. TOML and JSON are accepted:
//!
//! ```toml
//! start_state = 1
//!
//! [[transition]]
//! symbol = "D1"
//! from = 1
//! to = 2
//! triggers = [10]
//! ```

use super::symbol::{SymbolPolicy, TouchSymbol};
use super::table::{StateId, TransitionTable};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One edge of an automaton definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionEntry {
    pub symbol: String,
    pub from: StateId,
    pub to: StateId,
    #[serde(default)]
    pub triggers: Vec<i32>,
}

/// A serialized NFA: start state plus a list of labelled edges
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutomatonDefinition {
    pub start_state: Option<StateId>,
    #[serde(default, rename = "transition", alias = "transitions")]
    pub transitions: Vec<TransitionEntry>,
}

impl AutomatonDefinition {
    /// Load a definition, picking the format from the file extension
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| Error::definition(path, format!("Failed to read definition: {}", e)))?;

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        let definition = match extension.as_deref() {
            Some("toml") => Self::from_toml(&contents),
            Some("json") => Self::from_json(&contents),
            _ => {
                return Err(Error::definition(
                    path,
                    "unsupported extension, expected .toml or .json",
                ));
            }
        };

        definition.map_err(|e| match e {
            Error::Definition { message, .. } => Error::definition(path, message),
            other => other,
        })
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn from_json(contents: &str) -> Result<Self> {
        serde_json::from_str(contents).map_err(|e| Error::definition("<json>", e.to_string()))
    }

    /// Build the NFA transition table described by this definition
    pub fn build(&self, policy: SymbolPolicy) -> Result<TransitionTable> {
        let mut table = TransitionTable::new();
        if let Some(start) = self.start_state {
            table.set_start_state(start);
        }

        for entry in &self.transitions {
            let mut symbol = TouchSymbol::parse_with_policy(&entry.symbol, policy)?;
            symbol.add_triggers(entry.triggers.iter().copied());
            table.add_transition(symbol, entry.from, entry.to);
        }

        tracing::debug!(
            "Built NFA with {} states and {} transitions",
            table.state_count(),
            table.transition_count()
        );

        Ok(table)
    }
}

impl From<&TransitionTable> for AutomatonDefinition {
    fn from(table: &TransitionTable) -> Self {
        Self {
            start_state: Some(table.start_state()),
            transitions: table
                .edges()
                .map(|(from, to, symbol)| TransitionEntry {
                    symbol: symbol.canonical_string(),
                    from,
                    to,
                    triggers: symbol.triggers().iter().copied().collect(),
                })
                .collect(),
        }
    }
}
