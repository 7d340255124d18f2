//! Touch symbol representation
//!
//! A touch symbol is one letter of the gesture alphabet. Its text form is
//! `<action><id>[:attr]*`, e.g. `D5:red:big`.

use crate::error::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::convert::Infallible;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::LazyLock;

/// Separator between the action/id core and each attribute value
pub const ATTRIBUTE_DELIMITER: char = ':';

/// Id reported for encodings whose core is too short or not numeric
pub const INVALID_TOUCH_ID: i32 = -1;

static STRICT_CORE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[DMU][0-9]+$").expect("strict core pattern is valid"));

/// Touch action class, taken from the first character of the encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TouchAction {
    Down,
    Move,
    Up,
    Other,
}

impl TouchAction {
    pub fn from_char(c: char) -> Self {
        match c {
            'D' => TouchAction::Down,
            'M' => TouchAction::Move,
            'U' => TouchAction::Up,
            _ => TouchAction::Other,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TouchAction::Down => "Down",
            TouchAction::Move => "Move",
            TouchAction::Up => "Up",
            TouchAction::Other => "Other",
        }
    }
}

/// How malformed symbol encodings are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolPolicy {
    /// Malformed encodings degrade to action `Other` and id `-1`
    #[default]
    Lenient,
    /// Malformed encodings are rejected
    Strict,
}

/// One alphabet symbol of a gesture automaton.
///
/// Equality and hashing only consider the canonical string: two symbols that
/// differ only in their triggers label the same edge.
#[derive(Debug, Clone, Default)]
pub struct TouchSymbol {
    /// Action character followed by the numeric id
    core: String,
    attribute_values: Vec<String>,
    triggers: BTreeSet<i32>,
}

impl TouchSymbol {
    /// Parse an encoding leniently. Never fails: a core shorter than two
    /// characters yields action `Other` and id `-1`.
    pub fn parse(encoding: &str) -> Self {
        let mut segments = encoding.split(ATTRIBUTE_DELIMITER);
        let core = segments.next().unwrap_or_default().to_string();

        let mut symbol = Self {
            core,
            ..Self::default()
        };

        let mut values: Vec<&str> = segments.collect();
        // a trailing delimiter does not introduce an empty attribute
        if encoding.ends_with(ATTRIBUTE_DELIMITER) {
            values.pop();
        }
        for value in values {
            symbol.add_attribute_value(value);
        }

        if symbol.is_degenerate() {
            tracing::debug!("Touch symbol {:?} degraded to Other/-1", encoding);
        }

        symbol
    }

    /// Parse an encoding with a pre-seeded trigger set
    pub fn with_triggers(encoding: &str, triggers: impl IntoIterator<Item = i32>) -> Self {
        let mut symbol = Self::parse(encoding);
        symbol.add_triggers(triggers);
        symbol
    }

    /// Parse an encoding, rejecting malformed cores under [`SymbolPolicy::Strict`]
    pub fn parse_with_policy(encoding: &str, policy: SymbolPolicy) -> Result<Self> {
        let symbol = Self::parse(encoding);
        if policy == SymbolPolicy::Strict && !STRICT_CORE.is_match(&symbol.core) {
            return Err(Error::malformed_symbol(
                encoding,
                format!(
                    "core {:?} must be an action (D, M or U) followed by a numeric id",
                    symbol.core
                ),
            ));
        }
        if policy == SymbolPolicy::Strict && symbol.id() == INVALID_TOUCH_ID {
            return Err(Error::malformed_symbol(
                encoding,
                format!("id in core {:?} does not fit in a 32-bit integer", symbol.core),
            ));
        }
        Ok(symbol)
    }

    pub fn add_attribute_value(&mut self, value: impl Into<String>) {
        self.attribute_values.push(value.into());
    }

    pub fn add_trigger(&mut self, trigger: i32) {
        self.triggers.insert(trigger);
    }

    pub fn add_triggers(&mut self, triggers: impl IntoIterator<Item = i32>) {
        self.triggers.extend(triggers);
    }

    pub fn action(&self) -> TouchAction {
        let mut chars = self.core.chars();
        match (chars.next(), chars.next()) {
            (Some(first), Some(_)) => TouchAction::from_char(first),
            _ => TouchAction::Other,
        }
    }

    /// Numeric id, or `-1` when the core is too short or the suffix is not a number
    pub fn id(&self) -> i32 {
        let mut chars = self.core.chars();
        match (chars.next(), chars.as_str()) {
            (Some(_), rest) if !rest.is_empty() => rest.parse().unwrap_or(INVALID_TOUCH_ID),
            _ => INVALID_TOUCH_ID,
        }
    }

    /// Rewrite the numeric suffix, keeping the action character
    pub fn set_id(&mut self, id: i32) {
        let action = self.core.chars().next().map(String::from).unwrap_or_default();
        self.core = format!("{}{}", action, id);
    }

    pub fn attribute_count(&self) -> usize {
        self.attribute_values.len()
    }

    pub fn attribute_value(&self, index: usize) -> Option<&str> {
        self.attribute_values.get(index).map(String::as_str)
    }

    pub fn attribute_values(&self) -> &[String] {
        &self.attribute_values
    }

    /// Trigger ids, always unique and ascending
    pub fn triggers(&self) -> &BTreeSet<i32> {
        &self.triggers
    }

    /// `true` when the encoding fell back to action `Other` / id `-1`
    pub fn is_degenerate(&self) -> bool {
        self.core.chars().nth(1).is_none()
    }

    /// Action/id core followed by the colon-joined attributes, in insertion order
    pub fn canonical_string(&self) -> String {
        let mut s = self.core.clone();
        for value in &self.attribute_values {
            s.push(ATTRIBUTE_DELIMITER);
            s.push_str(value);
        }
        s
    }

    /// Exact comparison against another symbol's canonical form
    pub fn is_equal_to_str(&self, other: &str) -> bool {
        self.canonical_string() == other
    }
}

impl PartialEq for TouchSymbol {
    fn eq(&self, other: &Self) -> bool {
        self.canonical_string() == other.canonical_string()
    }
}

impl Eq for TouchSymbol {}

impl Hash for TouchSymbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical_string().hash(state);
    }
}

impl fmt::Display for TouchSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical_string())
    }
}

impl FromStr for TouchSymbol {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}
