//! Output formatting module
//!
//! This module handles formatting transition tables, analysis reports and
//! symbols for different output formats.

use crate::{
    Result,
    automaton::{AutomatonReport, ConversionReport, TouchSymbol, TransitionTable, format_state_set},
};
use serde_json::json;
use std::io::Write;

/// Output a transition table (and its conversion summary, if any) as JSON
pub fn output_json(
    w: &mut impl Write,
    table: &TransitionTable,
    report: Option<&ConversionReport>,
) -> Result<()> {
    let output = json!({
        "start_state": table.start_state(),
        "summary": {
            "total_states": table.state_count(),
            "total_transitions": table.transition_count(),
            "accept_states": table.accept_states(),
        },
        "transitions": table.edges().map(|(from, to, symbol)| {
            json!({
                "from": from,
                "to": to,
                "symbol": symbol.canonical_string(),
                "triggers": symbol.triggers(),
            })
        }).collect::<Vec<_>>(),
        "state_sets": report.map(|r| {
            r.state_sets
                .iter()
                .map(|(state, set)| (state.to_string(), json!(set)))
                .collect::<serde_json::Map<_, _>>()
        }),
    });

    serde_json::to_writer_pretty(&mut *w, &output)?;
    writeln!(w)?;
    Ok(())
}

/// Output a transition table as a text table
pub fn output_table(
    w: &mut impl Write,
    table: &TransitionTable,
    report: Option<&ConversionReport>,
) -> Result<()> {
    writeln!(w, "Transition Table")?;
    writeln!(w, "{}", "=".repeat(80))?;
    writeln!(w)?;

    writeln!(w, "Summary:")?;
    writeln!(w, "  Start State:        {}", table.start_state())?;
    writeln!(w, "  Total States:       {}", table.state_count())?;
    writeln!(w, "  Total Transitions:  {}", table.transition_count())?;
    writeln!(w, "  Accept States:      {}", join_states(&table.accept_states()))?;
    writeln!(w)?;

    if table.transition_count() > 0 {
        writeln!(w, "Transitions:")?;
        writeln!(w, "{:-<80}", "")?;
        writeln!(w, "{:>6} {:>6}  {:<40} {:<24}", "From", "To", "Symbol", "Triggers")?;
        writeln!(w, "{:-<80}", "")?;

        for (from, to, symbol) in table.edges() {
            writeln!(
                w,
                "{:>6} {:>6}  {:<40} {:<24}",
                from,
                to,
                truncate(&symbol.canonical_string(), 40),
                join_states(&symbol.triggers().iter().collect::<Vec<_>>())
            )?;
        }
        writeln!(w)?;
    }

    if let Some(report) = report
        && !report.state_sets.is_empty()
    {
        writeln!(w, "DFA States:")?;
        writeln!(w, "{:-<80}", "")?;
        for (state, set) in &report.state_sets {
            writeln!(w, "{:>6}  {{{}}}", state, format_state_set(set))?;
        }
        writeln!(w)?;
    }

    Ok(())
}

/// Output an analysis report as a text table
pub fn output_report_table(w: &mut impl Write, report: &AutomatonReport) -> Result<()> {
    writeln!(w, "Automaton Analysis")?;
    writeln!(w, "{}", "=".repeat(80))?;
    writeln!(w, "  Start State:        {}", report.start_state)?;
    writeln!(w, "  Total States:       {}", report.total_states)?;
    writeln!(w, "  Total Transitions:  {}", report.total_transitions)?;
    writeln!(w, "  Accept States:      {}", join_states(&report.accept_states))?;
    writeln!(w, "  Unreachable States: {}", join_states(&report.unreachable_states))?;
    writeln!(w, "  Max Out-Degree:     {}", report.max_out_degree)?;
    writeln!(w, "  Has Cycles:         {}", yes_no(report.has_cycles))?;
    writeln!(w, "  Deterministic:      {}", yes_no(report.is_deterministic))?;
    Ok(())
}

/// Output an analysis report as JSON
pub fn output_report_json(w: &mut impl Write, report: &AutomatonReport) -> Result<()> {
    let output = json!({
        "start_state": report.start_state,
        "total_states": report.total_states,
        "total_transitions": report.total_transitions,
        "accept_states": report.accept_states,
        "unreachable_states": report.unreachable_states,
        "max_out_degree": report.max_out_degree,
        "has_cycles": report.has_cycles,
        "is_deterministic": report.is_deterministic,
    });

    serde_json::to_writer_pretty(&mut *w, &output)?;
    writeln!(w)?;
    Ok(())
}

/// Output the components of parsed symbols
pub fn output_symbols(w: &mut impl Write, symbols: &[(String, TouchSymbol)]) -> Result<()> {
    writeln!(
        w,
        "{:<24} {:<6} {:>6}  {:<24} {}",
        "Encoding", "Action", "Id", "Attributes", "Canonical"
    )?;
    writeln!(w, "{:-<80}", "")?;

    for (encoding, symbol) in symbols {
        writeln!(
            w,
            "{:<24} {:<6} {:>6}  {:<24} {}",
            truncate(encoding, 24),
            symbol.action().name(),
            symbol.id(),
            truncate(&symbol.attribute_values().join(", "), 24),
            symbol
        )?;
    }
    Ok(())
}

fn join_states<T: ToString>(states: &[T]) -> String {
    if states.is_empty() {
        return "-".to_string();
    }
    states
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let head: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", head)
    } else {
        s.to_string()
    }
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}
