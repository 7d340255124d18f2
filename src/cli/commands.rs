//! CLI command implementations
//!
//! This module contains the implementation for each CLI command.

use crate::automaton::{AutomatonDefinition, SymbolPolicy, TransitionTable};
use crate::{Config, Result, cli::Cli};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Symbol policy from the `--strict` flag, falling back to the configuration
fn symbol_policy(args: &Cli, config: &Config) -> SymbolPolicy {
    if args.strict {
        SymbolPolicy::Strict
    } else {
        config.symbols.policy
    }
}

/// Load a definition file and build its NFA
fn load_nfa(path: &Path, policy: SymbolPolicy) -> Result<TransitionTable> {
    tracing::info!("Loading definition from {:?}", path);
    let definition = AutomatonDefinition::from_file(path)?;
    let nfa = definition.build(policy).inspect_err(|e| {
        tracing::warn!("Rejected definition {:?}: {}", path, e);
    })?;
    tracing::info!(
        "NFA has {} states and {} transitions",
        nfa.state_count(),
        nfa.transition_count()
    );
    Ok(nfa)
}

/// Writer for stdout or the given file
fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            tracing::info!("Writing output to {:?}", path);
            Ok(Box::new(BufWriter::new(File::create(path)?)))
        }
        None => Ok(Box::new(io::stdout().lock())),
    }
}

/// Compile command implementation
pub mod compile {
    use super::*;
    use crate::automaton::ConversionOptions;
    use crate::cli::{Commands, OutputFormat, output};

    /// Execute the compile command
    pub fn execute(args: Cli, config: Config) -> Result<()> {
        let policy = symbol_policy(&args, &config);
        let (definition, format, output_path, max_states) = match args.command {
            Commands::Compile {
                definition,
                format,
                output,
                max_states,
            } => (definition, format, output, max_states),
            _ => unreachable!("compile::execute called with wrong command"),
        };

        let options = match max_states {
            Some(0) => ConversionOptions::unbounded(),
            Some(limit) => ConversionOptions::default().with_max_states(limit),
            None => config.conversion.options(),
        };
        tracing::debug!("Conversion options: {:?}", options);

        let nfa = load_nfa(&definition, policy)?;
        let (dfa, report) = nfa.to_dfa(options)?;

        let mut w = open_output(output_path.as_deref())?;
        match format.unwrap_or(config.export.format) {
            OutputFormat::Dot => dfa.export_graph(&mut w)?,
            OutputFormat::Json => output::output_json(&mut w, &dfa, Some(&report))?,
            OutputFormat::Table => output::output_table(&mut w, &dfa, Some(&report))?,
        }
        w.flush()?;

        Ok(())
    }
}

/// Export command implementation
pub mod export {
    use super::*;
    use crate::cli::Commands;

    /// Execute the export command
    pub fn execute(args: Cli, config: Config) -> Result<()> {
        let policy = symbol_policy(&args, &config);
        let (definition, output_path) = match args.command {
            Commands::Export { definition, output } => (definition, output),
            _ => unreachable!("export::execute called with wrong command"),
        };

        let nfa = load_nfa(&definition, policy)?;
        let mut w = open_output(output_path.as_deref())?;
        nfa.export_graph(&mut w)?;
        w.flush()?;

        Ok(())
    }
}

/// Inspect command implementation
pub mod inspect {
    use super::*;
    use crate::automaton::analyze;
    use crate::cli::{Commands, output};

    /// Execute the inspect command
    pub fn execute(args: Cli, config: Config) -> Result<()> {
        let policy = symbol_policy(&args, &config);
        let (definition, dfa, json) = match args.command {
            Commands::Inspect {
                definition,
                dfa,
                json,
            } => (definition, dfa, json),
            _ => unreachable!("inspect::execute called with wrong command"),
        };

        let nfa = load_nfa(&definition, policy)?;
        let report = if dfa {
            let (dfa, _) = nfa.to_dfa(config.conversion.options())?;
            analyze(&dfa)
        } else {
            analyze(&nfa)
        };

        let mut w = open_output(None)?;
        if json {
            output::output_report_json(&mut w, &report)?;
        } else {
            output::output_report_table(&mut w, &report)?;
        }
        w.flush()?;

        Ok(())
    }
}

/// Symbol command implementation
pub mod symbol {
    use super::*;
    use crate::automaton::TouchSymbol;
    use crate::cli::{Commands, output};

    /// Execute the symbol command
    pub fn execute(args: Cli, config: Config) -> Result<()> {
        let policy = symbol_policy(&args, &config);
        let encodings = match args.command {
            Commands::Symbol { encodings } => encodings,
            _ => unreachable!("symbol::execute called with wrong command"),
        };

        let symbols = encodings
            .into_iter()
            .map(|encoding| {
                let symbol = TouchSymbol::parse_with_policy(&encoding, policy)?;
                Ok((encoding, symbol))
            })
            .collect::<Result<Vec<_>>>()?;

        let mut w = open_output(None)?;
        output::output_symbols(&mut w, &symbols)?;
        w.flush()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    const TAP: &str = r#"
[[transition]]
symbol = "D1"
from = 1
to = 2

[[transition]]
symbol = "D1"
from = 1
to = 3

[[transition]]
symbol = "U1"
from = 2
to = 4
"#;

    fn write_definition(dir: &Path, contents: &str) -> std::path::PathBuf {
        let path = dir.join("tap.toml");
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_compile_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let definition = write_definition(dir.path(), TAP);
        let out = dir.path().join("tap.dot");

        let args = Cli::try_parse_from([
            "gesture-dfa",
            "compile",
            definition.to_str().unwrap(),
            "--format",
            "dot",
            "--output",
            out.to_str().unwrap(),
        ])
        .unwrap();
        compile::execute(args, Config::default()).unwrap();

        let dot = std::fs::read_to_string(out).unwrap();
        assert!(dot.starts_with("digraph G {"));
        assert_eq!(dot.lines().filter(|l| l.contains("->")).count(), 2);
    }

    #[test]
    fn test_export_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let definition = write_definition(dir.path(), TAP);
        let out = dir.path().join("nfa.dot");

        let args = Cli::try_parse_from([
            "gesture-dfa",
            "export",
            definition.to_str().unwrap(),
            "-o",
            out.to_str().unwrap(),
        ])
        .unwrap();
        export::execute(args, Config::default()).unwrap();

        let dot = std::fs::read_to_string(out).unwrap();
        assert_eq!(dot.lines().filter(|l| l.contains("->")).count(), 3);
    }

    #[test]
    fn test_strict_flag_rejects_malformed_definition() {
        let dir = tempfile::tempdir().unwrap();
        let definition = write_definition(dir.path(), "[[transition]]\nsymbol = \"D\"\nfrom = 1\nto = 2\n");
        let out = dir.path().join("out.dot");

        let args = Cli::try_parse_from([
            "gesture-dfa",
            "--strict",
            "compile",
            definition.to_str().unwrap(),
            "-o",
            out.to_str().unwrap(),
        ])
        .unwrap();
        let err = compile::execute(args, Config::default()).unwrap_err();
        assert!(matches!(err, crate::Error::MalformedSymbol { .. }));
    }

    #[test]
    fn test_compile_respects_state_limit() {
        let dir = tempfile::tempdir().unwrap();
        let definition = write_definition(dir.path(), TAP);
        let out = dir.path().join("out.json");

        let args = Cli::try_parse_from([
            "gesture-dfa",
            "compile",
            definition.to_str().unwrap(),
            "--max-states",
            "1",
            "-o",
            out.to_str().unwrap(),
        ])
        .unwrap();
        let err = compile::execute(args, Config::default()).unwrap_err();
        assert!(matches!(err, crate::Error::StateLimitExceeded { limit: 1 }));
    }
}
