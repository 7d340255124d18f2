//! Graphviz DOT export
//!
//! Use www.graphviz.org (or `dot -Tsvg`) to render the output.

use super::table::TransitionTable;
use crate::error::Result;
use std::io::Write;

impl TransitionTable {
    /// Writes one `from -> to [label="..."]` statement per stored label,
    /// wrapped in a `digraph G { ... }` block.
    pub fn export_graph(&self, w: &mut impl Write) -> Result<()> {
        writeln!(w, "digraph G {{")?;
        for (from, to, symbol) in self.edges() {
            writeln!(
                w,
                "\t{} -> {} [label=\"{}\"]",
                from,
                to,
                escape_label(&symbol.canonical_string())
            )?;
        }
        writeln!(w, "}}")?;
        Ok(())
    }

    /// Export to DOT format as a string
    pub fn to_dot(&self) -> Result<String> {
        let mut buf = Vec::new();
        self.export_graph(&mut buf)?;
        String::from_utf8(buf).map_err(|e| crate::custom_error!("DOT output is not UTF-8: {}", e))
    }
}

fn escape_label(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}
