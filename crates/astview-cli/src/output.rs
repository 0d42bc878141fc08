//! Tree rendering for CLI output.
//!
//! Renders the reconstructed [`Node`] tree either as text with connector
//! art or as pretty-printed JSON for programmatic use.

use std::io::{self, Write};

use astview::Node;

/// How to render the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable text with connectors.
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Print a tree to stdout in the given mode.
///
/// Text mode renders a tree like:
/// ```text
/// translation-unit
/// ├── simple-declaration
/// │   └── decl-specifier-seq
/// └── function-body
/// ```
pub fn print_tree(root: &Node, mode: OutputMode) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_tree(&mut handle, root, mode)
}

/// Write a tree in the given mode.
pub fn write_tree<W: Write>(w: &mut W, root: &Node, mode: OutputMode) -> io::Result<()> {
    match mode {
        OutputMode::Text => {
            writeln!(w, "{}", root.content)?;
            write_children(w, root, "")
        }
        OutputMode::Json => {
            let json = serde_json::to_string_pretty(root).map_err(io::Error::other)?;
            writeln!(w, "{json}")
        }
    }
}

fn write_children<W: Write>(w: &mut W, node: &Node, prefix: &str) -> io::Result<()> {
    let last = node.children.len().saturating_sub(1);
    for (index, child) in node.children.iter().enumerate() {
        let (connector, continuation) = if index == last {
            ("└── ", "    ")
        } else {
            ("├── ", "│   ")
        };
        writeln!(w, "{prefix}{connector}{}", child.content)?;
        write_children(w, child, &format!("{prefix}{continuation}"))?;
    }
    Ok(())
}
