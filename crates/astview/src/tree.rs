//! Depth-marked tree reconstruction.
//!
//! The external parser reports its result as one logical tree line per output
//! line, where the count of leading `|` characters encodes nesting depth. This
//! module rebuilds the tree from that flat sequence in a single forward pass:
//! an explicit [`Cursor`] is threaded by mutable reference through a
//! depth-bounded recursion, so every line is consumed exactly once and a line
//! belonging to a shallower level is never taken by a deeper one.

use serde::Serialize;
use tracing::trace;

use crate::error::{Error, Result};

/// The character whose leading run encodes a line's nesting depth.
pub const MARKER: char = '|';

/// Label of the synthetic root substituted when the parser produced no output.
pub const EMPTY_OUTPUT_LABEL: &str = "[Error]";

/// One element of a reconstructed tree.
///
/// Children are exclusively owned and kept in source order; the tree is
/// immutable once built and is replaced wholesale on the next invocation.
///
/// # Examples
///
/// ```
/// use astview::tree::parse;
///
/// let roots = parse(["A", "|B", "|C", "D"]).unwrap();
/// assert_eq!(roots[0].content, "A");
/// assert_eq!(roots[0].children.len(), 2);
/// assert_eq!(roots[1].content, "D");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    /// Label text, with the marker prefix stripped and leading whitespace trimmed.
    pub content: String,
    /// Ordered children; insertion order equals source order.
    pub children: Vec<Node>,
}

impl Node {
    /// Creates a node with no children.
    #[must_use]
    pub fn leaf(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            children: Vec::new(),
        }
    }

    /// Creates a node with the given children.
    #[must_use]
    pub fn with_children(content: impl Into<String>, children: Vec<Self>) -> Self {
        Self {
            content: content.into(),
            children,
        }
    }

    /// Visits this node and its subtree depth-first, in source order.
    ///
    /// The visitor receives each node together with its nesting depth
    /// (this node is depth 0). Renderers adapt the tree through this
    /// traversal instead of subclassing any widget type.
    pub fn walk<F>(&self, visit: &mut F)
    where
        F: FnMut(&Self, usize),
    {
        self.walk_at(0, visit);
    }

    fn walk_at<F>(&self, depth: usize, visit: &mut F)
    where
        F: FnMut(&Self, usize),
    {
        visit(self, depth);
        for child in &self.children {
            child.walk_at(depth + 1, visit);
        }
    }

    /// Re-emits this subtree in marked-line form.
    ///
    /// Each node produces one line of `depth` marker characters followed by
    /// its content, with this node at depth 0. Parsing a well-formed sequence
    /// and flattening the result reproduces the original lines exactly.
    #[must_use]
    pub fn flatten(&self) -> Vec<String> {
        let mut lines = Vec::new();
        self.walk(&mut |node, depth| {
            let mut line = MARKER.to_string().repeat(depth);
            line.push_str(&node.content);
            lines.push(line);
        });
        lines
    }
}

/// A non-blank input line after marker scanning.
#[derive(Debug)]
struct MarkedLine<'a> {
    /// Count of leading marker characters.
    depth: usize,
    /// Remainder of the line after the marker run, left-trimmed.
    content: &'a str,
    /// 1-based position within the non-blank line sequence.
    number: usize,
}

/// Forward-only position over the scanned lines.
///
/// Shared by mutable reference across every recursion level so that depth
/// cannot be double-consumed and no level re-scans what another consumed.
struct Cursor<'a> {
    lines: Vec<MarkedLine<'a>>,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn peek(&self) -> Option<&MarkedLine<'a>> {
        self.lines.get(self.pos)
    }

    fn advance(&mut self) {
        self.pos += 1;
    }
}

/// Splits a raw line into its marker depth and label text.
///
/// The depth is the length of the leading run of [`MARKER`] characters,
/// counted before any trimming; markers later in the line belong to the
/// label. A line with no leading markers has depth 0 and its content is the
/// line left-trimmed.
fn scan_line(line: &str) -> (usize, &str) {
    let depth = line.chars().take_while(|&c| c == MARKER).count();
    // MARKER is ASCII, so the run is exactly `depth` bytes long.
    (depth, line[depth..].trim_start())
}

/// Reconstructs the depth-0 node sequence from raw parser output lines.
///
/// Blank and whitespace-only lines are discarded before parsing. An input
/// with no remaining lines yields a single synthetic root labeled
/// [`EMPTY_OUTPUT_LABEL`], so the result is never empty. Lines at the same
/// depth with identical content stay distinct nodes.
///
/// # Errors
///
/// Returns [`Error::DepthGap`] when a line's depth jumps past a level that no
/// preceding node can own (for example depth 2 directly under depth 0). The
/// whole sequence is rejected rather than silently mis-nested.
pub fn parse<'a, I>(lines: I) -> Result<Vec<Node>>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut number = 0;
    let scanned: Vec<MarkedLine> = lines
        .into_iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            let (depth, content) = scan_line(line);
            number += 1;
            MarkedLine {
                depth,
                content,
                number,
            }
        })
        .collect();

    trace!(lines = scanned.len(), "parsing marked lines");

    if scanned.is_empty() {
        return Ok(vec![Node::leaf(EMPTY_OUTPUT_LABEL)]);
    }

    let mut cursor = Cursor {
        lines: scanned,
        pos: 0,
    };
    parse_at(&mut cursor, 0)
}

/// Produces the maximal run of nodes at `depth` from the cursor position.
///
/// Consumes a line only when its depth equals `depth`; each consumed node's
/// children come from the recursion at `depth + 1`, which runs to completion
/// on the same cursor before the next sibling is considered. A shallower line
/// stops this production without being consumed, returning control to the
/// caller one level up.
fn parse_at(cursor: &mut Cursor, depth: usize) -> Result<Vec<Node>> {
    let mut nodes = Vec::new();
    while let Some(line) = cursor.peek() {
        if line.depth == depth {
            let content = line.content.to_string();
            cursor.advance();
            let children = parse_at(cursor, depth + 1)?;
            nodes.push(Node::with_children(content, children));
        } else if line.depth < depth {
            break;
        } else {
            // Deeper than depth + 1 could have consumed: the input skipped a
            // level, so no ancestor exists for this line.
            return Err(Error::DepthGap {
                line_number: line.number,
                found: line.depth,
                expected: depth,
            });
        }
    }
    Ok(nodes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_line_counts_leading_markers_only() {
        assert_eq!(scan_line("||decl: a | b"), (2, "decl: a | b"));
    }

    #[test]
    fn scan_line_without_markers_is_depth_zero() {
        assert_eq!(scan_line("  translation-unit"), (0, "translation-unit"));
    }

    #[test]
    fn scan_line_trims_after_marker_run() {
        assert_eq!(scan_line("| simple-declaration"), (1, "simple-declaration"));
    }

    #[test]
    fn parse_builds_sibling_groups() {
        let roots = parse(["A", "|B", "|C", "D"]).unwrap();
        assert_eq!(
            roots,
            vec![
                Node::with_children("A", vec![Node::leaf("B"), Node::leaf("C")]),
                Node::leaf("D"),
            ]
        );
    }

    #[test]
    fn parse_nests_deeper_runs_under_nearest_child() {
        let roots = parse(["A", "|B", "||C", "||D", "|E"]).unwrap();
        let expected = vec![Node::with_children(
            "A",
            vec![
                Node::with_children("B", vec![Node::leaf("C"), Node::leaf("D")]),
                Node::leaf("E"),
            ],
        )];
        assert_eq!(roots, expected);
    }

    #[test]
    fn shallower_line_is_left_for_the_parent_level() {
        // "C" at depth 0 must not be swallowed by B's child production.
        let roots = parse(["A", "|B", "C"]).unwrap();
        assert_eq!(roots.len(), 2);
        assert_eq!(roots[1], Node::leaf("C"));
    }

    #[test]
    fn duplicate_lines_stay_distinct_nodes() {
        let roots = parse(["A", "|B", "|B"]).unwrap();
        assert_eq!(roots[0].children, vec![Node::leaf("B"), Node::leaf("B")]);
    }

    #[test]
    fn blank_and_whitespace_lines_are_discarded() {
        let roots = parse(["", "A", "   ", "|B", "\t"]).unwrap();
        assert_eq!(
            roots,
            vec![Node::with_children("A", vec![Node::leaf("B")])]
        );
    }

    #[test]
    fn empty_input_yields_single_error_root() {
        let roots = parse([]).unwrap();
        assert_eq!(roots, vec![Node::leaf(EMPTY_OUTPUT_LABEL)]);
    }

    #[test]
    fn whitespace_only_input_yields_single_error_root() {
        let roots = parse(["  ", "\t", ""]).unwrap();
        assert_eq!(roots, vec![Node::leaf(EMPTY_OUTPUT_LABEL)]);
    }

    #[test]
    fn depth_gap_is_rejected() {
        let err = parse(["A", "||B"]).unwrap_err();
        match err {
            Error::DepthGap {
                line_number,
                found,
                expected,
            } => {
                assert_eq!(line_number, 2);
                assert_eq!(found, 2);
                assert_eq!(expected, 1);
            }
            other => panic!("expected DepthGap, got {other:?}"),
        }
    }

    #[test]
    fn leading_deep_line_is_rejected() {
        let err = parse(["|orphan"]).unwrap_err();
        assert!(matches!(err, Error::DepthGap { expected: 0, .. }));
    }

    #[test]
    fn walk_visits_depth_first_with_depths() {
        let roots = parse(["A", "|B", "||C", "|D"]).unwrap();
        let mut seen = Vec::new();
        roots[0].walk(&mut |node, depth| seen.push((node.content.clone(), depth)));
        assert_eq!(
            seen,
            vec![
                ("A".to_string(), 0),
                ("B".to_string(), 1),
                ("C".to_string(), 2),
                ("D".to_string(), 1),
            ]
        );
    }

    #[test]
    fn flatten_reproduces_marked_lines() {
        let lines = ["A", "|B", "||C", "|D"];
        let roots = parse(lines).unwrap();
        assert_eq!(roots[0].flatten(), lines);
    }
}
