//! Tree printer.
//!
//! Two deterministic pre-order renderings of a tree: the canonical compact
//! form (`Display`), which parses back to an identical tree, and an indented
//! multi-line form for inspection. Neither touches kind-specific semantics
//! beyond leaf payloads, and neither mutates the tree.

use super::Node;
use std::fmt::{self, Write};

impl fmt::Display for Node {
    /// Canonical compact form, e.g. `CHOICE(RANGE(CHAR(a),CHAR(z)),CHAR(_))`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Char(c) => write!(f, "CHAR({})", c),
            Node::Range(start, end) => write!(f, "RANGE(CHAR({}),CHAR({}))", start, end),
            Node::Tree(kind, children) => {
                write!(f, "{}(", kind)?;
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        f.write_char(',')?;
                    }
                    write!(f, "{}", child)?;
                }
                f.write_char(')')
            }
        }
    }
}

/// Renders the node and its subtree in indented form, one node per line,
/// children beneath their parent in stored order.
///
/// ```text
/// CHOICE
///   RANGE 'a'..'z'
///   CHAR '_'
/// ```
pub fn write_pretty<W: Write>(node: &Node, out: &mut W) -> fmt::Result {
    write_pretty_at(node, out, 0)
}

/// [`write_pretty`] into a fresh string.
pub fn pretty(node: &Node) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    write_pretty(node, &mut out).expect("string formatting failed");
    out
}

fn write_pretty_at<W: Write>(node: &Node, out: &mut W, depth: usize) -> fmt::Result {
    for _ in 0..depth {
        out.write_str("  ")?;
    }
    match node {
        Node::Char(c) => writeln!(out, "CHAR {:?}", c),
        Node::Range(start, end) => writeln!(out, "RANGE {:?}..{:?}", start, end),
        Node::Tree(kind, children) => {
            writeln!(out, "{}", kind)?;
            for child in children {
                write_pretty_at(child, out, depth + 1)?;
            }
            Ok(())
        }
    }
}
