//! Node factory for rule trees.
//!
//! Every tree handed to downstream consumers is built through a
//! [`TreeBuilder`], which enforces the kind-specific payload and arity
//! invariants at creation time. Construction is all-or-nothing: a constructor
//! either returns a fully valid node or an error, never a half-built node.
//!
//! The builder is an explicit context rather than free functions so that
//! independent parses own independent builders and nothing global is shared.

use super::{Arity, Node, NodeKind};
use thiserror::Error;

/// Construction-time failures. Pure and deterministic; retrying with the same
/// input yields the same error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BuildError {
    /// The range end precedes the start. Inverted ranges are rejected here
    /// rather than silently matching nothing.
    #[error("invalid range: end {end:?} precedes start {start:?}")]
    InvalidRange { start: char, end: char },
    /// The child count is incompatible with the kind's required shape.
    #[error("cannot build {kind} with {actual} children: expected {expected}")]
    ArityMismatch {
        kind: NodeKind,
        expected: Arity,
        actual: usize,
    },
}

/// Factory context for one parse.
#[derive(Debug, Clone, Default)]
pub struct TreeBuilder {
    built: usize,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes this builder has produced, for diagnostics.
    pub fn nodes_built(&self) -> usize {
        self.built
    }

    /// Builds a single-character leaf. Always succeeds.
    pub fn char_leaf(&mut self, c: char) -> Node {
        self.built += 1;
        Node::Char(c)
    }

    /// Builds a range leaf for the inclusive set `[start, end]`.
    pub fn range(&mut self, start: char, end: char) -> Result<Node, BuildError> {
        if end < start {
            return Err(BuildError::InvalidRange { start, end });
        }
        self.built += 1;
        Ok(Node::Range(start, end))
    }

    /// Builds a composite node, validating the arity contract for `kind`.
    ///
    /// Leaf kinds (`CHAR`, `RANGE`) always fail here; they are built through
    /// [`TreeBuilder::char_leaf`] and [`TreeBuilder::range`].
    pub fn composite(&mut self, kind: NodeKind, children: Vec<Node>) -> Result<Node, BuildError> {
        let expected = kind.arity();
        if !expected.admits(children.len()) {
            return Err(BuildError::ArityMismatch {
                kind,
                expected,
                actual: children.len(),
            });
        }
        self.built += 1;
        Ok(Node::Tree(kind, children))
    }

    /// Builds a composite of `kind` whose children spell `text` as `CHAR`
    /// leaves, the way names, action strings and numeric bounds are encoded.
    pub fn text(&mut self, kind: NodeKind, text: &str) -> Result<Node, BuildError> {
        let children = text.chars().map(|c| self.char_leaf(c)).collect();
        self.composite(kind, children)
    }

    /// [`TreeBuilder::text`] for an integer, decimal-spelled.
    pub fn text_int(&mut self, kind: NodeKind, value: i64) -> Result<Node, BuildError> {
        self.text(kind, &value.to_string())
    }
}
