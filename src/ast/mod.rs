//! AST module for the rule language
//!
//! This module provides the core tree node type, its discriminant set, and the
//! builder that constructs well-formed trees. One polymorphic node covers every
//! syntactic category, so traversals (printing, validation, interpretation)
//! are written once and dispatch on [`NodeKind`] alone.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub mod builder;
pub mod printer;

pub use builder::{BuildError, TreeBuilder};

/// Discriminant for every syntactic category a [`Node`] can represent.
///
/// The kinds fall into three families:
/// - lexical/pattern kinds (`Char` through `Sequence`), the regex-like layer;
/// - structural kinds (`Name` through `Outputs`), paths and declarations;
/// - rule kinds (`Rule`, `StartRule`, `NamedRule`, `Action`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    Var,
    Char,
    Range,
    BracketSeq,
    Choice,
    NegChoice,
    Union,
    Atom,
    Star,
    Plus,
    Question,
    Sequence,
    Name,
    DirPath,
    XmlPath,
    Event,
    Entry,
    Inputs,
    Outputs,
    Rule,
    StartRule,
    NamedRule,
    Action,
}

impl NodeKind {
    /// The tag used by the serialized tree format and both printers.
    pub const fn tag(self) -> &'static str {
        match self {
            NodeKind::Var => "VAR",
            NodeKind::Char => "CHAR",
            NodeKind::Range => "RANGE",
            NodeKind::BracketSeq => "BRSEQ",
            NodeKind::Choice => "CHOICE",
            NodeKind::NegChoice => "NO_CHOICE",
            NodeKind::Union => "UNION",
            NodeKind::Atom => "ATOM",
            NodeKind::Star => "ASTERISK",
            NodeKind::Plus => "PLUS",
            NodeKind::Question => "QUESTIONMARK",
            NodeKind::Sequence => "SEQUENCE",
            NodeKind::Name => "NAME",
            NodeKind::DirPath => "DIRPATH",
            NodeKind::XmlPath => "XMLPATH",
            NodeKind::Event => "EVENT",
            NodeKind::Entry => "ENTRY",
            NodeKind::Inputs => "INPUTS",
            NodeKind::Outputs => "OUTPUTS",
            NodeKind::Rule => "RULE",
            NodeKind::StartRule => "SRULE",
            NodeKind::NamedRule => "NRULE",
            NodeKind::Action => "ACTION",
        }
    }

    /// Inverse of [`NodeKind::tag`]. Returns `None` for an unknown tag.
    pub fn from_tag(tag: &str) -> Option<NodeKind> {
        let kind = match tag {
            "VAR" => NodeKind::Var,
            "CHAR" => NodeKind::Char,
            "RANGE" => NodeKind::Range,
            "BRSEQ" => NodeKind::BracketSeq,
            "CHOICE" => NodeKind::Choice,
            "NO_CHOICE" => NodeKind::NegChoice,
            "UNION" => NodeKind::Union,
            "ATOM" => NodeKind::Atom,
            "ASTERISK" => NodeKind::Star,
            "PLUS" => NodeKind::Plus,
            "QUESTIONMARK" => NodeKind::Question,
            "SEQUENCE" => NodeKind::Sequence,
            "NAME" => NodeKind::Name,
            "DIRPATH" => NodeKind::DirPath,
            "XMLPATH" => NodeKind::XmlPath,
            "EVENT" => NodeKind::Event,
            "ENTRY" => NodeKind::Entry,
            "INPUTS" => NodeKind::Inputs,
            "OUTPUTS" => NodeKind::Outputs,
            "RULE" => NodeKind::Rule,
            "SRULE" => NodeKind::StartRule,
            "NRULE" => NodeKind::NamedRule,
            "ACTION" => NodeKind::Action,
            _ => return None,
        };
        Some(kind)
    }

    /// The child-count contract enforced by [`TreeBuilder::composite`].
    pub const fn arity(self) -> Arity {
        match self {
            NodeKind::Char | NodeKind::Range => Arity::Leaf,
            NodeKind::Atom | NodeKind::Star | NodeKind::Plus | NodeKind::Question => {
                Arity::Exactly(1)
            }
            NodeKind::Union | NodeKind::Event => Arity::Exactly(2),
            NodeKind::Entry | NodeKind::Rule | NodeKind::StartRule | NodeKind::NamedRule => {
                Arity::Exactly(3)
            }
            NodeKind::Choice
            | NodeKind::Sequence
            | NodeKind::BracketSeq
            | NodeKind::Name
            | NodeKind::Var => Arity::AtLeast(1),
            NodeKind::NegChoice
            | NodeKind::DirPath
            | NodeKind::XmlPath
            | NodeKind::Inputs
            | NodeKind::Outputs
            | NodeKind::Action => Arity::Any,
        }
    }

    /// Leaf kinds carry character payloads instead of children.
    pub const fn is_leaf(self) -> bool {
        matches!(self, NodeKind::Char | NodeKind::Range)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Child-count contract for one [`NodeKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Arity {
    /// Payload-built kinds (`CHAR`, `RANGE`); never composite-constructed.
    Leaf,
    Exactly(usize),
    AtLeast(usize),
    Any,
}

impl Arity {
    /// Whether a composite with `count` children satisfies this contract.
    pub fn admits(self, count: usize) -> bool {
        match self {
            Arity::Leaf => false,
            Arity::Exactly(n) => count == n,
            Arity::AtLeast(n) => count >= n,
            Arity::Any => true,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Leaf => write!(f, "payload construction (leaf kind)"),
            Arity::Exactly(n) => write!(f, "exactly {}", n),
            Arity::AtLeast(n) => write!(f, "at least {}", n),
            Arity::Any => write!(f, "any number of"),
        }
    }
}

/// One node of a rule tree.
///
/// The variants follow the semantic families rather than individual kinds:
/// character and range leaves carry their payloads directly, every other kind
/// is a `Tree` of its [`NodeKind`] and exclusively owned, ordered children.
/// Trees are immutable once built; [`TreeBuilder`] is the intended
/// constructor and guarantees that a `Tree` kind is composite and its arity
/// is in bounds.
///
/// # Examples
///
/// ```rust
/// use ruletree::ast::{NodeKind, TreeBuilder};
///
/// let mut builder = TreeBuilder::new();
/// let x = builder.char_leaf('x');
/// let seq = builder.composite(NodeKind::Sequence, vec![x]).unwrap();
/// assert_eq!(seq.kind(), NodeKind::Sequence);
/// assert_eq!(seq.child_count(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Node {
    /// Single-character leaf.
    Char(char),
    /// Inclusive character range leaf; both endpoints stored as payloads.
    Range(char, char),
    /// Composite node: discriminant plus ordered children.
    Tree(NodeKind, Vec<Node>),
}

/// Access failures on a well-formed node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NodeError {
    #[error("child index {index} out of range for a node with {arity} children")]
    OutOfRange { index: usize, arity: usize },
    #[error("{wanted} requested from a {kind} node")]
    InvalidAccess { kind: NodeKind, wanted: &'static str },
}

impl Node {
    /// Returns the discriminant. Never changes after construction.
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Char(_) => NodeKind::Char,
            Node::Range(_, _) => NodeKind::Range,
            Node::Tree(kind, _) => *kind,
        }
    }

    /// The ordered children; empty for leaves.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Tree(_, children) => children,
            _ => &[],
        }
    }

    /// Current arity, redundant with `children().len()` but kept as the
    /// traversal-facing name.
    pub fn child_count(&self) -> usize {
        self.children().len()
    }

    /// The `index`-th child, or `OutOfRange` past the arity.
    pub fn child_at(&self, index: usize) -> Result<&Node, NodeError> {
        self.children().get(index).ok_or(NodeError::OutOfRange {
            index,
            arity: self.child_count(),
        })
    }

    /// The character payload of a `CHAR` leaf.
    ///
    /// Requesting a payload from any other kind is a caller bug and fails
    /// with `InvalidAccess`; composite kinds never carry one.
    pub fn payload(&self) -> Result<char, NodeError> {
        match self {
            Node::Char(c) => Ok(*c),
            other => Err(NodeError::InvalidAccess {
                kind: other.kind(),
                wanted: "character payload",
            }),
        }
    }

    /// The inclusive endpoints of a `RANGE` leaf.
    pub fn range(&self) -> Result<(char, char), NodeError> {
        match self {
            Node::Range(start, end) => Ok((*start, *end)),
            other => Err(NodeError::InvalidAccess {
                kind: other.kind(),
                wanted: "range endpoints",
            }),
        }
    }

    /// Concatenates the payloads of this node's `CHAR` children.
    ///
    /// Identifier names, action strings and numeric bounds are all spelled as
    /// flat runs of character leaves in the tree format; this is the reader
    /// for them. Fails with `InvalidAccess` on a leaf node or when any child
    /// is not a `CHAR`.
    pub fn as_text(&self) -> Result<String, NodeError> {
        if self.kind().is_leaf() {
            return Err(NodeError::InvalidAccess {
                kind: self.kind(),
                wanted: "character text",
            });
        }
        let mut text = String::with_capacity(self.child_count());
        for child in self.children() {
            match child {
                Node::Char(c) => text.push(*c),
                other => {
                    return Err(NodeError::InvalidAccess {
                        kind: other.kind(),
                        wanted: "character text",
                    })
                }
            }
        }
        Ok(text)
    }

    /// [`Node::as_text`] followed by an integer parse.
    pub fn as_int(&self) -> Result<i64, NodeError> {
        let text = self.as_text()?;
        text.parse().map_err(|_| NodeError::InvalidAccess {
            kind: self.kind(),
            wanted: "integer text",
        })
    }
}
