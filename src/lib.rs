//! ruletree: a tree IR and parser for a small build-rule language.
//!
//! The language mixes regex-like pattern operators (characters, ranges,
//! choices, repetition) with structural constructs (rules, paths, events,
//! input/output declarations, actions). This crate owns the node model, the
//! factory that builds well-formed trees, the tree printers, the serialized
//! tree-format parser, and a structural validator. Executing the parsed rules
//! is the business of downstream consumers.

pub use crate::ast::{Node, NodeKind, TreeBuilder};
pub use crate::errors::{RuleError, SourceContext};

pub mod ast;
pub mod cli;
pub mod errors;
pub mod syntax;
pub mod validation;
