//! Syntax layer: the serialized tree grammar and its parser.
//!
//! The only concrete text format this crate reads is the machine-oriented
//! tree dump, one rule tree per line. The parser assembles factory calls
//! bottom-up, so everything it returns satisfies the model invariants.

pub mod parser;

pub use parser::{parse, parse_node};
