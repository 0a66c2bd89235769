//! Structural validation of parsed rule trees.
//!
//! The factory's arity table bounds child counts; this walk checks the
//! family-level constraints it cannot express, such as which kinds may appear
//! under which parent. The validator only reports, it never repairs, and it
//! assumes its input was produced by the factory (well-formed arity).
//!
//! Constraint summary:
//! - a top-level tree is `RULE`, `SRULE` or `NRULE`;
//! - `RULE` children are `OUTPUTS`, `INPUTS`, `ACTION`; list members are
//!   `ENTRY` or `EVENT`;
//! - `SRULE`/`NRULE` bind a variable name over a nested rule, without
//!   rebinding a name on the same rule spine;
//! - `ENTRY` is `DIRPATH` + `NAME` + `XMLPATH`; `EVENT` is `DIRPATH` + `NAME`;
//! - path segments are `NAME`s of `SEQUENCE`s or `VAR` references;
//! - sequence members and quantifier operands are pattern kinds; choice
//!   members are `CHAR` or `RANGE`; union branches are `SEQUENCE`s.

use crate::ast::{Node, NodeKind};
use crate::errors::{unspanned, ErrorKind, Reporter, RuleError, SourceContext};
use std::collections::HashSet;

/// Validates every top-level tree of a parsed dump, stopping at the first
/// violation.
pub fn validate(nodes: &[Node], source_context: SourceContext) -> Result<(), RuleError> {
    let reporter = Reporter::new(source_context, "validate");
    for node in nodes {
        check_rule(node, &mut HashSet::new(), &reporter)?;
    }
    Ok(())
}

/// Validates a single rule tree.
pub fn validate_rule(node: &Node, source_context: SourceContext) -> Result<(), RuleError> {
    let reporter = Reporter::new(source_context, "validate");
    check_rule(node, &mut HashSet::new(), &reporter)
}

fn check_rule(
    node: &Node,
    vars: &mut HashSet<String>,
    reporter: &Reporter,
) -> Result<(), RuleError> {
    match node.kind() {
        NodeKind::Rule => check_plain_rule(node, reporter),
        NodeKind::StartRule => {
            let bindings = check_binding_header(node, vars, reporter)?;
            for binding in bindings.children() {
                expect_kind(bindings, binding, &[NodeKind::Sequence], reporter)?;
                check_sequence(binding, reporter)?;
            }
            check_rule(body(node), vars, reporter)
        }
        NodeKind::NamedRule => {
            let bindings = check_binding_header(node, vars, reporter)?;
            if bindings.child_count() != 2 {
                return Err(reporter.report(
                    ErrorKind::UnexpectedChild {
                        parent: NodeKind::NamedRule,
                        found: bindings.kind(),
                        expected: "a VAR with two SEQUENCE bounds".to_string(),
                    },
                    unspanned(),
                ));
            }
            for bound in bindings.children() {
                expect_kind(bindings, bound, &[NodeKind::Sequence], reporter)?;
                if bound.as_int().is_err() {
                    let value = bound.as_text().unwrap_or_else(|_| bound.to_string());
                    return Err(reporter.report(
                        ErrorKind::InvalidLiteral {
                            literal_type: "integer bound".to_string(),
                            value,
                        },
                        unspanned(),
                    ));
                }
            }
            check_rule(body(node), vars, reporter)
        }
        found => Err(reporter.report(ErrorKind::NotARule { found }, unspanned())),
    }
}

/// Shared header handling for `SRULE`/`NRULE`: a text name, a `VAR` binding
/// node, and a nested rule as the third child. Returns the binding node.
fn check_binding_header<'n>(
    node: &'n Node,
    vars: &mut HashSet<String>,
    reporter: &Reporter,
) -> Result<&'n Node, RuleError> {
    let name_node = &node.children()[0];
    let name = text_of(node, name_node, reporter)?;
    if !vars.insert(name.clone()) {
        return Err(reporter.report(ErrorKind::DuplicateVariable { name }, unspanned()));
    }

    let bindings = &node.children()[1];
    expect_kind(node, bindings, &[NodeKind::Var], reporter)?;
    Ok(bindings)
}

fn body(node: &Node) -> &Node {
    // Rule kinds have exactly three children; the factory enforced that.
    &node.children()[2]
}

fn check_plain_rule(node: &Node, reporter: &Reporter) -> Result<(), RuleError> {
    let children = node.children();
    expect_kind(node, &children[0], &[NodeKind::Outputs], reporter)?;
    expect_kind(node, &children[1], &[NodeKind::Inputs], reporter)?;
    expect_kind(node, &children[2], &[NodeKind::Action], reporter)?;

    for list in &children[0..2] {
        for member in list.children() {
            expect_kind(list, member, &[NodeKind::Entry, NodeKind::Event], reporter)?;
            check_entry(member, reporter)?;
        }
    }
    text_of(node, &children[2], reporter)?;
    Ok(())
}

fn check_entry(node: &Node, reporter: &Reporter) -> Result<(), RuleError> {
    let children = node.children();
    expect_kind(node, &children[0], &[NodeKind::DirPath], reporter)?;
    expect_kind(node, &children[1], &[NodeKind::Name], reporter)?;
    check_path(&children[0], reporter)?;
    check_name(&children[1], reporter)?;
    if node.kind() == NodeKind::Entry {
        expect_kind(node, &children[2], &[NodeKind::XmlPath], reporter)?;
        check_path(&children[2], reporter)?;
    }
    Ok(())
}

fn check_path(node: &Node, reporter: &Reporter) -> Result<(), RuleError> {
    for segment in node.children() {
        expect_kind(node, segment, &[NodeKind::Name], reporter)?;
        check_name(segment, reporter)?;
    }
    Ok(())
}

fn check_name(node: &Node, reporter: &Reporter) -> Result<(), RuleError> {
    for part in node.children() {
        expect_kind(node, part, &[NodeKind::Sequence, NodeKind::Var], reporter)?;
        match part.kind() {
            NodeKind::Sequence => check_sequence(part, reporter)?,
            // A VAR under a NAME is a reference spelled as character leaves.
            _ => {
                text_of(node, part, reporter)?;
            }
        }
    }
    Ok(())
}

/// Kinds allowed as sequence members and quantifier operands.
const PATTERN_KINDS: [NodeKind; 6] = [
    NodeKind::Char,
    NodeKind::Choice,
    NodeKind::NegChoice,
    NodeKind::Union,
    NodeKind::Atom,
    NodeKind::BracketSeq,
];

fn check_sequence(node: &Node, reporter: &Reporter) -> Result<(), RuleError> {
    const MEMBER_KINDS: [NodeKind; 9] = [
        NodeKind::Star,
        NodeKind::Plus,
        NodeKind::Question,
        NodeKind::Char,
        NodeKind::Choice,
        NodeKind::NegChoice,
        NodeKind::Union,
        NodeKind::Atom,
        NodeKind::BracketSeq,
    ];
    for member in node.children() {
        expect_kind(node, member, &MEMBER_KINDS, reporter)?;
        check_pattern(member, reporter)?;
    }
    Ok(())
}

fn check_pattern(node: &Node, reporter: &Reporter) -> Result<(), RuleError> {
    match node.kind() {
        NodeKind::Star | NodeKind::Plus | NodeKind::Question => {
            let operand = &node.children()[0];
            expect_kind(node, operand, &PATTERN_KINDS, reporter)?;
            check_pattern(operand, reporter)
        }
        NodeKind::Atom => {
            let inner = &node.children()[0];
            expect_kind(node, inner, &[NodeKind::Sequence], reporter)?;
            check_sequence(inner, reporter)
        }
        NodeKind::Union => {
            for branch in node.children() {
                expect_kind(node, branch, &[NodeKind::Sequence], reporter)?;
                check_sequence(branch, reporter)?;
            }
            Ok(())
        }
        NodeKind::Choice | NodeKind::NegChoice | NodeKind::BracketSeq => {
            for member in node.children() {
                expect_kind(node, member, &[NodeKind::Char, NodeKind::Range], reporter)?;
            }
            Ok(())
        }
        // CHAR leaves have nothing left to check.
        _ => Ok(()),
    }
}

fn expect_kind(
    parent: &Node,
    child: &Node,
    allowed: &[NodeKind],
    reporter: &Reporter,
) -> Result<(), RuleError> {
    if allowed.contains(&child.kind()) {
        return Ok(());
    }
    let expected = allowed
        .iter()
        .map(|k| k.tag())
        .collect::<Vec<_>>()
        .join(" or ");
    Err(reporter.report(
        ErrorKind::UnexpectedChild {
            parent: parent.kind(),
            found: child.kind(),
            expected,
        },
        unspanned(),
    ))
}

/// Reads an all-`CHAR` text child, reporting the offending kind otherwise.
fn text_of(parent: &Node, child: &Node, reporter: &Reporter) -> Result<String, RuleError> {
    match child.as_text() {
        Ok(text) => Ok(text),
        Err(_) => {
            let found = child
                .children()
                .iter()
                .find(|c| c.kind() != NodeKind::Char)
                .map(|c| c.kind())
                .unwrap_or(child.kind());
            Err(reporter.report(
                ErrorKind::UnexpectedChild {
                    parent: parent.kind(),
                    found,
                    expected: "CHAR text".to_string(),
                },
                unspanned(),
            ))
        }
    }
}
