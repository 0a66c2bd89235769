//! Parser for the serialized tree format.
//!
//! Purely syntactic: it recognizes the `TAG(child,...)` shape and hands every
//! node to the [`TreeBuilder`], so arity and payload invariants are enforced
//! during construction, not after.

use crate::ast::{Node, NodeKind, TreeBuilder};
use crate::errors::{ErrorKind, Reporter, RuleError, SourceContext};
use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "syntax/grammar.pest"]
struct TreeParser;

/// Parse a tree dump into one node per non-empty line.
pub fn parse(source: &str, source_context: SourceContext) -> Result<Vec<Node>, RuleError> {
    if source.trim().is_empty() {
        return Ok(vec![]);
    }

    let reporter = Reporter::new(source_context, "parse");
    let pairs = TreeParser::parse(Rule::file, source)
        .map_err(|e| convert_parse_error(e, &reporter))?;

    let file = pairs.peek().expect("pest guarantees the file rule exists");
    let mut builder = TreeBuilder::new();

    file.into_inner()
        .filter(|p| p.as_rule() == Rule::node)
        .map(|p| build_node(p, &mut builder, &reporter))
        .collect()
}

/// Parse a single serialized tree.
pub fn parse_node(line: &str, source_context: SourceContext) -> Result<Node, RuleError> {
    let reporter = Reporter::new(source_context.clone(), "parse");
    let mut nodes = parse(line, source_context)?;
    match nodes.len() {
        1 => Ok(nodes.pop().expect("length checked above")),
        n => Err(reporter.report(
            ErrorKind::Syntax {
                message: format!("expected a single tree, found {}", n),
            },
            (0..line.len()).into(),
        )),
    }
}

fn build_node(
    pair: Pair<Rule>,
    builder: &mut TreeBuilder,
    reporter: &Reporter,
) -> Result<Node, RuleError> {
    let span = (pair.as_span().start()..pair.as_span().end()).into();

    match pair.as_rule() {
        Rule::node => {
            let inner = pair.into_inner().next().expect("node has exactly one alternative");
            build_node(inner, builder, reporter)
        }

        Rule::char_node => Ok(builder.char_leaf(payload_char(pair))),

        Rule::range_node => {
            let mut endpoints = pair.into_inner();
            let start = payload_char(endpoints.next().expect("range start endpoint"));
            let end = payload_char(endpoints.next().expect("range end endpoint"));
            builder
                .range(start, end)
                .map_err(|e| reporter.report(ErrorKind::Build(e), span))
        }

        Rule::tree_node => {
            let mut inner = pair.into_inner();
            let tag = inner.next().expect("tree node starts with a tag");
            let kind = NodeKind::from_tag(tag.as_str()).ok_or_else(|| {
                reporter.report(
                    ErrorKind::UnknownTag {
                        tag: tag.as_str().to_string(),
                    },
                    (tag.as_span().start()..tag.as_span().end()).into(),
                )
            })?;

            let children = match inner.next() {
                Some(list) => list
                    .into_inner()
                    .map(|p| build_node(p, builder, reporter))
                    .collect::<Result<Vec<_>, _>>()?,
                None => vec![],
            };

            builder
                .composite(kind, children)
                .map_err(|e| reporter.report(ErrorKind::Build(e), span))
        }

        rule => Err(reporter.report(
            ErrorKind::Syntax {
                message: format!("unsupported rule: {:?}", rule),
            },
            span,
        )),
    }
}

/// Extracts the single payload character of a `char_node` pair.
fn payload_char(pair: Pair<Rule>) -> char {
    let payload = pair.into_inner().next().expect("char node has a payload");
    payload
        .as_str()
        .chars()
        .next()
        .expect("payload is exactly one character")
}

fn convert_parse_error(error: pest::error::Error<Rule>, reporter: &Reporter) -> RuleError {
    let span = match error.location {
        pest::error::InputLocation::Pos(pos) => (pos..pos).into(),
        pest::error::InputLocation::Span((start, end)) => (start..end).into(),
    };

    let message = match &error.variant {
        pest::error::ErrorVariant::CustomError { message } => message.clone(),
        pest::error::ErrorVariant::ParsingError { .. } => {
            if error.to_string().contains("expected \")\"") {
                "missing closing parenthesis".to_string()
            } else {
                "malformed tree syntax".to_string()
            }
        }
    };

    reporter.report(ErrorKind::Syntax { message }, span)
}
