//! Structural validator tests.

use ruletree::errors::{ErrorCategory, ErrorKind};
use ruletree::syntax::parse;
use ruletree::validation::{validate, validate_rule};
use ruletree::{NodeKind, SourceContext};

fn ctx(source: &str) -> SourceContext {
    SourceContext::from_file("test", source)
}

fn check(source: &str) -> Result<(), ruletree::RuleError> {
    let nodes = parse(source, ctx(source)).expect("test input must parse");
    validate(&nodes, ctx(source))
}

#[test]
fn fixture_file_validates() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/build.rules");
    let source = std::fs::read_to_string(path).unwrap();
    assert!(check(&source).is_ok());
}

#[test]
fn plain_rule_with_empty_lists_is_valid() {
    assert!(check("RULE(OUTPUTS(),INPUTS(),ACTION(CHAR(x)))").is_ok());
}

#[test]
fn top_level_must_be_a_rule() {
    let err = check("SEQUENCE(CHAR(a))").unwrap_err();
    assert_eq!(
        err.kind,
        ErrorKind::NotARule {
            found: NodeKind::Sequence
        }
    );
    assert_eq!(err.kind.category(), ErrorCategory::Validation);
}

#[test]
fn rule_children_must_come_in_declaration_order() {
    // INPUTS and OUTPUTS swapped.
    let err = check("RULE(INPUTS(),OUTPUTS(),ACTION(CHAR(x)))").unwrap_err();
    match err.kind {
        ErrorKind::UnexpectedChild { parent, found, .. } => {
            assert_eq!(parent, NodeKind::Rule);
            assert_eq!(found, NodeKind::Inputs);
        }
        other => panic!("expected UnexpectedChild, got {:?}", other),
    }
}

#[test]
fn list_members_must_be_entries_or_events() {
    let err = check("RULE(OUTPUTS(SEQUENCE(CHAR(a))),INPUTS(),ACTION())").unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::UnexpectedChild {
            parent: NodeKind::Outputs,
            found: NodeKind::Sequence,
            ..
        }
    ));
}

#[test]
fn entry_requires_dirpath_name_xmlpath() {
    let src = "RULE(OUTPUTS(),INPUTS(ENTRY(DIRPATH(),NAME(SEQUENCE(CHAR(a))),SEQUENCE(CHAR(b)))),ACTION())";
    let err = check(src).unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::UnexpectedChild {
            parent: NodeKind::Entry,
            found: NodeKind::Sequence,
            ..
        }
    ));
}

#[test]
fn choice_members_must_be_chars_or_ranges() {
    let src = "RULE(OUTPUTS(EVENT(DIRPATH(),NAME(SEQUENCE(CHOICE(SEQUENCE(CHAR(a))))))),INPUTS(),ACTION())";
    let err = check(src).unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::UnexpectedChild {
            parent: NodeKind::Choice,
            found: NodeKind::Sequence,
            ..
        }
    ));
}

#[test]
fn union_branches_must_be_sequences() {
    let src = "RULE(OUTPUTS(EVENT(DIRPATH(),NAME(SEQUENCE(UNION(CHAR(a),SEQUENCE(CHAR(b))))))),INPUTS(),ACTION())";
    let err = check(src).unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::UnexpectedChild {
            parent: NodeKind::Union,
            found: NodeKind::Char,
            ..
        }
    ));
}

#[test]
fn quantifier_operand_must_be_a_pattern() {
    let src = "RULE(OUTPUTS(EVENT(DIRPATH(),NAME(SEQUENCE(ASTERISK(SEQUENCE(CHAR(a))))))),INPUTS(),ACTION())";
    let err = check(src).unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::UnexpectedChild {
            parent: NodeKind::Star,
            found: NodeKind::Sequence,
            ..
        }
    ));
}

#[test]
fn bracket_sequence_holds_chars_and_ranges() {
    let ok = "RULE(OUTPUTS(EVENT(DIRPATH(),NAME(SEQUENCE(BRSEQ(RANGE(CHAR(a),CHAR(z)),CHAR(_)))))),INPUTS(),ACTION())";
    assert!(check(ok).is_ok());

    let bad = "RULE(OUTPUTS(EVENT(DIRPATH(),NAME(SEQUENCE(BRSEQ(ATOM(SEQUENCE(CHAR(a)))))))),INPUTS(),ACTION())";
    assert!(check(bad).is_err());
}

#[test]
fn start_rule_binds_sequences_over_a_nested_rule() {
    let src = "SRULE(NAME(CHAR(n)),VAR(SEQUENCE(CHAR(a)),SEQUENCE(CHAR(b))),RULE(OUTPUTS(),INPUTS(),ACTION()))";
    assert!(check(src).is_ok());
}

#[test]
fn start_rule_bindings_must_be_sequences() {
    let src = "SRULE(NAME(CHAR(n)),VAR(CHAR(a)),RULE(OUTPUTS(),INPUTS(),ACTION()))";
    let err = check(src).unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::UnexpectedChild {
            parent: NodeKind::Var,
            found: NodeKind::Char,
            ..
        }
    ));
}

#[test]
fn rule_name_may_not_be_a_bare_leaf() {
    let src = "SRULE(CHAR(x),VAR(SEQUENCE(CHAR(a))),RULE(OUTPUTS(),INPUTS(),ACTION()))";
    let err = check(src).unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::UnexpectedChild {
            parent: NodeKind::StartRule,
            found: NodeKind::Char,
            ..
        }
    ));
}

#[test]
fn variable_may_not_be_bound_twice_on_one_spine() {
    let src = "SRULE(NAME(CHAR(n)),VAR(SEQUENCE(CHAR(a))),SRULE(NAME(CHAR(n)),VAR(SEQUENCE(CHAR(b))),RULE(OUTPUTS(),INPUTS(),ACTION())))";
    let err = check(src).unwrap_err();
    match err.kind {
        ErrorKind::DuplicateVariable { ref name } => assert_eq!(name, "n"),
        other => panic!("expected DuplicateVariable, got {:?}", other),
    }
}

#[test]
fn distinct_variables_on_one_spine_are_fine() {
    let src = "SRULE(NAME(CHAR(n)),VAR(SEQUENCE(CHAR(a))),SRULE(NAME(CHAR(m)),VAR(SEQUENCE(CHAR(b))),RULE(OUTPUTS(),INPUTS(),ACTION())))";
    assert!(check(src).is_ok());
}

#[test]
fn named_rule_bounds_must_be_integers() {
    let good = "NRULE(NAME(CHAR(i)),VAR(SEQUENCE(CHAR(1)),SEQUENCE(CHAR(9))),RULE(OUTPUTS(),INPUTS(),ACTION()))";
    assert!(check(good).is_ok());

    let bad = "NRULE(NAME(CHAR(i)),VAR(SEQUENCE(CHAR(x)),SEQUENCE(CHAR(9))),RULE(OUTPUTS(),INPUTS(),ACTION()))";
    let err = check(bad).unwrap_err();
    match err.kind {
        ErrorKind::InvalidLiteral { ref value, .. } => assert_eq!(value, "x"),
        other => panic!("expected InvalidLiteral, got {:?}", other),
    }
}

#[test]
fn named_rule_takes_exactly_two_bounds() {
    let src = "NRULE(NAME(CHAR(i)),VAR(SEQUENCE(CHAR(1))),RULE(OUTPUTS(),INPUTS(),ACTION()))";
    assert!(check(src).is_err());
}

#[test]
fn validate_rule_checks_a_single_tree() {
    let src = "RULE(OUTPUTS(),INPUTS(),ACTION())";
    let nodes = parse(src, ctx(src)).unwrap();
    assert!(validate_rule(&nodes[0], ctx(src)).is_ok());
}

#[test]
fn nested_rule_body_is_validated_too() {
    let src = "SRULE(NAME(CHAR(n)),VAR(SEQUENCE(CHAR(a))),SEQUENCE(CHAR(b)))";
    let err = check(src).unwrap_err();
    assert_eq!(
        err.kind,
        ErrorKind::NotARule {
            found: NodeKind::Sequence
        }
    );
}
