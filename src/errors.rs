//! Error handling for parsing and validation.
//!
//! Model- and factory-local failures ([`crate::ast::NodeError`],
//! [`crate::ast::BuildError`]) are plain enums surfaced directly to the
//! caller. Everything that relates to a concrete source text goes through
//! [`RuleError`], which carries the named source and a span for diagnostic
//! rendering.

use crate::ast::{BuildError, NodeKind};
use miette::{Diagnostic, LabeledSpan, NamedSource, SourceSpan};
use std::fmt;
use std::sync::Arc;

/// Source text plus the name it is reported under.
#[derive(Debug, Clone)]
pub struct SourceContext {
    pub name: String,
    pub content: String,
}

impl SourceContext {
    /// Create a source context from real file content.
    pub fn from_file(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Convert to a NamedSource for miette error reporting.
    pub fn to_named_source(&self) -> Arc<NamedSource<String>> {
        Arc::new(NamedSource::new(self.name.clone(), self.content.clone()))
    }
}

/// The error type for parse and validation failures.
#[derive(Debug)]
pub struct RuleError {
    /// What went wrong.
    pub kind: ErrorKind,
    /// Where it happened.
    pub source_info: SourceInfo,
    /// Optional guidance for the user.
    pub help: Option<String>,
}

/// All parse/validation error kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorKind {
    // Parse errors
    Syntax {
        message: String,
    },
    UnknownTag {
        tag: String,
    },
    Build(BuildError),

    // Validation errors
    NotARule {
        found: NodeKind,
    },
    UnexpectedChild {
        parent: NodeKind,
        found: NodeKind,
        expected: String,
    },
    DuplicateVariable {
        name: String,
    },
    InvalidLiteral {
        literal_type: String,
        value: String,
    },
}

/// Context-specific source information.
#[derive(Debug, Clone)]
pub struct SourceInfo {
    pub source: Arc<NamedSource<String>>,
    pub primary_span: SourceSpan,
    pub phase: String,
}

impl ErrorKind {
    /// Error category, used for test assertions and error codes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Syntax { .. } | Self::UnknownTag { .. } | Self::Build(_) => ErrorCategory::Parse,
            Self::NotARule { .. }
            | Self::UnexpectedChild { .. }
            | Self::DuplicateVariable { .. }
            | Self::InvalidLiteral { .. } => ErrorCategory::Validation,
        }
    }

    /// Error code suffix for diagnostic codes.
    pub const fn code_suffix(&self) -> &'static str {
        match self {
            Self::Syntax { .. } => "syntax",
            Self::UnknownTag { .. } => "unknown_tag",
            Self::Build(BuildError::InvalidRange { .. }) => "invalid_range",
            Self::Build(BuildError::ArityMismatch { .. }) => "arity_mismatch",
            Self::NotARule { .. } => "not_a_rule",
            Self::UnexpectedChild { .. } => "unexpected_child",
            Self::DuplicateVariable { .. } => "duplicate_variable",
            Self::InvalidLiteral { .. } => "invalid_literal",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Parse,
    Validation,
}

impl std::error::Error for RuleError {}

impl fmt::Display for RuleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ErrorKind::Syntax { message } => {
                write!(f, "Parse error: {}", message)
            }
            ErrorKind::UnknownTag { tag } => {
                write!(f, "Parse error: unknown node tag '{}'", tag)
            }
            ErrorKind::Build(err) => {
                write!(f, "Parse error: {}", err)
            }
            ErrorKind::NotARule { found } => {
                write!(
                    f,
                    "Validation error: expected a RULE, SRULE or NRULE tree, found {}",
                    found
                )
            }
            ErrorKind::UnexpectedChild {
                parent,
                found,
                expected,
            } => {
                write!(
                    f,
                    "Validation error: {} expected as the child of a {} node, found {}",
                    expected, parent, found
                )
            }
            ErrorKind::DuplicateVariable { name } => {
                write!(
                    f,
                    "Validation error: variable '{}' is bound twice on the same rule",
                    name
                )
            }
            ErrorKind::InvalidLiteral {
                literal_type,
                value,
            } => {
                write!(
                    f,
                    "Validation error: invalid {} '{}'",
                    literal_type, value
                )
            }
        }
    }
}

impl Diagnostic for RuleError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(format!(
            "ruletree::{}::{}",
            self.source_info.phase,
            self.kind.code_suffix()
        )))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.help
            .as_ref()
            .map(|h| Box::new(h) as Box<dyn fmt::Display + 'a>)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let labels = vec![LabeledSpan::new_with_span(
            Some(self.primary_label()),
            self.source_info.primary_span,
        )];
        Some(Box::new(labels.into_iter()))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&*self.source_info.source)
    }
}

impl RuleError {
    fn primary_label(&self) -> String {
        match &self.kind {
            ErrorKind::Syntax { .. } => "malformed syntax".into(),
            ErrorKind::UnknownTag { .. } => "unknown tag".into(),
            ErrorKind::Build(BuildError::InvalidRange { .. }) => "inverted range".into(),
            ErrorKind::Build(BuildError::ArityMismatch { .. }) => "wrong child count".into(),
            ErrorKind::NotARule { .. } => "not a rule".into(),
            ErrorKind::UnexpectedChild { .. } => "unexpected child kind".into(),
            ErrorKind::DuplicateVariable { .. } => "already bound".into(),
            ErrorKind::InvalidLiteral { .. } => "invalid literal".into(),
        }
    }
}

/// Creates a placeholder span for errors not tied to a specific source
/// location, such as validation findings on an already-built tree.
pub fn unspanned() -> SourceSpan {
    SourceSpan::from(0..0)
}

/// Error creation context for one phase over one source.
#[derive(Debug, Clone)]
pub struct Reporter {
    pub source: SourceContext,
    pub phase: &'static str,
}

impl Reporter {
    pub fn new(source: SourceContext, phase: &'static str) -> Self {
        Self { source, phase }
    }

    pub fn report(&self, kind: ErrorKind, span: SourceSpan) -> RuleError {
        RuleError {
            kind,
            source_info: SourceInfo {
                source: self.source.to_named_source(),
                primary_span: span,
                phase: self.phase.to_string(),
            },
            help: None,
        }
    }
}

/// Renders a report on stderr with full miette diagnostics, including the
/// diagnostic code and source labels.
///
/// The single user-facing error sink; CLI handlers funnel every failure here.
pub fn print_error(report: miette::Report) {
    eprintln!("{report:?}");
}
