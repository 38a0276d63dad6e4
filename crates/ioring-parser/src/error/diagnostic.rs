//! Findings reported while reading an intent graph.

use std::fmt;

use crate::{error::ErrorCode, span::Span};

/// Whether a finding rejects the intent graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The graph is rejected.
    Error,
    /// The graph is accepted and the offending field is ignored.
    Warning,
}

impl Severity {
    pub fn is_error(self) -> bool {
        self == Severity::Error
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        })
    }
}

/// A highlighted region of the intent-graph source.
///
/// The primary label marks the offending field; secondary labels point at
/// related fields, such as the first definition of a duplicated name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    span: Span,
    text: String,
    primary: bool,
}

impl Label {
    pub fn span(&self) -> Span {
        self.span
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_primary(&self) -> bool {
        self.primary
    }
}

/// One problem found in an intent graph.
///
/// Every finding carries an [`ErrorCode`], which also decides its
/// [`Severity`] and its default help text. Findings about a single instance
/// record the instance name so callers can group them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    code: ErrorCode,
    instance: Option<String>,
    message: String,
    labels: Vec<Label>,
    hint: Option<String>,
}

impl Diagnostic {
    /// A finding about the document or the ring as a whole.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            instance: None,
            message: message.into(),
            labels: Vec::new(),
            hint: None,
        }
    }

    /// A finding about the instance called `name`.
    pub fn for_instance(code: ErrorCode, name: &str, message: impl Into<String>) -> Self {
        Self {
            instance: Some(name.to_string()),
            ..Self::new(code, message)
        }
    }

    /// Marks the offending field. Findings whose field could not be located
    /// in the source are reported without a snippet.
    pub fn at(mut self, span: Option<Span>, text: impl Into<String>) -> Self {
        if let Some(span) = span {
            self.labels.push(Label {
                span,
                text: text.into(),
                primary: true,
            });
        }
        self
    }

    /// Points at a related field.
    pub fn also_at(mut self, span: Span, text: impl Into<String>) -> Self {
        self.labels.push(Label {
            span,
            text: text.into(),
            primary: false,
        });
        self
    }

    /// Replaces the help text of the error code.
    pub fn hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    /// Name of the instance this finding is about.
    pub fn instance(&self) -> Option<&str> {
        self.instance.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn help(&self) -> Option<&str> {
        self.hint.as_deref().or_else(|| self.code.help())
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]: {}", self.severity(), self.code, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_follows_code() {
        let diag = Diagnostic::for_instance(ErrorCode::E203, "IO1", "unknown side `middle`");
        assert_eq!(diag.severity(), Severity::Error);
        assert_eq!(diag.instance(), Some("IO1"));
        assert_eq!(diag.to_string(), "error[E203]: unknown side `middle`");

        let diag = Diagnostic::for_instance(ErrorCode::W200, "TP", "side is ignored");
        assert_eq!(diag.severity(), Severity::Warning);
        assert_eq!(diag.to_string(), "warning[W200]: side is ignored");
    }

    #[test]
    fn test_help_defaults_to_code() {
        let diag = Diagnostic::new(ErrorCode::E203, "unknown side");
        assert_eq!(diag.help(), ErrorCode::E203.help());

        let diag = diag.hint("sides are lowercase");
        assert_eq!(diag.help(), Some("sides are lowercase"));

        assert_eq!(Diagnostic::new(ErrorCode::E207, "extra corner").help(), None);
    }

    #[test]
    fn test_unlocated_field_has_no_label() {
        let diag = Diagnostic::new(ErrorCode::E100, "ring `width` must be positive")
            .at(None, "non-positive value");
        assert!(diag.labels().is_empty());
    }

    #[test]
    fn test_duplicate_points_at_both_definitions() {
        let diag = Diagnostic::for_instance(ErrorCode::E201, "VDD0", "defined twice")
            .at(Some(Span::new(100..106)), "duplicate definition")
            .also_at(Span::new(40..46), "first defined here");

        let labels = diag.labels();
        assert_eq!(labels.len(), 2);
        assert!(labels[0].is_primary());
        assert_eq!(labels[0].span(), Span::new(100..106));
        assert!(!labels[1].is_primary());
        assert_eq!(labels[1].text(), "first defined here");
    }
}
