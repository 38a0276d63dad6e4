//! The error returned when an intent graph is rejected.

use std::fmt;

use crate::error::{Diagnostic, ErrorCode};

/// An intent graph that could not be read.
///
/// Holds every finding of the run in source order, warnings included, so
/// that all problems are reported together. At least one finding is an
/// error.
#[derive(Debug)]
pub struct ParseError {
    diagnostics: Vec<Diagnostic>,
}

impl ParseError {
    pub(crate) fn new(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Codes of the findings that reject the graph.
    pub fn error_codes(&self) -> impl Iterator<Item = ErrorCode> + '_ {
        self.errors().map(Diagnostic::code)
    }

    /// Findings about the instance called `name`.
    pub fn for_instance<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Diagnostic> {
        self.diagnostics
            .iter()
            .filter(move |diag| diag.instance() == Some(name))
    }

    fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|diag| diag.severity().is_error())
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut errors = self.errors();
        let Some(first) = errors.next() else {
            return f.write_str("intent graph rejected");
        };
        match errors.count() {
            0 => write!(f, "{first}"),
            more => write!(f, "{first} (and {more} more errors in the intent graph)"),
        }
    }
}

impl std::error::Error for ParseError {}

impl From<Diagnostic> for ParseError {
    fn from(diagnostic: Diagnostic) -> Self {
        Self::new(vec![diagnostic])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rejected() -> ParseError {
        ParseError::new(vec![
            Diagnostic::for_instance(ErrorCode::W200, "TP", "side of inner pad `TP` is ignored"),
            Diagnostic::for_instance(ErrorCode::E203, "IO1", "instance `IO1` has unknown side `up`"),
            Diagnostic::for_instance(ErrorCode::E209, "IO1", "instance `IO1` has non-positive width 0"),
            Diagnostic::new(ErrorCode::E207, "corner `C5` does not fit"),
        ])
    }

    #[test]
    fn test_display_skips_warnings() {
        assert_eq!(
            rejected().to_string(),
            "error[E203]: instance `IO1` has unknown side `up` (and 2 more errors in the intent graph)"
        );

        let single: ParseError = Diagnostic::new(ErrorCode::E001, "invalid JSON syntax").into();
        assert_eq!(single.to_string(), "error[E001]: invalid JSON syntax");
    }

    #[test]
    fn test_error_codes_leave_out_warnings() {
        let err = rejected();
        assert_eq!(err.diagnostics().len(), 4);
        assert_eq!(
            err.error_codes().collect::<Vec<_>>(),
            vec![ErrorCode::E203, ErrorCode::E209, ErrorCode::E207]
        );
    }

    #[test]
    fn test_findings_grouped_by_instance() {
        let err = rejected();
        let io1: Vec<_> = err.for_instance("IO1").map(Diagnostic::code).collect();
        assert_eq!(io1, vec![ErrorCode::E203, ErrorCode::E209]);
        assert_eq!(err.for_instance("C5").count(), 0);
    }
}
