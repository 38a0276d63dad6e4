//! Collector for accumulating diagnostics during elaboration.

use log::warn;

use crate::error::{Diagnostic, ParseError};

/// Accumulates diagnostics so that every problem in an intent graph is
/// reported instead of only the first one.
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
    has_errors: bool,
}

impl DiagnosticCollector {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a diagnostic to this collector.
    pub fn emit(&mut self, diagnostic: Diagnostic) {
        if diagnostic.severity().is_error() {
            self.has_errors = true;
        }
        self.diagnostics.push(diagnostic);
    }

    /// Finish collection and return a result.
    ///
    /// - If there are errors, returns `Err(ParseError)` with all diagnostics.
    /// - Otherwise returns `Ok(())`; warnings are logged and dropped.
    pub fn finish(self) -> Result<(), ParseError> {
        if self.has_errors {
            return Err(ParseError::new(self.diagnostics));
        }
        for diagnostic in &self.diagnostics {
            warn!(diagnostic:%; "Intent graph warning");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_collector_new_finish_ok() {
        let collector = DiagnosticCollector::new();
        assert!(collector.finish().is_ok());
    }

    #[test]
    fn test_collector_keeps_warnings_of_rejected_graph() {
        let mut collector = DiagnosticCollector::new();

        collector.emit(Diagnostic::new(ErrorCode::E200, "instance #1 has no name"));
        collector.emit(Diagnostic::for_instance(ErrorCode::W200, "TP", "side ignored"));
        collector.emit(Diagnostic::for_instance(ErrorCode::E210, "IO1", "no device"));

        let err = collector.finish().unwrap_err();
        assert_eq!(err.diagnostics().len(), 3);
    }

    #[test]
    fn test_collector_warnings_only_is_ok() {
        let mut collector = DiagnosticCollector::new();
        collector.emit(Diagnostic::for_instance(ErrorCode::W200, "TP", "side ignored"));
        assert!(collector.finish().is_ok());
    }
}
