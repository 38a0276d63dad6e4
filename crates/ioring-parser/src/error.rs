//! Findings reported while reading an intent graph.
//!
//! Elaboration does not stop at the first problem. Every finding is a
//! [`Diagnostic`] tagged with an [`ErrorCode`]; the code decides whether the
//! finding rejects the graph and supplies the usual fix. A rejected graph
//! comes back as a [`ParseError`] holding all findings of the run.
//!
//! ```
//! # use ioring_parser::{Diagnostic, ErrorCode, Span};
//! let diag = Diagnostic::for_instance(ErrorCode::E201, "VDD0", "instance `VDD0` is defined multiple times")
//!     .at(Some(Span::new(100..106)), "duplicate definition")
//!     .also_at(Span::new(40..46), "first defined here");
//!
//! assert!(diag.severity().is_error());
//! assert_eq!(diag.help(), Some("instance names must be unique within an intent graph"));
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod parse_error;

pub(crate) use collector::DiagnosticCollector;

pub use diagnostic::{Diagnostic, Label, Severity};
pub use error_code::ErrorCode;
pub use parse_error::ParseError;
