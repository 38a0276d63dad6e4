//! # I/O Ring Intent-Graph Parser
//!
//! Parser for I/O ring intent graphs. This crate turns the JSON document
//! describing a ring into a validated, typed [`IntentGraph`].
//!
//! ## Usage
//!
//! ```
//! # use ioring_parser::{parse, ParseError};
//!
//! fn main() -> Result<(), ParseError> {
//!     let source = r#"{
//!         "ring_config": {"width": 1000, "height": 800},
//!         "instances": [
//!             {"name": "VDD0", "device": "PVDD1", "side": "bottom", "position": 40},
//!             {"name": "IO1", "device": "PDDW16", "position": "VDD0_60"}
//!         ]
//!     }"#;
//!
//!     let graph = parse(source)?;
//!     assert_eq!(graph.instances().len(), 2);
//!     Ok(())
//! }
//! ```

mod elaborate;
pub mod error;
mod graph;
mod position;
mod raw;
mod span;

pub use error::{Diagnostic, ErrorCode, Label, ParseError, Severity};
pub use graph::{IntentGraph, IntentGraphStatistics};
pub use position::parse_relative_position;
pub use span::Span;

use log::debug;
use serde_json::error::Category;

use elaborate::Builder;
use raw::RawIntentGraph;

/// Parse intent-graph JSON into a typed [`IntentGraph`].
///
/// The pipeline has two steps:
///
/// 1. **Decode** - Read the JSON document into its wire shape
/// 2. **Elaborate** - Validate every instance and decide its position form
///
/// # Errors
///
/// Returns a [`ParseError`] holding every diagnostic found. JSON problems
/// stop at the first error; schema problems are all collected.
pub fn parse(source: &str) -> Result<IntentGraph, ParseError> {
    // Step 1: Decode
    let raw: RawIntentGraph = serde_json::from_str(source).map_err(|err| json_error(source, &err))?;
    debug!(instances = raw.instances.len(); "Decoded intent graph");

    // Step 2: Elaborate
    Builder::new(source).build(raw)
}

fn json_error(source: &str, err: &serde_json::Error) -> ParseError {
    let code = match err.classify() {
        Category::Data => ErrorCode::E002,
        Category::Io | Category::Syntax | Category::Eof => ErrorCode::E001,
    };
    let span = span::span_at_line_column(source, err.line(), err.column());
    Diagnostic::new(code, format!("{}: {err}", code.description()))
        .at(span, "here")
        .into()
}
