//! Error types for I/O ring operations.
//!
//! - [`LayoutError`] - why a layout run rejected its input
//! - [`IoRingError`] - the facade error wrapping every stage

use std::io;

use thiserror::Error;

use ioring_core::{
    geometry::{CornerLocation, GeometryError, Side},
    instance::InstanceKind,
};
use ioring_parser::ParseError;

/// Failure of a single layout run.
///
/// Every variant is terminal: a run either produces a complete, gap-free
/// layout or one of these errors, never a partial layout.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("invalid ring configuration: {0}")]
    Configuration(#[from] GeometryError),

    #[error("instance `{0}` is defined multiple times")]
    DuplicateName(String),

    #[error("instance `{instance}` has invalid position `{position}`: {reason}")]
    InvalidPosition {
        instance: String,
        position: String,
        reason: &'static str,
    },

    #[error("instance `{instance}` has non-positive width {width}")]
    InvalidWidth { instance: String, width: i64 },

    #[error("corners `{first}` and `{second}` both claim `{location}`")]
    DuplicateCorner {
        location: CornerLocation,
        first: String,
        second: String,
    },

    #[error("instance `{instance}` is positioned relative to unknown instance `{reference}`")]
    UnresolvedReference { instance: String, reference: String },

    #[error(
        "instance `{instance}` is positioned relative to {kind} `{reference}`, which is not tiled on a side"
    )]
    InvalidReference {
        instance: String,
        reference: String,
        kind: InstanceKind,
    },

    #[error("relative positions form a cycle: {}", members.join(" -> "))]
    CyclicReference { members: Vec<String> },

    #[error("instance `{instance}` declares side {declared} but its position lies on side {found}")]
    SideMismatch {
        instance: String,
        declared: Side,
        found: Side,
    },

    #[error("instance `{instance}` at ({x}, {y}) is not on the usable part of any ring side")]
    OffPerimeter { instance: String, x: i64, y: i64 },

    #[error("instances `{first}` and `{second}` overlap on side {side}")]
    Overlap {
        side: Side,
        first: String,
        second: String,
    },

    #[error(
        "no room between `{before}` and `{after}` on side {side}: gap is {available}, need {required}"
    )]
    LayoutOverflow {
        side: Side,
        before: String,
        after: String,
        available: i64,
        required: i64,
    },

    #[error(
        "separator between `{before}` and `{after}` on side {side} needs {required}, gap is {available}"
    )]
    SeparatorTooSmall {
        side: Side,
        before: String,
        after: String,
        available: i64,
        required: i64,
    },

    #[error("gap of {length} on side {side} from {start} to {end} cannot be tiled by the filler catalog")]
    UnfillableGap {
        side: Side,
        start: i64,
        end: i64,
        length: i64,
    },
}

/// The main error type for I/O ring operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant keeps the intent-graph source next to its
/// diagnostics so callers can render labeled snippets.
#[derive(Debug, Error)]
pub enum IoRingError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),

    #[error("Export error: {0}")]
    Export(#[from] serde_json::Error),
}

impl IoRingError {
    /// Create a new `Parse` error with the associated source text.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_error_messages() {
        let err = LayoutError::CyclicReference {
            members: vec!["A".to_string(), "B".to_string()],
        };
        assert_eq!(err.to_string(), "relative positions form a cycle: A -> B");

        let err = LayoutError::UnfillableGap {
            side: Side::Top,
            start: 30,
            end: 70,
            length: 40,
        };
        assert_eq!(
            err.to_string(),
            "gap of 40 on side top from 30 to 70 cannot be tiled by the filler catalog"
        );
    }

    #[test]
    fn test_layout_error_wraps_into_facade_error() {
        let err: IoRingError = LayoutError::DuplicateName("IO1".to_string()).into();
        assert_eq!(
            err.to_string(),
            "Layout error: instance `IO1` is defined multiple times"
        );
    }
}
