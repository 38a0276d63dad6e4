//! Error codes for intent-graph diagnostics.
//!
//! Error codes are organized by phase:
//! - `E0xx` - JSON errors
//! - `E1xx` - Ring configuration errors
//! - `E2xx` - Instance errors
//! - `W2xx` - Instance warnings; the graph is still accepted

use std::fmt;

use crate::error::Severity;

/// Error codes for categorizing diagnostic errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // JSON Errors (E0xx)
    // =========================================================================
    /// Invalid JSON syntax.
    E001,

    /// Unexpected JSON structure.
    ///
    /// The document is valid JSON but a field is missing or has the wrong
    /// type, e.g. `ring_config.width` given as a string.
    E002,

    // =========================================================================
    // Ring Configuration Errors (E1xx)
    // =========================================================================
    /// Non-positive ring dimension.
    ///
    /// `width`, `height`, `pad_width`, `pad_height` and `corner_size` must
    /// all be positive.
    E100,

    /// Negative pad spacing.
    E101,

    // =========================================================================
    // Instance Errors (E2xx)
    // =========================================================================
    /// Missing instance name.
    E200,

    /// Duplicate instance name.
    E201,

    /// Unknown instance kind.
    ///
    /// Valid kinds are `pad`, `inner_pad`, `corner`, `filler` and `separator`.
    E202,

    /// Unknown side.
    ///
    /// Valid sides are `bottom`, `right`, `top` and `left`.
    E203,

    /// Invalid position.
    ///
    /// Positions are an integer side offset, an `[x, y]` coordinate pair, or
    /// a `<name>_<offset>` relative reference.
    E204,

    /// Inner pad without absolute coordinates.
    E205,

    /// Duplicate corner.
    ///
    /// Two corner instances claim the same ring corner.
    E206,

    /// Too many corners.
    E207,

    /// Offset position without a side.
    E208,

    /// Non-positive instance width.
    E209,

    /// Missing device.
    E210,

    // =========================================================================
    // Instance Warnings (W2xx)
    // =========================================================================
    /// Side given for an inner pad, which is placed by coordinates only.
    W200,
}

impl ErrorCode {
    /// Returns the numeric code as a string (e.g., "E001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "E001",
            ErrorCode::E002 => "E002",
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
            ErrorCode::E202 => "E202",
            ErrorCode::E203 => "E203",
            ErrorCode::E204 => "E204",
            ErrorCode::E205 => "E205",
            ErrorCode::E206 => "E206",
            ErrorCode::E207 => "E207",
            ErrorCode::E208 => "E208",
            ErrorCode::E209 => "E209",
            ErrorCode::E210 => "E210",
            ErrorCode::W200 => "W200",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "invalid JSON syntax",
            ErrorCode::E002 => "unexpected JSON structure",
            ErrorCode::E100 => "non-positive ring dimension",
            ErrorCode::E101 => "negative pad spacing",
            ErrorCode::E200 => "missing instance name",
            ErrorCode::E201 => "duplicate instance name",
            ErrorCode::E202 => "unknown instance kind",
            ErrorCode::E203 => "unknown side",
            ErrorCode::E204 => "invalid position",
            ErrorCode::E205 => "inner pad without absolute coordinates",
            ErrorCode::E206 => "duplicate corner",
            ErrorCode::E207 => "too many corners",
            ErrorCode::E208 => "offset position without side",
            ErrorCode::E209 => "non-positive instance width",
            ErrorCode::E210 => "missing device",
            ErrorCode::W200 => "ignored inner-pad side",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            ErrorCode::W200 => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// How to fix the intent graph, for codes with a single usual fix.
    pub fn help(&self) -> Option<&'static str> {
        let help = match self {
            ErrorCode::E100 => "ring dimensions are in database units and must be above zero",
            ErrorCode::E200 => "every instance needs a unique `name`",
            ErrorCode::E201 => "instance names must be unique within an intent graph",
            ErrorCode::E202 => {
                "valid kinds are `pad`, `inner_pad`, `corner`, `filler` and `separator`"
            }
            ErrorCode::E203 => "valid sides are `bottom`, `right`, `top` and `left`",
            ErrorCode::E204 => {
                "positions are an integer offset, `[x, y]` coordinates, or `<name>_<offset>`"
            }
            ErrorCode::E205 => "give inner pads a position of the form `[x, y]`",
            ErrorCode::E208 => "add a `side`, or use `[x, y]` coordinates",
            ErrorCode::W200 => "remove `side`; inner pads are placed by their coordinates",
            _ => return None,
        };
        Some(help)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
