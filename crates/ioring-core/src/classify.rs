//! Device classification.
//!
//! Every instance in an intent graph belongs to a [`Category`]. When the
//! instance carries an explicit kind, that kind decides. Otherwise the
//! device label is matched case-insensitively against known naming
//! patterns, in this order:
//!
//! 1. filler patterns (`fill`)
//! 2. separator patterns (`sep`, `break`)
//! 3. corner patterns (`corner`)
//!
//! The first match wins. Labels matching nothing classify as
//! [`Category::Unknown`], which callers place as ordinary pads.

use std::fmt;

use crate::instance::InstanceKind;

const FILLER_PATTERNS: &[&str] = &["fill"];
const SEPARATOR_PATTERNS: &[&str] = &["sep", "break"];
const CORNER_PATTERNS: &[&str] = &["corner"];

/// Classification result for a device label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Pad,
    InnerPad,
    Corner,
    Filler,
    Separator,
    Unknown,
}

impl Category {
    /// Returns the instance kind a category is placed as.
    ///
    /// [`Category::Unknown`] is placed as a pad.
    pub fn placement_kind(self) -> InstanceKind {
        match self {
            Category::Pad | Category::Unknown => InstanceKind::Pad,
            Category::InnerPad => InstanceKind::InnerPad,
            Category::Corner => InstanceKind::Corner,
            Category::Filler => InstanceKind::Filler,
            Category::Separator => InstanceKind::Separator,
        }
    }
}

impl From<InstanceKind> for Category {
    fn from(kind: InstanceKind) -> Self {
        match kind {
            InstanceKind::Pad => Category::Pad,
            InstanceKind::InnerPad => Category::InnerPad,
            InstanceKind::Corner => Category::Corner,
            InstanceKind::Filler => Category::Filler,
            InstanceKind::Separator => Category::Separator,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Category::Pad => "pad",
            Category::InnerPad => "inner_pad",
            Category::Corner => "corner",
            Category::Filler => "filler",
            Category::Separator => "separator",
            Category::Unknown => "unknown",
        };
        write!(f, "{s}")
    }
}

/// Classifies a device label by name patterns alone.
///
/// # Examples
///
/// ```
/// # use ioring_core::classify::{Category, classify};
/// assert_eq!(classify("PFILLER10"), Category::Filler);
/// assert_eq!(classify("pRcut_sep"), Category::Separator);
/// assert_eq!(classify("PDDW16SDGZ"), Category::Unknown);
/// ```
pub fn classify(label: &str) -> Category {
    let label = label.to_ascii_lowercase();
    let matches = |patterns: &[&str]| patterns.iter().any(|p| label.contains(p));

    if matches(FILLER_PATTERNS) {
        Category::Filler
    } else if matches(SEPARATOR_PATTERNS) {
        Category::Separator
    } else if matches(CORNER_PATTERNS) {
        Category::Corner
    } else {
        Category::Unknown
    }
}

/// Classifies an instance, letting an explicit kind take precedence over
/// the device label.
pub fn classify_instance(kind: Option<InstanceKind>, label: &str) -> Category {
    match kind {
        Some(kind) => Category::from(kind),
        None => classify(label),
    }
}
