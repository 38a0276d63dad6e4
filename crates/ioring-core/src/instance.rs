//! Intent-graph instances.
//!
//! An [`Instance`] is one named element of the ring as declared by the
//! caller: a pad, an inner pad, a corner, or a pre-placed filler or
//! separator. Its [`Position`] is decided at parse time and is either
//! absolute or relative to another instance.

use std::{fmt, str::FromStr};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::geometry::{CornerLocation, Side};

/// How an instance participates in the ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstanceKind {
    /// An I/O or power pad on the ring perimeter
    Pad,
    /// A pad placed inside the ring, outside perimeter tiling
    InnerPad,
    /// One of the four corner cells
    Corner,
    /// An inert cell closing a geometric gap
    Filler,
    /// A filler-like cell isolating two device groupings
    Separator,
}

impl InstanceKind {
    /// Returns `true` for kinds tiled along the ring sides.
    pub fn is_perimeter(self) -> bool {
        matches!(
            self,
            InstanceKind::Pad | InstanceKind::Filler | InstanceKind::Separator
        )
    }

    /// Returns the snake_case name used in intent graphs.
    pub fn as_str(self) -> &'static str {
        match self {
            InstanceKind::Pad => "pad",
            InstanceKind::InnerPad => "inner_pad",
            InstanceKind::Corner => "corner",
            InstanceKind::Filler => "filler",
            InstanceKind::Separator => "separator",
        }
    }
}

impl FromStr for InstanceKind {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pad" => Ok(Self::Pad),
            "inner_pad" => Ok(Self::InnerPad),
            "corner" => Ok(Self::Corner),
            "filler" => Ok(Self::Filler),
            "separator" => Ok(Self::Separator),
            _ => Err("Unsupported instance kind"),
        }
    }
}

impl fmt::Display for InstanceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Declared position of an instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Position {
    /// Side-local offset; the instance must also declare its side.
    Offset(i64),
    /// Absolute ring coordinates of the cell anchor.
    Absolute { x: i64, y: i64 },
    /// Offset from the start of another named instance on the same side.
    Relative { reference: String, offset: i64 },
    /// A ring corner, only meaningful for corner instances.
    Corner(CornerLocation),
}

impl Position {
    /// Returns `true` if the position depends on another instance.
    pub fn is_relative(&self) -> bool {
        matches!(self, Position::Relative { .. })
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Offset(offset) => write!(f, "{offset}"),
            Position::Absolute { x, y } => write!(f, "[{x}, {y}]"),
            Position::Relative { reference, offset } => write!(f, "{reference}_{offset}"),
            Position::Corner(corner) => write!(f, "{corner}"),
        }
    }
}

/// A named element of the intent graph.
///
/// # Examples
///
/// ```
/// # use ioring_core::{geometry::Side, instance::{Instance, InstanceKind, Position}};
/// let vdd = Instance::new("VDD0", "PVDD1", InstanceKind::Pad, Position::Offset(40))
///     .with_side(Side::Bottom)
///     .with_attribute("domain", "core");
///
/// assert_eq!(vdd.attribute("domain"), Some("core"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instance {
    name: String,
    device: String,
    kind: InstanceKind,
    side: Option<Side>,
    position: Position,
    width: Option<i64>,
    attributes: IndexMap<String, String>,
}

impl Instance {
    /// Creates an instance without side, width override or attributes.
    pub fn new(
        name: impl Into<String>,
        device: impl Into<String>,
        kind: InstanceKind,
        position: Position,
    ) -> Self {
        Self {
            name: name.into(),
            device: device.into(),
            kind,
            side: None,
            position,
            width: None,
            attributes: IndexMap::new(),
        }
    }

    /// Sets the declared side (builder style).
    pub fn with_side(mut self, side: Side) -> Self {
        self.side = Some(side);
        self
    }

    /// Overrides the extent of the instance along its side (builder style).
    pub fn with_width(mut self, width: i64) -> Self {
        self.width = Some(width);
        self
    }

    /// Adds a free-form attribute such as `domain` or `direction`.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn device(&self) -> &str {
        &self.device
    }

    pub fn kind(&self) -> InstanceKind {
        self.kind
    }

    pub fn side(&self) -> Option<Side> {
        self.side
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn width(&self) -> Option<i64> {
        self.width
    }

    /// Returns the value of a free-form attribute, if present.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    pub fn attributes(&self) -> &IndexMap<String, String> {
        &self.attributes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instance_kind_from_str() {
        assert_eq!("pad".parse::<InstanceKind>(), Ok(InstanceKind::Pad));
        assert_eq!("Inner_Pad".parse::<InstanceKind>(), Ok(InstanceKind::InnerPad));
        assert_eq!("separator".parse::<InstanceKind>(), Ok(InstanceKind::Separator));
        assert!("bondpad".parse::<InstanceKind>().is_err());
    }

    #[test]
    fn test_perimeter_kinds() {
        assert!(InstanceKind::Pad.is_perimeter());
        assert!(InstanceKind::Filler.is_perimeter());
        assert!(InstanceKind::Separator.is_perimeter());
        assert!(!InstanceKind::Corner.is_perimeter());
        assert!(!InstanceKind::InnerPad.is_perimeter());
    }

    #[test]
    fn test_position_display() {
        let relative = Position::Relative {
            reference: "VDD_CORE".to_string(),
            offset: -20,
        };
        assert_eq!(relative.to_string(), "VDD_CORE_-20");
        assert!(relative.is_relative());
        assert_eq!(Position::Absolute { x: 3, y: 4 }.to_string(), "[3, 4]");
        assert_eq!(
            Position::Corner(CornerLocation::TopLeft).to_string(),
            "top_left"
        );
    }

    #[test]
    fn test_instance_builder() {
        let inst = Instance::new("IO1", "PDDW16", InstanceKind::Pad, Position::Offset(0))
            .with_side(Side::Left)
            .with_width(40)
            .with_attribute("direction", "input");

        assert_eq!(inst.name(), "IO1");
        assert_eq!(inst.side(), Some(Side::Left));
        assert_eq!(inst.width(), Some(40));
        assert_eq!(inst.attribute("direction"), Some("input"));
        assert_eq!(inst.attribute("domain"), None);
    }
}
