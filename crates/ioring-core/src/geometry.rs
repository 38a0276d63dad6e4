//! Geometric primitives for I/O ring layout.
//!
//! This module provides the types used to describe where cells sit on the
//! rectangular pad ring, and the mapping between a linear "distance along a
//! side" and absolute ring coordinates.
//!
//! # Overview
//!
//! - [`Point`] - A 2D integer coordinate in ring space
//! - [`Side`] - One of the four ring edges
//! - [`CornerLocation`] - One of the four ring corners
//! - [`Orientation`] - Cell rotation applied when placing on a side or corner
//! - [`RingGeometry`] - Perimeter ⇄ coordinate mapping for a concrete ring
//!
//! # Coordinate System
//!
//! Ring coordinates follow the usual layout convention:
//!
//! ```text
//!    +Y
//!     ▲   top (walked right → left)
//!     │ ┌──────────────┐
//!     │ │              │ right
//!     │ │              │ (walked bottom → top)
//!     │ └──────────────┘
//!   (0,0) bottom (walked left → right) ──► +X
//! ```
//!
//! - **Origin**: Outer lower-left corner of the ring at `(0, 0)`
//! - **Units**: Integer database units; no floating point is involved, so
//!   conversions are exact.
//! - **Walking order**: counter-clockwise, bottom → right → top → left.
//!
//! Each side's usable length is its edge length minus the two adjacent
//! corner cells. A side-local offset of `0` is the point where the preceding
//! corner ends.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A 2D point in ring coordinate space.
///
/// # Examples
///
/// ```
/// # use ioring_core::geometry::Point;
/// let p = Point::new(10, 20).add_point(Point::new(5, -5));
/// assert_eq!(p.x(), 15);
/// assert_eq!(p.y(), 15);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    x: i64,
    y: i64,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> i64 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> i64 {
        self.y
    }

    /// Adds another point to this point, returning a new point
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One of the four edges of the ring.
///
/// The declaration order is the walking order, so sorting sides yields
/// bottom, right, top, left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Bottom,
    Right,
    Top,
    Left,
}

impl Side {
    /// All sides in walking order.
    pub const ALL: [Side; 4] = [Side::Bottom, Side::Right, Side::Top, Side::Left];

    /// Returns the orientation applied to cells placed on this side.
    pub fn orientation(self) -> Orientation {
        match self {
            Side::Bottom => Orientation::R0,
            Side::Right => Orientation::R90,
            Side::Top => Orientation::R180,
            Side::Left => Orientation::R270,
        }
    }

    /// Returns the corner that precedes this side in walking order.
    pub fn start_corner(self) -> CornerLocation {
        match self {
            Side::Bottom => CornerLocation::BottomLeft,
            Side::Right => CornerLocation::BottomRight,
            Side::Top => CornerLocation::TopRight,
            Side::Left => CornerLocation::TopLeft,
        }
    }

    /// Returns the corner that follows this side in walking order.
    pub fn end_corner(self) -> CornerLocation {
        match self {
            Side::Bottom => CornerLocation::BottomRight,
            Side::Right => CornerLocation::TopRight,
            Side::Top => CornerLocation::TopLeft,
            Side::Left => CornerLocation::BottomLeft,
        }
    }

    /// Returns the lowercase name used in intent graphs.
    pub fn as_str(self) -> &'static str {
        match self {
            Side::Bottom => "bottom",
            Side::Right => "right",
            Side::Top => "top",
            Side::Left => "left",
        }
    }
}

impl FromStr for Side {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bottom" => Ok(Self::Bottom),
            "right" => Ok(Self::Right),
            "top" => Ok(Self::Top),
            "left" => Ok(Self::Left),
            _ => Err("Unsupported side"),
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One of the four corners of the ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CornerLocation {
    BottomLeft,
    BottomRight,
    TopRight,
    TopLeft,
}

impl CornerLocation {
    /// All corners in walking order, each one preceding the side of the
    /// same index in [`Side::ALL`].
    pub const ALL: [CornerLocation; 4] = [
        CornerLocation::BottomLeft,
        CornerLocation::BottomRight,
        CornerLocation::TopRight,
        CornerLocation::TopLeft,
    ];

    /// Returns the orientation of the corner cell.
    pub fn orientation(self) -> Orientation {
        match self {
            CornerLocation::BottomLeft => Orientation::R0,
            CornerLocation::BottomRight => Orientation::R90,
            CornerLocation::TopRight => Orientation::R180,
            CornerLocation::TopLeft => Orientation::R270,
        }
    }

    /// Returns the snake_case name used in intent graphs.
    pub fn as_str(self) -> &'static str {
        match self {
            CornerLocation::BottomLeft => "bottom_left",
            CornerLocation::BottomRight => "bottom_right",
            CornerLocation::TopRight => "top_right",
            CornerLocation::TopLeft => "top_left",
        }
    }
}

impl FromStr for CornerLocation {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bottom_left" => Ok(Self::BottomLeft),
            "bottom_right" => Ok(Self::BottomRight),
            "top_right" => Ok(Self::TopRight),
            "top_left" => Ok(Self::TopLeft),
            _ => Err("Unsupported corner location"),
        }
    }
}

impl fmt::Display for CornerLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Rotation of a placed cell, counter-clockwise in 90° steps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    #[default]
    R0,
    R90,
    R180,
    R270,
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Orientation::R0 => "R0",
            Orientation::R90 => "R90",
            Orientation::R180 => "R180",
            Orientation::R270 => "R270",
        };
        write!(f, "{s}")
    }
}

/// Errors raised when ring dimensions cannot form a valid ring.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeometryError {
    #[error("corner size must be positive, got {0}")]
    NonPositiveCorner(i64),

    #[error(
        "ring {width}x{height} leaves no usable side length with corners of size {corner_size}"
    )]
    TooSmall {
        width: i64,
        height: i64,
        corner_size: i64,
    },

    #[error("ring {width}x{height} exceeds the maximum extent of {max} on some edge")]
    TooLarge { width: i64, height: i64, max: i64 },
}

/// Largest accepted outer ring edge, in database units.
///
/// Every side-local offset and coordinate of a valid ring stays within this
/// bound, so perimeter arithmetic cannot overflow and a side never needs
/// more filler cells than it has units.
pub const MAX_RING_EXTENT: i64 = 1_000_000;

/// Perimeter model of a concrete ring.
///
/// Maps side-local offsets to absolute anchor points and back. The anchor
/// of a cell is the point on the outer ring edge where the cell starts in
/// walking direction.
///
/// # Examples
///
/// ```
/// # use ioring_core::geometry::{Point, RingGeometry, Side};
/// let ring = RingGeometry::new(1000, 800, 100).unwrap();
/// assert_eq!(ring.usable_length(Side::Bottom), 800);
///
/// let (anchor, _) = ring.perimeter_to_xy(Side::Right, 50);
/// assert_eq!(anchor, Point::new(1000, 150));
/// assert_eq!(ring.xy_to_perimeter(anchor), Some((Side::Right, 50)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RingGeometry {
    width: i64,
    height: i64,
    corner_size: i64,
}

impl RingGeometry {
    /// Creates a ring geometry, checking that every side keeps a positive
    /// usable length after reserving the corners.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError`] if the corner size is not positive, the
    /// ring is too small to hold two corners per edge, or an edge is longer
    /// than [`MAX_RING_EXTENT`].
    pub fn new(width: i64, height: i64, corner_size: i64) -> Result<Self, GeometryError> {
        if corner_size <= 0 {
            return Err(GeometryError::NonPositiveCorner(corner_size));
        }
        if width > MAX_RING_EXTENT || height > MAX_RING_EXTENT {
            return Err(GeometryError::TooLarge {
                width,
                height,
                max: MAX_RING_EXTENT,
            });
        }
        let corners = corner_size.saturating_mul(2);
        if width <= corners || height <= corners {
            return Err(GeometryError::TooSmall {
                width,
                height,
                corner_size,
            });
        }
        Ok(Self {
            width,
            height,
            corner_size,
        })
    }

    /// Returns the outer ring width
    pub fn width(&self) -> i64 {
        self.width
    }

    /// Returns the outer ring height
    pub fn height(&self) -> i64 {
        self.height
    }

    /// Returns the edge length of a corner cell
    pub fn corner_size(&self) -> i64 {
        self.corner_size
    }

    /// Returns the length of `side` available to pads, fillers and separators.
    pub fn usable_length(&self, side: Side) -> i64 {
        match side {
            Side::Bottom | Side::Top => self.width - 2 * self.corner_size,
            Side::Right | Side::Left => self.height - 2 * self.corner_size,
        }
    }

    /// Returns the anchor of a corner cell, which is the ring's outer corner.
    pub fn corner_origin(&self, corner: CornerLocation) -> Point {
        match corner {
            CornerLocation::BottomLeft => Point::new(0, 0),
            CornerLocation::BottomRight => Point::new(self.width, 0),
            CornerLocation::TopRight => Point::new(self.width, self.height),
            CornerLocation::TopLeft => Point::new(0, self.height),
        }
    }

    /// Returns the corner whose anchor is `point`, if any.
    pub fn corner_at(&self, point: Point) -> Option<CornerLocation> {
        CornerLocation::ALL
            .into_iter()
            .find(|&corner| self.corner_origin(corner) == point)
    }

    /// Converts a side-local offset into an absolute anchor and orientation.
    ///
    /// The conversion is linear and does not clamp: offsets outside
    /// `0..=usable_length(side)` produce points beyond the usable range.
    pub fn perimeter_to_xy(&self, side: Side, offset: i64) -> (Point, Orientation) {
        let c = self.corner_size;
        let point = match side {
            Side::Bottom => Point::new(c + offset, 0),
            Side::Right => Point::new(self.width, c + offset),
            Side::Top => Point::new(self.width - c - offset, self.height),
            Side::Left => Point::new(0, self.height - c - offset),
        };
        (point, side.orientation())
    }

    /// Converts an absolute anchor back into a side and side-local offset.
    ///
    /// Returns `None` when the point does not lie on the usable part of any
    /// side. This is the exact inverse of [`RingGeometry::perimeter_to_xy`]
    /// for offsets in `0..=usable_length(side)`.
    pub fn xy_to_perimeter(&self, point: Point) -> Option<(Side, i64)> {
        let c = self.corner_size;
        let (x, y) = (point.x(), point.y());
        let along_x = (c..=self.width - c).contains(&x);
        let along_y = (c..=self.height - c).contains(&y);

        if y == 0 && along_x {
            Some((Side::Bottom, x - c))
        } else if x == self.width && along_y {
            Some((Side::Right, y - c))
        } else if y == self.height && along_x {
            Some((Side::Top, self.width - c - x))
        } else if x == 0 && along_y {
            Some((Side::Left, self.height - c - y))
        } else {
            None
        }
    }
}
