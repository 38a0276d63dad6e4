//! The placed ring handed to downstream consumers.
//!
//! A [`RingLayout`] lists every cell of the ring in walking order: each
//! corner followed by the side it starts, with the inner pads last in input
//! order.

use indexmap::IndexMap;
use serde::Serialize;

use ioring_core::{
    config::RingConfig,
    geometry::{CornerLocation, Orientation, Point, Side},
    instance::InstanceKind,
};

/// One fully placed cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlacedInstance {
    name: String,
    kind: InstanceKind,
    device: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    side: Option<Side>,
    /// Side-local start offset
    #[serde(skip_serializing_if = "Option::is_none")]
    offset: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    corner: Option<CornerLocation>,
    origin: Point,
    orientation: Orientation,
    width: i64,
    height: i64,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    attributes: IndexMap<String, String>,
}

impl PlacedInstance {
    pub(crate) fn new(
        name: String,
        kind: InstanceKind,
        device: String,
        origin: Point,
        orientation: Orientation,
        size: (i64, i64),
    ) -> Self {
        Self {
            name,
            kind,
            device,
            side: None,
            offset: None,
            corner: None,
            origin,
            orientation,
            width: size.0,
            height: size.1,
            attributes: IndexMap::new(),
        }
    }

    pub(crate) fn on_side(mut self, side: Side, offset: i64) -> Self {
        self.side = Some(side);
        self.offset = Some(offset);
        self
    }

    pub(crate) fn at_corner(mut self, corner: CornerLocation) -> Self {
        self.corner = Some(corner);
        self
    }

    pub(crate) fn with_attributes(mut self, attributes: IndexMap<String, String>) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> InstanceKind {
        self.kind
    }

    pub fn device(&self) -> &str {
        &self.device
    }

    /// Side the cell is tiled on; `None` for corners and inner pads
    pub fn side(&self) -> Option<Side> {
        self.side
    }

    /// Side-local start offset; `None` for corners and inner pads
    pub fn offset(&self) -> Option<i64> {
        self.offset
    }

    /// Ring corner occupied by a corner cell
    pub fn corner(&self) -> Option<CornerLocation> {
        self.corner
    }

    /// Anchor point in ring coordinates
    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Extent along the side
    pub fn width(&self) -> i64 {
        self.width
    }

    /// Depth perpendicular to the side
    pub fn height(&self) -> i64 {
        self.height
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    pub fn attributes(&self) -> &IndexMap<String, String> {
        &self.attributes
    }

    /// Side-local span `start..end`, for cells tiled on a side
    pub fn span(&self) -> Option<(i64, i64)> {
        self.offset.map(|start| (start, start + self.width))
    }
}

/// A complete, gap-free ring layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RingLayout {
    config: RingConfig,
    instances: Vec<PlacedInstance>,
}

impl RingLayout {
    pub(crate) fn new(config: RingConfig, instances: Vec<PlacedInstance>) -> Self {
        Self { config, instances }
    }

    /// Ring configuration with every default applied
    pub fn config(&self) -> &RingConfig {
        &self.config
    }

    /// All cells in walking order, inner pads last
    pub fn instances(&self) -> &[PlacedInstance] {
        &self.instances
    }

    /// Looks up a cell by name.
    pub fn get(&self, name: &str) -> Option<&PlacedInstance> {
        self.instances.iter().find(|inst| inst.name == name)
    }

    /// Cells tiled on `side`, in ascending offset order.
    pub fn side_instances(&self, side: Side) -> impl Iterator<Item = &PlacedInstance> {
        self.instances
            .iter()
            .filter(move |inst| inst.side == Some(side))
    }

    /// Sum of the widths of all cells tiled on `side`.
    ///
    /// For a valid layout this equals the side's usable length.
    pub fn side_coverage(&self, side: Side) -> i64 {
        self.side_instances(side).map(PlacedInstance::width).sum()
    }

    /// The four corner cells in walking order.
    pub fn corners(&self) -> impl Iterator<Item = &PlacedInstance> {
        self.instances.iter().filter(|inst| inst.corner.is_some())
    }

    /// Inner pads in input order.
    pub fn inner_pads(&self) -> impl Iterator<Item = &PlacedInstance> {
        self.instances
            .iter()
            .filter(|inst| inst.kind == InstanceKind::InnerPad)
    }

    /// Number of cells of the given kind.
    pub fn count(&self, kind: InstanceKind) -> usize {
        self.instances.iter().filter(|inst| inst.kind == kind).count()
    }
}
