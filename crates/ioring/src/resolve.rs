//! Position resolution.
//!
//! The resolver turns every declared [`Position`] into a side and a
//! side-local offset. Relative positions form a reference graph that is
//! walked in topological order, so each instance is resolved after the
//! instance it refers to. Corners are taken from the declared corner
//! instances or generated, and inner pads are passed through untouched.
//!
//! After resolution the perimeter instances are grouped per side, sorted by
//! offset and checked for overlaps against each other and the corners.

use std::collections::HashMap;

use indexmap::IndexMap;
use log::{debug, trace};
use petgraph::{
    algo::{tarjan_scc, toposort},
    graph::{DiGraph, NodeIndex},
};

use ioring_core::{
    catalog::FillerCatalog,
    config::RingConfig,
    geometry::{CornerLocation, Point, RingGeometry, Side},
    instance::{Instance, InstanceKind, Position},
};

use crate::{error::LayoutError, names::UniqueNames};

/// A corner cell, either declared in the intent graph or generated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CornerCell {
    pub location: CornerLocation,
    pub name: String,
    pub device: String,
    pub attributes: IndexMap<String, String>,
}

/// A perimeter instance with its resolved side-local span.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ResolvedCell<'a> {
    pub instance: &'a Instance,
    pub offset: i64,
    pub width: i64,
}

impl ResolvedCell<'_> {
    /// End of the span, saturating so that out-of-range input still fails
    /// the side bounds check.
    pub fn end(&self) -> i64 {
        self.offset.saturating_add(self.width)
    }

    pub fn name(&self) -> &str {
        self.instance.name()
    }
}

/// Resolved instances of one side, in ascending offset order.
#[derive(Debug, Clone)]
pub(crate) struct SideRun<'a> {
    pub side: Side,
    pub cells: Vec<ResolvedCell<'a>>,
}

/// Output of the resolver.
#[derive(Debug, Clone)]
pub(crate) struct ResolvedRing<'a> {
    /// Corners in walking order
    pub corners: Vec<CornerCell>,
    /// Sides in walking order
    pub sides: Vec<SideRun<'a>>,
    /// Inner pads in input order
    pub inner_pads: Vec<&'a Instance>,
}

impl ResolvedRing<'_> {
    pub fn corner_name(&self, location: CornerLocation) -> &str {
        self.corners
            .iter()
            .find(|corner| corner.location == location)
            .map_or("", |corner| corner.name.as_str())
    }
}

pub(crate) struct Resolver<'a> {
    geometry: &'a RingGeometry,
    config: &'a RingConfig,
    catalog: &'a FillerCatalog,
}

impl<'a> Resolver<'a> {
    pub fn new(geometry: &'a RingGeometry, config: &'a RingConfig, catalog: &'a FillerCatalog) -> Self {
        Self {
            geometry,
            config,
            catalog,
        }
    }

    /// Resolves every instance of the intent graph.
    pub fn resolve<'i>(
        &self,
        instances: &'i [Instance],
        names: &mut UniqueNames,
    ) -> Result<ResolvedRing<'i>, LayoutError> {
        check_unique_names(instances)?;

        let corners = self.place_corners(instances, names)?;
        let inner_pads = collect_inner_pads(instances)?;

        let perimeter: Vec<&Instance> = instances
            .iter()
            .filter(|inst| inst.kind().is_perimeter())
            .collect();
        debug!(perimeter = perimeter.len(), inner_pads = inner_pads.len(); "Resolving positions");

        let placements = self.resolve_positions(instances, &perimeter)?;

        let mut ring = ResolvedRing {
            corners,
            sides: Side::ALL
                .into_iter()
                .map(|side| SideRun {
                    side,
                    cells: Vec::new(),
                })
                .collect(),
            inner_pads,
        };
        for (instance, (side, offset)) in perimeter.into_iter().zip(placements) {
            let width = self.cell_width(instance)?;
            trace!(name = instance.name(), side:%, offset, width; "Resolved instance");
            if let Some(run) = ring.sides.iter_mut().find(|run| run.side == side) {
                run.cells.push(ResolvedCell {
                    instance,
                    offset,
                    width,
                });
            }
        }

        for run in &mut ring.sides {
            run.cells.sort_by_key(|cell| cell.offset);
        }
        for run in &ring.sides {
            self.check_side(&ring, run)?;
        }

        Ok(ring)
    }

    /// Takes the declared corners and generates the missing ones.
    fn place_corners(
        &self,
        instances: &[Instance],
        names: &mut UniqueNames,
    ) -> Result<Vec<CornerCell>, LayoutError> {
        let mut slots: [Option<CornerCell>; 4] = Default::default();

        for inst in instances
            .iter()
            .filter(|inst| inst.kind() == InstanceKind::Corner)
        {
            let location = match inst.position() {
                Position::Corner(location) => *location,
                Position::Absolute { x, y } => self
                    .geometry
                    .corner_at(Point::new(*x, *y))
                    .ok_or_else(|| invalid_position(inst, "not a ring corner"))?,
                _ => return Err(invalid_position(inst, "corners need a corner location")),
            };

            let slot = &mut slots[corner_index(location)];
            if let Some(first) = slot {
                return Err(LayoutError::DuplicateCorner {
                    location,
                    first: first.name.clone(),
                    second: inst.name().to_string(),
                });
            }
            *slot = Some(CornerCell {
                location,
                name: inst.name().to_string(),
                device: inst.device().to_string(),
                attributes: inst.attributes().clone(),
            });
        }

        let corners = CornerLocation::ALL
            .into_iter()
            .zip(slots)
            .map(|(location, slot)| {
                slot.unwrap_or_else(|| {
                    trace!(location:%; "Generating corner");
                    CornerCell {
                        location,
                        name: names.claim(format!("corner_{location}")),
                        device: self.config.corner_device().to_string(),
                        attributes: IndexMap::new(),
                    }
                })
            })
            .collect();
        Ok(corners)
    }

    /// Resolves perimeter positions in reference order.
    ///
    /// Returns one `(side, offset)` per perimeter instance, in the order of
    /// `perimeter`.
    fn resolve_positions(
        &self,
        instances: &[Instance],
        perimeter: &[&Instance],
    ) -> Result<Vec<(Side, i64)>, LayoutError> {
        let by_name: HashMap<&str, &Instance> =
            instances.iter().map(|inst| (inst.name(), inst)).collect();

        let mut graph = DiGraph::<usize, ()>::new();
        let nodes: HashMap<&str, NodeIndex> = perimeter
            .iter()
            .enumerate()
            .map(|(idx, inst)| (inst.name(), graph.add_node(idx)))
            .collect();

        for (idx, inst) in perimeter.iter().enumerate() {
            let Position::Relative { reference, .. } = inst.position() else {
                continue;
            };
            let Some(&from) = nodes.get(reference.as_str()) else {
                return Err(match by_name.get(reference.as_str()) {
                    Some(target) => LayoutError::InvalidReference {
                        instance: inst.name().to_string(),
                        reference: reference.clone(),
                        kind: target.kind(),
                    },
                    None => LayoutError::UnresolvedReference {
                        instance: inst.name().to_string(),
                        reference: reference.clone(),
                    },
                });
            };
            graph.add_edge(from, NodeIndex::new(idx), ());
        }
        debug!(references = graph.edge_count(); "Built reference graph");

        let order = toposort(&graph, None).map_err(|cycle| LayoutError::CyclicReference {
            members: cycle_members(&graph, cycle.node_id(), perimeter, &nodes),
        })?;

        let mut placements: Vec<Option<(Side, i64)>> = vec![None; perimeter.len()];
        for node in order {
            let idx = graph[node];
            let inst = perimeter[idx];
            let placement = match inst.position() {
                Position::Offset(offset) => {
                    let side = inst
                        .side()
                        .ok_or_else(|| invalid_position(inst, "offset without side"))?;
                    (side, *offset)
                }
                Position::Absolute { x, y } => {
                    let (side, offset) = self
                        .geometry
                        .xy_to_perimeter(Point::new(*x, *y))
                        .ok_or_else(|| LayoutError::OffPerimeter {
                            instance: inst.name().to_string(),
                            x: *x,
                            y: *y,
                        })?;
                    check_declared_side(inst, side)?;
                    (side, offset)
                }
                Position::Relative { reference, offset } => {
                    let (side, base) = nodes
                        .get(reference.as_str())
                        .and_then(|node| placements[graph[*node]])
                        .ok_or_else(|| LayoutError::UnresolvedReference {
                            instance: inst.name().to_string(),
                            reference: reference.clone(),
                        })?;
                    check_declared_side(inst, side)?;
                    let offset = base
                        .checked_add(*offset)
                        .ok_or_else(|| invalid_position(inst, "offset out of range"))?;
                    (side, offset)
                }
                Position::Corner(_) => {
                    return Err(invalid_position(
                        inst,
                        "corner locations are only valid for corners",
                    ));
                }
            };
            placements[idx] = Some(placement);
        }

        Ok(placements.into_iter().flatten().collect())
    }

    /// Extent along the side: explicit width, else the catalog width of
    /// filler and separator devices, else the configured pad width.
    fn cell_width(&self, inst: &Instance) -> Result<i64, LayoutError> {
        let width = inst
            .width()
            .or_else(|| match inst.kind() {
                InstanceKind::Filler | InstanceKind::Separator => {
                    self.catalog.width_of(inst.device())
                }
                _ => None,
            })
            .unwrap_or(self.config.pad_width());

        if width <= 0 {
            return Err(LayoutError::InvalidWidth {
                instance: inst.name().to_string(),
                width,
            });
        }
        Ok(width)
    }

    /// Checks that a sorted side stays between its corners without
    /// overlaps.
    fn check_side(&self, ring: &ResolvedRing<'_>, run: &SideRun<'_>) -> Result<(), LayoutError> {
        let side = run.side;
        let overlap = |first: &str, second: &str| LayoutError::Overlap {
            side,
            first: first.to_string(),
            second: second.to_string(),
        };

        if let Some(first) = run.cells.first().filter(|cell| cell.offset < 0) {
            return Err(overlap(ring.corner_name(side.start_corner()), first.name()));
        }
        if let Some(pair) = run.cells.windows(2).find(|pair| pair[0].end() > pair[1].offset) {
            return Err(overlap(pair[0].name(), pair[1].name()));
        }
        let usable = self.geometry.usable_length(side);
        if let Some(cell) = run.cells.iter().find(|cell| cell.end() > usable) {
            return Err(overlap(cell.name(), ring.corner_name(side.end_corner())));
        }
        Ok(())
    }
}

fn check_unique_names(instances: &[Instance]) -> Result<(), LayoutError> {
    let mut seen = std::collections::HashSet::new();
    match instances.iter().find(|inst| !seen.insert(inst.name())) {
        Some(dup) => Err(LayoutError::DuplicateName(dup.name().to_string())),
        None => Ok(()),
    }
}

fn collect_inner_pads(instances: &[Instance]) -> Result<Vec<&Instance>, LayoutError> {
    instances
        .iter()
        .filter(|inst| inst.kind() == InstanceKind::InnerPad)
        .map(|inst| match inst.position() {
            Position::Absolute { .. } => Ok(inst),
            _ => Err(invalid_position(inst, "inner pads need absolute coordinates")),
        })
        .collect()
}

fn check_declared_side(inst: &Instance, found: Side) -> Result<(), LayoutError> {
    match inst.side() {
        Some(declared) if declared != found => Err(LayoutError::SideMismatch {
            instance: inst.name().to_string(),
            declared,
            found,
        }),
        _ => Ok(()),
    }
}

fn invalid_position(inst: &Instance, reason: &'static str) -> LayoutError {
    LayoutError::InvalidPosition {
        instance: inst.name().to_string(),
        position: inst.position().to_string(),
        reason,
    }
}

fn corner_index(location: CornerLocation) -> usize {
    match location {
        CornerLocation::BottomLeft => 0,
        CornerLocation::BottomRight => 1,
        CornerLocation::TopRight => 2,
        CornerLocation::TopLeft => 3,
    }
}

/// Names the instances of the cycle through `node`, starting at the
/// earliest declared one and following each instance to its reference.
fn cycle_members(
    graph: &DiGraph<usize, ()>,
    node: NodeIndex,
    perimeter: &[&Instance],
    nodes: &HashMap<&str, NodeIndex>,
) -> Vec<String> {
    let is_cycle = |component: &Vec<NodeIndex>| {
        component.len() > 1 || graph.contains_edge(component[0], component[0])
    };
    let components: Vec<Vec<NodeIndex>> = tarjan_scc(graph)
        .into_iter()
        .filter(|component| !component.is_empty() && is_cycle(component))
        .collect();
    let Some(component) = components
        .iter()
        .find(|component| component.contains(&node))
        .or_else(|| components.first())
    else {
        return vec![perimeter[graph[node]].name().to_string()];
    };

    let Some(start) = component.iter().copied().min_by_key(|n| graph[*n]) else {
        return Vec::new();
    };
    let mut members = Vec::with_capacity(component.len());
    let mut current = start;
    for _ in 0..component.len() {
        let inst = perimeter[graph[current]];
        members.push(inst.name().to_string());
        let next = match inst.position() {
            Position::Relative { reference, .. } => nodes.get(reference.as_str()).copied(),
            _ => None,
        };
        match next {
            Some(next) if next != start => current = next,
            _ => break,
        }
    }
    members
}
