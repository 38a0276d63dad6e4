//! Layout assembly.
//!
//! Composes the resolved corners, perimeter instances, generated fillers
//! and separators, and inner pads into one [`RingLayout`]. Each corner is
//! followed by the side it starts, and every side lists its cells in
//! ascending offset order. Inner pads come last, in input order.

use indexmap::IndexMap;
use log::debug;

use ioring_core::{
    config::RingConfig,
    geometry::{Orientation, Point, RingGeometry},
    instance::{InstanceKind, Position},
};

use crate::{
    fill::FillCell,
    layout::{PlacedInstance, RingLayout},
    resolve::ResolvedRing,
};

pub(crate) fn assemble(
    config: RingConfig,
    geometry: &RingGeometry,
    ring: ResolvedRing<'_>,
    fills: Vec<Vec<FillCell>>,
) -> RingLayout {
    let pad_height = config.pad_height();
    let corner_size = config.corner_size();
    let mut instances = Vec::new();

    for ((corner, run), fill) in ring.corners.into_iter().zip(&ring.sides).zip(fills) {
        instances.push(
            PlacedInstance::new(
                corner.name,
                InstanceKind::Corner,
                corner.device,
                geometry.corner_origin(corner.location),
                corner.location.orientation(),
                (corner_size, corner_size),
            )
            .at_corner(corner.location)
            .with_attributes(corner.attributes),
        );

        let declared = run.cells.iter().map(|cell| {
            let inst = cell.instance;
            (
                cell.offset,
                inst.name().to_string(),
                inst.kind(),
                inst.device().to_string(),
                cell.width,
                inst.attributes().clone(),
            )
        });
        let generated = fill.into_iter().map(|cell| {
            (
                cell.offset,
                cell.name,
                cell.kind,
                cell.device,
                cell.width,
                IndexMap::new(),
            )
        });
        let mut side_cells: Vec<_> = declared.chain(generated).collect();
        side_cells.sort_by_key(|cell| cell.0);

        for (offset, name, kind, device, width, attributes) in side_cells {
            let (origin, orientation) = geometry.perimeter_to_xy(run.side, offset);
            instances.push(
                PlacedInstance::new(name, kind, device, origin, orientation, (width, pad_height))
                    .on_side(run.side, offset)
                    .with_attributes(attributes),
            );
        }
    }

    for inst in ring.inner_pads {
        let origin = match inst.position() {
            Position::Absolute { x, y } => Point::new(*x, *y),
            _ => Point::default(),
        };
        instances.push(
            PlacedInstance::new(
                inst.name().to_string(),
                InstanceKind::InnerPad,
                inst.device().to_string(),
                origin,
                Orientation::R0,
                (inst.width().unwrap_or(config.pad_width()), pad_height),
            )
            .with_attributes(inst.attributes().clone()),
        );
    }

    debug!(instances = instances.len(); "Layout assembled");
    RingLayout::new(config, instances)
}
