//! Elaboration of the raw intent graph.
//!
//! This module turns the untyped wire document into an [`IntentGraph`]. It
//! checks names, kinds, sides, widths and positions, decides each
//! instance's [`Position`] variant, and assigns ring corners to corner
//! instances that did not name one. Every problem is collected so a single
//! run reports all of them.

use std::collections::{HashMap, HashSet};

use log::{debug, trace};
use serde_json::Value;

use ioring_core::{
    classify::classify_instance,
    config::PartialRingConfig,
    geometry::{CornerLocation, Side},
    instance::{Instance, InstanceKind, Position},
};

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
    graph::IntentGraph,
    position::{coordinates, corner_location, parse_relative_position},
    raw::{RawInstance, RawIntentGraph, attribute_value},
    span::{Span, key_span, string_value_spans},
};

/// A corner instance waiting for its location.
#[derive(Debug)]
struct PendingCorner {
    name: String,
    device: String,
    width: Option<i64>,
    attributes: Vec<(String, String)>,
    span: Option<Span>,
}

#[derive(Debug)]
enum Slot {
    Ready(Instance),
    Corner(PendingCorner),
}

pub(crate) struct Builder<'a> {
    source: &'a str,
    collector: DiagnosticCollector,
    occurrences: HashMap<String, usize>,
    corners: HashMap<CornerLocation, String>,
}

impl<'a> Builder<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            collector: DiagnosticCollector::new(),
            occurrences: HashMap::new(),
            corners: HashMap::new(),
        }
    }

    // ============================================================================
    // Main Entry Methods
    // ============================================================================

    pub fn build(mut self, raw: RawIntentGraph) -> Result<IntentGraph, ParseError> {
        debug!(instances = raw.instances.len(); "Elaborating intent graph");

        let ring = self.build_ring_config(raw.ring_config, raw.library_name, raw.cell_name);

        let mut names = HashSet::new();
        let mut slots = Vec::with_capacity(raw.instances.len());
        for (index, inst) in raw.instances.into_iter().enumerate() {
            if let Some(slot) = self.build_instance(index, inst, &ring, &mut names) {
                slots.push(slot);
            }
        }

        let instances = self.place_pending_corners(slots);

        self.collector.finish()?;
        debug!(instances = instances.len(); "Intent graph elaborated");
        Ok(IntentGraph::new(ring, instances))
    }

    // ============================================================================
    // Ring Configuration
    // ============================================================================

    fn build_ring_config(
        &mut self,
        mut ring: PartialRingConfig,
        library_name: Option<String>,
        cell_name: Option<String>,
    ) -> PartialRingConfig {
        if ring.library_name.is_none() {
            ring.library_name = library_name;
        }
        if ring.cell_name.is_none() {
            ring.cell_name = cell_name;
        }

        let dimensions = [
            ("width", Some(ring.width)),
            ("height", Some(ring.height)),
            ("pad_width", ring.pad_width),
            ("pad_height", ring.pad_height),
            ("corner_size", ring.corner_size),
        ];
        for (key, value) in dimensions {
            if let Some(value) = value.filter(|&v| v <= 0) {
                self.collector.emit(
                    Diagnostic::new(
                        ErrorCode::E100,
                        format!("ring `{key}` must be positive, got {value}"),
                    )
                    .at(key_span(self.source, key), "non-positive value"),
                );
            }
        }

        if let Some(spacing) = ring.pad_spacing.filter(|&s| s < 0) {
            self.collector.emit(
                Diagnostic::new(
                    ErrorCode::E101,
                    format!("ring `pad_spacing` must not be negative, got {spacing}"),
                )
                .at(key_span(self.source, "pad_spacing"), "negative spacing"),
            );
        }

        ring
    }

    // ============================================================================
    // Instances
    // ============================================================================

    fn build_instance(
        &mut self,
        index: usize,
        raw: RawInstance,
        ring: &PartialRingConfig,
        names: &mut HashSet<String>,
    ) -> Option<Slot> {
        let Some(name) = raw.name.clone().filter(|name| !name.trim().is_empty()) else {
            self.collector.emit(Diagnostic::new(
                ErrorCode::E200,
                format!("instance #{} has no name", index + 1),
            ));
            return None;
        };

        let span = self.name_span(&name);
        if !names.insert(name.clone()) {
            let first = string_value_spans(self.source, "name", &name).first().copied();
            let mut diag = Diagnostic::for_instance(
                ErrorCode::E201,
                &name,
                format!("instance `{name}` is defined multiple times"),
            )
            .at(span, "duplicate definition");
            if let Some(first) = first.filter(|first| Some(*first) != span) {
                diag = diag.also_at(first, "first defined here");
            }
            self.collector.emit(diag);
            return None;
        }

        let Some(device) = raw.device.clone() else {
            self.collector.emit(
                Diagnostic::for_instance(
                    ErrorCode::E210,
                    &name,
                    format!("instance `{name}` has no device"),
                )
                .at(span, "missing `device`"),
            );
            return None;
        };

        let kind = self.build_kind(&name, &device, raw.declared_kind(), span)?;
        let side = self.build_side(&name, raw.side.as_deref(), span);
        let width = self.build_width(&name, raw.width, span);
        let attributes: Vec<(String, String)> = raw
            .attributes
            .iter()
            .filter_map(|(key, value)| attribute_value(value).map(|v| (key.clone(), v)))
            .collect();

        trace!(name = name.as_str(), kind:%; "Elaborating instance");

        let position = match kind {
            InstanceKind::Corner => {
                let location = self.build_corner_location(&name, raw.position.as_ref(), ring, span);
                match location {
                    CornerPosition::Invalid => return None,
                    CornerPosition::Unplaced => {
                        return Some(Slot::Corner(PendingCorner {
                            name,
                            device,
                            width: width?,
                            attributes,
                            span,
                        }));
                    }
                    CornerPosition::At(location) => Position::Corner(location),
                }
            }
            InstanceKind::InnerPad => {
                if raw.side.is_some() {
                    self.collector.emit(
                        Diagnostic::for_instance(
                            ErrorCode::W200,
                            &name,
                            format!("side of inner pad `{name}` is ignored"),
                        )
                        .at(span, "inner pad"),
                    );
                }
                match raw.position.as_ref().and_then(coordinates) {
                    Some((x, y)) => Position::Absolute { x, y },
                    None => {
                        self.collector.emit(
                            Diagnostic::for_instance(
                                ErrorCode::E205,
                                &name,
                                format!("inner pad `{name}` needs absolute coordinates"),
                            )
                            .at(span, "inner pad"),
                        );
                        return None;
                    }
                }
            }
            InstanceKind::Pad | InstanceKind::Filler | InstanceKind::Separator => {
                self.build_perimeter_position(&name, side?, raw.position.as_ref(), span)?
            }
        };

        let mut instance = Instance::new(name, device, kind, position);
        if kind.is_perimeter() {
            if let Some(side) = side? {
                instance = instance.with_side(side);
            }
        }
        if let Some(width) = width? {
            instance = instance.with_width(width);
        }
        for (key, value) in attributes {
            instance = instance.with_attribute(key, value);
        }
        Some(Slot::Ready(instance))
    }

    fn build_kind(
        &mut self,
        name: &str,
        device: &str,
        declared: Option<&str>,
        span: Option<Span>,
    ) -> Option<InstanceKind> {
        let declared = match declared {
            Some(text) => match text.parse::<InstanceKind>() {
                Ok(kind) => Some(kind),
                Err(_) => {
                    self.collector.emit(
                        Diagnostic::for_instance(
                            ErrorCode::E202,
                            name,
                            format!("instance `{name}` has unknown kind `{text}`"),
                        )
                        .at(span, "in this instance"),
                    );
                    return None;
                }
            },
            None => None,
        };
        Some(classify_instance(declared, device).placement_kind())
    }

    /// `None` marks an invalid side; `Some(None)` means no side was given.
    fn build_side(
        &mut self,
        name: &str,
        side: Option<&str>,
        span: Option<Span>,
    ) -> Option<Option<Side>> {
        let Some(text) = side else {
            return Some(None);
        };
        match text.parse::<Side>() {
            Ok(side) => Some(Some(side)),
            Err(_) => {
                self.collector.emit(
                    Diagnostic::for_instance(
                        ErrorCode::E203,
                        name,
                        format!("instance `{name}` has unknown side `{text}`"),
                    )
                    .at(span, "in this instance"),
                );
                None
            }
        }
    }

    /// `None` marks an invalid width; `Some(None)` means no width was given.
    fn build_width(
        &mut self,
        name: &str,
        width: Option<i64>,
        span: Option<Span>,
    ) -> Option<Option<i64>> {
        match width {
            Some(width) if width <= 0 => {
                self.collector.emit(
                    Diagnostic::for_instance(
                        ErrorCode::E209,
                        name,
                        format!("instance `{name}` has non-positive width {width}"),
                    )
                    .at(span, "in this instance"),
                );
                None
            }
            width => Some(width),
        }
    }

    fn build_perimeter_position(
        &mut self,
        name: &str,
        side: Option<Side>,
        value: Option<&Value>,
        span: Option<Span>,
    ) -> Option<Position> {
        let position = match value {
            Some(Value::Number(number)) => match number.as_i64() {
                Some(offset) if side.is_some() => Some(Position::Offset(offset)),
                Some(_) => {
                    self.collector.emit(
                        Diagnostic::for_instance(
                            ErrorCode::E208,
                            name,
                            format!("instance `{name}` gives an offset but no side"),
                        )
                        .at(span, "in this instance"),
                    );
                    return None;
                }
                None => None,
            },
            Some(Value::String(text)) => parse_relative_position(text)
                .map(|(reference, offset)| Position::Relative { reference, offset }),
            Some(other) => coordinates(other).map(|(x, y)| Position::Absolute { x, y }),
            None => None,
        };

        if position.is_none() {
            let found = value.map_or_else(|| "nothing".to_string(), Value::to_string);
            self.collector.emit(
                Diagnostic::for_instance(
                    ErrorCode::E204,
                    name,
                    format!("instance `{name}` has invalid position {found}"),
                )
                .at(span, "in this instance"),
            );
        }
        position
    }

    fn build_corner_location(
        &mut self,
        name: &str,
        value: Option<&Value>,
        ring: &PartialRingConfig,
        span: Option<Span>,
    ) -> CornerPosition {
        let Some(value) = value else {
            return CornerPosition::Unplaced;
        };
        let Some(location) = corner_location(value, ring.width, ring.height) else {
            self.collector.emit(
                Diagnostic::for_instance(
                    ErrorCode::E204,
                    name,
                    format!("corner `{name}` has invalid position {value}"),
                )
                .at(span, "in this corner")
                .hint(
                    "corners take `bottom_left`, `bottom_right`, `top_right`, `top_left` or the ring-corner coordinates",
                ),
            );
            return CornerPosition::Invalid;
        };

        if let Some(first) = self.corners.get(&location) {
            let message = format!("corners `{first}` and `{name}` both claim `{location}`");
            self.collector.emit(
                Diagnostic::for_instance(ErrorCode::E206, name, message)
                    .at(span, "duplicate corner"),
            );
            return CornerPosition::Invalid;
        }
        self.corners.insert(location, name.to_string());
        CornerPosition::At(location)
    }

    /// Gives corners without a position the free ring corners in walking
    /// order.
    fn place_pending_corners(&mut self, slots: Vec<Slot>) -> Vec<Instance> {
        let mut free = CornerLocation::ALL
            .into_iter()
            .filter(|location| !self.corners.contains_key(location))
            .collect::<Vec<_>>()
            .into_iter();

        let mut instances = Vec::with_capacity(slots.len());
        for slot in slots {
            match slot {
                Slot::Ready(instance) => instances.push(instance),
                Slot::Corner(pending) => {
                    let Some(location) = free.next() else {
                        self.collector.emit(
                            Diagnostic::for_instance(
                                ErrorCode::E207,
                                &pending.name,
                                format!(
                                    "corner `{}` does not fit, the ring has only four corners",
                                    pending.name
                                ),
                            )
                            .at(pending.span, "extra corner"),
                        );
                        continue;
                    };
                    trace!(name = pending.name.as_str(), location:%; "Assigned corner");
                    self.corners.insert(location, pending.name.clone());

                    let mut instance = Instance::new(
                        pending.name,
                        pending.device,
                        InstanceKind::Corner,
                        Position::Corner(location),
                    );
                    if let Some(width) = pending.width {
                        instance = instance.with_width(width);
                    }
                    for (key, value) in pending.attributes {
                        instance = instance.with_attribute(key, value);
                    }
                    instances.push(instance);
                }
            }
        }
        instances
    }

    /// Span of the current occurrence of `"name": "<name>"`.
    fn name_span(&mut self, name: &str) -> Option<Span> {
        let occurrence = self.occurrences.entry(name.to_string()).or_insert(0);
        let span = string_value_spans(self.source, "name", name)
            .get(*occurrence)
            .copied();
        *occurrence += 1;
        span
    }
}

enum CornerPosition {
    At(CornerLocation),
    Unplaced,
    Invalid,
}
