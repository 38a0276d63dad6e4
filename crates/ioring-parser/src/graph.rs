//! The typed intent graph produced by parsing.

use std::{collections::BTreeSet, fmt};

use ioring_core::{
    config::PartialRingConfig,
    instance::{Instance, InstanceKind},
};

/// A validated intent graph: ring configuration plus instances in input
/// order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntentGraph {
    ring: PartialRingConfig,
    instances: Vec<Instance>,
}

impl IntentGraph {
    pub fn new(ring: PartialRingConfig, instances: Vec<Instance>) -> Self {
        Self { ring, instances }
    }

    /// Ring configuration as declared, before defaults are applied
    pub fn ring(&self) -> &PartialRingConfig {
        &self.ring
    }

    pub fn instances(&self) -> &[Instance] {
        &self.instances
    }

    /// Summarizes the graph for reporting.
    ///
    /// Pads and inner pads count towards the pad total. Digital I/Os are the
    /// pads carrying a `direction` attribute of `input` or `output`.
    pub fn statistics(&self) -> IntentGraphStatistics {
        let pads = self
            .instances
            .iter()
            .filter(|inst| matches!(inst.kind(), InstanceKind::Pad | InstanceKind::InnerPad));

        let mut stats = IntentGraphStatistics {
            width: self.ring.width,
            height: self.ring.height,
            device_types: self
                .instances
                .iter()
                .map(|inst| inst.device().to_string())
                .collect(),
            ..IntentGraphStatistics::default()
        };

        for pad in pads {
            stats.total_pads += 1;
            match pad.attribute("direction") {
                Some(dir) if dir.eq_ignore_ascii_case("input") => stats.input_ios += 1,
                Some(dir) if dir.eq_ignore_ascii_case("output") => stats.output_ios += 1,
                _ => continue,
            }
            stats.digital_ios += 1;
        }

        stats
    }
}

/// Summary counts for an [`IntentGraph`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntentGraphStatistics {
    pub width: i64,
    pub height: i64,
    pub total_pads: usize,
    /// Distinct device names, sorted
    pub device_types: BTreeSet<String>,
    pub digital_ios: usize,
    pub input_ios: usize,
    pub output_ios: usize,
}

impl fmt::Display for IntentGraphStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "IO ring scale: {}x{}", self.width, self.height)?;
        writeln!(f, "Total pad count: {}", self.total_pads)?;
        let devices: Vec<&str> = self.device_types.iter().map(String::as_str).collect();
        write!(f, "Device types: {}", devices.join(", "))?;
        if self.digital_ios > 0 {
            write!(
                f,
                "\nDigital IOs: {} ({} inputs, {} outputs)",
                self.digital_ios, self.input_ios, self.output_ios
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use ioring_core::{geometry::Side, instance::Position};

    use super::*;

    fn pad(name: &str, device: &str, direction: Option<&str>) -> Instance {
        let inst = Instance::new(name, device, InstanceKind::Pad, Position::Offset(0))
            .with_side(Side::Bottom);
        match direction {
            Some(dir) => inst.with_attribute("direction", dir),
            None => inst,
        }
    }

    #[test]
    fn test_statistics_counts() {
        let graph = IntentGraph::new(
            PartialRingConfig::new(1000, 800),
            vec![
                pad("A", "PDDW16", Some("input")),
                pad("B", "PDDW16", Some("Output")),
                pad("C", "PVDD1", None),
                Instance::new("F", "PFILLER10", InstanceKind::Filler, Position::Offset(0))
                    .with_side(Side::Top),
                Instance::new(
                    "T",
                    "PTEST",
                    InstanceKind::InnerPad,
                    Position::Absolute { x: 5, y: 5 },
                ),
            ],
        );

        let stats = graph.statistics();

        assert_eq!(stats.width, 1000);
        assert_eq!(stats.height, 800);
        assert_eq!(stats.total_pads, 4);
        assert_eq!(stats.digital_ios, 2);
        assert_eq!(stats.input_ios, 1);
        assert_eq!(stats.output_ios, 1);
        assert_eq!(
            stats.device_types.iter().collect::<Vec<_>>(),
            vec!["PDDW16", "PFILLER10", "PTEST", "PVDD1"]
        );
    }

    #[test]
    fn test_statistics_display() {
        let graph = IntentGraph::new(
            PartialRingConfig::new(500, 400),
            vec![pad("A", "PVDD1", None)],
        );

        assert_eq!(
            graph.statistics().to_string(),
            "IO ring scale: 500x400\nTotal pad count: 1\nDevice types: PVDD1"
        );
    }
}
