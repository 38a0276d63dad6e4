//! IoRing - layout engine for IC I/O rings.
//!
//! Turns an intent graph (ring dimensions, corners and named pad instances)
//! into a fully placed, gap-free ring: every instance gets an absolute
//! position on the perimeter, and filler and separator cells close every
//! residual gap exactly.

pub mod config;
pub mod engine;

mod assemble;
mod error;
mod fill;
mod layout;
mod names;
mod resolve;

pub use ioring_core::{catalog, classify, geometry, instance};
pub use ioring_parser::{IntentGraph, IntentGraphStatistics};

pub use error::{IoRingError, LayoutError};
pub use fill::exact_fill;
pub use layout::{PlacedInstance, RingLayout};

use log::{debug, info, trace};

use config::AppConfig;
use engine::LayoutEngine;

/// Builder for parsing and laying out I/O ring intent graphs.
///
/// This provides an API for processing intent graphs through parsing,
/// layout, and export stages.
///
/// # Examples
///
/// ```rust
/// use ioring::{RingBuilder, config::AppConfig};
///
/// let source = r#"{
///     "ring_config": {"width": 1000, "height": 800},
///     "instances": [
///         {"name": "VDD0", "device": "PVDD1", "side": "bottom", "position": 40}
///     ]
/// }"#;
///
/// let builder = RingBuilder::new(AppConfig::default());
///
/// // Parse source to an intent graph
/// let graph = builder.parse(source).expect("Failed to parse");
///
/// // Place every cell on the ring
/// let layout = builder.layout(&graph).expect("Failed to lay out");
///
/// // Export for downstream tools
/// let json = builder.render_json(&layout).expect("Failed to export");
/// assert!(json.contains("\"VDD0\""));
/// ```
#[derive(Debug, Default)]
pub struct RingBuilder {
    config: AppConfig,
}

impl RingBuilder {
    /// Create a new ring builder with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Application configuration including ring defaults and the filler catalog
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Parse intent-graph JSON into an [`IntentGraph`].
    ///
    /// # Errors
    ///
    /// Returns `IoRingError::Parse` carrying every diagnostic found in the
    /// source.
    pub fn parse(&self, source: &str) -> Result<IntentGraph, IoRingError> {
        info!("Parsing intent graph");

        let graph = ioring_parser::parse(source)
            .map_err(|err| IoRingError::new_parse_error(err, source))?;

        debug!(instances = graph.instances().len(); "Intent graph parsed successfully");
        trace!(graph:?; "Parsed intent graph");

        Ok(graph)
    }

    /// Lay out a parsed intent graph.
    ///
    /// # Errors
    ///
    /// Returns `IoRingError::Layout` if the ring cannot be laid out exactly.
    pub fn layout(&self, graph: &IntentGraph) -> Result<RingLayout, IoRingError> {
        info!(instances = graph.instances().len(); "Laying out ring");

        let engine = LayoutEngine::new(self.config.catalog(), self.config.ring());
        let layout = engine.run(graph.ring(), graph.instances())?;

        info!(
            placed = layout.instances().len(),
            fillers = layout.count(instance::InstanceKind::Filler),
            separators = layout.count(instance::InstanceKind::Separator);
            "Layout calculated",
        );
        Ok(layout)
    }

    /// Render a layout as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns `IoRingError::Export` if serialization fails.
    pub fn render_json(&self, layout: &RingLayout) -> Result<String, IoRingError> {
        let json = serde_json::to_string_pretty(layout)?;
        debug!(bytes = json.len(); "Layout rendered to JSON");
        Ok(json)
    }
}
