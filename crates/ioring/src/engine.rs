//! The ring layout engine.
//!
//! One run takes a ring configuration and the intent-graph instances and
//! passes them through the stages in order:
//!
//! 1. **Defaults** - fill unset ring fields and build the ring geometry
//! 2. **Resolve** - absolute side offsets for every perimeter instance
//! 3. **Fill** - close every gap with fillers and separators
//! 4. **Assemble** - compose the final [`RingLayout`]
//!
//! The engine holds no state between runs. Catalog and defaults are
//! borrowed immutably, so any number of runs may share them across threads.

use log::debug;

use ioring_core::{
    catalog::FillerCatalog,
    config::{PartialRingConfig, RingDefaults},
    geometry::Side,
    instance::Instance,
};

use crate::{
    assemble::assemble, error::LayoutError, fill::AutoFiller, layout::RingLayout,
    names::UniqueNames, resolve::Resolver,
};

/// Runs the layout pipeline for one intent graph at a time.
///
/// # Examples
///
/// ```
/// # use ioring::engine::LayoutEngine;
/// # use ioring_core::{
/// #     catalog::FillerCatalog,
/// #     config::{PartialRingConfig, RingDefaults},
/// #     geometry::Side,
/// #     instance::{Instance, InstanceKind, Position},
/// # };
/// let catalog = FillerCatalog::default();
/// let defaults = RingDefaults::default();
/// let engine = LayoutEngine::new(&catalog, &defaults);
///
/// let pads = vec![
///     Instance::new("VDD0", "PVDD1", InstanceKind::Pad, Position::Offset(40))
///         .with_side(Side::Bottom),
/// ];
/// let layout = engine.run(&PartialRingConfig::new(1000, 800), &pads).unwrap();
///
/// assert_eq!(layout.side_coverage(Side::Bottom), 1000 - 2 * 110);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct LayoutEngine<'a> {
    catalog: &'a FillerCatalog,
    defaults: &'a RingDefaults,
}

impl<'a> LayoutEngine<'a> {
    pub fn new(catalog: &'a FillerCatalog, defaults: &'a RingDefaults) -> Self {
        Self { catalog, defaults }
    }

    /// Lays out one ring.
    ///
    /// # Errors
    ///
    /// Returns the first [`LayoutError`] any stage detects; no partial
    /// layout is produced.
    pub fn run(
        &self,
        ring: &PartialRingConfig,
        instances: &[Instance],
    ) -> Result<RingLayout, LayoutError> {
        let config = ring.clone().with_defaults(self.defaults);
        let geometry = config.geometry()?;
        debug!(
            width = config.width(),
            height = config.height(),
            corner_size = config.corner_size();
            "Ring geometry ready",
        );

        let mut names = UniqueNames::new(instances.iter().map(Instance::name));

        let resolved = Resolver::new(&geometry, &config, self.catalog).resolve(instances, &mut names)?;

        let usable_length = Side::ALL.map(|side| geometry.usable_length(side));
        let fills = AutoFiller::new(self.catalog, config.pad_spacing(), usable_length)
            .fill(&resolved, &mut names)?;

        Ok(assemble(config, &geometry, resolved, fills))
    }
}
