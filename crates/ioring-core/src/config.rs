//! Ring-level configuration.
//!
//! - [`PartialRingConfig`] - the `ring_config` section as written in an intent
//!   graph, where everything except the outer extents may be omitted.
//! - [`RingDefaults`] - values used for omitted fields.
//! - [`RingConfig`] - the complete configuration a layout run works with.

use serde::{Deserialize, Serialize};

use crate::geometry::{GeometryError, RingGeometry};

/// Ring configuration as declared by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialRingConfig {
    pub width: i64,
    pub height: i64,
    #[serde(default)]
    pub pad_width: Option<i64>,
    #[serde(default)]
    pub pad_height: Option<i64>,
    #[serde(default)]
    pub corner_size: Option<i64>,
    #[serde(default)]
    pub pad_spacing: Option<i64>,
    #[serde(default)]
    pub library_name: Option<String>,
    #[serde(default)]
    pub cell_name: Option<String>,
    #[serde(default)]
    pub view_name: Option<String>,
    #[serde(default)]
    pub corner_device: Option<String>,
}

impl PartialRingConfig {
    /// Creates a partial configuration with only the outer extents set.
    pub fn new(width: i64, height: i64) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Fills every unset field from `defaults`.
    ///
    /// Defaulting never fails; dimensional checks happen when the geometry
    /// is built.
    pub fn with_defaults(self, defaults: &RingDefaults) -> RingConfig {
        RingConfig {
            width: self.width,
            height: self.height,
            pad_width: self.pad_width.unwrap_or(defaults.pad_width),
            pad_height: self.pad_height.unwrap_or(defaults.pad_height),
            corner_size: self.corner_size.unwrap_or(defaults.corner_size),
            pad_spacing: self.pad_spacing.unwrap_or(defaults.pad_spacing),
            library_name: self
                .library_name
                .unwrap_or_else(|| defaults.library_name.clone()),
            cell_name: self
                .cell_name
                .unwrap_or_else(|| defaults.cell_name.clone()),
            view_name: self
                .view_name
                .unwrap_or_else(|| defaults.view_name.clone()),
            corner_device: self
                .corner_device
                .unwrap_or_else(|| defaults.corner_device.clone()),
        }
    }
}

/// Default values for ring fields left unset in an intent graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RingDefaults {
    pub pad_width: i64,
    pub pad_height: i64,
    pub corner_size: i64,
    pub pad_spacing: i64,
    pub library_name: String,
    pub cell_name: String,
    pub view_name: String,
    pub corner_device: String,
}

impl Default for RingDefaults {
    fn default() -> Self {
        Self {
            pad_width: 20,
            pad_height: 110,
            corner_size: 110,
            pad_spacing: 0,
            library_name: "LIB".to_string(),
            cell_name: "IO_RING".to_string(),
            view_name: "layout".to_string(),
            corner_device: "PCORNER".to_string(),
        }
    }
}

/// Complete ring configuration for one layout run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RingConfig {
    width: i64,
    height: i64,
    pad_width: i64,
    pad_height: i64,
    corner_size: i64,
    pad_spacing: i64,
    library_name: String,
    cell_name: String,
    view_name: String,
    corner_device: String,
}

impl RingConfig {
    /// Outer ring width
    pub fn width(&self) -> i64 {
        self.width
    }

    /// Outer ring height
    pub fn height(&self) -> i64 {
        self.height
    }

    /// Default extent of a pad along its side
    pub fn pad_width(&self) -> i64 {
        self.pad_width
    }

    /// Depth of perimeter cells, perpendicular to their side
    pub fn pad_height(&self) -> i64 {
        self.pad_height
    }

    pub fn corner_size(&self) -> i64 {
        self.corner_size
    }

    /// Minimum clearance between two adjacent pads on one side
    pub fn pad_spacing(&self) -> i64 {
        self.pad_spacing
    }

    pub fn library_name(&self) -> &str {
        &self.library_name
    }

    pub fn cell_name(&self) -> &str {
        &self.cell_name
    }

    pub fn view_name(&self) -> &str {
        &self.view_name
    }

    /// Device used for corners the intent graph does not declare
    pub fn corner_device(&self) -> &str {
        &self.corner_device
    }

    /// Builds the perimeter model for this ring.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError`] if the ring cannot hold its corners.
    pub fn geometry(&self) -> Result<RingGeometry, GeometryError> {
        RingGeometry::new(self.width, self.height, self.corner_size)
    }
}
