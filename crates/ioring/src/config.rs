//! Configuration types for I/O ring layout.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from a
//! TOML file by the command line tool.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining ring defaults and the filler catalog.
//! - [`RingDefaults`] - Values used for `ring_config` fields an intent graph leaves unset.
//! - [`FillerCatalog`] - Filler and separator cells available to the auto-filler.
//!
//! # Example
//!
//! ```
//! # use ioring::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.ring().pad_width, 20);
//! assert_eq!(config.catalog().separator().device(), "PCUTSEP");
//! ```

use serde::Deserialize;

pub use ioring_core::{
    catalog::{FillerCatalog, FillerCell},
    config::RingDefaults,
};

/// Top-level application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AppConfig {
    /// Ring defaults section.
    #[serde(default)]
    ring: RingDefaults,

    /// Filler catalog section.
    #[serde(default)]
    catalog: FillerCatalog,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from ring defaults and a filler catalog.
    pub fn new(ring: RingDefaults, catalog: FillerCatalog) -> Self {
        Self { ring, catalog }
    }

    /// Returns the ring defaults.
    pub fn ring(&self) -> &RingDefaults {
        &self.ring
    }

    /// Returns the filler catalog.
    pub fn catalog(&self) -> &FillerCatalog {
        &self.catalog
    }
}
