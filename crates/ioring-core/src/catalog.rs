//! Filler and separator cell catalog.
//!
//! A [`FillerCatalog`] lists the filler cells available to close gaps on
//! the ring, ordered by descending width, together with the separator cell
//! inserted where device groupings change. The catalog is validated once on
//! construction and is immutable afterwards, so one catalog can be shared
//! by any number of concurrent layout runs.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while building a [`FillerCatalog`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("cell `{device}` has non-positive width {width}")]
    NonPositiveWidth { device: String, width: i64 },

    #[error("cells `{first}` and `{second}` share width {width}")]
    DuplicateWidth {
        first: String,
        second: String,
        width: i64,
    },
}

/// A library cell used to fill space on the ring.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FillerCell {
    device: String,
    width: i64,
}

impl FillerCell {
    pub fn new(device: impl Into<String>, width: i64) -> Self {
        Self {
            device: device.into(),
            width,
        }
    }

    pub fn device(&self) -> &str {
        &self.device
    }

    pub fn width(&self) -> i64 {
        self.width
    }
}

/// Serialized form of a catalog, validated into [`FillerCatalog`].
///
/// Missing fields fall back to the default catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogSpec {
    #[serde(default = "default_fillers")]
    fillers: Vec<FillerCell>,
    #[serde(default = "default_separator")]
    separator: FillerCell,
    #[serde(default = "default_separator_attribute")]
    separator_attribute: String,
}

fn default_fillers() -> Vec<FillerCell> {
    vec![
        FillerCell::new("PFILLER20", 20),
        FillerCell::new("PFILLER10", 10),
        FillerCell::new("PFILLER5", 5),
        FillerCell::new("PFILLER1", 1),
    ]
}

fn default_separator() -> FillerCell {
    FillerCell::new("PCUTSEP", 10)
}

fn default_separator_attribute() -> String {
    "domain".to_string()
}

/// Immutable set of filler widths plus the separator cell.
///
/// # Examples
///
/// ```
/// # use ioring_core::catalog::{FillerCatalog, FillerCell};
/// let catalog = FillerCatalog::new(
///     vec![FillerCell::new("F5", 5), FillerCell::new("F20", 20)],
///     FillerCell::new("SEP", 10),
/// )
/// .unwrap();
///
/// // Fillers are kept widest first
/// assert_eq!(catalog.fillers()[0].width(), 20);
/// assert_eq!(catalog.width_gcd(), 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CatalogSpec", into = "CatalogSpec")]
pub struct FillerCatalog {
    fillers: Vec<FillerCell>,
    separator: FillerCell,
    separator_attribute: String,
}

impl FillerCatalog {
    /// Builds a catalog, sorting fillers by descending width.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if any cell width is not positive or two
    /// fillers share a width.
    pub fn new(mut fillers: Vec<FillerCell>, separator: FillerCell) -> Result<Self, CatalogError> {
        for cell in fillers.iter().chain(std::iter::once(&separator)) {
            if cell.width <= 0 {
                return Err(CatalogError::NonPositiveWidth {
                    device: cell.device.clone(),
                    width: cell.width,
                });
            }
        }

        fillers.sort_by(|a, b| b.width.cmp(&a.width));
        if let Some(pair) = fillers.windows(2).find(|pair| pair[0].width == pair[1].width) {
            return Err(CatalogError::DuplicateWidth {
                first: pair[0].device.clone(),
                second: pair[1].device.clone(),
                width: pair[0].width,
            });
        }

        Ok(Self {
            fillers,
            separator,
            separator_attribute: default_separator_attribute(),
        })
    }

    /// Sets the instance attribute whose change between adjacent pads
    /// requires a separator (builder style).
    pub fn with_separator_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.separator_attribute = attribute.into();
        self
    }

    /// Filler cells, widest first
    pub fn fillers(&self) -> &[FillerCell] {
        &self.fillers
    }

    pub fn separator(&self) -> &FillerCell {
        &self.separator
    }

    pub fn separator_attribute(&self) -> &str {
        &self.separator_attribute
    }

    /// Looks up the width of a filler or separator device by name,
    /// ignoring ASCII case.
    pub fn width_of(&self, device: &str) -> Option<i64> {
        self.fillers
            .iter()
            .chain(std::iter::once(&self.separator))
            .find(|cell| cell.device.eq_ignore_ascii_case(device))
            .map(|cell| cell.width)
    }

    /// Greatest common divisor of all filler widths, or `0` for an empty
    /// catalog. Only multiples of this value can ever be filled exactly.
    pub fn width_gcd(&self) -> i64 {
        self.fillers.iter().fold(0, |acc, cell| gcd(acc, cell.width))
    }
}

impl Default for FillerCatalog {
    fn default() -> Self {
        let mut fillers = default_fillers();
        fillers.sort_by(|a, b| b.width.cmp(&a.width));
        Self {
            fillers,
            separator: default_separator(),
            separator_attribute: default_separator_attribute(),
        }
    }
}

impl TryFrom<CatalogSpec> for FillerCatalog {
    type Error = CatalogError;

    fn try_from(spec: CatalogSpec) -> Result<Self, Self::Error> {
        Ok(FillerCatalog::new(spec.fillers, spec.separator)?
            .with_separator_attribute(spec.separator_attribute))
    }
}

impl From<FillerCatalog> for CatalogSpec {
    fn from(catalog: FillerCatalog) -> Self {
        Self {
            fillers: catalog.fillers,
            separator: catalog.separator,
            separator_attribute: catalog.separator_attribute,
        }
    }
}

fn gcd(mut a: i64, mut b: i64) -> i64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_is_descending() {
        let catalog = FillerCatalog::default();
        let widths: Vec<i64> = catalog.fillers().iter().map(FillerCell::width).collect();
        assert_eq!(widths, vec![20, 10, 5, 1]);
        assert_eq!(catalog.separator().device(), "PCUTSEP");
        assert_eq!(catalog.separator_attribute(), "domain");
        assert_eq!(catalog.width_gcd(), 1);
    }

    #[test]
    fn test_rejects_non_positive_width() {
        let err = FillerCatalog::new(vec![FillerCell::new("F0", 0)], FillerCell::new("S", 4))
            .unwrap_err();
        assert_eq!(
            err,
            CatalogError::NonPositiveWidth {
                device: "F0".to_string(),
                width: 0
            }
        );

        let err = FillerCatalog::new(vec![], FillerCell::new("S", -1)).unwrap_err();
        assert!(matches!(err, CatalogError::NonPositiveWidth { .. }));
    }

    #[test]
    fn test_rejects_duplicate_width() {
        let err = FillerCatalog::new(
            vec![FillerCell::new("A", 10), FillerCell::new("B", 10)],
            FillerCell::new("S", 4),
        )
        .unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateWidth { width: 10, .. }));
    }

    #[test]
    fn test_width_of_is_case_insensitive() {
        let catalog = FillerCatalog::default();
        assert_eq!(catalog.width_of("pfiller10"), Some(10));
        assert_eq!(catalog.width_of("PCUTSEP"), Some(10));
        assert_eq!(catalog.width_of("PFILLER3"), None);
    }

    #[test]
    fn test_width_gcd() {
        let catalog = FillerCatalog::new(
            vec![FillerCell::new("A", 30), FillerCell::new("B", 7)],
            FillerCell::new("S", 4),
        )
        .unwrap();
        assert_eq!(catalog.width_gcd(), 1);

        let catalog = FillerCatalog::new(
            vec![FillerCell::new("A", 12), FillerCell::new("B", 18)],
            FillerCell::new("S", 4),
        )
        .unwrap();
        assert_eq!(catalog.width_gcd(), 6);

        let empty = FillerCatalog::new(vec![], FillerCell::new("S", 4)).unwrap();
        assert_eq!(empty.width_gcd(), 0);
    }
}
