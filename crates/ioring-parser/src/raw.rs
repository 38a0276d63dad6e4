//! Untyped intent-graph document as it appears on the wire.
//!
//! These types mirror the JSON layout closely and accept anything
//! structurally valid. Semantic checks live in the elaboration step.

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

use ioring_core::config::PartialRingConfig;

#[derive(Debug, Deserialize)]
pub(crate) struct RawIntentGraph {
    #[serde(default)]
    pub library_name: Option<String>,
    #[serde(default)]
    pub cell_name: Option<String>,
    pub ring_config: PartialRingConfig,
    #[serde(default)]
    pub instances: Vec<RawInstance>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawInstance {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub device: Option<String>,
    #[serde(default, rename = "type")]
    pub type_: Option<String>,
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub side: Option<String>,
    #[serde(default)]
    pub position: Option<Value>,
    #[serde(default)]
    pub width: Option<i64>,
    /// Every remaining field, kept as a free-form attribute.
    #[serde(flatten)]
    pub attributes: IndexMap<String, Value>,
}

impl RawInstance {
    /// Explicit kind, from `type` or its alias `kind`
    pub fn declared_kind(&self) -> Option<&str> {
        self.type_.as_deref().or(self.kind.as_deref())
    }
}

/// Renders an attribute value as the string carried on the instance.
///
/// Strings are kept verbatim, `null` yields `None`, and everything else is
/// rendered as compact JSON.
pub(crate) fn attribute_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_instance_collects_attributes() {
        let raw: RawInstance = serde_json::from_str(
            r#"{"name": "IO1", "device": "PDDW16", "kind": "pad", "position": 20,
                "side": "left", "domain": "core", "drive": 4}"#,
        )
        .unwrap();

        assert_eq!(raw.name.as_deref(), Some("IO1"));
        assert_eq!(raw.declared_kind(), Some("pad"));
        assert_eq!(raw.position, Some(Value::from(20)));
        assert_eq!(raw.attributes.len(), 2);
        assert_eq!(raw.attributes.get_index(0).unwrap().0, "domain");
    }

    #[test]
    fn test_type_takes_precedence_over_kind() {
        let raw: RawInstance =
            serde_json::from_str(r#"{"type": "corner", "kind": "pad"}"#).unwrap();
        assert_eq!(raw.declared_kind(), Some("corner"));
    }

    #[test]
    fn test_attribute_value() {
        assert_eq!(attribute_value(&Value::from("io")), Some("io".to_string()));
        assert_eq!(attribute_value(&Value::from(3)), Some("3".to_string()));
        assert_eq!(attribute_value(&Value::from(true)), Some("true".to_string()));
        assert_eq!(attribute_value(&Value::Null), None);
    }
}
