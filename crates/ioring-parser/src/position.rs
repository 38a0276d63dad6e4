//! Decoding of the `position` field.
//!
//! A position on the wire is one of:
//!
//! - an integer: side-local offset
//! - a two-element integer array: absolute `[x, y]` ring coordinates
//! - a string `"<name>_<offset>"`: offset relative to another instance
//! - for corners, a corner name such as `"top_left"`

use serde_json::Value;

use ioring_core::geometry::CornerLocation;

/// Splits a relative position string into its reference name and signed
/// offset.
///
/// The split happens at the last underscore so reference names may contain
/// underscores themselves.
///
/// # Examples
///
/// ```
/// # use ioring_parser::parse_relative_position;
/// assert_eq!(
///     parse_relative_position("VDD_CORE_-20"),
///     Some(("VDD_CORE".to_string(), -20))
/// );
/// assert_eq!(parse_relative_position("VDD_CORE"), None);
/// ```
pub fn parse_relative_position(text: &str) -> Option<(String, i64)> {
    let (reference, offset) = text.trim().rsplit_once('_')?;
    if reference.is_empty() {
        return None;
    }
    let offset = offset.parse::<i64>().ok()?;
    Some((reference.to_string(), offset))
}

/// Reads an `[x, y]` integer pair.
pub(crate) fn coordinates(value: &Value) -> Option<(i64, i64)> {
    match value.as_array()?.as_slice() {
        [x, y] => Some((x.as_i64()?, y.as_i64()?)),
        _ => None,
    }
}

/// Reads a corner position: a corner name, or the outer coordinates of one
/// of the ring's corners.
pub(crate) fn corner_location(value: &Value, width: i64, height: i64) -> Option<CornerLocation> {
    if let Some(name) = value.as_str() {
        return name.parse().ok();
    }
    match coordinates(value)? {
        (0, 0) => Some(CornerLocation::BottomLeft),
        (x, 0) if x == width => Some(CornerLocation::BottomRight),
        (x, y) if x == width && y == height => Some(CornerLocation::TopRight),
        (0, y) if y == height => Some(CornerLocation::TopLeft),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_parse_relative_position() {
        assert_eq!(
            parse_relative_position("IO1_40"),
            Some(("IO1".to_string(), 40))
        );
        assert_eq!(
            parse_relative_position("A_B_+5"),
            Some(("A_B".to_string(), 5))
        );
        assert_eq!(parse_relative_position("_40"), None);
        assert_eq!(parse_relative_position("IO1_"), None);
        assert_eq!(parse_relative_position("IO1_x"), None);
        assert_eq!(parse_relative_position("40"), None);
    }

    #[test]
    fn test_coordinates() {
        assert_eq!(coordinates(&json!([3, -4])), Some((3, -4)));
        assert_eq!(coordinates(&json!([3])), None);
        assert_eq!(coordinates(&json!([3, 4, 5])), None);
        assert_eq!(coordinates(&json!([3.5, 4])), None);
        assert_eq!(coordinates(&json!("3,4")), None);
    }

    #[test]
    fn test_corner_location() {
        assert_eq!(
            corner_location(&json!("Top_Left"), 100, 80),
            Some(CornerLocation::TopLeft)
        );
        assert_eq!(
            corner_location(&json!([100, 80]), 100, 80),
            Some(CornerLocation::TopRight)
        );
        assert_eq!(
            corner_location(&json!([100, 0]), 100, 80),
            Some(CornerLocation::BottomRight)
        );
        assert_eq!(corner_location(&json!([50, 0]), 100, 80), None);
        assert_eq!(corner_location(&json!("middle"), 100, 80), None);
    }

    fn check_reference_survives_underscores(
        reference: String,
        offset: i64,
    ) -> Result<(), TestCaseError> {
        let text = format!("{reference}_{offset}");
        prop_assert_eq!(parse_relative_position(&text), Some((reference, offset)));
        Ok(())
    }

    proptest! {
        #[test]
        fn reference_survives_underscores(
            reference in "[A-Za-z][A-Za-z0-9_]{0,12}",
            offset in -10_000i64..10_000,
        ) {
            check_reference_survives_underscores(reference, offset)?;
        }
    }
}
