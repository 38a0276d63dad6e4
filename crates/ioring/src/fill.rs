//! Gap filling.
//!
//! Walking each side from its start corner to its end corner, every gap
//! between two consecutive cells is closed with catalog cells whose widths
//! sum to the gap exactly. Where the grouping attribute changes between two
//! pads and no separator sits between them, a separator is placed at the
//! start of the gap first.
//!
//! Tiling is greedy, widest cell first. When greedy selection leaves a
//! remainder, a dynamic program over the gap length finds the exact tiling
//! with the fewest cells, or proves that none exists.

use log::{debug, trace};

use ioring_core::{
    catalog::{FillerCatalog, FillerCell},
    geometry::Side,
    instance::InstanceKind,
};

use crate::{
    error::LayoutError,
    names::UniqueNames,
    resolve::{ResolvedRing, SideRun},
};

/// A filler or separator created by the auto-filler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FillCell {
    pub name: String,
    pub device: String,
    pub kind: InstanceKind,
    pub offset: i64,
    pub width: i64,
}

/// One edge of a gap.
struct Boundary<'a> {
    name: &'a str,
    is_pad: bool,
}

pub(crate) struct AutoFiller<'a> {
    catalog: &'a FillerCatalog,
    pad_spacing: i64,
    usable_length: [i64; 4],
}

impl<'a> AutoFiller<'a> {
    /// `usable_length` holds the usable length of each side in walking order.
    pub fn new(catalog: &'a FillerCatalog, pad_spacing: i64, usable_length: [i64; 4]) -> Self {
        Self {
            catalog,
            pad_spacing,
            usable_length,
        }
    }

    /// Fills every side, returning the generated cells per side in walking
    /// order.
    pub fn fill(
        &self,
        ring: &ResolvedRing<'_>,
        names: &mut UniqueNames,
    ) -> Result<Vec<Vec<FillCell>>, LayoutError> {
        ring.sides
            .iter()
            .zip(self.usable_length)
            .map(|(run, usable)| self.fill_side(ring, run, usable, names))
            .collect()
    }

    fn fill_side(
        &self,
        ring: &ResolvedRing<'_>,
        run: &SideRun<'_>,
        usable: i64,
        names: &mut UniqueNames,
    ) -> Result<Vec<FillCell>, LayoutError> {
        let side = run.side;
        let attribute = self.catalog.separator_attribute();
        let separator = self.catalog.separator();

        let mut generated = Vec::new();
        let mut prev_end = 0;
        let mut prev = Boundary {
            name: ring.corner_name(side.start_corner()),
            is_pad: false,
        };
        let mut last_group: Option<&str> = None;
        let mut separated = false;

        let boundaries = run
            .cells
            .iter()
            .map(|cell| (cell.offset, cell.end(), Some(cell.instance)))
            .chain(std::iter::once((usable, usable, None)));

        for (gap_index, (start, end, instance)) in boundaries.enumerate() {
            let next = Boundary {
                name: instance.map_or_else(|| ring.corner_name(side.end_corner()), |i| i.name()),
                is_pad: instance.is_some_and(|i| i.kind() == InstanceKind::Pad),
            };
            let gap = start - prev_end;

            let required = if prev.is_pad && next.is_pad {
                self.pad_spacing
            } else {
                0
            };
            if gap < required {
                return Err(LayoutError::LayoutOverflow {
                    side,
                    before: prev.name.to_string(),
                    after: next.name.to_string(),
                    available: gap,
                    required,
                });
            }

            let group = instance
                .filter(|i| i.kind() == InstanceKind::Pad)
                .and_then(|i| i.attribute(attribute));
            let needs_separator = !separated
                && matches!((last_group, group), (Some(a), Some(b)) if a != b);

            let mut cursor = prev_end;
            if needs_separator {
                if gap < separator.width() {
                    return Err(LayoutError::SeparatorTooSmall {
                        side,
                        before: prev.name.to_string(),
                        after: next.name.to_string(),
                        available: gap,
                        required: separator.width(),
                    });
                }
                let name = names.claim(format!("sep_{side}_{gap_index}"));
                trace!(name = name.as_str(), offset = cursor; "Inserted separator");
                generated.push(FillCell {
                    name,
                    device: separator.device().to_string(),
                    kind: InstanceKind::Separator,
                    offset: cursor,
                    width: separator.width(),
                });
                cursor += separator.width();
            }

            let remaining = start - cursor;
            let cells = exact_fill(self.catalog, remaining).ok_or(LayoutError::UnfillableGap {
                side,
                start: cursor,
                end: start,
                length: remaining,
            })?;
            trace!(side:%, gap_index, gap, fillers = cells.len(); "Filled gap");
            for (seq, cell) in cells.into_iter().enumerate() {
                generated.push(FillCell {
                    name: names.claim(format!("fill_{side}_{gap_index}_{seq}")),
                    device: cell.device().to_string(),
                    kind: InstanceKind::Filler,
                    offset: cursor,
                    width: cell.width(),
                });
                cursor += cell.width();
            }

            match instance.map(|i| i.kind()) {
                Some(InstanceKind::Pad) => {
                    last_group = group;
                    separated = false;
                }
                Some(InstanceKind::Separator) => separated = true,
                _ => {}
            }
            prev_end = end;
            prev = next;
        }

        debug!(side:%, generated = generated.len(); "Side filled");
        Ok(generated)
    }
}

/// Selects catalog fillers whose widths sum exactly to `length`, widest
/// first.
///
/// Returns `None` if no combination of catalog widths reaches `length`.
/// A length of zero needs no cells.
pub fn exact_fill(catalog: &FillerCatalog, length: i64) -> Option<Vec<&FillerCell>> {
    if length == 0 {
        return Some(Vec::new());
    }
    let unit = catalog.width_gcd();
    if length < 0 || unit == 0 || length % unit != 0 {
        return None;
    }

    greedy_fill(catalog.fillers(), length).or_else(|| {
        trace!(length; "Greedy fill left a remainder, searching exhaustively");
        minimal_fill(catalog.fillers(), length, unit)
    })
}

fn greedy_fill(fillers: &[FillerCell], length: i64) -> Option<Vec<&FillerCell>> {
    let mut remaining = length;
    let mut cells = Vec::new();
    for cell in fillers {
        let count = remaining / cell.width();
        for _ in 0..count {
            cells.push(cell);
        }
        remaining -= count * cell.width();
    }
    (remaining == 0).then_some(cells)
}

/// Fewest-cells exact tiling, computed over `length / unit` steps.
///
/// `fillers` must be sorted widest first; ties in cell count keep the
/// wider choice. Long gaps are shortened with the widest cell first so the
/// table never covers more than `min * max + max` steps: every length past
/// `(min - 1) * (max - 1)` steps is reachable once widths are divided by
/// their gcd, so the shortened remainder stays fillable.
fn minimal_fill(fillers: &[FillerCell], length: i64, unit: i64) -> Option<Vec<&FillerCell>> {
    let widest = fillers.first()?;
    let widths: Vec<usize> = fillers
        .iter()
        .map(|cell| usize::try_from(cell.width() / unit).ok())
        .collect::<Option<_>>()?;
    let (max, min) = (*widths.first()?, *widths.last()?);
    let window = min.checked_mul(max)?.checked_add(max)?;

    let total = usize::try_from(length / unit).ok()?;
    let prefix = total.saturating_sub(window).div_ceil(max);
    let steps = total - prefix * max;

    // best[n] = (cell count, index of the last cell) for a tiling of n steps
    let mut best: Vec<Option<(usize, usize)>> = vec![None; steps + 1];
    best[0] = Some((0, usize::MAX));
    for n in 1..=steps {
        for (idx, &width) in widths.iter().enumerate() {
            let Some((count, _)) = n.checked_sub(width).and_then(|rest| best[rest]) else {
                continue;
            };
            if best[n].is_none_or(|(current, _)| count + 1 < current) {
                best[n] = Some((count + 1, idx));
            }
        }
    }

    let mut cells = vec![widest; prefix];
    let mut n = steps;
    while n > 0 {
        let (_, idx) = best[n]?;
        cells.push(&fillers[idx]);
        n -= widths[idx];
    }
    cells.sort_by(|a, b| b.width().cmp(&a.width()));
    Some(cells)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn catalog(widths: &[i64]) -> FillerCatalog {
        FillerCatalog::new(
            widths
                .iter()
                .map(|w| FillerCell::new(format!("F{w}"), *w))
                .collect(),
            FillerCell::new("SEP", 10),
        )
        .unwrap()
    }

    fn widths(cells: &[&FillerCell]) -> Vec<i64> {
        cells.iter().map(|cell| cell.width()).collect()
    }

    #[test]
    fn test_greedy_fill_uses_widest_cells() {
        let catalog = catalog(&[20, 10, 5]);
        assert_eq!(widths(&exact_fill(&catalog, 40).unwrap()), vec![20, 20]);
        assert_eq!(widths(&exact_fill(&catalog, 35).unwrap()), vec![20, 10, 5]);
        assert_eq!(exact_fill(&catalog, 0).unwrap().len(), 0);
    }

    #[test]
    fn test_unfillable_gap() {
        let catalog = catalog(&[30, 7]);
        assert!(exact_fill(&catalog, 40).is_none());

        let catalog = self::catalog(&[20, 10]);
        assert!(exact_fill(&catalog, 45).is_none());
        assert!(exact_fill(&catalog, -10).is_none());
    }

    #[test]
    fn test_fallback_finds_exact_tiling() {
        // Greedy takes 7 + 7 + 7 and is left with 3
        let catalog = catalog(&[7, 5]);
        assert_eq!(widths(&exact_fill(&catalog, 24).unwrap()), vec![7, 7, 5, 5]);

        // Greedy takes 30 + 7 and is left with 5
        let catalog = self::catalog(&[30, 7]);
        assert_eq!(
            widths(&exact_fill(&catalog, 42).unwrap()),
            vec![7, 7, 7, 7, 7, 7]
        );
        assert_eq!(widths(&exact_fill(&catalog, 37).unwrap()), vec![30, 7]);
    }

    #[test]
    fn test_fallback_minimizes_cell_count() {
        let catalog = catalog(&[7, 5, 3]);

        // Greedy is left with 1; no two-cell tiling exists
        assert_eq!(widths(&exact_fill(&catalog, 11).unwrap()), vec![5, 3, 3]);

        // 5 + 5 + 5 and 7 + 5 + 3 tie at three cells; the wider cell wins
        assert_eq!(widths(&exact_fill(&catalog, 15).unwrap()), vec![7, 5, 3]);

        let catalog = self::catalog(&[6, 4]);
        assert_eq!(widths(&exact_fill(&catalog, 8).unwrap()), vec![4, 4]);
    }

    #[test]
    fn test_fallback_on_long_gap() {
        // Greedy leaves 3 after the 7s; the table only covers the tail
        let catalog = catalog(&[7, 5]);
        let cells = exact_fill(&catalog, 7_003).unwrap();
        assert_eq!(cells.iter().map(|c| c.width()).sum::<i64>(), 7_003);
        assert_eq!(cells.iter().filter(|c| c.width() == 5).count(), 2);
        assert_eq!(cells.len(), 999 + 2);

        // Shared factor: widths 14 and 10 reduce to 7 and 5
        let catalog = self::catalog(&[14, 10]);
        let cells = exact_fill(&catalog, 14_006).unwrap();
        assert_eq!(cells.iter().map(|c| c.width()).sum::<i64>(), 14_006);
    }

    /// Independent reachability check: can `length` be written as a sum of
    /// `widths` at all?
    fn reachable(widths: &[i64], length: i64) -> bool {
        let length = length as usize;
        let mut reach = vec![false; length + 1];
        reach[0] = true;
        for n in 1..=length {
            reach[n] = widths
                .iter()
                .any(|&w| (w as usize) <= n && reach[n - w as usize]);
        }
        reach[length]
    }

    fn check_exact_fill_sums(mut ws: Vec<i64>, length: i64) -> Result<(), TestCaseError> {
        ws.sort_unstable();
        ws.dedup();
        let catalog = catalog(&ws);

        match exact_fill(&catalog, length) {
            Some(cells) => {
                prop_assert_eq!(cells.iter().map(|c| c.width()).sum::<i64>(), length);
                prop_assert!(cells.windows(2).all(|p| p[0].width() >= p[1].width()));
            }
            None => prop_assert!(!reachable(&ws, length)),
        }
        Ok(())
    }

    fn check_unit_catalog_always_fills(length: i64) -> Result<(), TestCaseError> {
        let catalog = FillerCatalog::default();
        let cells = exact_fill(&catalog, length);
        prop_assert!(cells.is_some());
        let cells = cells.unwrap_or_default();
        prop_assert_eq!(cells.iter().map(|c| c.width()).sum::<i64>(), length);
        Ok(())
    }

    proptest! {
        #[test]
        fn exact_fill_sums_to_length(
            ws in prop::collection::vec(1i64..40, 1..5),
            length in 0i64..400,
        ) {
            check_exact_fill_sums(ws, length)?;
        }

        #[test]
        fn unit_catalog_always_fills(length in 0i64..2000) {
            check_unit_catalog_always_fills(length)?;
        }
    }
}
