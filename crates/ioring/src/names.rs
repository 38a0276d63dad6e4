//! Unique names for generated cells.

use std::collections::HashSet;

/// Hands out names that collide with neither the intent graph nor earlier
/// generated cells.
#[derive(Debug, Default)]
pub(crate) struct UniqueNames {
    taken: HashSet<String>,
}

impl UniqueNames {
    pub fn new<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            taken: names.into_iter().map(str::to_string).collect(),
        }
    }

    /// Claims `base`, or `base_1`, `base_2`, ... if it is taken.
    pub fn claim(&mut self, base: String) -> String {
        if self.taken.insert(base.clone()) {
            return base;
        }
        let mut suffix = 1;
        loop {
            let candidate = format!("{base}_{suffix}");
            if self.taken.insert(candidate.clone()) {
                return candidate;
            }
            suffix += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claim_avoids_collisions() {
        let mut names = UniqueNames::new(["fill_top_0_0", "fill_top_0_0_1"]);

        assert_eq!(names.claim("fill_top_0_0".to_string()), "fill_top_0_0_2");
        assert_eq!(names.claim("sep_top_0".to_string()), "sep_top_0");
        assert_eq!(names.claim("sep_top_0".to_string()), "sep_top_0_1");
    }
}
