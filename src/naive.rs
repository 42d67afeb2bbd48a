//! Brute-force crossing search over all pairs of segments.
//!
//! Quadratic in the number of segments. Uses the same predicates and
//! the same collector as the sweep, so the two agree on what counts as
//! a crossing and on which points are duplicates.
use itertools::Itertools;

use crate::{
    crossings::{crossing_point, crosses, Crossings},
    Segment, SweepConfig, SweepFloat,
};

/// Crossing point of a pair, if the pair properly crosses.
fn pair_crossing<T: SweepFloat>(
    s1: &Segment<T>,
    s2: &Segment<T>,
    config: &SweepConfig<T>,
) -> Option<geo::Coordinate<T>> {
    if !crosses(Some(s1), Some(s2)) {
        return None;
    }
    crossing_point(s1, s2, config.epsilon())
}

/// Find every crossing by checking each pair of segments, in input
/// order.
pub fn find_crossings<T: SweepFloat>(
    segments: &[Segment<T>],
    config: SweepConfig<T>,
) -> Crossings<T> {
    let mut found = Crossings::new(config.epsilon());
    for (s1, s2) in segments.iter().tuple_combinations() {
        if let Some(pt) = pair_crossing(s1, s2, &config) {
            // A known point is a concurrent crossing; keep the first pair.
            let _ = found.insert(pt, s1.id(), s2.id());
        }
    }
    found
}

/// Whether any pair of segments crosses.
pub fn has_crossing<T: SweepFloat>(segments: &[Segment<T>], config: SweepConfig<T>) -> bool {
    segments
        .iter()
        .tuple_combinations()
        .any(|(s1, s2)| pair_crossing(s1, s2, &config).is_some())
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::crossings::tests::segments;

    #[test]
    fn test_naive() {
        let input = segments(&[
            [(0., 0.), (10., 10.)],
            [(0., 10.), (10., 0.)],
            [(0., 5.), (10., 5.)],
            [(20., 0.), (30., 10.)],
            [(20., 10.), (30., 0.)],
        ]);
        let config = SweepConfig::default();
        assert!(has_crossing(&input, config));

        let found = find_crossings(&input, config);
        assert_eq!(found.len(), 2);
        let first = found.get(0).unwrap();
        assert_eq!(first.segments, (0, 1));
        assert_relative_eq!(first.point.x, 5.);
        let second = found.get(1).unwrap();
        assert_eq!(second.segments, (3, 4));
        assert_relative_eq!(second.point.x, 25.);
        assert_relative_eq!(second.point.y, 5.);
    }

    #[test]
    fn test_naive_no_crossing() {
        let config = SweepConfig::default();
        let input = segments(&[[(0., 0.), (10., 10.)], [(10., 10.), (20., 0.)]]);
        assert!(!has_crossing(&input, config));
        assert!(find_crossings(&input, config).is_empty());
        assert!(!has_crossing::<f64>(&[], config));
    }
}
