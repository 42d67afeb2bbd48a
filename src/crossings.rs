use std::fmt;

use geo::Coordinate;
use rstar::{primitives::PointWithData, RTree};

use crate::{Segment, SweepFloat};

mod detect;
pub use detect::{crossing_point, crosses};

mod sweep;
pub use sweep::Sweep;

/// A crossing point, and the ids of the pair of segments that produced
/// it (smaller id first).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Crossing<T: SweepFloat> {
    pub point: Coordinate<T>,
    pub segments: (usize, usize),
}

impl<T: SweepFloat + fmt::Display> fmt::Display for Crossing<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}) between segments {} and {}",
            self.point.x, self.point.y, self.segments.0, self.segments.1
        )
    }
}

/// Crossings collected during a sweep, in the order they were
/// discovered.
///
/// Points within `epsilon` (euclidean distance) of an already recorded
/// crossing are treated as the same crossing and are not recorded
/// again. Each recorded crossing has exactly one entry in the spatial
/// index used for this check, tagged with its index in discovery
/// order.
pub struct Crossings<T: SweepFloat> {
    found: Vec<Crossing<T>>,
    seen: RTree<PointWithData<usize, [T; 2]>>,
    epsilon: T,
}

impl<T: SweepFloat> fmt::Debug for Crossings<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Crossings")
            .field("found", &self.found)
            .field("epsilon", &self.epsilon)
            .finish()
    }
}

impl<T: SweepFloat> Crossings<T> {
    pub(crate) fn new(epsilon: T) -> Self {
        Crossings {
            found: Vec::new(),
            seen: RTree::new(),
            epsilon,
        }
    }

    /// Record a crossing of segments `a` and `b` at `point`, and
    /// return its index. If the point is already known, nothing is
    /// recorded and the index of the known crossing is the error.
    pub(crate) fn insert(
        &mut self,
        point: Coordinate<T>,
        a: usize,
        b: usize,
    ) -> Result<usize, usize> {
        if let Some(idx) = self.locate(point) {
            return Err(idx);
        }
        let idx = self.found.len();
        self.seen.insert(PointWithData::new(idx, [point.x, point.y]));
        self.found.push(Crossing {
            point,
            segments: if a <= b { (a, b) } else { (b, a) },
        });
        Ok(idx)
    }

    /// Index of the recorded crossing within tolerance of `point`.
    pub(crate) fn locate(&self, point: Coordinate<T>) -> Option<usize> {
        self.seen
            .locate_within_distance([point.x, point.y], self.epsilon * self.epsilon)
            .next()
            .map(|entry| entry.data)
    }

    /// Whether a crossing within tolerance of `point` was recorded.
    pub fn contains(&self, point: Coordinate<T>) -> bool {
        self.locate(point).is_some()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.found.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.found.is_empty()
    }

    #[inline]
    pub fn get(&self, idx: usize) -> Option<&Crossing<T>> {
        self.found.get(idx)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Crossing<T>> {
        self.found.iter()
    }

    /// The crossing points, in discovery order.
    pub fn points(&self) -> impl Iterator<Item = Coordinate<T>> + '_ {
        self.found.iter().map(|c| c.point)
    }

    pub fn into_vec(self) -> Vec<Crossing<T>> {
        self.found
    }
}

impl<T: SweepFloat> IntoIterator for Crossings<T> {
    type Item = Crossing<T>;
    type IntoIter = std::vec::IntoIter<Crossing<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.found.into_iter()
    }
}

impl<'a, T: SweepFloat> IntoIterator for &'a Crossings<T> {
    type Item = &'a Crossing<T>;
    type IntoIter = std::slice::Iter<'a, Crossing<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.found.iter()
    }
}

/// Iterator that yields crossings as the sweep discovers them.
///
/// Discovery order follows the sweep: a crossing is yielded once the
/// events preceding its detection are processed, which may be before
/// crossings with a smaller `x` are found. Construct it by
/// `collect`-ing an iterator of [`Segment`]s.
///
/// The implementation uses the [Bentley-Ottman] algorithm: each event
/// costs O(log n) comparisons, plus moving the tail of the sorted
/// vector of active segments. This is faster than a brute-force search
/// across all pairs of input segments if k, the number of crossings,
/// is small compared to n^2.
///
/// [Bentley-Ottman]: //en.wikipedia.org/wiki/Bentley%E2%80%93Ottmann_algorithm
pub struct CrossingsIter<T: SweepFloat> {
    sweep: Sweep<T>,
    yielded: usize,
}

impl<T: SweepFloat> From<Sweep<T>> for CrossingsIter<T> {
    fn from(sweep: Sweep<T>) -> Self {
        CrossingsIter { sweep, yielded: 0 }
    }
}

impl<T: SweepFloat> FromIterator<Segment<T>> for CrossingsIter<T> {
    fn from_iter<I: IntoIterator<Item = Segment<T>>>(iter: I) -> Self {
        Sweep::new(iter).into()
    }
}

impl<T: SweepFloat> CrossingsIter<T> {
    /// All crossings discovered so far.
    pub fn crossings(&self) -> &Crossings<T> {
        self.sweep.crossings()
    }
}

impl<T: SweepFloat> Iterator for CrossingsIter<T> {
    type Item = Crossing<T>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(crossing) = self.sweep.crossings().get(self.yielded) {
                self.yielded += 1;
                return Some(*crossing);
            }
            self.sweep.next_event()?;
        }
    }
}

/// Find every crossing among `segments`.
///
/// Each distinct crossing point (up to the default tolerance) is
/// reported once, with one pair of segments crossing there.
pub fn find_crossings<T, I>(segments: I) -> Crossings<T>
where
    T: SweepFloat,
    I: IntoIterator<Item = Segment<T>>,
{
    Sweep::new(segments).run()
}

/// Whether any two of `segments` cross. Stops at the first crossing
/// found.
pub fn has_crossing<T, I>(segments: I) -> bool
where
    T: SweepFloat,
    I: IntoIterator<Item = Segment<T>>,
{
    CrossingsIter::from_iter(segments).next().is_some()
}
