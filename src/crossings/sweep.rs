use geo::Coordinate;
use itertools::Itertools;
use log::{debug, trace, warn};
use num_traits::Float;
use slab::Slab;
use smallvec::{smallvec, SmallVec};

use super::{
    detect::{crosses, crossing_point, schedule_if_new, Scheduled},
    Crossings,
};
use crate::{
    active::ActiveSegments,
    events::{Event, EventKind, EventQueue, SweepPoint},
    Segment, SweepConfig, SweepFloat,
};

/// Segments known to cross at one recorded crossing.
///
/// Pairs whose crossing point was dropped as a duplicate of the
/// recorded one join it here, so that they are swapped along with it.
#[derive(Debug)]
struct Meeting {
    keys: SmallVec<[usize; 4]>,
    swept: bool,
}

/// Sweep algorithm for detecting all crossings.
///
/// Implements the [Bentley-Ottman] sweep. Maintains a heap of
/// end-points and crossings, the currently active segments, and the
/// sweep position. Each call to [`Sweep::next_event`] processes
/// exactly one event; the sweep is done when the heap is empty.
///
/// Crossings are recorded as soon as they are detected, which is
/// before the sweep reaches them.
///
/// [Bentley-Ottman]: //en.wikipedia.org/wiki/Bentley%E2%80%93Ottmann_algorithm
pub struct Sweep<T: SweepFloat> {
    segments: Slab<Segment<T>>,
    events: EventQueue<T>,
    active: ActiveSegments<T>,
    found: Crossings<T>,
    meetings: Vec<Meeting>,
    config: SweepConfig<T>,
    sweep_x: T,
    /// Position at which the order of the active segments is valid.
    /// It runs ahead of `sweep_x` after a crossing.
    order_x: T,
}

impl<T: SweepFloat> FromIterator<Segment<T>> for Sweep<T> {
    fn from_iter<I: IntoIterator<Item = Segment<T>>>(iter: I) -> Self {
        Sweep::new(iter)
    }
}

impl<T: SweepFloat> Sweep<T> {
    pub fn new<I: IntoIterator<Item = Segment<T>>>(iter: I) -> Self {
        Sweep::with_config(iter, SweepConfig::default())
    }

    pub fn with_config<I>(iter: I, config: SweepConfig<T>) -> Self
    where
        I: IntoIterator<Item = Segment<T>>,
    {
        let iter = iter.into_iter();
        let size = {
            let (min_size, max_size) = iter.size_hint();
            max_size.unwrap_or(min_size)
        };

        let mut sweep = Sweep {
            segments: Slab::with_capacity(size),
            events: EventQueue::with_capacity(2 * size),
            active: ActiveSegments::new(config.epsilon()),
            found: Crossings::new(config.epsilon()),
            meetings: Vec::new(),
            config,
            sweep_x: Float::neg_infinity(),
            order_x: Float::neg_infinity(),
        };
        for segment in iter {
            sweep.create_segment(segment);
        }
        debug!("sweep created with {} events", sweep.events.len());
        sweep
    }

    /// Store a segment, and add its end-point events into the heap.
    fn create_segment(&mut self, segment: Segment<T>) -> usize {
        let key = self.segments.insert(segment);
        self.events.push(Event {
            point: segment.left_point(),
            kind: EventKind::LeftEndpoint(key),
        });
        self.events.push(Event {
            point: segment.right_point(),
            kind: EventKind::RightEndpoint(key),
        });
        key
    }

    /// Process the next event in heap, and return its point.
    #[inline]
    pub fn next_event(&mut self) -> Option<Coordinate<T>> {
        self.events.pop_min().map(|event| {
            let pt = event.point.coord();
            self.handle_event(event);
            pt
        })
    }

    /// Peek and return the next point in the sweep.
    #[inline]
    pub fn peek_point(&self) -> Option<Coordinate<T>> {
        self.events.peek_point().map(|pt| pt.coord())
    }

    /// Whether all events have been processed.
    #[inline]
    pub fn is_done(&self) -> bool {
        self.events.is_empty()
    }

    /// Process all remaining events.
    pub fn run(mut self) -> Crossings<T> {
        while self.next_event().is_some() {}
        debug!("sweep done with {} crossings", self.found.len());
        self.found
    }

    /// Crossings found so far.
    #[inline]
    pub fn crossings(&self) -> &Crossings<T> {
        &self.found
    }

    /// The current sweep position; negative infinity before the first
    /// event.
    #[inline]
    pub fn sweep_x(&self) -> T {
        self.sweep_x
    }

    #[inline]
    pub fn config(&self) -> &SweepConfig<T> {
        &self.config
    }

    /// Handle one event. Returns the number of newly scheduled
    /// crossings.
    fn handle_event(&mut self, event: Event<T>) -> usize {
        trace!("handling event: {:?}", event);
        match event.kind {
            EventKind::LeftEndpoint(key) => self.handle_left(key, event.point),
            EventKind::RightEndpoint(key) => self.handle_right(key, event.point),
            EventKind::Intersection(k1, k2) => self.handle_crossing(k1, k2, event.point),
        }
    }

    fn handle_left(&mut self, key: usize, point: SweepPoint<T>) -> usize {
        let x = point.x();
        self.sweep_x = x;
        self.order_x = x;
        self.active.insert(key, x, &self.segments);
        trace!("{} segments active", self.active.len());

        let prev = self.active.prev_key(key, x, &self.segments);
        let next = self.active.next_key(key, x, &self.segments);
        let mut scheduled = 0;
        for adj_key in prev.into_iter().chain(next) {
            if self.check_pair(key, adj_key, x) {
                scheduled += 1;
            }
        }
        scheduled
    }

    fn handle_right(&mut self, key: usize, point: SweepPoint<T>) -> usize {
        let x = point.x();
        let idx = self.active.locate(key, self.order_x, &self.segments);
        self.sweep_x = x;
        self.order_x = x;
        self.segments.remove(key);

        let idx = match idx {
            Some(idx) => idx,
            None => {
                warn!("right end-point of inactive segment {}", key);
                return 0;
            }
        };
        // Neighbours must be read before the segment leaves.
        let prev = idx.checked_sub(1).and_then(|i| self.active.key_at(i));
        let next = self.active.key_at(idx + 1);
        self.active.remove_at(idx);

        match (prev, next) {
            (Some(prev_key), Some(next_key)) => {
                self.check_pair(prev_key, next_key, x) as usize
            }
            _ => 0,
        }
    }

    /// Swap the order of segments at their crossing.
    ///
    /// The segments of the event, those that joined its crossing, and
    /// the active segments passing within tolerance of the crossing
    /// point are removed, and inserted again just past the crossing so
    /// that they compare in their new order. The new lowest of them is
    /// then checked against the one below it, and the new highest one
    /// against the one above it. The sweep position is restored to the
    /// crossing afterwards.
    fn handle_crossing(&mut self, k1: usize, k2: usize, point: SweepPoint<T>) -> usize {
        let (x, y) = (point.x(), point.y());
        let mut seeds: SmallVec<[usize; 4]> = smallvec![k1, k2];
        let idx = self.found.locate(point.coord());
        if let Some(meeting) = idx.and_then(|idx| self.meetings.get_mut(idx)) {
            meeting.swept = true;
            seeds.extend(meeting.keys.iter().copied());
        }

        let mut keys: SmallVec<[usize; 4]> = SmallVec::new();
        for seed in seeds {
            if keys.contains(&seed) {
                continue;
            }
            for key in self.active.through(seed, (x, y), self.order_x, &self.segments) {
                if !keys.contains(&key) {
                    keys.push(key);
                }
            }
        }
        if keys.len() < 2 {
            // A crossing computed just past the end of a segment; the
            // segment already left.
            debug!("skipping crossing at {:?} of an ended segment", point);
            return 0;
        }
        if keys.len() > 2 {
            debug!("{} segments meet at {:?}", keys.len(), point);
        }

        for &key in &keys {
            self.remove_active(key);
        }
        let past = self.step_past(x);
        self.sweep_x = past;
        self.order_x = past;
        for &key in &keys {
            self.active.insert(key, past, &self.segments);
        }

        let mut pairs: SmallVec<[(usize, usize); 2]> = SmallVec::new();
        let bounds = keys
            .iter()
            .filter_map(|&key| self.active.locate(key, past, &self.segments))
            .minmax()
            .into_option();
        if let Some((lowest, highest)) = bounds {
            let below = lowest.checked_sub(1).and_then(|pos| self.active.key_at(pos));
            let above = self.active.key_at(highest + 1);
            pairs.extend(below.zip(self.active.key_at(lowest)));
            pairs.extend(self.active.key_at(highest).zip(above));
        }

        let mut scheduled = 0;
        for (a, b) in pairs {
            if self.check_pair(a, b, x) {
                scheduled += 1;
            }
        }
        self.sweep_x = x;
        scheduled
    }

    /// A sweep position just past `x`, at which segments crossing at
    /// `x` are ordered as they are to the right of the crossing.
    ///
    /// The configured lag is capped to half the distance to the next
    /// event: no other pending crossing may lie between `x` and the
    /// returned position. If the next event is at `x` as well, the
    /// position is `x` itself and the tie-break on slope orders the
    /// crossing segments.
    fn step_past(&self, x: T) -> T {
        let two = T::one() + T::one();
        let lag = match self.events.peek_point() {
            Some(next) if next.x() > x => Float::min(self.config.lag(), (next.x() - x) / two),
            Some(_) => T::zero(),
            None => self.config.lag(),
        };
        x + lag
    }

    /// Remove `key` from the active segments, looking it up by its
    /// order at the position the order is valid at. A miss there falls
    /// back to a scan outwards from where it should be.
    fn remove_active(&mut self, key: usize) -> bool {
        if self.active.remove(key, self.order_x, &self.segments) {
            return true;
        }
        warn!(
            "segment {} not found by order at {:?}, scanning",
            key, self.order_x
        );
        match self.active.locate(key, self.order_x, &self.segments) {
            Some(idx) => {
                self.active.remove_at(idx);
                true
            }
            None => false,
        }
    }

    /// Check whether two segments cross at or past `floor_x`, and
    /// schedule the crossing if it is new.
    ///
    /// If the crossing point is already known, the pair joins that
    /// crossing instead. When that crossing was already swept, it is
    /// queued again so that the pair is swapped too.
    fn check_pair(&mut self, a: usize, b: usize, floor_x: T) -> bool {
        let (s1, s2) = (self.segments.get(a), self.segments.get(b));
        if !crosses(s1, s2) {
            return false;
        }
        let (s1, s2) = match (s1, s2) {
            (Some(s1), Some(s2)) => (s1, s2),
            _ => return false,
        };

        let epsilon = self.config.epsilon();
        let point = match crossing_point(s1, s2, epsilon) {
            Some(pt) => pt,
            None => return false,
        };
        if point.x < floor_x - epsilon {
            trace!("crossing at {:?} is behind the sweep", point);
            return false;
        }
        match schedule_if_new(point, (a, s1), (b, s2), &mut self.events, &mut self.found) {
            Scheduled::New(idx) => {
                debug_assert_eq!(idx, self.meetings.len());
                self.meetings.push(Meeting {
                    keys: smallvec![a, b],
                    swept: false,
                });
                true
            }
            Scheduled::Known(idx) => {
                self.join_meeting(idx, a, b);
                false
            }
            Scheduled::Rejected => false,
        }
    }

    fn join_meeting(&mut self, idx: usize, a: usize, b: usize) {
        let meeting = match self.meetings.get_mut(idx) {
            Some(meeting) => meeting,
            None => return,
        };
        let mut joined = false;
        for key in [a, b] {
            if !meeting.keys.contains(&key) {
                meeting.keys.push(key);
                joined = true;
            }
        }
        if !(joined && meeting.swept) {
            return;
        }
        meeting.swept = false;

        let point = self.found.get(idx).and_then(|c| SweepPoint::new(c.point));
        if let Some(point) = point {
            debug!("segments {} and {} join the swept crossing at {:?}", a, b, point);
            self.events.push(Event {
                point,
                kind: EventKind::Intersection(a, b),
            });
        }
    }
}
