use std::{cmp::Ordering, collections::BinaryHeap};

use geo::{CoordFloat, Coordinate};

/// A sweep event for the crossings sweep.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Event<T: CoordFloat> {
    pub point: SweepPoint<T>,
    pub kind: EventKind,
}

/// Assert total equality
impl<T: CoordFloat> Eq for Event<T> {}

/// Ordering for use with a max-heap (`BinaryHeap`): the smallest
/// point is the greatest event. Events at the same point are ordered
/// by kind, and then by the segment keys they refer to, so that the
/// sweep is deterministic.
impl<T: CoordFloat> PartialOrd for Event<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: CoordFloat> Ord for Event<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.point
            .cmp(&other.point)
            .then_with(|| self.kind.cmp(&other.kind))
            .reverse()
    }
}

/// Kind of event, carrying the keys of the segments it concerns.
///
/// The ordering of the variants is important for the algorithm. At a
/// common point, segments ending there are removed before crossings
/// are swapped, and crossings are swapped before new segments are
/// inserted; this keeps the active segments totally ordered when
/// end-points touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) enum EventKind {
    RightEndpoint(usize),
    Intersection(usize, usize),
    LeftEndpoint(usize),
}

/// Min-priority queue of events, ordered by sweep point.
///
/// Does no de-duplication: the caller must not push the same
/// intersection twice.
#[derive(Debug)]
pub(crate) struct EventQueue<T: CoordFloat> {
    heap: BinaryHeap<Event<T>>,
}

impl<T: CoordFloat> EventQueue<T> {
    pub fn with_capacity(size: usize) -> Self {
        EventQueue {
            heap: BinaryHeap::with_capacity(size),
        }
    }

    #[inline]
    pub fn push(&mut self, event: Event<T>) {
        self.heap.push(event);
    }

    /// Remove and return the event with the smallest point.
    #[inline]
    pub fn pop_min(&mut self) -> Option<Event<T>> {
        self.heap.pop()
    }

    #[inline]
    pub fn peek_point(&self) -> Option<SweepPoint<T>> {
        self.heap.peek().map(|e| e.point)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }
}

/// Wraps a [`Coordinate`] to support lexicographic ordering.
///
/// The ordering is by `x` and then by `y`. Implements `PartialOrd`,
/// `Ord` and `Eq` even though `Coordinate` doesn't implement these.
/// This is necessary to support insertion to ordered collections,
/// especially `BinaryHeap` as required by sweep algorithms.
///
/// A sweep point can only be constructed from finite coordinates, so
/// the ordering is total.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepPoint<T: CoordFloat>(Coordinate<T>);

impl<T: CoordFloat> SweepPoint<T> {
    /// Create from `Coordinate`, or `None` if any component is not
    /// finite.
    pub fn new(coord: Coordinate<T>) -> Option<Self> {
        if coord.x.is_finite() && coord.y.is_finite() {
            Some(SweepPoint(coord))
        } else {
            None
        }
    }

    #[inline]
    pub fn coord(&self) -> Coordinate<T> {
        self.0
    }

    #[inline]
    pub fn x(&self) -> T {
        self.0.x
    }

    #[inline]
    pub fn y(&self) -> T {
        self.0.y
    }
}

/// Implement lexicographic ordering by `x` and then by `y`
/// coordinate.
impl<T: CoordFloat> PartialOrd for SweepPoint<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Components are finite, so `partial_cmp` on them never fails.
impl<T: CoordFloat> Ord for SweepPoint<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .x
            .partial_cmp(&other.0.x)
            .unwrap_or(Ordering::Equal)
            .then_with(|| self.0.y.partial_cmp(&other.0.y).unwrap_or(Ordering::Equal))
    }
}

/// We derive `Eq` manually to not require `T: Eq`.
impl<T: CoordFloat> Eq for SweepPoint<T> {}

#[cfg(test)]
mod tests {
    use std::iter::from_fn;

    use super::*;

    fn pt(x: f64, y: f64) -> SweepPoint<f64> {
        SweepPoint::new(Coordinate { x, y }).unwrap()
    }

    #[test]
    fn test_sweep_point_ordering() {
        let p1 = pt(0., 0.);
        let p2 = pt(1., 0.);
        let p3 = pt(1., 1.);
        let p4 = pt(1., 1.);

        assert!(p1 < p2);
        assert!(p1 < p3);
        assert!(p2 < p3);
        assert!(p3 <= p4);
        assert_eq!(p3, p4);
    }

    #[test]
    fn test_sweep_point_rejects_non_finite() {
        assert!(SweepPoint::new(Coordinate { x: f64::NAN, y: 0. }).is_none());
        assert!(SweepPoint::new(Coordinate { x: 0., y: f64::INFINITY }).is_none());
    }

    #[test]
    fn test_event_ordering() {
        let events = vec![
            Event {
                point: pt(1., 1.),
                kind: EventKind::RightEndpoint(3),
            },
            Event {
                point: pt(1., 0.),
                kind: EventKind::LeftEndpoint(2),
            },
            Event {
                point: pt(0., 0.),
                kind: EventKind::LeftEndpoint(0),
            },
            Event {
                point: pt(1., 0.),
                kind: EventKind::RightEndpoint(1),
            },
            Event {
                point: pt(1., 0.),
                kind: EventKind::Intersection(4, 5),
            },
        ];

        let mut queue = EventQueue::with_capacity(events.len());
        for e in events {
            queue.push(e);
        }
        assert_eq!(queue.len(), 5);

        let order: Vec<_> = from_fn(|| queue.pop_min()).map(|e| e.kind).collect();
        assert_eq!(
            order,
            vec![
                EventKind::LeftEndpoint(0),
                EventKind::RightEndpoint(1),
                EventKind::Intersection(4, 5),
                EventKind::LeftEndpoint(2),
                EventKind::RightEndpoint(3),
            ]
        );
        assert!(queue.is_empty());
    }

    #[test]
    fn test_push_while_draining() {
        let mut queue = EventQueue::with_capacity(2);
        queue.push(Event {
            point: pt(0., 0.),
            kind: EventKind::LeftEndpoint(0),
        });
        queue.push(Event {
            point: pt(4., 0.),
            kind: EventKind::RightEndpoint(0),
        });

        let first = queue.pop_min().unwrap();
        assert_eq!(first.kind, EventKind::LeftEndpoint(0));

        queue.push(Event {
            point: pt(2., 1.),
            kind: EventKind::Intersection(0, 1),
        });
        assert_eq!(queue.peek_point(), Some(pt(2., 1.)));
        assert_eq!(queue.pop_min().unwrap().kind, EventKind::Intersection(0, 1));
        assert_eq!(queue.pop_min().unwrap().kind, EventKind::RightEndpoint(0));
        assert!(queue.pop_min().is_none());
    }
}
