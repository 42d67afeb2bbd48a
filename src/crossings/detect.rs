use geo::Coordinate;
use log::{debug, trace};
use num_traits::Float;

use super::Crossings;
use crate::{
    events::{Event, EventKind, EventQueue, SweepPoint},
    Segment, SweepFloat,
};

/// Whether two segments properly cross.
///
/// The end-points of each segment must lie strictly on opposite sides
/// of the other's supporting line. Touching at an end-point or
/// overlapping collinearly is not a crossing. Returns `false` if either
/// segment is absent, which is convenient for neighbour queries at the
/// boundary of the active segments.
pub fn crosses<T: SweepFloat>(s1: Option<&Segment<T>>, s2: Option<&Segment<T>>) -> bool {
    match (s1, s2) {
        (Some(s1), Some(s2)) => s1.separates(s2) && s2.separates(s1),
        _ => false,
    }
}

/// Intersection of the supporting lines of two segments.
///
/// Returns `None` if the lines are parallel, that is if the sine of
/// the angle between them is within `epsilon` of zero, or if the
/// solution is not finite. The angle test does not depend on the
/// scale of the coordinates.
pub fn crossing_point<T: SweepFloat>(
    s1: &Segment<T>,
    s2: &Segment<T>,
    epsilon: T,
) -> Option<Coordinate<T>> {
    let (p1, p3) = (s1.left(), s2.left());
    let d1 = s1.right() - p1;
    let d2 = s2.right() - p3;

    let det = d1.x * d2.y - d1.y * d2.x;
    let norms = Float::hypot(d1.x, d1.y) * Float::hypot(d2.x, d2.y);
    if Float::abs(det) <= epsilon * norms {
        return None;
    }

    let r = p3 - p1;
    let t = (r.x * d2.y - r.y * d2.x) / det;
    let x = p1.x + t * d1.x;
    let y = p1.y + t * d1.y;
    if x.is_finite() && y.is_finite() {
        Some(Coordinate { x, y })
    } else {
        None
    }
}

/// Outcome of [`schedule_if_new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Scheduled {
    /// A new crossing, at this index in discovery order.
    New(usize),
    /// The point matched the known crossing at this index.
    Known(usize),
    /// The point is not finite.
    Rejected,
}

/// Record the crossing of the segments at keys `k1` and `k2`, and
/// queue an intersection event for it, unless a crossing within
/// tolerance of `point` is already known.
pub(crate) fn schedule_if_new<T: SweepFloat>(
    point: Coordinate<T>,
    (k1, s1): (usize, &Segment<T>),
    (k2, s2): (usize, &Segment<T>),
    events: &mut EventQueue<T>,
    found: &mut Crossings<T>,
) -> Scheduled {
    let sweep_point = match SweepPoint::new(point) {
        Some(pt) => pt,
        None => return Scheduled::Rejected,
    };
    match found.insert(point, s1.id(), s2.id()) {
        Ok(idx) => {
            debug!("found crossing of {} and {} at {:?}", s1.id(), s2.id(), point);
            events.push(Event {
                point: sweep_point,
                kind: EventKind::Intersection(k1, k2),
            });
            Scheduled::New(idx)
        }
        Err(idx) => {
            trace!(
                "crossing of {} and {} at {:?} is already known",
                s1.id(),
                s2.id(),
                point
            );
            Scheduled::Known(idx)
        }
    }
}
