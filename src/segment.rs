use std::cmp::Ordering;

use geo::{
    kernels::{HasKernel, Kernel, Orientation},
    Coordinate, Line,
};

use crate::{error::SegmentError, events::SweepPoint, SweepFloat};

/// An input line segment with a stable identity.
///
/// The end-points are stored ordered by `x`: [`Segment::left`] always
/// has the strictly smaller `x`-coordinate. Vertical segments have no
/// height at a sweep position and are rejected on construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment<T: SweepFloat> {
    id: usize,
    left: SweepPoint<T>,
    right: SweepPoint<T>,
}

impl<T: SweepFloat> Segment<T> {
    /// Create a segment from a line, ordering the end-points by `x`.
    pub fn new(id: usize, line: Line<T>) -> Result<Self, SegmentError> {
        let start = SweepPoint::new(line.start).ok_or(SegmentError::NonFinite { id })?;
        let end = SweepPoint::new(line.end).ok_or(SegmentError::NonFinite { id })?;
        let (left, right) = match start.x().partial_cmp(&end.x()) {
            Some(Ordering::Less) => (start, end),
            Some(Ordering::Greater) => (end, start),
            _ => return Err(SegmentError::Vertical { id }),
        };
        Ok(Segment { id, left, right })
    }

    /// Create segments from lines, using the position of each line
    /// as its id.
    pub fn from_lines<I>(lines: I) -> Result<Vec<Self>, SegmentError>
    where
        I: IntoIterator<Item = Line<T>>,
    {
        lines
            .into_iter()
            .enumerate()
            .map(|(id, line)| Segment::new(id, line))
            .collect()
    }

    #[inline]
    pub fn id(&self) -> usize {
        self.id
    }

    /// The end-point with the smaller `x`.
    #[inline]
    pub fn left(&self) -> Coordinate<T> {
        self.left.coord()
    }

    /// The end-point with the larger `x`.
    #[inline]
    pub fn right(&self) -> Coordinate<T> {
        self.right.coord()
    }

    #[inline]
    pub fn line(&self) -> Line<T> {
        Line::new(self.left.coord(), self.right.coord())
    }

    #[inline]
    pub(crate) fn left_point(&self) -> SweepPoint<T> {
        self.left
    }

    #[inline]
    pub(crate) fn right_point(&self) -> SweepPoint<T> {
        self.right
    }

    /// Whether the closed `x`-span of the segment contains `x`.
    #[inline]
    pub fn spans(&self, x: T) -> bool {
        self.left.x() <= x && x <= self.right.x()
    }

    pub fn slope(&self) -> T {
        (self.right.y() - self.left.y()) / (self.right.x() - self.left.x())
    }

    /// Height of the supporting line at `x`.
    ///
    /// This is a linear interpolation between the end-points, and an
    /// extrapolation if `x` is outside the span.
    pub fn height_at(&self, x: T) -> T {
        self.left.y() + (x - self.left.x()) * self.slope()
    }

    /// Orientation of `point` relative to the segment directed from
    /// left to right: counter-clockwise means above.
    #[inline]
    pub fn orientation(&self, point: Coordinate<T>) -> Orientation {
        <T as HasKernel>::Ker::orient2d(self.left.coord(), self.right.coord(), point)
    }

    /// Whether the two end-points of `other` lie strictly on opposite
    /// sides of the supporting line of `self`.
    pub(crate) fn separates(&self, other: &Self) -> bool {
        matches!(
            (self.orientation(other.left()), self.orientation(other.right())),
            (Orientation::Clockwise, Orientation::CounterClockwise)
                | (Orientation::CounterClockwise, Orientation::Clockwise)
        )
    }
}

impl<T: SweepFloat> TryFrom<(usize, Line<T>)> for Segment<T> {
    type Error = SegmentError;

    fn try_from((id, line): (usize, Line<T>)) -> Result<Self, Self::Error> {
        Segment::new(id, line)
    }
}
