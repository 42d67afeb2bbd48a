//! Detects and enumerates crossings among a set of line segments.
//!
//! This is an implementation of the [Bentley-Ottman] plane sweep. A
//! vertical line sweeps the plane from left to right, stopping at
//! segment end-points and at crossings. The segments under the line
//! are kept ordered bottom to top, and only segments that become
//! adjacent in this order are tested against each other. This finds
//! all `k` crossings among `n` segments with far fewer pair tests than
//! the brute-force search in [`naive`] when `k` is small compared to
//! `n^2`.
//!
//! Crossings are proper crossings: two segments that touch at an
//! end-point, or overlap collinearly, do not cross. Crossing points
//! closer than the configured tolerance are reported once.
//!
//! ## Usage
//!
//! Build [`Segment`]s from [`Line`]s, then use [`find_crossings`] to
//! enumerate all crossings, or [`has_crossing`] to stop at the first
//! one. The [`Sweep`] exposes the event-by-event process, and
//! [`CrossingsIter`] yields crossings as they are discovered.
//!
//! ```rust
//! use geo::Line;
//! use segment_crossings::{find_crossings, has_crossing, Segment};
//!
//! let input = Segment::from_lines(vec![
//!     Line::from([(0., 0.), (10., 10.)]),
//!     Line::from([(0., 10.), (10., 0.)]),
//!     Line::from([(0., 5.), (10., 5.)]),
//! ])?;
//! assert!(has_crossing(input.clone()));
//!
//! // All three pass through (5, 5), which is reported once.
//! let found = find_crossings(input);
//! assert_eq!(found.len(), 1);
//! # Ok::<(), segment_crossings::SegmentError>(())
//! ```
//!
//! Vertical segments have no well-defined position under the sweep
//! line and are rejected by [`Segment::new`].
//!
//! [Bentley-Ottman]: //en.wikipedia.org/wiki/Bentley%E2%80%93Ottmann_algorithm
//! [`Line`]: geo::Line
use geo::GeoFloat;
use rstar::RTreeNum;

mod events;
pub use events::SweepPoint;

mod error;
pub use error::SegmentError;

mod config;
pub use config::SweepConfig;

mod segment;
pub use segment::Segment;

mod active;

pub mod crossings;
pub use crossings::{find_crossings, has_crossing, Crossing, Crossings, CrossingsIter, Sweep};

pub mod naive;

/// Scalar type of segment coordinates.
pub trait SweepFloat: GeoFloat + RTreeNum {}
impl<T: GeoFloat + RTreeNum> SweepFloat for T {}

#[cfg(test)]
#[path = "../benches/utils/random.rs"]
pub mod random;
