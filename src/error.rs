use thiserror::Error;

/// Reasons an input segment is rejected before the sweep starts.
///
/// The sweep itself never fails: once every segment is valid, all
/// remaining degeneracies (parallel lines, stale lookups, duplicate
/// crossings) are resolved locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SegmentError {
    #[error("segment {id} has a non-finite coordinate")]
    NonFinite { id: usize },

    /// Both end-points share an x-coordinate. The height of such a
    /// segment at a sweep position is undefined, so it can't be
    /// ordered among the active segments. Zero-length segments land
    /// here too.
    #[error("segment {id} is vertical")]
    Vertical { id: usize },
}
