use thiserror::Error;

/// Failures raised by grid access, the neighbor cursor, and the step engine.
///
/// All variants are local, synchronous failures raised at the point of
/// violation; nothing is retried internally. A rule failure surfaces from
/// `step()` verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// The initial buffer was empty or had rows of unequal length.
    #[error("initial buffer must be non-empty with rows of equal length")]
    InvalidShape,

    /// A 1-based logical coordinate fell outside the interior region.
    #[error("cell ({row}, {col}) is outside the {width}x{height} interior")]
    OutOfBounds {
        row: usize,
        col: usize,
        width: usize,
        height: usize,
    },

    /// A neighbor offset fell outside the 3x3 window around the cursor.
    #[error("neighbor offset ({dr}, {dc}) is outside the 3x3 window")]
    OutOfRange { dr: i32, dc: i32 },

    /// The cursor was advanced past the last interior row.
    #[error("cursor advanced past the last interior row")]
    ExhaustedBounds,
}
