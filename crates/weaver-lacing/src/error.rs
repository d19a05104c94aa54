//! Error types for weaver-lacing.
//!
//! Two families that callers must keep apart:
//!
//! - [`ValidationError`]: the parameter set is geometrically infeasible.
//!   Caller-facing and recoverable; adjust the input and retry.
//! - [`GenerationFault`]: a validated parameter set still broke a pattern
//!   invariant during generation. This is a defect in the generator, never
//!   a bad-input message.

use thiserror::Error;

use crate::step::Side;

/// Result type for weaver-lacing operations.
pub type Result<T> = std::result::Result<T, Error>;

/// A parameter set rejected before any row is generated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Hole count is odd or outside the supported range.
    #[error(
        "holes must be even and within {min}..={max}, got {holes}",
        min = crate::MIN_HOLES,
        max = crate::MAX_HOLES
    )]
    InvalidHoleCount { holes: i64 },

    /// Cross count outside `0..=max` for the hole count.
    #[error("crosses must be within 0..={max}, got {crosses}")]
    InvalidCrosses { crosses: i64, max: u32 },

    /// Start rim hole outside `1..=holes`.
    #[error("startRimHole must be within 1..={holes}, got {value}")]
    InvalidStartRimHole { value: i64, holes: u32 },

    /// Start hub hole outside `1..=holes/2`.
    #[error("startHubHole{side} must be within 1..={max}, got {value}")]
    InvalidStartHubHole { side: Side, value: i64, max: u32 },

    /// Unrecognized value for an enumerated field.
    #[error("invalid {field}: {value:?}")]
    InvalidEnumValue { field: &'static str, value: String },
}

impl ValidationError {
    pub(crate) fn invalid_enum(field: &'static str, value: &str) -> Self {
        Self::InvalidEnumValue {
            field,
            value: value.to_string(),
        }
    }
}

/// An invariant broken while generating rows from validated parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationFault {
    /// Two spokes claimed the same rim hole.
    #[error("internal fault: rim hole {hole} claimed twice (order {order})")]
    RimCollision { hole: u32, order: u32 },

    /// Two spokes claimed the same hole on one flange.
    #[error("internal fault: {side} hub hole {hole} claimed twice")]
    HubCollision { side: Side, hole: u32 },

    /// A computed hole index fell outside its ring.
    #[error("internal fault: {ring} index {index} outside 1..={size}")]
    OutOfRange {
        ring: &'static str,
        index: i64,
        size: u32,
    },

    /// No free hole left on a ring that should still have one.
    #[error("internal fault: no free {ring} hole left (size {size})")]
    LedgerExhausted { ring: &'static str, size: u32 },

    /// The table does not hold one row per rim hole.
    #[error("internal fault: expected {expected} rows, generated {actual}")]
    RowCount { expected: usize, actual: usize },

    /// `order` is not the contiguous sequence 1..=N grouped by phase.
    #[error("internal fault: order sequence broken at row {position}")]
    OrderBroken { position: usize },
}

/// Any failure from the public entry points.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Rejected input.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Generator defect.
    #[error(transparent)]
    Fault(#[from] GenerationFault),
}

impl Error {
    /// `true` when the caller can fix the input and retry.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
