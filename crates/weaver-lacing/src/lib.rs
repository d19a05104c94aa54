//! Wheel Weaver Lacing
//!
//! Validation and pattern generation for lacing a bicycle wheel with the
//! Schraner workshop sequence.
//!
//! # Build Sequence
//!
//! Spokes are placed in six fixed phases:
//!
//! ```text
//! R1 -> R2 -> R3 -> L1 -> L3 -> L4
//! ```
//!
//! - **R1 / L1**: reference pair at the valve
//! - **R2 / L3**: odd fill, heads in the baseline orientation
//! - **R3 / L4**: even weave, heads flipped, clocked by the cross count
//!
//! R-phases lace the drive-side flange, L-phases the non-drive side.
//!
//! # Orientation
//!
//! Everything is seen from the drive side. Rim holes are numbered clockwise
//! with the valve between hole `N` and hole `1`. Each flange's `H = N/2`
//! holes are numbered clockwise as seen looking straight at that flange.
//!
//! # Example
//!
//! ```
//! use weaver_lacing::{compute, PatternRequest, Step};
//!
//! let pattern = compute(&PatternRequest::default()).unwrap();
//! assert_eq!(pattern.rows.len(), 32);
//!
//! let reference = pattern.rows_for_step(Step::R1).next().unwrap();
//! assert_eq!(reference.rim_hole, 1);
//! ```

mod error;
mod params;
mod pattern;
mod ring;
mod step;
mod validation;

pub use error::{Error, GenerationFault, Result, ValidationError};
pub use params::{BuildParameters, PatternRequest, Symmetry, ValveReference, WheelType};
pub use pattern::{
    compute_pattern, describe_crosses, DerivedSummary, FlangeLabels, Pattern, SpokeAssignment,
    ValveClearance,
};
pub use ring::Ring;
pub use step::{Heads, OddEvenSet, Side, Step, StepRole};
pub use validation::{
    common_crosses, derive_flange_holes, is_supported_hole_count, max_crosses, valid_crosses,
    validate_crosses, validate_hole_count, validate_start_hub_hole, validate_start_rim_hole,
    SUPPORTED_HOLE_COUNTS,
};

/// Smallest rim hole count accepted.
pub const MIN_HOLES: u32 = 20;

/// Largest rim hole count accepted.
pub const MAX_HOLES: u32 = 400;

/// Number of phases in the build sequence.
pub const PHASES: usize = 6;

/// Spokes placed by each reference phase (R1, L1).
pub const REFERENCE_PAIR: usize = 2;

// Compile-time assertion that the phase table matches the declared count
const _: () = assert!(Step::ALL.len() == PHASES);

/// Validate `request` and generate its pattern in one call.
///
/// Validation errors come back as [`Error::Validation`]; a fault while
/// generating from valid input as [`Error::Fault`].
pub fn compute(request: &PatternRequest) -> Result<Pattern> {
    let params = BuildParameters::new(request)?;
    Ok(compute_pattern(&params)?)
}
