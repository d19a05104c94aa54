//! Geometric feasibility checks.
//!
//! Each check is a standalone function so a UI can call it for field-level
//! feedback before asking for a full pattern. Inputs are taken as `i64` so
//! negative or oversized raw values are rejected here rather than wrapped
//! by a cast somewhere upstream.

use std::ops::RangeInclusive;

use crate::error::ValidationError;
use crate::step::Side;
use crate::{MAX_HOLES, MIN_HOLES};

/// Rim hole counts the builder is calibrated for.
pub const SUPPORTED_HOLE_COUNTS: [u32; 5] = [20, 24, 28, 32, 36];

/// Conventionally built cross counts per supported hole count.
///
/// Curated from bench practice, not derived from [`max_crosses`].
const COMMON_CROSSES: [(u32, &[u32]); 5] = [
    (20, &[0, 1, 2]),
    (24, &[0, 1, 2, 3]),
    (28, &[0, 1, 2, 3]),
    (32, &[0, 1, 2, 3, 4]),
    (36, &[0, 1, 2, 3, 4]),
];

/// Checks that `holes` is even and within [`MIN_HOLES`]`..=`[`MAX_HOLES`].
pub fn validate_hole_count(holes: i64) -> Result<u32, ValidationError> {
    if holes % 2 != 0 {
        return Err(ValidationError::InvalidHoleCount { holes });
    }
    u32::try_from(holes)
        .ok()
        .filter(|n| (MIN_HOLES..=MAX_HOLES).contains(n))
        .ok_or(ValidationError::InvalidHoleCount { holes })
}

/// Holes per flange (`H = N / 2`).
///
/// Fails with [`ValidationError::InvalidHoleCount`] whenever
/// [`validate_hole_count`] does.
pub fn derive_flange_holes(holes: i64) -> Result<u32, ValidationError> {
    Ok(validate_hole_count(holes)? / 2)
}

/// Largest feasible cross count for a flange of `flange_holes` holes.
///
/// A spoke crossing `H/2` others would be tangent to the hub or beyond.
#[inline]
pub const fn max_crosses(flange_holes: u32) -> u32 {
    (flange_holes / 2).saturating_sub(1)
}

/// Checks `0 <= crosses <= H/2 - 1` and returns the cross count.
///
/// 32 holes: H = 16, so 7 is the largest valid value.
/// 24 holes: H = 12, so 5 is.
pub fn validate_crosses(holes: i64, crosses: i64) -> Result<u32, ValidationError> {
    let max = max_crosses(derive_flange_holes(holes)?);
    if crosses < 0 || crosses > i64::from(max) {
        return Err(ValidationError::InvalidCrosses { crosses, max });
    }
    Ok(crosses as u32)
}

/// Every mathematically valid cross count for `holes`.
pub fn valid_crosses(holes: i64) -> Result<RangeInclusive<u32>, ValidationError> {
    Ok(0..=max_crosses(derive_flange_holes(holes)?))
}

/// The cross counts builders actually use for `holes`.
///
/// Empty for hole counts outside [`SUPPORTED_HOLE_COUNTS`].
pub fn common_crosses(holes: i64) -> &'static [u32] {
    COMMON_CROSSES
        .iter()
        .find(|(count, _)| i64::from(*count) == holes)
        .map(|(_, crosses)| *crosses)
        .unwrap_or(&[])
}

/// Whether `holes` is one of the calibrated counts.
pub fn is_supported_hole_count(holes: i64) -> bool {
    SUPPORTED_HOLE_COUNTS.iter().any(|&n| i64::from(n) == holes)
}

/// Checks `1 <= start <= holes`.
pub fn validate_start_rim_hole(holes: i64, start: i64) -> Result<u32, ValidationError> {
    let rim = validate_hole_count(holes)?;
    if start < 1 || start > i64::from(rim) {
        return Err(ValidationError::InvalidStartRimHole {
            value: start,
            holes: rim,
        });
    }
    Ok(start as u32)
}

/// Checks `1 <= start <= holes / 2` for the start hub hole of `side`.
pub fn validate_start_hub_hole(holes: i64, side: Side, start: i64) -> Result<u32, ValidationError> {
    let max = derive_flange_holes(holes)?;
    if start < 1 || start > i64::from(max) {
        return Err(ValidationError::InvalidStartHubHole {
            side,
            value: start,
            max,
        });
    }
    Ok(start as u32)
}
