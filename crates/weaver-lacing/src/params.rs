//! Build parameters: the raw request payload and its validated form.
//!
//! [`PatternRequest`] mirrors the wire payload (plain integers, string
//! enums). [`BuildParameters`] can only be obtained by running every
//! validator over a request, and cannot be changed afterwards.

use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::step::Side;
use crate::validation::{
    validate_crosses, validate_hole_count, validate_start_hub_hole, validate_start_rim_hole,
};

/// Rear or front wheel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum WheelType {
    #[default]
    Rear,
    /// Laced with the same DS/NDS sequence; the rotor side is NDS.
    Front,
}

/// Whether the NDS flange is clocked from the DS pattern or independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Symmetry {
    #[default]
    Symmetrical,
    Asymmetrical,
}

/// Which side of the valve the first reference spoke is placed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ValveReference {
    /// Clockwise from the valve, seen from the drive side.
    #[default]
    RightOfValve,
    /// Counter-clockwise from the valve.
    LeftOfValve,
}

macro_rules! labelled_enum {
    ($ty:ident, $field:literal, { $($variant:ident => $label:literal),+ $(,)? }) => {
        impl $ty {
            /// Wire label.
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($label => Ok(Self::$variant),)+
                    other => Err(ValidationError::invalid_enum($field, other)),
                }
            }
        }
    };
}

labelled_enum!(WheelType, "wheelType", { Rear => "rear", Front => "front" });
labelled_enum!(Symmetry, "symmetry", {
    Symmetrical => "symmetrical",
    Asymmetrical => "asymmetrical",
});
labelled_enum!(ValveReference, "valveReference", {
    RightOfValve => "right_of_valve",
    LeftOfValve => "left_of_valve",
});

impl ValveReference {
    /// Rim numbering direction walked away from the valve: `+1` clockwise.
    #[inline]
    pub const fn direction(&self) -> i64 {
        match self {
            Self::RightOfValve => 1,
            Self::LeftOfValve => -1,
        }
    }
}

/// Unvalidated parameter payload, as received from a caller.
///
/// Enumerated fields stay strings so an unknown value surfaces as
/// [`ValidationError::InvalidEnumValue`] instead of a decoding failure.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct PatternRequest {
    /// Total rim holes, even and >= 20.
    pub holes: i64,
    pub wheel_type: String,
    pub crosses: i64,
    pub symmetry: String,
    pub invert_heads: bool,
    pub start_rim_hole: i64,
    pub valve_reference: String,
    #[cfg_attr(feature = "serde", serde(rename = "startHubHoleDS"))]
    pub start_hub_hole_ds: i64,
    #[cfg_attr(feature = "serde", serde(rename = "startHubHoleNDS"))]
    pub start_hub_hole_nds: i64,
}

impl Default for PatternRequest {
    /// 32H rear 3x, symmetrical, started right of the valve at hole 1.
    fn default() -> Self {
        Self {
            holes: 32,
            wheel_type: WheelType::Rear.to_string(),
            crosses: 3,
            symmetry: Symmetry::Symmetrical.to_string(),
            invert_heads: false,
            start_rim_hole: 1,
            valve_reference: ValveReference::RightOfValve.to_string(),
            start_hub_hole_ds: 1,
            start_hub_hole_nds: 1,
        }
    }
}

impl From<&BuildParameters> for PatternRequest {
    fn from(params: &BuildParameters) -> Self {
        Self {
            holes: i64::from(params.holes),
            wheel_type: params.wheel_type.to_string(),
            crosses: i64::from(params.crosses),
            symmetry: params.symmetry.to_string(),
            invert_heads: params.invert_heads,
            start_rim_hole: i64::from(params.start_rim_hole),
            valve_reference: params.valve_reference.to_string(),
            start_hub_hole_ds: i64::from(params.start_hub_hole_ds),
            start_hub_hole_nds: i64::from(params.start_hub_hole_nds),
        }
    }
}

/// A validated, immutable parameter set.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct BuildParameters {
    holes: u32,
    wheel_type: WheelType,
    crosses: u32,
    symmetry: Symmetry,
    invert_heads: bool,
    start_rim_hole: u32,
    valve_reference: ValveReference,
    #[cfg_attr(feature = "serde", serde(rename = "startHubHoleDS"))]
    start_hub_hole_ds: u32,
    #[cfg_attr(feature = "serde", serde(rename = "startHubHoleNDS"))]
    start_hub_hole_nds: u32,
}

impl BuildParameters {
    /// Validates `request` field by field, failing on the first problem.
    pub fn new(request: &PatternRequest) -> Result<Self, ValidationError> {
        let holes = validate_hole_count(request.holes)?;
        let crosses = validate_crosses(request.holes, request.crosses)?;
        let start_rim_hole = validate_start_rim_hole(request.holes, request.start_rim_hole)?;
        let start_hub_hole_ds =
            validate_start_hub_hole(request.holes, Side::Ds, request.start_hub_hole_ds)?;
        let start_hub_hole_nds =
            validate_start_hub_hole(request.holes, Side::Nds, request.start_hub_hole_nds)?;

        Ok(Self {
            holes,
            wheel_type: request.wheel_type.parse()?,
            crosses,
            symmetry: request.symmetry.parse()?,
            invert_heads: request.invert_heads,
            start_rim_hole,
            valve_reference: request.valve_reference.parse()?,
            start_hub_hole_ds,
            start_hub_hole_nds,
        })
    }

    /// Total rim holes (N).
    pub const fn holes(&self) -> u32 {
        self.holes
    }

    /// Holes per hub flange (H = N / 2).
    pub const fn flange_holes(&self) -> u32 {
        self.holes / 2
    }

    pub const fn wheel_type(&self) -> WheelType {
        self.wheel_type
    }

    pub const fn crosses(&self) -> u32 {
        self.crosses
    }

    pub const fn symmetry(&self) -> Symmetry {
        self.symmetry
    }

    pub const fn invert_heads(&self) -> bool {
        self.invert_heads
    }

    pub const fn start_rim_hole(&self) -> u32 {
        self.start_rim_hole
    }

    pub const fn valve_reference(&self) -> ValveReference {
        self.valve_reference
    }

    /// Start hub hole for the given flange.
    pub const fn start_hub_hole(&self, side: Side) -> u32 {
        match side {
            Side::Ds => self.start_hub_hole_ds,
            Side::Nds => self.start_hub_hole_nds,
        }
    }

    /// One-line description, e.g. `32H - rear - 3x - symmetrical - default heads`.
    pub fn summary(&self) -> String {
        format!(
            "{}H - {} - {}x - {} - {}",
            self.holes,
            self.wheel_type,
            self.crosses,
            self.symmetry,
            if self.invert_heads {
                "invert heads"
            } else {
                "default heads"
            }
        )
    }
}

impl Default for BuildParameters {
    fn default() -> Self {
        Self {
            holes: 32,
            wheel_type: WheelType::Rear,
            crosses: 3,
            symmetry: Symmetry::Symmetrical,
            invert_heads: false,
            start_rim_hole: 1,
            valve_reference: ValveReference::RightOfValve,
            start_hub_hole_ds: 1,
            start_hub_hole_nds: 1,
        }
    }
}

impl TryFrom<&PatternRequest> for BuildParameters {
    type Error = ValidationError;

    fn try_from(request: &PatternRequest) -> Result<Self, Self::Error> {
        Self::new(request)
    }
}

impl TryFrom<PatternRequest> for BuildParameters {
    type Error = ValidationError;

    fn try_from(request: PatternRequest) -> Result<Self, Self::Error> {
        Self::new(&request)
    }
}
