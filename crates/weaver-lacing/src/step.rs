//! The fixed six-phase build sequence and the small vocabularies a row is
//! described with (flange side, odd/even set, head orientation).
//!
//! The sequence never branches on data:
//!
//! ```text
//! R1 -> R2 -> R3 -> L1 -> L3 -> L4
//! ```
//!
//! R-phases lace the drive-side flange, L-phases the non-drive side. Each
//! L-phase mirrors one R-phase (`R1 <-> L1`, `R2 <-> L3`, `R3 <-> L4`).

use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Hub flange a spoke is seated in.
///
/// Front wheels keep the same labels; the rotor side is treated as NDS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    /// Drive side (cassette side on a rear wheel).
    #[cfg_attr(feature = "serde", serde(rename = "DS"))]
    Ds,
    /// Non-drive side.
    #[cfg_attr(feature = "serde", serde(rename = "NDS"))]
    Nds,
}

impl Side {
    /// Both flanges in lacing order.
    pub const ALL: [Self; 2] = [Self::Ds, Self::Nds];

    /// Table label.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ds => "DS",
            Self::Nds => "NDS",
        }
    }

    /// The three phases that lace this flange, in order.
    pub const fn steps(&self) -> [Step; 3] {
        match self {
            Self::Ds => [Step::R1, Step::R2, Step::R3],
            Self::Nds => [Step::L1, Step::L3, Step::L4],
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Side {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|side| side.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ValidationError::invalid_enum("side", s))
    }
}

/// Which half of a flange's holes a spoke belongs to.
///
/// Counting hub holes from the flange's start hole, the 1st, 3rd, 5th...
/// hole form the odd set and carry the fill spokes; the rest form the even
/// set and carry the weave spokes. Each set also seats one spoke of the
/// reference pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OddEvenSet {
    Odd,
    Even,
}

impl OddEvenSet {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Odd => "Odd",
            Self::Even => "Even",
        }
    }
}

impl fmt::Display for OddEvenSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which face of the flange the spoke head sits against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Heads {
    /// Head on the inside of the flange (spoke threaded inside -> outside).
    #[cfg_attr(feature = "serde", serde(rename = "IN"))]
    In,
    /// Head on the outside of the flange (spoke threaded outside -> inside).
    #[cfg_attr(feature = "serde", serde(rename = "OUT"))]
    Out,
}

impl Heads {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::In => "IN",
            Self::Out => "OUT",
        }
    }

    /// The opposite orientation.
    #[inline]
    pub const fn flipped(self) -> Self {
        match self {
            Self::In => Self::Out,
            Self::Out => Self::In,
        }
    }

    /// Orientation for a spoke laid in a phase with `role`.
    ///
    /// The reference pair and the fill keep the baseline (OUT), the weave
    /// takes the opposite face; `invert` swaps every spoke uniformly.
    pub const fn for_role(role: StepRole, invert: bool) -> Self {
        let base = match role {
            StepRole::Reference | StepRole::Fill => Self::Out,
            StepRole::Weave => Self::In,
        };
        if invert {
            base.flipped()
        } else {
            base
        }
    }
}

impl fmt::Display for Heads {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a phase contributes to the build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepRole {
    /// The two spokes that pin the pattern to the valve.
    Reference,
    /// Remaining odd-set spokes, laid without crossing anything yet.
    Fill,
    /// Even-set spokes, woven against the fill spokes.
    Weave,
}

/// One phase of the build sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Step {
    R1,
    R2,
    R3,
    L1,
    L3,
    L4,
}

impl Step {
    /// Every phase in execution order.
    pub const ALL: [Self; 6] = [Self::R1, Self::R2, Self::R3, Self::L1, Self::L3, Self::L4];

    /// Zero-based position in [`Step::ALL`].
    pub const fn ordinal(&self) -> usize {
        match self {
            Self::R1 => 0,
            Self::R2 => 1,
            Self::R3 => 2,
            Self::L1 => 3,
            Self::L3 => 4,
            Self::L4 => 5,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::R1 => "R1",
            Self::R2 => "R2",
            Self::R3 => "R3",
            Self::L1 => "L1",
            Self::L3 => "L3",
            Self::L4 => "L4",
        }
    }

    /// Flange laced during this phase.
    pub const fn side(&self) -> Side {
        match self {
            Self::R1 | Self::R2 | Self::R3 => Side::Ds,
            Self::L1 | Self::L3 | Self::L4 => Side::Nds,
        }
    }

    pub const fn role(&self) -> StepRole {
        match self {
            Self::R1 | Self::L1 => StepRole::Reference,
            Self::R2 | Self::L3 => StepRole::Fill,
            Self::R3 | Self::L4 => StepRole::Weave,
        }
    }

    /// The phase that plays the same role on the other flange.
    pub const fn mirror(&self) -> Self {
        match self {
            Self::R1 => Self::L1,
            Self::R2 => Self::L3,
            Self::R3 => Self::L4,
            Self::L1 => Self::R1,
            Self::L3 => Self::R2,
            Self::L4 => Self::R3,
        }
    }

    /// Short bench description of the phase.
    pub const fn describe(&self) -> &'static str {
        match self.role() {
            StepRole::Reference => "reference pair at valve",
            StepRole::Fill => "odd fill",
            StepRole::Weave => "even weave",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Step {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|step| step.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ValidationError::invalid_enum("step", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_is_fixed() {
        let labels: Vec<_> = Step::ALL.iter().map(Step::as_str).collect();
        assert_eq!(labels, ["R1", "R2", "R3", "L1", "L3", "L4"]);

        for (i, step) in Step::ALL.iter().enumerate() {
            assert_eq!(step.ordinal(), i);
        }
        assert!(Step::ALL.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn r_phases_are_drive_side() {
        assert_eq!(Side::Ds.steps(), [Step::R1, Step::R2, Step::R3]);
        assert_eq!(Side::Nds.steps(), [Step::L1, Step::L3, Step::L4]);
        for step in Step::ALL {
            assert!(step.side().steps().contains(&step));
        }
    }

    #[test]
    fn mirror_is_an_involution() {
        for step in Step::ALL {
            assert_ne!(step.mirror().side(), step.side());
            assert_eq!(step.mirror().role(), step.role());
            assert_eq!(step.mirror().mirror(), step);
        }
    }

    #[test]
    fn heads_follow_role_and_invert() {
        assert_eq!(Heads::for_role(StepRole::Reference, false), Heads::Out);
        assert_eq!(Heads::for_role(StepRole::Fill, false), Heads::Out);
        assert_eq!(Heads::for_role(StepRole::Weave, false), Heads::In);
        assert_eq!(Heads::for_role(StepRole::Reference, true), Heads::In);
        assert_eq!(Heads::for_role(StepRole::Weave, true), Heads::Out);
    }

    #[test]
    fn parse_labels() {
        assert_eq!("l3".parse::<Step>().unwrap(), Step::L3);
        assert_eq!("NDS".parse::<Side>().unwrap(), Side::Nds);
        assert_eq!("Ds".parse::<Side>().unwrap(), Side::Ds);
        assert_eq!("nDs".parse::<Side>().unwrap(), Side::Nds);
        assert!("L2".parse::<Step>().is_err());
        assert!("both".parse::<Side>().is_err());
    }
}
