//! Pattern generation: validated parameters in, ordered spoke table out.
//!
//! # Layout
//!
//! Rim holes are numbered clockwise from the drive side with the valve
//! between hole `N` and hole `1`. The first reference spoke lands in hole
//! `a` and the generator walks away from the valve in direction `d`:
//!
//! ```text
//! right_of_valve: d = +1, a = startRimHole
//! left_of_valve:  d = -1, a = startRimHole - 1   (wrapped)
//! ```
//!
//! Measured as `x` steps from `a` along `d`, each flange/set pair owns one
//! lane of rim holes:
//!
//! ```text
//! DS  odd   x = 4j          NDS odd   x = 4j + 1 + shift
//! DS  even  x = 4j - 1      NDS even  x = 4j + 2 + shift
//! ```
//!
//! so the R1 pair lands in `a` and `a - d`, straddling the valve when
//! `startRimHole = 1`. Hub holes are walked from the flange's start hole in
//! step `w` (`d` on DS, `-d` on the mirrored NDS flange): odd spoke `j` at
//! `2j·w`, so the reference pair sits in the start hole and the one beside
//! it at `-w`. Weave spoke `j` takes slot `(2j - 1 - 2c)·w`, clocked `2c`
//! holes against the fill spoke beside it; from `j = c` on the slots move
//! one further along to step over the reference spoke's hole.
//!
//! # Ledger
//!
//! Every claim goes through an occupancy ledger per ring. For hole counts
//! divisible by four the lanes tile exactly and every first claim succeeds;
//! otherwise the seam at the valve is resolved by taking the next free hole
//! in the walking direction. A final audit re-checks the table and reports
//! any violation as a [`GenerationFault`].

use std::collections::HashSet;

use tracing::{debug, error};

use crate::error::GenerationFault;
use crate::params::{BuildParameters, Symmetry, WheelType};
use crate::ring::{Ledger, Ring};
use crate::step::{Heads, OddEvenSet, Side, Step, StepRole};

const NOTE_REFERENCE: &str = "Reference at valve";
const NOTE_ACROSS_VALVE: &str = "Across valve";
const NOTE_NDS_REFERENCE: &str = "NDS start reference";
const NOTE_NDS_PARTNER: &str = "Pairs with NDS start";
const NOTE_VALVE_RIGHT: &str = "Valve right";
const NOTE_VALVE_LEFT: &str = "Valve left";
const NOTE_LEANS_OVER_VALVE: &str = "Leans over valve";

/// One row of the lacing table: where a single spoke goes.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct SpokeAssignment {
    /// Human label, `<step>-<k>`.
    pub spoke: String,
    /// Global position in the build, `1..=N`.
    pub order: u32,
    pub step: Step,
    pub side: Side,
    pub odd_even_set: OddEvenSet,
    /// Position within the phase, from 1.
    pub k: u32,
    pub hub_hole: u32,
    pub heads: Heads,
    pub rim_hole: u32,
    pub crosses_described: String,
    pub notes: String,
}

/// Room left around the valve for a pump head.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ValveClearance {
    Clear,
    Crowded,
}

impl ValveClearance {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Clear => "clear",
            Self::Crowded => "crowded",
        }
    }
}

impl std::fmt::Display for ValveClearance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the DS and NDS labels mean on the bench for this wheel type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FlangeLabels {
    pub ds: &'static str,
    pub nds: &'static str,
}

impl FlangeLabels {
    pub const fn for_wheel(wheel: WheelType) -> Self {
        match wheel {
            WheelType::Rear => Self {
                ds: "cassette side",
                nds: "opposite flange",
            },
            WheelType::Front => Self {
                ds: "non-rotor side",
                nds: "rotor side",
            },
        }
    }
}

/// Aggregates computed alongside the rows.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct DerivedSummary {
    pub total_spokes: u32,
    pub spokes_per_side: u32,
    pub crosses: u32,
    /// Angle a spoke sweeps around the hub, `crosses · 720 / N` degrees.
    pub lacing_angle_deg: f64,
    pub valve_clearance: ValveClearance,
    pub valve_clearance_reason: String,
    pub flange_labels: FlangeLabels,
}

/// A generated lacing table.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Pattern {
    pub params: BuildParameters,
    pub derived: DerivedSummary,
    pub rows: Vec<SpokeAssignment>,
}

impl Pattern {
    /// Rows of one phase, in build order.
    pub fn rows_for_step(&self, step: Step) -> impl Iterator<Item = &SpokeAssignment> {
        self.rows.iter().filter(move |row| row.step == step)
    }

    /// Rows laced into one flange, in build order.
    pub fn rows_for_side(&self, side: Side) -> impl Iterator<Item = &SpokeAssignment> {
        self.rows.iter().filter(move |row| row.side == side)
    }

    /// The spoke that ends in `rim_hole`.
    pub fn row_for_rim_hole(&self, rim_hole: u32) -> Option<&SpokeAssignment> {
        self.rows.iter().find(|row| row.rim_hole == rim_hole)
    }
}

/// Text for the crosses column.
pub fn describe_crosses(crosses: u32) -> String {
    match crosses {
        0 => "radial".to_string(),
        1 => "1 cross (under)".to_string(),
        c => format!("{} crosses ({} over, 1 under)", c, c - 1),
    }
}

/// Generate the full table for `params`.
///
/// Deterministic: the same parameters always produce the same pattern.
/// Errors are generator defects, never input problems; validation has
/// already happened when a [`BuildParameters`] exists.
pub fn compute_pattern(params: &BuildParameters) -> Result<Pattern, GenerationFault> {
    let result = Generator::new(params).run();
    if let Err(fault) = &result {
        error!(%fault, params = %params.summary(), "pattern generation failed");
    }
    result
}

/// Per-flange walking state.
#[derive(Debug, Clone, Copy)]
struct Flange {
    side: Side,
    start_hub: u32,
    /// Hub index step matching one rim step in direction `d`.
    hub_walk: i64,
    /// Lane offset of the odd set, in `x` units.
    odd_lane: i64,
    /// Lane offset of the even set, in `x` units.
    even_lane: i64,
}

struct Generator<'a> {
    params: &'a BuildParameters,
    rim: Ring,
    hub: Ring,
    direction: i64,
    anchor: u32,
    rim_ledger: Ledger,
    hub_ledgers: [Ledger; 2],
    crosses_text: String,
    rows: Vec<SpokeAssignment>,
}

impl<'a> Generator<'a> {
    fn new(params: &'a BuildParameters) -> Self {
        let rim = Ring::rim(params.holes());
        let hub = Ring::hub(params.flange_holes());
        let direction = params.valve_reference().direction();
        let anchor = if direction > 0 {
            params.start_rim_hole()
        } else {
            rim.offset(params.start_rim_hole(), -1)
        };

        Self {
            params,
            rim,
            hub,
            direction,
            anchor,
            rim_ledger: Ledger::new(rim),
            hub_ledgers: [Ledger::new(hub), Ledger::new(hub)],
            crosses_text: describe_crosses(params.crosses()),
            rows: Vec::with_capacity(params.holes() as usize),
        }
    }

    fn flange(&self, side: Side) -> Flange {
        match side {
            Side::Ds => Flange {
                side,
                start_hub: self.params.start_hub_hole(Side::Ds),
                hub_walk: self.direction,
                odd_lane: 0,
                even_lane: -1,
            },
            Side::Nds => {
                let shift = match self.params.symmetry() {
                    Symmetry::Symmetrical => 0,
                    Symmetry::Asymmetrical => {
                        let ds = i64::from(self.params.start_hub_hole(Side::Ds));
                        let nds = i64::from(self.params.start_hub_hole(Side::Nds));
                        4 * (nds - ds).rem_euclid(i64::from(self.hub.size()))
                    }
                };
                Flange {
                    side,
                    start_hub: self.params.start_hub_hole(Side::Nds),
                    hub_walk: -self.direction,
                    odd_lane: 1 + shift,
                    even_lane: 2 + shift,
                }
            }
        }
    }

    /// Which spokes of a flange a phase lays, as `(set, j)` pairs.
    fn members(&self, step: Step) -> Vec<(OddEvenSet, u32)> {
        let flange_holes = self.hub.size();
        let odd_count = flange_holes.div_ceil(2);
        let even_count = flange_holes / 2;

        match step.role() {
            StepRole::Reference => vec![(OddEvenSet::Odd, 0), (OddEvenSet::Even, 0)],
            StepRole::Fill => (1..odd_count).map(|j| (OddEvenSet::Odd, j)).collect(),
            StepRole::Weave => (1..even_count).map(|j| (OddEvenSet::Even, j)).collect(),
        }
    }

    fn run(mut self) -> Result<Pattern, GenerationFault> {
        self.lay_phases()?;
        self.annotate_valve();
        self.audit()?;

        let derived = self.summarize();
        Ok(Pattern {
            params: self.params.clone(),
            derived,
            rows: self.rows,
        })
    }

    fn lay_phases(&mut self) -> Result<(), GenerationFault> {
        for step in Step::ALL {
            let flange = self.flange(step.side());
            let members = self.members(step);
            for (index, (set, j)) in members.iter().enumerate() {
                self.lay(step, flange, *set, *j, index as u32 + 1)?;
            }
            debug!(
                step = %step,
                phase = step.describe(),
                spokes = members.len(),
                "phase laid"
            );
        }
        Ok(())
    }

    fn lay(
        &mut self,
        step: Step,
        flange: Flange,
        set: OddEvenSet,
        j: u32,
        k: u32,
    ) -> Result<(), GenerationFault> {
        let j = i64::from(j);
        let crosses = i64::from(self.params.crosses());

        let (lane_x, hub_steps) = match (set, step.role()) {
            (OddEvenSet::Odd, _) => (flange.odd_lane + 4 * j, 2 * j),
            // Second reference spoke takes the hub hole beside the start hole
            (OddEvenSet::Even, StepRole::Reference) => (flange.even_lane, -1),
            (OddEvenSet::Even, _) => {
                // Weave slots skip the one the reference spoke took
                let skip = i64::from(crosses > 0 && j >= crosses);
                (flange.even_lane + 4 * j, 2 * j - 1 - 2 * crosses + 2 * skip)
            }
        };

        let rim_target = self.rim.offset(self.anchor, self.direction * lane_x);
        let rim_hole = self.rim_ledger.claim_nearest(rim_target, self.direction)?;

        let hub_target = self.hub.offset(flange.start_hub, flange.hub_walk * hub_steps);
        let hub_ledger = &mut self.hub_ledgers[side_index(flange.side)];
        let hub_hole = hub_ledger.claim_nearest(hub_target, flange.hub_walk)?;

        let mut notes = Vec::new();
        if step.role() == StepRole::Reference {
            notes.push(reference_note(flange.side, k, self.params.wheel_type()));
        }

        self.rows.push(SpokeAssignment {
            spoke: format!("{}-{}", step, k),
            order: self.rows.len() as u32 + 1,
            step,
            side: flange.side,
            odd_even_set: set,
            k,
            hub_hole,
            heads: Heads::for_role(step.role(), self.params.invert_heads()),
            rim_hole,
            crosses_described: self.crosses_text.clone(),
            notes: notes.join("; "),
        });
        Ok(())
    }

    /// Rim-wise lean of a spoke: `+1` when its rim end sits clockwise of
    /// its hub end, `-1` counter-clockwise, `0` for radial lacing.
    fn lean(&self, set: OddEvenSet) -> i64 {
        if self.params.crosses() == 0 {
            return 0;
        }
        match set {
            OddEvenSet::Odd => -self.direction,
            OddEvenSet::Even => self.direction,
        }
    }

    /// A spoke in hole 1 leaning clockwise, or in hole N leaning
    /// counter-clockwise, has its body over the valve.
    fn leans_over_valve(&self, row: &SpokeAssignment) -> bool {
        let lean = self.lean(row.odd_even_set);
        (row.rim_hole == 1 && lean > 0) || (row.rim_hole == self.rim.size() && lean < 0)
    }

    fn annotate_valve(&mut self) {
        let last = self.rim.size();
        let flags: Vec<(usize, &'static str, bool)> = self
            .rows
            .iter()
            .enumerate()
            .filter_map(|(i, row)| {
                let label = match row.rim_hole {
                    1 => NOTE_VALVE_RIGHT,
                    hole if hole == last => NOTE_VALVE_LEFT,
                    _ => return None,
                };
                Some((i, label, self.leans_over_valve(row)))
            })
            .collect();

        for (i, label, leans) in flags {
            let row = &mut self.rows[i];
            let mut notes: Vec<&str> = row
                .notes
                .split("; ")
                .filter(|note| !note.is_empty())
                .collect();
            notes.push(label);
            if leans {
                notes.push(NOTE_LEANS_OVER_VALVE);
            }
            row.notes = notes.join("; ");
        }
    }

    fn audit(&self) -> Result<(), GenerationFault> {
        let expected = self.rim.size() as usize;
        if self.rows.len() != expected {
            return Err(GenerationFault::RowCount {
                expected,
                actual: self.rows.len(),
            });
        }

        let mut rim_seen = HashSet::with_capacity(expected);
        let mut hub_seen = HashSet::with_capacity(expected);
        let mut last_step = Step::R1;

        for (position, row) in self.rows.iter().enumerate() {
            if row.order as usize != position + 1 || row.step < last_step {
                return Err(GenerationFault::OrderBroken { position });
            }
            last_step = row.step;

            let rim_hole = self.rim.check(i64::from(row.rim_hole))?;
            if !rim_seen.insert(rim_hole) {
                return Err(GenerationFault::RimCollision {
                    hole: rim_hole,
                    order: row.order,
                });
            }

            let hub_hole = self.hub.check(i64::from(row.hub_hole))?;
            if !hub_seen.insert((row.side, hub_hole)) {
                return Err(GenerationFault::HubCollision {
                    side: row.side,
                    hole: hub_hole,
                });
            }
        }
        Ok(())
    }

    fn summarize(&self) -> DerivedSummary {
        let holes = self.rim.size();
        let crosses = self.params.crosses();

        let crowding: Vec<&SpokeAssignment> = self
            .rows
            .iter()
            .filter(|row| self.leans_over_valve(row))
            .collect();

        let (valve_clearance, valve_clearance_reason) = if crowding.is_empty() {
            let reason = if crosses == 0 {
                "radial spokes leave the valve open".to_string()
            } else {
                format!("spokes in holes {} and 1 lean away from the valve", holes)
            };
            (ValveClearance::Clear, reason)
        } else {
            let culprits: Vec<String> = crowding
                .iter()
                .map(|row| format!("{} (hole {})", row.spoke, row.rim_hole))
                .collect();
            (
                ValveClearance::Crowded,
                format!("{} lean over the valve", culprits.join(" and ")),
            )
        };

        DerivedSummary {
            total_spokes: holes,
            spokes_per_side: self.hub.size(),
            crosses,
            lacing_angle_deg: f64::from(crosses) * 720.0 / f64::from(holes),
            valve_clearance,
            valve_clearance_reason,
            flange_labels: FlangeLabels::for_wheel(self.params.wheel_type()),
        }
    }
}

#[inline]
const fn side_index(side: Side) -> usize {
    match side {
        Side::Ds => 0,
        Side::Nds => 1,
    }
}

fn reference_note(side: Side, k: u32, wheel: WheelType) -> &'static str {
    match (side, k, wheel) {
        (Side::Ds, 1, _) => NOTE_REFERENCE,
        (Side::Ds, _, _) => NOTE_ACROSS_VALVE,
        (Side::Nds, 1, WheelType::Front) => "NDS start reference (rotor side)",
        (Side::Nds, 1, WheelType::Rear) => NOTE_NDS_REFERENCE,
        (Side::Nds, _, _) => NOTE_NDS_PARTNER,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::PatternRequest;

    fn params(request: PatternRequest) -> BuildParameters {
        BuildParameters::new(&request).unwrap()
    }

    fn default_pattern() -> Pattern {
        compute_pattern(&BuildParameters::default()).unwrap()
    }

    #[test]
    fn default_has_one_row_per_hole() {
        let pattern = default_pattern();
        assert_eq!(pattern.rows.len(), 32);

        let mut rims: Vec<_> = pattern.rows.iter().map(|r| r.rim_hole).collect();
        rims.sort_unstable();
        assert_eq!(rims, (1..=32).collect::<Vec<_>>());
    }

    #[test]
    fn phase_sizes_32h() {
        let pattern = default_pattern();
        let sizes: Vec<_> = Step::ALL
            .iter()
            .map(|s| pattern.rows_for_step(*s).count())
            .collect();
        assert_eq!(sizes, [2, 7, 7, 2, 7, 7]);
        assert_eq!(pattern.rows_for_side(Side::Ds).count(), 16);
        assert_eq!(pattern.rows_for_side(Side::Nds).count(), 16);
    }

    #[test]
    fn r1_straddles_valve() {
        let pattern = default_pattern();
        let r1: Vec<_> = pattern.rows_for_step(Step::R1).collect();

        assert_eq!(r1[0].rim_hole, 1);
        assert_eq!(r1[0].hub_hole, 1);
        assert_eq!(r1[0].heads, Heads::Out);
        assert_eq!(r1[0].notes, "Reference at valve; Valve right");
        assert_eq!(r1[0].spoke, "R1-1");

        assert_eq!(r1[1].rim_hole, 32);
        assert_eq!(r1[1].hub_hole, 16);
        assert_eq!(r1[1].heads, Heads::Out);
        assert_eq!(r1[1].notes, "Across valve; Valve left");
        assert_eq!(r1[1].odd_even_set, OddEvenSet::Even);
    }

    #[test]
    fn reference_pairs_sit_in_adjacent_hub_holes() {
        for crosses in 0..=7 {
            let pattern = compute_pattern(&params(PatternRequest {
                crosses,
                start_hub_hole_ds: 5,
                start_hub_hole_nds: 9,
                ..PatternRequest::default()
            }))
            .unwrap();

            let r1: Vec<_> = pattern.rows_for_step(Step::R1).map(|r| r.hub_hole).collect();
            let l1: Vec<_> = pattern.rows_for_step(Step::L1).map(|r| r.hub_hole).collect();
            assert_eq!(r1, [5, 4], "{}x", crosses);
            assert_eq!(l1, [9, 10], "{}x", crosses);
            assert!(pattern
                .rows
                .iter()
                .filter(|r| r.step.role() == StepRole::Reference)
                .all(|r| r.heads == Heads::Out));
        }
    }

    #[test]
    fn left_of_valve_starts_counter_clockwise() {
        let pattern = compute_pattern(&params(PatternRequest {
            valve_reference: "left_of_valve".into(),
            ..PatternRequest::default()
        }))
        .unwrap();
        let r1: Vec<_> = pattern.rows_for_step(Step::R1).collect();
        assert_eq!(r1[0].rim_hole, 32);
        assert_eq!(r1[1].rim_hole, 1);

        // R2 walks counter-clockwise from the valve
        let r2: Vec<_> = pattern.rows_for_step(Step::R2).map(|r| r.rim_hole).collect();
        assert_eq!(r2, [28, 24, 20, 16, 12, 8, 4]);
        assert_eq!(pattern.derived.valve_clearance, ValveClearance::Clear);
    }

    #[test]
    fn fill_walks_every_fourth_hole() {
        let pattern = default_pattern();
        let r2: Vec<_> = pattern
            .rows_for_step(Step::R2)
            .map(|r| (r.rim_hole, r.hub_hole))
            .collect();
        assert_eq!(
            r2,
            [(5, 3), (9, 5), (13, 7), (17, 9), (21, 11), (25, 13), (29, 15)]
        );
        assert!(pattern.rows_for_step(Step::R2).all(|r| r.heads == Heads::Out));
    }

    #[test]
    fn weave_is_clocked_by_crosses() {
        // 3x: weave spoke j sits 2j - 7 holes from the start hole, one
        // further from j = 3 on where the reference spoke holds hole 16
        let pattern = default_pattern();
        let r3: Vec<_> = pattern
            .rows_for_step(Step::R3)
            .map(|r| (r.rim_hole, r.hub_hole))
            .collect();
        assert_eq!(
            r3,
            [(4, 12), (8, 14), (12, 2), (16, 4), (20, 6), (24, 8), (28, 10)]
        );
        assert!(pattern.rows_for_step(Step::R3).all(|r| r.heads == Heads::In));
    }

    #[test]
    fn radial_pair_uses_adjacent_hub_holes() {
        let pattern = compute_pattern(&params(PatternRequest {
            crosses: 0,
            ..PatternRequest::default()
        }))
        .unwrap();
        let r1: Vec<_> = pattern.rows_for_step(Step::R1).map(|r| r.hub_hole).collect();
        assert_eq!(r1, [1, 16]);
        assert!(pattern.rows.iter().all(|r| r.crosses_described == "radial"));
        assert_eq!(
            pattern.derived.valve_clearance_reason,
            "radial spokes leave the valve open"
        );
    }

    #[test]
    fn nds_mirrors_hub_walk() {
        let pattern = default_pattern();
        let l1: Vec<_> = pattern.rows_for_step(Step::L1).collect();
        assert_eq!((l1[0].rim_hole, l1[0].hub_hole), (2, 1));
        assert_eq!((l1[1].rim_hole, l1[1].hub_hole), (3, 2));
        assert_eq!(l1[0].notes, NOTE_NDS_REFERENCE);
        assert_eq!(l1[1].notes, NOTE_NDS_PARTNER);

        let l3: Vec<_> = pattern.rows_for_step(Step::L3).map(|r| r.hub_hole).collect();
        assert_eq!(l3, [15, 13, 11, 9, 7, 5, 3]);

        let l4: Vec<_> = pattern.rows_for_step(Step::L4).map(|r| r.hub_hole).collect();
        assert_eq!(l4, [6, 4, 16, 14, 12, 10, 8]);
    }

    #[test]
    fn invert_heads_flips_every_row() {
        let normal = default_pattern();
        let inverted = compute_pattern(&params(PatternRequest {
            invert_heads: true,
            ..PatternRequest::default()
        }))
        .unwrap();

        for (a, b) in normal.rows.iter().zip(&inverted.rows) {
            assert_eq!(a.heads.flipped(), b.heads);
            assert_eq!((a.rim_hole, a.hub_hole), (b.rim_hole, b.hub_hole));
        }
    }

    #[test]
    fn shifted_start_crowds_valve() {
        let pattern = compute_pattern(&params(PatternRequest {
            start_rim_hole: 2,
            ..PatternRequest::default()
        }))
        .unwrap();
        assert_eq!(pattern.derived.valve_clearance, ValveClearance::Crowded);

        let hole_one = pattern.row_for_rim_hole(1).unwrap();
        assert_eq!(hole_one.step, Step::R1);
        assert!(hole_one.notes.ends_with("Valve right; Leans over valve"));
        assert!(pattern.derived.valve_clearance_reason.contains("R1-2 (hole 1)"));
    }

    #[test]
    fn default_valve_is_clear() {
        let derived = default_pattern().derived;
        assert_eq!(derived.valve_clearance, ValveClearance::Clear);
        assert_eq!(derived.total_spokes, 32);
        assert_eq!(derived.spokes_per_side, 16);
        assert!((derived.lacing_angle_deg - 67.5).abs() < f64::EPSILON);
        assert_eq!(derived.flange_labels.ds, "cassette side");
    }

    #[test]
    fn asymmetrical_only_moves_nds() {
        let base = PatternRequest {
            start_hub_hole_ds: 2,
            start_hub_hole_nds: 5,
            ..PatternRequest::default()
        };
        let sym = compute_pattern(&params(base.clone())).unwrap();
        let asym = compute_pattern(&params(PatternRequest {
            symmetry: "asymmetrical".into(),
            ..base
        }))
        .unwrap();

        let ds = |p: &Pattern| p.rows_for_side(Side::Ds).cloned().collect::<Vec<_>>();
        assert_eq!(ds(&sym), ds(&asym));

        let nds_sym: Vec<_> = sym.rows_for_side(Side::Nds).collect();
        let nds_asym: Vec<_> = asym.rows_for_side(Side::Nds).collect();
        assert_eq!(nds_sym.len(), nds_asym.len());
        assert!(nds_sym.iter().zip(&nds_asym).any(|(a, b)| a.rim_hole != b.rim_hole));
        for (a, b) in nds_sym.iter().zip(&nds_asym) {
            assert_eq!((a.order, a.step, a.k, a.heads), (b.order, b.step, b.k, b.heads));
        }
    }

    #[test]
    fn front_wheel_labels_rotor_side() {
        let pattern = compute_pattern(&params(PatternRequest {
            wheel_type: "front".into(),
            ..PatternRequest::default()
        }))
        .unwrap();
        let l1 = pattern.rows_for_step(Step::L1).next().unwrap();
        assert_eq!(l1.notes, "NDS start reference (rotor side)");
        assert_eq!(pattern.derived.flange_labels.nds, "rotor side");

        let rear = default_pattern();
        for (a, b) in rear.rows.iter().zip(&pattern.rows) {
            assert_eq!((a.rim_hole, a.hub_hole), (b.rim_hole, b.hub_hole));
        }
    }

    #[test]
    fn odd_flange_count_still_bijective() {
        // 22H: H = 11, lanes do not tile and the seam is resolved by the ledger
        for crosses in 0..=4 {
            let pattern = compute_pattern(&params(PatternRequest {
                holes: 22,
                crosses,
                ..PatternRequest::default()
            }))
            .unwrap();
            let mut rims: Vec<_> = pattern.rows.iter().map(|r| r.rim_hole).collect();
            rims.sort_unstable();
            assert_eq!(rims, (1..=22).collect::<Vec<_>>());
            assert_eq!(pattern.rows_for_side(Side::Ds).count(), 11);
        }
    }

    #[test]
    fn audit_catches_corrupted_tables() {
        let params = BuildParameters::default();
        let laid = || {
            let mut generator = Generator::new(&params);
            generator.lay_phases().unwrap();
            generator
        };
        assert_eq!(laid().audit(), Ok(()));

        let mut generator = laid();
        generator.rows[5].rim_hole = generator.rows[4].rim_hole;
        assert_eq!(
            generator.audit(),
            Err(GenerationFault::RimCollision { hole: 13, order: 6 })
        );

        let mut generator = laid();
        generator.rows[3].hub_hole = generator.rows[2].hub_hole;
        assert_eq!(
            generator.audit(),
            Err(GenerationFault::HubCollision {
                side: Side::Ds,
                hole: 3
            })
        );

        let mut generator = laid();
        generator.rows.swap(2, 3);
        assert_eq!(
            generator.audit(),
            Err(GenerationFault::OrderBroken { position: 2 })
        );

        let mut generator = laid();
        generator.rows[0].rim_hole = 0;
        assert!(matches!(
            generator.audit(),
            Err(GenerationFault::OutOfRange { index: 0, .. })
        ));

        let mut generator = laid();
        generator.rows.pop();
        assert_eq!(
            generator.audit(),
            Err(GenerationFault::RowCount {
                expected: 32,
                actual: 31
            })
        );
    }

    #[test]
    fn crosses_text() {
        assert_eq!(describe_crosses(0), "radial");
        assert_eq!(describe_crosses(1), "1 cross (under)");
        assert_eq!(describe_crosses(3), "3 crosses (2 over, 1 under)");
    }

    #[test]
    fn compute_is_deterministic() {
        let p = BuildParameters::default();
        assert_eq!(compute_pattern(&p).unwrap(), compute_pattern(&p).unwrap());
    }
}
