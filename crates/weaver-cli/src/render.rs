//! Plain-text rendering of patterns and cross-count reports.

use std::fmt;

use weaver_lacing::{Pattern, SpokeAssignment};

const HEADERS: [&str; 10] = [
    "Order", "Spoke", "Step", "Side", "Set", "K", "Hub", "Heads", "Rim", "Crosses",
];

/// Cross counts available for one hole count.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrossesReport {
    pub holes: u32,
    pub flange_holes: u32,
    pub max_crosses: u32,
    pub valid: Vec<u32>,
    pub common: Vec<u32>,
    pub supported: bool,
}

fn cross_list(values: &[u32]) -> String {
    values
        .iter()
        .map(|c| format!("{}x", c))
        .collect::<Vec<_>>()
        .join(" ")
}

impl fmt::Display for CrossesReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}H ({} holes per flange)", self.holes, self.flange_holes)?;
        writeln!(f, "  valid:  {}", cross_list(&self.valid))?;
        if self.supported {
            writeln!(f, "  common: {}", cross_list(&self.common))
        } else {
            writeln!(f, "  common: none listed for this hole count")
        }
    }
}

fn cells(row: &SpokeAssignment) -> [String; 10] {
    [
        row.order.to_string(),
        row.spoke.clone(),
        row.step.to_string(),
        row.side.to_string(),
        row.odd_even_set.to_string(),
        row.k.to_string(),
        row.hub_hole.to_string(),
        row.heads.to_string(),
        row.rim_hole.to_string(),
        row.crosses_described.clone(),
    ]
}

/// Header block plus an aligned table of `rows`. Notes trail each line.
pub fn table<'a>(pattern: &Pattern, rows: impl IntoIterator<Item = &'a SpokeAssignment>) -> String {
    let body: Vec<([String; 10], &str)> = rows
        .into_iter()
        .map(|row| (cells(row), row.notes.as_str()))
        .collect();

    let mut widths = HEADERS.map(str::len);
    for (cells, _) in &body {
        for (width, cell) in widths.iter_mut().zip(cells) {
            *width = (*width).max(cell.len());
        }
    }

    let derived = &pattern.derived;
    let mut out = format!(
        "{}\nDS = {}, NDS = {}; lacing angle {:.1} deg\nValve area: {} ({})\n\n",
        pattern.params.summary(),
        derived.flange_labels.ds,
        derived.flange_labels.nds,
        derived.lacing_angle_deg,
        derived.valve_clearance,
        derived.valve_clearance_reason
    );

    let line = |out: &mut String, cells: &[&str], notes: &str| {
        for (cell, width) in cells.iter().zip(widths) {
            out.push_str(&format!("{:<width$}  ", cell, width = width));
        }
        out.push_str(notes);
        let trimmed = out.trim_end().len();
        out.truncate(trimmed);
        out.push('\n');
    };

    line(&mut out, &HEADERS, "Notes");
    for (cells, notes) in &body {
        let cells: Vec<&str> = cells.iter().map(String::as_str).collect();
        line(&mut out, &cells, notes);
    }
    out
}
