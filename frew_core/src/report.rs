//! # Report Projection
//!
//! Flattens the extracted structures into the shapes external renderers
//! consume: tabular rows for spreadsheet writers (one sheet per design
//! case, plus an envelope summary sheet) and per-stage series for chart
//! renderers (one figure per stage with displacement, bending and shear
//! axes). This module knows nothing about any rendering target — rows and
//! series are plain serializable values.
//!
//! Row ordering is a contract: design-case-major, stage-minor, node
//! innermost, with design cases in document order. Spreadsheet writers
//! depend on it.

use serde::Serialize;

use crate::envelope::Envelopes;
use crate::errors::{FrewError, FrewResult};
use crate::results::WallResults;

/// Column labels for [`result_rows`] output, in field order.
pub const RESULT_COLUMNS: [&str; 7] = [
    "Design case",
    "Node #",
    "Node level (m OD)",
    "Stage",
    "Shear (kN/m)",
    "Bending (kNm/m)",
    "Displacement (mm)",
];

/// Column labels for [`envelope_rows`] output, in field order.
pub const ENVELOPE_COLUMNS: [&str; 9] = [
    "Design case",
    "Node #",
    "Node level (m OD)",
    "Max shear (kN/m)",
    "Min shear (kN/m)",
    "Max bending (kNm/m)",
    "Min bending (kNm/m)",
    "Max displacement (mm)",
    "Min displacement (mm)",
];

/// One row of the tabular export: a single (design case, stage, node).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultRow {
    pub design_case: String,
    /// 1-based node number
    pub node: usize,
    /// Node elevation (m OD)
    pub node_level: f64,
    /// 0-based stage index
    pub stage: usize,
    /// Shear (kN/m)
    pub shear: f64,
    /// Bending moment (kN·m/m)
    pub bending: f64,
    /// Displacement (mm)
    pub displacement: f64,
}

/// One row of the envelope summary: a single (design case, node).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnvelopeRow {
    pub design_case: String,
    /// 1-based node number
    pub node: usize,
    /// Node elevation (m OD)
    pub node_level: f64,
    pub shear_max: f64,
    pub shear_min: f64,
    pub bending_max: f64,
    pub bending_min: f64,
    pub displacement_max: f64,
    pub displacement_min: f64,
}

/// Per-case series for one stage, borrowed from the result structure,
/// ready for plotting against the node levels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageSeries<'a> {
    pub design_case: &'a str,
    /// Shear (kN/m)
    pub shear: &'a [f64],
    /// Bending moment (kN·m/m)
    pub bending: &'a [f64],
    /// Displacement (mm)
    pub displacement: &'a [f64],
}

fn check_levels(node_levels: &[f64], num_nodes: usize) -> FrewResult<()> {
    if node_levels.len() != num_nodes {
        return Err(FrewError::consistency(
            "Number of node levels does not match the number of nodes in the results",
        ));
    }
    Ok(())
}

/// Flatten the results into one row per (design case, stage, node).
///
/// Rows are ordered design-case-major (document order), then stage, then
/// node — the order spreadsheet consumers depend on.
pub fn result_rows(results: &WallResults, node_levels: &[f64]) -> FrewResult<Vec<ResultRow>> {
    check_levels(node_levels, results.num_nodes())?;

    let mut rows =
        Vec::with_capacity(results.design_cases().len() * results.stage_count() * results.num_nodes());
    for case in results.design_cases() {
        for stage in 0..results.stage_count() {
            let series = results.series(stage, case)?;
            for node in 0..results.num_nodes() {
                rows.push(ResultRow {
                    design_case: case.clone(),
                    node: node + 1,
                    node_level: node_levels[node],
                    stage,
                    shear: series.shear[node],
                    bending: series.bending[node],
                    displacement: series.displacement[node],
                });
            }
        }
    }
    Ok(rows)
}

/// Flatten the envelopes into one row per (design case, node),
/// design-case-major.
pub fn envelope_rows(envelopes: &Envelopes, node_levels: &[f64]) -> FrewResult<Vec<EnvelopeRow>> {
    let mut rows = Vec::new();
    for case in envelopes.design_cases() {
        let envelope = envelopes.case(case)?;
        check_levels(node_levels, envelope.maximum.shear.len())?;
        for node in 0..node_levels.len() {
            rows.push(EnvelopeRow {
                design_case: case.clone(),
                node: node + 1,
                node_level: node_levels[node],
                shear_max: envelope.maximum.shear[node],
                shear_min: envelope.minimum.shear[node],
                bending_max: envelope.maximum.bending[node],
                bending_min: envelope.minimum.bending[node],
                displacement_max: envelope.maximum.disp[node],
                displacement_min: envelope.minimum.disp[node],
            });
        }
    }
    Ok(rows)
}

/// The per-case series for a single stage, for plot consumption.
pub fn stage_series(results: &WallResults, stage: usize) -> FrewResult<Vec<StageSeries<'_>>> {
    let mut series = Vec::with_capacity(results.design_cases().len());
    for case in results.design_cases() {
        let node_series = results.series(stage, case)?;
        series.push(StageSeries {
            design_case: case,
            shear: &node_series.shear,
            bending: &node_series.bending,
            displacement: &node_series.displacement,
        });
    }
    Ok(series)
}
