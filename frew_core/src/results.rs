//! # Result Extraction
//!
//! Normalizes the engine's raw result sets into typed, shape-validated
//! structures. The document stores results as one array per design case,
//! each holding per-stage arrays of per-node records in engine-native SI
//! units; this module turns that into [`WallResults`] and [`PressureGrid`]
//! values indexed by (stage, design case, node) with reporting units
//! applied (kN/m, kN·m/m, mm, kPa — see [`crate::units`]).
//!
//! Extraction never mutates the document and is deterministic: calling it
//! twice on an unmodified document yields identical structures. A result
//! set with a missing stage entry or a short node array is a structural
//! defect and fails with `Structure` — values are never zero-filled.
//!
//! ## Example
//!
//! ```rust,no_run
//! use frew_core::file_io::load_document;
//! use frew_core::results::WallResults;
//! use std::path::Path;
//!
//! let doc = load_document(Path::new("model.json"))?;
//! let results = WallResults::extract(&doc)?;
//! let series = results.series(0, "SLS")?;
//! println!("stage 0 shear (kN/m): {:?}", series.shear);
//! # Ok::<(), frew_core::errors::FrewError>(())
//! ```

use std::collections::HashMap;

use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::document::ModelDocument;
use crate::engine::AnalysisEngine;
use crate::errors::{FrewError, FrewResult};
use crate::geometry::{node_count, stage_count};
use crate::units::{Kilopascals, KnPerM, KnmPerM, Metres, Millimetres, NPerM, NmPerM, Pascals};

// ============================================================================
// Raw document records
// ============================================================================

/// One result set: the full analysis output for one design case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultSet {
    /// The partial factor set (design case) this result set belongs to
    #[serde(rename = "GeoPartialFactorSet")]
    pub partial_factor_set: PartialFactorSet,

    /// Per-stage results, in stage order
    #[serde(rename = "Stageresults", default)]
    pub stage_results: Vec<StageResults>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Identity of a partial factor set.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PartialFactorSet {
    #[serde(rename = "Name", default)]
    pub name: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Results for one stage within a result set.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StageResults {
    /// Per-node records, in node order
    #[serde(rename = "Noderesults", default)]
    pub node_results: Vec<NodeResult>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Raw per-node result record, engine-native SI units throughout.
///
/// Fields are optional at this level because requiredness belongs to the
/// extraction boundary: a record missing a quantity fails there with
/// `Structure`, never by silently reading zero.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NodeResult {
    /// Shear force (N/m)
    #[serde(rename = "Shear", skip_serializing_if = "Option::is_none")]
    pub shear: Option<f64>,

    /// Bending moment (N·m/m)
    #[serde(rename = "Bending", skip_serializing_if = "Option::is_none")]
    pub bending: Option<f64>,

    /// Horizontal displacement (m)
    #[serde(rename = "Displacement", skip_serializing_if = "Option::is_none")]
    pub displacement: Option<f64>,

    /// Pore water pressure, left side (Pa)
    #[serde(rename = "ULeft", skip_serializing_if = "Option::is_none")]
    pub u_left: Option<f64>,

    /// Pore water pressure, right side (Pa)
    #[serde(rename = "URight", skip_serializing_if = "Option::is_none")]
    pub u_right: Option<f64>,

    /// Horizontal effective soil pressure, left side (Pa)
    #[serde(rename = "PeLeft", skip_serializing_if = "Option::is_none")]
    pub pe_left: Option<f64>,

    /// Horizontal effective soil pressure, right side (Pa)
    #[serde(rename = "PeRight", skip_serializing_if = "Option::is_none")]
    pub pe_right: Option<f64>,

    /// Vertical effective soil pressure, left side (Pa)
    #[serde(rename = "VeLeft", skip_serializing_if = "Option::is_none")]
    pub ve_left: Option<f64>,

    /// Vertical effective soil pressure, right side (Pa)
    #[serde(rename = "VeRight", skip_serializing_if = "Option::is_none")]
    pub ve_right: Option<f64>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ============================================================================
// Precondition checks and design case listing
// ============================================================================

/// Fail with `NoResults` unless the document holds at least one result set.
pub fn assert_results_present(doc: &ModelDocument) -> FrewResult<()> {
    doc.result_sets().map(|_| ())
}

/// Names of the design cases, in document order.
pub fn design_case_names(doc: &ModelDocument) -> FrewResult<Vec<String>> {
    case_names(doc.result_sets()?)
}

/// Number of design cases analysed into the document.
pub fn design_case_count(doc: &ModelDocument) -> FrewResult<usize> {
    Ok(doc.result_sets()?.len())
}

fn case_names(sets: &[ResultSet]) -> FrewResult<Vec<String>> {
    let mut names = Vec::with_capacity(sets.len());
    for set in sets {
        let name = &set.partial_factor_set.name;
        if names.contains(name) {
            return Err(FrewError::consistency(format!(
                "Design case '{name}' appears more than once in the results"
            )));
        }
        names.push(name.clone());
    }
    Ok(names)
}

fn require(value: Option<f64>, path: &str) -> FrewResult<f64> {
    value.ok_or_else(|| FrewError::structure(path.to_string()))
}

/// The node records for one (design case, stage), length-checked against
/// the canonical node count. Short arrays are `Structure`; longer arrays
/// are tolerated and only the canonical prefix is read.
fn checked_node_results(
    set: &ResultSet,
    stage: usize,
    num_nodes: usize,
) -> FrewResult<&[NodeResult]> {
    let stage_results = set
        .stage_results
        .get(stage)
        .ok_or_else(|| FrewError::structure("Frew Results/Stageresults"))?;
    if stage_results.node_results.len() < num_nodes {
        return Err(FrewError::structure(
            "Frew Results/Stageresults/Noderesults",
        ));
    }
    Ok(&stage_results.node_results[..num_nodes])
}

// ============================================================================
// Wall results
// ============================================================================

/// Shear, bending and displacement series for one (stage, design case),
/// one value per node, in reporting units.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NodeSeries {
    /// Shear (kN/m)
    pub shear: Vec<f64>,
    /// Bending moment (kN·m/m)
    pub bending: Vec<f64>,
    /// Displacement (mm)
    pub displacement: Vec<f64>,
}

/// Wall results for every stage and design case.
///
/// Stage-major: `stages[s]` maps design case name → [`NodeSeries`]. Design
/// case order is the document order of the result sets and is preserved
/// separately from the maps, because that order is the reporting contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallResults {
    design_cases: Vec<String>,
    stages: Vec<HashMap<String, NodeSeries>>,
    num_nodes: usize,
}

impl WallResults {
    /// Build from parts, validating shape: every stage must carry a series
    /// for every design case, and every series must have one value per
    /// node. Catches structural defects at construction instead of at some
    /// arbitrary downstream access.
    pub fn new(
        design_cases: Vec<String>,
        stages: Vec<HashMap<String, NodeSeries>>,
        num_nodes: usize,
    ) -> FrewResult<Self> {
        for (stage, per_case) in stages.iter().enumerate() {
            for case in &design_cases {
                let series = per_case.get(case).ok_or_else(|| {
                    FrewError::consistency(format!(
                        "Stage {stage} has no series for design case '{case}'"
                    ))
                })?;
                if series.shear.len() != num_nodes
                    || series.bending.len() != num_nodes
                    || series.displacement.len() != num_nodes
                {
                    return Err(FrewError::consistency(format!(
                        "Series length for design case '{case}' at stage {stage} \
                         does not match the node count"
                    )));
                }
            }
        }
        Ok(WallResults {
            design_cases,
            stages,
            num_nodes,
        })
    }

    /// Extract the wall results from an analysed document.
    pub fn extract(doc: &ModelDocument) -> FrewResult<Self> {
        let num_nodes = node_count(doc)?;
        let num_stages = stage_count(doc)?;
        let sets = doc.result_sets()?;
        let design_cases = case_names(sets)?;

        let mut stages = Vec::with_capacity(num_stages);
        for stage in 0..num_stages {
            let mut per_case = HashMap::with_capacity(sets.len());
            for set in sets {
                let mut series = NodeSeries::default();
                for record in checked_node_results(set, stage, num_nodes)? {
                    series.shear.push(
                        KnPerM::from(NPerM(require(record.shear, "Noderesults/Shear")?)).value(),
                    );
                    series.bending.push(
                        KnmPerM::from(NmPerM(require(record.bending, "Noderesults/Bending")?))
                            .value(),
                    );
                    series.displacement.push(
                        Millimetres::from(Metres(require(
                            record.displacement,
                            "Noderesults/Displacement",
                        )?))
                        .value(),
                    );
                }
                per_case.insert(set.partial_factor_set.name.clone(), series);
            }
            stages.push(per_case);
        }

        debug!(
            "extracted wall results: {} design cases, {num_stages} stages, {num_nodes} nodes",
            design_cases.len()
        );
        WallResults::new(design_cases, stages, num_nodes)
    }

    /// Batch the automation interface's raw per-node scalar getters into
    /// the normalized structure, for workflows that talk to the engine
    /// directly instead of round-tripping a document. The engine addresses
    /// nodes and stages 0-based.
    pub fn from_engine(
        engine: &dyn AnalysisEngine,
        design_case: &str,
        num_stages: usize,
        num_nodes: usize,
    ) -> FrewResult<Self> {
        let mut stages = Vec::with_capacity(num_stages);
        for stage in 0..num_stages {
            let mut series = NodeSeries::default();
            for node in 0..num_nodes {
                series
                    .shear
                    .push(KnPerM::from(NPerM(engine.node_shear(node, stage)?)).value());
                series
                    .bending
                    .push(KnmPerM::from(NmPerM(engine.node_bending(node, stage)?)).value());
                series
                    .displacement
                    .push(Millimetres::from(Metres(engine.node_displacement(node, stage)?)).value());
            }
            let mut per_case = HashMap::with_capacity(1);
            per_case.insert(design_case.to_string(), series);
            stages.push(per_case);
        }
        WallResults::new(vec![design_case.to_string()], stages, num_nodes)
    }

    /// Design case names, in document order.
    pub fn design_cases(&self) -> &[String] {
        &self.design_cases
    }

    /// Number of stages.
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// Number of nodes per series.
    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    /// The series for one (stage, design case).
    pub fn series(&self, stage: usize, design_case: &str) -> FrewResult<&NodeSeries> {
        let per_case = self.stages.get(stage).ok_or_else(|| {
            FrewError::validation(
                "stage",
                stage.to_string(),
                format!("Model has {} stages", self.stages.len()),
            )
        })?;
        per_case
            .get(design_case)
            .ok_or_else(|| FrewError::not_found("design case", design_case))
    }
}

// ============================================================================
// Pressures
// ============================================================================

/// Left/right pressure values for one (stage, design case), one value per
/// node, in kPa.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PressureSeries {
    pub left: Vec<f64>,
    pub right: Vec<f64>,
}

/// One pressure quantity for every stage and design case, stage-major like
/// [`WallResults`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PressureGrid {
    design_cases: Vec<String>,
    stages: Vec<HashMap<String, PressureSeries>>,
    num_nodes: usize,
}

impl PressureGrid {
    /// Build from parts, validating shape the same way as
    /// [`WallResults::new`]: every stage must carry a series for every
    /// design case, with one left and one right value per node.
    pub fn new(
        design_cases: Vec<String>,
        stages: Vec<HashMap<String, PressureSeries>>,
        num_nodes: usize,
    ) -> FrewResult<Self> {
        for (stage, per_case) in stages.iter().enumerate() {
            for case in &design_cases {
                let series = per_case.get(case).ok_or_else(|| {
                    FrewError::consistency(format!(
                        "Stage {stage} has no pressure series for design case '{case}'"
                    ))
                })?;
                if series.left.len() != num_nodes || series.right.len() != num_nodes {
                    return Err(FrewError::consistency(format!(
                        "Pressure series length for design case '{case}' at stage {stage} \
                         does not match the node count"
                    )));
                }
            }
        }
        Ok(PressureGrid {
            design_cases,
            stages,
            num_nodes,
        })
    }

    pub fn design_cases(&self) -> &[String] {
        &self.design_cases
    }

    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    /// The left/right series for one (stage, design case).
    pub fn series(&self, stage: usize, design_case: &str) -> FrewResult<&PressureSeries> {
        let per_case = self.stages.get(stage).ok_or_else(|| {
            FrewError::validation(
                "stage",
                stage.to_string(),
                format!("Model has {} stages", self.stages.len()),
            )
        })?;
        per_case
            .get(design_case)
            .ok_or_else(|| FrewError::not_found("design case", design_case))
    }

    /// Whether two grids cover the same design cases, stages and nodes.
    pub fn same_shape(&self, other: &PressureGrid) -> bool {
        self.design_cases == other.design_cases
            && self.stages.len() == other.stages.len()
            && self.num_nodes == other.num_nodes
    }
}

fn extract_grid<L, R>(doc: &ModelDocument, left: L, right: R, path: &str) -> FrewResult<PressureGrid>
where
    L: Fn(&NodeResult) -> Option<f64>,
    R: Fn(&NodeResult) -> Option<f64>,
{
    let num_nodes = node_count(doc)?;
    let num_stages = stage_count(doc)?;
    let sets = doc.result_sets()?;
    let design_cases = case_names(sets)?;

    let mut stages = Vec::with_capacity(num_stages);
    for stage in 0..num_stages {
        let mut per_case = HashMap::with_capacity(sets.len());
        for set in sets {
            let mut series = PressureSeries::default();
            for record in checked_node_results(set, stage, num_nodes)? {
                series
                    .left
                    .push(Kilopascals::from(Pascals(require(left(record), path)?)).value());
                series
                    .right
                    .push(Kilopascals::from(Pascals(require(right(record), path)?)).value());
            }
            per_case.insert(set.partial_factor_set.name.clone(), series);
        }
        stages.push(per_case);
    }

    Ok(PressureGrid {
        design_cases,
        stages,
        num_nodes,
    })
}

/// Pore water pressures along the wall.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterPressures {
    /// Pore pressure, both sides (kPa)
    pub pore: PressureGrid,
}

impl WaterPressures {
    /// Extract pore pressures from an analysed document.
    pub fn extract(doc: &ModelDocument) -> FrewResult<Self> {
        Ok(WaterPressures {
            pore: extract_grid(doc, |r| r.u_left, |r| r.u_right, "Noderesults/ULeft")?,
        })
    }
}

/// Effective soil pressures along the wall.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoilPressures {
    /// Horizontal effective pressure, both sides (kPa)
    pub horizontal_eff: PressureGrid,
    /// Vertical effective pressure, both sides (kPa)
    pub vertical_eff: PressureGrid,
}

impl SoilPressures {
    /// Extract effective soil pressures from an analysed document.
    pub fn extract(doc: &ModelDocument) -> FrewResult<Self> {
        Ok(SoilPressures {
            horizontal_eff: extract_grid(doc, |r| r.pe_left, |r| r.pe_right, "Noderesults/PeLeft")?,
            vertical_eff: extract_grid(doc, |r| r.ve_left, |r| r.ve_right, "Noderesults/VeLeft")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// Raw node record in engine-native units; right-side pressures are
    /// half the left-side values so sides are distinguishable.
    fn node(shear_n: f64, bending_nm: f64, disp_m: f64, u_pa: f64, pe_pa: f64) -> Value {
        json!({
            "Shear": shear_n,
            "Bending": bending_nm,
            "Displacement": disp_m,
            "ULeft": u_pa, "URight": u_pa / 2.0,
            "PeLeft": pe_pa, "PeRight": pe_pa / 2.0,
            "VeLeft": pe_pa * 2.0, "VeRight": pe_pa
        })
    }

    fn document_with_results() -> ModelDocument {
        let stages = json!([
            {"Name": "A", "GeoFrewNodes": [{"Level": 10.0}, {"Level": 8.0}, {"Level": 6.0}]},
            {"Name": "B", "GeoFrewNodes": [{"Level": 10.0}, {"Level": 8.0}, {"Level": 6.0}]}
        ]);
        serde_json::from_value(json!({
            "Stages": stages,
            "Frew Results": [
                {
                    "GeoPartialFactorSet": {"Name": "SLS"},
                    "Stageresults": [
                        {"Noderesults": [
                            node(1000.0, 10_000.0, 0.001, 5000.0, 8000.0),
                            node(2000.0, 20_000.0, 0.002, 6000.0, 9000.0),
                            node(3000.0, 30_000.0, 0.003, 7000.0, 10_000.0)
                        ]},
                        {"Noderesults": [
                            node(4000.0, 40_000.0, 0.004, 5500.0, 8500.0),
                            node(1000.0, 15_000.0, 0.001, 6500.0, 9500.0),
                            node(5000.0, 50_000.0, 0.005, 7500.0, 10_500.0)
                        ]}
                    ]
                },
                {
                    "GeoPartialFactorSet": {"Name": "ULS"},
                    "Stageresults": [
                        {"Noderesults": [
                            node(1500.0, 12_000.0, 0.0015, 5100.0, 8100.0),
                            node(2500.0, 22_000.0, 0.0025, 6100.0, 9100.0),
                            node(3500.0, 32_000.0, 0.0035, 7100.0, 10_100.0)
                        ]},
                        {"Noderesults": [
                            node(4500.0, 42_000.0, 0.0045, 5600.0, 8600.0),
                            node(1500.0, 17_000.0, 0.0015, 6600.0, 9600.0),
                            node(5500.0, 52_000.0, 0.0055, 7600.0, 10_600.0)
                        ]}
                    ]
                }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_assert_results_present() {
        let doc = document_with_results();
        assert!(assert_results_present(&doc).is_ok());

        let empty: ModelDocument = serde_json::from_value(json!({"Stages": []})).unwrap();
        assert_eq!(
            assert_results_present(&empty).unwrap_err(),
            FrewError::NoResults
        );
    }

    #[test]
    fn test_no_results_leaves_document_unchanged() {
        let doc: ModelDocument = serde_json::from_value(json!({
            "Stages": [{"Name": "A", "GeoFrewNodes": [{"Level": 10.0}]}],
            "Materials": [{"Name": "Made Ground"}]
        }))
        .unwrap();
        let before = doc.clone();

        assert_eq!(WallResults::extract(&doc).unwrap_err(), FrewError::NoResults);
        assert_eq!(doc, before);
    }

    #[test]
    fn test_design_case_names() {
        let doc = document_with_results();
        assert_eq!(design_case_names(&doc).unwrap(), vec!["SLS", "ULS"]);
        assert_eq!(design_case_count(&doc).unwrap(), 2);
    }

    #[test]
    fn test_extract_converts_units() {
        let doc = document_with_results();
        let results = WallResults::extract(&doc).unwrap();

        let series = results.series(0, "SLS").unwrap();
        // N/m -> kN/m, N·m/m -> kN·m/m, m -> mm
        assert_eq!(series.shear, vec![1.0, 2.0, 3.0]);
        assert_eq!(series.bending, vec![10.0, 20.0, 30.0]);
        assert_eq!(series.displacement, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_extract_is_idempotent() {
        let doc = document_with_results();
        let first = WallResults::extract(&doc).unwrap();
        let second = WallResults::extract(&doc).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_extract_preserves_case_order() {
        let doc = document_with_results();
        let results = WallResults::extract(&doc).unwrap();
        assert_eq!(results.design_cases(), &["SLS", "ULS"]);
        assert_eq!(results.stage_count(), 2);
        assert_eq!(results.num_nodes(), 3);
    }

    #[test]
    fn test_extract_short_node_array() {
        let mut doc = document_with_results();
        doc.results.as_mut().unwrap()[0].stage_results[1]
            .node_results
            .pop();
        assert_eq!(
            WallResults::extract(&doc).unwrap_err(),
            FrewError::structure("Frew Results/Stageresults/Noderesults")
        );
    }

    #[test]
    fn test_extract_missing_stage_entry() {
        let mut doc = document_with_results();
        doc.results.as_mut().unwrap()[1].stage_results.pop();
        assert_eq!(
            WallResults::extract(&doc).unwrap_err(),
            FrewError::structure("Frew Results/Stageresults")
        );
    }

    #[test]
    fn test_extract_missing_quantity_is_structure() {
        let mut doc = document_with_results();
        doc.results.as_mut().unwrap()[0].stage_results[0].node_results[2].shear = None;
        assert_eq!(
            WallResults::extract(&doc).unwrap_err(),
            FrewError::structure("Noderesults/Shear")
        );
    }

    #[test]
    fn test_series_bad_stage() {
        let doc = document_with_results();
        let results = WallResults::extract(&doc).unwrap();
        assert!(matches!(
            results.series(5, "SLS").unwrap_err(),
            FrewError::Validation { .. }
        ));
        assert!(matches!(
            results.series(0, "ALS").unwrap_err(),
            FrewError::NotFound { .. }
        ));
    }

    #[test]
    fn test_duplicate_design_case() {
        let mut doc = document_with_results();
        let clone = doc.results.as_ref().unwrap()[0].clone();
        doc.results.as_mut().unwrap().push(clone);
        assert!(matches!(
            WallResults::extract(&doc).unwrap_err(),
            FrewError::Consistency { .. }
        ));
    }

    #[test]
    fn test_water_pressures() {
        let doc = document_with_results();
        let water = WaterPressures::extract(&doc).unwrap();

        let series = water.pore.series(0, "SLS").unwrap();
        assert_eq!(series.left, vec![5.0, 6.0, 7.0]);
        assert_eq!(series.right, vec![2.5, 3.0, 3.5]);
    }

    #[test]
    fn test_soil_pressures() {
        let doc = document_with_results();
        let soil = SoilPressures::extract(&doc).unwrap();

        let horizontal = soil.horizontal_eff.series(0, "SLS").unwrap();
        assert_eq!(horizontal.left, vec![8.0, 9.0, 10.0]);
        assert_eq!(horizontal.right, vec![4.0, 4.5, 5.0]);

        let vertical = soil.vertical_eff.series(0, "SLS").unwrap();
        assert_eq!(vertical.left, vec![16.0, 18.0, 20.0]);
    }

    #[test]
    fn test_pressure_grid_shape() {
        let doc = document_with_results();
        let water = WaterPressures::extract(&doc).unwrap();
        let soil = SoilPressures::extract(&doc).unwrap();
        assert!(water.pore.same_shape(&soil.horizontal_eff));
    }

    #[test]
    fn test_wall_results_new_rejects_bad_shape() {
        let mut per_case = HashMap::new();
        per_case.insert(
            "SLS".to_string(),
            NodeSeries {
                shear: vec![1.0, 2.0],
                bending: vec![1.0, 2.0],
                displacement: vec![1.0], // short
            },
        );
        assert!(matches!(
            WallResults::new(vec!["SLS".to_string()], vec![per_case], 2).unwrap_err(),
            FrewError::Consistency { .. }
        ));
    }

    #[test]
    fn test_wall_results_new_rejects_missing_case() {
        let stages = vec![HashMap::new()];
        assert!(matches!(
            WallResults::new(vec!["SLS".to_string()], stages, 0).unwrap_err(),
            FrewError::Consistency { .. }
        ));
    }
}
