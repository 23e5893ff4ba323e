//! # Envelopes and Derived Quantities
//!
//! Reductions over the extracted results: worst-case envelopes across
//! stages, net pressures, and stage-to-stage deflection deltas. Everything
//! here is a pure projection of [`WallResults`]/pressure structures — no
//! derived value is ever persisted, so nothing can go stale relative to
//! the document.
//!
//! [`Calculator`] takes the soil and water pressure structures it needs
//! as constructor inputs and exposes the combined quantities as methods.
//!
//! ## Example
//!
//! ```rust,no_run
//! use frew_core::envelope::Envelopes;
//! use frew_core::file_io::load_document;
//! use frew_core::results::WallResults;
//! use std::path::Path;
//!
//! let doc = load_document(Path::new("model.json"))?;
//! let results = WallResults::extract(&doc)?;
//! let envelopes = Envelopes::from_results(&results)?;
//! let sls = envelopes.case("SLS")?;
//! println!("worst shear per node (kN/m): {:?}", sls.maximum.shear);
//! # Ok::<(), frew_core::errors::FrewError>(())
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::errors::{FrewError, FrewResult};
use crate::results::{PressureGrid, PressureSeries, SoilPressures, WallResults, WaterPressures};

// ============================================================================
// Envelopes
// ============================================================================

/// One bound (maximum or minimum) of the wall results, one value per node.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EnvelopeBound {
    /// Shear (kN/m)
    pub shear: Vec<f64>,
    /// Bending moment (kN·m/m)
    pub bending: Vec<f64>,
    /// Displacement (mm)
    pub disp: Vec<f64>,
}

/// Maximum and minimum bounds for one design case.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CaseEnvelope {
    pub maximum: EnvelopeBound,
    pub minimum: EnvelopeBound,
}

/// Worst-case envelopes across all stages, per design case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelopes {
    design_cases: Vec<String>,
    cases: HashMap<String, CaseEnvelope>,
}

impl Envelopes {
    /// Reduce the extracted results to max/min per node across stages.
    ///
    /// Requires at least one stage: an empty stage sequence is a
    /// precondition violation, not a silently-returned empty envelope.
    pub fn from_results(results: &WallResults) -> FrewResult<Self> {
        if results.stage_count() == 0 {
            return Err(FrewError::validation(
                "results",
                "0 stages",
                "Envelopes need at least one analysed stage",
            ));
        }

        let mut cases = HashMap::with_capacity(results.design_cases().len());
        for case in results.design_cases() {
            let mut envelope = CaseEnvelope::default();
            for node in 0..results.num_nodes() {
                let mut shear = (f64::NEG_INFINITY, f64::INFINITY);
                let mut bending = (f64::NEG_INFINITY, f64::INFINITY);
                let mut disp = (f64::NEG_INFINITY, f64::INFINITY);
                for stage in 0..results.stage_count() {
                    let series = results.series(stage, case)?;
                    shear = (shear.0.max(series.shear[node]), shear.1.min(series.shear[node]));
                    bending = (
                        bending.0.max(series.bending[node]),
                        bending.1.min(series.bending[node]),
                    );
                    disp = (
                        disp.0.max(series.displacement[node]),
                        disp.1.min(series.displacement[node]),
                    );
                }
                envelope.maximum.shear.push(shear.0);
                envelope.minimum.shear.push(shear.1);
                envelope.maximum.bending.push(bending.0);
                envelope.minimum.bending.push(bending.1);
                envelope.maximum.disp.push(disp.0);
                envelope.minimum.disp.push(disp.1);
            }
            cases.insert(case.clone(), envelope);
        }

        Ok(Envelopes {
            design_cases: results.design_cases().to_vec(),
            cases,
        })
    }

    /// Design case names, in document order.
    pub fn design_cases(&self) -> &[String] {
        &self.design_cases
    }

    /// The envelope for one design case.
    pub fn case(&self, design_case: &str) -> FrewResult<&CaseEnvelope> {
        self.cases
            .get(design_case)
            .ok_or_else(|| FrewError::not_found("design case", design_case))
    }
}

// ============================================================================
// Derived pressure quantities
// ============================================================================

/// Elementwise sum of horizontal effective and pore pressure, per side.
pub fn net_total_pressure(
    horizontal_eff: &PressureSeries,
    pore: &PressureSeries,
) -> FrewResult<PressureSeries> {
    if horizontal_eff.left.len() != pore.left.len()
        || horizontal_eff.right.len() != pore.right.len()
    {
        return Err(FrewError::consistency(
            "Soil and water pressure series have different node counts",
        ));
    }
    Ok(PressureSeries {
        left: horizontal_eff
            .left
            .iter()
            .zip(&pore.left)
            .map(|(pe, u)| pe + u)
            .collect(),
        right: horizontal_eff
            .right
            .iter()
            .zip(&pore.right)
            .map(|(pe, u)| pe + u)
            .collect(),
    })
}

/// Elementwise left-minus-right differential.
pub fn net_differential(left: &[f64], right: &[f64]) -> FrewResult<Vec<f64>> {
    if left.len() != right.len() {
        return Err(FrewError::consistency(
            "Left and right series have different node counts",
        ));
    }
    Ok(left.iter().zip(right).map(|(l, r)| l - r).collect())
}

/// Displacement at `stage` minus displacement at `reference_stage`, per
/// node (mm). The reference stage is caller-selected per use case — e.g.
/// the first stage, or two stages prior — and never inferred.
pub fn net_deflection(
    results: &WallResults,
    design_case: &str,
    stage: usize,
    reference_stage: usize,
) -> FrewResult<Vec<f64>> {
    let current = results.series(stage, design_case)?;
    let reference = results.series(reference_stage, design_case)?;
    Ok(current
        .displacement
        .iter()
        .zip(&reference.displacement)
        .map(|(d, d0)| d - d0)
        .collect())
}

/// Net lateral pressure profiles, one value per node (kPa), stage-major
/// per design case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetPressures {
    design_cases: Vec<String>,
    stages: Vec<HashMap<String, Vec<f64>>>,
}

impl NetPressures {
    pub fn design_cases(&self) -> &[String] {
        &self.design_cases
    }

    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// The net profile for one (stage, design case).
    pub fn series(&self, stage: usize, design_case: &str) -> FrewResult<&[f64]> {
        let per_case = self.stages.get(stage).ok_or_else(|| {
            FrewError::validation(
                "stage",
                stage.to_string(),
                format!("Model has {} stages", self.stages.len()),
            )
        })?;
        per_case
            .get(design_case)
            .map(Vec::as_slice)
            .ok_or_else(|| FrewError::not_found("design case", design_case))
    }
}

// ============================================================================
// Calculator
// ============================================================================

/// Combines soil and water pressure structures into total and net lateral
/// pressures. Explicit composition: both inputs are taken at construction
/// and validated to cover the same design cases, stages and nodes.
#[derive(Debug, Clone)]
pub struct Calculator {
    soil: SoilPressures,
    water: WaterPressures,
}

impl Calculator {
    pub fn new(soil: SoilPressures, water: WaterPressures) -> FrewResult<Self> {
        if !soil.horizontal_eff.same_shape(&water.pore) {
            return Err(FrewError::consistency(
                "Soil and water pressures do not cover the same design cases, stages and nodes",
            ));
        }
        Ok(Calculator { soil, water })
    }

    /// Total lateral pressure (horizontal effective + pore), both sides.
    pub fn total_pressures(&self) -> FrewResult<PressureGrid> {
        let horizontal = &self.soil.horizontal_eff;
        let pore = &self.water.pore;

        let mut stages = Vec::with_capacity(horizontal.stage_count());
        for stage in 0..horizontal.stage_count() {
            let mut per_case = HashMap::with_capacity(horizontal.design_cases().len());
            for case in horizontal.design_cases() {
                let total =
                    net_total_pressure(horizontal.series(stage, case)?, pore.series(stage, case)?)?;
                per_case.insert(case.clone(), total);
            }
            stages.push(per_case);
        }
        PressureGrid::new(
            horizontal.design_cases().to_vec(),
            stages,
            horizontal.num_nodes(),
        )
    }

    /// Net lateral pressure profile: left total minus right total.
    pub fn net_total_pressures(&self) -> FrewResult<NetPressures> {
        let totals = self.total_pressures()?;

        let mut stages = Vec::with_capacity(totals.stage_count());
        for stage in 0..totals.stage_count() {
            let mut per_case = HashMap::with_capacity(totals.design_cases().len());
            for case in totals.design_cases() {
                let series = totals.series(stage, case)?;
                per_case.insert(case.clone(), net_differential(&series.left, &series.right)?);
            }
            stages.push(per_case);
        }
        Ok(NetPressures {
            design_cases: totals.design_cases().to_vec(),
            stages,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::NodeSeries;

    fn series(shear: Vec<f64>, bending: Vec<f64>, displacement: Vec<f64>) -> NodeSeries {
        NodeSeries {
            shear,
            bending,
            displacement,
        }
    }

    fn two_stage_results() -> WallResults {
        let stage0 = HashMap::from([(
            "SLS".to_string(),
            series(
                vec![1.0, 2.0, 3.0],
                vec![10.0, 20.0, 30.0],
                vec![1.0, 2.0, 3.0],
            ),
        )]);
        let stage1 = HashMap::from([(
            "SLS".to_string(),
            series(
                vec![4.0, 1.0, 5.0],
                vec![5.0, 25.0, 15.0],
                vec![4.0, 1.0, 5.0],
            ),
        )]);
        WallResults::new(vec!["SLS".to_string()], vec![stage0, stage1], 3).unwrap()
    }

    #[test]
    fn test_envelope_scenario() {
        let results = two_stage_results();
        let envelopes = Envelopes::from_results(&results).unwrap();
        let sls = envelopes.case("SLS").unwrap();

        assert_eq!(sls.maximum.shear, vec![4.0, 2.0, 5.0]);
        assert_eq!(sls.minimum.shear, vec![1.0, 1.0, 3.0]);
        assert_eq!(sls.maximum.bending, vec![10.0, 25.0, 30.0]);
        assert_eq!(sls.minimum.bending, vec![5.0, 20.0, 15.0]);
    }

    #[test]
    fn test_envelope_dominates_every_stage() {
        let results = two_stage_results();
        let envelopes = Envelopes::from_results(&results).unwrap();
        let sls = envelopes.case("SLS").unwrap();

        for stage in 0..results.stage_count() {
            let series = results.series(stage, "SLS").unwrap();
            for node in 0..results.num_nodes() {
                assert!(sls.maximum.shear[node] >= series.shear[node]);
                assert!(sls.minimum.shear[node] <= series.shear[node]);
                assert!(sls.maximum.disp[node] >= series.displacement[node]);
                assert!(sls.minimum.disp[node] <= series.displacement[node]);
            }
        }
    }

    #[test]
    fn test_envelope_requires_stages() {
        let results = WallResults::new(vec!["SLS".to_string()], vec![], 0).unwrap();
        assert!(matches!(
            Envelopes::from_results(&results).unwrap_err(),
            FrewError::Validation { .. }
        ));
    }

    #[test]
    fn test_envelope_unknown_case() {
        let envelopes = Envelopes::from_results(&two_stage_results()).unwrap();
        assert!(matches!(
            envelopes.case("ULS").unwrap_err(),
            FrewError::NotFound { .. }
        ));
    }

    #[test]
    fn test_net_total_pressure() {
        let horizontal = PressureSeries {
            left: vec![8.0, 9.0],
            right: vec![4.0, 4.5],
        };
        let pore = PressureSeries {
            left: vec![5.0, 6.0],
            right: vec![2.5, 3.0],
        };
        let total = net_total_pressure(&horizontal, &pore).unwrap();
        assert_eq!(total.left, vec![13.0, 15.0]);
        assert_eq!(total.right, vec![6.5, 7.5]);
    }

    #[test]
    fn test_net_total_pressure_shape_mismatch() {
        let horizontal = PressureSeries {
            left: vec![8.0],
            right: vec![4.0],
        };
        let pore = PressureSeries {
            left: vec![5.0, 6.0],
            right: vec![2.5, 3.0],
        };
        assert!(matches!(
            net_total_pressure(&horizontal, &pore).unwrap_err(),
            FrewError::Consistency { .. }
        ));
    }

    #[test]
    fn test_net_differential() {
        let net = net_differential(&[13.0, 15.0], &[6.5, 7.5]).unwrap();
        assert_eq!(net, vec![6.5, 7.5]);

        assert!(net_differential(&[1.0], &[1.0, 2.0]).is_err());
    }

    #[test]
    fn test_net_deflection() {
        let results = two_stage_results();
        let delta = net_deflection(&results, "SLS", 1, 0).unwrap();
        assert_eq!(delta, vec![3.0, -1.0, 2.0]);

        // Reference stage is caller-selected; same stage gives zeros
        let zero = net_deflection(&results, "SLS", 1, 1).unwrap();
        assert_eq!(zero, vec![0.0, 0.0, 0.0]);
    }

    fn pressure_grid(cases: &[&str], stages: usize, values: &[f64]) -> PressureGrid {
        let mut per_stage = Vec::new();
        for _ in 0..stages {
            let mut per_case = HashMap::new();
            for case in cases {
                per_case.insert(
                    case.to_string(),
                    PressureSeries {
                        left: values.to_vec(),
                        right: values.iter().map(|v| v / 2.0).collect(),
                    },
                );
            }
            per_stage.push(per_case);
        }
        PressureGrid::new(
            cases.iter().map(|c| c.to_string()).collect(),
            per_stage,
            values.len(),
        )
        .unwrap()
    }

    #[test]
    fn test_calculator_totals_and_nets() {
        let soil = SoilPressures {
            horizontal_eff: pressure_grid(&["SLS"], 2, &[8.0, 10.0]),
            vertical_eff: pressure_grid(&["SLS"], 2, &[16.0, 20.0]),
        };
        let water = WaterPressures {
            pore: pressure_grid(&["SLS"], 2, &[4.0, 6.0]),
        };

        let calc = Calculator::new(soil, water).unwrap();

        let totals = calc.total_pressures().unwrap();
        let series = totals.series(0, "SLS").unwrap();
        assert_eq!(series.left, vec![12.0, 16.0]);
        assert_eq!(series.right, vec![6.0, 8.0]);

        let nets = calc.net_total_pressures().unwrap();
        assert_eq!(nets.series(0, "SLS").unwrap(), &[6.0, 8.0]);
        assert_eq!(nets.stage_count(), 2);
    }

    #[test]
    fn test_calculator_rejects_shape_mismatch() {
        let soil = SoilPressures {
            horizontal_eff: pressure_grid(&["SLS"], 2, &[8.0, 10.0]),
            vertical_eff: pressure_grid(&["SLS"], 2, &[16.0, 20.0]),
        };
        let water = WaterPressures {
            pore: pressure_grid(&["ULS"], 2, &[4.0, 6.0]),
        };
        assert!(matches!(
            Calculator::new(soil, water).unwrap_err(),
            FrewError::Consistency { .. }
        ));
    }
}
