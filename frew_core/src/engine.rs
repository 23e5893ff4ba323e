//! # Engine Automation Boundary
//!
//! The external analysis engine is a licensed, closed program driven over
//! an automation interface: open a model file, delete stale results,
//! analyse stage by stage, save, close. This module models that interface
//! as the [`AnalysisEngine`] trait and wraps every use of it in a scoped
//! [`EngineSession`] so a handle opened on a model is closed on every
//! path, including failures mid-analysis.
//!
//! The client owns exclusive access to one engine instance for the
//! duration of one open-analyse-save-close cycle; no concurrent use of the
//! same handle is supported.
//!
//! ## Example
//!
//! ```rust,no_run
//! use frew_core::engine::{analyse, AnalysisEngine};
//! use frew_core::file_io::load_document;
//! use std::path::Path;
//!
//! # fn run(engine: &mut dyn AnalysisEngine) -> Result<(), frew_core::errors::FrewError> {
//! let mut doc = load_document(Path::new("model.json"))?;
//! analyse(&mut doc, engine, &std::env::temp_dir())?;
//! assert!(doc.has_results());
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::document::ModelDocument;
use crate::errors::{FrewError, FrewResult};
use crate::file_io::{load_document, save_document};
use crate::geometry::stage_count;

/// Which side of the wall a pressure getter reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

/// The engine's automation interface.
///
/// Lifecycle calls (`open` .. `close`) drive one analysis cycle; the
/// scalar getters are the raw, unbatched per-node access pattern the
/// extraction layer batches into normalized structures
/// ([`crate::results::WallResults::from_engine`]). Nodes and stages are
/// 0-based here, and all scalar values are engine-native SI (N/m, N·m/m,
/// m, Pa, N·m²/m).
pub trait AnalysisEngine {
    fn open(&mut self, path: &Path) -> FrewResult<()>;
    fn delete_results(&mut self) -> FrewResult<()>;
    /// Run the analysis through the given final stage index.
    fn analyse(&mut self, final_stage: usize) -> FrewResult<()>;
    fn save_as(&mut self, path: &Path) -> FrewResult<()>;
    fn close(&mut self);

    /// Shear at a node (N/m)
    fn node_shear(&self, node: usize, stage: usize) -> FrewResult<f64>;
    /// Bending moment at a node (N·m/m)
    fn node_bending(&self, node: usize, stage: usize) -> FrewResult<f64>;
    /// Displacement at a node (m)
    fn node_displacement(&self, node: usize, stage: usize) -> FrewResult<f64>;
    /// Wall stiffness EI at a node (N·m²/m)
    fn wall_ei(&self, node: usize, stage: usize) -> FrewResult<f64>;
    /// Pore water pressure at a node (Pa)
    fn pore_pressure(&self, side: Side, node: usize, stage: usize) -> FrewResult<f64>;
    /// Horizontal effective soil pressure at a node (Pa)
    fn horizontal_eff_pressure(&self, side: Side, node: usize, stage: usize) -> FrewResult<f64>;
    /// Vertical effective soil pressure at a node (Pa)
    fn vertical_eff_pressure(&self, side: Side, node: usize, stage: usize) -> FrewResult<f64>;
}

/// Scoped engine session: the handle is opened on construction and closed
/// when the session is dropped, whatever happens in between.
pub struct EngineSession<'a> {
    engine: &'a mut dyn AnalysisEngine,
}

impl<'a> EngineSession<'a> {
    /// Open the model at `path` on the engine.
    pub fn open(engine: &'a mut dyn AnalysisEngine, path: &Path) -> FrewResult<Self> {
        engine.open(path)?;
        debug!("engine session opened on {}", path.display());
        Ok(EngineSession { engine })
    }

    pub fn delete_results(&mut self) -> FrewResult<()> {
        self.engine.delete_results()
    }

    pub fn analyse(&mut self, final_stage: usize) -> FrewResult<()> {
        self.engine.analyse(final_stage)
    }

    pub fn save_as(&mut self, path: &Path) -> FrewResult<()> {
        self.engine.save_as(path)
    }

    /// Read access to the underlying engine, for batching the scalar
    /// getters while the session holds the handle.
    pub fn engine(&self) -> &dyn AnalysisEngine {
        &*self.engine
    }
}

impl Drop for EngineSession<'_> {
    fn drop(&mut self) {
        self.engine.close();
        debug!("engine session closed");
    }
}

/// Removes a temporary model file when dropped, so failed runs do not
/// leave artifacts next to the user's model.
struct TempModelFile {
    path: PathBuf,
}

impl Drop for TempModelFile {
    fn drop(&mut self) {
        if std::fs::remove_file(&self.path).is_err() && self.path.exists() {
            warn!("could not remove temp model {}", self.path.display());
        }
    }
}

/// Analyse the document through the external engine.
///
/// The document is written to a uuid-named temp file under `work_dir`,
/// analysed through its final stage, and replaced wholesale with the
/// engine's output. On failure the document is left untouched; the temp
/// file and the engine handle are released on every path.
pub fn analyse(
    doc: &mut ModelDocument,
    engine: &mut dyn AnalysisEngine,
    work_dir: &Path,
) -> FrewResult<()> {
    let num_stages = stage_count(doc)?;
    if num_stages == 0 {
        return Err(FrewError::validation(
            "stages",
            "0",
            "Model has no stages to analyse",
        ));
    }

    let temp_path = work_dir.join(format!("{}.json", Uuid::new_v4()));
    save_document(doc, &temp_path)?;
    let _cleanup = TempModelFile {
        path: temp_path.clone(),
    };

    {
        let mut session = EngineSession::open(engine, &temp_path)?;
        session.delete_results()?;
        session.analyse(num_stages - 1)?;
        session.save_as(&temp_path)?;
    }

    let refreshed = load_document(&temp_path)?;
    *doc = refreshed;
    debug!("analysis complete, document refreshed with engine results");
    Ok(())
}

/// Convert a proprietary binary model (`.fwd`) to the structured JSON
/// document format via the engine. Returns the path of the new document.
pub fn model_to_document(engine: &mut dyn AnalysisEngine, path: &Path) -> FrewResult<PathBuf> {
    if !path.exists() {
        return Err(FrewError::not_found("model file", path.display().to_string()));
    }
    let is_fwd = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("fwd"));
    if !is_fwd {
        return Err(FrewError::format(
            path.display().to_string(),
            "Path must be to a .fwd model",
        ));
    }

    let json_path = path.with_extension("json");
    {
        let mut session = EngineSession::open(engine, path)?;
        session.save_as(&json_path)?;
    }
    Ok(json_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::cell::RefCell;

    /// Scripted stand-in for the engine: records lifecycle calls and
    /// writes a canned analysed document on save_as.
    struct MockEngine {
        analysed_output: serde_json::Value,
        fail_analyse: bool,
        opens: RefCell<Vec<PathBuf>>,
        closes: RefCell<usize>,
        deletes: RefCell<usize>,
        analyses: RefCell<Vec<usize>>,
    }

    impl MockEngine {
        fn new(analysed_output: serde_json::Value) -> Self {
            MockEngine {
                analysed_output,
                fail_analyse: false,
                opens: RefCell::new(Vec::new()),
                closes: RefCell::new(0),
                deletes: RefCell::new(0),
                analyses: RefCell::new(Vec::new()),
            }
        }
    }

    impl AnalysisEngine for MockEngine {
        fn open(&mut self, path: &Path) -> FrewResult<()> {
            if !path.exists() {
                return Err(FrewError::engine("open", "model file missing"));
            }
            self.opens.borrow_mut().push(path.to_path_buf());
            Ok(())
        }

        fn delete_results(&mut self) -> FrewResult<()> {
            *self.deletes.borrow_mut() += 1;
            Ok(())
        }

        fn analyse(&mut self, final_stage: usize) -> FrewResult<()> {
            if self.fail_analyse {
                return Err(FrewError::engine("analyse", "solver did not converge"));
            }
            self.analyses.borrow_mut().push(final_stage);
            Ok(())
        }

        fn save_as(&mut self, path: &Path) -> FrewResult<()> {
            std::fs::write(path, self.analysed_output.to_string())
                .map_err(|e| FrewError::engine("save_as", e.to_string()))
        }

        fn close(&mut self) {
            *self.closes.borrow_mut() += 1;
        }

        fn node_shear(&self, node: usize, stage: usize) -> FrewResult<f64> {
            Ok(((node + 1) * (stage + 1)) as f64 * 1000.0)
        }

        fn node_bending(&self, node: usize, stage: usize) -> FrewResult<f64> {
            Ok(((node + 1) * (stage + 1)) as f64 * 10_000.0)
        }

        fn node_displacement(&self, node: usize, stage: usize) -> FrewResult<f64> {
            Ok(((node + 1) * (stage + 1)) as f64 * 0.001)
        }

        fn wall_ei(&self, _node: usize, _stage: usize) -> FrewResult<f64> {
            Ok(2.4e9)
        }

        fn pore_pressure(&self, side: Side, node: usize, _stage: usize) -> FrewResult<f64> {
            let base = (node + 1) as f64 * 1000.0;
            Ok(match side {
                Side::Left => base,
                Side::Right => base / 2.0,
            })
        }

        fn horizontal_eff_pressure(&self, side: Side, node: usize, stage: usize) -> FrewResult<f64> {
            self.pore_pressure(side, node, stage).map(|p| p * 2.0)
        }

        fn vertical_eff_pressure(&self, side: Side, node: usize, stage: usize) -> FrewResult<f64> {
            self.pore_pressure(side, node, stage).map(|p| p * 4.0)
        }
    }

    fn input_document() -> ModelDocument {
        serde_json::from_value(json!({
            "Stages": [
                {"Name": "A", "GeoFrewNodes": [{"Level": 10.0}]},
                {"Name": "B", "GeoFrewNodes": [{"Level": 10.0}]}
            ]
        }))
        .unwrap()
    }

    fn analysed_output() -> serde_json::Value {
        json!({
            "Stages": [
                {"Name": "A", "GeoFrewNodes": [{"Level": 10.0}]},
                {"Name": "B", "GeoFrewNodes": [{"Level": 10.0}]}
            ],
            "Frew Results": [{
                "GeoPartialFactorSet": {"Name": "SLS"},
                "Stageresults": [
                    {"Noderesults": [{"Shear": 1000.0, "Bending": 10_000.0, "Displacement": 0.001,
                                      "ULeft": 1.0, "URight": 1.0, "PeLeft": 1.0, "PeRight": 1.0,
                                      "VeLeft": 1.0, "VeRight": 1.0}]},
                    {"Noderesults": [{"Shear": 2000.0, "Bending": 20_000.0, "Displacement": 0.002,
                                      "ULeft": 1.0, "URight": 1.0, "PeLeft": 1.0, "PeRight": 1.0,
                                      "VeLeft": 1.0, "VeRight": 1.0}]}
                ]
            }]
        })
    }

    #[test]
    fn test_analyse_refreshes_document() {
        let mut doc = input_document();
        let mut engine = MockEngine::new(analysed_output());

        analyse(&mut doc, &mut engine, &std::env::temp_dir()).unwrap();

        assert!(doc.has_results());
        // Final stage is passed as a 0-based index
        assert_eq!(*engine.analyses.borrow(), vec![1]);
        assert_eq!(*engine.deletes.borrow(), 1);
        assert_eq!(*engine.closes.borrow(), 1);

        // Temp model removed after the run
        let opened = engine.opens.borrow()[0].clone();
        assert!(!opened.exists());
    }

    #[test]
    fn test_analyse_failure_closes_engine_and_cleans_up() {
        let mut doc = input_document();
        let before = doc.clone();
        let mut engine = MockEngine::new(analysed_output());
        engine.fail_analyse = true;

        let err = analyse(&mut doc, &mut engine, &std::env::temp_dir()).unwrap_err();
        assert_eq!(err.error_code(), "ENGINE");

        // Handle released and temp artifact removed even on failure
        assert_eq!(*engine.closes.borrow(), 1);
        let opened = engine.opens.borrow()[0].clone();
        assert!(!opened.exists());

        // Document untouched
        assert_eq!(doc, before);
    }

    #[test]
    fn test_analyse_requires_stages() {
        let mut doc: ModelDocument = serde_json::from_value(json!({"Stages": []})).unwrap();
        let mut engine = MockEngine::new(analysed_output());
        assert!(matches!(
            analyse(&mut doc, &mut engine, &std::env::temp_dir()).unwrap_err(),
            FrewError::Validation { .. }
        ));
    }

    #[test]
    fn test_model_to_document() {
        let fwd_path = std::env::temp_dir().join("frew_engine_test_convert.fwd");
        std::fs::write(&fwd_path, b"binary model").unwrap();

        let mut engine = MockEngine::new(analysed_output());
        let json_path = model_to_document(&mut engine, &fwd_path).unwrap();

        assert_eq!(json_path.extension().unwrap(), "json");
        assert!(json_path.exists());
        assert_eq!(*engine.closes.borrow(), 1);

        let _ = std::fs::remove_file(&fwd_path);
        let _ = std::fs::remove_file(&json_path);
    }

    #[test]
    fn test_model_to_document_rejects_wrong_extension() {
        let json_path = std::env::temp_dir().join("frew_engine_test_convert.json");
        std::fs::write(&json_path, b"{}").unwrap();

        let mut engine = MockEngine::new(analysed_output());
        assert!(matches!(
            model_to_document(&mut engine, &json_path).unwrap_err(),
            FrewError::Format { .. }
        ));

        let _ = std::fs::remove_file(&json_path);
    }

    #[test]
    fn test_model_to_document_missing_path() {
        let mut engine = MockEngine::new(analysed_output());
        let missing = Path::new("/nonexistent/model.fwd");
        assert!(matches!(
            model_to_document(&mut engine, missing).unwrap_err(),
            FrewError::NotFound { .. }
        ));
    }

    #[test]
    fn test_from_engine_batches_getters() {
        use crate::results::WallResults;

        let engine = MockEngine::new(analysed_output());
        let results = WallResults::from_engine(&engine, "SLS", 2, 3).unwrap();

        assert_eq!(results.stage_count(), 2);
        let series = results.series(1, "SLS").unwrap();
        // (node+1)*(stage+1)*1000 N/m -> kN/m
        assert_eq!(series.shear, vec![2.0, 4.0, 6.0]);
        assert_eq!(series.displacement, vec![2.0, 4.0, 6.0]);
    }
}
