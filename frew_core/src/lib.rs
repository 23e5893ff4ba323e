//! # frew_core - Frew Client Library
//!
//! `frew_core` exposes the Frew embedded retaining wall analysis engine to
//! script writers as typed method calls, and post-processes the engine's
//! numeric output — displacement, shear, bending moment and soil/water
//! pressure series per node, stage and design case — into report-ready
//! tables and plot series.
//!
//! The engine itself is an external, licensed program: this library talks
//! to it either through its automation interface (the
//! [`engine::AnalysisEngine`] trait) or through the structured JSON model
//! documents it reads and writes. Everything downstream of that boundary —
//! consistency checks, extraction, envelopes, report projection — is pure
//! computation over an in-memory document.
//!
//! ## Design Philosophy
//!
//! - **Read-only core**: extraction and aggregation never mutate the
//!   document; derived values are recomputed per request and cannot go
//!   stale
//! - **Typed records**: results live in shape-validated structs, not
//!   nested maps — structural defects surface at construction
//! - **Rich errors**: one structured error type with programmatic codes,
//!   not strings
//! - **Positional node identity**: a node is its index, validated
//!   equal-length across stages before anything else runs
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use frew_core::envelope::Envelopes;
//! use frew_core::file_io::load_document;
//! use frew_core::geometry::node_levels;
//! use frew_core::report::result_rows;
//! use frew_core::results::WallResults;
//! use std::path::Path;
//!
//! let doc = load_document(Path::new("model.json"))?;
//! let results = WallResults::extract(&doc)?;
//! let envelopes = Envelopes::from_results(&results)?;
//! let rows = result_rows(&results, &node_levels(&doc)?)?;
//! # Ok::<(), frew_core::errors::FrewError>(())
//! ```
//!
//! ## Modules
//!
//! - [`document`] - Model document container and header getters
//! - [`file_io`] - Load/save with atomic writes and file locking
//! - [`geometry`] - Stage/node consistency checks and node levels
//! - [`materials`] - Soil material records and lookups
//! - [`struts`] - Strut records and node-based lookups
//! - [`results`] - Result extraction into typed, unit-converted structures
//! - [`envelope`] - Envelopes and derived pressure/deflection quantities
//! - [`report`] - Tabular rows and plot series for external renderers
//! - [`engine`] - Automation boundary with scoped session handling
//! - [`units`] - Type-safe unit wrappers for the engine boundary
//! - [`errors`] - Structured error types

pub mod document;
pub mod engine;
pub mod envelope;
pub mod errors;
pub mod file_io;
pub mod geometry;
pub mod materials;
pub mod report;
pub mod results;
pub mod struts;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use document::{ModelDocument, Titles};
pub use engine::{AnalysisEngine, EngineSession};
pub use envelope::{Calculator, Envelopes};
pub use errors::{FrewError, FrewResult};
pub use file_io::{load_document, save_document, FileLock};
pub use results::{SoilPressures, WallResults, WaterPressures};
