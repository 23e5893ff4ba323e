//! # Model Document
//!
//! The `ModelDocument` struct is the root container for a Frew model as
//! saved by the engine in its structured JSON format. It is the single
//! source of truth for everything downstream: geometry checks, result
//! extraction, envelopes and report projection all read from it and never
//! write back (the one exception is [`ModelDocument::clear_results`], used
//! before re-analysis).
//!
//! ## Structure
//!
//! ```text
//! ModelDocument
//! ├── OasysHeader    (titles, program version)
//! ├── File history   (open/edit audit records)
//! ├── Stages         (name + node list per construction stage)
//! ├── Materials      (named soil material records)
//! ├── Struts         (support records, positioned by node number)
//! ├── Frew Results   (one result set per design case; absent until analysed)
//! └── ...            (all other keys round-trip untouched)
//! ```
//!
//! Keys the library does not model are preserved in a flattened map so a
//! load→save round-trip never drops engine data.
//!
//! ## Example
//!
//! ```rust,no_run
//! use frew_core::file_io::load_document;
//! use std::path::Path;
//!
//! let doc = load_document(Path::new("model.json"))?;
//! let titles = doc.titles()?;
//! println!("{} - {}", titles.job_number, titles.job_title);
//! # Ok::<(), frew_core::errors::FrewError>(())
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::{FrewError, FrewResult};
use crate::geometry::Stage;
use crate::materials::Material;
use crate::results::ResultSet;
use crate::struts::Strut;

/// Root model document container.
///
/// Field names are serde-renamed to the exact key spelling the engine
/// writes, including the space in `File history` and `Frew Results`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelDocument {
    /// Header block: titles and program version metadata
    #[serde(rename = "OasysHeader", skip_serializing_if = "Option::is_none")]
    pub header: Option<Vec<HeaderBlock>>,

    /// Audit records of when the file was opened and by whom
    #[serde(rename = "File history", skip_serializing_if = "Option::is_none")]
    pub file_history: Option<Vec<HistoryEntry>>,

    /// Construction/analysis stages in sequence order
    #[serde(rename = "Stages", skip_serializing_if = "Option::is_none")]
    pub stages: Option<Vec<Stage>>,

    /// Named soil materials
    #[serde(rename = "Materials", skip_serializing_if = "Option::is_none")]
    pub materials: Option<Vec<Material>>,

    /// Strut/support records
    #[serde(rename = "Struts", skip_serializing_if = "Option::is_none")]
    pub struts: Option<Vec<Strut>>,

    /// One result set per design case; absent until the model is analysed
    #[serde(rename = "Frew Results", skip_serializing_if = "Option::is_none")]
    pub results: Option<Vec<ResultSet>>,

    /// Every other top-level key, preserved verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One entry of the `OasysHeader` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeaderBlock {
    /// Project titles (the engine writes a single-element array)
    #[serde(rename = "Titles", skip_serializing_if = "Option::is_none")]
    pub titles: Option<Vec<Titles>>,

    /// Program name/version metadata
    #[serde(rename = "Program title", skip_serializing_if = "Option::is_none")]
    pub program_title: Option<Vec<ProgramTitle>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Project titles from the document header.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Titles {
    #[serde(rename = "JobNumber", default)]
    pub job_number: String,

    #[serde(rename = "JobTitle", default)]
    pub job_title: String,

    #[serde(rename = "Subtitle", default)]
    pub subtitle: String,

    #[serde(rename = "CalculationHeading", default)]
    pub calculation_heading: String,

    #[serde(rename = "Initials", default)]
    pub initials: String,

    #[serde(rename = "Notes", default)]
    pub notes: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Program/version metadata from the document header.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProgramTitle {
    /// Exact build of the engine that wrote the file (e.g. "19.4.0.23")
    #[serde(rename = "FileVersion", skip_serializing_if = "Option::is_none")]
    pub file_version: Option<String>,

    /// Overall engine version the model was created in (e.g. "19.4")
    #[serde(rename = "Version", skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One record of the file history: when the file was opened in the engine
/// and by which user.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HistoryEntry {
    #[serde(rename = "Date", default)]
    pub date: String,

    #[serde(rename = "Time", default)]
    pub time: String,

    #[serde(rename = "Mode", default)]
    pub mode: String,

    #[serde(rename = "User", default)]
    pub user: String,

    #[serde(rename = "Comments", default)]
    pub comments: String,
}

impl ModelDocument {
    /// Get the project titles from the document header.
    ///
    /// Returns `Structure` if the header path is absent or malformed; a
    /// missing key and a short array report the same kind.
    pub fn titles(&self) -> FrewResult<&Titles> {
        self.header
            .as_ref()
            .and_then(|blocks| blocks.first())
            .and_then(|block| block.titles.as_ref())
            .and_then(|titles| titles.first())
            .ok_or_else(|| FrewError::structure("OasysHeader/Titles"))
    }

    /// Get the file history records.
    pub fn file_history(&self) -> FrewResult<&[HistoryEntry]> {
        self.file_history
            .as_deref()
            .ok_or_else(|| FrewError::structure("File history"))
    }

    /// Get the exact build of the engine that wrote the file.
    pub fn file_version(&self) -> FrewResult<&str> {
        self.program_title()?
            .file_version
            .as_deref()
            .ok_or_else(|| FrewError::structure("OasysHeader/Program title/FileVersion"))
    }

    /// Get the overall engine version the model was created in.
    pub fn engine_version(&self) -> FrewResult<&str> {
        self.program_title()?
            .version
            .as_deref()
            .ok_or_else(|| FrewError::structure("OasysHeader/Program title/Version"))
    }

    fn program_title(&self) -> FrewResult<&ProgramTitle> {
        self.header
            .as_ref()
            .and_then(|blocks| blocks.first())
            .and_then(|block| block.program_title.as_ref())
            .and_then(|titles| titles.first())
            .ok_or_else(|| FrewError::structure("OasysHeader/Program title"))
    }

    /// Get the stage list.
    pub fn stage_list(&self) -> FrewResult<&[Stage]> {
        self.stages
            .as_deref()
            .ok_or_else(|| FrewError::structure("Stages"))
    }

    /// Get the material list. An absent `Materials` key is a `Structure`
    /// error; an empty list is returned as-is.
    pub fn material_list(&self) -> FrewResult<&[Material]> {
        self.materials
            .as_deref()
            .ok_or_else(|| FrewError::structure("Materials"))
    }

    /// Get the strut list.
    pub fn strut_list(&self) -> FrewResult<&[Strut]> {
        self.struts
            .as_deref()
            .ok_or_else(|| FrewError::structure("Struts"))
    }

    /// Get the result sets, one per design case.
    ///
    /// Returns `NoResults` when the model has not been analysed (the
    /// results key is absent or empty).
    pub fn result_sets(&self) -> FrewResult<&[ResultSet]> {
        match self.results.as_deref() {
            Some(sets) if !sets.is_empty() => Ok(sets),
            _ => Err(FrewError::NoResults),
        }
    }

    /// Whether the document currently holds any result sets.
    pub fn has_results(&self) -> bool {
        self.results.as_deref().is_some_and(|sets| !sets.is_empty())
    }

    /// Remove all result sets so the model can be re-analysed. Idempotent.
    pub fn clear_results(&mut self) {
        self.results = None;
    }
}
