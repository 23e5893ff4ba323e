//! # Materials
//!
//! Soil material records and lookups. Materials are identified by name;
//! the engine writes their full property set (unit weight, friction angle,
//! stiffness profile, ...) which this library carries opaquely — scripts
//! read individual properties by key, the library never interprets them.
//!
//! ## Example
//!
//! ```rust,no_run
//! use frew_core::file_io::load_document;
//! use frew_core::materials::{material_names, material_properties};
//! use std::path::Path;
//!
//! let doc = load_document(Path::new("model.json"))?;
//! for name in material_names(&doc)? {
//!     let props = material_properties(&doc, &name)?;
//!     println!("{name}: unit weight {:?}", props.get("UnitWeight"));
//! }
//! # Ok::<(), frew_core::errors::FrewError>(())
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::document::ModelDocument;
use crate::errors::{FrewError, FrewResult};

/// One named soil material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Material name as entered by the engineer
    #[serde(rename = "Name", default)]
    pub name: String,

    /// All engine-written material properties, keyed as in the document
    /// (e.g. "UnitWeight", "Phi", "Wallsoilfric_ratio")
    #[serde(flatten)]
    pub properties: Map<String, Value>,
}

/// Names of every material in the model, in document order.
///
/// An absent material list is a `Structure` error; a present-but-empty
/// list returns an empty vector.
pub fn material_names(doc: &ModelDocument) -> FrewResult<Vec<String>> {
    Ok(doc
        .material_list()?
        .iter()
        .map(|material| material.name.clone())
        .collect())
}

/// Property map of the named material.
pub fn material_properties<'a>(
    doc: &'a ModelDocument,
    name: &str,
) -> FrewResult<&'a Map<String, Value>> {
    doc.material_list()?
        .iter()
        .find(|material| material.name == name)
        .map(|material| &material.properties)
        .ok_or_else(|| FrewError::not_found("material", name))
}
