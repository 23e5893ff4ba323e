//! # Struts
//!
//! Strut/support records and node-based lookups. A strut has no name of
//! its own — it is identified by its 1-based position in the document's
//! strut list, and located on the wall by its `NodeStrut` node number.
//! More than one strut may share a node (e.g. a prop and an anchor at the
//! same level), so lookups come in first-match and all-matches forms.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::document::ModelDocument;
use crate::errors::{FrewError, FrewResult};
use crate::geometry::node_count;

fn default_node() -> i64 {
    1
}

fn default_stage() -> i64 {
    -1
}

fn default_stiffness() -> f64 {
    1.0e9
}

/// One strut record.
///
/// Defaults match the values the engine writes for fields left at their
/// initial state (a strut that is never removed has `StageOut` -1).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Strut {
    /// 1-based node number the strut acts on
    #[serde(rename = "NodeStrut", default = "default_node")]
    pub node: i64,

    #[serde(rename = "Flags", default)]
    pub flags: i64,

    /// Stage at which the strut is installed
    #[serde(rename = "StageIn", default = "default_stage")]
    pub stage_in: i64,

    /// Stage at which the strut is removed (-1 = never)
    #[serde(rename = "StageOut", default = "default_stage")]
    pub stage_out: i64,

    #[serde(rename = "Prestress", default)]
    pub prestress: f64,

    #[serde(rename = "Stiffness", default = "default_stiffness")]
    pub stiffness: f64,

    /// Inclination from horizontal (degrees)
    #[serde(rename = "Angle", default)]
    pub angle: f64,

    #[serde(rename = "LeverArm", default)]
    pub lever_arm: f64,

    #[serde(rename = "LevelStrut", default)]
    pub level: f64,

    #[serde(rename = "HorzForce", default)]
    pub horz_force: f64,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// All struts in the model, in document order.
pub fn struts(doc: &ModelDocument) -> FrewResult<&[Strut]> {
    doc.strut_list()
}

fn check_node_argument(node: i64) -> FrewResult<()> {
    if node < 1 {
        return Err(FrewError::validation(
            "node",
            node.to_string(),
            "Node numbers are 1-based",
        ));
    }
    Ok(())
}

/// The first strut (in document order) acting on the given node.
pub fn strut_at_node(doc: &ModelDocument, node: i64) -> FrewResult<&Strut> {
    check_node_argument(node)?;
    struts(doc)?
        .iter()
        .find(|strut| strut.node == node)
        .ok_or_else(|| FrewError::not_found("strut", format!("node {node}")))
}

/// All struts acting on the given node, in document order.
pub fn struts_at_node(doc: &ModelDocument, node: i64) -> FrewResult<Vec<&Strut>> {
    check_node_argument(node)?;
    let matches: Vec<&Strut> = struts(doc)?
        .iter()
        .filter(|strut| strut.node == node)
        .collect();
    if matches.is_empty() {
        return Err(FrewError::not_found("struts", format!("node {node}")));
    }
    Ok(matches)
}

/// Cross-validate every strut's node number against the canonical node
/// count. A strut placed outside the generated node range means the strut
/// list and the stage geometry no longer agree.
///
/// When no nodes have been generated yet (count 0) there is nothing to
/// validate against and the check passes.
pub fn validate_strut_nodes(doc: &ModelDocument) -> FrewResult<()> {
    let count = node_count(doc)? as i64;
    if count == 0 {
        return Ok(());
    }
    for (index, strut) in struts(doc)?.iter().enumerate() {
        if strut.node < 1 || strut.node > count {
            return Err(FrewError::consistency(format!(
                "Strut {} acts on node {} but the model has {} nodes",
                index + 1,
                strut.node,
                count
            )));
        }
    }
    Ok(())
}
