//! # Stage and Node Geometry
//!
//! Stage records and the consistency checks that make positional node
//! identity safe. Nodes have no persistent IDs: a node is its 1-based
//! position within a stage's node list, so every derived quantity in this
//! library depends on the invariant that all stages agree on the node
//! count. [`node_count`] is the single place that invariant is enforced.
//!
//! A model that has not had its nodes generated yet reports zero nodes —
//! that state is valid and distinct from the hard [`FrewError::Consistency`]
//! failure raised when stages disagree.

use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::document::ModelDocument;
use crate::errors::{FrewError, FrewResult};
use crate::units::{Knm2PerM, Nm2PerM};

/// One construction/analysis stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stage {
    /// Stage name as entered by the engineer
    #[serde(rename = "Name", default)]
    pub name: String,

    /// Wall nodes for this stage; absent until node generation has run
    #[serde(rename = "GeoFrewNodes", skip_serializing_if = "Option::is_none")]
    pub nodes: Option<Vec<WallNode>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One discretization point along the wall within a stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallNode {
    /// Elevation of the node (m OD)
    #[serde(rename = "Level")]
    pub level: f64,

    /// Wall stiffness EI at this node, engine-native N·m²/m
    #[serde(rename = "Eival", skip_serializing_if = "Option::is_none")]
    pub eival: Option<f64>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Number of stages in the model.
pub fn stage_count(doc: &ModelDocument) -> FrewResult<usize> {
    Ok(doc.stage_list()?.len())
}

/// Names of the stages, in sequence order.
pub fn stage_names(doc: &ModelDocument) -> FrewResult<Vec<String>> {
    Ok(doc
        .stage_list()?
        .iter()
        .map(|stage| stage.name.clone())
        .collect())
}

/// Number of nodes present in each stage.
///
/// Returns 0 as soon as any stage has no node list (the model's nodes have
/// not been generated yet — a valid state, not an error). If every stage
/// carries a node list but the lengths differ, the model is corrupt and
/// this fails with `Consistency`.
pub fn node_count(doc: &ModelDocument) -> FrewResult<usize> {
    let stages = doc.stage_list()?;

    let mut count: Option<usize> = None;
    for (index, stage) in stages.iter().enumerate() {
        let nodes = match stage.nodes.as_deref() {
            Some(nodes) if !nodes.is_empty() => nodes,
            _ => {
                debug!("stage {index} has no generated nodes, node count is 0");
                return Ok(0);
            }
        };
        match count {
            None => count = Some(nodes.len()),
            Some(expected) if expected != nodes.len() => {
                return Err(FrewError::consistency(
                    "Number of nodes is not the same for every stage",
                ));
            }
            Some(_) => {}
        }
    }
    Ok(count.unwrap_or(0))
}

/// Node levels (m OD), read from the first stage.
///
/// Levels are stage-invariant by construction, so only stage 0 is read;
/// the length is still checked against the canonical node count.
pub fn node_levels(doc: &ModelDocument) -> FrewResult<Vec<f64>> {
    let count = node_count(doc)?;
    let nodes = doc
        .stage_list()?
        .first()
        .and_then(|stage| stage.nodes.as_deref())
        .ok_or_else(|| FrewError::structure("Stages/GeoFrewNodes"))?;

    if nodes.len() != count {
        return Err(FrewError::consistency(
            "Number of nodes does not equal the length of the node information",
        ));
    }
    Ok(nodes.iter().map(|node| node.level).collect())
}

/// Wall stiffness EI for each stage and node, in kN·m²/m.
pub fn wall_stiffness(doc: &ModelDocument) -> FrewResult<Vec<Vec<f64>>> {
    let stages = doc.stage_list()?;

    let mut per_stage = Vec::with_capacity(stages.len());
    for stage in stages {
        let nodes = stage
            .nodes
            .as_deref()
            .ok_or_else(|| FrewError::structure("Stages/GeoFrewNodes"))?;
        let stiffness = nodes
            .iter()
            .map(|node| {
                node.eival
                    .map(|raw| Knm2PerM::from(Nm2PerM(raw)).value())
                    .ok_or_else(|| FrewError::structure("Stages/GeoFrewNodes/Eival"))
            })
            .collect::<FrewResult<Vec<f64>>>()?;
        per_stage.push(stiffness);
    }
    Ok(per_stage)
}
