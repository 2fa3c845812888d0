//! The persisted form of a diagram and its conversion to and from [`GraphModel`].
//!
//! ```json
//! {
//!   "nodes": [ { "id": 1, "text": "Start", "x": 10.0, "y": 10.0 } ],
//!   "edges": [ { "source": 1, "target": 2 } ]
//! }
//! ```

use egui::pos2;
use serde::de::Unexpected;
use serde::{Deserialize, Serialize};

use crate::error::{GraphError, PersistenceError, PersistenceResult};
use crate::graph::{GraphModel, NodeId};
use crate::id_generator::MAX_ID;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub nodes: Vec<NodeRecord>,
    #[serde(default)]
    pub edges: Vec<EdgeRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: NodeId,
    #[serde(default)]
    pub text: String,
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub source: NodeId,
    pub target: NodeId,
}

impl Document {
    /// Snapshot `model` in its current iteration order.
    pub fn from_model(model: &GraphModel) -> Self {
        let nodes = model
            .nodes()
            .map(|node| NodeRecord {
                id: node.id(),
                text: node.text.clone(),
                x: node.position.x,
                y: node.position.y,
            })
            .collect();
        let edges = model
            .edges()
            .map(|edge| EdgeRecord {
                source: edge.source(),
                target: edge.target(),
            })
            .collect();
        Self { nodes, edges }
    }

    /// Build a fresh model from this document.
    ///
    /// Nodes keep their ids; a later record with a duplicate id overwrites the
    /// earlier one. Edges whose endpoints are missing (or that would connect a
    /// node to itself) are dropped. The id counter ends up one past the
    /// largest node id.
    pub fn to_model(&self) -> GraphModel {
        let mut model = GraphModel::new();
        for record in &self.nodes {
            model.restore_node(record.id, pos2(record.x, record.y), record.text.clone());
        }

        let mut dropped = 0;
        for record in &self.edges {
            match model.add_edge(record.source, record.target) {
                Ok(_) => {}
                Err(GraphError::NotFound(missing)) => {
                    log::warn!(
                        "Dropping edge {} -> {}: {} does not exist",
                        record.source,
                        record.target,
                        missing
                    );
                    dropped += 1;
                }
                Err(err @ GraphError::SelfLoop(_)) => {
                    log::warn!("Dropping edge {} -> {}: {}", record.source, record.target, err);
                    dropped += 1;
                }
            }
        }

        log::debug!(
            "Built model with {} node(s), {} edge(s), {} dropped",
            model.node_count(),
            model.edge_count(),
            dropped
        );
        model
    }

    /// Parse a document. The top level must be a JSON object and node ids
    /// may not exceed [`MAX_ID`].
    pub fn from_json(json: &str) -> PersistenceResult<Self> {
        let value: serde_json::Value = serde_json::from_str(json).map_err(PersistenceError::Parse)?;
        if !value.is_object() {
            return Err(PersistenceError::Parse(serde::de::Error::invalid_type(
                unexpected(&value),
                &"a flowchart document object",
            )));
        }
        let document: Self = serde_json::from_value(value).map_err(PersistenceError::Parse)?;
        if let Some(record) = document.nodes.iter().find(|record| record.id.0 > MAX_ID) {
            return Err(PersistenceError::Parse(serde::de::Error::custom(format_args!(
                "node id {} is larger than {}",
                record.id, MAX_ID
            ))));
        }
        Ok(document)
    }

    /// Pretty-printed JSON with two-space indentation.
    pub fn to_json(&self) -> PersistenceResult<String> {
        serde_json::to_string_pretty(self).map_err(PersistenceError::Serialize)
    }
}

fn unexpected(value: &serde_json::Value) -> Unexpected<'_> {
    match value {
        serde_json::Value::Null => Unexpected::Unit,
        serde_json::Value::Bool(b) => Unexpected::Bool(*b),
        serde_json::Value::Number(_) => Unexpected::Other("number"),
        serde_json::Value::String(s) => Unexpected::Str(s),
        serde_json::Value::Array(_) => Unexpected::Seq,
        serde_json::Value::Object(_) => Unexpected::Map,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_lists_and_text_default_to_empty() {
        let doc = Document::from_json(r#"{"nodes":[{"id":2,"x":1,"y":2}]}"#).unwrap();
        assert!(doc.edges.is_empty());
        assert_eq!(doc.nodes[0].text, "");
        assert_eq!(doc.nodes[0].x, 1.0);
    }

    #[test]
    fn test_structurally_invalid_documents_are_rejected() {
        for raw in [
            "",
            "not json",
            "[]",
            "42",
            r#"{"nodes":[{"id":1,"text":"a"}]}"#,
            r#"{"nodes":[{"id":"one","x":0,"y":0}]}"#,
            r#"{"edges":[{"source":1}]}"#,
        ] {
            assert!(
                matches!(Document::from_json(raw), Err(PersistenceError::Parse(_))),
                "accepted {raw:?}"
            );
        }
    }

    #[test]
    fn test_node_ids_past_the_counter_range_are_rejected() {
        for id in [MAX_ID + 1, u64::MAX] {
            let raw = format!(r#"{{"nodes":[{{"id":{id},"text":"a","x":0,"y":0}}]}}"#);
            assert!(matches!(Document::from_json(&raw), Err(PersistenceError::Parse(_))));
        }

        let raw = format!(r#"{{"nodes":[{{"id":{MAX_ID},"text":"a","x":0,"y":0}}]}}"#);
        let mut model = Document::from_json(&raw).unwrap().to_model();
        let next = model.add_node(pos2(0.0, 0.0), "b").id();
        assert_eq!(next, NodeId(MAX_ID + 1));
        assert_eq!(model.node_count(), 2);
    }

    #[test]
    fn test_self_loop_records_are_dropped() {
        let doc = Document::from_json(
            r#"{"nodes":[{"id":1,"text":"a","x":0,"y":0}],"edges":[{"source":1,"target":1}]}"#,
        )
        .unwrap();
        let model = doc.to_model();
        assert_eq!(model.node_count(), 1);
        assert_eq!(model.edge_count(), 0);
    }

    #[test]
    fn test_json_field_layout() {
        let doc = Document {
            nodes: vec![NodeRecord {
                id: NodeId(1),
                text: "A".into(),
                x: 10.0,
                y: 20.0,
            }],
            edges: vec![],
        };
        let json = doc.to_json().unwrap();
        assert_eq!(
            json,
            "{\n  \"nodes\": [\n    {\n      \"id\": 1,\n      \"text\": \"A\",\n      \"x\": 10.0,\n      \"y\": 20.0\n    }\n  ],\n  \"edges\": []\n}"
        );
    }
}
