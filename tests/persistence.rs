use std::fs;

use eframe_flowchart::Document;
use eframe_flowchart::graph::{GraphModel, NodeId};
use eframe_flowchart::state::{EditorContext, load_from_path, save_to_path};
use eframe_flowchart::{EditorError, PersistenceError};
use egui::pos2;
use tempfile::tempdir;

fn create_test_model() -> GraphModel {
    let mut model = GraphModel::new();
    let start = model.add_node(pos2(10.0, 10.0), "Start").id();
    let end = model.add_node(pos2(300.0, 120.0), "End\nsecond line").id();
    model.add_edge(start, end).unwrap();
    model
}

#[test]
fn test_save_then_load_reproduces_graph() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("chart.json");
    let model = create_test_model();

    save_to_path(&model, &path).unwrap();
    let loaded = load_from_path(&path).unwrap();

    assert_eq!(loaded.node_count(), 2);
    assert_eq!(loaded.edge_count(), 1);
    for (a, b) in model.nodes().zip(loaded.nodes()) {
        assert_eq!(a.id(), b.id());
        assert_eq!(a.text, b.text);
        assert_eq!(a.position, b.position);
    }
    let edge = loaded.edges().next().unwrap();
    assert_eq!((edge.source(), edge.target()), (NodeId(1), NodeId(2)));
    assert_eq!(loaded.next_node_id(), NodeId(3));
}

#[test]
fn test_saved_file_is_pretty_json() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("chart.json");
    save_to_path(&create_test_model(), &path).unwrap();

    let raw = fs::read_to_string(&path).unwrap();
    assert!(raw.starts_with("{\n  \"nodes\": [\n"));
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["nodes"][1]["text"], "End\nsecond line");
    assert_eq!(value["edges"][0]["target"], 2);
}

#[test]
fn test_dangling_edge_is_dropped_on_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("dangling.json");
    fs::write(
        &path,
        r#"{"nodes":[{"id":5,"text":"A","x":0,"y":0}],"edges":[{"source":5,"target":99}]}"#,
    )
    .unwrap();

    let mut model = load_from_path(&path).unwrap();
    assert_eq!(model.node_count(), 1);
    assert_eq!(model.edge_count(), 0);
    assert_eq!(model.add_node(pos2(0.0, 0.0), "next").id(), NodeId(6));
}

#[test]
fn test_unknown_keys_are_ignored() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("extra.json");
    fs::write(
        &path,
        r#"{"version":3,"nodes":[{"id":1,"x":0,"y":0,"color":"red"}]}"#,
    )
    .unwrap();

    let model = load_from_path(&path).unwrap();
    assert_eq!(model.node(NodeId(1)).unwrap().text, "");
}

#[test]
fn test_failed_load_keeps_current_graph() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, "{ this is not json").unwrap();

    let mut context = EditorContext::with_model(create_test_model());
    let before = context.model().clone();

    let err = context.load_from(&path).unwrap_err();
    assert!(matches!(err, EditorError::Persistence(PersistenceError::Parse(_))));
    assert_eq!(*context.model(), before);
    assert!(context.document_path().is_none());
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempdir().unwrap();
    let err = load_from_path(&dir.path().join("missing.json")).unwrap_err();
    assert!(matches!(err, PersistenceError::Io(_)));
}

#[test]
fn test_save_into_missing_directory_fails() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("no").join("such").join("chart.json");
    let err = save_to_path(&create_test_model(), &path).unwrap_err();
    assert!(matches!(err, PersistenceError::Io(_)));
}

#[test]
fn test_reloading_a_loaded_document_is_stable() {
    let raw = r#"{"nodes":[{"id":3,"text":"A","x":1.5,"y":2},{"id":7,"text":"B","x":300,"y":40}],
                  "edges":[{"source":3,"target":7},{"source":7,"target":3},{"source":7,"target":8}]}"#;
    let first = Document::from_json(raw).unwrap().to_model();
    let json = Document::from_model(&first).to_json().unwrap();
    let second = Document::from_json(&json).unwrap().to_model();

    assert_eq!(first, second);
    assert_eq!(second.edge_count(), 2);
    assert_eq!(second.next_node_id(), NodeId(8));
}

#[test]
fn test_oversized_node_id_is_rejected_before_any_allocation() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("huge.json");
    fs::write(
        &path,
        r#"{"nodes":[{"id":18446744073709551615,"text":"A","x":0,"y":0}]}"#,
    )
    .unwrap();

    let mut context = EditorContext::with_model(create_test_model());
    let err = context.load_from(&path).unwrap_err();
    assert!(matches!(err, EditorError::Persistence(PersistenceError::Parse(_))));
    assert_eq!(context.model().node_count(), 2);
}
