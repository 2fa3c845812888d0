use std::fs;
use std::path::Path;

use crate::document::Document;
use crate::error::PersistenceResult;
use crate::graph::GraphModel;

/// Write `model` to `path` as a JSON document.
pub fn save_to_path(model: &GraphModel, path: &Path) -> PersistenceResult<()> {
    let json = Document::from_model(model).to_json()?;
    fs::write(path, json)?;
    log::info!(
        "Saved {} node(s) and {} edge(s) to {}",
        model.node_count(),
        model.edge_count(),
        path.display()
    );
    Ok(())
}

/// Read a document from `path` and build a new model from it.
///
/// Nothing outside the returned model is touched, so a failure here leaves
/// whatever the caller currently holds intact.
pub fn load_from_path(path: &Path) -> PersistenceResult<GraphModel> {
    let json = fs::read_to_string(path)?;
    let model = Document::from_json(&json)?.to_model();
    log::info!(
        "Loaded {} node(s) and {} edge(s) from {}",
        model.node_count(),
        model.edge_count(),
        path.display()
    );
    Ok(model)
}
