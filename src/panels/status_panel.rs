use crate::FlowchartApp;

const INSTRUCTIONS: &str =
    "Double-click a node to edit text. Drag nodes to move. Use Connect mode to draw edges.";

pub fn status_panel(app: &mut FlowchartApp, ctx: &egui::Context) {
    egui::TopBottomPanel::bottom("status_panel").show(ctx, |ui| {
        ui.label(INSTRUCTIONS);
        ui.horizontal(|ui| {
            let model = app.context().model();
            ui.label(format!("{} node(s), {} edge(s)", model.node_count(), model.edge_count()));
            if let Some(path) = app.settings().last_document.as_deref() {
                ui.separator();
                ui.label(path.display().to_string());
            }
        });
    });
}
