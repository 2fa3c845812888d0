use eframe_flowchart::export::{export_png, export_rect, image_size, render_image};
use eframe_flowchart::graph::GraphModel;
use eframe_flowchart::style;
use eframe_flowchart::ExportError;
use egui::pos2;
use tempfile::tempdir;

#[test]
fn test_png_has_scene_size_plus_margin() {
    let mut model = GraphModel::new();
    let a = model.add_node(pos2(0.0, 0.0), "A").id();
    let b = model.add_node(pos2(240.0, 140.0), "B").id();
    model.add_edge(a, b).unwrap();

    let dir = tempdir().unwrap();
    let path = dir.path().join("chart.png");
    export_png(&model, &path).unwrap();

    let image = image::open(&path).unwrap();
    // Nodes span 400x200; the arrowhead stays inside node B.
    assert_eq!((image.width(), image.height()), (440, 240));
    assert_eq!(image_size(export_rect(&model)), (440, 240));
}

#[test]
fn test_empty_model_exports_one_pixel() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("empty.png");
    export_png(&GraphModel::new(), &path).unwrap();

    let image = image::open(&path).unwrap();
    assert_eq!((image.width(), image.height()), (1, 1));
}

#[test]
fn test_margin_is_background_and_nodes_are_filled() {
    let mut model = GraphModel::new();
    model.add_node(pos2(0.0, 0.0), "");
    let image = render_image(&model).unwrap();

    let bg = style::BACKGROUND;
    assert_eq!(image.get_pixel(2, 2).0, [bg.r(), bg.g(), bg.b()]);

    // Well inside the node, away from the border and the text.
    let fill = style::NODE_FILL;
    assert_eq!(image.get_pixel(120, 70).0, [fill.r(), fill.g(), fill.b()]);
}

#[test]
fn test_unwritable_path_is_io_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("missing").join("chart.png");
    let mut model = GraphModel::new();
    model.add_node(pos2(0.0, 0.0), "A");

    let err = export_png(&model, &path).unwrap_err();
    assert!(matches!(err, ExportError::Io(_)));
}
