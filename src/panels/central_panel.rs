use crate::FlowchartApp;
use crate::style;

pub fn central_panel(app: &mut FlowchartApp, ctx: &egui::Context) {
    egui::CentralPanel::default()
        .frame(egui::Frame::none().fill(style::BACKGROUND))
        .show(ctx, |ui| {
            let (response, painter) =
                ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
            let canvas_rect = response.rect;

            app.handle_input(ctx, canvas_rect, response.hovered());
            app.render(&painter, canvas_rect);
        });
}
