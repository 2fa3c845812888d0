use crate::FlowchartApp;
use crate::command::Command;

pub fn tools_panel(app: &mut FlowchartApp, ctx: &egui::Context) {
    egui::TopBottomPanel::top("tools_panel").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.label(format!("Mode: {}", app.context().mode().label()));
            ui.separator();

            let mut clicked = None;
            ui.add_enabled_ui(!app.modal_open(), |ui| {
                for command in Command::TOOLBAR {
                    if ui.button(command.label()).clicked() {
                        clicked = Some(command);
                    }
                }
            });

            if let Some(command) = clicked {
                log::debug!("Toolbar: {}", command.label());
                app.execute_command(command);
            }
        });
    });
}
