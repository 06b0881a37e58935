use crate::SketchApp;
use crate::components::ToolButton;
use crate::shape::ColorValue;
use crate::tool::Tool;

pub fn tools_panel(app: &mut SketchApp, ctx: &egui::Context, frame: &mut eframe::Frame) {
    let undo_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::Z);
    if ctx.input_mut(|i| i.consume_shortcut(&undo_shortcut)) {
        app.undo(frame.storage_mut());
    }

    egui::SidePanel::left("tools_panel")
        .resizable(false)
        .default_width(150.0)
        .show(ctx, |ui| {
            ui.heading("Tools");

            ui.horizontal(|ui| {
                for tool in Tool::ALL {
                    let button = ToolButton::new(tool, app.selection().is_active(tool));
                    if button.show(ui).clicked() {
                        log::info!("Tool selected from UI: {}", button.control_id());
                        app.select_control(&button.control_id());
                    }
                }
            });

            ui.separator();

            ui.horizontal(|ui| {
                ui.label("Color:");
                let mut color = app.selection().color().to_color32();
                if egui::color_picker::color_edit_button_srgba(
                    ui,
                    &mut color,
                    egui::color_picker::Alpha::Opaque,
                )
                .changed()
                {
                    app.set_color(ColorValue::from_color32(color));
                }
            });

            ui.separator();

            let has_shapes = !app.document().shapes().is_empty();
            ui.horizontal(|ui| {
                if ui
                    .add_enabled(has_shapes, egui::Button::new("Undo"))
                    .on_hover_text(ctx.format_shortcut(&undo_shortcut))
                    .clicked()
                {
                    app.undo(frame.storage_mut());
                }
                if ui.button("Clear").clicked() {
                    app.clear(ctx, frame.storage_mut());
                }
            });

            if ui.button("⬇ Download").clicked() {
                app.download();
            }

            ui.separator();

            ui.label(format!("Shapes: {}", app.document().shapes().len()));
            let [width, height] = app.canvas_size();
            ui.label(format!("Canvas: {width}×{height} px"));
            if let Some(artifact) = app.latest_export() {
                ui.label(format!("Ready: {} ({} bytes)", artifact.file_name, artifact.bytes.len()));
            }
            if let Some(status) = app.status() {
                ui.small(status);
            }
        });
}
