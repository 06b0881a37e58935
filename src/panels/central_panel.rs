use crate::SketchApp;
use crate::renderer::EguiSurface;

pub fn central_panel(app: &mut SketchApp, ctx: &egui::Context, frame: &mut eframe::Frame) {
    egui::CentralPanel::default()
        .frame(egui::Frame::none())
        .show(ctx, |ui| {
            // The canvas fills whatever the toolbar leaves over.
            let (response, painter) = ui.allocate_painter(ui.available_size(), egui::Sense::drag());
            let response = response.on_hover_cursor(egui::CursorIcon::Crosshair);
            let canvas_rect = response.rect;
            let pixels_per_point = ctx.pixels_per_point();

            app.input_mut().set_canvas(canvas_rect, pixels_per_point);
            let events = app.input_mut().process(&response);
            for event in events {
                app.handle_pointer(event, frame.storage_mut());
            }

            let background = app.config().background_color();
            let mut surface = EguiSurface::new(&painter, canvas_rect, pixels_per_point, background);
            if app.paint_canvas(&mut surface) {
                ctx.request_repaint();
            }
        });
}
