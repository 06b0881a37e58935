use egui::{Color32, pos2, vec2};
use shape_sketch::export::{self, DOWNLOAD_MIME};
use shape_sketch::renderer::paint_shapes;
use shape_sketch::store::MemoryStorage;
use shape_sketch::{Document, SketchConfig, PointerEvent, RasterSurface, RenderLoop, SelectionState, Shape};

fn rect(origin: (f32, f32), size: (f32, f32), color: &str) -> Shape {
    Shape::Rectangle {
        origin: pos2(origin.0, origin.1),
        size: vec2(size.0, size.1),
        color: color.into(),
    }
}

#[test]
fn test_negative_rectangle_paints_like_positive_one() {
    let mut negative = RasterSurface::new(100, 100);
    paint_shapes(&mut negative, &[rect((50.0, 50.0), (-20.0, -10.0), "#FF0000")]);

    let mut positive = RasterSurface::new(100, 100);
    paint_shapes(&mut positive, &[rect((30.0, 40.0), (20.0, 10.0), "#FF0000")]);

    assert_eq!(negative.painted_bounds(), Some((30, 40, 49, 49)));
    assert_eq!(negative.painted_bounds(), positive.painted_bounds());
    assert_eq!(negative.image(), positive.image());
}

#[test]
fn test_clear_then_render_is_empty() {
    let mut storage = MemoryStorage::new();
    let mut doc = Document::default();
    let selection = SelectionState::default();
    for event in [
        PointerEvent::Down(pos2(10.0, 10.0)),
        PointerEvent::Move(pos2(30.0, 30.0)),
        PointerEvent::Up(pos2(30.0, 30.0)),
    ] {
        doc.handle_pointer(event, &selection, &mut storage).unwrap();
    }

    let mut render_loop = RenderLoop::new();
    let mut surface = RasterSurface::new(64, 64);
    assert!(render_loop.tick(&mut surface, doc.shapes()));
    assert!(surface.painted_bounds().is_some());

    doc.clear(&mut storage).unwrap();
    assert!(render_loop.tick(&mut surface, doc.shapes()));
    assert_eq!(surface.painted_bounds(), None);
}

#[test]
fn test_later_shapes_paint_over_earlier_ones() {
    let shapes = vec![
        rect((0.0, 0.0), (10.0, 10.0), "#FF0000"),
        Shape::Circle {
            center: pos2(5.0, 5.0),
            radius: 2.0,
            color: "#0000FF".into(),
        },
    ];
    let image = export::rasterize(&shapes, [10, 10], Color32::WHITE);

    assert_eq!(image.get_pixel(5, 5).0, Color32::BLUE.to_srgba_unmultiplied());
    assert_eq!(image.get_pixel(0, 0).0, Color32::RED.to_srgba_unmultiplied());
}

#[test]
fn test_export_matches_canvas_size_and_background() {
    let shapes = vec![rect((2.0, 2.0), (4.0, 4.0), "#00ff00")];
    let background = SketchConfig::default().background_color();
    let artifact = export::export_png(&shapes, [32, 16], background, "image.png").unwrap();
    assert_eq!(artifact.mime, DOWNLOAD_MIME);
    assert_eq!(artifact.file_name, "image.png");

    let decoded = image::load_from_memory(&artifact.bytes).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (32, 16));
    assert_eq!(decoded.to_rgba8().get_pixel(3, 3).0, [0, 255, 0, 255]);
    assert_eq!(decoded.to_rgba8().get_pixel(20, 10).0, [255, 255, 255, 255]);
}

#[test]
fn test_export_looks_like_canvas() {
    let shapes = vec![
        rect((1.0, 1.0), (6.0, 3.0), "#123456"),
        Shape::Circle {
            center: pos2(10.0, 10.0),
            radius: 3.0,
            color: "#abcdef".into(),
        },
    ];
    let background = Color32::from_rgb(250, 240, 230);

    // The on-screen canvas clears to the background every tick.
    let mut on_screen = RasterSurface::with_background(16, 16, background);
    RenderLoop::new().tick(&mut on_screen, &shapes);

    let exported = export::export_png(&shapes, [16, 16], background, "image.png").unwrap();
    let decoded = image::load_from_memory(&exported.bytes).unwrap().to_rgba8();
    assert_eq!(&decoded, on_screen.image());
    assert_eq!(decoded.get_pixel(15, 0).0, background.to_srgba_unmultiplied());
}
