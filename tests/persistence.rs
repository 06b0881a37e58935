use eframe::Storage as _;
use egui::{pos2, vec2};
use shape_sketch::store::{DEFAULT_STORAGE_KEY, MemoryStorage};
use shape_sketch::{Document, PointerEvent, SelectionState, Shape, ShapeStore, Tool};

fn sample_shapes() -> Vec<Shape> {
    vec![
        Shape::Circle {
            center: pos2(12.5, -3.25),
            radius: 7.125,
            color: "#FF0000".into(),
        },
        Shape::Rectangle {
            origin: pos2(50.0, 50.0),
            size: vec2(-20.0, -10.0),
            color: "rgb(1, 2, 3)".into(),
        },
        Shape::Rectangle {
            origin: pos2(0.1, 0.2),
            size: vec2(1e6, 0.3),
            color: "".into(),
        },
        Shape::Circle {
            center: pos2(1920.0, 1080.0),
            radius: 0.0,
            color: "#abc".into(),
        },
    ]
}

#[test]
fn test_persist_then_reload_round_trips() {
    let mut store = ShapeStore::new("drawing");
    for shape in sample_shapes() {
        store.append(shape);
    }
    let mut storage = MemoryStorage::new();
    store.persist(&mut storage).unwrap();

    // Simulate a restart: only the storage survives.
    let reloaded = ShapeStore::load(Some(&storage), "drawing");
    assert_eq!(reloaded.shapes(), sample_shapes().as_slice());
}

#[test]
fn test_stored_json_keeps_legacy_field_names() {
    let mut store = ShapeStore::default();
    for shape in sample_shapes() {
        store.append(shape);
    }
    let mut storage = MemoryStorage::new();
    store.persist(&mut storage).unwrap();

    let json = storage.get_string(DEFAULT_STORAGE_KEY).unwrap();
    let records: Vec<serde_json::Value> = serde_json::from_str(&json).unwrap();
    assert_eq!(records[0]["type"], "circle");
    assert_eq!(records[0]["x"], 12.5);
    assert_eq!(records[0]["radius"], 7.125);
    assert_eq!(records[1]["type"], "rectangle");
    assert_eq!(records[1]["x1"], 50.0);
    assert_eq!(records[1]["x2"], -20.0);
    assert_eq!(records[1]["color"], "rgb(1, 2, 3)");
}

#[test]
fn test_every_mutation_is_persisted() {
    let mut storage = MemoryStorage::new();
    let mut doc = Document::default();
    let selection = SelectionState::new(Tool::Circle, "#00ff00".into());
    let stored = |storage: &MemoryStorage| Document::load(Some(storage), DEFAULT_STORAGE_KEY).shapes().to_vec();

    for event in [
        PointerEvent::Down(pos2(5.0, 5.0)),
        PointerEvent::Move(pos2(5.0, 9.0)),
        PointerEvent::Up(pos2(5.0, 9.0)),
    ] {
        doc.handle_pointer(event, &selection, &mut storage).unwrap();
    }
    assert_eq!(stored(&storage), doc.shapes());

    doc.undo(&mut storage).unwrap();
    assert!(stored(&storage).is_empty());

    doc.handle_pointer(PointerEvent::Down(pos2(1.0, 1.0)), &selection, &mut storage)
        .unwrap();
    doc.handle_pointer(PointerEvent::Up(pos2(1.0, 1.0)), &selection, &mut storage)
        .unwrap();
    assert_eq!(stored(&storage).len(), 1);

    doc.clear(&mut storage).unwrap();
    assert!(doc.shapes().is_empty());
    assert_eq!(storage.get_string(DEFAULT_STORAGE_KEY).as_deref(), Some("[]"));
}

#[test]
fn test_unreadable_storage_starts_empty() {
    let mut storage = MemoryStorage::new();
    storage.set_string(DEFAULT_STORAGE_KEY, r#"[{"type":"triangle"}]"#.to_owned());
    assert!(Document::load(Some(&storage), DEFAULT_STORAGE_KEY).shapes().is_empty());

    storage.set_string(DEFAULT_STORAGE_KEY, "null".to_owned());
    assert!(Document::load(Some(&storage), DEFAULT_STORAGE_KEY).shapes().is_empty());
}

#[test]
fn test_out_of_range_record_does_not_wipe_list_after_next_gesture() {
    let mut storage = MemoryStorage::new();
    storage.set_string(
        DEFAULT_STORAGE_KEY,
        r##"[{"type":"circle","x":5,"y":5,"radius":2,"color":"#FF0000"},
             {"type":"rectangle","x1":1e39,"y1":0,"x2":4,"y2":4,"color":"#00ff00"}]"##
            .to_owned(),
    );

    let mut doc = Document::load(Some(&storage), DEFAULT_STORAGE_KEY);
    assert_eq!(doc.shapes().len(), 1);

    let selection = SelectionState::default();
    for event in [
        PointerEvent::Down(pos2(10.0, 10.0)),
        PointerEvent::Move(pos2(20.0, 15.0)),
        PointerEvent::Up(pos2(20.0, 15.0)),
    ] {
        doc.handle_pointer(event, &selection, &mut storage).unwrap();
    }

    let reloaded = ShapeStore::load(Some(&storage), DEFAULT_STORAGE_KEY);
    assert_eq!(reloaded.len(), 2);
    assert_eq!(reloaded.shapes(), doc.shapes());
}
