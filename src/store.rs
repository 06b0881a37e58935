use std::collections::HashMap;

use egui::{pos2, vec2};
use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::shape::{ColorValue, Shape};

pub const DEFAULT_STORAGE_KEY: &str = "shapes";

/// On-disk form of a [`Shape`].
///
/// Rectangles keep `x2`/`y2` as offsets from `x1`/`y1` so lists saved by
/// earlier versions of the page still load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ShapeRecord {
    Circle {
        x: f32,
        y: f32,
        radius: f32,
        color: ColorValue,
    },
    Rectangle {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        color: ColorValue,
    },
}

impl ShapeRecord {
    /// JSON has no encoding for NaN or infinity, they would be written as `null`.
    pub fn is_finite(&self) -> bool {
        match self {
            Self::Circle { x, y, radius, .. } => [x, y, radius].iter().all(|v| v.is_finite()),
            Self::Rectangle { x1, y1, x2, y2, .. } => {
                [x1, y1, x2, y2].iter().all(|v| v.is_finite())
            }
        }
    }
}

impl From<&Shape> for ShapeRecord {
    fn from(shape: &Shape) -> Self {
        match shape {
            Shape::Circle {
                center,
                radius,
                color,
            } => Self::Circle {
                x: center.x,
                y: center.y,
                radius: *radius,
                color: color.clone(),
            },
            Shape::Rectangle {
                origin,
                size,
                color,
            } => Self::Rectangle {
                x1: origin.x,
                y1: origin.y,
                x2: size.x,
                y2: size.y,
                color: color.clone(),
            },
        }
    }
}

impl From<ShapeRecord> for Shape {
    fn from(record: ShapeRecord) -> Self {
        match record {
            ShapeRecord::Circle {
                x,
                y,
                radius,
                color,
            } => Self::Circle {
                center: pos2(x, y),
                radius: radius.max(0.0),
                color,
            },
            ShapeRecord::Rectangle {
                x1,
                y1,
                x2,
                y2,
                color,
            } => Self::Rectangle {
                origin: pos2(x1, y1),
                size: vec2(x2, y2),
                color,
            },
        }
    }
}

/// The ordered list of shapes: paint order and undo order.
///
/// The last shape is the only one a gesture may still be changing.
#[derive(Debug, Clone)]
pub struct ShapeStore {
    shapes: Vec<Shape>,
    key: String,
}

impl Default for ShapeStore {
    fn default() -> Self {
        Self::new(DEFAULT_STORAGE_KEY)
    }
}

impl ShapeStore {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            shapes: Vec::new(),
            key: key.into(),
        }
    }

    /// Restore the list saved under `key`.
    ///
    /// Missing storage, a missing key or data that does not parse all give
    /// an empty list. Records with out-of-range numbers (e.g. `1e39`, which
    /// overflows `f32`) are dropped.
    pub fn load(storage: Option<&dyn eframe::Storage>, key: impl Into<String>) -> Self {
        let mut store = Self::new(key);
        let Some(storage) = storage else {
            log::debug!("No storage available, starting with an empty canvas");
            return store;
        };
        let Some(json) = storage.get_string(&store.key) else {
            return store;
        };
        match serde_json::from_str::<Vec<ShapeRecord>>(&json) {
            Ok(records) => {
                let total = records.len();
                store.shapes = records
                    .into_iter()
                    .filter(ShapeRecord::is_finite)
                    .map(Shape::from)
                    .collect();
                if store.shapes.len() < total {
                    log::warn!(
                        "Dropped {} stored shapes with non-finite coordinates",
                        total - store.shapes.len()
                    );
                }
                log::info!("Restored {} shapes", store.shapes.len());
            }
            Err(err) => {
                log::warn!("Discarding unreadable shapes under {:?}: {}", store.key, err);
            }
        }
        store
    }

    /// Fails instead of writing a list that would not load back.
    pub fn to_json(&self) -> Result<String, StoreError> {
        let records: Vec<ShapeRecord> = self.shapes.iter().map(ShapeRecord::from).collect();
        if let Some(index) = records.iter().position(|record| !record.is_finite()) {
            return Err(StoreError::NonFinite { index });
        }
        Ok(serde_json::to_string(&records)?)
    }

    /// Replace the stored list with the current one and flush it right away.
    pub fn persist(&self, storage: &mut dyn eframe::Storage) -> Result<(), StoreError> {
        let json = self.to_json()?;
        storage.set_string(&self.key, json);
        storage.flush();
        log::debug!("Persisted {} shapes", self.shapes.len());
        Ok(())
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn last(&self) -> Option<&Shape> {
        self.shapes.last()
    }

    pub fn append(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    /// Returns false when there is nothing to mutate.
    pub fn mutate_last(&mut self, f: impl FnOnce(&mut Shape)) -> bool {
        match self.shapes.last_mut() {
            Some(shape) => {
                f(shape);
                true
            }
            None => false,
        }
    }

    pub fn pop_last(&mut self) -> Option<Shape> {
        self.shapes.pop()
    }

    pub fn clear(&mut self) {
        self.shapes.clear();
    }
}

/// In-process key/value storage, for running without a platform store.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    values: HashMap<String, String>,
    flushes: usize,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// How many times the storage has been flushed.
    pub fn flushes(&self) -> usize {
        self.flushes
    }
}

impl eframe::Storage for MemoryStorage {
    fn get_string(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set_string(&mut self, key: &str, value: String) {
        self.values.insert(key.to_owned(), value);
    }

    fn flush(&mut self) {
        self.flushes += 1;
    }
}
