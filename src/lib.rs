#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod components;
pub mod config;
pub mod document;
pub mod error;
pub mod export;
pub mod gesture;
pub mod input;
pub mod panels;
pub mod raster;
pub mod renderer;
pub mod selection;
pub mod shape;
pub mod store;
pub mod tool;

pub use app::SketchApp;
pub use config::{ExportConfig, SketchConfig};
pub use document::Document;
pub use error::{SketchError, SketchResult};
pub use gesture::{GestureController, GestureOutcome, GestureState};
pub use input::{InputHandler, PointerEvent};
pub use raster::RasterSurface;
pub use renderer::{RenderLoop, Surface};
pub use selection::{Selection, SelectionState};
pub use shape::{ColorValue, Shape};
pub use store::{MemoryStorage, ShapeStore};
pub use tool::Tool;
