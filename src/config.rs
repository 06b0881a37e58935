use std::path::PathBuf;

use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::shape::ColorValue;
use crate::store::DEFAULT_STORAGE_KEY;
use crate::tool::Tool;

/// Where the "Download" button puts the image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub file_name: String,
    /// Native only. The browser decides where downloads go.
    pub directory: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            file_name: "image.png".to_owned(),
            directory: PathBuf::from("."),
        }
    }
}

/// Startup settings for the sketch app.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)] // missing fields fall back to the defaults below
pub struct SketchConfig {
    /// Storage key the shape list is saved under.
    pub storage_key: String,
    pub default_tool: Tool,
    pub default_color: ColorValue,
    /// Canvas color behind the shapes, `#rrggbb`.
    pub background: ColorValue,
    pub export: ExportConfig,
}

impl Default for SketchConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_owned(),
            default_tool: Tool::default(),
            default_color: ColorValue::default(),
            background: ColorValue::new("#ffffff"),
            export: ExportConfig::default(),
        }
    }
}

impl SketchConfig {
    pub fn background_color(&self) -> Color32 {
        self.background.to_color32()
    }
}
