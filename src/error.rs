use thiserror::Error;

/// Errors from the toolbar selection
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("Unknown tool: {0:?}")]
    UnknownTool(String),
}

/// Errors that can occur while saving the shape list
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to serialize shapes: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Shape {index} has a non-finite coordinate")]
    NonFinite { index: usize },
}

/// Errors that can occur while exporting the canvas
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to encode image: {0}")]
    Encode(#[from] image::ImageError),

    #[error("Failed to write export: {0}")]
    Write(#[from] std::io::Error),

    #[error("Canvas has no area ({width}x{height})")]
    EmptyCanvas { width: u32, height: u32 },

    #[error("Browser refused the download: {0}")]
    Web(String),
}

/// Any error the sketch app can surface
#[derive(Debug, Error)]
pub enum SketchError {
    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

pub type SketchResult<T> = Result<T, SketchError>;
