use crate::config::SketchConfig;
use crate::document::Document;
use crate::error::{ExportError, SketchError, SketchResult};
use crate::export::{self, ExportArtifact};
use crate::gesture::GestureOutcome;
use crate::input::{InputHandler, PointerEvent};
use crate::panels;
use crate::renderer::{RenderLoop, Surface};
use crate::selection::SelectionState;
use crate::shape::ColorValue;
use crate::store::MemoryStorage;

pub struct SketchApp {
    config: SketchConfig,
    document: Document,
    selection: SelectionState,
    render_loop: RenderLoop,
    input: InputHandler,
    // Stands in when the platform gives us no storage, so the code path is the same.
    fallback_storage: MemoryStorage,
    /// The canvas as of the last finished gesture, undo or clear.
    latest_export: Option<ExportArtifact>,
    status: Option<String>,
}

impl Default for SketchApp {
    fn default() -> Self {
        Self::from_parts(SketchConfig::default(), Document::default())
    }
}

/// The platform storage if there is one, else the in-memory stand-in.
fn storage_or<'a>(
    storage: Option<&'a mut (dyn eframe::Storage + 'static)>,
    fallback: &'a mut MemoryStorage,
) -> &'a mut (dyn eframe::Storage + 'static) {
    match storage {
        Some(storage) => storage,
        None => fallback,
    }
}

impl SketchApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        Self::with_config(cc, SketchConfig::default())
    }

    pub fn with_config(cc: &eframe::CreationContext<'_>, config: SketchConfig) -> Self {
        let document = Document::load(cc.storage, &config.storage_key);
        Self::from_parts(config, document)
    }

    pub fn from_parts(config: SketchConfig, document: Document) -> Self {
        let selection = SelectionState::new(config.default_tool, config.default_color.clone());
        Self {
            config,
            document,
            selection,
            render_loop: RenderLoop::new(),
            input: InputHandler::new(egui::Rect::NOTHING, 1.0),
            fallback_storage: MemoryStorage::new(),
            latest_export: None,
            status: None,
        }
    }

    pub fn config(&self) -> &SketchConfig {
        &self.config
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// One render-loop tick. Returns whether another frame is wanted.
    pub fn paint_canvas(&mut self, surface: &mut dyn Surface) -> bool {
        self.render_loop.tick(surface, self.document.shapes())
    }

    pub fn input_mut(&mut self) -> &mut InputHandler {
        &mut self.input
    }

    pub fn latest_export(&self) -> Option<&ExportArtifact> {
        self.latest_export.as_ref()
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Canvas size in device pixels as of the last frame.
    pub fn canvas_size(&self) -> [u32; 2] {
        self.input.device_size()
    }

    pub fn select_control(&mut self, control_id: &str) {
        if let Err(err) = self.selection.select_control(control_id) {
            self.report(err.into());
        }
    }

    pub fn set_color(&mut self, color: ColorValue) {
        self.selection.set_color(color);
    }

    /// `storage` is the platform store, usually `frame.storage_mut()`.
    pub fn handle_pointer(
        &mut self,
        event: PointerEvent,
        storage: Option<&mut (dyn eframe::Storage + 'static)>,
    ) {
        let storage = storage_or(storage, &mut self.fallback_storage);
        match self.document.handle_pointer(event, &self.selection, storage) {
            Ok(GestureOutcome::Completed) => self.refresh_export(),
            Ok(_) => {}
            Err(err) => self.report(err.into()),
        }
    }

    pub fn undo(&mut self, storage: Option<&mut (dyn eframe::Storage + 'static)>) {
        let storage = storage_or(storage, &mut self.fallback_storage);
        if let Err(err) = self.document.undo(storage) {
            self.report(err.into());
        }
        self.refresh_export();
    }

    pub fn clear(&mut self, ctx: &egui::Context, storage: Option<&mut (dyn eframe::Storage + 'static)>) {
        let storage = storage_or(storage, &mut self.fallback_storage);
        if let Err(err) = self.document.clear(storage) {
            self.report(err.into());
        }
        self.refresh_export();
        ctx.request_repaint();
    }

    /// Hand the canvas to the user.
    ///
    /// Uses the cached export when it still matches the canvas, otherwise
    /// renders a fresh one.
    pub fn download(&mut self) {
        let artifact = match self.current_export() {
            Some(artifact) => Ok(artifact.clone()),
            None => self.export_now(),
        };
        match artifact.and_then(|artifact| {
            let saved = export::offer_download(&artifact, &self.config.export)?;
            self.latest_export = Some(artifact);
            Ok(saved)
        }) {
            Ok(saved) => self.status = Some(format!("Saved {}", saved.display())),
            Err(err) => self.report(err),
        }
    }

    /// The cached export, if it was rendered at the current canvas size and
    /// no shape is being dragged out.
    fn current_export(&self) -> Option<&ExportArtifact> {
        let [width, height] = self.canvas_size();
        self.latest_export
            .as_ref()
            .filter(|artifact| artifact.width == width && artifact.height == height)
            .filter(|_| !self.document.is_drawing())
    }

    fn export_now(&self) -> SketchResult<ExportArtifact> {
        Ok(export::export_png(
            self.document.shapes(),
            self.canvas_size(),
            self.config.background_color(),
            &self.config.export.file_name,
        )?)
    }

    fn refresh_export(&mut self) {
        match self.export_now() {
            Ok(artifact) => self.latest_export = Some(artifact),
            Err(SketchError::Export(ExportError::EmptyCanvas { .. })) => {
                // Not laid out yet; a download will report it.
                self.latest_export = None;
            }
            Err(err) => {
                self.latest_export = None;
                self.report(err);
            }
        }
    }

    fn report(&mut self, err: SketchError) {
        match &err {
            SketchError::Selection(_) => log::warn!("{}", err),
            SketchError::Store(_) | SketchError::Export(_) => log::error!("{}", err),
        }
        self.status = Some(err.to_string());
    }
}

impl eframe::App for SketchApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        if let Err(err) = self.document.save(storage) {
            self.report(err.into());
        }
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        let (minimized, closing) =
            ctx.input(|i| (i.viewport().minimized.unwrap_or(false), i.viewport().close_requested()));
        if closing {
            self.render_loop.stop();
        } else if minimized {
            self.render_loop.pause();
        } else {
            self.render_loop.resume();
        }

        panels::tools_panel(self, ctx, frame);
        panels::central_panel(self, ctx, frame);
    }
}
