use egui::{Color32, Painter, Pos2, Rect};

use crate::shape::Shape;

/// Something shapes can be painted onto. Coordinates are device pixels.
pub trait Surface {
    /// Wipe everything painted so far.
    fn clear(&mut self);

    fn fill_circle(&mut self, center: Pos2, radius: f32, color: Color32);

    /// `rect` is already normalized (non-negative size).
    fn fill_rect(&mut self, rect: Rect, color: Color32);
}

/// Paint a single shape with its own color as fill. No outline.
pub fn paint_shape(surface: &mut dyn Surface, shape: &Shape) {
    let color = shape.color().to_color32();
    match shape {
        Shape::Circle { center, radius, .. } => {
            surface.fill_circle(*center, radius.max(0.0), color);
        }
        Shape::Rectangle { .. } => {
            surface.fill_rect(shape.bounds(), color);
        }
    }
}

/// Clear the surface, then paint every shape in list order so later
/// shapes end up on top.
pub fn paint_shapes(surface: &mut dyn Surface, shapes: &[Shape]) {
    surface.clear();
    for shape in shapes {
        paint_shape(surface, shape);
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoopState {
    #[default]
    Running,
    Paused,
    /// Terminal. Nothing is painted or scheduled any more.
    Stopped,
}

/// The per-frame redraw.
///
/// Every tick repaints the whole list from scratch. The host asks for the
/// next frame only while [`RenderLoop::tick`] returns true.
#[derive(Debug, Default)]
pub struct RenderLoop {
    state: LoopState,
    frames: u64,
}

impl RenderLoop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Number of frames painted so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Returns whether another frame should be scheduled.
    pub fn tick(&mut self, surface: &mut dyn Surface, shapes: &[Shape]) -> bool {
        match self.state {
            LoopState::Running => {
                paint_shapes(surface, shapes);
                self.frames += 1;
                true
            }
            LoopState::Paused | LoopState::Stopped => false,
        }
    }

    pub fn pause(&mut self) {
        if self.state == LoopState::Running {
            log::debug!("Render loop paused after {} frames", self.frames);
            self.state = LoopState::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.state == LoopState::Paused {
            log::debug!("Render loop resumed");
            self.state = LoopState::Running;
        }
    }

    pub fn stop(&mut self) {
        if self.state != LoopState::Stopped {
            log::info!("Render loop stopped after {} frames", self.frames);
        }
        self.state = LoopState::Stopped;
    }
}

/// Paints onto the egui canvas area.
///
/// Shapes live in device pixels relative to the canvas corner, egui wants
/// screen points, so everything is mapped back through `pixels_per_point`.
pub struct EguiSurface<'a> {
    painter: &'a Painter,
    canvas: Rect,
    pixels_per_point: f32,
    background: Color32,
}

impl<'a> EguiSurface<'a> {
    pub fn new(painter: &'a Painter, canvas: Rect, pixels_per_point: f32, background: Color32) -> Self {
        Self {
            painter,
            canvas,
            pixels_per_point,
            background,
        }
    }

    fn to_screen(&self, pos: Pos2) -> Pos2 {
        self.canvas.min + pos.to_vec2() / self.pixels_per_point
    }
}

impl Surface for EguiSurface<'_> {
    fn clear(&mut self) {
        self.painter.rect_filled(self.canvas, 0.0, self.background);
    }

    fn fill_circle(&mut self, center: Pos2, radius: f32, color: Color32) {
        self.painter
            .circle_filled(self.to_screen(center), radius / self.pixels_per_point, color);
    }

    fn fill_rect(&mut self, rect: Rect, color: Color32) {
        let rect = Rect::from_min_max(self.to_screen(rect.min), self.to_screen(rect.max));
        self.painter.rect_filled(rect, 0.0, color);
    }
}
