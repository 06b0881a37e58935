use egui::{PointerButton, Pos2, Rect, Response};

/// A pointer event on the canvas, in canvas-relative device pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down(Pos2),
    Move(Pos2),
    Up(Pos2),
}

impl PointerEvent {
    pub fn position(&self) -> Pos2 {
        match self {
            Self::Down(pos) | Self::Move(pos) | Self::Up(pos) => *pos,
        }
    }
}

/// Handles converting egui drag responses on the canvas into [`PointerEvent`]s
pub struct InputHandler {
    canvas_rect: Rect,
    pixels_per_point: f32,
    last_pos: Option<Pos2>,
}

impl InputHandler {
    pub fn new(canvas_rect: Rect, pixels_per_point: f32) -> Self {
        Self {
            canvas_rect,
            pixels_per_point,
            last_pos: None,
        }
    }

    /// Update the canvas geometry (e.g. if the window is resized or moved
    /// to a screen with a different scale factor)
    pub fn set_canvas(&mut self, rect: Rect, pixels_per_point: f32) {
        self.canvas_rect = rect;
        self.pixels_per_point = pixels_per_point;
    }

    /// Screen position in points to canvas device pixels.
    pub fn to_device(&self, pos: Pos2) -> Pos2 {
        ((pos - self.canvas_rect.min) * self.pixels_per_point).to_pos2()
    }

    /// Canvas device pixels back to screen points.
    pub fn to_screen(&self, pos: Pos2) -> Pos2 {
        self.canvas_rect.min + pos.to_vec2() / self.pixels_per_point
    }

    /// Canvas size in whole device pixels.
    pub fn device_size(&self) -> [u32; 2] {
        let size = self.canvas_rect.size() * self.pixels_per_point;
        [size.x.round().max(0.0) as u32, size.y.round().max(0.0) as u32]
    }

    /// Process the canvas response for this frame and generate pointer events
    pub fn process(&mut self, response: &Response) -> Vec<PointerEvent> {
        let mut events = Vec::new();
        let pointer = response.interact_pointer_pos();

        if response.drag_started_by(PointerButton::Primary) {
            if let Some(pos) = pointer {
                let pos = self.to_device(pos);
                events.push(PointerEvent::Down(pos));
                self.last_pos = Some(pos);
            }
        } else if response.dragged_by(PointerButton::Primary) {
            if let Some(pos) = pointer {
                let pos = self.to_device(pos);
                if self.last_pos != Some(pos) {
                    events.push(PointerEvent::Move(pos));
                    self.last_pos = Some(pos);
                }
            }
        }

        if response.drag_stopped_by(PointerButton::Primary) {
            events.push(PointerEvent::Up(self.release_position(pointer)));
            self.last_pos = None;
        }

        events
    }

    /// The release may happen outside the window, where there is no position.
    fn release_position(&self, pointer: Option<Pos2>) -> Pos2 {
        pointer
            .map(|pos| self.to_device(pos))
            .or(self.last_pos)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{pos2, vec2};

    #[test]
    fn test_device_pixel_mapping() {
        let handler = InputHandler::new(Rect::from_min_size(pos2(100.0, 50.0), vec2(200.0, 100.0)), 2.0);
        assert_eq!(handler.to_device(pos2(110.0, 55.0)), pos2(20.0, 10.0));
        assert_eq!(handler.to_screen(pos2(20.0, 10.0)), pos2(110.0, 55.0));
        assert_eq!(handler.device_size(), [400, 200]);
    }

    #[test]
    fn test_release_without_position_uses_last_known() {
        let mut handler = InputHandler::new(Rect::from_min_size(pos2(10.0, 10.0), vec2(50.0, 50.0)), 1.0);
        assert_eq!(handler.release_position(None), Pos2::ZERO);

        handler.last_pos = Some(pos2(30.0, 5.0));
        assert_eq!(handler.release_position(None), pos2(30.0, 5.0));
        assert_eq!(handler.release_position(Some(pos2(20.0, 20.0))), pos2(10.0, 10.0));
    }
}
