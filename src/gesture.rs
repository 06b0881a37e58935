use egui::Pos2;

use crate::selection::Selection;
use crate::shape::Shape;
use crate::store::ShapeStore;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum GestureState {
    #[default]
    Idle,
    /// A shape is being dragged out. It is the last shape in the store.
    Active { start: Pos2 },
}

/// What a pointer event did to the shape list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureOutcome {
    /// Nothing changed (e.g. a move without a press).
    Ignored,
    Started,
    Updated,
    /// The gesture ended and the last shape is final. Time to persist.
    Completed,
}

/// Turns press / drag / release into "append a shape, then keep resizing it".
#[derive(Debug, Default)]
pub struct GestureController {
    state: GestureState,
}

impl GestureController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, GestureState::Active { .. })
    }

    /// Start a new shape at `pos` using the tool and color picked right now.
    ///
    /// A press while already active means we missed a release; the old shape
    /// is left as it is and the new one becomes the last.
    pub fn pointer_down(
        &mut self,
        pos: Pos2,
        selection: &Selection,
        store: &mut ShapeStore,
    ) -> GestureOutcome {
        if let GestureState::Active { start } = self.state {
            log::warn!("Pointer down while a gesture started at {:?} is still active", start);
        }
        store.append(Shape::begin(selection.tool, selection.color.clone(), pos));
        self.state = GestureState::Active { start: pos };
        log::debug!("Gesture started: {} at {:?}", selection.tool, pos);
        GestureOutcome::Started
    }

    pub fn pointer_move(&mut self, pos: Pos2, store: &mut ShapeStore) -> GestureOutcome {
        let GestureState::Active { start } = self.state else {
            return GestureOutcome::Ignored;
        };
        if store.mutate_last(|shape| shape.drag_to(start, pos)) {
            GestureOutcome::Updated
        } else {
            // The list was emptied under us (clear mid-drag). Nothing left to resize.
            self.state = GestureState::Idle;
            GestureOutcome::Ignored
        }
    }

    pub fn pointer_up(&mut self) -> GestureOutcome {
        match self.state {
            GestureState::Idle => GestureOutcome::Ignored,
            GestureState::Active { .. } => {
                self.state = GestureState::Idle;
                log::debug!("Gesture completed");
                GestureOutcome::Completed
            }
        }
    }

    /// Drop any running gesture without touching the store.
    pub fn cancel(&mut self) {
        self.state = GestureState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::Tool;
    use egui::{pos2, vec2};

    fn selection(tool: Tool) -> Selection {
        Selection {
            tool,
            color: "#FF0000".into(),
        }
    }

    #[test]
    fn test_rect_size_from_press_position() {
        let mut gesture = GestureController::new();
        let mut store = ShapeStore::default();
        let sel = selection(Tool::Rectangle);

        gesture.pointer_down(pos2(10.0, 10.0), &sel, &mut store);
        gesture.pointer_move(pos2(40.0, 10.0), &mut store);
        gesture.pointer_move(pos2(40.0, 50.0), &mut store);

        assert_eq!(
            store.last(),
            Some(&Shape::Rectangle {
                origin: pos2(10.0, 10.0),
                size: vec2(30.0, 40.0),
                color: "#FF0000".into(),
            })
        );
        assert_eq!(gesture.pointer_up(), GestureOutcome::Completed);
        assert_eq!(gesture.state(), GestureState::Idle);
    }

    #[test]
    fn test_idle_move_and_up_ignored() {
        let mut gesture = GestureController::new();
        let mut store = ShapeStore::default();
        assert_eq!(gesture.pointer_move(pos2(1.0, 1.0), &mut store), GestureOutcome::Ignored);
        assert_eq!(gesture.pointer_up(), GestureOutcome::Ignored);
        assert!(store.is_empty());
    }

    #[test]
    fn test_move_after_clear_goes_idle() {
        let mut gesture = GestureController::new();
        let mut store = ShapeStore::default();
        gesture.pointer_down(Pos2::ZERO, &selection(Tool::Circle), &mut store);
        store.clear();
        assert_eq!(gesture.pointer_move(pos2(3.0, 4.0), &mut store), GestureOutcome::Ignored);
        assert!(!gesture.is_active());
    }
}
