use crate::error::StoreError;
use crate::gesture::{GestureController, GestureOutcome};
use crate::input::PointerEvent;
use crate::selection::SelectionState;
use crate::shape::Shape;
use crate::store::ShapeStore;

/// The drawing: the shape list plus the gesture currently editing it.
///
/// Every change that finishes something (a gesture, an undo, a clear) is
/// written to storage before the call returns.
#[derive(Debug, Default)]
pub struct Document {
    store: ShapeStore,
    gesture: GestureController,
}

impl Document {
    pub fn new(store: ShapeStore) -> Self {
        Self {
            store,
            gesture: GestureController::new(),
        }
    }

    /// Restore the drawing saved under `key`, or start empty.
    pub fn load(storage: Option<&dyn eframe::Storage>, key: &str) -> Self {
        Self::new(ShapeStore::load(storage, key))
    }

    pub fn shapes(&self) -> &[Shape] {
        self.store.shapes()
    }

    pub fn store(&self) -> &ShapeStore {
        &self.store
    }

    pub fn is_drawing(&self) -> bool {
        self.gesture.is_active()
    }

    /// Feed one pointer event through the gesture controller.
    ///
    /// The tool and color are read from `selection` only on `Down`.
    pub fn handle_pointer(
        &mut self,
        event: PointerEvent,
        selection: &SelectionState,
        storage: &mut dyn eframe::Storage,
    ) -> Result<GestureOutcome, StoreError> {
        let outcome = match event {
            PointerEvent::Down(pos) => {
                if self.gesture.is_active() {
                    // Missed release: finish the old shape before starting another.
                    self.gesture.pointer_up();
                    self.store.persist(storage)?;
                }
                self.gesture
                    .pointer_down(pos, &selection.snapshot(), &mut self.store)
            }
            PointerEvent::Move(pos) => self.gesture.pointer_move(pos, &mut self.store),
            PointerEvent::Up(_) => self.gesture.pointer_up(),
        };
        if outcome == GestureOutcome::Completed {
            self.store.persist(storage)?;
        }
        Ok(outcome)
    }

    /// Remove the most recent shape. Nothing to undo is not an error.
    pub fn undo(&mut self, storage: &mut dyn eframe::Storage) -> Result<Option<Shape>, StoreError> {
        // An undo mid-drag takes the in-progress shape with it.
        self.gesture.cancel();
        let removed = self.store.pop_last();
        match &removed {
            Some(shape) => log::info!("Undo: removed {}", shape.kind()),
            None => log::debug!("Undo: nothing to remove"),
        }
        self.store.persist(storage)?;
        Ok(removed)
    }

    pub fn clear(&mut self, storage: &mut dyn eframe::Storage) -> Result<(), StoreError> {
        self.gesture.cancel();
        log::info!("Clearing {} shapes", self.store.len());
        self.store.clear();
        self.store.persist(storage)
    }

    /// Write the current list to storage.
    pub fn save(&self, storage: &mut dyn eframe::Storage) -> Result<(), StoreError> {
        self.store.persist(storage)
    }
}
