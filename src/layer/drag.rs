//! Pointer-driven repositioning of the drag-active layer.

use super::LayerStack;
use crate::error::Result;
use crate::geometry::Point;
use crate::part::PartName;

/// Drag state machine: `Idle -> Dragging -> Idle`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        part: PartName,
        /// Pointer position relative to the layer origin at press time.
        grab_offset: Point,
    },
}

/// Moves the drag-active layer while the pointer is held down.
#[derive(Debug, Clone, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Starts a drag if `part` is the drag-active layer. Returns whether a
    /// drag started; presses on any other layer are ignored.
    pub fn press(&mut self, stack: &LayerStack, part: &PartName, pointer: Point) -> Result<bool> {
        let layer = stack.layer(part)?;
        if !stack.is_responsive(part) {
            return Ok(false);
        }

        let grab_offset = pointer.offset_from(layer.position());
        self.state = DragState::Dragging {
            part: part.clone(),
            grab_offset,
        };
        tracing::debug!(part = %part, x = pointer.x, y = pointer.y, "drag started");
        Ok(true)
    }

    /// Moves the dragged layer so the grab offset stays under the pointer.
    ///
    /// Returns the new layer position, or `None` when nothing is being
    /// dragged. A drag whose layer lost drag-active status ends here.
    pub fn move_to(&mut self, stack: &mut LayerStack, pointer: Point) -> Result<Option<Point>> {
        let DragState::Dragging { part, grab_offset } = &self.state else {
            return Ok(None);
        };

        if !stack.is_responsive(part) {
            tracing::debug!(part = %part, "drag cancelled, layer no longer active");
            self.state = DragState::Idle;
            return Ok(None);
        }

        let position = pointer.offset_from(*grab_offset);
        stack.layer_mut(part)?.set_position(position);
        Ok(Some(position))
    }

    /// Ends any drag in progress, wherever the pointer is.
    pub fn release(&mut self) -> Option<PartName> {
        match std::mem::take(&mut self.state) {
            DragState::Dragging { part, .. } => {
                tracing::debug!(part = %part, "drag ended");
                Some(part)
            }
            DragState::Idle => None,
        }
    }
}
