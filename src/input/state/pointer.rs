use crate::draw::{RenderError, StrokeStyle, render_segment};
use crate::input::{events::PointerEvent, mapper::CanvasPoint};
use crate::util;

use super::{InputState, InteractionState};

impl InputState {
    /// Processes a pointer (mouse button or touch start) press.
    ///
    /// # Behavior
    /// - Brush/Eraser while Idle: starts a stroke at the mapped point
    /// - Brush/Eraser while Stroking (missed release): restarts the stroke
    /// - Text tool: no-op; text is placed by double click
    pub fn on_pointer_down(&mut self, event: &PointerEvent) {
        if !self.tool.draws_strokes() {
            return;
        }
        let Some(point) = self.map_pointer(event) else {
            return;
        };

        match self.state {
            InteractionState::Idle => {}
            InteractionState::Stroking { .. } => {
                log::debug!("Pointer pressed while stroking; restarting stroke");
                self.end_stroke();
            }
            InteractionState::AwaitingText(_) => {
                log::warn!("Pointer pressed with text pending outside text mode; ignoring");
                return;
            }
        }

        let style = StrokeStyle::new(
            self.brush.size,
            self.brush.color,
            self.background,
            self.tool.is_erasing(),
        );
        self.paint_segment(point, point, &style);
        self.state = InteractionState::Stroking { last: point, style };
        log::trace!("Stroke started at ({:.1}, {:.1})", point.x, point.y);
    }

    /// Processes pointer motion.
    ///
    /// While stroking, paints the segment from the previous point to the new
    /// one immediately, so the line grows live. Otherwise a no-op.
    pub fn on_pointer_move(&mut self, event: &PointerEvent) {
        if !self.tool.draws_strokes() {
            return;
        }
        let InteractionState::Stroking { last, style } = self.state else {
            return;
        };
        let Some(point) = self.map_pointer(event) else {
            return;
        };

        self.paint_segment(last, point, &style);
        self.state = InteractionState::Stroking { last: point, style };
    }

    /// Processes pointer release; ends the stroke.
    pub fn on_pointer_up(&mut self) {
        self.end_stroke();
    }

    /// Processes the pointer leaving the canvas; ends the stroke exactly like a release.
    pub fn on_pointer_leave(&mut self) {
        self.end_stroke();
    }

    /// Closes the current stroke. Returns false when no stroke was in progress.
    pub(super) fn end_stroke(&mut self) -> bool {
        if !self.is_stroking() {
            return false;
        }
        self.state = InteractionState::Idle;
        log::trace!("Stroke ended");
        true
    }

    fn paint_segment(&mut self, from: CanvasPoint, to: CanvasPoint, style: &StrokeStyle) {
        let painted = self.store.context().and_then(|ctx| {
            render_segment(&ctx, from.as_tuple(), to.as_tuple(), style).map_err(RenderError::from)
        });

        match painted {
            Ok(()) => {
                self.store.mark_modified();
                self.dirty_tracker.mark_optional_rect(util::segment_bounds(
                    from.x,
                    from.y,
                    to.x,
                    to.y,
                    style.width,
                ));
                self.needs_redraw = true;
            }
            Err(err) => log::warn!("Failed to paint stroke segment: {}", err),
        }
    }
}
