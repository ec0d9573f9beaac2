use crate::draw::{RenderError, render::measure_text, render_text};
use crate::input::{
    events::{Key, PointerEvent},
    mapper::{self, CanvasPoint},
    tool::Tool,
};
use crate::util::Rect;

use super::{InputState, InteractionState, PendingText};

impl InputState {
    /// Processes a double click.
    ///
    /// With the text tool active, opens a text overlay anchored at the mapped
    /// canvas position. A previously pending overlay is committed first, so at
    /// most one overlay exists. Ignored for the other tools.
    pub fn on_double_click(&mut self, event: &PointerEvent) {
        if self.tool != Tool::Text {
            log::debug!("Double click ignored outside text mode");
            return;
        }
        let Some(canvas_position) = self.map_pointer(event) else {
            return;
        };

        self.finish_interaction();

        let screen_position = mapper::canvas_to_parent(
            canvas_position,
            &self.canvas_rect,
            &self.parent_rect,
            self.store.width(),
            self.store.height(),
        );
        self.state = InteractionState::AwaitingText(PendingText {
            canvas_position,
            screen_position,
            content: String::new(),
        });
        self.needs_redraw = true;
        log::debug!(
            "Text overlay opened at canvas ({:.1}, {:.1})",
            canvas_position.x,
            canvas_position.y
        );
    }

    /// Replaces the pending overlay content (one call per input change).
    pub fn update_text(&mut self, text: &str) {
        if let InteractionState::AwaitingText(pending) = &mut self.state {
            pending.content.clear();
            pending.content.push_str(text);
            self.needs_redraw = true;
        }
    }

    /// Processes a key press while the text overlay is open.
    ///
    /// - `Return` commits the text
    /// - `Escape` discards it
    /// - `Char`/`Backspace` edit the content
    pub fn on_key_press(&mut self, key: Key) {
        match key {
            Key::Return => {
                self.commit_text();
                return;
            }
            Key::Escape => {
                self.discard_text();
                return;
            }
            _ => {}
        }

        let InteractionState::AwaitingText(pending) = &mut self.state else {
            return;
        };
        match key {
            Key::Char(c) => {
                pending.content.push(c);
                self.needs_redraw = true;
            }
            Key::Backspace => {
                if pending.content.pop().is_some() {
                    self.needs_redraw = true;
                }
            }
            Key::Return | Key::Escape | Key::Unknown => {}
        }
    }

    /// Processes the overlay losing focus; commits pending text.
    pub fn on_blur(&mut self) {
        self.commit_text();
    }

    /// Renders the pending text into the backing store and closes the overlay.
    ///
    /// Text is drawn at `2 × brush size` pixels in the brush color with its
    /// baseline origin at the anchor. Returns false if no overlay was open.
    pub fn commit_text(&mut self) -> bool {
        let pending = match std::mem::replace(&mut self.state, InteractionState::Idle) {
            InteractionState::AwaitingText(pending) => pending,
            other => {
                self.state = other;
                return false;
            }
        };

        let pixel_size = self.brush.text_pixel_size();
        let CanvasPoint { x, y } = pending.canvas_position;
        let drawn = self.store.context().and_then(|ctx| {
            render_text(
                &ctx,
                x,
                y,
                &pending.content,
                self.brush.color,
                pixel_size,
                &self.font_descriptor,
            )?;
            let (left, top, width, height) =
                measure_text(&ctx, &pending.content, pixel_size, &self.font_descriptor);
            Ok::<_, RenderError>(Rect::from_min_max(
                (x + left).floor() as i32 - 2,
                (y + top).floor() as i32 - 2,
                (x + left + width).ceil() as i32 + 2,
                (y + top + height).ceil() as i32 + 2,
            ))
        });

        match drawn {
            Ok(bounds) => {
                if !pending.content.is_empty() {
                    self.store.mark_modified();
                    self.dirty_tracker.mark_optional_rect(bounds);
                }
                log::debug!(
                    "Committed text {:?} at ({:.1}, {:.1}), {}px",
                    pending.content,
                    x,
                    y,
                    pixel_size
                );
            }
            Err(err) => log::warn!("Failed to render text: {}", err),
        }

        self.needs_redraw = true;
        true
    }

    /// Closes the overlay without drawing. Returns false if none was open.
    pub fn discard_text(&mut self) -> bool {
        if self.pending_text().is_none() {
            return false;
        }
        self.state = InteractionState::Idle;
        self.needs_redraw = true;
        log::debug!("Text overlay discarded");
        true
    }
}
