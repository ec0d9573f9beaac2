//! Tool state machine and input state management.

use crate::draw::{BackingStore, Color, DirtyTracker, FontDescriptor, StrokeStyle};
use crate::input::{
    events::PointerEvent,
    mapper::{self, CanvasPoint, DisplayRect},
    tool::{BrushConfig, Tool, clamp_brush_size},
};
use crate::util::Rect;

/// Text overlay waiting to be committed into the backing store.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingText {
    /// Baseline origin of the text in backing-store pixels
    pub canvas_position: CanvasPoint,
    /// Overlay position relative to the canvas's parent container
    pub screen_position: (f64, f64),
    /// Current content of the overlay input
    pub content: String,
}

/// Current interaction state machine.
///
/// Tracks whether the user is idle, painting a stroke, or typing into a text
/// overlay. Replaces independent `drawing`/`erasing`/`text` flags so that
/// contradictory combinations cannot exist.
#[derive(Debug, Clone, PartialEq)]
pub enum InteractionState {
    /// Not interacting - waiting for user input
    Idle,
    /// Pointer held down with the brush or eraser
    Stroking {
        /// Last mapped point; the next move paints a segment from here
        last: CanvasPoint,
        /// Style fixed when the stroke began
        style: StrokeStyle,
    },
    /// Text overlay open, waiting for Enter or blur
    AwaitingText(PendingText),
}

/// Main input state containing the canvas and all interaction state.
///
/// Owns the backing store, the active tool and brush, and the display
/// geometry needed to map pointer positions. Processes pointer, keyboard and
/// control events and records which regions need repainting.
pub struct InputState {
    /// Fixed-resolution pixel buffer, the single source of truth for the image
    pub store: BackingStore,
    /// Canvas background color (eraser paint and export flattening)
    pub background: Color,
    /// Font used for committed text
    pub font_descriptor: FontDescriptor,
    /// Whether the display needs to be redrawn
    pub needs_redraw: bool,
    /// Active tool (exactly one)
    pub(crate) tool: Tool,
    /// Brush size and color
    pub(crate) brush: BrushConfig,
    /// Current interaction state machine
    pub(crate) state: InteractionState,
    /// Canvas element bounds on screen
    pub(crate) canvas_rect: DisplayRect,
    /// Bounds of the canvas's parent container (text overlay origin)
    pub(crate) parent_rect: DisplayRect,
    /// Tracks dirty regions between repaints
    pub(crate) dirty_tracker: DirtyTracker,
}

impl InputState {
    /// Creates a new InputState around an existing backing store.
    ///
    /// The display rectangle defaults to the store's own size at the origin
    /// (one display pixel per backing pixel) until the frontend reports its
    /// layout through [`InputState::update_display_rects`].
    pub fn with_defaults(
        store: BackingStore,
        brush: BrushConfig,
        background: Color,
        font_descriptor: FontDescriptor,
    ) -> Self {
        let natural = DisplayRect::sized(store.width() as f64, store.height() as f64);
        let mut dirty_tracker = DirtyTracker::new();
        dirty_tracker.mark_full();

        Self {
            store,
            background: background.opaque(),
            font_descriptor,
            needs_redraw: true,
            tool: Tool::default(),
            brush: BrushConfig::new(brush.size, brush.color),
            state: InteractionState::Idle,
            canvas_rect: natural,
            parent_rect: natural,
            dirty_tracker,
        }
    }

    /// Returns the active tool.
    pub fn tool(&self) -> Tool {
        self.tool
    }

    /// Returns whether `tool` is the active one (for toolbar highlighting).
    pub fn is_tool_active(&self, tool: Tool) -> bool {
        self.tool == tool
    }

    /// Returns the current brush.
    pub fn brush(&self) -> BrushConfig {
        self.brush
    }

    /// Returns the interaction state.
    pub fn interaction(&self) -> &InteractionState {
        &self.state
    }

    /// Returns the pending text overlay, if one is open.
    pub fn pending_text(&self) -> Option<&PendingText> {
        match &self.state {
            InteractionState::AwaitingText(pending) => Some(pending),
            _ => None,
        }
    }

    /// Returns true while a stroke is in progress.
    pub fn is_stroking(&self) -> bool {
        matches!(self.state, InteractionState::Stroking { .. })
    }

    /// Selects a tool.
    ///
    /// An in-progress stroke is ended and a pending text overlay is committed
    /// before the switch, so neither is carried across tools.
    pub fn set_tool(&mut self, tool: Tool) {
        if self.tool == tool {
            return;
        }

        self.finish_interaction();
        let previous = self.tool;
        self.tool = tool;
        self.needs_redraw = true;
        log::info!("Switched tool from {} to {}", previous, tool);
    }

    /// Sets the brush size, clamped to 1–50.
    pub fn set_brush_size(&mut self, size: u32) {
        self.brush.size = clamp_brush_size(size);
        self.needs_redraw = true;
        log::debug!("Brush size set to {}px", self.brush.size);
    }

    /// Sets the brush color. Strokes already in progress keep their color.
    pub fn set_brush_color(&mut self, color: Color) {
        self.brush.color = color.opaque();
        self.needs_redraw = true;
        log::debug!(
            "Brush color set to {}",
            crate::util::color_to_name(&self.brush.color)
        );
    }

    /// Updates the on-screen layout of the canvas and its parent container.
    ///
    /// Called by the frontend whenever the canvas element is laid out again.
    /// The backing store keeps its resolution; only the mapping changes.
    /// A pending text overlay is moved so it stays over its canvas anchor.
    pub fn update_display_rects(&mut self, canvas_rect: DisplayRect, parent_rect: DisplayRect) {
        self.canvas_rect = canvas_rect;
        self.parent_rect = parent_rect;

        if let InteractionState::AwaitingText(pending) = &mut self.state {
            pending.screen_position = mapper::canvas_to_parent(
                pending.canvas_position,
                &canvas_rect,
                &parent_rect,
                self.store.width(),
                self.store.height(),
            );
            self.needs_redraw = true;
        }
    }

    pub fn canvas_rect(&self) -> DisplayRect {
        self.canvas_rect
    }

    pub fn parent_rect(&self) -> DisplayRect {
        self.parent_rect
    }

    /// Ends whatever interaction is in progress.
    ///
    /// Strokes are closed and pending text is committed.
    pub fn finish_interaction(&mut self) {
        match self.state {
            InteractionState::Idle => {}
            InteractionState::Stroking { .. } => {
                self.end_stroke();
            }
            InteractionState::AwaitingText(_) => {
                self.commit_text();
            }
        }
    }

    /// Marks the whole canvas for repaint (e.g. after an image load).
    pub fn mark_full_damage(&mut self) {
        self.dirty_tracker.mark_full();
        self.needs_redraw = true;
    }

    /// Drains pending dirty rectangles in backing-store pixels.
    pub fn take_dirty_regions(&mut self) -> Vec<Rect> {
        let width = self.store.width().min(i32::MAX as u32) as i32;
        let height = self.store.height().min(i32::MAX as u32) as i32;
        self.needs_redraw = false;
        self.dirty_tracker.take_regions(width, height)
    }

    /// Maps a pointer event into backing-store pixels, logging malformed events.
    pub(super) fn map_pointer(&self, event: &PointerEvent) -> Option<CanvasPoint> {
        let mapped = mapper::map_event(
            event,
            &self.canvas_rect,
            self.store.width(),
            self.store.height(),
        );
        if mapped.is_none() {
            log::warn!("Ignoring pointer event without a usable position: {:?}", event);
        }
        mapped
    }
}
