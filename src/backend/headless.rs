//! Headless canvas driver.
//!
//! Owns the canvas, the background image loader and the alert sink, and
//! dispatches frontend events to them on the calling (UI) thread. Used by the
//! CLI replay command and by integration tests.

use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};

use crate::{
    config::Config,
    draw::{BackingStore, Color, WHITE},
    input::InputState,
    notification::Notifier,
    persist::{
        FileSaveConfig, ImageLoader, LoadCompletion, PersistError, apply_loaded_image, export_png,
        save_png,
    },
};

use super::script::ScriptStep;

const OPEN_FAILED: &str = "Could not open image";
const SAVE_FAILED: &str = "Could not save painting";

/// Canvas state plus the services that surround it.
pub struct HeadlessState {
    // Configuration
    config: Config,

    // Input state
    input_state: InputState,

    // Persistence
    loader: ImageLoader,
    save_config: FileSaveConfig,

    // User-facing alerts
    notifier: Box<dyn Notifier>,
}

impl HeadlessState {
    /// Creates a canvas sized for `viewport_width` from the configuration.
    ///
    /// # Errors
    /// Returns an error if the backing store cannot be allocated.
    pub fn new(
        config: Config,
        viewport_width: u32,
        runtime_handle: &tokio::runtime::Handle,
        notifier: Box<dyn Notifier>,
    ) -> Result<Self> {
        let (width, height) = config.canvas.dimensions_for_viewport(viewport_width);
        let store = BackingStore::new(width, height)
            .with_context(|| format!("Failed to create {}x{} canvas", width, height))?;
        info!(
            "Created {}x{} canvas for {}px viewport",
            width, height, viewport_width
        );

        let background = config.canvas.background_color.to_color_or(WHITE);
        let input_state = InputState::with_defaults(
            store,
            config.brush.brush(),
            background,
            config.text.font_descriptor(),
        );
        let save_config = FileSaveConfig::from_config(&config.export);

        Ok(Self {
            config,
            input_state,
            loader: ImageLoader::new(runtime_handle),
            save_config,
            notifier,
        })
    }

    /// Overrides the export destination.
    pub fn set_save_config(&mut self, save_config: FileSaveConfig) {
        self.save_config = save_config;
    }

    pub fn save_config(&self) -> &FileSaveConfig {
        &self.save_config
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn input_state(&self) -> &InputState {
        &self.input_state
    }

    pub fn input_state_mut(&mut self) -> &mut InputState {
        &mut self.input_state
    }

    /// Loads still in flight.
    pub fn pending_loads(&self) -> usize {
        self.loader.pending()
    }

    /// Exports the canvas and writes it to the save location.
    ///
    /// A pending text overlay is committed first, as clicking the save
    /// control blurs the overlay input.
    pub fn save(&mut self) -> Result<PathBuf, PersistError> {
        self.input_state.finish_interaction();

        let background = self.background();
        let result = export_png(&self.input_state.store, background)
            .and_then(|png| save_png(&png, &self.save_config));

        match &result {
            Ok(path) => info!("Painting saved to {}", path.display()),
            Err(e) => self.notifier.alert(SAVE_FAILED, &e.to_string()),
        }
        result
    }

    /// Requests an image load.
    ///
    /// `None` (no file chosen) raises one alert and changes nothing. Otherwise
    /// the file is decoded in the background and applied by
    /// [`HeadlessState::poll_loads`] or [`HeadlessState::wait_for_loads`].
    pub fn open(&mut self, path: Option<&Path>) -> Result<(), PersistError> {
        let Some(path) = path else {
            let err = PersistError::NoFileSelected;
            self.notifier.alert(OPEN_FAILED, &err.to_string());
            return Err(err);
        };

        self.input_state.finish_interaction();

        let revision = self.input_state.store.revision();
        debug!(
            "Requesting load of {} at revision {}",
            path.display(),
            revision
        );
        match self.loader.request(path.to_path_buf(), revision) {
            Ok(generation) => {
                debug!("Load of {} queued as request {}", path.display(), generation);
                Ok(())
            }
            Err(e) => {
                self.notifier.alert(OPEN_FAILED, &e.to_string());
                Err(e)
            }
        }
    }

    /// Applies every finished load without blocking.
    ///
    /// Returns the number of images applied to the canvas.
    pub fn poll_loads(&mut self) -> usize {
        let completed = self.loader.try_take_completed();
        self.apply_completions(completed)
    }

    /// Blocks until outstanding loads finish, then applies them.
    pub fn wait_for_loads(&mut self) -> usize {
        match self.loader.wait_completed() {
            Ok(completed) => self.apply_completions(completed),
            Err(e) => {
                self.notifier.alert(OPEN_FAILED, &e.to_string());
                0
            }
        }
    }

    fn apply_completions(&mut self, completed: Vec<LoadCompletion>) -> usize {
        let mut applied = 0;
        for completion in completed {
            if self.loader.is_superseded(completion.generation) {
                debug!(
                    "Dropping load of {}: a newer image was requested",
                    completion.source.display()
                );
                continue;
            }
            let outcome = completion
                .result
                .and_then(|loaded| apply_loaded_image(&mut self.input_state, &loaded));
            match outcome {
                Ok(()) => applied += 1,
                Err(e) => {
                    warn!("Load of {} failed: {}", completion.source.display(), e);
                    self.notifier.alert(OPEN_FAILED, &e.to_string());
                }
            }
        }
        applied
    }

    /// Dispatches one scripted event.
    ///
    /// Finished loads are applied before the event, the way a UI thread
    /// drains its completion queue between input events.
    pub fn handle_step(&mut self, step: &ScriptStep) {
        self.poll_loads();

        let state = &mut self.input_state;
        match step {
            ScriptStep::PointerDown { event } => state.on_pointer_down(event),
            ScriptStep::PointerMove { event } => state.on_pointer_move(event),
            ScriptStep::PointerUp => state.on_pointer_up(),
            ScriptStep::PointerLeave => state.on_pointer_leave(),
            ScriptStep::DoubleClick { event } => state.on_double_click(event),
            ScriptStep::TextInput { text } => state.update_text(text),
            ScriptStep::Key { key } => state.on_key_press(*key),
            ScriptStep::Blur => state.on_blur(),
            ScriptStep::SetTool { tool } => state.set_tool(*tool),
            ScriptStep::SetBrushSize { size } => state.set_brush_size(*size),
            ScriptStep::SetBrushColor { color } => match color.try_to_color() {
                Some(color) => state.set_brush_color(color),
                None => warn!("Ignoring unknown brush color {:?}", color),
            },
            ScriptStep::Resize { canvas, parent } => state.update_display_rects(*canvas, *parent),
            ScriptStep::Save => {
                // Failures were already alerted
                let _ = self.save();
            }
            ScriptStep::Open { path } => {
                let _ = self.open(path.as_deref());
            }
            ScriptStep::WaitForLoads => {
                self.wait_for_loads();
            }
        }
    }

    /// Replays a sequence of steps, then waits for trailing loads.
    pub fn run_steps(&mut self, steps: &[ScriptStep]) {
        for (index, step) in steps.iter().enumerate() {
            debug!("Step {}: {:?}", index, step);
            self.handle_step(step);
        }
        self.wait_for_loads();
        self.input_state.finish_interaction();
    }

    fn background(&self) -> Color {
        self.input_state.background
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{BLACK, BLUE, Rgba};
    use crate::input::{PointerEvent, Tool};
    use crate::notification::CollectingNotifier;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn create_state(runtime: &tokio::runtime::Runtime) -> (HeadlessState, Arc<CollectingNotifier>) {
        let notifier = Arc::new(CollectingNotifier::new());
        let state = HeadlessState::new(
            Config::default(),
            375,
            runtime.handle(),
            Box::new(notifier.clone()),
        )
        .unwrap();
        (state, notifier)
    }

    fn mouse(x: f64, y: f64) -> PointerEvent {
        PointerEvent::mouse(x, y)
    }

    #[test]
    fn narrow_viewport_gets_narrow_canvas() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let (state, _) = create_state(&runtime);
        assert_eq!(state.input_state().store.width(), 340);
        assert_eq!(state.input_state().store.height(), 520);
    }

    #[test]
    fn open_without_file_alerts_once_and_changes_nothing() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let (mut state, notifier) = create_state(&runtime);
        state.handle_step(&ScriptStep::PointerDown {
            event: mouse(20.0, 20.0),
        });
        state.handle_step(&ScriptStep::PointerUp);
        let revision = state.input_state().store.revision();

        state.handle_step(&ScriptStep::Open { path: None });

        assert_eq!(notifier.count(), 1);
        assert_eq!(notifier.alerts()[0].1, "Please select an image file.");
        assert_eq!(state.input_state().store.revision(), revision);
        assert_eq!(state.pending_loads(), 0);
    }

    #[test]
    fn edits_after_open_discard_the_load() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("white.png");
        image::RgbaImage::from_pixel(4, 4, image::Rgba([255, 255, 255, 255]))
            .save(&path)
            .unwrap();
        let (mut state, notifier) = create_state(&runtime);

        state.open(Some(path.as_path())).unwrap();
        // Drawn before the completion is applied
        let input = state.input_state_mut();
        input.on_pointer_down(&mouse(50.0, 50.0));
        input.on_pointer_up();
        state.wait_for_loads();

        assert_eq!(notifier.count(), 1);
        assert!(notifier.alerts()[0].1.contains("changed while it was loading"));
        assert_eq!(
            state.input_state_mut().store.pixel(50, 50).unwrap(),
            Some(Rgba::opaque(BLACK))
        );
    }

    #[test]
    fn newest_open_wins_without_alert() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let temp = TempDir::new().unwrap();
        let first = temp.path().join("red.png");
        let second = temp.path().join("blue.png");
        image::RgbaImage::from_pixel(4, 4, image::Rgba([255, 0, 0, 255]))
            .save(&first)
            .unwrap();
        image::RgbaImage::from_pixel(4, 4, image::Rgba([0, 0, 255, 255]))
            .save(&second)
            .unwrap();
        let (mut state, notifier) = create_state(&runtime);

        state.open(Some(first.as_path())).unwrap();
        state.open(Some(second.as_path())).unwrap();
        assert_eq!(state.wait_for_loads(), 1);

        assert_eq!(notifier.count(), 0);
        assert_eq!(state.pending_loads(), 0);
        let store = &mut state.input_state_mut().store;
        assert_eq!(store.pixel(0, 0).unwrap(), Some(Rgba::opaque(BLUE)));
        assert_eq!(store.pixel(339, 519).unwrap(), Some(Rgba::opaque(BLUE)));
        assert_eq!(store.revision(), 1);
    }

    #[test]
    fn undecodable_file_alerts_with_file_name() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("broken.jpg");
        std::fs::write(&path, b"garbage").unwrap();
        let (mut state, notifier) = create_state(&runtime);

        state.handle_step(&ScriptStep::Open {
            path: Some(path.clone()),
        });
        state.handle_step(&ScriptStep::WaitForLoads);

        assert_eq!(notifier.count(), 1);
        assert!(notifier.alerts()[0].1.contains("broken.jpg"));
        assert_eq!(state.input_state().store.revision(), 0);
    }

    #[test]
    fn save_commits_pending_text_and_writes_file() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let temp = TempDir::new().unwrap();
        let (mut state, notifier) = create_state(&runtime);
        state.set_save_config(FileSaveConfig {
            save_directory: temp.path().join("exports"),
            filename: "my-painting.png".to_string(),
        });

        state.handle_step(&ScriptStep::SetTool { tool: Tool::Text });
        state.handle_step(&ScriptStep::DoubleClick {
            event: mouse(40.0, 80.0),
        });
        state.handle_step(&ScriptStep::TextInput {
            text: "Hello".to_string(),
        });
        let path = state.save().unwrap();

        assert!(state.input_state().pending_text().is_none());
        assert!(path.ends_with("exports/my-painting.png"));
        assert!(path.exists());
        assert_eq!(notifier.count(), 0);
    }
}
