//! JSON interaction scripts.
//!
//! A script is a recorded sequence of frontend events (pointer, keyboard and
//! control-surface actions) replayed against a headless canvas.
//!
//! ```json
//! {
//!   "viewport_width": 1280,
//!   "steps": [
//!     { "action": "set_brush_color", "color": "red" },
//!     { "action": "pointer_down", "event": { "source": "mouse", "client_x": 10, "client_y": 10 } },
//!     { "action": "pointer_move", "event": { "source": "mouse", "client_x": 90, "client_y": 40 } },
//!     { "action": "pointer_up" },
//!     { "action": "save" }
//!   ]
//! }
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::ColorSpec;
use crate::input::{DisplayRect, Key, PointerEvent, Tool};

/// One replayed event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ScriptStep {
    PointerDown { event: PointerEvent },
    PointerMove { event: PointerEvent },
    PointerUp,
    PointerLeave,
    DoubleClick { event: PointerEvent },
    /// Full current content of the text overlay input
    TextInput { text: String },
    Key { key: Key },
    Blur,
    SetTool { tool: Tool },
    SetBrushSize { size: u32 },
    SetBrushColor { color: ColorSpec },
    /// Canvas element and parent container layout
    Resize {
        canvas: DisplayRect,
        parent: DisplayRect,
    },
    Save,
    /// Open an image; a missing path models an empty file picker
    Open {
        #[serde(default)]
        path: Option<PathBuf>,
    },
    /// Block until every requested image load has been applied
    WaitForLoads,
}

/// A complete interaction script.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Script {
    /// Viewport width used to pick the canvas size (overridable on the CLI)
    #[serde(default)]
    pub viewport_width: Option<u32>,
    #[serde(default)]
    pub steps: Vec<ScriptStep>,
}

impl Script {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse interaction script")
    }

    /// Reads a script file.
    ///
    /// Relative `open` paths are resolved against the script's directory.
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display()))?;
        let mut script = Self::from_json(&json)
            .with_context(|| format!("Invalid script {}", path.display()))?;

        if let Some(base) = path.parent() {
            script.resolve_paths(base);
        }
        log::info!(
            "Loaded script {} ({} steps)",
            path.display(),
            script.steps.len()
        );
        Ok(script)
    }

    fn resolve_paths(&mut self, base: &Path) {
        for step in &mut self.steps {
            if let ScriptStep::Open { path: Some(path) } = step
                && path.is_relative()
            {
                *path = base.join(&*path);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn parses_every_step_kind() {
        let script = Script::from_json(
            r##"{
                "viewport_width": 375,
                "steps": [
                    { "action": "pointer_down", "event": { "source": "mouse", "client_x": 1, "client_y": 2 } },
                    { "action": "pointer_move", "event": { "source": "touch", "touches": [{ "client_x": 3, "client_y": 4 }] } },
                    { "action": "pointer_up" },
                    { "action": "pointer_leave" },
                    { "action": "double_click", "event": { "source": "mouse", "client_x": 5, "client_y": 6 } },
                    { "action": "text_input", "text": "hi" },
                    { "action": "key", "key": "return" },
                    { "action": "key", "key": { "char": "x" } },
                    { "action": "blur" },
                    { "action": "set_tool", "tool": "eraser" },
                    { "action": "set_brush_size", "size": 12 },
                    { "action": "set_brush_color", "color": "#00ff00" },
                    { "action": "set_brush_color", "color": [1, 2, 3] },
                    { "action": "resize",
                      "canvas": { "left": 10, "top": 20, "width": 500, "height": 250 },
                      "parent": { "left": 0, "top": 0, "width": 800, "height": 600 } },
                    { "action": "save" },
                    { "action": "open" },
                    { "action": "open", "path": "in.png" },
                    { "action": "wait_for_loads" }
                ]
            }"##,
        )
        .unwrap();

        assert_eq!(script.viewport_width, Some(375));
        assert_eq!(script.steps.len(), 18);
        assert_eq!(
            script.steps[1],
            ScriptStep::PointerMove {
                event: PointerEvent::touch(3.0, 4.0)
            }
        );
        assert_eq!(script.steps[7], ScriptStep::Key { key: Key::Char('x') });
        assert_eq!(script.steps[9], ScriptStep::SetTool { tool: Tool::Eraser });
        assert_eq!(
            script.steps[12],
            ScriptStep::SetBrushColor {
                color: ColorSpec::Rgb([1, 2, 3])
            }
        );
        assert_eq!(script.steps[15], ScriptStep::Open { path: None });
    }

    #[test]
    fn unknown_action_is_rejected() {
        let err = Script::from_json(r#"{ "steps": [{ "action": "undo" }] }"#).unwrap_err();
        assert!(format!("{err:#}").contains("interaction script"));
    }

    #[test]
    fn load_resolves_relative_open_paths() {
        let temp = TempDir::new().unwrap();
        let script_path = temp.path().join("script.json");
        fs::write(
            &script_path,
            r#"{ "steps": [
                { "action": "open", "path": "photo.png" },
                { "action": "open", "path": "/abs/photo.png" }
            ] }"#,
        )
        .unwrap();

        let script = Script::load(&script_path).unwrap();

        assert_eq!(
            script.steps[0],
            ScriptStep::Open {
                path: Some(temp.path().join("photo.png"))
            }
        );
        assert_eq!(
            script.steps[1],
            ScriptStep::Open {
                path: Some(PathBuf::from("/abs/photo.png"))
            }
        );
    }
}
