use anyhow::Result;
use std::path::PathBuf;

pub mod headless;
pub mod script;

pub use headless::HeadlessState;
pub use script::{Script, ScriptStep};

use crate::{
    config::Config,
    notification::{DesktopNotifier, LogNotifier, Notifier},
    persist::FileSaveConfig,
};

/// Options for a headless replay run.
#[derive(Debug, Clone, Default)]
pub struct ReplayOptions {
    /// Image opened before the first step
    pub open: Option<PathBuf>,
    /// Export directory overriding the configured one
    pub output_dir: Option<PathBuf>,
    /// Viewport width overriding the script's
    pub viewport_width: Option<u32>,
}

const DEFAULT_VIEWPORT_WIDTH: u32 = 1024;

/// Replay a script against a fresh canvas.
///
/// # Arguments
/// * `config` - Loaded configuration
/// * `script` - Steps to replay
/// * `options` - Command-line overrides
pub fn run_replay(config: Config, script: &Script, options: &ReplayOptions) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;

    let notifier: Box<dyn Notifier> = if config.notifications.enabled {
        Box::new(DesktopNotifier::new(runtime.handle().clone()))
    } else {
        Box::new(LogNotifier)
    };

    let viewport_width = options
        .viewport_width
        .or(script.viewport_width)
        .unwrap_or(DEFAULT_VIEWPORT_WIDTH);

    let mut state = HeadlessState::new(config, viewport_width, runtime.handle(), notifier)?;
    if let Some(dir) = &options.output_dir {
        let filename = state.save_config().filename.clone();
        state.set_save_config(FileSaveConfig {
            save_directory: dir.clone(),
            filename,
        });
    }

    if let Some(image) = &options.open {
        state.open(Some(image.as_path()))?;
        state.wait_for_loads();
    }

    state.run_steps(&script.steps);
    log::info!(
        "Replay finished at canvas revision {}",
        state.input_state().store.revision()
    );
    Ok(())
}
