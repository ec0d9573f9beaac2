use clap::{Parser, Subcommand};
use std::path::PathBuf;

use paintpad::{
    Config,
    backend::{self, ReplayOptions, Script},
};

#[derive(Parser, Debug)]
#[command(name = "paintpad")]
#[command(version, about = "Free-hand raster drawing canvas with brush, eraser and text tools")]
struct Cli {
    /// Configuration file (defaults to ~/.config/paintpad/config.toml)
    #[arg(long, short = 'c', value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a JSON interaction script against a fresh canvas
    Replay {
        /// Script file
        #[arg(value_name = "SCRIPT")]
        script: PathBuf,

        /// Image to open before the first step
        #[arg(long, value_name = "IMAGE")]
        open: Option<PathBuf>,

        /// Directory exported paintings are written to
        #[arg(long, short = 'o', value_name = "DIR")]
        output: Option<PathBuf>,

        /// Viewport width in CSS pixels (picks the canvas size)
        #[arg(long, value_name = "WIDTH")]
        viewport: Option<u32>,
    },
    /// Write a default configuration file
    InitConfig,
    /// Print build information
    Info,
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Config::load_from_path(path),
        None => Ok(Config::load().unwrap_or_else(|e| {
            log::warn!("Failed to load config: {}. Using defaults.", e);
            Config::default()
        })),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Command::Replay {
            script,
            open,
            output,
            viewport,
        } => {
            let config = load_config(cli.config.as_ref())?;
            let script = Script::load(&script)?;
            let options = ReplayOptions {
                open,
                output_dir: output,
                viewport_width: viewport,
            };
            backend::run_replay(config, &script, &options)?;
        }
        Command::InitConfig => {
            let path = Config::create_default_file()?;
            println!("Wrote default configuration to {}", path.display());
        }
        Command::Info => {
            println!("paintpad {}", env!("CARGO_PKG_VERSION"));
            println!("git: {}", env!("PAINTPAD_GIT_HASH"));
            match Config::get_config_path() {
                Ok(path) => println!("config: {}", path.display()),
                Err(e) => println!("config: unavailable ({})", e),
            }
        }
    }

    Ok(())
}
