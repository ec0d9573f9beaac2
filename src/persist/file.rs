//! File saving functionality for exported paintings.

use super::types::PersistError;
use crate::config::ExportConfig;
use std::fs;
use std::path::{Path, PathBuf};

/// Where exported images are written.
#[derive(Debug, Clone, PartialEq)]
pub struct FileSaveConfig {
    /// Directory to save paintings to.
    pub save_directory: PathBuf,
    /// Fixed file name, overwritten by every save.
    pub filename: String,
}

impl Default for FileSaveConfig {
    fn default() -> Self {
        Self {
            save_directory: dirs::picture_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("Paintpad"),
            filename: "my-painting.png".to_string(),
        }
    }
}

impl FileSaveConfig {
    pub fn from_config(config: &ExportConfig) -> Self {
        Self {
            save_directory: expand_tilde(&config.save_directory),
            filename: config.filename.clone(),
        }
    }

    /// Full path of the exported file.
    pub fn target_path(&self) -> PathBuf {
        self.save_directory.join(&self.filename)
    }
}

/// Ensure the save directory exists, creating it if necessary.
///
/// # Returns
/// The canonicalized path to the directory
pub fn ensure_directory_exists(directory: &Path) -> Result<PathBuf, PersistError> {
    if !directory.exists() {
        log::info!("Creating save directory: {}", directory.display());
        fs::create_dir_all(directory)?;
    }

    let canonical = directory
        .canonicalize()
        .unwrap_or_else(|_| directory.to_path_buf());

    Ok(canonical)
}

/// Writes PNG bytes to the configured file.
///
/// # Returns
/// Path to the saved file
pub fn save_png(image_data: &[u8], config: &FileSaveConfig) -> Result<PathBuf, PersistError> {
    ensure_directory_exists(&config.save_directory)?;
    let file_path = config.target_path();

    log::info!(
        "Saving painting to: {} ({} bytes)",
        file_path.display(),
        image_data.len()
    );

    fs::write(&file_path, image_data)?;

    let written_size = fs::metadata(&file_path)?.len();
    log::debug!("File written: {} bytes", written_size);

    Ok(file_path)
}

/// Expand tilde (~) in path strings.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(stripped);
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_expand_tilde() {
        let expanded = expand_tilde("~/Pictures");
        assert!(!expanded.to_string_lossy().starts_with("~"));

        let no_tilde = expand_tilde("/absolute/path");
        assert_eq!(no_tilde, PathBuf::from("/absolute/path"));
    }

    #[test]
    fn test_default_config() {
        let config = FileSaveConfig::default();
        assert_eq!(config.filename, "my-painting.png");
        assert!(config.save_directory.to_string_lossy().contains("Paintpad"));
    }

    #[test]
    fn save_creates_directory_and_overwrites() {
        let temp = TempDir::new().unwrap();
        let config = FileSaveConfig {
            save_directory: temp.path().join("out"),
            filename: "my-painting.png".to_string(),
        };

        let first = save_png(b"first", &config).unwrap();
        let second = save_png(b"second", &config).unwrap();

        assert_eq!(first, second);
        assert_eq!(fs::read(&second).unwrap(), b"second");
    }

    #[test]
    fn from_config_expands_directory() {
        let export = ExportConfig {
            save_directory: "/tmp/paintings".to_string(),
            filename: "art.png".to_string(),
        };
        let config = FileSaveConfig::from_config(&export);
        assert_eq!(config.target_path(), PathBuf::from("/tmp/paintings/art.png"));
    }
}
