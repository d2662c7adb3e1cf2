use std::fs;
use std::path::{Path, PathBuf};

use exporter_core::PageGeometry;
use exporter_logging::{export_info, export_warn};
use serde::{Deserialize, Serialize};

use crate::export::ExportOptions;
use crate::persist::{AtomicFileWriter, PersistError};
use crate::render::DEFAULT_RENDER_SCALE;

pub const CONFIG_FILENAME: &str = "exporter_config.json";

/// Per-installation export settings, persisted next to the artifacts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExporterConfig {
    pub geometry: PageGeometry,
    pub render_scale: f32,
    pub filename_prefix: String,
    pub output_dir: PathBuf,
}

impl Default for ExporterConfig {
    fn default() -> Self {
        Self {
            geometry: PageGeometry::default(),
            render_scale: DEFAULT_RENDER_SCALE,
            filename_prefix: "notebook-export".to_string(),
            output_dir: PathBuf::from("exports"),
        }
    }
}

impl ExporterConfig {
    /// Options for one export run, stamped with the host-supplied time.
    pub fn export_options(&self, timestamp_utc: impl Into<String>) -> ExportOptions {
        ExportOptions {
            filename_prefix: self.filename_prefix.clone(),
            timestamp_utc: timestamp_utc.into(),
            geometry: self.geometry,
            scale: self.render_scale,
        }
    }
}

/// Loads the config from `dir`, falling back to defaults when the file is
/// missing or unreadable.
pub fn load_config(dir: &Path) -> ExporterConfig {
    let path = dir.join(CONFIG_FILENAME);
    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return ExporterConfig::default();
        }
        Err(err) => {
            export_warn!("failed to read config from {:?}: {}", path, err);
            return ExporterConfig::default();
        }
    };

    match serde_json::from_str(&content) {
        Ok(config) => {
            export_info!("loaded exporter config from {:?}", path);
            config
        }
        Err(err) => {
            export_warn!("failed to parse config from {:?}: {}", path, err);
            ExporterConfig::default()
        }
    }
}

/// Writes the config atomically into `dir`.
pub fn save_config(dir: &Path, config: &ExporterConfig) -> Result<PathBuf, PersistError> {
    let content = serde_json::to_string_pretty(config)
        .map_err(|err| PersistError::Encode(err.to_string()))?;
    let writer = AtomicFileWriter::new(dir.to_path_buf());
    writer.write(CONFIG_FILENAME, content.as_bytes())
}
