use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::store::PersistError;

/// Which view the application opens on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StartView {
    #[default]
    Paint,
    Viewer,
}

/// Font families used by the UI theme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeSettings {
    pub pixel_font: String,
    pub text_font: String,
}

impl Default for ThemeSettings {
    fn default() -> Self {
        Self {
            pixel_font: "pixel".to_string(),
            text_font: "霞鹜文楷等宽".to_string(),
        }
    }
}

/// Process-wide settings, built once at startup and passed by reference to
/// whatever needs them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub locale: String,
    pub fallback_locale: String,
    pub start_view: StartView,
    pub theme: ThemeSettings,
    /// Color given to newly created pieces.
    pub default_piece_color: String,
    pub canvas_width: f64,
    pub canvas_height: f64,
    /// Maximum undo steps per document.
    pub history_limit: usize,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            locale: "zh".to_string(),
            fallback_locale: "en".to_string(),
            start_view: StartView::Paint,
            theme: ThemeSettings::default(),
            default_piece_color: "#000000".to_string(),
            canvas_width: 800.0,
            canvas_height: 600.0,
            history_limit: 100,
        }
    }
}

impl AppSettings {
    /// Load settings from a JSON file. A missing file yields the defaults;
    /// missing keys fall back to their defaults individually.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PersistError> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(json) => {
                let settings = Self::from_json(&json)?;
                log::info!("Loaded settings from {}", path.display());
                Ok(settings)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("No settings at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(PersistError::Io(e)),
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), PersistError> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self, PersistError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, PersistError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
