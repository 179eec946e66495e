use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::editor::{
    EditorSettings, DEFAULT_ANNOTATION_ANCHOR, DEFAULT_ANNOTATION_TEXT, DEFAULT_CANVAS_HEIGHT,
    DEFAULT_CANVAS_WIDTH,
};
use crate::geometry::{Color, Point};
use crate::scene::HitTestOptions;
use crate::session::DEFAULT_BLINK_INTERVAL;
use crate::style::{FamilyPreset, SizePreset, TextStyle};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ConfigPathError {
    MissingHomeDirectory,
}

const APP_DIR: &str = "annotext";
const APP_CONFIG_FILE: &str = "config.json";

/// Application-level settings from `config.json`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub default_text: String,
    pub default_x: f32,
    pub default_y: f32,
    pub caret_blink_ms: u64,
    pub hit_test_descender_ratio: f32,
    pub default_color: String,
    pub default_size: String,
    pub default_family: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            canvas_width: DEFAULT_CANVAS_WIDTH,
            canvas_height: DEFAULT_CANVAS_HEIGHT,
            default_text: DEFAULT_ANNOTATION_TEXT.to_string(),
            default_x: DEFAULT_ANNOTATION_ANCHOR.x,
            default_y: DEFAULT_ANNOTATION_ANCHOR.y,
            caret_blink_ms: DEFAULT_BLINK_INTERVAL.as_millis() as u64,
            hit_test_descender_ratio: 0.0,
            default_color: Color::BLACK.to_hex(),
            default_size: "medium".to_string(),
            default_family: "regular".to_string(),
        }
    }
}

impl AppConfig {
    /// Resolves string keys into typed settings, falling back on unknown values.
    pub fn settings(&self) -> EditorSettings {
        let color = Color::parse(&self.default_color).unwrap_or_else(|| {
            tracing::warn!(color = %self.default_color, "invalid default color; using black");
            Color::BLACK
        });
        let style = TextStyle::new(
            FamilyPreset::from_key(&self.default_family).family(),
            SizePreset::from_key(&self.default_size).size_px(),
            color,
        );
        EditorSettings {
            canvas_width: self.canvas_width.max(1),
            canvas_height: self.canvas_height.max(1),
            default_text: self.default_text.clone(),
            default_anchor: Point::new(self.default_x, self.default_y),
            default_style: style,
            caret_blink_interval: Duration::from_millis(self.caret_blink_ms.max(1)),
            hit_options: HitTestOptions::with_descender_ratio(self.hit_test_descender_ratio),
        }
    }
}

pub fn load_app_config() -> AppConfig {
    let (xdg_config_home, home) = config_env_dirs();
    load_app_config_with(xdg_config_home.as_deref(), home.as_deref())
}

fn load_app_config_with(xdg_config_home: Option<&Path>, home: Option<&Path>) -> AppConfig {
    let path = match app_config_path(APP_DIR, APP_CONFIG_FILE, xdg_config_home, home) {
        Ok(p) => p,
        Err(_) => return AppConfig::default(),
    };
    if !path.exists() {
        return AppConfig::default();
    }
    match std::fs::read_to_string(&path) {
        Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|err| {
            tracing::warn!(?err, ?path, "failed to parse config.json; using defaults");
            AppConfig::default()
        }),
        Err(err) => {
            tracing::warn!(?err, ?path, "failed to read config.json; using defaults");
            AppConfig::default()
        }
    }
}

pub(crate) fn config_env_dirs() -> (Option<PathBuf>, Option<PathBuf>) {
    (
        std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
        std::env::var_os("HOME").map(PathBuf::from),
    )
}

pub(crate) fn app_config_path(
    app_dir: &str,
    file_name: &str,
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf, ConfigPathError> {
    let mut path = config_root(xdg_config_home, home)?;
    path.push(app_dir);
    path.push(file_name);
    Ok(path)
}

fn config_root(
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf, ConfigPathError> {
    if let Some(xdg) = xdg_config_home.filter(|path| !path.as_os_str().is_empty()) {
        return Ok(xdg.to_path_buf());
    }

    let home = home.ok_or(ConfigPathError::MissingHomeDirectory)?;
    Ok(home.join(".config"))
}
