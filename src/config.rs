//! Configuration persistence for vizmark settings

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Serializable color representation for config storage
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShapeColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Default for ShapeColor {
    fn default() -> Self {
        // Red marker
        Self {
            r: 0.9,
            g: 0.1,
            b: 0.1,
        }
    }
}

impl ShapeColor {
    pub const WHITE: ShapeColor = ShapeColor {
        r: 1.0,
        g: 1.0,
        b: 1.0,
    };

    /// Convert to image crate RGBA format (0-255)
    pub fn to_rgba_u8(self) -> [u8; 4] {
        [
            (self.r * 255.0).round() as u8,
            (self.g * 255.0).round() as u8,
            (self.b * 255.0).round() as u8,
            255,
        ]
    }

    /// CSS hex notation, e.g. `#e61a1a`
    pub fn to_hex(self) -> String {
        let [r, g, b, _] = self.to_rgba_u8();
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }
}

/// Output format for rendered annotations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Png,
    Svg,
}

impl OutputFormat {
    /// Get file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Svg => "svg",
        }
    }

    /// Guess the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "png" => Some(OutputFormat::Png),
            "svg" => Some(OutputFormat::Svg),
            _ => None,
        }
    }
}

/// Application configuration persisted between runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VizmarkConfig {
    /// Canvas width used when a document does not set one
    #[serde(default = "default_canvas_width")]
    pub canvas_width: u32,
    /// Canvas height used when a document does not set one
    #[serde(default = "default_canvas_height")]
    pub canvas_height: u32,
    /// Fill color of simple annotation markers
    #[serde(default)]
    pub marker_color: ShapeColor,
    /// Whether to draw a dark outline around markers
    #[serde(default = "default_marker_shadow")]
    pub marker_shadow: bool,
    /// Canvas background (None = transparent)
    #[serde(default = "default_background")]
    pub background: Option<ShapeColor>,
    /// Default output format when the output path has no known extension
    #[serde(default)]
    pub output_format: OutputFormat,
    /// Directory for rendered files (None = current directory)
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
}

fn default_canvas_width() -> u32 {
    800
}

fn default_canvas_height() -> u32 {
    600
}

fn default_marker_shadow() -> bool {
    true
}

fn default_background() -> Option<ShapeColor> {
    Some(ShapeColor::WHITE)
}

impl VizmarkConfig {
    /// Configuration ID, used as the directory name under the config dir
    pub const ID: &'static str = "vizmark";

    /// Default location of the configuration file
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(Self::ID).join("config.json"))
    }

    /// Load configuration from disk, or return defaults if unavailable
    pub fn load() -> Self {
        let Some(path) = Self::path() else {
            log::warn!("No config directory available, using defaults");
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("Error loading config, using defaults: {:?}", err);
                Self::default()
            }
        }
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        serde_json::from_str(&data)
            .with_context(|| format!("Failed to parse config {}", path.display()))
    }

    /// Save configuration to disk
    pub fn save(&self) {
        let Some(path) = Self::path() else {
            log::error!("Could not determine config path for saving");
            return;
        };
        if let Err(err) = self.save_to(&path) {
            log::error!("Failed to save config: {:?}", err);
        }
    }

    /// Save configuration to a specific file, creating parent directories
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let data = serde_json::to_string_pretty(self)?;
        std::fs::write(path, data)
            .with_context(|| format!("Failed to write config {}", path.display()))
    }
}

impl Default for VizmarkConfig {
    fn default() -> Self {
        Self {
            canvas_width: default_canvas_width(),
            canvas_height: default_canvas_height(),
            marker_color: ShapeColor::default(),
            // Outline on by default so markers stay visible on any background
            marker_shadow: default_marker_shadow(),
            background: default_background(),
            output_format: OutputFormat::Png,
            output_dir: None,
        }
    }
}
