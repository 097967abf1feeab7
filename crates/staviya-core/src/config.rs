use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub content: ContentConfig,
    #[serde(default)]
    pub motion: MotionConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Data directory path (preview log file lives here)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

/// Where collections are fetched from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentSource {
    /// Remote content store over HTTP
    Http,
    /// One JSON file per collection in `content_dir`
    File,
    /// Built-in sample content
    #[default]
    Demo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    #[serde(default)]
    pub source: ContentSource,
    /// Content store base URL (for the http source)
    #[serde(default = "default_content_base_url")]
    pub base_url: String,
    /// Directory holding `<collection>.json` files (for the file source)
    #[serde(default = "default_content_dir")]
    pub content_dir: PathBuf,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            source: ContentSource::default(),
            base_url: default_content_base_url(),
            content_dir: default_content_dir(),
            request_timeout_secs: default_timeout(),
        }
    }
}

/// Easing curve used for smooth anchor scrolling and entrance transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingType {
    /// Jump straight to the end value
    None,
    Linear,
    /// 1 - (1-t)^3
    #[default]
    Cubic,
    /// 1 - (1-t)^5
    Quintic,
    /// 1 - 2^(-10t)
    EaseOut,
    /// cubic-bezier(0, 0, 0.58, 1), the browser `ease-out` keyword
    CssEaseOut,
}

/// Spring parameters for the scroll progress filter
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpringConfig {
    #[serde(default = "default_stiffness")]
    pub stiffness: f64,
    #[serde(default = "default_damping")]
    pub damping: f64,
    #[serde(default = "default_mass")]
    pub mass: f64,
    /// Distance from target under which the spring may come to rest
    #[serde(default = "default_rest_delta")]
    pub rest_delta: f64,
    /// Speed under which the spring may come to rest
    #[serde(default = "default_rest_speed")]
    pub rest_speed: f64,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            stiffness: default_stiffness(),
            damping: default_damping(),
            mass: default_mass(),
            rest_delta: default_rest_delta(),
            rest_speed: default_rest_speed(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MotionConfig {
    #[serde(default)]
    pub spring: SpringConfig,
    /// Animate scroll-to-section jumps
    #[serde(default = "default_true")]
    pub smooth_scroll_enabled: bool,
    /// Duration of a scroll-to-section animation in milliseconds
    #[serde(default = "default_scroll_duration")]
    pub scroll_duration_ms: u64,
    /// Easing for scroll-to-section animations
    #[serde(default)]
    pub easing: EasingType,
    /// Target frames per second while something is animating
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            spring: SpringConfig::default(),
            smooth_scroll_enabled: default_true(),
            scroll_duration_ms: default_scroll_duration(),
            easing: EasingType::default(),
            animation_fps: default_animation_fps(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Idle tick rate in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Page pixels represented by one terminal row in the preview
    #[serde(default = "default_px_per_row")]
    pub px_per_row: f64,
    /// Pixels scrolled per wheel/key step
    #[serde(default = "default_scroll_step")]
    pub scroll_step_px: f64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            px_per_row: default_px_per_row(),
            scroll_step_px: default_scroll_step(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("staviya")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_content_base_url() -> String {
    "http://localhost:8080/api".to_string()
}

fn default_content_dir() -> PathBuf {
    PathBuf::from("content")
}

fn default_timeout() -> u64 {
    30
}

fn default_stiffness() -> f64 {
    100.0
}

fn default_damping() -> f64 {
    30.0
}

fn default_mass() -> f64 {
    1.0
}

fn default_rest_delta() -> f64 {
    0.001
}

fn default_rest_speed() -> f64 {
    0.01
}

fn default_scroll_duration() -> u64 {
    600
}

fn default_animation_fps() -> u32 {
    60
}

fn default_tick_rate() -> u64 {
    100
}

fn default_px_per_row() -> f64 {
    20.0
}

fn default_scroll_step() -> f64 {
    60.0
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl AppConfig {
    /// Load configuration from the default path or return defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from an explicit path; a missing file yields defaults
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::parse(&content)
        } else {
            tracing::debug!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> crate::Result<Self> {
        toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Save configuration to the default path
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::Error::Config(e.to_string()))?;
        std::fs::write(&config_path, content)?;

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/staviya/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("staviya")
            .join("config.toml")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }

    /// Get the content directory for the file source (with tilde expansion)
    pub fn content_dir(&self) -> PathBuf {
        expand_tilde(&self.content.content_dir)
    }

    /// Path of the preview log file
    pub fn log_path(&self) -> PathBuf {
        self.data_dir().join("preview.log")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_spring() {
        let config = AppConfig::default();
        assert_eq!(config.motion.spring.stiffness, 100.0);
        assert_eq!(config.motion.spring.damping, 30.0);
        assert_eq!(config.motion.spring.rest_delta, 0.001);
        assert_eq!(config.content.source, ContentSource::Demo);
        assert_eq!(config.motion.easing, EasingType::Cubic);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config = AppConfig::parse(
            r#"
            [content]
            source = "http"
            base_url = "https://cms.example.com"

            [motion.spring]
            stiffness = 250.0
            "#,
        )
        .unwrap();

        assert_eq!(config.content.source, ContentSource::Http);
        assert_eq!(config.content.base_url, "https://cms.example.com");
        assert_eq!(config.content.request_timeout_secs, 30);
        assert_eq!(config.motion.spring.stiffness, 250.0);
        assert_eq!(config.motion.spring.damping, 30.0);
        assert!(config.motion.smooth_scroll_enabled);
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = AppConfig::parse("[motion\nbroken").unwrap_err();
        assert!(matches!(err, crate::Error::Config(_)));
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let path = std::env::temp_dir().join("staviya-config-does-not-exist.toml");
        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.ui.tick_rate_ms, 100);
    }

    #[test]
    fn test_easing_names() {
        let config = AppConfig::parse("[motion]\neasing = \"ease_out\"").unwrap();
        assert_eq!(config.motion.easing, EasingType::EaseOut);
        let config = AppConfig::parse("[motion]\neasing = \"css_ease_out\"").unwrap();
        assert_eq!(config.motion.easing, EasingType::CssEaseOut);
    }
}
