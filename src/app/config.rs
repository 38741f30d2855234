use crate::gallery::SessionSettings;
use crate::source::http_client::DEFAULT_ENDPOINT;
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::path::Path;
use std::time::Duration;

/// Complete configuration (saved to `<config dir>/settings.toml`)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub gallery: GalleryConfig,
    pub welcome: WelcomeConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// GET endpoint answering `{"url": "..."}`
    pub endpoint: String,
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            user_agent: concat!("funtime/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    /// Images per infinite-scroll batch
    pub page_size: NonZeroUsize,
    pub watch_list_size: NonZeroUsize,
    /// Fraction of a viewport from the end that triggers the next batch
    pub end_reached_threshold: f64,
    /// Skip end-reached triggers while a batch is still loading
    pub dedupe_in_flight: bool,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        let settings = SessionSettings::default();
        Self {
            page_size: settings.page_size,
            watch_list_size: settings.watch_list_size,
            end_reached_threshold: settings.end_threshold,
            dedupe_in_flight: settings.dedupe_in_flight,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WelcomeConfig {
    pub background_count: NonZeroUsize,
    pub rotate_interval_secs: u64,
}

impl Default for WelcomeConfig {
    fn default() -> Self {
        let settings = SessionSettings::default();
        Self {
            background_count: settings.background_count,
            rotate_interval_secs: settings.rotate_interval.as_secs(),
        }
    }
}

impl Config {
    /// Load `settings.toml` from the config directory, or defaults if it is absent
    pub fn load() -> anyhow::Result<Self> {
        let config_path = crate::util::paths::get_app_config_path()?;
        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        use anyhow::Context;

        if !path.exists() {
            tracing::info!("Config not found at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read {:?}", path))?;
        let config: Self = toml::from_str(&content)
            .context(format!("Failed to parse {:?}", path))?;

        if let Err(errors) = config.validate() {
            return Err(anyhow::anyhow!(
                "Invalid configuration: {}",
                errors.join(", ")
            ));
        }

        Ok(config)
    }

    /// Save to `path` (atomic write via temp file + rename)
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        use anyhow::Context;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        let temp_path = path.with_extension("toml.tmp");
        std::fs::write(&temp_path, &content)
            .context("Failed to write temp config file")?;
        std::fs::rename(&temp_path, path)
            .context("Failed to rename temp config file")?;

        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }

    /// Check values serde cannot reject on its own
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if let Err(e) = url::Url::parse(&self.api.endpoint) {
            errors.push(format!("api.endpoint '{}' is not a valid URL: {}", self.api.endpoint, e));
        }

        let threshold = self.gallery.end_reached_threshold;
        if !(0.0..=1.0).contains(&threshold) {
            errors.push(format!(
                "gallery.end_reached_threshold must be between 0 and 1, got {}",
                threshold
            ));
        }

        if self.welcome.rotate_interval_secs == 0 {
            errors.push("welcome.rotate_interval_secs must be at least 1".to_string());
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            page_size: self.gallery.page_size,
            watch_list_size: self.gallery.watch_list_size,
            end_threshold: self.gallery.end_reached_threshold,
            dedupe_in_flight: self.gallery.dedupe_in_flight,
            background_count: self.welcome.background_count,
            rotate_interval: Duration::from_secs(self.welcome.rotate_interval_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn create_test_config_toml() -> &'static str {
        r#"
[api]
endpoint = "http://localhost:8080/sfw/neko"
user_agent = "CustomAgent/1.0"

[gallery]
page_size = 8
watch_list_size = 4
end_reached_threshold = 0.25
dedupe_in_flight = false

[welcome]
background_count = 3
rotate_interval_secs = 2
"#
    }

    #[test]
    fn test_config_default_values() {
        let config = Config::default();

        assert_eq!(config.api.endpoint, "https://api.waifu.pics/sfw/waifu");
        assert_eq!(config.gallery.page_size.get(), 5);
        assert_eq!(config.gallery.watch_list_size.get(), 10);
        assert_eq!(config.gallery.end_reached_threshold, 0.5);
        assert!(config.gallery.dedupe_in_flight);
        assert_eq!(config.welcome.background_count.get(), 10);
        assert_eq!(config.welcome.rotate_interval_secs, 8);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_load_missing_file_uses_default() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&temp_dir.path().join("settings.toml")).unwrap();

        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_config_load_valid_toml() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("settings.toml");
        std::fs::write(&path, create_test_config_toml()).unwrap();

        let config = Config::load_from(&path).unwrap();

        assert_eq!(config.api.endpoint, "http://localhost:8080/sfw/neko");
        assert_eq!(config.api.user_agent, "CustomAgent/1.0");
        assert_eq!(config.gallery.page_size.get(), 8);
        assert_eq!(config.gallery.watch_list_size.get(), 4);
        assert!(!config.gallery.dedupe_in_flight);
        assert_eq!(config.welcome.background_count.get(), 3);

        let settings = config.session_settings();
        assert_eq!(settings.end_threshold, 0.25);
        assert_eq!(settings.rotate_interval, Duration::from_secs(2));
    }

    #[test]
    fn test_config_partial_file_fills_defaults() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("settings.toml");
        std::fs::write(&path, "[gallery]\npage_size = 6\n").unwrap();

        let config = Config::load_from(&path).unwrap();

        assert_eq!(config.gallery.page_size.get(), 6);
        assert_eq!(config.gallery.watch_list_size.get(), 10);
        assert_eq!(config.api, ApiConfig::default());
    }

    #[test]
    fn test_config_load_invalid_toml_fails() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("settings.toml");
        std::fs::write(&path, "this is not [valid toml").unwrap();

        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_config_zero_page_size_rejected() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("settings.toml");
        std::fs::write(&path, "[gallery]\npage_size = 0\n").unwrap();

        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_config_validation_errors() {
        let mut config = Config::default();
        config.api.endpoint = "not a url".to_string();
        config.gallery.end_reached_threshold = 1.5;
        config.welcome.rotate_interval_secs = 0;

        let errors = config.validate().unwrap_err();

        assert_eq!(errors.len(), 3);
        assert!(errors[0].contains("api.endpoint"));
        assert!(errors[1].contains("end_reached_threshold"));
        assert!(errors[2].contains("rotate_interval_secs"));
    }

    #[test]
    fn test_config_save_load_roundtrip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("nested").join("settings.toml");

        let mut config = Config::default();
        config.gallery.dedupe_in_flight = false;
        config.welcome.rotate_interval_secs = 3;
        config.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), config);
    }
}
