use anyhow::Result;
use std::path::PathBuf;
use std::sync::RwLock;

/// Environment variable naming the config directory
pub const CONFIG_DIR_ENV: &str = "FUNTIME_CONFIG_DIR";

// Global config directory override (for --config flag and tests)
static CONFIG_DIR_OVERRIDE: RwLock<Option<PathBuf>> = RwLock::new(None);

/// Set config directory override (used by --config flag and tests)
pub fn set_config_dir_override(path: Option<PathBuf>) {
    let mut override_path = CONFIG_DIR_OVERRIDE.write().unwrap_or_else(|e| e.into_inner());
    *override_path = path;
}

/// Get current config directory override
pub fn get_config_dir_override() -> Option<PathBuf> {
    CONFIG_DIR_OVERRIDE.read().unwrap_or_else(|e| e.into_inner()).clone()
}

/// Find config directory by searching in priority order:
/// 1. Override from --config flag or set_config_dir_override() (highest priority)
/// 2. Environment variable FUNTIME_CONFIG_DIR
/// 3. User config directory (`~/.config/funtime/` on Unix, `%APPDATA%\funtime\` on Windows)
///
/// The directory is not created; a missing settings file means defaults.
pub fn find_config_directory() -> Result<PathBuf> {
    if let Some(override_path) = get_config_dir_override() {
        tracing::debug!("Using config directory override: {:?}", override_path);
        return Ok(override_path);
    }

    if let Ok(env_path) = std::env::var(CONFIG_DIR_ENV) {
        if !env_path.is_empty() {
            tracing::debug!("Using config directory from {}: {:?}", CONFIG_DIR_ENV, env_path);
            return Ok(PathBuf::from(env_path));
        }
    }

    get_user_config_dir()
}

/// Get platform-specific user config directory
fn get_user_config_dir() -> Result<PathBuf> {
    let base_dir = dirs::config_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine user config directory"))?;
    Ok(base_dir.join("funtime"))
}

/// Get absolute path to settings.toml
pub fn get_app_config_path() -> Result<PathBuf> {
    let config_dir = find_config_directory()?;
    Ok(config_dir.join("settings.toml"))
}

/// Get the logs directory (`<local data dir>/funtime/logs`)
pub fn get_logs_dir() -> Result<PathBuf> {
    let data_dir = dirs::data_local_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine user data directory"))?;
    Ok(data_dir.join("funtime").join("logs"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    // Helper function to ensure clean test state
    fn reset_test_state() {
        set_config_dir_override(None);
        unsafe { std::env::remove_var(CONFIG_DIR_ENV) };
    }

    #[test]
    #[serial]
    fn test_get_app_config_path() {
        reset_test_state();
        let temp_dir = TempDir::new().unwrap();
        let config_dir = temp_dir.path().to_path_buf();

        set_config_dir_override(Some(config_dir.clone()));

        let path = get_app_config_path().unwrap();
        assert_eq!(path, config_dir.join("settings.toml"));

        reset_test_state();
    }

    #[test]
    #[serial]
    fn test_config_dir_override_beats_env() {
        reset_test_state();
        let override_dir = TempDir::new().unwrap();
        let env_dir = TempDir::new().unwrap();

        unsafe { std::env::set_var(CONFIG_DIR_ENV, env_dir.path()) };
        set_config_dir_override(Some(override_dir.path().to_path_buf()));

        assert_eq!(find_config_directory().unwrap(), override_dir.path());

        reset_test_state();
    }

    #[test]
    #[serial]
    fn test_config_dir_from_env_variable() {
        reset_test_state();
        let temp_dir = TempDir::new().unwrap();

        unsafe { std::env::set_var(CONFIG_DIR_ENV, temp_dir.path()) };

        assert_eq!(find_config_directory().unwrap(), temp_dir.path());

        reset_test_state();
    }

    #[test]
    #[serial]
    fn test_config_dir_falls_back_to_user_dir() {
        reset_test_state();

        let found_dir = find_config_directory().unwrap();
        assert!(found_dir.ends_with("funtime"));
    }

    #[test]
    fn test_logs_dir_is_under_funtime() {
        let logs_dir = get_logs_dir().unwrap();
        assert!(logs_dir.ends_with("funtime/logs") || logs_dir.ends_with("funtime\\logs"));
    }
}
