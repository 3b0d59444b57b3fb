use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::{PoisonError, RwLock};

/// Directory name used under the platform config directory
const APP_DIR_NAME: &str = "files-service";

// Global config directory override (for --config flag and tests)
static CONFIG_DIR_OVERRIDE: RwLock<Option<PathBuf>> = RwLock::new(None);

/// Set config directory override (used by --config flag and tests)
pub fn set_config_dir_override(path: Option<PathBuf>) {
    let mut override_path = CONFIG_DIR_OVERRIDE
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    *override_path = path;
}

/// Get current config directory override
pub fn get_config_dir_override() -> Option<PathBuf> {
    CONFIG_DIR_OVERRIDE
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Find config directory by searching in priority order:
/// 1. Override from --config flag or set_config_dir_override() (highest priority)
/// 2. Environment variable FILES_CONFIG_DIR
/// 3. User config directory (`~/.config/files-service/` on Unix, `%APPDATA%\files-service\` on Windows)
/// 4. Current working directory (`./config/`)
///
/// The override is returned even if it does not exist yet, so `config init`
/// can create it. Otherwise falls back to the user config directory without
/// creating it; a missing settings.toml just means defaults.
pub fn find_config_directory() -> Result<PathBuf> {
    // Priority 1: Override from --config flag or tests
    if let Some(override_path) = get_config_dir_override() {
        tracing::debug!("Using config directory override: {:?}", override_path);
        return Ok(override_path);
    }

    // Priority 2: Environment variable
    if let Ok(env_path) = std::env::var("FILES_CONFIG_DIR") {
        let env_config = PathBuf::from(env_path);
        if env_config.exists() {
            tracing::debug!("Found config directory from FILES_CONFIG_DIR: {:?}", env_config);
            return Ok(env_config);
        }
        tracing::warn!("FILES_CONFIG_DIR does not exist: {:?}", env_config);
    }

    // Priority 3: User config directory (platform standard location)
    let user_config = get_user_config_dir()?;
    if user_config.exists() {
        tracing::debug!("Found config directory at: {:?}", user_config);
        return Ok(user_config);
    }

    // Priority 4: Current working directory
    if let Ok(cwd) = std::env::current_dir() {
        let cwd_config = cwd.join("config");
        if cwd_config.exists() {
            tracing::debug!("Found config directory at: {:?}", cwd_config);
            return Ok(cwd_config);
        }
    }

    Ok(user_config)
}

/// Get platform-specific user config directory
/// - Windows: `%APPDATA%\files-service`
/// - Unix: `~/.config/files-service`
fn get_user_config_dir() -> Result<PathBuf> {
    let base_dir = dirs::config_dir()
        .context("Could not determine user config directory")?;
    Ok(base_dir.join(APP_DIR_NAME))
}

/// Get absolute path to settings.toml
pub fn get_app_config_path() -> Result<PathBuf> {
    let config_dir = find_config_directory()?;
    Ok(config_dir.join("settings.toml"))
}
