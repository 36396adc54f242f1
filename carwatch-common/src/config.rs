//! Configuration loading and root folder resolution
//!
//! The root folder holds everything CARWATCH persists: the SQLite
//! database, the uploaded image store, and the static assets directory.
//! The HTTP bind address is compiled in; only the root folder is
//! configurable.

use crate::{Error, Result};
use std::path::{Path, PathBuf};

/// Database file name inside the root folder
pub const DATABASE_FILE: &str = "carwatch.db";

/// Uploaded image directory inside the root folder
pub const IMAGES_DIR: &str = "images";

/// Static assets directory inside the root folder
pub const ASSETS_DIR: &str = "assets";

/// Root folder resolution priority order:
/// 1. Command-line argument (highest priority)
/// 2. Environment variable
/// 3. TOML config file
/// 4. OS-dependent compiled default (fallback)
pub fn resolve_root_folder(cli_arg: Option<&str>, env_var_name: &str) -> PathBuf {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return PathBuf::from(path);
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(env_var_name) {
        return PathBuf::from(path);
    }

    // Priority 3: TOML config file
    if let Ok(config_path) = load_config_file() {
        if let Ok(toml_content) = std::fs::read_to_string(&config_path) {
            if let Ok(config) = toml::from_str::<toml::Value>(&toml_content) {
                if let Some(root_folder) = config.get("root_folder").and_then(|v| v.as_str()) {
                    return PathBuf::from(root_folder);
                }
            }
        }
    }

    // Priority 4: OS-dependent compiled default
    get_default_root_folder()
}

/// Get default configuration file path for the platform
fn load_config_file() -> Result<PathBuf> {
    if cfg!(target_os = "linux") {
        // Try ~/.config/carwatch/config.toml first, then /etc/carwatch/config.toml
        let user_config = dirs::config_dir().map(|d| d.join("carwatch").join("config.toml"));
        let system_config = PathBuf::from("/etc/carwatch/config.toml");

        if let Some(path) = user_config {
            if path.exists() {
                return Ok(path);
            }
        }
        if system_config.exists() {
            return Ok(system_config);
        }
        return Err(Error::Config("No config file found".to_string()));
    }

    let config_path = dirs::config_dir()
        .map(|d| d.join("carwatch").join("config.toml"))
        .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))?;

    if config_path.exists() {
        Ok(config_path)
    } else {
        Err(Error::Config(format!(
            "Config file not found: {:?}",
            config_path
        )))
    }
}

/// Get OS-dependent default root folder path
fn get_default_root_folder() -> PathBuf {
    if cfg!(target_os = "linux") {
        // ~/.local/share/carwatch (or /var/lib/carwatch for system-wide)
        dirs::data_local_dir()
            .map(|d| d.join("carwatch"))
            .unwrap_or_else(|| PathBuf::from("/var/lib/carwatch"))
    } else if cfg!(target_os = "macos") {
        dirs::data_dir()
            .map(|d| d.join("carwatch"))
            .unwrap_or_else(|| PathBuf::from("/Library/Application Support/carwatch"))
    } else if cfg!(target_os = "windows") {
        dirs::data_local_dir()
            .map(|d| d.join("carwatch"))
            .unwrap_or_else(|| PathBuf::from("C:\\ProgramData\\carwatch"))
    } else {
        PathBuf::from("./carwatch_data")
    }
}

/// Resolved persistent locations under the root folder
#[derive(Debug, Clone)]
pub struct RootFolder {
    path: PathBuf,
}

impl RootFolder {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Create the root folder, image store, and assets directory if missing
    pub fn ensure_directories_exist(&self) -> Result<()> {
        std::fs::create_dir_all(&self.path)?;
        std::fs::create_dir_all(self.images_dir())?;
        std::fs::create_dir_all(self.assets_dir())?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn database_path(&self) -> PathBuf {
        self.path.join(DATABASE_FILE)
    }

    pub fn images_dir(&self) -> PathBuf {
        self.path.join(IMAGES_DIR)
    }

    pub fn assets_dir(&self) -> PathBuf {
        self.path.join(ASSETS_DIR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_cli_arg_has_highest_priority() {
        std::env::set_var("CARWATCH_TEST_ROOT", "/from/env");
        let resolved = resolve_root_folder(Some("/from/cli"), "CARWATCH_TEST_ROOT");
        assert_eq!(resolved, PathBuf::from("/from/cli"));
        std::env::remove_var("CARWATCH_TEST_ROOT");
    }

    #[test]
    #[serial]
    fn test_env_var_used_when_no_cli_arg() {
        std::env::set_var("CARWATCH_TEST_ROOT", "/from/env");
        let resolved = resolve_root_folder(None, "CARWATCH_TEST_ROOT");
        assert_eq!(resolved, PathBuf::from("/from/env"));
        std::env::remove_var("CARWATCH_TEST_ROOT");
    }

    #[test]
    #[serial]
    fn test_fallback_to_default() {
        std::env::remove_var("CARWATCH_TEST_ROOT");
        let resolved = resolve_root_folder(None, "CARWATCH_TEST_ROOT");
        // Default is OS-dependent; it must at least be non-empty
        assert!(!resolved.as_os_str().is_empty());
    }

    #[test]
    fn test_root_folder_layout() {
        let temp = tempfile::tempdir().unwrap();
        let root = RootFolder::new(temp.path().join("carwatch"));

        root.ensure_directories_exist().unwrap();

        assert!(root.path().is_dir());
        assert!(root.images_dir().is_dir());
        assert!(root.assets_dir().is_dir());
        assert_eq!(root.database_path(), root.path().join("carwatch.db"));
    }
}
