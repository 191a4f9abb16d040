//! Configuration loading and root folder resolution

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

/// Environment variable consulted for the root folder
pub const ROOT_FOLDER_ENV: &str = "SHOWCASE_ROOT";

/// Name of the per-root service configuration file
pub const SERVICE_CONFIG_FILE: &str = "showcase.toml";

/// Service configuration, read from `<root>/showcase.toml`
///
/// Every field has a default so a missing file (or a partial one) is valid.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServiceConfig {
    /// Interface to bind
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Database file name, relative to the root folder
    pub database_file: String,
    /// Trusted request header carrying the caller identity
    pub identity_header: String,
    /// Buffered invalidation events per subscriber
    pub event_capacity: usize,
    /// SQLite connection pool size
    pub max_connections: u32,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5740,
            database_file: "showcase.db".to_string(),
            identity_header: "x-user-id".to_string(),
            event_capacity: 256,
            max_connections: 10,
        }
    }
}

impl ServiceConfig {
    /// Load `showcase.toml` from the root folder
    ///
    /// A missing file yields defaults; a malformed file is an error.
    pub fn load(root_folder: &Path) -> Result<Self> {
        let path = root_folder.join(SERVICE_CONFIG_FILE);
        if !path.exists() {
            info!("No {} in {}, using defaults", SERVICE_CONFIG_FILE, root_folder.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)?;
        Self::from_toml(&content)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Absolute database path under the given root folder
    pub fn database_path(&self, root_folder: &Path) -> PathBuf {
        root_folder.join(&self.database_file)
    }
}

/// Root folder resolution, in priority order:
/// 1. Command-line argument (highest priority)
/// 2. Environment variable
/// 3. TOML config file `root_folder` key
/// 4. OS-dependent compiled default (fallback)
pub fn resolve_root_folder(cli_arg: Option<&Path>, env_var_name: &str) -> PathBuf {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(env_var_name) {
        if !path.trim().is_empty() {
            return PathBuf::from(path);
        }
    }

    // Priority 3: TOML config file
    if let Some(root_folder) = config_file_root_folder() {
        return root_folder;
    }

    // Priority 4: OS-dependent compiled default
    default_root_folder()
}

fn config_file_root_folder() -> Option<PathBuf> {
    let config_path = locate_config_file().ok()?;
    let toml_content = std::fs::read_to_string(&config_path).ok()?;
    let config = toml::from_str::<toml::Value>(&toml_content).ok()?;
    config
        .get("root_folder")
        .and_then(|v| v.as_str())
        .map(PathBuf::from)
}

/// Get the user or system configuration file path for the platform
fn locate_config_file() -> Result<PathBuf> {
    // User config first (~/.config/showcase/config.toml on Linux)
    if let Some(path) = dirs::config_dir().map(|d| d.join("showcase").join("config.toml")) {
        if path.exists() {
            return Ok(path);
        }
    }

    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/showcase/config.toml");
        if system_config.exists() {
            return Ok(system_config);
        }
    }

    Err(Error::Config("No config file found".to_string()))
}

/// Get OS-dependent default root folder path
fn default_root_folder() -> PathBuf {
    if cfg!(target_os = "linux") {
        dirs::data_local_dir()
            .map(|d| d.join("showcase"))
            .unwrap_or_else(|| PathBuf::from("/var/lib/showcase"))
    } else if cfg!(target_os = "macos") {
        dirs::data_dir()
            .map(|d| d.join("showcase"))
            .unwrap_or_else(|| PathBuf::from("/Library/Application Support/showcase"))
    } else if cfg!(target_os = "windows") {
        dirs::data_local_dir()
            .map(|d| d.join("showcase"))
            .unwrap_or_else(|| PathBuf::from("C:\\ProgramData\\showcase"))
    } else {
        PathBuf::from("./showcase_data")
    }
}
