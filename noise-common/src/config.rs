//! Configuration loading and resolution
//!
//! Each setting resolves in priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! Levels 1 and 2 are merged by the binary's argument parser and arrive here
//! as [`ConfigOverrides`].

use crate::{Error, Result};
use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

/// Default listening port
pub const DEFAULT_PORT: u16 = 8080;

/// Default bind address (all interfaces)
pub const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);

/// Default data directory, relative to the working directory
pub const DEFAULT_DATA_DIR: &str = "data";

/// Database file name used when no explicit database path is configured
pub const DATABASE_FILE_NAME: &str = "white_noise.db";

const CONFIG_DIR_NAME: &str = "environment-noise";

/// Fully resolved service configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    pub host: IpAddr,
    pub port: u16,
    /// SQLite database file
    pub db_path: PathBuf,
    /// Directory holding audio files served under `/data`
    pub data_dir: PathBuf,
}

/// Settings supplied on the command line or through environment variables
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub host: Option<IpAddr>,
    pub port: Option<u16>,
    pub db_path: Option<PathBuf>,
    pub data_dir: Option<PathBuf>,
}

/// Contents of the optional TOML config file
///
/// ```toml
/// port = 9000
/// data_dir = "/srv/noise"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub host: Option<IpAddr>,
    pub port: Option<u16>,
    pub db_path: Option<PathBuf>,
    pub data_dir: Option<PathBuf>,
}

impl TomlConfig {
    /// Parse a TOML config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))
    }
}

/// Platform config file location (`~/.config/environment-noise/config.toml` on Linux)
pub fn default_config_file() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(CONFIG_DIR_NAME).join("config.toml"))
}

/// Load the TOML layer
///
/// An explicitly named file must exist and parse. The platform default file
/// is optional: when it is absent an empty layer is returned.
pub fn load_toml_config(explicit: Option<&Path>) -> Result<TomlConfig> {
    if let Some(path) = explicit {
        return TomlConfig::load(path);
    }

    match default_config_file() {
        Some(path) if path.is_file() => TomlConfig::load(&path),
        _ => Ok(TomlConfig::default()),
    }
}

impl ServiceConfig {
    /// Merge overrides, file settings and compiled defaults
    ///
    /// When no database path is configured at any level the database lives
    /// inside the resolved data directory.
    pub fn resolve(overrides: ConfigOverrides, file: TomlConfig) -> Self {
        let data_dir = overrides
            .data_dir
            .or(file.data_dir)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));

        let db_path = overrides
            .db_path
            .or(file.db_path)
            .unwrap_or_else(|| data_dir.join(DATABASE_FILE_NAME));

        Self {
            host: overrides.host.or(file.host).unwrap_or(DEFAULT_HOST),
            port: overrides.port.or(file.port).unwrap_or(DEFAULT_PORT),
            db_path,
            data_dir,
        }
    }

    /// Socket address for the HTTP listener
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Create the data directory and the database's parent directory if missing
    pub fn ensure_directories(&self) -> Result<()> {
        std::fs::create_dir_all(&self.data_dir)?;

        if let Some(parent) = self.db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        Ok(())
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self::resolve(ConfigOverrides::default(), TomlConfig::default())
    }
}
