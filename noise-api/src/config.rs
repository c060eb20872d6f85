//! Command-line and environment configuration
//!
//! clap merges the first two layers (argument beats environment variable);
//! the TOML file and compiled defaults are applied by
//! [`ServiceConfig::resolve`].

use clap::Parser;
use noise_common::config::{load_toml_config, ConfigOverrides, ServiceConfig};
use std::net::IpAddr;
use std::path::PathBuf;

/// Environment noise catalog service
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "noise-api", version, about = "Environment noise catalog service")]
pub struct Args {
    /// Address to bind
    #[arg(long, env = "NOISE_BACKEND_HOST")]
    pub host: Option<IpAddr>,

    /// Port to listen on
    #[arg(short, long, env = "NOISE_BACKEND_PORT")]
    pub port: Option<u16>,

    /// SQLite database file (defaults to <data-dir>/white_noise.db)
    #[arg(long, env = "NOISE_DB_PATH")]
    pub db_path: Option<PathBuf>,

    /// Directory holding audio files
    #[arg(long, env = "NOISE_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// TOML config file
    #[arg(short, long, env = "NOISE_CONFIG")]
    pub config: Option<PathBuf>,
}

impl Args {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            host: self.host,
            port: self.port,
            db_path: self.db_path.clone(),
            data_dir: self.data_dir.clone(),
        }
    }

    /// Resolve the full configuration, reading the TOML layer if present
    pub fn resolve(&self) -> noise_common::Result<ServiceConfig> {
        let file = load_toml_config(self.config.as_deref())?;
        Ok(ServiceConfig::resolve(self.overrides(), file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_flags_parse() {
        let args = Args::try_parse_from([
            "noise-api",
            "--host",
            "127.0.0.1",
            "--port",
            "9100",
            "--data-dir",
            "/srv/noise",
        ])
        .unwrap();

        assert_eq!(args.host, Some("127.0.0.1".parse().unwrap()));
        assert_eq!(args.port, Some(9100));
        assert_eq!(args.data_dir, Some(PathBuf::from("/srv/noise")));
    }

    #[test]
    fn test_invalid_port_rejected() {
        assert!(Args::try_parse_from(["noise-api", "--port", "not-a-port"]).is_err());
        assert!(Args::try_parse_from(["noise-api", "--port", "70000"]).is_err());
    }
}
