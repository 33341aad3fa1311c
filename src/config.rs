use std::net::IpAddr;
use std::path::{Path, PathBuf};

use anyhow::Context;
use directories_next::ProjectDirs;
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub address: IpAddr,
    pub port: u16,
    pub storage: Storage,
    pub limits: Limits,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Storage {
    pub dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Limits {
    /// Maximum request body size in bytes.
    pub max_upload_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            address: IpAddr::from([0, 0, 0, 0]),
            port: 8701,
            storage: Storage::default(),
            limits: Limits::default(),
        }
    }
}

impl Default for Storage {
    fn default() -> Self {
        Storage {
            dir: PathBuf::from("./pastes"),
        }
    }
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_upload_size: 10 * 1024 * 1024,
        }
    }
}

impl Config {
    /// Load the config from `path`, or from the user's config directory if no
    /// path is given. A missing default config file is not an error.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let path = match path {
            Some(path) => path.to_owned(),
            None => match default_path() {
                Some(path) if path.is_file() => path,
                _ => {
                    debug!("no config file found, using defaults");
                    return Ok(Config::default());
                }
            },
        };

        debug!("reading config from {}", path.display());
        let source = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Config::parse(&source)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    pub fn parse(source: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(source)?)
    }
}

fn default_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "shpaste").map(|dirs| dirs.config_dir().join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config = Config::parse("").unwrap();

        assert_eq!(config.address, IpAddr::from([0, 0, 0, 0]));
        assert_eq!(config.port, 8701);
        assert_eq!(config.storage.dir, PathBuf::from("./pastes"));
        assert_eq!(config.limits.max_upload_size, 10 * 1024 * 1024);
    }

    #[test]
    fn partial_config_overrides_some_fields() {
        let config = Config::parse(
            r#"
            address = "127.0.0.1"

            [storage]
            dir = "/var/lib/shpaste"
            "#,
        )
        .unwrap();

        assert_eq!(config.address, IpAddr::from([127, 0, 0, 1]));
        assert_eq!(config.port, 8701);
        assert_eq!(config.storage.dir, PathBuf::from("/var/lib/shpaste"));
    }

    #[test]
    fn bad_values_are_rejected() {
        assert!(Config::parse("port = \"eighty\"").is_err());
        assert!(Config::parse("address = \"not an ip\"").is_err());
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::TempDir::new().unwrap();
        assert!(Config::load(Some(dir.path().join("nope.toml").as_path())).is_err());
    }

    #[test]
    fn explicit_file_is_read() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("shpaste.toml");
        std::fs::write(&path, "port = 9000\n[limits]\nmax_upload_size = 42\n").unwrap();

        let config = Config::load(Some(path.as_path())).unwrap();

        assert_eq!(config.port, 9000);
        assert_eq!(config.limits.max_upload_size, 42);
    }
}
