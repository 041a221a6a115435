use crate::domain::Domain;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CONFIG_ENV: &str = "INSIGHTBAR_CONFIG";
const DEFAULT_MENU_PADDING: u16 = 1;

#[derive(Debug, Error)]
pub enum ResolveConfigPathError {
    #[error("home directory not found")]
    HomeDirNotFound,
}

#[derive(Debug, Error)]
pub enum LoadConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub domains: Vec<Domain>,
    pub initial_route: String,
    pub menu_padding: u16,
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            domains: Vec::new(),
            initial_route: "/".to_string(),
            menu_padding: DEFAULT_MENU_PADDING,
            log_file: None,
        }
    }
}

pub fn resolve_state_dir() -> Result<PathBuf, ResolveConfigPathError> {
    let Some(home) = dirs::home_dir() else {
        return Err(ResolveConfigPathError::HomeDirNotFound);
    };
    Ok(home.join(".insightbar"))
}

pub fn default_log_path() -> Result<PathBuf, ResolveConfigPathError> {
    Ok(resolve_state_dir()?.join("insightbar.log"))
}

/// `--config` wins, then `INSIGHTBAR_CONFIG`, then `~/.insightbar/config.json`.
pub fn resolve_config_path(explicit: Option<&Path>) -> Result<PathBuf, ResolveConfigPathError> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        if !path.is_empty() {
            return Ok(PathBuf::from(path));
        }
    }
    Ok(resolve_state_dir()?.join("config.json"))
}

/// A missing file yields the defaults; an unreadable or malformed one is an error.
pub fn load_config(path: &Path) -> Result<Config, LoadConfigError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(error) if error.kind() == io::ErrorKind::NotFound => {
            return Ok(Config::default());
        }
        Err(source) => {
            return Err(LoadConfigError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    serde_json::from_str(&raw).map_err(|source| LoadConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().expect("tempdir");
        let config = load_config(&dir.path().join("nope.json")).expect("load");
        assert_eq!(config, Config::default());
        assert_eq!(config.initial_route, "/");
        assert_eq!(config.menu_padding, 1);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{"domains":[{"id":"a1","title":"example.com"}],"initial_route":"/insights/pages"}"#,
        )
        .expect("write");

        let config = load_config(&path).expect("load");
        assert_eq!(config.domains.len(), 1);
        assert_eq!(config.domains[0].title, "example.com");
        assert_eq!(config.initial_route, "/insights/pages");
        assert_eq!(config.menu_padding, 1);
        assert_eq!(config.log_file, None);
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("config.json");
        fs::write(&path, "{ domains: ").expect("write");

        let err = load_config(&path).expect_err("should fail");
        assert!(matches!(err, LoadConfigError::Parse { .. }));
        assert!(err.to_string().contains("config.json"));
    }

    #[test]
    fn explicit_path_wins() {
        let path = resolve_config_path(Some(Path::new("/tmp/custom.json"))).expect("resolve");
        assert_eq!(path, PathBuf::from("/tmp/custom.json"));
    }
}
