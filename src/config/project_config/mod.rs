//! Project-level configuration support
//!
//! Loads configuration from `ecoscore.toml` or `.ecoscorerc.json` in the
//! working directory, or from an explicit `--config` path.
//!
//! # Configuration Format
//!
//! ```toml
//! # ecoscore.toml
//!
//! [storage]
//! path = "data/ecoscore.redb"
//!
//! [defaults]
//! format = "text"
//! company = "acme"
//! no_color = false
//!
//! [report]
//! history_limit = 10
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Preferred configuration file name
pub const CONFIG_FILE_NAME: &str = "ecoscore.toml";

const JSON_CONFIG_FILE_NAME: &str = ".ecoscorerc.json";

/// Store file name inside the data directory
const STORE_FILE_NAME: &str = "ecoscore.redb";

/// Project-level configuration loaded from ecoscore.toml or similar
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ProjectConfig {
    /// Evaluation store settings
    #[serde(default)]
    pub storage: StorageConfig,

    /// Default CLI flags
    #[serde(default)]
    pub defaults: CliDefaults,

    /// Report rendering settings
    #[serde(default)]
    pub report: ReportConfig,

    /// Directory of the file this config was read from
    #[serde(skip)]
    source_dir: Option<PathBuf>,
}

/// Where evaluations and REP records are kept
#[derive(Debug, Clone, Deserialize, Default)]
pub struct StorageConfig {
    /// Store file path (default: <data dir>/ecoscore/ecoscore.redb)
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Default CLI flags that can be set in project config
#[derive(Debug, Clone, Deserialize, Default)]
pub struct CliDefaults {
    /// Default output format (text, json, markdown, html)
    #[serde(default)]
    pub format: Option<String>,

    /// Company used when `--company` is not given
    #[serde(default)]
    pub company: Option<String>,

    /// Disable ANSI colors by default
    #[serde(default)]
    pub no_color: Option<bool>,
}

/// Report rendering settings
#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    /// Number of past evaluations listed in reports (default: 10)
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            history_limit: default_history_limit(),
        }
    }
}

fn default_history_limit() -> usize {
    10
}

/// Load project configuration.
///
/// With an explicit path, that file is read and any error is returned.
/// Otherwise searches `dir` for:
/// 1. `ecoscore.toml`
/// 2. `.ecoscorerc.json`
///
/// Returns default configuration if no config file is found or the found
/// file cannot be parsed.
pub fn load_project_config(dir: &Path, explicit: Option<&Path>) -> anyhow::Result<ProjectConfig> {
    if let Some(path) = explicit {
        let config = load_config_file(path)?;
        debug!("Loaded project config from {}", path.display());
        return Ok(config);
    }

    for name in [CONFIG_FILE_NAME, JSON_CONFIG_FILE_NAME] {
        let path = dir.join(name);
        if !path.exists() {
            continue;
        }
        match load_config_file(&path) {
            Ok(config) => {
                debug!("Loaded project config from {}", path.display());
                return Ok(config);
            }
            Err(e) => {
                warn!("Failed to load {}: {}", path.display(), e);
            }
        }
    }

    debug!("No project config found, using defaults");
    Ok(ProjectConfig::default())
}

/// Load configuration from a TOML or JSON file, chosen by extension
fn load_config_file(path: &Path) -> anyhow::Result<ProjectConfig> {
    let content = std::fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));

    let mut config: ProjectConfig = if is_json {
        serde_json::from_str(&content)?
    } else {
        toml::from_str(&content)?
    };
    config.source_dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf);
    Ok(config)
}

/// Default store location: <data dir>/ecoscore/ecoscore.redb
pub fn default_store_path() -> PathBuf {
    let base = dirs::data_dir().unwrap_or_else(|| {
        dirs::home_dir()
            .map(|h| h.join(".local").join("share"))
            .unwrap_or_else(|| PathBuf::from("."))
    });
    base.join("ecoscore").join(STORE_FILE_NAME)
}

impl ProjectConfig {
    /// Effective store path.
    ///
    /// A data directory override (flag or `ECOSCORE_DATA_DIR`) wins over the
    /// configured path, which wins over the platform default. Relative
    /// configured paths are resolved against the config file's directory,
    /// or `base_dir` when the config was not read from a file.
    pub fn store_path(&self, data_dir: Option<&Path>, base_dir: &Path) -> PathBuf {
        if let Some(dir) = data_dir {
            return dir.join(STORE_FILE_NAME);
        }
        match &self.storage.path {
            Some(path) if path.is_relative() => {
                self.source_dir.as_deref().unwrap_or(base_dir).join(path)
            }
            Some(path) => path.clone(),
            None => default_store_path(),
        }
    }

    /// Output format: explicit flag > config default > "text"
    pub fn format<'a>(&'a self, flag: Option<&'a str>) -> &'a str {
        flag.or(self.defaults.format.as_deref()).unwrap_or("text")
    }

    /// Company: explicit flag > config default
    pub fn company<'a>(&'a self, flag: Option<&'a str>) -> Option<&'a str> {
        flag.or(self.defaults.company.as_deref())
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }

    /// Whether ANSI colors are disabled
    pub fn no_color(&self, flag: bool) -> bool {
        flag || self.defaults.no_color.unwrap_or(false)
    }
}
