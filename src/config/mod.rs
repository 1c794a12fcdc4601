use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
    #[serde(default = "default_separator_char")]
    pub separator_char: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}
fn default_busy_timeout_ms() -> u64 {
    5_000
}
fn default_separator_char() -> String {
    "-".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: Self::database_file().to_string_lossy().to_string(),
            log_level: default_log_level(),
            busy_timeout_ms: default_busy_timeout_ms(),
            separator_char: default_separator_char(),
        }
    }
}

impl Config {
    /// Standard configuration directory (`~/.shiftclock`, `%APPDATA%\shiftclock` on Windows).
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("shiftclock")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".shiftclock")
        }
    }

    pub fn config_file() -> PathBuf {
        Self::config_dir().join("shiftclock.conf")
    }

    pub fn database_file() -> PathBuf {
        Self::config_dir().join("shiftclock.sqlite")
    }

    /// Load configuration from file, or return defaults if not found.
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let cfg: Config = serde_yaml::from_str(&content)?;
        if cfg.database.trim().is_empty() {
            return Err(AppError::Config(format!(
                "'database' is empty in {}",
                path.display()
            )));
        }
        Ok(cfg)
    }

    /// Resolve the database path for `init`: user-provided (relative to the
    /// config dir) or the default file.
    pub fn resolve_db_path(custom_name: Option<&str>) -> PathBuf {
        match custom_name {
            Some(name) => {
                let p = Path::new(name);
                if p.is_absolute() {
                    p.to_path_buf()
                } else {
                    Self::config_dir().join(p)
                }
            }
            None => Self::database_file(),
        }
    }

    /// Initialize the config file (skipped in test mode) and return the
    /// effective configuration.
    pub fn init_all(custom_name: Option<&str>, is_test: bool) -> AppResult<Self> {
        let db_path = Self::resolve_db_path(custom_name);

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            ..Config::default()
        };

        if !is_test {
            fs::create_dir_all(Self::config_dir())?;
            let yaml = serde_yaml::to_string(&config)?;
            fs::write(Self::config_file(), yaml)?;
        }

        if let Some(parent) = db_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        Ok(config)
    }
}
