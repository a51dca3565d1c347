use std::env;
use std::path::PathBuf;

use dotenvy::dotenv;

#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: PathBuf,
    pub export_dir: PathBuf,
    pub log_dir: PathBuf,

    /// Prefix used when formatting amounts for display
    pub currency: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("hrm.db"),
            export_dir: PathBuf::from("exports"),
            log_dir: PathBuf::from("logs"),
            currency: "K".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            db_path: non_empty("HRM_DB_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.db_path),
            export_dir: non_empty("HRM_EXPORT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.export_dir),
            log_dir: non_empty("HRM_LOG_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.log_dir),
            currency: non_empty("HRM_CURRENCY").unwrap_or(defaults.currency),
        }
    }
}
