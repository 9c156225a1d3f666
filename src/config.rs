use std::path::{Path, PathBuf};

const DB_FILE: &str = ".tasklist.db";
const LOG_FILE: &str = ".tasklist.log";

/// Resolved file locations.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub db_path: PathBuf,
    pub log_path: PathBuf,
}

impl Config {
    /// Explicit paths win; otherwise both files live in `$HOME`, or the
    /// current directory when `HOME` is unset.
    pub fn resolve(db: Option<PathBuf>, log_file: Option<PathBuf>) -> Self {
        let home_dir = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        Self::resolve_in(Path::new(&home_dir), db, log_file)
    }

    fn resolve_in(home: &Path, db: Option<PathBuf>, log_file: Option<PathBuf>) -> Self {
        Config {
            db_path: db.unwrap_or_else(|| home.join(DB_FILE)),
            log_path: log_file.unwrap_or_else(|| home.join(LOG_FILE)),
        }
    }
}
