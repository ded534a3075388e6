use std::env;
use std::path::PathBuf;

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "STICKIES_DATA_DIR";

const DEFAULT_DATA_DIR: &str = "data";
const NOTES_DIR: &str = "notes";
const TEMPLATES_DIR: &str = "templates";

/// Where notes live on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Root data directory; notes are stored in `<data_dir>/notes`.
    pub data_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
        }
    }
}

impl Config {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Resolve the data directory: explicit flag, then `STICKIES_DATA_DIR`,
    /// then `./data`.
    pub fn resolve(flag: Option<PathBuf>) -> Self {
        if let Some(dir) = flag {
            return Self::new(dir);
        }
        match env::var_os(DATA_DIR_ENV) {
            Some(dir) if !dir.is_empty() => Self::new(dir),
            _ => Self::default(),
        }
    }

    pub fn notes_dir(&self) -> PathBuf {
        self.data_dir.join(NOTES_DIR)
    }

    pub fn templates_dir(&self) -> PathBuf {
        self.data_dir.join(TEMPLATES_DIR)
    }
}
