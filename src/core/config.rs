use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = ".logdoctor.yml";
pub const DEFAULT_FIX_DIR: &str = "fixes";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub fix_dir: Option<PathBuf>,
}

impl Config {
    pub fn load(dir: &Path) -> Self {
        let config_path = dir.join(CONFIG_FILE);
        if config_path.exists() {
            if let Ok(content) = std::fs::read_to_string(&config_path) {
                if let Ok(config) = serde_yaml::from_str::<Config>(&content) {
                    return config;
                }
            }
        }
        Config::default()
    }

    /// The fix directory this config resolves to, falling back to the
    /// default relative directory.
    pub fn fix_dir(&self) -> PathBuf {
        self.fix_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_FIX_DIR))
    }
}
