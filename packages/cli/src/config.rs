use flyer_editor::EditorConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_CONFIG_NAME: &str = "flyer.config.json";

/// Flyer configuration file format
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory backing the durable store
    #[serde(default = "default_store_dir")]
    pub store_dir: String,

    /// Where downloads (project file, exports) are written
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Editor settings, inlined at the top level
    #[serde(flatten)]
    pub editor: EditorConfig,
}

fn default_store_dir() -> String {
    ".flyer".to_string()
}

fn default_output_dir() -> String {
    ".".to_string()
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn get_store_dir(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.store_dir)
    }

    /// Output directory, unless overridden on the command line
    pub fn get_output_dir(&self, cwd: &str, out: Option<PathBuf>) -> PathBuf {
        out.unwrap_or_else(|| PathBuf::from(cwd).join(&self.output_dir))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_dir: default_store_dir(),
            output_dir: default_output_dir(),
            editor: EditorConfig::default(),
        }
    }
}
