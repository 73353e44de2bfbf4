// Configuration file handling

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub reporter: ReporterConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ReporterConfig {
    /// Explicit run directory; must not exist yet
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,

    /// Directory receiving timestamped run directories
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive used when RUST_LOG is not set
    #[serde(default = "default_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
        }
    }
}

// Default values
pub const ENV_TEACUP_LOG_ROOT: &str = "TEACUP_LOG_ROOT";

pub fn default_filter() -> String {
    String::from("teacup_report=warn")
}

/// `<home>/.teacup/logs`, or `.teacup/logs` when there is no home directory
pub fn default_base_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".teacup")
        .join("logs")
}

/// Fresh timestamped run directory below the default base directory
pub fn default_run_dir() -> PathBuf {
    default_base_dir().join(crate::time::now_run_id())
}

impl Config {
    /// Load configuration from default locations
    pub fn load() -> Option<Self> {
        // Check locations in order:
        // 1. .teacuprc (current directory)
        // 2. ~/.teacuprc (home directory)
        // 3. .teacuprc.toml (current directory)
        // 4. ~/.teacuprc.toml (home directory)

        let cwd = std::env::current_dir().ok()?;
        let home = dirs::home_dir()?;

        let paths = [
            cwd.join(".teacuprc"),
            home.join(".teacuprc"),
            cwd.join(".teacuprc.toml"),
            home.join(".teacuprc.toml"),
        ];

        for path in &paths {
            if path.exists() {
                return Self::load_from_file(path);
            }
        }

        None
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Option<Self> {
        let content = std::fs::read_to_string(path).ok()?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML string
    pub fn parse(content: &str) -> Option<Self> {
        toml::from_str(content).ok()
    }

    /// Generate configuration as TOML
    pub fn to_toml(&self) -> String {
        toml::to_string_pretty(self).unwrap_or_else(|_| String::new())
    }

    /// Run directory for a new reporter.
    ///
    /// Precedence: `cli_root`, configured `root`, `TEACUP_LOG_ROOT`, a
    /// timestamped directory below the configured or default base directory.
    pub fn run_dir(&self, cli_root: Option<&Path>) -> PathBuf {
        self.run_dir_with_env(cli_root, std::env::var_os(ENV_TEACUP_LOG_ROOT).map(PathBuf::from))
    }

    fn run_dir_with_env(&self, cli_root: Option<&Path>, env_root: Option<PathBuf>) -> PathBuf {
        if let Some(root) = cli_root {
            return root.to_path_buf();
        }
        if let Some(root) = &self.reporter.root {
            return root.clone();
        }
        if let Some(root) = env_root {
            return root;
        }

        self.reporter
            .base_dir
            .clone()
            .unwrap_or_else(default_base_dir)
            .join(crate::time::now_run_id())
    }
}
