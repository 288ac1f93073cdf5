use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Global QuickClean configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Minimum file size for duplicate detection, in MB
    #[serde(default = "default_duplicate_min_mb")]
    pub duplicate_min_mb: u64,

    /// Large file threshold in MB
    #[serde(default = "default_large_file_mb")]
    pub large_file_threshold_mb: u64,

    /// Paths to exclude from scanning
    #[serde(default)]
    pub exclude_paths: Vec<String>,

    /// Output format preference
    #[serde(default)]
    pub output_format: OutputFormat,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Human,
    Json,
}

fn default_duplicate_min_mb() -> u64 {
    1
}
fn default_large_file_mb() -> u64 {
    100
}

impl Default for Config {
    fn default() -> Self {
        Self {
            duplicate_min_mb: default_duplicate_min_mb(),
            large_file_threshold_mb: default_large_file_mb(),
            exclude_paths: Vec::new(),
            output_format: OutputFormat::Human,
        }
    }
}

impl Config {
    /// QuickClean data directory (~/.quickclean)
    pub fn data_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("/tmp"))
            .join(".quickclean")
    }

    /// Config file path
    pub fn config_path() -> PathBuf {
        Self::data_dir().join("config.toml")
    }

    /// Load config from file, or default if not present
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config: {}", path.display()))?;
            let config: Config = toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config: {}", path.display()))?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        let dir = path.parent().unwrap();
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create config dir: {}", dir.display()))?;
        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(&path, contents)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }

    /// Duplicate minimum size in bytes
    pub fn duplicate_min_bytes(&self) -> u64 {
        self.duplicate_min_mb * 1024 * 1024
    }

    /// Large file threshold in bytes
    pub fn large_file_threshold_bytes(&self) -> u64 {
        self.large_file_threshold_mb * 1024 * 1024
    }

    /// Check if a path should be excluded from scanning
    pub fn is_excluded(&self, path: &Path) -> bool {
        path_is_excluded(&self.exclude_paths, path)
    }
}

/// Substring match of a path against an exclusion list. Scanners hold a
/// copy of the list so they stay constructible without a full `Config`.
pub fn path_is_excluded(excludes: &[String], path: &Path) -> bool {
    if excludes.is_empty() {
        return false;
    }
    let path_str = path.display().to_string();
    excludes.iter().any(|p| path_str.contains(p))
}
