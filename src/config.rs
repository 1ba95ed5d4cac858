use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

pub const DEFAULT_SERVICE_LOOKUP: &str = "getService";
pub const DEFAULT_SERVICE_ENUM: &str = "SERVICES";

/// Settings loaded from `depmap.toml`. Every field is optional.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Base directory the listed files are relative to.
    pub root: PathBuf,
    /// Ordered file list. Order decides symbol ownership.
    pub files: Vec<PathBuf>,
    pub patterns: PatternConfig,
    pub audit: AuditConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct PatternConfig {
    /// Function whose first string-literal argument names a service.
    pub service_lookup: String,
    /// Enumeration-like symbol whose members name services.
    pub service_enum: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct AuditConfig {
    pub source_dir: PathBuf,
    pub extension: String,
    pub large_function_lines: usize,
    /// Top-level folders under `source_dir` left out of the report.
    pub skip_dirs: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            files: Vec::new(),
            patterns: PatternConfig::default(),
            audit: AuditConfig::default(),
        }
    }
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            service_lookup: DEFAULT_SERVICE_LOOKUP.to_string(),
            service_enum: DEFAULT_SERVICE_ENUM.to_string(),
        }
    }
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("src"),
            extension: "gs".to_string(),
            large_function_lines: 100,
            skip_dirs: Vec::new(),
        }
    }
}

impl Config {
    /// Load a config file. A relative `root` is taken relative to the file's directory.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        if config.root.is_relative() {
            if let Some(parent) = path.parent() {
                config.root = parent.join(&config.root);
            }
        }
        Ok(config)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Apply command-line overrides: `root` replaces, `files` are appended in order.
    pub fn with_overrides(mut self, root: Option<PathBuf>, files: Vec<PathBuf>) -> Self {
        if let Some(root) = root {
            self.root = root;
        }
        self.files.extend(files);
        self
    }

    /// The configured file list with duplicate entries removed, keeping the first.
    pub fn ordered_files(&self) -> Result<Vec<PathBuf>, ConfigError> {
        if self.files.is_empty() {
            return Err(ConfigError::NoFiles);
        }
        let mut seen = std::collections::HashSet::with_capacity(self.files.len());
        Ok(self
            .files
            .iter()
            .filter(|path| seen.insert(path.as_path()))
            .cloned()
            .collect())
    }

    pub fn audit_root(&self) -> PathBuf {
        self.root.join(&self.audit.source_dir)
    }
}
