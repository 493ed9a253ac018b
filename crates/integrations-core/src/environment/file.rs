//! File-based environment (`.env` or YAML)
//!
//! Supports the conventional `.env` file next to the server and a flat YAML
//! mapping (`config/integrations.yaml`) of setting names to scalar values.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use super::traits::Environment;
use crate::resolver::{ConfigError, ConfigResult};

/// Settings file format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// `KEY=value` lines, parsed by dotenvy
    Dotenv,
    /// Flat YAML mapping of keys to scalars
    Yaml,
}

impl FileFormat {
    /// Pick a format from the file extension, `.env` style by default
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => FileFormat::Yaml,
            _ => FileFormat::Dotenv,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FileFormat::Dotenv => "dotenv",
            FileFormat::Yaml => "yaml",
        }
    }
}

/// Settings loaded once from a file
///
/// A missing file yields an empty environment: deployments commonly supply
/// everything through real environment variables instead. A file that exists
/// but cannot be parsed is an error.
///
/// # Example
///
/// ```no_run
/// use integrations_core::environment::{Environment, FileEnvironment};
///
/// let env = FileEnvironment::load(".env").unwrap();
/// let storage = env.get("STORAGE_TYPE");
/// ```
#[derive(Debug, Clone)]
pub struct FileEnvironment {
    path: PathBuf,
    format: FileFormat,
    exists: bool,
    settings: HashMap<String, String>,
}

impl FileEnvironment {
    /// Load a file, detecting its format from the extension
    pub fn load(path: impl Into<PathBuf>) -> ConfigResult<Self> {
        let path = path.into();
        let format = FileFormat::from_path(&path);
        Self::load_as(path, format)
    }

    /// Load a file with an explicit format
    pub fn load_as(path: impl Into<PathBuf>, format: FileFormat) -> ConfigResult<Self> {
        let path = path.into();
        if !path.exists() {
            return Ok(Self {
                path,
                format,
                exists: false,
                settings: HashMap::new(),
            });
        }

        let settings = match format {
            FileFormat::Dotenv => Self::parse_dotenv(&path)?,
            FileFormat::Yaml => Self::parse_yaml(&fs::read_to_string(&path)?)?,
        };

        Ok(Self {
            path,
            format,
            exists: true,
            settings,
        })
    }

    /// Get the file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the file format
    pub fn format(&self) -> FileFormat {
        self.format
    }

    /// Whether the file was present when loaded
    pub fn exists(&self) -> bool {
        self.exists
    }

    fn parse_dotenv(path: &Path) -> ConfigResult<HashMap<String, String>> {
        let iter = dotenvy::from_path_iter(path).map_err(|e| {
            ConfigError::Source(format!("Failed to read {}: {}", path.display(), e))
        })?;

        iter.map(|item| {
            item.map_err(|e| ConfigError::Source(format!("Failed to parse {}: {}", path.display(), e)))
        })
        .collect()
    }

    fn parse_yaml(content: &str) -> ConfigResult<HashMap<String, String>> {
        if content.trim().is_empty() {
            return Ok(HashMap::new());
        }

        let raw: BTreeMap<String, serde_yaml::Value> = serde_yaml::from_str(content)
            .map_err(|e| ConfigError::Source(format!("Failed to parse YAML: {}", e)))?;

        let mut settings = HashMap::with_capacity(raw.len());
        for (key, value) in raw {
            let value = match value {
                serde_yaml::Value::Null => continue,
                serde_yaml::Value::String(s) => s,
                serde_yaml::Value::Bool(b) => b.to_string(),
                serde_yaml::Value::Number(n) => n.to_string(),
                _ => {
                    return Err(ConfigError::Source(format!(
                        "Setting {} must be a scalar value",
                        key
                    )))
                }
            };
            settings.insert(key, value);
        }
        Ok(settings)
    }
}

impl Environment for FileEnvironment {
    fn name(&self) -> &str {
        self.format.as_str()
    }

    fn get(&self, key: &str) -> Option<String> {
        self.settings.get(key).cloned()
    }

    fn keys(&self) -> Vec<String> {
        self.settings.keys().cloned().collect()
    }
}
