use crate::error::{BlogError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = ".mdblog.toml";

/// Environment variable that overrides `firestore.api_key`.
pub const API_KEY_ENV: &str = "MDBLOG_FIRESTORE_API_KEY";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlogConfig {
    #[serde(default)]
    pub blog: BlogSettings,

    #[serde(default)]
    pub firestore: FirestoreSettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Local,
    Firestore,
}

impl std::fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreBackend::Local => write!(f, "local"),
            StoreBackend::Firestore => write!(f, "firestore"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogSettings {
    #[serde(default)]
    pub backend: StoreBackend,

    #[serde(default = "default_path")]
    pub path: String,

    #[serde(default = "default_fallback_name")]
    pub fallback_name: String,
}

fn default_path() -> String {
    ".mdblog".to_string()
}

fn default_fallback_name() -> String {
    "blogpost".to_string()
}

impl Default for BlogSettings {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            path: default_path(),
            fallback_name: default_fallback_name(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FirestoreSettings {
    #[serde(default)]
    pub project_id: String,

    #[serde(default = "default_database")]
    pub database: String,

    #[serde(default = "default_collection")]
    pub collection: String,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

fn default_database() -> String {
    "(default)".to_string()
}

fn default_collection() -> String {
    "posts".to_string()
}

fn default_base_url() -> String {
    "https://firestore.googleapis.com/v1".to_string()
}

impl Default for FirestoreSettings {
    fn default() -> Self {
        Self {
            project_id: String::new(),
            database: default_database(),
            collection: default_collection(),
            base_url: default_base_url(),
            api_key: None,
        }
    }
}

impl FirestoreSettings {
    /// API key from the environment, falling back to the config file.
    pub fn resolved_api_key(&self) -> Option<String> {
        std::env::var(API_KEY_ENV)
            .ok()
            .filter(|k| !k.is_empty())
            .or_else(|| self.api_key.clone())
    }
}

impl BlogConfig {
    pub fn load(start_path: &Path) -> Result<(Self, PathBuf)> {
        let config_path = Self::find_config_file(start_path)?;
        Self::load_from(&config_path)
    }

    pub fn load_from(config_path: &Path) -> Result<(Self, PathBuf)> {
        let content = std::fs::read_to_string(config_path)?;
        let config: BlogConfig = toml::from_str(&content)?;
        config.validate()?;
        let project_root = config_path
            .parent()
            .ok_or_else(|| BlogError::Config("Config file has no parent directory".to_string()))?
            .to_path_buf();
        Ok((config, project_root))
    }

    pub fn find_config_file(start_path: &Path) -> Result<PathBuf> {
        let mut current = start_path.to_path_buf();
        loop {
            let config_path = current.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                return Ok(config_path);
            }
            if !current.pop() {
                return Err(BlogError::NotInitialized);
            }
        }
    }

    fn validate(&self) -> Result<()> {
        if self.blog.backend == StoreBackend::Firestore && self.firestore.project_id.is_empty() {
            return Err(BlogError::Config(
                "firestore.project_id is required for the firestore backend".to_string(),
            ));
        }
        Ok(())
    }

    pub fn data_path(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.blog.path)
    }

    pub fn posts_path(&self, project_root: &Path) -> PathBuf {
        self.data_path(project_root).join("posts")
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_from_empty_file() {
        let config: BlogConfig = toml::from_str("").unwrap();
        assert_eq!(config.blog.backend, StoreBackend::Local);
        assert_eq!(config.blog.path, ".mdblog");
        assert_eq!(config.blog.fallback_name, "blogpost");
        assert_eq!(config.firestore.collection, "posts");
        assert_eq!(config.firestore.database, "(default)");
    }

    #[test]
    fn test_find_config_searches_upward() {
        let temp_dir = TempDir::new().unwrap();
        BlogConfig::default()
            .save(&temp_dir.path().join(CONFIG_FILE_NAME))
            .unwrap();
        let nested = temp_dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        let (config, root) = BlogConfig::load(&nested).unwrap();
        assert_eq!(config.blog.backend, StoreBackend::Local);
        assert_eq!(root, temp_dir.path());
    }

    #[test]
    fn test_firestore_requires_project_id() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[blog]\nbackend = \"firestore\"\n").unwrap();

        assert!(matches!(
            BlogConfig::load_from(&path),
            Err(BlogError::Config(_))
        ));
    }

    #[test]
    fn test_missing_config_is_not_initialized() {
        let temp_dir = TempDir::new().unwrap();
        // Only meaningful if no ancestor of the temp dir carries a config.
        if let Err(e) = BlogConfig::find_config_file(temp_dir.path()) {
            assert!(matches!(e, BlogError::NotInitialized));
        }
    }
}
