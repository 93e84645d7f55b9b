//! File-based environment overrides (YAML)
//!
//! Supports user-level (~/.config/envfall/env.yaml) and workspace-level
//! (.config/envfall/env.yaml) override files.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::de::{self, DeserializeSeed, Deserializer, IgnoredAny, MapAccess, Visitor};

use super::traits::{EnvStore, StoreError, StoreResult};
use crate::warn_log;

/// Override file level (user or workspace)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileLevel {
    /// User-level overrides (~/.config/envfall/env.yaml)
    User,
    /// Workspace-level overrides (.config/envfall/env.yaml in workspace root)
    Workspace,
}

impl FileLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileLevel::User => "user",
            FileLevel::Workspace => "workspace",
        }
    }
}

/// Environment store that reads a flat YAML mapping of overrides
///
/// Scalars keep their source text, so `PORT: 8080` and `PORT: "8080"` are
/// the same variable and `VERSION: 1.10` stays `1.10`. `null` entries are
/// dropped, and lists or nested mappings are logged and skipped. A file that
/// fails to parse is logged and read as empty.
///
/// The file is read on every lookup, so edits made while the process runs
/// are picked up by the next call.
///
/// # Example
///
/// ```no_run
/// use envfall_core::store::FileEnvStore;
///
/// // User-level overrides
/// let user = FileEnvStore::user();
///
/// // Workspace-level overrides
/// let workspace = FileEnvStore::workspace("/path/to/workspace");
/// ```
pub struct FileEnvStore {
    path: PathBuf,
    level: FileLevel,
}

impl FileEnvStore {
    /// Create a new file store for a specific path
    pub fn new(path: impl Into<PathBuf>, level: FileLevel) -> Self {
        Self {
            path: path.into(),
            level,
        }
    }

    /// Create a user-level store (~/.config/envfall/env.yaml)
    pub fn user() -> Self {
        // Use XDG config directory (~/.config on Linux, ~/Library/Application Support on macOS)
        let config_dir = dirs::config_dir().unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config")
        });
        let path = config_dir.join("envfall").join("env.yaml");
        Self::new(path, FileLevel::User)
    }

    /// Create a workspace-level store (.config/envfall/env.yaml)
    pub fn workspace(workspace_root: impl AsRef<Path>) -> Self {
        let path = workspace_root
            .as_ref()
            .join(".config")
            .join("envfall")
            .join("env.yaml");
        Self::new(path, FileLevel::Workspace)
    }

    /// Get the override file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the file level
    pub fn level(&self) -> FileLevel {
        self.level
    }

    /// Check if the override file exists
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    fn parse(content: &str) -> StoreResult<HashMap<String, String>> {
        if content.trim().is_empty() {
            return Ok(HashMap::new());
        }

        // First pass finds the entries that have no scalar text to keep
        let shape: BTreeMap<String, serde_yaml::Value> = serde_yaml::from_str(content)
            .map_err(|e| StoreError::Serialization(format!("Failed to parse YAML: {}", e)))?;

        let mut skip = HashSet::new();
        for (key, value) in shape {
            match value {
                serde_yaml::Value::Null => {
                    skip.insert(key);
                }
                serde_yaml::Value::Sequence(_)
                | serde_yaml::Value::Mapping(_)
                | serde_yaml::Value::Tagged(_) => {
                    warn_log!("Skipping override {}: not a scalar value", key);
                    skip.insert(key);
                }
                _ => {}
            }
        }

        ScalarEntries { skip: &skip }
            .deserialize(serde_yaml::Deserializer::from_str(content))
            .map_err(|e| StoreError::Serialization(format!("Failed to parse YAML: {}", e)))
    }

    /// Load overrides from file
    fn load(&self) -> StoreResult<HashMap<String, String>> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }

        let content = fs::read_to_string(&self.path)?;
        Self::parse(&content)
    }

    /// Save overrides to file, keys sorted
    fn save(&self, vars: &HashMap<String, String>) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let sorted: BTreeMap<&String, &String> = vars.iter().collect();
        let content = serde_yaml::to_string(&sorted)
            .map_err(|e| StoreError::Serialization(format!("Failed to serialize YAML: {}", e)))?;

        fs::write(&self.path, content)?;
        Ok(())
    }

    /// Overrides for reads, with load failures logged instead of returned
    fn vars_or_empty(&self) -> HashMap<String, String> {
        self.load().unwrap_or_else(|e| {
            warn_log!("Ignoring {} overrides at {}: {}", self.level.as_str(), self.path.display(), e);
            HashMap::new()
        })
    }

    /// Read overrides from disk, returning parse errors instead of logging them
    pub fn reload(&self) -> StoreResult<HashMap<String, String>> {
        self.load()
    }

    /// Create a backup of the current override file
    pub fn backup(&self) -> StoreResult<Option<PathBuf>> {
        if !self.exists() {
            return Ok(None);
        }

        let backup_path = self.path.with_extension("yaml.backup");
        fs::copy(&self.path, &backup_path)?;
        Ok(Some(backup_path))
    }

    /// Export overrides as a JSON object
    pub fn export_json(&self) -> StoreResult<String> {
        let vars = self.load()?;
        let sorted: BTreeMap<&String, &String> = vars.iter().collect();
        serde_json::to_string_pretty(&sorted)
            .map_err(|e| StoreError::Serialization(format!("Failed to serialize JSON: {}", e)))
    }

    /// Replace overrides with the contents of a JSON object
    ///
    /// Numbers keep their JSON text and booleans become `true`/`false`.
    /// `null` entries are dropped and arrays or objects are skipped.
    pub fn import_json(&self, json: &str) -> StoreResult<()> {
        let raw: HashMap<String, Box<serde_json::value::RawValue>> = serde_json::from_str(json)
            .map_err(|e| StoreError::Serialization(format!("Failed to parse JSON: {}", e)))?;

        let mut vars = HashMap::new();
        for (key, text) in raw {
            let value: serde_json::Value = serde_json::from_str(text.get())
                .map_err(|e| StoreError::Serialization(format!("Failed to parse JSON: {}", e)))?;
            match value {
                serde_json::Value::Null => {}
                serde_json::Value::String(s) => {
                    vars.insert(key, s);
                }
                serde_json::Value::Bool(b) => {
                    vars.insert(key, b.to_string());
                }
                serde_json::Value::Number(_) => {
                    vars.insert(key, text.get().trim().to_string());
                }
                serde_json::Value::Array(_) | serde_json::Value::Object(_) => {
                    warn_log!("Skipping override {}: not a scalar value", key);
                }
            }
        }
        self.save(&vars)
    }
}

/// Reads a YAML mapping as the source text of each scalar value
struct ScalarEntries<'a> {
    skip: &'a HashSet<String>,
}

impl<'de, 'a> DeserializeSeed<'de> for ScalarEntries<'a> {
    type Value = HashMap<String, String>;

    fn deserialize<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(self)
    }
}

impl<'de, 'a> Visitor<'de> for ScalarEntries<'a> {
    type Value = HashMap<String, String>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a mapping of variable names to values")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut vars = HashMap::new();
        while let Some(key) = map.next_key::<String>()? {
            if self.skip.contains(&key) {
                map.next_value::<IgnoredAny>()?;
                continue;
            }
            let ScalarText(text) = map.next_value()?;
            vars.insert(key, text);
        }
        Ok(vars)
    }
}

/// A scalar taken as written: `1.10`, `0x1F` and `true` are not reformatted
struct ScalarText(String);

impl<'de> de::Deserialize<'de> for ScalarText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct TextVisitor;

        impl<'de> Visitor<'de> for TextVisitor {
            type Value = ScalarText;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a scalar value")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<ScalarText, E> {
                Ok(ScalarText(v.to_string()))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<ScalarText, E> {
                Ok(ScalarText(v))
            }
        }

        deserializer.deserialize_str(TextVisitor)
    }
}

impl std::fmt::Debug for FileEnvStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileEnvStore")
            .field("path", &self.path)
            .field("level", &self.level)
            .field("exists", &self.exists())
            .finish()
    }
}

impl EnvStore for FileEnvStore {
    fn name(&self) -> &str {
        match self.level {
            FileLevel::User => "file:user",
            FileLevel::Workspace => "file:workspace",
        }
    }

    fn is_available(&self) -> bool {
        self.exists()
    }

    fn get(&self, key: &str) -> Option<String> {
        self.vars_or_empty().remove(key)
    }

    fn entries(&self) -> Vec<(String, String)> {
        self.vars_or_empty().into_iter().collect()
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut vars = self.load()?;
        vars.insert(key.to_string(), value.to_string());
        self.save(&vars)
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        let mut vars = self.load()?;
        if vars.remove(key).is_none() {
            return Err(StoreError::NotFound(key.to_string()));
        }
        self.save(&vars)
    }
}
