//! Resolution state persistence.
//!
//! The resolution state is the mapping from lowercased dependency name to
//! resolved filesystem path, empty string until resolved. It is seeded with
//! every known name up front, mutated only by the probe, fallback, and
//! fetch-install flows, and persisted once at the end of a successful
//! first-time pass. A persisted state is read back and trusted on later
//! runs; deleting the file forces a full re-probe.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, RiggerError};

/// Directory under the project root holding rigger's on-disk state.
pub const CONFIG_DIR: &str = ".rigger";

/// Resolution-state file name.
pub const CONFIG_FILE: &str = "config.json";

/// Dependency name to resolved path, serialized under a single `depends` key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionState {
    #[serde(default)]
    depends: BTreeMap<String, String>,
}

impl ResolutionState {
    /// Create a state with every name present and unresolved.
    pub fn seeded<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            depends: names
                .into_iter()
                .map(|n| (n.to_lowercase(), String::new()))
                .collect(),
        }
    }

    /// Record a resolved path for a dependency.
    pub fn set(&mut self, name: &str, path: impl Into<String>) {
        self.depends.insert(name.to_lowercase(), path.into());
    }

    /// Raw entry for a dependency (empty string when unresolved).
    pub fn get(&self, name: &str) -> Option<&str> {
        self.depends.get(&name.to_lowercase()).map(|s| s.as_str())
    }

    /// Resolved path for a dependency, None when absent or empty.
    pub fn resolved_path(&self, name: &str) -> Option<PathBuf> {
        self.get(name)
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
    }

    /// True when the dependency has a non-empty resolution.
    pub fn is_resolved(&self, name: &str) -> bool {
        self.resolved_path(name).is_some()
    }

    /// Names that still have an empty resolution.
    pub fn unresolved_names(&self) -> Vec<&str> {
        self.depends
            .iter()
            .filter(|(_, path)| path.is_empty())
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Iterate (name, path) entries in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.depends.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.depends.len()
    }

    /// True when the state holds no entries.
    pub fn is_empty(&self) -> bool {
        self.depends.is_empty()
    }

    /// Path of the state file under a project root.
    pub fn file_path(project_root: &Path) -> PathBuf {
        project_root.join(CONFIG_DIR).join(CONFIG_FILE)
    }

    /// Load the persisted state, `None` when the file does not exist.
    pub fn load(project_root: &Path) -> Result<Option<Self>> {
        let path = Self::file_path(project_root);
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)?;
        let state: Self =
            serde_json::from_str(&content).map_err(|e| RiggerError::ConfigParse {
                path,
                message: e.to_string(),
            })?;
        Ok(Some(state))
    }

    /// Save the state using atomic write (temp file, then rename).
    pub fn save(&self, project_root: &Path) -> Result<()> {
        let dir = project_root.join(CONFIG_DIR);
        fs::create_dir_all(&dir)?;

        let path = Self::file_path(project_root);
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            RiggerError::ConfigParse {
                path: path.clone(),
                message: e.to_string(),
            }
        })?;

        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, &content)?;
        fs::rename(&temp_path, &path)?;

        Ok(())
    }

    /// Delete the persisted state. Returns whether a file was removed.
    pub fn delete(project_root: &Path) -> Result<bool> {
        let path = Self::file_path(project_root);
        if path.exists() {
            fs::remove_file(&path)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
