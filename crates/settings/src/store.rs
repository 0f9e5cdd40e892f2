//! Flat settings store — dotted group names holding key/value strings.
//!
//! Group names are full dotted paths (`device.radio.airspy`); the store does
//! not interpret the dots itself, that is the job of the tree views in
//! [`crate::tree`]. All values are stored as text and re-typed on read.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{SettingsError, SettingsResult};

/// Persistent key/value settings grouped by dotted section names.
#[derive(Clone, Debug, Default)]
pub struct SettingsStore {
    groups: BTreeMap<String, BTreeMap<String, String>>,
    path: Option<PathBuf>,
}

impl SettingsStore {
    /// Empty store with no backing file.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from a file, remembering the path for [`save`](Self::save).
    ///
    /// A missing file yields an empty store; an unreadable or malformed file
    /// is logged and also yields an empty store, so a corrupt settings file
    /// never prevents startup.
    pub fn load(path: &Path) -> Self {
        let groups = match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(groups) => {
                    debug!(path = %path.display(), "Loaded settings");
                    groups
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Settings file is malformed, starting fresh");
                    BTreeMap::new()
                }
            },
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    warn!(path = %path.display(), error = %e, "Failed to read settings file");
                }
                BTreeMap::new()
            }
        };

        Self {
            groups,
            path: Some(path.to_path_buf()),
        }
    }

    /// Persist to the path the store was loaded from.
    pub fn save(&self) -> SettingsResult<()> {
        let path = self.path.clone().ok_or(SettingsError::NoPath)?;
        self.save_to(&path)
    }

    /// Persist to an explicit path. The file is written atomically: data
    /// goes to a temporary file in the same directory first, then a rename
    /// replaces the target.
    pub fn save_to(&self, path: &Path) -> SettingsResult<()> {
        let json = serde_json::to_string_pretty(&self.groups)?;
        let temp_path = path.with_extension("json.tmp");

        std::fs::write(&temp_path, json.as_bytes()).map_err(|e| {
            tracing::error!(path = %temp_path.display(), error = %e, "Failed to write settings temp file");
            SettingsError::Io(e)
        })?;

        std::fs::rename(&temp_path, path).map_err(|e| {
            let _ = std::fs::remove_file(&temp_path);
            tracing::error!(
                from = %temp_path.display(),
                to = %path.display(),
                error = %e,
                "Failed to rename settings temp file"
            );
            SettingsError::Io(e)
        })?;

        info!(path = %path.display(), groups = self.groups.len(), "Settings saved");
        Ok(())
    }

    /// Set one value, creating the group as needed.
    pub fn set(&mut self, group: &str, key: &str, value: impl Into<String>) {
        self.groups
            .entry(group.to_owned())
            .or_default()
            .insert(key.to_owned(), value.into());
    }

    /// One value, when both group and key exist.
    pub fn get(&self, group: &str, key: &str) -> Option<&str> {
        self.groups
            .get(group)?
            .get(key)
            .map(String::as_str)
    }

    /// Keys stored directly in a group (no recursion into subgroups).
    pub fn group_keys(&self, group: &str) -> Vec<&str> {
        self.groups
            .get(group)
            .map(|entries| entries.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// All group names, in sorted order.
    pub fn group_names(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    /// Whether the store holds no groups.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Whether [`save`](Self::save) has a file to write to.
    pub fn has_backing_file(&self) -> bool {
        self.path.is_some()
    }
}
