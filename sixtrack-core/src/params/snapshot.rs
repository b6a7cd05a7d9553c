use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::ParamStore;

const SNAPSHOT_VERSION: u32 = 1;

/// Flat name -> value capture of every parameter in a store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: u32,
    pub values: BTreeMap<String, i32>,
}

impl Snapshot {
    pub fn capture(store: &ParamStore) -> Self {
        let values = store
            .specs()
            .map(|(id, spec)| (spec.name.clone(), store.value(id)))
            .collect();
        Self {
            version: SNAPSHOT_VERSION,
            values,
        }
    }

    /// Write every known value back into the store. Unknown names are skipped
    /// and values are clamped by the store. Returns the number of parameters
    /// whose value changed.
    pub fn restore(&self, store: &ParamStore) -> usize {
        let mut changed = 0;
        for (name, value) in &self.values {
            match store.param_id(name) {
                Some(id) => {
                    if store.set_value(id, *value) {
                        changed += 1;
                    }
                }
                None => log::debug!("snapshot: skipping unknown parameter '{}'", name),
            }
        }
        changed
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        // Serializing a map of strings and integers cannot fail.
        serde_json::to_vec_pretty(self).unwrap_or_default()
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, String> {
        serde_json::from_slice(bytes).map_err(|e| format!("Invalid snapshot: {}", e))
    }
}

/// Default snapshot location under the user's data directory.
pub fn default_state_path() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("sixtrack").join("state.json"))
        .unwrap_or_else(|| PathBuf::from("sixtrack-state.json"))
}

pub fn save_to_path(store: &ParamStore, path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {}", parent.display(), e))?;
        }
    }
    let snapshot = Snapshot::capture(store);
    std::fs::write(path, snapshot.to_bytes())
        .map_err(|e| format!("Failed to write {}: {}", path.display(), e))?;
    log::info!("saved {} parameters to {}", snapshot.values.len(), path.display());
    Ok(())
}

pub fn load_from_path(store: &ParamStore, path: &Path) -> Result<usize, String> {
    let bytes = std::fs::read(path).map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    let snapshot = Snapshot::from_bytes(&bytes)?;
    if snapshot.version > SNAPSHOT_VERSION {
        return Err(format!(
            "Snapshot version {} is newer than supported version {}",
            snapshot.version, SNAPSHOT_VERSION
        ));
    }
    let changed = snapshot.restore(store);
    log::info!("restored {} changed parameters from {}", changed, path.display());
    Ok(changed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_contains_every_parameter() {
        let store = ParamStore::with_default_layout();
        let snapshot = Snapshot::capture(&store);
        assert_eq!(snapshot.values.len(), store.len());
        assert_eq!(snapshot.values.get("reverbSizeGlobal"), Some(&64));
    }

    #[test]
    fn restore_skips_unknown_and_clamps() {
        let store = ParamStore::with_default_layout();
        let mut values = BTreeMap::new();
        values.insert("t1_pitch".to_string(), 400);
        values.insert("legacyParam".to_string(), 3);
        let snapshot = Snapshot { version: 1, values };

        assert_eq!(snapshot.restore(&store), 1);
        assert_eq!(store.value_of("t1_pitch"), Some(24));
    }

    #[test]
    fn save_and_load_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("state.json");

        let store = ParamStore::with_default_layout();
        store.set_value_by_name("t5_machine", 4);
        store.set_value_by_name("delayTimeSyncEnabled", 1);
        save_to_path(&store, &path).unwrap();

        let fresh = ParamStore::with_default_layout();
        assert_eq!(load_from_path(&fresh, &path).unwrap(), 2);
        assert_eq!(fresh.value_of("t5_machine"), Some(4));
        assert!(fresh.flag_of("delayTimeSyncEnabled"));
    }

    #[test]
    fn load_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, b"<PARAMS/>").unwrap();

        let store = ParamStore::with_default_layout();
        let err = load_from_path(&store, &path).unwrap_err();
        assert!(err.starts_with("Invalid snapshot"));
    }

    #[test]
    fn load_rejects_newer_version() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, br#"{"version": 99, "values": {}}"#).unwrap();

        let store = ParamStore::with_default_layout();
        assert!(load_from_path(&store, &path).is_err());
    }

    #[test]
    fn load_missing_file_errors() {
        let store = ParamStore::with_default_layout();
        let err = load_from_path(&store, Path::new("/nonexistent/sixtrack/state.json")).unwrap_err();
        assert!(err.starts_with("Failed to read"));
    }
}
