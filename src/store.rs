//! Durable keyed storage for named profiles
//!
//! One JSON record per profile under the user config directory, the same
//! layout the desktop GUI uses, so profiles are shared between front ends.
//! Writes go through a temporary sibling and a rename, so a reader never
//! observes a partially written record.

use std::fs;
use std::path::PathBuf;

use tracing::info;

use crate::constants::storage;
use crate::error::{Error, Result};
use crate::model::{Configuration, ModeRequest};

/// Keyed profile records on disk: list, get, put (create-or-replace), delete
pub struct ProfileStore {
    dir: PathBuf,
}

impl ProfileStore {
    /// Store at the conventional location, `<config>/predator/saved profiles`
    pub fn open_default() -> Self {
        let mut dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        dir.push(storage::APP_DIR);
        dir.push(storage::PROFILE_DIR);
        ProfileStore { dir }
    }

    /// Store rooted at an explicit directory
    pub fn at(dir: PathBuf) -> Self {
        ProfileStore { dir }
    }

    /// All profile names, lexicographic
    pub fn list(&self) -> Result<Vec<String>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            // A store nobody has written to yet is just empty
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(store_error("read profile directory", e)),
        };
        let mut names = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| store_error("read profile directory", e))?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(storage::PROFILE_EXT) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    /// The stored record for `name`, undecoded beyond its raw shape;
    /// validation happens at the caller so a bad record reports precisely
    pub fn get(&self, name: &str) -> Result<ModeRequest> {
        let path = self.record_path(name)?;
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::NotFound(name.to_string()));
            }
            Err(e) => return Err(store_error("read profile", e)),
        };
        serde_json::from_str(&contents)
            .map_err(|e| Error::Store(format!("profile '{name}' is malformed: {e}")))
    }

    /// Create or silently replace the record for `name` (last write wins)
    pub fn put(&self, name: &str, config: &Configuration) -> Result<()> {
        let path = self.record_path(name)?;
        fs::create_dir_all(&self.dir).map_err(|e| store_error("create profile directory", e))?;

        let record = ModeRequest::from(config);
        let contents = serde_json::to_string_pretty(&record)
            .map_err(|e| Error::Store(format!("encode profile '{name}': {e}")))?;

        // Atomic replace: the record appears complete or not at all
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, contents).map_err(|e| store_error("write profile", e))?;
        fs::rename(&tmp, &path).map_err(|e| store_error("replace profile", e))?;

        info!(profile = %name, path = %path.display(), "saved profile");
        Ok(())
    }

    /// Remove the record for `name`
    pub fn delete(&self, name: &str) -> Result<()> {
        let path = self.record_path(name)?;
        match fs::remove_file(&path) {
            Ok(()) => {
                info!(profile = %name, "deleted profile");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(Error::NotFound(name.to_string()))
            }
            Err(e) => Err(store_error("delete profile", e)),
        }
    }

    /// Validated path of a profile record; names become file names, so
    /// anything that could escape the store directory is rejected
    fn record_path(&self, name: &str) -> Result<PathBuf> {
        if name.is_empty() {
            return Err(Error::invalid("name", "profile name cannot be empty"));
        }
        if name.len() > storage::MAX_PROFILE_NAME_LEN {
            return Err(Error::invalid(
                "name",
                format!("profile name longer than {} bytes", storage::MAX_PROFILE_NAME_LEN),
            ));
        }
        if name.contains(['/', '\\']) || name.contains("..") || name.starts_with('.') {
            return Err(Error::invalid(
                "name",
                format!("'{name}' is not a usable profile name"),
            ));
        }
        Ok(self.dir.join(format!("{name}.{}", storage::PROFILE_EXT)))
    }
}

fn store_error(what: &str, e: std::io::Error) -> Error {
    Error::Store(format!("{what}: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::validate;
    use crate::types::{Brightness, Color, Speed, Zone};
    use tempfile::TempDir;

    fn store() -> (TempDir, ProfileStore) {
        let tmp = TempDir::new().unwrap();
        let store = ProfileStore::at(tmp.path().join("saved profiles"));
        (tmp, store)
    }

    fn green_static() -> Configuration {
        Configuration::Static {
            zones: vec![(Zone::new(1).unwrap(), Color::ACER_GREEN)],
            brightness: Brightness::default(),
        }
    }

    fn red_breath() -> Configuration {
        Configuration::Breath {
            color: "ff0000".parse().unwrap(),
            speed: Speed::new(7).unwrap(),
            brightness: Brightness::new(90).unwrap(),
        }
    }

    #[test]
    fn test_put_then_get_round_trips() {
        let (_tmp, store) = store();
        store.put("gaming", &green_static()).unwrap();
        let record = store.get("gaming").unwrap();
        assert_eq!(validate(&record).unwrap(), green_static());
    }

    #[test]
    fn test_put_overwrites_existing_name() {
        let (_tmp, store) = store();
        store.put("gaming", &green_static()).unwrap();
        store.put("gaming", &red_breath()).unwrap();
        let record = store.get("gaming").unwrap();
        assert_eq!(validate(&record).unwrap(), red_breath());
        assert_eq!(store.list().unwrap(), vec!["gaming"]);
    }

    #[test]
    fn test_get_absent_is_not_found() {
        let (_tmp, store) = store();
        assert!(matches!(store.get("ghost"), Err(Error::NotFound(_))));
    }

    #[test]
    fn test_delete_absent_is_not_found() {
        let (_tmp, store) = store();
        assert!(matches!(store.delete("ghost"), Err(Error::NotFound(_))));
    }

    #[test]
    fn test_delete_then_get_is_not_found() {
        let (_tmp, store) = store();
        store.put("gaming", &green_static()).unwrap();
        store.delete("gaming").unwrap();
        assert!(matches!(store.get("gaming"), Err(Error::NotFound(_))));
    }

    #[test]
    fn test_list_is_lexicographic() {
        let (_tmp, store) = store();
        for name in ["zoom-time", "alpha", "Mid"] {
            store.put(name, &green_static()).unwrap();
        }
        assert_eq!(store.list().unwrap(), vec!["Mid", "alpha", "zoom-time"]);
    }

    #[test]
    fn test_list_empty_store() {
        let (_tmp, store) = store();
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_list_ignores_foreign_files() {
        let (_tmp, store) = store();
        store.put("real", &green_static()).unwrap();
        std::fs::write(store.dir.join("notes.txt"), b"not a profile").unwrap();
        assert_eq!(store.list().unwrap(), vec!["real"]);
    }

    #[test]
    fn test_rejected_names() {
        let (_tmp, store) = store();
        for name in ["", "a/b", "a\\b", "..", "x..y", ".hidden"] {
            assert!(
                matches!(
                    store.put(name, &green_static()),
                    Err(Error::InvalidParameter { field: "name", .. })
                ),
                "name {name:?} should be rejected"
            );
        }
        let long = "x".repeat(storage::MAX_PROFILE_NAME_LEN + 1);
        assert!(store.put(&long, &green_static()).is_err());
    }

    #[test]
    fn test_no_temporary_file_left_behind() {
        let (_tmp, store) = store();
        store.put("gaming", &green_static()).unwrap();
        let leftovers: Vec<_> = std::fs::read_dir(&store.dir)
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().and_then(|x| x.to_str()) == Some("tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }
}
