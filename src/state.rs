//! Record of the last successfully applied configuration
//!
//! Written after every successful dispatch and read back by `status`,
//! `off`, and `profile save`. Nothing here is required for applying a
//! configuration; an absent or unreadable record just means "nothing
//! known", so loading never fails the caller.

use std::fs;
use std::path::PathBuf;

use tracing::{debug, warn};

use crate::constants::storage;
use crate::error::{Error, Result};
use crate::model::{Configuration, ModeRequest};

/// Handle on the applied-state record, `<config>/predator/state.json`
pub struct StateFile {
    path: PathBuf,
}

impl StateFile {
    pub fn open_default() -> Self {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(storage::APP_DIR);
        path.push(storage::STATE_FILE);
        StateFile { path }
    }

    pub fn at(path: PathBuf) -> Self {
        StateFile { path }
    }

    /// The last applied configuration's record, if one was ever written
    /// and still decodes
    pub fn load(&self) -> Option<ModeRequest> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "no applied state");
                return None;
            }
        };
        match serde_json::from_str(&contents) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "ignoring malformed state file");
                None
            }
        }
    }

    /// Persist `config` as the applied state (atomic replace)
    pub fn save(&self, config: &Configuration) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| Error::Store(format!("create state directory: {e}")))?;
        }
        let record = ModeRequest::from(config);
        let contents = serde_json::to_string_pretty(&record)
            .map_err(|e| Error::Store(format!("encode state: {e}")))?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, contents).map_err(|e| Error::Store(format!("write state: {e}")))?;
        fs::rename(&tmp, &self.path).map_err(|e| Error::Store(format!("replace state: {e}")))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::validate;
    use crate::types::{Brightness, Direction, Speed};
    use tempfile::TempDir;

    fn wave() -> Configuration {
        Configuration::Wave {
            speed: Speed::new(7).unwrap(),
            direction: Direction::RightToLeft,
            brightness: Brightness::new(90).unwrap(),
        }
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let tmp = TempDir::new().unwrap();
        let state = StateFile::at(tmp.path().join("state.json"));
        state.save(&wave()).unwrap();
        let record = state.load().unwrap();
        assert_eq!(validate(&record).unwrap(), wave());
    }

    #[test]
    fn test_load_absent_is_none() {
        let tmp = TempDir::new().unwrap();
        let state = StateFile::at(tmp.path().join("state.json"));
        assert!(state.load().is_none());
    }

    #[test]
    fn test_load_malformed_is_none() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("state.json");
        std::fs::write(&path, b"{ not json").unwrap();
        assert!(StateFile::at(path).load().is_none());
    }

    #[test]
    fn test_save_creates_parent_directory() {
        let tmp = TempDir::new().unwrap();
        let state = StateFile::at(tmp.path().join("predator").join("state.json"));
        state.save(&wave()).unwrap();
        assert!(state.load().is_some());
    }
}
