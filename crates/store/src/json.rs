use exposure_core::PersistentRiskState;
use exposure_ports::{RiskStore, StoreError, StoreResult};
use log::{debug, warn};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Risk state persisted as a JSON file
///
/// A missing file loads as the fresh-install default. Writes go to a
/// sibling temp file first and are renamed into place, so a failed write
/// leaves the previous state intact.
pub struct JsonFileRiskStore {
    path: PathBuf,
    // Serializes writers within this process
    write_lock: Mutex<()>,
}

impl JsonFileRiskStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, error: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.display().to_string(),
            error: error.to_string(),
        }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl RiskStore for JsonFileRiskStore {
    fn load(&self) -> StoreResult<PersistentRiskState> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("[STORE] No risk state at {}, using defaults", self.path.display());
                return Ok(PersistentRiskState::default());
            }
            Err(e) => return Err(self.io_error(e)),
        };

        serde_json::from_str(&content).map_err(|e| {
            warn!("[STORE] Corrupt risk state at {}: {}", self.path.display(), e);
            StoreError::Corrupt(e.to_string())
        })
    }

    fn save(&self, state: &PersistentRiskState) -> StoreResult<()> {
        let json =
            serde_json::to_string_pretty(state).map_err(|e| StoreError::Corrupt(e.to_string()))?;

        let _guard = self.write_lock.lock().unwrap_or_else(|p| p.into_inner());
        let temp = self.temp_path();
        std::fs::write(&temp, json).map_err(|e| self.io_error(e))?;
        std::fs::rename(&temp, &self.path).map_err(|e| self.io_error(e))?;

        debug!(
            "[STORE] Saved risk state {} to {}",
            state.last_risk_level,
            self.path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use exposure_core::RiskLevel;
    use uuid::Uuid;

    fn temp_file() -> PathBuf {
        std::env::temp_dir().join(format!("exposure-risk-{}.json", Uuid::new_v4()))
    }

    #[test]
    fn test_missing_file_loads_defaults() {
        let store = JsonFileRiskStore::new(temp_file());
        assert_eq!(store.load().unwrap(), PersistentRiskState::default());
    }

    #[test]
    fn test_save_then_load() {
        let path = temp_file();
        let store = JsonFileRiskStore::new(&path);

        let mut state = PersistentRiskState::default();
        state.record_success(
            RiskLevel::High,
            Utc.with_ymd_and_hms(2020, 6, 16, 8, 30, 0).unwrap(),
        );
        store.save(&state).unwrap();

        // A second store instance sees the persisted state
        let reopened = JsonFileRiskStore::new(&path);
        assert_eq!(reopened.load().unwrap(), state);

        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_corrupt_file() {
        let path = temp_file();
        std::fs::write(&path, "{ not json").unwrap();

        let store = JsonFileRiskStore::new(&path);
        assert!(matches!(store.load(), Err(StoreError::Corrupt(_))));

        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_unwritable_location() {
        let store = JsonFileRiskStore::new(temp_file().join("nested").join("state.json"));
        let result = store.save(&PersistentRiskState::default());
        assert!(matches!(result, Err(StoreError::Io { .. })));
    }
}
