//! JSON file-backed participation store

use async_trait::async_trait;
use council_application::{ParticipationStore, StoreError};
use council_domain::ParticipationLedger;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Persists the participation ledger as pretty-printed JSON
///
/// A missing file loads as an empty ledger, so first runs need no setup.
/// Writes go through a sibling temp file and rename, which keeps a crash
/// mid-write from corrupting the ledger.
pub struct FileParticipationStore {
    path: PathBuf,
}

impl FileParticipationStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the platform data directory
    /// (e.g. `~/.local/share/council/participation.json`)
    pub fn at_default_location() -> Option<Self> {
        dirs::data_dir().map(|d| Self::new(d.join("council").join("participation.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ParticipationStore for FileParticipationStore {
    async fn load(&self) -> Result<ParticipationLedger, StoreError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => {
                serde_json::from_str(&contents).map_err(|e| StoreError::Corrupt(e.to_string()))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no participation file yet; starting empty");
                Ok(ParticipationLedger::default())
            }
            Err(e) => Err(StoreError::Io(e.to_string())),
        }
    }

    async fn save(&self, ledger: &ParticipationLedger) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::Io(e.to_string()))?;
        }

        let json = serde_json::to_string_pretty(ledger)
            .map_err(|e| StoreError::Corrupt(e.to_string()))?;

        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json)
            .await
            .map_err(|e| StoreError::Io(e.to_string()))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| StoreError::Io(e.to_string()))?;

        debug!(path = %self.path.display(), "participation ledger saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileParticipationStore::new(dir.path().join("participation.json"));

        let ledger = store.load().await.unwrap();
        assert_eq!(ledger.sessions_recorded, 0);
    }

    #[tokio::test]
    async fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileParticipationStore::new(dir.path().join("nested").join("ledger.json"));

        let mut ledger = store.load().await.unwrap();
        ledger.record_session(&["SecurityEngineer".to_string(), "TechLead".to_string()]);
        store.save(&ledger).await.unwrap();

        let reloaded = store.load().await.unwrap();
        assert_eq!(reloaded.sessions_recorded, 1);
        assert_eq!(reloaded.sessions_for("SecurityEngineer"), 1);
        assert_eq!(reloaded.sessions_for("TechLead"), 1);
    }

    #[tokio::test]
    async fn test_corrupt_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("participation.json");
        std::fs::write(&path, "not json at all").unwrap();

        let store = FileParticipationStore::new(&path);
        let err = store.load().await.unwrap_err();
        assert!(matches!(err, StoreError::Corrupt(_)));
    }
}
