use std::path::PathBuf;

use crate::errors::LedgerError;
use crate::ledger::{Ledger, CURRENT_SCHEMA_VERSION};

/// Trait that abstracts interaction with the persistence layer.
pub trait StorageBackend: Send + Sync {
    fn snapshot_exists(&self) -> bool;
    fn snapshot_path(&self) -> PathBuf;
    fn load(&self) -> Result<Ledger, LedgerError>;
    fn save(&self, ledger: &Ledger) -> Result<PathBuf, LedgerError>;
    fn backup(&self, ledger: &Ledger, note: Option<&str>) -> Result<PathBuf, LedgerError>;
    fn list_backups(&self) -> Result<Vec<String>, LedgerError>;
    fn restore(&self, backup_name: &str) -> Result<Ledger, LedgerError>;
}

/// How the current ledger came to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Loaded from an existing snapshot.
    Loaded,
    /// No snapshot on disk; seeded with the sample dataset.
    Seeded,
    /// A snapshot existed but could not be read; seeded with sample data.
    FellBack,
}

/// Facade that owns the one shared ledger and coordinates persistence.
///
/// Every view mutates the ledger through this manager, so a change made on
/// one page is visible on all of them.
pub struct LedgerManager {
    current: Ledger,
    storage: Box<dyn StorageBackend>,
    last_outcome: LoadOutcome,
}

impl std::fmt::Debug for LedgerManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LedgerManager")
            .field("current", &self.current)
            .field("last_outcome", &self.last_outcome)
            .finish_non_exhaustive()
    }
}

impl LedgerManager {
    /// Opens the manager, loading the snapshot when present. A missing
    /// snapshot seeds the sample dataset; a malformed one is logged and
    /// swallowed, also falling back to the sample (nothing user-visible).
    /// Only a snapshot from a newer schema is a hard error.
    pub fn open(storage: Box<dyn StorageBackend>) -> Result<Self, LedgerError> {
        let (current, last_outcome) = if storage.snapshot_exists() {
            match storage.load() {
                Ok(ledger) => {
                    ensure_schema_support(&ledger)?;
                    (ledger, LoadOutcome::Loaded)
                }
                Err(err) => {
                    tracing::warn!(
                        path = %storage.snapshot_path().display(),
                        %err,
                        "snapshot unreadable, falling back to sample data"
                    );
                    (Ledger::sample(), LoadOutcome::FellBack)
                }
            }
        } else {
            tracing::info!("no snapshot found, seeding sample data");
            (Ledger::sample(), LoadOutcome::Seeded)
        };
        Ok(Self {
            current,
            storage,
            last_outcome,
        })
    }

    pub fn ledger(&self) -> &Ledger {
        &self.current
    }

    pub fn ledger_mut(&mut self) -> &mut Ledger {
        &mut self.current
    }

    pub fn last_outcome(&self) -> LoadOutcome {
        self.last_outcome
    }

    pub fn snapshot_path(&self) -> PathBuf {
        self.storage.snapshot_path()
    }

    /// Writes the whole-ledger snapshot; last write wins.
    pub fn save(&self) -> Result<PathBuf, LedgerError> {
        let path = self.storage.save(&self.current)?;
        tracing::info!(path = %path.display(), "snapshot saved");
        Ok(path)
    }

    /// Re-reads the snapshot from disk, replacing the in-memory ledger.
    pub fn reload(&mut self) -> Result<(), LedgerError> {
        let ledger = self.storage.load()?;
        ensure_schema_support(&ledger)?;
        self.current = ledger;
        self.last_outcome = LoadOutcome::Loaded;
        Ok(())
    }

    /// Discards all state and reseeds the sample dataset.
    pub fn reset(&mut self) -> Result<PathBuf, LedgerError> {
        self.current = Ledger::sample();
        self.last_outcome = LoadOutcome::Seeded;
        self.save()
    }

    pub fn backup(&self, note: Option<&str>) -> Result<PathBuf, LedgerError> {
        self.storage.backup(&self.current, note)
    }

    pub fn list_backups(&self) -> Result<Vec<String>, LedgerError> {
        self.storage.list_backups()
    }

    pub fn restore(&mut self, backup_name: &str) -> Result<(), LedgerError> {
        let ledger = self.storage.restore(backup_name)?;
        ensure_schema_support(&ledger)?;
        self.current = ledger;
        self.last_outcome = LoadOutcome::Loaded;
        self.save()?;
        Ok(())
    }
}

fn ensure_schema_support(ledger: &Ledger) -> Result<(), LedgerError> {
    if ledger.schema_version > CURRENT_SCHEMA_VERSION {
        return Err(LedgerError::Storage(format!(
            "snapshot schema v{} is newer than supported v{}",
            ledger.schema_version, CURRENT_SCHEMA_VERSION
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::JsonStorage;
    use std::fs;
    use tempfile::tempdir;

    fn manager_in(dir: &std::path::Path) -> LedgerManager {
        let storage = JsonStorage::new(Some(dir.to_path_buf()), None).unwrap();
        LedgerManager::open(Box::new(storage)).unwrap()
    }

    #[test]
    fn missing_snapshot_seeds_sample_data() {
        let temp = tempdir().unwrap();
        let manager = manager_in(temp.path());
        assert_eq!(manager.last_outcome(), LoadOutcome::Seeded);
        assert_eq!(manager.ledger().bills.len(), 7);
    }

    #[test]
    fn save_then_reopen_loads_the_snapshot() {
        let temp = tempdir().unwrap();
        let mut manager = manager_in(temp.path());
        manager.ledger_mut().remove_bill(7);
        manager.save().unwrap();

        let reopened = manager_in(temp.path());
        assert_eq!(reopened.last_outcome(), LoadOutcome::Loaded);
        assert_eq!(reopened.ledger().bills.len(), 6);
    }

    #[test]
    fn corrupt_snapshot_falls_back_to_sample() {
        let temp = tempdir().unwrap();
        let manager = manager_in(temp.path());
        fs::write(manager.snapshot_path(), "{ not json").unwrap();

        let fallen = manager_in(temp.path());
        assert_eq!(fallen.last_outcome(), LoadOutcome::FellBack);
        assert_eq!(fallen.ledger().bills.len(), 7);
    }

    #[test]
    fn rejects_future_schema_versions() {
        let temp = tempdir().unwrap();
        let manager = manager_in(temp.path());
        let mut ledger = Ledger::sample();
        ledger.schema_version = CURRENT_SCHEMA_VERSION + 5;
        fs::write(
            manager.snapshot_path(),
            serde_json::to_string(&ledger).unwrap(),
        )
        .unwrap();

        let storage = JsonStorage::new(Some(temp.path().to_path_buf()), None).unwrap();
        let err = LedgerManager::open(Box::new(storage)).expect_err("future schema must fail");
        match err {
            LedgerError::Storage(message) => {
                assert!(message.contains("newer"), "unexpected error: {message}");
            }
            other => panic!("expected storage error, got {other:?}"),
        }
    }

    #[test]
    fn backup_and_restore_roundtrip() {
        let temp = tempdir().unwrap();
        let mut manager = manager_in(temp.path());
        manager.save().unwrap();
        manager.backup(Some("Before Cleanup")).unwrap();

        manager.ledger_mut().bills.clear();
        manager.save().unwrap();
        assert!(manager.ledger().bills.is_empty());

        let backups = manager.list_backups().unwrap();
        assert!(!backups.is_empty());
        manager.restore(&backups[0]).unwrap();
        assert_eq!(manager.ledger().bills.len(), 7);
    }
}
