//! JSON snapshot storage: one file holds the entire ledger, written
//! atomically, with timestamped backups kept alongside under retention.

use chrono::{DateTime, NaiveDateTime, Utc};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::core::ledger_manager::StorageBackend;
use crate::errors::LedgerError;
use crate::ledger::Ledger;

const SNAPSHOT_FILE: &str = "ledger.json";
const BACKUP_DIR: &str = "backups";
const BACKUP_EXTENSION: &str = "json";
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M";
const TMP_SUFFIX: &str = "tmp";
const DEFAULT_RETENTION: usize = 5;

#[derive(Clone)]
pub struct JsonStorage {
    root: PathBuf,
    snapshot_file: PathBuf,
    backups_dir: PathBuf,
    retention: usize,
}

impl JsonStorage {
    /// Opens storage rooted at `root`, or the per-user app directory when
    /// `None`. Directories are created eagerly.
    pub fn new(root: Option<PathBuf>, retention: Option<usize>) -> Result<Self, LedgerError> {
        let app_root = resolve_base(root);
        ensure_dir(&app_root)?;
        let backups_dir = app_root.join(BACKUP_DIR);
        ensure_dir(&backups_dir)?;
        Ok(Self {
            snapshot_file: app_root.join(SNAPSHOT_FILE),
            root: app_root,
            backups_dir,
            retention: retention.unwrap_or(DEFAULT_RETENTION).max(1),
        })
    }

    pub fn new_default() -> Result<Self, LedgerError> {
        Self::new(None, None)
    }

    pub fn base_dir(&self) -> &Path {
        &self.root
    }

    fn write_backup_file(&self, ledger: &Ledger, note: Option<&str>) -> Result<PathBuf, LedgerError> {
        ensure_dir(&self.backups_dir)?;
        let timestamp = Utc::now().format(BACKUP_TIMESTAMP_FORMAT).to_string();
        let mut file_stem = format!("ledger_{}", timestamp);
        if let Some(label) = sanitize_backup_note(note) {
            file_stem.push('_');
            file_stem.push_str(&label);
        }
        let path = self
            .backups_dir
            .join(format!("{}.{}", file_stem, BACKUP_EXTENSION));
        let json = serde_json::to_string_pretty(ledger)?;
        write_atomic(&path, &json)?;
        self.prune_backups()?;
        Ok(path)
    }

    fn backup_existing_snapshot(&self) -> Result<(), LedgerError> {
        if !self.snapshot_file.exists() {
            return Ok(());
        }
        ensure_dir(&self.backups_dir)?;
        let timestamp = Utc::now().format(BACKUP_TIMESTAMP_FORMAT).to_string();
        let backup_path = self
            .backups_dir
            .join(format!("ledger_{}.{}", timestamp, BACKUP_EXTENSION));
        fs::copy(&self.snapshot_file, &backup_path)?;
        self.prune_backups()?;
        Ok(())
    }

    fn prune_backups(&self) -> Result<(), LedgerError> {
        let backups = StorageBackend::list_backups(self)?;
        if backups.len() <= self.retention {
            return Ok(());
        }
        for entry in backups.iter().skip(self.retention) {
            let _ = fs::remove_file(self.backups_dir.join(entry));
        }
        Ok(())
    }
}

impl StorageBackend for JsonStorage {
    fn snapshot_exists(&self) -> bool {
        self.snapshot_file.exists()
    }

    fn snapshot_path(&self) -> PathBuf {
        self.snapshot_file.clone()
    }

    fn load(&self) -> Result<Ledger, LedgerError> {
        let data = fs::read_to_string(&self.snapshot_file)?;
        let ledger: Ledger = serde_json::from_str(&data)?;
        Ok(ledger)
    }

    fn save(&self, ledger: &Ledger) -> Result<PathBuf, LedgerError> {
        self.backup_existing_snapshot()?;
        let json = serde_json::to_string_pretty(ledger)?;
        let tmp = tmp_path(&self.snapshot_file);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.snapshot_file)?;
        Ok(self.snapshot_file.clone())
    }

    fn backup(&self, ledger: &Ledger, note: Option<&str>) -> Result<PathBuf, LedgerError> {
        self.write_backup_file(ledger, note)
    }

    fn list_backups(&self) -> Result<Vec<String>, LedgerError> {
        if !self.backups_dir.exists() {
            return Ok(Vec::new());
        }
        let mut entries = Vec::new();
        for entry in fs::read_dir(&self.backups_dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(BACKUP_EXTENSION) {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|name| name.to_str()) {
                entries.push(name.to_string());
            }
        }
        entries.sort_by(|a, b| parse_backup_timestamp(b).cmp(&parse_backup_timestamp(a)));
        Ok(entries)
    }

    fn restore(&self, backup_name: &str) -> Result<Ledger, LedgerError> {
        let backup_path = self.backups_dir.join(backup_name);
        if !backup_path.exists() {
            return Err(LedgerError::Storage(format!(
                "backup `{}` not found",
                backup_name
            )));
        }
        let data = fs::read_to_string(&backup_path)?;
        let ledger: Ledger = serde_json::from_str(&data)?;
        Ok(ledger)
    }
}

fn resolve_base(root: Option<PathBuf>) -> PathBuf {
    if let Some(base) = root {
        return base;
    }
    dirs::data_dir()
        .map(|dir| dir.join("billkeep"))
        .unwrap_or_else(|| PathBuf::from(".billkeep"))
}

fn ensure_dir(path: &Path) -> Result<(), LedgerError> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

fn sanitize_backup_note(note: Option<&str>) -> Option<String> {
    let raw = note?.trim();
    if raw.is_empty() {
        return None;
    }
    let mut sanitized = String::new();
    let mut last_dash = false;
    for ch in raw.chars() {
        if ch.is_ascii_alphanumeric() {
            sanitized.push(ch.to_ascii_lowercase());
            last_dash = false;
        } else if ch.is_whitespace() || matches!(ch, '-' | '.') {
            if !sanitized.is_empty() && !last_dash {
                sanitized.push('-');
                last_dash = true;
            }
        }
    }
    let trimmed = sanitized.trim_matches('-').to_string();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

fn parse_backup_timestamp(name: &str) -> Option<DateTime<Utc>> {
    let trimmed = name.strip_suffix(".json")?;
    let segments: Vec<&str> = trimmed.split('_').collect();
    if segments.len() < 3 {
        return None;
    }
    let date_part = segments.get(1)?;
    let time_part = segments.get(2)?;
    if !is_digits(date_part, 8) || !is_digits(time_part, 4) {
        return None;
    }
    let raw = format!("{}{}", date_part, time_part);
    NaiveDateTime::parse_from_str(&raw, "%Y%m%d%H%M")
        .ok()
        .map(|naive| DateTime::from_naive_utc_and_offset(naive, Utc))
}

fn is_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.chars().all(|c| c.is_ascii_digit())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), LedgerError> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn storage_with_temp_dir() -> (JsonStorage, TempDir) {
        let temp = TempDir::new().expect("temp dir");
        let storage =
            JsonStorage::new(Some(temp.path().to_path_buf()), Some(3)).expect("json storage");
        (storage, temp)
    }

    #[test]
    fn save_and_load_roundtrip() {
        let (storage, _guard) = storage_with_temp_dir();
        let ledger = Ledger::sample();
        storage.save(&ledger).expect("save snapshot");
        let loaded = storage.load().expect("load snapshot");
        assert_eq!(loaded.name, "Household");
        assert_eq!(loaded.bills.len(), ledger.bills.len());
    }

    #[test]
    fn roundtrip_preserves_dates_to_day_precision() {
        let (storage, _guard) = storage_with_temp_dir();
        let ledger = Ledger::sample();
        storage.save(&ledger).expect("save snapshot");
        let loaded = storage.load().expect("load snapshot");
        for (original, reloaded) in ledger.bills.iter().zip(loaded.bills.iter()) {
            assert_eq!(original.id, reloaded.id);
            assert_eq!(original.due_date, reloaded.due_date);
        }
        let bill = loaded.bill(1).expect("sample bill 1");
        assert_eq!(
            bill.payments[2].date,
            chrono::NaiveDate::from_ymd_opt(2023, 3, 15).unwrap()
        );
    }

    #[test]
    fn dates_serialize_as_iso_strings() {
        let (storage, _guard) = storage_with_temp_dir();
        storage.save(&Ledger::sample()).expect("save snapshot");
        let raw = fs::read_to_string(storage.snapshot_path()).unwrap();
        assert!(raw.contains("\"2023-06-15\""), "due dates should be ISO strings");
    }

    #[test]
    fn backup_writes_timestamped_files() {
        let (storage, _guard) = storage_with_temp_dir();
        let ledger = Ledger::sample();
        storage.save(&ledger).expect("save snapshot");
        let path = storage
            .backup(&ledger, Some("Quarter Close"))
            .expect("create backup");
        let name = path.file_name().and_then(|n| n.to_str()).unwrap();
        assert!(name.starts_with("ledger_"));
        assert!(name.ends_with(".json"));
        assert!(name.contains("quarter-close"));

        let backups = storage.list_backups().expect("list backups");
        assert!(!backups.is_empty());
    }

    #[test]
    fn restore_missing_backup_is_a_storage_error() {
        let (storage, _guard) = storage_with_temp_dir();
        let err = storage.restore("ledger_19990101_0000.json").unwrap_err();
        assert!(matches!(err, LedgerError::Storage(ref m) if m.contains("not found")));
    }
}
