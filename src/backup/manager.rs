//! Backup manager for BudgetPal
//!
//! Writes snapshots as named JSON artifacts in the backup directory and lists
//! them. Artifact names carry the local creation time down to the
//! millisecond, so sorting names also sorts by age.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{BudgetPalError, BudgetPalResult, CodecError};
use crate::storage::{write_text_atomic, BudgetStore};

use super::snapshot::BackupSnapshot;

/// File name prefix shared by every backup artifact
pub const BACKUP_PREFIX: &str = "budgetpal_backup_";

/// File name suffix shared by every backup artifact
pub const BACKUP_SUFFIX: &str = ".json";

/// Metadata about a backup artifact
#[derive(Debug, Clone, Serialize)]
pub struct BackupInfo {
    /// Backup filename
    pub filename: String,
    /// Full path to backup
    pub path: PathBuf,
    /// Creation time read back from the filename, if it parses
    pub created_at: Option<DateTime<Local>>,
    /// Size in bytes
    pub size_bytes: u64,
}

/// Creates and lists backup artifacts
pub struct BackupManager<'a, S: BudgetStore> {
    store: &'a S,
    backup_dir: PathBuf,
}

impl<'a, S: BudgetStore> BackupManager<'a, S> {
    pub fn new(store: &'a S, backup_dir: PathBuf) -> Self {
        Self { store, backup_dir }
    }

    /// Get backup directory path
    pub fn backup_dir(&self) -> &Path {
        &self.backup_dir
    }

    /// Snapshot the store and write it as a new artifact
    ///
    /// Returns the path to the created backup file.
    pub fn create_backup(&self) -> BudgetPalResult<PathBuf> {
        let snapshot = BackupSnapshot::from_store(self.store)?;
        self.write_snapshot(&snapshot)
    }

    /// Write an already captured snapshot as a new artifact
    pub fn write_snapshot(&self, snapshot: &BackupSnapshot) -> BudgetPalResult<PathBuf> {
        fs::create_dir_all(&self.backup_dir).map_err(|e| {
            BudgetPalError::Io(format!("Failed to create backup directory: {}", e))
        })?;

        let mut stamp = Local::now();
        let mut backup_path = self.backup_dir.join(artifact_name(&stamp));
        // Two backups within the same millisecond would collide
        while backup_path.exists() {
            stamp += Duration::milliseconds(1);
            backup_path = self.backup_dir.join(artifact_name(&stamp));
        }

        write_text_atomic(&backup_path, &snapshot.serialize()?)?;

        info!(
            path = %backup_path.display(),
            transactions = snapshot.transactions.len(),
            budgets = snapshot.budgets.len(),
            "backup created"
        );
        Ok(backup_path)
    }

    /// List all backups, newest first
    pub fn list_backups(&self) -> BudgetPalResult<Vec<BackupInfo>> {
        if !self.backup_dir.exists() {
            return Ok(Vec::new());
        }

        let mut backups = Vec::new();

        for entry in fs::read_dir(&self.backup_dir).map_err(|e| {
            BudgetPalError::Io(format!("Failed to read backup directory: {}", e))
        })? {
            let entry = entry.map_err(|e| {
                BudgetPalError::Io(format!("Failed to read directory entry: {}", e))
            })?;

            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            if let Some(info) = backup_info(&path) {
                backups.push(info);
            }
        }

        backups.sort_by(|a, b| b.filename.cmp(&a.filename));
        debug!(count = backups.len(), "listed backups");

        Ok(backups)
    }

    /// Get a specific backup by filename
    pub fn get_backup(&self, filename: &str) -> BudgetPalResult<BackupInfo> {
        let path = self.backup_dir.join(filename);
        if !path.is_file() {
            return Err(CodecError::ArtifactNotFound(filename.to_string()).into());
        }
        backup_info(&path).ok_or_else(|| CodecError::ArtifactNotFound(filename.to_string()).into())
    }

    /// Get the most recent backup
    pub fn latest(&self) -> BudgetPalResult<Option<BackupInfo>> {
        Ok(self.list_backups()?.into_iter().next())
    }
}

/// Artifact file name for a creation time
pub fn artifact_name<Tz: TimeZone>(stamp: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!(
        "{}{}{}",
        BACKUP_PREFIX,
        stamp.format("%Y-%m-%d_%H-%M-%S-%3f"),
        BACKUP_SUFFIX
    )
}

/// Whether a file name follows the artifact naming convention
pub fn is_backup_name(filename: &str) -> bool {
    filename.len() > BACKUP_PREFIX.len() + BACKUP_SUFFIX.len()
        && filename.starts_with(BACKUP_PREFIX)
        && filename.ends_with(BACKUP_SUFFIX)
}

fn backup_info(path: &Path) -> Option<BackupInfo> {
    let filename = path.file_name()?.to_str()?.to_string();
    if !is_backup_name(&filename) {
        return None;
    }

    let size_bytes = fs::metadata(path).ok()?.len();
    let created_at = filename
        .strip_prefix(BACKUP_PREFIX)
        .and_then(|rest| rest.strip_suffix(BACKUP_SUFFIX))
        .and_then(parse_backup_timestamp);

    Some(BackupInfo {
        filename,
        path: path.to_path_buf(),
        created_at,
        size_bytes,
    })
}

/// Parse `yyyy-MM-dd_HH-mm-ss` with an optional `-SSS` millisecond part
fn parse_backup_timestamp(stamp: &str) -> Option<DateTime<Local>> {
    let (date_part, time_part) = stamp.split_once('_')?;
    let date = NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()?;

    let parts: Vec<&str> = time_part.split('-').collect();
    let (hms, millis) = match parts.as_slice() {
        [h, m, s] => ([*h, *m, *s], 0),
        [h, m, s, ms] if ms.len() == 3 => ([*h, *m, *s], ms.parse().ok()?),
        _ => return None,
    };

    let time = NaiveTime::from_hms_milli_opt(
        hms[0].parse().ok()?,
        hms[1].parse().ok()?,
        hms[2].parse().ok()?,
        millis,
    )?;

    Local
        .from_local_datetime(&NaiveDateTime::new(date, time))
        .earliest()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::BudgetPalPaths;
    use crate::models::{CategorySet, Money, Transaction};
    use crate::storage::Storage;
    use chrono::{Datelike, Timelike, Utc};
    use tempfile::TempDir;

    fn create_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetPalPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths, CategorySet::default()).unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_create_backup() {
        let (_temp, storage) = create_storage();
        storage
            .save_transactions(vec![Transaction::expense(
                Money::from_units(5),
                "Food",
                Utc::now(),
            )])
            .unwrap();
        let manager = BackupManager::new(&storage, storage.paths().backup_dir());

        let backup_path = manager.create_backup().unwrap();
        assert!(backup_path.exists());

        let filename = backup_path.file_name().unwrap().to_str().unwrap();
        assert!(is_backup_name(filename));

        let text = fs::read_to_string(&backup_path).unwrap();
        let snapshot = BackupSnapshot::deserialize(&text).unwrap();
        assert_eq!(snapshot.transactions.len(), 1);
        // One entry per configured expense category
        assert_eq!(
            snapshot.budgets.len(),
            CategorySet::default().expense.len()
        );
    }

    #[test]
    fn test_back_to_back_backups_do_not_collide() {
        let (_temp, storage) = create_storage();
        let manager = BackupManager::new(&storage, storage.paths().backup_dir());

        let first = manager.create_backup().unwrap();
        let second = manager.create_backup().unwrap();
        assert_ne!(first, second);
        assert_eq!(manager.list_backups().unwrap().len(), 2);
    }

    #[test]
    fn test_list_backups_newest_first_and_filtered() {
        let (_temp, storage) = create_storage();
        let dir = storage.paths().backup_dir();
        let manager = BackupManager::new(&storage, dir.clone());

        for name in [
            "budgetpal_backup_2024-01-02_10-00-00-000.json",
            "budgetpal_backup_2024-03-01_09-30-15-250.json",
            "budgetpal_backup_2023-12-31_23-59-59.json",
            "notes.json",
            "budgetpal_backup_2024-05-01.txt",
        ] {
            fs::write(dir.join(name), "{}").unwrap();
        }

        let backups = manager.list_backups().unwrap();
        let names: Vec<&str> = backups.iter().map(|b| b.filename.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "budgetpal_backup_2024-03-01_09-30-15-250.json",
                "budgetpal_backup_2024-01-02_10-00-00-000.json",
                "budgetpal_backup_2023-12-31_23-59-59.json",
            ]
        );

        let latest = manager.latest().unwrap().unwrap();
        assert_eq!(latest.filename, names[0]);
    }

    #[test]
    fn test_empty_backup_dir() {
        let (temp, storage) = create_storage();
        let manager = BackupManager::new(&storage, temp.path().join("missing"));

        assert!(manager.list_backups().unwrap().is_empty());
        assert!(manager.latest().unwrap().is_none());
    }

    #[test]
    fn test_get_backup_missing() {
        let (_temp, storage) = create_storage();
        let manager = BackupManager::new(&storage, storage.paths().backup_dir());

        let err = manager.get_backup("budgetpal_backup_nope.json").unwrap_err();
        assert!(matches!(
            err.as_codec(),
            Some(CodecError::ArtifactNotFound(_))
        ));
    }

    #[test]
    fn test_parse_backup_timestamp() {
        let stamp = parse_backup_timestamp("2025-11-27_14-30-22").unwrap();
        assert_eq!((stamp.year(), stamp.month(), stamp.day()), (2025, 11, 27));
        assert_eq!(stamp.hour(), 14);

        let stamp = parse_backup_timestamp("2025-11-27_14-30-22-456").unwrap();
        assert_eq!(stamp.timestamp_subsec_millis(), 456);

        assert!(parse_backup_timestamp("yesterday").is_none());
    }

    #[test]
    fn test_artifact_name_round_trips() {
        let stamp = Local.with_ymd_and_hms(2024, 6, 5, 8, 7, 6).unwrap()
            + Duration::milliseconds(45);
        let name = artifact_name(&stamp);
        assert_eq!(name, "budgetpal_backup_2024-06-05_08-07-06-045.json");

        let inner = name
            .strip_prefix(BACKUP_PREFIX)
            .and_then(|n| n.strip_suffix(BACKUP_SUFFIX))
            .unwrap();
        assert_eq!(parse_backup_timestamp(inner).unwrap(), stamp);
    }
}
