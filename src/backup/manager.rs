//! Backup manager for netsnap
//!
//! Saves snapshots as `backup_<network>_<YYYYMMDD_HHMMSS>.json` files in the
//! backup directory and lists them newest first.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use tracing::{debug, info, warn};

use crate::error::{NetsnapError, NetsnapResult};
use crate::models::{Snapshot, SnapshotMetadata};
use crate::storage::{read_json_required, write_json_atomic};

const FILENAME_PREFIX: &str = "backup_";
const FILENAME_TIMESTAMP: &str = "%Y%m%d_%H%M%S";

/// A readable backup file
#[derive(Debug, Clone)]
pub struct BackupInfo {
    /// Backup filename
    pub filename: String,
    /// Full path to backup
    pub path: PathBuf,
    /// Capture time encoded in the filename
    pub created_at: NaiveDateTime,
    /// Disambiguator for saves within the same second, 0 for the first
    pub sequence: u32,
    /// Size in bytes
    pub size_bytes: u64,
    /// Snapshot metadata read from the file
    pub metadata: SnapshotMetadata,
}

/// A backup file that could not be listed
#[derive(Debug, Clone)]
pub struct ListingError {
    pub path: PathBuf,
    pub message: String,
}

/// Result of scanning the backup directory
#[derive(Debug, Clone, Default)]
pub struct BackupListing {
    /// Readable backups, newest first
    pub entries: Vec<BackupInfo>,
    /// Files that look like backups but could not be read
    pub errors: Vec<ListingError>,
}

impl BackupListing {
    /// Number of readable backups
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no readable backup exists
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Backup at a 1-based position in the listing
    pub fn get(&self, index: usize) -> NetsnapResult<&BackupInfo> {
        if index == 0 {
            return Err(NetsnapError::Validation(
                "backup numbers start at 1".to_string(),
            ));
        }
        self.entries
            .get(index - 1)
            .ok_or_else(|| NetsnapError::backup_not_found(format!("#{}", index)))
    }

    /// The most recent backup
    pub fn latest(&self) -> Option<&BackupInfo> {
        self.entries.first()
    }
}

/// Manages backup files in one directory
pub struct BackupManager {
    backup_dir: PathBuf,
}

impl BackupManager {
    /// Create a BackupManager; the directory is created on first save
    pub fn new(backup_dir: impl Into<PathBuf>) -> Self {
        Self {
            backup_dir: backup_dir.into(),
        }
    }

    /// Create a BackupManager for a directory that must already exist
    pub fn open(backup_dir: impl Into<PathBuf>) -> NetsnapResult<Self> {
        let backup_dir = backup_dir.into();
        if !backup_dir.is_dir() {
            return Err(NetsnapError::Config(format!(
                "Backup directory {} does not exist; run `netsnap backup` first",
                backup_dir.display()
            )));
        }
        Ok(Self { backup_dir })
    }

    /// Get backup directory path
    pub fn backup_dir(&self) -> &Path {
        &self.backup_dir
    }

    /// Save a snapshot, returning the path of the new file
    ///
    /// The filename carries the snapshot's capture time (current time if the
    /// timestamp cannot be parsed). A save never replaces an existing file:
    /// a second save for the same network within the same second gets a
    /// `_1`, `_2`, ... suffix.
    pub fn save(&self, snapshot: &Snapshot) -> NetsnapResult<PathBuf> {
        fs::create_dir_all(&self.backup_dir).map_err(|e| {
            NetsnapError::Io(format!("Failed to create backup directory: {}", e))
        })?;

        let captured_at = snapshot
            .metadata
            .captured_at()
            .unwrap_or_else(|| Local::now().naive_local());

        let mut sequence = 0;
        let path = loop {
            let candidate = self.backup_dir.join(backup_filename(
                &snapshot.metadata.network_name,
                captured_at,
                sequence,
            ));
            if !candidate.exists() {
                break candidate;
            }
            sequence += 1;
        };

        write_json_atomic(&path, snapshot)?;
        info!("Backup saved to {}", path.display());

        Ok(path)
    }

    /// Load a snapshot file
    pub fn load(&self, path: &Path) -> NetsnapResult<Snapshot> {
        load_snapshot(path)
    }

    /// List all backups, newest first
    ///
    /// Files that are not valid snapshots are reported in `errors` instead of
    /// failing the listing.
    pub fn list_backups(&self) -> NetsnapResult<BackupListing> {
        let mut listing = BackupListing::default();

        let dir = fs::read_dir(&self.backup_dir).map_err(|e| {
            NetsnapError::Io(format!("Failed to read backup directory: {}", e))
        })?;

        for entry in dir {
            let entry = entry.map_err(|e| {
                NetsnapError::Io(format!("Failed to read directory entry: {}", e))
            })?;

            let path = entry.path();
            let filename = match path.file_name() {
                Some(name) => name.to_string_lossy().to_string(),
                None => continue,
            };
            if !filename.starts_with(FILENAME_PREFIX) || !filename.ends_with(".json") {
                debug!("Ignoring {}", path.display());
                continue;
            }

            match self.read_backup_info(&path, filename) {
                Ok(info) => listing.entries.push(info),
                Err(e) => {
                    warn!("Skipping {}: {}", path.display(), e);
                    listing.errors.push(ListingError {
                        path,
                        message: e.to_string(),
                    });
                }
            }
        }

        listing.entries.sort_by(|a, b| {
            (b.created_at, b.sequence, &b.filename).cmp(&(a.created_at, a.sequence, &a.filename))
        });
        listing.errors.sort_by(|a, b| b.path.cmp(&a.path));

        Ok(listing)
    }

    /// Backup at a 1-based position in the newest-first listing
    pub fn get_by_index(&self, index: usize) -> NetsnapResult<BackupInfo> {
        Ok(self.list_backups()?.get(index)?.clone())
    }

    /// The most recent backup
    pub fn latest(&self) -> NetsnapResult<BackupInfo> {
        self.list_backups()?
            .latest()
            .cloned()
            .ok_or_else(|| NetsnapError::backup_not_found("latest"))
    }

    /// Resolve `latest`, a 1-based listing number, a filename in the backup
    /// directory, or a path
    pub fn resolve(&self, identifier: &str) -> NetsnapResult<PathBuf> {
        if identifier.eq_ignore_ascii_case("latest") {
            return Ok(self.latest()?.path);
        }

        if let Ok(index) = identifier.parse::<usize>() {
            return Ok(self.get_by_index(index)?.path);
        }

        let path = PathBuf::from(identifier);
        if path.is_file() {
            return Ok(path);
        }

        let in_dir = self.backup_dir.join(identifier);
        if in_dir.is_file() {
            return Ok(in_dir);
        }

        Err(NetsnapError::backup_not_found(identifier))
    }

    fn read_backup_info(&self, path: &Path, filename: String) -> NetsnapResult<BackupInfo> {
        let (created_at, sequence) = parse_backup_filename(&filename).ok_or_else(|| {
            NetsnapError::snapshot_format(path, "filename does not end in _YYYYMMDD_HHMMSS")
        })?;
        let snapshot = load_snapshot(path)?;
        let size_bytes = fs::metadata(path)?.len();

        Ok(BackupInfo {
            filename,
            path: path.to_path_buf(),
            created_at,
            sequence,
            size_bytes,
            metadata: snapshot.metadata,
        })
    }
}

/// Read and check a snapshot file
pub fn load_snapshot(path: &Path) -> NetsnapResult<Snapshot> {
    let snapshot: Snapshot = read_json_required(path).map_err(|e| match e {
        NetsnapError::Json(message) => NetsnapError::snapshot_format(path, message),
        other => other,
    })?;

    snapshot
        .validate()
        .map_err(|message| NetsnapError::snapshot_format(path, message))?;

    Ok(snapshot)
}

/// Make a network name safe for filenames
///
/// Keeps alphanumerics, spaces, `-` and `_`, trims trailing whitespace, then
/// turns spaces into `_`. Names with nothing left become `network`.
pub fn sanitize_network_name(name: &str) -> String {
    let kept: String = name
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_'))
        .collect();
    let safe = kept.trim_end().replace(' ', "_");
    if safe.is_empty() {
        "network".to_string()
    } else {
        safe
    }
}

/// Filename for a backup of `network_name` captured at `captured_at`
pub fn backup_filename(network_name: &str, captured_at: NaiveDateTime, sequence: u32) -> String {
    let stamp = captured_at.format(FILENAME_TIMESTAMP);
    let safe = sanitize_network_name(network_name);
    if sequence == 0 {
        format!("{}{}_{}.json", FILENAME_PREFIX, safe, stamp)
    } else {
        format!("{}{}_{}_{}.json", FILENAME_PREFIX, safe, stamp, sequence)
    }
}

/// Capture time and disambiguator encoded in a backup filename
fn parse_backup_filename(filename: &str) -> Option<(NaiveDateTime, u32)> {
    let stem = filename
        .strip_prefix(FILENAME_PREFIX)?
        .strip_suffix(".json")?;
    let parts: Vec<&str> = stem.split('_').collect();
    let n = parts.len();

    let digits = |s: &str, len: usize| s.len() == len && s.bytes().all(|b| b.is_ascii_digit());
    let stamp = |date: &str, time: &str| {
        NaiveDateTime::parse_from_str(&format!("{}_{}", date, time), FILENAME_TIMESTAMP).ok()
    };

    if n >= 3
        && digits(parts[n - 3], 8)
        && digits(parts[n - 2], 6)
        && !parts[n - 1].is_empty()
        && parts[n - 1].bytes().all(|b| b.is_ascii_digit())
    {
        let sequence = parts[n - 1].parse().ok()?;
        return Some((stamp(parts[n - 3], parts[n - 2])?, sequence));
    }

    if n >= 2 && digits(parts[n - 2], 8) && digits(parts[n - 1], 6) {
        return Some((stamp(parts[n - 2], parts[n - 1])?, 0));
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{sample_snapshot, snapshot_at};
    use chrono::{Datelike, NaiveDate, Timelike};
    use tempfile::TempDir;

    fn create_test_manager() -> (BackupManager, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let manager = BackupManager::new(temp_dir.path().join("backups"));
        (manager, temp_dir)
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let (manager, _temp) = create_test_manager();
        let snapshot = sample_snapshot();

        let path = manager.save(&snapshot).unwrap();
        let loaded = manager.load(&path).unwrap();

        assert_eq!(loaded, snapshot);
    }

    #[test]
    fn test_filename_from_capture_time() {
        let (manager, _temp) = create_test_manager();

        let path = manager.save(&sample_snapshot()).unwrap();

        assert_eq!(
            path.file_name().unwrap().to_string_lossy(),
            "backup_Chicago_Branch_Office_20251127_143022.json"
        );
    }

    #[test]
    fn test_sanitize_network_name() {
        assert_eq!(sanitize_network_name("Branch Office #2 "), "Branch_Office_2");
        assert_eq!(sanitize_network_name("HQ/Main: (east)"), "HQMain_east");
        assert_eq!(sanitize_network_name("lab-01_core"), "lab-01_core");
        assert_eq!(sanitize_network_name("???"), "network");
    }

    #[test]
    fn test_same_second_saves_do_not_overwrite() {
        let (manager, _temp) = create_test_manager();
        let snapshot = sample_snapshot();

        let first = manager.save(&snapshot).unwrap();
        let second = manager.save(&snapshot).unwrap();
        let third = manager.save(&snapshot).unwrap();

        assert_ne!(first, second);
        assert!(second.to_string_lossy().ends_with("_143022_1.json"));
        assert!(third.to_string_lossy().ends_with("_143022_2.json"));

        let listing = manager.list_backups().unwrap();
        assert_eq!(listing.len(), 3);
        assert_eq!(listing.entries[0].path, third);
        assert_eq!(listing.entries[2].path, first);
    }

    #[test]
    fn test_listing_is_newest_first_regardless_of_creation_order() {
        let (manager, _temp) = create_test_manager();

        for (ts, name) in [
            ("2025-03-01T09:00:00", "Zeta Site"),
            ("2025-05-01T09:00:00", "Alpha Site"),
            ("2025-01-01T09:00:00", "Mid Site"),
            ("2025-04-01T09:00:00", "Alpha Site"),
        ] {
            manager.save(&snapshot_at(ts, name)).unwrap();
        }

        let listing = manager.list_backups().unwrap();
        let months: Vec<u32> = listing.entries.iter().map(|b| b.created_at.month()).collect();
        assert_eq!(months, vec![5, 4, 3, 1]);
        assert!(listing
            .entries
            .windows(2)
            .all(|w| w[0].created_at > w[1].created_at));
    }

    #[test]
    fn test_corrupt_files_are_reported_not_fatal() {
        let (manager, _temp) = create_test_manager();
        manager.save(&sample_snapshot()).unwrap();

        let dir = manager.backup_dir().to_path_buf();
        fs::write(dir.join("backup_Broken_20250101_000000.json"), "{\"metadata\": {").unwrap();
        fs::write(
            dir.join("backup_NoMeta_20250102_000000.json"),
            r#"{"appliance": {"vlans": []}}"#,
        )
        .unwrap();
        fs::write(dir.join("notes.txt"), "not a backup").unwrap();

        let listing = manager.list_backups().unwrap();

        assert_eq!(listing.len(), 1);
        assert_eq!(listing.errors.len(), 2);
        assert!(listing
            .errors
            .iter()
            .all(|e| e.message.starts_with("Invalid snapshot file")));
    }

    #[test]
    fn test_load_missing_metadata_is_format_error() {
        let (manager, _temp) = create_test_manager();
        fs::create_dir_all(manager.backup_dir()).unwrap();
        let path = manager.backup_dir().join("backup_x_20250101_000000.json");
        fs::write(
            &path,
            r#"{"metadata": {"timestamp": "2025-01-01T00:00:00", "network_name": "x", "backup_version": "1.0"}}"#,
        )
        .unwrap();

        let err = manager.load(&path).unwrap_err();
        assert!(matches!(err, NetsnapError::SnapshotFormat { .. }));
    }

    #[test]
    fn test_open_missing_directory_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let err = BackupManager::open(temp_dir.path().join("nope"))
            .err()
            .unwrap();
        assert!(err.is_config());
    }

    #[test]
    fn test_resolve_identifiers() {
        let (manager, _temp) = create_test_manager();
        let older = manager
            .save(&snapshot_at("2025-01-01T08:00:00", "Site"))
            .unwrap();
        let newer = manager
            .save(&snapshot_at("2025-02-01T08:00:00", "Site"))
            .unwrap();

        assert_eq!(manager.resolve("latest").unwrap(), newer);
        assert_eq!(manager.resolve("2").unwrap(), older);
        assert_eq!(
            manager
                .resolve("backup_Site_20250101_080000.json")
                .unwrap(),
            older
        );
        assert!(manager.resolve("3").unwrap_err().is_not_found());
        assert!(manager.resolve("0").is_err());
    }

    #[test]
    fn test_parse_backup_filename() {
        let (ts, seq) = parse_backup_filename("backup_Branch_Office_20251127_143022.json").unwrap();
        assert_eq!(ts.date(), NaiveDate::from_ymd_opt(2025, 11, 27).unwrap());
        assert_eq!(ts.hour(), 14);
        assert_eq!(seq, 0);

        let (_, seq) = parse_backup_filename("backup_Site_20251127_143022_12.json").unwrap();
        assert_eq!(seq, 12);

        assert!(parse_backup_filename("backup_Site.json").is_none());
        assert!(parse_backup_filename("backup_Site_20251399_143022.json").is_none());
    }
}
