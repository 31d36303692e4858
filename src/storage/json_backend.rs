use std::{
    fs::{self, File},
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};

use serde_json::Value;

use crate::ledger::Transaction;

use super::{LoadedRecords, Result, StorageBackend, StorageError};

const TMP_SUFFIX: &str = "tmp";
const CORRUPT_SUFFIX: &str = "corrupt";

/// Stores the transaction list as a pretty-printed JSON array in a single file.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    path: PathBuf,
}

impl JsonStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Copies an unreadable data file aside so a later save cannot destroy it.
    fn preserve_corrupt(&self, source: serde_json::Error) -> StorageError {
        let backup = with_suffix(&self.path, CORRUPT_SUFFIX);
        match fs::copy(&self.path, &backup) {
            Ok(_) => {
                tracing::warn!(
                    source = %self.path.display(),
                    backup = %backup.display(),
                    error = %source,
                    "data file unreadable, copy preserved"
                );
                StorageError::Corrupt { backup, source }
            }
            Err(err) => err.into(),
        }
    }
}

impl StorageBackend for JsonStorage {
    /// Decodes each array element on its own; undecodable elements are skipped.
    fn load(&self) -> Result<LoadedRecords> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(StorageError::Missing(self.path.clone()))
            }
            Err(err) => return Err(err.into()),
        };
        let values: Vec<Value> = match serde_json::from_str(&data) {
            Ok(values) => values,
            Err(source) => return Err(self.preserve_corrupt(source)),
        };

        let mut loaded = LoadedRecords::default();
        for (index, value) in values.into_iter().enumerate() {
            match serde_json::from_value::<Transaction>(value) {
                Ok(record) => loaded.records.push(record),
                Err(err) => loaded
                    .skipped
                    .push(format!("skipped stored record #{}: {err}", index + 1)),
            }
        }
        Ok(loaded)
    }

    fn save(&self, transactions: &[Transaction]) -> Result<()> {
        let json = serde_json::to_string_pretty(transactions)?;
        replace_file(&self.path, &json)?;
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

pub(crate) fn ensure_dir(path: &Path) -> std::io::Result<()> {
    if path.as_os_str().is_empty() {
        return Ok(());
    }
    fs::create_dir_all(path)
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut out = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, suffix),
        None => suffix.to_string(),
    };
    out.set_extension(ext);
    out
}

pub(crate) fn tmp_path(path: &Path) -> PathBuf {
    with_suffix(path, TMP_SUFFIX)
}

fn write_atomic(path: &Path, data: &str) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    file.sync_all()?;
    Ok(())
}

/// Writes `data` to a sibling tmp file and renames it over `path`.
///
/// On failure the tmp file is removed and `path` keeps its previous contents.
pub(crate) fn replace_file(path: &Path, data: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let tmp = tmp_path(path);
    let result = write_atomic(&tmp, data).and_then(|()| fs::rename(&tmp, path));
    if result.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    result
}
