//! File I/O utilities with atomic writes
//!
//! Provides safe file operations that won't corrupt data on failure.

use std::fs::{self, File};
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};

use crate::error::WalletError;

/// Write bytes to a file atomically (write to temp, sync, then rename)
///
/// The file is either completely written or not modified at all.
pub fn write_atomic<P: AsRef<Path>>(path: P, contents: &[u8]) -> Result<(), WalletError> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            WalletError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Same directory as the target so the rename stays on one filesystem
    let temp_path = temp_path_for(path);

    let mut file = File::create(&temp_path)
        .map_err(|e| WalletError::Storage(format!("Failed to create temp file: {}", e)))?;

    file.write_all(contents)
        .and_then(|_| file.sync_all())
        .map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            WalletError::Storage(format!("Failed to write {}: {}", path.display(), e))
        })?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        WalletError::Storage(format!("Failed to rename temp file: {}", e))
    })?;

    Ok(())
}

/// Read a whole file as UTF-8, failing if it doesn't exist
pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String, WalletError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(WalletError::Storage(format!(
            "File not found: {}",
            path.display()
        )));
    }

    fs::read_to_string(path)
        .map_err(|e| WalletError::Storage(format!("Failed to read {}: {}", path.display(), e)))
}

/// Read JSON from a file, returning a default value if file doesn't exist
pub fn read_json<T, P>(path: P) -> Result<T, WalletError>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        return Ok(T::default());
    }

    let file = File::open(path)
        .map_err(|e| WalletError::Storage(format!("Failed to open {}: {}", path.display(), e)))?;

    serde_json::from_reader(BufReader::new(file))
        .map_err(|e| WalletError::Json(format!("{}: {}", path.display(), e)))
}

/// Write pretty JSON to a file atomically
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), WalletError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let json = serde_json::to_vec_pretty(data)
        .map_err(|e| WalletError::Json(format!("Failed to serialize data: {}", e)))?;
    write_atomic(path, &json)
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
