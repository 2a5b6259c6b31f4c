//! Save/load persistence
//!
//! Features:
//! - Versioned JSON envelope
//! - Atomic replace (write tmp, rename over the save)
//! - Backup of the previous save, used when the primary is corrupt

pub mod envelope;

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub use envelope::{Envelope, SaveFile};

use crate::error::PersistenceError;

fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}

/// Path of the backup kept next to `path`
pub fn backup_path(path: &Path) -> PathBuf {
    sibling(path, ".bak")
}

/// Write `value` to `path`, keeping the previous save as a backup
pub fn save_json<T: SaveFile>(path: &Path, value: &T) -> Result<(), PersistenceError> {
    let json = envelope::encode(value)?;
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }

    let tmp = sibling(path, ".tmp");
    fs::write(&tmp, json)?;
    if path.exists() {
        fs::copy(path, backup_path(path))?;
    }
    fs::rename(&tmp, path)?;

    log::info!("Saved {} to {}", T::KIND, path.display());
    Ok(())
}

/// Read a save written by [`save_json`]
pub fn load_json<T: SaveFile>(path: &Path) -> Result<T, PersistenceError> {
    let json = fs::read_to_string(path)?;
    envelope::decode(&json)
}

/// Load `path`, falling back to its backup and then to `T::default()`
///
/// A missing file is the normal first-run case; anything else is logged.
pub fn load_or_default<T: SaveFile + Default>(path: &Path) -> T {
    match load_json(path) {
        Ok(value) => {
            log::info!("Loaded {} from {}", T::KIND, path.display());
            return value;
        }
        Err(PersistenceError::Io(err)) if err.kind() == ErrorKind::NotFound => {
            log::info!("No {} at {}, using defaults", T::KIND, path.display());
            return T::default();
        }
        Err(err) => log::warn!("Failed to load {}: {err}", path.display()),
    }

    let backup = backup_path(path);
    match load_json(&backup) {
        Ok(value) => {
            log::warn!("Recovered {} from {}", T::KIND, backup.display());
            value
        }
        Err(err) => {
            log::warn!("No usable backup ({err}), using default {}", T::KIND);
            T::default()
        }
    }
}
