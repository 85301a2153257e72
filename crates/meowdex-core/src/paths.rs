//! File layout under the data root and shared JSON file helpers.
//!
//! ```text
//! <root>/profiles.json          settings (active profile + plan options)
//! <root>/cats.json              legacy roster, before profiles existed
//! <root>/Profile{n}/cats.json   roster of profile n
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use meowdex_logic::constants::PROFILE_COUNT;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{StoreError, StoreResult};

const APP_DIR: &str = "Meowdex";
const ROSTER_FILE: &str = "cats.json";
const SETTINGS_FILE: &str = "profiles.json";

/// Environment variable overriding the data root.
pub const DATA_DIR_ENV: &str = "MEOWDEX_DATA_DIR";

/// Profile ids outside `1..=3` fall back to 1.
pub fn normalize_profile(profile: u8) -> u8 {
    if (1..=PROFILE_COUNT).contains(&profile) {
        profile
    } else {
        1
    }
}

/// Platform data directory joined with the app folder.
pub fn default_data_root() -> PathBuf {
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV) {
        return PathBuf::from(dir);
    }
    let base = std::env::var_os("APPDATA")
        .or_else(|| std::env::var_os("XDG_DATA_HOME"))
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|h| Path::new(&h).join(".local").join("share")))
        .unwrap_or_else(|| PathBuf::from("."));
    base.join(APP_DIR)
}

pub fn roster_path(root: &Path, profile: u8) -> PathBuf {
    root.join(format!("Profile{}", normalize_profile(profile)))
        .join(ROSTER_FILE)
}

pub fn legacy_roster_path(root: &Path) -> PathBuf {
    root.join(ROSTER_FILE)
}

pub fn settings_path(root: &Path) -> PathBuf {
    root.join(SETTINGS_FILE)
}

pub(crate) fn ensure_parent(path: &Path) -> StoreResult<()> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => {
            fs::create_dir_all(dir).map_err(|e| StoreError::io(dir, e))
        }
        _ => Ok(()),
    }
}

/// Read and parse `path`. `Ok(None)` when the file does not exist.
pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> StoreResult<Option<T>> {
    if !path.exists() {
        return Ok(None);
    }
    let bytes = fs::read(path).map_err(|e| StoreError::io(path, e))?;
    let value = serde_json::from_slice(&bytes).map_err(|e| StoreError::json(path, e))?;
    Ok(Some(value))
}

/// Pretty-print `value` to a sibling temp file, then rename it over `path`.
pub(crate) fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> StoreResult<()> {
    ensure_parent(path)?;
    let bytes = serde_json::to_vec_pretty(value).map_err(|e| StoreError::json(path, e))?;

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    fs::write(&tmp, bytes).map_err(|e| StoreError::io(&tmp, e))?;
    fs::rename(&tmp, path).map_err(|e| StoreError::io(path, e))
}
