//! Profile settings — active profile and per-profile plan options.
//!
//! Persisted as `profiles.json` in the data root. Loading never fails: a
//! missing or unreadable file yields defaults, which are written back.

use std::path::PathBuf;

use meowdex_logic::plan::PlanOptions;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::error::StoreResult;
use crate::paths::{self, normalize_profile};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileSettings {
    pub active_profile: u8,
    pub profile1: Option<PlanOptions>,
    pub profile2: Option<PlanOptions>,
    pub profile3: Option<PlanOptions>,
}

impl Default for ProfileSettings {
    fn default() -> Self {
        Self {
            active_profile: 1,
            profile1: Some(PlanOptions::default()),
            profile2: Some(PlanOptions::default()),
            profile3: Some(PlanOptions::default()),
        }
    }
}

impl ProfileSettings {
    /// Valid active profile, every slot filled.
    pub fn normalized(&self) -> Self {
        Self {
            active_profile: normalize_profile(self.active_profile),
            profile1: Some(self.profile1.unwrap_or_default()),
            profile2: Some(self.profile2.unwrap_or_default()),
            profile3: Some(self.profile3.unwrap_or_default()),
        }
    }

    /// Options stored for `profile` (unknown ids read profile 1).
    pub fn options(&self, profile: u8) -> PlanOptions {
        match normalize_profile(profile) {
            2 => self.profile2,
            3 => self.profile3,
            _ => self.profile1,
        }
        .unwrap_or_default()
    }

    pub fn set_options(&mut self, profile: u8, options: PlanOptions) {
        let slot = match normalize_profile(profile) {
            2 => &mut self.profile2,
            3 => &mut self.profile3,
            _ => &mut self.profile1,
        };
        *slot = Some(options);
    }

    pub fn active_options(&self) -> PlanOptions {
        self.options(self.active_profile)
    }
}

/// Persists [`ProfileSettings`]; access is serialized by a mutex.
#[derive(Debug)]
pub struct SettingsStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl SettingsStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            path: paths::settings_path(&root.into()),
            lock: Mutex::new(()),
        }
    }

    pub fn open_default() -> Self {
        Self::new(paths::default_data_root())
    }

    /// Load, normalize and write back. Falls back to defaults when the file
    /// is missing or cannot be parsed.
    pub fn load(&self) -> StoreResult<ProfileSettings> {
        let _guard = self.lock.lock();

        let loaded = match paths::read_json::<ProfileSettings>(&self.path) {
            Ok(Some(settings)) => settings.normalized(),
            Ok(None) => ProfileSettings::default(),
            Err(e) => {
                log::warn!("Settings unreadable, using defaults: {}", e);
                ProfileSettings::default()
            }
        };
        paths::write_json(&self.path, &loaded)?;
        Ok(loaded)
    }

    pub fn save(&self, settings: &ProfileSettings) -> StoreResult<()> {
        let _guard = self.lock.lock();
        paths::write_json(&self.path, &settings.normalized())
    }

    /// Make `profile` active with `options` and persist. Returns the saved state.
    pub fn apply(&self, profile: u8, options: PlanOptions) -> StoreResult<ProfileSettings> {
        let mut settings = self.load()?;
        let profile = normalize_profile(profile);
        settings.active_profile = profile;
        settings.set_options(profile, options);
        self.save(&settings)?;
        log::info!("Applied settings for profile {}: {:?}", profile, options);
        Ok(settings)
    }
}
