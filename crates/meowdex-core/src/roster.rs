//! Roster store — profile-scoped cat list persisted as one JSON array.
//!
//! Every operation takes the store's mutex for its whole load/modify/save
//! cycle, so no two operations ever touch the backing file at once. The
//! guard is dropped on every exit path, including `?` returns.
//!
//! Reads hand out clones; stored state is never aliased by callers.

use std::fs;
use std::path::{Path, PathBuf};

use meowdex_logic::cat::CatProfile;
use parking_lot::{Mutex, MutexGuard};

use crate::error::{StoreError, StoreResult};
use crate::paths::{self, normalize_profile};

/// State guarded by the store's mutex.
#[derive(Debug)]
pub(crate) struct RosterState {
    root: PathBuf,
    active_profile: u8,
}

impl RosterState {
    pub(crate) fn path(&self) -> PathBuf {
        paths::roster_path(&self.root, self.active_profile)
    }

    /// Load the active profile's roster. Missing file → empty roster.
    pub(crate) fn load(&self) -> StoreResult<Vec<CatProfile>> {
        let path = self.path();
        self.migrate_legacy(&path)?;
        Ok(paths::read_json(&path)?.unwrap_or_default())
    }

    pub(crate) fn save(&self, cats: &[CatProfile]) -> StoreResult<()> {
        paths::write_json(&self.path(), cats)
    }

    /// Copy the pre-profile roster into profile 1 the first time it is read.
    /// Never overwrites and never removes the legacy file.
    fn migrate_legacy(&self, target: &Path) -> StoreResult<()> {
        if self.active_profile != 1 || target.exists() {
            return Ok(());
        }
        let legacy = paths::legacy_roster_path(&self.root);
        if !legacy.exists() {
            return Ok(());
        }

        paths::ensure_parent(target)?;
        fs::copy(&legacy, target).map_err(|e| StoreError::io(target, e))?;
        log::info!(
            "Migrated legacy roster {} -> {}",
            legacy.display(),
            target.display()
        );
        Ok(())
    }
}

/// Next id after the highest stored one, or 1 for an empty roster.
/// `None` once the highest id is `u32::MAX`.
pub(crate) fn next_id(cats: &[CatProfile]) -> Option<u32> {
    match cats.iter().map(|c| c.id).max() {
        Some(max) => max.checked_add(1),
        None => Some(1),
    }
}

/// Sanitize `inputs`, assign sequential ids, append to `cats`.
/// Returns clones of the created records. `cats` is left untouched when the
/// batch would need an id past `u32::MAX`.
pub(crate) fn append_new(
    cats: &mut Vec<CatProfile>,
    inputs: Vec<CatProfile>,
    path: &Path,
) -> StoreResult<Vec<CatProfile>> {
    if inputs.is_empty() {
        return Ok(Vec::new());
    }
    let first = next_id(cats);
    let last = first.and_then(|id| {
        u32::try_from(inputs.len() - 1)
            .ok()
            .and_then(|extra| id.checked_add(extra))
    });
    let (Some(first), Some(last)) = (first, last) else {
        return Err(StoreError::IdsExhausted {
            path: path.to_path_buf(),
            max_id: cats.iter().map(|c| c.id).max().unwrap_or(0),
        });
    };

    let mut created = Vec::with_capacity(inputs.len());
    for (id, input) in (first..=last).zip(inputs) {
        let cat = input.sanitize().with_id(id);
        created.push(cat.clone());
        cats.push(cat);
    }
    Ok(created)
}

/// Thread-safe roster store. Share it with `Arc<RosterStore>`.
#[derive(Debug)]
pub struct RosterStore {
    state: Mutex<RosterState>,
}

impl RosterStore {
    /// Store rooted at `root`, starting on profile 1.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            state: Mutex::new(RosterState {
                root: root.into(),
                active_profile: 1,
            }),
        }
    }

    /// Store under the platform data directory.
    pub fn open_default() -> Self {
        Self::new(paths::default_data_root())
    }

    pub(crate) fn lock(&self) -> MutexGuard<'_, RosterState> {
        self.state.lock()
    }

    pub fn active_profile(&self) -> u8 {
        self.lock().active_profile
    }

    /// Switch the backing file. Ids outside 1..=3 select profile 1.
    pub fn set_active_profile(&self, profile: u8) {
        let mut state = self.lock();
        state.active_profile = normalize_profile(profile);
        log::info!("Active roster profile set to {}", state.active_profile);
    }

    /// Path of the active profile's roster file.
    pub fn store_path(&self) -> PathBuf {
        self.lock().path()
    }

    /// Every cat, newest id first.
    pub fn list(&self) -> StoreResult<Vec<CatProfile>> {
        let state = self.lock();
        let mut cats = state.load()?;
        cats.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(cats)
    }

    /// Detached copy of the cat with `id`.
    pub fn get(&self, id: u32) -> StoreResult<Option<CatProfile>> {
        let state = self.lock();
        Ok(state.load()?.into_iter().find(|c| c.id == id))
    }

    /// Sanitize and insert one cat with the next free id.
    pub fn add(&self, input: CatProfile) -> StoreResult<CatProfile> {
        let state = self.lock();
        let mut cats = state.load()?;
        let created = append_new(&mut cats, vec![input], &state.path())?;
        state.save(&cats)?;

        let cat = created.into_iter().next().unwrap_or_default();
        log::debug!("Added cat #{} '{}'", cat.id, cat.name);
        Ok(cat)
    }

    /// Sanitize and insert many cats with consecutive ids. Nothing is
    /// written when `inputs` is empty.
    pub fn add_many(&self, inputs: Vec<CatProfile>) -> StoreResult<Vec<CatProfile>> {
        let state = self.lock();
        let mut cats = state.load()?;
        let created = append_new(&mut cats, inputs, &state.path())?;
        if !created.is_empty() {
            state.save(&cats)?;
            log::debug!("Added {} cats", created.len());
        }
        Ok(created)
    }

    /// Replace the cat with `input.id`. `false` if no such cat exists.
    pub fn update(&self, input: CatProfile) -> StoreResult<bool> {
        let state = self.lock();
        let mut cats = state.load()?;
        let Some(slot) = cats.iter_mut().find(|c| c.id == input.id) else {
            log::debug!("Update skipped, no cat #{}", input.id);
            return Ok(false);
        };

        *slot = input.sanitize();
        state.save(&cats)?;
        log::debug!("Updated cat #{}", input.id);
        Ok(true)
    }

    /// Remove the cat with `id`. Unknown ids are a no-op.
    pub fn delete(&self, id: u32) -> StoreResult<()> {
        let state = self.lock();
        let mut cats = state.load()?;
        let before = cats.len();
        cats.retain(|c| c.id != id);
        state.save(&cats)?;
        log::debug!("Deleted cat #{} ({} removed)", id, before - cats.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meowdex_logic::cat::{Gender, Orientation};

    fn store() -> (tempfile::TempDir, RosterStore) {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = RosterStore::new(dir.path());
        (dir, store)
    }

    fn kitten(name: &str) -> CatProfile {
        CatProfile::new(name)
            .with_gender(Gender::Male, Orientation::OppositeOnly)
            .with_base([7, 3, 3, 3, 3, 3, 3])
            .with_current([40; 7])
    }

    #[test]
    fn test_empty_store_lists_nothing() {
        let (_dir, store) = store();
        assert!(store.list().unwrap().is_empty());
        assert!(store.get(1).unwrap().is_none());
    }

    #[test]
    fn test_ids_sequential_from_one() {
        let (_dir, store) = store();
        let a = store.add(kitten("A")).unwrap();
        let b = store.add(kitten("B")).unwrap();
        assert_eq!((a.id, b.id), (1, 2));

        let many = store.add_many(vec![kitten("C"), kitten("D")]).unwrap();
        let ids: Vec<u32> = many.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![3, 4]);
    }

    #[test]
    fn test_caller_id_ignored_on_add() {
        let (_dir, store) = store();
        let created = store.add(kitten("A").with_id(99)).unwrap();
        assert_eq!(created.id, 1);
    }

    #[test]
    fn test_ids_continue_after_max() {
        let (_dir, store) = store();
        store.add_many(vec![kitten("A"), kitten("B"), kitten("C")]).unwrap();
        store.delete(2).unwrap();
        store.delete(3).unwrap();
        assert_eq!(store.add(kitten("D")).unwrap().id, 2);
    }

    #[test]
    fn test_add_after_max_id_is_an_error() {
        let (_dir, store) = store();
        let path = store.store_path();
        paths::write_json(&path, &vec![kitten("Last").with_id(u32::MAX)]).unwrap();

        let err = store.add(kitten("Overflow")).unwrap_err();
        assert!(matches!(err, StoreError::IdsExhausted { max_id: u32::MAX, .. }));
        assert_eq!(err.path(), path.as_path());

        let err = store.add_many(vec![kitten("A"), kitten("B")]).unwrap_err();
        assert!(matches!(err, StoreError::IdsExhausted { .. }));
        assert_eq!(store.list().unwrap().len(), 1);
    }

    #[test]
    fn test_batch_that_would_pass_max_id_adds_nothing() {
        let (_dir, store) = store();
        let path = store.store_path();
        paths::write_json(&path, &vec![kitten("Near").with_id(u32::MAX - 1)]).unwrap();

        assert!(store.add_many(vec![kitten("A"), kitten("B")]).is_err());
        assert_eq!(store.list().unwrap().len(), 1);

        let last = store.add(kitten("Fits")).unwrap();
        assert_eq!(last.id, u32::MAX);
    }

    #[test]
    fn test_list_newest_first() {
        let (_dir, store) = store();
        store.add_many(vec![kitten("A"), kitten("B"), kitten("C")]).unwrap();
        let ids: Vec<u32> = store.list().unwrap().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn test_add_sanitizes() {
        let (_dir, store) = store();
        let raw = CatProfile::new("  Loud  ").with_base([9, 9, -1, 0, 0, 0, 0]);
        let created = store.add(raw).unwrap();
        assert_eq!(created.name, "Loud");
        assert_eq!(created.base.to_array(), [7, 7, 0, 0, 0, 0, 0]);
        assert_eq!(store.get(created.id).unwrap(), Some(created));
    }

    #[test]
    fn test_update_replaces_and_reports_missing() {
        let (_dir, store) = store();
        let mut cat = store.add(kitten("A")).unwrap();
        cat.name = "Renamed ".into();
        cat.current.strength = 500;
        assert!(store.update(cat.clone()).unwrap());

        let stored = store.get(cat.id).unwrap().unwrap();
        assert_eq!(stored.name, "Renamed");
        assert_eq!(stored.current.strength, 99);

        assert!(!store.update(kitten("ghost").with_id(42)).unwrap());
        assert_eq!(store.list().unwrap().len(), 1);
    }

    #[test]
    fn test_delete_unknown_is_noop() {
        let (_dir, store) = store();
        store.add(kitten("A")).unwrap();
        store.delete(77).unwrap();
        assert_eq!(store.list().unwrap().len(), 1);
        store.delete(1).unwrap();
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_reads_are_detached() {
        let (_dir, store) = store();
        let created = store.add(kitten("A")).unwrap();
        let mut copy = store.get(created.id).unwrap().unwrap();
        copy.name = "mutated".into();
        assert_eq!(store.get(created.id).unwrap().unwrap().name, "A");
    }

    #[test]
    fn test_profiles_are_separate() {
        let (_dir, store) = store();
        store.add(kitten("one")).unwrap();
        store.set_active_profile(2);
        assert_eq!(store.active_profile(), 2);
        assert!(store.list().unwrap().is_empty());
        assert_eq!(store.add(kitten("two")).unwrap().id, 1);

        store.set_active_profile(7);
        assert_eq!(store.active_profile(), 1);
        assert_eq!(store.list().unwrap()[0].name, "one");
    }

    #[test]
    fn test_legacy_migration_copies_once() {
        let (dir, store) = store();
        let legacy = paths::legacy_roster_path(dir.path());
        paths::write_json(&legacy, &vec![kitten("Old").with_id(5)]).unwrap();

        let cats = store.list().unwrap();
        assert_eq!(cats.len(), 1);
        assert_eq!(cats[0].id, 5);
        assert!(legacy.exists(), "legacy file must stay");

        // Profile 1 now has its own file; legacy edits no longer leak in.
        paths::write_json(&legacy, &Vec::<CatProfile>::new()).unwrap();
        assert_eq!(store.list().unwrap().len(), 1);
    }

    #[test]
    fn test_legacy_not_migrated_into_other_profiles() {
        let (dir, store) = store();
        let legacy = paths::legacy_roster_path(dir.path());
        paths::write_json(&legacy, &vec![kitten("Old").with_id(1)]).unwrap();

        store.set_active_profile(3);
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_file_surfaces_error() {
        let (_dir, store) = store();
        let path = store.store_path();
        paths::ensure_parent(&path).unwrap();
        fs::write(&path, "[{").unwrap();
        assert!(matches!(store.list(), Err(StoreError::Json { .. })));
        // The lock was released: a later call still runs.
        assert!(store.get(1).is_err());
    }
}
