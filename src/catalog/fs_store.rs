//! Filesystem-backed asset store.
//!
//! Prefabs are `*.prefab` files anywhere under the store root. A prefab is
//! previewable when a sibling image with the same stem exists
//! (`Chair.prefab` + `Chair.png`). Rename, duplicate and delete move the
//! preview together with the prefab.

use bevy::log::{debug, info, warn};
use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};

use super::error::{CatalogError, CatalogResult};
use super::record::AssetRecord;
use super::store::{
    copy_name_candidates, validate_name, AssetStore, DestroyConfirmation, DialogConfirmation,
    COPY_SUFFIX,
};

pub const PREFAB_EXTENSION: &str = "prefab";
pub const PREVIEW_EXTENSION: &str = "png";

pub struct FsAssetStore {
    root: PathBuf,
    confirmation: Box<dyn DestroyConfirmation>,
}

impl FsAssetStore {
    /// Store rooted at `root`, confirming deletes with a native dialog.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_confirmation(root, Box::new(DialogConfirmation))
    }

    pub fn with_confirmation(
        root: impl Into<PathBuf>,
        confirmation: Box<dyn DestroyConfirmation>,
    ) -> Self {
        Self {
            root: root.into(),
            confirmation,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Path of the preview image that belongs to a prefab.
pub fn preview_path_for(prefab: &Path) -> PathBuf {
    prefab.with_extension(PREVIEW_EXTENSION)
}

fn is_prefab_file(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case(PREFAB_EXTENSION))
            .unwrap_or(false)
}

fn prefab_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{}.{}", name, PREFAB_EXTENSION))
}

/// Recursively collect prefab files in path order.
fn collect_prefabs(dir: &Path, out: &mut Vec<PathBuf>) -> std::io::Result<()> {
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
        .flatten()
        .map(|entry| entry.path())
        .collect();
    entries.sort();

    for path in entries {
        if path.is_dir() {
            // An unreadable subfolder hides its contents but does not fail the listing
            if let Err(e) = collect_prefabs(&path, out) {
                warn!("Skipping unreadable folder {:?}: {}", path, e);
            }
        } else if is_prefab_file(&path) {
            out.push(path);
        }
    }
    Ok(())
}

/// First free `<base>_Copy` / `<base>_Copy N` prefab path in `dir`.
///
/// A candidate is taken when either the prefab or its preview already exists.
pub fn unique_copy_path(dir: &Path, base: &str) -> Option<PathBuf> {
    copy_name_candidates(base)
        .map(|name| prefab_path(dir, &name))
        .find(|candidate| !candidate.exists() && !preview_path_for(candidate).exists())
}

impl AssetStore for FsAssetStore {
    fn list_previewable_assets(&self) -> CatalogResult<Vec<AssetRecord>> {
        let mut prefabs = Vec::new();
        collect_prefabs(&self.root, &mut prefabs).map_err(|source| {
            CatalogError::StoreUnavailable {
                root: self.root.clone(),
                source,
            }
        })?;

        let mut records = Vec::with_capacity(prefabs.len());
        for path in prefabs {
            let preview = preview_path_for(&path);
            if !preview.is_file() {
                continue;
            }

            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                warn!("Skipping prefab with non UTF-8 name: {:?}", path);
                continue;
            };

            let last_modified = match std::fs::metadata(&path).and_then(|m| m.modified()) {
                Ok(time) => DateTime::<Local>::from(time),
                Err(e) => {
                    warn!("Skipping prefab {:?}: {}", path, e);
                    continue;
                }
            };

            records.push(AssetRecord {
                name: name.to_string(),
                path,
                last_modified,
                preview,
            });
        }

        debug!(
            "Listed {} previewable prefabs under {:?}",
            records.len(),
            self.root
        );
        Ok(records)
    }

    fn rename(&mut self, path: &Path, new_name: &str) -> CatalogResult<PathBuf> {
        let new_name = validate_name(new_name)?;
        if !path.is_file() {
            return Err(CatalogError::NotFound(path.to_path_buf()));
        }
        let parent = path
            .parent()
            .ok_or_else(|| CatalogError::NotFound(path.to_path_buf()))?;

        let new_path = prefab_path(parent, new_name);
        if new_path == path {
            return Ok(new_path);
        }

        let old_preview = preview_path_for(path);
        let new_preview = preview_path_for(&new_path);
        if new_path.exists() || new_preview.exists() {
            return Err(CatalogError::NameConflict(new_name.to_string()));
        }

        std::fs::rename(path, &new_path).map_err(|source| CatalogError::WriteFailed {
            path: new_path.clone(),
            source,
        })?;

        if old_preview.exists()
            && let Err(source) = std::fs::rename(&old_preview, &new_preview)
        {
            // Put the prefab back so it keeps its preview
            if let Err(e) = std::fs::rename(&new_path, path) {
                warn!("Failed to restore {:?} after preview rename failure: {}", path, e);
            }
            return Err(CatalogError::WriteFailed {
                path: new_preview,
                source,
            });
        }

        info!("Renamed prefab: {:?} -> {:?}", path, new_path);
        Ok(new_path)
    }

    fn duplicate(&mut self, path: &Path) -> CatalogResult<PathBuf> {
        if !path.is_file() {
            return Err(CatalogError::NotFound(path.to_path_buf()));
        }
        let parent = path
            .parent()
            .ok_or_else(|| CatalogError::NotFound(path.to_path_buf()))?;
        let base = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| CatalogError::NotFound(path.to_path_buf()))?;

        let new_path = unique_copy_path(parent, base)
            .ok_or_else(|| CatalogError::NameConflict(format!("{}{}", base, COPY_SUFFIX)))?;

        std::fs::copy(path, &new_path).map_err(|source| CatalogError::WriteFailed {
            path: new_path.clone(),
            source,
        })?;

        let preview = preview_path_for(path);
        if preview.is_file() {
            let new_preview = preview_path_for(&new_path);
            if let Err(source) = std::fs::copy(&preview, &new_preview) {
                if let Err(e) = std::fs::remove_file(&new_path) {
                    warn!("Failed to clean up partial copy {:?}: {}", new_path, e);
                }
                return Err(CatalogError::WriteFailed {
                    path: new_preview,
                    source,
                });
            }
        }

        info!("Duplicated prefab: {:?} -> {:?}", path, new_path);
        Ok(new_path)
    }

    fn delete(&mut self, path: &Path) -> CatalogResult<()> {
        if !path.is_file() {
            return Err(CatalogError::NotFound(path.to_path_buf()));
        }

        std::fs::remove_file(path).map_err(|source| CatalogError::WriteFailed {
            path: path.to_path_buf(),
            source,
        })?;

        let preview = preview_path_for(path);
        if preview.exists()
            && let Err(e) = std::fs::remove_file(&preview)
        {
            warn!("Deleted {:?} but its preview remains: {}", path, e);
        }

        info!("Deleted prefab: {:?}", path);
        Ok(())
    }

    fn confirm_destroy(&mut self, path: &Path) -> bool {
        self.confirmation.confirm(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::store::FixedConfirmation;
    use tempfile::tempdir;

    fn add_prefab(dir: &Path, name: &str, with_preview: bool) -> PathBuf {
        let path = prefab_path(dir, name);
        std::fs::write(&path, format!("prefab:{}", name)).unwrap();
        if with_preview {
            std::fs::write(preview_path_for(&path), b"png").unwrap();
        }
        path
    }

    fn store(root: &Path) -> FsAssetStore {
        FsAssetStore::with_confirmation(root, Box::new(FixedConfirmation(true)))
    }

    fn names(store: &FsAssetStore) -> Vec<String> {
        store
            .list_previewable_assets()
            .unwrap()
            .into_iter()
            .map(|r| r.name)
            .collect()
    }

    #[test]
    fn test_list_skips_prefabs_without_preview() {
        let dir = tempdir().unwrap();
        add_prefab(dir.path(), "Chair", true);
        add_prefab(dir.path(), "Table", false);
        std::fs::write(dir.path().join("notes.txt"), "x").unwrap();

        assert_eq!(names(&store(dir.path())), vec!["Chair"]);
    }

    #[test]
    fn test_list_recurses_into_subfolders() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("Avatars");
        std::fs::create_dir_all(&nested).unwrap();
        add_prefab(dir.path(), "Chair", true);
        add_prefab(&nested, "Robot", true);

        let records = store(dir.path()).list_previewable_assets().unwrap();
        assert_eq!(records.len(), 2);
        assert!(records.iter().any(|r| r.path == nested.join("Robot.prefab")));
        assert!(records.iter().all(|r| r.preview.is_file()));
    }

    #[test]
    fn test_list_missing_root_is_store_unavailable() {
        let dir = tempdir().unwrap();
        let store = store(&dir.path().join("missing"));
        assert!(matches!(
            store.list_previewable_assets(),
            Err(CatalogError::StoreUnavailable { .. })
        ));
    }

    #[test]
    fn test_rename_moves_prefab_and_preview() {
        let dir = tempdir().unwrap();
        let path = add_prefab(dir.path(), "Chair", true);
        let mut store = store(dir.path());

        let new_path = store.rename(&path, "Stool").unwrap();

        assert_eq!(new_path, dir.path().join("Stool.prefab"));
        assert!(!path.exists());
        assert!(preview_path_for(&new_path).exists());
        assert_eq!(names(&store), vec!["Stool"]);
    }

    #[test]
    fn test_rename_conflict_leaves_files_alone() {
        let dir = tempdir().unwrap();
        let chair = add_prefab(dir.path(), "Chair", true);
        add_prefab(dir.path(), "Table", true);
        let mut store = store(dir.path());

        let result = store.rename(&chair, "Table");

        assert!(matches!(result, Err(CatalogError::NameConflict(_))));
        assert!(chair.exists());
        assert_eq!(names(&store), vec!["Chair", "Table"]);
    }

    #[test]
    fn test_rename_empty_name_rejected() {
        let dir = tempdir().unwrap();
        let chair = add_prefab(dir.path(), "Chair", true);
        let mut store = store(dir.path());

        assert!(matches!(
            store.rename(&chair, "  "),
            Err(CatalogError::InvalidName(_))
        ));
        assert!(chair.exists());
    }

    #[test]
    fn test_rename_missing_is_not_found() {
        let dir = tempdir().unwrap();
        let mut store = store(dir.path());
        assert!(matches!(
            store.rename(&dir.path().join("Ghost.prefab"), "Other"),
            Err(CatalogError::NotFound(_))
        ));
    }

    #[test]
    fn test_duplicate_adds_copy_suffix() {
        let dir = tempdir().unwrap();
        let chair = add_prefab(dir.path(), "Chair", true);
        let mut store = store(dir.path());

        let copy = store.duplicate(&chair).unwrap();

        assert_eq!(copy, dir.path().join("Chair_Copy.prefab"));
        assert_eq!(std::fs::read_to_string(&copy).unwrap(), "prefab:Chair");
        assert_eq!(
            std::fs::read_to_string(&chair).unwrap(),
            "prefab:Chair",
            "original must be untouched"
        );
        assert_eq!(names(&store), vec!["Chair", "Chair_Copy"]);
    }

    #[test]
    fn test_duplicate_never_overwrites_existing_copy() {
        let dir = tempdir().unwrap();
        let chair = add_prefab(dir.path(), "Chair", true);
        let existing = add_prefab(dir.path(), "Chair_Copy", true);
        let mut store = store(dir.path());

        let copy = store.duplicate(&chair).unwrap();

        assert_eq!(copy, dir.path().join("Chair_Copy 1.prefab"));
        assert_eq!(
            std::fs::read_to_string(&existing).unwrap(),
            "prefab:Chair_Copy"
        );
    }

    #[test]
    fn test_duplicate_skips_names_taken_by_stray_previews() {
        let dir = tempdir().unwrap();
        let chair = add_prefab(dir.path(), "Chair", true);
        std::fs::write(dir.path().join("Chair_Copy.png"), b"png").unwrap();

        let copy = store(dir.path()).duplicate(&chair).unwrap();
        assert_eq!(copy, dir.path().join("Chair_Copy 1.prefab"));
    }

    #[test]
    fn test_delete_removes_prefab_and_preview() {
        let dir = tempdir().unwrap();
        let chair = add_prefab(dir.path(), "Chair", true);
        add_prefab(dir.path(), "Table", true);
        let mut store = store(dir.path());

        store.delete(&chair).unwrap();

        assert!(!chair.exists());
        assert!(!preview_path_for(&chair).exists());
        assert_eq!(names(&store), vec!["Table"]);
    }

    #[test]
    fn test_delete_missing_is_not_found() {
        let dir = tempdir().unwrap();
        let mut store = store(dir.path());
        assert!(matches!(
            store.delete(&dir.path().join("Ghost.prefab")),
            Err(CatalogError::NotFound(_))
        ));
    }

    #[test]
    fn test_confirm_destroy_delegates() {
        let dir = tempdir().unwrap();
        let mut declining =
            FsAssetStore::with_confirmation(dir.path(), Box::new(FixedConfirmation(false)));
        assert!(!declining.confirm_destroy(Path::new("Chair.prefab")));
    }
}
