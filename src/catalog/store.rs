//! Asset store collaborator surface consumed by the catalog.

use std::path::{Path, PathBuf};

use super::error::{CatalogError, CatalogResult};
use super::record::AssetRecord;

/// Suffix appended to a prefab's name when it is duplicated.
pub const COPY_SUFFIX: &str = "_Copy";

/// Characters that may not appear in an asset name.
pub const RESERVED_NAME_CHARS: [char; 9] = ['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Durable collection of prefabs and their previews.
///
/// Every mutation is keyed by path. Names are not unique across directories.
pub trait AssetStore {
    /// All assets that have a preview image, in store order.
    fn list_previewable_assets(&self) -> CatalogResult<Vec<AssetRecord>>;

    /// Rename the asset at `path`, returning its new path.
    fn rename(&mut self, path: &Path, new_name: &str) -> CatalogResult<PathBuf>;

    /// Copy the asset at `path` under a collision-free `_Copy` name, returning the copy's path.
    fn duplicate(&mut self, path: &Path) -> CatalogResult<PathBuf>;

    fn delete(&mut self, path: &Path) -> CatalogResult<()>;

    /// Ask the user whether the asset at `path` may be destroyed.
    fn confirm_destroy(&mut self, path: &Path) -> bool;
}

/// Confirmation surface used before an asset is deleted.
pub trait DestroyConfirmation: Send + Sync {
    fn confirm(&mut self, path: &Path) -> bool;
}

/// Native yes/no dialog.
pub struct DialogConfirmation;

impl DestroyConfirmation for DialogConfirmation {
    fn confirm(&mut self, path: &Path) -> bool {
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("this asset");

        let result = rfd::MessageDialog::new()
            .set_title("Delete Prefab")
            .set_description(format!(
                "Delete '{}' and its preview?\nThis cannot be undone.",
                name
            ))
            .set_level(rfd::MessageLevel::Warning)
            .set_buttons(rfd::MessageButtons::YesNo)
            .show();

        matches!(result, rfd::MessageDialogResult::Yes)
    }
}

/// Fixed answer in place of the dialog.
#[cfg(test)]
pub struct FixedConfirmation(pub bool);

#[cfg(test)]
impl DestroyConfirmation for FixedConfirmation {
    fn confirm(&mut self, _path: &Path) -> bool {
        self.0
    }
}

/// Trim and validate a user-supplied asset name.
pub fn validate_name(name: &str) -> CatalogResult<&str> {
    let name = name.trim();
    if name.is_empty() {
        return Err(CatalogError::InvalidName("name cannot be empty".to_string()));
    }
    if name.contains(RESERVED_NAME_CHARS) {
        return Err(CatalogError::InvalidName(
            "name contains invalid characters".to_string(),
        ));
    }
    Ok(name)
}

/// Candidate names for a copy of `base`: `base_Copy`, then `base_Copy 1`, `base_Copy 2`, ...
pub fn copy_name_candidates(base: &str) -> impl Iterator<Item = String> + '_ {
    std::iter::once(format!("{}{}", base, COPY_SUFFIX))
        .chain((1u32..).map(move |i| format!("{}{} {}", base, COPY_SUFFIX, i)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name_trims() {
        assert_eq!(validate_name("  Robot  ").unwrap(), "Robot");
    }

    #[test]
    fn test_validate_name_rejects_empty() {
        assert!(matches!(validate_name(""), Err(CatalogError::InvalidName(_))));
        assert!(matches!(validate_name("   "), Err(CatalogError::InvalidName(_))));
    }

    #[test]
    fn test_validate_name_rejects_reserved_chars() {
        assert!(validate_name("a/b").is_err());
        assert!(validate_name("what?").is_err());
        assert!(validate_name("Robot v2").is_ok());
    }

    #[test]
    fn test_copy_name_candidates_order() {
        let names: Vec<String> = copy_name_candidates("Chair").take(3).collect();
        assert_eq!(names, vec!["Chair_Copy", "Chair_Copy 1", "Chair_Copy 2"]);
    }

    #[test]
    fn test_fixed_confirmation() {
        assert!(FixedConfirmation(true).confirm(Path::new("a.prefab")));
        assert!(!FixedConfirmation(false).confirm(Path::new("a.prefab")));
    }
}
